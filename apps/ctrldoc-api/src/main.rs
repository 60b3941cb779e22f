//! 控制器文档 HTTP API：记录维护、仪表盘、模板、灯具预设与导出。

mod handlers;
mod middleware;
mod routes;
mod utils;

use axum::{Router, middleware as axum_middleware};
use ctrldoc_config::{AppConfig, StorageBackend};
use ctrldoc_export::DocumentOptions;
use ctrldoc_storage::{
    BlobStore, FileBlobStore, InMemoryBlobStore, PgBlobStore, RecordStore, RedisBlobStore,
};
use ctrldoc_telemetry::init_tracing;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub records: Arc<RecordStore>,
    pub document_options: DocumentOptions,
    pub export_dir: Option<PathBuf>,
}

impl AppState {
    pub fn new(records: Arc<RecordStore>) -> Self {
        Self {
            records,
            document_options: DocumentOptions::default(),
            export_dir: None,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    // 从环境变量加载运行配置
    let config = AppConfig::from_env()?;
    // 初始化结构化日志
    init_tracing();

    let blobs = connect_blob_store(&config).await?;
    let state = AppState {
        records: Arc::new(RecordStore::new(blobs)),
        document_options: DocumentOptions {
            rows_per_page: config.pdf_rows_per_page,
        },
        export_dir: config.export_dir.clone(),
    };

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
    info!(addr = %config.http_addr, storage = ?config.storage, "ctrldoc api listening");
    axum::serve(listener, app).await?;
    Ok(())
}

/// 按配置选择键值存储后端
async fn connect_blob_store(
    config: &AppConfig,
) -> Result<Arc<dyn BlobStore>, Box<dyn std::error::Error>> {
    let blobs: Arc<dyn BlobStore> = match config.storage {
        StorageBackend::Memory => Arc::new(InMemoryBlobStore::new()),
        StorageBackend::File => Arc::new(FileBlobStore::open(&config.data_dir).await?),
        StorageBackend::Redis => {
            let url = config.redis_url.as_deref().unwrap_or_default();
            Arc::new(RedisBlobStore::connect(url, &config.redis_key_prefix)?)
        }
        StorageBackend::Postgres => {
            let url = config.database_url.as_deref().unwrap_or_default();
            Arc::new(PgBlobStore::connect(url).await?)
        }
    };
    Ok(blobs)
}

pub fn build_router(state: AppState) -> Router {
    routes::create_api_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // 注入 request_id/trace_id
        .layer(axum_middleware::from_fn(middleware::request_context))
}
