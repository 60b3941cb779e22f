//! 应用运行配置加载。

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 记录仓库使用的键值存储后端。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    File,
    Redis,
    Postgres,
}

impl FromStr for StorageBackend {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            "redis" => Ok(Self::Redis),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            _ => Err(()),
        }
    }
}

/// 应用运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_addr: String,
    pub storage: StorageBackend,
    pub data_dir: PathBuf,
    pub redis_url: Option<String>,
    pub redis_key_prefix: String,
    pub database_url: Option<String>,
    pub pdf_rows_per_page: Option<usize>,
    pub export_dir: Option<PathBuf>,
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let http_addr =
            env::var("CTRLDOC_HTTP_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let storage = read_storage_backend("CTRLDOC_STORAGE", StorageBackend::File)?;
        let data_dir = env::var("CTRLDOC_DATA_DIR").unwrap_or_else(|_| "./data".to_string());
        let redis_url = read_optional("CTRLDOC_REDIS_URL");
        let redis_key_prefix =
            env::var("CTRLDOC_REDIS_KEY_PREFIX").unwrap_or_else(|_| "ctrldoc".to_string());
        let database_url = read_optional("CTRLDOC_DATABASE_URL");
        let pdf_rows_per_page =
            read_optional_usize("CTRLDOC_PDF_ROWS_PER_PAGE")?.filter(|value| *value > 0);
        let export_dir = read_optional("CTRLDOC_EXPORT_DIR").map(PathBuf::from);

        // 远程后端必须给出连接地址
        match storage {
            StorageBackend::Redis if redis_url.is_none() => {
                return Err(ConfigError::Missing("CTRLDOC_REDIS_URL".to_string()));
            }
            StorageBackend::Postgres if database_url.is_none() => {
                return Err(ConfigError::Missing("CTRLDOC_DATABASE_URL".to_string()));
            }
            _ => {}
        }

        Ok(Self {
            http_addr,
            storage,
            data_dir: PathBuf::from(data_dir),
            redis_url,
            redis_key_prefix,
            database_url,
            pdf_rows_per_page,
            export_dir,
        })
    }
}

fn read_storage_backend(
    key: &str,
    default: StorageBackend,
) -> Result<StorageBackend, ConfigError> {
    let value = match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => return Ok(default),
    };
    value
        .parse::<StorageBackend>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}

fn read_optional_usize(key: &str) -> Result<Option<usize>, ConfigError> {
    match env::var(key) {
        Ok(value) if value.is_empty() => Ok(None),
        Ok(value) => value
            .parse::<usize>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(key.to_string(), value)),
        Err(_) => Ok(None),
    }
}
