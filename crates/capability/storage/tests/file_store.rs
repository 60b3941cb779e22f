use ctrldoc_storage::{BlobStore, CONTROLLERS_KEY, FileBlobStore, RecordStore};
use domain::ControllerData;
use std::sync::Arc;

#[tokio::test]
async fn missing_key_reads_as_none() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileBlobStore::open(dir.path()).await.expect("open");
    assert!(store.get("controller_docs").await.expect("get").is_none());
    assert!(!store.remove("controller_docs").await.expect("remove"));
}

#[tokio::test]
async fn put_overwrites_and_leaves_no_temp_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileBlobStore::open(dir.path()).await.expect("open");
    store.put("fixture_configs", "[1]").await.expect("put");
    store.put("fixture_configs", "[1,2]").await.expect("put");

    assert_eq!(
        store.get("fixture_configs").await.expect("get").as_deref(),
        Some("[1,2]")
    );
    let names: Vec<String> = std::fs::read_dir(dir.path())
        .expect("read dir")
        .map(|entry| entry.expect("entry").file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["fixture_configs.json".to_string()]);
}

#[tokio::test]
async fn rejects_keys_that_escape_data_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileBlobStore::open(dir.path()).await.expect("open");
    assert!(store.put("../outside", "x").await.is_err());
    assert!(store.get("a/b").await.is_err());
}

#[tokio::test]
async fn records_survive_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut draft = ControllerData::new_draft();
    draft.campus = "North".to_string();
    draft.building = "B1".to_string();
    draft.controller_number = "C-01".to_string();

    {
        let blobs = FileBlobStore::open(dir.path()).await.expect("open");
        let records = RecordStore::new(Arc::new(blobs));
        records.save_controller(draft.clone()).await.expect("save");
    }

    let blobs = FileBlobStore::open(dir.path()).await.expect("reopen");
    assert!(blobs.get(CONTROLLERS_KEY).await.expect("get").is_some());
    let records = RecordStore::new(Arc::new(blobs));
    let found = records
        .find_controller(&draft.id)
        .await
        .expect("find")
        .expect("controller");
    assert_eq!(found, draft);
}

#[tokio::test]
async fn open_creates_nested_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    let nested = dir.path().join("a").join("b");
    let store = FileBlobStore::open(&nested).await.expect("open");
    assert_eq!(store.dir(), nested.as_path());
    assert!(nested.is_dir());
}
