use std::fs;
use tempfile::TempDir;
use veridoc::model::{DocumentType, VerificationStatus};
use veridoc::store::fs::FileStore;
use veridoc::store::records::RecordStore;
use veridoc::store::{KeyValueStore, KEY_DOCUMENTS};

fn setup() -> (TempDir, FileStore) {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path().to_path_buf());
    (dir, store)
}

#[test]
fn test_basic_key_io() {
    let (_dir, mut store) = setup();

    assert_eq!(store.get("documents").unwrap(), None);

    store.set("documents", "[]").unwrap();
    assert_eq!(store.get("documents").unwrap(), Some("[]".to_string()));

    store.remove("documents").unwrap();
    assert_eq!(store.get("documents").unwrap(), None);

    // Removing an absent key is fine.
    store.remove("documents").unwrap();
}

#[test]
fn test_set_leaves_no_tmp_artifacts() {
    let (dir, mut store) = setup();

    store.set(KEY_DOCUMENTS, r#"[{"fake": true}]"#).unwrap();

    let expected = dir.path().join("documents.json");
    assert!(expected.exists());
    assert_eq!(
        fs::read_to_string(&expected).unwrap(),
        r#"[{"fake": true}]"#
    );

    for entry in fs::read_dir(dir.path()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}

#[test]
fn test_records_persist_across_store_instances() {
    let dir = TempDir::new().unwrap();

    let seeded = {
        let mut store = RecordStore::new(FileStore::new(dir.path().to_path_buf()));
        let docs = store.load_documents().unwrap();
        store
            .update_status("doc-2", VerificationStatus::Verified)
            .unwrap();
        docs
    };
    assert_eq!(seeded.len(), 2);

    // A fresh store over the same directory sees the same data, not a
    // second seeding.
    let mut reopened = RecordStore::new(FileStore::new(dir.path().to_path_buf()));
    let docs = reopened.load_documents().unwrap();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].doc_type, DocumentType::Pan);
    assert_eq!(docs[1].status, VerificationStatus::Verified);
}

#[test]
fn test_corrupt_file_reseeds_on_disk() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("documents.json"), "not json at all").unwrap();

    let mut store = RecordStore::new(FileStore::new(dir.path().to_path_buf()));
    let docs = store.load_documents().unwrap();
    assert_eq!(docs.len(), 2);

    // The reseeded payload replaced the corrupt one.
    let on_disk = fs::read_to_string(dir.path().join("documents.json")).unwrap();
    assert!(serde_json::from_str::<serde_json::Value>(&on_disk).is_ok());
}

#[test]
fn test_history_persists_generated_entries() {
    let dir = TempDir::new().unwrap();

    let first = {
        let mut store = RecordStore::new(FileStore::new(dir.path().to_path_buf()));
        store.load_history().unwrap()
    };
    assert_eq!(first.len(), 15);

    let mut reopened = RecordStore::new(FileStore::new(dir.path().to_path_buf()));
    let second = reopened.load_history().unwrap();
    assert_eq!(first, second);
}
