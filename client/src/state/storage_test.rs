use super::*;

fn temp_store_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("studio-store-{}", uuid::Uuid::new_v4()))
        .join("session.json")
}

// =============================================================
// MemoryStore
// =============================================================

#[test]
fn memory_store_get_set_remove() {
    let mut store = MemoryStore::new();
    assert_eq!(store.get("authToken"), None);
    store.set("authToken", "T").unwrap();
    assert_eq!(store.get("authToken").as_deref(), Some("T"));
    store.remove("authToken").unwrap();
    assert_eq!(store.get("authToken"), None);
}

#[test]
fn memory_store_remove_missing_key_is_ok() {
    let mut store = MemoryStore::new();
    assert!(store.remove("nope").is_ok());
}

// =============================================================
// FileStore
// =============================================================

#[test]
fn file_store_missing_file_opens_empty() {
    let store = FileStore::open(temp_store_path()).unwrap();
    assert_eq!(store.get("authToken"), None);
}

#[test]
fn file_store_persists_across_reopen() {
    let path = temp_store_path();
    {
        let mut store = FileStore::open(&path).unwrap();
        store.set("authToken", "T").unwrap();
        store.set("refreshToken", "R").unwrap();
        store.remove("refreshToken").unwrap();
    }
    let reopened = FileStore::open(&path).unwrap();
    assert_eq!(reopened.get("authToken").as_deref(), Some("T"));
    assert_eq!(reopened.get("refreshToken"), None);
    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn file_store_rejects_corrupt_file() {
    let path = temp_store_path();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "[1, 2, 3]").unwrap();
    let err = FileStore::open(&path).unwrap_err();
    assert!(matches!(err, StoreError::Corrupt { .. }));
    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn file_store_empty_file_opens_empty() {
    let path = temp_store_path();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "").unwrap();
    let store = FileStore::open(&path).unwrap();
    assert_eq!(store.get("authToken"), None);
    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}
