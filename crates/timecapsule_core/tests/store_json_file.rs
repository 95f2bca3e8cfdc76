use chrono::{NaiveDate, Utc};
use std::fs;
use tempfile::tempdir;
use timecapsule_core::{Capsule, CapsuleStore, JsonFileStore, StoreError};

fn capsule(id: u64, title: &str, open_date: &str) -> Capsule {
    Capsule {
        id,
        title: title.to_string(),
        message: format!("message for {title}"),
        open_date: NaiveDate::parse_from_str(open_date, "%Y-%m-%d").unwrap(),
        created_at: Utc::now(),
    }
}

#[test]
fn absent_file_loads_as_empty_collection() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("capsules.json"));

    assert!(store.load_all().unwrap().is_empty());
}

#[test]
fn blank_file_loads_as_empty_collection() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("capsules.json");
    fs::write(&path, "  \n").unwrap();

    let store = JsonFileStore::new(&path);
    assert!(store.load_all().unwrap().is_empty());
}

#[test]
fn corrupt_file_is_an_error_not_an_empty_collection() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("capsules.json");
    fs::write(&path, "{ not json ]").unwrap();

    let store = JsonFileStore::new(&path);
    let err = store.load_all().unwrap_err();
    assert!(matches!(err, StoreError::Corrupt(_)));
}

#[test]
fn save_then_load_round_trips_all_fields() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("capsules.json"));

    let saved = vec![
        capsule(1, "Letter", "2020-01-01"),
        capsule(2, "Future", "2999-01-01"),
    ];
    store.save_all(&saved).unwrap();

    let loaded = store.load_all().unwrap();
    assert_eq!(loaded, saved);
}

#[test]
fn save_replaces_the_whole_document() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("capsules.json"));

    store.save_all(&[capsule(1, "a", "2020-01-01")]).unwrap();
    store.save_all(&[capsule(2, "b", "2021-01-01")]).unwrap();

    let loaded = store.load_all().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, 2);
}

#[test]
fn save_leaves_no_temp_file_behind() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("capsules.json");
    let store = JsonFileStore::new(&path);

    store.save_all(&[capsule(1, "a", "2020-01-01")]).unwrap();

    let entries: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("capsules.json")]);
}

#[test]
fn save_creates_missing_parent_directory() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("data").join("capsules.json");

    let store = JsonFileStore::new(&path);
    store.save_all(&[capsule(1, "a", "2020-01-01")]).unwrap();

    assert!(path.exists());
}

#[test]
fn persisted_layout_is_a_bare_array_with_wire_field_names() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("capsules.json");
    let store = JsonFileStore::new(&path);

    store.save_all(&[capsule(7, "Letter", "2024-06-15")]).unwrap();

    let document: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let array = document.as_array().expect("document must be a bare array");
    assert_eq!(array.len(), 1);
    assert_eq!(array[0]["id"], 7);
    assert_eq!(array[0]["openDate"], "2024-06-15");
    assert!(array[0]["createdAt"].is_string());
}

#[test]
fn legacy_documents_with_timestamp_ids_decode() {
    // Pretty-printed array, epoch-millisecond ids, ISO-8601 createdAt
    // with milliseconds.
    let dir = tempdir().unwrap();
    let path = dir.path().join("capsules.json");
    fs::write(
        &path,
        r#"[
  {
    "id": 1718000000000,
    "title": "Letter",
    "message": "Hi future me",
    "openDate": "2020-01-01",
    "createdAt": "2024-06-10T06:13:20.000Z"
  }
]"#,
    )
    .unwrap();

    let store = JsonFileStore::new(&path);
    let loaded = store.load_all().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, 1_718_000_000_000);
    assert_eq!(loaded[0].title, "Letter");
}
