use super::{CustomStoreError, CustomUoStore, CUSTOM_BUNDLE_VERSION};
use crate::custom::CustomUoSchema;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_store_path(label: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock ok")
        .as_nanos();
    std::env::temp_dir().join(format!("uo-sdk-custom-{label}-{nanos}.json"))
}

#[test]
fn register_persists_and_reopens() {
    let path = temp_store_path("persist");
    let mut store = CustomUoStore::open(&path).expect("open");
    assert!(store.is_empty());

    store
        .register(CustomUoSchema::new("custom_heater", "Heater", "Heat the block"))
        .expect("register");

    let reopened = CustomUoStore::open(&path).expect("reopen");
    assert_eq!(reopened.len(), 1);
    assert_eq!(
        reopened.get("custom_heater").map(|schema| schema.name.as_str()),
        Some("Heater")
    );

    let _ = std::fs::remove_file(path);
}

#[test]
fn register_rejects_incomplete_and_duplicate_names() {
    let path = temp_store_path("reject");
    let mut store = CustomUoStore::open(&path).expect("open");
    store
        .register(CustomUoSchema::new("a", "Heater", "Heat"))
        .expect("register");

    let missing = store.register(CustomUoSchema::new("b", "Cooler", ""));
    assert!(matches!(missing, Err(CustomStoreError::MissingFields)));

    let duplicate = store.register(CustomUoSchema::new("c", "HEATER", "Again"));
    let err = duplicate.expect_err("duplicate");
    assert_eq!(
        err.to_string(),
        "A Unit Operation with the name \"HEATER\" already exists"
    );
    assert_eq!(store.len(), 1);

    let _ = std::fs::remove_file(path);
}

#[test]
fn delete_reports_whether_anything_was_removed() {
    let path = temp_store_path("delete");
    let mut store = CustomUoStore::open(&path).expect("open");
    store
        .register(CustomUoSchema::new("a", "Heater", "Heat"))
        .expect("register");

    assert!(store.delete("a").expect("delete"));
    assert!(!store.delete("a").expect("delete again"));
    assert!(CustomUoStore::open(&path).expect("reopen").is_empty());

    let _ = std::fs::remove_file(path);
}

#[test]
fn bundle_import_counts_valid_entries_and_reports_the_rest() {
    let path = temp_store_path("import");
    let mut store = CustomUoStore::open(&path).expect("open");
    let input = r#"{
        "customUOs": [
            {"id": "a", "name": "Heater", "description": "Heat", "category": "thermal", "parameters": []},
            {"id": "b", "name": "Broken"},
            {"description": "no name"}
        ],
        "exportedAt": "2024-07-23T10:00:00Z",
        "version": "1.0.0"
    }"#;

    let report = store.import_bundle(input).expect("import");
    assert_eq!(report.imported, 1);
    assert_eq!(report.errors, vec!["Invalid UO: Broken", "Invalid UO: Unknown"]);

    let bundle = store.export_bundle(None);
    assert_eq!(bundle.version, CUSTOM_BUNDLE_VERSION);
    assert_eq!(bundle.custom_uos.len(), 1);

    assert!(store.import_bundle("not json").is_err());

    let _ = std::fs::remove_file(path);
}

#[test]
fn register_rejects_builtin_node_type_ids() {
    let path = temp_store_path("reserved");
    let mut store = CustomUoStore::open(&path).expect("open");
    let reserved = store.register(CustomUoSchema::new("sdl1SolutionPreparation", "Mine", "d"));
    assert!(matches!(
        reserved,
        Err(CustomStoreError::ReservedId(id)) if id == "sdl1SolutionPreparation"
    ));
    assert!(store.is_empty());
    assert!(!path.exists());
}

#[test]
fn bundle_import_skips_builtin_node_type_ids() {
    let path = temp_store_path("import-reserved");
    let mut store = CustomUoStore::open(&path).expect("open");
    let input = r#"{
        "customUOs": [
            {"id": "sdl1WashCleaning", "name": "Wash", "description": "Shadow", "parameters": []},
            {"id": "custom_heater", "name": "Heater", "description": "Heat", "parameters": []}
        ],
        "version": "1.0.0"
    }"#;
    let report = store.import_bundle(input).expect("import");
    assert_eq!(report.imported, 1);
    assert_eq!(report.errors, vec!["Reserved UO id: sdl1WashCleaning".to_string()]);
    assert!(store.get("sdl1WashCleaning").is_none());

    let catalog = crate::catalog::NodeCatalog::builtin().with_custom(store.node_definitions());
    assert!(catalog.require("custom_heater").is_ok());
    assert!(!catalog.require("sdl1WashCleaning").expect("builtin").custom);

    let _ = std::fs::remove_file(path);
}
