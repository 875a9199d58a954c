//! A crash between the temp-file write and the rename must leave the
//! primary byte-identical to its pre-write state.

use crate::common::{record, resource, TestStore};
use serde_json::json;

#[test]
fn crash_before_rename_leaves_primary_untouched() {
    let ts = TestStore::new();
    let students = resource("students");

    ts.store
        .insert(&students, record(json!({"name": "Ana"})))
        .unwrap();
    let before = ts.read_primary(&students);

    // Simulate a writer that died after writing its temp file but
    // before the rename: the temp exists, the primary is pre-write.
    std::fs::write(ts.temp_path(&students), b"[{\"name\": \"half-writ").unwrap();

    assert_eq!(ts.read_primary(&students), before);

    // A restart sweeps the stale temp and the data is still readable.
    let reopened = ts.reopen();
    assert!(!ts.temp_path(&students).exists());
    let records = reopened.list_all(&students).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["name"], json!("Ana"));
}

#[test]
fn successful_write_leaves_no_temp_file() {
    let ts = TestStore::new();
    let students = resource("students");

    ts.store
        .insert(&students, record(json!({"name": "Ana"})))
        .unwrap();

    assert!(!ts.temp_path(&students).exists());
}

#[test]
fn stale_temp_from_other_resource_is_swept_on_open() {
    let ts = TestStore::new();
    let finance = resource("finance");

    std::fs::write(ts.temp_path(&finance), b"orphan").unwrap();
    ts.reopen();

    assert!(!ts.temp_path(&finance).exists());
}

#[test]
fn every_observed_state_is_a_complete_array() {
    // Writers replace the file via rename, so a reader that loads
    // between any two writes sees a complete, parseable array.
    let ts = TestStore::new();
    let students = resource("students");

    for n in 0..20 {
        ts.store
            .insert(&students, record(json!({"n": n})))
            .unwrap();
        let bytes = ts.read_primary(&students);
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(value.is_array());
        assert_eq!(value.as_array().unwrap().len(), n as usize + 1);
    }
}
