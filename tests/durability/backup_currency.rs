//! After any successful write, the backup equals the primary's content
//! immediately prior to that write.

use crate::common::{record, resource, TestStore};
use serde_json::json;

#[test]
fn backup_equals_previous_primary_after_each_write() {
    let ts = TestStore::new();
    let students = resource("students");

    ts.store
        .insert(&students, record(json!({"n": 1})))
        .unwrap();

    for _ in 0..5 {
        let before = ts.read_primary(&students);
        ts.store
            .insert(&students, record(json!({"n": 2})))
            .unwrap();
        assert_eq!(ts.read_backup(&students), before);
    }
}

#[test]
fn first_write_creates_no_backup() {
    let ts = TestStore::new();
    let students = resource("students");

    ts.store
        .insert(&students, record(json!({"n": 1})))
        .unwrap();

    assert!(!ts.backup_path(&students).exists());
}

#[test]
fn update_and_delete_also_back_up() {
    let ts = TestStore::new();
    let students = resource("students");
    let ana = ts
        .store
        .insert(&students, record(json!({"name": "Ana"})))
        .unwrap();
    let id = ana.id().unwrap().to_string();

    let before_update = ts.read_primary(&students);
    ts.store
        .update(&students, &id, |r| r.set("phone", json!("555")))
        .unwrap();
    assert_eq!(ts.read_backup(&students), before_update);

    let before_delete = ts.read_primary(&students);
    assert!(ts.store.delete(&students, &id).unwrap());
    assert_eq!(ts.read_backup(&students), before_delete);
}

#[test]
fn backup_lags_by_exactly_one_generation() {
    let ts = TestStore::new();
    let students = resource("students");

    ts.store
        .insert(&students, record(json!({"id": "a"})))
        .unwrap();
    ts.store
        .insert(&students, record(json!({"id": "b"})))
        .unwrap();
    ts.store
        .insert(&students, record(json!({"id": "c"})))
        .unwrap();

    // Backup holds [a, b]; primary holds [a, b, c]
    let restored = ts.store.restore(&students).unwrap();
    let ids: Vec<_> = restored.iter().map(|r| r.id().unwrap()).collect();
    assert_eq!(ids, ["a", "b"]);
}

#[test]
fn generation_backups_accumulate() {
    let ts = TestStore::new();
    let students = resource("students");

    ts.store
        .insert(&students, record(json!({"n": 1})))
        .unwrap();
    ts.store
        .insert(&students, record(json!({"n": 2})))
        .unwrap();

    // First write had no primary to preserve; the second did.
    let generations = std::fs::read_dir(ts.dir.path().join("backups"))
        .unwrap()
        .count();
    assert_eq!(generations, 1);
}
