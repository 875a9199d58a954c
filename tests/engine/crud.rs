//! Collection API behavior end to end.

use crate::common::{record, resource, TestStore};
use serde_json::json;

#[test]
fn insert_get_delete_round_trip() {
    let ts = TestStore::new();
    let students = resource("students");

    let ana = ts
        .store
        .insert(&students, record(json!({"name": "Ana"})))
        .unwrap();
    let id = ana.id().expect("id was generated").to_string();

    let found = ts.store.get_by_id(&students, &id).unwrap().unwrap();
    assert_eq!(found["name"], json!("Ana"));
    assert_eq!(found, ana);

    assert!(ts.store.delete(&students, &id).unwrap());
    assert!(ts.store.get_by_id(&students, &id).unwrap().is_none());
    assert!(ts
        .store
        .list_all(&students)
        .unwrap()
        .iter()
        .all(|r| r.id() != Some(id.as_str())));
}

#[test]
fn inserting_n_records_yields_n_distinct_ids_in_order() {
    let ts = TestStore::new();
    let students = resource("students");

    let mut expected = Vec::new();
    for n in 0..50 {
        let stored = ts
            .store
            .insert(&students, record(json!({"n": n})))
            .unwrap();
        expected.push(stored.id().unwrap().to_string());
    }

    let listed = ts.store.list_all(&students).unwrap();
    let ids: Vec<_> = listed.iter().map(|r| r.id().unwrap().to_string()).collect();
    assert_eq!(ids, expected, "insertion order preserved");

    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), 50, "all ids distinct");
}

#[test]
fn listing_missing_resource_is_empty_not_error() {
    let ts = TestStore::new();
    assert!(ts.store.list_all(&resource("never-written")).unwrap().is_empty());
}

#[test]
fn insert_many_lands_as_one_batch() {
    let ts = TestStore::new();
    let attendance = resource("attendance");

    let batch = vec![
        record(json!({"student_id": "s1", "status": "present"})),
        record(json!({"student_id": "s2", "status": "absent"})),
        record(json!({"student_id": "s3", "status": "present"})),
    ];
    let stored = ts.store.insert_many(&attendance, batch).unwrap();

    assert_eq!(stored.len(), 3);
    assert!(stored.iter().all(|r| r.id().is_some()));
    assert_eq!(ts.store.list_all(&attendance).unwrap(), stored);
}

#[test]
fn update_rewrites_only_the_matching_record() {
    let ts = TestStore::new();
    let students = resource("students");

    let ana = ts
        .store
        .insert(&students, record(json!({"name": "Ana"})))
        .unwrap();
    let bea = ts
        .store
        .insert(&students, record(json!({"name": "Bea"})))
        .unwrap();

    ts.store
        .update(&students, ana.id().unwrap(), |r| {
            r.set("name", json!("Ana Maria"));
        })
        .unwrap()
        .unwrap();

    let listed = ts.store.list_all(&students).unwrap();
    assert_eq!(listed[0]["name"], json!("Ana Maria"));
    assert_eq!(listed[1], bea);
}

#[test]
fn update_missing_id_returns_none() {
    let ts = TestStore::new();
    let students = resource("students");
    ts.store
        .insert(&students, record(json!({"name": "Ana"})))
        .unwrap();

    let result = ts.store.update(&students, "no-such-id", |_| {}).unwrap();
    assert!(result.is_none());
}

#[test]
fn delete_missing_id_returns_false() {
    let ts = TestStore::new();
    let students = resource("students");

    assert!(!ts.store.delete(&students, "no-such-id").unwrap());
}

#[test]
fn find_applies_caller_predicate() {
    let ts = TestStore::new();
    let finance = resource("finance");

    ts.store
        .insert_many(
            &finance,
            vec![
                record(json!({"type": "income", "amount": 50.0})),
                record(json!({"type": "expense", "amount": 20.0})),
                record(json!({"type": "income", "amount": 30.0})),
            ],
        )
        .unwrap();

    let income = ts
        .store
        .find(&finance, |r| r["type"] == json!("income"))
        .unwrap();

    assert_eq!(income.len(), 2);
    let amounts: Vec<_> = income.iter().map(|r| r["amount"].as_f64().unwrap()).collect();
    assert_eq!(amounts, [50.0, 30.0]);
}

#[test]
fn resources_are_independent_files() {
    let ts = TestStore::new();
    let students = resource("students");
    let classes = resource("classes");

    ts.store
        .insert(&students, record(json!({"name": "Ana"})))
        .unwrap();
    ts.store
        .insert(&classes, record(json!({"name": "yoga"})))
        .unwrap();

    assert!(ts.primary_path(&students).exists());
    assert!(ts.primary_path(&classes).exists());
    assert_eq!(ts.store.list_all(&students).unwrap().len(), 1);
    assert_eq!(ts.store.list_all(&classes).unwrap().len(), 1);
}

#[test]
fn data_survives_restart() {
    let ts = TestStore::new();
    let students = resource("students");
    let ana = ts
        .store
        .insert(&students, record(json!({"name": "Ana"})))
        .unwrap();

    let reopened = ts.reopen();
    let found = reopened
        .get_by_id(&students, ana.id().unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(found, ana);
}

#[test]
fn ensure_resource_creates_empty_array_file() {
    let ts = TestStore::new();
    let users = resource("users");

    ts.store.ensure_resource(&users).unwrap();

    let bytes = ts.read_primary(&users);
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value, json!([]));
}
