//! Removal: forget and clear.

use serde_json::json;
use shared_data::{SharedData, Value};

#[test]
fn forget_removes_a_nested_key_and_keeps_siblings() {
    let mut data = SharedData::new();
    data.merge(json!({"foo": {"bar": "baz", "baz": "bar"}}))
        .unwrap();

    data.forget("foo.baz");
    assert_eq!(data.all().unwrap(), json!({"foo": {"bar": "baz"}}));
}

#[test]
fn forget_removes_a_whole_subtree() {
    let mut data = SharedData::new();
    data.put("a.b.c", 1).unwrap();
    data.put("a.b.d", 2).unwrap();
    data.put("a.e", 3).unwrap();

    data.forget("a.b");
    assert_eq!(data.all().unwrap(), json!({"a": {"e": 3}}));
}

#[test]
fn forgetting_an_absent_path_is_a_no_op() {
    let mut data = SharedData::new();
    data.put("kept", 1).unwrap();

    data.forget("missing");
    data.forget("kept.not.a.map");
    assert_eq!(data.all().unwrap(), json!({"kept": 1}));
}

#[test]
fn forgetting_the_empty_path_clears_everything() {
    let mut data = SharedData::new();
    data.put("stored", 1).unwrap();
    data.merge(Value::lazy(|| json!({"pending": 2}))).unwrap();

    data.forget("");
    assert_eq!(data.all().unwrap(), json!({}));
    assert_eq!(data.get("pending").unwrap(), None);
}

#[test]
fn forget_returns_self_for_chaining() {
    let mut data = SharedData::new();
    data.put("a", 1).unwrap();
    data.put("b", 2).unwrap();

    data.forget("a").forget("b");
    assert_eq!(data.all().unwrap(), json!({}));
}

#[test]
fn clear_drops_pending_sources_too() {
    let mut data = SharedData::new();
    data.put("stored", 1).unwrap();
    data.merge(Value::lazy(|| json!({"pending": 2}))).unwrap();

    data.clear();
    assert_eq!(data.to_json().unwrap(), "{}");
}

#[test]
fn pending_source_keys_cannot_be_forgotten_piecemeal() {
    let mut data = SharedData::new();
    data.merge(Value::lazy(|| json!({"live": true}))).unwrap();

    // The key only exists in materialized views; the source stays registered
    data.forget("live");
    assert_eq!(data.get("live").unwrap(), Some(json!(true)));
}
