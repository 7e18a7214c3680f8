//! Map operations: direct keys, dot paths, ordering.

use shared_data::{Map, Value};

#[test]
fn set_and_get_direct_keys() {
    let mut map = Map::new();
    assert!(map.is_empty());

    assert_eq!(map.set("a", 1i64), None);
    assert_eq!(map.set("a", 2i64), Some(Value::Int(1)));
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("a"), Some(&Value::Int(2)));
    assert!(map.contains_key("a"));
    assert!(!map.contains_key("b"));
}

#[test]
fn iteration_follows_insertion_order() {
    let mut map = Map::new();
    map.set("z", 1i64);
    map.set("a", 2i64);
    map.set("m", 3i64);
    // Overwrites keep the original position
    map.set("z", 9i64);

    let keys: Vec<&String> = map.keys().collect();
    assert_eq!(keys, ["z", "a", "m"]);
}

#[test]
fn remove_preserves_remaining_order() {
    let mut map = Map::new();
    map.set("a", 1i64);
    map.set("b", 2i64);
    map.set("c", 3i64);

    assert_eq!(map.remove("b"), Some(Value::Int(2)));
    assert_eq!(map.remove("b"), None);

    let keys: Vec<&String> = map.keys().collect();
    assert_eq!(keys, ["a", "c"]);
}

#[test]
fn set_path_auto_creates_intermediate_maps() {
    let mut map = Map::new();
    map.set_path("a.b.c", "deep").unwrap();

    assert_eq!(map.get_path("a.b.c"), Some(&Value::Text("deep".into())));
    assert!(map.get("a").is_some_and(|v| v.as_map().is_some()));
}

#[test]
fn set_path_replaces_non_maps_mid_path() {
    let mut map = Map::new();
    map.set("a", "scalar");
    map.set_path("a.b", 1i64).unwrap();

    assert_eq!(map.get_path("a.b"), Some(&Value::Int(1)));
}

#[test]
fn set_path_rejects_the_empty_path() {
    let mut map = Map::new();
    let err = map.set_path("", 1i64).unwrap_err();
    assert!(err.is_write_error());
}

#[test]
fn get_path_misses_softly() {
    let mut map = Map::new();
    map.set_path("a.b", 1i64).unwrap();

    assert_eq!(map.get_path("a.missing"), None);
    assert_eq!(map.get_path("missing.b"), None);
    // Walking through a leaf is a miss, not a panic
    assert_eq!(map.get_path("a.b.c"), None);
    assert_eq!(map.get_path(""), None);
}

#[test]
fn remove_path_prunes_only_the_leaf() {
    let mut map = Map::new();
    map.set_path("a.b", 1i64).unwrap();
    map.set_path("a.c", 2i64).unwrap();

    assert_eq!(map.remove_path("a.b"), Some(Value::Int(1)));
    assert_eq!(map.remove_path("a.b"), None);
    assert_eq!(map.get_path("a.c"), Some(&Value::Int(2)));

    // Absent or non-map intermediate segments are no-ops
    assert_eq!(map.remove_path("x.y"), None);
    assert_eq!(map.remove_path("a.c.under"), None);
    assert_eq!(map.remove_path(""), None);
}

#[test]
fn to_json_map_preserves_order_and_nesting() {
    let mut map = Map::new();
    map.set_path("user.name", "Alice").unwrap();
    map.set_path("user.tags", vec!["a", "b"]).unwrap();
    map.set("flag", true);

    let json = serde_json::Value::Object(map.to_json_map());
    assert_eq!(
        serde_json::to_string(&json).unwrap(),
        r#"{"user":{"name":"Alice","tags":["a","b"]},"flag":true}"#
    );
}

#[test]
fn collects_from_pairs() {
    let map: Map = [
        ("one".to_string(), Value::Int(1)),
        ("two".to_string(), Value::Int(2)),
    ]
    .into_iter()
    .collect();

    assert_eq!(map.len(), 2);
    assert_eq!(map.get("two"), Some(&Value::Int(2)));
}
