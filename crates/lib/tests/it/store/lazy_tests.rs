//! Lazy resolution: keyed producers, keyless pending sources, re-invocation.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde_json::json;
use shared_data::{SharedData, Value};

#[test]
fn keyed_lazy_values_read_live_state() {
    let state = Rc::new(RefCell::new("foo".to_string()));
    let captured = Rc::clone(&state);

    let mut data = SharedData::new();
    data.put("lazy", Value::lazy(move || captured.borrow().clone()))
        .unwrap();

    assert_eq!(data.get("lazy").unwrap(), Some(json!("foo")));

    *state.borrow_mut() = "bar".to_string();
    assert_eq!(data.get("lazy").unwrap(), Some(json!("bar")));
}

#[test]
fn producers_run_on_every_read_and_are_never_cached() {
    let calls = Rc::new(Cell::new(0));
    let captured = Rc::clone(&calls);

    let mut data = SharedData::new();
    data.put(
        "counter",
        Value::lazy(move || {
            captured.set(captured.get() + 1);
            captured.get()
        }),
    )
    .unwrap();

    assert_eq!(calls.get(), 0, "registration must not invoke the producer");
    assert_eq!(data.get("counter").unwrap(), Some(json!(1)));
    assert_eq!(data.get("counter").unwrap(), Some(json!(2)));
    assert_eq!(data.to_json().unwrap(), r#"{"counter":3}"#);
    assert_eq!(calls.get(), 3);
}

#[test]
fn keyless_lazy_sources_stay_pending_across_reads() {
    let state = Rc::new(RefCell::new("first".to_string()));
    let captured = Rc::clone(&state);

    let mut data = SharedData::new();
    data.merge(Value::lazy(move || {
        json!({"live": captured.borrow().clone()})
    }))
    .unwrap();

    assert_eq!(data.get("live").unwrap(), Some(json!("first")));
    assert!(data.contains_key("live").unwrap());

    // The source is re-resolved, not drained, so later reads see mutations
    *state.borrow_mut() = "second".to_string();
    assert_eq!(data.get("live").unwrap(), Some(json!("second")));
    assert_eq!(data.all().unwrap(), json!({"live": "second"}));
}

#[test]
fn pending_sources_overlay_stored_data_in_registration_order() {
    let mut data = SharedData::new();
    data.put("a", "stored").unwrap();
    data.merge(Value::lazy(|| json!({"a": "from-source-1", "b": 1})))
        .unwrap();
    data.merge(Value::lazy(|| json!({"b": 2, "c": 3}))).unwrap();

    assert_eq!(
        data.all().unwrap(),
        json!({"a": "from-source-1", "b": 2, "c": 3})
    );
}

#[test]
fn lazy_values_nested_inside_maps_are_forced_on_read() {
    let mut data = SharedData::new();
    let nested: Value = [
        ("static".to_string(), Value::from("yes")),
        ("computed".to_string(), Value::lazy(|| 7)),
    ]
    .into_iter()
    .collect();
    data.put("outer", nested).unwrap();

    assert_eq!(data.get("outer.computed").unwrap(), Some(json!(7)));
    assert_eq!(
        data.get("outer").unwrap(),
        Some(json!({"static": "yes", "computed": 7}))
    );
    // The serialized form never contains an unresolved producer
    assert_eq!(
        data.to_json().unwrap(),
        r#"{"outer":{"static":"yes","computed":7}}"#
    );
}

#[test]
fn paths_traverse_through_lazy_maps() {
    let mut data = SharedData::new();
    data.put("config", Value::lazy(|| json!({"nested": {"deep": true}})))
        .unwrap();

    assert_eq!(data.get("config.nested.deep").unwrap(), Some(json!(true)));
    assert_eq!(data.get("config.nested.absent").unwrap(), None);
}

#[test]
fn lazy_chains_resolve_to_the_final_value() {
    let mut data = SharedData::new();
    data.put("chained", Value::lazy(|| Value::lazy(|| "bottom")))
        .unwrap();

    assert_eq!(data.get("chained").unwrap(), Some(json!("bottom")));
}

#[test]
fn keyless_source_producing_a_scalar_fails_resolution() {
    let mut data = SharedData::new();
    data.put("fine", 1).unwrap();
    data.merge(Value::lazy(|| "not a map")).unwrap();

    let err = data.all().unwrap_err();
    assert!(err.is_resolution_error());
    // Every read resolves pending sources, so every read fails the same way
    assert!(data.get("fine").unwrap_err().is_resolution_error());
    assert!(data.to_json().is_err());
}
