#![cfg(feature = "object")]
//! Integration tests for extend and defaults.

use rstest::rstest;
use underbar::object::{defaults, extend};
use underbar::value::{Value, json};

#[rstest]
fn extend_later_sources_win() {
    let mut destination = json!({"name": "moe", "age": 40});
    extend(
        &mut destination,
        &[json!({"age": 50}), json!({"age": 60, "job": "stooge"})],
    );
    assert_eq!(destination, json!({"name": "moe", "age": 60, "job": "stooge"}));
}

#[rstest]
fn extend_returns_the_destination_for_chaining() {
    let mut destination = json!({});
    let returned = extend(&mut destination, &[json!({"a": 1})]);
    returned["b"] = json!(2);
    assert_eq!(destination, json!({"a": 1, "b": 2}));
}

#[rstest]
fn extend_copies_array_sources_by_index() {
    let mut destination = json!({"0": "kept?"});
    extend(&mut destination, &[json!(["x", "y"])]);
    assert_eq!(destination, json!({"0": "x", "1": "y"}));
}

#[rstest]
#[case(json!(null))]
#[case(json!(3))]
#[case(json!(true))]
fn extend_ignores_scalar_sources(#[case] source: Value) {
    let mut destination = json!({"a": 1});
    extend(&mut destination, &[source]);
    assert_eq!(destination, json!({"a": 1}));
}

#[rstest]
fn extend_keeps_existing_key_order() {
    let mut destination = json!({"first": 1, "second": 2});
    extend(&mut destination, &[json!({"third": 3, "first": 10})]);
    let keys: Vec<&String> = destination
        .as_object()
        .map(|entries| entries.keys().collect())
        .unwrap_or_default();
    assert_eq!(keys, vec!["first", "second", "third"]);
}

#[rstest]
fn defaults_fills_only_missing_keys() {
    let mut ice_cream = json!({"flavor": "chocolate"});
    defaults(
        &mut ice_cream,
        &[json!({"flavor": "vanilla", "sprinkles": "lots"})],
    );
    assert_eq!(ice_cream, json!({"flavor": "chocolate", "sprinkles": "lots"}));
}

#[rstest]
fn defaults_does_not_overwrite_null_values() {
    let mut destination = json!({"value": null});
    defaults(&mut destination, &[json!({"value": 1})]);
    assert_eq!(destination, json!({"value": null}));
}

// =============================================================================
// Array destinations
// =============================================================================

#[rstest]
fn extend_overwrites_array_elements_by_index() {
    let mut destination = json!([1, 2]);
    extend(&mut destination, &[json!({"0": "x"})]);
    assert_eq!(destination, json!(["x", 2]));
}

#[rstest]
fn extend_appends_contiguous_indices_to_an_array() {
    let mut destination = json!([1]);
    extend(&mut destination, &[json!(["a", "b", "c"])]);
    assert_eq!(destination, json!(["a", "b", "c"]));
}

#[rstest]
fn extend_skips_gaps_and_named_keys_on_an_array() {
    let mut destination = json!([1]);
    extend(
        &mut destination,
        &[json!({"5": "far", "name": "moe", "01": "padded", "1": "next"})],
    );
    assert_eq!(destination, json!([1, "next"]));
}

#[rstest]
fn defaults_keeps_existing_array_elements() {
    let mut destination = json!([1, 2]);
    defaults(&mut destination, &[json!({"0": "zero"})]);
    assert_eq!(destination, json!([1, 2]));
}

#[rstest]
fn defaults_fills_array_slots_past_the_end() {
    let mut destination = json!([1]);
    defaults(&mut destination, &[json!(["a", "b"]), json!(["c", "d", "e"])]);
    assert_eq!(destination, json!([1, "b", "e"]));
}

#[rstest]
fn extend_and_defaults_leave_scalar_destinations_alone() {
    let mut destination = json!("text");
    extend(&mut destination, &[json!({"0": "x"})]);
    defaults(&mut destination, &[json!({"length": 1})]);
    assert_eq!(destination, json!("text"));
}
