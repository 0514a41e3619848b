//! Stable sorting by natural order, key function or property.
//!
//! Every sort returns a new vector and leaves its input untouched. Elements
//! whose keys compare equal keep their input order.

use std::cmp::Ordering;

use crate::value::{Shape, Value, natural_order, property, to_number};

/// Orders numeric keys ascending, with non-numeric keys after every number.
fn numeric_order(left: f64, right: f64) -> Ordering {
    match (left.is_nan(), right.is_nan()) {
        (false, false) => left.partial_cmp(&right).unwrap_or(Ordering::Equal),
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
    }
}

/// Returns a sorted copy of a sequence in natural order.
///
/// See [`natural_order`] for how values of different kinds compare. Anything
/// that is not a sequence produces an empty vector.
///
/// # Examples
///
/// ```
/// use underbar::collection::sort;
/// use underbar::value::json;
///
/// assert_eq!(sort(&json!([3, 1, 2])), vec![json!(1), json!(2), json!(3)]);
/// assert_eq!(sort(&json!("cab")), vec![json!("a"), json!("b"), json!("c")]);
/// ```
pub fn sort(list: &Value) -> Vec<Value> {
    let mut items = Shape::of(list).to_sequence().unwrap_or_default();
    items.sort_by(natural_order);
    items
}

/// Returns a copy of a sequence sorted by the numeric value of
/// `iteratee(element)`.
///
/// Keys are coerced with [`to_number`]; elements whose key is not a number
/// sort after all others. `iteratee` runs once per element. Anything that is
/// not a sequence produces an empty vector.
///
/// # Examples
///
/// ```
/// use underbar::collection::sort_by;
/// use underbar::value::json;
///
/// let sorted = sort_by(&json!([1, 2, 3, 4, 5]), |value| {
///     json!((value.as_f64().unwrap_or_default()).sin())
/// });
/// assert_eq!(sorted, vec![json!(5), json!(4), json!(3), json!(1), json!(2)]);
/// ```
pub fn sort_by<F>(list: &Value, mut iteratee: F) -> Vec<Value>
where
    F: FnMut(&Value) -> Value,
{
    let items = Shape::of(list).to_sequence().unwrap_or_default();
    let mut keyed: Vec<(f64, Value)> = items
        .into_iter()
        .map(|item| (to_number(&iteratee(&item)), item))
        .collect();
    keyed.sort_by(|(left, _), (right, _)| numeric_order(*left, *right));
    keyed.into_iter().map(|(_, item)| item).collect()
}

/// Returns a copy of a sequence sorted by the named numeric property.
///
/// Elements missing the property sort as `null`, which coerces to `0`.
///
/// # Examples
///
/// ```
/// use underbar::collection::sort_by_property;
/// use underbar::value::json;
///
/// let people = json!([
///     {"name": "moe", "age": 40},
///     {"name": "larry", "age": 50},
///     {"name": "curly", "age": 30},
/// ]);
/// let names: Vec<_> = sort_by_property(&people, "age")
///     .into_iter()
///     .map(|person| person["name"].clone())
///     .collect();
/// assert_eq!(names, vec![json!("curly"), json!("moe"), json!("larry")]);
/// ```
pub fn sort_by_property(list: &Value, name: &str) -> Vec<Value> {
    sort_by(list, |item| property(item, name).cloned().unwrap_or(Value::Null))
}
