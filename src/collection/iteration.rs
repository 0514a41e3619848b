//! The iteration engine and the operations derived from it.
//!
//! [`each`] is the single place that walks a collection. It visits ordered
//! sequences by index, character sequences by character and keyed structures
//! in insertion order, always handing the iteratee the element, its [`Key`]
//! and the original collection. Invalid shapes are passed through without any
//! iteration.

use std::ops::ControlFlow;

use crate::value::{Key, Shape, Value, property, strict_equals};

/// Walks a collection until the visitor breaks.
///
/// Returns the break value, or `None` when every element was visited.
fn walk<B, V>(collection: &Value, mut visit: V) -> Option<B>
where
    V: FnMut(&Value, Key<'_>, &Value) -> ControlFlow<B>,
{
    match Shape::of(collection) {
        Shape::Ordered(items) => {
            for (index, item) in items.iter().enumerate() {
                if let ControlFlow::Break(outcome) = visit(item, Key::Index(index), collection) {
                    return Some(outcome);
                }
            }
        }
        Shape::Keyed(entries) => {
            for (name, item) in entries {
                if let ControlFlow::Break(outcome) =
                    visit(item, Key::Name(name.as_str()), collection)
                {
                    return Some(outcome);
                }
            }
        }
        Shape::Chars(text) => {
            for (index, character) in text.chars().enumerate() {
                let item = Value::String(character.to_string());
                if let ControlFlow::Break(outcome) = visit(&item, Key::Index(index), collection) {
                    return Some(outcome);
                }
            }
        }
        Shape::Invalid => {}
    }
    None
}

/// Returns the value unchanged.
///
/// # Examples
///
/// ```
/// use underbar::collection::identity;
///
/// assert_eq!(identity(42), 42);
/// assert_eq!(identity("hello"), "hello");
/// ```
#[inline]
pub fn identity<T>(value: T) -> T {
    value
}

/// Returns the values of a keyed structure, or a copy of an ordered sequence.
///
/// Every other shape yields an empty vector.
pub fn values(collection: &Value) -> Vec<Value> {
    match Shape::of(collection) {
        Shape::Ordered(items) => items.to_vec(),
        Shape::Keyed(entries) => entries.values().cloned().collect(),
        Shape::Chars(_) | Shape::Invalid => Vec::new(),
    }
}

/// Calls `iteratee` once for every element of `collection`.
///
/// The iteratee receives the element, its key and the collection that was
/// passed in (the same reference, not a copy). Character sequences hand over
/// each character as a one-character string. Invalid shapes are not iterated.
///
/// Returns `collection` itself so calls can be chained.
///
/// # Examples
///
/// ```
/// use underbar::collection::each;
/// use underbar::value::{Key, json};
///
/// let scores = json!({"alice": 3, "bob": 5});
/// let mut seen = Vec::new();
/// each(&scores, |value, key, _| seen.push(format!("{key}={value}")));
/// assert_eq!(seen, vec!["alice=3", "bob=5"]);
///
/// let mut indices = Vec::new();
/// each(&json!("hi"), |_, key, _| indices.extend(key.index()));
/// assert_eq!(indices, vec![0, 1]);
/// ```
pub fn each<F>(collection: &Value, mut iteratee: F) -> &Value
where
    F: FnMut(&Value, Key<'_>, &Value),
{
    walk::<(), _>(collection, |item, key, source| {
        iteratee(item, key, source);
        ControlFlow::Continue(())
    });
    collection
}

/// Like [`each`], but threads an explicit context through every call.
///
/// The context is borrowed for the duration of this call only and is handed
/// to the iteratee as its first argument.
///
/// # Examples
///
/// ```
/// use underbar::collection::each_with;
/// use underbar::value::json;
///
/// struct Totals { sum: f64 }
///
/// let mut totals = Totals { sum: 0.0 };
/// each_with(&json!([1, 2, 3]), &mut totals, |totals, value, _, _| {
///     totals.sum += value.as_f64().unwrap_or_default();
/// });
/// assert!((totals.sum - 6.0).abs() < f64::EPSILON);
/// ```
pub fn each_with<'a, C, F>(collection: &'a Value, context: &mut C, mut iteratee: F) -> &'a Value
where
    F: FnMut(&mut C, &Value, Key<'_>, &Value),
{
    each(collection, |item, key, source| {
        iteratee(context, item, key, source);
    })
}

/// Like [`each`], but stops at the first error returned by the iteratee.
///
/// # Errors
///
/// Returns the first error produced by `iteratee`; later elements are not
/// visited.
pub fn try_each<T, E, F>(collection: &Value, mut iteratee: F) -> Result<&Value, E>
where
    F: FnMut(&Value, Key<'_>, &Value) -> Result<T, E>,
{
    let failure = walk(collection, |item, key, source| match iteratee(item, key, source) {
        Ok(_) => ControlFlow::Continue(()),
        Err(error) => ControlFlow::Break(error),
    });
    failure.map_or(Ok(collection), Err)
}

/// Produces a vector with the result of `iteratee` for every element.
///
/// Invalid shapes produce an empty vector.
///
/// # Examples
///
/// ```
/// use underbar::collection::map;
/// use underbar::value::json;
///
/// let doubled = map(&json!([1, 2, 3]), |value, _, _| value.as_i64().unwrap_or(0) * 2);
/// assert_eq!(doubled, vec![2, 4, 6]);
/// ```
pub fn map<R, F>(collection: &Value, mut iteratee: F) -> Vec<R>
where
    F: FnMut(&Value, Key<'_>, &Value) -> R,
{
    let mut mapped = Vec::new();
    each(collection, |item, key, source| {
        mapped.push(iteratee(item, key, source));
    });
    mapped
}

/// Returns the elements for which `predicate` holds, in enumeration order.
///
/// Keyed structures contribute their values. Invalid shapes produce an empty
/// vector.
pub fn filter<F>(collection: &Value, mut predicate: F) -> Vec<Value>
where
    F: FnMut(&Value, Key<'_>, &Value) -> bool,
{
    let mut selected = Vec::new();
    each(collection, |item, key, source| {
        if predicate(item, key, source) {
            selected.push(item.clone());
        }
    });
    selected
}

/// The complement of [`filter`]: keeps the elements for which `predicate`
/// does not hold.
pub fn reject<F>(collection: &Value, mut predicate: F) -> Vec<Value>
where
    F: FnMut(&Value, Key<'_>, &Value) -> bool,
{
    filter(collection, |item, key, source| !predicate(item, key, source))
}

/// Returns `true` when `predicate` holds for every element.
///
/// Stops at the first element that fails. Invalid shapes are vacuously
/// `true`.
///
/// # Examples
///
/// ```
/// use underbar::collection::every;
/// use underbar::value::json;
///
/// let mut calls = 0;
/// let all = every(&json!([true, false, true, true]), |value, _, _| {
///     calls += 1;
///     value.as_bool().unwrap_or(false)
/// });
/// assert!(!all);
/// assert_eq!(calls, 2);
/// ```
pub fn every<F>(collection: &Value, mut predicate: F) -> bool
where
    F: FnMut(&Value, Key<'_>, &Value) -> bool,
{
    walk(collection, |item, key, source| {
        if predicate(item, key, source) {
            ControlFlow::Continue(())
        } else {
            ControlFlow::Break(())
        }
    })
    .is_none()
}

/// Returns `true` when `predicate` holds for at least one element.
///
/// Stops at the first element that passes. Invalid shapes are `false`.
pub fn some<F>(collection: &Value, mut predicate: F) -> bool
where
    F: FnMut(&Value, Key<'_>, &Value) -> bool,
{
    walk(collection, |item, key, source| {
        if predicate(item, key, source) {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })
    .is_some()
}

/// Folds the collection into a single value.
///
/// Without a `memo` the first element seeds the fold and `iteratee` starts at
/// the second element. Returns `None` for invalid shapes and for an empty
/// collection without a seed.
///
/// # Examples
///
/// ```
/// use underbar::collection::reduce;
/// use underbar::value::json;
///
/// let sum = reduce(
///     &json!([1, 2, 3]),
///     |memo, value, _, _| json!(memo.as_i64().unwrap_or(0) + value.as_i64().unwrap_or(0)),
///     None,
/// );
/// assert_eq!(sum, Some(json!(6)));
///
/// assert_eq!(reduce(&json!(7), |memo, _, _, _| memo, Some(json!(0))), None);
/// ```
pub fn reduce<F>(collection: &Value, mut iteratee: F, memo: Option<Value>) -> Option<Value>
where
    F: FnMut(Value, &Value, Key<'_>, &Value) -> Value,
{
    if !Shape::of(collection).is_valid() {
        return None;
    }
    let mut accumulator = memo;
    each(collection, |item, key, source| {
        accumulator = Some(match accumulator.take() {
            None => item.clone(),
            Some(memo) => iteratee(memo, item, key, source),
        });
    });
    accumulator
}

/// Like [`reduce`], but stops at the first error returned by the iteratee.
///
/// # Errors
///
/// Returns the first error produced by `iteratee`.
pub fn try_reduce<E, F>(
    collection: &Value,
    mut iteratee: F,
    memo: Option<Value>,
) -> Result<Option<Value>, E>
where
    F: FnMut(Value, &Value, Key<'_>, &Value) -> Result<Value, E>,
{
    if !Shape::of(collection).is_valid() {
        return Ok(None);
    }
    let mut accumulator = memo;
    try_each(collection, |item, key, source| {
        accumulator = Some(match accumulator.take() {
            None => item.clone(),
            Some(memo) => iteratee(memo, item, key, source)?,
        });
        Ok::<(), E>(())
    })?;
    Ok(accumulator)
}

/// Extracts the named property of every element.
///
/// Elements without the property contribute `None`.
pub fn pluck(collection: &Value, name: &str) -> Vec<Option<Value>> {
    map(collection, |item, _, _| property(item, name).cloned())
}

/// Returns the elements of an ordered sequence that contain every key/value
/// pair of `properties`.
///
/// A non-sequence `list` yields an empty vector; a `properties` value that is
/// not an object yields a copy of the list unfiltered.
pub fn where_matching(list: &Value, properties: &Value) -> Vec<Value> {
    let Shape::Ordered(items) = Shape::of(list) else {
        return Vec::new();
    };
    let Value::Object(expected) = properties else {
        return items.to_vec();
    };
    filter(list, |item, _, _| {
        expected.iter().all(|(name, wanted)| {
            property(item, name).is_some_and(|actual| strict_equals(actual, wanted))
        })
    })
}
