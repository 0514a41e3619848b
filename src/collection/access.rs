//! Positional access and shuffling.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::value::{Shape, Value};

/// Returns the first element of a sequence.
///
/// Character sequences are treated as sequences of one-character strings.
/// Returns `None` for an empty sequence and for anything that is not a
/// sequence.
///
/// # Examples
///
/// ```
/// use underbar::collection::first;
/// use underbar::value::json;
///
/// assert_eq!(first(&json!([5, 4, 3])), Some(json!(5)));
/// assert_eq!(first(&json!("abc")), Some(json!("a")));
/// assert_eq!(first(&json!(null)), None);
/// ```
pub fn first(list: &Value) -> Option<Value> {
    match Shape::of(list) {
        Shape::Ordered(items) => items.first().cloned(),
        Shape::Chars(text) => text.chars().next().map(|character| character.to_string().into()),
        Shape::Keyed(_) | Shape::Invalid => None,
    }
}

/// Returns the first `count` elements of a sequence.
///
/// A `count` beyond the length returns the whole sequence. Returns `None` for
/// anything that is not a sequence.
pub fn first_n(list: &Value, count: usize) -> Option<Vec<Value>> {
    let mut items = Shape::of(list).to_sequence()?;
    items.truncate(count);
    Some(items)
}

/// Returns the last element of a sequence.
///
/// The mirror of [`first`].
pub fn last(list: &Value) -> Option<Value> {
    match Shape::of(list) {
        Shape::Ordered(items) => items.last().cloned(),
        Shape::Chars(text) => text
            .chars()
            .next_back()
            .map(|character| character.to_string().into()),
        Shape::Keyed(_) | Shape::Invalid => None,
    }
}

/// Returns the last `count` elements of a sequence, in their original order.
///
/// The mirror of [`first_n`].
pub fn last_n(list: &Value, count: usize) -> Option<Vec<Value>> {
    let mut items = Shape::of(list).to_sequence()?;
    let start = items.len().saturating_sub(count);
    Some(items.split_off(start))
}

/// Returns the elements of a collection in a random order.
///
/// Keyed structures contribute their values and character sequences their
/// characters. Invalid shapes produce an empty vector.
pub fn shuffle(collection: &Value) -> Vec<Value> {
    shuffle_with(collection, &mut rand::thread_rng())
}

/// Like [`shuffle`], drawing randomness from `rng`.
pub fn shuffle_with<R>(collection: &Value, rng: &mut R) -> Vec<Value>
where
    R: Rng + ?Sized,
{
    let mut items = Shape::of(collection).to_values().unwrap_or_default();
    items.shuffle(rng);
    items
}
