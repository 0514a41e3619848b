//! Linear and binary search, membership and uniqueness.
//!
//! # Preconditions
//!
//! [`SearchMode::Sorted`] and [`sorted_index`] assume the sequence is sorted
//! ascending under [`less_than`](crate::value::less_than). Nothing checks
//! this: on an unsorted sequence a binary search may miss a value that is
//! present.

use std::borrow::Cow;

use crate::value::{Shape, Value, less_than, property, strict_equals};

/// How [`index_of`] looks for a value.
///
/// # Examples
///
/// ```
/// use underbar::collection::SearchMode;
/// use underbar::value::json;
///
/// assert_eq!(SearchMode::from(true), SearchMode::Sorted);
/// assert_eq!(SearchMode::from(2_usize), SearchMode::From(2));
/// assert_eq!(SearchMode::from_value(&json!(false)), Some(SearchMode::Linear));
/// assert_eq!(SearchMode::from_value(&json!("yes")), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Scan from the first element.
    #[default]
    Linear,
    /// Scan from the given offset.
    From(usize),
    /// Binary search over a sequence sorted ascending.
    Sorted,
}

impl SearchMode {
    /// Interprets a dynamic mode argument.
    ///
    /// Booleans select [`SearchMode::Sorted`] or [`SearchMode::Linear`];
    /// non-negative integers select an offset. Anything else has no mode,
    /// which callers treat as "not found".
    pub fn from_value(mode: &Value) -> Option<Self> {
        match mode {
            Value::Bool(sorted) => Some(Self::from(*sorted)),
            Value::Number(number) => number
                .as_u64()
                .and_then(|offset| usize::try_from(offset).ok())
                .map(Self::From),
            _ => None,
        }
    }
}

impl From<bool> for SearchMode {
    fn from(sorted: bool) -> Self {
        if sorted { Self::Sorted } else { Self::Linear }
    }
}

impl From<usize> for SearchMode {
    fn from(offset: usize) -> Self {
        Self::From(offset)
    }
}

/// Borrows the elements of a sequence, splitting character sequences.
fn sequence(list: &Value) -> Option<Cow<'_, [Value]>> {
    match Shape::of(list) {
        Shape::Ordered(items) => Some(Cow::Borrowed(items)),
        shape @ Shape::Chars(_) => shape.to_sequence().map(Cow::Owned),
        Shape::Keyed(_) | Shape::Invalid => None,
    }
}

fn search(items: &[Value], target: &Value, mode: SearchMode) -> Option<usize> {
    match mode {
        SearchMode::Linear => search(items, target, SearchMode::From(0)),
        SearchMode::From(offset) => items
            .get(offset..)?
            .iter()
            .position(|item| strict_equals(item, target))
            .map(|position| position + offset),
        SearchMode::Sorted => {
            let (mut low, mut high) = (0, items.len());
            while low < high {
                let middle = low + (high - low) / 2;
                let candidate = &items[middle];
                if strict_equals(candidate, target) {
                    return Some(middle);
                }
                if less_than(candidate, target) {
                    low = middle + 1;
                } else {
                    high = middle;
                }
            }
            None
        }
    }
}

/// Returns the position of `target` in a sequence.
///
/// Character sequences are searched character by character. Returns `None`
/// when the value is absent, the sequence is empty, the offset lies beyond
/// the end, or `list` is not a sequence. With [`SearchMode::Sorted`] any
/// matching index may be returned when the value occurs more than once.
///
/// # Examples
///
/// ```
/// use underbar::collection::index_of;
/// use underbar::value::json;
///
/// let list = json!([0, 10, 20, 30, 40, 50]);
/// assert_eq!(index_of(&list, &json!(20), true), Some(2));
/// assert_eq!(index_of(&list, &json!("x"), true), None);
/// assert_eq!(index_of(&json!([1, 2, 1]), &json!(1), 1_usize), Some(2));
/// ```
pub fn index_of(list: &Value, target: &Value, mode: impl Into<SearchMode>) -> Option<usize> {
    search(&sequence(list)?, target, mode.into())
}

/// Returns whether a sequence contains `value`.
pub fn contains(list: &Value, value: &Value) -> bool {
    contains_from(list, value, 0)
}

/// Returns whether a sequence contains `value` at or after `from_index`.
pub fn contains_from(list: &Value, value: &Value, from_index: usize) -> bool {
    index_of(list, value, from_index).is_some()
}

/// Returns the distinct elements of a sequence in first-seen order.
///
/// With `is_sorted` each element is looked up in the result so far with a
/// binary search; this is only correct when the input is sorted. Anything
/// that is not a sequence produces an empty vector.
///
/// # Examples
///
/// ```
/// use underbar::collection::uniq;
/// use underbar::value::json;
///
/// assert_eq!(uniq(&json!([1, 2, 3, 2, 3]), false), vec![json!(1), json!(2), json!(3)]);
/// assert_eq!(uniq(&json!("abba"), false), vec![json!("a"), json!("b")]);
/// ```
pub fn uniq(list: &Value, is_sorted: bool) -> Vec<Value> {
    uniq_inspect(list, is_sorted, |_, _, _| {})
}

/// Like [`uniq`], calling `inspect` on every element, duplicates included.
///
/// `inspect` receives the element, its index and the original list. Its
/// result does not influence which elements are kept.
pub fn uniq_inspect<F>(list: &Value, is_sorted: bool, mut inspect: F) -> Vec<Value>
where
    F: FnMut(&Value, usize, &Value),
{
    let Some(items) = sequence(list) else {
        return Vec::new();
    };
    let mode = SearchMode::from(is_sorted);
    let mut unique: Vec<Value> = Vec::new();
    for (index, item) in items.iter().enumerate() {
        inspect(item, index, list);
        if search(&unique, item, mode).is_none() {
            unique.push(item.clone());
        }
    }
    unique
}

/// Returns the index at which `value` should be inserted to keep a sorted
/// sequence sorted.
///
/// The returned index precedes any elements equal to `value`. Anything that
/// is not a sequence yields `0`.
///
/// # Examples
///
/// ```
/// use underbar::collection::sorted_index;
/// use underbar::value::json;
///
/// let list = json!([10, 20, 30, 40]);
/// assert_eq!(sorted_index(&list, &json!(35)), 3);
/// assert_eq!(sorted_index(&list, &json!(5)), 0);
/// assert_eq!(sorted_index(&list, &json!(50)), 4);
/// ```
pub fn sorted_index(list: &Value, value: &Value) -> usize {
    sequence(list).map_or(0, |items| {
        items.partition_point(|item| less_than(item, value))
    })
}

/// Like [`sorted_index`], comparing the keys produced by `iteratee`.
pub fn sorted_index_by<F>(list: &Value, value: &Value, mut iteratee: F) -> usize
where
    F: FnMut(&Value) -> Value,
{
    let Some(items) = sequence(list) else {
        return 0;
    };
    let target = iteratee(value);
    let keys: Vec<Value> = items.iter().map(&mut iteratee).collect();
    keys.partition_point(|key| less_than(key, &target))
}

/// Like [`sorted_index`], comparing the named property of each element.
pub fn sorted_index_by_property(list: &Value, value: &Value, name: &str) -> usize {
    sorted_index_by(list, value, |item| {
        property(item, name).cloned().unwrap_or(Value::Null)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn binary_search_finds_every_present_value() {
        let items: Vec<Value> = (0..17).map(|number| json!(number * 3)).collect();
        for (index, item) in items.iter().enumerate() {
            assert_eq!(search(&items, item, SearchMode::Sorted), Some(index));
        }
        assert_eq!(search(&items, &json!(4), SearchMode::Sorted), None);
    }

    #[test]
    fn offset_at_length_finds_nothing() {
        let items = vec![json!(1)];
        assert_eq!(search(&items, &json!(1), SearchMode::From(1)), None);
        assert_eq!(search(&items, &json!(1), SearchMode::From(2)), None);
    }
}
