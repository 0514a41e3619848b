//! Set algebra over sequences: flattening, intersection, difference and zip.

use crate::value::{Shape, Value, strict_equals};

use super::search::contains;

/// Concatenates nested arrays into one flat vector.
///
/// With `shallow` only one level of nesting is removed. A character sequence
/// flattens to its characters; any other non-sequence yields an empty vector.
///
/// # Examples
///
/// ```
/// use underbar::collection::flatten;
/// use underbar::value::json;
///
/// let nested = json!([1, [2, [3, [4]]]]);
/// assert_eq!(flatten(&nested, false), vec![json!(1), json!(2), json!(3), json!(4)]);
/// assert_eq!(flatten(&nested, true), vec![json!(1), json!(2), json!([3, [4]])]);
/// ```
pub fn flatten(nested: &Value, shallow: bool) -> Vec<Value> {
    match Shape::of(nested) {
        Shape::Ordered(items) => {
            let mut flat = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::Array(inner) if shallow => flat.extend(inner.iter().cloned()),
                    Value::Array(_) => flat.extend(flatten(item, false)),
                    other => flat.push(other.clone()),
                }
            }
            flat
        }
        shape @ Shape::Chars(_) => shape.to_sequence().unwrap_or_default(),
        Shape::Keyed(_) | Shape::Invalid => Vec::new(),
    }
}

/// Returns the distinct values present in every one of `lists`.
///
/// Values keep the order in which they first appear. Character sequences take
/// part as sequences of characters; a keyed structure or any other
/// non-sequence among the arguments empties the result.
///
/// # Examples
///
/// ```
/// use underbar::collection::intersection;
/// use underbar::value::json;
///
/// let common = intersection(&[
///     json!([0, 1, "foo", "bar"]),
///     json!([4, 5, "foo", "bar"]),
///     json!([8, 9, "foo", "bar"]),
/// ]);
/// assert_eq!(common, vec![json!("foo"), json!("bar")]);
/// ```
pub fn intersection(lists: &[Value]) -> Vec<Value> {
    let Some(sequences) = lists
        .iter()
        .map(|list| Shape::of(list).to_sequence())
        .collect::<Option<Vec<_>>>()
    else {
        return Vec::new();
    };
    let Some((head, rest)) = sequences.split_first() else {
        return Vec::new();
    };

    let mut common: Vec<Value> = Vec::new();
    for item in head {
        let seen = common.iter().any(|kept| strict_equals(kept, item));
        let shared = rest
            .iter()
            .all(|other| other.iter().any(|candidate| strict_equals(candidate, item)));
        if !seen && shared {
            common.push(item.clone());
        }
    }
    common
}

/// Returns the elements of `primary` that appear in none of `others`.
///
/// Array arguments in `others` contribute their elements; any other argument
/// contributes itself. Comparison is strict. A keyed `primary` is compared by
/// its values and a character sequence by its characters.
///
/// # Examples
///
/// ```
/// use underbar::collection::difference;
/// use underbar::value::json;
///
/// let remaining = difference(&json!([1, 2, 3, 4, 5]), &[json!([1, 2, 3])]);
/// assert_eq!(remaining, vec![json!(4), json!(5)]);
/// ```
pub fn difference(primary: &Value, others: &[Value]) -> Vec<Value> {
    let mut excluded = Vec::new();
    for other in others {
        match other {
            Value::Array(items) => excluded.extend(items.iter().cloned()),
            single => excluded.push(single.clone()),
        }
    }
    let excluded = Value::Array(excluded);

    Shape::of(primary)
        .to_values()
        .unwrap_or_default()
        .into_iter()
        .filter(|item| !contains(&excluded, item))
        .collect()
}

/// Groups the elements of `lists` by position.
///
/// Tuple `i` holds the `i`-th element of every list, with `None` standing in
/// for lists that are shorter than the longest one. Arguments that are not
/// sequences count as empty.
///
/// # Examples
///
/// ```
/// use underbar::collection::zip;
/// use underbar::value::json;
///
/// let zipped = zip(&[json!(["a", "b"]), json!([1, 2, 3])]);
/// assert_eq!(zipped[0], vec![Some(json!("a")), Some(json!(1))]);
/// assert_eq!(zipped[2], vec![None, Some(json!(3))]);
/// ```
pub fn zip(lists: &[Value]) -> Vec<Vec<Option<Value>>> {
    let sequences: Vec<Vec<Value>> = lists
        .iter()
        .map(|list| Shape::of(list).to_sequence().unwrap_or_default())
        .collect();
    let longest = sequences.iter().map(Vec::len).max().unwrap_or(0);

    (0..longest)
        .map(|position| {
            sequences
                .iter()
                .map(|sequence| sequence.get(position).cloned())
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn intersection_of_nothing_is_empty() {
        assert!(intersection(&[]).is_empty());
    }

    #[test]
    fn difference_excludes_bare_values() {
        assert_eq!(
            difference(&json!([1, 2, 3]), &[json!(2)]),
            vec![json!(1), json!(3)]
        );
    }

    #[test]
    fn zip_of_nothing_is_empty() {
        assert!(zip(&[]).is_empty());
    }
}
