//! Shape classification of collection-like values.

use serde_json::{Map, Value};

/// The shape of a collection-like value.
///
/// Every collection operation classifies its input exactly once with
/// [`Shape::of`] and dispatches on the result.
///
/// # Examples
///
/// ```rust
/// use underbar::value::{Shape, json};
///
/// let text = json!("abc");
/// match Shape::of(&text) {
///     Shape::Chars(text) => assert_eq!(text, "abc"),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape<'a> {
    /// An ordered sequence of values.
    Ordered(&'a [Value]),
    /// A key-mapped structure enumerated in insertion order.
    Keyed(&'a Map<String, Value>),
    /// A character sequence, enumerated one `char` at a time.
    Chars(&'a str),
    /// Anything else: `null`, booleans and numbers.
    Invalid,
}

impl<'a> Shape<'a> {
    /// Classifies a value.
    pub fn of(value: &'a Value) -> Self {
        match value {
            Value::Array(items) => Self::Ordered(items),
            Value::Object(entries) => Self::Keyed(entries),
            Value::String(text) => Self::Chars(text),
            Value::Null | Value::Bool(_) | Value::Number(_) => Self::Invalid,
        }
    }

    /// Returns `true` for every shape except [`Shape::Invalid`].
    pub const fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid)
    }

    /// Number of elements the shape enumerates.
    pub fn len(&self) -> usize {
        match self {
            Self::Ordered(items) => items.len(),
            Self::Keyed(entries) => entries.len(),
            Self::Chars(text) => text.chars().count(),
            Self::Invalid => 0,
        }
    }

    /// Returns `true` when the shape enumerates no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copies out the elements of a sequence-like shape.
    ///
    /// Ordered sequences are cloned and character sequences are split into
    /// one-character strings. Keyed structures and invalid shapes return
    /// `None`.
    pub fn to_sequence(&self) -> Option<Vec<Value>> {
        match self {
            Self::Ordered(items) => Some(items.to_vec()),
            Self::Chars(text) => Some(chars(text).collect()),
            Self::Keyed(_) | Self::Invalid => None,
        }
    }

    /// Copies out the elements of any valid shape.
    ///
    /// Like [`Shape::to_sequence`], but keyed structures yield their values.
    pub fn to_values(&self) -> Option<Vec<Value>> {
        match self {
            Self::Keyed(entries) => Some(entries.values().cloned().collect()),
            other => other.to_sequence(),
        }
    }
}

/// Splits text into one-character string values.
fn chars(text: &str) -> impl Iterator<Item = Value> + '_ {
    text.chars().map(|character| Value::String(character.to_string()))
}

/// The position of an element within its collection.
///
/// Ordered and character sequences produce [`Key::Index`]; keyed structures
/// produce [`Key::Name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key<'a> {
    /// Zero-based position in a sequence.
    Index(usize),
    /// Key of an entry in a keyed structure.
    Name(&'a str),
}

impl Key<'_> {
    /// Converts the key into a value for dynamically typed callbacks.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Index(index) => Value::from(*index),
            Self::Name(name) => Value::from(*name),
        }
    }

    /// Returns the index if this is a positional key.
    pub const fn index(&self) -> Option<usize> {
        match self {
            Self::Index(index) => Some(*index),
            Self::Name(_) => None,
        }
    }
}

impl std::fmt::Display for Key<'_> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Index(index) => write!(formatter, "{index}"),
            Self::Name(name) => write!(formatter, "{name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classifies_every_kind() {
        assert!(matches!(Shape::of(&json!([1])), Shape::Ordered(_)));
        assert!(matches!(Shape::of(&json!({"a": 1})), Shape::Keyed(_)));
        assert!(matches!(Shape::of(&json!("a")), Shape::Chars(_)));
        assert_eq!(Shape::of(&json!(null)), Shape::Invalid);
        assert_eq!(Shape::of(&json!(true)), Shape::Invalid);
        assert_eq!(Shape::of(&json!(3)), Shape::Invalid);
    }

    #[test]
    fn chars_length_counts_characters_not_bytes() {
        assert_eq!(Shape::of(&json!("héllo")).len(), 5);
    }

    #[test]
    fn to_sequence_splits_characters() {
        assert_eq!(
            Shape::of(&json!("ab")).to_sequence(),
            Some(vec![json!("a"), json!("b")])
        );
        assert_eq!(Shape::of(&json!({"a": 1})).to_sequence(), None);
        assert_eq!(
            Shape::of(&json!({"a": 1, "b": 2})).to_values(),
            Some(vec![json!(1), json!(2)])
        );
    }

    #[test]
    fn key_converts_to_value() {
        assert_eq!(Key::Index(3).to_value(), json!(3));
        assert_eq!(Key::Name("a").to_value(), json!("a"));
    }
}
