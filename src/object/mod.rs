//! Shallow object composition.
//!
//! - [`extend`]: copy every entry of each source, later sources winning
//! - [`defaults`]: copy only entries whose key the destination lacks, earlier
//!   sources winning
//!
//! Both mutate the destination in place and return it. Array sources
//! contribute their elements keyed by index and character sequences their
//! characters; sources of any other shape contribute nothing.
//!
//! An array destination receives the entries whose key is a canonical index
//! (`"0"`, `"1"`, ... without leading zeros). An index inside the array
//! addresses an existing element and an index equal to the length appends.
//! Other keys, and indices that would leave a gap, are skipped. Any other
//! destination is returned untouched.
//!
//! # Examples
//!
//! ```rust
//! use underbar::object::{defaults, extend};
//! use underbar::value::json;
//!
//! let mut settings = json!({"flavor": "chocolate"});
//! extend(&mut settings, &[json!({"flavor": "vanilla", "sprinkles": "lots"})]);
//! assert_eq!(settings, json!({"flavor": "vanilla", "sprinkles": "lots"}));
//!
//! let mut order = json!({"flavor": "chocolate"});
//! defaults(&mut order, &[json!({"flavor": "vanilla", "sprinkles": "lots"})]);
//! assert_eq!(order, json!({"flavor": "chocolate", "sprinkles": "lots"}));
//! ```

use crate::collection::each;
use crate::value::{Key, Value};

/// Calls `visit` with every own entry of a source.
fn entries_of<F>(source: &Value, mut visit: F)
where
    F: FnMut(String, &Value),
{
    if matches!(source, Value::Array(_) | Value::Object(_) | Value::String(_)) {
        each(source, |item, key, _| {
            let name = match key {
                Key::Index(index) => index.to_string(),
                Key::Name(name) => name.to_owned(),
            };
            visit(name, item);
        });
    }
}

/// Parses a canonical array index.
fn array_index(name: &str) -> Option<usize> {
    let index: usize = name.parse().ok()?;
    (index.to_string() == name).then_some(index)
}

/// Returns the array slot for `name`, appending one when it names the end.
///
/// The flag is `true` when the slot was appended.
fn array_slot<'a>(items: &'a mut Vec<Value>, name: &str) -> Option<(&'a mut Value, bool)> {
    let index = array_index(name)?;
    let appended = index == items.len();
    if appended {
        items.push(Value::Null);
    }
    items.get_mut(index).map(|slot| (slot, appended))
}

/// Copies every entry of each source into `destination`.
///
/// Later sources override earlier ones, and any source overrides a value the
/// destination already had under the same key.
pub fn extend<'a>(destination: &'a mut Value, sources: &[Value]) -> &'a mut Value {
    match &mut *destination {
        Value::Object(target) => {
            for source in sources {
                entries_of(source, |name, item| {
                    target.insert(name, item.clone());
                });
            }
        }
        Value::Array(target) => {
            for source in sources {
                entries_of(source, |name, item| {
                    if let Some((slot, _)) = array_slot(target, &name) {
                        *slot = item.clone();
                    }
                });
            }
        }
        _ => {}
    }
    destination
}

/// Fills in the keys `destination` does not have yet.
///
/// Keys already present are never overwritten; for a key missing from the
/// destination the first source that has it wins. For an array destination
/// only appended slots are filled.
pub fn defaults<'a>(destination: &'a mut Value, sources: &[Value]) -> &'a mut Value {
    match &mut *destination {
        Value::Object(target) => {
            for source in sources {
                entries_of(source, |name, item| {
                    target.entry(name).or_insert_with(|| item.clone());
                });
            }
        }
        Value::Array(target) => {
            for source in sources {
                entries_of(source, |name, item| {
                    if let Some((slot, true)) = array_slot(target, &name) {
                        *slot = item.clone();
                    }
                });
            }
        }
        _ => {}
    }
    destination
}
