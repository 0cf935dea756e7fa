//! Mutable JSON document builder.
//!
//! A [`Builder`] is an owned tree of JSON nodes. Unlike `serde_json::Value`
//! it keeps object children as an ordered list of `(name, child)` pairs, so
//! insertion order is significant and duplicate names are representable.
//! Lookups, replacements, and removals address the first child with a
//! matching name.
//!
//! The pointer layer drives all structural edits through the primitives
//! below; they signal failure instead of panicking so that speculative
//! edits (the add-then-replace fallback of the patch engine) stay cheap.

use serde_json::{Number, Value};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuilderError {
    #[error("OUT_OF_RANGE")]
    OutOfRange,
    #[error("KIND_MISMATCH")]
    KindMismatch,
}

/// An owned, mutable JSON tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Builder {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Builder>),
    Object(Vec<(String, Builder)>),
}

impl Builder {
    /// An empty object container.
    pub fn object() -> Self {
        Builder::Object(Vec::new())
    }

    /// An empty array container.
    pub fn array() -> Self {
        Builder::Array(Vec::new())
    }

    /// Deep-copy a read-only value into an owned builder tree.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => Builder::Null,
            Value::Bool(b) => Builder::Bool(*b),
            Value::Number(n) => Builder::Number(n.clone()),
            Value::String(s) => Builder::String(s.clone()),
            Value::Array(items) => {
                Builder::Array(items.iter().map(Builder::from_value).collect())
            }
            Value::Object(map) => Builder::Object(
                map.iter()
                    .map(|(name, child)| (name.clone(), Builder::from_value(child)))
                    .collect(),
            ),
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Builder::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Builder::Array(_))
    }

    /// Number of children of an array, `None` for other kinds.
    pub fn array_len(&self) -> Option<usize> {
        match self {
            Builder::Array(items) => Some(items.len()),
            _ => None,
        }
    }

    /// First child with the given name.
    pub fn property(&self, name: &str) -> Option<&Builder> {
        match self {
            Builder::Object(props) => props.iter().find(|(n, _)| n == name).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn property_mut(&mut self, name: &str) -> Option<&mut Builder> {
        match self {
            Builder::Object(props) => {
                props.iter_mut().find(|(n, _)| n == name).map(|(_, v)| v)
            }
            _ => None,
        }
    }

    pub fn array_item(&self, index: usize) -> Option<&Builder> {
        match self {
            Builder::Array(items) => items.get(index),
            _ => None,
        }
    }

    pub fn array_item_mut(&mut self, index: usize) -> Option<&mut Builder> {
        match self {
            Builder::Array(items) => items.get_mut(index),
            _ => None,
        }
    }

    /// Append a named child to an object. Duplicate names are permitted.
    pub fn add_property(&mut self, name: String, child: Builder) -> Result<(), BuilderError> {
        match self {
            Builder::Object(props) => {
                props.push((name, child));
                Ok(())
            }
            _ => Err(BuilderError::KindMismatch),
        }
    }

    /// Append a child to an array.
    pub fn add_array_item(&mut self, child: Builder) -> Result<(), BuilderError> {
        match self {
            Builder::Array(items) => {
                items.push(child);
                Ok(())
            }
            _ => Err(BuilderError::KindMismatch),
        }
    }

    /// Insert a child before `index`. `index == len` appends.
    pub fn insert_array_item(&mut self, index: usize, child: Builder) -> Result<(), BuilderError> {
        match self {
            Builder::Array(items) => {
                if index > items.len() {
                    return Err(BuilderError::OutOfRange);
                }
                items.insert(index, child);
                Ok(())
            }
            _ => Err(BuilderError::KindMismatch),
        }
    }

    pub fn replace_array_item(&mut self, index: usize, child: Builder) -> Result<(), BuilderError> {
        match self {
            Builder::Array(items) => match items.get_mut(index) {
                Some(slot) => {
                    *slot = child;
                    Ok(())
                }
                None => Err(BuilderError::OutOfRange),
            },
            _ => Err(BuilderError::KindMismatch),
        }
    }

    /// Remove the child at `index`, shifting later children down.
    /// Returns the detached subtree.
    pub fn remove_array_item(&mut self, index: usize) -> Result<Builder, BuilderError> {
        match self {
            Builder::Array(items) => {
                if index >= items.len() {
                    return Err(BuilderError::OutOfRange);
                }
                Ok(items.remove(index))
            }
            _ => Err(BuilderError::KindMismatch),
        }
    }

    /// Replace the first child with the given name.
    pub fn replace_property(&mut self, name: &str, child: Builder) -> Result<(), BuilderError> {
        match self {
            Builder::Object(props) => match props.iter_mut().find(|(n, _)| n == name) {
                Some((_, slot)) => {
                    *slot = child;
                    Ok(())
                }
                None => Err(BuilderError::OutOfRange),
            },
            _ => Err(BuilderError::KindMismatch),
        }
    }

    /// Remove the first child with the given name. Returns the detached
    /// subtree.
    pub fn remove_property(&mut self, name: &str) -> Result<Builder, BuilderError> {
        match self {
            Builder::Object(props) => {
                match props.iter().position(|(n, _)| n == name) {
                    Some(index) => Ok(props.remove(index).1),
                    None => Err(BuilderError::OutOfRange),
                }
            }
            _ => Err(BuilderError::KindMismatch),
        }
    }

    /// Materialize a subtree into a read-only value without consuming the
    /// builder. For duplicate object names the first occurrence wins,
    /// consistent with first-match lookups.
    pub fn to_value(&self) -> Value {
        match self {
            Builder::Null => Value::Null,
            Builder::Bool(b) => Value::Bool(*b),
            Builder::Number(n) => Value::Number(n.clone()),
            Builder::String(s) => Value::String(s.clone()),
            Builder::Array(items) => Value::Array(items.iter().map(Builder::to_value).collect()),
            Builder::Object(props) => {
                let mut map = serde_json::Map::with_capacity(props.len());
                for (name, child) in props {
                    map.entry(name.clone()).or_insert_with(|| child.to_value());
                }
                Value::Object(map)
            }
        }
    }

    /// Materialize the final document, consuming the builder.
    pub fn into_document(self) -> Value {
        match self {
            Builder::Null => Value::Null,
            Builder::Bool(b) => Value::Bool(b),
            Builder::Number(n) => Value::Number(n),
            Builder::String(s) => Value::String(s),
            Builder::Array(items) => {
                Value::Array(items.into_iter().map(Builder::into_document).collect())
            }
            Builder::Object(props) => {
                let mut map = serde_json::Map::with_capacity(props.len());
                for (name, child) in props {
                    map.entry(name).or_insert_with(|| child.into_document());
                }
                Value::Object(map)
            }
        }
    }
}
