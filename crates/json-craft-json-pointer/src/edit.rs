//! Navigate/edit primitives over a mutable builder tree.
//!
//! Every edit descends to the parent of the final token, then attempts the
//! matching builder primitive. Failures surface before any mutation, so a
//! failed edit leaves the builder exactly as it was — the patch engine
//! relies on this to stage its add-then-replace fallback.

use json_craft_core::Builder;

use crate::types::JsonPointer;
use crate::util::is_valid_index;
use crate::JsonPointerError;

// Canonical index for a read position: must name an existing child.
fn read_index(token: &str, len: usize) -> Result<usize, JsonPointerError> {
    if !is_valid_index(token) {
        return Err(JsonPointerError::InvalidIndex);
    }
    let index: usize = token.parse().map_err(|_| JsonPointerError::InvalidIndex)?;
    if index >= len {
        return Err(JsonPointerError::NotFound);
    }
    Ok(index)
}

// Canonical index for an insert position: 0..=len is valid.
fn insert_index(token: &str, len: usize) -> Result<usize, JsonPointerError> {
    if !is_valid_index(token) {
        return Err(JsonPointerError::InvalidIndex);
    }
    let index: usize = token.parse().map_err(|_| JsonPointerError::InvalidIndex)?;
    if index > len {
        return Err(JsonPointerError::InvalidIndex);
    }
    Ok(index)
}

fn descend<'a>(
    mut current: &'a Builder,
    tokens: &[String],
) -> Result<&'a Builder, JsonPointerError> {
    for token in tokens {
        current = if current.is_object() {
            current.property(token).ok_or(JsonPointerError::NotFound)?
        } else if current.is_array() {
            let len = current.array_len().unwrap_or(0);
            let index = read_index(token, len)?;
            current.array_item(index).ok_or(JsonPointerError::NotFound)?
        } else {
            return Err(JsonPointerError::NotFound);
        };
    }
    Ok(current)
}

fn descend_mut<'a>(
    mut current: &'a mut Builder,
    tokens: &[String],
) -> Result<&'a mut Builder, JsonPointerError> {
    for token in tokens {
        current = if current.is_object() {
            current
                .property_mut(token)
                .ok_or(JsonPointerError::NotFound)?
        } else if current.is_array() {
            let len = current.array_len().unwrap_or(0);
            let index = read_index(token, len)?;
            current
                .array_item_mut(index)
                .ok_or(JsonPointerError::NotFound)?
        } else {
            return Err(JsonPointerError::NotFound);
        };
    }
    Ok(current)
}

impl JsonPointer {
    /// Navigate to the addressed subtree. The `-` token is invalid for
    /// reads, and array tokens must be canonical decimal indices.
    pub fn get<'a>(&self, target: &'a Builder) -> Result<&'a Builder, JsonPointerError> {
        descend(target, self.tokens())
    }

    /// Insert without replacing.
    ///
    /// On an array parent the final token may be `-` (append) or an index
    /// in `0..=len` (insert before). On an object parent the name must be
    /// absent; an existing name fails with `KeyExists`, which is how the
    /// patch engine discovers it should replace instead. The root is
    /// always considered present.
    pub fn add_if_absent(
        &self,
        target: &mut Builder,
        value: Builder,
    ) -> Result<(), JsonPointerError> {
        let (last, parents) = match self.tokens().split_last() {
            Some(split) => split,
            None => return Err(JsonPointerError::KeyExists),
        };
        let parent = descend_mut(target, parents)?;
        if parent.is_object() {
            if parent.property(last).is_some() {
                return Err(JsonPointerError::KeyExists);
            }
            parent.add_property(last.clone(), value)?;
            Ok(())
        } else if parent.is_array() {
            if last == "-" {
                parent.add_array_item(value)?;
                return Ok(());
            }
            let len = parent.array_len().unwrap_or(0);
            let index = insert_index(last, len)?;
            parent.insert_array_item(index, value)?;
            Ok(())
        } else {
            Err(JsonPointerError::InvalidTarget)
        }
    }

    /// Replace the addressed subtree, which must exist. `-` is invalid.
    /// The root pointer replaces the whole tree.
    pub fn replace(&self, target: &mut Builder, value: Builder) -> Result<(), JsonPointerError> {
        let (last, parents) = match self.tokens().split_last() {
            Some(split) => split,
            None => {
                *target = value;
                return Ok(());
            }
        };
        let parent = descend_mut(target, parents)?;
        if parent.is_object() {
            parent.replace_property(last, value)?;
            Ok(())
        } else if parent.is_array() {
            let len = parent.array_len().unwrap_or(0);
            let index = read_index(last, len)?;
            parent.replace_array_item(index, value)?;
            Ok(())
        } else {
            Err(JsonPointerError::InvalidTarget)
        }
    }

    /// Remove and return the addressed subtree, which must exist. `-` is
    /// invalid. Removing the root detaches the whole tree, leaving `Null`.
    pub fn remove(&self, target: &mut Builder) -> Result<Builder, JsonPointerError> {
        let (last, parents) = match self.tokens().split_last() {
            Some(split) => split,
            None => return Ok(std::mem::replace(target, Builder::Null)),
        };
        let parent = descend_mut(target, parents)?;
        if parent.is_object() {
            Ok(parent.remove_property(last)?)
        } else if parent.is_array() {
            let len = parent.array_len().unwrap_or(0);
            let index = read_index(last, len)?;
            Ok(parent.remove_array_item(index)?)
        } else {
            Err(JsonPointerError::InvalidTarget)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn builder(doc: serde_json::Value) -> Builder {
        Builder::from_value(&doc)
    }

    fn ptr(s: &str) -> JsonPointer {
        JsonPointer::try_parse(s).unwrap()
    }

    #[test]
    fn get_descends_objects_and_arrays() {
        let b = builder(json!({"a": {"b": [10, 20]}}));
        assert_eq!(ptr("/a/b/1").get(&b).unwrap().to_value(), json!(20));
        assert_eq!(ptr("").get(&b).unwrap().to_value(), json!({"a": {"b": [10, 20]}}));
        assert_eq!(ptr("/a/x").get(&b), Err(JsonPointerError::NotFound));
    }

    #[test]
    fn get_rejects_dash_and_non_canonical_indices() {
        let b = builder(json!([1, 2, 3]));
        assert_eq!(ptr("/-").get(&b), Err(JsonPointerError::InvalidIndex));
        assert_eq!(ptr("/01").get(&b), Err(JsonPointerError::InvalidIndex));
        assert_eq!(ptr("/3").get(&b), Err(JsonPointerError::NotFound));
    }

    #[test]
    fn add_appends_with_dash() {
        let mut b = builder(json!([1, 2]));
        ptr("/-").add_if_absent(&mut b, Builder::from_value(&json!(3))).unwrap();
        assert_eq!(b.to_value(), json!([1, 2, 3]));
    }

    #[test]
    fn add_inserts_before_index() {
        let mut b = builder(json!([1, 3]));
        ptr("/1").add_if_absent(&mut b, Builder::from_value(&json!(2))).unwrap();
        // len itself is a valid insert position.
        ptr("/3").add_if_absent(&mut b, Builder::from_value(&json!(4))).unwrap();
        assert_eq!(b.to_value(), json!([1, 2, 3, 4]));
        assert_eq!(
            ptr("/9").add_if_absent(&mut b, Builder::Null),
            Err(JsonPointerError::InvalidIndex)
        );
    }

    #[test]
    fn add_fails_on_existing_name() {
        let mut b = builder(json!({"a": 1}));
        assert_eq!(
            ptr("/a").add_if_absent(&mut b, Builder::Null),
            Err(JsonPointerError::KeyExists)
        );
        // Untouched on failure.
        assert_eq!(b.to_value(), json!({"a": 1}));

        ptr("/b").add_if_absent(&mut b, Builder::from_value(&json!(2))).unwrap();
        assert_eq!(b.to_value(), json!({"a": 1, "b": 2}));
    }

    #[test]
    fn add_at_root_defers_to_replace() {
        let mut b = builder(json!({"a": 1}));
        assert_eq!(
            ptr("").add_if_absent(&mut b, Builder::Null),
            Err(JsonPointerError::KeyExists)
        );
        ptr("").replace(&mut b, Builder::from_value(&json!([1]))).unwrap();
        assert_eq!(b.to_value(), json!([1]));
    }

    #[test]
    fn replace_requires_presence() {
        let mut b = builder(json!({"a": [1, 2]}));
        ptr("/a/0").replace(&mut b, Builder::from_value(&json!(9))).unwrap();
        assert_eq!(b.to_value(), json!({"a": [9, 2]}));
        assert_eq!(
            ptr("/a/-").replace(&mut b, Builder::Null),
            Err(JsonPointerError::InvalidIndex)
        );
        assert_eq!(
            ptr("/missing").replace(&mut b, Builder::Null),
            Err(JsonPointerError::NotFound)
        );
    }

    #[test]
    fn remove_returns_detached_subtree() {
        let mut b = builder(json!({"a": [1, 2, 3]}));
        let removed = ptr("/a/1").remove(&mut b).unwrap();
        assert_eq!(removed.to_value(), json!(2));
        assert_eq!(b.to_value(), json!({"a": [1, 3]}));

        let removed = ptr("/a").remove(&mut b).unwrap();
        assert_eq!(removed.to_value(), json!([1, 3]));
        assert_eq!(b.to_value(), json!({}));
    }

    #[test]
    fn remove_root_detaches_everything() {
        let mut b = builder(json!({"a": 1}));
        let removed = ptr("").remove(&mut b).unwrap();
        assert_eq!(removed.to_value(), json!({"a": 1}));
        assert_eq!(b, Builder::Null);
    }

    #[test]
    fn edits_through_scalars_fail() {
        let mut b = builder(json!({"a": 1}));
        // Final token lands on a scalar parent: kind mismatch.
        assert_eq!(
            ptr("/a/b").add_if_absent(&mut b, Builder::Null),
            Err(JsonPointerError::InvalidTarget)
        );
        assert_eq!(ptr("/a/b").remove(&mut b), Err(JsonPointerError::InvalidTarget));
        // Scalar mid-path: the descent itself misses.
        assert_eq!(ptr("/a/b/c").remove(&mut b), Err(JsonPointerError::NotFound));
        assert_eq!(b.to_value(), json!({"a": 1}));
    }
}
