//! The parsed pointer type.

use std::fmt;

use crate::util::{format_pointer, parse_pointer};
use crate::JsonPointerError;

/// A parsed JSON Pointer: a sequence of unescaped reference tokens.
///
/// The `-` end-of-array token is kept as an ordinary token here; the edit
/// primitives give it meaning (and reject it where RFC 6901 does).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPointer {
    tokens: Vec<String>,
}

impl JsonPointer {
    /// The root pointer (empty string).
    pub fn root() -> Self {
        JsonPointer { tokens: Vec::new() }
    }

    /// Parse a pointer string per RFC 6901.
    pub fn try_parse(pointer: &str) -> Result<Self, JsonPointerError> {
        Ok(JsonPointer {
            tokens: parse_pointer(pointer)?,
        })
    }

    /// Build a pointer from already-unescaped tokens.
    pub fn from_tokens(tokens: Vec<String>) -> Self {
        JsonPointer { tokens }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Whether `self` addresses `other` or one of its ancestors.
    ///
    /// The patch engine uses this to reject a `move` whose target sits
    /// inside the subtree being moved.
    pub fn is_prefix_of(&self, other: &JsonPointer) -> bool {
        self.tokens.len() <= other.tokens.len()
            && other.tokens[..self.tokens.len()] == self.tokens[..]
    }
}

impl fmt::Display for JsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_pointer(&self.tokens))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_reencodes() {
        let ptr = JsonPointer::try_parse("/a~0b/c~1d/2").unwrap();
        assert_eq!(ptr.to_string(), "/a~0b/c~1d/2");
        assert_eq!(JsonPointer::root().to_string(), "");
    }

    #[test]
    fn prefix_relation() {
        let root = JsonPointer::root();
        let a = JsonPointer::try_parse("/a").unwrap();
        let ab = JsonPointer::try_parse("/a/b").unwrap();
        let ax = JsonPointer::try_parse("/ax").unwrap();

        assert!(root.is_prefix_of(&a));
        assert!(a.is_prefix_of(&ab));
        assert!(a.is_prefix_of(&a));
        assert!(!ab.is_prefix_of(&a));
        assert!(!a.is_prefix_of(&ax));
    }
}
