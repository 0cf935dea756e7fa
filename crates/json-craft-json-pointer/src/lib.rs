//! JSON Pointer (RFC 6901) utilities.
//!
//! A [`JsonPointer`] is a parsed sequence of unescaped reference tokens.
//! Besides parsing and formatting, this crate provides the navigate/edit
//! primitives the patch engine drives against a
//! [`json_craft_core::Builder`]: [`JsonPointer::get`],
//! [`JsonPointer::add_if_absent`], [`JsonPointer::replace`], and
//! [`JsonPointer::remove`]. Each primitive either fully applies or leaves
//! the builder untouched.

use thiserror::Error;

mod edit;
mod types;
mod util;

pub use types::JsonPointer;
pub use util::{escape, format_pointer, is_valid_index, parse_pointer, unescape};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JsonPointerError {
    #[error("NOT_FOUND")]
    NotFound,
    #[error("INVALID_INDEX")]
    InvalidIndex,
    #[error("KEY_EXISTS")]
    KeyExists,
    #[error("INVALID_TARGET")]
    InvalidTarget,
    #[error("POINTER_INVALID")]
    PointerInvalid,
}

impl From<json_craft_core::BuilderError> for JsonPointerError {
    fn from(err: json_craft_core::BuilderError) -> Self {
        match err {
            json_craft_core::BuilderError::OutOfRange => JsonPointerError::NotFound,
            json_craft_core::BuilderError::KindMismatch => JsonPointerError::InvalidTarget,
        }
    }
}
