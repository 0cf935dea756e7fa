//! json-craft — in-memory JSON editing and query.
//!
//! Three operation families over `serde_json::Value`:
//!
//! - [`apply_patch`] applies an RFC 6902 JSON Patch to a source document
//!   and returns the resulting document, all-or-nothing.
//! - [`from_diff`] / [`diff`] compute a patch that transforms one document
//!   into another.
//! - [`JsonPath`] parses and evaluates JSONPath expressions, yielding
//!   values, normalized paths, or (path, value) nodes.
//!
//! A total-ordering comparator over JSON values is re-exported as
//! [`compare`], with [`deep_equal`] as its equality counterpart.

pub mod json_patch;
pub mod json_patch_diff;

pub use json_patch::{apply_patch, Op, PatchError};
pub use json_patch_diff::{diff, from_diff};

pub use json_craft_core::{compare, deep_equal, Builder, BuilderError, CompareError};
pub use json_craft_json_path::{
    try_select_single, JsonPath, Node, NormalizedPath, ParseError, ParseErrorKind, PathComponent,
    SelectOptions,
};
pub use json_craft_json_pointer::{JsonPointer, JsonPointerError};
