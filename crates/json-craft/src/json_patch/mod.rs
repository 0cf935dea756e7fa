//! JSON Patch (RFC 6902).
//!
//! All six standard operations are supported: `add`, `remove`, `replace`,
//! `move`, `copy`, `test`. Unknown operations are rejected.
//!
//! The engine interprets a decoded patch against a scratch
//! [`json_craft_core::Builder`] using the pointer edit primitives, in
//! strict array order, aborting on the first failure.

pub mod apply;
pub mod codec;
pub mod types;

pub use apply::{apply_op, apply_ops, apply_patch};
pub use codec::json::{from_json, from_json_patch, to_json, to_json_patch};
pub use types::{Op, PatchError};
