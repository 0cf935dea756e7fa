//! Core value layer for json-craft.
//!
//! Two concerns live here, both shared by the patch, diff, and pointer
//! layers:
//!
//! - [`builder::Builder`] — an owned, mutable JSON tree that supports the
//!   structural edits JSON Pointer addressing needs, and that materializes
//!   back into a [`serde_json::Value`] document.
//! - [`compare`] — structural equality and a total order over
//!   `serde_json::Value`, with the integer/double promotion rules the
//!   patch `test` operation depends on.

pub mod builder;
pub mod compare;

pub use builder::{Builder, BuilderError};
pub use compare::{compare, deep_equal, CompareError};
