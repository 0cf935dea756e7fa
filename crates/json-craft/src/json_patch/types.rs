//! Core types for the JSON Patch module.

use serde_json::Value;
use thiserror::Error;

pub use json_craft_json_pointer::JsonPointer;

// ── Error ─────────────────────────────────────────────────────────────────

/// A failed patch application.
///
/// Each edit-failure variant carries the failing operation rendered back
/// to its JSON form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatchError {
    #[error("Invalid patch: {0}")]
    InvalidPatch(String),
    #[error("Test failed: {0}")]
    TestFailed(String),
    #[error("Add failed: {0}")]
    AddFailed(String),
    #[error("Remove failed: {0}")]
    RemoveFailed(String),
    #[error("Replace failed: {0}")]
    ReplaceFailed(String),
    #[error("Move failed: {0}")]
    MoveFailed(String),
    #[error("Copy failed: {0}")]
    CopyFailed(String),
}

// ── Op enum ───────────────────────────────────────────────────────────────

/// A decoded JSON Patch operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Add { path: JsonPointer, value: Value },
    Remove { path: JsonPointer },
    Replace { path: JsonPointer, value: Value },
    Move { path: JsonPointer, from: JsonPointer },
    Copy { path: JsonPointer, from: JsonPointer },
    Test { path: JsonPointer, value: Value },
}

impl Op {
    pub fn op_name(&self) -> &'static str {
        match self {
            Op::Add { .. } => "add",
            Op::Remove { .. } => "remove",
            Op::Replace { .. } => "replace",
            Op::Move { .. } => "move",
            Op::Copy { .. } => "copy",
            Op::Test { .. } => "test",
        }
    }

    pub fn path(&self) -> &JsonPointer {
        match self {
            Op::Add { path, .. } => path,
            Op::Remove { path } => path,
            Op::Replace { path, .. } => path,
            Op::Move { path, .. } => path,
            Op::Copy { path, .. } => path,
            Op::Test { path, .. } => path,
        }
    }
}
