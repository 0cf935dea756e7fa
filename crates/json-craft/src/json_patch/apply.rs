//! JSON Patch apply logic.
//!
//! The engine never mutates the source document: it decodes the patch,
//! deep-copies the source into a scratch [`Builder`], applies the
//! operations in array order, and materializes the result. A failure at
//! any operation discards the scratch tree, so application is
//! all-or-nothing.

use serde_json::Value;

use json_craft_core::{deep_equal, Builder};
use json_craft_json_pointer::{JsonPointer, JsonPointerError};

use super::codec::json::{from_json_patch, to_json};
use super::types::{Op, PatchError};

// ── Public API ────────────────────────────────────────────────────────────

/// Apply an RFC 6902 patch to `source`, returning the new document.
pub fn apply_patch(source: &Value, patch: &Value) -> Result<Value, PatchError> {
    let ops = from_json_patch(patch)?;
    let mut target = Builder::from_value(source);
    apply_ops(&mut target, &ops)?;
    Ok(target.into_document())
}

/// Apply decoded operations to a builder, strictly in order. The first
/// failure aborts; the builder may then hold partial state and should be
/// discarded.
pub fn apply_ops(target: &mut Builder, ops: &[Op]) -> Result<(), PatchError> {
    for op in ops {
        apply_op(target, op)?;
    }
    Ok(())
}

/// Apply a single decoded operation.
pub fn apply_op(target: &mut Builder, op: &Op) -> Result<(), PatchError> {
    match op {
        Op::Test { path, value } => {
            let sub = path.get(target).map_err(|_| test_failed(op))?;
            match deep_equal(&sub.to_value(), value) {
                Ok(true) => Ok(()),
                _ => Err(test_failed(op)),
            }
        }
        Op::Add { path, value } => {
            place(target, path, Builder::from_value(value))
                .map_err(|_| PatchError::AddFailed(render(op)))
        }
        Op::Remove { path } => {
            path.remove(target)
                .map(|_| ())
                .map_err(|_| PatchError::RemoveFailed(render(op)))
        }
        Op::Replace { path, value } => {
            path.replace(target, Builder::from_value(value))
                .map_err(|_| PatchError::ReplaceFailed(render(op)))
        }
        Op::Move { path, from } => {
            // A subtree cannot be moved into itself.
            if from.is_prefix_of(path) {
                return Err(PatchError::MoveFailed(render(op)));
            }
            from.get(target).map_err(|_| PatchError::MoveFailed(render(op)))?;
            let sub = from
                .remove(target)
                .map_err(|_| PatchError::MoveFailed(render(op)))?;
            place(target, path, sub).map_err(|_| PatchError::MoveFailed(render(op)))
        }
        Op::Copy { path, from } => {
            let sub = from
                .get(target)
                .map_err(|_| PatchError::CopyFailed(render(op)))?
                .clone();
            place(target, path, sub).map_err(|_| PatchError::CopyFailed(render(op)))
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────

// RFC "add" semantics differ by container: arrays insert (with `-` for
// append), objects replace an existing same-named property. Trying
// insert-without-replace first and falling back to replace models both.
fn place(
    target: &mut Builder,
    path: &JsonPointer,
    value: Builder,
) -> Result<(), JsonPointerError> {
    match path.add_if_absent(target, value.clone()) {
        Ok(()) => Ok(()),
        Err(JsonPointerError::KeyExists) => path.replace(target, value),
        Err(err) => Err(err),
    }
}

fn render(op: &Op) -> String {
    to_json(op).to_string()
}

fn test_failed(op: &Op) -> PatchError {
    PatchError::TestFailed(render(op))
}

// ── Tests ─────────────────────────────────────────────────────────────────
