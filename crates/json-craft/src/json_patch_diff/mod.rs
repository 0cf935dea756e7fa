//! JSON Patch diff: generate a patch that transforms one document into
//! another.
//!
//! The recursion compares kind by kind. Arrays recurse over the common
//! prefix, then emit removals for the excess source tail in descending
//! index order (so every index is still addressable when its removal
//! applies), then additions for the excess target tail. Objects emit
//! removals for names missing from the target, recurse into shared names,
//! then add the names missing from the source. Anything else becomes a
//! single `replace`.

use serde_json::{Map, Value};

use json_craft_core::deep_equal;
use json_craft_json_pointer::JsonPointer;

use crate::json_patch::codec::json::to_json_patch;
use crate::json_patch::types::Op;

// ── Public API ────────────────────────────────────────────────────────────

/// Operations that, applied to `source`, produce a document structurally
/// equal to `target`.
pub fn diff(source: &Value, target: &Value) -> Vec<Op> {
    let mut ops = Vec::new();
    let mut prefix = Vec::new();
    diff_at(&mut ops, &mut prefix, source, target);
    ops
}

/// [`diff`] encoded as an RFC 6902 patch array.
pub fn from_diff(source: &Value, target: &Value) -> Value {
    to_json_patch(&diff(source, target))
}

// ── Core recursive differ ─────────────────────────────────────────────────

fn values_equal(a: &Value, b: &Value) -> bool {
    // Incomparable numbers degrade to "not equal": the emitted replace
    // keeps the patch valid, merely non-minimal.
    deep_equal(a, b).unwrap_or(false)
}

fn pointer_to(prefix: &[String], last: String) -> JsonPointer {
    let mut tokens = prefix.to_vec();
    tokens.push(last);
    JsonPointer::from_tokens(tokens)
}

fn diff_at(ops: &mut Vec<Op>, prefix: &mut Vec<String>, source: &Value, target: &Value) {
    if values_equal(source, target) {
        return;
    }
    match (source, target) {
        (Value::Array(s), Value::Array(t)) => diff_array(ops, prefix, s, t),
        (Value::Object(s), Value::Object(t)) => diff_object(ops, prefix, s, t),
        _ => ops.push(Op::Replace {
            path: JsonPointer::from_tokens(prefix.clone()),
            value: target.clone(),
        }),
    }
}

fn diff_array(ops: &mut Vec<Op>, prefix: &mut Vec<String>, source: &[Value], target: &[Value]) {
    let common = source.len().min(target.len());
    for index in 0..common {
        prefix.push(index.to_string());
        diff_at(ops, prefix, &source[index], &target[index]);
        prefix.pop();
    }
    // Descending, so each index is addressable at application time.
    for index in (target.len()..source.len()).rev() {
        ops.push(Op::Remove {
            path: pointer_to(prefix, index.to_string()),
        });
    }
    for (index, value) in target.iter().enumerate().skip(source.len()) {
        ops.push(Op::Add {
            path: pointer_to(prefix, index.to_string()),
            value: value.clone(),
        });
    }
}

fn diff_object(
    ops: &mut Vec<Op>,
    prefix: &mut Vec<String>,
    source: &Map<String, Value>,
    target: &Map<String, Value>,
) {
    for (name, source_value) in source {
        match target.get(name) {
            Some(target_value) => {
                prefix.push(name.clone());
                diff_at(ops, prefix, source_value, target_value);
                prefix.pop();
            }
            None => ops.push(Op::Remove {
                path: pointer_to(prefix, name.clone()),
            }),
        }
    }
    for (name, value) in target {
        if !source.contains_key(name) {
            ops.push(Op::Add {
                path: pointer_to(prefix, name.clone()),
                value: value.clone(),
            });
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
