//! JSON codec for patch operations: RFC 6902 wire form ⇔ [`Op`].

use serde_json::{json, Map, Value};

use crate::json_patch::types::{Op, PatchError};
use json_craft_json_pointer::JsonPointer;

fn invalid(msg: impl Into<String>) -> PatchError {
    PatchError::InvalidPatch(msg.into())
}

fn decode_pointer(obj: &Map<String, Value>, field: &str) -> Result<JsonPointer, PatchError> {
    let raw = obj
        .get(field)
        .ok_or_else(|| invalid(format!("missing '{field}' field")))?
        .as_str()
        .ok_or_else(|| invalid(format!("'{field}' must be a string")))?;
    JsonPointer::try_parse(raw).map_err(|_| invalid(format!("malformed pointer in '{field}': {raw:?}")))
}

fn decode_value(obj: &Map<String, Value>, op: &str) -> Result<Value, PatchError> {
    obj.get("value")
        .cloned()
        .ok_or_else(|| invalid(format!("{op} requires 'value'")))
}

// ── Deserialization ───────────────────────────────────────────────────────

/// Decode a single operation object.
pub fn from_json(v: &Value) -> Result<Op, PatchError> {
    let obj = v
        .as_object()
        .ok_or_else(|| invalid("operation must be an object"))?;
    let op_str = obj
        .get("op")
        .ok_or_else(|| invalid("missing 'op' field"))?
        .as_str()
        .ok_or_else(|| invalid("'op' must be a string"))?;
    let path = decode_pointer(obj, "path")?;

    match op_str {
        "add" => Ok(Op::Add {
            path,
            value: decode_value(obj, "add")?,
        }),
        "remove" => Ok(Op::Remove { path }),
        "replace" => Ok(Op::Replace {
            path,
            value: decode_value(obj, "replace")?,
        }),
        "move" => Ok(Op::Move {
            path,
            from: decode_pointer(obj, "from")?,
        }),
        "copy" => Ok(Op::Copy {
            path,
            from: decode_pointer(obj, "from")?,
        }),
        "test" => Ok(Op::Test {
            path,
            value: decode_value(obj, "test")?,
        }),
        other => Err(invalid(format!("unknown op: {other}"))),
    }
}

/// Decode a patch: an array of operation objects.
pub fn from_json_patch(v: &Value) -> Result<Vec<Op>, PatchError> {
    let arr = v
        .as_array()
        .ok_or_else(|| invalid("patch must be an array"))?;
    arr.iter().map(from_json).collect()
}

// ── Serialization ─────────────────────────────────────────────────────────

/// Encode a single operation back to its JSON form.
pub fn to_json(op: &Op) -> Value {
    match op {
        Op::Add { path, value } => json!({
            "op": "add",
            "path": path.to_string(),
            "value": value
        }),
        Op::Remove { path } => json!({
            "op": "remove",
            "path": path.to_string()
        }),
        Op::Replace { path, value } => json!({
            "op": "replace",
            "path": path.to_string(),
            "value": value
        }),
        Op::Move { path, from } => json!({
            "op": "move",
            "path": path.to_string(),
            "from": from.to_string()
        }),
        Op::Copy { path, from } => json!({
            "op": "copy",
            "path": path.to_string(),
            "from": from.to_string()
        }),
        Op::Test { path, value } => json!({
            "op": "test",
            "path": path.to_string(),
            "value": value
        }),
    }
}

/// Encode a list of operations as a patch array.
pub fn to_json_patch(ops: &[Op]) -> Value {
    Value::Array(ops.iter().map(to_json).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_rfc6902_patch() {
        let patch = json!([
            {"op": "add", "path": "/foo", "value": 1},
            {"op": "remove", "path": "/bar"},
            {"op": "replace", "path": "/baz", "value": null},
            {"op": "move", "path": "/a", "from": "/b"},
            {"op": "copy", "path": "/c", "from": "/d"},
            {"op": "test", "path": "", "value": {}},
        ]);
        let ops = from_json_patch(&patch).unwrap();
        let names: Vec<_> = ops.iter().map(Op::op_name).collect();
        assert_eq!(names, vec!["add", "remove", "replace", "move", "copy", "test"]);
        // Encoding reproduces the input, null values included.
        assert_eq!(to_json_patch(&ops), patch);
    }

    #[test]
    fn missing_fields_are_invalid() {
        for op in [
            json!({"path": "/a"}),
            json!({"op": "add", "path": "/a"}),
            json!({"op": "test", "path": "/a"}),
            json!({"op": "move", "path": "/a"}),
            json!({"op": "copy", "path": "/a"}),
            json!({"op": "add", "value": 1}),
            json!({"op": 3, "path": "/a"}),
            json!("not an object"),
        ] {
            assert!(
                matches!(from_json(&op), Err(PatchError::InvalidPatch(_))),
                "{op}"
            );
        }
    }

    #[test]
    fn malformed_pointers_are_invalid() {
        let op = json!({"op": "remove", "path": "no-slash"});
        assert!(matches!(from_json(&op), Err(PatchError::InvalidPatch(_))));
        let op = json!({"op": "remove", "path": "/~2"});
        assert!(matches!(from_json(&op), Err(PatchError::InvalidPatch(_))));
    }

    #[test]
    fn unknown_op_rejected() {
        let op = json!({"op": "merge", "path": "/a", "value": 1});
        match from_json(&op) {
            Err(PatchError::InvalidPatch(msg)) => assert!(msg.contains("unknown op")),
            other => panic!("expected InvalidPatch, got {other:?}"),
        }
    }

    #[test]
    fn patch_must_be_an_array() {
        assert!(matches!(
            from_json_patch(&json!({"op": "add"})),
            Err(PatchError::InvalidPatch(_))
        ));
    }
}
