//! Structural equality and total ordering over JSON values.
//!
//! Numbers promote through two representations: when both operands are
//! integers they compare exactly, otherwise both are taken as doubles. A
//! number that has neither representation makes the comparison fail — the
//! caller sees [`CompareError`] rather than a silent wrong answer.

use std::cmp::Ordering;

use serde_json::{Number, Value};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompareError {
    #[error("numbers have no common representation")]
    IncomparableNumbers,
}

// Kind ranks for the total order:
// Object < Array < String < Number < true < false < Null.
fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Object(_) => 0,
        Value::Array(_) => 1,
        Value::String(_) => 2,
        Value::Number(_) => 3,
        Value::Bool(true) => 4,
        Value::Bool(false) => 5,
        Value::Null => 6,
    }
}

fn as_integer(n: &Number) -> Option<i128> {
    if let Some(i) = n.as_i64() {
        return Some(i128::from(i));
    }
    n.as_u64().map(i128::from)
}

fn compare_numbers(a: &Number, b: &Number) -> Result<Ordering, CompareError> {
    if let (Some(x), Some(y)) = (as_integer(a), as_integer(b)) {
        return Ok(x.cmp(&y));
    }
    let x = a.as_f64().ok_or(CompareError::IncomparableNumbers)?;
    let y = b.as_f64().ok_or(CompareError::IncomparableNumbers)?;
    x.partial_cmp(&y).ok_or(CompareError::IncomparableNumbers)
}

/// Total order over JSON values.
///
/// Values of different kinds order by kind rank. Within a kind: strings by
/// codepoint, numbers by the integer/double promotion above, arrays
/// pointwise with shorter-is-less on a prefix tie, objects by sorting each
/// side's properties by name and comparing pairwise, name before value.
pub fn compare(a: &Value, b: &Value) -> Result<Ordering, CompareError> {
    let ranks = kind_rank(a).cmp(&kind_rank(b));
    if ranks != Ordering::Equal {
        return Ok(ranks);
    }
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => compare_numbers(x, y),
        (Value::String(x), Value::String(y)) => Ok(x.cmp(y)),
        (Value::Array(x), Value::Array(y)) => {
            for (ix, iy) in x.iter().zip(y.iter()) {
                let ord = compare(ix, iy)?;
                if ord != Ordering::Equal {
                    return Ok(ord);
                }
            }
            Ok(x.len().cmp(&y.len()))
        }
        (Value::Object(x), Value::Object(y)) => {
            let mut xs: Vec<(&String, &Value)> = x.iter().collect();
            let mut ys: Vec<(&String, &Value)> = y.iter().collect();
            xs.sort_by(|l, r| l.0.cmp(r.0));
            ys.sort_by(|l, r| l.0.cmp(r.0));
            for ((nx, vx), (ny, vy)) in xs.iter().zip(ys.iter()) {
                let names = nx.cmp(ny);
                if names != Ordering::Equal {
                    return Ok(names);
                }
                let values = compare(vx, vy)?;
                if values != Ordering::Equal {
                    return Ok(values);
                }
            }
            Ok(xs.len().cmp(&ys.len()))
        }
        // Null and each boolean value are singletons within their rank.
        _ => Ok(Ordering::Equal),
    }
}

/// Structural equality with the same number promotion as [`compare`].
pub fn deep_equal(a: &Value, b: &Value) -> Result<bool, CompareError> {
    match (a, b) {
        (Value::Null, Value::Null) => Ok(true),
        (Value::Bool(x), Value::Bool(y)) => Ok(x == y),
        (Value::Number(x), Value::Number(y)) => {
            Ok(compare_numbers(x, y)? == Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => Ok(x == y),
        (Value::Array(x), Value::Array(y)) => {
            if x.len() != y.len() {
                return Ok(false);
            }
            for (ix, iy) in x.iter().zip(y.iter()) {
                if !deep_equal(ix, iy)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        (Value::Object(x), Value::Object(y)) => {
            if x.len() != y.len() {
                return Ok(false);
            }
            for (name, vx) in x {
                match y.get(name) {
                    Some(vy) => {
                        if !deep_equal(vx, vy)? {
                            return Ok(false);
                        }
                    }
                    None => return Ok(false),
                }
            }
            Ok(true)
        }
        _ => Ok(false),
    }
}
