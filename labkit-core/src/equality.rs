//! Structural equality over `Value`
//!
//! Two values are equal when they are the same primitive (NaN included) or
//! containers of the same kind whose entries are pairwise equal. Recursion
//! depth follows the nesting depth of the inputs; `Value` owns its children,
//! so cycles cannot be constructed.

use crate::number::same_value;
use crate::Value;

/// Compare two values structurally.
///
/// Key order in objects does not matter. A list never equals an object,
/// even one keyed by indices.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    if same_primitive(a, b) {
        return true;
    }
    if !a.is_structured() || !b.is_structured() {
        return false;
    }

    match (a, b) {
        (Value::List(xs), Value::List(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| deep_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs.iter().all(|(key, x)| match ys.get(key) {
                    Some(y) => deep_equal(x, y),
                    None => false,
                })
        }
        _ => false,
    }
}

fn same_primitive(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => same_value(*x, *y),
        (Value::Text(x), Value::Text(y)) => x == y,
        (Value::Error(x), Value::Error(y)) => x.code == y.code && x.message == y.message,
        _ => false,
    }
}
