//! Argument extraction shared by the standard plugins

use labkit_core::number::to_i64;
use labkit_core::{LabError, Value};

/// Extract a single number from argument
pub fn extract_number(arg: &Value, func: &str, name: &str) -> Result<f64, LabError> {
    match arg {
        Value::Number(n) => Ok(*n),
        Value::Error(e) => Err(e.clone()),
        other => Err(LabError::arg_type(func, name, "Number", other.type_name())),
    }
}

/// Extract an integral number as `i64`
pub fn extract_integer(arg: &Value, func: &str, name: &str) -> Result<i64, LabError> {
    let n = extract_number(arg, func, name)?;
    to_i64(n).map_err(|e| LabError::from(e).with_suggestion(format!("{}() takes a whole number", func)))
}

/// Extract a text argument
pub fn extract_text<'a>(arg: &'a Value, func: &str, name: &str) -> Result<&'a str, LabError> {
    match arg {
        Value::Text(s) => Ok(s),
        Value::Error(e) => Err(e.clone()),
        other => Err(LabError::arg_type(func, name, "Text", other.type_name())),
    }
}

/// Require exactly `expected` arguments
pub fn require_args(args: &[Value], func: &str, expected: usize) -> Result<(), LabError> {
    if args.len() != expected {
        return Err(LabError::arg_count(func, expected, args.len()));
    }
    Ok(())
}

/// Integers as a list value
pub fn int_list(items: &[i64]) -> Value {
    Value::List(items.iter().map(|&n| Value::from(n)).collect())
}
