//! Numeric predicates: is_integer, is_power_of_two
//!
//! Predicates never fail on the wrong input shape; anything that is not a
//! number is simply `false`.

use crate::helpers::require_args;
use labkit_core::number::{is_int32, to_int32};
use labkit_plugin::prelude::*;

/// True for numbers that survive 32-bit truncation unchanged.
///
/// This is a narrow check: `2^31` and larger integers are rejected.
pub fn is_integer(value: &Value) -> bool {
    match value {
        Value::Number(n) => is_int32(*n),
        _ => false,
    }
}

/// True for positive numbers where `n & (n - 1) == 0` on the 32-bit view.
///
/// Both operands go through `to_int32`, so positive fractions below 1
/// (`0.5`, `0.25`) pass, as do values whose truncation is a power of two.
pub fn is_power_of_two(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.is_finite() && *n > 0.0 && to_int32(*n) & to_int32(*n - 1.0) == 0,
        _ => false,
    }
}

/// Native-integer form of `is_power_of_two`: `n > 0 && n & (n - 1) == 0`.
pub fn is_power_of_two_i64(n: i64) -> bool {
    n > 0 && n & (n - 1) == 0
}

// ============ IsInteger ============

pub struct IsInteger;

static IS_INTEGER_ARGS: [ArgMeta; 1] = [ArgMeta::required("value", "Any", "Value to test")];
static IS_INTEGER_EXAMPLES: [&str; 3] = [
    "is_integer(42) → true",
    "is_integer(3.5) → false",
    "is_integer(\"3\") → false",
];
static IS_INTEGER_RELATED: [&str; 1] = ["is_power_of_two"];

impl FunctionPlugin for IsInteger {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "is_integer",
            description: "Check whether a value is a number that fits a signed 32-bit integer",
            usage: "is_integer(value)",
            args: &IS_INTEGER_ARGS,
            returns: "Bool",
            examples: &IS_INTEGER_EXAMPLES,
            category: "predicates",
            related: &IS_INTEGER_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if let Err(e) = require_args(args, "is_integer", 1) {
            return Value::Error(e);
        }
        match &args[0] {
            Value::Error(e) => Value::Error(e.clone()),
            v => Value::Bool(is_integer(v)),
        }
    }
}

// ============ IsPowerOfTwo ============

pub struct IsPowerOfTwo;

static IS_POWER_OF_TWO_ARGS: [ArgMeta; 1] = [ArgMeta::required("n", "Any", "Value to test")];
static IS_POWER_OF_TWO_EXAMPLES: [&str; 4] = [
    "is_power_of_two(1024) → true",
    "is_power_of_two(0.5) → true",
    "is_power_of_two(3) → false",
    "is_power_of_two(-4) → false",
];
static IS_POWER_OF_TWO_RELATED: [&str; 1] = ["is_integer"];

impl FunctionPlugin for IsPowerOfTwo {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "is_power_of_two",
            description: "Check whether a positive number has a single set bit (32-bit view)",
            usage: "is_power_of_two(n)",
            args: &IS_POWER_OF_TWO_ARGS,
            returns: "Bool",
            examples: &IS_POWER_OF_TWO_EXAMPLES,
            category: "predicates",
            related: &IS_POWER_OF_TWO_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if let Err(e) = require_args(args, "is_power_of_two", 1) {
            return Value::Error(e);
        }
        match &args[0] {
            Value::Error(e) => Value::Error(e.clone()),
            v => Value::Bool(is_power_of_two(v)),
        }
    }
}
