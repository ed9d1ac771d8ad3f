//! Numeric sequence generators
//!
//! evens, sum_to, recursive_sum_to, factorial, fibonacci.
//!
//! The plain functions follow double-precision semantics: `factorial` of a
//! negative number is NaN and large results overflow to infinity. The
//! `checked_*` and `*_exact` variants report failure explicitly or compute
//! with arbitrary precision.

use crate::helpers::{extract_integer, int_list, require_args};
use dashu_int::UBig;
use labkit_core::NumberError;
use labkit_plugin::prelude::*;

/// Largest input the `sum_to` plugin loops over.
const MAX_SUM_INPUT: i64 = 10_000_000;
/// Largest input the `recursive_sum_to` plugin accepts; each step is a stack frame.
const MAX_RECURSION_INPUT: i64 = 10_000;

/// Even numbers from 2 to 20 inclusive.
pub fn evens_up_to_20() -> Vec<i64> {
    evens_between(2, 20)
}

/// Even numbers in `[lo, hi]`, ascending.
pub fn evens_between(lo: i64, hi: i64) -> Vec<i64> {
    match lo.checked_add(lo.rem_euclid(2)) {
        Some(start) if start <= hi => (start..=hi).step_by(2).collect(),
        _ => Vec::new(),
    }
}

/// `1 + 2 + ... + n` by iteration; 0 for `n <= 0`.
///
/// Saturates at `i64::MAX`; see `checked_sum_to` for an explicit overflow signal.
pub fn sum_to(n: i64) -> i64 {
    let mut sum: i64 = 0;
    for i in 1..=n {
        sum = sum.saturating_add(i);
    }
    sum
}

/// `1 + 2 + ... + n` by recursion; 0 for `n <= 0`.
///
/// Recursion depth is `n`. Large inputs exhaust the stack.
pub fn recursive_sum_to(n: i64) -> i64 {
    if n <= 0 {
        return 0;
    }
    if n == 1 {
        return 1;
    }
    n.saturating_add(recursive_sum_to(n - 1))
}

pub fn checked_sum_to(n: i64) -> Result<i64, NumberError> {
    (1..=n).try_fold(0i64, |acc, i| acc.checked_add(i).ok_or(NumberError::Overflow))
}

/// `n!` as a double. NaN for `n < 0`, infinity once the product leaves f64 range.
pub fn factorial(n: i64) -> f64 {
    if n < 0 {
        return f64::NAN;
    }
    let mut result = 1.0;
    for i in 2..=n {
        result *= i as f64;
        if result.is_infinite() {
            break;
        }
    }
    result
}

/// Exact `n!`.
pub fn factorial_exact(n: u64) -> UBig {
    let mut result = UBig::ONE;
    for i in 2..=n {
        result *= UBig::from(i);
    }
    result
}

pub fn checked_factorial(n: i64) -> Result<UBig, NumberError> {
    let n = u64::try_from(n).map_err(|_| NumberError::NegativeInput(n))?;
    Ok(factorial_exact(n))
}

/// nth Fibonacci number (F1 = F2 = 1) as a double; 0 for `n <= 0`.
pub fn fibonacci(n: i64) -> f64 {
    if n <= 0 {
        return 0.0;
    }
    if n == 1 || n == 2 {
        return 1.0;
    }
    let (mut a, mut b) = (1.0_f64, 1.0_f64);
    for _ in 3..=n {
        let next = a + b;
        a = b;
        b = next;
        if b.is_infinite() {
            break;
        }
    }
    b
}

/// Exact nth Fibonacci number; 0 for `n == 0`.
pub fn fibonacci_exact(n: u64) -> UBig {
    if n == 0 {
        return UBig::ZERO;
    }
    let (mut a, mut b) = (UBig::ONE, UBig::ONE);
    for _ in 3..=n {
        let next = &a + &b;
        a = b;
        b = next;
    }
    b
}

// ============ Evens ============

pub struct Evens;

static EVENS_EXAMPLES: [&str; 1] = ["evens() → [2, 4, 6, 8, 10, 12, 14, 16, 18, 20]"];
static EVENS_RELATED: [&str; 1] = ["sequence"];

impl FunctionPlugin for Evens {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "evens",
            description: "Even numbers from 2 to 20 inclusive",
            usage: "evens()",
            args: &[],
            returns: "List<Number>",
            examples: &EVENS_EXAMPLES,
            category: "sequences",
            related: &EVENS_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        match require_args(args, "evens", 0) {
            Ok(()) => int_list(&evens_up_to_20()),
            Err(e) => Value::Error(e),
        }
    }
}

// ============ SumTo ============

pub struct SumTo;

static SUM_TO_ARGS: [ArgMeta; 1] = [ArgMeta::required("n", "Number", "Upper bound (inclusive)")];
static SUM_TO_EXAMPLES: [&str; 2] = ["sum_to(100) → 5050", "sum_to(0) → 0"];
static SUM_TO_RELATED: [&str; 1] = ["recursive_sum_to"];

impl FunctionPlugin for SumTo {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "sum_to",
            description: "Sum of 1..n computed with a loop",
            usage: "sum_to(n)",
            args: &SUM_TO_ARGS,
            returns: "Number",
            examples: &SUM_TO_EXAMPLES,
            category: "sequences",
            related: &SUM_TO_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if let Err(e) = require_args(args, "sum_to", 1) {
            return Value::Error(e);
        }
        let n = match extract_integer(&args[0], "sum_to", "n") {
            Ok(n) => n,
            Err(e) => return Value::Error(e),
        };
        if n > MAX_SUM_INPUT {
            return Value::Error(LabError::domain_error(format!(
                "sum_to() limited to n <= {}",
                MAX_SUM_INPUT
            )));
        }
        Value::from(sum_to(n))
    }
}

// ============ RecursiveSumTo ============

pub struct RecursiveSumTo;

static RECURSIVE_SUM_TO_EXAMPLES: [&str; 1] = ["recursive_sum_to(10) → 55"];
static RECURSIVE_SUM_TO_RELATED: [&str; 1] = ["sum_to"];

impl FunctionPlugin for RecursiveSumTo {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "recursive_sum_to",
            description: "Sum of 1..n computed by recursion",
            usage: "recursive_sum_to(n)",
            args: &SUM_TO_ARGS,
            returns: "Number",
            examples: &RECURSIVE_SUM_TO_EXAMPLES,
            category: "sequences",
            related: &RECURSIVE_SUM_TO_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if let Err(e) = require_args(args, "recursive_sum_to", 1) {
            return Value::Error(e);
        }
        let n = match extract_integer(&args[0], "recursive_sum_to", "n") {
            Ok(n) => n,
            Err(e) => return Value::Error(e),
        };
        if n > MAX_RECURSION_INPUT {
            return Value::Error(
                LabError::domain_error(format!(
                    "recursive_sum_to() limited to n <= {}",
                    MAX_RECURSION_INPUT
                ))
                .with_suggestion("Use sum_to() for large n"),
            );
        }
        Value::from(recursive_sum_to(n))
    }
}

// ============ Factorial ============

pub struct Factorial;

static FACTORIAL_ARGS: [ArgMeta; 1] = [ArgMeta::required("n", "Number", "Non-negative integer")];
static FACTORIAL_EXAMPLES: [&str; 3] = ["factorial(0) → 1", "factorial(5) → 120", "factorial(-1) → #ERROR"];
static FACTORIAL_RELATED: [&str; 1] = ["fibonacci"];

impl FunctionPlugin for Factorial {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "factorial",
            description: "Product 1·2·…·n",
            usage: "factorial(n)",
            args: &FACTORIAL_ARGS,
            returns: "Number",
            examples: &FACTORIAL_EXAMPLES,
            category: "sequences",
            related: &FACTORIAL_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if let Err(e) = require_args(args, "factorial", 1) {
            return Value::Error(e);
        }
        let n = match extract_integer(&args[0], "factorial", "n") {
            Ok(n) => n,
            Err(e) => return Value::Error(e),
        };
        let result = factorial(n);
        if result.is_nan() {
            return Value::Error(NumberError::NegativeInput(n).into());
        }
        if result.is_infinite() {
            return Value::Error(NumberError::Overflow.into());
        }
        Value::Number(result)
    }
}

// ============ Fibonacci ============

pub struct Fibonacci;

static FIBONACCI_ARGS: [ArgMeta; 1] = [ArgMeta::required("n", "Number", "Index (1-based)")];
static FIBONACCI_EXAMPLES: [&str; 3] = ["fibonacci(1) → 1", "fibonacci(10) → 55", "fibonacci(0) → 0"];
static FIBONACCI_RELATED: [&str; 1] = ["factorial"];

impl FunctionPlugin for Fibonacci {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "fibonacci",
            description: "nth Fibonacci number (1, 1, 2, 3, 5, ...)",
            usage: "fibonacci(n)",
            args: &FIBONACCI_ARGS,
            returns: "Number",
            examples: &FIBONACCI_EXAMPLES,
            category: "sequences",
            related: &FIBONACCI_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if let Err(e) = require_args(args, "fibonacci", 1) {
            return Value::Error(e);
        }
        let n = match extract_integer(&args[0], "fibonacci", "n") {
            Ok(n) => n,
            Err(e) => return Value::Error(e),
        };
        let result = fibonacci(n);
        if result.is_infinite() {
            return Value::Error(NumberError::Overflow.into());
        }
        Value::Number(result)
    }
}
