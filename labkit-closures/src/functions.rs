//! accumulate and sequence plugins
//!
//! State lives for the duration of one call: the plugin builds a fresh
//! accumulator or cursor, drives it, and returns the values it produced.

use crate::{Accumulator, Operation, SequenceGenerator};
use labkit_plugin::prelude::*;
use tracing::warn;

const MAX_ELEMENTS: usize = 100_000;

fn number_arg(arg: &Value, func: &str, name: &str) -> Result<f64, LabError> {
    match arg {
        Value::Number(n) => Ok(*n),
        Value::Error(e) => Err(e.clone()),
        other => Err(LabError::arg_type(func, name, "Number", other.type_name())),
    }
}

fn optional_number(args: &[Value], index: usize, func: &str, name: &str, default: f64) -> Result<f64, LabError> {
    match args.get(index) {
        None => Ok(default),
        Some(v) if v.is_absent() => Ok(default),
        Some(v) => number_arg(v, func, name),
    }
}

// ============ Accumulate ============

pub struct Accumulate;

static ACCUMULATE_ARGS: [ArgMeta; 3] = [
    ArgMeta::required("initial", "Number", "Starting stored value"),
    ArgMeta::required("op", "Text", "add, subtract, multiply, divide, max, min; anything else keeps the initial value"),
    ArgMeta::required("values", "List<Number>", "Inputs fed to the accumulator in order"),
];

static ACCUMULATE_EXAMPLES: [&str; 3] = [
    "accumulate(10, \"add\", [5, 3]) → [15, 18]",
    "accumulate(1, \"multiply\", [2, 3, 4]) → [2, 6, 24]",
    "accumulate(7, null, [1, 2]) → [7, 7]",
];

static ACCUMULATE_RELATED: [&str; 1] = ["sequence"];

impl FunctionPlugin for Accumulate {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "accumulate",
            description: "Feed values through an accumulator and return each stored value",
            usage: "accumulate(initial, op, values)",
            args: &ACCUMULATE_ARGS,
            returns: "List<Number>",
            examples: &ACCUMULATE_EXAMPLES,
            category: "closures",
            related: &ACCUMULATE_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.len() != 3 {
            return Value::Error(LabError::arg_count("accumulate", 3, args.len()));
        }

        let initial = match number_arg(&args[0], "accumulate", "initial") {
            Ok(n) => n,
            Err(e) => return Value::Error(e),
        };

        let op = match &args[1] {
            Value::Text(name) => {
                let op = Operation::parse(name);
                if op.is_none() {
                    warn!(op = %name, "unknown accumulate operation, using constant accumulator");
                }
                op
            }
            Value::Error(e) => return Value::Error(e.clone()),
            _ => None,
        };

        let values = match &args[2] {
            Value::List(items) => items,
            Value::Error(e) => return Value::Error(e.clone()),
            other => {
                return Value::Error(LabError::arg_type("accumulate", "values", "List", other.type_name()))
            }
        };

        let mut acc = match op {
            Some(op) => Accumulator::new(initial, move |stored: &f64, value| op.apply(*stored, value)),
            None => Accumulator::constant(initial),
        };

        let mut result = Vec::with_capacity(values.len());
        for item in values {
            match number_arg(item, "accumulate", "values") {
                Ok(n) => result.push(Value::Number(acc.call(n))),
                Err(e) => return Value::Error(e),
            }
        }
        Value::List(result)
    }
}

// ============ Sequence ============

pub struct Sequence;

static SEQUENCE_ARGS: [ArgMeta; 3] = [
    ArgMeta::required("count", "Number", "How many values to take"),
    ArgMeta::optional("start", "Number", "First value", "0"),
    ArgMeta::optional("step", "Number", "Increment", "1"),
];

static SEQUENCE_EXAMPLES: [&str; 2] = [
    "sequence(3, 5, 2) → [5, 7, 9]",
    "sequence(2) → [0, 1]",
];

static SEQUENCE_RELATED: [&str; 2] = ["accumulate", "evens"];

impl FunctionPlugin for Sequence {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "sequence",
            description: "First values of an arithmetic sequence cursor",
            usage: "sequence(count, [start], [step])",
            args: &SEQUENCE_ARGS,
            returns: "List<Number>",
            examples: &SEQUENCE_EXAMPLES,
            category: "closures",
            related: &SEQUENCE_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.is_empty() || args.len() > 3 {
            return Value::Error(LabError::arg_count("sequence", 1, args.len()));
        }

        let count = match number_arg(&args[0], "sequence", "count") {
            Ok(n) if n.fract() == 0.0 && n >= 0.0 && n <= MAX_ELEMENTS as f64 => n as usize,
            Ok(_) => {
                return Value::Error(LabError::domain_error(format!(
                    "sequence() count must be an integer in 0..={}",
                    MAX_ELEMENTS
                )))
            }
            Err(e) => return Value::Error(e),
        };

        let start = match optional_number(args, 1, "sequence", "start", 0.0) {
            Ok(n) => n,
            Err(e) => return Value::Error(e),
        };
        let step = match optional_number(args, 2, "sequence", "step", 1.0) {
            Ok(n) => n,
            Err(e) => return Value::Error(e),
        };

        Value::List(
            SequenceGenerator::new(start, step)
                .take(count)
                .map(Value::Number)
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labkit_core::codes;
    use std::sync::Arc;

    fn eval_ctx() -> EvalContext {
        EvalContext::new(Arc::new(PluginRegistry::new()))
    }

    fn numbers(v: &Value) -> Vec<f64> {
        v.as_list().unwrap().iter().filter_map(Value::as_number).collect()
    }

    #[test]
    fn test_accumulate_add() {
        let args = vec![Value::from(10i64), Value::from("add"), Value::from(vec![5i64, 3])];
        assert_eq!(numbers(&Accumulate.call(&args, &eval_ctx())), vec![15.0, 18.0]);
    }

    #[test]
    fn test_accumulate_without_operation_is_constant() {
        let ctx = eval_ctx();
        let args = vec![Value::from(7i64), Value::Null, Value::from(vec![1i64, 2, 3])];
        assert_eq!(numbers(&Accumulate.call(&args, &ctx)), vec![7.0, 7.0, 7.0]);

        let args = vec![Value::from(7i64), Value::from("pow"), Value::from(vec![1i64])];
        assert_eq!(numbers(&Accumulate.call(&args, &ctx)), vec![7.0]);
    }

    #[test]
    fn test_accumulate_rejects_non_numbers() {
        let args = vec![Value::from(0i64), Value::from("add"), Value::from(vec!["x"])];
        let result = Accumulate.call(&args, &eval_ctx());
        assert_eq!(result.as_error().unwrap().code, codes::ARG_TYPE);
    }

    #[test]
    fn test_sequence_defaults() {
        let ctx = eval_ctx();
        assert_eq!(numbers(&Sequence.call(&[Value::from(2i64)], &ctx)), vec![0.0, 1.0]);
        let args = vec![Value::from(3i64), Value::from(5i64), Value::from(2i64)];
        assert_eq!(numbers(&Sequence.call(&args, &ctx)), vec![5.0, 7.0, 9.0]);
        let args = vec![Value::from(2i64), Value::Null, Value::from(3i64)];
        assert_eq!(numbers(&Sequence.call(&args, &ctx)), vec![0.0, 3.0]);
    }

    #[test]
    fn test_sequence_count_limits() {
        let ctx = eval_ctx();
        assert!(Sequence.call(&[Value::from(-1i64)], &ctx).is_error());
        assert!(Sequence.call(&[Value::from(1.5)], &ctx).is_error());
        assert!(Sequence.call(&[Value::from(1_000_000i64)], &ctx).is_error());
        assert_eq!(Sequence.call(&[Value::from(0i64)], &ctx).as_list().map(|l| l.len()), Some(0));
    }
}
