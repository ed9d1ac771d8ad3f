//! deep_equal plugin

use crate::helpers::require_args;
use labkit_plugin::prelude::*;

pub struct DeepEqual;

static DEEP_EQUAL_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("a", "Any", "First value"),
    ArgMeta::required("b", "Any", "Second value"),
];
static DEEP_EQUAL_EXAMPLES: [&str; 3] = [
    "deep_equal({a: [1, 2], b: \"x\"}, {a: [1, 2], b: \"x\"}) → true",
    "deep_equal({a: 1}, {a: 1, b: 2}) → false",
    "deep_equal([1, 2], {\"0\": 1, \"1\": 2}) → false",
];

impl FunctionPlugin for DeepEqual {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "deep_equal",
            description: "Structural equality: same primitives, or same-kind containers with equal entries",
            usage: "deep_equal(a, b)",
            args: &DEEP_EQUAL_ARGS,
            returns: "Bool",
            examples: &DEEP_EQUAL_EXAMPLES,
            category: "equality",
            related: &[],
        }
    }

    // Error values are compared like any other value rather than propagated.
    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        match require_args(args, "deep_equal", 2) {
            Ok(()) => Value::Bool(deep_equal(&args[0], &args[1])),
            Err(e) => Value::Error(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deep_equal_plugin() {
        let ctx = EvalContext::new(std::sync::Arc::new(PluginRegistry::new()));
        let a = Value::from(json!({"a": [1, 2], "b": "x"}));
        assert_eq!(DeepEqual.call(&[a.clone(), a.clone()], &ctx), Value::Bool(true));
        let b = Value::from(json!({"a": [1, 2]}));
        assert_eq!(DeepEqual.call(&[a, b], &ctx), Value::Bool(false));
        assert_eq!(
            DeepEqual.call(&[Value::Undefined, Value::Null], &ctx),
            Value::Bool(false)
        );
        assert!(DeepEqual.call(&[Value::Null], &ctx).is_error());
    }
}
