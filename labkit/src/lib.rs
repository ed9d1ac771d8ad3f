//! Labkit - numeric exercises behind a function registry
//!
//! The `Labkit` engine owns a shared `PluginRegistry` loaded with the
//! standard library and the closure-backed functions, and evaluates calls by
//! name. The plain Rust API of each crate is re-exported for direct use.

pub use labkit_closures::{
    make_accumulator, make_sequence_generator, Accumulator, Operation, SequenceGenerator,
};
pub use labkit_core::{codes, deep_equal, LabError, NumberError, Severity, Value};
pub use labkit_plugin::{EvalContext, FunctionPlugin, PluginRegistry, TraceStep};
pub use labkit_std::{
    checked_factorial, checked_sum_to, evens_between, evens_up_to_20, factorial, factorial_exact,
    fibonacci, fibonacci_exact, is_email_valid, is_integer, is_name_valid, is_power_of_two,
    recursive_sum_to, sum_to, validate_observation, FieldError, Observation, ObservationForm,
    ValidationRules,
};

use std::sync::Arc;
use tracing::info;

/// Result of a traced call
#[derive(Debug, Clone)]
pub struct CallResult {
    pub value: Value,
    pub trace: Vec<TraceStep>,
}

/// Main Labkit engine
pub struct Labkit {
    registry: Arc<PluginRegistry>,
    tracing: bool,
}

impl Labkit {
    pub fn new(registry: PluginRegistry) -> Self {
        info!(functions = registry.len(), "labkit engine ready");
        Self {
            registry: Arc::new(registry),
            tracing: false,
        }
    }

    pub fn with_standard_library() -> Self {
        Self::new(standard_registry())
    }

    pub fn with_rules(rules: ValidationRules) -> Self {
        Self::new(registry_with(rules))
    }

    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.tracing = enabled;
        self
    }

    fn context(&self) -> EvalContext {
        EvalContext::new(Arc::clone(&self.registry)).with_tracing(self.tracing)
    }

    /// Call a function by name
    pub fn call(&self, name: &str, args: &[Value]) -> Value {
        self.context().call(name, args)
    }

    /// Call a function by name and keep the recorded trace
    pub fn call_traced(&self, name: &str, args: &[Value]) -> CallResult {
        let mut ctx = self.context();
        let value = ctx.call(name, args);
        CallResult {
            value,
            trace: ctx.trace,
        }
    }

    pub fn help(&self, name: Option<&str>) -> Value {
        self.registry.help(name)
    }

    pub fn list_functions(&self, category: Option<&str>) -> Value {
        self.registry.list_functions(category)
    }
}

impl Default for Labkit {
    fn default() -> Self {
        Self::with_standard_library()
    }
}

/// Registry with every Labkit function and the given validation rules
pub fn registry_with(rules: ValidationRules) -> PluginRegistry {
    let registry = labkit_std::load_std_library_with(PluginRegistry::new(), rules);
    labkit_closures::load_closures_library(registry)
}

/// Registry with every Labkit function and default rules
pub fn standard_registry() -> PluginRegistry {
    registry_with(ValidationRules::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lab() -> Labkit {
        Labkit::with_standard_library()
    }

    fn num(n: i64) -> Value {
        Value::from(n)
    }

    #[test]
    fn test_predicates_by_name() {
        let lab = lab();
        assert_eq!(lab.call("is_integer", &[Value::from(3.5)]), Value::Bool(false));
        assert_eq!(lab.call("is_integer", &[Value::from("3")]), Value::Bool(false));
        assert_eq!(lab.call("is_power_of_two", &[num(1)]), Value::Bool(true));
        assert_eq!(lab.call("is_power_of_two", &[num(0)]), Value::Bool(false));
        assert_eq!(lab.call("is_power_of_two", &[num(3)]), Value::Bool(false));
        assert_eq!(lab.call("is_power_of_two", &[num(1024)]), Value::Bool(true));
        assert_eq!(lab.call("is_power_of_two", &[num(-4)]), Value::Bool(false));
        assert_eq!(lab.call("is_power_of_two", &[Value::from(0.5)]), Value::Bool(true));
    }

    #[test]
    fn test_sequences_by_name() {
        let lab = lab();
        assert_eq!(
            lab.call("evens", &[]),
            Value::from(json!([2, 4, 6, 8, 10, 12, 14, 16, 18, 20]))
        );
        assert_eq!(lab.call("sum_to", &[num(0)]), num(0));
        assert_eq!(lab.call("recursive_sum_to", &[num(10)]), num(55));
        assert_eq!(lab.call("factorial", &[num(5)]), num(120));
        assert_eq!(lab.call("fibonacci", &[num(10)]), num(55));
    }

    #[test]
    fn test_closures_by_name() {
        let lab = lab();
        let run = lab.call("accumulate", &[num(10), Value::from("add"), Value::from(vec![5i64, 3])]);
        assert_eq!(run, Value::from(json!([15, 18])));
        let seq = lab.call("sequence", &[num(3), num(5), num(2)]);
        assert_eq!(seq, Value::from(json!([5, 7, 9])));
    }

    #[test]
    fn test_deep_equal_by_name() {
        let lab = lab();
        let a = Value::from(json!({"a": [1, 2], "b": "x"}));
        assert_eq!(lab.call("deep_equal", &[a.clone(), a]), Value::Bool(true));
        let nan = Value::Number(f64::NAN);
        assert_eq!(lab.call("deep_equal", &[nan.clone(), nan]), Value::Bool(true));
        assert_eq!(
            lab.call("deep_equal", &[Value::from(json!([1, 2])), Value::from(json!({"0": 1, "1": 2}))]),
            Value::Bool(false)
        );
    }

    #[test]
    fn test_rules_reach_validators() {
        let strict = Labkit::with_rules(ValidationRules { min_name_len: 4 });
        assert_eq!(strict.call("is_name_valid", &[Value::from("Ann")]), Value::Bool(false));
        assert_eq!(lab().call("is_name_valid", &[Value::from("Ann")]), Value::Bool(true));
    }

    #[test]
    fn test_validate_observation_by_name() {
        let lab = lab();
        let form = Value::from(json!({"name": "Al", "email": "a@b.c", "agree": "on", "species": "toad"}));
        assert_eq!(lab.call("validate_observation", &[form]), Value::List(vec![]));

        let bad = lab.call("validate_observation", &[Value::from(json!({"species": 3}))]);
        assert_eq!(bad.as_error().unwrap().code, codes::VALIDATION);
    }

    #[test]
    fn test_traced_call() {
        let lab = lab().with_tracing(true);
        let result = lab.call_traced("factorial", &[num(-1)]);
        assert!(result.value.is_error());
        assert_eq!(result.trace.len(), 1);
        assert_eq!(result.trace[0].function, "factorial");

        let untraced = Labkit::with_standard_library().call_traced("factorial", &[num(3)]);
        assert!(untraced.trace.is_empty());
    }

    #[test]
    fn test_unknown_function() {
        let result = lab().call("fibonaci", &[num(3)]);
        let err = result.as_error().unwrap();
        assert_eq!(err.code, codes::UNDEFINED_FUNC);
        assert!(err.suggestion.as_deref().unwrap_or_default().contains("fibonacci"));
    }

    #[test]
    fn test_catalog() {
        let lab = lab();
        assert_eq!(lab.list_functions(None).as_list().unwrap().len(), 13);
        assert_eq!(lab.list_functions(Some("closures")).as_list().unwrap().len(), 2);
        assert!(lab.help(Some("sequence")).as_object().is_some());
    }
}
