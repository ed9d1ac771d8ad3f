//! Evaluation Context

use crate::PluginRegistry;
use labkit_core::Value;
use std::sync::Arc;

/// Evaluation context passed to plugins
pub struct EvalContext {
    pub registry: Arc<PluginRegistry>,
    pub tracing: bool,
    pub trace: Vec<TraceStep>,
}

/// Single recorded function call
#[derive(Debug, Clone)]
pub struct TraceStep {
    pub function: String,
    pub args: Vec<Value>,
    pub result: Value,
}

impl EvalContext {
    pub fn new(registry: Arc<PluginRegistry>) -> Self {
        Self {
            registry,
            tracing: false,
            trace: Vec::new(),
        }
    }

    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.tracing = enabled;
        self
    }

    /// Call a registered function by name, recording the step when tracing.
    pub fn call(&mut self, name: &str, args: &[Value]) -> Value {
        let registry = Arc::clone(&self.registry);
        let result = registry.call_function(name, args, self);
        self.record_trace(name, args, &result);
        result
    }

    pub fn record_trace(&mut self, function: &str, args: &[Value], result: &Value) {
        if self.tracing {
            self.trace.push(TraceStep {
                function: function.to_string(),
                args: args.to_vec(),
                result: result.clone(),
            });
        }
    }

    /// Errors produced by traced calls, in call order.
    pub fn traced_errors(&self) -> Vec<&labkit_core::LabError> {
        self.trace.iter().filter_map(|s| s.result.as_error()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FunctionMeta, FunctionPlugin};

    struct Echo;

    impl FunctionPlugin for Echo {
        fn meta(&self) -> FunctionMeta {
            FunctionMeta {
                name: "echo",
                description: "Return the first argument",
                usage: "echo(x)",
                args: &[],
                returns: "Any",
                examples: &[],
                category: "test",
                related: &[],
            }
        }

        fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
            args.first().cloned().unwrap_or_default()
        }
    }

    fn registry() -> Arc<PluginRegistry> {
        Arc::new(PluginRegistry::new().with_function(Echo))
    }

    #[test]
    fn test_trace_disabled_by_default() {
        let mut ctx = EvalContext::new(registry());
        let result = ctx.call("echo", &[Value::from(1i64)]);
        assert_eq!(result, Value::from(1i64));
        assert!(ctx.trace.is_empty());
    }

    #[test]
    fn test_trace_records_calls_and_errors() {
        let mut ctx = EvalContext::new(registry()).with_tracing(true);
        ctx.call("echo", &[Value::from("hi")]);
        ctx.call("missing", &[]);
        assert_eq!(ctx.trace.len(), 2);
        assert_eq!(ctx.trace[0].function, "echo");
        assert_eq!(ctx.trace[0].result, Value::from("hi"));
        let errors = ctx.traced_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, labkit_core::codes::UNDEFINED_FUNC);
    }
}
