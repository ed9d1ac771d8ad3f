//! Request/response types and dispatch
//!
//! One JSON object per line:
//! `{"id": 1, "method": "call", "params": {"function": "fibonacci", "args": [10]}}`

use labkit::{codes, LabError, Labkit, Value};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use tracing::debug;

#[derive(Debug, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub id: Option<JsonValue>,
    pub method: String,
    #[serde(default)]
    pub params: Option<JsonValue>,
}

#[derive(Debug, Serialize)]
pub struct Response {
    pub id: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CallParams {
    function: String,
    #[serde(default)]
    args: Vec<JsonValue>,
}

#[derive(Debug, Default, Deserialize)]
struct HelpParams {
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ListParams {
    category: Option<String>,
}

impl Response {
    fn ok(id: Option<JsonValue>, result: JsonValue) -> Self {
        Self { id, result: Some(result), error: None }
    }

    fn err(id: Option<JsonValue>, error: LabError) -> Self {
        Self::from_value(id, Value::Error(error))
    }

    /// Error values become error responses; anything else is a result.
    fn from_value(id: Option<JsonValue>, value: Value) -> Self {
        match value {
            Value::Error(e) => Self {
                id,
                result: None,
                error: Some(ErrorBody { code: e.code, message: e.message, suggestion: e.suggestion }),
            },
            other => Self::ok(id, other.to_json()),
        }
    }
}

fn params<T: DeserializeOwned + Default>(params: &Option<JsonValue>) -> Result<T, serde_json::Error> {
    match params {
        Some(p) => serde_json::from_value(p.clone()),
        None => Ok(T::default()),
    }
}

fn invalid_params(e: serde_json::Error) -> LabError {
    LabError::parse_error(format!("invalid params: {}", e))
}

/// Parse and dispatch one input line.
pub fn handle_line(lab: &Labkit, line: &str) -> Response {
    match serde_json::from_str::<Request>(line) {
        Ok(request) => handle_request(lab, request),
        Err(e) => Response::err(None, LabError::parse_error(e.to_string())),
    }
}

pub fn handle_request(lab: &Labkit, request: Request) -> Response {
    debug!(method = %request.method, "handling request");
    let id = request.id;

    match request.method.as_str() {
        "call" => {
            let call: CallParams = match request.params.map(serde_json::from_value::<CallParams>) {
                Some(Ok(p)) => p,
                Some(Err(e)) => return Response::err(id, invalid_params(e)),
                None => return Response::err(id, LabError::parse_error("call requires params.function")),
            };
            let args: Vec<Value> = call.args.into_iter().map(Value::from).collect();
            let result = lab.call_traced(&call.function, &args);
            for step in &result.trace {
                debug!(function = %step.function, result = %step.result, "trace");
            }
            Response::from_value(id, result.value)
        }
        "help" => match params::<HelpParams>(&request.params) {
            Ok(p) => Response::from_value(id, lab.help(p.name.as_deref())),
            Err(e) => Response::err(id, invalid_params(e)),
        },
        "list" => match params::<ListParams>(&request.params) {
            Ok(p) => Response::from_value(id, lab.list_functions(p.category.as_deref())),
            Err(e) => Response::err(id, invalid_params(e)),
        },
        "ping" => Response::ok(id, json!({})),
        other => Response::err(
            id,
            LabError::new(codes::UNDEFINED_FUNC, format!("Method not found: {}", other))
                .with_suggestion("Methods: call, help, list, ping"),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lab() -> Labkit {
        Labkit::with_standard_library()
    }

    #[test]
    fn test_call_returns_result() {
        let r = handle_line(&lab(), r#"{"id": 1, "method": "call", "params": {"function": "fibonacci", "args": [10]}}"#);
        assert_eq!(r.id, Some(json!(1)));
        assert_eq!(r.result, Some(json!(55.0)));
        assert!(r.error.is_none());
    }

    #[test]
    fn test_call_deep_equal_with_json_args() {
        let r = handle_line(
            &lab(),
            r#"{"method": "call", "params": {"function": "deep_equal", "args": [{"a": [1, 2]}, {"a": [1, 2]}]}}"#,
        );
        assert_eq!(r.result, Some(json!(true)));
    }

    #[test]
    fn test_call_error_becomes_error_response() {
        let r = handle_line(&lab(), r#"{"id": "x", "method": "call", "params": {"function": "factorial", "args": [-1]}}"#);
        let err = r.error.unwrap();
        assert_eq!(err.code, codes::DOMAIN_ERROR);
        assert!(r.result.is_none());
    }

    #[test]
    fn test_malformed_line() {
        let r = handle_line(&lab(), "not json");
        assert!(r.id.is_none());
        let err = r.error.unwrap();
        assert_eq!(err.code, codes::PARSE_ERROR);
        assert!(err.message.starts_with("Parse error: "));
    }

    #[test]
    fn test_call_without_params() {
        let r = handle_line(&lab(), r#"{"method": "call"}"#);
        assert_eq!(r.error.unwrap().code, codes::PARSE_ERROR);

        let r = handle_line(&lab(), r#"{"id": 4, "method": "help", "params": {"name": 7}}"#);
        assert_eq!(r.id, Some(json!(4)));
        assert!(r.error.unwrap().message.starts_with("Parse error: invalid params"));
    }

    #[test]
    fn test_help_and_list() {
        let r = handle_line(&lab(), r#"{"method": "help", "params": {"name": "sequence"}}"#);
        assert_eq!(r.result.unwrap()["name"], json!("sequence"));

        let r = handle_line(&lab(), r#"{"method": "list", "params": {"category": "predicates"}}"#);
        assert_eq!(r.result.unwrap().as_array().map(|a| a.len()), Some(2));

        let r = handle_line(&lab(), r#"{"method": "list"}"#);
        assert!(r.result.unwrap().as_array().is_some());
    }

    #[test]
    fn test_unknown_method() {
        let r = handle_line(&lab(), r#"{"id": 3, "method": "shutdown"}"#);
        let err = r.error.unwrap();
        assert_eq!(err.code, codes::UNDEFINED_FUNC);
        assert!(err.suggestion.is_some());
    }
}
