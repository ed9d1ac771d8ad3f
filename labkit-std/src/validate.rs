//! Observation form validators
//!
//! Pure rules for a field-observation submission: observer name, contact
//! e-mail, and consent, plus shaping raw form fields into an `Observation`.
//! Rendering and form wiring live with the caller.

use crate::helpers::{extract_integer, extract_text};
use chrono::{DateTime, Utc};
use labkit_plugin::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

pub const DEFAULT_MIN_NAME_LEN: usize = 2;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"))
}

/// Validation thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationRules {
    pub min_name_len: usize,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self { min_name_len: DEFAULT_MIN_NAME_LEN }
    }
}

/// A submitted observation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Observation {
    pub name: String,
    pub email: String,
    pub species: String,
    pub experience: String,
    pub attitude: String,
    #[serde(alias = "agree")]
    pub agreed: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

/// Raw form fields as submitted; absent fields are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ObservationForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub species: Option<String>,
    pub experience: Option<String>,
    pub attitude: Option<String>,
    /// Checkbox value; checked is `"on"`.
    pub agree: Option<String>,
    pub message: Option<String>,
}

impl Observation {
    /// Normalize a raw form: name, email and message are trimmed, the
    /// checkbox counts only when it is `"on"`, and the record is stamped
    /// with `submitted_at`.
    pub fn from_form(form: ObservationForm, submitted_at: DateTime<Utc>) -> Self {
        let trimmed = |s: Option<String>| s.map(|s| s.trim().to_string()).unwrap_or_default();
        Self {
            name: trimmed(form.name),
            email: trimmed(form.email),
            species: form.species.unwrap_or_default(),
            experience: form.experience.unwrap_or_default(),
            attitude: form.attitude.unwrap_or_default(),
            agreed: form.agree.as_deref() == Some("on"),
            message: trimmed(form.message),
            date: Some(submitted_at),
        }
    }

    /// `from_form` stamped with the current time.
    pub fn submit(form: ObservationForm) -> Self {
        Self::from_form(form, Utc::now())
    }
}

/// One failed rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Name has at least `min_len` characters once surrounding whitespace is trimmed.
///
/// Length is measured in UTF-16 code units, so a character outside the
/// Basic Multilingual Plane counts twice.
pub fn is_name_valid(name: &str, min_len: usize) -> bool {
    name.trim().encode_utf16().count() >= min_len
}

pub fn is_email_valid(email: &str) -> bool {
    email_regex().is_match(email)
}

pub fn is_agreement_valid(agreed: bool) -> bool {
    agreed
}

/// Check every field; an empty result means the observation is valid.
pub fn validate_observation(obs: &Observation, rules: &ValidationRules) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if !is_name_valid(&obs.name, rules.min_name_len) {
        errors.push(FieldError {
            field: "name",
            message: format!("Name must contain at least {} characters", rules.min_name_len),
        });
    }
    if !is_email_valid(&obs.email) {
        errors.push(FieldError {
            field: "email",
            message: "Enter a valid e-mail address".to_string(),
        });
    }
    if !is_agreement_valid(obs.agreed) {
        errors.push(FieldError {
            field: "agreed",
            message: "Consent is required".to_string(),
        });
    }
    errors
}

fn min_len_arg(args: &[Value], index: usize, func: &str, default: usize) -> Result<usize, LabError> {
    match args.get(index) {
        None => Ok(default),
        Some(v) if v.is_absent() => Ok(default),
        Some(v) => {
            let n = extract_integer(v, func, "min_len")?;
            usize::try_from(n).map_err(|_| LabError::domain_error(format!("{}() min_len must be >= 0", func)))
        }
    }
}

fn observation_from(value: &Value) -> Result<Observation, LabError> {
    let obj = match value {
        Value::Object(obj) => obj,
        Value::Error(e) => return Err(e.clone()),
        other => {
            return Err(LabError::arg_type("validate_observation", "observation", "Object", other.type_name()))
        }
    };

    let text = |key: &'static str| -> Result<String, LabError> {
        match obj.get(key) {
            None => Ok(String::new()),
            Some(v) if v.is_absent() => Ok(String::new()),
            Some(Value::Text(s)) => Ok(s.clone()),
            Some(other) => Err(LabError::validation(key, format!("expected Text, got {}", other.type_name()))),
        }
    };

    // Either a boolean or the raw checkbox value.
    let agreed = match obj.get("agreed").or_else(|| obj.get("agree")) {
        None => false,
        Some(v) if v.is_absent() => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Text(s)) => s == "on",
        Some(other) => {
            return Err(LabError::validation("agreed", format!("expected Bool, got {}", other.type_name())))
        }
    };

    let date = match text("date")?.as_str() {
        "" => None,
        s => Some(
            DateTime::parse_from_rfc3339(s)
                .map_err(|e| LabError::validation("date", format!("expected an ISO-8601 timestamp: {}", e)))?
                .with_timezone(&Utc),
        ),
    };

    Ok(Observation {
        name: text("name")?,
        email: text("email")?,
        species: text("species")?,
        experience: text("experience")?,
        attitude: text("attitude")?,
        agreed,
        message: text("message")?,
        date,
    })
}

// ============ IsNameValid ============

#[derive(Default)]
pub struct IsNameValid {
    pub rules: ValidationRules,
}

static IS_NAME_VALID_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("name", "Text", "Observer name"),
    ArgMeta::optional("min_len", "Number", "Minimum trimmed length", "configured rule (2)"),
];
static IS_NAME_VALID_EXAMPLES: [&str; 2] = ["is_name_valid(\"Al\") → true", "is_name_valid(\" A \") → false"];
static VALIDATE_RELATED: [&str; 3] = ["is_name_valid", "is_email_valid", "validate_observation"];

impl FunctionPlugin for IsNameValid {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "is_name_valid",
            description: "Check that a trimmed name is long enough",
            usage: "is_name_valid(name, [min_len])",
            args: &IS_NAME_VALID_ARGS,
            returns: "Bool",
            examples: &IS_NAME_VALID_EXAMPLES,
            category: "validation",
            related: &VALIDATE_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.is_empty() || args.len() > 2 {
            return Value::Error(LabError::arg_count("is_name_valid", 1, args.len()));
        }
        let name = match extract_text(&args[0], "is_name_valid", "name") {
            Ok(s) => s,
            Err(e) => return Value::Error(e),
        };
        match min_len_arg(args, 1, "is_name_valid", self.rules.min_name_len) {
            Ok(min_len) => Value::Bool(is_name_valid(name, min_len)),
            Err(e) => Value::Error(e),
        }
    }
}

// ============ IsEmailValid ============

pub struct IsEmailValid;

static IS_EMAIL_VALID_ARGS: [ArgMeta; 1] = [ArgMeta::required("email", "Text", "Contact address")];
static IS_EMAIL_VALID_EXAMPLES: [&str; 2] = [
    "is_email_valid(\"frog@pond.org\") → true",
    "is_email_valid(\"frog@pond\") → false",
];

impl FunctionPlugin for IsEmailValid {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "is_email_valid",
            description: "Check that text looks like local@domain.tld",
            usage: "is_email_valid(email)",
            args: &IS_EMAIL_VALID_ARGS,
            returns: "Bool",
            examples: &IS_EMAIL_VALID_EXAMPLES,
            category: "validation",
            related: &VALIDATE_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.len() != 1 {
            return Value::Error(LabError::arg_count("is_email_valid", 1, args.len()));
        }
        match extract_text(&args[0], "is_email_valid", "email") {
            Ok(s) => Value::Bool(is_email_valid(s)),
            Err(e) => Value::Error(e),
        }
    }
}

// ============ ValidateObservation ============

#[derive(Default)]
pub struct ValidateObservation {
    pub rules: ValidationRules,
}

static VALIDATE_OBSERVATION_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("observation", "Object", "{name, email, agreed, species?, experience?, attitude?, message?, date?}"),
    ArgMeta::optional("min_len", "Number", "Minimum trimmed name length", "configured rule (2)"),
];
static VALIDATE_OBSERVATION_EXAMPLES: [&str; 1] = [
    "validate_observation({name: \"Al\", email: \"a@b.c\", agreed: true}) → []",
];

impl FunctionPlugin for ValidateObservation {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "validate_observation",
            description: "Validate an observation; returns a list of {field, message} failures",
            usage: "validate_observation(observation, [min_len])",
            args: &VALIDATE_OBSERVATION_ARGS,
            returns: "List<Object>",
            examples: &VALIDATE_OBSERVATION_EXAMPLES,
            category: "validation",
            related: &VALIDATE_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.is_empty() || args.len() > 2 {
            return Value::Error(LabError::arg_count("validate_observation", 1, args.len()));
        }
        let obs = match observation_from(&args[0]) {
            Ok(o) => o,
            Err(e) => return Value::Error(e),
        };
        let rules = match min_len_arg(args, 1, "validate_observation", self.rules.min_name_len) {
            Ok(min_name_len) => ValidationRules { min_name_len },
            Err(e) => return Value::Error(e),
        };

        Value::List(
            validate_observation(&obs, &rules)
                .into_iter()
                .map(|err| {
                    let mut obj = BTreeMap::new();
                    obj.insert("field".to_string(), Value::from(err.field));
                    obj.insert("message".to_string(), Value::Text(err.message));
                    Value::Object(obj)
                })
                .collect(),
        )
    }
}
