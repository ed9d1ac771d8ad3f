//! Environment configuration

use crate::CliError;
use labkit::ValidationRules;
use std::collections::HashMap;
use std::str::FromStr;
use tracing::Level;

pub const LOG_VAR: &str = "LABKIT_LOG";
pub const TRACE_VAR: &str = "LABKIT_TRACE";
pub const MIN_NAME_LEN_VAR: &str = "LABKIT_MIN_NAME_LEN";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub log_level: Level,
    pub trace_calls: bool,
    pub rules: ValidationRules,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Level::INFO,
            trace_calls: false,
            rules: ValidationRules::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_vars(std::env::vars().collect())
    }

    /// Build from a variable map; unset variables keep their defaults.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, CliError> {
        let mut config = Config::default();

        if let Some(level) = vars.get(LOG_VAR) {
            config.log_level = Level::from_str(level.trim())
                .map_err(|_| CliError::Config(format!("{}: unknown level '{}'", LOG_VAR, level)))?;
        }

        if let Some(flag) = vars.get(TRACE_VAR) {
            config.trace_calls = match flag.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" | "" => false,
                other => {
                    return Err(CliError::Config(format!("{}: expected a boolean, got '{}'", TRACE_VAR, other)))
                }
            };
        }

        if let Some(len) = vars.get(MIN_NAME_LEN_VAR) {
            config.rules.min_name_len = len.trim().parse().map_err(|_| {
                CliError::Config(format!("{}: expected a non-negative integer, got '{}'", MIN_NAME_LEN_VAR, len))
            })?;
        }

        Ok(config)
    }
}
