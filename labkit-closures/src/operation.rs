//! Named numeric operations for accumulators built from plugin arguments

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Max,
    Min,
}

impl Operation {
    /// Parse an operation name or symbol; unknown names give `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "add" | "+" | "sum" => Some(Operation::Add),
            "subtract" | "sub" | "-" => Some(Operation::Subtract),
            "multiply" | "mul" | "*" | "product" => Some(Operation::Multiply),
            "divide" | "div" | "/" => Some(Operation::Divide),
            "max" => Some(Operation::Max),
            "min" => Some(Operation::Min),
            _ => None,
        }
    }

    pub fn apply(self, stored: f64, value: f64) -> f64 {
        match self {
            Operation::Add => stored + value,
            Operation::Subtract => stored - value,
            Operation::Multiply => stored * value,
            Operation::Divide => stored / value,
            Operation::Max => stored.max(value),
            Operation::Min => stored.min(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names_and_symbols() {
        assert_eq!(Operation::parse("add"), Some(Operation::Add));
        assert_eq!(Operation::parse(" + "), Some(Operation::Add));
        assert_eq!(Operation::parse("MUL"), Some(Operation::Multiply));
        assert_eq!(Operation::parse("pow"), None);
    }

    #[test]
    fn test_apply() {
        assert_eq!(Operation::Subtract.apply(10.0, 4.0), 6.0);
        assert_eq!(Operation::Divide.apply(1.0, 4.0), 0.25);
        assert_eq!(Operation::Max.apply(1.0, 4.0), 4.0);
        assert_eq!(Operation::Min.apply(1.0, 4.0), 1.0);
    }

    #[test]
    fn test_serde_lowercase() {
        let op: Operation = serde_json::from_str("\"multiply\"").unwrap();
        assert_eq!(op, Operation::Multiply);
    }
}
