//! Labkit Core - Fundamental types
//!
//! This crate provides the core types used throughout Labkit:
//! - `Value`: Runtime values (primitives, lists, objects, errors)
//! - `LabError`: Structured errors that travel as values
//! - `deep_equal`: Structural equality over values
//! - number helpers: 32-bit truncation and identity comparison for doubles

mod equality;
mod error;
pub mod number;
mod value;

pub use equality::deep_equal;
pub use error::{codes, LabError, Severity};
pub use number::NumberError;
pub use value::Value;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::codes;
    pub use crate::{deep_equal, LabError, Severity, Value};
}
