//! Labkit Standard Library
//!
//! Numeric predicates, sequence generators, structural equality and
//! observation-form validators. Every operation is available both as a plain
//! Rust function and as a registered `FunctionPlugin`.

mod equality;
mod helpers;
pub mod predicates;
pub mod sequences;
pub mod validate;

pub use predicates::{is_integer, is_power_of_two, is_power_of_two_i64};
pub use sequences::{
    checked_factorial, checked_sum_to, evens_between, evens_up_to_20, factorial, factorial_exact,
    fibonacci, fibonacci_exact, recursive_sum_to, sum_to,
};
pub use validate::{
    is_agreement_valid, is_email_valid, is_name_valid, validate_observation, FieldError, Observation,
    ObservationForm, ValidationRules,
};

use labkit_plugin::PluginRegistry;

/// Load the standard library with default validation rules
pub fn load_std_library(registry: PluginRegistry) -> PluginRegistry {
    load_std_library_with(registry, ValidationRules::default())
}

/// Load the standard library with explicit validation rules
pub fn load_std_library_with(registry: PluginRegistry, rules: ValidationRules) -> PluginRegistry {
    registry
        // Predicates
        .with_function(predicates::IsInteger)
        .with_function(predicates::IsPowerOfTwo)

        // Sequences
        .with_function(sequences::Evens)
        .with_function(sequences::SumTo)
        .with_function(sequences::RecursiveSumTo)
        .with_function(sequences::Factorial)
        .with_function(sequences::Fibonacci)

        // Structural equality
        .with_function(equality::DeepEqual)

        // Observation form
        .with_function(validate::IsNameValid { rules })
        .with_function(validate::IsEmailValid)
        .with_function(validate::ValidateObservation { rules })
}

/// Create registry with standard library
pub fn standard_registry() -> PluginRegistry {
    load_std_library(PluginRegistry::new())
}
