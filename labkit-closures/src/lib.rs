//! Labkit Closures
//!
//! Small owned state machines standing in for closures over private state:
//! - `Accumulator`: folds each input into a running value
//! - `SequenceGenerator`: yields an arithmetic progression one value per call
//!
//! Every factory call returns a fresh instance; instances never share state.
//! Calls take `&mut self`, so concurrent use of one instance needs external
//! synchronization.

mod accumulator;
mod functions;
mod generator;
mod operation;

pub use accumulator::{make_accumulator, Accumulator, Combine};
pub use generator::{make_sequence_generator, SequenceGenerator};
pub use operation::Operation;

use labkit_plugin::PluginRegistry;

/// Load closure-backed functions into registry
pub fn load_closures_library(registry: PluginRegistry) -> PluginRegistry {
    registry
        .with_function(functions::Accumulate)
        .with_function(functions::Sequence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_closures_library() {
        let registry = load_closures_library(PluginRegistry::new());
        assert!(registry.get_function("accumulate").is_some());
        assert!(registry.get_function("sequence").is_some());
    }
}
