//! Labkit Plugin System
//!
//! Every library operation is exposed as a `FunctionPlugin` with metadata,
//! collected in a `PluginRegistry` and invoked through an `EvalContext`.

mod context;
mod registry;
mod traits;

pub use context::{EvalContext, TraceStep};
pub use registry::PluginRegistry;
pub use traits::{ArgMeta, FunctionMeta, FunctionPlugin};

/// Re-export core types for plugin authors
pub mod prelude {
    pub use crate::{ArgMeta, EvalContext, FunctionMeta, FunctionPlugin, PluginRegistry, TraceStep};
    pub use labkit_core::prelude::*;
}
