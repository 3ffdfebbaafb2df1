//! Stepwise Plugin System
//!
//! Every calculator operation is an [`OperationPlugin`]: a pure computation
//! that returns a narrated [`Report`], plus static metadata describing it
//! for menus and help output.

mod traits;
mod registry;
mod context;

pub use traits::{OperationPlugin, OperationMeta, ArgMeta, Report};
pub use registry::OperationRegistry;
pub use context::EvalContext;

/// Re-export core types for plugin authors
pub mod prelude {
    pub use crate::{OperationPlugin, OperationMeta, ArgMeta, Report, OperationRegistry, EvalContext};
    pub use stepwise_core::prelude::*;
}
