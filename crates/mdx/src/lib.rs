#![deny(missing_docs)]
//! docsview MDX layer: maps rendered markup tags to documentation components.

/// Markup error types.
pub mod error;
/// Component registry for tag/component mappings.
pub mod registry;
/// Transform utilities (component handlers, rendering).
pub mod transform;

pub use error::MarkupError;
pub use registry::{Component, ComponentMapping, ComponentRegistry, default_registry};
pub use transform::render::{render_default, render_markup};
