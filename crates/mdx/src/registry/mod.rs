//! Component registry: which tags are rendered by which components.

/// Default registry configuration.
pub mod defaults;
/// Registry types.
pub mod types;

pub use defaults::{DEFAULT_REGISTRY, HEADING_TAGS, default_registry};
pub use types::{Component, ComponentMapping, ComponentRegistry};
