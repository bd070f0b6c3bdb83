//! Transform utilities for rendered markup.
//!
//! - `components`: lol_html handlers for each documentation component.
//! - `render`: single-pass rewriting of a document through a registry.

/// Documentation component handlers.
pub mod components;
/// Registry-driven markup rendering.
pub mod render;
