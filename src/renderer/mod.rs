//! Diagram rendering, delegated to an external tool.
//!
//! - **Backend**: [`DiagramRenderer`] trait, [`RenderRequest`], [`RenderError`]
//! - **Console**: [`ConsoleRenderer`], which runs the configured command

pub mod backend;
pub mod console;

pub use backend::{DiagramRenderer, RenderError, RenderRequest};
pub use console::{ConsoleRenderer, expand_args, find_command};
