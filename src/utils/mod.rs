//! Terminal output helpers

pub mod display;

pub use display::{ProgressIndicator, RenderFormatter, Status};
