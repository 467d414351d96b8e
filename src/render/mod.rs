//! Rendering of formula assignments into images

pub mod buffer;
pub mod color;
pub mod driver;
pub mod report;

pub use buffer::{dimensions_for, PixelBuffer, MAX_VARIABLES};
pub use color::{ColorMap, Rgb};
pub use driver::Renderer;
pub use report::RenderReport;
