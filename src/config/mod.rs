//! Configuration management for the SAT art renderer

pub mod settings;

pub use settings::{
    CliOverrides, OutputConfig, PaletteConfig, RandomConfig, RenderConfig, Settings,
};
