//! SAT Art
//!
//! Renders every truth assignment of a CNF formula as one pixel. Assignments
//! are enumerated in Gray-code order and laid out along a Hilbert curve, so
//! assignments that differ in a single bit tend to sit next to each other,
//! and each pixel is shaded by how many clauses its assignment breaks.

pub mod config;
pub mod curve;
pub mod error;
pub mod render;
pub mod sat;
pub mod utils;

pub use config::Settings;
pub use error::SatArtError;
pub use render::{ColorMap, PixelBuffer, RenderReport, Renderer, Rgb};
pub use sat::Formula;

use anyhow::{Context, Result};

/// Set up a renderer over every variable of `formula`
pub fn build_renderer<'a>(formula: &'a Formula, settings: &Settings) -> Result<Renderer<'a>> {
    let num_variables = formula.num_variables();
    if num_variables > settings.render.max_variables {
        anyhow::bail!(
            "memory limit possibly exceeded: number of variables ({}) cannot exceed max_variables ({})",
            num_variables,
            settings.render.max_variables
        );
    }

    let renderer = Renderer::new(formula, num_variables, settings.color_map()?)
        .context("Failed to set up renderer")?
        .with_wrap(settings.render.wrap_variables);
    Ok(renderer)
}

/// Main entry point: render `formula` with `settings`
pub fn render_formula(formula: &Formula, settings: &Settings) -> Result<PixelBuffer> {
    let renderer = build_renderer(formula, settings)?;
    let buffer = if settings.render.parallel {
        renderer.render()
    } else {
        renderer.render_sequential(|_| {})
    };
    buffer.context("Failed to render formula")
}
