//! Enumeration of every assignment onto the Hilbert-ordered pixel grid

use super::buffer::{PixelBuffer, MAX_VARIABLES};
use super::color::{ColorMap, Rgb};
use super::report::RenderReport;
use crate::curve::{to_gray, HilbertCurve, HilbertPoint};
use crate::error::{Result, SatArtError};
use crate::sat::Formula;
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Number of progress reports emitted by a sequential render
const PROGRESS_STEPS: u64 = 1000;

/// Renders every assignment of a formula into a pixel buffer.
///
/// Index `i` is scored on the Gray-coded assignment `to_gray(i)` and drawn
/// at the Hilbert point of `i`, so neighboring pixels mostly hold
/// assignments one bit-flip apart.
pub struct Renderer<'a> {
    formula: &'a Formula,
    num_variables: u32,
    color_map: ColorMap,
    wrap: bool,
    curve: HilbertCurve,
}

impl<'a> Renderer<'a> {
    /// Create a renderer over `num_variables` bits.
    ///
    /// Fails before any allocation when `num_variables` exceeds
    /// [`MAX_VARIABLES`].
    pub fn new(formula: &'a Formula, num_variables: u32, color_map: ColorMap) -> Result<Self> {
        if num_variables > MAX_VARIABLES {
            return Err(SatArtError::ResourceLimit(format!(
                "number of variables ({}) cannot exceed {}",
                num_variables, MAX_VARIABLES
            )));
        }
        let curve = HilbertCurve::new(num_variables.div_ceil(2))?;

        Ok(Self {
            formula,
            num_variables,
            color_map,
            wrap: true,
            curve,
        })
    }

    /// Choose whether literals at or above `num_variables` fold onto the
    /// available bits (the default) or are skipped
    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn num_variables(&self) -> u32 {
        self.num_variables
    }

    pub fn formula(&self) -> &Formula {
        self.formula
    }

    pub fn curve(&self) -> &HilbertCurve {
        &self.curve
    }

    /// Number of assignments enumerated
    pub fn total(&self) -> u64 {
        1u64 << self.num_variables
    }

    /// Unsatisfied clause count for enumeration index `index`
    #[inline]
    pub fn unsatisfied_at(&self, index: u64) -> usize {
        self.formula
            .count_unsatisfied(to_gray(index), self.num_variables, self.wrap)
    }

    /// Color for enumeration index `index`
    #[inline]
    pub fn shade(&self, index: u64) -> Rgb {
        self.color_map.color(self.unsatisfied_at(index))
    }

    /// Pixel that enumeration index `index` is drawn at
    #[inline]
    pub fn pixel_of(&self, index: u64) -> HilbertPoint {
        self.curve.point(index)
    }

    /// Render in parallel without progress reporting
    pub fn render(&self) -> Result<PixelBuffer> {
        self.render_with_progress(|_| {})
    }

    /// Render in parallel, one buffer row per task.
    ///
    /// Every pixel is mapped back to its unique index through the inverse
    /// curve, so rows are written independently. `progress` receives the
    /// fraction of finished rows; calls may arrive out of order.
    pub fn render_with_progress<F>(&self, progress: F) -> Result<PixelBuffer>
    where
        F: Fn(f64) + Sync,
    {
        let mut buffer = PixelBuffer::for_variables(self.num_variables)?;
        let width = buffer.width() as usize;
        let height = buffer.height() as usize;
        let total = self.total();
        let rows_done = AtomicUsize::new(0);

        log::debug!(
            "rendering {} assignments into {}x{} on {} threads",
            total,
            width,
            height,
            rayon::current_num_threads()
        );

        buffer
            .as_bytes_mut()
            .par_chunks_mut(width * 3)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, pixel) in row.chunks_exact_mut(3).enumerate() {
                    let index = self.curve.distance(HilbertPoint::new(x as u64, y as u64));
                    debug_assert!(index < total);
                    pixel.copy_from_slice(&self.shade(index).0);
                }
                let done = rows_done.fetch_add(1, Ordering::Relaxed) + 1;
                progress(done as f64 / height as f64);
            });

        Ok(buffer)
    }

    /// Render by walking indices `0..2^n` in order on the current thread.
    ///
    /// `progress` is called with a non-decreasing fraction roughly every
    /// thousandth of the range and once more with `1.0` at the end.
    pub fn render_sequential<F>(&self, mut progress: F) -> Result<PixelBuffer>
    where
        F: FnMut(f64),
    {
        let mut buffer = PixelBuffer::for_variables(self.num_variables)?;
        let total = self.total();
        let step = (total / PROGRESS_STEPS).max(1);

        for index in 0..total {
            let point = self.pixel_of(index);
            buffer.set(point.x as u32, point.y as u32, self.shade(index))?;

            if (index + 1) % step == 0 {
                progress(index as f64 / total as f64);
            }
        }
        progress(1.0);

        Ok(buffer)
    }

    /// Tally unsatisfied-clause counts over every assignment
    pub fn report(&self) -> RenderReport {
        let buckets = self.formula.num_clauses() + 1;
        let histogram = (0..self.total())
            .into_par_iter()
            .fold(
                || vec![0u64; buckets],
                |mut hist, index| {
                    hist[self.unsatisfied_at(index)] += 1;
                    hist
                },
            )
            .reduce(
                || vec![0u64; buckets],
                |mut a, b| {
                    for (x, y) in a.iter_mut().zip(b) {
                        *x += y;
                    }
                    a
                },
            );

        RenderReport::from_histogram(
            self.num_variables,
            self.formula.num_clauses(),
            self.color_map.beta(),
            histogram,
        )
    }
}
