//! Display and output formatting utilities

use crate::render::PixelBuffer;
use crate::sat::Formula;
use std::io::Write;

/// Widest buffer the terminal preview will draw
pub const MAX_PREVIEW_WIDTH: u32 = 128;

/// Progress bar for long renders
pub struct ProgressIndicator {
    progress: f64,
    bar_width: usize,
    enabled: bool,
    start_time: std::time::Instant,
}

impl ProgressIndicator {
    /// Create a new progress indicator
    pub fn new(enabled: bool) -> Self {
        Self {
            progress: 0.0,
            bar_width: 70,
            enabled,
            start_time: std::time::Instant::now(),
        }
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Move the bar forward to `fraction`.
    ///
    /// Reports behind the current position are dropped, so the bar never
    /// moves backwards when workers finish out of order. Redraws only when
    /// the displayed percentage changes.
    pub fn update(&mut self, fraction: f64) {
        let fraction = fraction.clamp(0.0, 1.0);
        if fraction <= self.progress {
            return;
        }
        let redraw = (fraction * 100.0) as u32 != (self.progress * 100.0) as u32;
        self.progress = fraction;
        if redraw {
            self.display();
        }
    }

    /// Format the bar as `[===>   ] NN %`
    pub fn render_bar(&self) -> String {
        let pos = (self.bar_width as f64 * self.progress) as usize;
        let mut bar = String::with_capacity(self.bar_width + 8);
        bar.push('[');
        for i in 0..self.bar_width {
            bar.push(match i.cmp(&pos) {
                std::cmp::Ordering::Less => '=',
                std::cmp::Ordering::Equal => '>',
                std::cmp::Ordering::Greater => ' ',
            });
        }
        bar.push_str(&format!("] {} %", (self.progress * 100.0) as u32));
        bar
    }

    /// Display current progress
    pub fn display(&self) {
        if !self.enabled {
            return;
        }
        print!("{}\r", self.render_bar());
        std::io::stdout().flush().ok();
    }

    /// Finish and clear the progress line
    pub fn finish(&mut self) {
        self.progress = 1.0;
        if self.enabled {
            println!(
                "{} - {:.1}s",
                self.render_bar(),
                self.start_time.elapsed().as_secs_f64()
            );
        }
    }
}

/// Formula and image summaries for the console
pub struct RenderFormatter;

impl RenderFormatter {
    /// One-line description of a formula
    pub fn format_formula_summary(formula: &Formula) -> String {
        let widths: Vec<usize> = formula.clauses().iter().map(|c| c.len()).collect();
        let min = widths.iter().min().copied().unwrap_or(0);
        let max = widths.iter().max().copied().unwrap_or(0);
        let width = if min == max {
            format!("{}", min)
        } else {
            format!("{}-{}", min, max)
        };
        format!(
            "{} clauses, {} variables, clause width {}",
            formula.num_clauses(),
            formula.num_variables(),
            width
        )
    }

    /// Draw the buffer with ANSI true-color half blocks, two pixel rows per
    /// line. Returns `None` for buffers wider than [`MAX_PREVIEW_WIDTH`].
    pub fn format_buffer_preview(buffer: &PixelBuffer) -> Option<String> {
        if buffer.width() > MAX_PREVIEW_WIDTH {
            return None;
        }

        let mut output = String::new();
        for y in (0..buffer.height()).step_by(2) {
            for x in 0..buffer.width() {
                let top = buffer.get(x, y).unwrap_or_default().0;
                match buffer.get(x, y + 1) {
                    Some(bottom) => {
                        let bottom = bottom.0;
                        output.push_str(&format!(
                            "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m\u{2580}",
                            top[0], top[1], top[2], bottom[0], bottom[1], bottom[2]
                        ));
                    }
                    None => {
                        output.push_str(&format!(
                            "\x1b[38;2;{};{};{}m\u{2580}",
                            top[0], top[1], top[2]
                        ));
                    }
                }
            }
            output.push_str("\x1b[0m\n");
        }
        Some(output)
    }
}

/// Kind of a one-line status message printed outside the logger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Done,
    Warning,
    Failure,
}

impl Status {
    fn ansi_code(self) -> u8 {
        match self {
            Status::Done => 32,
            Status::Warning => 33,
            Status::Failure => 31,
        }
    }

    fn label(self) -> Option<&'static str> {
        match self {
            Status::Done => None,
            Status::Warning => Some("warning"),
            Status::Failure => Some("error"),
        }
    }

    /// Format `text` for the current terminal, honoring `NO_COLOR` and
    /// `TERM=dumb`
    pub fn message(self, text: &str) -> String {
        let colored = std::env::var_os("NO_COLOR").is_none()
            && std::env::var("TERM").map_or(true, |term| term != "dumb");
        self.format(text, colored)
    }

    /// Format `text`, prefixed with the status label when there is one
    pub fn format(self, text: &str, colored: bool) -> String {
        let line = match self.label() {
            Some(label) => format!("{}: {}", label, text),
            None => text.to_string(),
        };
        if colored {
            format!("\x1b[{}m{}\x1b[0m", self.ansi_code(), line)
        } else {
            line
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Rgb;

    #[test]
    fn test_progress_bar_layout() {
        let mut progress = ProgressIndicator::new(false);
        assert_eq!(progress.render_bar(), format!("[>{}] 0 %", " ".repeat(69)));

        progress.update(0.5);
        let bar = progress.render_bar();
        assert!(bar.starts_with(&format!("[{}>", "=".repeat(35))));
        assert!(bar.ends_with("] 50 %"));
    }

    #[test]
    fn test_progress_never_moves_back() {
        let mut progress = ProgressIndicator::new(false);
        progress.update(0.6);
        progress.update(0.3);
        assert_eq!(progress.progress(), 0.6);
        progress.update(2.0);
        assert_eq!(progress.progress(), 1.0);
        progress.finish();
        assert_eq!(progress.progress(), 1.0);
    }

    #[test]
    fn test_formula_summary() {
        let formula = Formula::from_clauses(vec![vec![1, 2, 3], vec![-4, 5]]).unwrap();
        assert_eq!(
            RenderFormatter::format_formula_summary(&formula),
            "2 clauses, 5 variables, clause width 2-3"
        );
    }

    #[test]
    fn test_buffer_preview() {
        let mut buffer = PixelBuffer::new(2, 3);
        buffer.set(1, 0, Rgb::WHITE).unwrap();
        let preview = RenderFormatter::format_buffer_preview(&buffer).unwrap();

        assert_eq!(preview.lines().count(), 2);
        assert!(preview.contains("\x1b[38;2;255;255;255m\x1b[48;2;0;0;0m\u{2580}"));

        let wide = PixelBuffer::new(MAX_PREVIEW_WIDTH + 1, 1);
        assert!(RenderFormatter::format_buffer_preview(&wide).is_none());
    }

    #[test]
    fn test_status_lines() {
        assert_eq!(Status::Done.format("Rendered", false), "Rendered");
        assert_eq!(
            Status::Warning.format("too wide", false),
            "warning: too wide"
        );
        assert_eq!(
            Status::Failure.format("missing.cnf", true),
            "\x1b[31merror: missing.cnf\x1b[0m"
        );
        assert!(Status::Failure.message("bad").contains("error: bad"));
    }
}
