//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::simulation::{Land, LandStats};
use anyhow::Result;

/// Format lands for console output
pub struct LandFormatter;

impl LandFormatter {
    /// Format a land in compact form
    pub fn format_land_compact(land: &Land) -> String {
        let grid = land.grid();
        let mut output = String::with_capacity(grid.height() * (grid.width() + 1) * 3);
        for row in grid.cells().chunks(grid.width().max(1)) {
            for cell in row {
                output.push(if cell.is_alive() { '█' } else { '·' });
            }
            output.push('\n');
        }
        output
    }

    /// Format a land with coordinates
    pub fn format_land_with_coords(land: &Land) -> String {
        let grid = land.grid();
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for x in 0..grid.width() {
            output.push_str(&format!("{:2}", x % 10));
        }
        output.push('\n');

        for (y, row) in grid.cells().chunks(grid.width().max(1)).enumerate() {
            output.push_str(&format!("{:2} ", y));
            for cell in row {
                output.push_str(if cell.is_alive() { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// One line summary of the aggregates
    pub fn format_stats_line(stats: &LandStats) -> String {
        format!(
            "Day {:>4} | Alive {:>6} | Dead {:>6} | Density {:5.1}%",
            stats.day,
            stats.alive,
            stats.dead,
            stats.density * 100.0
        )
    }

    /// Render the current day in the requested format
    pub fn format_day(land: &Land, format: OutputFormat) -> Result<String> {
        let stats = land.stats();
        let rendered = match format {
            OutputFormat::Text => Self::format_stats_line(&stats),
            OutputFormat::Json => serde_json::to_string(&stats)?,
            OutputFormat::Visual => format!(
                "{}\n{}",
                Self::format_stats_line(&stats),
                Self::format_land_with_coords(land)
            ),
        };
        Ok(rendered)
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: TermColor) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, TermColor::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, TermColor::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, TermColor::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, TermColor::Blue)
    }
}

/// ANSI terminal colors, unrelated to cell display colors
#[derive(Debug, Clone, Copy)]
pub enum TermColor {
    Red,
    Green,
    Yellow,
    Blue,
}

impl TermColor {
    fn code(self) -> u8 {
        match self {
            TermColor::Red => 31,
            TermColor::Green => 32,
            TermColor::Yellow => 33,
            TermColor::Blue => 34,
        }
    }
}
