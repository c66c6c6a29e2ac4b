//! Display and output formatting utilities

use crate::game_of_life::{Grid, Pattern};
use std::io::IsTerminal;

/// Format grids and patterns for the console
pub struct GridFormatter;

impl GridFormatter {
    /// Format a grid in compact form
    pub fn format_grid_compact(grid: &Grid) -> String {
        let mut output = String::with_capacity(grid.rows() * (grid.cols() + 1) * 2);
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                output.push(if grid.is_alive(row, col) { '█' } else { '·' });
            }
            output.push('\n');
        }
        output
    }

    /// Format a grid with coordinates
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for col in 0..grid.cols() {
            output.push_str(&format!("{:2}", col % 10));
        }
        output.push('\n');

        // Rows with row numbers
        for row in 0..grid.rows() {
            output.push_str(&format!("{:2} ", row));
            for col in 0..grid.cols() {
                output.push_str(if grid.is_alive(row, col) { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// Header line printed above each displayed generation
    pub fn format_generation_header(generation: usize, grid: &Grid) -> String {
        format!("Generation: {} (Living: {})", generation, grid.living_count())
    }

    /// Summary of a loaded pattern followed by its cells
    pub fn format_pattern(pattern: &Pattern) -> String {
        let mut output = format!(
            "{} ({}x{}, {} live cells)\n",
            pattern.name(),
            pattern.rows(),
            pattern.cols(),
            pattern.living_cells().len()
        );
        output.push_str(&pattern.to_string());
        output
    }
}

/// Kind of console message, each with its own ANSI style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// A run or setup step completed
    Done,
    /// Something was skipped or is missing but the command carries on
    Notice,
    /// The command failed
    Failure,
    /// Section headings such as the setup banner
    Heading,
}

impl Tone {
    fn style(self) -> &'static str {
        match self {
            Tone::Done => "32",
            Tone::Notice => "33",
            Tone::Failure => "1;31",
            Tone::Heading => "1;34",
        }
    }
}

/// Wrap text in the tone's ANSI style when `enabled`
pub fn paint(text: &str, tone: Tone, enabled: bool) -> String {
    if enabled {
        format!("\x1b[{}m{}\x1b[0m", tone.style(), text)
    } else {
        text.to_string()
    }
}

/// Colored status messages for the CLI
pub struct ColorOutput;

impl ColorOutput {
    /// Color only interactive terminals, honoring `NO_COLOR` and `TERM=dumb`
    fn enabled() -> bool {
        std::env::var_os("NO_COLOR").is_none()
            && std::env::var("TERM").map_or(true, |term| term != "dumb")
            && std::io::stdout().is_terminal()
    }

    pub fn success(text: &str) -> String {
        paint(text, Tone::Done, Self::enabled())
    }

    pub fn error(text: &str) -> String {
        paint(text, Tone::Failure, Self::enabled())
    }

    pub fn warning(text: &str) -> String {
        paint(text, Tone::Notice, Self::enabled())
    }

    pub fn info(text: &str) -> String {
        paint(text, Tone::Heading, Self::enabled())
    }
}
