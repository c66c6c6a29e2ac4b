//! Where each generation goes once it has been computed

use crate::game_of_life::Grid;
use crate::utils::GridFormatter;
use anyhow::Result;
use std::io::Write;

/// ANSI sequence that clears the screen and homes the cursor
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Receives every generation produced by a run
pub trait GenerationSink {
    fn show(&mut self, generation: usize, grid: &Grid) -> Result<()>;
}

/// Prints generations to a terminal, optionally redrawing in place
pub struct TerminalSink<W> {
    output: W,
    clear: bool,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(output: W, clear: bool) -> Self {
        Self { output, clear }
    }
}

impl<W: Write> GenerationSink for TerminalSink<W> {
    fn show(&mut self, generation: usize, grid: &Grid) -> Result<()> {
        if self.clear {
            write!(self.output, "{}", CLEAR_SCREEN)?;
        }
        writeln!(self.output, "{}", GridFormatter::format_generation_header(generation, grid))?;
        write!(self.output, "{}", GridFormatter::format_grid_compact(grid))?;
        self.output.flush()?;
        Ok(())
    }
}

/// Keeps every generation in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub generations: Vec<(usize, Grid)>,
}

impl GenerationSink for RecordingSink {
    fn show(&mut self, generation: usize, grid: &Grid) -> Result<()> {
        self.generations.push((generation, grid.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_sink_without_clear() {
        let mut output = Vec::new();
        let grid = Grid::new(1, 1);
        TerminalSink::new(&mut output, false).show(3, &grid).unwrap();

        let shown = String::from_utf8(output).unwrap();
        assert_eq!(shown, "Generation: 3 (Living: 0)\n···\n···\n···\n");
    }

    #[test]
    fn test_terminal_sink_clears() {
        let mut output = Vec::new();
        TerminalSink::new(&mut output, true).show(0, &Grid::new(1, 1)).unwrap();
        assert!(String::from_utf8(output).unwrap().starts_with(CLEAR_SCREEN));
    }
}
