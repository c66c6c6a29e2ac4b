//! Conway's Game of Life
//!
//! This library evolves a bounded grid of cells generation by generation and
//! loads the starting patterns from plain-text pattern files.

pub mod config;
pub mod game_of_life;
pub mod simulation;
pub mod utils;

pub use config::Settings;
pub use game_of_life::{GameOfLifeRules, Grid, Pattern, PatternError, PatternLoader};
pub use simulation::{RunSummary, Runner};

use anyhow::Result;

/// Evolve a grid forward one generation, in place
pub fn evolve(grid: &mut Grid) {
    GameOfLifeRules::evolve(grid);
}

/// Load a named pattern with the given settings and embed it into a grid
pub fn initial_grid(name: &str, settings: &Settings, padding: usize) -> Result<Grid> {
    let pattern = game_of_life::load_pattern(name, settings)?;
    Ok(Grid::from_pattern(&pattern, padding))
}
