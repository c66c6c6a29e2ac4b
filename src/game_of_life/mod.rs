//! Game of Life core functionality

pub mod grid;
pub mod pattern;
pub mod rules;

pub use grid::Grid;
pub use pattern::{load_pattern, Pattern, PatternError, PatternLoader};
pub use rules::{GameOfLifeRules, NeighborCounts};
