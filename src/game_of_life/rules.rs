//! Game of Life rules implementation

use super::grid::{Grid, ALIVE, DEAD};
use itertools::iproduct;

/// Offsets of the Moore neighborhood (N, S, E, W, NE, NW, SE, SW)
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, -1),
    (1, 1),
    (1, -1),
];

/// Live-neighbor counts for every interior cell of a grid.
///
/// Shaped like the grid minus its border: entry `(r, c)` belongs to grid
/// cell `(r + 1, c + 1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborCounts {
    rows: usize,
    cols: usize,
    counts: Vec<u8>,
}

impl NeighborCounts {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Count for interior cell `(row, col)`, in interior coordinates
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.counts[row * self.cols + col]
    }
}

/// Game of Life rules engine
pub struct GameOfLifeRules;

impl GameOfLifeRules {
    /// Sum the eight neighbors of every interior cell
    pub fn neighbor_counts(grid: &Grid) -> NeighborCounts {
        let rows = grid.rows().saturating_sub(2);
        let cols = grid.cols().saturating_sub(2);
        let cells = grid.cells();

        let counts = iproduct!(1..=rows, 1..=cols)
            .map(|(row, col)| {
                NEIGHBOR_OFFSETS
                    .iter()
                    .map(|&(dr, dc)| {
                        let r = row.wrapping_add_signed(dr);
                        let c = col.wrapping_add_signed(dc);
                        cells[grid.index(r, c)]
                    })
                    .sum::<u8>()
            })
            .collect();

        NeighborCounts { rows, cols, counts }
    }

    /// Apply Game of Life rules to evolve the grid one generation forward, in place.
    ///
    /// Every cell is cleared first, then survivors and births are written back
    /// into the interior, so the border always comes out dead.
    pub fn evolve(grid: &mut Grid) {
        let neighbors = Self::neighbor_counts(grid);
        let next: Vec<bool> = iproduct!(0..neighbors.rows(), 0..neighbors.cols())
            .map(|(row, col)| {
                Self::should_be_alive(grid.is_alive(row + 1, col + 1), neighbors.get(row, col))
            })
            .collect();

        let cols = neighbors.cols();
        let width = grid.cols();
        let cells = grid.cells_mut();
        cells.fill(DEAD);

        for (i, &alive) in next.iter().enumerate() {
            if alive {
                let (row, col) = (i / cols + 1, i % cols + 1);
                cells[row * width + col] = ALIVE;
            }
        }
    }

    /// Compute the next generation as a fresh grid
    pub fn next_generation(current: &Grid) -> Grid {
        let mut next = current.clone();
        Self::evolve(&mut next);
        next
    }

    /// Evolve the grid for multiple generations
    pub fn evolve_generations(mut grid: Grid, generations: usize) -> Grid {
        for _ in 0..generations {
            Self::evolve(&mut grid);
        }
        grid
    }

    /// Check if a cell should be alive in the next generation given its current state and neighbor count
    pub fn should_be_alive(alive: bool, neighbor_count: u8) -> bool {
        matches!((alive, neighbor_count), (true, 2) | (true, 3) | (false, 3))
    }
}
