//! Bordered grid representation for Game of Life

use super::pattern::Pattern;
use anyhow::Result;
use std::fmt;

pub const DEAD: u8 = 0;
pub const ALIVE: u8 = 1;

/// A fixed-size Game of Life grid surrounded by a ring of dead cells.
///
/// `rows` and `cols` include the border, so the interior is
/// `[1, rows - 1) x [1, cols - 1)`. Only interior cells can ever be alive;
/// the border exists so neighbor sums never need edge checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Create an all-dead grid with the given interior size
    pub fn new(interior_rows: usize, interior_cols: usize) -> Self {
        let rows = interior_rows + 2;
        let cols = interior_cols + 2;
        Self {
            rows,
            cols,
            cells: vec![DEAD; rows * cols],
        }
    }

    /// Embed a pattern, leaving `padding` dead interior cells on every side
    pub fn from_pattern(pattern: &Pattern, padding: usize) -> Self {
        let mut grid = Self::new(
            pattern.rows() + 2 * padding,
            pattern.cols() + 2 * padding,
        );
        let offset = 1 + padding;

        for (row, col) in pattern.living_cells() {
            let idx = grid.index(row + offset, col + offset);
            grid.cells[idx] = ALIVE;
        }

        grid
    }

    /// Create a grid from full rows, border included
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self> {
        let height = rows.len();
        if height < 3 {
            anyhow::bail!("Grid needs at least 3 rows, got {}", height);
        }

        let width = rows[0].len();
        if width < 3 {
            anyhow::bail!("Grid needs at least 3 columns, got {}", width);
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                anyhow::bail!("Row {} has length {}, expected {}", i, row.len(), width);
            }
        }

        let grid = Self {
            rows: height,
            cols: width,
            cells: rows.into_iter().flatten().collect(),
        };

        for row in 0..grid.rows {
            for col in 0..grid.cols {
                let value = grid.get(row, col);
                if value > ALIVE {
                    anyhow::bail!("Cell ({}, {}) has value {}, expected 0 or 1", row, col, value);
                }
                if value == ALIVE && !grid.is_interior(row, col) {
                    anyhow::bail!("Border cell ({}, {}) must be dead", row, col);
                }
            }
        }

        Ok(grid)
    }

    /// Total number of rows, border included
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Total number of columns, border included
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub(crate) fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub(crate) fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [u8] {
        &mut self.cells
    }

    /// Whether the coordinates lie inside the border ring
    pub fn is_interior(&self, row: usize, col: usize) -> bool {
        row >= 1 && col >= 1 && row < self.rows - 1 && col < self.cols - 1
    }

    /// Get cell value at coordinates
    pub fn get(&self, row: usize, col: usize) -> u8 {
        if row < self.rows && col < self.cols {
            self.cells[self.index(row, col)]
        } else {
            DEAD
        }
    }

    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == ALIVE
    }

    /// Set an interior cell. Border cells are always dead and cannot be set.
    pub fn set(&mut self, row: usize, col: usize, alive: bool) -> Result<()> {
        if !self.is_interior(row, col) {
            anyhow::bail!(
                "Coordinates ({}, {}) are outside the interior of a {}x{} grid",
                row,
                col,
                self.rows,
                self.cols
            );
        }
        let idx = self.index(row, col);
        self.cells[idx] = if alive { ALIVE } else { DEAD };
        Ok(())
    }

    /// Get all living cell coordinates
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        let mut living = Vec::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                if self.is_alive(row, col) {
                    living.push((row, col));
                }
            }
        }
        living
    }

    /// Count total living cells
    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell == ALIVE).count()
    }

    /// Check if the grid is empty (no living cells)
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| cell == DEAD)
    }

    /// Copy the grid out as nested rows, border included
    pub fn as_rows(&self) -> Vec<Vec<u8>> {
        self.cells.chunks(self.cols).map(|row| row.to_vec()).collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            for &cell in row {
                write!(f, "{}", if cell == ALIVE { 'X' } else { '.' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
