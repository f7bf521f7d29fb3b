//! Board module - manages the token grid
//!
//! The grid is an N x N square where each cell is empty or holds a token kind.
//! Uses a flat array for cache locality. Coordinates: (x, y) with x growing
//! rightward and y growing downward; gravity pulls tokens toward larger y.
//!
//! Cell contents are copied between fixed slots; a cell's coordinate never
//! changes, only what it holds.

use crate::types::{Cell, Pos};

/// The token grid - N columns x N rows using flat row-major storage
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    size: u8,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new(size: u8) -> Self {
        Self {
            size,
            cells: vec![None; size as usize * size as usize],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= self.size as i8 || y < 0 || y >= self.size as i8 {
            return None;
        }
        Some((y as usize) * (self.size as usize) + (x as usize))
    }

    /// Side length of the grid
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        self.index(pos.x, pos.y).is_some()
    }

    /// Whether any cell in row `y` is empty
    pub fn row_has_empty(&self, y: i8) -> bool {
        if y < 0 || y >= self.size as i8 {
            return false;
        }
        let start = y as usize * self.size as usize;
        let end = start + self.size as usize;
        self.cells[start..end].iter().any(|cell| cell.is_none())
    }

    /// Whether every cell holds a token (no resolution in progress)
    pub fn is_settled(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    /// Compact one column: tokens slide down over empty cells, empties
    /// accumulate at the top. Two-pointer scan, bottom to top.
    /// Returns true if any cell changed.
    pub fn collapse_column(&mut self, x: i8) -> bool {
        let size = self.size as i8;
        if x < 0 || x >= size {
            return false;
        }

        let mut changed = false;
        let mut write_y = size - 1;
        for read_y in (0..size).rev() {
            if let Some(Some(kind)) = self.get(x, read_y) {
                if write_y != read_y {
                    self.set(x, write_y, Some(kind));
                    changed = true;
                }
                write_y -= 1;
            }
        }

        // Free the cells above the last write position.
        let mut y = write_y;
        while y >= 0 {
            if self.get(x, y) != Some(None) {
                self.set(x, y, None);
                changed = true;
            }
            y -= 1;
        }

        changed
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Create from rows of cells for testing
    #[cfg(test)]
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        let size = rows.len();
        assert!(rows.iter().all(|row| row.len() == size));

        let mut grid = Self::new(size as u8);
        for (y, row) in rows.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                grid.cells[y * size + x] = *cell;
            }
        }
        grid
    }
}
