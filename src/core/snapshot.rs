//! Snapshot module - serializable capture of a settled board
//!
//! A snapshot freezes everything deterministic replay needs: the grid, the
//! generator state, and the score machinery. Cells are packed one byte each
//! (0 = empty, kind index + 1 otherwise) so the JSON form stays compact.

use serde::{Deserialize, Serialize};

use crate::core::board::Grid;
use crate::core::scoring::ScoreState;
use crate::types::{Cell, TokenKind};

/// A complete saved board state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub size: u8,
    pub cells: Vec<u8>,
    pub rng_state: u32,
    pub score: u64,
    pub multiplier_accumulator: u32,
    pub score_multiplier: f32,
    pub preferred: TokenKind,
}

fn encode_cell(cell: Cell) -> u8 {
    match cell {
        None => 0,
        Some(kind) => kind.index() as u8 + 1,
    }
}

fn decode_cell(byte: u8) -> Option<Cell> {
    match byte {
        0 => Some(None),
        n => TokenKind::from_index(n as usize - 1).map(Some),
    }
}

impl BoardSnapshot {
    /// Capture the current board, generator, and score state.
    pub fn capture(
        grid: &Grid,
        rng_state: u32,
        score: &ScoreState,
        preferred: TokenKind,
    ) -> Self {
        Self {
            size: grid.size(),
            cells: grid.cells().iter().map(|&c| encode_cell(c)).collect(),
            rng_state,
            score: score.score(),
            multiplier_accumulator: score.multiplier_accumulator(),
            score_multiplier: score.score_multiplier(),
            preferred,
        }
    }

    /// Rebuild the grid, or None if the cell data is malformed.
    pub fn try_grid(&self) -> Option<Grid> {
        if self.cells.len() != self.size as usize * self.size as usize {
            return None;
        }
        let mut grid = Grid::new(self.size);
        let size = self.size as usize;
        for (i, &byte) in self.cells.iter().enumerate() {
            let cell = decode_cell(byte)?;
            // Split the flat index before narrowing; the index itself can
            // exceed i8 range on larger boards.
            grid.set((i % size) as i8, (i / size) as i8, cell);
        }
        Some(grid)
    }
}
