//! Terminal rendering for the board shell.
//!
//! `game_view` is pure (no I/O) and unit-testable; `renderer` owns the
//! crossterm plumbing and flushes full frames.

pub mod game_view;
pub mod renderer;

pub use game_view::{status_lines, tile_marker, BOARD_ORIGIN_X, BOARD_ORIGIN_Y, TILE_WIDTH};
pub use renderer::TerminalRenderer;
