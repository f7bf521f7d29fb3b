//! Core types shared across the application
//! This module contains pure data types with no game logic attached

use serde::{Deserialize, Serialize};

/// Board dimensions
pub const DEFAULT_BOARD_SIZE: u8 = 10;
pub const MIN_BOARD_SIZE: u8 = 4;
pub const MAX_BOARD_SIZE: u8 = 32;

/// A run must reach this length (including the probed cell) to count as a match.
pub const MIN_RUN: u8 = 3;

/// Scoring constants
pub const MATCH_BASE_VALUE: f32 = 10.0;
pub const MULTIPLIER_BASE_VALUE: f32 = 5.0;
pub const MULTIPLIER_THRESHOLD: u32 = 30;
pub const MULTIPLIER_STEP: f32 = 0.25;
pub const PREFERRED_TYPE_MULTIPLIER: f32 = 1.2;
pub const DISLIKED_TYPE_MULTIPLIER: f32 = 0.7;

/// Number of token kinds in the scoring subset (the 4-type preference cycle).
pub const SCORING_KIND_COUNT: usize = 4;

/// Pacing for staged cascade rounds in the terminal shell (milliseconds)
pub const CASCADE_STEP_MS: u64 = 160;

/// Token kinds a cell can hold.
///
/// The first four kinds form the scoring subset; the last four feed the
/// score multiplier instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Red,
    Orange,
    Blue,
    Green,
    Purple,
    Teal,
    Pink,
    Gold,
}

impl TokenKind {
    pub const COUNT: usize = 8;

    pub const ALL: [TokenKind; Self::COUNT] = [
        TokenKind::Red,
        TokenKind::Orange,
        TokenKind::Blue,
        TokenKind::Green,
        TokenKind::Purple,
        TokenKind::Teal,
        TokenKind::Pink,
        TokenKind::Gold,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Whether matches of this kind add to the score directly.
    pub fn is_scoring(self) -> bool {
        self.index() < SCORING_KIND_COUNT
    }

    /// Whether matches of this kind feed the multiplier accumulator.
    pub fn is_multiplier(self) -> bool {
        !self.is_scoring()
    }

    /// The opposite kind in the 4-type scoring cycle.
    ///
    /// Only meaningful for scoring kinds; used to derive the session's
    /// disliked kind from its preferred kind.
    pub fn cycle_opposite(self) -> Option<Self> {
        if !self.is_scoring() {
            return None;
        }
        Self::from_index((self.index() + SCORING_KIND_COUNT / 2) % SCORING_KIND_COUNT)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Red => "red",
            TokenKind::Orange => "orange",
            TokenKind::Blue => "blue",
            TokenKind::Green => "green",
            TokenKind::Purple => "purple",
            TokenKind::Teal => "teal",
            TokenKind::Pink => "pink",
            TokenKind::Gold => "gold",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(TokenKind::Red),
            "orange" => Some(TokenKind::Orange),
            "blue" => Some(TokenKind::Blue),
            "green" => Some(TokenKind::Green),
            "purple" => Some(TokenKind::Purple),
            "teal" => Some(TokenKind::Teal),
            "pink" => Some(TokenKind::Pink),
            "gold" => Some(TokenKind::Gold),
            _ => None,
        }
    }
}

/// Cell on the board (None = empty, Some = holds a token)
pub type Cell = Option<TokenKind>;

/// A grid coordinate. `x` grows rightward, `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: i8,
    pub y: i8,
}

impl Pos {
    pub fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Whether the two positions share a row or a column.
    pub fn aligned_with(self, other: Pos) -> bool {
        self.x == other.x || self.y == other.y
    }

    /// Whether the two positions are orthogonal neighbors.
    pub fn is_adjacent_to(self, other: Pos) -> bool {
        self.aligned_with(other) && (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }

    /// Manhattan distance; for aligned positions this is the segment length.
    pub fn distance_to(self, other: Pos) -> i8 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// 24-bit color used for token display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Display color for cleared/empty cells.
pub const CLEARED_COLOR: Rgb = Rgb::new(255, 255, 255);
