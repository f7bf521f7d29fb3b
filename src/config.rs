//! Session configuration: board dimension, token palette, and draw weights.
//!
//! Validation happens once at session start; a weight table that cannot
//! produce a token is a configuration error, never a draw-time surprise.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::{Cell, Rgb, TokenKind, CLEARED_COLOR, DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE, MIN_BOARD_SIZE};

/// Errors raised while loading or validating a board configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("board_size {0} out of range [{MIN_BOARD_SIZE}, {MAX_BOARD_SIZE}]")]
    BoardSize(u8),

    #[error("token color table must have {expected} entries, got {got}")]
    ColorTable { expected: usize, got: usize },

    #[error("token weight table must have {expected} entries, got {got}")]
    WeightTable { expected: usize, got: usize },

    #[error("token weight total must be positive")]
    ZeroWeightTotal,

    #[error("token weight total exceeds u32 range")]
    WeightOverflow,
}

/// Board configuration, loadable from TOML.
///
/// `tile_size` and `score_label` are presentation hints; the core ignores the
/// former and only echoes the latter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub board_size: u8,
    pub tile_size: u16,
    pub token_colors: Vec<Rgb>,
    pub token_weights: Vec<u32>,
    pub score_label: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            tile_size: 50,
            token_colors: vec![
                Rgb::new(229, 57, 53),   // red
                Rgb::new(251, 140, 0),   // orange
                Rgb::new(30, 136, 229),  // blue
                Rgb::new(67, 160, 71),   // green
                Rgb::new(142, 36, 170),  // purple
                Rgb::new(0, 137, 123),   // teal
                Rgb::new(236, 64, 122),  // pink
                Rgb::new(255, 193, 7),   // gold
            ],
            token_weights: vec![10, 10, 10, 10, 8, 8, 8, 6],
            score_label: "SCORE".to_string(),
        }
    }
}

impl BoardConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: BoardConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size < MIN_BOARD_SIZE || self.board_size > MAX_BOARD_SIZE {
            return Err(ConfigError::BoardSize(self.board_size));
        }
        if self.token_colors.len() != TokenKind::COUNT {
            return Err(ConfigError::ColorTable {
                expected: TokenKind::COUNT,
                got: self.token_colors.len(),
            });
        }
        if self.token_weights.len() != TokenKind::COUNT {
            return Err(ConfigError::WeightTable {
                expected: TokenKind::COUNT,
                got: self.token_weights.len(),
            });
        }
        let total: u64 = self.token_weights.iter().map(|&w| w as u64).sum();
        if total == 0 {
            return Err(ConfigError::ZeroWeightTotal);
        }
        if u32::try_from(total).is_err() {
            return Err(ConfigError::WeightOverflow);
        }
        Ok(())
    }

    /// Display color for a cell; empty cells use the fixed cleared color.
    pub fn color_of(&self, cell: Cell) -> Rgb {
        match cell {
            Some(kind) => self.token_colors[kind.index()],
            None => CLEARED_COLOR,
        }
    }
}
