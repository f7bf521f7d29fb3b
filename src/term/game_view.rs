//! Pure view logic: maps session state to tile markers and status lines.

use crate::core::{BoardSession, Phase};
use crate::types::Pos;

/// Terminal columns per board cell. Two columns per cell compensates for the
/// glyph aspect ratio, same trick as any terminal board renderer.
pub const TILE_WIDTH: u16 = 2;

/// Top-left corner of the board in terminal coordinates.
pub const BOARD_ORIGIN_X: u16 = 1;
pub const BOARD_ORIGIN_Y: u16 = 1;

/// The two characters drawn over a tile's background color.
pub fn tile_marker(pos: Pos, cursor: Pos, grabbed: Option<Pos>) -> &'static str {
    if pos == cursor {
        "[]"
    } else if grabbed == Some(pos) {
        "()"
    } else {
        "  "
    }
}

/// Side panel lines: score, multiplier, preference, phase, and key help.
pub fn status_lines(session: &BoardSession) -> [String; 5] {
    let score = session.score_state();
    [
        format!("{} {}", session.config().score_label, score.score()),
        format!("x{:.2} ({}/30)", score.score_multiplier(), score.multiplier_accumulator()),
        format!(
            "likes {} / dislikes {}",
            session.preferred().as_str(),
            session.disliked().as_str()
        ),
        match session.phase() {
            Phase::Resolving => format!("cascading... round {}", session.rounds()),
            _ => session.phase().as_str().to_string(),
        },
        "arrows/wasd move  enter grab  o save  r reload  q quit".to_string(),
    ]
}
