//! Scoring module - converts matches into points and multiplier progress
//!
//! Matches of a scoring kind pay out immediately, weighted by match size, the
//! session's type preference, and the running score multiplier. Matches of a
//! multiplier kind pay nothing directly; they charge an accumulator that bumps
//! the multiplier every time it crosses the threshold.

use crate::core::matches::MatchDescriptor;
use crate::types::{
    TokenKind, DISLIKED_TYPE_MULTIPLIER, MATCH_BASE_VALUE, MULTIPLIER_BASE_VALUE,
    MULTIPLIER_STEP, MULTIPLIER_THRESHOLD, PREFERRED_TYPE_MULTIPLIER,
};

/// Size bonus for larger matches. Caps out at 7; degenerate sizes outside
/// the table fall back to 1.0.
pub fn size_multiplier(total: u8) -> f32 {
    match total {
        3 => 1.0,
        4 => 1.15,
        5 => 1.20,
        6 => 1.25,
        7 => 1.30,
        _ => 1.0,
    }
}

/// Preference weighting for a scoring kind.
fn type_multiplier(kind: TokenKind, preferred: TokenKind, disliked: TokenKind) -> f32 {
    if kind == preferred {
        PREFERRED_TYPE_MULTIPLIER
    } else if kind == disliked {
        DISLIKED_TYPE_MULTIPLIER
    } else {
        1.0
    }
}

/// Running score state: total points plus the multiplier machinery.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreState {
    score: u64,
    multiplier_accumulator: u32,
    score_multiplier: f32,
}

impl ScoreState {
    pub fn new() -> Self {
        Self {
            score: 0,
            multiplier_accumulator: 0,
            score_multiplier: 1.0,
        }
    }

    /// Rebuild score state from snapshot fields, verbatim.
    pub(crate) fn from_snapshot(score: u64, multiplier_accumulator: u32, score_multiplier: f32) -> Self {
        Self {
            score,
            multiplier_accumulator,
            score_multiplier,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn multiplier_accumulator(&self) -> u32 {
        self.multiplier_accumulator
    }

    pub fn score_multiplier(&self) -> f32 {
        self.score_multiplier
    }

    /// Apply one match. Scoring kinds add points; multiplier kinds charge the
    /// accumulator, stepping the multiplier by 0.25 per threshold crossed.
    pub fn apply_match(&mut self, m: &MatchDescriptor, preferred: TokenKind, disliked: TokenKind) {
        let size_mult = size_multiplier(m.total);
        let total = m.total as f32;

        if m.kind.is_scoring() {
            let type_mult = type_multiplier(m.kind, preferred, disliked);
            let gain = (self.score_multiplier * size_mult * type_mult * total * MATCH_BASE_VALUE)
                .round();
            self.score += gain as u64;
        } else {
            let charge = (size_mult * total * MULTIPLIER_BASE_VALUE).round();
            self.multiplier_accumulator += charge as u32;
            while self.multiplier_accumulator > MULTIPLIER_THRESHOLD {
                self.multiplier_accumulator -= MULTIPLIER_THRESHOLD;
                self.score_multiplier += MULTIPLIER_STEP;
            }
        }
    }
}

impl Default for ScoreState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Pos;

    fn horizontal(kind: TokenKind, total: u8) -> MatchDescriptor {
        MatchDescriptor {
            anchor: Pos::new(0, 0),
            kind,
            h_run: total,
            v_run: 0,
            h_offset: 0,
            v_offset: 0,
            total,
        }
    }

    #[test]
    fn test_size_multiplier_table() {
        assert_eq!(size_multiplier(3), 1.0);
        assert_eq!(size_multiplier(4), 1.15);
        assert_eq!(size_multiplier(5), 1.20);
        assert_eq!(size_multiplier(6), 1.25);
        assert_eq!(size_multiplier(7), 1.30);
        assert_eq!(size_multiplier(8), 1.0);
    }

    #[test]
    fn test_neutral_scoring_match_gains() {
        // Neutral kind at multiplier 1.0: gain = round(size_mult * total * 10).
        let preferred = TokenKind::Red;
        let disliked = TokenKind::Blue;

        for (total, expected) in [(3u8, 30u64), (4, 46), (5, 60), (6, 75)] {
            let mut state = ScoreState::new();
            state.apply_match(&horizontal(TokenKind::Orange, total), preferred, disliked);
            assert_eq!(state.score(), expected, "total {total}");
        }
    }

    #[test]
    fn test_preferred_and_disliked_weighting() {
        let preferred = TokenKind::Red;
        let disliked = TokenKind::Blue;

        let mut state = ScoreState::new();
        state.apply_match(&horizontal(TokenKind::Red, 3), preferred, disliked);
        assert_eq!(state.score(), 36); // 1.2 * 3 * 10

        let mut state = ScoreState::new();
        state.apply_match(&horizontal(TokenKind::Blue, 3), preferred, disliked);
        assert_eq!(state.score(), 21); // 0.7 * 3 * 10
    }

    #[test]
    fn test_multiplier_kind_pays_no_points() {
        let mut state = ScoreState::new();
        state.apply_match(&horizontal(TokenKind::Teal, 3), TokenKind::Red, TokenKind::Blue);
        assert_eq!(state.score(), 0);
        assert_eq!(state.multiplier_accumulator(), 15); // 1.0 * 3 * 5
        assert_eq!(state.score_multiplier(), 1.0);
    }

    #[test]
    fn test_accumulator_at_threshold_does_not_bump() {
        // Two size-3 charges land exactly on 30; the bump needs strictly
        // more than the threshold.
        let mut state = ScoreState::new();
        state.apply_match(&horizontal(TokenKind::Purple, 3), TokenKind::Red, TokenKind::Blue);
        state.apply_match(&horizontal(TokenKind::Purple, 3), TokenKind::Red, TokenKind::Blue);
        assert_eq!(state.multiplier_accumulator(), 30);
        assert_eq!(state.score_multiplier(), 1.0);
    }

    #[test]
    fn test_multiplier_pump_carries_remainder() {
        // Size-4 charges are round(1.15 * 4 * 5) = 23 each.
        let mut state = ScoreState::new();
        let pump = horizontal(TokenKind::Gold, 4);

        state.apply_match(&pump, TokenKind::Red, TokenKind::Blue);
        assert_eq!(state.multiplier_accumulator(), 23);
        assert_eq!(state.score_multiplier(), 1.0);

        state.apply_match(&pump, TokenKind::Red, TokenKind::Blue);
        assert_eq!(state.multiplier_accumulator(), 16); // 46 - 30
        assert_eq!(state.score_multiplier(), 1.25);

        state.apply_match(&pump, TokenKind::Red, TokenKind::Blue);
        assert_eq!(state.multiplier_accumulator(), 9); // 39 - 30
        assert_eq!(state.score_multiplier(), 1.5);
    }

    #[test]
    fn test_huge_charge_steps_multiple_times() {
        let mut state = ScoreState::from_snapshot(0, 0, 1.0);
        // Three size-6 charges: 38 each, 114 total, three threshold crossings.
        for _ in 0..3 {
            state.apply_match(&horizontal(TokenKind::Pink, 6), TokenKind::Red, TokenKind::Blue);
        }
        assert_eq!(state.multiplier_accumulator(), 24);
        assert_eq!(state.score_multiplier(), 1.75);
    }

    #[test]
    fn test_raised_multiplier_scales_scoring_gain() {
        let mut state = ScoreState::from_snapshot(0, 0, 1.5);
        state.apply_match(&horizontal(TokenKind::Green, 3), TokenKind::Red, TokenKind::Blue);
        assert_eq!(state.score(), 45); // 1.5 * 1.0 * 1.0 * 3 * 10
    }

    #[test]
    fn test_gain_rounds_half_away_from_zero() {
        // 1.15 * 1.0 * 4 * 10 = 46.0 after f32 rounding of 45.999996.
        let mut state = ScoreState::new();
        state.apply_match(&horizontal(TokenKind::Orange, 4), TokenKind::Red, TokenKind::Blue);
        assert_eq!(state.score(), 46);
    }
}
