//! End-to-end session tests over the public API.
//!
//! Scenarios rig the board through snapshot restore: snapshot cells are one
//! byte per cell (0 empty, kind index + 1), and a weight table with only Red
//! and Orange live makes refills deterministic (the generator's parity
//! alternates, so draws alternate Red, Orange, Red, ...).

use tui_match3::config::BoardConfig;
use tui_match3::core::{BoardEvent, BoardSession, BoardSnapshot, Phase};
use tui_match3::types::{Pos, TokenKind};

// Snapshot cell codes.
const R: u8 = 1; // red
const B: u8 = 3; // blue
const P: u8 = 5; // purple
const T: u8 = 6; // teal
const K: u8 = 7; // pink
const D: u8 = 8; // gold

fn rigged_session(rows: [[u8; 4]; 4], preferred: TokenKind) -> BoardSession {
    let config = BoardConfig {
        board_size: 4,
        token_weights: vec![1, 1, 0, 0, 0, 0, 0, 0],
        ..BoardConfig::default()
    };
    let mut session = BoardSession::new(config, 99).unwrap();

    let snapshot = BoardSnapshot {
        size: 4,
        cells: rows.iter().flatten().copied().collect(),
        rng_state: 1,
        score: 0,
        multiplier_accumulator: 0,
        score_multiplier: 1.0,
        preferred,
    };
    assert!(session.restore(&snapshot));
    session.take_events();
    session
}

#[test]
fn test_swap_clears_scores_and_refills() {
    // Swapping (3,0) and (3,1) completes a Red run of four on the top row:
    // round(1.15 * 4 * 10) = 46 points, and the four refills alternate
    // Red/Orange left to right.
    let mut session = rigged_session(
        [
            [R, R, R, B],
            [P, T, P, R],
            [T, P, T, P],
            [P, T, P, T],
        ],
        TokenKind::Orange,
    );

    assert!(session.try_swap(Pos::new(3, 0), Pos::new(3, 1)));
    assert_eq!(session.phase(), Phase::Resolving);

    assert_eq!(session.resolve_all(), 1);
    assert_eq!(session.phase(), Phase::Idle);
    assert_eq!(session.score_state().score(), 46);
    assert_eq!(session.score_state().score_multiplier(), 1.0);

    assert_eq!(session.grid().get(0, 0), Some(Some(TokenKind::Red)));
    assert_eq!(session.grid().get(1, 0), Some(Some(TokenKind::Orange)));
    assert_eq!(session.grid().get(2, 0), Some(Some(TokenKind::Red)));
    assert_eq!(session.grid().get(3, 0), Some(Some(TokenKind::Orange)));
    assert_eq!(session.grid().get(3, 1), Some(Some(TokenKind::Blue)));
    assert!(session.grid().is_settled());
}

#[test]
fn test_cascade_second_round_from_dropped_token() {
    // Round one clears a vertical Purple run in column 1; the Teal that
    // drops to the bottom row completes a horizontal Teal run for round two.
    // Both kinds feed the multiplier accumulator, which lands exactly on the
    // threshold without bumping the multiplier.
    let mut session = rigged_session(
        [
            [K, T, D, K],
            [P, D, K, T],
            [K, P, D, K],
            [T, P, T, D],
        ],
        TokenKind::Red,
    );

    assert!(session.try_swap(Pos::new(0, 1), Pos::new(1, 1)));

    assert!(session.resolve_round());
    assert_eq!(session.rounds(), 1);
    assert_eq!(session.score_state().multiplier_accumulator(), 15);

    assert!(!session.resolve_round());
    assert_eq!(session.rounds(), 2);
    assert_eq!(session.phase(), Phase::Idle);
    assert_eq!(session.score_state().score(), 0);
    assert_eq!(session.score_state().multiplier_accumulator(), 30);
    assert_eq!(session.score_state().score_multiplier(), 1.0);
    assert!(session.grid().is_settled());
}

#[test]
fn test_non_adjacent_swap_rejected_without_side_effects() {
    let mut session = rigged_session(
        [
            [K, T, D, K],
            [P, D, K, T],
            [K, P, D, K],
            [T, P, T, D],
        ],
        TokenKind::Red,
    );
    let before: Vec<_> = session.grid().cells().to_vec();

    assert!(!session.try_swap(Pos::new(0, 0), Pos::new(2, 0)));
    assert!(!session.try_swap(Pos::new(0, 0), Pos::new(1, 1)));
    assert_eq!(session.grid().cells(), before.as_slice());
    assert!(session.take_events().is_empty());
}

#[test]
fn test_resolution_emits_score_and_cell_events() {
    let mut session = rigged_session(
        [
            [R, R, R, B],
            [P, T, P, R],
            [T, P, T, P],
            [P, T, P, T],
        ],
        TokenKind::Orange,
    );

    session.try_swap(Pos::new(3, 0), Pos::new(3, 1));
    session.resolve_all();

    let events = session.take_events();
    let score_events: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, BoardEvent::ScoreChanged { .. }))
        .collect();
    assert_eq!(score_events.len(), 1);
    assert!(matches!(
        score_events[0],
        BoardEvent::ScoreChanged { score: 46, .. }
    ));
    assert!(events
        .iter()
        .any(|e| matches!(e, BoardEvent::CellChanged { .. })));
}

#[test]
fn test_snapshot_restore_replays_identical_run() {
    // Probe a few seeds; not every board admits a match-producing swap.
    let (mut session, swap) = (31337..31347)
        .find_map(|seed| {
            let mut session = BoardSession::new(BoardConfig::default(), seed).unwrap();
            find_matching_swap(&mut session).map(|swap| (session, swap))
        })
        .expect("no seed produced a matchable board");
    let snapshot = session.snapshot();
    session.take_events();

    assert!(session.try_swap(swap.0, swap.1));
    session.resolve_all();
    let first_grid = session.grid().clone();
    let first_score = session.score_state().score();

    assert!(session.restore(&snapshot));
    assert!(session.try_swap(swap.0, swap.1));
    session.resolve_all();

    assert_eq!(session.grid(), &first_grid);
    assert_eq!(session.score_state().score(), first_score);
}

#[test]
fn test_snapshot_survives_json() {
    let mut session = BoardSession::new(BoardConfig::default(), 4242).unwrap();
    let snapshot = session.snapshot();

    let json = serde_json::to_string(&snapshot).unwrap();
    let restored: BoardSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(snapshot, restored);
    assert!(session.restore(&restored));
}

#[test]
fn test_restore_fills_large_boards_completely() {
    // Boards past 11x11 have flat cell indices beyond i8 range; a restored
    // grid must still carry every cell.
    let config = BoardConfig {
        board_size: 12,
        ..BoardConfig::default()
    };
    let session = BoardSession::new(config.clone(), 2024).unwrap();
    let snapshot = session.snapshot();

    let mut other = BoardSession::new(config, 1).unwrap();
    assert!(other.restore(&snapshot));
    assert!(other.grid().is_settled());
    assert_eq!(other.grid(), session.grid());
}

#[test]
fn test_restore_rejected_mid_cascade() {
    let mut session = rigged_session(
        [
            [R, R, R, B],
            [P, T, P, R],
            [T, P, T, P],
            [P, T, P, T],
        ],
        TokenKind::Orange,
    );
    let snapshot = session.snapshot();

    session.try_swap(Pos::new(3, 0), Pos::new(3, 1));
    assert_eq!(session.phase(), Phase::Resolving);
    assert!(!session.restore(&snapshot));

    session.resolve_all();
    assert!(session.restore(&snapshot));
}

/// Probe every adjacent pair for a swap that produces matches, rewinding the
/// session to its starting state before returning.
fn find_matching_swap(session: &mut BoardSession) -> Option<(Pos, Pos)> {
    let snapshot = session.snapshot();
    let size = session.grid().size() as i8;
    for y in 0..size {
        for x in 0..size {
            for (dx, dy) in [(1, 0), (0, 1)] {
                let from = Pos::new(x, y);
                let to = Pos::new(x + dx, y + dy);
                if !session.grid().in_bounds(to) {
                    continue;
                }
                let hit = session.try_swap(from, to) && session.phase() == Phase::Resolving;
                if hit {
                    // Rewind requires an idle session.
                    session.resolve_all();
                }
                assert!(session.restore(&snapshot));
                if hit {
                    return Some((from, to));
                }
            }
        }
    }
    None
}
