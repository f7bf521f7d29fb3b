//! Session module - the board state machine
//!
//! A session owns the grid, the token generator, and the score state, and
//! drives them through swap / resolve rounds. Resolution is staged: each
//! `resolve_round` call scores the pending matches, compacts and refills the
//! board, and probes for follow-up matches, so a shell can pace cascades or
//! run them to completion in one call.
//!
//! Cell changes and score changes are accumulated as events and drained by
//! the caller; the core never renders.

use arrayvec::ArrayVec;

use crate::config::{BoardConfig, ConfigError};
use crate::core::board::Grid;
use crate::core::matches::{find_all_matches, find_matches, MatchDescriptor};
use crate::core::rng::TokenGenerator;
use crate::core::scoring::ScoreState;
use crate::core::snapshot::BoardSnapshot;
use crate::types::{Cell, Pos, Rgb, TokenKind, MAX_BOARD_SIZE, SCORING_KIND_COUNT};

/// Where the session is in the swap/resolve cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Settled board, waiting for a swap.
    Idle,
    /// A swap is being executed. Transient; never observed between calls.
    Swapping,
    /// Matches are pending and cascade rounds remain.
    Resolving,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Swapping => "swapping",
            Phase::Resolving => "resolving",
        }
    }
}

/// State change notifications accumulated during session calls.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub enum BoardEvent {
    CellChanged { pos: Pos, cell: Cell, color: Rgb },
    ScoreChanged { score: u64, multiplier: f32 },
}

/// A running match-3 board session.
pub struct BoardSession {
    config: BoardConfig,
    grid: Grid,
    generator: TokenGenerator,
    score: ScoreState,
    phase: Phase,
    preferred: TokenKind,
    disliked: TokenKind,
    pending: Vec<MatchDescriptor>,
    rounds: u32,
    saved: Option<BoardSnapshot>,
    events: Vec<BoardEvent>,
}

impl BoardSession {
    /// Start a session: validate the config, pick the preferred kind, and
    /// fill the board.
    ///
    /// The preference draw happens before the board fill, so the whole
    /// startup sequence is a deterministic function of seed and weights. The
    /// drawn kind is folded into the scoring subset; its cycle opposite
    /// becomes the disliked kind.
    pub fn new(config: BoardConfig, seed: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut generator = TokenGenerator::new(&config.token_weights, seed)?;

        let preferred_index = generator.draw().index() % SCORING_KIND_COUNT;
        let preferred = match TokenKind::from_index(preferred_index) {
            Some(kind) => kind,
            None => TokenKind::Red,
        };
        let disliked = match preferred.cycle_opposite() {
            Some(kind) => kind,
            None => TokenKind::Red,
        };

        let size = config.board_size;
        let mut grid = Grid::new(size);
        for y in 0..size as i8 {
            for x in 0..size as i8 {
                grid.set(x, y, Some(generator.draw()));
            }
        }

        let mut session = Self {
            config,
            grid,
            generator,
            score: ScoreState::new(),
            phase: Phase::Idle,
            preferred,
            disliked,
            pending: Vec::new(),
            rounds: 0,
            saved: None,
            events: Vec::new(),
        };
        session.emit_cell_diffs(&Grid::new(size));
        Ok(session)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Cascade rounds completed since the last accepted swap.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn preferred(&self) -> TokenKind {
        self.preferred
    }

    pub fn disliked(&self) -> TokenKind {
        self.disliked
    }

    pub fn score_state(&self) -> &ScoreState {
        &self.score
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Attempt a swap between two adjacent cells.
    ///
    /// Rejected without touching the board unless the session is idle, both
    /// positions are in bounds and distinct, and they are orthogonal
    /// neighbors. An accepted swap that produces no match stays on the board;
    /// there is no swap-back.
    pub fn try_swap(&mut self, from: Pos, to: Pos) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        if !self.grid.in_bounds(from) || !self.grid.in_bounds(to) {
            return false;
        }
        if from == to || !from.is_adjacent_to(to) {
            return false;
        }

        self.phase = Phase::Swapping;
        let before = self.grid.clone();

        self.slide(from, to);
        self.pending = find_matches(&mut self.grid, from, to);
        self.emit_cell_diffs(&before);

        self.rounds = 0;
        self.phase = if self.pending.is_empty() {
            Phase::Idle
        } else {
            Phase::Resolving
        };
        true
    }

    /// Move the token at `from` to `to`; every token between shifts one step
    /// toward `from`. For adjacent cells this is a plain swap, but the loop
    /// handles any aligned segment.
    fn slide(&mut self, from: Pos, to: Pos) {
        let step_x = (from.x - to.x).signum();
        let step_y = (from.y - to.y).signum();

        let dragged = self.grid.get(from.x, from.y).unwrap_or(None);
        // Walk from the origin side so every cell is read before anything is
        // written over it.
        let (mut x, mut y) = (from.x - step_x, from.y - step_y);
        loop {
            let shifted = self.grid.get(x, y).unwrap_or(None);
            self.grid.set(x + step_x, y + step_y, shifted);
            if (x, y) == (to.x, to.y) {
                break;
            }
            x -= step_x;
            y -= step_y;
        }
        self.grid.set(to.x, to.y, dragged);
    }

    /// Run one cascade round: score the pending matches, drop survivors,
    /// refill from the top, and probe the whole board for follow-ups.
    ///
    /// Returns true while more rounds remain.
    pub fn resolve_round(&mut self) -> bool {
        if self.phase != Phase::Resolving {
            return false;
        }

        let before = self.grid.clone();

        // Columns a match emptied cells in; a column only needs one collapse
        // per round however many matches touched it.
        let mut touched: ArrayVec<i8, { MAX_BOARD_SIZE as usize }> = ArrayVec::new();
        for m in std::mem::take(&mut self.pending) {
            self.score.apply_match(&m, self.preferred, self.disliked);
            for x in m.columns() {
                if !touched.contains(&x) {
                    touched.push(x);
                }
            }
        }
        self.events.push(BoardEvent::ScoreChanged {
            score: self.score.score(),
            multiplier: self.score.score_multiplier(),
        });

        for x in touched {
            self.grid.collapse_column(x);
        }
        self.refill();
        self.rounds += 1;

        self.pending = find_all_matches(&mut self.grid);
        self.emit_cell_diffs(&before);

        if self.pending.is_empty() {
            self.phase = Phase::Idle;
            false
        } else {
            true
        }
    }

    /// Run cascade rounds to completion; returns the number of rounds.
    pub fn resolve_all(&mut self) -> u32 {
        while self.resolve_round() {}
        self.rounds
    }

    /// Capture the current state.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::capture(&self.grid, self.generator.state(), &self.score, self.preferred)
    }

    /// Stash a snapshot inside the session for a later `reload`.
    pub fn save(&mut self) {
        self.saved = Some(self.snapshot());
    }

    /// Restore the last `save`d snapshot, if any. Same restrictions as
    /// `restore`.
    pub fn reload(&mut self) -> bool {
        match self.saved.clone() {
            Some(snapshot) => self.restore(&snapshot),
            None => false,
        }
    }

    /// Restore a snapshot into this session.
    ///
    /// Rejected while matches are resolving, and when the snapshot does not
    /// fit the session's board size or carries malformed cells.
    pub fn restore(&mut self, snapshot: &BoardSnapshot) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        if snapshot.size != self.config.board_size {
            return false;
        }
        let grid = match snapshot.try_grid() {
            Some(grid) => grid,
            None => return false,
        };

        let before = std::mem::replace(&mut self.grid, grid);
        self.generator.set_state(snapshot.rng_state);
        self.score = ScoreState::from_snapshot(
            snapshot.score,
            snapshot.multiplier_accumulator,
            snapshot.score_multiplier,
        );
        self.preferred = snapshot.preferred;
        self.disliked = match self.preferred.cycle_opposite() {
            Some(kind) => kind,
            None => TokenKind::Red,
        };
        self.pending.clear();
        self.rounds = 0;

        self.emit_cell_diffs(&before);
        self.events.push(BoardEvent::ScoreChanged {
            score: self.score.score(),
            multiplier: self.score.score_multiplier(),
        });
        true
    }

    /// Drain the accumulated events.
    pub fn take_events(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }

    fn refill(&mut self) {
        let size = self.config.board_size as i8;
        for y in 0..size {
            // Compaction leaves empties only at the top of each column, so
            // the first full row ends the scan.
            if !self.grid.row_has_empty(y) {
                break;
            }
            for x in 0..size {
                if self.grid.get(x, y) == Some(None) {
                    let kind = self.generator.draw();
                    self.grid.set(x, y, Some(kind));
                }
            }
        }
    }

    /// Diff the grid against `before` and push one event per changed cell.
    ///
    /// Diffs span a whole round, so a cell a token merely passes through
    /// (dropped or refilled in, then cleared by the same round's scan, or
    /// replaced by an identical kind) emits nothing. Frontends that want the
    /// intermediate states should pace the cascade with `resolve_round` and
    /// read the grid between rounds rather than rely on the event stream.
    fn emit_cell_diffs(&mut self, before: &Grid) {
        let size = self.config.board_size as i8;
        for y in 0..size {
            for x in 0..size {
                let cell = self.grid.get(x, y).unwrap_or(None);
                if before.get(x, y) != Some(cell) {
                    self.events.push(BoardEvent::CellChanged {
                        pos: Pos::new(x, y),
                        cell,
                        color: self.config.color_of(cell),
                    });
                }
            }
        }
    }
}
