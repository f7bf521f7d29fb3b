//! Keyboard mapping and drag tracking for the terminal shell.
//!
//! A swap is two grabs: the first marks the origin cell, the second hands the
//! origin/target pair to the session. The handler never touches the grid
//! itself.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::{BoardSession, Phase};
use crate::types::Pos;

/// Shell-level commands decoded from key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    /// Move the cursor by (dx, dy).
    Cursor(i8, i8),
    /// Grab the cursor cell, or complete a swap if a cell is already grabbed.
    Grab,
    /// Drop the grabbed cell without swapping.
    Cancel,
    Save,
    Reload,
    Quit,
}

pub fn map_key(key: KeyEvent) -> Option<UiCommand> {
    if should_quit(key) {
        return Some(UiCommand::Quit);
    }
    match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(UiCommand::Cursor(-1, 0)),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(UiCommand::Cursor(1, 0)),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(UiCommand::Cursor(0, -1)),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(UiCommand::Cursor(0, 1)),
        KeyCode::Enter | KeyCode::Char(' ') => Some(UiCommand::Grab),
        KeyCode::Esc => Some(UiCommand::Cancel),
        KeyCode::Char('o') | KeyCode::Char('O') => Some(UiCommand::Save),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(UiCommand::Reload),
        _ => None,
    }
}

pub fn should_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('c') | KeyCode::Char('C') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Tracks the grabbed origin cell between two grab presses.
#[derive(Debug, Clone, Default)]
pub struct DragHandler {
    origin: Option<Pos>,
}

impl DragHandler {
    pub fn new() -> Self {
        Self { origin: None }
    }

    pub fn origin(&self) -> Option<Pos> {
        self.origin
    }

    pub fn active(&self) -> bool {
        self.origin.is_some()
    }

    /// Handle a grab at the cursor. The first grab marks the origin; the
    /// second attempts the swap and clears the mark either way.
    /// Returns true if a swap was accepted.
    pub fn grab(&mut self, session: &mut BoardSession, cursor: Pos) -> bool {
        match self.origin.take() {
            None => {
                if session.phase() == Phase::Idle && session.grid().in_bounds(cursor) {
                    self.origin = Some(cursor);
                }
                false
            }
            Some(origin) => session.try_swap(origin, cursor),
        }
    }

    pub fn cancel(&mut self) {
        self.origin = None;
    }
}
