//! TerminalRenderer: flushes board frames to a real terminal.
//!
//! Full redraw every frame; the board is small enough that diffing would buy
//! nothing over a queued batch.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::core::BoardSession;
use crate::term::game_view::{status_lines, tile_marker, BOARD_ORIGIN_X, BOARD_ORIGIN_Y, TILE_WIDTH};
use crate::types::{Pos, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.queue(terminal::DisableLineWrap)?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(terminal::EnableLineWrap)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Draw the board and side panel.
    pub fn draw(
        &mut self,
        session: &BoardSession,
        cursor_pos: Pos,
        grabbed: Option<Pos>,
    ) -> Result<()> {
        let size = session.grid().size() as i8;

        for y in 0..size {
            self.stdout
                .queue(cursor::MoveTo(BOARD_ORIGIN_X, BOARD_ORIGIN_Y + y as u16))?;
            for x in 0..size {
                let cell = session.grid().get(x, y).unwrap_or(None);
                let bg = session.config().color_of(cell);
                self.stdout.queue(SetBackgroundColor(rgb_to_color(bg)))?;
                self.stdout
                    .queue(SetForegroundColor(Color::Rgb { r: 0, g: 0, b: 0 }))?;
                self.stdout
                    .queue(Print(tile_marker(Pos::new(x, y), cursor_pos, grabbed)))?;
            }
            self.stdout.queue(ResetColor)?;
        }

        let panel_x = BOARD_ORIGIN_X + size as u16 * TILE_WIDTH + 2;
        for (i, line) in status_lines(session).iter().enumerate() {
            self.stdout
                .queue(cursor::MoveTo(panel_x, BOARD_ORIGIN_Y + i as u16))?;
            self.stdout.queue(Print(line))?;
            self.stdout
                .queue(terminal::Clear(terminal::ClearType::UntilNewLine))?;
        }

        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
