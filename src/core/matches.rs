//! Match finder - detects runs of 3+ identical tokens along a line
//!
//! Matched cells are emptied immediately, so overlapping runs probed later in
//! the same pass see the updated board. The whole-board scan walks column by
//! column; an L/T shape whose corner is cleared by an earlier horizontal run
//! can leave the stub of its other arm behind. That partial detection is
//! long-standing behavior and is kept.

use crate::core::board::Grid;
use crate::types::{Pos, TokenKind, MIN_RUN};

/// One detected run, consumed by the scorer and gravity within the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchDescriptor {
    /// The probed cell the runs were counted from.
    pub anchor: Pos,
    pub kind: TokenKind,
    /// Matched cells along the row including the anchor; 0 if the horizontal
    /// run did not qualify.
    pub h_run: u8,
    /// Matched cells along the column including the anchor; 0 if the vertical
    /// run did not qualify.
    pub v_run: u8,
    /// Leftmost matched column relative to the anchor (<= 0).
    pub h_offset: i8,
    /// Topmost matched row relative to the anchor (<= 0).
    pub v_offset: i8,
    /// Combined match size: 1 + qualifying extras on each axis.
    pub total: u8,
}

impl MatchDescriptor {
    /// Columns spanned by the horizontal extent (just the anchor's column for
    /// vertical-only matches).
    pub fn columns(&self) -> std::ops::RangeInclusive<i8> {
        if self.h_run > 0 {
            let left = self.anchor.x + self.h_offset;
            left..=left + self.h_run as i8 - 1
        } else {
            self.anchor.x..=self.anchor.x
        }
    }

    /// Rows spanned by the vertical extent.
    pub fn rows(&self) -> std::ops::RangeInclusive<i8> {
        if self.v_run > 0 {
            let top = self.anchor.y + self.v_offset;
            top..=top + self.v_run as i8 - 1
        } else {
            self.anchor.y..=self.anchor.y
        }
    }
}

/// Find and clear matches along the straight segment from `start` to `end`
/// (inclusive). The segment must share an axis.
///
/// For every non-empty cell on the segment, contiguous same-kind runs are
/// counted left/right and up/down independently; the cell matches if either
/// axis reaches `MIN_RUN` cells including itself. Qualifying runs are marked
/// empty on the spot and one descriptor per probed cell is returned.
pub fn find_matches(grid: &mut Grid, start: Pos, end: Pos) -> Vec<MatchDescriptor> {
    debug_assert!(start.aligned_with(end), "segment must share an axis");

    let step_x = (end.x - start.x).signum();
    let step_y = (end.y - start.y).signum();
    let distance = start.distance_to(end);

    let mut found = Vec::new();
    let (mut x, mut y) = (start.x, start.y);

    for _ in 0..=distance {
        if let Some(Some(kind)) = grid.get(x, y) {
            // Count contiguous same-kind neighbors on each side of the anchor.
            let mut left = 0i8;
            while grid.get(x - left - 1, y) == Some(Some(kind)) {
                left += 1;
            }
            let mut right = 0i8;
            while grid.get(x + right + 1, y) == Some(Some(kind)) {
                right += 1;
            }
            let mut up = 0i8;
            while grid.get(x, y - up - 1) == Some(Some(kind)) {
                up += 1;
            }
            let mut down = 0i8;
            while grid.get(x, y + down + 1) == Some(Some(kind)) {
                down += 1;
            }

            let h_extra = left + right;
            let v_extra = up + down;
            let h_qualifies = h_extra >= MIN_RUN as i8 - 1;
            let v_qualifies = v_extra >= MIN_RUN as i8 - 1;

            if h_qualifies || v_qualifies {
                if h_qualifies {
                    for dx in -left..=right {
                        grid.set(x + dx, y, None);
                    }
                }
                if v_qualifies {
                    for dy in -up..=down {
                        grid.set(x, y + dy, None);
                    }
                }

                let total = 1 + if h_qualifies { h_extra } else { 0 }
                    + if v_qualifies { v_extra } else { 0 };
                found.push(MatchDescriptor {
                    anchor: Pos::new(x, y),
                    kind,
                    h_run: if h_qualifies { (h_extra + 1) as u8 } else { 0 },
                    v_run: if v_qualifies { (v_extra + 1) as u8 } else { 0 },
                    h_offset: if h_qualifies { -left } else { 0 },
                    v_offset: if v_qualifies { -up } else { 0 },
                    total: total as u8,
                });
            }
        }

        x += step_x;
        y += step_y;
    }

    found
}

/// Find and clear matches anywhere on the board by scanning every full
/// column. Used after a cascade round, since a drop can create new runs far
/// from the original swap.
pub fn find_all_matches(grid: &mut Grid) -> Vec<MatchDescriptor> {
    let size = grid.size() as i8;
    let mut found = Vec::new();
    for x in 0..size {
        found.extend(find_matches(grid, Pos::new(x, 0), Pos::new(x, size - 1)));
    }
    found
}
