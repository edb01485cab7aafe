use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible state of a cell, what a draw routine needs to know.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(u8),
    Bomb,
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}

/// One grid square.
///
/// Bomb status and the adjacent count are written while the minefield is generated and never afterwards. Reveal
/// and flag state belong to the player and only change through [`PlayEngine`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    grid_pos: Coord2,
    is_bomb: bool,
    is_revealed: bool,
    is_flagged: bool,
    adjacent_bomb_count: u8,
}

impl Cell {
    pub(crate) const fn new(grid_pos: Coord2) -> Self {
        Self {
            grid_pos,
            is_bomb: false,
            is_revealed: false,
            is_flagged: false,
            adjacent_bomb_count: 0,
        }
    }

    pub const fn grid_pos(&self) -> Coord2 {
        self.grid_pos
    }

    pub const fn is_bomb(&self) -> bool {
        self.is_bomb
    }

    pub const fn is_revealed(&self) -> bool {
        self.is_revealed
    }

    pub const fn is_flagged(&self) -> bool {
        self.is_flagged
    }

    pub const fn adjacent_bomb_count(&self) -> u8 {
        self.adjacent_bomb_count
    }

    pub const fn view(&self) -> CellView {
        match (self.is_revealed, self.is_flagged, self.is_bomb) {
            (true, _, true) => CellView::Bomb,
            (true, _, false) => CellView::Revealed(self.adjacent_bomb_count),
            (false, true, _) => CellView::Flagged,
            (false, false, _) => CellView::Hidden,
        }
    }

    pub(crate) fn set_bomb(&mut self, is_bomb: bool) {
        self.is_bomb = is_bomb;
    }

    pub(crate) fn set_adjacent_bomb_count(&mut self, count: u8) {
        self.adjacent_bomb_count = count;
    }

    pub(crate) fn set_flagged(&mut self, is_flagged: bool) {
        self.is_flagged = is_flagged;
    }

    /// Marks the cell revealed. Refused while flagged, returns whether anything changed.
    pub(crate) fn mark_revealed(&mut self) -> bool {
        if self.is_flagged || self.is_revealed {
            return false;
        }
        self.is_revealed = true;
        true
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_bomb { "bomb" } else { "cell" };
        write!(f, "{kind} count: {}", self.adjacent_bomb_count)
    }
}
