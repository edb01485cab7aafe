use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for Outcome {
    fn default() -> Self {
        Self::InProgress
    }
}

/// Rules of one game on top of a generated [`Minefield`].
///
/// The outcome changes at most once. After that every move is answered with [`GameError::AlreadyEnded`] and the
/// board stays as it was.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayEngine {
    minefield: Minefield,
    revealed_count: CellCount,
    flagged_count: CellCount,
    outcome: Outcome,
    triggered_bomb: Option<Coord2>,
}

impl PlayEngine {
    pub fn new(minefield: Minefield) -> Self {
        Self {
            minefield,
            revealed_count: 0,
            flagged_count: 0,
            outcome: Default::default(),
            triggered_bomb: None,
        }
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_finished()
    }

    pub fn minefield(&self) -> &Minefield {
        &self.minefield
    }

    pub fn size(&self) -> Coord2 {
        self.minefield.size()
    }

    pub fn total_bombs(&self) -> CellCount {
        self.minefield.bomb_count()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Running tally of bombs minus placed flags. Goes negative when the player over-flags.
    pub fn bombs_left(&self) -> i64 {
        i64::from(self.minefield.bomb_count()) - i64::from(self.flagged_count)
    }

    pub fn triggered_bomb(&self) -> Option<Coord2> {
        self.triggered_bomb
    }

    pub fn cell(&self, coords: Coord2) -> Option<&Cell> {
        self.minefield.get(coords)
    }

    pub fn neighbors(&self, coords: Coord2) -> Neighbors {
        self.minefield.neighbors(coords)
    }

    /// Flags exactly cover the bombs and the remaining counter agrees.
    pub fn is_win(&self) -> bool {
        self.minefield.flags_match_bombs() && self.bombs_left() == 0
    }

    pub fn is_loss(&self) -> bool {
        matches!(self.outcome, Outcome::Lost)
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.minefield.validate_coords(coords)?;
        self.check_not_finished()?;

        Ok(self.reveal_cell(coords, false))
    }

    /// Spreads a reveal out from `origin` over zero-count cells, returning how many cells were opened.
    ///
    /// With `suppressed` set nothing happens; that is how a cell revealed as a leaf stops the spread.
    pub fn flood_reveal(&mut self, origin: Coord2, suppressed: bool) -> Result<CellCount> {
        let origin = self.minefield.validate_coords(origin)?;
        self.check_not_finished()?;

        Ok(self.flood_from(origin, suppressed))
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.minefield.validate_coords(coords)?;
        let is_flagged = self.minefield[coords].is_flagged();
        self.set_flagged(coords, !is_flagged)
    }

    /// Places or removes a flag, then checks for a win.
    pub fn set_flagged(&mut self, coords: Coord2, is_flagged: bool) -> Result<MarkOutcome> {
        use MarkOutcome::*;

        let coords = self.minefield.validate_coords(coords)?;
        self.check_not_finished()?;

        let Some(cell) = self.minefield.get_mut(coords) else {
            return Err(GameError::InvalidCoords);
        };
        if cell.is_revealed() || cell.is_flagged() == is_flagged {
            return Ok(NoChange);
        }
        cell.set_flagged(is_flagged);
        if is_flagged {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        log::trace!(
            "{:?} flagged={}, {} bombs left",
            coords,
            is_flagged,
            self.bombs_left()
        );

        if self.is_win() {
            self.end_game(true);
            Ok(Won)
        } else {
            Ok(Changed)
        }
    }

    fn reveal_cell(&mut self, coords: Coord2, suppress_flood: bool) -> RevealOutcome {
        let Some(cell) = self.minefield.get_mut(coords) else {
            return RevealOutcome::NoChange;
        };
        if !cell.mark_revealed() {
            return RevealOutcome::NoChange;
        }
        let (is_bomb, count) = (cell.is_bomb(), cell.adjacent_bomb_count());
        self.revealed_count += 1;

        if count == 0 {
            let opened = self.flood_from(coords, suppress_flood);
            log::trace!("Reveal at {:?} flooded {} cells", coords, opened);
        }

        if is_bomb {
            log::info!("Bomb revealed at {:?}, game over", coords);
            self.triggered_bomb = Some(coords);
            self.end_game(false);
            RevealOutcome::HitBomb
        } else {
            RevealOutcome::Revealed
        }
    }

    fn flood_from(&mut self, origin: Coord2, suppressed: bool) -> CellCount {
        if suppressed {
            return 0;
        }

        let mut opened = 0;
        let mut visited = HashSet::new();
        let mut to_visit = VecDeque::from([origin]);

        while let Some(visit_coords) = to_visit.pop_front() {
            for pos in self.minefield.neighbors(visit_coords) {
                if !visited.insert(pos) {
                    continue;
                }

                let Some(cell) = self.minefield.get_mut(pos) else {
                    continue;
                };
                if cell.is_flagged() || cell.is_bomb() || cell.is_revealed() {
                    continue;
                }

                cell.mark_revealed();
                opened += 1;

                // positive counts are leaves
                if cell.adjacent_bomb_count() == 0 {
                    to_visit.push_back(pos);
                }
            }
        }

        self.revealed_count += opened;
        opened
    }

    fn end_game(&mut self, won: bool) {
        if self.outcome.is_finished() {
            return;
        }

        self.outcome = if won { Outcome::Won } else { Outcome::Lost };
        if won {
            self.triggered_bomb = None;
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.outcome.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
