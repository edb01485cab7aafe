use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use geometry::*;
pub use minefield::*;
pub use session::*;
pub use settings::*;
pub use types::*;
pub use view::*;

mod cell;
mod engine;
mod error;
mod generator;
mod geometry;
mod minefield;
mod session;
mod settings;
mod types;
mod view;

/// Largest accepted board side.
pub const MAX_SIDE: Coord = 255;

/// Everything the generator needs to lay out a board.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub size: Coord2,
    pub cell_size: f32,
    pub offset: f32,
    pub bomb_probability: f64,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, geometry: GridGeometry, bomb_probability: f64) -> Self {
        Self {
            size,
            cell_size: geometry.cell_size,
            offset: geometry.offset,
            bomb_probability,
        }
    }

    pub fn new((size_x, size_y): Coord2, geometry: GridGeometry, bomb_probability: f64) -> Self {
        let size_x = size_x.clamp(1, MAX_SIDE);
        let size_y = size_y.clamp(1, MAX_SIDE);
        let bomb_probability = if bomb_probability.is_nan() {
            Self::default().bomb_probability
        } else {
            bomb_probability.clamp(0.0, 1.0)
        };
        Self::new_unchecked((size_x, size_y), geometry, bomb_probability)
    }

    pub const fn geometry(&self) -> GridGeometry {
        GridGeometry::new(self.cell_size, self.offset)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// Rejects configurations the generator cannot lay out.
    pub fn validate(self) -> Result<Self> {
        let (size_x, size_y) = self.size;
        if !(1..=MAX_SIDE).contains(&size_x) || !(1..=MAX_SIDE).contains(&size_y) {
            return Err(GameError::InvalidConfig("board size out of range"));
        }
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(GameError::InvalidConfig("cell size must be positive"));
        }
        if !self.offset.is_finite() {
            return Err(GameError::InvalidConfig("offset must be finite"));
        }
        if !self.geometry().round_trips(self.size) {
            return Err(GameError::InvalidConfig(
                "cell size and offset do not map cells back onto themselves",
            ));
        }
        if !(0.0..=1.0).contains(&self.bomb_probability) {
            return Err(GameError::InvalidConfig(
                "bomb probability must lie within 0..=1",
            ));
        }
        Ok(self)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked((15, 15), GridGeometry::default(), 0.2)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
    Won,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
            Self::Won => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitBomb,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitBomb => true,
        }
    }
}
