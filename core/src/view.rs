use serde::{Deserialize, Serialize};

use crate::*;

/// Snapshot of everything a renderer draws for one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub size: Coord2,
    pub scene: Scene,
    pub outcome: Outcome,
    pub bombs_left: i64,
    pub flag_mode: bool,
    pub explosion: Option<WorldPos>,
    /// Row-major, `cells[y][x]`.
    pub cells: Vec<Vec<CellView>>,
}

impl BoardView {
    pub fn capture(session: &Session) -> Self {
        let engine = session.engine();
        let (width, height) = engine.size();
        let cells = (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| {
                        engine
                            .cell((x, y))
                            .map(Cell::view)
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect();

        Self {
            size: (width, height),
            scene: session.scene(),
            outcome: session.outcome(),
            bombs_left: session.bombs_left(),
            flag_mode: session.flag_mode(),
            explosion: session.explosion(),
            cells,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
