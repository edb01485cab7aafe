use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Every cell of an R×C board, addressed by grid coordinate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Minefield {
    cells: Array2<Cell>,
    geometry: GridGeometry,
    bomb_count: CellCount,
}

impl Minefield {
    /// Lays out a `size` board and asks `is_bomb` about each cell right after placing it.
    ///
    /// Cells are visited column by column. Adjacent counts are filled in by a second pass once every cell exists.
    /// `geometry` must round-trip every cell, which [`GameConfig::validate`] guarantees.
    pub(crate) fn build(
        size: Coord2,
        geometry: GridGeometry,
        mut is_bomb: impl FnMut(Coord2) -> bool,
    ) -> Self {
        let (width, height) = size;
        let shape = (width.max(0) as usize, height.max(0) as usize);

        let mut bomb_count: CellCount = 0;
        let cells = Array2::from_shape_fn(shape, |(x, y)| {
            let coords = (x as Coord, y as Coord);
            debug_assert_eq!(geometry.to_grid(geometry.to_world(coords)), coords);

            let mut cell = Cell::new(coords);
            if is_bomb(coords) {
                cell.set_bomb(true);
                bomb_count += 1;
            }
            cell
        });

        let mut minefield = Self {
            cells,
            geometry,
            bomb_count,
        };
        minefield.fill_adjacent_counts();
        log::debug!(
            "Built {}x{} minefield with {} bombs",
            width,
            height,
            minefield.bomb_count
        );
        minefield
    }

    fn fill_adjacent_counts(&mut self) {
        let (width, height) = self.size();
        for x in 0..width {
            for y in 0..height {
                let count = self.count_adjacent_bombs((x, y));
                if let Some(cell) = self.get_mut((x, y)) {
                    cell.set_adjacent_bomb_count(count);
                }
            }
        }
    }

    pub fn size(&self) -> Coord2 {
        let (w, h) = self.cells.dim();
        (w as Coord, h as Coord)
    }

    pub fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    /// Realised number of bombs, fixed once built.
    pub fn bomb_count(&self) -> CellCount {
        self.bomb_count
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size().0, self.size().1)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        match coords.to_nd_index(self.size()) {
            Some(_) => Ok(coords),
            None => Err(GameError::InvalidCoords),
        }
    }

    pub fn get(&self, coords: Coord2) -> Option<&Cell> {
        let index = coords.to_nd_index(self.size())?;
        self.cells.get(index)
    }

    pub(crate) fn get_mut(&mut self, coords: Coord2) -> Option<&mut Cell> {
        let index = coords.to_nd_index(self.size())?;
        self.cells.get_mut(index)
    }

    /// Grid coordinates under `position`, or [`None`] when it falls outside the board.
    pub fn coords_at(&self, position: WorldPos) -> Option<Coord2> {
        if !(position.x.is_finite() && position.y.is_finite()) {
            return None;
        }
        let coords = self.geometry.to_grid(position);
        coords.to_nd_index(self.size()).map(|_| coords)
    }

    pub fn cell_at(&self, position: WorldPos) -> Option<&Cell> {
        self.coords_at(position).and_then(|coords| self.get(coords))
    }

    /// In-bounds 3×3 box around `coords`, `coords` itself included.
    pub fn neighbors(&self, coords: Coord2) -> Neighbors {
        self.cells.neighborhood(coords)
    }

    pub fn count_adjacent_bombs(&self, coords: Coord2) -> u8 {
        self.neighbors(coords)
            .into_iter()
            .filter(|&pos| self[pos].is_bomb())
            .count() as u8
    }

    /// Every bomb is flagged and no other cell is.
    pub fn flags_match_bombs(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| cell.is_flagged() == cell.is_bomb())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
}

impl Index<Coord2> for Minefield {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        match self.get(coords) {
            Some(cell) => cell,
            None => panic!("coordinates {coords:?} outside of {:?}", self.size()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(size: Coord2, bombs: &[Coord2]) -> Minefield {
        Minefield::build(size, GridGeometry::default(), |coords| {
            bombs.contains(&coords)
        })
    }

    #[test]
    fn one_cell_per_coordinate() {
        let minefield = field((4, 3), &[]);

        assert_eq!(minefield.total_cells(), 12);
        for x in 0..4 {
            for y in 0..3 {
                assert_eq!(minefield[(x, y)].grid_pos(), (x, y));
            }
        }
    }

    #[test]
    fn counts_match_bombs_in_neighborhood() {
        let minefield = field((5, 5), &[(0, 0), (2, 1), (4, 4), (3, 3)]);

        for cell in minefield.iter() {
            let expected = minefield
                .neighbors(cell.grid_pos())
                .into_iter()
                .filter(|&pos| minefield[pos].is_bomb())
                .count() as u8;
            assert_eq!(cell.adjacent_bomb_count(), expected);
        }
    }

    #[test]
    fn bomb_counts_itself() {
        let minefield = field((3, 3), &[(1, 1)]);

        assert_eq!(minefield[(1, 1)].adjacent_bomb_count(), 1);
        assert!(minefield.iter().all(|cell| cell.adjacent_bomb_count() == 1));
    }

    #[test]
    fn lookup_by_position() {
        let minefield = field((3, 3), &[]);

        let cell = minefield.cell_at(WorldPos::new(50.0, 80.0)).unwrap();
        assert_eq!(cell.grid_pos(), (1, 2));
        assert!(minefield.cell_at(WorldPos::new(0.0, 0.0)).is_none());
        assert!(minefield.cell_at(WorldPos::new(200.0, 20.0)).is_none());
    }

    #[test]
    fn non_finite_positions_select_nothing() {
        let minefield = field((3, 3), &[]);

        assert_eq!(minefield.coords_at(WorldPos::new(f32::NAN, 20.0)), None);
        assert_eq!(minefield.coords_at(WorldPos::new(20.0, f32::NAN)), None);
        assert_eq!(minefield.coords_at(WorldPos::new(f32::INFINITY, 20.0)), None);
        assert_eq!(minefield.coords_at(WorldPos::new(20.0, 20.0)), Some((0, 0)));
    }

    #[test]
    fn flags_must_equal_bomb_set() {
        let mut minefield = field((3, 3), &[(1, 1)]);
        assert!(!minefield.flags_match_bombs());

        minefield.get_mut((1, 1)).unwrap().set_flagged(true);
        assert!(minefield.flags_match_bombs());

        minefield.get_mut((0, 2)).unwrap().set_flagged(true);
        assert!(!minefield.flags_match_bombs());

        minefield.get_mut((0, 2)).unwrap().set_flagged(false);
        minefield.get_mut((1, 1)).unwrap().set_flagged(false);
        assert!(!minefield.flags_match_bombs());
    }

    #[test]
    fn bomb_count_is_tallied() {
        let minefield = field((3, 2), &[(0, 0), (2, 1)]);

        assert_eq!(minefield.bomb_count(), 2);
    }
}
