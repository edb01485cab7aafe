use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Single grid axis. Signed so that positions left of or above the board still map to a coordinate.
pub type Coord = i32;

/// Count type used for bomb counts and total-cell counts.
pub type CellCount = u32;

/// Two-dimensional grid coordinates `(column, row)`.
pub type Coord2 = (Coord, Coord);

/// Coordinates of a 3×3 neighbourhood, at most nine entries.
pub type Neighbors = SmallVec<[Coord2; 9]>;

/// Continuous position in world/pixel space.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
}

impl WorldPos {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self, bounds: Coord2) -> Option<Self::Output>;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self, (max_x, max_y): Coord2) -> Option<Self::Output> {
        let (x, y) = self;
        if (0..max_x).contains(&x) && (0..max_y).contains(&y) {
            Some([x as usize, y as usize])
        } else {
            None
        }
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = if a < 0 { 0 } else { a as CellCount };
    let b = if b < 0 { 0 } else { b as CellCount };
    a.saturating_mul(b)
}

// The centre is part of the box, so bomb cells count themselves.
const DISPLACEMENTS: [(Coord, Coord); 9] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (0, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// All in-bounds coordinates with `|dx| <= 1` and `|dy| <= 1` around `center`, `center` included.
pub fn neighborhood(center: Coord2, bounds: Coord2) -> Neighbors {
    let (x, y) = center;
    DISPLACEMENTS
        .iter()
        .map(|&(dx, dy)| (x.saturating_add(dx), y.saturating_add(dy)))
        .filter(|&pos| pos.to_nd_index(bounds).is_some())
        .collect()
}

pub trait NeighborhoodExt {
    fn neighborhood(&self, center: Coord2) -> Neighbors;
}

impl<T> NeighborhoodExt for Array2<T> {
    fn neighborhood(&self, center: Coord2) -> Neighbors {
        let (w, h) = self.dim();
        let bounds = (
            w.try_into().unwrap_or(Coord::MAX),
            h.try_into().unwrap_or(Coord::MAX),
        );
        neighborhood(center, bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_neighborhood_is_full_box() {
        let cells = neighborhood((1, 1), (3, 3));
        assert_eq!(cells.len(), 9);
        assert!(cells.contains(&(1, 1)));
    }

    #[test]
    fn corner_neighborhood_is_clipped() {
        let cells = neighborhood((0, 0), (3, 3));
        assert_eq!(cells.as_slice(), &[(0, 0), (1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn out_of_bounds_coords_have_no_index() {
        assert_eq!((-1, 0).to_nd_index((3, 3)), None);
        assert_eq!((0, 3).to_nd_index((3, 3)), None);
        assert_eq!((2, 1).to_nd_index((3, 3)), Some([2, 1]));
    }
}
