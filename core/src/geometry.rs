use serde::{Deserialize, Serialize};

use crate::*;

/// Maps world positions onto grid coordinates.
///
/// Placement and pointer lookup both go through this type, so a pixel inside a cell always maps back to the
/// coordinate the cell was created with.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    pub cell_size: f32,
    pub offset: f32,
}

impl GridGeometry {
    pub const fn new(cell_size: f32, offset: f32) -> Self {
        Self { cell_size, offset }
    }

    pub fn to_grid(&self, position: WorldPos) -> Coord2 {
        to_grid(position, self.cell_size, self.offset)
    }

    pub fn to_world(&self, coords: Coord2) -> WorldPos {
        to_world(coords, self.cell_size, self.offset)
    }

    /// Whether every cell of a `size` board maps back onto its own coordinates from where it is placed.
    pub fn round_trips(&self, (width, height): Coord2) -> bool {
        (0..width).all(|x| (0..height).all(|y| self.to_grid(self.to_world((x, y))) == (x, y)))
    }

    /// Centre of the cell at `coords`, where effects like the explosion are anchored.
    pub fn cell_center(&self, coords: Coord2) -> WorldPos {
        let corner = self.to_world(coords);
        let half = self.cell_size / 2.0;
        WorldPos::new(corner.x + half, corner.y + half)
    }
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self::new(32.0, 10.0)
    }
}

pub fn to_grid(position: WorldPos, cell_size: f32, offset: f32) -> Coord2 {
    (
        ((position.x - offset) / cell_size).floor() as Coord,
        ((position.y - offset) / cell_size).floor() as Coord,
    )
}

pub fn to_world((x, y): Coord2, cell_size: f32, offset: f32) -> WorldPos {
    WorldPos::new(x as f32 * cell_size + offset, y as f32 * cell_size + offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_round_trips_through_mapper() {
        let geometry = GridGeometry::new(32.0, 10.0);
        for x in 0..15 {
            for y in 0..15 {
                assert_eq!(geometry.to_grid(geometry.to_world((x, y))), (x, y));
            }
        }
    }

    #[test]
    fn inexact_cell_sizes_can_misplace_cells() {
        assert!(GridGeometry::new(24.0, 6.0).round_trips((15, 15)));
        assert!(!GridGeometry::new(0.7, 0.2).round_trips((15, 15)));
    }

    #[test]
    fn any_pixel_inside_a_cell_maps_to_it() {
        let geometry = GridGeometry::new(32.0, 10.0);
        assert_eq!(geometry.to_grid(WorldPos::new(10.0, 10.0)), (0, 0));
        assert_eq!(geometry.to_grid(WorldPos::new(41.9, 41.9)), (0, 0));
        assert_eq!(geometry.to_grid(WorldPos::new(42.0, 10.0)), (1, 0));
    }

    #[test]
    fn positions_before_the_offset_floor_to_negative() {
        assert_eq!(to_grid(WorldPos::new(9.0, 0.0), 32.0, 10.0), (-1, -1));
    }

    #[test]
    fn center_is_half_a_cell_from_corner() {
        let geometry = GridGeometry::new(32.0, 10.0);
        assert_eq!(geometry.cell_center((1, 2)), WorldPos::new(58.0, 90.0));
    }
}
