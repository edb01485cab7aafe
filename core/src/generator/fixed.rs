use super::*;

/// Places bombs exactly at the given coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedLayoutGenerator {
    bombs: Vec<Coord2>,
}

impl FixedLayoutGenerator {
    pub fn new(bombs: impl IntoIterator<Item = Coord2>) -> Self {
        Self {
            bombs: bombs.into_iter().collect(),
        }
    }
}

impl MinefieldGenerator for FixedLayoutGenerator {
    fn generate(self, config: GameConfig) -> Result<Minefield> {
        let config = config.validate()?;
        if let Some(&outside) = self
            .bombs
            .iter()
            .find(|coords| coords.to_nd_index(config.size).is_none())
        {
            log::warn!("Bomb {:?} lies outside of {:?}", outside, config.size);
            return Err(GameError::InvalidCoords);
        }

        Ok(Minefield::build(config.size, config.geometry(), |coords| {
            self.bombs.contains(&coords)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_listed_bombs_only() {
        let config = GameConfig::new((4, 4), GridGeometry::default(), 0.0);
        let minefield = FixedLayoutGenerator::new([(0, 0), (3, 2)])
            .generate(config)
            .unwrap();

        assert_eq!(minefield.bomb_count(), 2);
        assert!(minefield[(0, 0)].is_bomb());
        assert!(minefield[(3, 2)].is_bomb());
        assert!(!minefield[(1, 1)].is_bomb());
    }

    #[test]
    fn rejects_bombs_outside_the_board() {
        let config = GameConfig::new((2, 2), GridGeometry::default(), 0.0);
        let result = FixedLayoutGenerator::new([(2, 0)]).generate(config);

        assert_eq!(result, Err(GameError::InvalidCoords));
    }

    #[test]
    fn rejects_geometry_that_misplaces_cells() {
        let config = GameConfig::new((15, 15), GridGeometry::new(0.7, 0.2), 0.0);
        let result = FixedLayoutGenerator::new([(0, 13)]).generate(config);

        assert!(matches!(result, Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn custom_geometry_looks_up_every_cell() {
        let geometry = GridGeometry::new(24.0, 6.0);
        let config = GameConfig::new((15, 15), geometry, 0.0);
        let minefield = FixedLayoutGenerator::new([(0, 13)]).generate(config).unwrap();

        for cell in minefield.iter() {
            let placed_at = geometry.to_world(cell.grid_pos());
            assert_eq!(minefield.coords_at(placed_at), Some(cell.grid_pos()));
        }
        assert!(minefield.cell_at(geometry.cell_center((0, 13))).unwrap().is_bomb());
    }
}
