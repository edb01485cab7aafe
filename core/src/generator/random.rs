use super::*;

/// Purely random layout: each cell is a bomb with probability [`GameConfig::bomb_probability`], independently of
/// every other cell. The realised bomb count varies between seeds.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig) -> Result<Minefield> {
        use rand::prelude::*;

        let config = config.validate()?;
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let minefield = Minefield::build(config.size, config.geometry(), |_| {
            rng.random_bool(config.bomb_probability)
        });

        let expected = f64::from(minefield.total_cells()) * config.bomb_probability;
        log::debug!(
            "Seed {} placed {} bombs, expected about {:.1}",
            self.seed,
            minefield.bomb_count(),
            expected
        );
        Ok(minefield)
    }
}
