use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

pub trait MinefieldGenerator {
    fn generate(self, config: GameConfig) -> Result<Minefield>;
}
