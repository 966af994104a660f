use alloc::vec::Vec;
use ndarray::Array2;
use rand::prelude::*;

use super::*;

/// Purely random placement: every set of `mines` distinct cells is equally likely.
///
/// Owns its RNG so consecutive games (e.g. after a reset) get fresh layouts
/// while the whole sequence stays reproducible from the seed.
#[derive(Clone, Debug)]
pub struct RandomLayoutGenerator {
    rng: SmallRng,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64) -> Self {
        Self::from_rng(SmallRng::seed_from_u64(seed))
    }

    pub fn from_rng(rng: SmallRng) -> Self {
        Self { rng }
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(&mut self, config: GameConfig) -> Result<MineLayout> {
        config.validate()?;

        let (rows, columns) = config.size;
        let mut indices: Vec<CellCount> = (0..config.total_cells()).collect();
        let (chosen, _) = indices.partial_shuffle(&mut self.rng, config.mines.into());

        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        for &index in chosen.iter() {
            let row = index / CellCount::from(columns);
            let column = index % CellCount::from(columns);
            mine_mask[[usize::from(row), usize::from(column)]] = true;
        }

        log::debug!(
            "Generated {}x{} layout with {} mines",
            rows,
            columns,
            config.mines
        );
        MineLayout::from_mine_mask(mine_mask)
    }
}
