use crate::*;
pub use random::*;

mod random;

/// Source of mine layouts, consulted once per game.
pub trait LayoutGenerator {
    fn generate(&mut self, config: GameConfig) -> Result<MineLayout>;
}

/// Lets tests and replays inject layouts with a closure.
impl<F> LayoutGenerator for F
where
    F: FnMut(GameConfig) -> Result<MineLayout>,
{
    fn generate(&mut self, config: GameConfig) -> Result<MineLayout> {
        self(config)
    }
}
