use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    /// Game ended and no moves are accepted anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Plays one game at a time on a grid drawn from `G`.
pub struct GameEngine<G = RandomLayoutGenerator> {
    config: GameConfig,
    grid: Grid,
    generator: G,
    status: GameStatus,
    revealed_count: CellCount,
    triggered_mine: Option<Coord2>,
    observers: Vec<Box<dyn StatusObserver>>,
}

impl GameEngine {
    pub fn create(rows: Coord, columns: Coord, mines: CellCount, seed: u64) -> Result<Self> {
        Self::new(GameConfig::new((rows, columns), mines)?, seed)
    }

    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_generator(config, RandomLayoutGenerator::new(seed))
    }
}

impl<G: LayoutGenerator> GameEngine<G> {
    pub fn with_generator(config: GameConfig, mut generator: G) -> Result<Self> {
        let grid = Grid::generate(config, &mut generator)?;
        log::debug!(
            "New game {}x{} with {} mines",
            config.rows(),
            config.columns(),
            config.mines
        );

        Ok(Self {
            config,
            grid,
            generator,
            status: GameStatus::InProgress,
            revealed_count: 0,
            triggered_mine: None,
            observers: Vec::new(),
        })
    }

    /// Replaces the grid with a freshly generated one and starts over.
    ///
    /// Observers stay subscribed. If the generator fails nothing is changed.
    pub fn reset(&mut self) -> Result<()> {
        let grid = Grid::generate(self.config, &mut self.generator)?;

        self.grid = grid;
        self.status = GameStatus::InProgress;
        self.revealed_count = 0;
        self.triggered_mine = None;
        log::debug!("Game reset");
        Ok(())
    }
}

impl<G> GameEngine<G> {
    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn mine_count(&self) -> CellCount {
        self.grid.mine_count()
    }

    /// Safe cells revealed so far.
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    /// Mine that ended the game, only set after a loss.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// How many mines have not been flagged yet, negative when over-flagged.
    pub fn flags_remaining(&self) -> isize {
        (self.grid.mine_count() as isize) - (self.grid.flagged_count() as isize)
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<CellView> {
        let show_mines = self.shows_mines();
        Ok(self.grid.cell_at(coords)?.view(show_mines))
    }

    /// Row-major views of every cell, for rendering the whole board.
    pub fn iter_cells(&self) -> impl Iterator<Item = CellView> + '_ {
        let show_mines = self.shows_mines();
        self.grid.iter_cells().map(move |cell| cell.view(show_mines))
    }

    pub fn neighbors_of(&self, coords: Coord2) -> Result<SmallVec<[Coord2; 8]>> {
        self.grid.neighbors_of(coords)
    }

    pub fn subscribe(&mut self, observer: impl StatusObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Flag or unflag an unrevealed cell.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.grid.validate_coords(coords)?;

        if self.status.is_finished() {
            return Ok(MarkOutcome::NoChange);
        }

        Ok(if self.grid.cell_mut(coords).toggle_flag() {
            MarkOutcome::Changed
        } else {
            MarkOutcome::NoChange
        })
    }

    /// Reveal a hidden cell, flood-filling from it if it has no adjacent mines.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.grid.validate_coords(coords)?;

        if self.status.is_finished() || !self.grid.cell(coords).is_hidden() {
            return Ok(RevealOutcome::NoChange);
        }

        let cell = self.grid.cell_mut(coords);
        cell.reveal();
        let (is_mine, adjacent_mines) = (cell.is_mine(), cell.adjacent_mines());

        if is_mine {
            log::debug!("Hit mine at {:?}", coords);
            self.triggered_mine = Some(coords);
            self.end_game(GameStatus::Lost);
            return Ok(RevealOutcome::HitMine);
        }

        self.revealed_count += 1;
        log::debug!("Revealed {:?}, adjacent mines: {}", coords, adjacent_mines);

        if adjacent_mines == 0 {
            self.flood_fill(coords);
        }

        if self.revealed_count == self.grid.safe_cell_count() {
            self.end_game(GameStatus::Won);
            Ok(RevealOutcome::Won)
        } else {
            Ok(RevealOutcome::Revealed)
        }
    }

    /// Reveals the zero region around `start` plus its numbered border.
    ///
    /// A cell is marked revealed before it is pushed, so each one is visited
    /// at most once.
    fn flood_fill(&mut self, start: Coord2) {
        let mut to_expand = vec![start];

        while let Some(coords) = to_expand.pop() {
            for neighbor in self.grid.iter_neighbors(coords) {
                let cell = self.grid.cell_mut(neighbor);
                if !cell.is_hidden() {
                    continue;
                }
                debug_assert!(!cell.is_mine(), "zero cell next to a mine at {neighbor:?}");

                cell.reveal();
                self.revealed_count += 1;
                log::trace!(
                    "Flood revealed {:?}, adjacent mines: {}",
                    neighbor,
                    cell.adjacent_mines()
                );

                if cell.adjacent_mines() == 0 {
                    to_expand.push(neighbor);
                }
            }
        }
    }

    fn shows_mines(&self) -> bool {
        matches!(self.status, GameStatus::Lost)
    }

    fn end_game(&mut self, status: GameStatus) {
        if self.status.is_finished() {
            return;
        }

        self.status = status;
        log::debug!("Game ended: {:?}", status);
        for observer in self.observers.iter_mut() {
            observer.on_status_change(status);
        }
    }
}

impl<G> core::fmt::Debug for GameEngine<G> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GameEngine")
            .field("config", &self.config)
            .field("status", &self.status)
            .field("revealed_count", &self.revealed_count)
            .field("triggered_mine", &self.triggered_mine)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}
