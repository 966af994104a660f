use ndarray::Array2;
use smallvec::SmallVec;

use crate::*;

/// Fixed-size board of [`Cell`]s with mines and adjacency counts baked in.
///
/// Mine placement and counts never change after construction; only the
/// engine flips the per-cell reveal/flag state.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl Grid {
    pub fn from_layout(layout: &MineLayout) -> Self {
        let cells = Array2::from_shape_fn(layout.size().to_nd_index(), |(row, column)| {
            let coords = (row as Coord, column as Coord);
            if layout.contains_mine(coords) {
                Cell::new(coords, true, 0)
            } else {
                Cell::new(coords, false, layout.adjacent_mine_count(coords))
            }
        });

        Self {
            cells,
            mine_count: layout.mine_count(),
        }
    }

    /// Draws a layout for `config` from `generator` and builds the grid from it.
    pub fn generate<G>(config: GameConfig, generator: &mut G) -> Result<Self>
    where
        G: LayoutGenerator + ?Sized,
    {
        config.validate()?;
        let layout = generator.generate(config)?;

        let actual = layout.game_config();
        if actual != config {
            log::warn!(
                "Generated layout mismatch, actual: {:?}, requested: {:?}",
                actual,
                config
            );
            return Err(GameError::InvalidConfiguration(
                ConfigProblem::LayoutMismatch,
            ));
        }

        Ok(Self::from_layout(&layout))
    }

    pub fn size(&self) -> Coord2 {
        array_size(&self.cells)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn columns(&self) -> Coord {
        self.size().1
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len() as CellCount
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, columns) = self.size();
        if coords.0 < rows && coords.1 < columns {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds { coords })
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&self.cells[coords.to_nd_index()])
    }

    /// In-bounds neighbours of `coords`, at most 8.
    pub fn neighbors_of(&self, coords: Coord2) -> Result<SmallVec<[Coord2; 8]>> {
        let coords = self.validate_coords(coords)?;
        Ok(self.iter_neighbors(coords).collect())
    }

    /// Row-major iteration over every cell.
    pub fn iter_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn flagged_count(&self) -> CellCount {
        self.iter_cells().filter(|cell| cell.is_flagged()).count() as CellCount
    }

    pub fn revealed_safe_count(&self) -> CellCount {
        self.iter_cells()
            .filter(|cell| cell.is_revealed() && !cell.is_mine())
            .count() as CellCount
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// Callers must have validated `coords`.
    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }

    pub(crate) fn cell(&self, coords: Coord2) -> &Cell {
        &self.cells[coords.to_nd_index()]
    }
}
