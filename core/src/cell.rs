use serde::{Deserialize, Serialize};

use crate::{Coord, Coord2};

/// Player-driven state of a cell. Revealed and flagged are mutually exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Hidden,
    Flagged,
    Revealed,
}

/// One position on the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    coords: Coord2,
    is_mine: bool,
    adjacent_mines: u8,
    state: CellState,
}

impl Cell {
    pub(crate) const fn new(coords: Coord2, is_mine: bool, adjacent_mines: u8) -> Self {
        Self {
            coords,
            is_mine,
            adjacent_mines,
            state: CellState::Hidden,
        }
    }

    pub const fn coords(&self) -> Coord2 {
        self.coords
    }

    pub const fn row(&self) -> Coord {
        self.coords.0
    }

    pub const fn column(&self) -> Coord {
        self.coords.1
    }

    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    /// Mines among the bounds-clipped neighbours, always 0 on mine cells.
    pub const fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }

    pub const fn state(&self) -> CellState {
        self.state
    }

    pub const fn is_revealed(&self) -> bool {
        matches!(self.state, CellState::Revealed)
    }

    pub const fn is_flagged(&self) -> bool {
        matches!(self.state, CellState::Flagged)
    }

    /// Hidden and not flagged, the only state a reveal acts on.
    pub(crate) const fn is_hidden(&self) -> bool {
        matches!(self.state, CellState::Hidden)
    }

    pub(crate) fn reveal(&mut self) {
        self.state = CellState::Revealed;
    }

    /// Returns `false` when the cell is revealed and nothing changed.
    pub(crate) fn toggle_flag(&mut self) -> bool {
        self.state = match self.state {
            CellState::Hidden => CellState::Flagged,
            CellState::Flagged => CellState::Hidden,
            CellState::Revealed => return false,
        };
        true
    }

    /// Projects the cell for callers, hiding the mine unless `show_mine` or revealed.
    pub(crate) fn view(&self, show_mine: bool) -> CellView {
        let revealed = self.is_revealed();
        CellView {
            coords: self.coords,
            revealed,
            flagged: self.is_flagged(),
            mine: (revealed || show_mine).then_some(self.is_mine),
            adjacent_mines: (revealed && !self.is_mine).then_some(self.adjacent_mines),
        }
    }
}

/// What a caller is allowed to know about a cell.
///
/// `mine` is only known once the cell is revealed or the game is lost, and
/// `adjacent_mines` only for revealed safe cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub coords: Coord2,
    pub revealed: bool,
    pub flagged: bool,
    pub mine: Option<bool>,
    pub adjacent_mines: Option<u8>,
}

impl CellView {
    /// Revealed mine, the one that ended the game.
    pub const fn is_exploded(&self) -> bool {
        self.revealed && matches!(self.mine, Some(true))
    }
}
