use thiserror::Error;

use crate::{CellCount, Coord2};

/// Why a set of construction parameters was rejected.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigProblem {
    #[error("rows and columns must be at least 1")]
    EmptyDimension,
    #[error("rows and columns must be at most 255")]
    DimensionTooLarge,
    #[error("{mines} mines leave no safe cell on a board of {total}")]
    TooManyMines { mines: CellCount, total: CellCount },
    /// A generator produced a layout that does not match the requested config.
    #[error("mine layout does not match the configuration")]
    LayoutMismatch,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(ConfigProblem),
    #[error("Coordinates {coords:?} are out of bounds")]
    OutOfBounds { coords: Coord2 },
}

pub type Result<T> = core::result::Result<T, GameError>;
