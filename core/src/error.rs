use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Grid must have at least one row and one column")]
    InvalidDimension,
    #[error("Start probability must be within [0, 1]")]
    InvalidProbability,
    #[error("Coordinates are outside the grid")]
    OutOfBounds,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Coordinates must be written as row-col")]
    MalformedCoords,
    #[error("Game already won, no new moves are accepted")]
    AlreadyWon,
}

pub type Result<T> = core::result::Result<T, GameError>;
