use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("coordinates outside the board")]
    InvalidCoords,
    #[error("mine layout leaves no safe cell")]
    TooManyMines,
}

pub type Result<T> = std::result::Result<T, GameError>;
