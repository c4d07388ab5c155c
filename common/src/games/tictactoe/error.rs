use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Contract violation by the caller of the engine.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Move rejected by the game session.
    #[error("Illegal move: {0}")]
    IllegalMove(String),
}

pub type GameResult<T> = std::result::Result<T, GameError>;
