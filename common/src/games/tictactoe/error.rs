use super::types::{Mark, Position};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    InvalidConfiguration(String),
    InvalidPlayer(Mark),
    OutOfBounds { row: usize, col: usize, size: usize },
    CellOccupied(Position),
    NotPlayersTurn { expected: Mark, got: Mark },
    GameAlreadyOver,
    NoLegalMove,
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::InvalidConfiguration(reason) => {
                write!(f, "Invalid configuration: {}", reason)
            }
            GameError::InvalidPlayer(mark) => {
                write!(f, "'{}' is not a player, expected X or O", mark)
            }
            GameError::OutOfBounds { row, col, size } => {
                write!(f, "Position ({}, {}) is outside the {}x{} board", row, col, size, size)
            }
            GameError::CellOccupied(pos) => write!(f, "Cell {} is already marked", pos),
            GameError::NotPlayersTurn { expected, got } => {
                write!(f, "Not {}'s turn, {} to move", got, expected)
            }
            GameError::GameAlreadyOver => write!(f, "Game is already over"),
            GameError::NoLegalMove => write!(f, "No empty cell left to play"),
        }
    }
}

impl std::error::Error for GameError {}
