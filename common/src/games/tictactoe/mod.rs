mod board;
mod bot_controller;
mod error;
mod game_state;
mod settings;
mod types;
mod win_detector;

pub use board::{Board, MAX_BOARD_SIZE, MIN_BOARD_SIZE, validate_board_size, win_length_for};
pub use bot_controller::{WIN_SCORE, choose_move, score_moves};
pub use error::GameError;
pub use game_state::TicTacToeGameState;
pub use settings::GameSettings;
pub use types::{
    Difficulty, MEDIUM_DEPTH_LIMIT, Mark, Outcome, Position, SearchDepth, Tally, WinningLine,
};
pub use win_detector::{check_win, check_win_with_line};
