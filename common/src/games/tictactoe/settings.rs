use serde::{Deserialize, Serialize};

use crate::config::Validate;
use super::board::{MAX_BOARD_SIZE, MIN_BOARD_SIZE, validate_board_size};
use super::error::GameError;
use super::game_state::TicTacToeGameState;
use super::types::{Difficulty, Mark};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    pub board_size: usize,
    pub play_as: Mark,
    pub difficulty: Difficulty,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            board_size: MIN_BOARD_SIZE,
            play_as: Mark::X,
            difficulty: Difficulty::Medium,
        }
    }
}

impl GameSettings {
    /// Hard is only offered on 3x3: a full search of a bigger board does
    /// not finish in reasonable time. The engine itself accepts any size.
    pub fn effective_board_size(&self) -> usize {
        match self.difficulty {
            Difficulty::Hard => MIN_BOARD_SIZE,
            Difficulty::Easy | Difficulty::Medium => self.board_size,
        }
    }

    pub fn create_game(&self) -> Result<TicTacToeGameState, GameError> {
        TicTacToeGameState::new_game(self.effective_board_size(), self.play_as, self.difficulty)
    }
}

impl Validate for GameSettings {
    fn validate(&self) -> Result<(), String> {
        validate_board_size(self.board_size).map_err(|_| {
            format!(
                "board_size must be between {} and {}",
                MIN_BOARD_SIZE, MAX_BOARD_SIZE
            )
        })?;
        if !self.play_as.is_player() {
            return Err("play_as must be X or O".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(GameSettings::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut settings = GameSettings {
            board_size: 6,
            ..GameSettings::default()
        };
        assert!(settings.validate().is_err());

        settings.board_size = 4;
        settings.play_as = Mark::Empty;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_hard_forces_three_by_three() {
        let settings = GameSettings {
            board_size: 5,
            play_as: Mark::O,
            difficulty: Difficulty::Hard,
        };

        let game = settings.create_game().unwrap();

        assert_eq!(settings.effective_board_size(), 3);
        assert_eq!(game.board_size(), 3);
        assert_eq!(game.human_mark(), Mark::O);
    }

    #[test]
    fn test_medium_keeps_chosen_size() {
        let settings = GameSettings {
            board_size: 5,
            play_as: Mark::X,
            difficulty: Difficulty::Medium,
        };

        let game = settings.create_game().unwrap();

        assert_eq!(game.board_size(), 5);
        assert_eq!(game.win_length(), 4);
    }
}
