use super::board::Board;
use super::error::GameError;
use super::types::{Difficulty, Mark, Outcome, Position, Tally};
use super::win_detector::check_win_with_line;

/// One human-versus-computer session. The board is only changed through
/// [`TicTacToeGameState::apply_move`] and [`TicTacToeGameState::reset`].
#[derive(Debug, Clone)]
pub struct TicTacToeGameState {
    board: Board,
    human_mark: Mark,
    computer_mark: Mark,
    difficulty: Difficulty,
    current_mark: Mark,
    move_count: usize,
    outcome: Outcome,
    tally: Tally,
    last_move: Option<Position>,
}

impl TicTacToeGameState {
    /// The human always moves first, whichever symbol they picked.
    pub fn new_game(
        board_size: usize,
        human_mark: Mark,
        difficulty: Difficulty,
    ) -> Result<Self, GameError> {
        let board = Board::new(board_size)?;
        let computer_mark = human_mark.opponent().ok_or_else(|| {
            GameError::InvalidConfiguration("Human must play X or O".to_string())
        })?;

        Ok(Self {
            board,
            human_mark,
            computer_mark,
            difficulty,
            current_mark: human_mark,
            move_count: 0,
            outcome: Outcome::InProgress,
            tally: Tally::default(),
            last_move: None,
        })
    }

    pub fn apply_move(
        &mut self,
        row: usize,
        col: usize,
        player: Mark,
    ) -> Result<Outcome, GameError> {
        if !self.board.contains(row, col) {
            return Err(GameError::OutOfBounds {
                row,
                col,
                size: self.board.size(),
            });
        }

        let pos = Position::new(row, col);
        if !self.board.is_empty_at(pos) {
            return Err(GameError::CellOccupied(pos));
        }

        if self.outcome.is_over() {
            return Err(GameError::GameAlreadyOver);
        }

        if player != self.current_mark {
            return Err(GameError::NotPlayersTurn {
                expected: self.current_mark,
                got: player,
            });
        }

        self.board.set(pos, player);
        self.move_count += 1;
        self.last_move = Some(pos);

        self.check_game_over();

        if !self.outcome.is_over() {
            self.switch_turn();
        }

        Ok(self.outcome.clone())
    }

    pub fn reset(&mut self) {
        self.board.clear();
        self.move_count = 0;
        self.outcome = Outcome::InProgress;
        self.current_mark = self.human_mark;
        self.last_move = None;
    }

    pub fn record_win(&mut self, winner: Mark) -> Result<(), GameError> {
        if winner == self.human_mark {
            self.tally.human_wins += 1;
        } else if winner == self.computer_mark {
            self.tally.computer_wins += 1;
        } else {
            return Err(GameError::InvalidPlayer(winner));
        }
        Ok(())
    }

    fn switch_turn(&mut self) {
        self.current_mark = if self.current_mark == self.human_mark {
            self.computer_mark
        } else {
            self.human_mark
        };
    }

    fn check_game_over(&mut self) {
        if let Some(line) = check_win_with_line(&self.board) {
            self.outcome = line.into();
            return;
        }

        if self.move_count == self.board.cell_count() {
            self.outcome = Outcome::Tie;
        }
    }

    pub fn side_to_move(&self) -> Mark {
        self.current_mark
    }

    pub fn is_computer_turn(&self) -> bool {
        !self.outcome.is_over() && self.current_mark == self.computer_mark
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_over()
    }

    pub fn winner(&self) -> Option<Mark> {
        self.outcome.winner()
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn snapshot(&self) -> Board {
        self.board
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    pub fn move_count(&self) -> usize {
        self.move_count
    }

    pub fn last_move(&self) -> Option<Position> {
        self.last_move
    }

    pub fn board_size(&self) -> usize {
        self.board.size()
    }

    pub fn win_length(&self) -> usize {
        self.board.win_length()
    }

    pub fn human_mark(&self) -> Mark {
        self.human_mark
    }

    pub fn computer_mark(&self) -> Mark {
        self.computer_mark
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}
