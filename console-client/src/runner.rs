use std::io::{self, BufRead, Write};

use tictactoe_common::games::SessionRng;
use tictactoe_common::games::tictactoe::{
    Difficulty, GameError, GameSettings, Mark, Outcome, TicTacToeGameState, choose_move,
};
use tictactoe_common::log;

use crate::command::{Command, HELP, parse_command};

/// Drives one console session: forwards typed moves to the game, answers
/// with the computer's move and keeps the score line.
pub struct ConsoleRunner<W: Write> {
    settings: GameSettings,
    game: TicTacToeGameState,
    rng: SessionRng,
    out: W,
}

impl<W: Write> ConsoleRunner<W> {
    pub fn new(settings: GameSettings, rng: SessionRng, out: W) -> Result<Self, GameError> {
        let game = settings.create_game()?;
        Ok(Self {
            settings,
            game,
            rng,
            out,
        })
    }

    pub fn game(&self) -> &TicTacToeGameState {
        &self.game
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub fn run<R: BufRead>(&mut self, input: R) -> io::Result<()> {
        self.print_intro()?;
        self.print_board()?;

        let mut lines = input.lines();
        loop {
            if self.game.is_computer_turn() {
                self.play_computer_turn()?;
                continue;
            }

            self.print_prompt()?;
            let Some(line) = lines.next().transpose()? else {
                log!("Input closed, leaving");
                break;
            };

            match parse_command(&line) {
                Ok(Command::Place { row, col }) => self.play_human_turn(row, col)?,
                Ok(Command::Reset) => {
                    self.game.reset();
                    log!("Board reset");
                    self.print_board()?;
                }
                Ok(Command::NewGame {
                    board_size,
                    play_as,
                    difficulty,
                }) => self.start_new_game(board_size, play_as, difficulty)?,
                Ok(Command::Help) => writeln!(self.out, "{}", HELP)?,
                Ok(Command::Quit) => break,
                Err(message) => writeln!(self.out, "{}", message)?,
            }
        }

        self.print_score()?;
        self.out.flush()
    }

    fn play_human_turn(&mut self, row: usize, col: usize) -> io::Result<()> {
        match self.game.apply_move(row, col, self.game.human_mark()) {
            Ok(outcome) => {
                log!("Human played ({}, {})", row, col);
                self.after_move(outcome)
            }
            Err(e) => writeln!(self.out, "{}", e),
        }
    }

    fn play_computer_turn(&mut self) -> io::Result<()> {
        let result = choose_move(
            &self.game.snapshot(),
            self.game.computer_mark(),
            self.game.human_mark(),
            self.game.difficulty(),
            &mut self.rng,
        )
        .and_then(|pos| {
            log!("Computer ({}) chose {}", self.game.difficulty(), pos);
            self.game.apply_move(pos.row, pos.col, self.game.computer_mark())
        });

        match result {
            Ok(outcome) => self.after_move(outcome),
            Err(e) => {
                // Only reachable if the game state and the search disagree.
                log!("Computer move failed: {}", e);
                Err(io::Error::other(e))
            }
        }
    }

    fn after_move(&mut self, outcome: Outcome) -> io::Result<()> {
        self.print_board()?;

        match outcome {
            Outcome::InProgress => Ok(()),
            Outcome::Tie => {
                log!("Game tied after {} moves", self.game.move_count());
                writeln!(self.out, "Tie")?;
                self.print_finished_hint()
            }
            Outcome::Win { player, cells } => {
                if let Err(e) = self.game.record_win(player) {
                    log!("Could not record win: {}", e);
                    return Err(io::Error::other(e));
                }
                log!("{} won on {:?}", player, cells);
                let who = if player == self.game.human_mark() {
                    "You"
                } else {
                    "Computer"
                };
                let line: Vec<String> = cells.iter().map(|c| c.to_string()).collect();
                writeln!(self.out, "{} ({}) won, line: {}", who, player, line.join(" "))?;
                self.print_score()?;
                self.print_finished_hint()
            }
        }
    }

    fn start_new_game(
        &mut self,
        board_size: Option<usize>,
        play_as: Option<Mark>,
        difficulty: Option<Difficulty>,
    ) -> io::Result<()> {
        let settings = GameSettings {
            board_size: board_size.unwrap_or(self.settings.board_size),
            play_as: play_as.unwrap_or(self.settings.play_as),
            difficulty: difficulty.unwrap_or(self.settings.difficulty),
        };

        match settings.create_game() {
            Ok(game) => {
                log!(
                    "New game: {}x{}, human plays {}, {}",
                    game.board_size(),
                    game.board_size(),
                    game.human_mark(),
                    game.difficulty()
                );
                self.settings = settings;
                self.game = game;
                self.print_intro()?;
                self.print_board()
            }
            Err(e) => writeln!(self.out, "{}", e),
        }
    }

    fn print_intro(&mut self) -> io::Result<()> {
        let size = self.game.board_size();
        writeln!(
            self.out,
            "Tic-Tac-Toe {}x{} ({} in a row wins), you play {}, difficulty {}",
            size,
            size,
            self.game.win_length(),
            self.game.human_mark(),
            self.game.difficulty()
        )?;
        if size != self.settings.board_size {
            writeln!(self.out, "Hard is only available on the 3x3 board")?;
        }
        Ok(())
    }

    fn print_board(&mut self) -> io::Result<()> {
        write!(self.out, "{}", self.game.board())
    }

    fn print_prompt(&mut self) -> io::Result<()> {
        if !self.game.is_over() {
            write!(self.out, "{}'s turn > ", self.game.side_to_move())?;
        } else {
            write!(self.out, "> ")?;
        }
        self.out.flush()
    }

    fn print_finished_hint(&mut self) -> io::Result<()> {
        writeln!(self.out, "Type 'reset' to play again, 'new' to change settings")
    }

    fn print_score(&mut self) -> io::Result<()> {
        let tally = self.game.tally();
        writeln!(
            self.out,
            "Human: {}  Computer: {}",
            tally.human_wins, tally.computer_wins
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_common::games::tictactoe::Tally;

    fn run_script(settings: GameSettings, seed: u64, script: &str) -> (TicTacToeGameState, String) {
        let mut runner = ConsoleRunner::new(settings, SessionRng::new(seed), Vec::new()).unwrap();
        runner.run(script.as_bytes()).unwrap();
        let game = runner.game().clone();
        let output = String::from_utf8(runner.into_output()).unwrap();
        (game, output)
    }

    fn hard_as_x() -> GameSettings {
        GameSettings {
            board_size: 3,
            play_as: Mark::X,
            difficulty: Difficulty::Hard,
        }
    }

    #[test]
    fn test_quit_prints_score() {
        let (game, output) = run_script(GameSettings::default(), 1, "quit\n");

        assert!(output.contains("you play X"));
        assert!(output.contains("Human: 0  Computer: 0"));
        assert_eq!(game.move_count(), 0);
    }

    #[test]
    fn test_computer_answers_human_move() {
        let (game, _) = run_script(hard_as_x(), 1, "1 1\nquit\n");

        assert_eq!(game.move_count(), 2);
        assert_eq!(game.side_to_move(), Mark::X);
    }

    #[test]
    fn test_bad_input_is_reported_and_ignored() {
        let (game, output) = run_script(hard_as_x(), 1, "7 7\nhello\n1 1\n1 1\nquit\n");

        assert!(output.contains("outside the 3x3 board"));
        assert!(output.contains("Unknown command"));
        assert!(output.contains("already marked"));
        assert_eq!(game.move_count(), 2);
    }

    #[test]
    fn test_hard_game_ends_without_human_win() {
        let mut script = String::new();
        for row in 0..3 {
            for col in 0..3 {
                script.push_str(&format!("{} {}\n", row, col));
            }
        }
        script.push_str("quit\n");

        let (game, output) = run_script(hard_as_x(), 1, &script);

        assert!(game.is_over());
        assert_ne!(game.winner(), Some(Mark::X));
        assert_eq!(game.tally().human_wins, 0);
        let computer_wins = if game.winner() == Some(Mark::O) { 1 } else { 0 };
        assert_eq!(game.tally().computer_wins, computer_wins);
        assert!(output.contains("Type 'reset' to play again"));
    }

    #[test]
    fn test_human_win_is_counted_once_and_survives_reset() {
        // On 4x4 Medium answers (1, 1) with (0, 0), then can only block one
        // end of the open pair and takes the first cell it scans.
        let settings = GameSettings {
            board_size: 4,
            play_as: Mark::X,
            difficulty: Difficulty::Medium,
        };

        let (game, output) = run_script(settings, 1, "1 1\n1 2\n1 0\n1 3\nreset\nquit\n");

        assert!(output.contains("You (X) won"));
        assert!(output.contains("Game is already over"));
        assert_eq!(game.tally(), Tally { human_wins: 1, computer_wins: 0 });
        assert_eq!(game.move_count(), 0);
        assert!(output.ends_with("Human: 1  Computer: 0\n"));
    }

    #[test]
    fn test_reset_keeps_score() {
        let (game, output) = run_script(hard_as_x(), 1, "1 1\nreset\nquit\n");

        assert_eq!(game.move_count(), 0);
        assert_eq!(game.outcome(), &Outcome::InProgress);
        assert_eq!(game.tally(), Tally::default());
        assert!(output.matches("   0 1 2").count() >= 3);
    }

    #[test]
    fn test_new_game_switches_settings() {
        let (game, output) = run_script(GameSettings::default(), 1, "new 5 o easy\nquit\n");

        assert_eq!(game.board_size(), 5);
        assert_eq!(game.human_mark(), Mark::O);
        assert_eq!(game.difficulty(), Difficulty::Easy);
        assert!(output.contains("4 in a row wins"));
    }

    #[test]
    fn test_new_hard_game_falls_back_to_three_by_three() {
        let (game, output) = run_script(GameSettings::default(), 1, "new 4 hard\nquit\n");

        assert_eq!(game.board_size(), 3);
        assert!(output.contains("Hard is only available on the 3x3 board"));
    }

    #[test]
    fn test_new_game_with_bad_size_keeps_current_game() {
        let (game, output) = run_script(GameSettings::default(), 1, "new 9\nquit\n");

        assert_eq!(game.board_size(), 3);
        assert!(output.contains("Invalid configuration"));
    }

    #[test]
    fn test_end_of_input_stops_session() {
        let (game, _) = run_script(GameSettings::default(), 1, "0 0\n");

        assert_eq!(game.move_count(), 2);
    }
}
