use tictactoe_common::games::tictactoe::{Difficulty, Mark};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Place {
        row: usize,
        col: usize,
    },
    Reset,
    NewGame {
        board_size: Option<usize>,
        play_as: Option<Mark>,
        difficulty: Option<Difficulty>,
    },
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  <row> <col>                 place your mark (0-based)
  reset                       clear the board, keep the score
  new [size] [X|O] [level]    start over, optionally with new settings
  help                        show this text
  quit                        leave";

pub fn parse_command(line: &str) -> Result<Command, String> {
    let tokens: Vec<&str> = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .collect();

    let Some(&first) = tokens.first() else {
        return Err("Type a move like '1 2', or 'help'".to_string());
    };

    match first.to_ascii_lowercase().as_str() {
        "reset" | "r" => expect_no_args(&tokens, Command::Reset),
        "help" | "h" | "?" => expect_no_args(&tokens, Command::Help),
        "quit" | "q" | "exit" => expect_no_args(&tokens, Command::Quit),
        "new" | "n" => parse_new_game(&tokens[1..]),
        _ => parse_place(&tokens),
    }
}

fn expect_no_args(tokens: &[&str], command: Command) -> Result<Command, String> {
    if tokens.len() > 1 {
        return Err(format!("'{}' takes no arguments", tokens[0]));
    }
    Ok(command)
}

fn parse_place(tokens: &[&str]) -> Result<Command, String> {
    let [row, col] = tokens else {
        return Err(format!("Unknown command '{}', type 'help'", tokens.join(" ")));
    };
    let row = row
        .parse::<usize>()
        .map_err(|_| format!("Row '{}' is not a number", row))?;
    let col = col
        .parse::<usize>()
        .map_err(|_| format!("Column '{}' is not a number", col))?;
    Ok(Command::Place { row, col })
}

fn parse_new_game(args: &[&str]) -> Result<Command, String> {
    let mut board_size = None;
    let mut play_as = None;
    let mut difficulty = None;

    for &arg in args {
        if let Ok(size) = arg.parse::<usize>() {
            board_size = Some(size);
        } else if let Ok(mark) = arg.parse::<Mark>() {
            if !mark.is_player() {
                return Err(format!("Cannot play as '{}'", arg));
            }
            play_as = Some(mark);
        } else {
            difficulty = Some(arg.parse::<Difficulty>()?);
        }
    }

    Ok(Command::NewGame {
        board_size,
        play_as,
        difficulty,
    })
}
