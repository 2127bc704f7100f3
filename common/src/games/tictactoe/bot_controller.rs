use crate::games::SessionRng;
use super::board::Board;
use super::error::GameError;
use super::types::{Difficulty, Mark, Position, SearchDepth};
use super::win_detector::check_win;

pub const WIN_SCORE: i32 = 10;

#[derive(Debug, Clone, Copy)]
struct SearchContext {
    computer: Mark,
    human: Mark,
    depth_limit: SearchDepth,
}

impl SearchContext {
    fn new(computer: Mark, human: Mark, depth_limit: SearchDepth) -> Result<Self, GameError> {
        validate_marks(computer, human)?;
        Ok(Self {
            computer,
            human,
            depth_limit,
        })
    }
}

fn validate_marks(computer: Mark, human: Mark) -> Result<(), GameError> {
    if !computer.is_player() {
        return Err(GameError::InvalidPlayer(computer));
    }
    if !human.is_player() {
        return Err(GameError::InvalidPlayer(human));
    }
    if computer == human {
        return Err(GameError::InvalidConfiguration(format!(
            "Computer and human cannot both play {}",
            computer
        )));
    }
    Ok(())
}

/// Picks the computer's next cell. `board` is never modified; every branch
/// of the search works on its own copy.
pub fn choose_move(
    board: &Board,
    computer_mark: Mark,
    human_mark: Mark,
    difficulty: Difficulty,
    rng: &mut SessionRng,
) -> Result<Position, GameError> {
    if !board.has_empty_cell() {
        return Err(GameError::NoLegalMove);
    }

    match difficulty.depth_limit() {
        None => {
            validate_marks(computer_mark, human_mark)?;
            calculate_random_move(board, rng)
        }
        Some(depth_limit) => {
            let ctx = SearchContext::new(computer_mark, human_mark, depth_limit)?;
            calculate_minimax_move(board, &ctx)
        }
    }
}

/// Exact minimax value of every legal move, in row-major order.
pub fn score_moves(
    board: &Board,
    computer_mark: Mark,
    human_mark: Mark,
    depth_limit: SearchDepth,
) -> Result<Vec<(Position, i32)>, GameError> {
    let ctx = SearchContext::new(computer_mark, human_mark, depth_limit)?;
    let moves = board.available_moves();
    if moves.is_empty() {
        return Err(GameError::NoLegalMove);
    }

    Ok(moves
        .into_iter()
        .map(|pos| {
            let score = minimax(
                board.with_mark(pos, ctx.computer),
                0,
                false,
                &ctx,
                i32::MIN,
                i32::MAX,
            );
            (pos, score)
        })
        .collect())
}

fn calculate_random_move(board: &Board, rng: &mut SessionRng) -> Result<Position, GameError> {
    let available_moves = board.available_moves();
    rng.choose(&available_moves)
        .copied()
        .ok_or(GameError::NoLegalMove)
}

fn calculate_minimax_move(board: &Board, ctx: &SearchContext) -> Result<Position, GameError> {
    let mut best_move = None;
    let mut best_score = i32::MIN;

    for pos in board.available_moves() {
        // Anything at or below the current best is cut off early; it could
        // not replace the earlier cell anyway.
        let score = minimax(
            board.with_mark(pos, ctx.computer),
            0,
            false,
            ctx,
            best_score,
            i32::MAX,
        );

        if best_move.is_none() || score > best_score {
            best_score = score;
            best_move = Some(pos);
        }
    }

    best_move.ok_or(GameError::NoLegalMove)
}

fn evaluate(board: &Board, ctx: &SearchContext) -> i32 {
    match check_win(board) {
        Some(mark) if mark == ctx.computer => WIN_SCORE,
        Some(_) => -WIN_SCORE,
        None => 0,
    }
}

fn minimax(
    board: Board,
    depth: usize,
    is_maximizing: bool,
    ctx: &SearchContext,
    mut alpha: i32,
    mut beta: i32,
) -> i32 {
    let score = evaluate(&board, ctx);
    if score == WIN_SCORE {
        return score - depth as i32;
    }
    if score == -WIN_SCORE {
        return score + depth as i32;
    }
    if !board.has_empty_cell() {
        return 0;
    }
    if ctx.depth_limit.reached(depth) {
        return 0;
    }

    let moves = board.available_moves();

    if is_maximizing {
        let mut max_eval = i32::MIN;
        for pos in moves {
            let eval = minimax(
                board.with_mark(pos, ctx.computer),
                depth + 1,
                false,
                ctx,
                alpha,
                beta,
            );
            max_eval = max_eval.max(eval);
            alpha = alpha.max(eval);
            if beta <= alpha {
                break;
            }
        }
        max_eval
    } else {
        let mut min_eval = i32::MAX;
        for pos in moves {
            let eval = minimax(
                board.with_mark(pos, ctx.human),
                depth + 1,
                true,
                ctx,
                alpha,
                beta,
            );
            min_eval = min_eval.min(eval);
            beta = beta.min(eval);
            if beta <= alpha {
                break;
            }
        }
        min_eval
    }
}
