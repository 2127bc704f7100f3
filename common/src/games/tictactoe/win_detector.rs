use super::board::Board;
use super::types::{Mark, Position, WinningLine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    mark: Mark,
    start: Position,
    d_row: isize,
    d_col: isize,
}

pub fn check_win(board: &Board) -> Option<Mark> {
    find_run(board).map(|run| run.mark)
}

/// Rows are scanned first, then columns, then the down-right diagonals, then
/// the down-left ones; the first complete run wins.
pub fn check_win_with_line(board: &Board) -> Option<WinningLine> {
    let run = find_run(board)?;
    let cells = (0..board.win_length() as isize)
        .map(|i| {
            Position::new(
                run.start.row.wrapping_add_signed(run.d_row * i),
                run.start.col.wrapping_add_signed(run.d_col * i),
            )
        })
        .collect();
    Some(WinningLine::new(run.mark, cells))
}

fn find_run(board: &Board) -> Option<Run> {
    let size = board.size();
    let length = board.win_length();
    if length > size {
        return None;
    }
    let last_start = size - length;

    for row in 0..size {
        for col in 0..=last_start {
            if let Some(run) = run_at(board, row, col, 0, 1) {
                return Some(run);
            }
        }
    }

    for col in 0..size {
        for row in 0..=last_start {
            if let Some(run) = run_at(board, row, col, 1, 0) {
                return Some(run);
            }
        }
    }

    for row in 0..=last_start {
        for col in 0..=last_start {
            if let Some(run) = run_at(board, row, col, 1, 1) {
                return Some(run);
            }
        }
    }

    for row in 0..=last_start {
        for col in (length - 1)..size {
            if let Some(run) = run_at(board, row, col, 1, -1) {
                return Some(run);
            }
        }
    }

    None
}

#[inline(always)]
fn run_at(board: &Board, row: usize, col: usize, d_row: isize, d_col: isize) -> Option<Run> {
    let mark = board.at(row, col);
    if mark == Mark::Empty {
        return None;
    }

    for i in 1..board.win_length() as isize {
        let r = row.wrapping_add_signed(d_row * i);
        let c = col.wrapping_add_signed(d_col * i);
        if board.at(r, c) != mark {
            return None;
        }
    }

    Some(Run {
        mark,
        start: Position::new(row, col),
        d_row,
        d_col,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const E: Mark = Mark::Empty;
    const X: Mark = Mark::X;
    const O: Mark = Mark::O;

    fn cells(coords: &[(usize, usize)]) -> Vec<Position> {
        coords.iter().map(|&(r, c)| Position::new(r, c)).collect()
    }

    #[test]
    fn test_empty_board_has_no_winner() {
        for size in 3..=5 {
            assert_eq!(check_win(&Board::new(size).unwrap()), None);
        }
    }

    #[test]
    fn test_horizontal_win() {
        let board = Board::from_rows(&[[E, E, E], [X, X, X], [O, O, E]]).unwrap();

        let line = check_win_with_line(&board).unwrap();
        assert_eq!(line.mark, X);
        assert_eq!(line.cells, cells(&[(1, 0), (1, 1), (1, 2)]));
    }

    #[test]
    fn test_vertical_win() {
        let board = Board::from_rows(&[[X, O, E], [X, O, E], [E, O, X]]).unwrap();

        let line = check_win_with_line(&board).unwrap();
        assert_eq!(line.mark, O);
        assert_eq!(line.cells, cells(&[(0, 1), (1, 1), (2, 1)]));
    }

    #[test]
    fn test_diagonal_win() {
        let board = Board::from_rows(&[[X, O, E], [O, X, E], [E, E, X]]).unwrap();

        let line = check_win_with_line(&board).unwrap();
        assert_eq!(line.mark, X);
        assert_eq!(line.cells, cells(&[(0, 0), (1, 1), (2, 2)]));
    }

    #[test]
    fn test_anti_diagonal_win() {
        let board = Board::from_rows(&[[X, X, O], [E, O, E], [O, X, E]]).unwrap();

        let line = check_win_with_line(&board).unwrap();
        assert_eq!(line.mark, O);
        assert_eq!(line.cells, cells(&[(0, 2), (1, 1), (2, 0)]));
    }

    #[test]
    fn test_four_by_four_needs_three() {
        let board = Board::from_rows(&[
            [E, E, E, E],
            [E, E, E, X],
            [E, E, X, O],
            [E, X, O, O],
        ])
        .unwrap();

        let line = check_win_with_line(&board).unwrap();
        assert_eq!(line.mark, X);
        assert_eq!(line.cells, cells(&[(1, 3), (2, 2), (3, 1)]));
    }

    #[test]
    fn test_five_by_five_three_in_a_row_is_not_enough() {
        let board = Board::from_rows(&[
            [X, X, X, E, E],
            [O, O, O, E, E],
            [E, E, E, E, E],
            [E, E, E, E, E],
            [E, E, E, E, E],
        ])
        .unwrap();

        assert_eq!(check_win(&board), None);
    }

    #[test]
    fn test_five_by_five_four_in_a_row_wins_off_edge() {
        let board = Board::from_rows(&[
            [E, E, E, E, E],
            [E, O, O, O, E],
            [E, X, X, X, X],
            [E, E, E, E, E],
            [E, E, E, E, O],
        ])
        .unwrap();

        let line = check_win_with_line(&board).unwrap();
        assert_eq!(line.mark, X);
        assert_eq!(line.cells, cells(&[(2, 1), (2, 2), (2, 3), (2, 4)]));
        assert_eq!(line.start(), Some(Position::new(2, 1)));
        assert_eq!(line.end(), Some(Position::new(2, 4)));
    }

    #[test]
    fn test_five_long_run_reports_first_window() {
        let board = Board::from_rows(&[
            [O, E, E, E, E],
            [O, E, E, E, E],
            [X, X, X, X, X],
            [O, E, E, E, E],
            [O, E, E, E, E],
        ])
        .unwrap();

        let line = check_win_with_line(&board).unwrap();
        assert_eq!(line.cells, cells(&[(2, 0), (2, 1), (2, 2), (2, 3)]));
    }

    #[test]
    fn test_rows_scanned_before_columns() {
        let board = Board::from_rows(&[[X, X, X], [X, O, O], [X, O, O]]).unwrap();

        let line = check_win_with_line(&board).unwrap();
        assert_eq!(line.cells, cells(&[(0, 0), (0, 1), (0, 2)]));
    }

    #[test]
    fn test_broken_run_is_not_a_win() {
        let board = Board::from_rows(&[[X, O, X], [E, E, E], [E, O, E]]).unwrap();

        assert_eq!(check_win(&board), None);
    }
}
