use std::fmt;

use super::error::GameError;
use super::types::{Mark, Position};

pub const MIN_BOARD_SIZE: usize = 3;
pub const MAX_BOARD_SIZE: usize = 5;
const MAX_CELLS: usize = MAX_BOARD_SIZE * MAX_BOARD_SIZE;

/// Run length needed to win: 3 up to 4x4, 4 on 5x5.
pub fn win_length_for(size: usize) -> usize {
    if size <= 4 { 3 } else { 4 }
}

pub fn validate_board_size(size: usize) -> Result<(), GameError> {
    if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
        return Err(GameError::InvalidConfiguration(format!(
            "Board size must be between {} and {}, got {}",
            MIN_BOARD_SIZE, MAX_BOARD_SIZE, size
        )));
    }
    Ok(())
}

/// Square grid stored inline so that copies are cheap; the search hands
/// each branch its own copy instead of placing and undoing marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    size: usize,
    win_length: usize,
    cells: [Mark; MAX_CELLS],
}

impl Board {
    pub fn new(size: usize) -> Result<Self, GameError> {
        validate_board_size(size)?;
        Ok(Self {
            size,
            win_length: win_length_for(size),
            cells: [Mark::Empty; MAX_CELLS],
        })
    }

    pub fn from_rows<R: AsRef<[Mark]>>(rows: &[R]) -> Result<Self, GameError> {
        let mut board = Self::new(rows.len())?;

        for (row, cells) in rows.iter().enumerate() {
            let cells = cells.as_ref();
            if cells.len() != board.size {
                return Err(GameError::InvalidConfiguration(format!(
                    "Row {} has {} cells, expected {}",
                    row,
                    cells.len(),
                    board.size
                )));
            }
            for (col, &mark) in cells.iter().enumerate() {
                board.set(Position::new(row, col), mark);
            }
        }

        let x_count = board.count(Mark::X);
        let o_count = board.count(Mark::O);
        if x_count.abs_diff(o_count) > 1 {
            return Err(GameError::InvalidConfiguration(format!(
                "Marks must alternate, got {} X and {} O",
                x_count, o_count
            )));
        }

        Ok(board)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn win_length(&self) -> usize {
        self.win_length
    }

    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    pub fn get(&self, pos: Position) -> Option<Mark> {
        if !self.contains(pos.row, pos.col) {
            return None;
        }
        Some(self.cells[self.index(pos)])
    }

    /// Caller guarantees `pos` is on the board.
    pub(crate) fn at(&self, row: usize, col: usize) -> Mark {
        self.cells[row * self.size + col]
    }

    pub(crate) fn set(&mut self, pos: Position, mark: Mark) {
        debug_assert!(self.contains(pos.row, pos.col));
        let index = self.index(pos);
        self.cells[index] = mark;
    }

    pub fn with_mark(mut self, pos: Position, mark: Mark) -> Self {
        self.set(pos, mark);
        self
    }

    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.get(pos) == Some(Mark::Empty)
    }

    pub fn available_moves(&self) -> Vec<Position> {
        let mut moves = Vec::new();
        for row in 0..self.size {
            for col in 0..self.size {
                if self.at(row, col) == Mark::Empty {
                    moves.push(Position::new(row, col));
                }
            }
        }
        moves
    }

    pub fn has_empty_cell(&self) -> bool {
        self.cells[..self.cell_count()].contains(&Mark::Empty)
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells[..self.cell_count()]
            .iter()
            .filter(|&&cell| cell == mark)
            .count()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Mark]> {
        self.cells[..self.cell_count()].chunks(self.size)
    }

    pub fn clear(&mut self) {
        self.cells = [Mark::Empty; MAX_CELLS];
    }

    fn index(&self, pos: Position) -> usize {
        pos.row * self.size + pos.col
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for col in 0..self.size {
            write!(f, " {}", col)?;
        }
        writeln!(f)?;
        for (row, cells) in self.rows().enumerate() {
            write!(f, "{} ", row)?;
            for mark in cells {
                write!(f, " {}", mark)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const E: Mark = Mark::Empty;
    const X: Mark = Mark::X;
    const O: Mark = Mark::O;

    #[test]
    fn test_win_length_by_board_size() {
        assert_eq!(win_length_for(3), 3);
        assert_eq!(win_length_for(4), 3);
        assert_eq!(win_length_for(5), 4);
        for size in MIN_BOARD_SIZE..=MAX_BOARD_SIZE {
            assert_eq!(Board::new(size).unwrap().win_length(), win_length_for(size));
        }
    }

    #[test]
    fn test_new_rejects_unsupported_sizes() {
        for size in [0, 1, 2, 6, 10] {
            assert!(matches!(
                Board::new(size),
                Err(GameError::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn test_available_moves_are_row_major() {
        let board = Board::from_rows(&[[X, E, O], [E, X, E], [O, E, E]]).unwrap();

        assert_eq!(
            board.available_moves(),
            vec![
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(1, 2),
                Position::new(2, 1),
                Position::new(2, 2),
            ]
        );
    }

    #[test]
    fn test_with_mark_leaves_original_untouched() {
        let board = Board::new(4).unwrap();
        let next = board.with_mark(Position::new(2, 3), X);

        assert_eq!(board.get(Position::new(2, 3)), Some(E));
        assert_eq!(next.get(Position::new(2, 3)), Some(X));
        assert_eq!(next.count(X), 1);
    }

    #[test]
    fn test_get_outside_board_is_none() {
        let board = Board::new(3).unwrap();

        assert_eq!(board.get(Position::new(3, 0)), None);
        assert_eq!(board.get(Position::new(0, 3)), None);
    }

    #[test]
    fn test_from_rows_rejects_ragged_rows() {
        let rows = vec![vec![X, E, E], vec![E, E], vec![E, E, O]];

        assert!(matches!(
            Board::from_rows(&rows),
            Err(GameError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_from_rows_rejects_double_moves() {
        let result = Board::from_rows(&[[X, X, E], [E, E, E], [E, E, E]]);

        assert!(matches!(result, Err(GameError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_full_board_has_no_empty_cell() {
        let board = Board::from_rows(&[[X, O, X], [X, O, O], [O, X, X]]).unwrap();

        assert!(!board.has_empty_cell());
        assert!(board.available_moves().is_empty());
    }

    #[test]
    fn test_display_renders_grid() {
        let board = Board::from_rows(&[[X, E, E], [E, O, E], [E, E, E]]).unwrap();

        assert_eq!(board.to_string(), "   0 1 2\n0  X . .\n1  . O .\n2  . . .\n");
    }
}
