use std::fmt;

use super::error::{GameError, GameResult};
use super::types::{BOARD_SIZE, CELL_COUNT, CellIndex, Mark};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [Mark; CELL_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [Mark; CELL_COUNT]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Mark; CELL_COUNT] {
        &self.cells
    }

    pub fn get(&self, index: CellIndex) -> Option<Mark> {
        self.cells.get(index).copied()
    }

    pub fn is_empty_cell(&self, index: CellIndex) -> bool {
        self.get(index) == Some(Mark::Empty)
    }

    pub fn available_moves(&self) -> Vec<CellIndex> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(index, _)| index)
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|&&cell| cell == mark).count()
    }

    /// Places `mark` into an empty cell.
    pub fn place(&mut self, index: CellIndex, mark: Mark) -> GameResult<()> {
        if mark.is_empty() {
            return Err(GameError::InvalidState("cannot place an empty mark".to_string()));
        }
        match self.cells.get(index) {
            None => Err(GameError::InvalidState(format!(
                "cell {} is out of bounds",
                index
            ))),
            Some(Mark::Empty) => {
                self.cells[index] = mark;
                Ok(())
            }
            Some(_) => Err(GameError::InvalidState(format!(
                "cell {} is already marked",
                index
            ))),
        }
    }

    /// Returns a copy with `mark` placed at `index`.
    pub fn with_move(&self, index: CellIndex, mark: Mark) -> GameResult<Board> {
        let mut next = *self;
        next.place(index, mark)?;
        Ok(next)
    }

    pub(crate) fn set(&mut self, index: CellIndex, mark: Mark) {
        self.cells[index] = mark;
    }

    /// Checks the alternating-turn invariant: X moves first, so X is level with O or one ahead.
    pub fn validate(&self) -> GameResult<()> {
        let x_count = self.count(Mark::X);
        let o_count = self.count(Mark::O);
        if x_count == o_count || x_count == o_count + 1 {
            Ok(())
        } else {
            Err(GameError::InvalidState(format!(
                "malformed board: {} X marks against {} O marks",
                x_count, o_count
            )))
        }
    }

    pub fn side_to_move(&self) -> GameResult<Mark> {
        self.validate()?;
        if self.count(Mark::X) == self.count(Mark::O) {
            Ok(Mark::X)
        } else {
            Ok(Mark::O)
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(BOARD_SIZE) {
            writeln!(f, "{} {} {}", row[0], row[1], row[2])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.available_moves(), (0..9).collect::<Vec<_>>());
        assert!(!board.is_full());
        assert_eq!(board.side_to_move(), Ok(Mark::X));
    }

    #[test]
    fn test_place_rejects_occupied_and_out_of_bounds() {
        let mut board = Board::new();
        board.place(4, Mark::X).unwrap();
        assert!(matches!(board.place(4, Mark::O), Err(GameError::InvalidState(_))));
        assert!(matches!(board.place(9, Mark::O), Err(GameError::InvalidState(_))));
        assert!(matches!(board.place(0, Mark::Empty), Err(GameError::InvalidState(_))));
        assert_eq!(board.count(Mark::X), 1);
    }

    #[test]
    fn test_with_move_leaves_original_untouched() {
        let board = Board::new();
        let next = board.with_move(0, Mark::X).unwrap();
        assert_eq!(board, Board::new());
        assert_eq!(next.get(0), Some(Mark::X));
    }

    #[test]
    fn test_side_to_move_follows_counts() {
        let board = Board::new().with_move(0, Mark::X).unwrap();
        assert_eq!(board.side_to_move(), Ok(Mark::O));

        let board = board.with_move(1, Mark::O).unwrap();
        assert_eq!(board.side_to_move(), Ok(Mark::X));
    }

    #[test]
    fn test_validate_rejects_o_ahead_and_x_two_ahead() {
        let o_ahead = Board::new().with_move(0, Mark::O).unwrap();
        assert!(o_ahead.validate().is_err());

        let x_two_ahead = Board::new()
            .with_move(0, Mark::X)
            .and_then(|b| b.with_move(1, Mark::X))
            .unwrap();
        assert!(x_two_ahead.side_to_move().is_err());
    }

    #[test]
    fn test_display_renders_rows() {
        let board = Board::new().with_move(4, Mark::X).unwrap();
        assert_eq!(board.to_string(), ". . .\n. X .\n. . .\n");
    }
}
