use super::board::Board;
use super::types::{LINES, Line, Mark, MoveResult, Winner};

/// Reports the first completed line in `LINES` order, a draw on a full board, or `Continue`.
pub fn evaluate(board: &Board) -> MoveResult {
    if let Some((mark, line)) = check_win_with_line(board)
        && let Some(winner) = Winner::from_mark(mark)
    {
        return MoveResult::Terminal {
            winner,
            line: Some(line),
        };
    }

    if board.is_full() {
        return MoveResult::Terminal {
            winner: Winner::Draw,
            line: None,
        };
    }

    MoveResult::Continue
}

pub fn check_win(board: &Board) -> Option<Mark> {
    check_win_with_line(board).map(|(mark, _)| mark)
}

pub fn check_win_with_line(board: &Board) -> Option<(Mark, Line)> {
    let cells = board.cells();
    LINES.iter().find_map(|line| {
        let [a, b, c] = line.cells();
        let mark = cells[a];
        if mark != Mark::Empty && cells[b] == mark && cells[c] == mark {
            Some((mark, *line))
        } else {
            None
        }
    })
}
