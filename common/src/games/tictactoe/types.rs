use std::fmt;

use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: usize = 3;
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Row-major cell index, `row * 3 + col`.
pub type CellIndex = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Mark {
    #[default]
    Empty,
    X,
    O,
}

impl Mark {
    pub fn opponent(&self) -> Option<Mark> {
        match self {
            Mark::X => Some(Mark::O),
            Mark::O => Some(Mark::X),
            Mark::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Mark::Empty
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Mark::Empty => " ",
            Mark::X => "X",
            Mark::O => "O",
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::Empty => write!(f, "."),
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// Three cell indices forming a winning combination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Line(pub [CellIndex; 3]);

impl Line {
    pub fn cells(&self) -> [CellIndex; 3] {
        self.0
    }
}

/// Rows, then columns, then diagonals. Evaluation reports the first match in this order.
pub const LINES: [Line; 8] = [
    Line([0, 1, 2]),
    Line([3, 4, 5]),
    Line([6, 7, 8]),
    Line([0, 3, 6]),
    Line([1, 4, 7]),
    Line([2, 5, 8]),
    Line([0, 4, 8]),
    Line([2, 4, 6]),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Winner {
    X,
    O,
    Draw,
}

impl Winner {
    pub fn from_mark(mark: Mark) -> Option<Winner> {
        match mark {
            Mark::X => Some(Winner::X),
            Mark::O => Some(Winner::O),
            Mark::Empty => None,
        }
    }

    pub fn mark(&self) -> Option<Mark> {
        match self {
            Winner::X => Some(Mark::X),
            Winner::O => Some(Mark::O),
            Winner::Draw => None,
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Winner::X => write!(f, "X"),
            Winner::O => write!(f, "O"),
            Winner::Draw => write!(f, "draw"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveResult {
    Continue,
    Terminal { winner: Winner, line: Option<Line> },
}

impl MoveResult {
    pub fn is_terminal(&self) -> bool {
        matches!(self, MoveResult::Terminal { .. })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

/// How the easy bot picks its move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasyVariant {
    /// Win if possible, otherwise block, otherwise random.
    #[default]
    Tactical,
    /// Uniformly random empty cell.
    Random,
}
