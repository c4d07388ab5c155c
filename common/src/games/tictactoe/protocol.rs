//! JSON contract of the AI move service.
//!
//! Cells travel as `"X"`, `"O"` or `" "`. Decoding also accepts `""` and `null`
//! for an empty cell; encoding always produces `" "`.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::games::SessionRng;
use super::board::Board;
use super::bot_controller::{BotInput, calculate_move};
use super::error::GameResult;
use super::types::{CELL_COUNT, CellIndex, Difficulty, EasyVariant, Mark, MoveResult, Winner};
use super::win_detector::evaluate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub board: Board,
    pub difficulty: Difficulty,
    #[serde(alias = "aiSymbol")]
    pub mover: Mark,
    /// Fixes the easy bot's random choice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl MoveRequest {
    pub fn new(board: Board, difficulty: Difficulty, mover: Mark) -> Self {
        Self {
            board,
            difficulty,
            mover,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn session_rng(&self) -> SessionRng {
        self.seed.map(SessionRng::new).unwrap_or_else(SessionRng::from_random)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveResponse {
    #[serde(rename = "move")]
    pub move_index: CellIndex,
    pub board: Board,
    pub winner: Option<Winner>,
    pub winning_line: Vec<CellIndex>,
}

impl MoveResponse {
    pub fn new(move_index: CellIndex, board: Board) -> Self {
        let (winner, winning_line) = match evaluate(&board) {
            MoveResult::Continue => (None, Vec::new()),
            MoveResult::Terminal { winner, line } => (
                Some(winner),
                line.map(|l| l.cells().to_vec()).unwrap_or_default(),
            ),
        };
        Self {
            move_index,
            board,
            winner,
            winning_line,
        }
    }
}

/// Computes the AI's move for `request`, applies it to a copy of the board and reports the result.
pub fn resolve_ai_move(
    request: &MoveRequest,
    easy_variant: EasyVariant,
    rng: &mut SessionRng,
) -> GameResult<MoveResponse> {
    let input = BotInput::new(request.board, request.mover);
    let move_index = calculate_move(request.difficulty, easy_variant, &input, rng)?;
    let board = request.board.with_move(move_index, request.mover)?;
    Ok(MoveResponse::new(move_index, board))
}

fn parse_mark(value: Option<&str>) -> Option<Mark> {
    match value.map(str::trim) {
        None | Some("") => Some(Mark::Empty),
        Some("X") => Some(Mark::X),
        Some("O") => Some(Mark::O),
        Some(_) => None,
    }
}

impl Serialize for Mark {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}

impl<'de> Deserialize<'de> for Mark {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        parse_mark(value.as_deref())
            .ok_or_else(|| de::Error::custom(format!("invalid cell value {:?}", value)))
    }
}

impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.cells().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let cells = Vec::<Mark>::deserialize(deserializer)?;
        let cells: [Mark; CELL_COUNT] = cells.try_into().map_err(|cells: Vec<Mark>| {
            de::Error::invalid_length(cells.len(), &"a board of 9 cells")
        })?;
        Ok(Board::from_cells(cells))
    }
}

impl Serialize for Winner {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Winner {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        match value.as_str() {
            "X" => Ok(Winner::X),
            "O" => Ok(Winner::O),
            "draw" => Ok(Winner::Draw),
            other => Err(de::Error::custom(format!("invalid winner {:?}", other))),
        }
    }
}
