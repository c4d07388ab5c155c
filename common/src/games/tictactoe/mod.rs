mod board;
mod bot_controller;
mod error;
mod game_state;
mod protocol;
mod types;
mod win_detector;

pub use board::Board;
pub use bot_controller::{BotInput, MOVE_PREFERENCE, calculate_minimax_move, calculate_move, select_move};
pub use error::{GameError, GameResult};
pub use game_state::{GameMode, SessionPhase, TicTacToeGameState};
pub use protocol::{MoveRequest, MoveResponse, resolve_ai_move};
pub use types::{
    BOARD_SIZE, CELL_COUNT, CellIndex, Difficulty, EasyVariant, LINES, Line, Mark, MoveResult,
    Winner,
};
pub use win_detector::{check_win, check_win_with_line, evaluate};
