use super::board::Board;
use super::error::{GameError, GameResult};
use super::protocol::MoveRequest;
use super::types::{CELL_COUNT, CellIndex, Difficulty, Line, Mark, MoveResult, Winner};
use super::win_detector::evaluate;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameMode {
    SinglePlayer { difficulty: Difficulty, human_mark: Mark },
    TwoPlayer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    AwaitingMove(Mark),
    /// The AI's move is being computed; the board is locked.
    AiThinking(Mark),
    Terminal { winner: Winner, line: Option<Line> },
}

/// One game as the UI drives it. Terminal is absorbing until `reset`.
#[derive(Debug, Clone)]
pub struct TicTacToeGameState {
    board: Board,
    mode: GameMode,
    phase: SessionPhase,
    last_move: Option<CellIndex>,
}

impl TicTacToeGameState {
    pub fn new(mode: GameMode) -> GameResult<Self> {
        if let GameMode::SinglePlayer { human_mark, .. } = mode
            && human_mark.is_empty()
        {
            return Err(GameError::InvalidState(
                "human player must play X or O".to_string(),
            ));
        }

        Ok(Self {
            board: Board::new(),
            mode,
            phase: SessionPhase::AwaitingMove(Mark::X),
            last_move: None,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn last_move(&self) -> Option<CellIndex> {
        self.last_move
    }

    pub fn current_mark(&self) -> Option<Mark> {
        match self.phase {
            SessionPhase::AwaitingMove(mark) | SessionPhase::AiThinking(mark) => Some(mark),
            SessionPhase::Terminal { .. } => None,
        }
    }

    pub fn ai_mark(&self) -> Option<Mark> {
        match self.mode {
            GameMode::SinglePlayer { human_mark, .. } => human_mark.opponent(),
            GameMode::TwoPlayer => None,
        }
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        match self.mode {
            GameMode::SinglePlayer { difficulty, .. } => Some(difficulty),
            GameMode::TwoPlayer => None,
        }
    }

    pub fn is_ai_turn(&self) -> bool {
        matches!(self.phase, SessionPhase::AwaitingMove(mark) if Some(mark) == self.ai_mark())
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, SessionPhase::Terminal { .. })
    }

    pub fn outcome(&self) -> Option<(Winner, Option<Line>)> {
        match self.phase {
            SessionPhase::Terminal { winner, line } => Some((winner, line)),
            _ => None,
        }
    }

    /// Human move. In single-player mode only accepted on the human's turn.
    pub fn place_mark(&mut self, index: CellIndex) -> GameResult<MoveResult> {
        let mark = match self.phase {
            SessionPhase::Terminal { .. } => {
                return Err(GameError::IllegalMove("game is already over".to_string()));
            }
            SessionPhase::AiThinking(_) => {
                return Err(GameError::IllegalMove("AI is thinking".to_string()));
            }
            SessionPhase::AwaitingMove(mark) => mark,
        };

        if Some(mark) == self.ai_mark() {
            return Err(GameError::IllegalMove("not your turn".to_string()));
        }

        self.apply_move(index, mark)
    }

    /// Locks the board and returns the request to hand to a move source.
    pub fn begin_ai_turn(&mut self) -> GameResult<MoveRequest> {
        let difficulty = self
            .difficulty()
            .ok_or_else(|| GameError::InvalidState("no AI in a two-player game".to_string()))?;

        if !self.is_ai_turn() {
            return Err(GameError::InvalidState("it is not the AI's turn".to_string()));
        }

        let mark = self.current_mark().unwrap_or(Mark::Empty);
        self.phase = SessionPhase::AiThinking(mark);
        Ok(MoveRequest::new(self.board, difficulty, mark))
    }

    /// Applies the AI's move. On error the session stays locked; call `abort_ai_turn`.
    pub fn complete_ai_turn(&mut self, index: CellIndex) -> GameResult<MoveResult> {
        match self.phase {
            SessionPhase::AiThinking(mark) => self.apply_move(index, mark),
            _ => Err(GameError::InvalidState("no AI move is pending".to_string())),
        }
    }

    /// Unlocks the board after a failed AI request. The board is not touched.
    pub fn abort_ai_turn(&mut self) -> GameResult<()> {
        match self.phase {
            SessionPhase::AiThinking(mark) => {
                self.phase = SessionPhase::AwaitingMove(mark);
                Ok(())
            }
            _ => Err(GameError::InvalidState("no AI move is pending".to_string())),
        }
    }

    pub fn reset(&mut self) {
        self.board = Board::new();
        self.phase = SessionPhase::AwaitingMove(Mark::X);
        self.last_move = None;
    }

    fn apply_move(&mut self, index: CellIndex, mark: Mark) -> GameResult<MoveResult> {
        if index >= CELL_COUNT {
            return Err(GameError::IllegalMove(format!("cell {} is out of bounds", index)));
        }

        if !self.board.is_empty_cell(index) {
            return Err(GameError::IllegalMove(format!("cell {} is already marked", index)));
        }

        self.board.place(index, mark)?;
        self.last_move = Some(index);

        let result = evaluate(&self.board);
        self.phase = match result {
            MoveResult::Continue => SessionPhase::AwaitingMove(mark.opponent().unwrap_or(Mark::X)),
            MoveResult::Terminal { winner, line } => SessionPhase::Terminal { winner, line },
        };

        Ok(result)
    }
}
