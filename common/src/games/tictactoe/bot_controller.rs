use crate::games::SessionRng;
use super::board::Board;
use super::error::{GameError, GameResult};
use super::game_state::TicTacToeGameState;
use super::types::{CELL_COUNT, CellIndex, Difficulty, EasyVariant, Mark, MoveResult, Winner};
use super::win_detector::{check_win, evaluate};

/// Center first, then corners, then edges. Hard ties resolve to the earliest entry.
pub const MOVE_PREFERENCE: [CellIndex; CELL_COUNT] = [4, 0, 2, 6, 8, 1, 3, 5, 7];

const WIN_SCORE: i32 = 1;
const DRAW_SCORE: i32 = 0;
const LOSS_SCORE: i32 = -1;

#[derive(Debug, Clone, Copy)]
pub struct BotInput {
    pub board: Board,
    pub current_mark: Mark,
}

impl BotInput {
    pub fn new(board: Board, current_mark: Mark) -> Self {
        Self {
            board,
            current_mark,
        }
    }

    pub fn from_game_state(state: &TicTacToeGameState) -> Option<Self> {
        state.current_mark().map(|mark| Self::new(*state.board(), mark))
    }
}

/// Picks the next move for `mover` using the tactical easy bot or full minimax.
pub fn select_move(
    board: &Board,
    mover: Mark,
    difficulty: Difficulty,
    rng: &mut SessionRng,
) -> GameResult<CellIndex> {
    calculate_move(
        difficulty,
        EasyVariant::default(),
        &BotInput::new(*board, mover),
        rng,
    )
}

pub fn calculate_move(
    difficulty: Difficulty,
    easy_variant: EasyVariant,
    input: &BotInput,
    rng: &mut SessionRng,
) -> GameResult<CellIndex> {
    check_bot_input(input)?;

    let chosen = match (difficulty, easy_variant) {
        (Difficulty::Hard, _) => calculate_minimax_move(input),
        (Difficulty::Easy, EasyVariant::Tactical) => calculate_tactical_move(input, rng),
        (Difficulty::Easy, EasyVariant::Random) => calculate_random_move(input, rng),
    };

    chosen.ok_or_else(|| GameError::InvalidState("no empty cell left to play".to_string()))
}

fn check_bot_input(input: &BotInput) -> GameResult<()> {
    let mover = input.current_mark;
    if mover.opponent().is_none() {
        return Err(GameError::InvalidState("mover must be X or O".to_string()));
    }

    if let MoveResult::Terminal { winner, .. } = evaluate(&input.board) {
        return Err(GameError::InvalidState(match winner {
            Winner::Draw => "board is full".to_string(),
            _ => format!("game is already won by {}", winner),
        }));
    }

    let side_to_move = input.board.side_to_move()?;
    if mover != side_to_move {
        return Err(GameError::InvalidState(format!(
            "{} cannot move, it is {}'s turn",
            mover, side_to_move
        )));
    }

    Ok(())
}

fn calculate_random_move(input: &BotInput, rng: &mut SessionRng) -> Option<CellIndex> {
    rng.choose(&input.board.available_moves())
}

fn calculate_tactical_move(input: &BotInput, rng: &mut SessionRng) -> Option<CellIndex> {
    let bot_mark = input.current_mark;
    let opponent_mark = bot_mark.opponent()?;
    let available_moves = input.board.available_moves();

    if let Some(index) = find_winning_move(&input.board, bot_mark, &available_moves) {
        return Some(index);
    }

    if let Some(index) = find_winning_move(&input.board, opponent_mark, &available_moves) {
        return Some(index);
    }

    rng.choose(&available_moves)
}

pub fn calculate_minimax_move(input: &BotInput) -> Option<CellIndex> {
    let bot_mark = input.current_mark;
    let opponent_mark = bot_mark.opponent()?;
    let available_moves = preferred_moves(&input.board);

    if available_moves.is_empty() {
        return None;
    }

    if let Some(index) = find_winning_move(&input.board, bot_mark, &available_moves) {
        return Some(index);
    }

    let mut board = input.board;
    let mut best_move = None;
    let mut best_score = i32::MIN;
    let mut alpha = LOSS_SCORE - 1;

    for index in available_moves {
        board.set(index, bot_mark);
        let score = minimax(&mut board, false, bot_mark, opponent_mark, alpha, WIN_SCORE + 1);
        board.set(index, Mark::Empty);

        if score > best_score {
            best_score = score;
            best_move = Some(index);
        }
        alpha = alpha.max(score);
        if best_score == WIN_SCORE {
            break;
        }
    }

    best_move
}

fn preferred_moves(board: &Board) -> Vec<CellIndex> {
    MOVE_PREFERENCE
        .iter()
        .copied()
        .filter(|&index| board.is_empty_cell(index))
        .collect()
}

fn find_winning_move(board: &Board, mark: Mark, moves: &[CellIndex]) -> Option<CellIndex> {
    moves.iter().copied().find(|&index| {
        let mut next = *board;
        next.set(index, mark);
        check_win(&next) == Some(mark)
    })
}

/// Scores are from `bot_mark`'s point of view: +1 win, 0 draw, -1 loss.
fn minimax(
    board: &mut Board,
    is_maximizing: bool,
    bot_mark: Mark,
    opponent_mark: Mark,
    mut alpha: i32,
    mut beta: i32,
) -> i32 {
    if let MoveResult::Terminal { winner, .. } = evaluate(board) {
        return match winner.mark() {
            None => DRAW_SCORE,
            Some(mark) if mark == bot_mark => WIN_SCORE,
            Some(_) => LOSS_SCORE,
        };
    }

    if is_maximizing {
        let mut max_eval = i32::MIN;
        for index in 0..CELL_COUNT {
            if !board.is_empty_cell(index) {
                continue;
            }

            board.set(index, bot_mark);
            let eval = minimax(board, false, bot_mark, opponent_mark, alpha, beta);
            board.set(index, Mark::Empty);

            max_eval = max_eval.max(eval);
            alpha = alpha.max(eval);
            if beta <= alpha {
                break;
            }
        }
        max_eval
    } else {
        let mut min_eval = i32::MAX;
        for index in 0..CELL_COUNT {
            if !board.is_empty_cell(index) {
                continue;
            }

            board.set(index, opponent_mark);
            let eval = minimax(board, true, bot_mark, opponent_mark, alpha, beta);
            board.set(index, Mark::Empty);

            min_eval = min_eval.min(eval);
            beta = beta.min(eval);
            if beta <= alpha {
                break;
            }
        }
        min_eval
    }
}
