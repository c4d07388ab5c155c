use common::games::tictactoe::{MoveRequest, MoveResponse, MoveResult, TicTacToeGameState};

use crate::error::ClientError;
use crate::move_source::MoveSource;

/// Runs the AI's turn. The board is locked while the source works; any failure unlocks it unchanged.
pub async fn play_ai_turn<S: MoveSource>(
    state: &mut TicTacToeGameState,
    source: &S,
) -> Result<MoveResult, ClientError> {
    let request = state.begin_ai_turn()?;

    let outcome = match source.request_move(&request).await {
        Ok(response) => match check_response(&request, &response) {
            Ok(()) => state.complete_ai_turn(response.move_index).map_err(ClientError::from),
            Err(err) => Err(err),
        },
        Err(err) => Err(err),
    };

    if outcome.is_err() {
        state.abort_ai_turn()?;
    }
    outcome
}

fn check_response(request: &MoveRequest, response: &MoveResponse) -> Result<(), ClientError> {
    let expected = request
        .board
        .with_move(response.move_index, request.mover)
        .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

    if expected != response.board {
        return Err(ClientError::InvalidResponse(format!(
            "returned board does not match move {}",
            response.move_index
        )));
    }
    Ok(())
}
