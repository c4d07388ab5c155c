use std::sync::Mutex;

use common::games::SessionRng;
use common::games::tictactoe::{EasyVariant, GameError, MoveRequest, MoveResponse, resolve_ai_move};

use crate::error::ClientError;

/// Anything that can answer a move request: the in-process engine or the remote service.
pub trait MoveSource {
    fn request_move(
        &self,
        request: &MoveRequest,
    ) -> impl Future<Output = Result<MoveResponse, ClientError>> + Send;
}

pub struct LocalMoveSource {
    easy_variant: EasyVariant,
    rng: Mutex<SessionRng>,
}

impl LocalMoveSource {
    pub fn new(easy_variant: EasyVariant) -> Self {
        Self::with_rng(easy_variant, SessionRng::from_random())
    }

    pub fn with_rng(easy_variant: EasyVariant, rng: SessionRng) -> Self {
        Self {
            easy_variant,
            rng: Mutex::new(rng),
        }
    }

    pub fn compute(&self, request: &MoveRequest) -> Result<MoveResponse, ClientError> {
        let response = match request.seed {
            Some(_) => resolve_ai_move(request, self.easy_variant, &mut request.session_rng())?,
            None => {
                let mut rng = self.rng.lock().map_err(|_| {
                    GameError::InvalidState("local engine lock poisoned".to_string())
                })?;
                resolve_ai_move(request, self.easy_variant, &mut rng)?
            }
        };
        Ok(response)
    }
}

impl MoveSource for LocalMoveSource {
    async fn request_move(&self, request: &MoveRequest) -> Result<MoveResponse, ClientError> {
        self.compute(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::games::tictactoe::{Board, Difficulty, Mark};

    #[tokio::test]
    async fn test_local_hard_move() {
        let source = LocalMoveSource::with_rng(EasyVariant::Tactical, SessionRng::new(1));
        let request = MoveRequest::new(Board::new(), Difficulty::Hard, Mark::X);
        let response = source.request_move(&request).await.unwrap();
        assert_eq!(response.move_index, 4);
    }

    #[tokio::test]
    async fn test_local_reports_contract_errors() {
        let source = LocalMoveSource::new(EasyVariant::Random);
        let request = MoveRequest::new(Board::new(), Difficulty::Easy, Mark::O);
        let err = source.request_move(&request).await.unwrap_err();
        assert!(matches!(err, ClientError::Game(GameError::InvalidState(_))));
    }

    #[tokio::test]
    async fn test_seeded_request_ignores_shared_rng() {
        let request = MoveRequest::new(Board::new(), Difficulty::Easy, Mark::X).with_seed(5);
        let a = LocalMoveSource::with_rng(EasyVariant::Random, SessionRng::new(1));
        let b = LocalMoveSource::with_rng(EasyVariant::Random, SessionRng::new(2));
        assert_eq!(
            a.request_move(&request).await.unwrap(),
            b.request_move(&request).await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_poisoned_rng_is_not_transient() {
        let source = LocalMoveSource::with_rng(EasyVariant::Tactical, SessionRng::new(1));
        std::thread::scope(|scope| {
            let holder = scope.spawn(|| {
                let _guard = source.rng.lock().unwrap();
                panic!("poison the rng lock");
            });
            assert!(holder.join().is_err());
        });

        let request = MoveRequest::new(Board::new(), Difficulty::Easy, Mark::X);
        let err = source.request_move(&request).await.unwrap_err();
        assert!(matches!(err, ClientError::Game(GameError::InvalidState(_))));
        assert!(!err.is_transient());
    }
}
