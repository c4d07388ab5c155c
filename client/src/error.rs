use common::games::tictactoe::GameError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("Move service did not answer in time")]
    Timeout,

    #[error("Could not reach move service: {0}")]
    Transport(String),

    #[error("Move service rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Move service sent an unusable response: {0}")]
    InvalidResponse(String),

    #[error(transparent)]
    Game(#[from] GameError),
}

impl ClientError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else {
            ClientError::Transport(err.to_string())
        }
    }

    /// Failures of the transport rather than of the request itself.
    pub fn is_transient(&self) -> bool {
        match self {
            ClientError::Timeout | ClientError::Transport(_) => true,
            ClientError::Rejected { status, .. } => *status >= 500,
            ClientError::InvalidResponse(_) | ClientError::Game(_) => false,
        }
    }
}
