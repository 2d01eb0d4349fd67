pub mod state;
pub mod store;

use thiserror::Error;
use uuid::Uuid;

pub use state::{Session, SessionPhase, Submission};
pub use store::SessionStore;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session {0} not found")]
    NotFound(Uuid),

    #[error("Cannot {action} while session is {phase}")]
    WrongPhase {
        action: &'static str,
        phase: SessionPhase,
    },

    #[error("Questions have already been generated for this session")]
    AlreadyGenerated,

    #[error("Expected {expected} answers, got {actual}")]
    AnswerCountMismatch { expected: usize, actual: usize },
}
