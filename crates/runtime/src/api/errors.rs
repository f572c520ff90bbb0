//! Unified error types surfaced by the runtime API.
//!
//! Ignored intents are not errors; they come back as
//! [`game_core::IntentOutcome::Ignored`]. These variants cover worker
//! coordination and content failures.
use thiserror::Error;
use tokio::sync::oneshot;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("no battle has been started")]
    NoActiveBattle,

    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Content(#[from] anyhow::Error),
}
