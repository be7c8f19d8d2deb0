//! Error types for session-level operations.
//!
//! Rejected actions are not errors; they come back as an
//! [`ActionResponse`](crate::models::ActionResponse) with `success = false`.

use thiserror::Error;
use uuid::Uuid;

use crate::models::Phase;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("Session not completed yet (current phase: {0})")]
    ResultsNotReady(Phase),

    #[error("Invalid phase: {0}")]
    InvalidPhase(String),
}

impl SimError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::SessionNotFound(_) => "session_not_found",
            Self::ResultsNotReady(_) => "results_not_ready",
            Self::InvalidPhase(_) => "invalid_phase",
        }
    }
}
