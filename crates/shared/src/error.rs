use thiserror::Error;

/// Message used when a rejected request carries no `error` field.
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transport,
    MalformedResponse,
    ServerRejection,
}

/// Why a proposal request produced no result. Carries no retry metadata.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProposalFailure {
    #[error("{0}")]
    Transport(String),
    #[error("{0}")]
    MalformedResponse(String),
    #[error("{message}")]
    ServerRejection { status: u16, message: String },
}

impl ProposalFailure {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Builds a rejection from the server-supplied message, if any.
    pub fn rejected(status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
        Self::ServerRejection { status, message }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Transport(_) => FailureKind::Transport,
            Self::MalformedResponse(_) => FailureKind::MalformedResponse,
            Self::ServerRejection { .. } => FailureKind::ServerRejection,
        }
    }

    /// Human-readable text shown in the consultation error region.
    pub fn message(&self) -> &str {
        match self {
            Self::Transport(message) | Self::MalformedResponse(message) => message,
            Self::ServerRejection { message, .. } => message,
        }
    }
}
