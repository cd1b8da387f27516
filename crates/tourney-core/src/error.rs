//! Error taxonomy for tournament operations.
//!
//! Validation failures are terminal for the invocation: no partial
//! mutation, no partial persistence. Each variant maps to a stable
//! machine-readable code, a remediation hint, and the process exit code
//! the CLI reports.

/// Errors raised by tournament operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TournamentError {
    /// A command argument was malformed or out of its allowed domain.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// Any operation except `init`/`reset` before a tournament exists.
    #[error("tournament not initialized")]
    NotInitialized,

    /// `update` referenced an id outside the configured agent set.
    #[error("unknown agent id '{agent_id}'")]
    UnknownAgent { agent_id: String },

    /// `update` received a score outside `[0, 1]`.
    #[error("score {score} is outside [0.0, 1.0]")]
    ScoreOutOfRange { score: f64 },
}

impl TournamentError {
    /// Stable snake_case code for machine parsing.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "invalid_argument",
            Self::NotInitialized => "not_initialized",
            Self::UnknownAgent { .. } => "unknown_agent",
            Self::ScoreOutOfRange { .. } => "score_out_of_range",
        }
    }

    /// Remediation hint surfaced alongside the error message.
    #[must_use]
    pub const fn suggestion(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "Check the command arguments and retry.",
            Self::NotInitialized => "Run `tn init --agents <n>` to start a tournament.",
            Self::UnknownAgent { .. } => {
                "Agent ids are agent_0 .. agent_{n-1}; see `tn status` for the roster."
            }
            Self::ScoreOutOfRange { .. } => "Scores must be within [0.0, 1.0].",
        }
    }

    /// Process exit code reported by the CLI for this failure.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidArgument { .. } => 1,
            Self::NotInitialized => 2,
            Self::UnknownAgent { .. } => 3,
            Self::ScoreOutOfRange { .. } => 4,
        }
    }

    /// Shorthand constructor for argument-validation failures.
    #[must_use]
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }
}
