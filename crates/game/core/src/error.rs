//! Intent rejection reasons.
//!
//! Rejected intents are not failures: the engine leaves state untouched and
//! reports why through [`crate::engine::IntentOutcome::Ignored`]. The reasons
//! are still `thiserror` types so callers can log them uniformly.

/// How a caller should treat a rejected intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Timing-dependent; the same intent may succeed later.
    Recoverable,
    /// The intent itself is unusable and should not be retried as-is.
    Validation,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
        }
    }
}

/// Why an intent was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IgnoreReason {
    #[error("the battle is already over")]
    BattleOver,

    #[error("it is not the player's turn")]
    NotPlayerTurn,

    #[error("the special move is not charged")]
    SpecialNotReady,

    #[error("comment is empty")]
    EmptyComment,

    #[error("skip is not available yet")]
    SkipUnavailable,
}

impl IgnoreReason {
    pub const fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotPlayerTurn | Self::SpecialNotReady | Self::SkipUnavailable => {
                ErrorSeverity::Recoverable
            }
            Self::BattleOver | Self::EmptyComment => ErrorSeverity::Validation,
        }
    }
}
