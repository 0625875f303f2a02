//! Error types.
//!
//! - `ValidationError`: the term list cannot produce the requested board.
//!   Non-fatal; the session stays in `setup`.
//! - `GameError`: a player action was rejected. Rejections never mutate state.
//! - `ConfigError`: a configuration could not be parsed or is inconsistent.

use thiserror::Error;

use crate::game::Phase;

/// Board construction refused.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("need at least {required} terms, found {found}")]
    InsufficientTerms { found: usize, required: usize },

    #[error("a board needs at least one pair")]
    NoPairs,

    #[error("pair count {requested} is not one of {allowed:?}")]
    UnsupportedPairCount { requested: usize, allowed: Vec<usize> },
}

/// Player action refused.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("cannot {action} while {phase}")]
    WrongPhase { action: &'static str, phase: Phase },

    #[error("position {position} is outside a deck of {deck_len}")]
    PositionOutOfRange { position: usize, deck_len: usize },

    #[error("position {0} is already face up")]
    AlreadyFaceUp(usize),

    #[error("position {0} is already matched")]
    AlreadyMatched(usize),

    #[error("a resolution is pending")]
    ResolutionPending,
}

/// Configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("at least one pair count must be allowed")]
    NoPairCounts,

    #[error("pair counts must be positive")]
    ZeroPairCount,

    #[error("default pair count {0} is not in the allowed set")]
    DefaultNotAllowed(usize),

    #[error("at least one term separator must be configured")]
    NoSeparators,
}

/// Snapshot could not be encoded, decoded, or trusted.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot encoding error: {0}")]
    Encoding(#[from] bincode::Error),

    #[error("inconsistent snapshot: {0}")]
    Inconsistent(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_reports_counts() {
        let err = ValidationError::InsufficientTerms { found: 3, required: 5 };
        assert_eq!(err.to_string(), "need at least 5 terms, found 3");
    }

    #[test]
    fn test_wrong_phase_message() {
        let err = GameError::WrongPhase { action: "flip", phase: Phase::Setup };
        assert_eq!(err.to_string(), "cannot flip while setup");
    }

    #[test]
    fn test_inconsistent_snapshot_message() {
        let err = SnapshotError::Inconsistent("odd number of matched cards".into());
        assert_eq!(err.to_string(), "inconsistent snapshot: odd number of matched cards");
    }
}
