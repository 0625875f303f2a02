//! Session phases.
//!
//! ```text
//! setup --build--> shuffling --(display timer)--> playing --(all matched)--> finished
//!   ^                                                                           |
//!   +---------------------------------- reset (any phase) ----------------------+
//! ```

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for a valid term list and a build.
    #[default]
    Setup,
    /// Cosmetic shuffle; no input until the display timer runs out.
    Shuffling,
    /// Flips accepted.
    Playing,
    /// Every pair matched. Only reset leaves this phase.
    Finished,
}

impl Phase {
    /// Whether gameplay input (flip, reveal all) is accepted.
    #[must_use]
    pub const fn accepts_input(self) -> bool {
        matches!(self, Phase::Playing)
    }

    /// Whether a board exists in this phase.
    #[must_use]
    pub const fn has_board(self) -> bool {
        !matches!(self, Phase::Setup)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Phase::Setup => "setup",
            Phase::Shuffling => "shuffling",
            Phase::Playing => "playing",
            Phase::Finished => "finished",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_playing_accepts_input() {
        assert!(!Phase::Setup.accepts_input());
        assert!(!Phase::Shuffling.accepts_input());
        assert!(Phase::Playing.accepts_input());
        assert!(!Phase::Finished.accepts_input());
    }

    #[test]
    fn test_display() {
        assert_eq!(Phase::Shuffling.to_string(), "shuffling");
        assert_eq!(Phase::default(), Phase::Setup);
    }
}
