//! Session statistics.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Derived readout: pairs found, attempts, elapsed time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub pairs_found: usize,
    pub total_pairs: usize,
    pub attempts: u32,
    pub elapsed: Duration,
}

impl SessionStats {
    /// Whole seconds elapsed.
    #[must_use]
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed.as_secs()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total_pairs > 0 && self.pairs_found == self.total_pairs
    }

    #[must_use]
    pub fn pairs_remaining(&self) -> usize {
        self.total_pairs.saturating_sub(self.pairs_found)
    }
}

impl std::fmt::Display for SessionStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Pares: {} / {} | Intentos: {} | Tiempo: {}s",
            self.pairs_found,
            self.total_pairs,
            self.attempts,
            self.elapsed_secs()
        )
    }
}
