//! Game configuration.
//!
//! The instructor picks a pair count from a fixed set; the set itself, the
//! timer durations, and the term separators are configured here.
//!
//! ```
//! use memorama::core::{GameConfig, PairProfile};
//!
//! let config = GameConfig::from_toml_str(r#"
//!     pair_counts = [10, 20, 30, 50]
//!     default_pair_count = 10
//!     resolve_delay_ms = 650
//! "#).unwrap();
//!
//! assert_eq!(config.pair_counts, PairProfile::Extended.pair_counts());
//! assert_eq!(config.shuffle_display_ms, 1200);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::term::Separator;

/// Preset pair-count sets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairProfile {
    /// 5, 15 or 20 pairs.
    #[default]
    Classroom,
    /// 10, 20, 30 or 50 pairs.
    Extended,
}

impl PairProfile {
    #[must_use]
    pub fn pair_counts(self) -> Vec<usize> {
        match self {
            PairProfile::Classroom => vec![5, 15, 20],
            PairProfile::Extended => vec![10, 20, 30, 50],
        }
    }
}

/// Game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Pair counts the instructor may choose from.
    pub pair_counts: Vec<usize>,

    /// Selected pair count when nothing else is chosen.
    pub default_pair_count: usize,

    /// How long the shuffle animation blocks play.
    pub shuffle_display_ms: u64,

    /// Delay between the second flip and its resolution.
    pub resolve_delay_ms: u64,

    /// How long "reveal all" keeps the board face up.
    pub reveal_duration_ms: u64,

    /// Term/image separators, highest priority first.
    pub separators: Vec<Separator>,

    /// RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::for_profile(PairProfile::Classroom)
    }
}

impl GameConfig {
    /// Config with the given pair-count profile and default timings.
    #[must_use]
    pub fn for_profile(profile: PairProfile) -> Self {
        let pair_counts = profile.pair_counts();
        Self {
            default_pair_count: pair_counts[0],
            pair_counts,
            shuffle_display_ms: 1_200,
            resolve_delay_ms: 900,
            reveal_duration_ms: 1_000,
            separators: Separator::DEFAULT_PRIORITY.to_vec(),
            seed: None,
        }
    }

    /// Parse and validate a TOML document. Missing keys take defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pair_counts.is_empty() {
            return Err(ConfigError::NoPairCounts);
        }
        if self.pair_counts.contains(&0) {
            return Err(ConfigError::ZeroPairCount);
        }
        if !self.allows(self.default_pair_count) {
            return Err(ConfigError::DefaultNotAllowed(self.default_pair_count));
        }
        if self.separators.is_empty() {
            return Err(ConfigError::NoSeparators);
        }
        Ok(())
    }

    #[must_use]
    pub fn allows(&self, pair_count: usize) -> bool {
        self.pair_counts.contains(&pair_count)
    }

    /// Largest selectable pair count.
    #[must_use]
    pub fn max_pair_count(&self) -> usize {
        self.pair_counts.iter().copied().max().unwrap_or(0)
    }

    #[must_use]
    pub fn shuffle_display(&self) -> Duration {
        Duration::from_millis(self.shuffle_display_ms)
    }

    #[must_use]
    pub fn resolve_delay(&self) -> Duration {
        Duration::from_millis(self.resolve_delay_ms)
    }

    #[must_use]
    pub fn reveal_duration(&self) -> Duration {
        Duration::from_millis(self.reveal_duration_ms)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_resolve_delay(mut self, ms: u64) -> Self {
        self.resolve_delay_ms = ms;
        self
    }

    pub fn with_shuffle_display(mut self, ms: u64) -> Self {
        self.shuffle_display_ms = ms;
        self
    }

    pub fn with_reveal_duration(mut self, ms: u64) -> Self {
        self.reveal_duration_ms = ms;
        self
    }

    pub fn with_separators(mut self, separators: Vec<Separator>) -> Self {
        self.separators = separators;
        self
    }

    /// Replace the selectable pair counts; the default becomes the first entry.
    pub fn with_pair_counts(mut self, pair_counts: Vec<usize>) -> Self {
        if let Some(&first) = pair_counts.first() {
            self.default_pair_count = first;
        }
        self.pair_counts = pair_counts;
        self
    }
}
