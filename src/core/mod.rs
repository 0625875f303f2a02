//! Core types: terms, RNG, clock, configuration, errors.
//!
//! Everything here is independent of the board and session; the game
//! modules build on top of it.

pub mod term;
pub mod rng;
pub mod clock;
pub mod config;
pub mod error;

pub use term::{parse_term_line, parse_terms, Separator, Term, TermList};
pub use rng::{GameRng, GameRngState};
pub use clock::{Clock, ManualClock, SystemClock, Timestamp};
pub use config::{GameConfig, PairProfile};
pub use error::{ConfigError, GameError, SnapshotError, ValidationError};
