//! # memorama
//!
//! Memory-matching (concentration) game engine for the classroom.
//!
//! An instructor pastes a list of terms (optionally with image URLs), picks a
//! pair count, and builds a board. Students flip tiles two at a time looking
//! for matching pairs.
//!
//! ## Design Principles
//!
//! 1. **One owned session**: all mutable state lives in a `GameSession`.
//!    Each player gets their own; there are no globals.
//!
//! 2. **Explicit time**: every operation takes the current `Timestamp`.
//!    Timers are stored deadlines applied by `GameSession::tick`, so the
//!    engine never sleeps and tests never wait.
//!
//! 3. **Seedable**: shuffling and celebrations use separate `GameRng`
//!    streams; a seeded config reproduces the same board.
//!
//! ## Example
//!
//! ```
//! use memorama::{DeckPosition, GameConfig, GameSession, Phase, Timestamp};
//!
//! let config = GameConfig::default().with_pair_counts(vec![2]).with_seed(42);
//! let mut game = GameSession::new(config);
//! game.set_terms("Hola | https://x/img.png\nMundo");
//! game.build_board(Timestamp(0)).unwrap();
//!
//! // Deck is [Hola, Mundo, Hola, Mundo]; positions 0 and 2 match.
//! game.flip(DeckPosition(0), Timestamp(1_200)).unwrap();
//! game.flip(DeckPosition(2), Timestamp(1_300)).unwrap();
//! game.tick(Timestamp(2_200));
//! assert_eq!(game.pairs_found(), 1);
//! assert_eq!(game.phase(), Phase::Playing);
//! ```
//!
//! ## Modules
//!
//! - `core`: terms and parsing, RNG, clock, configuration, errors
//! - `deck`: board construction (deck, pair map, display order)
//! - `game`: session state machine, flip/resolve cycle, stats
//! - `view`: render model for an external renderer

pub mod core;
pub mod deck;
pub mod game;
pub mod view;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    Clock, ManualClock, SystemClock, Timestamp,
    GameConfig, PairProfile,
    GameRng, GameRngState,
    Separator, Term, TermList,
    ConfigError, GameError, SnapshotError, ValidationError,
};

pub use crate::deck::{Board, DeckPosition, PairId, VisualSlot};

pub use crate::game::{
    Celebration, FlipOutcome, GameSession, Pending, Phase, Resolution, SessionSnapshot, SessionStats,
    TickEvent,
};

pub use crate::view::{BoardView, GridLayout, TileFace, TileView};
