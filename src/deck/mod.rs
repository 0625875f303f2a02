//! Deck construction.
//!
//! A board of `N` pairs is the first `N` terms followed by the same `N`
//! terms again. Deck positions `p` and `p + N` share pair id `p mod N`.
//! A random `Order` maps on-screen slots to deck positions.

mod board;

pub use board::{build_board, Board, DeckPosition, PairId, VisualSlot};
