//! Game controller: phases, the flip/resolve cycle, and session stats.
//!
//! All mutable state lives in one `GameSession`. Front ends create one per
//! player and call into it from their event handlers; nothing is global.

pub mod phase;
pub mod session;
pub mod tracker;
pub mod celebration;

pub use phase::Phase;
pub use session::{FlipOutcome, GameSession, Pending, Resolution, SessionSnapshot, TickEvent};
pub use tracker::SessionStats;
pub use celebration::Celebration;
