//! Render model handed to an external renderer.
//!
//! Nothing here mutates the session; views are rebuilt every frame.

mod board_view;
mod layout;

pub use board_view::{BoardView, TileFace, TileView};
pub use layout::GridLayout;
pub use crate::game::{Celebration, SessionStats as StatsView};
