//! Grid sizing for the board.

use serde::{Deserialize, Serialize};

/// Column counts for a board of a given size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLayout {
    /// Tiles per row on a wide screen.
    pub columns: usize,
    /// Tiles per row on a narrow screen.
    pub compact_columns: usize,
}

impl GridLayout {
    #[must_use]
    pub const fn for_card_count(cards: usize) -> Self {
        let (columns, compact_columns) = match cards {
            0..=20 => (6, 4),
            21..=40 => (8, 5),
            _ => (10, 5),
        };
        Self {
            columns,
            compact_columns,
        }
    }

    /// Number of rows needed at full width.
    #[must_use]
    pub const fn rows(&self, cards: usize) -> usize {
        cards.div_ceil(self.columns)
    }
}
