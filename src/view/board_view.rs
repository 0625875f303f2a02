//! Render model for the board.
//!
//! The renderer draws exactly what `BoardView` describes: face-down tiles
//! carry their 1-based slot number, face-up tiles carry the term and an
//! optional image. Images that fail to load fall back to
//! `TileView::fallback_caption`; one broken image never affects the rest of
//! the board.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::layout::GridLayout;
use crate::core::Timestamp;
use crate::deck::VisualSlot;
use crate::game::{GameSession, Phase, SessionStats};

/// What a tile shows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileFace {
    /// Blank tile during the shuffle animation.
    Ghost,
    /// Face down, showing the slot number.
    Down { label: usize },
    /// Face up.
    Up {
        text: String,
        image_url: Option<String>,
        matched: bool,
    },
}

/// One tile, in visual-slot order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileView {
    pub slot: VisualSlot,
    pub face: TileFace,
    /// Clicking this tile would be accepted right now.
    pub clickable: bool,
}

impl TileView {
    /// Caption to show when the tile's image cannot be displayed.
    #[must_use]
    pub fn fallback_caption(&self) -> Option<String> {
        match &self.face {
            TileFace::Up {
                text,
                image_url: Some(_),
                ..
            } => Some(format!("{text} (imagen no disponible)")),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_face_up(&self) -> bool {
        matches!(self.face, TileFace::Up { .. })
    }
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    pub phase: Phase,
    pub tiles: Vec<TileView>,
    pub stats: SessionStats,
    pub layout: GridLayout,
    /// "Reveal all" would be accepted right now.
    pub can_reveal: bool,
}

impl BoardView {
    /// Describe the session as of `now`.
    ///
    /// Does not apply due timers; call `GameSession::tick` first.
    #[must_use]
    pub fn new(session: &GameSession, now: Timestamp) -> Self {
        let phase = session.phase();
        let interactive = phase.accepts_input() && session.pending().is_none();

        let tiles = match session.board() {
            None => Vec::new(),
            Some(board) if phase == Phase::Shuffling => (0..board.len())
                .map(|i| TileView {
                    slot: VisualSlot(i),
                    face: TileFace::Ghost,
                    clickable: false,
                })
                .collect(),
            Some(board) => board
                .order()
                .iter()
                .enumerate()
                .map(|(i, &pos)| {
                    let slot = VisualSlot(i);
                    match board.term(pos) {
                        Some(term) if session.is_face_up(pos) => TileView {
                            slot,
                            face: TileFace::Up {
                                text: term.text.clone(),
                                image_url: term.image_url.clone(),
                                matched: session.is_matched(pos),
                            },
                            clickable: false,
                        },
                        _ => TileView {
                            slot,
                            face: TileFace::Down { label: slot.label() },
                            clickable: interactive,
                        },
                    }
                })
                .collect(),
        };

        Self {
            phase,
            layout: GridLayout::for_card_count(tiles.len()),
            tiles,
            stats: session.stats(now),
            can_reveal: interactive,
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Tiles split into display rows.
    pub fn rows(&self) -> impl Iterator<Item = &[TileView]> {
        self.tiles.chunks(self.layout.columns.max(1))
    }

    /// Plain-text rendering, one grid row per line.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "[{}] {}", self.phase, self.stats);
        for row in self.rows() {
            let cells: Vec<String> = row
                .iter()
                .map(|tile| match &tile.face {
                    TileFace::Ghost => "··".to_string(),
                    TileFace::Down { label } => format!("{label:>2}"),
                    TileFace::Up { text, matched: true, .. } => format!("*{text}*"),
                    TileFace::Up { text, .. } => text.clone(),
                })
                .collect();
            let _ = writeln!(out, "{}", cells.join(" | "));
        }
        if self.is_finished() {
            let _ = writeln!(
                out,
                "¡Completado! {} intentos en {}s",
                self.stats.attempts,
                self.stats.elapsed_secs()
            );
        }
        out
    }
}

impl std::fmt::Display for BoardView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;
    use crate::deck::DeckPosition;

    fn session() -> GameSession {
        let config = GameConfig::default().with_pair_counts(vec![2]).with_seed(1);
        let mut session = GameSession::new(config);
        session.set_terms("Hola | https://x/img.png\nMundo");
        session
    }

    #[test]
    fn test_setup_has_no_tiles() {
        let view = BoardView::new(&session(), Timestamp(0));
        assert_eq!(view.phase, Phase::Setup);
        assert!(view.tiles.is_empty());
        assert!(!view.can_reveal);
    }

    #[test]
    fn test_shuffling_shows_ghosts() {
        let mut s = session();
        s.build_board(Timestamp(0)).unwrap();
        let view = BoardView::new(&s, Timestamp(100));
        assert_eq!(view.tiles.len(), 4);
        assert!(view.tiles.iter().all(|t| t.face == TileFace::Ghost && !t.clickable));
    }

    #[test]
    fn test_face_down_labels_are_slot_numbers() {
        let mut s = session();
        s.build_board(Timestamp(0)).unwrap();
        s.tick(Timestamp(1_200));
        let view = BoardView::new(&s, Timestamp(1_200));
        let labels: Vec<_> = view
            .tiles
            .iter()
            .map(|t| match t.face {
                TileFace::Down { label } => label,
                _ => 0,
            })
            .collect();
        assert_eq!(labels, vec![1, 2, 3, 4]);
        assert!(view.can_reveal);
    }

    #[test]
    fn test_face_up_tile_carries_term() {
        let mut s = session();
        s.build_board(Timestamp(0)).unwrap();
        s.flip(DeckPosition(0), Timestamp(1_200)).unwrap();

        let slot = s.board().unwrap().slot_of(DeckPosition(0)).unwrap();
        let view = BoardView::new(&s, Timestamp(1_300));
        let tile = &view.tiles[slot.0];
        assert_eq!(
            tile.face,
            TileFace::Up {
                text: "Hola".into(),
                image_url: Some("https://x/img.png".into()),
                matched: false
            }
        );
        assert!(!tile.clickable);
        assert_eq!(tile.fallback_caption().as_deref(), Some("Hola (imagen no disponible)"));
    }

    #[test]
    fn test_pending_resolution_locks_board() {
        let mut s = session();
        s.build_board(Timestamp(0)).unwrap();
        s.flip(DeckPosition(0), Timestamp(1_200)).unwrap();
        s.flip(DeckPosition(1), Timestamp(1_200)).unwrap();

        let view = BoardView::new(&s, Timestamp(1_300));
        assert!(view.tiles.iter().all(|t| !t.clickable));
        assert!(!view.can_reveal);
    }

    #[test]
    fn test_render_text_finished() {
        let mut s = session();
        s.build_board(Timestamp(0)).unwrap();
        s.flip(DeckPosition(0), Timestamp(1_200)).unwrap();
        s.flip(DeckPosition(2), Timestamp(1_200)).unwrap();
        s.flip(DeckPosition(1), Timestamp(2_100)).unwrap();
        s.flip(DeckPosition(3), Timestamp(2_100)).unwrap();
        s.tick(Timestamp(3_000));

        let view = BoardView::new(&s, Timestamp(9_000));
        assert!(view.is_finished());
        let text = view.to_string();
        assert!(text.contains("*Hola*"));
        assert!(text.contains("*Mundo*"));
        assert!(text.contains("¡Completado! 2 intentos en 3s"));
    }
}
