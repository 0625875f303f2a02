//! Game bindings for Python.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::{Clock, GameConfig, SystemClock};
use crate::deck::VisualSlot;
use crate::game::{GameSession, SessionStats};
use crate::view::{BoardView, TileFace};

fn value_error(err: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Python wrapper for SessionStats.
#[pyclass(name = "Stats")]
#[derive(Clone, Debug)]
pub struct PyStats(pub SessionStats);

#[pymethods]
impl PyStats {
    #[getter]
    fn pairs_found(&self) -> usize {
        self.0.pairs_found
    }

    #[getter]
    fn total_pairs(&self) -> usize {
        self.0.total_pairs
    }

    #[getter]
    fn attempts(&self) -> u32 {
        self.0.attempts
    }

    #[getter]
    fn elapsed_secs(&self) -> u64 {
        self.0.elapsed_secs()
    }

    fn __repr__(&self) -> String {
        format!(
            "Stats(pairs={}/{}, attempts={}, elapsed={}s)",
            self.0.pairs_found,
            self.0.total_pairs,
            self.0.attempts,
            self.0.elapsed_secs()
        )
    }
}

/// Python wrapper for GameSession, driven by wall-clock time.
#[pyclass(name = "MemoryGame")]
pub struct PyMemoryGame {
    session: GameSession,
}

#[pymethods]
impl PyMemoryGame {
    /// Create a new game in the setup phase.
    ///
    /// # Arguments
    /// - pair_counts: Selectable pair counts (default: 5, 15, 20)
    /// - resolve_delay_ms: Delay before a flipped pair settles
    /// - seed: RNG seed, or None for a random board
    #[new]
    #[pyo3(signature = (pair_counts = None, resolve_delay_ms = 900, seed = None))]
    fn new(pair_counts: Option<Vec<usize>>, resolve_delay_ms: u64, seed: Option<u64>) -> PyResult<Self> {
        let mut config = GameConfig::default().with_resolve_delay(resolve_delay_ms);
        if let Some(counts) = pair_counts {
            config = config.with_pair_counts(counts);
        }
        config.seed = seed;
        config.validate().map_err(value_error)?;
        Ok(Self {
            session: GameSession::new(config),
        })
    }

    /// Replace the raw term text (one term per line).
    fn set_terms(&mut self, raw: &str) {
        self.session.set_terms(raw);
    }

    /// Number of valid terms in the current text.
    fn term_count(&self) -> usize {
        self.session.term_list().len()
    }

    /// Select a pair count. Raises ValueError if not allowed.
    fn set_pair_count(&mut self, pair_count: usize) -> PyResult<()> {
        self.session.set_pair_count(pair_count).map_err(value_error)
    }

    /// Build and shuffle a board. Raises ValueError if there are too few terms.
    fn build_board(&mut self) -> PyResult<()> {
        self.session.build_board(SystemClock.now()).map_err(value_error)
    }

    fn reset(&mut self) {
        self.session.reset();
    }

    /// Apply any due timer. Call once per render.
    ///
    /// Returns True if the state changed.
    fn tick(&mut self) -> bool {
        self.session.tick(SystemClock.now()).is_some()
    }

    /// Flip the tile in a 0-based visual slot. Raises ValueError if rejected.
    fn flip_slot(&mut self, slot: usize) -> PyResult<()> {
        self.session
            .flip_slot(VisualSlot(slot), SystemClock.now())
            .map(|_| ())
            .map_err(value_error)
    }

    /// Show every tile briefly. Raises ValueError if not allowed now.
    fn reveal_all(&mut self) -> PyResult<()> {
        self.session
            .reveal_all(SystemClock.now())
            .map(|_| ())
            .map_err(value_error)
    }

    /// Pick a celebration effect: "balloons", "success" or "snow".
    fn celebrate(&mut self) -> &'static str {
        match self.session.celebrate() {
            crate::game::Celebration::Balloons => "balloons",
            crate::game::Celebration::Success => "success",
            crate::game::Celebration::Snow => "snow",
        }
    }

    /// Tiles in visual order as (slot, label, text, image_url, matched).
    ///
    /// Face-down tiles have text None; ghost tiles during the shuffle have
    /// label 0.
    fn tiles(&self) -> Vec<(usize, usize, Option<String>, Option<String>, bool)> {
        BoardView::new(&self.session, SystemClock.now())
            .tiles
            .into_iter()
            .map(|tile| match tile.face {
                TileFace::Ghost => (tile.slot.0, 0, None, None, false),
                TileFace::Down { label } => (tile.slot.0, label, None, None, false),
                TileFace::Up {
                    text,
                    image_url,
                    matched,
                } => (tile.slot.0, tile.slot.label(), Some(text), image_url, matched),
            })
            .collect()
    }

    /// Columns per row for the current board.
    fn columns(&self) -> usize {
        BoardView::new(&self.session, SystemClock.now()).layout.columns
    }

    fn stats(&self) -> PyStats {
        PyStats(self.session.stats(SystemClock.now()))
    }

    /// Serialize the session for a per-user store.
    fn to_bytes(&self) -> PyResult<Vec<u8>> {
        self.session.to_bytes().map_err(value_error)
    }

    #[staticmethod]
    fn from_bytes(bytes: Vec<u8>) -> PyResult<Self> {
        let session = GameSession::from_bytes(&bytes).map_err(value_error)?;
        Ok(Self { session })
    }

    #[getter]
    fn phase(&self) -> &'static str {
        self.session.phase().as_str()
    }

    #[getter]
    fn pair_count(&self) -> usize {
        self.session.pair_count()
    }

    #[getter]
    fn attempts(&self) -> u32 {
        self.session.attempts()
    }

    fn __repr__(&self) -> String {
        format!(
            "MemoryGame(phase={}, pairs={}/{}, attempts={})",
            self.session.phase(),
            self.session.pairs_found(),
            self.session.board().map_or(0, |b| b.pair_count()),
            self.session.attempts()
        )
    }
}
