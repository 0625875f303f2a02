//! The game session: one owned state object per player.
//!
//! ## Flip cycle
//!
//! 1. `flip` turns a card face up.
//! 2. The second face-up card counts an attempt and schedules a resolution
//!    `resolve_delay` in the future. Further flips are rejected until then.
//! 3. `tick` (called at the start of every operation, and by the front end
//!    on every render) settles the pair once its deadline has passed:
//!    matching cards stay up, anything else flips back down.
//!
//! `reveal_all` schedules the same kind of deadline but never compares
//! cards and never counts an attempt.
//!
//! ## Timers
//!
//! There are two deadlines: the end of the shuffle display and the pending
//! resolution. Both are stored timestamps checked against the `now` passed
//! in by the caller. A due deadline is always applied before the input that
//! accompanies it.

use std::time::Duration;

use im::OrdSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use super::celebration::Celebration;
use super::phase::Phase;
use super::tracker::SessionStats;
use crate::core::{
    GameConfig, GameError, GameRng, GameRngState, SnapshotError, TermList, Timestamp, ValidationError,
};
use crate::deck::{build_board, Board, DeckPosition, PairId, VisualSlot};

/// A scheduled resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pending {
    /// Two unmatched cards are up and will be compared.
    Comparison {
        first: DeckPosition,
        second: DeckPosition,
        due: Timestamp,
    },
    /// "Reveal all" preview; nothing is compared.
    Preview { due: Timestamp },
}

impl Pending {
    #[must_use]
    pub const fn due(&self) -> Timestamp {
        match self {
            Pending::Comparison { due, .. } | Pending::Preview { due } => *due,
        }
    }
}

/// What a flip did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipOutcome {
    /// First card of an attempt is up.
    First,
    /// Second card is up; the pair resolves at `resolve_at`.
    Second { resolve_at: Timestamp },
}

/// How a pending resolution settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Match { pair: PairId, positions: [DeckPosition; 2] },
    Mismatch { positions: [DeckPosition; 2] },
    PreviewEnded,
}

/// Timer-driven change applied by `tick`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickEvent {
    ShuffleEnded,
    Resolved(Resolution),
}

/// Complete state of one playthrough, plus the setup-panel inputs.
#[derive(Clone, Debug)]
pub struct GameSession {
    config: GameConfig,

    // === Setup inputs (survive reset) ===
    terms_raw: String,
    pair_count: usize,

    // === Per-game state ===
    phase: Phase,
    board: Option<Board>,
    /// Unmatched face-up positions, in flip order.
    face_up: SmallVec<[DeckPosition; 2]>,
    matched: OrdSet<DeckPosition>,
    attempts: u32,
    pending: Option<Pending>,
    started_at: Option<Timestamp>,
    shuffle_until: Option<Timestamp>,
    finished_at: Option<Timestamp>,

    // === Randomness ===
    shuffle_rng: GameRng,
    celebration_rng: GameRng,
}

impl GameSession {
    /// New session in `setup`, seeded from the config (or the OS).
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let base = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        Self {
            terms_raw: String::new(),
            pair_count: config.default_pair_count,
            phase: Phase::Setup,
            board: None,
            face_up: SmallVec::new(),
            matched: OrdSet::new(),
            attempts: 0,
            pending: None,
            started_at: None,
            shuffle_until: None,
            finished_at: None,
            shuffle_rng: base.for_context("shuffle"),
            celebration_rng: base.for_context("celebration"),
            config,
        }
    }

    // === Setup ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Replace the raw term text.
    pub fn set_terms(&mut self, raw: impl Into<String>) {
        self.terms_raw = raw.into();
    }

    #[must_use]
    pub fn terms_raw(&self) -> &str {
        &self.terms_raw
    }

    /// Parse the current term text.
    #[must_use]
    pub fn term_list(&self) -> TermList {
        TermList::parse(&self.terms_raw, &self.config.separators)
    }

    /// Select a pair count from the configured set.
    pub fn set_pair_count(&mut self, pair_count: usize) -> Result<(), ValidationError> {
        if !self.config.allows(pair_count) {
            return Err(ValidationError::UnsupportedPairCount {
                requested: pair_count,
                allowed: self.config.pair_counts.clone(),
            });
        }
        self.pair_count = pair_count;
        Ok(())
    }

    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.pair_count
    }

    /// Build a fresh board from the current terms and pair count.
    ///
    /// On success the previous game (if any) is discarded and the session
    /// enters `shuffling`. On failure nothing changes.
    pub fn build_board(&mut self, now: Timestamp) -> Result<(), ValidationError> {
        if !self.config.allows(self.pair_count) {
            let err = ValidationError::UnsupportedPairCount {
                requested: self.pair_count,
                allowed: self.config.pair_counts.clone(),
            };
            warn!(%err, "board not built");
            return Err(err);
        }

        let terms = self.term_list();
        let board = match build_board(terms.terms(), self.pair_count, &mut self.shuffle_rng) {
            Ok(board) => board,
            Err(err) => {
                warn!(%err, "board not built");
                return Err(err);
            }
        };

        info!(pairs = board.pair_count(), tiles = board.len(), "board built");

        self.clear_game();
        self.board = Some(board);
        self.phase = Phase::Shuffling;
        self.started_at = Some(now);
        self.shuffle_until = Some(now + self.config.shuffle_display());
        self.check_invariants();
        Ok(())
    }

    /// Drop the current game and return to `setup`. Setup inputs are kept.
    pub fn reset(&mut self) {
        info!(phase = %self.phase, "session reset");
        self.clear_game();
        self.phase = Phase::Setup;
    }

    fn clear_game(&mut self) {
        self.board = None;
        self.face_up.clear();
        self.matched = OrdSet::new();
        self.attempts = 0;
        self.pending = None;
        self.started_at = None;
        self.shuffle_until = None;
        self.finished_at = None;
    }

    // === Timers ===

    /// Apply whichever deadline has passed.
    pub fn tick(&mut self, now: Timestamp) -> Option<TickEvent> {
        if self.phase == Phase::Shuffling {
            return match self.shuffle_until {
                Some(until) if now >= until => {
                    self.phase = Phase::Playing;
                    self.shuffle_until = None;
                    debug!("shuffle ended, playing");
                    Some(TickEvent::ShuffleEnded)
                }
                _ => None,
            };
        }

        self.resolve_if_due(now).map(TickEvent::Resolved)
    }

    /// Settle the pending comparison or preview if its deadline has passed.
    pub fn resolve_if_due(&mut self, now: Timestamp) -> Option<Resolution> {
        let pending = self.pending.filter(|p| now >= p.due())?;

        let resolution = match pending {
            Pending::Comparison { first, second, .. } => {
                let pair = self.board.as_ref().and_then(|board| {
                    board.is_pair(first, second).then(|| board.pair_id(first)).flatten()
                });
                match pair {
                    Some(pair) => {
                        self.matched.insert(first);
                        self.matched.insert(second);
                        Resolution::Match {
                            pair,
                            positions: [first, second],
                        }
                    }
                    None => Resolution::Mismatch {
                        positions: [first, second],
                    },
                }
            }
            Pending::Preview { .. } => Resolution::PreviewEnded,
        };

        self.face_up.clear();
        self.pending = None;
        debug!(?resolution, attempts = self.attempts, "resolved");

        if self.all_matched() {
            self.phase = Phase::Finished;
            self.finished_at = Some(pending.due());
            info!(attempts = self.attempts, pairs = self.matched.len() / 2, "all pairs found");
        }

        self.check_invariants();
        Some(resolution)
    }

    // === Player input ===

    /// Turn the card at a deck position face up.
    pub fn flip(&mut self, pos: DeckPosition, now: Timestamp) -> Result<FlipOutcome, GameError> {
        self.tick(now);
        self.ensure_interactive("flip")?;

        let deck_len = self.board.as_ref().map_or(0, Board::len);
        if pos.0 >= deck_len {
            return Err(GameError::PositionOutOfRange {
                position: pos.0,
                deck_len,
            });
        }
        if self.matched.contains(&pos) {
            return Err(GameError::AlreadyMatched(pos.0));
        }
        if self.face_up.contains(&pos) {
            return Err(GameError::AlreadyFaceUp(pos.0));
        }

        self.face_up.push(pos);
        debug!(position = pos.0, face_up = self.face_up.len(), "flip");

        let outcome = match *self.face_up.as_slice() {
            [first, second] => {
                self.attempts += 1;
                let due = now + self.config.resolve_delay();
                self.pending = Some(Pending::Comparison { first, second, due });
                FlipOutcome::Second { resolve_at: due }
            }
            _ => FlipOutcome::First,
        };

        self.check_invariants();
        Ok(outcome)
    }

    /// Flip the card shown in an on-screen slot.
    pub fn flip_slot(&mut self, slot: VisualSlot, now: Timestamp) -> Result<FlipOutcome, GameError> {
        self.tick(now);
        self.ensure_interactive("flip")?;

        let board = self.board.as_ref().ok_or(GameError::WrongPhase {
            action: "flip",
            phase: self.phase,
        })?;
        let pos = board.position_at(slot).ok_or(GameError::PositionOutOfRange {
            position: slot.0,
            deck_len: board.len(),
        })?;
        self.flip(pos, now)
    }

    /// Show every card for `reveal_duration`, then hide the unmatched ones.
    ///
    /// Returns when the preview ends. Does not count as an attempt.
    pub fn reveal_all(&mut self, now: Timestamp) -> Result<Timestamp, GameError> {
        self.tick(now);
        self.ensure_interactive("reveal all")?;

        let board = self.board.as_ref().ok_or(GameError::WrongPhase {
            action: "reveal all",
            phase: self.phase,
        })?;

        self.face_up = board.positions().filter(|p| !self.matched.contains(p)).collect();
        let due = now + self.config.reveal_duration();
        self.pending = Some(Pending::Preview { due });
        debug!(until = %due, "reveal all");

        self.check_invariants();
        Ok(due)
    }

    fn ensure_interactive(&self, action: &'static str) -> Result<(), GameError> {
        if !self.phase.accepts_input() {
            return Err(GameError::WrongPhase {
                action,
                phase: self.phase,
            });
        }
        if self.pending.is_some() {
            return Err(GameError::ResolutionPending);
        }
        Ok(())
    }

    /// Pick a celebration effect from its own random stream.
    pub fn celebrate(&mut self) -> Celebration {
        Celebration::pick(&mut self.celebration_rng)
    }

    // === Queries ===

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    #[must_use]
    pub fn pending(&self) -> Option<&Pending> {
        self.pending.as_ref()
    }

    /// Deadline of the pending resolution.
    #[must_use]
    pub fn resolve_at(&self) -> Option<Timestamp> {
        self.pending.map(|p| p.due())
    }

    /// Deadline of the shuffle display.
    #[must_use]
    pub fn shuffle_until(&self) -> Option<Timestamp> {
        self.shuffle_until
    }

    /// Earliest deadline the front end should wake up for.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.shuffle_until.or_else(|| self.resolve_at())
    }

    #[must_use]
    pub fn is_matched(&self, pos: DeckPosition) -> bool {
        self.matched.contains(&pos)
    }

    /// Whether the card is showing its face (matched or temporarily up).
    #[must_use]
    pub fn is_face_up(&self, pos: DeckPosition) -> bool {
        self.matched.contains(&pos) || self.face_up.contains(&pos)
    }

    /// Matched positions, ascending.
    pub fn matched(&self) -> impl Iterator<Item = DeckPosition> + '_ {
        self.matched.iter().copied()
    }

    /// Face-up cards that are not yet matched, in flip order.
    #[must_use]
    pub fn unmatched_face_up(&self) -> &[DeckPosition] {
        &self.face_up
    }

    /// Every face-up position (matched plus temporarily up), ascending.
    #[must_use]
    pub fn face_up_positions(&self) -> Vec<DeckPosition> {
        let mut all: Vec<_> = self.matched.iter().copied().chain(self.face_up.iter().copied()).collect();
        all.sort_unstable();
        all
    }

    #[must_use]
    pub fn pairs_found(&self) -> usize {
        self.matched.len() / 2
    }

    fn all_matched(&self) -> bool {
        self.board
            .as_ref()
            .is_some_and(|b| !b.is_empty() && self.matched.len() == b.len())
    }

    /// Time since the board was built; frozen once finished.
    #[must_use]
    pub fn elapsed(&self, now: Timestamp) -> Duration {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => end.saturating_since(start),
            (Some(start), None) => now.saturating_since(start),
            _ => Duration::ZERO,
        }
    }

    #[must_use]
    pub fn stats(&self, now: Timestamp) -> SessionStats {
        SessionStats {
            pairs_found: self.pairs_found(),
            total_pairs: self.board.as_ref().map_or(0, Board::pair_count),
            attempts: self.attempts,
            elapsed: self.elapsed(now),
        }
    }

    fn check_invariants(&self) {
        debug_assert_eq!(self.matched.len() % 2, 0, "matched grows in pairs");
        debug_assert!(
            self.face_up.iter().all(|p| !self.matched.contains(p)),
            "face-up buffer holds only unmatched cards"
        );
        debug_assert!(
            matches!(self.pending, Some(Pending::Preview { .. })) || self.face_up.len() <= 2,
            "at most two unmatched cards up outside a preview"
        );
        debug_assert!(
            self.face_up.len() < 2 || self.pending.is_some(),
            "two cards up always schedules a resolution"
        );
        debug_assert!(
            self.board
                .as_ref()
                .map_or(self.face_up.is_empty() && self.matched.is_empty(), |b| {
                    self.face_up.iter().chain(self.matched.iter()).all(|&p| b.contains(p))
                }),
            "positions stay inside the deck"
        );
        debug_assert_eq!(self.board.is_some(), self.phase.has_board());
    }

    // === Snapshots ===

    /// Capture the full session.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            config: self.config.clone(),
            terms_raw: self.terms_raw.clone(),
            pair_count: self.pair_count,
            phase: self.phase,
            board: self.board.clone(),
            face_up: self.face_up.clone(),
            matched: self.matched.clone(),
            attempts: self.attempts,
            pending: self.pending,
            started_at: self.started_at,
            shuffle_until: self.shuffle_until,
            finished_at: self.finished_at,
            shuffle_rng: self.shuffle_rng.state(),
            celebration_rng: self.celebration_rng.state(),
        }
    }

    /// Rebuild a session from a snapshot.
    ///
    /// Snapshots may come from an untrusted store, so the board, positions,
    /// pending resolution and phase are checked against each other first.
    pub fn restore(snapshot: SessionSnapshot) -> Result<Self, SnapshotError> {
        snapshot.check().map_err(SnapshotError::Inconsistent)?;

        let session = Self {
            shuffle_rng: GameRng::from_state(&snapshot.shuffle_rng),
            celebration_rng: GameRng::from_state(&snapshot.celebration_rng),
            config: snapshot.config,
            terms_raw: snapshot.terms_raw,
            pair_count: snapshot.pair_count,
            phase: snapshot.phase,
            board: snapshot.board,
            face_up: snapshot.face_up,
            matched: snapshot.matched,
            attempts: snapshot.attempts,
            pending: snapshot.pending,
            started_at: snapshot.started_at,
            shuffle_until: snapshot.shuffle_until,
            finished_at: snapshot.finished_at,
        };
        session.check_invariants();
        Ok(session)
    }

    /// Encode for a front end's per-user in-memory store.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(&self.snapshot())?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: SessionSnapshot = bincode::deserialize(bytes)?;
        Self::restore(snapshot)
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

/// Serializable form of a `GameSession`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub config: GameConfig,
    pub terms_raw: String,
    pub pair_count: usize,
    pub phase: Phase,
    pub board: Option<Board>,
    pub face_up: SmallVec<[DeckPosition; 2]>,
    pub matched: OrdSet<DeckPosition>,
    pub attempts: u32,
    pub pending: Option<Pending>,
    pub started_at: Option<Timestamp>,
    pub shuffle_until: Option<Timestamp>,
    pub finished_at: Option<Timestamp>,
    pub shuffle_rng: GameRngState,
    pub celebration_rng: GameRngState,
}

impl SessionSnapshot {
    /// Consistency of a decoded snapshot.
    fn check(&self) -> Result<(), String> {
        self.config.validate().map_err(|err| format!("config: {err}"))?;

        if self.board.is_some() != self.phase.has_board() {
            return Err(format!("phase {} disagrees with board presence", self.phase));
        }

        let Some(board) = &self.board else {
            if !self.face_up.is_empty() || !self.matched.is_empty() || self.pending.is_some() {
                return Err("cards are up without a board".into());
            }
            return Ok(());
        };
        board.check()?;

        let pending_positions = match self.pending {
            Some(Pending::Comparison { first, second, .. }) => vec![first, second],
            _ => Vec::new(),
        };
        if let Some(pos) = self
            .face_up
            .iter()
            .chain(self.matched.iter())
            .chain(pending_positions.iter())
            .find(|&&p| !board.contains(p))
        {
            return Err(format!("position {} is outside a deck of {}", pos.0, board.len()));
        }

        if self.matched.len() % 2 != 0 {
            return Err("odd number of matched cards".into());
        }
        if let Some(pos) = self
            .matched
            .iter()
            .find(|&&p| board.partner(p).map_or(true, |partner| !self.matched.contains(&partner)))
        {
            return Err(format!("position {} is matched without its partner", pos.0));
        }
        if self.face_up.iter().any(|p| self.matched.contains(p)) {
            return Err("a matched card is also in the face-up buffer".into());
        }

        match self.pending {
            Some(Pending::Comparison { first, second, .. }) => {
                if self.face_up.as_slice() != [first, second] {
                    return Err("pending comparison does not match the face-up cards".into());
                }
            }
            Some(Pending::Preview { .. }) => {}
            None if self.face_up.len() >= 2 => {
                return Err("two cards are up with nothing pending".into());
            }
            None => {}
        }

        let complete = self.matched.len() == board.len();
        if complete != (self.phase == Phase::Finished) {
            return Err(format!("phase {} disagrees with {} matched cards", self.phase, self.matched.len()));
        }
        if self.phase == Phase::Shuffling && self.shuffle_until.is_none() {
            return Err("shuffling without a shuffle deadline".into());
        }
        Ok(())
    }
}
