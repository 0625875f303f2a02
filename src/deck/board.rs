//! Board: deck, pair map, and display order.

use serde::{Deserialize, Serialize};

use crate::core::{GameRng, Term, ValidationError};

/// Index into the deck (`0..2N`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DeckPosition(pub usize);

impl DeckPosition {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for DeckPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pos({})", self.0)
    }
}

/// On-screen slot (`0..2N`). Face-down tiles show `label()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VisualSlot(pub usize);

impl VisualSlot {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }

    /// 1-based number printed on the face-down tile.
    #[must_use]
    pub const fn label(self) -> usize {
        self.0 + 1
    }
}

/// Identifier shared by the two positions holding the same term (`0..N`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PairId(pub usize);

/// A built board. Immutable until the next build or reset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    deck: Vec<Term>,
    pair_count: usize,
    /// Visual slot -> deck position.
    order: Vec<DeckPosition>,
}

/// Build a board of `pair_count` pairs from the first `pair_count` terms.
///
/// Excess terms are ignored. Fails without consuming randomness if there
/// are too few terms or no pairs are requested.
pub fn build_board(terms: &[Term], pair_count: usize, rng: &mut GameRng) -> Result<Board, ValidationError> {
    if pair_count == 0 {
        return Err(ValidationError::NoPairs);
    }
    let chosen = terms.get(..pair_count).ok_or(ValidationError::InsufficientTerms {
        found: terms.len(),
        required: pair_count,
    })?;

    let mut deck = Vec::with_capacity(pair_count * 2);
    deck.extend_from_slice(chosen);
    deck.extend_from_slice(chosen);

    let order = rng
        .permutation(deck.len())
        .into_iter()
        .map(DeckPosition)
        .collect();

    let board = Board {
        deck,
        pair_count,
        order,
    };
    debug_assert!(board.check().is_ok());
    Ok(board)
}

impl Board {
    /// Number of pairs `N`.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.pair_count
    }

    /// Number of tiles `2N`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.deck.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    #[must_use]
    pub fn contains(&self, pos: DeckPosition) -> bool {
        pos.0 < self.deck.len()
    }

    #[must_use]
    pub fn deck(&self) -> &[Term] {
        &self.deck
    }

    #[must_use]
    pub fn term(&self, pos: DeckPosition) -> Option<&Term> {
        self.deck.get(pos.0)
    }

    /// Pair id of a deck position.
    #[must_use]
    pub fn pair_id(&self, pos: DeckPosition) -> Option<PairId> {
        self.contains(pos).then(|| PairId(pos.0 % self.pair_count))
    }

    /// The other position holding the same term.
    #[must_use]
    pub fn partner(&self, pos: DeckPosition) -> Option<DeckPosition> {
        self.contains(pos)
            .then(|| DeckPosition((pos.0 + self.pair_count) % self.deck.len()))
    }

    /// Whether two distinct positions form a pair.
    #[must_use]
    pub fn is_pair(&self, a: DeckPosition, b: DeckPosition) -> bool {
        a != b && self.pair_id(a).is_some() && self.pair_id(a) == self.pair_id(b)
    }

    /// Display order: slot index -> deck position.
    #[must_use]
    pub fn order(&self) -> &[DeckPosition] {
        &self.order
    }

    #[must_use]
    pub fn position_at(&self, slot: VisualSlot) -> Option<DeckPosition> {
        self.order.get(slot.0).copied()
    }

    /// Inverse of `position_at`.
    #[must_use]
    pub fn slot_of(&self, pos: DeckPosition) -> Option<VisualSlot> {
        self.order.iter().position(|&p| p == pos).map(VisualSlot)
    }

    /// Positions in deck order.
    pub fn positions(&self) -> impl Iterator<Item = DeckPosition> {
        (0..self.deck.len()).map(DeckPosition)
    }

    /// Verify the structure: `2N` cards for `N > 0` pairs and an order
    /// that visits every position exactly once.
    pub fn check(&self) -> Result<(), String> {
        if self.pair_count == 0 {
            return Err("board has no pairs".into());
        }
        if self.deck.len() != self.pair_count * 2 {
            return Err(format!(
                "deck holds {} cards for {} pairs",
                self.deck.len(),
                self.pair_count
            ));
        }
        if self.order.len() != self.deck.len() {
            return Err(format!("order has {} slots for {} cards", self.order.len(), self.deck.len()));
        }
        let mut seen = vec![false; self.deck.len()];
        for pos in &self.order {
            match seen.get_mut(pos.0) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => return Err(format!("order repeats position {}", pos.0)),
                None => return Err(format!("order names position {} outside the deck", pos.0)),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(names: &[&str]) -> Vec<Term> {
        names.iter().map(|n| Term::new(*n)).collect()
    }

    #[test]
    fn test_two_pair_board() {
        let mut rng = GameRng::new(42);
        let board = build_board(&terms(&["A", "B"]), 2, &mut rng).unwrap();

        let texts: Vec<_> = board.deck().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["A", "B", "A", "B"]);

        let ids: Vec<_> = board.positions().map(|p| board.pair_id(p).unwrap().0).collect();
        assert_eq!(ids, vec![0, 1, 0, 1]);
    }

    #[test]
    fn test_excess_terms_dropped() {
        let mut rng = GameRng::new(1);
        let board = build_board(&terms(&["a", "b", "c", "d"]), 3, &mut rng).unwrap();
        assert_eq!(board.len(), 6);
        assert_eq!(board.pair_count(), 3);
        assert!(board.deck().iter().all(|t| t.text != "d"));
    }

    #[test]
    fn test_insufficient_terms() {
        let mut rng = GameRng::new(1);
        let err = build_board(&terms(&["a", "b"]), 5, &mut rng).unwrap_err();
        assert_eq!(err, ValidationError::InsufficientTerms { found: 2, required: 5 });
    }

    #[test]
    fn test_zero_pairs_refused() {
        let mut rng = GameRng::new(1);
        let err = build_board(&[], 0, &mut rng).unwrap_err();
        assert_eq!(err, ValidationError::NoPairs);
    }

    #[test]
    fn test_check_rejects_bad_structure() {
        let mut rng = GameRng::new(2);
        let good = build_board(&terms(&["a", "b"]), 2, &mut rng).unwrap();
        assert!(good.check().is_ok());

        let mut no_pairs = good.clone();
        no_pairs.pair_count = 0;
        assert!(no_pairs.check().is_err());

        let mut short_deck = good.clone();
        short_deck.deck.pop();
        assert!(short_deck.check().is_err());

        let mut repeated = good.clone();
        repeated.order[1] = repeated.order[0];
        assert!(repeated.check().unwrap_err().contains("repeats"));

        let mut outside = good;
        outside.order[0] = DeckPosition(9);
        assert!(outside.check().unwrap_err().contains("outside"));
    }

    #[test]
    fn test_order_is_bijection() {
        let mut rng = GameRng::new(99);
        let board = build_board(&terms(&["a", "b", "c", "d", "e"]), 5, &mut rng).unwrap();
        let mut order: Vec<_> = board.order().iter().map(|p| p.0).collect();
        order.sort_unstable();
        assert_eq!(order, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_slot_mapping_round_trips() {
        let mut rng = GameRng::new(5);
        let board = build_board(&terms(&["a", "b", "c"]), 3, &mut rng).unwrap();
        for slot in (0..board.len()).map(VisualSlot) {
            let pos = board.position_at(slot).unwrap();
            assert_eq!(board.slot_of(pos), Some(slot));
        }
        assert_eq!(board.position_at(VisualSlot(6)), None);
        assert_eq!(VisualSlot(0).label(), 1);
    }

    #[test]
    fn test_partner_and_pairs() {
        let mut rng = GameRng::new(5);
        let board = build_board(&terms(&["a", "b", "c"]), 3, &mut rng).unwrap();
        assert_eq!(board.partner(DeckPosition(1)), Some(DeckPosition(4)));
        assert_eq!(board.partner(DeckPosition(4)), Some(DeckPosition(1)));
        assert!(board.is_pair(DeckPosition(0), DeckPosition(3)));
        assert!(!board.is_pair(DeckPosition(0), DeckPosition(0)));
        assert!(!board.is_pair(DeckPosition(0), DeckPosition(1)));
        assert!(!board.is_pair(DeckPosition(6), DeckPosition(6)));
        assert_eq!(board.pair_id(DeckPosition(6)), None);
    }

    #[test]
    fn test_same_seed_same_order() {
        let list = terms(&["a", "b", "c", "d", "e"]);
        let a = build_board(&list, 5, &mut GameRng::new(8)).unwrap();
        let b = build_board(&list, 5, &mut GameRng::new(8)).unwrap();
        assert_eq!(a.order(), b.order());
    }
}
