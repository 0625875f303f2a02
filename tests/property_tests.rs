//! Property tests for board construction and the flip/resolve cycle.

use std::collections::BTreeSet;
use std::time::Duration;

use proptest::prelude::*;

use memorama::deck::build_board;
use memorama::{DeckPosition, GameConfig, GameRng, GameSession, Phase, Term, Timestamp};

const SHUFFLE_MS: u64 = 1_200;
const DELAY_MS: u64 = 900;

/// A player action with the time that passes before it.
#[derive(Clone, Debug)]
enum Step {
    Flip(usize),
    RevealAll,
    Wait(u64),
}

fn step_strategy(max_pos: usize) -> impl Strategy<Value = Step> {
    prop_oneof![
        6 => (0..max_pos + 2).prop_map(Step::Flip),
        1 => Just(Step::RevealAll),
        3 => (0..2_000u64).prop_map(Step::Wait),
    ]
}

fn terms(n: usize) -> Vec<Term> {
    (0..n).map(|i| Term::new(format!("t{i}"))).collect()
}

fn playing_session(pairs: usize, seed: u64) -> GameSession {
    let config = GameConfig::default()
        .with_pair_counts(vec![pairs])
        .with_seed(seed)
        .with_resolve_delay(DELAY_MS)
        .with_shuffle_display(SHUFFLE_MS);
    let mut session = GameSession::new(config);
    let raw: Vec<String> = (0..pairs).map(|i| format!("term {i}")).collect();
    session.set_terms(raw.join("\n"));
    session.build_board(Timestamp(0)).unwrap();
    session.tick(Timestamp(SHUFFLE_MS));
    assert_eq!(session.phase(), Phase::Playing);
    session
}

proptest! {
    #[test]
    fn prop_deck_has_two_of_each_pair(pairs in 1usize..=50, extra in 0usize..5, seed: u64) {
        let list = terms(pairs + extra);
        let board = build_board(&list, pairs, &mut GameRng::new(seed)).unwrap();

        prop_assert_eq!(board.len(), pairs * 2);

        let mut counts = vec![0usize; pairs];
        for pos in board.positions() {
            counts[board.pair_id(pos).unwrap().0] += 1;
        }
        prop_assert!(counts.iter().all(|&c| c == 2));
    }

    #[test]
    fn prop_order_is_bijection(pairs in 1usize..=50, seed: u64) {
        let board = build_board(&terms(pairs), pairs, &mut GameRng::new(seed)).unwrap();
        let seen: BTreeSet<usize> = board.order().iter().map(|p| p.0).collect();
        prop_assert_eq!(seen.len(), board.len());
        prop_assert_eq!(seen.into_iter().collect::<Vec<_>>(), (0..board.len()).collect::<Vec<_>>());
    }

    #[test]
    fn prop_too_few_terms_fails(pairs in 2usize..=50, short in 1usize..=50, seed: u64) {
        let have = short.min(pairs - 1);
        prop_assert!(build_board(&terms(have), pairs, &mut GameRng::new(seed)).is_err());
    }

    #[test]
    fn prop_flip_cycle_invariants(
        pairs in 1usize..=6,
        seed: u64,
        steps in prop::collection::vec(step_strategy(12), 1..120),
    ) {
        let mut session = playing_session(pairs, seed);
        let mut now = SHUFFLE_MS;

        for step in steps {
            let matched_before: BTreeSet<_> = session.matched().collect();
            let attempts_before = session.attempts();
            let unmatched_up_before = session.unmatched_face_up().len();
            let was_due = session.resolve_at().is_some_and(|t| Timestamp(now) >= t);

            match step {
                Step::Wait(ms) => {
                    now += ms;
                    let resolved = session.tick(Timestamp(now)).is_some();
                    if resolved {
                        // After a resolution only matched cards remain up.
                        let matched: Vec<_> = session.matched().collect();
                        prop_assert_eq!(session.face_up_positions(), matched);
                    }
                }
                Step::Flip(pos) => {
                    let result = session.flip(DeckPosition(pos), Timestamp(now));
                    if result.is_ok() && !was_due {
                        // A flip adds one card; the second of a pair counts one attempt.
                        prop_assert_eq!(session.unmatched_face_up().len(), unmatched_up_before + 1);
                        let expected = attempts_before + u32::from(unmatched_up_before == 1);
                        prop_assert_eq!(session.attempts(), expected);
                    }
                    if result.is_err() && !was_due {
                        prop_assert_eq!(session.attempts(), attempts_before);
                    }
                }
                Step::RevealAll => {
                    if session.reveal_all(Timestamp(now)).is_ok() && !was_due {
                        let preview_matched: BTreeSet<_> = session.matched().collect();
                        prop_assert_eq!(&preview_matched, &matched_before);
                        prop_assert_eq!(session.attempts(), attempts_before);
                        prop_assert_eq!(session.face_up_positions().len(), pairs * 2);
                    }
                }
            }

            // Matched never shrinks and grows in pairs.
            let matched_after: BTreeSet<_> = session.matched().collect();
            prop_assert!(matched_before.is_subset(&matched_after));
            prop_assert_eq!(matched_after.len() % 2, 0);

            // Attempts never decrease and move at most one per step.
            prop_assert!(session.attempts() >= attempts_before);
            prop_assert!(session.attempts() <= attempts_before + 1);

            // Outside a preview, at most two unmatched cards are up.
            if !matches!(session.pending(), Some(memorama::Pending::Preview { .. })) {
                prop_assert!(session.unmatched_face_up().len() <= 2);
            }

            // Finished exactly when every card is matched.
            prop_assert_eq!(session.phase() == Phase::Finished, matched_after.len() == pairs * 2);
        }
    }

    #[test]
    fn prop_perfect_play_finishes(pairs in 1usize..=20, seed: u64) {
        let mut session = playing_session(pairs, seed);
        let mut now = SHUFFLE_MS;

        for p in 0..pairs {
            session.flip(DeckPosition(p), Timestamp(now)).unwrap();
            session.flip(DeckPosition(p + pairs), Timestamp(now)).unwrap();
            now += DELAY_MS;
            session.tick(Timestamp(now));
            prop_assert_eq!(session.pairs_found(), p + 1);
        }

        prop_assert_eq!(session.phase(), Phase::Finished);
        prop_assert_eq!(session.attempts() as usize, pairs);
        prop_assert_eq!(
            session.elapsed(Timestamp(now + 10_000)),
            Duration::from_millis(now)
        );
    }
}
