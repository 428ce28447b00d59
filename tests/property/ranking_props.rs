//! Ranking order and deduplication invariants.

use proptest::prelude::*;
use std::collections::HashSet;
use talpa::{rank_matches, EntityId, EntityRecord, Match, MatchedVia, QGramIndex};

/// Build a store with the given scores; entity i+1 gets scores[i].
fn store_from_scores(scores: &[i64]) -> QGramIndex {
    let records: Vec<EntityRecord> = scores
        .iter()
        .enumerate()
        .map(|(i, &score)| EntityRecord {
            name: format!("entity{}", i),
            score,
            ..EntityRecord::default()
        })
        .collect();
    QGramIndex::build(3, records, false).unwrap()
}

fn matches_strategy() -> impl Strategy<Value = (Vec<i64>, Vec<(u32, u32)>)> {
    prop::collection::vec(0i64..100, 1..10).prop_flat_map(|scores| {
        let n = scores.len() as u32;
        let matches = prop::collection::vec((1..=n, 0u32..4), 0..20);
        (Just(scores), matches)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Ranked output is sorted by (ped asc, score desc) and entity-unique.
    #[test]
    fn ranking_is_sorted_and_unique((scores, raw) in matches_strategy()) {
        let index = store_from_scores(&scores);
        let matches: Vec<Match> = raw
            .iter()
            .map(|&(entity, ped)| Match {
                entity_id: EntityId(entity),
                ped,
                matched_via: MatchedVia::Name,
            })
            .collect();

        let ranked = rank_matches(matches, index.store());

        let mut seen = HashSet::new();
        for m in &ranked {
            prop_assert!(seen.insert(m.entity_id));
        }

        for pair in ranked.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let score = |m: &Match| index.store().get(m.entity_id).unwrap().score;
            prop_assert!(a.ped <= b.ped);
            if a.ped == b.ped {
                prop_assert!(score(a) >= score(b));
            }
        }
    }

    /// Each surviving match carries the minimum ped its entity was seen with.
    #[test]
    fn dedup_keeps_the_best_ped((scores, raw) in matches_strategy()) {
        let index = store_from_scores(&scores);
        let matches: Vec<Match> = raw
            .iter()
            .map(|&(entity, ped)| Match {
                entity_id: EntityId(entity),
                ped,
                matched_via: MatchedVia::Name,
            })
            .collect();

        let ranked = rank_matches(matches.clone(), index.store());

        for m in &ranked {
            let best = matches
                .iter()
                .filter(|c| c.entity_id == m.entity_id)
                .map(|c| c.ped)
                .min()
                .unwrap();
            prop_assert_eq!(m.ped, best);
        }

        // Nothing disappears: every input entity is represented.
        let input_entities: HashSet<EntityId> =
            matches.iter().map(|m| m.entity_id).collect();
        prop_assert_eq!(ranked.len(), input_entities.len());
    }
}

#[test]
fn full_ties_preserve_input_order() {
    let index = store_from_scores(&[5, 5, 5, 5]);
    let order = [3u32, 1, 4, 2];
    let matches: Vec<Match> = order
        .iter()
        .map(|&entity| Match {
            entity_id: EntityId(entity),
            ped: 1,
            matched_via: MatchedVia::Name,
        })
        .collect();

    let ranked = rank_matches(matches, index.store());
    let got: Vec<u32> = ranked.iter().map(|m| m.entity_id.get()).collect();
    assert_eq!(got, vec![3, 1, 4, 2]);
}
