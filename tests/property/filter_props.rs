//! Recall regression for the candidate filter.
//!
//! The gram-count threshold is a pruning heuristic; these tests pin down
//! that it never throws away a true match in the regime it is exact for
//! (query longer than `q * delta` characters). Queries are built by
//! mutating real entity names, so the true distance is known by
//! construction.

use proptest::prelude::*;
use std::collections::HashSet;
use talpa::{qgram_threshold, EntityId, EntityRecord, QGramIndex};

const Q: usize = 3;

fn corpus_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set("[a-z]{4,10}", 1..15).prop_map(|set| set.into_iter().collect())
}

fn build(names: &[String]) -> QGramIndex {
    let records: Vec<EntityRecord> = names
        .iter()
        .map(|name| EntityRecord {
            name: name.clone(),
            score: 1,
            ..EntityRecord::default()
        })
        .collect();
    QGramIndex::build(Q, records, false).unwrap()
}

/// All strings one substitution away from `name` (over a small alphabet).
fn substitutions(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut out = Vec::new();
    for i in 0..chars.len() {
        for replacement in ['a', 'q', 'z'] {
            if chars[i] != replacement {
                let mut mutated = chars.clone();
                mutated[i] = replacement;
                out.push(mutated.into_iter().collect());
            }
        }
    }
    out
}

/// All strings one deletion away from `name`.
fn deletions(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    (0..chars.len())
        .map(|i| {
            let mut mutated = chars.clone();
            mutated.remove(i);
            mutated.into_iter().collect()
        })
        .collect()
}

/// All strings one insertion away from `name`.
fn insertions(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    (0..=chars.len())
        .map(|i| {
            let mut mutated = chars.clone();
            mutated.insert(i, 'x');
            mutated.into_iter().collect()
        })
        .collect()
}

fn assert_found(index: &QGramIndex, query: &str, delta: i32, expected: EntityId) {
    let result = index.find_matches(query, delta).unwrap();
    let found: HashSet<EntityId> = result.matches.iter().map(|m| m.entity_id).collect();
    assert!(
        found.contains(&expected),
        "true match pruned: query {:?} delta {} should reach entity {:?}",
        query,
        delta,
        expected
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Radius 1: every single-edit corruption of a name still finds it,
    /// whenever the corrupted query is longer than q * delta.
    #[test]
    fn single_edit_queries_are_never_pruned(names in corpus_strategy()) {
        let index = build(&names);

        for (i, name) in names.iter().enumerate() {
            let expected = EntityId(i as u32 + 1);

            let mut queries = substitutions(name);
            queries.extend(insertions(name));
            if name.len() > Q + 1 {
                queries.extend(deletions(name));
            }

            for query in queries {
                if query.len() > Q {
                    assert_found(&index, &query, 1, expected);
                }
            }
        }
    }

    /// Radius 2: two substitutions on long names still find the entity.
    #[test]
    fn double_edit_queries_are_never_pruned(names in corpus_strategy()) {
        let index = build(&names);

        for (i, name) in names.iter().enumerate() {
            if name.len() <= 2 * Q {
                continue;
            }
            let expected = EntityId(i as u32 + 1);
            let chars: Vec<char> = name.chars().collect();

            // Corrupt the first and the middle character.
            let mut mutated = chars.clone();
            mutated[0] = if chars[0] == 'q' { 'v' } else { 'q' };
            let mid = chars.len() / 2;
            mutated[mid] = if chars[mid] == 'q' { 'v' } else { 'q' };
            let query: String = mutated.into_iter().collect();

            assert_found(&index, &query, 2, expected);
        }
    }

    /// The threshold itself is monotone: more allowed edits never demand
    /// more shared grams, and longer queries never demand fewer.
    #[test]
    fn threshold_is_monotone(len in 0usize..40, q in 1usize..6, delta in 0u32..5) {
        let here = qgram_threshold(len, q, delta);
        prop_assert!(qgram_threshold(len, q, delta + 1) <= here);
        prop_assert!(qgram_threshold(len + 1, q, delta) >= here);
        prop_assert!(here >= 1);
    }
}
