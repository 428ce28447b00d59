//! Bounded PED against a brute-force oracle.

use proptest::prelude::*;
use talpa::prefix_edit_distance;

/// Textbook O(nm) Levenshtein, no bounds, no bands.
fn levenshtein(a: &[char], b: &[char]) -> u32 {
    let mut prev: Vec<u32> = (0..=b.len() as u32).collect();
    let mut cur = vec![0u32; b.len() + 1];
    for (i, &ac) in a.iter().enumerate() {
        cur[0] = i as u32 + 1;
        for (j, &bc) in b.iter().enumerate() {
            let cost = u32::from(ac != bc);
            cur[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(cur[j] + 1);
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[b.len()]
}

/// Oracle: minimum distance over every prefix of the candidate.
fn naive_ped(query: &str, candidate: &str) -> u32 {
    let x: Vec<char> = query.chars().collect();
    let y: Vec<char> = candidate.chars().collect();
    (0..=y.len())
        .map(|k| levenshtein(&x, &y[..k]))
        .min()
        .expect("at least the empty prefix")
}

fn word_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[ab]{0,8}").unwrap()
}

fn wide_word_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{0,12}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Over a tiny alphabet (dense edit-distance collisions), the bounded
    /// computation agrees with the oracle inside the radius and returns the
    /// sentinel outside it.
    #[test]
    fn bounded_ped_matches_oracle(
        query in word_strategy(),
        candidate in word_strategy(),
        delta in 0u32..4,
    ) {
        let exact = naive_ped(&query, &candidate);
        let bounded = prefix_edit_distance(&query, &candidate, delta);
        if exact <= delta {
            prop_assert_eq!(bounded, exact);
        } else {
            prop_assert_eq!(bounded, delta + 1);
        }
    }

    /// Same agreement over a wide alphabet.
    #[test]
    fn bounded_ped_matches_oracle_wide(
        query in wide_word_strategy(),
        candidate in wide_word_strategy(),
        delta in 0u32..3,
    ) {
        let exact = naive_ped(&query, &candidate);
        let bounded = prefix_edit_distance(&query, &candidate, delta);
        if exact <= delta {
            prop_assert_eq!(bounded, exact);
        } else {
            prop_assert_eq!(bounded, delta + 1);
        }
    }

    /// A string is always distance zero from itself and from any extension.
    #[test]
    fn self_and_extension_are_distance_zero(
        word in "[a-z]{1,10}",
        suffix in "[a-z]{0,6}",
        delta in 0u32..3,
    ) {
        prop_assert_eq!(prefix_edit_distance(&word, &word, delta), 0);
        let extended = format!("{}{}", word, suffix);
        prop_assert_eq!(prefix_edit_distance(&word, &extended, delta), 0);
    }

    /// The result never exceeds the sentinel and the sentinel only appears
    /// when the true distance is out of radius.
    #[test]
    fn result_is_within_sentinel_range(
        query in wide_word_strategy(),
        candidate in wide_word_strategy(),
        delta in 0u32..3,
    ) {
        let bounded = prefix_edit_distance(&query, &candidate, delta);
        prop_assert!(bounded <= delta + 1);
    }
}
