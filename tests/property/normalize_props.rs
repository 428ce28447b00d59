//! Normalizer and gram extraction properties.

use proptest::prelude::*;
use talpa::{compute_qgrams, normalize, Padding, SENTINEL};

/// Mixed-case text with punctuation, digits and some accented Latin.
fn text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9_ ,.!?$àéöüÀÉÖÜß-]{0,30}").unwrap()
}

fn word_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z0-9]{0,12}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Normalization is idempotent.
    #[test]
    fn normalize_is_idempotent(text in text_strategy()) {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once);
    }

    /// Normalization is case-insensitive for ASCII.
    #[test]
    fn normalize_ignores_ascii_case(text in "[a-zA-Z0-9 ,!]{0,30}") {
        prop_assert_eq!(normalize(&text.to_uppercase()), normalize(&text));
    }

    /// Normalized output never contains the sentinel or non-word chars.
    #[test]
    fn normalize_output_is_word_chars_only(text in text_strategy()) {
        let normalized = normalize(&text);
        prop_assert!(normalized
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_'));
        prop_assert!(!normalized.contains(SENTINEL));
    }

    /// Two-sided gram count is padded length minus q plus one.
    #[test]
    fn two_sided_gram_count(word in word_strategy(), q in 1usize..6) {
        let grams = compute_qgrams(&word, q, Padding::TwoSided);
        let padded = normalize(&word).chars().count() + 2 * (q - 1);
        let expected = if padded >= q { padded - q + 1 } else { 0 };
        prop_assert_eq!(grams.len(), expected);
    }

    /// Prefix-padded gram count equals the normalized character count.
    #[test]
    fn prefix_gram_count_is_query_length(word in word_strategy(), q in 1usize..6) {
        let grams = compute_qgrams(&word, q, Padding::Prefix);
        prop_assert_eq!(grams.len(), normalize(&word).chars().count());
    }

    /// Every gram has exactly q characters.
    #[test]
    fn grams_have_length_q(word in word_strategy(), q in 1usize..6) {
        for padding in [Padding::TwoSided, Padding::Prefix] {
            for gram in compute_qgrams(&word, q, padding) {
                prop_assert_eq!(gram.chars().count(), q);
            }
        }
    }

    /// The prefix-padded gram sequence is a prefix of the two-sided one.
    #[test]
    fn prefix_grams_are_a_prefix_of_two_sided(word in word_strategy(), q in 1usize..6) {
        let prefix = compute_qgrams(&word, q, Padding::Prefix);
        let two_sided = compute_qgrams(&word, q, Padding::TwoSided);
        prop_assert!(prefix.len() <= two_sided.len());
        prop_assert_eq!(&two_sided[..prefix.len()], &prefix[..]);
    }
}
