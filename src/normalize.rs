//! Text normalization and q-gram extraction.
//!
//! Everything the index or a query sees goes through `normalize` first:
//! lowercase, keep only letters, digits and underscore. The result is padded
//! with a sentinel that normalization can never produce, then cut into
//! overlapping windows of length `q`.
//!
//! Entity names are padded on both sides so grams see both word boundaries.
//! Queries are padded on the left only: a query is a possibly-incomplete
//! prefix, and a trailing sentinel would penalize every name the query has
//! not finished typing yet.

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

/// Padding character used to mark string boundaries for gramming.
///
/// Normalization strips everything that is not alphanumeric or `_`, so `$`
/// can never collide with a character of a normalized string.
pub const SENTINEL: char = '$';

/// Which sides of a string receive sentinel padding before gramming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Padding {
    /// `q - 1` sentinels on both ends. Used for entity names at build time.
    TwoSided,
    /// `q - 1` sentinels in front only. Used for queries, which are prefixes.
    Prefix,
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Normalize a string for indexing and querying: lowercase, strip diacritics,
/// and drop every character that is not a letter, digit or underscore.
///
/// This enables matching between ASCII and accented versions:
/// - "Frei, burg !!" → "freiburg"
/// - "café" → "cafe"
/// - "naïve" → "naive"
///
/// Idempotent: normalizing an already-normalized string is the identity.
///
/// # Algorithm (with unicode-normalization feature)
///
/// 1. NFD normalize (decompose characters into base + combining marks)
/// 2. Lowercase
/// 3. Keep only alphanumerics and `_` (this also drops combining marks)
#[cfg(feature = "unicode-normalization")]
pub fn normalize(value: &str) -> String {
    value
        .nfd()
        .collect::<String>()
        .to_lowercase()
        .chars()
        .filter(|c| is_word_char(*c))
        .collect()
}

/// Lightweight normalization without the unicode-normalization dependency.
/// Lowercases and filters; accented characters keep their accents.
#[cfg(not(feature = "unicode-normalization"))]
pub fn normalize(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .filter(|c| is_word_char(*c))
        .collect()
}

/// Compute the q-grams of the padded, normalized version of `word`.
///
/// Slides a window of length `q` over the padded character sequence and
/// returns the grams in order, duplicates kept. A padded string shorter than
/// `q` yields no grams. The gram count is `padded_len - q + 1`: for two-sided
/// padding that is `len + q - 1` grams, for prefix padding exactly `len`.
pub fn compute_qgrams(word: &str, q: usize, padding: Padding) -> Vec<String> {
    let normalized = normalize(word);
    qgrams_of_normalized(&normalized, q, padding)
}

/// Gram extraction for input that is already normalized.
///
/// The query pipeline normalizes once up front and reuses the string for both
/// gramming and distance computation, so this skips the second pass.
pub(crate) fn qgrams_of_normalized(normalized: &str, q: usize, padding: Padding) -> Vec<String> {
    debug_assert!(q >= 1);

    let pad = q - 1;
    let chars: Vec<char> = {
        let mut padded = Vec::with_capacity(normalized.chars().count() + 2 * pad);
        padded.extend(std::iter::repeat(SENTINEL).take(pad));
        padded.extend(normalized.chars());
        if padding == Padding::TwoSided {
            padded.extend(std::iter::repeat(SENTINEL).take(pad));
        }
        padded
    };

    if chars.len() < q {
        return Vec::new();
    }

    chars.windows(q).map(|w| w.iter().collect()).collect()
}
