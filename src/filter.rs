// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Candidate pruning by shared q-gram count.
//!
//! Before paying for an edit-distance computation, every candidate must show
//! enough gram overlap with the query. The bound is the pigeonhole argument
//! for prefix matching: a query of `|x|` characters produces exactly `|x|`
//! prefix-padded grams, and a single edit operation can corrupt at most `q`
//! of them. A candidate within radius `delta` therefore still shares at
//! least `|x| - q * delta` grams with the query.
//!
//! The symmetric full-edit-distance bound `max(|x|, |y|) - 1 - (delta-1) * q`
//! is wrong here: it charges the query for grams only the candidate's tail
//! can provide, and already prunes the exact match for a four-character query
//! at radius 0. Prefix search must bound by the query side alone.
//!
//! The floor of 1 means candidates must share at least one gram to be seen
//! at all. For queries with `|x| <= q * delta` that is the only requirement,
//! and matches sharing no gram with the query are out of reach of an
//! inverted index by construction.

use crate::types::TermId;

/// Minimum number of shared q-grams a candidate needs to stay alive.
///
/// `query_len` is the character count of the normalized query.
pub fn qgram_threshold(query_len: usize, q: usize, delta: u32) -> u32 {
    debug_assert!(q >= 1);
    let slack = (q as i64) * i64::from(delta);
    (query_len as i64 - slack).max(1) as u32
}

/// Keep the term ids whose merged gram count reaches the threshold.
///
/// Input pairs are ascending by id (the merge output order); the survivors
/// keep that order, which downstream code relies on for stable ranking.
pub fn filter_candidates(counted: Vec<(TermId, u32)>, threshold: u32) -> Vec<TermId> {
    counted
        .into_iter()
        .filter(|&(_, count)| count >= threshold)
        .map(|(id, _)| id)
        .collect()
}
