// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The query pipeline: where the rubber meets the road.
//!
//! Everything culminates here. The index is built, the lists are sorted;
//! now a half-typed query has to come back as a ranked entity list in a few
//! hundred microseconds. The pipeline is a straight line:
//!
//! ```text
//! query ──▶ normalize ──▶ prefix q-grams ──▶ merge lists ──▶ count filter
//!                                                               │
//!        ranked matches ◀── rank + dedup ◀── bounded PED ◀──────┘
//! ```
//!
//! The count filter exists so the PED engine runs as rarely as possible;
//! `num_ped_computations` in the result reports exactly how often it did.

use crate::filter::{filter_candidates, qgram_threshold};
use crate::index::QGramIndex;
use crate::merge::{merge_lists, GramPostings};
use crate::normalize::{normalize, qgrams_of_normalized, Padding};
use crate::ped::prefix_edit_distance_chars;
use crate::ranking::rank_matches;
use crate::types::{Match, QueryResult};
use std::collections::HashMap;
use std::fmt;
use tracing::trace;

/// Error raised for an invalid query parameter.
///
/// An empty query or a query with no candidates is a valid state with an
/// empty result, never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The edit radius must be non-negative.
    InvalidDelta { delta: i32 },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::InvalidDelta { delta } => {
                write!(f, "edit radius must be non-negative, got {}", delta)
            }
        }
    }
}

impl std::error::Error for QueryError {}

impl QGramIndex {
    /// Find all entities whose name (or synonym) is within prefix edit
    /// distance `delta` of `query`, ranked by distance then score.
    ///
    /// Returns the full ranked set; truncating to a top-k is the caller's
    /// concern. The result also reports how many candidates reached the
    /// distance engine.
    pub fn find_matches(&self, query: &str, delta: i32) -> Result<QueryResult, QueryError> {
        if delta < 0 {
            return Err(QueryError::InvalidDelta { delta });
        }
        let delta = delta as u32;

        let normalized = normalize(query);
        if normalized.is_empty() {
            return Ok(QueryResult::empty());
        }
        let query_chars: Vec<char> = normalized.chars().collect();

        // A query is an unfinished prefix: pad the left side only, so the
        // missing right boundary of the word costs nothing.
        let grams = qgrams_of_normalized(&normalized, self.q(), Padding::Prefix);

        let mut gram_counts: HashMap<String, u32> = HashMap::with_capacity(grams.len());
        for gram in grams {
            *gram_counts.entry(gram).or_insert(0) += 1;
        }
        let selected: Vec<GramPostings<'_>> = gram_counts
            .iter()
            .filter_map(|(gram, &count)| {
                let ids = self.postings(gram);
                (!ids.is_empty()).then_some(GramPostings::new(ids, count))
            })
            .collect();

        let merged = merge_lists(&selected);
        let threshold = qgram_threshold(query_chars.len(), self.q(), delta);
        let candidates = filter_candidates(merged, threshold);
        trace!(
            query = %normalized,
            delta,
            threshold,
            lists = selected.len(),
            candidates = candidates.len(),
            "candidates after gram count filter"
        );

        let mut num_ped_computations = 0usize;
        let mut matches: Vec<Match> = Vec::new();
        for term_id in candidates {
            let term = &self.terms[term_id.index()];
            // Anything past |query| + delta chars cannot be the best prefix.
            let candidate_chars: Vec<char> = term
                .normalized
                .chars()
                .take(query_chars.len() + delta as usize)
                .collect();

            num_ped_computations += 1;
            let ped = prefix_edit_distance_chars(&query_chars, &candidate_chars, delta);
            if ped <= delta {
                matches.push(Match {
                    entity_id: term.entity,
                    ped,
                    matched_via: term.via.clone(),
                });
            }
        }
        trace!(
            survivors = matches.len(),
            num_ped_computations,
            "distance computations done"
        );

        let matches = rank_matches(matches, &self.store);
        Ok(QueryResult {
            matches,
            num_ped_computations,
        })
    }
}
