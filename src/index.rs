// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index construction: from entity records to a frozen, query-ready index.
//!
//! Building is a one-shot batch operation with two explicit states. An
//! `IndexBuilder` accepts records and accumulates the entity store, the term
//! table and the inverted lists; `finish()` freezes everything into a
//! `QGramIndex` that only serves queries. There is no way back: refreshing a
//! corpus means building a new index and swapping the reference.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **LIST_SORTED**: Every inverted list is ascending by term id, with
//!    duplicates preserved (one entry per gram occurrence in the term).
//!    This holds without sorting because term ids are assigned monotonically
//!    and each term's grams are appended in one batch.
//! 2. **IDS_DENSE**: Entity and term ids are dense and start at 1.
//! 3. **TERMS_RESOLVE**: Every term points at an entity the store contains.
//! 4. **NAME_FIRST**: An entity's name term precedes its synonym terms, so
//!    ascending term order yields name matches before synonym matches.

use crate::normalize::{compute_qgrams, Padding};
use crate::types::{EntityRecord, EntityStore, MatchedVia, Term, TermId};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Error raised while building an index.
///
/// Building is fail-fast: the first bad record aborts the whole build so bad
/// input cannot silently shrink the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// Gram size must be at least 1.
    InvalidQ { q: usize },
    /// A record has no name. `position` is its zero-based place in the input.
    EmptyName { position: usize },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::InvalidQ { q } => {
                write!(f, "gram size must be >= 1, got {}", q)
            }
            BuildError::EmptyName { position } => {
                write!(f, "record {} has an empty name", position)
            }
        }
    }
}

impl std::error::Error for BuildError {}

/// Accumulating state of an index under construction.
///
/// Accepts records one at a time; `finish()` moves to the frozen state.
#[derive(Debug)]
pub struct IndexBuilder {
    q: usize,
    with_synonyms: bool,
    store: EntityStore,
    terms: Vec<Term>,
    lists: HashMap<String, Vec<TermId>>,
    next_position: usize,
}

impl IndexBuilder {
    /// Start a build with gram size `q`. When `with_synonyms` is set, every
    /// synonym of a record becomes an independently searchable term.
    pub fn new(q: usize, with_synonyms: bool) -> Result<Self, BuildError> {
        if q < 1 {
            return Err(BuildError::InvalidQ { q });
        }
        Ok(Self {
            q,
            with_synonyms,
            store: EntityStore::new(),
            terms: Vec::new(),
            lists: HashMap::new(),
            next_position: 0,
        })
    }

    /// Add one entity record.
    ///
    /// Assigns the next dense entity id, registers the name (and synonyms,
    /// when enabled) as terms, and appends the terms' two-sided grams to the
    /// inverted lists.
    pub fn push_record(&mut self, record: EntityRecord) -> Result<(), BuildError> {
        let position = self.next_position;
        self.next_position += 1;

        if record.name.is_empty() {
            return Err(BuildError::EmptyName { position });
        }

        let name = record.name.clone();
        let synonyms: Vec<String> = if self.with_synonyms {
            record.synonyms.clone()
        } else {
            Vec::new()
        };

        let entity_id = self.store.push(record);

        self.push_term(&name, entity_id, MatchedVia::Name);
        for synonym in synonyms {
            if synonym.is_empty() {
                continue;
            }
            let via = MatchedVia::Synonym(synonym.clone());
            self.push_term(&synonym, entity_id, via);
        }

        Ok(())
    }

    fn push_term(&mut self, text: &str, entity: crate::types::EntityId, via: MatchedVia) {
        let term_id = TermId(self.terms.len() as u32 + 1);
        let grams = compute_qgrams(text, self.q, Padding::TwoSided);
        let normalized = crate::normalize::normalize(text);

        for gram in grams {
            self.lists.entry(gram).or_default().push(term_id);
        }
        self.terms.push(Term {
            normalized,
            entity,
            via,
        });
    }

    /// Freeze the build into a query-ready index.
    pub fn finish(self) -> QGramIndex {
        let index = QGramIndex {
            q: self.q,
            with_synonyms: self.with_synonyms,
            store: self.store,
            terms: self.terms,
            lists: self.lists,
        };
        debug!(
            entities = index.store.len(),
            terms = index.terms.len(),
            grams = index.lists.len(),
            q = index.q,
            with_synonyms = index.with_synonyms,
            "index frozen"
        );
        debug_assert!(check_index_well_formed(&index));
        index
    }
}

/// A frozen q-gram index over an entity collection.
///
/// Immutable and lock-free: once built, any number of threads may query it
/// concurrently. Nothing in the query path mutates shared state.
#[derive(Debug, Clone)]
pub struct QGramIndex {
    q: usize,
    with_synonyms: bool,
    pub(crate) store: EntityStore,
    pub(crate) terms: Vec<Term>,
    lists: HashMap<String, Vec<TermId>>,
}

impl QGramIndex {
    /// Build an index from an in-memory record sequence.
    ///
    /// Fail-fast: the first structurally invalid record aborts the build.
    pub fn build<I>(q: usize, records: I, with_synonyms: bool) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = EntityRecord>,
    {
        let mut builder = IndexBuilder::new(q, with_synonyms)?;
        for record in records {
            builder.push_record(record)?;
        }
        Ok(builder.finish())
    }

    /// Build an index using parallel gram extraction.
    ///
    /// Map phase grams every term in parallel; the reduce phase appends the
    /// per-term results in term-id order, so the lists come out ascending
    /// without a sort step, exactly as in the sequential build.
    #[cfg(feature = "parallel")]
    pub fn build_parallel(
        q: usize,
        records: Vec<EntityRecord>,
        with_synonyms: bool,
    ) -> Result<Self, BuildError> {
        if q < 1 {
            return Err(BuildError::InvalidQ { q });
        }

        // Validate and register entities sequentially to keep fail-fast
        // ordering and dense id assignment.
        let mut store = EntityStore::new();
        let mut terms: Vec<Term> = Vec::new();
        for (position, record) in records.into_iter().enumerate() {
            if record.name.is_empty() {
                return Err(BuildError::EmptyName { position });
            }
            let name = record.name.clone();
            let synonyms: Vec<String> = if with_synonyms {
                record.synonyms.clone()
            } else {
                Vec::new()
            };
            let entity_id = store.push(record);
            terms.push(Term {
                normalized: crate::normalize::normalize(&name),
                entity: entity_id,
                via: MatchedVia::Name,
            });
            for synonym in synonyms {
                if synonym.is_empty() {
                    continue;
                }
                terms.push(Term {
                    normalized: crate::normalize::normalize(&synonym),
                    entity: entity_id,
                    via: MatchedVia::Synonym(synonym),
                });
            }
        }

        // MAP: gram every term in parallel. Collect preserves input order.
        let per_term_grams: Vec<Vec<String>> = terms
            .par_iter()
            .map(|term| {
                crate::normalize::qgrams_of_normalized(&term.normalized, q, Padding::TwoSided)
            })
            .collect();

        // REDUCE: append in term-id order, keeping every list ascending.
        let mut lists: HashMap<String, Vec<TermId>> = HashMap::new();
        for (slot, grams) in per_term_grams.into_iter().enumerate() {
            let term_id = TermId(slot as u32 + 1);
            for gram in grams {
                lists.entry(gram).or_default().push(term_id);
            }
        }

        let index = QGramIndex {
            q,
            with_synonyms,
            store,
            terms,
            lists,
        };
        debug!(
            entities = index.store.len(),
            terms = index.terms.len(),
            grams = index.lists.len(),
            q = index.q,
            with_synonyms = index.with_synonyms,
            "index frozen (parallel build)"
        );
        debug_assert!(check_index_well_formed(&index));
        Ok(index)
    }

    /// The inverted list for a gram; empty slice if the gram is unknown.
    pub fn postings(&self, gram: &str) -> &[TermId] {
        self.lists.get(gram).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Gram size this index was built with.
    pub fn q(&self) -> usize {
        self.q
    }

    /// Whether synonyms are searchable in this index.
    pub fn with_synonyms(&self) -> bool {
        self.with_synonyms
    }

    /// The frozen entity store.
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Number of searchable terms (names plus indexed synonyms).
    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    /// Number of distinct grams with a non-empty inverted list.
    pub fn num_grams(&self) -> usize {
        self.lists.len()
    }

    /// Iterate over `(gram, list)` pairs, e.g. for inspection tooling.
    pub fn gram_lists(&self) -> impl Iterator<Item = (&str, &[TermId])> {
        self.lists.iter().map(|(g, l)| (g.as_str(), l.as_slice()))
    }
}

/// Check structural invariants of a frozen index (debug assertion).
#[cfg(any(debug_assertions, test))]
pub fn check_index_well_formed(index: &QGramIndex) -> bool {
    let num_terms = index.terms.len() as u32;

    // LIST_SORTED + TERMS_RESOLVE bounds
    for (_, list) in index.gram_lists() {
        if list.is_empty() {
            return false;
        }
        for window in list.windows(2) {
            if window[0] > window[1] {
                return false;
            }
        }
        for id in list {
            if id.get() == 0 || id.get() > num_terms {
                return false;
            }
        }
    }

    // TERMS_RESOLVE + NAME_FIRST
    let mut seen_entities = 0u32;
    for term in &index.terms {
        if index.store.get(term.entity).is_none() {
            return false;
        }
        if term.via == MatchedVia::Name {
            // Names arrive in entity order.
            seen_entities += 1;
            if term.entity.get() != seen_entities {
                return false;
            }
        }
    }

    // Without synonyms the term table mirrors the store one-to-one.
    if !index.with_synonyms && index.terms.len() != index.store.len() {
        return false;
    }

    true
}

/// Release-build stub so callers can assert unconditionally.
#[cfg(not(any(debug_assertions, test)))]
pub fn check_index_well_formed(_index: &QGramIndex) -> bool {
    true
}
