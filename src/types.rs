// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a q-gram index.
//!
//! These types define how entity records, the frozen entity store, and query
//! results fit together. The index itself lives in `index.rs`; everything it
//! stores or returns is declared here.
//!
//! | Type            | Purpose                                       |
//! |-----------------|-----------------------------------------------|
//! | `EntityRecord`  | Raw input record, one per entity              |
//! | `Entity`        | Frozen entity inside the store                |
//! | `EntityStore`   | Append-only collection, dense ids from 1      |
//! | `Term`          | One searchable string (name or synonym)       |
//! | `Match`         | One entity surviving a query, with its PED    |
//! | `QueryResult`   | Ranked matches plus diagnostic counters       |
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **EntityId / TermId**: dense, assigned in insertion order, starting at 1.
//!   Zero is never a valid id; `index()` maps an id to its vector slot.
//!
//! - **EntityStore**: append-only while building, immutable once the index is
//!   frozen. `get(id)` is total for every id the store ever handed out.
//!
//! - **Match**: `ped` is always within the radius the query was asked with.
//!   An entity appears at most once in a ranked result.

use serde::{Deserialize, Serialize};

// =============================================================================
// NEWTYPES: Type-safe identifiers
// =============================================================================

/// Type-safe entity identifier.
///
/// Ids are dense and assigned in insertion order starting at 1, so the id
/// doubles as a stable tie-breaker: lower id means earlier in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Get the underlying value.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Convert to the zero-based slot in the entity store.
    #[inline]
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        EntityId(id)
    }
}

/// Type-safe identifier for a searchable term.
///
/// Every searchable string gets its own term id: the entity name always, each
/// synonym additionally when synonym search is enabled. Inverted lists hold
/// term ids, not entity ids, so a synonym can match independently of the name
/// it belongs to. Without synonyms the two id spaces coincide value-for-value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct TermId(pub u32);

impl TermId {
    /// Get the underlying value.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Convert to the zero-based slot in the term table.
    #[inline]
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl From<u32> for TermId {
    fn from(id: u32) -> Self {
        TermId(id)
    }
}

// =============================================================================
// INPUT RECORDS
// =============================================================================

/// Raw input record for one entity, as handed to the index builder.
///
/// Only `name` and `score` are required; everything else is display metadata
/// the search core carries along untouched. The field names match the JSON
/// shape produced by the usual entity dumps (camelCase keys).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRecord {
    pub name: String,
    pub score: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub wikipedia_url: Option<String>,
    #[serde(default)]
    pub wikidata_id: Option<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

// =============================================================================
// FROZEN ENTITIES
// =============================================================================

/// An entity inside the frozen store.
///
/// Identical to its input record plus the dense id assigned at build time.
/// Immutable once the index is built.
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    pub score: i64,
    pub description: String,
    pub wikipedia_url: Option<String>,
    pub wikidata_id: Option<String>,
    pub synonyms: Vec<String>,
    pub image_url: Option<String>,
}

/// Append-only collection of entities, addressed by dense id.
///
/// Built once, read-only thereafter. Lookup by id is a plain vector index
/// because ids are dense and start at 1.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    entities: Vec<Entity>,
}

impl EntityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entity, assigning the next dense id.
    pub(crate) fn push(&mut self, record: EntityRecord) -> EntityId {
        let id = EntityId(self.entities.len() as u32 + 1);
        self.entities.push(Entity {
            id,
            name: record.name,
            score: record.score,
            description: record.description,
            wikipedia_url: record.wikipedia_url,
            wikidata_id: record.wikidata_id,
            synonyms: record.synonyms,
            image_url: record.image_url,
        });
        id
    }

    /// Look up an entity by id.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.index())
    }

    /// Number of entities in the store.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Check whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterate over entities in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }
}

// =============================================================================
// TERMS
// =============================================================================

/// How a match reached its entity: through the name itself or a synonym.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchedVia {
    Name,
    /// The original (un-normalized) synonym text, for display.
    Synonym(String),
}

/// One searchable string inside the index.
///
/// The entity name is always a term; each synonym becomes an additional term
/// when synonym search is enabled. The normalized text is what the PED engine
/// compares against; `via` is carried into the match for display.
#[derive(Debug, Clone)]
pub struct Term {
    pub(crate) normalized: String,
    pub(crate) entity: EntityId,
    pub(crate) via: MatchedVia,
}

// =============================================================================
// QUERY RESULTS
// =============================================================================

/// One entity surviving a query, with the distance that let it in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub entity_id: EntityId,
    /// Prefix edit distance between the query and the matched term.
    pub ped: u32,
    pub matched_via: MatchedVia,
}

/// The full ranked answer to one query.
///
/// `num_ped_computations` counts exactly the candidates the distance engine
/// was invoked for, i.e. those that survived the q-gram count filter. It is a
/// diagnostic counter only and never changes which matches are returned.
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    pub matches: Vec<Match>,
    pub num_ped_computations: usize,
}

impl QueryResult {
    /// The empty result: no matches, no distance computations.
    pub fn empty() -> Self {
        Self::default()
    }
}
