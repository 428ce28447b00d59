//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use crate::types::EntityRecord;

/// Create a minimal test record with the given name, score and description.
pub fn make_record(name: &str, score: i64, description: &str) -> EntityRecord {
    EntityRecord {
        name: name.to_string(),
        score,
        description: description.to_string(),
        ..EntityRecord::default()
    }
}

/// Create a test record with synonyms attached.
pub fn make_record_with_synonyms(name: &str, score: i64, synonyms: &[&str]) -> EntityRecord {
    EntityRecord {
        name: name.to_string(),
        score,
        synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
        ..EntityRecord::default()
    }
}

/// The two-entity corpus used throughout the fixture tests.
pub fn frei_brei_records() -> Vec<EntityRecord> {
    vec![
        make_record("frei", 3, "a word"),
        make_record("brei", 2, "another word"),
    ]
}
