//! Error-tolerant prefix search over named entities.
//!
//! This crate answers "the user typed `freibu` — which entities did they
//! mean?" It indexes entity names (and optionally synonyms) as overlapping
//! q-grams and matches queries by bounded prefix edit distance: the smallest
//! number of edits between the query and any prefix of a candidate name.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌───────────────┐
//! │ normalize.rs │────▶│   index.rs   │────▶│   search.rs   │
//! │ (normalize,  │     │ (IndexBuilder│     │ (find_matches)│
//! │  q-grams)    │     │  QGramIndex) │     │               │
//! └──────────────┘     └──────────────┘     └───────┬───────┘
//!                                                   │
//!                  ┌──────────┬──────────┬──────────┤
//!                  ▼          ▼          ▼          ▼
//!             ┌────────┐ ┌─────────┐ ┌────────┐ ┌──────────┐
//!             │merge.rs│ │filter.rs│ │ ped.rs │ │ranking.rs│
//!             │ k-way  │ │ q-gram  │ │bounded │ │ order +  │
//!             │ merge  │ │threshold│ │  PED   │ │  dedup   │
//!             └────────┘ └─────────┘ └────────┘ └──────────┘
//! ```
//!
//! Build once, query forever: a `QGramIndex` is immutable after `finish()`,
//! so any number of threads may query it concurrently without locking.
//! Refreshing a corpus means building a new index and swapping the reference.
//!
//! # Usage
//!
//! ```
//! use talpa::{EntityRecord, QGramIndex};
//!
//! let records = vec![
//!     EntityRecord { name: "Freiburg".into(), score: 120, ..Default::default() },
//!     EntityRecord { name: "Fribourg".into(), score: 40, ..Default::default() },
//! ];
//! let index = QGramIndex::build(3, records, false).unwrap();
//!
//! let result = index.find_matches("freibu", 2).unwrap();
//! assert_eq!(result.matches[0].entity_id.get(), 1);
//! ```

// Module declarations
mod filter;
mod index;
mod merge;
mod normalize;
mod ped;
mod ranking;
mod records;
mod search;
pub mod testing;
mod types;

// Re-exports for public API
pub use filter::{filter_candidates, qgram_threshold};
pub use index::{check_index_well_formed, BuildError, IndexBuilder, QGramIndex};
pub use merge::{merge_lists, GramPostings};
pub use normalize::{compute_qgrams, normalize, Padding, SENTINEL};
pub use ped::prefix_edit_distance;
pub use ranking::{compare_matches, rank_matches};
pub use records::{load_records, parse_tsv, RecordError};
pub use search::QueryError;
pub use types::{
    Entity, EntityId, EntityRecord, EntityStore, Match, MatchedVia, QueryResult, TermId,
};
