//! Entity record loading.
//!
//! The search core takes an in-memory record sequence; this module is the
//! collaborator that produces one from a file. Two formats are supported,
//! chosen by extension:
//!
//! - `.json`: an array of records (camelCase keys, see `EntityRecord`).
//! - anything else: tab-separated, one entity per line, first line is a
//!   header. Columns: name, score, description, wikipedia url, wikidata id,
//!   `;`-separated synonyms, image url. Only name and score are required;
//!   trailing columns may be missing.
//!
//! Loading is fail-fast with the offending line number. A file that parses
//! halfway is a corrupt corpus, not a smaller one.

use crate::types::EntityRecord;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Error raised while reading an entity file.
#[derive(Debug)]
pub enum RecordError {
    Io(io::Error),
    Json(serde_json::Error),
    /// A required field is empty or absent. `line` is 1-based.
    MissingField { line: usize, field: &'static str },
    /// The score column did not parse as an integer.
    InvalidScore { line: usize, value: String },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::Io(e) => write!(f, "i/o error: {}", e),
            RecordError::Json(e) => write!(f, "json error: {}", e),
            RecordError::MissingField { line, field } => {
                write!(f, "line {}: missing required field '{}'", line, field)
            }
            RecordError::InvalidScore { line, value } => {
                write!(f, "line {}: invalid score '{}'", line, value)
            }
        }
    }
}

impl std::error::Error for RecordError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecordError::Io(e) => Some(e),
            RecordError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for RecordError {
    fn from(e: io::Error) -> Self {
        RecordError::Io(e)
    }
}

impl From<serde_json::Error> for RecordError {
    fn from(e: serde_json::Error) -> Self {
        RecordError::Json(e)
    }
}

/// Load entity records from a file, dispatching on the extension.
pub fn load_records(path: &Path) -> Result<Vec<EntityRecord>, RecordError> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let records = if is_json {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)?
    } else {
        let content = fs::read_to_string(path)?;
        parse_tsv(&content)?
    };
    debug!(records = records.len(), path = %path.display(), "entity records loaded");
    Ok(records)
}

/// Parse the tab-separated entity format.
///
/// The first line is a header and is skipped; blank lines are ignored.
pub fn parse_tsv(content: &str) -> Result<Vec<EntityRecord>, RecordError> {
    let mut records = Vec::new();

    for (index, line) in content.lines().enumerate().skip(1) {
        if line.is_empty() {
            continue;
        }
        let line_no = index + 1;
        let columns: Vec<&str> = line.split('\t').collect();

        let name = columns.first().copied().unwrap_or("");
        if name.is_empty() {
            return Err(RecordError::MissingField {
                line: line_no,
                field: "name",
            });
        }

        let raw_score = columns.get(1).copied().unwrap_or("");
        if raw_score.is_empty() {
            return Err(RecordError::MissingField {
                line: line_no,
                field: "score",
            });
        }
        let score: i64 = raw_score.parse().map_err(|_| RecordError::InvalidScore {
            line: line_no,
            value: raw_score.to_string(),
        })?;

        let optional = |i: usize| -> Option<String> {
            columns
                .get(i)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let synonyms = columns
            .get(5)
            .map(|raw| {
                raw.split(';')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        records.push(EntityRecord {
            name: name.to_string(),
            score,
            description: columns.get(2).copied().unwrap_or("").to_string(),
            wikipedia_url: optional(3),
            wikidata_id: optional(4),
            synonyms,
            image_url: optional(6),
        });
    }

    Ok(records)
}
