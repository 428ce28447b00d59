// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the talpa command-line interface.
//!
//! Three subcommands: `search` for a one-shot query, `repl` for an
//! interactive loop over a built index, and `inspect` to examine what the
//! index looks like for a given entity file. All three build the index in
//! memory from the entity file; there is no on-disk index format.

pub mod display;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "talpa",
    about = "Error-tolerant prefix search over named entities",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a single query against an entity file
    Search {
        /// Entity file (TSV with header, or .json)
        file: String,

        /// The query prefix to search for
        query: String,

        /// Allowed prefix edit distance
        #[arg(short, long, default_value_t = 2)]
        delta: i32,

        /// Maximum number of results to display
        #[arg(short, long, default_value_t = 5)]
        limit: usize,

        /// Make synonyms searchable
        #[arg(long)]
        with_synonyms: bool,

        /// Gram size of the index
        #[arg(long, default_value_t = 3)]
        gram_size: usize,
    },

    /// Build the index once, then answer queries interactively
    Repl {
        /// Entity file (TSV with header, or .json)
        file: String,

        /// Allowed prefix edit distance
        #[arg(short, long, default_value_t = 2)]
        delta: i32,

        /// Maximum number of results to display per query
        #[arg(short, long, default_value_t = 5)]
        limit: usize,

        /// Make synonyms searchable
        #[arg(long)]
        with_synonyms: bool,

        /// Gram size of the index
        #[arg(long, default_value_t = 3)]
        gram_size: usize,
    },

    /// Build the index and print its structure and statistics
    Inspect {
        /// Entity file (TSV with header, or .json)
        file: String,

        /// Make synonyms searchable
        #[arg(long)]
        with_synonyms: bool,

        /// Gram size of the index
        #[arg(long, default_value_t = 3)]
        gram_size: usize,

        /// Also dump every inverted list with its length
        #[arg(long)]
        lists: bool,
    },
}
