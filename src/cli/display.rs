// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the talpa CLI.
//!
//! Color is used when stdout is a TTY and `NO_COLOR` is unset; pipelines get
//! plain text. Matches render as a name line (with distance and score) plus
//! an indented description, in the shape search frontends show completions.

use std::sync::OnceLock;
use talpa::{Entity, Match, MatchedVia};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

static USE_COLOR: OnceLock<bool> = OnceLock::new();

/// Whether output should be colored (TTY and no `NO_COLOR`).
pub fn use_color() -> bool {
    *USE_COLOR.get_or_init(|| {
        std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout)
    })
}

fn paint(text: &str, code: &str) -> String {
    if use_color() {
        format!("{}{}{}", code, text, RESET)
    } else {
        text.to_string()
    }
}

/// Render one ranked match as a two-line block.
pub fn format_match(rank: usize, m: &Match, entity: &Entity) -> String {
    let distance = if m.ped == 0 {
        paint("exact", GREEN)
    } else {
        paint(&format!("ped {}", m.ped), YELLOW)
    };

    let mut header = format!(
        "{:>2}. {} ({}, score {})",
        rank,
        paint(&entity.name, BOLD),
        distance,
        entity.score
    );
    if let MatchedVia::Synonym(synonym) = &m.matched_via {
        header.push_str(&format!(" {}", paint(&format!("via \"{}\"", synonym), CYAN)));
    }

    if entity.description.is_empty() {
        header
    } else {
        format!("{}\n    {}", header, paint(&entity.description, DIM))
    }
}

/// Render the per-query summary line.
pub fn format_summary(total: usize, shown: usize, ped_computations: usize, micros: u128) -> String {
    let timing = format!("{} matches in {}µs", total, micros);
    let detail = format!(
        "showing {}, {} distance computations",
        shown, ped_computations
    );
    format!("{} ({})", paint(&timing, BOLD), paint(&detail, DIM))
}
