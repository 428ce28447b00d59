// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The talpa binary: build a q-gram index from an entity file and query it.

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Instant;
use talpa::{load_records, EntityRecord, QGramIndex, QueryResult};
use tracing_subscriber::EnvFilter;

mod cli;
use cli::display::{format_match, format_summary};
use cli::{Cli, Commands};

fn main() {
    // Diagnostics go to stderr; results stay clean on stdout.
    // RUST_LOG=talpa=debug shows build and query internals.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Commands::Search {
            file,
            query,
            delta,
            limit,
            with_synonyms,
            gram_size,
        } => run_search(&file, &query, delta, limit, with_synonyms, gram_size),
        Commands::Repl {
            file,
            delta,
            limit,
            with_synonyms,
            gram_size,
        } => run_repl(&file, delta, limit, with_synonyms, gram_size),
        Commands::Inspect {
            file,
            with_synonyms,
            gram_size,
            lists,
        } => run_inspect(&file, with_synonyms, gram_size, lists),
    };

    if let Err(message) = outcome {
        eprintln!("error: {}", message);
        std::process::exit(1);
    }
}

fn build_index(
    file: &str,
    gram_size: usize,
    with_synonyms: bool,
) -> Result<QGramIndex, String> {
    let records = load_records(Path::new(file)).map_err(|e| format!("{}: {}", file, e))?;
    build_from_records(gram_size, records, with_synonyms)
}

#[cfg(feature = "parallel")]
fn build_from_records(
    gram_size: usize,
    records: Vec<EntityRecord>,
    with_synonyms: bool,
) -> Result<QGramIndex, String> {
    QGramIndex::build_parallel(gram_size, records, with_synonyms).map_err(|e| e.to_string())
}

#[cfg(not(feature = "parallel"))]
fn build_from_records(
    gram_size: usize,
    records: Vec<EntityRecord>,
    with_synonyms: bool,
) -> Result<QGramIndex, String> {
    QGramIndex::build(gram_size, records, with_synonyms).map_err(|e| e.to_string())
}

fn print_result(index: &QGramIndex, result: &QueryResult, limit: usize, micros: u128) {
    let shown = result.matches.len().min(limit);
    for (rank, m) in result.matches.iter().take(limit).enumerate() {
        let entity = index
            .store()
            .get(m.entity_id)
            .expect("ranked match refers to a stored entity");
        println!("{}", format_match(rank + 1, m, entity));
    }
    println!(
        "{}",
        format_summary(result.matches.len(), shown, result.num_ped_computations, micros)
    );
}

fn run_search(
    file: &str,
    query: &str,
    delta: i32,
    limit: usize,
    with_synonyms: bool,
    gram_size: usize,
) -> Result<(), String> {
    let index = build_index(file, gram_size, with_synonyms)?;

    let start = Instant::now();
    let result = index.find_matches(query, delta).map_err(|e| e.to_string())?;
    let micros = start.elapsed().as_micros();

    print_result(&index, &result, limit, micros);
    Ok(())
}

fn run_repl(
    file: &str,
    delta: i32,
    limit: usize,
    with_synonyms: bool,
    gram_size: usize,
) -> Result<(), String> {
    let build_start = Instant::now();
    let index = build_index(file, gram_size, with_synonyms)?;
    eprintln!(
        "indexed {} entities ({} terms) in {}ms",
        index.store().len(),
        index.num_terms(),
        build_start.elapsed().as_millis()
    );

    let stdin = io::stdin();
    loop {
        print!("query> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .map_err(|e| e.to_string())?;
        if read == 0 {
            // EOF
            return Ok(());
        }
        let query = line.trim();
        if query.is_empty() {
            continue;
        }

        let start = Instant::now();
        match index.find_matches(query, delta) {
            Ok(result) => print_result(&index, &result, limit, start.elapsed().as_micros()),
            Err(e) => eprintln!("error: {}", e),
        }
    }
}

fn run_inspect(
    file: &str,
    with_synonyms: bool,
    gram_size: usize,
    lists: bool,
) -> Result<(), String> {
    let index = build_index(file, gram_size, with_synonyms)?;

    println!("entities:       {}", index.store().len());
    println!("terms:          {}", index.num_terms());
    println!("distinct grams: {}", index.num_grams());
    println!("gram size:      {}", index.q());
    println!("synonyms:       {}", index.with_synonyms());

    let mut total_postings = 0usize;
    let mut longest: Option<(&str, usize)> = None;
    for (gram, list) in index.gram_lists() {
        total_postings += list.len();
        if longest.map_or(true, |(_, len)| list.len() > len) {
            longest = Some((gram, list.len()));
        }
    }
    println!("total postings: {}", total_postings);
    if let Some((gram, len)) = longest {
        println!("longest list:   {:?} ({} postings)", gram, len);
    }

    if lists {
        let mut sorted: Vec<(&str, &[talpa::TermId])> = index.gram_lists().collect();
        sorted.sort_by_key(|&(gram, _)| gram);
        for (gram, list) in sorted {
            let ids: Vec<u32> = list.iter().map(|id| id.get()).collect();
            println!("{}\t{}\t{:?}", gram, list.len(), ids);
        }
    }

    Ok(())
}
