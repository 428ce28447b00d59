// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: how matches get ordered and deduplicated.
//!
//! Distance dominates popularity. A ped-0 match with score 2 beats a ped-1
//! match with score 2000; scores only break ties within the same distance.
//! Remaining ties keep their original candidate order, which is ascending
//! term id, i.e. input order.
//!
//! An entity reachable through several terms (its name and a synonym, or two
//! synonyms) must appear exactly once: the best of its matches survives.

use crate::types::{EntityId, EntityStore, Match};
use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Compare two matches for ranking.
///
/// Sort order:
/// 1. **PED** - ascending, closer matches first
/// 2. **Score** - descending, only between equal distances
/// 3. Original candidate order (the caller uses a stable sort)
pub fn compare_matches(a: &Match, b: &Match, entities: &EntityStore) -> Ordering {
    a.ped.cmp(&b.ped).then_with(|| {
        let score_a = entities.get(a.entity_id).map_or(i64::MIN, |e| e.score);
        let score_b = entities.get(b.entity_id).map_or(i64::MIN, |e| e.score);
        score_b.cmp(&score_a)
    })
}

/// Deduplicate per entity and sort into final ranking order.
///
/// For an entity hit through multiple terms, the lower ped wins; on equal
/// ped the earlier candidate stays (the name term precedes its synonyms).
/// Deduplication replaces in place, so the surviving match keeps the first
/// occurrence's position and the stable sort preserves input order for ties.
pub fn rank_matches(matches: Vec<Match>, entities: &EntityStore) -> Vec<Match> {
    let mut slots: HashMap<EntityId, usize> = HashMap::with_capacity(matches.len());
    let mut unique: Vec<Match> = Vec::with_capacity(matches.len());

    for m in matches {
        match slots.entry(m.entity_id) {
            Entry::Vacant(vacant) => {
                vacant.insert(unique.len());
                unique.push(m);
            }
            Entry::Occupied(occupied) => {
                let slot = &mut unique[*occupied.get()];
                if m.ped < slot.ped {
                    *slot = m;
                }
            }
        }
    }

    unique.sort_by(|a, b| compare_matches(a, b, entities));
    unique
}
