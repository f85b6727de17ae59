//! Top channel ranking.

use serde::Serialize;
use std::collections::HashMap;

use crate::types::WatchRecord;

/// Number of entities kept in the ranking.
pub const DEFAULT_TOP_ENTITIES: usize = 15;

/// One ranked entity (channel).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityRank {
    pub name: String,
    pub count: u64,
}

/// Count records per primary entity, insertion-ordered.
///
/// Only the first entity reference of a record counts. Names are compared
/// exactly, so "Rust" and "rust" are different entities.
pub fn entity_counts(records: &[WatchRecord]) -> Vec<(String, u64)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, u64)> = Vec::new();

    for name in records.iter().filter_map(WatchRecord::primary_entity) {
        match index.get(name) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(name, counts.len());
                counts.push((name.to_string(), 1));
            }
        }
    }

    counts
}

/// Rank entities by record count, keeping the top `limit`.
///
/// Ties keep the order in which entities were first seen.
pub fn top_entities(records: &[WatchRecord], limit: usize) -> Vec<EntityRank> {
    let mut counts = entity_counts(records);
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    counts
        .into_iter()
        .take(limit)
        .map(|(name, count)| EntityRank { name, count })
        .collect()
}
