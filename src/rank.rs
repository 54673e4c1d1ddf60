use crate::model::{EntitySet, RankedEntry, Snapshot};

/// Rank every entity in the roster by a value lookup, descending.
///
/// The sort is stable over roster order, so entities with equal values keep
/// their first-seen order from the dataset. Every entity appears in the
/// output; positions at or past `cutoff` all share rank `cutoff`, which is
/// what lets an entity slide "off the chart" without leaving the data.
pub fn rank_entities<F>(entities: &EntitySet, value_of: F, cutoff: usize) -> Vec<RankedEntry>
where
    F: Fn(&str) -> f64,
{
    let mut entries: Vec<RankedEntry> = entities
        .iter()
        .map(|name| RankedEntry {
            entity: name.clone(),
            value: value_of(name),
            rank: 0,
        })
        .collect();
    entries.sort_by(|a, b| b.value.total_cmp(&a.value));
    for (position, entry) in entries.iter_mut().enumerate() {
        entry.rank = position.min(cutoff);
    }
    entries
}

/// Rank a snapshot directly, reading absent entities as 0.
pub fn rank_snapshot(entities: &EntitySet, snapshot: &Snapshot, cutoff: usize) -> Vec<RankedEntry> {
    rank_entities(entities, |name| snapshot.value_of(name), cutoff)
}
