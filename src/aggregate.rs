use std::collections::BTreeMap;

use crate::{
    core::TimeKey,
    error::{RankraceError, RankraceResult},
    model::{EntitySet, Observation, Snapshot},
};

/// Group observations into one snapshot per distinct time key, ascending.
///
/// Duplicate (entity, time) pairs resolve last-write-wins in input order.
/// Entities absent from a given time key are simply absent from that
/// snapshot; readers treat them as 0. Zero observations produce zero
/// snapshots, not an error.
#[tracing::instrument(skip(observations), fields(observations = observations.len()))]
pub fn snapshots(observations: &[Observation]) -> RankraceResult<Vec<Snapshot>> {
    let mut grouped: BTreeMap<TimeKey, BTreeMap<String, f64>> = BTreeMap::new();
    for obs in observations {
        if !obs.time.is_finite() {
            return Err(RankraceError::input(format!(
                "observation for '{}' has a non-finite time key",
                obs.entity
            )));
        }
        grouped
            .entry(obs.time)
            .or_default()
            .insert(obs.entity.clone(), obs.value);
    }
    let snapshots: Vec<Snapshot> = grouped
        .into_iter()
        .map(|(time, values)| Snapshot { time, values })
        .collect();
    tracing::debug!(snapshots = snapshots.len(), "aggregated observations");
    Ok(snapshots)
}

/// Entity roster in first-seen input order, taken from the raw observation
/// stream rather than the grouped snapshots so the order stays a property
/// of the dataset, not of time-key sorting.
pub fn roster(observations: &[Observation]) -> EntitySet {
    EntitySet::from_observations(observations)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(entity: &str, time: f64, value: f64) -> Observation {
        Observation::new(entity.to_string(), TimeKey(time), value)
    }

    #[test]
    fn snapshots_sort_by_time_regardless_of_input_order() {
        let observations = vec![obs("A", 10.0, 1.0), obs("A", 0.0, 2.0), obs("A", 5.0, 3.0)];
        let snaps = snapshots(&observations).unwrap();
        let times: Vec<f64> = snaps.iter().map(|s| s.time.0).collect();
        assert_eq!(times, vec![0.0, 5.0, 10.0]);
    }

    #[test]
    fn duplicate_pairs_resolve_last_write_wins() {
        let observations = vec![obs("A", 0.0, 1.0), obs("A", 0.0, 9.0)];
        let snaps = snapshots(&observations).unwrap();
        assert_eq!(snaps.len(), 1);
        assert_eq!(snaps[0].value_of("A"), 9.0);
    }

    #[test]
    fn absent_entity_stays_absent_from_snapshot() {
        let observations = vec![obs("A", 0.0, 1.0), obs("B", 1.0, 2.0)];
        let snaps = snapshots(&observations).unwrap();
        assert!(!snaps[0].values.contains_key("B"));
        assert_eq!(snaps[0].value_of("B"), 0.0);
    }

    #[test]
    fn empty_input_yields_no_snapshots() {
        assert!(snapshots(&[]).unwrap().is_empty());
    }

    #[test]
    fn non_finite_time_is_rejected_before_grouping() {
        // Bypasses TimeKey::new on purpose; the tuple field is public.
        let observations = vec![Observation::new("A".to_string(), TimeKey(f64::NAN), 1.0)];
        let err = snapshots(&observations).unwrap_err();
        assert!(err.to_string().contains("non-finite time key"));
    }

    #[test]
    fn roster_keeps_first_seen_order() {
        let observations = vec![obs("B", 1.0, 1.0), obs("A", 0.0, 1.0), obs("B", 2.0, 1.0)];
        let set = roster(&observations);
        let names: Vec<&str> = set.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["B", "A"]);
    }
}
