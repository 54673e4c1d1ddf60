use std::collections::{BTreeMap, HashMap};

use crate::{
    core::TimeKey,
    error::{RankraceError, RankraceResult},
};

/// One raw input row: an entity's value at one point in time.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Observation {
    pub entity: String,
    pub time: TimeKey,
    pub value: f64, // non-finite input coerces to 0
}

impl Observation {
    /// Build an observation, coercing a non-finite value to 0.
    ///
    /// Value coercion never fails; a bad time key is the caller's problem and
    /// is rejected later, before aggregation.
    pub fn new(entity: impl Into<String>, time: TimeKey, value: f64) -> Self {
        Self {
            entity: entity.into(),
            time,
            value: if value.is_finite() { value } else { 0.0 },
        }
    }
}

/// The universe of entity names, in first-seen order.
///
/// The order is deterministic and load-bearing: the ranker breaks value ties
/// by it, so two runs over the same input always agree on tie order. An
/// entity stays in the universe for the whole timeline even when absent from
/// individual snapshots (it ranks with value 0 there).
#[derive(Clone, Debug, Default)]
pub struct EntitySet {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl EntitySet {
    /// Collect the distinct entity names of `observations`, first seen first.
    pub fn from_observations(observations: &[Observation]) -> Self {
        let mut set = Self::default();
        for obs in observations {
            set.insert(&obs.entity);
        }
        set
    }

    fn insert(&mut self, name: &str) {
        if !self.index.contains_key(name) {
            self.index.insert(name.to_string(), self.names.len());
            self.names.push(name.to_string());
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Position of `name` in first-seen order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Iterate names in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.names.iter()
    }
}

/// All entity values at one real (non-interpolated) time point.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Snapshot {
    pub time: TimeKey,
    pub values: BTreeMap<String, f64>, // at most one value per entity
}

impl Snapshot {
    /// Value of `entity` at this instant; absent entities read as 0.
    pub fn value_of(&self, entity: &str) -> f64 {
        self.values.get(entity).copied().unwrap_or(0.0)
    }
}

/// One entity's value and clamped rank within a keyframe.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RankedEntry {
    pub entity: String,
    pub value: f64,
    pub rank: usize, // zero-based, clamped to the overflow rank
}

/// One animation frame's full ranking, at a real or synthetic time.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe {
    pub time: TimeKey,
    pub entries: Vec<RankedEntry>, // descending by value, ties in entity-set order
}

impl Keyframe {
    /// Find the entry for `entity`, if it appears in this frame.
    pub fn entry(&self, entity: &str) -> Option<&RankedEntry> {
        self.entries.iter().find(|e| e.entity == entity)
    }

    /// Entries inside the visible window (rank below `cutoff`).
    ///
    /// Everything else shares the overflow rank equal to `cutoff` and is
    /// drawn collapsed (or not at all) by the renderer.
    pub fn visible(&self, cutoff: usize) -> impl Iterator<Item = &RankedEntry> {
        self.entries.iter().filter(move |e| e.rank < cutoff)
    }
}

/// The scalar configuration surface of the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RaceConfig {
    pub top_n: usize, // entities shown distinctly; the rest collapse
    pub steps: usize, // interpolated sub-frames per snapshot interval
    pub tick_ms: u64, // per-frame advance, consumed by the renderer's clock
    pub seed: u64,    // determinism seed for color assignment
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            top_n: 12,
            steps: 10,
            tick_ms: 250,
            seed: 0,
        }
    }
}

impl RaceConfig {
    pub fn validate(&self) -> RankraceResult<()> {
        if self.top_n == 0 {
            return Err(RankraceError::config("top_n must be > 0"));
        }
        if self.steps == 0 {
            return Err(RankraceError::config("steps must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(entity: &str, time: f64, value: f64) -> Observation {
        Observation::new(entity, TimeKey(time), value)
    }

    #[test]
    fn observation_coerces_non_finite_value() {
        assert_eq!(obs("A", 2015.0, f64::NAN).value, 0.0);
        assert_eq!(obs("A", 2015.0, f64::INFINITY).value, 0.0);
        assert_eq!(obs("A", 2015.0, 42.0).value, 42.0);
    }

    #[test]
    fn entity_set_keeps_first_seen_order() {
        let rows = vec![
            obs("Apple", 2015.0, 1.0),
            obs("Google", 2015.0, 2.0),
            obs("Apple", 2016.0, 3.0),
            obs("IBM", 2015.0, 4.0),
        ];
        let set = EntitySet::from_observations(&rows);
        assert_eq!(set.len(), 3);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec!["Apple", "Google", "IBM"]
        );
        assert_eq!(set.position("IBM"), Some(2));
        assert!(!set.contains("Samsung"));
    }

    #[test]
    fn snapshot_reads_absent_entities_as_zero() {
        let snap = Snapshot {
            time: TimeKey(2015.0),
            values: BTreeMap::from([("Apple".to_string(), 10.0)]),
        };
        assert_eq!(snap.value_of("Apple"), 10.0);
        assert_eq!(snap.value_of("Google"), 0.0);
    }

    #[test]
    fn config_validate_rejects_zero_params() {
        assert!(RaceConfig::default().validate().is_ok());
        assert!(
            RaceConfig {
                top_n: 0,
                ..RaceConfig::default()
            }
            .validate()
            .is_err()
        );
        assert!(
            RaceConfig {
                steps: 0,
                ..RaceConfig::default()
            }
            .validate()
            .is_err()
        );
    }

    #[test]
    fn keyframe_json_roundtrip() {
        let frame = Keyframe {
            time: TimeKey(2016.5),
            entries: vec![
                RankedEntry {
                    entity: "Apple".to_string(),
                    value: 170.2,
                    rank: 0,
                },
                RankedEntry {
                    entity: "Google".to_string(),
                    value: 120.9,
                    rank: 1,
                },
            ],
        };
        let s = serde_json::to_string(&frame).unwrap();
        let de: Keyframe = serde_json::from_str(&s).unwrap();
        assert_eq!(de, frame);
    }

    #[test]
    fn keyframe_visible_excludes_overflow_rank() {
        let frame = Keyframe {
            time: TimeKey(0.0),
            entries: vec![
                RankedEntry {
                    entity: "A".to_string(),
                    value: 3.0,
                    rank: 0,
                },
                RankedEntry {
                    entity: "B".to_string(),
                    value: 2.0,
                    rank: 1,
                },
                RankedEntry {
                    entity: "C".to_string(),
                    value: 1.0,
                    rank: 1,
                },
            ],
        };
        let visible: Vec<_> = frame.visible(1).map(|e| e.entity.as_str()).collect();
        assert_eq!(visible, vec!["A"]);
    }
}
