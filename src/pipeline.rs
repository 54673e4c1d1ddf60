use std::collections::BTreeMap;

use crate::{
    aggregate,
    error::{RankraceError, RankraceResult},
    fingerprint::{RaceFingerprint, fingerprint_keyframes},
    keyframes,
    model::{EntitySet, Keyframe, Observation, RaceConfig, RankedEntry},
    palette::{Hsl, assign_colors},
    render::{FrameContext, FrameSink},
    transitions::TransitionIndex,
};

/// A fully built race: the dense keyframe sequence plus everything a
/// consumer needs to play it back. Construction is the only way to get one,
/// so a `Race` in hand is always internally consistent.
#[derive(Clone, Debug)]
pub struct Race {
    config: RaceConfig,
    entities: EntitySet,
    keyframes: Vec<Keyframe>,
    transitions: TransitionIndex,
    colors: BTreeMap<String, Hsl>,
}

impl Race {
    pub fn config(&self) -> &RaceConfig {
        &self.config
    }

    pub fn entities(&self) -> &EntitySet {
        &self.entities
    }

    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    pub fn colors(&self) -> &BTreeMap<String, Hsl> {
        &self.colors
    }

    pub fn transitions(&self) -> &TransitionIndex {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// The entity's entry in the previous keyframe it occurs in, with the
    /// fallback-to-self rule at the start of the sequence.
    pub fn prev_entry(&self, frame: usize, entity: &str) -> Option<&RankedEntry> {
        self.transitions.prev(&self.keyframes, frame, entity)
    }

    pub fn next_entry(&self, frame: usize, entity: &str) -> Option<&RankedEntry> {
        self.transitions.next(&self.keyframes, frame, entity)
    }

    /// Digest of the whole sequence; equal inputs and config give equal
    /// fingerprints on every machine.
    pub fn fingerprint(&self) -> RaceFingerprint {
        fingerprint_keyframes(&self.keyframes)
    }
}

/// Build a race from raw observations: roster, snapshots, interpolated
/// keyframes, transition links and colors, in that order. The single
/// synchronous entry point; everything it calls is pure.
#[tracing::instrument(skip(observations), fields(observations = observations.len()))]
pub fn build_race(observations: &[Observation], config: &RaceConfig) -> RankraceResult<Race> {
    config.validate()?;
    let entities = aggregate::roster(observations);
    let snapshots = aggregate::snapshots(observations)?;
    let frames = keyframes::interpolate(&snapshots, &entities, config)?;
    Ok(finish_build(config, entities, frames))
}

#[derive(Clone, Debug)]
pub struct BuildThreading {
    pub parallel: bool,
    pub threads: Option<usize>,
}

impl Default for BuildThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            threads: None,
        }
    }
}

/// [`build_race`] with interpolation optionally fanned out over a rayon
/// pool. Output is identical to the sequential path frame for frame.
#[tracing::instrument(skip(observations, threading), fields(observations = observations.len()))]
pub fn build_race_with_threading(
    observations: &[Observation],
    config: &RaceConfig,
    threading: &BuildThreading,
) -> RankraceResult<Race> {
    if !threading.parallel {
        return build_race(observations, config);
    }
    config.validate()?;
    let entities = aggregate::roster(observations);
    let snapshots = aggregate::snapshots(observations)?;
    let pool = build_thread_pool(threading.threads)?;
    let frames = keyframes::interpolate_parallel(&snapshots, &entities, config, &pool)?;
    Ok(finish_build(config, entities, frames))
}

/// Hand every keyframe to the sink strictly in time order, then let the
/// sink flush. A race with no frames emits nothing and succeeds.
#[tracing::instrument(skip(race, sink), fields(frames = race.len()))]
pub fn play(race: &Race, sink: &mut dyn FrameSink) -> RankraceResult<()> {
    for (index, keyframe) in race.keyframes.iter().enumerate() {
        let ctx = FrameContext::new(
            index,
            race.config.tick_ms,
            &race.keyframes,
            &race.transitions,
            &race.colors,
        );
        sink.frame(keyframe, &ctx)?;
    }
    sink.finish()
}

fn finish_build(config: &RaceConfig, entities: EntitySet, frames: Vec<Keyframe>) -> Race {
    let transitions = TransitionIndex::build(&frames);
    let colors = assign_colors(&entities, config.seed);
    tracing::info!(
        entities = entities.len(),
        frames = frames.len(),
        "built race"
    );
    Race {
        config: *config,
        entities,
        keyframes: frames,
        transitions,
        colors,
    }
}

fn build_thread_pool(threads: Option<usize>) -> RankraceResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(RankraceError::config(
            "build threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build rayon thread pool: {e}").into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::TimeKey, render::CollectSink};

    fn observations() -> Vec<Observation> {
        vec![
            Observation::new("A".to_string(), TimeKey(2000.0), 10.0),
            Observation::new("B".to_string(), TimeKey(2000.0), 5.0),
            Observation::new("A".to_string(), TimeKey(2001.0), 5.0),
            Observation::new("B".to_string(), TimeKey(2001.0), 10.0),
        ]
    }

    fn config() -> RaceConfig {
        RaceConfig {
            top_n: 1,
            steps: 2,
            ..RaceConfig::default()
        }
    }

    #[test]
    fn build_wires_every_stage_together() {
        let race = build_race(&observations(), &config()).unwrap();
        assert_eq!(race.len(), 3);
        assert_eq!(race.entities().len(), 2);
        assert_eq!(race.colors().len(), 2);
        assert_eq!(race.keyframes()[0].time, TimeKey(2000.0));
        assert_eq!(race.keyframes()[2].time, TimeKey(2001.0));
    }

    #[test]
    fn empty_observations_build_an_empty_race() {
        let race = build_race(&[], &config()).unwrap();
        assert!(race.is_empty());
        assert!(race.entities().is_empty());
        let mut sink = CollectSink::default();
        play(&race, &mut sink).unwrap();
        assert!(sink.frames.is_empty());
    }

    #[test]
    fn play_emits_frames_in_order_and_unchanged() {
        let race = build_race(&observations(), &config()).unwrap();
        let mut sink = CollectSink::default();
        play(&race, &mut sink).unwrap();
        assert_eq!(sink.frames, race.keyframes());
        assert_eq!(
            fingerprint_keyframes(&sink.frames),
            race.fingerprint()
        );
    }

    #[test]
    fn neighbor_lookups_follow_the_fallback_rule() {
        let race = build_race(&observations(), &config()).unwrap();
        let first = race.prev_entry(0, "A").unwrap();
        assert_eq!(first.value, 10.0);
        let last_idx = race.len() - 1;
        let last = race.next_entry(last_idx, "B").unwrap();
        assert_eq!(last.value, 10.0);
    }

    #[test]
    fn zero_threads_is_a_config_error() {
        let threading = BuildThreading {
            parallel: true,
            threads: Some(0),
        };
        let err = build_race_with_threading(&observations(), &config(), &threading).unwrap_err();
        assert!(err.to_string().contains("config error:"));
    }

    #[test]
    fn invalid_config_fails_before_any_work() {
        let bad = RaceConfig {
            top_n: 0,
            ..RaceConfig::default()
        };
        assert!(build_race(&observations(), &bad).is_err());
    }
}
