use rayon::prelude::*;

use crate::{
    core::{TimeKey, lerp},
    error::RankraceResult,
    model::{EntitySet, Keyframe, RaceConfig, Snapshot},
    rank::rank_entities,
};

/// Expand time-sorted snapshots into the dense ranked keyframe sequence.
///
/// Each adjacent snapshot pair contributes `steps` sub-frames at fractions
/// `i / steps` for `i in 0..steps`; both the time key and every entity value
/// interpolate linearly, with entities absent from a snapshot read as 0. A
/// final frame at the last snapshot's exact time closes the sequence, so
/// `m` snapshots yield `steps * (m - 1) + 1` keyframes. Ranking runs on the
/// interpolated values of each sub-frame, which is what makes bars overtake
/// each other mid-interval instead of snapping at snapshot boundaries.
///
/// A single snapshot yields just its raw frame and no snapshots yield no
/// frames; neither is an error.
#[tracing::instrument(skip(snapshots, entities), fields(snapshots = snapshots.len()))]
pub fn interpolate(
    snapshots: &[Snapshot],
    entities: &EntitySet,
    config: &RaceConfig,
) -> RankraceResult<Vec<Keyframe>> {
    config.validate()?;
    let Some(last) = snapshots.last() else {
        return Ok(Vec::new());
    };
    let mut frames = Vec::with_capacity(frame_count(snapshots.len(), config.steps));
    for pair in snapshots.windows(2) {
        frames.extend(pair_frames(&pair[0], &pair[1], entities, config));
    }
    frames.push(raw_frame(last, entities, config));
    tracing::debug!(frames = frames.len(), "interpolated keyframes");
    Ok(frames)
}

/// Same output as [`interpolate`], with pair expansion fanned out over a
/// rayon pool. Pairs are independent, and the indexed collect keeps emission
/// order, so the two paths agree frame for frame.
#[tracing::instrument(skip(snapshots, entities, pool), fields(snapshots = snapshots.len()))]
pub fn interpolate_parallel(
    snapshots: &[Snapshot],
    entities: &EntitySet,
    config: &RaceConfig,
    pool: &rayon::ThreadPool,
) -> RankraceResult<Vec<Keyframe>> {
    config.validate()?;
    let Some(last) = snapshots.last() else {
        return Ok(Vec::new());
    };
    let pairs: Vec<(&Snapshot, &Snapshot)> =
        snapshots.windows(2).map(|w| (&w[0], &w[1])).collect();
    let mut frames: Vec<Keyframe> = pool
        .install(|| {
            pairs
                .par_iter()
                .map(|&(a, b)| pair_frames(a, b, entities, config))
                .collect::<Vec<_>>()
        })
        .into_iter()
        .flatten()
        .collect();
    frames.push(raw_frame(last, entities, config));
    Ok(frames)
}

/// Keyframes produced for `m` snapshots at `steps` sub-frames per interval.
pub fn frame_count(snapshot_count: usize, steps: usize) -> usize {
    if snapshot_count == 0 {
        return 0;
    }
    steps * (snapshot_count - 1) + 1
}

fn pair_frames(
    a: &Snapshot,
    b: &Snapshot,
    entities: &EntitySet,
    config: &RaceConfig,
) -> Vec<Keyframe> {
    let steps = config.steps;
    let mut frames = Vec::with_capacity(steps);
    for i in 0..steps {
        let f = i as f64 / steps as f64;
        let entries = rank_entities(
            entities,
            |name| lerp(a.value_of(name), b.value_of(name), f),
            config.top_n,
        );
        frames.push(Keyframe {
            time: TimeKey::lerp(a.time, b.time, f),
            entries,
        });
    }
    frames
}

// The closing frame carries the last snapshot verbatim, never a lerp result.
fn raw_frame(snapshot: &Snapshot, entities: &EntitySet, config: &RaceConfig) -> Keyframe {
    Keyframe {
        time: snapshot.time,
        entries: rank_entities(entities, |name| snapshot.value_of(name), config.top_n),
    }
}
