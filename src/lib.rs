#![forbid(unsafe_code)]

pub mod aggregate;
pub mod core;
pub mod error;
pub mod fingerprint;
pub mod guide;
pub mod ingest;
pub mod keyframes;
pub mod model;
pub mod palette;
pub mod pie;
pub mod pipeline;
pub mod rank;
pub mod render;
pub mod transitions;

pub use core::TimeKey;
pub use error::{RankraceError, RankraceResult};
pub use fingerprint::{RaceFingerprint, fingerprint_keyframes};
pub use ingest::{RawRecord, coerce_value, observations};
pub use keyframes::{frame_count, interpolate, interpolate_parallel};
pub use model::{EntitySet, Keyframe, Observation, RaceConfig, RankedEntry, Snapshot};
pub use palette::{Hsl, assign_colors};
pub use pie::{PieEntry, PieSlice, pie_layout};
pub use pipeline::{BuildThreading, Race, build_race, build_race_with_threading, play};
pub use rank::{rank_entities, rank_snapshot};
pub use render::{CollectSink, FrameContext, FrameSink, JsonLinesSink};
pub use transitions::TransitionIndex;
