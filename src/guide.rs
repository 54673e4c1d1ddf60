//! # Rankrace guide (v0.1.0)
//!
//! This module is a standalone walkthrough of the engine's architecture and
//! public API. It is intentionally detailed so integrations can build on a
//! shared mental model of what "a race" means in this codebase.
//!
//! If you are looking for copy/paste commands, start with the repository
//! `README.md`. If you are implementing new features, start here.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`Observation`](crate::Observation): one entity's value at one time key
//! - [`TimeKey`](crate::TimeKey): a finite, orderable, interpolable time scalar
//! - [`Snapshot`](crate::Snapshot): every observed value at one time key
//! - [`RankedEntry`](crate::RankedEntry): an entity with its value and clamped rank
//! - [`Keyframe`](crate::Keyframe): one ranked sub-frame of the animation
//! - [`Race`](crate::Race): the built artifact (keyframes + links + colors)
//! - [`FrameSink`](crate::FrameSink): where frames go; the engine never draws
//!
//! The pipeline is explicitly staged:
//!
//! 1. Aggregate observations into time-sorted snapshots: [`aggregate::snapshots`](crate::aggregate::snapshots)
//! 2. Interpolate snapshot pairs into ranked keyframes: [`keyframes::interpolate`](crate::keyframes::interpolate)
//! 3. Link each entity's occurrences for enter/exit motion: [`TransitionIndex::build`](crate::TransitionIndex::build)
//! 4. Hand frames to a sink in time order: [`play`](crate::play)
//!
//! [`build_race`](crate::build_race) runs (1)-(3) and returns the `Race`;
//! [`build_race_with_threading`](crate::build_race_with_threading) does the
//! same with interpolation fanned out over a rayon pool.
//!
//! ---
//!
//! ## "No IO in the engine" (and why)
//!
//! Every stage is a pure function over in-memory data. The library never
//! opens files or sockets; the CLI owns file handles and feeds
//! [`RawRecord`](crate::RawRecord) JSON through [`ingest`](crate::ingest).
//! That keeps the whole pipeline deterministic, testable without fixtures
//! on disk, and embeddable in anything from a terminal dashboard to a
//! server-side SVG writer.
//!
//! ---
//!
//! ## The determinism contract
//!
//! Identical input and config produce a bit-identical keyframe sequence, on
//! every machine, every run. The pieces that make that hold:
//!
//! - snapshots are keyed and sorted by [`TimeKey`](crate::TimeKey) total order
//! - ranking sorts stably over first-seen entity order, so ties never flicker
//! - interpolation uses the convex form `a·(1−f) + b·f`, exact at both ends
//! - colors hash the entity name with the config seed; no ambient randomness
//! - [`Race::fingerprint`](crate::Race::fingerprint) digests the whole
//!   sequence so equality is one comparison
//!
//! The parallel build path is part of the contract: it must produce the same
//! fingerprint as the sequential one, and tests hold it to that.
//!
//! ---
//!
//! ## Ranks and the overflow rank
//!
//! Every entity appears in every keyframe. Positions below `top_n` get their
//! position as rank; everything else shares rank `top_n`. A bar leaving the
//! visible field therefore still has coordinates to animate toward, which is
//! what makes exits slide out instead of vanishing.
//! [`Keyframe::visible`](crate::Keyframe::visible) filters to the ranks a
//! renderer actually shows.
//!
//! ---
//!
//! ## Building and playing a race
//!
//! ```rust
//! use rankrace::{CollectSink, Observation, RaceConfig, TimeKey, build_race, play};
//!
//! # fn main() -> rankrace::RankraceResult<()> {
//! let observations = vec![
//!     Observation::new("Apple".to_string(), TimeKey::new(2015.0)?, 170.2),
//!     Observation::new("Google".to_string(), TimeKey::new(2015.0)?, 120.9),
//!     Observation::new("Apple".to_string(), TimeKey::new(2016.0)?, 178.1),
//!     Observation::new("Google".to_string(), TimeKey::new(2016.0)?, 133.3),
//! ];
//!
//! let config = RaceConfig {
//!     steps: 4,
//!     ..RaceConfig::default()
//! };
//! let race = build_race(&observations, &config)?;
//!
//! // Two snapshots at four sub-frames each, plus the closing frame.
//! assert_eq!(race.keyframes().len(), 5);
//!
//! let mut sink = CollectSink::default();
//! play(&race, &mut sink)?;
//! assert_eq!(sink.frames.len(), race.len());
//! assert_eq!(sink.frames[0].entries[0].entity, "Apple");
//! # Ok(())
//! # }
//! ```
//!
//! Notes:
//!
//! - [`RaceConfig::validate`](crate::RaceConfig::validate) runs inside
//!   `build_race`; zero `steps` or `top_n` never get past the front door.
//! - Sinks see a [`FrameContext`](crate::FrameContext) alongside each frame
//!   with prev/next lookups, per-entity color, and the configured tick.
//!
//! ---
//!
//! ## Input tolerance
//!
//! Real datasets are messy, and the ingest boundary is deliberately lenient
//! about values and strict about time:
//!
//! - malformed or missing values coerce to `0` ([`ingest::coerce_value`](crate::ingest::coerce_value))
//! - a missing or non-finite time key fails the whole load, loudly
//! - duplicate (entity, time) pairs resolve last-write-wins
//!
//! A chart that silently drew garbage time axes would be worse than one that
//! refuses to start; a single unparseable revenue cell should not kill a
//! 40-year dataset. The asymmetry is intentional.
//!
//! ---
//!
//! ## Side layout: pie
//!
//! [`pie_layout`](crate::pie_layout) is a small companion for share-of-total
//! views over the same data: slices in input order, angles clockwise from 12
//! o'clock, and disabled entries kept in the layout at zero extent so
//! toggling animates in place. [`pie::toggle`](crate::pie::toggle) refuses
//! to disable the last enabled entry.
