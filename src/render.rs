use std::collections::BTreeMap;

use crate::{
    error::{RankraceError, RankraceResult},
    model::{Keyframe, RankedEntry},
    palette::Hsl,
    transitions::TransitionIndex,
};

/// Everything a sink may ask about the frame it is being handed.
///
/// Lookups go through the transition index, so `prev`/`next` carry the
/// fallback-to-self rule renderers rely on for enter/exit motion.
pub struct FrameContext<'a> {
    pub index: usize,
    pub total: usize,
    pub tick_ms: u64,
    keyframes: &'a [Keyframe],
    transitions: &'a TransitionIndex,
    colors: &'a BTreeMap<String, Hsl>,
}

impl<'a> FrameContext<'a> {
    pub(crate) fn new(
        index: usize,
        tick_ms: u64,
        keyframes: &'a [Keyframe],
        transitions: &'a TransitionIndex,
        colors: &'a BTreeMap<String, Hsl>,
    ) -> Self {
        Self {
            index,
            total: keyframes.len(),
            tick_ms,
            keyframes,
            transitions,
            colors,
        }
    }

    pub fn prev(&self, entity: &str) -> Option<&'a RankedEntry> {
        self.transitions.prev(self.keyframes, self.index, entity)
    }

    pub fn next(&self, entity: &str) -> Option<&'a RankedEntry> {
        self.transitions.next(self.keyframes, self.index, entity)
    }

    pub fn color(&self, entity: &str) -> Option<Hsl> {
        self.colors.get(entity).copied()
    }
}

/// Consumer boundary for playback. The engine hands frames over strictly in
/// time order and never draws anything itself; terminals, SVG writers and
/// test buffers all sit behind this trait.
pub trait FrameSink {
    fn frame(&mut self, keyframe: &Keyframe, ctx: &FrameContext<'_>) -> RankraceResult<()>;

    /// Called once after the last frame; sinks with buffered output flush
    /// here. The default is a no-op.
    fn finish(&mut self) -> RankraceResult<()> {
        Ok(())
    }
}

/// Buffers every frame it is handed. Used by tests and by consumers that
/// want the whole sequence in memory.
#[derive(Debug, Default)]
pub struct CollectSink {
    pub frames: Vec<Keyframe>,
}

impl FrameSink for CollectSink {
    fn frame(&mut self, keyframe: &Keyframe, _ctx: &FrameContext<'_>) -> RankraceResult<()> {
        self.frames.push(keyframe.clone());
        Ok(())
    }
}

/// Writes one JSON object per frame, newline-terminated. This is the CLI's
/// streaming output; any line-oriented consumer can follow along without
/// waiting for the full sequence.
pub struct JsonLinesSink<W> {
    out: W,
}

impl<W: std::io::Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: std::io::Write> FrameSink for JsonLinesSink<W> {
    fn frame(&mut self, keyframe: &Keyframe, _ctx: &FrameContext<'_>) -> RankraceResult<()> {
        serde_json::to_writer(&mut self.out, keyframe)
            .map_err(|e| RankraceError::serde(format!("failed to encode keyframe: {e}")))?;
        self.out
            .write_all(b"\n")
            .map_err(|e| RankraceError::render(format!("failed to write frame: {e}")))?;
        Ok(())
    }

    fn finish(&mut self) -> RankraceResult<()> {
        self.out
            .flush()
            .map_err(|e| RankraceError::render(format!("failed to flush frames: {e}")))
    }
}
