use std::collections::HashMap;

use crate::model::{Keyframe, RankedEntry};

#[derive(Clone, Copy, Debug)]
struct Links {
    position: usize,
    prev: Option<(usize, usize)>,
    next: Option<(usize, usize)>,
}

/// Per-entity prev/next occurrence links across a keyframe sequence.
///
/// For each entry the index records where the same entity appears earlier
/// and later in the sequence. An entity's first occurrence has no earlier
/// link and its last has no later one; lookups fall back to the queried
/// entry itself in those cases. Renderers lean on that fallback to make
/// entering bars grow from their own slot and exiting bars shrink into it
/// instead of jumping from nowhere.
///
/// The index stores positions, not copies, so lookups must be handed the
/// same sequence the index was built from.
#[derive(Clone, Debug, Default)]
pub struct TransitionIndex {
    frames: Vec<HashMap<String, Links>>,
}

impl TransitionIndex {
    pub fn build(keyframes: &[Keyframe]) -> Self {
        let mut frames: Vec<HashMap<String, Links>> = Vec::with_capacity(keyframes.len());
        let mut last_seen: HashMap<String, (usize, usize)> = HashMap::new();
        for (frame_idx, keyframe) in keyframes.iter().enumerate() {
            let mut map = HashMap::with_capacity(keyframe.entries.len());
            for (position, entry) in keyframe.entries.iter().enumerate() {
                let prev = last_seen.get(&entry.entity).copied();
                if let Some((prev_frame, _)) = prev
                    && let Some(links) = frames[prev_frame].get_mut(&entry.entity)
                {
                    links.next = Some((frame_idx, position));
                }
                map.insert(
                    entry.entity.clone(),
                    Links {
                        position,
                        prev,
                        next: None,
                    },
                );
                last_seen.insert(entry.entity.clone(), (frame_idx, position));
            }
            frames.push(map);
        }
        Self { frames }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The entity's previous occurrence, or its entry in `frame` itself when
    /// this is the first occurrence. `None` when the entity is not in that
    /// frame at all.
    pub fn prev<'a>(
        &self,
        keyframes: &'a [Keyframe],
        frame: usize,
        entity: &str,
    ) -> Option<&'a RankedEntry> {
        self.neighbor(keyframes, frame, entity, |links| links.prev)
    }

    /// The entity's next occurrence, with the same fallback-to-self rule.
    pub fn next<'a>(
        &self,
        keyframes: &'a [Keyframe],
        frame: usize,
        entity: &str,
    ) -> Option<&'a RankedEntry> {
        self.neighbor(keyframes, frame, entity, |links| links.next)
    }

    fn neighbor<'a>(
        &self,
        keyframes: &'a [Keyframe],
        frame: usize,
        entity: &str,
        pick: impl Fn(&Links) -> Option<(usize, usize)>,
    ) -> Option<&'a RankedEntry> {
        let links = self.frames.get(frame)?.get(entity)?;
        let (frame_idx, position) = pick(links).unwrap_or((frame, links.position));
        keyframes.get(frame_idx)?.entries.get(position)
    }
}
