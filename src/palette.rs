use std::collections::BTreeMap;

use crate::{fingerprint::seeded_hash, model::EntitySet};

/// Bar color in HSL space, saturation and lightness as fractions.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub fn to_css(self) -> String {
        format!(
            "hsl({:.1}, {}%, {}%)",
            self.h,
            self.s * 100.0,
            self.l * 100.0
        )
    }
}

/// Assign each entity a stable color: hue from a seeded hash of the name,
/// saturation and lightness pinned at 0.75. Same roster and seed always
/// produce the same table, so re-running a build never recolors the chart.
pub fn assign_colors(entities: &EntitySet, seed: u64) -> BTreeMap<String, Hsl> {
    entities
        .iter()
        .map(|name| {
            let hue = (seeded_hash(seed, name.as_bytes()) % 360_000) as f64 / 1000.0;
            (name.clone(), Hsl { h: hue, s: 0.75, l: 0.75 })
        })
        .collect()
}
