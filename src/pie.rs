use std::f64::consts::TAU;

/// One pie input, toggleable without leaving the layout.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PieEntry {
    pub label: String,
    pub value: f64,
    pub enabled: bool,
}

/// One laid-out slice. Angles are radians clockwise from 12 o'clock over
/// `0..2π`; a disabled entry keeps its position with zero angular extent so
/// a renderer can animate it collapsing and reopening in place.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub fraction: f64,
    pub percent: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

/// Lay out slices in input order, never sorted by value. Fractions are
/// taken over the enabled total; a zero total (everything disabled or all
/// zeros) degrades to zero-extent slices rather than an error.
pub fn pie_layout(entries: &[PieEntry]) -> Vec<PieSlice> {
    let total: f64 = entries
        .iter()
        .filter(|e| e.enabled)
        .map(|e| e.value)
        .sum();
    let mut cursor = 0.0;
    entries
        .iter()
        .map(|entry| {
            let fraction = if entry.enabled && total > 0.0 {
                entry.value / total
            } else {
                0.0
            };
            let start_angle = cursor;
            cursor += fraction * TAU;
            PieSlice {
                label: entry.label.clone(),
                value: entry.value,
                fraction,
                percent: (1000.0 * fraction).round() / 10.0,
                start_angle,
                end_angle: cursor,
            }
        })
        .collect()
}

/// Flip one entry by label. Enabling always succeeds; disabling the last
/// enabled entry is refused so the layout never goes fully empty under
/// user toggles. Returns whether the entry changed.
pub fn toggle(entries: &mut [PieEntry], label: &str) -> bool {
    let enabled_count = entries.iter().filter(|e| e.enabled).count();
    match entries.iter_mut().find(|e| e.label == label) {
        Some(entry) if entry.enabled && enabled_count == 1 => false,
        Some(entry) => {
            entry.enabled = !entry.enabled;
            true
        }
        None => false,
    }
}
