use crate::error::{RankraceError, RankraceResult};

/// Linear interpolation in convex form, `a·(1−t) + b·t`.
///
/// This is the exact arithmetic used for both values and synthetic times, so
/// endpoints reproduce the inputs bit-for-bit at `t = 0` and `t = 1`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Orderable, linearly interpolable time scalar (a year, an epoch value).
///
/// The timeline is whatever scalar the dataset uses; the engine only needs a
/// total order and linear interpolation between adjacent keys. Non-finite
/// values are invalid input and are rejected before aggregation.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct TimeKey(pub f64);

impl TimeKey {
    /// Create a validated time key; non-finite values are an input error.
    pub fn new(value: f64) -> RankraceResult<Self> {
        if !value.is_finite() {
            return Err(RankraceError::input("time key must be finite"));
        }
        Ok(Self(value))
    }

    /// Return `true` when the key is orderable input (finite).
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Interpolated key between `a` and `b` at fraction `t` in `[0, 1]`.
    pub fn lerp(a: Self, b: Self, t: f64) -> Self {
        Self(lerp(a.0, b.0, t))
    }
}

impl PartialEq for TimeKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for TimeKey {}

impl PartialOrd for TimeKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::hash::Hash for TimeKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u64(self.0.to_bits());
    }
}
