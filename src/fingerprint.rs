use crate::model::Keyframe;

/// Dual 64-bit digest of a keyframe sequence.
///
/// Two independently seeded FNV-1a accumulators make accidental collisions
/// across test runs implausible without pulling in a crypto hash. Equal
/// fingerprints across builds is the determinism check; the CLI prints it
/// for eyeball comparison between machines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RaceFingerprint {
    pub hi: u64,
    pub lo: u64,
}

impl std::fmt::Display for RaceFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

pub fn fingerprint_keyframes(keyframes: &[Keyframe]) -> RaceFingerprint {
    let mut a = Fnv1a64::new(0xcbf29ce484222325);
    let mut b = Fnv1a64::new(0x9ae16a3b2f90404f);

    write_u64_pair(&mut a, &mut b, keyframes.len() as u64);
    for keyframe in keyframes {
        write_u64_pair(&mut a, &mut b, keyframe.time.0.to_bits());
        write_u64_pair(&mut a, &mut b, keyframe.entries.len() as u64);
        for entry in &keyframe.entries {
            write_str_pair(&mut a, &mut b, &entry.entity);
            write_u64_pair(&mut a, &mut b, entry.value.to_bits());
            write_u64_pair(&mut a, &mut b, entry.rank as u64);
        }
    }

    RaceFingerprint {
        hi: a.finish(),
        lo: b.finish(),
    }
}

/// Seeded hash of an arbitrary byte string, shared with color assignment.
pub(crate) fn seeded_hash(seed: u64, bytes: &[u8]) -> u64 {
    let mut h = Fnv1a64::new(0xcbf29ce484222325);
    h.write_u64(seed);
    h.write_bytes(bytes);
    h.finish()
}

fn write_u64_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: u64) {
    a.write_u64(v);
    b.write_u64(v);
}

fn write_str_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, s: &str) {
    write_u64_pair(a, b, s.len() as u64);
    a.write_bytes(s.as_bytes());
    b.write_bytes(s.as_bytes());
}

#[derive(Clone, Copy)]
struct Fnv1a64(u64);

impl Fnv1a64 {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        self.0 = h;
    }

    fn finish(self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::TimeKey, model::RankedEntry};

    fn frame(time: f64, entity: &str, value: f64, rank: usize) -> Keyframe {
        Keyframe {
            time: TimeKey(time),
            entries: vec![RankedEntry {
                entity: entity.to_string(),
                value,
                rank,
            }],
        }
    }

    #[test]
    fn fingerprint_is_deterministic_for_same_sequence() {
        let frames = vec![frame(0.0, "A", 1.0, 0), frame(1.0, "A", 2.0, 0)];
        assert_eq!(fingerprint_keyframes(&frames), fingerprint_keyframes(&frames));
    }

    #[test]
    fn fingerprint_changes_when_a_value_changes() {
        let a = vec![frame(0.0, "A", 1.0, 0)];
        let b = vec![frame(0.0, "A", 1.5, 0)];
        assert_ne!(fingerprint_keyframes(&a), fingerprint_keyframes(&b));
    }

    #[test]
    fn fingerprint_changes_when_a_rank_changes() {
        let a = vec![frame(0.0, "A", 1.0, 0)];
        let b = vec![frame(0.0, "A", 1.0, 1)];
        assert_ne!(fingerprint_keyframes(&a), fingerprint_keyframes(&b));
    }

    #[test]
    fn display_is_fixed_width_hex() {
        let digest = fingerprint_keyframes(&[frame(0.0, "A", 1.0, 0)]);
        let text = digest.to_string();
        assert_eq!(text.len(), 32);
        assert!(text.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
