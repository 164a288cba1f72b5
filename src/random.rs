//! Deterministic pseudo-random stream keyed by a string seed.
//!
//! The seed string is folded into a 32-bit integer with a `*31` rolling hash
//! over its UTF-16 code units, then driven through a small linear
//! congruential generator. Identical seeds and identical call sequences always
//! produce identical output; nothing here is suitable for cryptography.

use crate::error::{LoremError, Result};

const LCG_MULTIPLIER: u64 = 9301;
const LCG_INCREMENT: u64 = 49297;
const LCG_MODULUS: u64 = 233280;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRandom {
    state: u64,
}

impl SeededRandom {
    pub fn new(seed: &str) -> Self {
        Self {
            state: u64::from(hash_seed(seed)),
        }
    }

    /// Next value in `[0, 1)`.
    pub fn next(&mut self) -> f64 {
        self.state = (self.state * LCG_MULTIPLIER + LCG_INCREMENT) % LCG_MODULUS;
        self.state as f64 / LCG_MODULUS as f64
    }

    /// Integer in `[min, max]`, inclusive on both ends.
    ///
    /// The stream is not advanced when the range is rejected.
    pub fn next_int(&mut self, min: i64, max: i64) -> Result<i64> {
        if max < min {
            return Err(LoremError::InvalidRange { min, max });
        }
        let (low, high) = (i128::from(min), i128::from(max));
        let span = (high - low + 1) as f64;
        let offset = (self.next() * span).floor() as i128;
        // Float rounding on very wide spans can land one past `max`.
        Ok((low + offset).clamp(low, high) as i64)
    }

    pub fn next_element<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T> {
        if items.is_empty() {
            return Err(LoremError::EmptyCollection);
        }
        let idx = self.next_int(0, items.len() as i64 - 1)?;
        // `next_int` stays inside the requested range.
        items.get(idx as usize).ok_or(LoremError::EmptyCollection)
    }
}

/// `hash = hash * 31 + unit`, wrapping at 32 bits, absolute value at the end.
fn hash_seed(seed: &str) -> u32 {
    let hash = seed.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    });
    hash.unsigned_abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_produces_same_stream() {
        let mut a = SeededRandom::new("lorem-ipsum-2026");
        let mut b = SeededRandom::new("lorem-ipsum-2026");
        for _ in 0..500 {
            assert_eq!(a.next().to_bits(), b.next().to_bits());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = SeededRandom::new("alpha");
        let mut b = SeededRandom::new("beta");
        let left: Vec<f64> = (0..16).map(|_| a.next()).collect();
        let right: Vec<f64> = (0..16).map(|_| b.next()).collect();
        assert_ne!(left, right, "distinct seeds should not share a stream");
    }

    #[test]
    fn hash_matches_rolling_polynomial() {
        // "ab" = 97 * 31 + 98
        assert_eq!(hash_seed("ab"), 3105);
        assert_eq!(hash_seed(""), 0);
    }

    #[test]
    fn hash_wraps_and_takes_absolute_value() {
        let long = "the quick brown fox jumps over the lazy dog".repeat(8);
        let mut expected: i32 = 0;
        for unit in long.encode_utf16() {
            expected = expected
                .wrapping_mul(31)
                .wrapping_add(i32::from(unit));
        }
        assert_eq!(hash_seed(&long), expected.unsigned_abs());
    }

    #[test]
    fn first_value_follows_lcg_step() {
        let mut rng = SeededRandom::new("ab");
        let expected_state = (3105 * 9301 + 49297) % 233280;
        let value = rng.next();
        assert_eq!(value, expected_state as f64 / 233280.0);
    }

    #[test]
    fn next_stays_in_unit_interval() {
        let mut rng = SeededRandom::new("unit");
        for _ in 0..10_000 {
            let value = rng.next();
            assert!((0.0..1.0).contains(&value), "value {value} escaped [0, 1)");
        }
    }

    #[test]
    fn next_int_respects_bounds_across_seeds() {
        let seeds = ["", "a", "lorem-ipsum-2026", "🙂 emoji seed", "0123456789"];
        let ranges = [(0, 0), (0, 1), (-5, 5), (3, 8), (5, 15), (-1000, -990)];
        for seed in seeds {
            let mut rng = SeededRandom::new(seed);
            for _ in 0..10_000 / seeds.len() {
                for (min, max) in ranges {
                    let value = rng.next_int(min, max).expect("valid range");
                    assert!(
                        (min..=max).contains(&value),
                        "{value} outside [{min}, {max}] for seed {seed:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn next_int_handles_full_width_ranges() {
        let mut rng = SeededRandom::new("wide");
        for _ in 0..1_000 {
            let upper = rng.next_int(0, i64::MAX).expect("valid range");
            assert!(upper >= 0);
            let lower = rng.next_int(i64::MIN, 0).expect("valid range");
            assert!(lower <= 0);
            rng.next_int(i64::MIN, i64::MAX).expect("valid range");
        }
        assert_eq!(rng.next_int(i64::MAX, i64::MAX), Ok(i64::MAX));
        assert_eq!(rng.next_int(i64::MIN, i64::MIN), Ok(i64::MIN));
    }

    #[test]
    fn next_int_rejects_inverted_range_without_advancing() {
        let mut rng = SeededRandom::new("guard");
        let untouched = rng.clone();
        assert_eq!(
            rng.next_int(10, 3),
            Err(LoremError::InvalidRange { min: 10, max: 3 })
        );
        assert_eq!(rng, untouched);
    }

    #[test]
    fn next_element_rejects_empty_slice() {
        let mut rng = SeededRandom::new("empty");
        let empty: [&str; 0] = [];
        assert_eq!(rng.next_element(&empty), Err(LoremError::EmptyCollection));
    }

    #[test]
    fn next_element_eventually_visits_every_item() {
        let mut rng = SeededRandom::new("coverage");
        let items = ["a", "b", "c", "d"];
        let mut seen = [false; 4];
        for _ in 0..200 {
            let picked = rng.next_element(&items).expect("non-empty");
            let idx = items.iter().position(|item| item == picked).expect("member");
            seen[idx] = true;
        }
        assert!(seen.iter().all(|hit| *hit), "all items should be drawn");
    }
}
