//! RNG helpers shared by layout generation and placement planning.
//!
//! Every generation or planning entry point threads a caller-owned
//! [`rand::RngCore`] by mutable reference; the crate never holds RNG state of
//! its own. A run seeded from the same value replays bit-identically.
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Build the RNG for a generation run.
///
/// `Some(seed)` gives a reproducible run; `None` seeds from OS entropy.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Generate a random float in the range [0, 1).
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}

/// Draw an integer from the half-open range `[lo, hi)`.
#[inline]
pub(crate) fn rand_range(rng: &mut dyn RngCore, lo: i32, hi: i32) -> i32 {
    debug_assert!(lo < hi, "rand_range requires lo < hi");
    lo + (rand01(rng) * (hi - lo) as f32) as i32
}

/// Draw an index from `[0, len)`.
#[inline]
pub(crate) fn rand_index(rng: &mut dyn RngCore, len: usize) -> usize {
    debug_assert!(len > 0, "rand_index requires a non-empty range");
    let idx = (rand01(rng) * len as f32) as usize;
    idx.min(len - 1)
}

#[cfg(test)]
pub(crate) struct FixedRng {
    pub value: u32,
}

#[cfg(test)]
impl RngCore for FixedRng {
    fn next_u32(&mut self) -> u32 {
        self.value
    }

    fn next_u64(&mut self) -> u64 {
        self.value as u64
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let bytes = self.value.to_le_bytes();
        for (i, b) in dest.iter_mut().enumerate() {
            *b = bytes[i % 4];
        }
    }
}
