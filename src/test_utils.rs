// Copyright 2026 Drell-Yan MC Contributors
// SPDX-License-Identifier: Apache-2.0

//! Shared test utilities.

use rand::RngCore;

use crate::config::Config;

/// Z-peak slice: 60 < M < 120 GeV, pT > 14 GeV, |y| < 2.4, N = 10⁵, seed 42.
pub fn z_peak_config() -> Config {
    Config::default()
}

/// Z-peak slice with fewer points, for tests that only need a filled histogram.
pub fn small_config() -> Config {
    let mut config = Config::default();
    config.run.calls = 20_000;
    config
}

/// Generator that replays a fixed list of uniform numbers, then repeats it.
///
/// Each value `r` is encoded so that `rng.random::<f64>()` returns `r` exactly
/// for r with at most 53 significant bits, and `Open01` returns it to within
/// 2⁻⁵².
pub struct UniformReplay {
    words: Vec<u64>,
    next: usize,
}

impl UniformReplay {
    pub fn new(values: &[f64]) -> Self {
        assert!(!values.is_empty());
        let words = values
            .iter()
            .map(|&r| {
                assert!((0.0..1.0).contains(&r));
                ((r * (1u64 << 53) as f64) as u64) << 11
            })
            .collect();
        Self { words, next: 0 }
    }
}

impl RngCore for UniformReplay {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let word = self.words[self.next % self.words.len()];
        self.next += 1;
        word
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_replay_returns_values() {
        let mut rng = UniformReplay::new(&[0.25, 0.5, 0.75]);
        let a: f64 = rng.random();
        let b: f64 = rng.random();
        let c: f64 = rng.random();
        let d: f64 = rng.random();
        assert_eq!((a, b, c, d), (0.25, 0.5, 0.75, 0.25));
    }
}
