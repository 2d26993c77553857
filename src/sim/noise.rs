//! Seeded 1D gradient noise for terrain height profiles
//!
//! The permutation table is shuffled by a fixed LCG so the same seed yields
//! bit-identical samples on every run and platform.

use serde::{Deserialize, Serialize};

const TABLE_SIZE: usize = 256;

/// Linear-congruential generator (glibc constants, modulus 2^31)
#[derive(Debug, Clone)]
struct Lcg {
    state: u64,
}

impl Lcg {
    const MODULUS: u64 = 1 << 31;

    fn new(seed: u64) -> Self {
        Self {
            state: seed % Self::MODULUS,
        }
    }

    /// Next value in [0, 1)
    fn next_unit(&mut self) -> f64 {
        self.state = (1_103_515_245 * self.state + 12_345) % Self::MODULUS;
        self.state as f64 / Self::MODULUS as f64
    }
}

/// Deterministic scalar field sampled along one axis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoiseField {
    seed: u64,
    /// 256-entry permutation duplicated to 512 so `X + 1` never wraps
    perm: Vec<u8>,
}

impl NoiseField {
    /// Build the permutation table for `seed` (Fisher-Yates driven by the LCG)
    pub fn generate(seed: u64) -> Self {
        let mut rng = Lcg::new(seed);
        let mut table: Vec<u8> = (0..TABLE_SIZE).map(|i| i as u8).collect();

        for i in (1..TABLE_SIZE).rev() {
            let j = (rng.next_unit() * (i + 1) as f64).floor() as usize;
            table.swap(i, j);
        }

        let mut perm = Vec::with_capacity(TABLE_SIZE * 2);
        perm.extend_from_slice(&table);
        perm.extend_from_slice(&table);

        Self { seed, perm }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Sample the field at `x`; result lies approximately in [-1, 1]
    pub fn sample(&self, x: f32) -> f32 {
        let cell = x.floor();
        let xi = (cell as i64 & 255) as usize;
        let f = x - cell;
        let u = fade(f);

        let a = self.perm[xi] as usize;
        let b = self.perm[xi + 1] as usize;

        let g0 = grad(self.perm[a], f);
        let g1 = grad(self.perm[b], f - 1.0);

        crate::lerp(g0, g1, u) * 2.0
    }
}

/// Smootherstep: 6f^5 - 15f^4 + 10f^3
#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn grad(hash: u8, x: f32) -> f32 {
    if hash & 1 == 0 { x } else { -x }
}
