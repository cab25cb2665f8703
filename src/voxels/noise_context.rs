//! # Noise Context
//!
//! The seeded noise samplers terrain generation reads from. One context is built per world
//! and shared by every chunk generated in it; every sampler seed is a fixed offset from the
//! world seed, so two contexts built from the same seed answer every query identically.

use noise::{core::worley::ReturnType, NoiseFn, OpenSimplex, Worley};

use super::biome::Biome;

/// How far biome sampling coordinates are pushed by the distortion field, in blocks.
pub const BIOME_DISTORTION_STRENGTH: f64 = 8.0;

/// A 2D noise function sampled at a fixed frequency.
#[derive(Clone)]
pub struct NoiseLayer<N> {
    noise: N,
    frequency: f64,
}

impl<N: NoiseFn<f64, 2>> NoiseLayer<N> {
    /// Wraps a noise function, scaling world coordinates by `frequency` before sampling.
    pub fn new(noise: N, frequency: f64) -> Self {
        Self { noise, frequency }
    }

    /// Samples at world coordinates `(x, z)`. Result is roughly in `[-1, 1]`.
    pub fn sample(&self, x: f64, z: f64) -> f64 {
        self.noise.get([x * self.frequency, z * self.frequency])
    }

    /// Samples and remaps into `[0, 1]`.
    pub fn sample_unit(&self, x: f64, z: f64) -> f64 {
        self.sample(x, z) * 0.5 + 0.5
    }
}

/// Per-column white noise: every world column hashes independently of its neighbours, with
/// no period.
#[derive(Debug, Clone, Copy)]
pub struct ColumnHash {
    seed: u64,
}

impl ColumnHash {
    /// Creates a hash keyed by `seed`.
    pub fn new(seed: u32) -> Self {
        Self {
            seed: mix64(u64::from(seed)),
        }
    }

    /// Hash of a world column mapped to `[-1, 1)`.
    pub fn sample(&self, world_x: i32, world_z: i32) -> f64 {
        let column = u64::from(world_x as u32) | (u64::from(world_z as u32) << 32);
        let hash = mix64(self.seed ^ column);
        // Top 53 bits fill an f64 mantissa exactly.
        (hash >> 11) as f64 / (1u64 << 53) as f64 * 2.0 - 1.0
    }
}

/// 64-bit finalizer mix.
fn mix64(mut value: u64) -> u64 {
    value ^= value >> 33;
    value = value.wrapping_mul(0xff51_afd7_ed55_8ccd);
    value ^= value >> 33;
    value = value.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    value ^ (value >> 33)
}

/// Every noise field terrain generation needs, seeded from a single world seed.
pub struct NoiseContext {
    seed: u32,
    /// Cellular noise returning per-cell values; classified into biomes.
    pub biome: NoiseLayer<Worley>,
    /// Warps biome lookups so cell borders are not straight lines.
    pub biome_distortion: NoiseLayer<OpenSimplex>,
    /// Broad terrain height.
    pub base: NoiseLayer<OpenSimplex>,
    /// Mid-frequency height detail, weighted per biome.
    pub detail: NoiseLayer<OpenSimplex>,
    /// High-frequency height detail.
    pub detail2: NoiseLayer<OpenSimplex>,
    /// Per-column hash deciding where structures grow.
    pub feature: ColumnHash,
}

impl NoiseContext {
    /// Builds every sampler from a world seed.
    ///
    /// # Arguments
    /// * `seed` - World seed; sampler seeds wrap around on overflow
    pub fn new(seed: u32) -> Self {
        let biome_noise =
            Worley::new(seed.wrapping_add(10)).set_return_type(ReturnType::Value);

        Self {
            seed,
            biome: NoiseLayer::new(biome_noise, 0.0025),
            biome_distortion: NoiseLayer::new(OpenSimplex::new(seed.wrapping_add(11)), 0.03),
            base: NoiseLayer::new(OpenSimplex::new(seed), 0.005),
            detail: NoiseLayer::new(OpenSimplex::new(seed.wrapping_add(1)), 0.02),
            detail2: NoiseLayer::new(OpenSimplex::new(seed.wrapping_add(2)), 0.05),
            feature: ColumnHash::new(seed.wrapping_add(3)),
        }
    }

    /// The world seed this context was built from.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Biome of a world column before any blending, sampled through the distortion field.
    pub fn distorted_biome(&self, world_x: i32, world_z: i32) -> Biome {
        let x = world_x as f64;
        let z = world_z as f64;
        let dx = self.biome_distortion.sample(x, z) * BIOME_DISTORTION_STRENGTH;
        let dz = self.biome_distortion.sample(x + 1000.0, z + 1000.0) * BIOME_DISTORTION_STRENGTH;
        Biome::classify(self.biome.sample(x + dx, z + dz))
    }

    /// Feature placement noise for a world column.
    pub fn feature(&self, world_x: i32, world_z: i32) -> f64 {
        self.feature.sample(world_x, world_z)
    }
}

impl std::fmt::Debug for NoiseContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseContext").field("seed", &self.seed).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_samples() {
        let a = NoiseContext::new(1234);
        let b = NoiseContext::new(1234);
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..500 {
            let x = rng.i32(-20_000..20_000);
            let z = rng.i32(-20_000..20_000);
            assert_eq!(a.distorted_biome(x, z), b.distorted_biome(x, z));
            assert_eq!(a.feature(x, z).to_bits(), b.feature(x, z).to_bits());
            assert_eq!(
                a.base.sample(x as f64, z as f64).to_bits(),
                b.base.sample(x as f64, z as f64).to_bits()
            );
        }
    }

    #[test]
    fn seed_wraps_instead_of_overflowing() {
        let context = NoiseContext::new(u32::MAX);
        assert_eq!(context.seed(), u32::MAX);
        let _ = context.distorted_biome(0, 0);
    }

    #[test]
    fn unit_samples_stay_in_range() {
        let context = NoiseContext::new(99);
        let mut rng = fastrand::Rng::with_seed(99);
        for _ in 0..1_000 {
            let x = rng.f64() * 10_000.0 - 5_000.0;
            let z = rng.f64() * 10_000.0 - 5_000.0;
            for layer in [&context.base, &context.detail, &context.detail2] {
                let value = layer.sample_unit(x, z);
                assert!((-0.01..=1.01).contains(&value), "{value}");
            }
        }
    }

    #[test]
    fn feature_hash_does_not_tile() {
        let context = NoiseContext::new(1234);
        let mut rng = fastrand::Rng::with_seed(64);
        let mut levels = std::collections::HashSet::new();
        for _ in 0..5_000 {
            let x = rng.i32(-100_000..100_000);
            let z = rng.i32(-100_000..100_000);
            let value = context.feature(x, z);
            assert!((-1.0..1.0).contains(&value), "{value}");
            levels.insert(value.to_bits());
            for (dx, dz) in [(64, -128), (256, 0), (0, 16), (16, 16)] {
                assert_ne!(value.to_bits(), context.feature(x + dx, z + dz).to_bits());
            }
        }
        assert!(levels.len() > 4_990);
        assert_ne!(
            NoiseContext::new(1).feature(10, 10),
            NoiseContext::new(2).feature(10, 10)
        );
    }

    #[test]
    fn feature_pass_rate_matches_threshold() {
        let context = NoiseContext::new(1234);
        let mut passed = 0;
        let mut total = 0;
        for x in -200..200 {
            for z in -250..250 {
                total += 1;
                if context.feature(x, z) > 0.998 {
                    passed += 1;
                }
            }
        }
        // Uniform on [-1, 1) passes 0.1% of the time.
        let rate = passed as f64 / total as f64;
        assert!((0.0006..0.0015).contains(&rate), "{rate}");
    }
}
