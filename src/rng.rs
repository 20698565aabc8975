// src/rng.rs
//! Random Number Generation for Monte Carlo Simulations
//!
//! Every simulation takes its generator explicitly, so a fixed seed always
//! reproduces the same ensemble.
//!
//! # Parallel streams
//!
//! [`RngFactory`] hands out one `StdRng` per path, seeded with
//! `base_seed + path_id`. A path's draws then depend only on its id, never on
//! which thread simulated it or in what order.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

/// RNG factory for reproducible parallel simulations
#[derive(Debug, Clone, Copy)]
pub struct RngFactory {
    base_seed: u64,
}

impl RngFactory {
    pub fn new(base_seed: u64) -> Self {
        Self { base_seed }
    }

    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    /// Create the generator owned by a single path
    pub fn create_std_rng(&self, path_id: u64) -> StdRng {
        StdRng::seed_from_u64(self.base_seed.wrapping_add(path_id))
    }
}

pub fn seed_rng_from_u64(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// One standard normal draw Z ~ N(0,1)
pub fn get_normal_draw<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    StandardNormal.sample(rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_reproducibility() {
        let factory = RngFactory::new(42);

        let mut rng1 = factory.create_std_rng(7);
        let mut rng2 = factory.create_std_rng(7);

        for _ in 0..100 {
            assert_eq!(get_normal_draw(&mut rng1), get_normal_draw(&mut rng2));
        }
    }

    #[test]
    fn test_factory_different_paths() {
        let factory = RngFactory::new(42);

        let mut rng1 = factory.create_std_rng(0);
        let mut rng2 = factory.create_std_rng(1);

        let vals1: Vec<f64> = (0..10).map(|_| get_normal_draw(&mut rng1)).collect();
        let vals2: Vec<f64> = (0..10).map(|_| get_normal_draw(&mut rng2)).collect();

        assert_ne!(vals1, vals2);
    }

    #[test]
    fn test_normal_distribution() {
        let mut rng = seed_rng_from_u64(42);

        let samples: Vec<f64> = (0..20_000).map(|_| get_normal_draw(&mut rng)).collect();

        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let variance =
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / samples.len() as f64;

        assert!(mean.abs() < 0.05, "Mean should be close to 0, got {}", mean);
        assert!(
            (variance - 1.0).abs() < 0.05,
            "Variance should be close to 1, got {}",
            variance
        );
    }
}
