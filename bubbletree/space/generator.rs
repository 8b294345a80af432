//! Sample generators
//!
//! Generators are explicit strategy objects owned by the caller, so every
//! planning query can be seeded and reproduced independently.

use super::Configuration;
use crate::error::{PlanError, PlanResult};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of configurations for a sample pool
pub trait SampleGenerator {
    /// Dimension of generated configurations
    fn dimension(&self) -> usize;

    /// Produce the next configuration
    fn next_point(&mut self) -> Configuration;

    /// Produce `num_points` configurations
    fn sample_space(&mut self, num_points: usize) -> Vec<Configuration> {
        (0..num_points).map(|_| self.next_point()).collect()
    }
}

fn check_limits(limits: &[(f64, f64)]) -> PlanResult<()> {
    if limits.is_empty() {
        return Err(PlanError::invalid("at least one joint limit is required"));
    }
    for (axis, &(low, high)) in limits.iter().enumerate() {
        if !low.is_finite() || !high.is_finite() || low >= high {
            return Err(PlanError::invalid(format!(
                "joint limit {} is not a finite increasing range: [{}, {}]",
                axis, low, high
            )));
        }
    }
    Ok(())
}

/// Independent uniform draw per axis
#[derive(Debug, Clone)]
pub struct UniformGenerator {
    limits: Vec<(f64, f64)>,
    rng: ChaCha8Rng,
}

impl UniformGenerator {
    /// Create a generator over `limits`, seeded deterministically
    pub fn new(limits: &[(f64, f64)], seed: u64) -> PlanResult<Self> {
        check_limits(limits)?;
        Ok(Self {
            limits: limits.to_vec(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }
}

impl SampleGenerator for UniformGenerator {
    fn dimension(&self) -> usize {
        self.limits.len()
    }

    fn next_point(&mut self) -> Configuration {
        let rng = &mut self.rng;
        Configuration::from_iterator(
            self.limits.len(),
            self.limits.iter().map(|&(low, high)| rng.gen_range(low..high)),
        )
    }
}

/// Low-discrepancy Halton sequence, one prime base per axis
#[derive(Debug, Clone)]
pub struct HaltonGenerator {
    limits: Vec<(f64, f64)>,
    primes: Vec<u64>,
    index: u64,
}

impl HaltonGenerator {
    /// Create a generator whose sequence starts at `start_index`
    pub fn new(limits: &[(f64, f64)], start_index: u64) -> PlanResult<Self> {
        check_limits(limits)?;
        Ok(Self {
            limits: limits.to_vec(),
            primes: first_primes(limits.len()),
            index: start_index,
        })
    }

    /// Create a generator starting somewhere in `[2, 1002]`, picked by `seed`
    pub fn from_seed(limits: &[(f64, f64)], seed: u64) -> PlanResult<Self> {
        Self::new(limits, 2 + seed % 1001)
    }

    /// Index of the next point in the sequence
    pub fn index(&self) -> u64 {
        self.index
    }
}

impl SampleGenerator for HaltonGenerator {
    fn dimension(&self) -> usize {
        self.limits.len()
    }

    fn next_point(&mut self) -> Configuration {
        let index = self.index;
        self.index += 1;
        Configuration::from_iterator(
            self.limits.len(),
            self.limits
                .iter()
                .zip(&self.primes)
                .map(|(&(low, high), &base)| low + (high - low) * radical_inverse(index, base)),
        )
    }
}

/// Van der Corput radical inverse of `index` in `base`
fn radical_inverse(mut index: u64, base: u64) -> f64 {
    let mut result = 0.0;
    let mut f = 1.0;
    while index > 0 {
        f /= base as f64;
        result += f * (index % base) as f64;
        index /= base;
    }
    result
}

fn first_primes(count: usize) -> Vec<u64> {
    let mut primes: Vec<u64> = Vec::with_capacity(count);
    let mut candidate = 2;
    while primes.len() < count {
        if primes
            .iter()
            .take_while(|&&p| p * p <= candidate)
            .all(|&p| candidate % p != 0)
        {
            primes.push(candidate);
        }
        candidate += 1;
    }
    primes
}
