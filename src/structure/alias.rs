/*
MIT License

Copyright (c) 2025 multislice contributors
*/

//! Discrete sampling via the alias method (Vose's algorithm)
//!
//! The alias method samples from an arbitrary discrete probability
//! distribution (rolling a loaded die) in O(1) per draw after O(n)
//! preprocessing. See "Darts, Dice, and Coins: Sampling from a Discrete
//! Distribution" by Keith Schwarz for the full derivation.

use rand::Rng;

use super::errors::{Result, StructureError};

/// Tolerance on the weight sum accepted at construction
const SUM_TOLERANCE: f64 = 1e-3;

/// A sampler over a fixed discrete distribution
///
/// Construction builds the paired probability/alias tables once; the
/// tables are immutable afterwards, so draws from shared references are
/// safe as long as each caller supplies its own RNG stream.
#[derive(Debug, Clone)]
pub struct AliasSampler {
    probability: Vec<f64>,
    alias: Vec<usize>,
}

impl AliasSampler {
    /// Build the probability and alias tables for the given weights
    ///
    /// Weights must be non-negative, finite and sum to 1 within a small
    /// tolerance; normalization is the caller's responsibility.
    ///
    /// # Arguments
    ///
    /// * `weights` - The probability of each outcome 0, 1, ..., n-1
    ///
    /// # Returns
    ///
    /// The sampler, or `InvalidDistribution` for malformed weights
    pub fn new(weights: &[f64]) -> Result<Self> {
        if weights.is_empty() {
            return Err(StructureError::InvalidDistribution {
                reason: "empty weight vector".to_string(),
                weights: Vec::new(),
            });
        }
        if let Some(&w) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(StructureError::InvalidDistribution {
                reason: format!("weight {} is negative or non-finite", w),
                weights: weights.to_vec(),
            });
        }
        let sum: f64 = weights.iter().sum();
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(StructureError::InvalidDistribution {
                reason: format!("weights sum to {}, expected 1", sum),
                weights: weights.to_vec(),
            });
        }

        let n = weights.len();
        let average = 1.0 / n as f64;
        let mut probability = weights.to_vec();
        let mut alias = vec![0usize; n];

        // Two stacks acting as worklists while the tables fill up.
        let mut small: Vec<usize> = Vec::new();
        let mut large: Vec<usize> = Vec::new();
        for (i, &w) in probability.iter().enumerate() {
            if w >= average {
                large.push(i);
            } else {
                small.push(i);
            }
        }

        // In the mathematical specification of the algorithm the small
        // list always empties before the large one. Floating point drift
        // breaks that guarantee, so the loop has to check both lists on
        // every iteration.
        loop {
            let (less, more) = match (small.pop(), large.pop()) {
                (Some(less), Some(more)) => (less, more),
                (Some(less), None) => {
                    small.push(less);
                    break;
                }
                (None, Some(more)) => {
                    large.push(more);
                    break;
                }
                (None, None) => break,
            };

            alias[less] = more;

            // Fold the small entry's deficit into the large entry's
            // residual weight.
            probability[more] = (probability[more] + probability[less]) - average;

            if probability[more] >= average {
                large.push(more);
            } else {
                small.push(more);
            }
        }

        // Whatever remains (in either list) holds probability 1/n up to
        // rounding; assign it exactly.
        for &i in small.iter().chain(large.iter()) {
            probability[i] = average;
        }

        // Scale each slot so that weight 1/n becomes 1.0, making the
        // slot a coin-toss threshold against a uniform draw in [0, 1).
        for p in probability.iter_mut() {
            *p *= n as f64;
        }

        Ok(Self { probability, alias })
    }

    /// Sample one outcome index in `[0, n)`
    ///
    /// Chooses a column by a fair die roll, then a biased coin decides
    /// between the column itself and its alias.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let column = rng.gen_range(0..self.probability.len());
        if rng.gen::<f64>() < self.probability[column] {
            column
        } else {
            self.alias[column]
        }
    }

    /// Number of outcomes
    pub fn len(&self) -> usize {
        self.probability.len()
    }

    /// Whether the sampler has no outcomes (never true for a
    /// successfully constructed sampler)
    pub fn is_empty(&self) -> bool {
        self.probability.is_empty()
    }

    /// The scaled probability slots, each in `[0, n]`
    pub fn probability_slots(&self) -> &[f64] {
        &self.probability
    }

    /// The alias index of each column
    pub fn alias_slots(&self) -> &[usize] {
        &self.alias
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn assert_table_invariants(sampler: &AliasSampler) {
        let n = sampler.len();
        for (&p, &a) in sampler
            .probability_slots()
            .iter()
            .zip(sampler.alias_slots())
        {
            assert!((0.0..=n as f64).contains(&p), "slot {} out of range", p);
            assert!(a < n, "alias {} out of range", a);
        }
    }

    #[test]
    fn test_empty_weights_rejected() {
        assert!(AliasSampler::new(&[]).is_err());
    }

    #[test]
    fn test_negative_weight_rejected() {
        assert!(AliasSampler::new(&[0.5, -0.1, 0.6]).is_err());
        assert!(AliasSampler::new(&[f64::NAN, 1.0]).is_err());
    }

    #[test]
    fn test_unnormalized_weights_rejected() {
        assert!(AliasSampler::new(&[0.5, 0.3]).is_err());
        assert!(AliasSampler::new(&[0.8, 0.8]).is_err());
    }

    #[test]
    fn test_single_outcome_always_zero() {
        let sampler = AliasSampler::new(&[1.0]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(sampler.draw(&mut rng), 0);
        }
    }

    #[test]
    fn test_table_invariants_hold() {
        for weights in [
            vec![1.0],
            vec![0.5, 0.5],
            vec![0.9, 0.05, 0.05],
            vec![0.25, 0.25, 0.25, 0.25],
            vec![0.7, 0.1, 0.1, 0.05, 0.05],
        ] {
            let sampler = AliasSampler::new(&weights).unwrap();
            assert_table_invariants(&sampler);
        }
    }

    #[test]
    fn test_degenerate_tail_weights() {
        // Weights chosen so floating point drift shuffles entries
        // between the worklists; the final pass must still leave every
        // slot with a valid threshold.
        let w = 1.0 / 3.0;
        let sampler = AliasSampler::new(&[w, w, w]).unwrap();
        assert_table_invariants(&sampler);

        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut counts = [0usize; 3];
        for _ in 0..30_000 {
            counts[sampler.draw(&mut rng)] += 1;
        }
        for &c in &counts {
            let freq = c as f64 / 30_000.0;
            assert!((freq - w).abs() < 0.02, "frequency {} drifted", freq);
        }
    }

    #[test]
    fn test_empirical_frequencies_converge() {
        let weights = [0.6, 0.3, 0.1];
        let sampler = AliasSampler::new(&weights).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let n_draws = 100_000usize;
        let mut counts = [0usize; 3];
        for _ in 0..n_draws {
            counts[sampler.draw(&mut rng)] += 1;
        }

        // Tolerance scales as 1/sqrt(N); 4 sigma of the binomial.
        for (i, &w) in weights.iter().enumerate() {
            let freq = counts[i] as f64 / n_draws as f64;
            let sigma = (w * (1.0 - w) / n_draws as f64).sqrt();
            assert!(
                (freq - w).abs() < 4.0 * sigma,
                "index {}: frequency {} vs weight {}",
                i,
                freq,
                w
            );
        }
    }
}
