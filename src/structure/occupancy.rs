/*
MIT License

Copyright (c) 2025 multislice contributors
*/

//! Random occupant selection for shared crystallographic sites
//!
//! Instantiate a [`SiteOccupancySampler`] with the occupants of one site
//! (they should share the same fractional coordinates), then call
//! [`choose`](SiteOccupancySampler::choose) whenever a structural
//! realization needs a concrete occupant for that site.

use rand::Rng;

use super::alias::AliasSampler;
use super::errors::{Result, StructureError};
use super::SiteOccupant;

/// Sampler over the occupants (and possible vacancy) of one site
#[derive(Debug, Clone)]
pub struct SiteOccupancySampler {
    occupants: Vec<SiteOccupant>,
    alias: AliasSampler,
}

impl SiteOccupancySampler {
    /// Build a sampler from the candidate occupants of one site
    ///
    /// Three outcomes depending on the occupancy sum:
    /// - sum within 1e-3 of 1: weights used unchanged (no vacancy)
    /// - sum greater than 1: every weight divided by the sum (no vacancy)
    /// - sum less than 1: a synthetic vacancy takes the remainder
    ///
    /// # Arguments
    ///
    /// * `occupants` - Candidate occupants sharing this site
    ///
    /// # Returns
    ///
    /// The sampler, or `InvalidDistribution` if the candidate list is
    /// empty or any occupancy is negative or non-finite
    pub fn new(occupants: Vec<SiteOccupant>) -> Result<Self> {
        if occupants.is_empty() {
            return Err(StructureError::InvalidDistribution {
                reason: "site has no candidate occupants".to_string(),
                weights: Vec::new(),
            });
        }

        let mut weights: Vec<f64> = occupants.iter().map(|o| o.occupancy).collect();
        if let Some(&w) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(StructureError::InvalidDistribution {
                reason: format!("occupancy {} is negative or non-finite", w),
                weights,
            });
        }
        let sum: f64 = weights.iter().sum();

        let mut occupants = occupants;
        if (sum - 1.0).abs() < 1e-3 {
            // Occupancies already form a distribution.
        } else if sum > 1.0 {
            // Over-occupied site: renormalize, no vacancy.
            for (w, occ) in weights.iter_mut().zip(occupants.iter_mut()) {
                *w /= sum;
                occ.occupancy = *w;
            }
        } else {
            // Under-occupied site: the remainder is the vacancy
            // probability.
            occupants.push(SiteOccupant::vacancy(1.0 - sum));
            weights.push(1.0 - sum);
        }

        let alias = AliasSampler::new(&weights)?;
        Ok(Self { occupants, alias })
    }

    /// Draw one occupant (possibly the vacancy) for this site
    ///
    /// Draws are independent of each other except through the RNG
    /// state; there are no side effects beyond RNG consumption.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &SiteOccupant {
        &self.occupants[self.alias.draw(rng)]
    }

    /// The occupants this sampler draws from, including any synthesized
    /// vacancy
    pub fn occupants(&self) -> &[SiteOccupant] {
        &self.occupants
    }

    /// Whether a vacancy was synthesized for this site
    pub fn has_vacancy(&self) -> bool {
        self.occupants.iter().any(|o| o.is_vacancy())
    }
}
