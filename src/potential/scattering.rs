/*
MIT License

Copyright (c) 2025 multislice contributors
*/

//! Tabulated electron scattering factors
//!
//! Scattering amplitudes are supplied externally as fixed samples over a
//! shared momentum-transfer grid, one row per species, with a separate
//! row set for the charge-offset (ionic) contribution. The table is
//! read-only input to the potential build; the cutoff retuning performed
//! before spline fitting operates on a private copy.

use std::collections::HashMap;

use log::debug;

use super::errors::{PotentialError, Result};

/// Minimum number of momentum-transfer samples per row
///
/// The cutoff retuning pins the last three samples and walks backwards
/// from the fourth-last, so very short tables cannot be retuned.
const MIN_SAMPLES: usize = 8;

/// Fixed scattering-factor samples for a set of species
#[derive(Debug, Clone)]
pub struct ScatteringFactorTable {
    /// Shared momentum-transfer grid, strictly increasing, in 1/Angstrom
    k: Vec<f64>,
    /// Neutral-atom amplitude rows keyed by atomic number
    neutral: HashMap<u32, Vec<f64>>,
    /// Charge-offset amplitude rows keyed by atomic number
    ionic: HashMap<u32, Vec<f64>>,
}

impl ScatteringFactorTable {
    /// Create an empty table over the given momentum-transfer grid
    ///
    /// # Arguments
    ///
    /// * `k` - Momentum-transfer samples in 1/Angstrom, strictly
    ///   increasing, at least eight of them
    pub fn new(k: Vec<f64>) -> Result<Self> {
        if k.len() < MIN_SAMPLES {
            return Err(PotentialError::InvalidTable(format!(
                "need at least {} momentum-transfer samples, got {}",
                MIN_SAMPLES,
                k.len()
            )));
        }
        if k.windows(2).any(|w| w[1] <= w[0]) {
            return Err(PotentialError::InvalidTable(
                "momentum-transfer grid must be strictly increasing".to_string(),
            ));
        }
        Ok(Self {
            k,
            neutral: HashMap::new(),
            ionic: HashMap::new(),
        })
    }

    /// Register the neutral-atom amplitudes for a species
    pub fn add_neutral(&mut self, atomic_number: u32, amplitudes: Vec<f64>) -> Result<()> {
        self.validate_row(&amplitudes)?;
        self.neutral.insert(atomic_number, amplitudes);
        Ok(())
    }

    /// Register the charge-offset amplitudes for a species
    pub fn add_ionic(&mut self, atomic_number: u32, amplitudes: Vec<f64>) -> Result<()> {
        self.validate_row(&amplitudes)?;
        self.ionic.insert(atomic_number, amplitudes);
        Ok(())
    }

    fn validate_row(&self, amplitudes: &[f64]) -> Result<()> {
        if amplitudes.len() != self.k.len() {
            return Err(PotentialError::InvalidTable(format!(
                "amplitude row has {} samples, grid has {}",
                amplitudes.len(),
                self.k.len()
            )));
        }
        if amplitudes.iter().any(|a| !a.is_finite()) {
            return Err(PotentialError::InvalidTable(
                "amplitude row contains non-finite samples".to_string(),
            ));
        }
        Ok(())
    }

    /// The shared momentum-transfer grid
    pub fn k_grid(&self) -> &[f64] {
        &self.k
    }

    /// Whether amplitudes exist for the given species
    pub fn contains(&self, atomic_number: u32, ionic: bool) -> bool {
        if ionic {
            self.ionic.contains_key(&atomic_number)
        } else {
            self.neutral.contains_key(&atomic_number)
        }
    }

    /// The amplitude row for a species, if registered
    pub fn row(&self, atomic_number: u32, ionic: bool) -> Option<&[f64]> {
        let rows = if ionic { &self.ionic } else { &self.neutral };
        rows.get(&atomic_number).map(|r| r.as_slice())
    }

    /// Produce a copy of the table retuned to the admissible cutoff
    ///
    /// The spline fit must stay well conditioned up to slightly beyond
    /// the largest momentum the grid admits. The last three samples of
    /// the k-grid are pinned to `kmax`, `1.1 kmax` and `1.2 kmax`; if
    /// the sample before them then sits above the new cutoff, interior
    /// samples are stepped down just below it and their amplitudes
    /// zeroed so the fitted factor decays to zero at the cutoff instead
    /// of being truncated mid-value.
    pub fn retuned(&self, kmax: f64) -> Self {
        let mut table = self.clone();
        let n = table.k.len();

        table.k[n - 1] = 1.2 * kmax;
        table.k[n - 2] = 1.1 * kmax;
        table.k[n - 3] = kmax;

        if table.k[n - 4] > table.k[n - 3] {
            let mut adjusted = 0usize;
            for ix in 0..n.saturating_sub(10) {
                let idx = n - 4 - ix;
                let ceiling = table.k[n - 3] - 0.001 * (ix + 1) as f64;
                if table.k[idx] < ceiling {
                    break;
                }
                table.k[idx] = ceiling;
                for row in table.neutral.values_mut().chain(table.ionic.values_mut()) {
                    row[idx] = 0.0;
                }
                adjusted += 1;
            }
            debug!(
                "retuned scattering table to kmax={} 1/A ({} interior samples zeroed)",
                kmax, adjusted
            );
        }

        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn grid(n: usize, dk: f64) -> Vec<f64> {
        (0..n).map(|i| i as f64 * dk).collect()
    }

    fn gaussian_row(k: &[f64], scale: f64, width: f64) -> Vec<f64> {
        k.iter().map(|ki| scale * (-ki * ki / width).exp()).collect()
    }

    #[test]
    fn test_rejects_short_or_unsorted_grid() {
        assert!(ScatteringFactorTable::new(vec![0.0, 1.0]).is_err());
        let mut k = grid(12, 0.5);
        k[5] = k[4];
        assert!(ScatteringFactorTable::new(k).is_err());
    }

    #[test]
    fn test_rejects_mismatched_row() {
        let mut table = ScatteringFactorTable::new(grid(12, 0.5)).unwrap();
        assert!(table.add_neutral(14, vec![1.0; 11]).is_err());
        assert!(table.add_neutral(14, vec![1.0; 12]).is_ok());
    }

    #[test]
    fn test_row_lookup_distinguishes_ionic() {
        let k = grid(12, 0.5);
        let mut table = ScatteringFactorTable::new(k.clone()).unwrap();
        table.add_neutral(14, gaussian_row(&k, 5.0, 4.0)).unwrap();
        assert!(table.contains(14, false));
        assert!(!table.contains(14, true));
        assert!(table.row(8, false).is_none());
    }

    #[test]
    fn test_retune_pins_tail() {
        let k = grid(20, 0.5);
        let mut table = ScatteringFactorTable::new(k.clone()).unwrap();
        table.add_neutral(14, gaussian_row(&k, 5.0, 4.0)).unwrap();

        let kmax = 2.0;
        let retuned = table.retuned(kmax);
        let n = retuned.k_grid().len();
        assert_relative_eq!(retuned.k_grid()[n - 1], 1.2 * kmax);
        assert_relative_eq!(retuned.k_grid()[n - 2], 1.1 * kmax);
        assert_relative_eq!(retuned.k_grid()[n - 3], kmax);
        // The caller's table is untouched.
        assert_relative_eq!(table.k_grid()[n - 1], 9.5);
    }

    #[test]
    fn test_retune_steps_down_interior_samples() {
        // A grid overshooting the cutoff forces the interior walk-down
        // with zeroed amplitudes.
        let k = grid(20, 0.2);
        let mut table = ScatteringFactorTable::new(k.clone()).unwrap();
        table.add_neutral(14, gaussian_row(&k, 5.0, 4.0)).unwrap();

        let retuned = table.retuned(3.0);
        let kg = retuned.k_grid();
        let n = kg.len();
        // Grid stays strictly increasing after the retune.
        assert!(kg.windows(2).all(|w| w[1] > w[0]));
        // Stepped-down samples carry zero amplitude.
        let row = retuned.row(14, false).unwrap();
        assert_eq!(row[n - 4], 0.0);
        assert!(kg[n - 4] < kg[n - 3]);
    }
}
