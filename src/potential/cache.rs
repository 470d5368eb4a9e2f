/*
MIT License

Copyright (c) 2025 multislice contributors
*/

//! Lazily built per-species potential cache
//!
//! Each (species, charge) key gets its real-space potential grid built
//! exactly once, on first request, and retained for the lifetime of the
//! run. The build converts the spline-fitted reciprocal-space scattering
//! factor into a real-space (r, z) map: since V(r, z) is rotationally
//! symmetric it is enough to compute V(x, z) at y = 0, pre-integrating
//! the qy direction so a single 2D backward transform replaces a full 3D
//! one.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use log::debug;
use ndarray::Array2;
use num_complex::Complex64;
use once_cell::sync::OnceCell;

use crate::config::GridConfig;
use crate::utils::{ifft2, PHI_SCALE};

use super::errors::{PotentialError, Result};
use super::lookup::AtomPotential;
use super::scattering::ScatteringFactorTable;
use super::spline::AkimaSpline;

/// Cache key: species plus whether the charge-offset data applies
///
/// Charge is treated as binary (neutral vs. ionic); the scattering
/// table carries one offset row per species, not one per charge state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PotentialKey {
    pub atomic_number: u32,
    pub ionic: bool,
}

type EntrySlot = Arc<OnceCell<Arc<AtomPotential>>>;

/// Lazy cache of real-space atomic potential grids
///
/// Entries transition NotBuilt -> Built exactly once per key; a per-key
/// guard lets independent species build concurrently without a single
/// global build lock. Built grids are never invalidated or evicted.
pub struct PotentialCache {
    config: GridConfig,
    /// Scattering table, retuned to the admissible cutoff at
    /// construction
    table: ScatteringFactorTable,
    entries: Mutex<HashMap<PotentialKey, EntrySlot>>,
    builds: AtomicUsize,
}

impl PotentialCache {
    /// Create a cache over the given configuration and scattering table
    ///
    /// The table is retuned to the configuration's momentum cutoff; the
    /// caller's copy is not modified.
    pub fn new(config: GridConfig, table: ScatteringFactorTable) -> Self {
        let table = table.retuned(config.kmax());
        debug!(
            "potential grid: nx={}, nz={} ({} sub-layers per slice), dkx={:.5}, dkz={:.5}, kmax={:.4} 1/A",
            config.nx(),
            config.nz(),
            config.nz_per_slice(),
            config.dkx(),
            config.dkz(),
            config.kmax()
        );
        Self {
            config,
            table,
            entries: Mutex::new(HashMap::new()),
            builds: AtomicUsize::new(0),
        }
    }

    /// Get the potential grid for a species, building it on first use
    ///
    /// # Arguments
    ///
    /// * `atomic_number` - Species to look up
    /// * `charge` - Ionic charge; non-zero selects the charge-offset
    ///   scattering data
    /// * `debye_waller` - Thermal factor B in Angstrom^2; pass 0 when
    ///   thermal motion is modeled as position perturbation instead
    ///
    /// # Returns
    ///
    /// A shared handle to the cached grid. The first call per
    /// (species, charge) key fixes the grid; later calls return the
    /// same data regardless of their arguments.
    pub fn get(
        &self,
        atomic_number: u32,
        charge: f64,
        debye_waller: f64,
    ) -> Result<Arc<AtomPotential>> {
        let key = PotentialKey {
            atomic_number,
            ionic: charge != 0.0,
        };
        if !self.table.contains(key.atomic_number, key.ionic) {
            return Err(PotentialError::UnknownSpecies {
                atomic_number: key.atomic_number,
                ionic: key.ionic,
            });
        }

        let slot: EntrySlot = {
            let mut entries = self.entries.lock().expect("potential cache lock poisoned");
            Arc::clone(entries.entry(key).or_default())
        };

        // Per-key one-time initialization; concurrent callers for the
        // same key block here, different keys build independently.
        slot.get_or_try_init(|| self.build(key, debye_waller).map(Arc::new))
            .map(Arc::clone)
    }

    /// Number of grid builds performed so far
    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }

    /// The configuration this cache was created with
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    fn build(&self, key: PotentialKey, debye_waller: f64) -> Result<AtomPotential> {
        let row = self
            .table
            .row(key.atomic_number, key.ionic)
            .ok_or(PotentialError::UnknownSpecies {
                atomic_number: key.atomic_number,
                ionic: key.ionic,
            })?;
        let spline = AkimaSpline::new(self.table.k_grid().to_vec(), row.to_vec())?;

        let nx = self.config.nx();
        let nz = self.config.nz();
        let nz_per_slice = self.config.nz_per_slice();
        let dkx = self.config.dkx();
        let dkz = self.config.dkz();
        let kmax2 = self.config.kmax() * self.config.kmax();

        // The atom sits at the r = 0 corner of the box; the z phase
        // shifts it (nz_per_slice - 1) / 2 sub-layers up so its
        // potential straddles the slice boundary with the correct
        // fractional share per neighboring slice.
        let iz_offset = (nz_per_slice - 1) / 2;
        let z_pos = -2.0 * std::f64::consts::PI
            * (self.config.slice_thickness / nz_per_slice as f64)
            * iz_offset as f64;

        let mut temp = Array2::<Complex64>::zeros((nz, nx));
        for iz in 0..nz {
            let kz = dkz * if iz < nz / 2 { iz as f64 } else { iz as f64 - nz as f64 };
            for ix in 0..nx {
                let kx = dkx * if ix < nx / 2 { ix as f64 } else { ix as f64 - nx as f64 };
                let s2 = kx * kx + kz * kz;
                if s2 >= kmax2 {
                    continue;
                }

                let mut f = spline.eval(s2.sqrt()) * (-s2 * debye_waller * 0.25).exp();
                // qy integration for qy != 0: V(x, z) at y = 0 needs the
                // scattering factor summed over the qy column up to the
                // cutoff circle.
                for iy in 1..nx {
                    let qy = dkx * iy as f64;
                    let s3 = qy * qy + s2;
                    if s3 >= kmax2 {
                        break;
                    }
                    f += spline.eval(s3.sqrt()) * (-s3 * debye_waller * 0.25).exp();
                }
                f *= dkx;

                if !f.is_finite() {
                    return Err(PotentialError::NumericDegeneracy {
                        atomic_number: key.atomic_number,
                        k: s2.sqrt(),
                        debye_waller,
                    });
                }

                let phase = kz * z_pos;
                temp[[iz, ix]] = Complex64::new(f * phase.cos(), f * phase.sin());
            }
        }

        // Backward transform: the 2D kx-kz map of the scattering factor
        // becomes a 2D real-space map.
        ifft2(&mut temp);

        // Fold down to the non-negative (r, z) quadrant, integrating
        // each point over the nz_per_slice neighboring sub-layers that
        // straddle the atom z-position.
        let nr_half = nx / 2;
        let nz_half = nz / 2;
        let scale = PHI_SCALE * dkx * dkz / nz as f64;
        let mut grid = Array2::<f64>::zeros((nz_half, nr_half));
        for iz in 0..nz_half {
            for ir in 0..nr_half {
                let mut sum = 0.0;
                for iiz in 0..nz_per_slice {
                    let row = iz + iiz;
                    if row < nz_half {
                        sum += temp[[row, ir]].re;
                    }
                }
                // True potential cannot be negative; residue from the
                // transform is clamped, never non-finite values.
                if sum < 0.0 {
                    sum = 0.0;
                }
                grid[[iz, ir]] = scale * sum;
            }
        }

        self.builds.fetch_add(1, Ordering::Relaxed);
        debug!(
            "built {}x{} (r-z) potential for Z={} (ionic={}, B={} A^2, {} sub-layers)",
            nr_half, nz_half, key.atomic_number, key.ionic, debye_waller, nz_per_slice
        );

        Ok(AtomPotential::new(
            grid,
            self.config.dr(),
            self.config.dz_sub(),
            self.config.atom_radius,
            nz_per_slice,
        ))
    }
}
