/*
MIT License

Copyright (c) 2025 multislice contributors
*/

//! Real-space atomic potential lookup tables
//!
//! The cached product of one potential build: a rotationally symmetric
//! (radius x z-offset) grid of potential values around the atom center,
//! queried per atom per slice via sub-grid interpolation.

use ndarray::Array2;

/// A built real-space potential grid for one (species, charge) key
///
/// Row index is the z-offset from the atom center in sub-layer steps,
/// column index is the radial offset in `dr` steps. The grid covers the
/// physically relevant quadrant (non-negative r and z); lookups fold
/// negative offsets in by symmetry.
#[derive(Debug, Clone)]
pub struct AtomPotential {
    /// Potential values in volt-Angstroms, shape (nz_half, nr_half)
    data: Array2<f64>,
    /// Radial sampling in Angstroms
    dr: f64,
    /// z sampling (one sub-layer) in Angstroms
    dz_sub: f64,
    /// Radius beyond which the potential is zero
    cutoff_radius: f64,
    /// Number of sub-layers per propagation slice (odd)
    nz_per_slice: usize,
}

impl AtomPotential {
    pub(crate) fn new(
        data: Array2<f64>,
        dr: f64,
        dz_sub: f64,
        cutoff_radius: f64,
        nz_per_slice: usize,
    ) -> Self {
        Self {
            data,
            dr,
            dz_sub,
            cutoff_radius,
            nz_per_slice,
        }
    }

    /// Bilinear interpolation at a (radial, z) offset from the atom
    /// center
    ///
    /// Offsets may be negative; the grid is symmetric about the center.
    /// Returns 0 outside the cutoff radius.
    pub fn interpolate(&self, r: f64, z: f64) -> f64 {
        if r * r + z * z > self.cutoff_radius * self.cutoff_radius {
            return 0.0;
        }
        let r = r.abs();
        let z = z.abs();

        let (nz_half, nr_half) = self.data.dim();
        let ir = (r / self.dr) as usize;
        let iz = (z / self.dz_sub) as usize;
        if ir + 1 >= nr_half || iz + 1 >= nz_half {
            return 0.0;
        }

        let dx = (r - ir as f64 * self.dr) / self.dr;
        let dz = (z - iz as f64 * self.dz_sub) / self.dz_sub;

        (1.0 - dz)
            * ((1.0 - dx) * self.data[[iz, ir]] + dx * self.data[[iz, ir + 1]])
            + dz * ((1.0 - dx) * self.data[[iz + 1, ir]] + dx * self.data[[iz + 1, ir + 1]])
    }

    /// Interpolation at a full 3D offset from the atom center
    ///
    /// Folds (x, y) radially, then walks the same grid. Returns 0 when
    /// the 3D distance exceeds the cutoff radius.
    pub fn interpolate_xyz(&self, x: f64, y: f64, z: f64) -> f64 {
        if x * x + y * y + z * z > self.cutoff_radius * self.cutoff_radius {
            return 0.0;
        }
        self.interpolate(x.hypot(y), z)
    }

    /// The raw grid values, shape (nz_half, nr_half)
    pub fn grid(&self) -> &Array2<f64> {
        &self.data
    }

    /// Radial sampling in Angstroms
    pub fn dr(&self) -> f64 {
        self.dr
    }

    /// z sampling (one sub-layer) in Angstroms
    pub fn dz_sub(&self) -> f64 {
        self.dz_sub
    }

    /// Number of sub-layers per propagation slice
    pub fn nz_per_slice(&self) -> usize {
        self.nz_per_slice
    }

    /// Radius beyond which lookups return zero
    pub fn cutoff_radius(&self) -> f64 {
        self.cutoff_radius
    }

    /// Largest value in the grid
    pub fn max_value(&self) -> f64 {
        self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}
