/*
MIT License

Copyright (c) 2025 multislice contributors
*/

//! Numeric configuration for the potential grid
//!
//! The potential lookup tables are discretized on a grid whose geometry
//! is fully determined by four quantities: the atomic radius cutoff, the
//! in-plane spatial resolution, the slice thickness of the propagation
//! scheme and an oversampling factor. This module holds that
//! configuration together with the derived grid geometry used by the
//! potential build.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when constructing a [`GridConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration value {name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("Oversampling factor must be at least 1, got {0}")]
    InvalidOversampling(u32),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Grid configuration for building atomic potential lookup tables
///
/// All lengths are in Angstroms. The configuration is immutable after
/// construction; every grid dimension derived from it is therefore fixed
/// for the lifetime of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// Radius around the atom center beyond which the potential is
    /// treated as zero
    pub atom_radius: f64,
    /// Spatial resolution along x
    pub resolution_x: f64,
    /// Spatial resolution along y
    pub resolution_y: f64,
    /// Thickness of one propagation slice
    pub slice_thickness: f64,
    /// Oversampling factor applied to the real-space sampling
    pub oversample: u32,
}

impl GridConfig {
    /// Create a validated configuration
    ///
    /// # Arguments
    ///
    /// * `atom_radius` - Potential cutoff radius in Angstroms
    /// * `resolution_x` - Spatial resolution along x in Angstroms
    /// * `resolution_y` - Spatial resolution along y in Angstroms
    /// * `slice_thickness` - Slice thickness in Angstroms
    /// * `oversample` - Oversampling factor (>= 1)
    ///
    /// # Returns
    ///
    /// The configuration, or an error if any value is non-positive
    pub fn new(
        atom_radius: f64,
        resolution_x: f64,
        resolution_y: f64,
        slice_thickness: f64,
        oversample: u32,
    ) -> Result<Self> {
        for (name, value) in [
            ("atom_radius", atom_radius),
            ("resolution_x", resolution_x),
            ("resolution_y", resolution_y),
            ("slice_thickness", slice_thickness),
        ] {
            if !(value > 0.0) || !value.is_finite() {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        if oversample < 1 {
            return Err(ConfigError::InvalidOversampling(oversample));
        }

        Ok(Self {
            atom_radius,
            resolution_x,
            resolution_y,
            slice_thickness,
            oversample,
        })
    }

    /// Number of reciprocal-space samples along x
    ///
    /// `nx * resolution_x` spans roughly twice the atom radius at the
    /// requested oversampling.
    pub fn nx(&self) -> usize {
        2 * self.oversample as usize * (self.atom_radius / self.resolution_x).ceil() as usize
    }

    /// Number of z-samples within one slice, forced odd so the atom can
    /// be centered symmetrically within its slice
    pub fn nz_per_slice(&self) -> usize {
        let n = (self.oversample as f64 * self.slice_thickness / self.resolution_x).floor()
            as usize;
        if n % 2 == 0 {
            n + 1
        } else {
            n
        }
    }

    /// Total number of z-samples, spanning twice `atom_radius` worth of
    /// slices at `nz_per_slice` samples each
    ///
    /// The z-sampling must be roughly as fine as the x-sampling to avoid
    /// artifacts from premature cutoff of the reciprocal-space
    /// scattering factor.
    pub fn nz(&self) -> usize {
        2 * (self.atom_radius / self.slice_thickness).ceil() as usize * self.nz_per_slice()
    }

    /// Reciprocal-space step along kx
    pub fn dkx(&self) -> f64 {
        0.5 * self.oversample as f64 / (self.nx() as f64 * self.resolution_x)
    }

    /// Reciprocal-space step along kz
    pub fn dkz(&self) -> f64 {
        self.nz_per_slice() as f64 / (self.nz() as f64 * self.slice_thickness)
    }

    /// Largest admissible momentum transfer
    pub fn kmax(&self) -> f64 {
        0.5 * self.nx() as f64 * self.dkx() / self.oversample as f64
    }

    /// Real-space radial sampling of the final lookup table
    pub fn dr(&self) -> f64 {
        self.resolution_x / self.oversample as f64
    }

    /// Real-space z sampling of the final lookup table (one sub-layer)
    pub fn dz_sub(&self) -> f64 {
        self.slice_thickness / self.nz_per_slice() as f64
    }
}
