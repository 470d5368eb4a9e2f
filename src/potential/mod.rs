/*
MIT License

Copyright (c) 2025 multislice contributors
*/

//! Atomic potential construction
//!
//! Converts tabulated reciprocal-space scattering factors into cached
//! real-space potential lookup tables, one per (species, charge) key:
//! Akima spline fit, reciprocal-space accumulation with Debye-Waller
//! attenuation and azimuthal integration, inverse 2D Fourier transform,
//! and redistribution over the sub-layers of a propagation slice.

pub mod cache;
pub mod errors;
pub mod lookup;
pub mod scattering;
pub mod spline;

pub use cache::{PotentialCache, PotentialKey};
pub use errors::{PotentialError, Result};
pub use lookup::AtomPotential;
pub use scattering::ScatteringFactorTable;
pub use spline::AkimaSpline;
