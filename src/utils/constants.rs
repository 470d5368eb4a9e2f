/*
MIT License

Copyright (c) 2025 multislice contributors
*/

//! Physical constants used in the potential formalism

/// Bohr radius in Angstroms
pub const BOHR_RADIUS: f64 = 0.529177;

/// Conversion from integrated scattering amplitude to projected
/// potential in volt-Angstroms (4 a0 e, Kirkland's formalism)
///
/// The real-space grids handed to the propagation stage are later
/// rescaled once more by the interaction parameter, so this is the only
/// unit conversion applied during the build.
pub const PHI_SCALE: f64 = 47.8658;
