/*
MIT License

Copyright (c) 2025 multislice contributors
*/

//! Error types for the potential module

use crate::structure::element_symbol;

/// Error types for potential construction and lookup
#[derive(Debug, thiserror::Error)]
pub enum PotentialError {
    /// No scattering-factor data for the requested species. Defaulting
    /// the potential to zero would silently corrupt downstream physics,
    /// so this is a hard configuration error.
    #[error("No scattering data for {} (Z={atomic_number}, ionic={ionic})", species_name(.atomic_number))]
    UnknownSpecies { atomic_number: u32, ionic: bool },

    /// A non-finite value arose during reciprocal-space accumulation
    #[error(
        "Non-finite scattering amplitude for {} at k={k} 1/A (B={debye_waller} A^2)",
        species_name(.atomic_number)
    )]
    NumericDegeneracy {
        atomic_number: u32,
        k: f64,
        debye_waller: f64,
    },

    /// The scattering-factor table is structurally malformed
    #[error("Invalid scattering-factor table: {0}")]
    InvalidTable(String),
}

fn species_name(atomic_number: &u32) -> String {
    match element_symbol(*atomic_number) {
        Some(sym) => sym.to_string(),
        None => format!("Z={}", atomic_number),
    }
}

/// Result type for potential operations
pub type Result<T> = std::result::Result<T, PotentialError>;
