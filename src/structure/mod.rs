/*
MIT License

Copyright (c) 2025 multislice contributors
*/

//! Crystal structure occupancy types and sampling
//!
//! A crystallographic site may be shared by several chemical species
//! with fractional occupancies, with any remaining probability taken by
//! a vacancy. This module provides the occupant record and the samplers
//! that decide, per structural realization, which occupant a site
//! receives.

pub mod alias;
pub mod errors;
pub mod occupancy;

pub use alias::AliasSampler;
pub use errors::{Result, StructureError};
pub use occupancy::SiteOccupancySampler;

use std::fmt;

#[rustfmt::skip]
const ELEMENT_SYMBOLS: [&str; 103] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne",
    "Na", "Mg", "Al", "Si", "P", "S", "Cl", "Ar", "K", "Ca",
    "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn",
    "Ga", "Ge", "As", "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr",
    "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In", "Sn",
    "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd",
    "Pm", "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb",
    "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg",
    "Tl", "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th",
    "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk", "Cf", "Es", "Fm",
    "Md", "No", "Lr",
];

/// Element symbol for an atomic number, if known
pub fn element_symbol(atomic_number: u32) -> Option<&'static str> {
    if atomic_number == 0 {
        return None;
    }
    ELEMENT_SYMBOLS.get(atomic_number as usize - 1).copied()
}

/// Atomic number for an element symbol, if known
pub fn atomic_number(symbol: &str) -> Option<u32> {
    ELEMENT_SYMBOLS
        .iter()
        .position(|&s| s == symbol)
        .map(|i| i as u32 + 1)
}

/// One candidate occupant of a crystallographic site
///
/// A `None` atomic number denotes a vacancy. All occupants sharing a
/// site, plus any synthesized vacancy, carry occupancies summing to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteOccupant {
    /// Atomic number of the species, or `None` for a vacancy
    pub atomic_number: Option<u32>,
    /// Probability that this species occupies the site, in [0, 1]
    pub occupancy: f64,
    /// Atomic mass in amu
    pub mass: f64,
    /// Ionic charge in units of e
    pub charge: f64,
    /// Debye-Waller factor B in Angstrom^2
    pub debye_waller: f64,
}

impl SiteOccupant {
    /// Create an occupant for the given species
    pub fn new(atomic_number: u32, occupancy: f64, mass: f64, charge: f64, debye_waller: f64) -> Self {
        Self {
            atomic_number: Some(atomic_number),
            occupancy,
            mass,
            charge,
            debye_waller,
        }
    }

    /// Create a vacancy carrying the given residual occupancy
    pub fn vacancy(occupancy: f64) -> Self {
        Self {
            atomic_number: None,
            occupancy,
            mass: 0.0,
            charge: 0.0,
            debye_waller: 0.0,
        }
    }

    /// Whether this occupant is a vacancy
    pub fn is_vacancy(&self) -> bool {
        self.atomic_number.is_none()
    }
}

impl fmt::Display for SiteOccupant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.atomic_number {
            Some(z) => match element_symbol(z) {
                Some(sym) => write!(f, "{} (Z={}, occ={})", sym, z, self.occupancy),
                None => write!(f, "Z={} (occ={})", z, self.occupancy),
            },
            None => write!(f, "vacancy (occ={})", self.occupancy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_symbol_lookup() {
        assert_eq!(element_symbol(1), Some("H"));
        assert_eq!(element_symbol(14), Some("Si"));
        assert_eq!(element_symbol(79), Some("Au"));
        assert_eq!(element_symbol(0), None);
        assert_eq!(element_symbol(104), None);
    }

    #[test]
    fn test_atomic_number_roundtrip() {
        for z in 1..=103 {
            let sym = element_symbol(z).unwrap();
            assert_eq!(atomic_number(sym), Some(z));
        }
        assert_eq!(atomic_number("Xx"), None);
    }

    #[test]
    fn test_vacancy_has_zero_properties() {
        let v = SiteOccupant::vacancy(0.3);
        assert!(v.is_vacancy());
        assert_eq!(v.mass, 0.0);
        assert_eq!(v.charge, 0.0);
        assert_eq!(v.debye_waller, 0.0);
        assert_eq!(v.occupancy, 0.3);
    }

    #[test]
    fn test_occupant_display_names_species() {
        let occ = SiteOccupant::new(26, 0.5, 55.85, 0.0, 0.45);
        let text = occ.to_string();
        assert!(text.contains("Fe"));
        assert!(!occ.is_vacancy());
    }
}
