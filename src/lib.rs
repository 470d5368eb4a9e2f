/*
MIT License

Copyright (c) 2025 multislice contributors
*/

//! # multislice
//!
//! Structure sampling and atomic potential construction for multislice
//! electron microscopy image simulation (TEM/STEM).
//!
//! This crate provides the numerical core used during structure and
//! potential setup: weighted sampling of partially occupied
//! crystallographic sites (Vose's alias method) and a lazily built,
//! per-species cache of real-space atomic potential grids derived from
//! tabulated reciprocal-space scattering factors.
//!
//! Structure file parsing, image I/O and the outer slice propagation
//! loop are deliberately left to the consumer of this crate.

pub mod config;
pub mod potential;
pub mod structure;
pub mod utils;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use config::GridConfig;
pub use potential::{AtomPotential, PotentialCache, ScatteringFactorTable};
pub use structure::{SiteOccupancySampler, SiteOccupant};
