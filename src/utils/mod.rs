/*
MIT License

Copyright (c) 2025 multislice contributors
*/

//! Shared numerical utilities

pub mod constants;
pub mod fft;

pub use constants::{BOHR_RADIUS, PHI_SCALE};
pub use fft::ifft2;
