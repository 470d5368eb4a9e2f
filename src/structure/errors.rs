/*
MIT License

Copyright (c) 2025 multislice contributors
*/

//! Error types for the structure module

/// Error types for site occupancy sampling
#[derive(Debug, thiserror::Error)]
pub enum StructureError {
    /// The occupancy weights of a site do not form a valid distribution
    #[error("Invalid occupancy distribution: {reason} (weights: {weights:?})")]
    InvalidDistribution { reason: String, weights: Vec<f64> },
}

/// Result type for structure operations
pub type Result<T> = std::result::Result<T, StructureError>;
