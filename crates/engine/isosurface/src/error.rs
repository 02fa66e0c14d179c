//! Error types for the extraction engine

use thiserror::Error;

/// Result type for extraction operations
pub type Result<T> = std::result::Result<T, IsoError>;

/// Errors raised at the configuration boundary of the engine.
///
/// Extraction itself is total over validated inputs; everything here is
/// rejected before a field or grid is built.
#[derive(Error, Debug)]
pub enum IsoError {
    /// World size below the smallest grid that contains a cube, or above the
    /// largest supported lattice
    #[error("Configuration error: world size {size} is outside the supported range [2, 1024]")]
    InvalidWorldSize { size: u32 },

    /// Threshold that is NaN or outside [0, 1]
    #[error("Configuration error: threshold must be within [0, 1], got {0}")]
    InvalidThreshold(f32),

    /// Sample buffer does not match the requested lattice
    #[error("Field buffer holds {actual} samples, expected {expected} for size {size}")]
    DimensionMismatch {
        size: u32,
        expected: usize,
        actual: usize,
    },

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed configuration file
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
