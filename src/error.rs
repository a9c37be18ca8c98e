//! Configuration errors, reported once at startup.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{what}: octave count must be at least 1")]
    ZeroOctaves { what: &'static str },

    #[error("{what}: {field} must be finite and > 0, got {value}")]
    NotPositive {
        what: &'static str,
        field: &'static str,
        value: f64,
    },

    #[error("{what}: {field} must be finite, got {value}")]
    NotFinite {
        what: &'static str,
        field: &'static str,
        value: f64,
    },

    #[error("ridge mix must be within [0, 1], got {0}")]
    RidgeMixOutOfRange(f64),

    #[error("height field needs at least one layer")]
    NoLayers,

    #[error("plane needs at least one segment per side, got {columns}x{rows}")]
    ZeroSegments { columns: usize, rows: usize },

    #[error("plane {columns}x{rows} vertices exceeds the 32-bit index range")]
    TooManyVertices { columns: usize, rows: usize },

    #[error("mesh grid {columns}x{rows} does not match {count} rest positions")]
    GridMismatch {
        columns: usize,
        rows: usize,
        count: usize,
    },

    #[error("amplitude map has {map} entries but mesh has {mesh} vertices")]
    AmplitudeMapMismatch { map: usize, mesh: usize },

    #[error("viewport must be non-empty, got {width}x{height}")]
    EmptyViewport { width: u32, height: u32 },

    #[error("frame rate must be > 0")]
    ZeroFrameRate,

    #[error("{what} duration must be finite and {bound}, got {value}")]
    InvalidDuration {
        what: &'static str,
        bound: &'static str,
        value: f64,
    },

    #[error("unknown preset '{0}' (expected waves, swell or cloth)")]
    UnknownPreset(String),

    #[error("malformed segment count '{0}' (expected COLSxROWS)")]
    MalformedSegments(String),
}

/// Largest vertex count addressable by `u32` mesh indices
pub(crate) const MAX_VERTICES: u64 = u32::MAX as u64 + 1;

/// Vertex count of a `columns x rows` grid, if it fits `u32` indices
pub(crate) fn grid_vertex_count(columns: usize, rows: usize) -> Option<usize> {
    columns
        .checked_mul(rows)
        .filter(|&count| count as u64 <= MAX_VERTICES)
}

/// Reject NaN, infinities and values <= 0
pub(crate) fn ensure_positive(
    what: &'static str,
    field: &'static str,
    value: f64,
) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { what, field, value })
    }
}

pub(crate) fn ensure_finite(
    what: &'static str,
    field: &'static str,
    value: f64,
) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { what, field, value })
    }
}
