//! FILENAME: core/cellset-engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CellsetError {
    #[error("Unsupported cellset shape: {0}")]
    UnsupportedShape(String),

    #[error(
        "Cellsets with grand or sub totals are not supported \
         (position {position}, hierarchy {hierarchy}: expected {expected} identifiers, found {found})"
    )]
    GrandTotalUnsupported {
        position: usize,
        hierarchy: usize,
        expected: usize,
        found: usize,
    },

    #[error("Internal consistency error: {0}")]
    InternalConsistency(String),

    #[error("Unknown hierarchy {dimension}/{hierarchy} in cube {cube}")]
    UnknownHierarchy {
        cube: String,
        dimension: String,
        hierarchy: String,
    },

    #[error("Invalid number {value:?} for level {level}")]
    InvalidNumber { level: String, value: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CellsetResult<T> = Result<T, CellsetError>;
