//! Error types for layout generation, configuration and recipe persistence.

use std::path::PathBuf;

use thiserror::Error;

use crate::assets::AssetCategory;

/// Errors raised while configuring, generating or storing recipes.
#[derive(Error, Debug)]
pub enum LayoutError {
    /// A facility parameter violates a generation precondition
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: &'static str,
    },

    /// The complex layout path only exists for its calibration footprint
    #[error(
        "complex layout is calibrated for a {cal_w}x{cal_d} footprint, got {width}x{depth}",
        cal_w = crate::generation::COMPLEX_CALIBRATION_FOOTPRINT.0,
        cal_d = crate::generation::COMPLEX_CALIBRATION_FOOTPRINT.1
    )]
    UncalibratedComplexLayout { width: f64, depth: f64 },

    /// Asset catalog has fewer pairs than a generation step indexes
    #[error("asset category `{category}` needs {needed} entries, catalog has {available}")]
    MissingAsset {
        category: AssetCategory,
        needed: usize,
        available: usize,
    },

    /// A boolean record names an operand absent from the solid group
    #[error("boolean operand `{operand}` for target `{target}` not found")]
    UnresolvedBooleanOperand { target: String, operand: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LayoutError {
    pub(crate) fn invalid(
        name: &'static str,
        value: impl std::fmt::Display,
        reason: &'static str,
    ) -> Self {
        LayoutError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LayoutError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, LayoutError>;
