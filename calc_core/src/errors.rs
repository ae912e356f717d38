//! # Error Types
//!
//! Structured error types for calc_core. Every failure of the column engine
//! is a deterministic function of its input, so none of these are retried;
//! they carry enough context for a front-end to explain what to change.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn validate_width(width_mm: f64) -> CalcResult<()> {
//!     if width_mm <= 0.0 {
//!         return Err(CalcError::invalid_section(
//!             "width_mm",
//!             width_mm.to_string(),
//!             "Width must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// Malformed or non-physical section geometry, material or layer input
    #[error("Invalid section '{field}': {value} - {reason}")]
    InvalidSection {
        field: String,
        value: String,
        reason: String,
    },

    /// Degenerate neutral-axis depth reached during a strain solve
    #[error("Invalid geometry at neutral axis depth {neutral_axis_mm}: {reason}")]
    InvalidGeometry {
        neutral_axis_mm: String,
        reason: String,
    },

    /// Pure-bending neutral axis search did not converge
    #[error(
        "Root finding failed after {iterations} iterations: residual {residual_kn:.6} kN exceeds tolerance {tolerance_kn:.6} kN"
    )]
    RootFindingFailure {
        iterations: usize,
        residual_kn: f64,
        tolerance_kn: f64,
    },

    /// Demand axial force lies outside the range covered by the diagram
    #[error("Axial force {axial_kn:.3} kN is outside the diagram range [{min_kn:.3}, {max_kn:.3}] kN")]
    OutOfRangeAxialForce {
        axial_kn: f64,
        min_kn: f64,
        max_kn: f64,
    },

    /// A non-section input value is invalid (demand, configuration)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidSection error
    pub fn invalid_section(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidSection {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidGeometry error for a neutral-axis depth
    pub fn invalid_geometry(neutral_axis_mm: f64, reason: impl Into<String>) -> Self {
        CalcError::InvalidGeometry {
            neutral_axis_mm: neutral_axis_mm.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a RootFindingFailure error
    pub fn root_finding_failure(iterations: usize, residual_kn: f64, tolerance_kn: f64) -> Self {
        CalcError::RootFindingFailure {
            iterations,
            residual_kn,
            tolerance_kn,
        }
    }

    /// Create an OutOfRangeAxialForce error
    pub fn out_of_range_axial(axial_kn: f64, min_kn: f64, max_kn: f64) -> Self {
        CalcError::OutOfRangeAxialForce {
            axial_kn,
            min_kn,
            max_kn,
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidSection { .. } => "INVALID_SECTION",
            CalcError::InvalidGeometry { .. } => "INVALID_GEOMETRY",
            CalcError::RootFindingFailure { .. } => "ROOT_FINDING_FAILURE",
            CalcError::OutOfRangeAxialForce { .. } => "OUT_OF_RANGE_AXIAL_FORCE",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}
