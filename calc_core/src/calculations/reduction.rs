//! # Strength Reduction
//!
//! Maps nominal control points to design strength per ACI 318-19 Table 21.2.2
//! for tied members:
//!
//! ```text
//!   φ
//! 0.90 ┤                 ┌──────────
//!      │               ╱
//!      │             ╱   transition
//! 0.65 ┤────────────┘
//!      └────────────┬────┬─────────── εt
//!                   εy   εtc
//! ```
//!
//! Design axial force is capped at 0.80 φ Po (ACI Table 22.4.2.1), with
//! φ = 0.65 and Po the nominal pure-compression strength. Moments are only
//! scaled by φ.

use serde::{Deserialize, Serialize};

use crate::aci_factors::{AXIAL_CAP_FACTOR_TIED, PHI_COMPRESSION_TIED, PHI_TENSION};
use crate::calculations::control_points::ControlPoint;
use crate::calculations::forces::ForcePoint;

/// Strength reduction factor φ for net tensile strain `eps_t`.
///
/// # Example
/// ```rust
/// use calc_core::calculations::reduction::strength_reduction_factor;
///
/// assert_eq!(strength_reduction_factor(0.0021, 0.0021, 0.005), 0.65);
/// assert_eq!(strength_reduction_factor(0.005, 0.0021, 0.005), 0.90);
/// ```
pub fn strength_reduction_factor(eps_t: f64, eps_y: f64, eps_tc: f64) -> f64 {
    if eps_t <= eps_y {
        PHI_COMPRESSION_TIED
    } else if eps_t >= eps_tc {
        PHI_TENSION
    } else {
        PHI_COMPRESSION_TIED + (PHI_TENSION - PHI_COMPRESSION_TIED) * (eps_t - eps_y) / (eps_tc - eps_y)
    }
}

/// Maximum design axial force for a tied column, 0.80 × 0.65 × Po (kN)
pub fn design_axial_cap_kn(po_kn: f64) -> f64 {
    AXIAL_CAP_FACTOR_TIED * PHI_COMPRESSION_TIED * po_kn
}

/// One point on the design interaction curve.
///
/// ## JSON Example
///
/// ```json
/// {
///   "control_point": "PureCompression",
///   "phi": 0.65,
///   "axial_kn": 2665.3,
///   "moment_kn_m": 0.0,
///   "axial_capped": true
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignPoint {
    /// Control point this state belongs to
    pub control_point: ControlPoint,
    /// Strength reduction factor φ
    pub phi: f64,
    /// Design axial strength φPn (kN), after the tied-column cap
    pub axial_kn: f64,
    /// Design moment strength φMn (kN·m)
    pub moment_kn_m: f64,
    /// True when the 0.80 φ Po cap governed
    pub axial_capped: bool,
}

/// Applies φ and the axial cap to nominal points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrengthReductionMapper {
    yield_strain: f64,
    tension_controlled_strain: f64,
    axial_cap_kn: f64,
}

impl StrengthReductionMapper {
    /// Create a mapper from εy, εtc and the nominal pure-compression strength
    pub fn new(yield_strain: f64, tension_controlled_strain: f64, po_kn: f64) -> Self {
        StrengthReductionMapper {
            yield_strain,
            tension_controlled_strain,
            axial_cap_kn: design_axial_cap_kn(po_kn),
        }
    }

    /// Design axial cap in effect (kN)
    pub fn axial_cap_kn(&self) -> f64 {
        self.axial_cap_kn
    }

    /// Map one nominal point to design strength
    pub fn apply(&self, point: &ForcePoint) -> DesignPoint {
        let phi = strength_reduction_factor(
            point.net_tensile_strain,
            self.yield_strain,
            self.tension_controlled_strain,
        );
        let axial = phi * point.axial_kn;
        let axial_capped = axial > self.axial_cap_kn;

        DesignPoint {
            control_point: point.control_point,
            phi,
            axial_kn: if axial_capped { self.axial_cap_kn } else { axial },
            moment_kn_m: phi * point.moment_kn_m,
            axial_capped,
        }
    }

    /// Map a full nominal curve, preserving order
    pub fn apply_all(&self, points: &[ForcePoint]) -> Vec<DesignPoint> {
        points.iter().map(|point| self.apply(point)).collect()
    }
}
