//! # ACI 318-19 Factors and Limits
//!
//! Code constants for tied rectangular columns designed by strain
//! compatibility per ACI 318-19 (SI units).
//!
//! ## Factor Summary
//!
//! | Symbol | Description                          | Value                  |
//! |--------|--------------------------------------|------------------------|
//! | α1     | Whitney block stress coefficient     | 0.85                   |
//! | β1     | Whitney block depth ratio            | 0.65 - 0.85 (by f'c)   |
//! | εcu    | Ultimate concrete strain             | 0.003                  |
//! | φ      | Compression-controlled (tied)        | 0.65                   |
//! | φ      | Tension-controlled                   | 0.90                   |
//! | εtc    | Tension-controlled strain limit      | 0.005 or εty + 0.003   |
//! | -      | Axial cap for tied columns           | 0.80 φ Po              |
//!
//! ## Reference
//!
//! ACI 318-19, Chapters 10, 21 and 22

use serde::{Deserialize, Serialize};

// ============================================================================
// ACI Code Section References
// ============================================================================

/// ACI 318-19 section references for the checks performed by the engine.
pub mod aci_ref {
    /// Equivalent rectangular stress block
    pub const STRESS_BLOCK: &str = "ACI 22.2.2.4.1";
    /// β1 table
    pub const BETA1: &str = "ACI Table 22.2.2.4.3";
    /// Maximum usable concrete strain
    pub const ULTIMATE_STRAIN: &str = "ACI 22.2.2.1";
    /// Nominal axial strength Po
    pub const NOMINAL_AXIAL: &str = "ACI 22.4.2.2";
    /// Maximum axial strength for tied columns
    pub const MAX_AXIAL_TIED: &str = "ACI Table 22.4.2.1";
    /// Strength reduction factors for moment and axial force
    pub const STRENGTH_REDUCTION: &str = "ACI Table 21.2.2";
    /// Longitudinal reinforcement ratio limits
    pub const REINFORCEMENT_LIMITS: &str = "ACI 10.6.1.1";
    /// Minimum number of longitudinal bars
    pub const MIN_BARS: &str = "ACI 10.7.3.1";
    /// Clear spacing of longitudinal bars in columns
    pub const BAR_SPACING: &str = "ACI 25.2.3";
}

/// Whitney stress coefficient α1 (the 0.85 in 0.85f'c)
pub const ALPHA1: f64 = 0.85;

/// Maximum usable strain at the extreme concrete compression fiber
pub const ULTIMATE_CONCRETE_STRAIN: f64 = 0.003;

/// Default modulus of elasticity of reinforcement (MPa)
pub const STEEL_MODULUS_MPA: f64 = 200_000.0;

/// Strength reduction factor, compression-controlled tied members
pub const PHI_COMPRESSION_TIED: f64 = 0.65;

/// Strength reduction factor, tension-controlled sections
pub const PHI_TENSION: f64 = 0.90;

/// Maximum axial strength factor for tied columns (Pn,max = 0.80 Po)
pub const AXIAL_CAP_FACTOR_TIED: f64 = 0.80;

/// Fixed tension-controlled strain limit
pub const TENSION_CONTROLLED_STRAIN: f64 = 0.005;

/// Offset above yield strain used by the ACI 318-19 tension-controlled limit
pub const TENSION_CONTROLLED_OFFSET: f64 = 0.003;

/// Minimum longitudinal reinforcement ratio for columns
pub const MIN_STEEL_RATIO: f64 = 0.01;

/// Maximum longitudinal reinforcement ratio for columns
pub const MAX_STEEL_RATIO: f64 = 0.08;

/// Minimum bar count for a rectangular tied column
pub const MIN_BARS_RECTANGULAR_TIED: u32 = 4;

/// Absolute minimum clear spacing between longitudinal column bars (mm)
pub const MIN_CLEAR_SPACING_MM: f64 = 40.0;

/// Minimum specified concrete strength for structural concrete (MPa)
pub const MIN_CONCRETE_STRENGTH_MPA: f64 = 17.0;

/// Calculate β1 per ACI Table 22.2.2.4.3.
///
/// ```text
/// f'c ≤ 28 MPa        β1 = 0.85
/// 28 < f'c < 55 MPa   β1 = 0.85 - 0.05 (f'c - 28) / 7
/// f'c ≥ 55 MPa        β1 = 0.65
/// ```
///
/// # Example
/// ```rust
/// use calc_core::aci_factors::beta1;
///
/// assert_eq!(beta1(28.0), 0.85);
/// assert!((beta1(35.0) - 0.80).abs() < 1e-12);
/// assert_eq!(beta1(60.0), 0.65);
/// ```
pub fn beta1(fc_mpa: f64) -> f64 {
    if fc_mpa <= 28.0 {
        0.85
    } else if fc_mpa >= 55.0 {
        0.65
    } else {
        0.85 - 0.05 * (fc_mpa - 28.0) / 7.0
    }
}

/// Rule used to place the tension-controlled strain limit εtc.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "strain")]
pub enum TensionControlLimit {
    /// A fixed limit, 0.005 in the classic formulation
    Fixed(f64),
    /// Yield strain plus an offset, εty + 0.003 in ACI 318-19
    YieldPlusOffset(f64),
}

impl Default for TensionControlLimit {
    fn default() -> Self {
        TensionControlLimit::Fixed(TENSION_CONTROLLED_STRAIN)
    }
}

impl TensionControlLimit {
    /// ACI 318-19 Table 21.2.2 limit (εty + 0.003)
    pub fn aci_318_19() -> Self {
        TensionControlLimit::YieldPlusOffset(TENSION_CONTROLLED_OFFSET)
    }

    /// Resolve the limit for a given reinforcement yield strain.
    ///
    /// The limit never falls below the yield strain, so the transition zone
    /// between compression- and tension-controlled behavior is never inverted.
    pub fn strain(&self, yield_strain: f64) -> f64 {
        match *self {
            TensionControlLimit::Fixed(limit) => limit.max(yield_strain),
            TensionControlLimit::YieldPlusOffset(offset) => yield_strain + offset,
        }
    }

    /// Display name for reports
    pub fn display_name(&self) -> String {
        match self {
            TensionControlLimit::Fixed(limit) => format!("Fixed ({:.4})", limit),
            TensionControlLimit::YieldPlusOffset(offset) => format!("εy + {:.4}", offset),
        }
    }
}

impl std::fmt::Display for TensionControlLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
