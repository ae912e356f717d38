//! Reinforcing Steel
//!
//! Standard metric bar sizes and the elastic-perfectly-plastic steel model
//! used by the strain compatibility analysis.
//!
//! | Size | Closest US / Canadian bar |
//! |------|---------------------------|
//! | 10   | #3 / 10M                  |
//! | 12   | #4 / 13M                  |
//! | 16   | #5 / 16M                  |
//! | 20   | #6 / 19M                  |
//! | 25   | #8 / 25M                  |
//! | 28   | #9 / 29M                  |
//! | 32   | #10 / 32M                 |
//! | 36   | #11 / 36M                 |

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::aci_factors::STEEL_MODULUS_MPA;
use crate::errors::{CalcError, CalcResult};

/// Standard reinforcing bar sizes (nominal diameter in mm)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RebarSize {
    #[serde(rename = "10")]
    D10,
    #[serde(rename = "12")]
    D12,
    #[serde(rename = "16")]
    D16,
    #[serde(rename = "20")]
    D20,
    #[serde(rename = "25")]
    D25,
    #[serde(rename = "28")]
    D28,
    #[serde(rename = "32")]
    D32,
    #[serde(rename = "36")]
    D36,
    #[serde(rename = "40")]
    D40,
    #[serde(rename = "50")]
    D50,
}

impl RebarSize {
    /// All standard sizes for UI selection
    pub const ALL: [RebarSize; 10] = [
        RebarSize::D10,
        RebarSize::D12,
        RebarSize::D16,
        RebarSize::D20,
        RebarSize::D25,
        RebarSize::D28,
        RebarSize::D32,
        RebarSize::D36,
        RebarSize::D40,
        RebarSize::D50,
    ];

    /// Sizes commonly used for ties
    pub const TIES: [RebarSize; 3] = [RebarSize::D10, RebarSize::D12, RebarSize::D16];

    /// Nominal diameter (mm)
    pub fn diameter_mm(&self) -> f64 {
        match self {
            RebarSize::D10 => 10.0,
            RebarSize::D12 => 12.0,
            RebarSize::D16 => 16.0,
            RebarSize::D20 => 20.0,
            RebarSize::D25 => 25.0,
            RebarSize::D28 => 28.0,
            RebarSize::D32 => 32.0,
            RebarSize::D36 => 36.0,
            RebarSize::D40 => 40.0,
            RebarSize::D50 => 50.0,
        }
    }

    /// Cross-sectional area of one bar, πd²/4 (mm²)
    pub fn area_mm2(&self) -> f64 {
        PI * self.diameter_mm().powi(2) / 4.0
    }

    /// Look up a standard size from its diameter in mm
    pub fn from_diameter(diameter_mm: f64) -> CalcResult<Self> {
        RebarSize::ALL
            .iter()
            .copied()
            .find(|size| (size.diameter_mm() - diameter_mm).abs() < 1e-9)
            .ok_or_else(|| {
                CalcError::invalid_section(
                    "bar_diameter_mm",
                    diameter_mm.to_string(),
                    "Rebar size is not a standard size",
                )
            })
    }

    /// Display name
    pub fn display_name(&self) -> String {
        format!("{:.0} mm", self.diameter_mm())
    }
}

impl std::fmt::Display for RebarSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Reinforcing steel with an elastic-perfectly-plastic response.
///
/// ## JSON Example
///
/// ```json
/// { "fy_mpa": 420.0, "es_mpa": 200000.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteelMaterial {
    /// Yield strength fy (MPa)
    pub fy_mpa: f64,

    /// Modulus of elasticity Es (MPa)
    #[serde(default = "default_steel_modulus")]
    pub es_mpa: f64,
}

fn default_steel_modulus() -> f64 {
    STEEL_MODULUS_MPA
}

impl SteelMaterial {
    /// Create steel with the default modulus (200 GPa)
    pub fn new(fy_mpa: f64) -> Self {
        SteelMaterial {
            fy_mpa,
            es_mpa: STEEL_MODULUS_MPA,
        }
    }

    /// Validate strength and modulus
    pub fn validate(&self) -> CalcResult<()> {
        if !self.fy_mpa.is_finite() || self.fy_mpa <= 0.0 {
            return Err(CalcError::invalid_section(
                "fy_mpa",
                self.fy_mpa.to_string(),
                "Yield strength must be positive",
            ));
        }
        if !self.es_mpa.is_finite() || self.es_mpa <= 0.0 {
            return Err(CalcError::invalid_section(
                "es_mpa",
                self.es_mpa.to_string(),
                "Steel modulus must be positive",
            ));
        }
        Ok(())
    }

    /// Yield strain εy = fy / Es
    pub fn yield_strain(&self) -> f64 {
        self.fy_mpa / self.es_mpa
    }

    /// Stress for a given strain, clamped to ±fy (MPa, compression positive)
    pub fn stress_mpa(&self, strain: f64) -> f64 {
        (strain * self.es_mpa).clamp(-self.fy_mpa, self.fy_mpa)
    }
}
