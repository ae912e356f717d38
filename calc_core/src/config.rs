//! # Engine Configuration
//!
//! Tunable modeling options and solver limits. Every field has a default,
//! so an empty JSON object is a valid configuration:
//!
//! ```rust
//! use calc_core::config::EngineConfig;
//!
//! let config: EngineConfig = serde_json::from_str("{}").unwrap();
//! assert_eq!(config, EngineConfig::default());
//! assert!(!config.deduct_displaced_concrete);
//! ```
//!
//! The engine never reads configuration from disk; front-ends deserialize it
//! and pass it in.

use serde::{Deserialize, Serialize};

use crate::aci_factors::{TensionControlLimit, MIN_CLEAR_SPACING_MM};
use crate::errors::{CalcError, CalcResult};

/// Top-level configuration for one engine run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Limits for the pure-bending neutral axis search
    pub solver: SolverConfig,

    /// Subtract 0.85f'c over the area of compression bars inside the stress block
    ///
    /// Off by default. The pure-compression point always uses the net
    /// concrete area of ACI 22.4.2.2 regardless of this flag.
    pub deduct_displaced_concrete: bool,

    /// Rule for the tension-controlled strain limit εtc
    pub tension_control_limit: TensionControlLimit,

    /// Evaluate control points and bending axes on the rayon pool
    pub parallel: bool,

    /// Clear spacing policy for the detailing check
    pub detailing: DetailingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            solver: SolverConfig::default(),
            deduct_displaced_concrete: false,
            tension_control_limit: TensionControlLimit::default(),
            parallel: true,
            detailing: DetailingConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Validate solver limits and detailing policy
    pub fn validate(&self) -> CalcResult<()> {
        self.solver.validate()?;
        self.detailing.validate()?;
        match self.tension_control_limit {
            TensionControlLimit::Fixed(limit) | TensionControlLimit::YieldPlusOffset(limit)
                if !limit.is_finite() || limit <= 0.0 =>
            {
                Err(CalcError::invalid_input(
                    "tension_control_limit",
                    limit.to_string(),
                    "Tension-controlled strain must be positive",
                ))
            }
            _ => Ok(()),
        }
    }
}

/// Bounds for the bracketed pure-bending solve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Converged when |P(c)| falls to this many newtons
    pub tolerance_n: f64,

    /// Maximum bisection steps before reporting a root finding failure
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            tolerance_n: 0.01,
            max_iterations: 200,
        }
    }
}

impl SolverConfig {
    /// Validate tolerance and iteration cap
    pub fn validate(&self) -> CalcResult<()> {
        if !self.tolerance_n.is_finite() || self.tolerance_n <= 0.0 {
            return Err(CalcError::invalid_input(
                "solver.tolerance_n",
                self.tolerance_n.to_string(),
                "Tolerance must be positive",
            ));
        }
        if self.max_iterations == 0 {
            return Err(CalcError::invalid_input(
                "solver.max_iterations",
                "0",
                "At least one iteration is required",
            ));
        }
        Ok(())
    }
}

/// Clear spacing policy: s_min = max(absolute minimum, 1.5 d_b, 4/3 d_agg).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailingConfig {
    /// Nominal maximum aggregate size (mm)
    pub aggregate_size_mm: f64,

    /// Absolute minimum clear spacing (mm)
    pub absolute_min_spacing_mm: f64,
}

impl Default for DetailingConfig {
    fn default() -> Self {
        DetailingConfig {
            aggregate_size_mm: 20.0,
            absolute_min_spacing_mm: MIN_CLEAR_SPACING_MM,
        }
    }
}

impl DetailingConfig {
    /// Required minimum clear spacing for bars of the given diameter (mm)
    pub fn required_clear_spacing_mm(&self, bar_diameter_mm: f64) -> f64 {
        self.absolute_min_spacing_mm
            .max(1.5 * bar_diameter_mm)
            .max(4.0 / 3.0 * self.aggregate_size_mm)
    }

    /// Validate the policy values
    pub fn validate(&self) -> CalcResult<()> {
        if !self.aggregate_size_mm.is_finite() || self.aggregate_size_mm <= 0.0 {
            return Err(CalcError::invalid_input(
                "detailing.aggregate_size_mm",
                self.aggregate_size_mm.to_string(),
                "Aggregate size must be positive",
            ));
        }
        if !self.absolute_min_spacing_mm.is_finite() || self.absolute_min_spacing_mm < 0.0 {
            return Err(CalcError::invalid_input(
                "detailing.absolute_min_spacing_mm",
                self.absolute_min_spacing_mm.to_string(),
                "Minimum spacing cannot be negative",
            ));
        }
        Ok(())
    }
}
