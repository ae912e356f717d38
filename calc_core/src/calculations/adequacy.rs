//! # Adequacy Check
//!
//! Compares a factored demand (Pu, Mu) against the design interaction curve
//! of one axis. The design moment capacity is interpolated at Pu; the
//! section passes when |Mu| ≤ φMn.
//!
//! Demands outside the design axial range are never extrapolated: the check
//! reports `OutOfRangeAxialForce` instead.

use serde::{Deserialize, Serialize};

use crate::calculations::diagram::InteractionDiagram;
use crate::calculations::section::BendingAxis;
use crate::errors::{CalcError, CalcResult};

/// Status text for a passing check
pub const STATUS_OK: &str = "OK";

/// Status text for a failing check
pub const STATUS_NG: &str = "NG";

/// Factored load on one axis.
///
/// ## JSON Example
///
/// ```json
/// { "axial_kn": 1200.0, "moment_kn_m": 250.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactoredDemand {
    /// Factored axial force Pu (kN, compression positive)
    pub axial_kn: f64,
    /// Factored moment Mu (kN·m); only the magnitude is checked
    pub moment_kn_m: f64,
}

impl FactoredDemand {
    /// Create a demand from Pu and Mu
    pub fn new(axial_kn: f64, moment_kn_m: f64) -> Self {
        FactoredDemand { axial_kn, moment_kn_m }
    }

    /// Validate that both components are finite
    pub fn validate(&self) -> CalcResult<()> {
        if !self.axial_kn.is_finite() {
            return Err(CalcError::invalid_input(
                "axial_kn",
                self.axial_kn.to_string(),
                "Factored axial force must be a finite number",
            ));
        }
        if !self.moment_kn_m.is_finite() {
            return Err(CalcError::invalid_input(
                "moment_kn_m",
                self.moment_kn_m.to_string(),
                "Factored moment must be a finite number",
            ));
        }
        Ok(())
    }
}

/// Outcome of one axis' adequacy check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "axis": "Major",
///   "passes": true,
///   "demand_capacity_ratio": 0.62,
///   "axial_kn": 1200.0,
///   "moment_kn_m": 250.0,
///   "capacity_kn_m": 403.2,
///   "status": "OK",
///   "summary": "Major Axis (X): Mu = 250.0 kN·m ≤ φMn = 403.2 kN·m at Pu = 1200.0 kN"
/// }
/// ```
///
/// A zero capacity with a non-zero demand gives an infinite ratio, which
/// serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdequacyResult {
    /// Axis checked
    pub axis: BendingAxis,

    /// True when |Mu| ≤ φMn
    pub passes: bool,

    /// |Mu| / φMn
    pub demand_capacity_ratio: f64,

    /// Demand axial force Pu (kN)
    pub axial_kn: f64,

    /// Demand moment Mu (kN·m)
    pub moment_kn_m: f64,

    /// Interpolated design moment capacity φMn at Pu (kN·m)
    pub capacity_kn_m: f64,

    /// "OK" or "NG"
    pub status: String,

    /// One-line description of the check
    pub summary: String,
}

impl AdequacyResult {
    /// Check if the demand is within capacity
    pub fn passes(&self) -> bool {
        self.passes
    }
}

/// Check a factored demand against a design interaction diagram.
///
/// # Returns
///
/// * `Ok(AdequacyResult)` - Pass/fail with the demand-capacity ratio
/// * `Err(CalcError::OutOfRangeAxialForce)` - Pu lies outside the design curve
/// * `Err(CalcError::InvalidInput)` - Pu or Mu is not finite
pub fn check_adequacy(diagram: &InteractionDiagram, demand: FactoredDemand) -> CalcResult<AdequacyResult> {
    demand.validate()?;

    let capacity = diagram.design_moment_at(demand.axial_kn)?.abs();
    let moment = demand.moment_kn_m.abs();

    let ratio = if capacity > 0.0 {
        moment / capacity
    } else if moment == 0.0 {
        0.0
    } else {
        f64::INFINITY
    };
    let passes = moment <= capacity;
    let status = if passes { STATUS_OK } else { STATUS_NG };

    let summary = format!(
        "{}: Mu = {:.1} kN·m {} φMn = {:.1} kN·m at Pu = {:.1} kN",
        diagram.axis,
        moment,
        if passes { "≤" } else { ">" },
        capacity,
        demand.axial_kn
    );

    log::debug!("{} (ratio {:.3})", summary, ratio);

    Ok(AdequacyResult {
        axis: diagram.axis,
        passes,
        demand_capacity_ratio: ratio,
        axial_kn: demand.axial_kn,
        moment_kn_m: demand.moment_kn_m,
        capacity_kn_m: capacity,
        status: status.to_string(),
        summary,
    })
}

/// Adequacy of one axis inside a full column run.
///
/// An out-of-range demand does not abort the run; it is reported here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome")]
pub enum AdequacyOutcome {
    /// The demand was checked against the curve
    Evaluated(AdequacyResult),
    /// The demand could not be placed on the curve
    CannotEvaluate {
        /// Why the check was skipped
        error: CalcError,
    },
}

impl AdequacyOutcome {
    /// Run the check, capturing out-of-range demands
    pub fn evaluate(diagram: &InteractionDiagram, demand: FactoredDemand) -> CalcResult<Self> {
        match check_adequacy(diagram, demand) {
            Ok(result) => Ok(AdequacyOutcome::Evaluated(result)),
            Err(error @ CalcError::OutOfRangeAxialForce { .. }) => {
                log::warn!("{}: {}", diagram.axis, error);
                Ok(AdequacyOutcome::CannotEvaluate { error })
            }
            Err(other) => Err(other),
        }
    }

    /// True only for an evaluated, passing check
    pub fn passes(&self) -> bool {
        matches!(self, AdequacyOutcome::Evaluated(result) if result.passes)
    }

    /// "OK", "NG" or "N/A"
    pub fn status(&self) -> &str {
        match self {
            AdequacyOutcome::Evaluated(result) => &result.status,
            AdequacyOutcome::CannotEvaluate { .. } => "N/A",
        }
    }
}
