//! # Control Points
//!
//! The eight characteristic strain states that define a column's nominal
//! P–M interaction curve, ordered from pure compression to pure tension.
//!
//! | # | Control point          | Neutral axis                       |
//! |---|------------------------|------------------------------------|
//! | 1 | Pure compression       | uniform εcu                        |
//! | 2 | Max compression moment | c = h                              |
//! | 3 | Zero tension strain    | c = d_t                            |
//! | 4 | Half yield tension     | c = εcu d_t / (εcu + 0.5 εy)       |
//! | 5 | Balanced               | c = εcu d_t / (εcu + εy)           |
//! | 6 | Tension controlled     | c = εcu d_t / (εcu + εtc)          |
//! | 7 | Pure bending           | P(c) = 0, bisection                |
//! | 8 | Pure tension           | uniform tension past yield         |
//!
//! εy and εtc belong to the extreme tension layer. Every point is an
//! independent solve, so the generator can dispatch them on the rayon pool.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::calculations::forces::{ForceIntegrator, ForcePoint};
use crate::calculations::section::SectionView;
use crate::calculations::strain::{NeutralAxis, StrainProfileSolver};
use crate::config::{EngineConfig, SolverConfig};
use crate::equations::neutral_axis_for_tensile_strain;
use crate::errors::{CalcError, CalcResult};
use crate::units::{Kilonewtons, Newtons};

/// Lower end of the pure-bending bracket, as a fraction of the depth
const BRACKET_FLOOR_RATIO: f64 = 1.0e-9;

/// Axial tolerance for the post-generation sanity check (kN)
const SANITY_AXIAL_TOLERANCE_KN: f64 = 1.0e-6;

/// Moment tolerance for the post-generation sanity check (kN·m)
const SANITY_MOMENT_TOLERANCE_KN_M: f64 = 1.0e-6;

/// Characteristic strain state on the interaction curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ControlPoint {
    PureCompression,
    MaxCompressionMoment,
    ZeroTensionStrain,
    HalfYieldTension,
    Balanced,
    TensionControlled,
    PureBending,
    PureTension,
}

impl ControlPoint {
    /// All control points in curve order
    pub const ALL: [ControlPoint; 8] = [
        ControlPoint::PureCompression,
        ControlPoint::MaxCompressionMoment,
        ControlPoint::ZeroTensionStrain,
        ControlPoint::HalfYieldTension,
        ControlPoint::Balanced,
        ControlPoint::TensionControlled,
        ControlPoint::PureBending,
        ControlPoint::PureTension,
    ];

    /// Position on the curve, 1 through 8
    pub fn index(&self) -> usize {
        match self {
            ControlPoint::PureCompression => 1,
            ControlPoint::MaxCompressionMoment => 2,
            ControlPoint::ZeroTensionStrain => 3,
            ControlPoint::HalfYieldTension => 4,
            ControlPoint::Balanced => 5,
            ControlPoint::TensionControlled => 6,
            ControlPoint::PureBending => 7,
            ControlPoint::PureTension => 8,
        }
    }

    /// Display name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            ControlPoint::PureCompression => "Pure Compression",
            ControlPoint::MaxCompressionMoment => "Max Compression Moment (c = h)",
            ControlPoint::ZeroTensionStrain => "Zero Tension Strain (c = dt)",
            ControlPoint::HalfYieldTension => "Half Yield (εt = 0.5εy)",
            ControlPoint::Balanced => "Balanced (εt = εy)",
            ControlPoint::TensionControlled => "Tension Controlled (εt = εtc)",
            ControlPoint::PureBending => "Pure Bending (P = 0)",
            ControlPoint::PureTension => "Pure Tension",
        }
    }
}

impl std::fmt::Display for ControlPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Solves the eight control points for one section view.
#[derive(Debug, Clone, Copy)]
pub struct ControlPointGenerator<'a> {
    view: SectionView<'a>,
    strain: StrainProfileSolver<'a>,
    forces: ForceIntegrator<'a>,
    solver: SolverConfig,
    parallel: bool,
    extreme_tension_depth_mm: f64,
    yield_strain: f64,
    tension_controlled_strain: f64,
}

impl<'a> ControlPointGenerator<'a> {
    /// Create a generator for `view` using the modeling options in `config`.
    ///
    /// Fails with `InvalidSection` if the view carries no reinforcement.
    pub fn new(view: SectionView<'a>, config: &EngineConfig) -> CalcResult<Self> {
        let extreme = view.extreme_tension_layer()?;
        let yield_strain = extreme.yield_strain();
        let tension_controlled_strain = config.tension_control_limit.strain(yield_strain);

        Ok(ControlPointGenerator {
            view,
            strain: StrainProfileSolver::new(view, tension_controlled_strain),
            forces: ForceIntegrator::new(view, config.deduct_displaced_concrete),
            solver: config.solver,
            parallel: config.parallel,
            extreme_tension_depth_mm: extreme.distance_mm,
            yield_strain,
            tension_controlled_strain,
        })
    }

    /// Yield strain εy of the extreme tension layer
    pub fn yield_strain(&self) -> f64 {
        self.yield_strain
    }

    /// Tension-controlled strain limit εtc in effect
    pub fn tension_controlled_strain(&self) -> f64 {
        self.tension_controlled_strain
    }

    /// Solve all eight points, returned in curve order.
    pub fn generate(&self) -> CalcResult<Vec<ForcePoint>> {
        if self.parallel {
            ControlPoint::ALL
                .par_iter()
                .map(|&point| self.solve(point))
                .collect()
        } else {
            ControlPoint::ALL.iter().map(|&point| self.solve(point)).collect()
        }
    }

    /// Solve a single control point
    pub fn solve(&self, point: ControlPoint) -> CalcResult<ForcePoint> {
        let neutral_axis = self.neutral_axis(point)?;
        let profile = self.strain.solve(neutral_axis)?;
        let mut result = self.forces.integrate(&profile).into_point(point);

        match point {
            ControlPoint::PureCompression => result.moment_kn_m = 0.0,
            ControlPoint::PureBending => result.axial_kn = 0.0,
            _ => {}
        }

        log::debug!(
            "{} #{} {}: c = {:?}, Pn = {:.2} kN, Mn = {:.2} kN·m, εt = {:.5}",
            self.view.axis,
            point.index(),
            point,
            neutral_axis,
            result.axial_kn,
            result.moment_kn_m,
            result.net_tensile_strain
        );

        Ok(result)
    }

    /// Neutral axis position that defines `point`
    pub fn neutral_axis(&self, point: ControlPoint) -> CalcResult<NeutralAxis> {
        let eps_cu = self.strain.ultimate_strain();
        let d_t = self.extreme_tension_depth_mm;

        let axis = match point {
            ControlPoint::PureCompression => NeutralAxis::UniformCompression,
            ControlPoint::MaxCompressionMoment => NeutralAxis::Depth(self.view.depth_mm),
            ControlPoint::ZeroTensionStrain => NeutralAxis::Depth(d_t),
            ControlPoint::HalfYieldTension => {
                NeutralAxis::Depth(neutral_axis_for_tensile_strain(eps_cu, d_t, 0.5 * self.yield_strain))
            }
            ControlPoint::Balanced => {
                NeutralAxis::Depth(neutral_axis_for_tensile_strain(eps_cu, d_t, self.yield_strain))
            }
            ControlPoint::TensionControlled => NeutralAxis::Depth(neutral_axis_for_tensile_strain(
                eps_cu,
                d_t,
                self.tension_controlled_strain,
            )),
            ControlPoint::PureBending => NeutralAxis::Depth(self.pure_bending_depth()?),
            ControlPoint::PureTension => NeutralAxis::UniformTension,
        };
        Ok(axis)
    }

    /// Axial force at neutral axis depth `c` (N)
    fn axial_at(&self, c: f64) -> CalcResult<f64> {
        let profile = self.strain.solve(NeutralAxis::Depth(c))?;
        let axial = Kilonewtons(self.forces.integrate(&profile).axial_kn);
        Ok(Newtons::from(axial).value())
    }

    /// Bisection for the depth where the axial force vanishes.
    ///
    /// The bracket runs from a vanishing depth, where every layer is in
    /// tension, up to d_t. Fails with `RootFindingFailure` if the ends do
    /// not straddle zero or the iteration cap is reached first.
    fn pure_bending_depth(&self) -> CalcResult<f64> {
        let tolerance = self.solver.tolerance_n;
        let mut lo = BRACKET_FLOOR_RATIO * self.view.depth_mm;
        let mut hi = self.extreme_tension_depth_mm;

        let p_lo = self.axial_at(lo)?;
        if p_lo.abs() <= tolerance {
            return Ok(lo);
        }
        let p_hi = self.axial_at(hi)?;
        if p_hi.abs() <= tolerance {
            return Ok(hi);
        }
        if p_lo.signum() == p_hi.signum() {
            return Err(CalcError::root_finding_failure(0, p_lo.abs().min(p_hi.abs()) / 1000.0, tolerance / 1000.0));
        }

        let mut residual = p_hi;
        for iteration in 1..=self.solver.max_iterations {
            let mid = 0.5 * (lo + hi);
            residual = self.axial_at(mid)?;
            log::debug!(
                "{} pure bending iteration {}: c = {:.6} mm, P = {:.4} N",
                self.view.axis,
                iteration,
                mid,
                residual
            );

            if residual.abs() <= tolerance {
                return Ok(mid);
            }
            if residual.signum() == p_lo.signum() {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        Err(CalcError::root_finding_failure(
            self.solver.max_iterations,
            residual.abs() / 1000.0,
            tolerance / 1000.0,
        ))
    }
}

/// Check the curve shape: axial non-increasing from point 1 to 8 and moment
/// magnitude rising to a single peak before falling.
///
/// Returns one message per violation.
pub fn sanity_warnings(points: &[ForcePoint]) -> Vec<String> {
    let mut warnings = Vec::new();

    for pair in points.windows(2) {
        if pair[1].axial_kn > pair[0].axial_kn + SANITY_AXIAL_TOLERANCE_KN {
            warnings.push(format!(
                "Axial force increases from point {} ({:.2} kN) to point {} ({:.2} kN)",
                pair[0].control_point.index(),
                pair[0].axial_kn,
                pair[1].control_point.index(),
                pair[1].axial_kn
            ));
        }
    }

    let mut falling = false;
    for pair in points.windows(2) {
        let delta = pair[1].moment_kn_m.abs() - pair[0].moment_kn_m.abs();
        if delta < -SANITY_MOMENT_TOLERANCE_KN_M {
            falling = true;
        } else if falling && delta > SANITY_MOMENT_TOLERANCE_KN_M {
            warnings.push(format!(
                "Moment rises again from point {} ({:.2} kN·m) to point {} ({:.2} kN·m)",
                pair[0].control_point.index(),
                pair[0].moment_kn_m.abs(),
                pair[1].control_point.index(),
                pair[1].moment_kn_m.abs()
            ));
        }
    }

    warnings
}
