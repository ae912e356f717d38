//! # Interaction Diagram
//!
//! Assembles the nominal and design P–M curves for one bending axis and
//! answers "what moment can the section carry at this axial force?".
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::diagram::generate_diagram;
//! use calc_core::calculations::section::{BendingAxis, ReinforcementLayer, SectionModel};
//! use calc_core::config::EngineConfig;
//! use calc_core::materials::{ConcreteMaterial, RebarSize, SteelMaterial};
//!
//! let steel = SteelMaterial::new(420.0);
//! let section = SectionModel::new(
//!     300.0,
//!     500.0,
//!     ConcreteMaterial::new(28.0),
//!     vec![
//!         ReinforcementLayer::bars(65.0, 3, RebarSize::D25, &steel),
//!         ReinforcementLayer::bars(435.0, 3, RebarSize::D25, &steel),
//!     ],
//! )
//! .unwrap();
//!
//! let diagram = generate_diagram(&section, BendingAxis::Major, &EngineConfig::default()).unwrap();
//! assert_eq!(diagram.nominal.len(), 8);
//! let capacity = diagram.design_moment_at(0.0).unwrap();
//! assert!(capacity > 0.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::control_points::{sanity_warnings, ControlPoint, ControlPointGenerator};
use crate::calculations::forces::ForcePoint;
use crate::calculations::reduction::{DesignPoint, StrengthReductionMapper};
use crate::calculations::section::{BendingAxis, SectionModel};
use crate::config::EngineConfig;
use crate::errors::{CalcError, CalcResult};

/// A vertex of a P–M polyline
pub trait CurvePoint {
    /// Axial force (kN, compression positive)
    fn axial_kn(&self) -> f64;
    /// Moment (kN·m)
    fn moment_kn_m(&self) -> f64;
}

impl CurvePoint for ForcePoint {
    fn axial_kn(&self) -> f64 {
        self.axial_kn
    }

    fn moment_kn_m(&self) -> f64 {
        self.moment_kn_m
    }
}

impl CurvePoint for DesignPoint {
    fn axial_kn(&self) -> f64 {
        self.axial_kn
    }

    fn moment_kn_m(&self) -> f64 {
        self.moment_kn_m
    }
}

/// Smallest and largest axial force on a polyline (kN)
pub fn axial_range<P: CurvePoint>(points: &[P]) -> (f64, f64) {
    points.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
        (lo.min(p.axial_kn()), hi.max(p.axial_kn()))
    })
}

/// Moment on a polyline at `axial_kn`.
///
/// Every segment whose end points bracket the target contributes a linearly
/// interpolated moment and the one with the largest magnitude is returned.
/// Flat segments contribute both end moments. A target equal to a vertex
/// returns that vertex's stored moment.
///
/// Fails with `OutOfRangeAxialForce` outside the polyline's axial range and
/// `InvalidInput` for a non-finite target.
pub fn interpolate_moment<P: CurvePoint>(points: &[P], axial_kn: f64) -> CalcResult<f64> {
    if !axial_kn.is_finite() {
        return Err(CalcError::invalid_input(
            "axial_kn",
            axial_kn.to_string(),
            "Axial force must be a finite number",
        ));
    }
    let (min_kn, max_kn) = axial_range(points);
    if points.is_empty() || axial_kn < min_kn || axial_kn > max_kn {
        return Err(CalcError::out_of_range_axial(axial_kn, min_kn, max_kn));
    }

    let mut best: Option<f64> = None;
    let mut consider = |moment: f64| {
        if best.map_or(true, |current| moment.abs() > current.abs()) {
            best = Some(moment);
        }
    };

    for point in points.iter().filter(|p| p.axial_kn() == axial_kn) {
        consider(point.moment_kn_m());
    }

    for pair in points.windows(2) {
        let (p0, p1) = (pair[0].axial_kn(), pair[1].axial_kn());
        let (m0, m1) = (pair[0].moment_kn_m(), pair[1].moment_kn_m());
        if axial_kn < p0.min(p1) || axial_kn > p0.max(p1) || axial_kn == p0 || axial_kn == p1 {
            continue;
        }
        let t = (axial_kn - p0) / (p1 - p0);
        consider(m0 + t * (m1 - m0));
    }

    best.ok_or_else(|| CalcError::out_of_range_axial(axial_kn, min_kn, max_kn))
}

/// Nominal and design P–M curves for one bending axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionDiagram {
    /// Axis these curves belong to
    pub axis: BendingAxis,

    /// Yield strain εy of the extreme tension layer
    pub yield_strain: f64,

    /// Tension-controlled strain limit εtc
    pub tension_controlled_strain: f64,

    /// Nominal points, control point 1 through 8
    pub nominal: Vec<ForcePoint>,

    /// Design points, same order as `nominal`
    pub design: Vec<DesignPoint>,

    /// Curve shape warnings from the post-generation check
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl InteractionDiagram {
    /// Design moment capacity φMn at a design axial force (kN·m)
    pub fn design_moment_at(&self, axial_kn: f64) -> CalcResult<f64> {
        interpolate_moment(&self.design, axial_kn)
    }

    /// Nominal moment capacity Mn at a nominal axial force (kN·m)
    pub fn nominal_moment_at(&self, axial_kn: f64) -> CalcResult<f64> {
        interpolate_moment(&self.nominal, axial_kn)
    }

    /// Design axial range (min, max) in kN
    pub fn design_axial_range(&self) -> (f64, f64) {
        axial_range(&self.design)
    }

    /// Nominal and design values for one control point
    pub fn point(&self, control_point: ControlPoint) -> Option<(&ForcePoint, &DesignPoint)> {
        let index = control_point.index() - 1;
        Some((self.nominal.get(index)?, self.design.get(index)?))
    }
}

/// Build the interaction diagram for one axis of `section`.
///
/// Fails with `InvalidSection` when the minor axis is requested without a
/// minor-axis layout, and with `RootFindingFailure` when the pure-bending
/// solve does not converge.
pub fn generate_diagram(
    section: &SectionModel,
    axis: BendingAxis,
    config: &EngineConfig,
) -> CalcResult<InteractionDiagram> {
    config.validate()?;
    let view = section.view(axis)?;
    let generator = ControlPointGenerator::new(view, config)?;

    let nominal = generator.generate()?;
    let warnings = sanity_warnings(&nominal);
    for warning in &warnings {
        log::warn!("{}: {}", axis, warning);
    }

    let po_kn = nominal
        .first()
        .map(|point| point.axial_kn)
        .ok_or_else(|| CalcError::invalid_section("layers", "[]", "No control points generated"))?;
    let mapper = StrengthReductionMapper::new(
        generator.yield_strain(),
        generator.tension_controlled_strain(),
        po_kn,
    );
    let design = mapper.apply_all(&nominal);

    log::info!(
        "{}: Po = {:.1} kN, φPn,max = {:.1} kN, Pt = {:.1} kN",
        axis,
        po_kn,
        mapper.axial_cap_kn(),
        nominal.last().map_or(0.0, |point| point.axial_kn)
    );

    Ok(InteractionDiagram {
        axis,
        yield_strain: generator.yield_strain(),
        tension_controlled_strain: generator.tension_controlled_strain(),
        nominal,
        design,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::section::ReinforcementLayer;
    use crate::materials::{ConcreteMaterial, RebarSize, SteelMaterial};

    #[derive(Debug, Clone, Copy)]
    struct Vertex(f64, f64);

    impl CurvePoint for Vertex {
        fn axial_kn(&self) -> f64 {
            self.0
        }
        fn moment_kn_m(&self) -> f64 {
            self.1
        }
    }

    fn section() -> SectionModel {
        let steel = SteelMaterial::new(420.0);
        SectionModel::new(
            300.0,
            500.0,
            ConcreteMaterial::new(28.0),
            vec![
                ReinforcementLayer::bars(65.0, 3, RebarSize::D25, &steel),
                ReinforcementLayer::bars(250.0, 2, RebarSize::D25, &steel),
                ReinforcementLayer::bars(435.0, 3, RebarSize::D25, &steel),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_interpolate_linear() {
        let curve = [Vertex(100.0, 0.0), Vertex(50.0, 40.0), Vertex(0.0, 60.0)];
        assert!((interpolate_moment(&curve, 75.0).unwrap() - 20.0).abs() < 1e-12);
        assert!((interpolate_moment(&curve, 25.0).unwrap() - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_interpolate_exact_vertex() {
        let curve = [Vertex(100.0, 0.0), Vertex(33.3, 41.7), Vertex(0.0, 60.0)];
        assert_eq!(interpolate_moment(&curve, 33.3).unwrap(), 41.7);
        assert_eq!(interpolate_moment(&curve, 0.0).unwrap(), 60.0);
    }

    #[test]
    fn test_interpolate_flat_segment_takes_envelope() {
        let curve = [Vertex(80.0, 0.0), Vertex(80.0, 30.0), Vertex(40.0, 50.0)];
        assert_eq!(interpolate_moment(&curve, 80.0).unwrap(), 30.0);
    }

    #[test]
    fn test_interpolate_out_of_range() {
        let curve = [Vertex(100.0, 0.0), Vertex(-50.0, 0.0)];
        let err = interpolate_moment(&curve, 101.0).unwrap_err();
        assert_eq!(err.error_code(), "OUT_OF_RANGE_AXIAL_FORCE");
        assert!(interpolate_moment(&curve, -51.0).is_err());

        let err = interpolate_moment(&curve, f64::NAN).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_generate_diagram_structure() {
        let diagram = generate_diagram(&section(), BendingAxis::Major, &EngineConfig::default()).unwrap();
        assert_eq!(diagram.nominal.len(), 8);
        assert_eq!(diagram.design.len(), 8);
        assert!(diagram.warnings.is_empty());
        assert_eq!(diagram.axis, BendingAxis::Major);

        let (nominal, design) = diagram.point(ControlPoint::PureCompression).unwrap();
        assert!(design.axial_capped);
        assert!((design.axial_kn - 0.52 * nominal.axial_kn).abs() < 1e-9);
    }

    #[test]
    fn test_design_range_matches_end_points() {
        let diagram = generate_diagram(&section(), BendingAxis::Major, &EngineConfig::default()).unwrap();
        let (min_kn, max_kn) = diagram.design_axial_range();
        assert_eq!(max_kn, diagram.design[0].axial_kn);
        assert_eq!(min_kn, diagram.design[7].axial_kn);
    }

    #[test]
    fn test_minor_axis_without_layout() {
        let err = generate_diagram(&section(), BendingAxis::Minor, &EngineConfig::default()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SECTION");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = EngineConfig::default();
        config.solver.tolerance_n = -1.0;
        let err = generate_diagram(&section(), BendingAxis::Major, &config).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }
}
