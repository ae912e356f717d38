//! # Force Integration
//!
//! Converts a strain profile into internal force resultants:
//!
//! ```text
//!    0.85 f'c
//!   ┌────────┐ ─┬─                 Cc = 0.85 f'c b a          at a/2
//!   │████████│  a = β1 c          Fsi = clamp(εi Es, ±fy) Asi at yi
//!   │        │ ─┴─
//!   │        │                    P = Cc + Σ Fsi
//!   │   ●    │  ← yi              M = Cc (h/2 − a/2) + Σ Fsi (h/2 − yi)
//!   └────────┘
//! ```
//!
//! Compression is positive. Moments are taken about the gross-section
//! centroid at h/2.

use serde::{Deserialize, Serialize};

use crate::calculations::control_points::ControlPoint;
use crate::calculations::section::SectionView;
use crate::calculations::strain::{NeutralAxis, StrainProfile};
use crate::equations::stress_block_depth;
use crate::units::{
    KilonewtonMeters, Kilonewtons, Megapascals, Millimeters, NewtonMillimeters, Newtons, SqMillimeters,
};

/// One point on the nominal interaction curve.
///
/// ## JSON Example
///
/// ```json
/// {
///   "control_point": "Balanced",
///   "neutral_axis": { "kind": "Depth", "depth_mm": 255.88 },
///   "axial_kn": 1287.4,
///   "moment_kn_m": 412.9,
///   "net_tensile_strain": 0.0021
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForcePoint {
    /// Control point this state belongs to
    pub control_point: ControlPoint,
    /// Neutral axis of the strain state
    pub neutral_axis: NeutralAxis,
    /// Nominal axial force Pn (kN, compression positive)
    pub axial_kn: f64,
    /// Nominal moment Mn about the centroid (kN·m)
    pub moment_kn_m: f64,
    /// Net tensile strain εt at the extreme tension layer (tension positive)
    pub net_tensile_strain: f64,
}

/// Breakdown of the internal forces for one strain profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionForces {
    /// Neutral axis of the strain state
    pub neutral_axis: NeutralAxis,
    /// Depth of the equivalent stress block a (mm)
    pub stress_block_depth_mm: f64,
    /// Concrete compression resultant Cc (kN)
    pub concrete_force_kn: f64,
    /// Force in each layer (kN), same order as the layers
    pub steel_forces_kn: Vec<f64>,
    /// Resultant axial force (kN)
    pub axial_kn: f64,
    /// Resultant moment about the centroid (kN·m)
    pub moment_kn_m: f64,
    /// Net tensile strain εt (tension positive)
    pub net_tensile_strain: f64,
}

impl SectionForces {
    /// Label these resultants as a control point of the interaction curve
    pub fn into_point(self, control_point: ControlPoint) -> ForcePoint {
        ForcePoint {
            control_point,
            neutral_axis: self.neutral_axis,
            axial_kn: self.axial_kn,
            moment_kn_m: self.moment_kn_m,
            net_tensile_strain: self.net_tensile_strain,
        }
    }
}

/// Integrates concrete and steel stresses over one section view.
#[derive(Debug, Clone, Copy)]
pub struct ForceIntegrator<'a> {
    view: SectionView<'a>,
    deduct_displaced_concrete: bool,
}

impl<'a> ForceIntegrator<'a> {
    /// Create an integrator.
    ///
    /// With `deduct_displaced_concrete`, compression bars inside the stress
    /// block subtract 0.85f'c times their area from the concrete resultant.
    pub fn new(view: SectionView<'a>, deduct_displaced_concrete: bool) -> Self {
        ForceIntegrator {
            view,
            deduct_displaced_concrete,
        }
    }

    /// Integrate a strain profile into axial force and moment.
    pub fn integrate(&self, profile: &StrainProfile) -> SectionForces {
        let view = &self.view;
        let h = view.depth_mm;
        let centroid = Millimeters(view.centroid_mm());
        let block_stress = view.concrete.block_stress();

        let a = match profile.neutral_axis {
            NeutralAxis::UniformCompression => h,
            NeutralAxis::UniformTension => 0.0,
            NeutralAxis::Depth(c) => stress_block_depth(view.concrete.beta1(), c, h),
        };

        // Po uses the net concrete area, so the uniform state always deducts
        let deduct = self.deduct_displaced_concrete
            || matches!(profile.neutral_axis, NeutralAxis::UniformCompression);

        let concrete_force: Newtons = block_stress * (Millimeters(view.width_mm) * Millimeters(a));
        let mut moment: NewtonMillimeters = concrete_force * (centroid - Millimeters(a / 2.0));

        let mut steel_forces = Vec::with_capacity(view.layers.len());
        for (layer, &strain) in view.layers.iter().zip(&profile.layer_strains) {
            let area = SqMillimeters(layer.area_mm2);
            let stress = layer.steel().stress_mpa(strain);
            let mut force = Megapascals(stress) * area;
            if deduct && stress > 0.0 && layer.distance_mm <= a {
                force = force - block_stress * area;
            }
            moment = moment + force * (centroid - Millimeters(layer.distance_mm));
            steel_forces.push(force);
        }

        let steel_total: Newtons = steel_forces.iter().copied().sum();
        let axial: Kilonewtons = (concrete_force + steel_total).into();
        let moment: KilonewtonMeters = moment.into();

        SectionForces {
            neutral_axis: profile.neutral_axis,
            stress_block_depth_mm: a,
            concrete_force_kn: Kilonewtons::from(concrete_force).value(),
            steel_forces_kn: steel_forces
                .into_iter()
                .map(|force| Kilonewtons::from(force).value())
                .collect(),
            axial_kn: axial.value(),
            moment_kn_m: moment.value(),
            net_tensile_strain: profile.net_tensile_strain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::section::{BendingAxis, ReinforcementLayer, SectionModel};
    use crate::calculations::strain::StrainProfileSolver;
    use crate::materials::{ConcreteMaterial, RebarSize, SteelMaterial};
    use approx::assert_relative_eq;

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

    fn forces(section: &SectionModel, axis: NeutralAxis, deduct: bool) -> SectionForces {
        let view = section.view(BendingAxis::Major).unwrap();
        let profile = StrainProfileSolver::new(view, 0.005).solve(axis).unwrap();
        ForceIntegrator::new(view, deduct).integrate(&profile)
    }

    #[test]
    fn test_pure_compression_matches_po() {
        let section = section();
        let result = forces(&section, NeutralAxis::UniformCompression, false);

        let ag = 150_000.0;
        let ast = section.steel_area_mm2();
        let po_kn = (0.85 * 28.0 * (ag - ast) + ast * 420.0_f64.min(200_000.0 * 0.003)) / 1000.0;
        assert_relative_eq!(result.axial_kn, po_kn, max_relative = 1e-12);
        assert!(result.moment_kn_m.abs() < 1e-9);
    }

    #[test]
    fn test_pure_tension() {
        let section = section();
        let result = forces(&section, NeutralAxis::UniformTension, false);
        let expected = -section.steel_area_mm2() * 420.0 / 1000.0;
        assert_relative_eq!(result.axial_kn, expected, max_relative = 1e-12);
        assert_eq!(result.concrete_force_kn, 0.0);
        assert!(result.moment_kn_m.abs() < 1e-9);
    }

    #[test]
    fn test_concrete_block_force() {
        let section = section();
        let result = forces(&section, NeutralAxis::Depth(200.0), false);

        // a = 0.85 × 200 = 170, Cc = 0.85 × 28 × 300 × 170 = 1,213,800 N
        assert_relative_eq!(result.stress_block_depth_mm, 170.0, epsilon = 1e-12);
        assert_relative_eq!(result.concrete_force_kn, 1213.8, epsilon = 1e-9);
    }

    #[test]
    fn test_steel_forces_elastic_and_yielded() {
        let section = section();
        let result = forces(&section, NeutralAxis::Depth(200.0), false);
        let area = 3.0 * RebarSize::D25.area_mm2();

        // Top: ε = 0.003 × 135 / 200 = 0.002025 → 405 MPa (elastic)
        assert_relative_eq!(result.steel_forces_kn[0], 405.0 * area / 1000.0, max_relative = 1e-12);
        // Bottom: ε = −0.003 × 235 / 200 = −0.003525 → −420 MPa (yielded)
        assert_relative_eq!(result.steel_forces_kn[2], -420.0 * area / 1000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_resultants_consistent() {
        let section = section();
        let result = forces(&section, NeutralAxis::Depth(200.0), false);
        let sum: f64 = result.concrete_force_kn + result.steel_forces_kn.iter().sum::<f64>();
        assert_relative_eq!(result.axial_kn, sum, max_relative = 1e-12);
        assert!(result.moment_kn_m > 0.0);
    }

    #[test]
    fn test_block_clipped_to_depth() {
        let section = section();
        let result = forces(&section, NeutralAxis::Depth(800.0), false);
        assert_eq!(result.stress_block_depth_mm, 500.0);
    }

    #[test]
    fn test_displaced_concrete_deduction() {
        let section = section();
        let plain = forces(&section, NeutralAxis::Depth(200.0), false);
        let deducted = forces(&section, NeutralAxis::Depth(200.0), true);

        // Only the top layer (65 mm) sits inside the 170 mm block
        let area = 3.0 * RebarSize::D25.area_mm2();
        let expected_drop = 0.85 * 28.0 * area / 1000.0;
        assert_relative_eq!(plain.axial_kn - deducted.axial_kn, expected_drop, max_relative = 1e-9);
    }

    #[test]
    fn test_into_point_labels() {
        let section = section();
        let point = forces(&section, NeutralAxis::Depth(200.0), false).into_point(ControlPoint::Balanced);
        assert_eq!(point.control_point, ControlPoint::Balanced);
        assert_eq!(point.neutral_axis, NeutralAxis::Depth(200.0));
    }
}
