//! # Materials
//!
//! Material definitions for reinforced concrete column design.
//!
//! ## Material Types
//!
//! - **Concrete**: Normal-weight concrete defined by f'c
//! - **Reinforcing steel**: Elastic-perfectly-plastic bars defined by fy and Es
//! - **Rebar sizes**: Standard metric bar diameters
//!
//! ## Example
//!
//! ```rust
//! use calc_core::materials::{ConcreteMaterial, RebarSize, SteelMaterial};
//!
//! let concrete = ConcreteMaterial::new(28.0);
//! let steel = SteelMaterial::new(420.0);
//!
//! println!("Ec = {:.0} MPa, β1 = {:.3}", concrete.elastic_modulus_mpa(), concrete.beta1());
//! println!("εy = {:.4}, As(25) = {:.1} mm²", steel.yield_strain(), RebarSize::D25.area_mm2());
//! ```

pub mod concrete;
pub mod rebar;

pub use concrete::ConcreteMaterial;
pub use rebar::{RebarSize, SteelMaterial};

use serde::{Deserialize, Serialize};

use crate::aci_factors::TensionControlLimit;

/// Derived material properties for reports.
///
/// ## JSON Example
///
/// ```json
/// {
///   "elasticity_concrete_mpa": 24870.06,
///   "beta1": 0.85,
///   "ultimate_strain": 0.003,
///   "elasticity_steel_mpa": 200000.0,
///   "yield_strain": 0.0021,
///   "tension_controlled_strain": 0.005
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialSummary {
    /// Concrete modulus of elasticity Ec (MPa)
    pub elasticity_concrete_mpa: f64,
    /// Stress block depth ratio β1
    pub beta1: f64,
    /// Ultimate concrete strain εcu
    pub ultimate_strain: f64,
    /// Steel modulus of elasticity Es (MPa)
    pub elasticity_steel_mpa: f64,
    /// Steel yield strain εy
    pub yield_strain: f64,
    /// Tension-controlled strain limit εtc
    pub tension_controlled_strain: f64,
}

impl MaterialSummary {
    /// Summarize a concrete/steel pair under a tension-control rule
    pub fn new(concrete: &ConcreteMaterial, steel: &SteelMaterial, limit: TensionControlLimit) -> Self {
        let yield_strain = steel.yield_strain();
        MaterialSummary {
            elasticity_concrete_mpa: concrete.elastic_modulus_mpa(),
            beta1: concrete.beta1(),
            ultimate_strain: concrete.ultimate_strain(),
            elasticity_steel_mpa: steel.es_mpa,
            yield_strain,
            tension_controlled_strain: limit.strain(yield_strain),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_summary() {
        let summary = MaterialSummary::new(
            &ConcreteMaterial::new(21.0),
            &SteelMaterial::new(420.0),
            TensionControlLimit::aci_318_19(),
        );
        assert!((summary.elasticity_concrete_mpa - 21_538.1).abs() < 0.1);
        assert_eq!(summary.beta1, 0.85);
        assert!((summary.tension_controlled_strain - 0.0051).abs() < 1e-12);
    }
}
