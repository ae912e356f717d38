//! Normal-weight concrete (ACI 318-19)
//!
//! Derived properties follow ACI 19.2.2 for the modulus of elasticity and
//! Table 22.2.2.4.3 for the stress block depth ratio.

use serde::{Deserialize, Serialize};

use crate::aci_factors::{beta1, ALPHA1, MIN_CONCRETE_STRENGTH_MPA, ULTIMATE_CONCRETE_STRAIN};
use crate::errors::{CalcError, CalcResult};
use crate::units::Megapascals;

/// Concrete defined by its specified compressive strength.
///
/// ## JSON Example
///
/// ```json
/// { "fc_mpa": 28.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConcreteMaterial {
    /// Specified compressive strength f'c (MPa)
    pub fc_mpa: f64,
}

impl ConcreteMaterial {
    /// Create a concrete material from f'c in MPa
    pub fn new(fc_mpa: f64) -> Self {
        ConcreteMaterial { fc_mpa }
    }

    /// Validate the specified strength
    pub fn validate(&self) -> CalcResult<()> {
        if !self.fc_mpa.is_finite() || self.fc_mpa <= 0.0 {
            return Err(CalcError::invalid_section(
                "fc_mpa",
                self.fc_mpa.to_string(),
                "Concrete strength must be positive",
            ));
        }
        if self.fc_mpa < MIN_CONCRETE_STRENGTH_MPA {
            return Err(CalcError::invalid_section(
                "fc_mpa",
                self.fc_mpa.to_string(),
                "Concrete strength must be at least 17 MPa for structural concrete",
            ));
        }
        Ok(())
    }

    /// Modulus of elasticity Ec = 4700 √f'c (MPa)
    pub fn elastic_modulus_mpa(&self) -> f64 {
        4700.0 * self.fc_mpa.sqrt()
    }

    /// Stress block depth ratio β1
    pub fn beta1(&self) -> f64 {
        beta1(self.fc_mpa)
    }

    /// Maximum usable compressive strain εcu
    pub fn ultimate_strain(&self) -> f64 {
        ULTIMATE_CONCRETE_STRAIN
    }

    /// Uniform stress of the equivalent rectangular block, 0.85 f'c
    pub fn block_stress(&self) -> Megapascals {
        Megapascals(ALPHA1 * self.fc_mpa)
    }
}
