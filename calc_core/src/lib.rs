//! # calc_core - Column Interaction Engine
//!
//! `calc_core` computes axial force–moment (P–M) interaction diagrams for
//! rectangular tied reinforced concrete columns per ACI 318-19 (SI units),
//! checks factored demands against them and evaluates the prescriptive
//! detailing rules. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Deterministic**: Parallel evaluation returns the same values as sequential
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::calculations::{check_adequacy, generate_diagram, BendingAxis, FactoredDemand};
//! use calc_core::calculations::{ReinforcementLayer, SectionModel};
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
//!         ReinforcementLayer::bars(250.0, 2, RebarSize::D25, &steel),
//!         ReinforcementLayer::bars(435.0, 3, RebarSize::D25, &steel),
//!     ],
//! )
//! .unwrap();
//!
//! let diagram = generate_diagram(&section, BendingAxis::Major, &EngineConfig::default()).unwrap();
//! let check = check_adequacy(&diagram, FactoredDemand::new(1200.0, 150.0)).unwrap();
//! assert!(check.passes);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Section model, interaction diagrams, adequacy, detailing
//! - [`materials`] - Concrete, reinforcing steel and bar sizes
//! - [`equations`] - Closed-form section and strain formulas
//! - [`aci_factors`] - ACI 318-19 constants and φ rules
//! - [`config`] - Engine options and solver limits
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod aci_factors;
pub mod calculations;
pub mod config;
pub mod equations;
pub mod errors;
pub mod materials;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{ColumnInput, ColumnResult, InteractionDiagram};
pub use config::EngineConfig;
pub use errors::{CalcError, CalcResult};
