//! # Structural Calculations
//!
//! The column interaction engine, built as a pipeline of small pure stages:
//!
//! ```text
//! SectionModel ─► StrainProfileSolver ─► ForceIntegrator ─► ControlPointGenerator
//!                                                                 │
//!     AdequacyChecker ◄── InteractionDiagram ◄── StrengthReductionMapper
//! ```
//!
//! Each user-facing calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input, config) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`column`] - Rectangular tied column: P–M diagrams, adequacy, detailing
//! - [`diagram`] - Interaction diagram for any [`section::SectionModel`]
//! - [`detailing`] - Prescriptive reinforcement rules

pub mod adequacy;
pub mod column;
pub mod control_points;
pub mod detailing;
pub mod diagram;
pub mod forces;
pub mod reduction;
pub mod section;
pub mod strain;

// Re-export commonly used types
pub use adequacy::{check_adequacy, AdequacyOutcome, AdequacyResult, FactoredDemand};
pub use column::{ColumnDemand, ColumnInput, ColumnResult};
pub use control_points::ControlPoint;
pub use detailing::{check_detailing, DetailingResult, DetailingRule};
pub use diagram::{generate_diagram, InteractionDiagram};
pub use forces::ForcePoint;
pub use reduction::DesignPoint;
pub use section::{BendingAxis, ReinforcementLayer, SectionModel};
pub use strain::NeutralAxis;
