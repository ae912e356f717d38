//! # Structural Engineering Equations
//!
//! Closed-form formulas used by the column engine, kept in one place so they
//! can be checked against ACI 318-19 directly.
//!
//! ## Modules
//!
//! - [`section`] - Rectangular section geometry and bar layout
//! - [`strain`] - Plane-section strain compatibility
//!
//! ## Sign Conventions
//!
//! - **Axial force**: Positive in compression
//! - **Strain**: Positive in compression (εt is reported tension positive)
//! - **Moment**: Positive when the compression face is the first face (depth 0)
//! - **Depth**: Measured from the extreme compression fiber
//!
//! ## References
//!
//! - ACI 318-19: Building Code Requirements for Structural Concrete
//! - Wight & MacGregor, *Reinforced Concrete: Mechanics and Design*

pub mod section;
pub mod strain;

pub use section::{
    bar_group_area,
    edge_bar_depth,
    effective_depths,
    face_clear_spacing,
    perimeter_bar_count,
    rectangular_area,
    steel_ratio,
};

pub use strain::{
    linear_strain,
    neutral_axis_for_tensile_strain,
    stress_block_depth,
};
