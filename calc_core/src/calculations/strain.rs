//! # Strain Profile Solver
//!
//! Derives the linear strain at every reinforcement layer and at both
//! extreme fibers for a given neutral axis position. Compression strain is
//! positive; the net tensile strain εt at the extreme tension layer is
//! reported tension positive because it drives the φ factor.

use serde::{Deserialize, Serialize};

use crate::calculations::section::SectionView;
use crate::equations::linear_strain;
use crate::errors::{CalcError, CalcResult};

/// Neutral axis position for a strain state.
///
/// The two uniform states replace the "infinite depth" sentinels: the whole
/// section is at one strain and no curvature exists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "depth_mm")]
pub enum NeutralAxis {
    /// Entire section at the ultimate concrete strain
    UniformCompression,
    /// Finite depth `c` from the extreme compression fiber (mm)
    Depth(f64),
    /// Entire section in tension beyond yield
    UniformTension,
}

impl NeutralAxis {
    /// Finite depth, if any
    pub fn depth_mm(&self) -> Option<f64> {
        match self {
            NeutralAxis::Depth(c) => Some(*c),
            _ => None,
        }
    }
}

/// Strain state of one section view. Ephemeral: recomputed per control point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrainProfile {
    /// Neutral axis that produced this profile
    pub neutral_axis: NeutralAxis,

    /// Strain at each layer, same order as the section layers (compression +)
    pub layer_strains: Vec<f64>,

    /// Strain at the extreme compression fiber
    pub compression_fiber_strain: f64,

    /// Strain at the opposite face
    pub far_fiber_strain: f64,

    /// Net tensile strain εt at the extreme tension layer (tension +)
    pub net_tensile_strain: f64,
}

/// Plane-sections strain solver for one section view.
#[derive(Debug, Clone, Copy)]
pub struct StrainProfileSolver<'a> {
    view: SectionView<'a>,
    ultimate_strain: f64,
    tension_controlled_strain: f64,
}

impl<'a> StrainProfileSolver<'a> {
    /// Create a solver for `view`.
    ///
    /// `tension_controlled_strain` sets the strain magnitude of the uniform
    /// tension state: each layer sits at `−max(εy, εtc)`.
    pub fn new(view: SectionView<'a>, tension_controlled_strain: f64) -> Self {
        StrainProfileSolver {
            view,
            ultimate_strain: view.concrete.ultimate_strain(),
            tension_controlled_strain,
        }
    }

    /// Ultimate concrete strain εcu used by this solver
    pub fn ultimate_strain(&self) -> f64 {
        self.ultimate_strain
    }

    /// Compute the strain profile for `neutral_axis`.
    ///
    /// Fails with `InvalidGeometry` for a finite depth that is exactly zero
    /// or not a finite number.
    pub fn solve(&self, neutral_axis: NeutralAxis) -> CalcResult<StrainProfile> {
        let layers = self.view.layers;
        let eps_cu = self.ultimate_strain;
        let h = self.view.depth_mm;

        let (layer_strains, compression_fiber_strain, far_fiber_strain) = match neutral_axis {
            NeutralAxis::UniformCompression => (vec![eps_cu; layers.len()], eps_cu, eps_cu),
            NeutralAxis::UniformTension => {
                let strains: Vec<f64> = layers
                    .iter()
                    .map(|layer| -layer.yield_strain().max(self.tension_controlled_strain))
                    .collect();
                let fiber = strains.iter().copied().fold(0.0, f64::min);
                (strains, fiber, fiber)
            }
            NeutralAxis::Depth(c) => {
                if !c.is_finite() {
                    return Err(CalcError::invalid_geometry(c, "Neutral axis depth must be finite"));
                }
                if c == 0.0 {
                    return Err(CalcError::invalid_geometry(
                        c,
                        "Neutral axis depth of zero has no defined curvature",
                    ));
                }
                let strains = layers
                    .iter()
                    .map(|layer| linear_strain(eps_cu, c, layer.distance_mm))
                    .collect();
                (strains, eps_cu, linear_strain(eps_cu, c, h))
            }
        };

        let net_tensile_strain = -layer_strains.last().copied().unwrap_or(0.0);

        Ok(StrainProfile {
            neutral_axis,
            layer_strains,
            compression_fiber_strain,
            far_fiber_strain,
            net_tensile_strain,
        })
    }
}
