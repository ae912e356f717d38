//! # Column Calculation
//!
//! Full strength and detailing check of a rectangular tied column with bars
//! distributed around the perimeter, bending about each principal axis
//! separately (ACI 318-19, SI units).
//!
//! ## Assumptions
//!
//! - Short column: no slenderness magnification
//! - Uniaxial bending checked about each axis independently
//! - Equal bar size all round; corner bars counted on both faces
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::column::{calculate, ColumnDemand, ColumnInput};
//! use calc_core::config::EngineConfig;
//! use calc_core::materials::RebarSize;
//!
//! let input = ColumnInput {
//!     label: "C-1".to_string(),
//!     width_mm: 300.0,
//!     depth_mm: 500.0,
//!     clear_cover_mm: 40.0,
//!     main_bar: RebarSize::D25,
//!     tie_bar: RebarSize::D10,
//!     bars_along_width: 3,
//!     bars_along_depth: 3,
//!     concrete_strength_mpa: 28.0,
//!     steel_yield_mpa: 420.0,
//!     demand: Some(ColumnDemand {
//!         axial_kn: 1200.0,
//!         moment_major_kn_m: 150.0,
//!         moment_minor_kn_m: 60.0,
//!     }),
//! };
//!
//! let result = calculate(&input, &EngineConfig::default()).unwrap();
//! println!("Major: {}", result.major.status());
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::adequacy::{AdequacyOutcome, FactoredDemand, STATUS_NG, STATUS_OK};
use crate::calculations::detailing::{check_detailing, DetailingResult};
use crate::calculations::diagram::{generate_diagram, InteractionDiagram};
use crate::calculations::section::{BendingAxis, ReinforcementLayer, SectionModel};
use crate::config::EngineConfig;
use crate::equations::{
    edge_bar_depth, effective_depths, face_clear_spacing, perimeter_bar_count, rectangular_area, steel_ratio,
};
use crate::errors::{CalcError, CalcResult};
use crate::materials::{ConcreteMaterial, MaterialSummary, RebarSize, SteelMaterial};

/// Factored loads acting on the column.
///
/// ## JSON Example
///
/// ```json
/// { "axial_kn": 1200.0, "moment_major_kn_m": 150.0, "moment_minor_kn_m": 60.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ColumnDemand {
    /// Factored axial force Pu (kN, compression positive)
    pub axial_kn: f64,
    /// Factored moment about the major axis Mux (kN·m)
    #[serde(default)]
    pub moment_major_kn_m: f64,
    /// Factored moment about the minor axis Muy (kN·m)
    #[serde(default)]
    pub moment_minor_kn_m: f64,
}

impl ColumnDemand {
    /// True when every component is zero
    pub fn is_unloaded(&self) -> bool {
        self.axial_kn == 0.0 && self.moment_major_kn_m == 0.0 && self.moment_minor_kn_m == 0.0
    }

    /// Demand on one bending axis
    pub fn for_axis(&self, axis: BendingAxis) -> FactoredDemand {
        match axis {
            BendingAxis::Major => FactoredDemand::new(self.axial_kn, self.moment_major_kn_m),
            BendingAxis::Minor => FactoredDemand::new(self.axial_kn, self.moment_minor_kn_m),
        }
    }
}

/// Input parameters for a rectangular tied column.
///
/// `bars_along_width` bars sit on each face of width `b` and
/// `bars_along_depth` bars on each face of depth `h`, corners included in
/// both counts.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "C-1",
///   "width_mm": 300.0,
///   "depth_mm": 500.0,
///   "clear_cover_mm": 40.0,
///   "main_bar": "25",
///   "tie_bar": "10",
///   "bars_along_width": 3,
///   "bars_along_depth": 3,
///   "concrete_strength_mpa": 28.0,
///   "steel_yield_mpa": 420.0,
///   "demand": { "axial_kn": 1200.0, "moment_major_kn_m": 150.0, "moment_minor_kn_m": 60.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInput {
    /// User label for this column (e.g., "C-1", "Corner Column")
    pub label: String,

    /// Section width b (mm)
    pub width_mm: f64,

    /// Section depth h (mm)
    pub depth_mm: f64,

    /// Clear cover to the ties (mm)
    pub clear_cover_mm: f64,

    /// Longitudinal bar size
    pub main_bar: RebarSize,

    /// Tie bar size
    pub tie_bar: RebarSize,

    /// Bars on each face parallel to the width, corners included
    pub bars_along_width: u32,

    /// Bars on each face parallel to the depth, corners included
    pub bars_along_depth: u32,

    /// Specified concrete strength f'c (MPa)
    pub concrete_strength_mpa: f64,

    /// Reinforcement yield strength fy (MPa)
    pub steel_yield_mpa: f64,

    /// Factored loads; omit for capacity only
    #[serde(default)]
    pub demand: Option<ColumnDemand>,
}

impl ColumnInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.width_mm.is_finite() || self.width_mm <= 0.0 {
            return Err(CalcError::invalid_section(
                "width_mm",
                self.width_mm.to_string(),
                "Width must be positive",
            ));
        }
        if !self.depth_mm.is_finite() || self.depth_mm <= 0.0 {
            return Err(CalcError::invalid_section(
                "depth_mm",
                self.depth_mm.to_string(),
                "Depth must be positive",
            ));
        }
        if !self.clear_cover_mm.is_finite() || self.clear_cover_mm < 0.0 {
            return Err(CalcError::invalid_input(
                "clear_cover_mm",
                self.clear_cover_mm.to_string(),
                "Clear cover cannot be negative",
            ));
        }
        if self.bars_along_width < 2 {
            return Err(CalcError::invalid_input(
                "bars_along_width",
                self.bars_along_width.to_string(),
                "At least two bars are required on each face",
            ));
        }
        if self.bars_along_depth < 2 {
            return Err(CalcError::invalid_input(
                "bars_along_depth",
                self.bars_along_depth.to_string(),
                "At least two bars are required on each face",
            ));
        }

        let edge = self.edge_depth_mm();
        if 2.0 * edge >= self.width_mm.min(self.depth_mm) {
            return Err(CalcError::invalid_input(
                "clear_cover_mm",
                self.clear_cover_mm.to_string(),
                "Cover, ties and bars leave no room between opposite faces",
            ));
        }

        if let Some(demand) = &self.demand {
            for (field, value) in [
                ("demand.axial_kn", demand.axial_kn),
                ("demand.moment_major_kn_m", demand.moment_major_kn_m),
                ("demand.moment_minor_kn_m", demand.moment_minor_kn_m),
            ] {
                if !value.is_finite() {
                    return Err(CalcError::invalid_input(field, value.to_string(), "Load must be a finite number"));
                }
            }
        }
        Ok(())
    }

    /// Concrete material
    pub fn concrete(&self) -> ConcreteMaterial {
        ConcreteMaterial::new(self.concrete_strength_mpa)
    }

    /// Reinforcing steel material
    pub fn steel(&self) -> SteelMaterial {
        SteelMaterial::new(self.steel_yield_mpa)
    }

    /// Depth from a face to the centre of the bars on it, d_c (mm)
    pub fn edge_depth_mm(&self) -> f64 {
        edge_bar_depth(
            self.clear_cover_mm,
            self.main_bar.diameter_mm(),
            self.tie_bar.diameter_mm(),
        )
    }

    /// Face bar depths (d_c, d_t) when bending across `side` (mm)
    pub fn effective_depths_mm(&self, side: f64) -> (f64, f64) {
        effective_depths(
            side,
            self.clear_cover_mm,
            self.main_bar.diameter_mm(),
            self.tie_bar.diameter_mm(),
        )
    }

    /// Total number of longitudinal bars
    pub fn bar_count(&self) -> u32 {
        perimeter_bar_count(self.bars_along_width, self.bars_along_depth)
    }

    /// Clear spacing between bars along the width faces (mm)
    pub fn clear_spacing_along_width_mm(&self) -> Option<f64> {
        face_clear_spacing(
            self.width_mm,
            self.clear_cover_mm,
            self.main_bar.diameter_mm(),
            self.tie_bar.diameter_mm(),
            self.bars_along_width,
        )
    }

    /// Clear spacing between bars along the depth faces (mm)
    pub fn clear_spacing_along_depth_mm(&self) -> Option<f64> {
        face_clear_spacing(
            self.depth_mm,
            self.clear_cover_mm,
            self.main_bar.diameter_mm(),
            self.tie_bar.diameter_mm(),
            self.bars_along_depth,
        )
    }

    /// Build the section model with layer layouts for both axes.
    ///
    /// Bending about the major axis sees the width faces as the extreme
    /// layers with pairs of side bars between them; the minor axis swaps
    /// the roles.
    pub fn section_model(&self) -> CalcResult<SectionModel> {
        self.validate()?;
        let steel = self.steel();

        let major = perimeter_layers(
            self.effective_depths_mm(self.depth_mm),
            self.bars_along_width,
            self.bars_along_depth,
            self.main_bar,
            &steel,
        );
        let minor = perimeter_layers(
            self.effective_depths_mm(self.width_mm),
            self.bars_along_depth,
            self.bars_along_width,
            self.main_bar,
            &steel,
        );

        let section = SectionModel::new(self.width_mm, self.depth_mm, self.concrete(), major)?
            .with_minor_axis_layers(minor)?;

        let spacing = [self.clear_spacing_along_width_mm(), self.clear_spacing_along_depth_mm()]
            .into_iter()
            .flatten()
            .reduce(f64::min);
        match spacing {
            Some(spacing) => section.with_clear_spacing(spacing),
            None => Ok(section),
        }
    }
}

/// Layers along one bending depth: `face_bars` at each extreme, then pairs
/// of side bars evenly spaced between them.
fn perimeter_layers(
    (d_c, d_t): (f64, f64),
    face_bars: u32,
    side_bars: u32,
    size: RebarSize,
    steel: &SteelMaterial,
) -> Vec<ReinforcementLayer> {
    let gaps = side_bars.saturating_sub(1).max(1);
    let pitch = (d_t - d_c) / gaps as f64;

    let mut layers = Vec::with_capacity(side_bars as usize);
    layers.push(ReinforcementLayer::bars(d_c, face_bars, size, steel));
    for i in 1..side_bars.saturating_sub(1) {
        layers.push(ReinforcementLayer::bars(d_c + i as f64 * pitch, 2, size, steel));
    }
    layers.push(ReinforcementLayer::bars(d_t, face_bars, size, steel));
    layers
}

/// Geometry summary for reports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionSummary {
    /// Gross area Ag (mm²)
    pub gross_area_mm2: f64,
    /// Total steel area Ast (mm²)
    pub steel_area_mm2: f64,
    /// Reinforcement ratio ρ
    pub steel_ratio: f64,
    /// Total longitudinal bars
    pub bar_count: u32,
    /// Depth to the face bar centres d_c (mm)
    pub edge_depth_mm: f64,
    /// Clear spacing along the width faces (mm)
    pub clear_spacing_width_mm: Option<f64>,
    /// Clear spacing along the depth faces (mm)
    pub clear_spacing_depth_mm: Option<f64>,
}

impl SectionSummary {
    fn new(input: &ColumnInput, section: &SectionModel) -> Self {
        let gross = rectangular_area(input.width_mm, input.depth_mm);
        SectionSummary {
            gross_area_mm2: gross,
            steel_area_mm2: section.steel_area_mm2(),
            steel_ratio: steel_ratio(section.steel_area_mm2(), gross),
            bar_count: section.bar_count(),
            edge_depth_mm: input.edge_depth_mm(),
            clear_spacing_width_mm: input.clear_spacing_along_width_mm(),
            clear_spacing_depth_mm: input.clear_spacing_along_depth_mm(),
        }
    }
}

/// Diagram and optional demand check for one axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisReport {
    /// Nominal and design interaction curves
    pub diagram: InteractionDiagram,
    /// Demand check; `None` when no factored load was given
    pub adequacy: Option<AdequacyOutcome>,
}

impl AxisReport {
    /// True unless an evaluated check failed or the demand was off the curve
    pub fn passes(&self) -> bool {
        self.adequacy.as_ref().map_or(true, AdequacyOutcome::passes)
    }

    /// "OK", "NG", "N/A" or "No factored load"
    pub fn status(&self) -> &str {
        self.adequacy.as_ref().map_or("No factored load", AdequacyOutcome::status)
    }
}

/// Results from the column calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnResult {
    /// Label copied from the input
    pub label: String,

    /// Derived material properties
    pub materials: MaterialSummary,

    /// Section geometry summary
    pub section: SectionSummary,

    /// Major-axis report
    pub major: AxisReport,

    /// Minor-axis report
    pub minor: AxisReport,

    /// Detailing rules
    pub detailing: DetailingResult,

    /// "OK" or "NG" over all checks
    pub status: String,
}

impl ColumnResult {
    /// Check if both axes and all detailing rules pass
    pub fn passes(&self) -> bool {
        self.major.passes() && self.minor.passes() && self.detailing.passes()
    }

    /// Report for one axis
    pub fn axis(&self, axis: BendingAxis) -> &AxisReport {
        match axis {
            BendingAxis::Major => &self.major,
            BendingAxis::Minor => &self.minor,
        }
    }
}

/// Calculate interaction diagrams, adequacy and detailing for a column.
///
/// # Returns
///
/// * `Ok(ColumnResult)` - Calculation results
/// * `Err(CalcError)` - If inputs are invalid or the pure-bending solve fails
pub fn calculate(input: &ColumnInput, config: &EngineConfig) -> CalcResult<ColumnResult> {
    config.validate()?;
    let section = input.section_model()?;
    let demand = input.demand.filter(|demand| !demand.is_unloaded());
    if demand.is_none() {
        log::info!("{}: no factored load, adequacy checks skipped", input.label);
    }

    let report = |axis: BendingAxis| -> CalcResult<AxisReport> {
        let diagram = generate_diagram(&section, axis, config)?;
        let adequacy = match demand {
            Some(demand) => Some(AdequacyOutcome::evaluate(&diagram, demand.for_axis(axis))?),
            None => None,
        };
        Ok(AxisReport { diagram, adequacy })
    };

    let (major, minor) = if config.parallel {
        rayon::join(|| report(BendingAxis::Major), || report(BendingAxis::Minor))
    } else {
        (report(BendingAxis::Major), report(BendingAxis::Minor))
    };
    let (major, minor) = (major?, minor?);

    let detailing = check_detailing(&section, &config.detailing);
    let materials = MaterialSummary::new(&input.concrete(), &input.steel(), config.tension_control_limit);

    let passes = major.passes() && minor.passes() && detailing.passes();
    log::info!(
        "{}: major {}, minor {}, detailing {}",
        input.label,
        major.status(),
        minor.status(),
        detailing.status
    );

    Ok(ColumnResult {
        label: input.label.clone(),
        materials,
        section: SectionSummary::new(input, &section),
        major,
        minor,
        detailing,
        status: if passes { STATUS_OK } else { STATUS_NG }.to_string(),
    })
}
