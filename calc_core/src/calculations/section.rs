//! # Section Model
//!
//! Immutable description of a rectangular column section: concrete outline,
//! concrete strength and the reinforcement layers seen by each bending axis.
//!
//! Layers are measured from the extreme compression fiber of the bending
//! direction they belong to. Major-axis layers run along the section depth
//! `h`; minor-axis layers (optional) run along the width `b`, with the
//! section rotated so `b` becomes the depth.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::section::{BendingAxis, ReinforcementLayer, SectionModel};
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
//! let view = section.view(BendingAxis::Major).unwrap();
//! assert_eq!(view.depth_mm, 500.0);
//! assert_eq!(section.bar_count(), 6);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::{bar_group_area, face_clear_spacing};
use crate::errors::{CalcError, CalcResult};
use crate::materials::{ConcreteMaterial, RebarSize, SteelMaterial};

/// Bending direction selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BendingAxis {
    /// Bending about the major (X) axis; depth is `h`
    Major,
    /// Bending about the minor (Y) axis; depth is `b`
    Minor,
}

impl BendingAxis {
    /// Both axes, major first
    pub const ALL: [BendingAxis; 2] = [BendingAxis::Major, BendingAxis::Minor];

    /// Display name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            BendingAxis::Major => "Major Axis (X)",
            BendingAxis::Minor => "Minor Axis (Y)",
        }
    }
}

impl std::fmt::Display for BendingAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A row of bars at one distance from the compression fiber.
///
/// ## JSON Example
///
/// ```json
/// {
///   "distance_mm": 65.0,
///   "area_mm2": 1472.62,
///   "bar_count": 3,
///   "bar_diameter_mm": 25.0,
///   "yield_strength_mpa": 420.0,
///   "elastic_modulus_mpa": 200000.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReinforcementLayer {
    /// Distance from the extreme compression fiber (mm)
    pub distance_mm: f64,

    /// Total steel area in this layer (mm²)
    pub area_mm2: f64,

    /// Number of bars in this layer
    pub bar_count: u32,

    /// Bar diameter (mm)
    pub bar_diameter_mm: f64,

    /// Yield strength fy (MPa)
    pub yield_strength_mpa: f64,

    /// Modulus of elasticity Es (MPa)
    pub elastic_modulus_mpa: f64,
}

impl ReinforcementLayer {
    /// Build a layer of `count` standard bars
    pub fn bars(distance_mm: f64, count: u32, size: RebarSize, steel: &SteelMaterial) -> Self {
        ReinforcementLayer {
            distance_mm,
            area_mm2: bar_group_area(size.diameter_mm(), count),
            bar_count: count,
            bar_diameter_mm: size.diameter_mm(),
            yield_strength_mpa: steel.fy_mpa,
            elastic_modulus_mpa: steel.es_mpa,
        }
    }

    /// Steel model for this layer
    pub fn steel(&self) -> SteelMaterial {
        SteelMaterial {
            fy_mpa: self.yield_strength_mpa,
            es_mpa: self.elastic_modulus_mpa,
        }
    }

    /// Yield strain εy = fy / Es
    pub fn yield_strain(&self) -> f64 {
        self.yield_strength_mpa / self.elastic_modulus_mpa
    }

    fn validate(&self, index: usize, depth_mm: f64) -> CalcResult<()> {
        let field = |name: &str| format!("layers[{}].{}", index, name);

        if !self.distance_mm.is_finite() || self.distance_mm < 0.0 || self.distance_mm > depth_mm {
            return Err(CalcError::invalid_section(
                field("distance_mm"),
                self.distance_mm.to_string(),
                "Layer must lie within the section depth",
            ));
        }
        if !self.area_mm2.is_finite() || self.area_mm2 <= 0.0 {
            return Err(CalcError::invalid_section(
                field("area_mm2"),
                self.area_mm2.to_string(),
                "Layer area must be positive",
            ));
        }
        if !self.bar_diameter_mm.is_finite() || self.bar_diameter_mm <= 0.0 {
            return Err(CalcError::invalid_section(
                field("bar_diameter_mm"),
                self.bar_diameter_mm.to_string(),
                "Bar diameter must be positive",
            ));
        }
        if self.bar_count == 0 {
            return Err(CalcError::invalid_section(field("bar_count"), "0", "Layer must hold at least one bar"));
        }
        self.steel().validate().map_err(|err| match err {
            CalcError::InvalidSection { field: name, value, reason } => CalcError::InvalidSection {
                field: field(&name),
                value,
                reason,
            },
            other => other,
        })
    }
}

/// Immutable section description, created once per calculation run.
///
/// Fields are read through accessors; deserializing runs the same checks
/// as [`SectionModel::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SectionModelData")]
pub struct SectionModel {
    width_mm: f64,
    depth_mm: f64,
    concrete: ConcreteMaterial,
    major_layers: Vec<ReinforcementLayer>,
    minor_layers: Option<Vec<ReinforcementLayer>>,
    clear_spacing_mm: Option<f64>,
}

/// Wire form of [`SectionModel`], validated on conversion.
#[derive(Debug, Clone, Deserialize)]
struct SectionModelData {
    width_mm: f64,
    depth_mm: f64,
    concrete: ConcreteMaterial,
    major_layers: Vec<ReinforcementLayer>,
    #[serde(default)]
    minor_layers: Option<Vec<ReinforcementLayer>>,
    #[serde(default)]
    clear_spacing_mm: Option<f64>,
}

impl TryFrom<SectionModelData> for SectionModel {
    type Error = CalcError;

    fn try_from(data: SectionModelData) -> CalcResult<Self> {
        let mut section = SectionModel::new(data.width_mm, data.depth_mm, data.concrete, data.major_layers)?;
        if let Some(layers) = data.minor_layers {
            section = section.with_minor_axis_layers(layers)?;
        }
        if let Some(spacing) = data.clear_spacing_mm {
            section = section.with_clear_spacing(spacing)?;
        }
        Ok(section)
    }
}

impl SectionModel {
    /// Create a section with major-axis layers only.
    ///
    /// Fails with `InvalidSection` if width, depth or strengths are not
    /// positive, or if the layers are unsorted, leave the section, or do not
    /// reach both a compression face and a tension face.
    pub fn new(
        width_mm: f64,
        depth_mm: f64,
        concrete: ConcreteMaterial,
        layers: Vec<ReinforcementLayer>,
    ) -> CalcResult<Self> {
        if !width_mm.is_finite() || width_mm <= 0.0 {
            return Err(CalcError::invalid_section("width_mm", width_mm.to_string(), "Width must be positive"));
        }
        if !depth_mm.is_finite() || depth_mm <= 0.0 {
            return Err(CalcError::invalid_section("depth_mm", depth_mm.to_string(), "Depth must be positive"));
        }
        concrete.validate()?;
        validate_layers(&layers, depth_mm)?;

        Ok(SectionModel {
            width_mm,
            depth_mm,
            concrete,
            major_layers: layers,
            minor_layers: None,
            clear_spacing_mm: None,
        })
    }

    /// Attach the layer layout seen when bending about the minor axis.
    ///
    /// Distances are measured along the width `b`.
    pub fn with_minor_axis_layers(mut self, layers: Vec<ReinforcementLayer>) -> CalcResult<Self> {
        validate_layers(&layers, self.width_mm)?;
        self.minor_layers = Some(layers);
        Ok(self)
    }

    /// Override the computed clear spacing with a provided value
    pub fn with_clear_spacing(mut self, clear_spacing_mm: f64) -> CalcResult<Self> {
        if !clear_spacing_mm.is_finite() {
            return Err(CalcError::invalid_section(
                "clear_spacing_mm",
                clear_spacing_mm.to_string(),
                "Clear spacing must be a finite number",
            ));
        }
        self.clear_spacing_mm = Some(clear_spacing_mm);
        Ok(self)
    }

    /// Geometry and layers as seen by one bending axis.
    ///
    /// Fails with `InvalidSection` when the minor axis is requested and no
    /// minor-axis layout was supplied.
    pub fn view(&self, axis: BendingAxis) -> CalcResult<SectionView<'_>> {
        match axis {
            BendingAxis::Major => Ok(SectionView {
                axis,
                width_mm: self.width_mm,
                depth_mm: self.depth_mm,
                concrete: self.concrete,
                layers: &self.major_layers,
            }),
            BendingAxis::Minor => {
                let layers = self.minor_layers.as_deref().ok_or_else(|| {
                    CalcError::invalid_section(
                        "minor_layers",
                        "none",
                        "Minor-axis bending requires a minor-axis layer layout",
                    )
                })?;
                Ok(SectionView {
                    axis,
                    width_mm: self.depth_mm,
                    depth_mm: self.width_mm,
                    concrete: self.concrete,
                    layers,
                })
            }
        }
    }

    /// Section width b (mm)
    pub fn width_mm(&self) -> f64 {
        self.width_mm
    }

    /// Section depth h (mm)
    pub fn depth_mm(&self) -> f64 {
        self.depth_mm
    }

    /// Concrete material
    pub fn concrete(&self) -> ConcreteMaterial {
        self.concrete
    }

    /// Layers for major-axis bending, sorted by distance along `h`
    pub fn major_layers(&self) -> &[ReinforcementLayer] {
        &self.major_layers
    }

    /// Layers for minor-axis bending, sorted by distance along `b`
    pub fn minor_layers(&self) -> Option<&[ReinforcementLayer]> {
        self.minor_layers.as_deref()
    }

    /// Gross concrete area Ag (mm²)
    pub fn gross_area_mm2(&self) -> f64 {
        self.width_mm * self.depth_mm
    }

    /// Total longitudinal steel area (mm²), counted from the major-axis layout
    pub fn steel_area_mm2(&self) -> f64 {
        self.major_layers.iter().map(|layer| layer.area_mm2).sum()
    }

    /// Reinforcement ratio ρ = As / Ag
    pub fn steel_ratio(&self) -> f64 {
        self.steel_area_mm2() / self.gross_area_mm2()
    }

    /// Total number of longitudinal bars
    pub fn bar_count(&self) -> u32 {
        self.major_layers.iter().map(|layer| layer.bar_count).sum()
    }

    /// Largest bar diameter in the section (mm)
    pub fn max_bar_diameter_mm(&self) -> f64 {
        self.major_layers
            .iter()
            .map(|layer| layer.bar_diameter_mm)
            .fold(0.0, f64::max)
    }

    /// Smallest clear spacing between adjacent bars (mm).
    ///
    /// Uses the explicit value when provided. Otherwise takes the smallest
    /// of the gaps between consecutive layers and the gaps between bars
    /// within a layer. Bars in a layer are spread evenly across the face,
    /// with the corner bars at the edge depth of the crossing layout.
    pub fn min_clear_spacing_mm(&self) -> Option<f64> {
        if let Some(spacing) = self.clear_spacing_mm {
            return Some(spacing);
        }
        let minor = self.minor_layers.as_deref().unwrap_or(&[]);
        let major_edge = self.major_layers.first().map(|layer| layer.distance_mm);
        let minor_edge = minor.first().map(|layer| layer.distance_mm).or(major_edge);

        let between = self
            .major_layers
            .windows(2)
            .chain(minor.windows(2))
            .map(|pair| {
                let centre_gap = pair[1].distance_mm - pair[0].distance_mm;
                centre_gap - pair[0].bar_diameter_mm.max(pair[1].bar_diameter_mm)
            });
        let within = in_layer_spacings(&self.major_layers, self.width_mm, minor_edge)
            .chain(in_layer_spacings(minor, self.depth_mm, major_edge));

        between.chain(within).reduce(f64::min)
    }
}

/// Clear gaps between the bars of each layer, spread across `face_mm`
fn in_layer_spacings(
    layers: &[ReinforcementLayer],
    face_mm: f64,
    edge_mm: Option<f64>,
) -> impl Iterator<Item = f64> + '_ {
    layers.iter().filter_map(move |layer| {
        let edge = edge_mm?;
        face_clear_spacing(
            face_mm,
            edge - layer.bar_diameter_mm / 2.0,
            layer.bar_diameter_mm,
            0.0,
            layer.bar_count,
        )
    })
}

fn validate_layers(layers: &[ReinforcementLayer], depth_mm: f64) -> CalcResult<()> {
    if layers.is_empty() {
        return Err(CalcError::invalid_section("layers", "[]", "At least one reinforcement layer is required"));
    }
    for (index, layer) in layers.iter().enumerate() {
        layer.validate(index, depth_mm)?;
    }
    if let Some(index) = layers
        .windows(2)
        .position(|pair| pair[1].distance_mm < pair[0].distance_mm)
    {
        return Err(CalcError::invalid_section(
            format!("layers[{}].distance_mm", index + 1),
            layers[index + 1].distance_mm.to_string(),
            "Layers must be sorted by increasing distance from the compression fiber",
        ));
    }
    match (layers.first(), layers.last()) {
        (Some(near), Some(far)) if far.distance_mm > near.distance_mm => Ok(()),
        _ => Err(CalcError::invalid_section(
            "layers",
            layers.len().to_string(),
            "Reinforcement is required near both the compression and the tension face",
        )),
    }
}

/// One bending direction's reading of a [`SectionModel`].
#[derive(Debug, Clone, Copy)]
pub struct SectionView<'a> {
    /// Axis this view bends about
    pub axis: BendingAxis,
    /// Width perpendicular to the bending direction (mm)
    pub width_mm: f64,
    /// Depth along the bending direction (mm)
    pub depth_mm: f64,
    /// Concrete material
    pub concrete: ConcreteMaterial,
    /// Layers sorted by distance from the compression fiber
    pub layers: &'a [ReinforcementLayer],
}

impl SectionView<'_> {
    /// Extreme tension layer (largest distance from the compression fiber)
    pub fn extreme_tension_layer(&self) -> CalcResult<&ReinforcementLayer> {
        self.layers
            .last()
            .ok_or_else(|| CalcError::invalid_section("layers", "[]", "At least one reinforcement layer is required"))
    }

    /// Centroid depth of the gross section, h / 2 (mm)
    pub fn centroid_mm(&self) -> f64 {
        self.depth_mm / 2.0
    }

    /// Gross concrete area (mm²)
    pub fn gross_area_mm2(&self) -> f64 {
        self.width_mm * self.depth_mm
    }

    /// Total steel area (mm²)
    pub fn steel_area_mm2(&self) -> f64 {
        self.layers.iter().map(|layer| layer.area_mm2).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steel() -> SteelMaterial {
        SteelMaterial::new(420.0)
    }

    fn symmetric_section() -> SectionModel {
        SectionModel::new(
            300.0,
            500.0,
            ConcreteMaterial::new(28.0),
            vec![
                ReinforcementLayer::bars(65.0, 3, RebarSize::D25, &steel()),
                ReinforcementLayer::bars(250.0, 2, RebarSize::D25, &steel()),
                ReinforcementLayer::bars(435.0, 3, RebarSize::D25, &steel()),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_section_totals() {
        let section = symmetric_section();
        assert_eq!(section.bar_count(), 8);
        assert_eq!(section.gross_area_mm2(), 150_000.0);
        assert!((section.steel_area_mm2() - 8.0 * RebarSize::D25.area_mm2()).abs() < 1e-9);
        assert!((section.steel_ratio() - 0.02618).abs() < 1e-5);
    }

    #[test]
    fn test_major_view() {
        let section = symmetric_section();
        let view = section.view(BendingAxis::Major).unwrap();
        assert_eq!(view.depth_mm, 500.0);
        assert_eq!(view.width_mm, 300.0);
        assert_eq!(view.extreme_tension_layer().unwrap().distance_mm, 435.0);
        assert_eq!(view.centroid_mm(), 250.0);
    }

    #[test]
    fn test_minor_view_requires_layout() {
        let section = symmetric_section();
        let err = section.view(BendingAxis::Minor).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SECTION");

        let section = section
            .with_minor_axis_layers(vec![
                ReinforcementLayer::bars(65.0, 3, RebarSize::D25, &steel()),
                ReinforcementLayer::bars(235.0, 3, RebarSize::D25, &steel()),
            ])
            .unwrap();
        let view = section.view(BendingAxis::Minor).unwrap();
        assert_eq!(view.depth_mm, 300.0);
        assert_eq!(view.width_mm, 500.0);
    }

    #[test]
    fn test_invalid_dimensions() {
        let layers = vec![ReinforcementLayer::bars(65.0, 2, RebarSize::D20, &steel())];
        let concrete = ConcreteMaterial::new(28.0);
        assert!(SectionModel::new(0.0, 500.0, concrete, layers.clone()).is_err());
        assert!(SectionModel::new(300.0, -500.0, concrete, layers.clone()).is_err());
        assert!(SectionModel::new(300.0, 500.0, ConcreteMaterial::new(0.0), layers).is_err());
    }

    #[test]
    fn test_empty_layers_rejected() {
        let err = SectionModel::new(300.0, 500.0, ConcreteMaterial::new(28.0), vec![]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SECTION");
    }

    #[test]
    fn test_unsorted_layers_rejected() {
        let err = SectionModel::new(
            300.0,
            500.0,
            ConcreteMaterial::new(28.0),
            vec![
                ReinforcementLayer::bars(435.0, 3, RebarSize::D25, &steel()),
                ReinforcementLayer::bars(65.0, 3, RebarSize::D25, &steel()),
            ],
        )
        .unwrap_err();
        match err {
            CalcError::InvalidSection { field, .. } => assert_eq!(field, "layers[1].distance_mm"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_layer_outside_section_rejected() {
        let result = SectionModel::new(
            300.0,
            500.0,
            ConcreteMaterial::new(28.0),
            vec![ReinforcementLayer::bars(520.0, 2, RebarSize::D20, &steel())],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_non_positive_yield_rejected() {
        let mut layer = ReinforcementLayer::bars(65.0, 2, RebarSize::D20, &steel());
        layer.yield_strength_mpa = 0.0;
        let err = SectionModel::new(300.0, 500.0, ConcreteMaterial::new(28.0), vec![layer]).unwrap_err();
        match err {
            CalcError::InvalidSection { field, .. } => assert_eq!(field, "layers[0].fy_mpa"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_single_face_layers_rejected() {
        let concrete = ConcreteMaterial::new(28.0);
        let err = SectionModel::new(
            300.0,
            500.0,
            concrete,
            vec![ReinforcementLayer::bars(250.0, 4, RebarSize::D25, &steel())],
        )
        .unwrap_err();
        match err {
            CalcError::InvalidSection { field, .. } => assert_eq!(field, "layers"),
            other => panic!("unexpected error: {other:?}"),
        }

        let err = SectionModel::new(
            300.0,
            500.0,
            concrete,
            vec![
                ReinforcementLayer::bars(250.0, 2, RebarSize::D25, &steel()),
                ReinforcementLayer::bars(250.0, 2, RebarSize::D25, &steel()),
            ],
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SECTION");
    }

    #[test]
    fn test_computed_clear_spacing() {
        let section = symmetric_section();
        // Three 25 mm bars across 300 mm with centres 65 mm in:
        // (300 − 2 × 52.5 − 3 × 25) / 2 = 60 mm governs the 160 mm layer gap
        assert_eq!(section.min_clear_spacing_mm(), Some(60.0));

        let section = section.with_clear_spacing(55.0).unwrap();
        assert_eq!(section.min_clear_spacing_mm(), Some(55.0));
    }

    #[test]
    fn test_crowded_layer_fails_spacing() {
        // Seven 25 mm bars on a 200 mm face cannot fit
        let section = SectionModel::new(
            200.0,
            400.0,
            ConcreteMaterial::new(28.0),
            vec![
                ReinforcementLayer::bars(60.0, 7, RebarSize::D25, &steel()),
                ReinforcementLayer::bars(340.0, 7, RebarSize::D25, &steel()),
            ],
        )
        .unwrap();
        let spacing = section.min_clear_spacing_mm().unwrap();
        assert!((spacing - (200.0 - 2.0 * 47.5 - 7.0 * 25.0) / 6.0).abs() < 1e-9);
        assert!(spacing < 0.0);
    }

    #[test]
    fn test_minor_layout_sets_corner_edge() {
        let section = symmetric_section()
            .with_minor_axis_layers(vec![
                ReinforcementLayer::bars(50.0, 3, RebarSize::D25, &steel()),
                ReinforcementLayer::bars(250.0, 3, RebarSize::D25, &steel()),
            ])
            .unwrap();
        // Major layers now span 300 − 2 × 37.5 = 225 mm: (225 − 75) / 2 = 75 mm.
        // Minor layers span 500 − 2 × 52.5 with three bars: (395 − 75) / 2 = 160 mm.
        assert_eq!(section.min_clear_spacing_mm(), Some(75.0));
    }

    #[test]
    fn test_section_serialization() {
        let section = symmetric_section();
        let json = serde_json::to_string(&section).unwrap();
        let roundtrip: SectionModel = serde_json::from_str(&json).unwrap();
        assert_eq!(section, roundtrip);
        assert_eq!(roundtrip.depth_mm(), 500.0);
        assert_eq!(roundtrip.major_layers().len(), 3);
        assert!(roundtrip.minor_layers().is_none());
    }

    #[test]
    fn test_deserialization_validates() {
        let json = r#"{
            "width_mm": 300.0,
            "depth_mm": 500.0,
            "concrete": {"fc_mpa": 28.0},
            "major_layers": []
        }"#;
        let err = serde_json::from_str::<SectionModel>(json).unwrap_err();
        assert!(err.to_string().contains("layers"), "{err}");

        let mut value = serde_json::to_value(symmetric_section()).unwrap();
        value["depth_mm"] = serde_json::json!(-500.0);
        assert!(serde_json::from_value::<SectionModel>(value).is_err());
    }
}
