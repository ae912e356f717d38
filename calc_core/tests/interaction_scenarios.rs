//! End-to-end checks of the interaction engine on reference columns.

use approx::assert_relative_eq;

use calc_core::aci_factors::TensionControlLimit;
use calc_core::calculations::column::{calculate, ColumnDemand, ColumnInput};
use calc_core::calculations::{
    check_adequacy, check_detailing, generate_diagram, BendingAxis, ControlPoint, DetailingRule, FactoredDemand,
    ReinforcementLayer, SectionModel,
};
use calc_core::config::{DetailingConfig, EngineConfig};
use calc_core::materials::{ConcreteMaterial, RebarSize, SteelMaterial};
use calc_core::CalcError;

/// 300 × 500, f'c 28 MPa, 8 × 25 mm bars (3 / 2 / 3), fy 420, 65 mm to centres
fn reference_section() -> SectionModel {
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

fn reference_column() -> ColumnInput {
    ColumnInput {
        label: "C-REF".to_string(),
        width_mm: 300.0,
        depth_mm: 500.0,
        clear_cover_mm: 42.5,
        main_bar: RebarSize::D25,
        tie_bar: RebarSize::D10,
        bars_along_width: 3,
        bars_along_depth: 3,
        concrete_strength_mpa: 28.0,
        steel_yield_mpa: 420.0,
        demand: None,
    }
}

#[test]
fn reference_column_end_points() {
    let section = reference_section();
    let diagram = generate_diagram(&section, BendingAxis::Major, &EngineConfig::default()).unwrap();
    let ast = section.steel_area_mm2();

    let po = (0.85 * 28.0 * (150_000.0 - ast) + ast * 420.0_f64.min(200_000.0 * 0.003)) / 1000.0;
    assert!(diagram.nominal[0].axial_kn > 0.0);
    assert_relative_eq!(diagram.nominal[0].axial_kn, po, max_relative = 1e-12);
    assert_relative_eq!(diagram.nominal[7].axial_kn, -ast * 420.0 / 1000.0, max_relative = 1e-12);
    assert_eq!(diagram.nominal[6].axial_kn, 0.0);
}

#[test]
fn pure_bending_demand_sits_on_the_curve() {
    let diagram = generate_diagram(&reference_section(), BendingAxis::Major, &EngineConfig::default()).unwrap();
    let (_, design) = diagram.point(ControlPoint::PureBending).unwrap();

    let result = check_adequacy(&diagram, FactoredDemand::new(0.0, design.moment_kn_m)).unwrap();
    assert!(result.passes);
    assert_relative_eq!(result.demand_capacity_ratio, 1.0, epsilon = 1e-12);
}

#[test]
fn axial_force_non_increasing_across_sections() {
    let cases = [
        (300.0, 500.0, 28.0, 420.0, RebarSize::D25),
        (400.0, 400.0, 35.0, 500.0, RebarSize::D20),
        (350.0, 600.0, 60.0, 420.0, RebarSize::D32),
        (250.0, 250.0, 21.0, 280.0, RebarSize::D16),
    ];

    for (b, h, fc, fy, bar) in cases {
        let steel = SteelMaterial::new(fy);
        let section = SectionModel::new(
            b,
            h,
            ConcreteMaterial::new(fc),
            vec![
                ReinforcementLayer::bars(60.0, 3, bar, &steel),
                ReinforcementLayer::bars(h - 60.0, 3, bar, &steel),
            ],
        )
        .unwrap();
        let diagram = generate_diagram(&section, BendingAxis::Major, &EngineConfig::default()).unwrap();

        for pair in diagram.nominal.windows(2) {
            assert!(
                pair[1].axial_kn <= pair[0].axial_kn,
                "{}x{} f'c {}: {:?} -> {:?}",
                b,
                h,
                fc,
                pair[0],
                pair[1]
            );
        }
        assert!(diagram.warnings.is_empty(), "{:?}", diagram.warnings);
    }
}

#[test]
fn asymmetric_layout_end_points() {
    let steel = SteelMaterial::new(420.0);
    let section = SectionModel::new(
        300.0,
        500.0,
        ConcreteMaterial::new(28.0),
        vec![
            ReinforcementLayer::bars(65.0, 4, RebarSize::D25, &steel),
            ReinforcementLayer::bars(435.0, 2, RebarSize::D16, &steel),
        ],
    )
    .unwrap();
    let diagram = generate_diagram(&section, BendingAxis::Major, &EngineConfig::default()).unwrap();

    // Squash load carries no moment, nominal or design
    assert_eq!(diagram.nominal[0].moment_kn_m, 0.0);
    assert_eq!(diagram.design[0].moment_kn_m, 0.0);
    assert!(diagram.design[0].axial_capped);

    // Uniform yield in tension leaves the unbalanced steel couple
    let residual: f64 = section
        .major_layers()
        .iter()
        .map(|layer| -layer.area_mm2 * 420.0 * (250.0 - layer.distance_mm))
        .sum::<f64>()
        / 1e6;
    assert!(residual.abs() > 100.0);
    assert_relative_eq!(diagram.nominal[7].moment_kn_m, residual, max_relative = 1e-12);
    assert_relative_eq!(diagram.nominal[7].axial_kn, -section.steel_area_mm2() * 420.0 / 1000.0, max_relative = 1e-12);

    for pair in diagram.nominal.windows(2) {
        assert!(pair[1].axial_kn <= pair[0].axial_kn, "{:?} -> {:?}", pair[0], pair[1]);
    }
}

#[test]
fn deserialized_section_without_layers_is_rejected() {
    let json = r#"{
        "width_mm": 300.0,
        "depth_mm": 500.0,
        "concrete": {"fc_mpa": 28.0},
        "major_layers": []
    }"#;
    assert!(serde_json::from_str::<SectionModel>(json).is_err());

    let json = serde_json::to_string(&reference_section()).unwrap();
    let section: SectionModel = serde_json::from_str(&json).unwrap();
    assert!(generate_diagram(&section, BendingAxis::Major, &EngineConfig::default()).is_ok());
}

#[test]
fn phi_follows_strain_regions() {
    let diagram = generate_diagram(&reference_section(), BendingAxis::Major, &EngineConfig::default()).unwrap();
    let phi: Vec<f64> = diagram.design.iter().map(|p| p.phi).collect();

    // Points 1-5 are compression controlled, 6-8 tension controlled
    for value in &phi[..4] {
        assert_eq!(*value, 0.65);
    }
    assert_relative_eq!(phi[4], 0.65, epsilon = 1e-9);
    assert_relative_eq!(phi[5], 0.90, epsilon = 1e-9);
    for value in &phi[6..] {
        assert_eq!(*value, 0.90);
    }
}

#[test]
fn diagram_generation_is_idempotent() {
    let section = reference_section();
    let config = EngineConfig::default();
    let first = generate_diagram(&section, BendingAxis::Major, &config).unwrap();
    let second = generate_diagram(&section, BendingAxis::Major, &config).unwrap();
    assert_eq!(first, second);

    let sequential = EngineConfig {
        parallel: false,
        ..EngineConfig::default()
    };
    let third = generate_diagram(&section, BendingAxis::Major, &sequential).unwrap();
    assert_eq!(first, third);
}

#[test]
fn adequacy_bounds_are_inclusive() {
    let diagram = generate_diagram(&reference_section(), BendingAxis::Major, &EngineConfig::default()).unwrap();
    let top = diagram.design[0].axial_kn;
    let bottom = diagram.design[7].axial_kn;

    assert!(check_adequacy(&diagram, FactoredDemand::new(top, 0.0)).is_ok());
    assert!(check_adequacy(&diagram, FactoredDemand::new(bottom, 0.0)).is_ok());

    for axial in [top + 1.0, bottom - 1.0] {
        match check_adequacy(&diagram, FactoredDemand::new(axial, 0.0)) {
            Err(CalcError::OutOfRangeAxialForce { min_kn, max_kn, .. }) => {
                assert_eq!(min_kn, bottom);
                assert_eq!(max_kn, top);
            }
            other => panic!("expected out of range, got {other:?}"),
        }
    }
}

#[test]
fn demand_above_nominal_squash_load_is_out_of_range() {
    let diagram = generate_diagram(&reference_section(), BendingAxis::Major, &EngineConfig::default()).unwrap();
    let po = diagram.nominal[0].axial_kn;
    let err = check_adequacy(&diagram, FactoredDemand::new(po + 10.0, 0.0)).unwrap_err();
    assert_eq!(err.error_code(), "OUT_OF_RANGE_AXIAL_FORCE");
}

#[test]
fn tiny_iteration_cap_fails_closed() {
    let mut config = EngineConfig::default();
    config.solver.max_iterations = 3;
    let err = generate_diagram(&reference_section(), BendingAxis::Major, &config).unwrap_err();
    assert!(matches!(err, CalcError::RootFindingFailure { iterations: 3, .. }));
}

#[test]
fn displaced_concrete_lowers_intermediate_capacity() {
    let section = reference_section();
    let plain = generate_diagram(&section, BendingAxis::Major, &EngineConfig::default()).unwrap();
    let deducted = generate_diagram(
        &section,
        BendingAxis::Major,
        &EngineConfig {
            deduct_displaced_concrete: true,
            ..EngineConfig::default()
        },
    )
    .unwrap();

    assert_eq!(plain.nominal[0].axial_kn, deducted.nominal[0].axial_kn);
    for i in 1..6 {
        assert!(
            deducted.nominal[i].axial_kn < plain.nominal[i].axial_kn,
            "point {}",
            i + 1
        );
    }
    assert_eq!(plain.nominal[7].axial_kn, deducted.nominal[7].axial_kn);
}

#[test]
fn aci_318_19_limit_shifts_tension_controlled_point() {
    let section = reference_section();
    let config = EngineConfig {
        tension_control_limit: TensionControlLimit::aci_318_19(),
        ..EngineConfig::default()
    };
    let diagram = generate_diagram(&section, BendingAxis::Major, &config).unwrap();

    assert_relative_eq!(diagram.tension_controlled_strain, 0.0051, epsilon = 1e-12);
    assert_relative_eq!(diagram.nominal[5].net_tensile_strain, 0.0051, epsilon = 1e-12);
    assert_relative_eq!(diagram.design[5].phi, 0.90, epsilon = 1e-9);
}

#[test]
fn low_steel_ratio_fails_only_minimum_rule() {
    let steel = SteelMaterial::new(420.0);
    let section = SectionModel::new(
        400.0,
        400.0,
        ConcreteMaterial::new(28.0),
        vec![
            ReinforcementLayer::bars(60.0, 2, RebarSize::D16, &steel),
            ReinforcementLayer::bars(340.0, 2, RebarSize::D16, &steel),
        ],
    )
    .unwrap();
    let result = check_detailing(&section, &DetailingConfig::default());
    assert_eq!(result.failures(), vec![DetailingRule::SteelRatioMinimum]);
}

#[test]
fn column_pipeline_checks_both_axes() {
    let mut input = reference_column();
    input.demand = Some(ColumnDemand {
        axial_kn: 800.0,
        moment_major_kn_m: 200.0,
        moment_minor_kn_m: 100.0,
    });
    let result = calculate(&input, &EngineConfig::default()).unwrap();

    assert_eq!(result.major.diagram.axis, BendingAxis::Major);
    assert_eq!(result.minor.diagram.axis, BendingAxis::Minor);
    assert!(result.major.passes());
    assert!(result.minor.passes());
    assert!(result.detailing.passes());

    // Same bars, shallower lever arm about the minor axis
    let major = result.major.diagram.design_moment_at(800.0).unwrap();
    let minor = result.minor.diagram.design_moment_at(800.0).unwrap();
    assert!(minor < major);

    // Major-axis layout reproduces the reference section exactly
    let reference = generate_diagram(&reference_section(), BendingAxis::Major, &EngineConfig::default()).unwrap();
    for (a, b) in result.major.diagram.nominal.iter().zip(&reference.nominal) {
        assert_relative_eq!(a.axial_kn, b.axial_kn, max_relative = 1e-12, epsilon = 1e-9);
        assert_relative_eq!(a.moment_kn_m, b.moment_kn_m, max_relative = 1e-12, epsilon = 1e-9);
    }
}

#[test]
fn overloaded_minor_axis_fails_column() {
    let mut input = reference_column();
    input.demand = Some(ColumnDemand {
        axial_kn: 800.0,
        moment_major_kn_m: 50.0,
        moment_minor_kn_m: 400.0,
    });
    let result = calculate(&input, &EngineConfig::default()).unwrap();
    assert!(result.major.passes());
    assert!(!result.minor.passes());
    assert_eq!(result.status, "NG");
}

#[test]
fn column_result_serializes() {
    let mut input = reference_column();
    input.demand = Some(ColumnDemand {
        axial_kn: 800.0,
        moment_major_kn_m: 200.0,
        moment_minor_kn_m: 100.0,
    });
    let result = calculate(&input, &EngineConfig::default()).unwrap();
    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("\"PureBending\""));
    assert!(json.contains("\"outcome\":\"Evaluated\""));
    assert!(json.contains("\"SteelRatioMinimum\""));
}
