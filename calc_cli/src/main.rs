//! # QCKColumn CLI
//!
//! Runs the column engine on a JSON column description and prints the
//! interaction diagrams, adequacy checks and detailing rules.
//!
//! ```text
//! calc_cli --input column.json [--config engine.json] [--json]
//! RUST_LOG=debug calc_cli          # demo column with solver tracing
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use calc_core::calculations::column::{calculate, AxisReport, ColumnDemand, ColumnInput, ColumnResult};
use calc_core::calculations::AdequacyOutcome;
use calc_core::config::EngineConfig;
use calc_core::materials::RebarSize;
use calc_core::{CalcError, CalcResult};
use clap::Parser;
use serde::de::DeserializeOwned;

/// Rectangular tied column P–M interaction check (ACI 318-19, SI units)
#[derive(Parser, Debug)]
#[command(name = "calc_cli")]
#[command(about = "Generate P-M interaction diagrams and check a rectangular tied column")]
struct Args {
    /// Column input JSON file; a demo column is used when omitted
    #[arg(long, short = 'i')]
    input: Option<PathBuf>,

    /// Engine configuration JSON file; defaults apply when omitted
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Print only the JSON result
    #[arg(long)]
    json: bool,

    /// Evaluate control points and axes on the calling thread
    #[arg(long)]
    sequential: bool,
}

fn load_json<T: DeserializeOwned>(path: &Path) -> CalcResult<T> {
    let text = fs::read_to_string(path).map_err(|e| CalcError::SerializationError {
        reason: format!("{}: {}", path.display(), e),
    })?;
    Ok(serde_json::from_str(&text)?)
}

fn demo_column() -> ColumnInput {
    ColumnInput {
        label: "CLI-Demo".to_string(),
        width_mm: 300.0,
        depth_mm: 500.0,
        clear_cover_mm: 40.0,
        main_bar: RebarSize::D25,
        tie_bar: RebarSize::D10,
        bars_along_width: 3,
        bars_along_depth: 3,
        concrete_strength_mpa: 28.0,
        steel_yield_mpa: 420.0,
        demand: Some(ColumnDemand {
            axial_kn: 1200.0,
            moment_major_kn_m: 150.0,
            moment_minor_kn_m: 60.0,
        }),
    }
}

fn run(args: &Args) -> CalcResult<ColumnResult> {
    let input = match &args.input {
        Some(path) => load_json(path)?,
        None => demo_column(),
    };
    let mut config: EngineConfig = match &args.config {
        Some(path) => load_json(path)?,
        None => EngineConfig::default(),
    };
    if args.sequential {
        config.parallel = false;
    }
    log::debug!("Engine configuration: {:?}", config);

    calculate(&input, &config)
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(result) => {
            if !args.json {
                print_report(&result);
                println!();
                println!("Column result (JSON):");
            }
            match serde_json::to_string_pretty(&result) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("Error: {}", e),
            }
            if result.passes() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn print_report(result: &ColumnResult) {
    let m = &result.materials;
    let s = &result.section;

    println!("═══════════════════════════════════════════════════════════");
    println!("  COLUMN INTERACTION RESULTS: {}", result.label);
    println!("═══════════════════════════════════════════════════════════");
    println!();
    println!("Materials:");
    println!("  Ec  = {:.0} MPa   β1 = {:.3}   εcu = {:.4}", m.elasticity_concrete_mpa, m.beta1, m.ultimate_strain);
    println!("  Es  = {:.0} MPa   εy = {:.5}   εtc = {:.5}", m.elasticity_steel_mpa, m.yield_strain, m.tension_controlled_strain);
    println!();
    println!("Section:");
    println!("  Ag  = {:.0} mm²   Ast = {:.0} mm²   ρ = {:.2}%", s.gross_area_mm2, s.steel_area_mm2, s.steel_ratio * 100.0);
    println!(
        "  Bars = {}   s(b) = {}   s(h) = {}",
        s.bar_count,
        format_spacing(s.clear_spacing_width_mm),
        format_spacing(s.clear_spacing_depth_mm)
    );

    print_axis(&result.major);
    print_axis(&result.minor);

    println!();
    println!("Detailing:");
    for (rule, check) in &result.detailing.rules {
        println!(
            "  {:<22} {:>10.4} vs {:>10.4} {} ({})",
            rule.display_name(),
            check.value,
            check.limit,
            status_icon(check.passes),
            rule.reference()
        );
    }

    println!();
    println!("═══════════════════════════════════════════════════════════");
    println!("  RESULT: {}", if result.passes() { "PASS" } else { "FAIL" });
    println!("═══════════════════════════════════════════════════════════");
}

fn print_axis(report: &AxisReport) {
    let diagram = &report.diagram;
    println!();
    println!("{}:", diagram.axis);
    println!("  {:<32} {:>10} {:>10} {:>6} {:>10} {:>10}", "Point", "Pn (kN)", "Mn (kN·m)", "φ", "φPn", "φMn");
    for (nominal, design) in diagram.nominal.iter().zip(&diagram.design) {
        println!(
            "  {:<32} {:>10.1} {:>10.1} {:>6.3} {:>10.1} {:>10.1}{}",
            format!("{}. {}", nominal.control_point.index(), nominal.control_point),
            nominal.axial_kn,
            nominal.moment_kn_m,
            design.phi,
            design.axial_kn,
            design.moment_kn_m,
            if design.axial_capped { " (capped)" } else { "" }
        );
    }
    for warning in &diagram.warnings {
        println!("  warning: {}", warning);
    }

    match &report.adequacy {
        Some(AdequacyOutcome::Evaluated(check)) => {
            println!(
                "  Check: {} ratio {:.3} {}",
                check.summary,
                check.demand_capacity_ratio,
                status_icon(check.passes)
            );
        }
        Some(AdequacyOutcome::CannotEvaluate { error }) => {
            println!("  Check: cannot evaluate - {} {}", error, status_icon(false));
        }
        None => println!("  Check: no factored load"),
    }
}

fn format_spacing(spacing: Option<f64>) -> String {
    spacing.map_or_else(|| "-".to_string(), |s| format!("{:.0} mm", s))
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}
