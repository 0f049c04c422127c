//! # well_cli
//!
//! Command-line driver for `well_core`.
//!
//! ```text
//! well_cli run case.json [--limits limits.toml] [--decimals 2] [--json]
//! well_cli batch a.json b.json ... [--limits limits.toml]
//! well_cli calc request.json
//! well_cli convert 10000 ft m --kind depth
//! well_cli limits
//! ```
//!
//! Logs go to stderr and honour `RUST_LOG` (default `info`).

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;

use well_core::batch::run_cases;
use well_core::limits::OperationalLimits;
use well_core::well_case::{run_case, CaseReport, WellCase};
use well_core::{CalculationRequest, Quantity, QuantityKind};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "well_cli")]
#[command(about = "Well engineering quantity and geometry calculations")]
#[command(version)]
struct CliArgs {
    #[command(subcommand)]
    command: SubCommand,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Run every calculator over a well case file
    Run {
        /// Path to the case JSON file
        case: PathBuf,
        /// Operational limits TOML (defaults apply when omitted)
        #[arg(long)]
        limits: Option<PathBuf>,
        /// Decimals in the printed summary
        #[arg(long, default_value = "2")]
        decimals: usize,
        /// Print the full report as JSON instead of the summary
        #[arg(long)]
        json: bool,
    },

    /// Run several case files in parallel
    Batch {
        /// Case JSON files
        #[arg(required = true)]
        cases: Vec<PathBuf>,
        #[arg(long)]
        limits: Option<PathBuf>,
    },

    /// Run one calculation request (JSON tagged by "type")
    Calc {
        request: PathBuf,
    },

    /// Convert a value between two units of one kind
    Convert {
        value: f64,
        from: String,
        to: String,
        /// Quantity kind, e.g. depth, pressure, flowrate
        #[arg(long)]
        kind: String,
        #[arg(long, default_value = "4")]
        decimals: usize,
    },

    /// Print the default operational limits as TOML
    Limits,
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    match args.command {
        SubCommand::Run {
            case,
            limits,
            decimals,
            json,
        } => {
            let limits = load_limits(limits.as_deref())?;
            let case = load_case(&case)?;
            let report = run_case(&case, &limits).with_context(|| format!("case '{}' failed", case.meta.name))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_summary(&report, decimals);
            }
        }
        SubCommand::Batch { cases, limits } => {
            let limits = load_limits(limits.as_deref())?;
            let loaded = cases.iter().map(|path| load_case(path)).collect::<Result<Vec<_>>>()?;
            info!(cases = loaded.len(), "running batch");

            let mut failures = 0;
            for (path, result) in cases.iter().zip(run_cases(&loaded, &limits)) {
                match result {
                    Ok(report) => println!(
                        "{}: {} ({} segments, limits {})",
                        path.display(),
                        report.case_name,
                        report.segments.len(),
                        pass_fail(report.all_limits_passed())
                    ),
                    Err(e) => {
                        failures += 1;
                        println!("{}: ERROR [{}] {}", path.display(), e.error_code(), e);
                    }
                }
            }
            if failures > 0 {
                bail!("{failures} of {} cases failed", cases.len());
            }
        }
        SubCommand::Calc { request } => {
            let contents = read(&request)?;
            let request: CalculationRequest =
                serde_json::from_str(&contents).with_context(|| format!("invalid request {}", request.display()))?;
            info!(calc_type = request.calc_type(), "running calculation");
            match request.run() {
                Ok(output) => println!("{}", serde_json::to_string_pretty(&output)?),
                Err(e) => {
                    eprintln!("{}", serde_json::to_string_pretty(&e)?);
                    bail!("{e}");
                }
            }
        }
        SubCommand::Convert {
            value,
            from,
            to,
            kind,
            decimals,
        } => {
            let kind = parse_kind(&kind)?;
            let source = Quantity::new(kind, value, &from)?;
            let target = source.with_unit(&to)?;
            println!("{} = {}", source.format(decimals), target.format(decimals));
        }
        SubCommand::Limits => {
            print!("{}", OperationalLimits::default().to_toml()?);
        }
    }

    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn load_case(path: &Path) -> Result<WellCase> {
    let contents = read(path)?;
    WellCase::from_json(&contents).with_context(|| format!("invalid case file {}", path.display()))
}

fn load_limits(path: Option<&Path>) -> Result<OperationalLimits> {
    match path {
        Some(path) => OperationalLimits::load_from_file(path)
            .with_context(|| format!("invalid limits file {}", path.display())),
        None => Ok(OperationalLimits::default()),
    }
}

/// Match a kind by name, ignoring case, spaces and underscores.
fn parse_kind(name: &str) -> Result<QuantityKind> {
    let wanted: String = name.chars().filter(|c| c.is_alphanumeric()).collect();
    QuantityKind::ALL
        .into_iter()
        .find(|kind| {
            let candidate: String = kind.display_name().chars().filter(|c| c.is_alphanumeric()).collect();
            candidate.eq_ignore_ascii_case(&wanted)
        })
        .with_context(|| format!("unknown quantity kind '{name}'"))
}

fn pass_fail(passed: bool) -> &'static str {
    if passed {
        "PASS"
    } else {
        "FAIL"
    }
}

fn print_summary(report: &CaseReport, d: usize) {
    let rule = "=".repeat(60);
    println!("{rule}");
    println!("  WELL CASE: {}", report.case_name);
    println!("  Run {} at {}", report.run_id, report.generated.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("{rule}");
    println!();

    println!("Geometry:");
    println!("  {:>12} {:>12} {:>10} {:>10} {:>14}", "Top", "Bottom", "Bore", "String OD", "Annulus");
    for segment in &report.segments {
        println!(
            "  {:>12} {:>12} {:>10} {:>10} {:>14}",
            segment.start_depth.format(d),
            segment.end_depth.format(d),
            segment.outer_bore.format(3),
            segment.string_od.map_or_else(|| "-".to_string(), |od| od.format(3)),
            segment.annular_area.format(5),
        );
    }
    let geometry = &report.geometry;
    println!("  Annular volume:  {}", geometry.annular_volume.format(d));
    println!("  String volume:   {}", geometry.string_volume.format(d));
    println!("  Hole volume:     {}", geometry.hole_volume.format(d));
    println!();

    if let Some(last) = report.survey.last() {
        println!("Trajectory:");
        println!("  Stations:        {}", report.survey.len());
        println!("  TVD at last:     {}", last.tvd.format(d));
        println!("  Vertical sect.:  {}", last.vertical_section.format(d));
        println!();
    }

    let hydraulics = &report.hydraulics;
    println!("Hydraulics:");
    println!("  TVD at TD:       {}", hydraulics.tvd_at_total_depth.format(d));
    println!("  Hydrostatic:     {}", hydraulics.hydrostatic_at_total_depth.format(d));
    println!("  String loss:     {}", hydraulics.losses.string_loss.format(d));
    println!("  Annular loss:    {}", hydraulics.losses.annular_loss.format(d));
    if let Some(bit) = hydraulics.bit_pressure_drop {
        println!("  Bit drop:        {}", bit.format(d));
    }
    println!("  Standpipe:       {}", hydraulics.standpipe_pressure.format(d));
    if let Some(ecd) = hydraulics.ecd_at_bit {
        println!("  ECD at bit:      {}", ecd.format(d));
    }
    if let Some(time) = hydraulics.bottoms_up_time {
        println!("  Bottoms up:      {}", time.format(d));
    }
    println!();

    if let Some(mechanics) = &report.mechanics {
        println!("Mechanics:");
        println!("  Buoyed weight:   {}", mechanics.buoyed_string_weight.format(d));
        println!("  Hook load:       {}", mechanics.hook_load.format(d));
        if let Some(force) = mechanics.critical_buckling_force {
            println!("  Buckling force:  {}", force.format(d));
        }
        if let Some(td) = &mechanics.torque_drag {
            println!("  Pick up:         {}", td.pick_up.format(d));
            println!("  Slack off:       {}", td.slack_off.format(d));
            println!("  Surface torque:  {}", td.surface_torque.format(d));
        }
        for casing in &mechanics.casing_safety_factors {
            println!(
                "  {}: burst SF {:.2}, collapse SF {:.2}",
                casing.label,
                casing.burst.fraction(),
                casing.collapse.fraction()
            );
        }
        println!();
    }

    println!("Limit checks:");
    for check in &report.limit_checks {
        match &check.violation {
            Some(violation) => println!("  [FAIL] {}: {}", check.label, violation),
            None => println!("  [PASS] {}", check.label),
        }
    }
    println!();
    println!("{rule}");
    println!("  RESULT: {}", pass_fail(report.all_limits_passed()));
    println!("{rule}");
}
