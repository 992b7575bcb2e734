use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use core_game::{resolve_attack_outcome, Character, Session, TracingReporter, START_HEALTH};
use duel_core::{
    discover_scenarios, run_scenario, DuelReport, DuelStatus, RunOptions, ScenarioConfig,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Resolve attacks against a character and report the outcome")]
struct Cli {
    /// Tracing filter, e.g. `core_game=debug`. Falls back to RUST_LOG.
    #[arg(long, global = true)]
    log_filter: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve one attack and print the resulting health.
    Attack(AttackArgs),
    /// Play a scenario file and emit a JSON report.
    Run(RunArgs),
    /// Play every scenario under a directory.
    Batch(BatchArgs),
    /// Pretty-print an existing report.
    Report(ReportArgs),
}

#[derive(Args)]
struct AttackArgs {
    #[arg(long, allow_negative_numbers = true)]
    damage: i32,
    #[arg(long, default_value_t = START_HEALTH, allow_negative_numbers = true)]
    health: i32,
    #[arg(long)]
    defending: bool,
    #[arg(long)]
    charged: bool,
    #[arg(long)]
    invincible: bool,
    /// Resolve as if the game were not running.
    #[arg(long)]
    paused: bool,
}

#[derive(Args)]
struct RunArgs {
    #[arg(long, default_value = "scenarios/plain_hit.toml")]
    config: PathBuf,
    #[arg(long)]
    id: Option<String>,
}

#[derive(Args)]
struct BatchArgs {
    #[arg(long, default_value = "scenarios")]
    dir: PathBuf,
    /// Directory receiving one JSON report per scenario.
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

#[derive(Args)]
struct ReportArgs {
    #[arg(long)]
    input: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Attack(args) => {
            init_tracing(cli.log_filter.as_deref());
            handle_attack(args)
        }
        Commands::Run(args) => handle_run(args, cli.log_filter.as_deref()),
        Commands::Batch(args) => {
            init_tracing(cli.log_filter.as_deref());
            handle_batch(args)
        }
        Commands::Report(args) => {
            init_tracing(cli.log_filter.as_deref());
            handle_report(args)
        }
    }
}

fn init_tracing(filter: Option<&str>) {
    let filter = match filter {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .ok();
}

fn default_run_id() -> String {
    format!("run-{}", Utc::now().format("%Y%m%dT%H%M%S"))
}

fn handle_attack(args: AttackArgs) -> Result<()> {
    let session = Session {
        is_game_running: !args.paused,
        is_computers_turn: false,
    };
    let mut character = Character::with_health(args.health)
        .defending(args.defending)
        .charged(args.charged)
        .invincible(args.invincible);

    let outcome =
        resolve_attack_outcome(&session, &mut character, args.damage, &mut TracingReporter);
    println!("{} -> health {}", outcome.label(), character.health);
    Ok(())
}

fn handle_run(args: RunArgs, log_filter: Option<&str>) -> Result<()> {
    let config = ScenarioConfig::from_path(&args.config)?;

    let telemetry = config.telemetry.clone().unwrap_or_default();
    if log_filter.is_some() || telemetry.trace_enabled() {
        init_tracing(log_filter.or(telemetry.trace_filter.as_deref()));
    }

    let run_id = args.id.unwrap_or_else(default_run_id);
    let options = RunOptions::new(run_id).with_path(&args.config);
    let report = run_scenario(&config, &options, &mut TracingReporter)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    if let Some(report_cfg) = config.report.as_ref() {
        report.write_to(&report_cfg.path)?;
        println!("Report written to {}", report_cfg.path.display());
    }

    Ok(())
}

fn handle_batch(args: BatchArgs) -> Result<()> {
    let scenarios = discover_scenarios(&args.dir)?;
    if scenarios.is_empty() {
        println!("No scenarios under {}", args.dir.display());
        return Ok(());
    }

    let batch_id = default_run_id();
    let mut defeated = 0;
    for path in &scenarios {
        let config = ScenarioConfig::from_path(path)?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let options = RunOptions::new(format!("{batch_id}-{stem}")).with_path(path);
        let report = run_scenario(&config, &options, &mut TracingReporter)
            .with_context(|| format!("scenario {} failed", path.display()))?;
        if report.summary.status == DuelStatus::Defeated {
            defeated += 1;
        }
        println!("{}", summary_line(&report));

        if let Some(out_dir) = args.out_dir.as_ref() {
            report.write_to(&out_dir.join(format!("{stem}.json")))?;
        }
    }

    info!(target: "duel_cli", scenarios = scenarios.len(), defeated, "batch finished");
    println!("{} scenarios, {defeated} defeated", scenarios.len());
    Ok(())
}

fn handle_report(args: ReportArgs) -> Result<()> {
    let report = DuelReport::from_path(&args.input)?;
    println!("{}", summary_line(&report));
    for attack in &report.attacks {
        println!(
            "  #{} damage {} -> {} ({} -> {})",
            attack.index,
            attack.damage,
            attack.outcome.label(),
            attack.health_before,
            attack.health_after
        );
    }
    Ok(())
}

fn summary_line(report: &DuelReport) -> String {
    format!(
        "Report {} [{}] -> {:?} health {} -> {} ({} applied, {} ignored, {} deferred)",
        report.id,
        report.scenario.name,
        report.summary.status,
        report.summary.starting_health,
        report.summary.final_health,
        report.summary.applied,
        report.summary.ignored,
        report.summary.deferred
    )
}
