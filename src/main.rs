// Weekly report entry point.
//
// Run sequence:
// 1. Initialize tracing (log to stderr; stdout carries the report JSON)
// 2. Parse arguments
// 3. Load league config
// 4. Load season history (optional)
// 5. Load the week snapshot
// 6. Build the weekly report
// 7. Print the report as JSON on stdout

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use gridiron_report::config::LeagueConfig;
use gridiron_report::history;
use gridiron_report::report::{self, format_score};
use gridiron_report::roster::Matchup;

/// Build the weekly league report from a matchup snapshot
#[derive(Parser)]
#[command(name = "gridiron")]
#[command(about = "Build the weekly league report from a matchup snapshot")]
struct Args {
    /// Week snapshot: a JSON array of matchups
    snapshot: PathBuf,

    /// League config TOML
    #[arg(long, default_value = "defaults/league.toml")]
    config: PathBuf,

    /// Season history CSV of prior weekly results
    #[arg(long)]
    history: Option<PathBuf>,
}

fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("report failed: {e:#}");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let league = LeagueConfig::load(&args.config)
        .with_context(|| format!("failed to load league config {}", args.config.display()))?;
    info!(
        "Config loaded: league={}, {} teams, {} starting slots",
        league.name,
        league.num_teams,
        league.lineup_slots().len()
    );

    let past_results = match &args.history {
        Some(path) => history::load_history(path)
            .with_context(|| format!("failed to load season history {}", path.display()))?,
        None => Vec::new(),
    };
    info!("Loaded {} prior weekly results", past_results.len());

    let snapshot = std::fs::read_to_string(&args.snapshot)
        .with_context(|| format!("failed to read snapshot {}", args.snapshot.display()))?;
    let matchups: Vec<Matchup> = serde_json::from_str(&snapshot)
        .with_context(|| format!("failed to parse snapshot {}", args.snapshot.display()))?;

    let weekly = report::build_weekly_report(&matchups, &past_results, &league)
        .context("failed to build weekly report")?;
    if let Some(top) = weekly.scores.first() {
        info!(
            "Week {} report built: top score {} by {}",
            weekly.week,
            format_score(top.score),
            top.name
        );
    }

    let json = serde_json::to_string_pretty(&weekly).context("failed to serialize report")?;
    println!("{json}");
    Ok(())
}

/// Initialize tracing to stderr; stdout is reserved for the report itself.
fn init_tracing() {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("gridiron_report=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    // A second init in tests is harmless.
    let _ = tracing::subscriber::set_global_default(subscriber);
}
