//! Shipcast CLI - time-to-market estimation over a feature export.
//!
//! Stands in for the product's presentation layer: it reads feature
//! documents from a JSON export of the document store, runs the estimation
//! engine, and prints the results. The team configuration is persisted
//! through the settings store under the working data directory.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use shipcast_core::{Feature, TeamConfig, WorkMode};
use shipcast_engine::{estimate, schedule, EstimatedFeature};
use shipcast_settings::{JsonSettingsStore, SettingsStore};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "shipcast")]
#[command(about = "Time-to-market estimation and completion forecasting", long_about = None)]
struct Cli {
    /// Data directory for persisted settings
    #[arg(long, default_value = ".shipcast")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate one feature and show the full calculation trace
    Estimate {
        /// Feature ID
        id: String,
        /// JSON export of feature documents
        #[arg(long, default_value = "features.json")]
        features: PathBuf,
    },
    /// Forecast completion for the whole feature set
    Forecast {
        /// JSON export of feature documents
        #[arg(long, default_value = "features.json")]
        features: PathBuf,
        /// Override work mode (parallel|sequential)
        #[arg(long)]
        mode: Option<String>,
        /// Override number of parallel tracks
        #[arg(long)]
        team_size: Option<usize>,
        /// Override team velocity (points per week per track)
        #[arg(long)]
        velocity: Option<f64>,
    },
    /// Show or change the persisted team configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the current configuration
    Show,
    /// Update configuration fields
    Set {
        /// Work mode (parallel|sequential)
        #[arg(long)]
        mode: Option<String>,
        /// Number of parallel tracks
        #[arg(long)]
        team_size: Option<usize>,
        /// Team velocity (points per week per track)
        #[arg(long)]
        velocity: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let cli = Cli::parse();
    let store = JsonSettingsStore::new(&cli.data_dir).await?;

    match cli.command {
        Commands::Estimate { id, features } => {
            let features = load_features(&features)?;
            let config = load_config(&store).await?;
            let Some(feature) = features.iter().find(|f| f.id == id) else {
                bail!("feature not found: {id}");
            };

            let result = estimate(feature, &config)?;
            println!("Feature: {} - {}", feature.id, feature.name);
            println!("  Estimate: {} weeks ({} days, {} months)", result.weeks, result.days, result.months);
            println!("  Status: {} | health {}", result.status, result.health_score);
            println!("  Breakdown:");
            for step in &result.breakdown {
                println!(
                    "    {:<22} {:>6.2} -> {:>6.2} ({:+.2})  {}",
                    step.title,
                    step.before,
                    step.after(),
                    step.delta,
                    step.detail,
                );
            }
        }
        Commands::Forecast { features, mode, team_size, velocity } => {
            let features = load_features(&features)?;
            let mut config = load_config(&store).await?;
            apply_overrides(&mut config, mode.as_deref(), team_size, velocity)?;
            config.validate()?;

            let estimated = features
                .into_iter()
                .map(|f| EstimatedFeature::new(f, &config))
                .collect::<Result<Vec<_>, _>>()?;
            let summary = schedule(&estimated, &config)?;

            println!("Features ({})", estimated.len());
            for item in &estimated {
                println!(
                    "  {} | {:>5.1} wk | {:<8} | {} - {}",
                    format_workflow(item.feature.workflow_status()),
                    item.estimate.weeks,
                    item.estimate.status.as_str(),
                    item.feature.id,
                    item.feature.name,
                );
            }
            println!();
            println!("Average estimate: {} weeks", summary.average_weeks);
            println!(
                "Delivery mix: {} fast / {} normal / {} slow / {} critical",
                summary.status_counts.fast,
                summary.status_counts.normal,
                summary.status_counts.slow,
                summary.status_counts.critical,
            );
            println!(
                "Workflow: {} done / {} in progress / {} planning",
                summary.workflow_counts.done,
                summary.workflow_counts.in_progress,
                summary.workflow_counts.planning,
            );
            println!(
                "Projected completion: {} weeks (~{} months, {} mode)",
                summary.project_completion.weeks,
                summary.project_completion.months,
                format_mode(config.work_mode),
            );
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                match store.get_team_config().await? {
                    Some(config) => print_config(&config),
                    None => {
                        println!("No saved configuration; defaults in effect:");
                        print_config(&TeamConfig::default());
                    }
                }
            }
            ConfigAction::Set { mode, team_size, velocity } => {
                let mut config = load_config(&store).await?;
                apply_overrides(&mut config, mode.as_deref(), team_size, velocity)?;
                store.put_team_config(&config).await?;
                info!("saved team configuration");
                print_config(&config);
            }
        },
    }

    Ok(())
}

/// Read a feature export produced by the document store.
fn load_features(path: &Path) -> Result<Vec<Feature>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading feature export {}", path.display()))?;
    let features: Vec<Feature> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing feature export {}", path.display()))?;
    Ok(features)
}

/// Saved configuration, or the defaults when none has been saved yet.
async fn load_config(store: &JsonSettingsStore) -> Result<TeamConfig> {
    Ok(store.get_team_config().await?.unwrap_or_default())
}

fn apply_overrides(
    config: &mut TeamConfig,
    mode: Option<&str>,
    team_size: Option<usize>,
    velocity: Option<f64>,
) -> Result<()> {
    if let Some(mode) = mode {
        config.work_mode = parse_mode(mode)?;
    }
    if let Some(team_size) = team_size {
        config.team_size = team_size;
    }
    if let Some(velocity) = velocity {
        config.team_velocity = velocity;
    }
    Ok(())
}

fn parse_mode(mode: &str) -> Result<WorkMode> {
    match mode {
        "parallel" => Ok(WorkMode::Parallel),
        "sequential" => Ok(WorkMode::Sequential),
        other => bail!("unknown work mode: {other} (expected parallel or sequential)"),
    }
}

fn format_mode(mode: WorkMode) -> &'static str {
    match mode {
        WorkMode::Parallel => "parallel",
        WorkMode::Sequential => "sequential",
    }
}

fn format_workflow(status: shipcast_core::WorkflowStatus) -> &'static str {
    use shipcast_core::WorkflowStatus;
    match status {
        WorkflowStatus::Done => "done",
        WorkflowStatus::InProgress => "active",
        WorkflowStatus::Planning => "planned",
        WorkflowStatus::WontDo => "dropped",
    }
}

fn print_config(config: &TeamConfig) {
    println!("  Work mode: {}", format_mode(config.work_mode));
    println!("  Team size: {} tracks", config.team_size);
    println!("  Velocity: {} points/week per track", config.team_velocity);
}
