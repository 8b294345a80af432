mod cli;
mod report;
mod scenario;

use anyhow::{Context, Result};
use bubbletree::tree::{BubbleTree, StepTree};
use cli::{Cli, Planner};
use clap::Parser;
use report::{Report, Summary, TrialRecord};
use scenario::Scenario;
use tracing::{info, warn};

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let scenario = match &cli.scenario {
        Some(path) => Scenario::load(path)?,
        None => {
            info!("No scenario given, using the built-in 2-D toy");
            Scenario::default()
        }
    };
    let generator = cli.generator.unwrap_or(scenario.generator);
    let base_seed = cli.seed.unwrap_or(scenario.seed);

    info!(
        planner = ?cli.planner,
        generator = ?generator,
        dimension = scenario.dimension(),
        samples = scenario.samples,
        obstacles = scenario.obstacles.len(),
        trials = cli.trials,
        "Starting trials"
    );

    let mut records = Vec::new();
    for trial in 0..cli.trials {
        let seed = base_seed.wrapping_add(trial);
        let record = run_trial(&scenario, cli.planner, generator, trial, seed)?;
        match &record.error {
            None => info!(
                trial,
                elapsed_ms = record.elapsed_ms,
                waypoints = record.waypoints,
                "Trial succeeded"
            ),
            Some(err) => warn!(trial, elapsed_ms = record.elapsed_ms, "Trial failed: {}", err),
        }
        records.push(record);
    }

    let summary = Summary::from_records(cli.planner, generator, &records);
    info!(
        successes = summary.successes,
        trials = summary.trials,
        mean_elapsed_ms = ?summary.mean_elapsed_ms,
        "Done"
    );

    let report = Report {
        scenario,
        summary,
        records,
    };
    let json = serde_json::to_string_pretty(&report)?;
    match &cli.report {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("failed to write report {}", path.display()))?;
            info!("Report written to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn run_trial(
    scenario: &Scenario,
    planner: Planner,
    generator: cli::Generator,
    trial: u64,
    seed: u64,
) -> Result<TrialRecord> {
    let space = scenario.build_space(generator, seed)?;
    let world = scenario.build_world()?;
    let (start, goal) = (scenario.start(), scenario.goal());

    let record = match planner {
        Planner::Bubble => {
            let mut tree = BubbleTree::new(space, world, start, goal, &scenario.planner)?;
            TrialRecord::run(&mut tree, trial, seed)
        }
        Planner::Step => {
            let mut tree = StepTree::new(space, world, start, goal, &scenario.planner)?;
            TrialRecord::run(&mut tree, trial, seed)
        }
    };
    Ok(record)
}
