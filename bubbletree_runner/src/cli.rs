use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "bubbletree-runner")]
#[command(about = "Run seeded planning trials and report tree statistics", long_about = None)]
pub struct Cli {
    /// Scenario file (TOML); the built-in 2-D toy scenario when omitted
    #[arg(short, long)]
    pub scenario: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = Planner::Bubble)]
    pub planner: Planner,

    /// Number of independent trials
    #[arg(short, long, default_value_t = 1)]
    pub trials: u64,

    /// Base seed; trial `i` samples with `seed + i`. Overrides the scenario seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Sample generator; overrides the scenario generator
    #[arg(short, long, value_enum)]
    pub generator: Option<Generator>,

    /// Write the JSON report here instead of stdout
    #[arg(short, long)]
    pub report: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Planner {
    /// Bubble-certified tree
    Bubble,
    /// Step-sampled tree
    Step,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Generator {
    Uniform,
    Halton,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["bubbletree-runner"]);
        assert_eq!(cli.planner, Planner::Bubble);
        assert_eq!(cli.trials, 1);
        assert!(cli.scenario.is_none());
        assert!(cli.seed.is_none());
        assert!(cli.generator.is_none());
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::parse_from([
            "bubbletree-runner",
            "--scenario",
            "wall.toml",
            "--planner",
            "step",
            "--trials",
            "5",
            "--seed",
            "42",
            "--generator",
            "halton",
            "--report",
            "out.json",
        ]);
        assert_eq!(cli.planner, Planner::Step);
        assert_eq!(cli.trials, 5);
        assert_eq!(cli.seed, Some(42));
        assert_eq!(cli.generator, Some(Generator::Halton));
        assert_eq!(cli.report, Some(PathBuf::from("out.json")));
    }
}
