//! Trial records and their summary

use crate::cli::{Generator, Planner};
use crate::scenario::Scenario;
use bubbletree::tree::{PlannerTree, TreeStats};
use bubbletree::space::path_length;
use serde::Serialize;
use std::time::Instant;

/// Outcome of one seeded trial
#[derive(Debug, Clone, Serialize)]
pub struct TrialRecord {
    pub trial: u64,
    pub seed: u64,
    pub succeeded: bool,
    pub error: Option<String>,
    pub elapsed_ms: f64,
    pub waypoints: usize,
    pub path_length: Option<f64>,
    pub stats: TreeStats,
}

impl TrialRecord {
    /// Build `tree` and record what happened
    pub fn run<T: PlannerTree>(tree: &mut T, trial: u64, seed: u64) -> Self {
        let started = Instant::now();
        let result = tree.build_tree();
        let elapsed_ms = started.elapsed().as_secs_f64() * 1e3;

        let path = result.as_ref().ok().and_then(|_| tree.generate_path().ok());
        Self {
            trial,
            seed,
            succeeded: path.is_some(),
            error: result.err().map(|err| err.to_string()),
            elapsed_ms,
            waypoints: path.as_ref().map_or(0, Vec::len),
            path_length: path.as_deref().map(path_length),
            stats: tree.stats().clone(),
        }
    }
}

/// Aggregate over all trials
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub planner: Planner,
    pub generator: Generator,
    pub trials: usize,
    pub successes: usize,
    pub success_rate: f64,
    pub mean_bubble_count: f64,
    pub mean_collision_count: f64,
    /// Over successful trials only
    pub mean_elapsed_ms: Option<f64>,
    pub mean_waypoints: Option<f64>,
    pub mean_path_length: Option<f64>,
}

impl Summary {
    pub fn from_records(planner: Planner, generator: Generator, records: &[TrialRecord]) -> Self {
        let succeeded: Vec<&TrialRecord> = records.iter().filter(|r| r.succeeded).collect();
        let over_successes = |value: fn(&TrialRecord) -> f64| {
            (!succeeded.is_empty()).then(|| mean(succeeded.iter().map(|r| value(r))))
        };
        Self {
            planner,
            generator,
            trials: records.len(),
            successes: succeeded.len(),
            success_rate: ratio(succeeded.len() as f64, records.len()),
            mean_bubble_count: mean(records.iter().map(|r| r.stats.bubble_count as f64)),
            mean_collision_count: mean(records.iter().map(|r| r.stats.collision_count as f64)),
            mean_elapsed_ms: over_successes(|r| r.elapsed_ms),
            mean_waypoints: over_successes(|r| r.waypoints as f64),
            mean_path_length: over_successes(|r| r.path_length.unwrap_or(0.0)),
        }
    }
}

/// Everything written to the report file
#[derive(Debug, Serialize)]
pub struct Report {
    pub scenario: Scenario,
    pub summary: Summary,
    pub records: Vec<TrialRecord>,
}

fn ratio(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (total, count) = values.fold((0.0, 0), |(total, count), v| (total + v, count + 1));
    ratio(total, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(trial: u64, succeeded: bool, length: Option<f64>, bubbles: usize) -> TrialRecord {
        TrialRecord {
            trial,
            seed: trial,
            succeeded,
            error: (!succeeded).then(|| "No path found".to_string()),
            elapsed_ms: 2.0,
            waypoints: if succeeded { 3 } else { 0 },
            path_length: length,
            stats: TreeStats {
                bubble_count: bubbles,
                ..TreeStats::default()
            },
        }
    }

    #[test]
    fn test_summary_averages() {
        let records = vec![
            record(0, true, Some(1.5), 10),
            record(1, false, None, 20),
            record(2, true, Some(2.5), 30),
        ];
        let summary = Summary::from_records(Planner::Bubble, Generator::Halton, &records);
        assert_eq!(summary.trials, 3);
        assert_eq!(summary.successes, 2);
        assert!((summary.success_rate - 2.0 / 3.0).abs() < 1e-12);
        assert!((summary.mean_bubble_count - 20.0).abs() < 1e-12);
        assert_eq!(summary.mean_path_length, Some(2.0));
        assert_eq!(summary.mean_waypoints, Some(3.0));
    }

    #[test]
    fn test_summary_of_no_trials() {
        let summary = Summary::from_records(Planner::Step, Generator::Uniform, &[]);
        assert_eq!(summary.success_rate, 0.0);
        assert_eq!(summary.mean_bubble_count, 0.0);
        assert!(summary.mean_elapsed_ms.is_none());
        assert!(summary.mean_path_length.is_none());
    }

    #[test]
    fn test_report_serializes() {
        let records = vec![record(0, false, None, 4)];
        let report = Report {
            scenario: Scenario::default(),
            summary: Summary::from_records(Planner::Step, Generator::Uniform, &records),
            records,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["summary"]["planner"], "step");
        assert_eq!(json["summary"]["generator"], "uniform");
        assert_eq!(json["records"][0]["error"], "No path found");
        assert_eq!(json["scenario"]["obstacles"][0]["type"], "sphere");
    }
}
