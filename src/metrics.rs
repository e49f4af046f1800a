/// Timing of simulation runs
use chrono::{DateTime, Utc};
use instant::Instant;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetrics {
    pub stage: RunStage,
    pub duration_ms: u64,
    pub scenarios: Option<u64>,
    pub candidates: Option<u64>,
    pub timestamp: DateTime<Utc>,
}

impl RunMetrics {
    /// Scenario and candidate counts for the stage, e.g. "10000 scenarios, 3 candidates".
    pub fn workload(&self) -> String {
        let mut parts = Vec::new();
        if let Some(scenarios) = self.scenarios {
            parts.push(format!("{} scenarios", scenarios));
        }
        if let Some(candidates) = self.candidates {
            parts.push(format!("{} candidates", candidates));
        }
        parts.join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunStage {
    Loading,
    Simulation,
    Output,
}

impl std::fmt::Display for RunStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStage::Loading => write!(f, "loading"),
            RunStage::Simulation => write!(f, "simulation"),
            RunStage::Output => write!(f, "output"),
        }
    }
}

#[derive(Default)]
pub struct MetricsCollector {
    stage_timers: HashMap<RunStage, Instant>,
    recorded: Vec<RunMetrics>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start timing a stage
    pub fn start_stage(&mut self, stage: RunStage) {
        self.stage_timers.insert(stage, Instant::now());
    }

    /// End timing a stage and record its metrics
    pub fn end_stage(
        &mut self,
        stage: RunStage,
        scenarios: Option<u64>,
        candidates: Option<u64>,
    ) -> &RunMetrics {
        let duration_ms = self
            .stage_timers
            .remove(&stage)
            .map(|start| start.elapsed().as_millis() as u64)
            .unwrap_or(0);

        self.recorded.push(RunMetrics {
            stage,
            duration_ms,
            scenarios,
            candidates,
            timestamp: Utc::now(),
        });

        &self.recorded[self.recorded.len() - 1]
    }

    pub fn recorded(&self) -> &[RunMetrics] {
        &self.recorded
    }

    pub fn total_duration_ms(&self) -> u64 {
        self.recorded.iter().map(|m| m.duration_ms).sum()
    }

    /// Print performance summary
    pub fn print_summary(&self) {
        use colored::*;

        println!("\n{}", "⏱️  Run Performance Summary".bright_cyan().bold());
        println!("{}", "=".repeat(50).bright_cyan());

        for metric in &self.recorded {
            let stage_color = match metric.stage {
                RunStage::Loading => "yellow",
                RunStage::Simulation => "green",
                RunStage::Output => "blue",
            };

            let workload = metric.workload();
            println!(
                "{}: {} ms{}",
                format!("{:?}", metric.stage).color(stage_color),
                metric.duration_ms.to_string().bright_white(),
                if workload.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", workload.bright_yellow())
                }
            );
        }

        println!("{}", "-".repeat(50).bright_cyan());
        println!(
            "{}: {} ms",
            "Total Duration".bright_white().bold(),
            self.total_duration_ms().to_string().bright_green().bold()
        );

        if let Some(rate) = self.scenarios_per_second() {
            println!(
                "{}: {} scenarios/sec",
                "Simulation Rate".bright_white().bold(),
                format!("{:.0}", rate).bright_green().bold()
            );
        }

        println!();
    }

    /// Throughput of the simulation stage, if it was timed for a nonzero duration.
    pub fn scenarios_per_second(&self) -> Option<f64> {
        self.recorded
            .iter()
            .find(|m| m.stage == RunStage::Simulation)
            .and_then(|m| match (m.scenarios, m.duration_ms) {
                (Some(scenarios), duration) if duration > 0 => {
                    Some(scenarios as f64 * 1000.0 / duration as f64)
                }
                _ => None,
            })
    }
}
