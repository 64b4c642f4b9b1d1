//! Reachability queries from a starting frontier

use cadence_primitives::Resource;
use cadence_schedule::{Frontier, InsertStrategy, Operation, ScheduleView};
use clap::Args;
use serde_json::{json, Value};
use std::path::PathBuf;

use crate::output::{frontier_json, frontier_text};
use crate::{config::Config, output::Output, workload, CliError};

/// Arguments for `cadence frontier`
#[derive(Debug, Args)]
pub struct FrontierCommand {
    /// Workload JSON file
    pub workload: PathBuf,
    /// Starting frontier as `resource=index` pairs, e.g. `q0=0,q1=2`
    #[arg(long, required = true, value_delimiter = ',')]
    pub start: Vec<String>,
    /// Names of operations that block progress
    #[arg(long)]
    pub blocker: Vec<String>,
    /// Insert strategy used to build the schedule
    #[arg(long)]
    pub strategy: Option<InsertStrategy>,
}

/// Parse `resource=index` entries
pub fn parse_frontier(entries: &[String]) -> Result<Frontier, CliError> {
    entries
        .iter()
        .map(|entry| {
            let (resource, index) = entry
                .split_once('=')
                .ok_or_else(|| CliError::InvalidInput(format!("expected resource=index, got '{}'", entry)))?;
            let index = index
                .trim()
                .parse::<usize>()
                .map_err(|_| CliError::InvalidInput(format!("invalid slot index in '{}'", entry)))?;
            Ok((Resource::parse(resource)?, index))
        })
        .collect()
}

impl FrontierCommand {
    pub fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        let strategy = self.strategy.unwrap_or(config.default_strategy);
        let start = parse_frontier(&self.start)?;
        let schedule = workload::build_schedule(&workload::load(&self.workload)?, strategy)?;

        let is_blocker = |op: &cadence_schedule::Instruction| self.blocker.iter().any(|b| b == op.name());
        let end = schedule.reachable_frontier_from(&start, is_blocker);
        let reached = schedule.operations_until_blocked(&start, is_blocker);
        tracing::info!("Reached {} operations before blocking", reached.len());

        let reached_json: Vec<Value> = reached
            .iter()
            .map(|(i, op)| json!({ "index": i, "name": op.name(), "resources": op.resources().iter().map(|r| r.to_string()).collect::<Vec<_>>() }))
            .collect();
        let reached_text: Vec<String> = reached
            .iter()
            .map(|(i, op)| format!("  {}: {}", i, op))
            .collect();

        Output::new(json)
            .field_value("start", frontier_json(&start))
            .field_value("end", frontier_json(&end))
            .field_value("operations", Value::Array(reached_json))
            .message(&format!(
                "Start: {}\nEnd:   {}\nOperations before blocking:\n{}",
                frontier_text(&start),
                frontier_text(&end),
                reached_text.join("\n")
            ))
            .print();

        Ok(())
    }
}
