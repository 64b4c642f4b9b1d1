//! Split a schedule into independent parts

use cadence_schedule::{InsertStrategy, ScheduleView};
use clap::Args;
use serde_json::Value;
use std::path::PathBuf;

use crate::output::schedule_json;
use crate::{config::Config, output::Output, workload, CliError};

/// Arguments for `cadence partition`
#[derive(Debug, Args)]
pub struct PartitionCommand {
    /// Workload JSON file
    pub workload: PathBuf,
    /// Insert strategy used to build the schedule
    #[arg(long)]
    pub strategy: Option<InsertStrategy>,
}

impl PartitionCommand {
    pub fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        let strategy = self.strategy.unwrap_or(config.default_strategy);
        let items = workload::load(&self.workload)?;
        let schedule = workload::build_schedule(&items, strategy)?;

        let sets = schedule.independent_resource_sets();
        let factors = schedule.factorize();
        tracing::info!("Found {} independent resource sets", sets.len());

        let names: Vec<Vec<String>> = sets
            .iter()
            .map(|set| set.iter().map(|r| r.to_string()).collect())
            .collect();
        let lines: Vec<String> = names
            .iter()
            .enumerate()
            .map(|(i, set)| format!("  {}: {{{}}}", i, set.join(", ")))
            .collect();

        Output::new(json)
            .field_usize("partitions", sets.len())
            .field_value("resource_sets", Value::from(names))
            .field_value(
                "factors",
                Value::Array(factors.iter().map(schedule_json).collect()),
            )
            .message(&format!(
                "{} independent resource sets\n{}",
                sets.len(),
                lines.join("\n")
            ))
            .print();

        Ok(())
    }
}
