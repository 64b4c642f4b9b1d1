//! Build a schedule from a workload

use cadence_schedule::{InsertStrategy, ScheduleView};
use clap::Args;
use std::path::PathBuf;

use crate::output::{schedule_json, schedule_text};
use crate::{config::Config, output::Output, workload, CliError};

/// Arguments for `cadence build`
#[derive(Debug, Args)]
pub struct BuildCommand {
    /// Workload JSON file
    pub workload: PathBuf,
    /// Insert strategy: new, new_then_inline, inline or earliest
    #[arg(long)]
    pub strategy: Option<InsertStrategy>,
}

impl BuildCommand {
    pub fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        let strategy = self.strategy.unwrap_or(config.default_strategy);
        let items = workload::load(&self.workload)?;
        let schedule = workload::build_schedule(&items, strategy)?;
        let operations = schedule.all_operations().count();
        tracing::info!("Built {} slots from {} operations", schedule.len(), operations);

        Output::new(json)
            .field("strategy", strategy.as_str())
            .field_usize("slots", schedule.len())
            .field_usize("operations", operations)
            .field_value("schedule", schedule_json(&schedule))
            .message(&format!(
                "{} slots, {} operations ({})\n{}",
                schedule.len(),
                operations,
                strategy,
                schedule_text(&schedule)
            ))
            .print();

        Ok(())
    }
}
