//! Merge two workloads

use cadence_schedule::{Alignment, InsertStrategy, Schedule, ScheduleView};
use clap::{Args, ValueEnum};
use std::path::PathBuf;

use crate::output::{schedule_json, schedule_text};
use crate::{config::Config, output::Output, workload, CliError};

/// How two schedules are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MergeMode {
    /// Slot-by-slot union
    Zip,
    /// Slide the second schedule into the first
    Tetris,
}

/// Arguments for `cadence merge`
#[derive(Debug, Args)]
pub struct MergeCommand {
    /// First workload JSON file
    pub first: PathBuf,
    /// Second workload JSON file
    pub second: PathBuf,
    /// Merge mode
    #[arg(long, value_enum, default_value_t = MergeMode::Zip)]
    pub mode: MergeMode,
    /// Alignment: left, right or first
    #[arg(long)]
    pub align: Option<Alignment>,
    /// Insert strategy used to build both schedules
    #[arg(long)]
    pub strategy: Option<InsertStrategy>,
}

impl MergeCommand {
    pub fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        let strategy = self.strategy.unwrap_or(config.default_strategy);
        let align = self.align.unwrap_or(config.default_alignment);

        let first = workload::build_schedule(&workload::load(&self.first)?, strategy)?;
        let second = workload::build_schedule(&workload::load(&self.second)?, strategy)?;

        let merged = match self.mode {
            MergeMode::Zip => Schedule::zip(&[&first, &second], align)?,
            MergeMode::Tetris => Schedule::tetris_concat(&[&first, &second], align)?,
        };
        tracing::info!(
            "Merged {} + {} slots into {} ({:?}, {})",
            first.len(),
            second.len(),
            merged.len(),
            self.mode,
            align
        );

        let mode = match self.mode {
            MergeMode::Zip => "zip",
            MergeMode::Tetris => "tetris",
        };
        Output::new(json)
            .field("mode", mode)
            .field("align", align.as_str())
            .field_usize("slots", merged.len())
            .field_value("schedule", schedule_json(&merged))
            .message(&format!(
                "{} of {} and {} slots ({}): {} slots\n{}",
                mode,
                first.len(),
                second.len(),
                align,
                merged.len(),
                schedule_text(&merged)
            ))
            .print();

        Ok(())
    }
}
