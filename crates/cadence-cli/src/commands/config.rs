//! Show or edit the CLI configuration

use cadence_schedule::{Alignment, InsertStrategy};
use clap::Args;

use crate::{config::Config, output::Output, CliError};

/// Arguments for `cadence config`
#[derive(Debug, Args)]
pub struct ConfigCommand {
    /// Show current configuration
    #[arg(long)]
    pub show: bool,
    /// Set the default insert strategy
    #[arg(long)]
    pub set_strategy: Option<InsertStrategy>,
    /// Set the default merge alignment
    #[arg(long)]
    pub set_align: Option<Alignment>,
    /// Set the default log filter
    #[arg(long)]
    pub set_log_level: Option<String>,
}

impl ConfigCommand {
    pub fn execute(self, config: &mut Config, json: bool) -> Result<(), CliError> {
        let mut modified = false;

        if let Some(strategy) = self.set_strategy {
            config.default_strategy = strategy;
            modified = true;
        }

        if let Some(align) = self.set_align {
            config.default_alignment = align;
            modified = true;
        }

        if let Some(level) = self.set_log_level {
            config.log_level = level;
            modified = true;
        }

        if modified {
            let path = config.save()?;
            tracing::debug!("Wrote {}", path.display());
            Output::new(json)
                .field("status", "saved")
                .field("path", &path.display().to_string())
                .message("Configuration saved")
                .print();
        } else if self.show {
            Output::new(json)
                .field("default_strategy", config.default_strategy.as_str())
                .field("default_alignment", config.default_alignment.as_str())
                .field("log_level", &config.log_level)
                .message(&format!(
                    "Strategy: {}\nAlignment: {}\nLog level: {}",
                    config.default_strategy, config.default_alignment, config.log_level
                ))
                .print();
        } else {
            Output::new(json)
                .message("Use --show to display config, or --set-strategy/--set-align/--set-log-level to modify")
                .print();
        }

        Ok(())
    }
}
