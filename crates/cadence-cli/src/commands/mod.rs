//! CLI subcommands

pub mod build;
pub mod config;
pub mod frontier;
pub mod merge;
pub mod partition;
