//! CLI subcommand implementations

pub mod agent;
pub mod campaign;
pub mod config_gen;
pub mod entry;
