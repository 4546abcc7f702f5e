//! CLI module - argument definitions for both binaries.

pub mod commands;

pub use commands::{MeasureCli, WorkshopCli, parse_cycle_limit, parse_mode, workshop_usage};
