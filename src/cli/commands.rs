//! CLI definitions using clap.
//!
//! Positionals are captured as raw strings so malformed values produce the
//! tools' own guidance text and exit status 1 instead of clap's.

use clap::Parser;
use std::path::PathBuf;

use crate::domain::ToolMode;
use crate::error::{RespawnError, Result};

pub const MEASURE_USAGE: &str = "Usage: respawn-measure <cycles>";

/// respawn-measure - time how fast this program can kill and relaunch itself
#[derive(Parser, Debug)]
#[command(name = "respawn-measure")]
#[command(author, version, about, long_about = None)]
#[command(allow_negative_numbers = true)]
pub struct MeasureCli {
    /// Optional config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Number of restart cycles to run in this process
    pub cycles: Option<String>,
}

impl MeasureCli {
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Validated cycle limit
    pub fn cycle_limit(&self) -> Result<u32> {
        let invalid = || {
            RespawnError::Usage(format!(
                "Please provide an integer argument for the loop limit.\n{}",
                MEASURE_USAGE
            ))
        };
        let raw = self.cycles.as_deref().ok_or_else(invalid)?;
        parse_cycle_limit(raw).map_err(|_| invalid())
    }
}

/// respawn-workshop - simulate a workshop tool by killing and relaunching itself
#[derive(Parser, Debug)]
#[command(name = "respawn-workshop")]
#[command(author, version, about, long_about = None)]
#[command(allow_negative_numbers = true)]
pub struct WorkshopCli {
    /// Optional config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// <mode> <cycles>; an unquoted "tape measure" is accepted
    #[arg(value_name = "MODE CYCLES")]
    pub positionals: Vec<String>,
}

impl WorkshopCli {
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Validated mode and cycle limit.
    ///
    /// Cycles are checked before the mode, matching the order the guidance
    /// messages are reported in.
    pub fn validate(&self) -> Result<(ToolMode, u32)> {
        let cycle_limit = self.cycle_limit()?;
        let mode = self.mode()?;
        Ok((mode, cycle_limit))
    }

    /// Argument count and cycle count only; the mode is checked by [`Self::mode`]
    pub fn cycle_limit(&self) -> Result<u32> {
        let (cycles, _) = self.split_positionals()?;
        parse_cycle_limit(cycles)
    }

    pub fn mode(&self) -> Result<ToolMode> {
        let (_, mode_words) = self.split_positionals()?;
        parse_mode(&mode_words.join(" "))
    }

    fn split_positionals(&self) -> Result<(&String, &[String])> {
        match self.positionals.split_last() {
            Some((cycles, mode_words)) if !mode_words.is_empty() => Ok((cycles, mode_words)),
            _ => Err(RespawnError::Usage(workshop_usage())),
        }
    }
}

/// Full usage text for the workshop tool
pub fn workshop_usage() -> String {
    let modes: Vec<&str> = ToolMode::ALL.iter().map(|m| m.name()).collect();
    format!(
        "Usage: respawn-workshop <mode> <cycles>\nModes: {}\nExample: respawn-workshop welder 10",
        modes.join(", ")
    )
}

/// Parse a strictly positive cycle count
pub fn parse_cycle_limit(raw: &str) -> Result<u32> {
    match raw.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(RespawnError::Usage(
            "Please provide a valid positive integer for the number of cycles.".to_string(),
        )),
    }
}

/// Parse a mode name, aliases included
pub fn parse_mode(raw: &str) -> Result<ToolMode> {
    raw.parse::<ToolMode>()
}
