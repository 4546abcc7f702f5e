//! Human-readable progress lines and end-of-run reports.
//!
//! Floating quantities are always printed with three decimals.

use std::io::{self, Write};

use colored::*;

use crate::domain::{Direction, RunSession, ToolMode};
use crate::lifecycle::SpawnOutcome;
use crate::stats::{Calculations, DirectionalStats, ModeNote, Stats, specifications};

const INSUFFICIENT: &str = "N/A (insufficient data)";

/// Which tool's wording to use for spawn outcome lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Measure,
    Workshop,
}

pub fn write_spawn_outcome<W: Write>(out: &mut W, variant: Variant, outcome: &SpawnOutcome) -> io::Result<()> {
    match (variant, outcome) {
        (Variant::Measure, SpawnOutcome::Started { .. }) => {
            writeln!(out, "A new instance of the program has been started.")
        }
        (Variant::Workshop, SpawnOutcome::Started { .. }) => writeln!(out, "Tool restarted for another cycle."),
        (Variant::Measure, SpawnOutcome::Failed { error, .. }) => {
            writeln!(out, "{} {}", "Failed to reopen the program:".red(), error)
        }
        (Variant::Workshop, SpawnOutcome::Failed { error, .. }) => {
            writeln!(out, "{} {}", "Failed to restart tool:".red(), error)
        }
    }
}

pub fn write_high_cycle_warning<W: Write>(out: &mut W, cycle_limit: u32) -> io::Result<()> {
    writeln!(
        out,
        "{} High cycle count ({}) may create significant system load.",
        "Warning:".yellow(),
        cycle_limit
    )?;
    writeln!(out, "Consider using a lower number for testing. Continue? (This is just a warning)")
}

/// Print the advisory when `cycle_limit` exceeds `threshold`; returns whether it did.
pub fn maybe_warn_high_cycles<W: Write>(out: &mut W, cycle_limit: u32, threshold: u32) -> io::Result<bool> {
    if cycle_limit <= threshold {
        return Ok(false);
    }
    write_high_cycle_warning(out, cycle_limit)?;
    Ok(true)
}

pub fn write_workshop_header<W: Write>(out: &mut W, session: &RunSession, mode: ToolMode) -> io::Result<()> {
    let title = mode.title();
    writeln!(out, "{} Start Time: {:.3}", title, session.start_time)?;
    writeln!(out, "Mode: {}", title)?;
    writeln!(out, "Cycles: {}", session.cycle_limit)?;
    writeln!(out, "Starting simulation...")
}

pub fn write_cycle_start<W: Write>(out: &mut W, mode: ToolMode, index: usize, direction: Direction) -> io::Result<()> {
    writeln!(out, "{}: {} - Direction: {}", mode.cycle_label(), index, direction)
}

pub fn write_cycle_done<W: Write>(
    out: &mut W,
    mode: ToolMode,
    index: usize,
    direction: Direction,
    elapsed: f64,
) -> io::Result<()> {
    writeln!(
        out,
        "{} {} ({}) completed at: {:.3} seconds",
        mode.cycle_label(),
        index,
        direction,
        elapsed
    )
}

/// Single-mode summary
pub fn write_measure_report<W: Write>(out: &mut W, stats: &Stats) -> io::Result<()> {
    writeln!(out, "Average Difference: {:.3} seconds", stats.avg_delta)?;
    writeln!(out, "Average Speed: {:.3} m/s", stats.avg_speed)?;
    writeln!(out, "Average Length: {:.3} meters", stats.avg_length)
}

fn write_note<W: Write>(out: &mut W, note: &ModeNote) -> io::Result<()> {
    match note.value {
        Some(value) if note.unit.starts_with(':') => writeln!(out, "  {}: {:.3}{}", note.label, value, note.unit),
        Some(value) => writeln!(out, "  {}: {:.3} {}", note.label, value, note.unit),
        None => writeln!(out, "  {}: {}", note.label, INSUFFICIENT),
    }
}

/// Everything the workshop analysis section prints
pub struct WorkshopReport<'a> {
    pub mode: ToolMode,
    pub cycle_count: usize,
    pub stats: &'a Stats,
    pub directional: &'a DirectionalStats,
    pub calculations: &'a Calculations,
    pub notes: &'a [ModeNote],
}

/// Multi-mode analysis section
pub fn write_workshop_report<W: Write>(out: &mut W, report: &WorkshopReport<'_>) -> io::Result<()> {
    let mode = report.mode;
    let directional = report.directional;

    writeln!(out)?;
    writeln!(out, "{}", format!("=== {} ANALYSIS ===", mode.name().to_uppercase()).bold())?;

    writeln!(out, "{} Specifications:", mode.title())?;
    for spec in specifications(mode) {
        writeln!(out, "  {}: {}", spec.label, spec.value)?;
    }

    writeln!(out)?;
    writeln!(out, "{}", "Cycle Performance:".cyan())?;
    writeln!(out, "  Total Cycles: {}", report.cycle_count)?;
    writeln!(out, "  Left Cycles: {}", directional.left_cycles)?;
    writeln!(out, "  Right Cycles: {}", directional.right_cycles)?;
    writeln!(
        out,
        "  Net Direction: {} ({})",
        directional.net_cycles(),
        directional.net_direction().as_str()
    )?;
    if report.stats.avg_delta > 0.0 {
        writeln!(out, "  Average Cycle Time: {:.3} seconds", report.stats.avg_delta)?;
    } else {
        writeln!(out, "  Average Cycle Time: {}", INSUFFICIENT)?;
    }
    if directional.avg_left_elapsed > 0.0 {
        writeln!(out, "  Average Left Cycle Time: {:.3} seconds", directional.avg_left_elapsed)?;
    }
    if directional.avg_right_elapsed > 0.0 {
        writeln!(out, "  Average Right Cycle Time: {:.3} seconds", directional.avg_right_elapsed)?;
    }

    writeln!(out)?;
    writeln!(out, "{}", "Calculated Metrics:".cyan())?;
    for (label, value) in report.calculations.metrics() {
        writeln!(out, "  {}: {:.3}", label, value)?;
    }
    for note in report.notes {
        write_note(out, note)?;
    }
    Ok(())
}
