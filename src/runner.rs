//! The restart loop for both variants.
//!
//! Each iteration completes (terminate, spawn request, record) before the
//! next begins. Spawn outcomes are printed as they happen to arrive; the loop
//! never waits for them.

use std::io::Write;

use log::{debug, info};

use crate::domain::{RunSession, ToolMode};
use crate::error::Result;
use crate::lifecycle::{LifecycleController, ProcessLifecycle};
use crate::report::{self, Variant, WorkshopReport};
use crate::stats::{Calculations, DirectionalStats, ModeNote, Stats, mode_notes, reduce, reduce_directional};

/// Everything derived from a workshop run
#[derive(Debug, Clone, PartialEq)]
pub struct WorkshopSummary {
    pub stats: Stats,
    pub directional: DirectionalStats,
    pub calculations: Calculations,
    pub notes: Vec<ModeNote>,
}

fn flush_outcomes<L: ProcessLifecycle, W: Write>(
    controller: &mut LifecycleController<L>,
    out: &mut W,
    variant: Variant,
) -> Result<()> {
    for outcome in controller.drain_outcomes() {
        report::write_spawn_outcome(out, variant, &outcome)?;
    }
    Ok(())
}

/// Single-mode loop: print index and elapsed time per cycle, then the summary.
pub fn run_measure<L: ProcessLifecycle, W: Write>(
    controller: &mut LifecycleController<L>,
    session: &mut RunSession,
    out: &mut W,
) -> Result<Stats> {
    writeln!(out, "Start Time: {:.3}", session.start_time)?;

    for index in 0..session.cycle_limit as usize {
        writeln!(out, "{}", index)?;

        let elapsed = controller.run_cycle();
        session.record(index, elapsed, None);
        writeln!(out, "{:.3}", elapsed)?;

        flush_outcomes(controller, out, Variant::Measure)?;
    }
    flush_outcomes(controller, out, Variant::Measure)?;

    let stats = reduce(&session.records);
    info!(
        "Measured {} cycles, average delta {:.6}s",
        session.cycle_count(),
        stats.avg_delta
    );
    report::write_measure_report(out, &stats)?;
    Ok(stats)
}

/// Multi-mode loop: label each cycle with the tool's direction, then print the
/// analysis.
pub fn run_workshop<L: ProcessLifecycle, W: Write>(
    controller: &mut LifecycleController<L>,
    session: &mut RunSession,
    mode: ToolMode,
    out: &mut W,
) -> Result<WorkshopSummary> {
    report::write_workshop_header(out, session, mode)?;

    for index in 0..session.cycle_limit as usize {
        let direction = mode.direction_for(index);
        report::write_cycle_start(out, mode, index, direction)?;

        let elapsed = controller.run_cycle();
        session.record(index, elapsed, Some(direction));
        debug!("{} {} recorded at {:.6}s", mode.cycle_label(), index, elapsed);
        report::write_cycle_done(out, mode, index, direction, elapsed)?;

        flush_outcomes(controller, out, Variant::Workshop)?;
    }
    flush_outcomes(controller, out, Variant::Workshop)?;

    let cycle_count = session.cycle_count();
    let stats = reduce(&session.records);
    let summary = WorkshopSummary {
        directional: reduce_directional(&session.records),
        calculations: Calculations::compute(mode, cycle_count, stats.avg_delta),
        notes: mode_notes(mode, cycle_count, stats.avg_delta),
        stats,
    };
    info!(
        "Workshop {} ran {} cycles, average delta {:.6}s",
        mode, cycle_count, summary.stats.avg_delta
    );

    report::write_workshop_report(
        out,
        &WorkshopReport {
            mode,
            cycle_count,
            stats: &summary.stats,
            directional: &summary.directional,
            calculations: &summary.calculations,
            notes: &summary.notes,
        },
    )?;
    Ok(summary)
}
