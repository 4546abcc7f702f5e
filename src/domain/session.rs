//! Run session and the per-cycle records it accumulates.

use crate::domain::{Direction, ToolMode};

/// One loop iteration, immutable once appended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleRecord {
    pub index: usize,
    /// Seconds between session start and the spawn request of this cycle
    pub elapsed_seconds: f64,
    pub direction: Option<Direction>,
}

/// State for one process lifetime.
#[derive(Debug, Clone)]
pub struct RunSession {
    /// Epoch seconds at process start
    pub start_time: f64,
    pub mode: Option<ToolMode>,
    pub cycle_limit: u32,
    pub records: Vec<CycleRecord>,
}

impl RunSession {
    pub fn new(start_time: f64, mode: Option<ToolMode>, cycle_limit: u32) -> Self {
        Self {
            start_time,
            mode,
            cycle_limit,
            records: Vec::with_capacity(cycle_limit as usize),
        }
    }

    /// Append a record.
    ///
    /// Negative elapsed values (wall-clock regression) are kept as-is.
    pub fn record(&mut self, index: usize, elapsed_seconds: f64, direction: Option<Direction>) {
        debug_assert_eq!(index, self.records.len(), "records are appended in index order");
        self.records.push(CycleRecord {
            index,
            elapsed_seconds,
            direction,
        });
    }

    /// Number of cycles recorded so far
    pub fn cycle_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_complete(&self) -> bool {
        self.records.len() == self.cycle_limit as usize
    }
}
