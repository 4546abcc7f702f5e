//! Lifecycle Controller - sibling termination and self relaunch
//!
//! OS process APIs sit behind the [`ProcessLifecycle`] trait so the restart
//! loop can be driven against a fake in tests.

pub mod controller;
pub mod system;

use std::ffi::OsString;
use std::path::Path;

use tokio::sync::mpsc::UnboundedSender;

use crate::error::{RespawnError, Result};

pub use controller::LifecycleController;
pub use system::SystemLifecycle;

/// Completion signal of a fire-and-forget spawn request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpawnOutcome {
    /// The replacement process was created
    Started { pid: Option<u32> },
    /// The replacement process could not be created
    Failed { program: String, error: String },
}

impl SpawnOutcome {
    pub fn is_started(&self) -> bool {
        matches!(self, SpawnOutcome::Started { .. })
    }

    /// Child PID on success, [`RespawnError::Spawn`] on failure
    pub fn as_result(&self) -> Result<Option<u32>> {
        match self {
            SpawnOutcome::Started { pid } => Ok(*pid),
            SpawnOutcome::Failed { program, error } => Err(RespawnError::Spawn(format!("{}: {}", program, error))),
        }
    }
}

/// Process-table capability used by the restart loop.
pub trait ProcessLifecycle {
    /// Display name of the running process
    fn current_name(&self) -> String;

    /// Forcibly terminate every other process named `name` (case-insensitive).
    ///
    /// Returns how many were signalled. No matches, or a process that is
    /// already gone, is not an error.
    fn terminate_siblings(&self, name: &str) -> usize;

    /// Request a new process from `program` with `args` and return the
    /// epoch time at which the request was issued.
    ///
    /// Must not wait for the child; the result is reported on `done`.
    fn spawn_replacement(&self, program: &Path, args: &[OsString], done: UnboundedSender<SpawnOutcome>) -> f64;
}

impl<L: ProcessLifecycle + ?Sized> ProcessLifecycle for &L {
    fn current_name(&self) -> String {
        (**self).current_name()
    }

    fn terminate_siblings(&self, name: &str) -> usize {
        (**self).terminate_siblings(name)
    }

    fn spawn_replacement(&self, program: &Path, args: &[OsString], done: UnboundedSender<SpawnOutcome>) -> f64 {
        (**self).spawn_replacement(program, args, done)
    }
}
