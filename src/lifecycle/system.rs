//! Process lifecycle backed by the real OS process table.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use sysinfo::System;
use tokio::process::Command;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;

use crate::lifecycle::{ProcessLifecycle, SpawnOutcome};

/// [`ProcessLifecycle`] over `sysinfo` for termination and tokio for spawning.
pub struct SystemLifecycle {
    runtime: Handle,
}

impl SystemLifecycle {
    /// Spawn requests are dispatched onto `runtime`.
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Use the runtime of the calling context.
    ///
    /// Panics outside a tokio runtime.
    pub fn current() -> Self {
        Self::new(Handle::current())
    }
}

fn executable_name() -> Option<String> {
    let exe = std::env::current_exe().ok()?;
    exe.file_name().map(|n| n.to_string_lossy().into_owned())
}

impl ProcessLifecycle for SystemLifecycle {
    fn current_name(&self) -> String {
        let from_table = sysinfo::get_current_pid().ok().and_then(|pid| {
            let mut system = System::new();
            system.refresh_process(pid);
            system.process(pid).map(|p| p.name().to_string())
        });

        from_table
            .or_else(executable_name)
            .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
    }

    fn terminate_siblings(&self, name: &str) -> usize {
        let own_pid = sysinfo::get_current_pid().ok();
        let wanted = name.to_lowercase();

        let mut system = System::new();
        system.refresh_processes();

        let mut terminated = 0;
        for (pid, process) in system.processes() {
            if Some(*pid) == own_pid || process.name().to_lowercase() != wanted {
                continue;
            }
            if process.kill() {
                debug!("Terminated sibling {} (pid {})", process.name(), pid);
                terminated += 1;
            } else {
                debug!("Sibling pid {} already gone", pid);
            }
        }

        if terminated > 0 {
            info!("Terminated {} sibling process(es) named {}", terminated, name);
        }
        terminated
    }

    fn spawn_replacement(&self, program: &Path, args: &[OsString], done: UnboundedSender<SpawnOutcome>) -> f64 {
        let requested_at = crate::clock::epoch_seconds();
        let program: PathBuf = program.to_path_buf();
        let args = args.to_vec();

        self.runtime.spawn(async move {
            let outcome = match Command::new(&program).args(&args).spawn() {
                Ok(child) => {
                    debug!("Spawned replacement {} (pid {:?})", program.display(), child.id());
                    SpawnOutcome::Started { pid: child.id() }
                }
                Err(e) => {
                    warn!("Failed to spawn replacement {}: {}", program.display(), e);
                    SpawnOutcome::Failed {
                        program: program.display().to_string(),
                        error: e.to_string(),
                    }
                }
            };
            // The loop may have finished and dropped its receiver
            let _ = done.send(outcome);
        });

        requested_at
    }
}
