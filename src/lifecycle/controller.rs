//! One terminate-then-respawn cycle at a time.

use std::ffi::OsString;
use std::path::PathBuf;

use log::{debug, warn};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::lifecycle::{ProcessLifecycle, SpawnOutcome};

/// Drives the restart loop's process side.
///
/// The relaunch arguments are captured once and forwarded unchanged to every
/// replacement, so each generation re-reads the same cycle limit.
pub struct LifecycleController<L> {
    lifecycle: L,
    program: PathBuf,
    args: Vec<OsString>,
    start_time: f64,
    terminate_siblings: bool,
    outcomes_tx: UnboundedSender<SpawnOutcome>,
    outcomes_rx: UnboundedReceiver<SpawnOutcome>,
}

impl<L: ProcessLifecycle> LifecycleController<L> {
    pub fn new(lifecycle: L, program: PathBuf, args: Vec<OsString>, start_time: f64) -> Self {
        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();
        Self {
            lifecycle,
            program,
            args,
            start_time,
            terminate_siblings: true,
            outcomes_tx,
            outcomes_rx,
        }
    }

    /// Skip sibling termination and only spawn
    pub fn with_sibling_termination(mut self, enabled: bool) -> Self {
        self.terminate_siblings = enabled;
        self
    }

    pub fn lifecycle(&self) -> &L {
        &self.lifecycle
    }

    /// Run one cycle and return seconds from session start to the spawn request.
    pub fn run_cycle(&mut self) -> f64 {
        if self.terminate_siblings {
            let name = self.lifecycle.current_name();
            let terminated = self.lifecycle.terminate_siblings(&name);
            debug!("Cycle terminated {} sibling(s) named {}", terminated, name);
        }

        let requested_at = self
            .lifecycle
            .spawn_replacement(&self.program, &self.args, self.outcomes_tx.clone());

        requested_at - self.start_time
    }

    /// Collect spawn outcomes that have arrived so far without waiting.
    pub fn drain_outcomes(&mut self) -> Vec<SpawnOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(outcome) = self.outcomes_rx.try_recv() {
            match outcome.as_result() {
                Ok(pid) => debug!("Replacement started (pid {:?})", pid),
                Err(e) => warn!("{}", e),
            }
            outcomes.push(outcome);
        }
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::path::Path;

    #[derive(Default)]
    struct ScriptedLifecycle {
        clock: Cell<f64>,
        terminated_names: RefCell<Vec<String>>,
        spawned: RefCell<Vec<(PathBuf, Vec<OsString>)>>,
        fail: bool,
    }

    impl ProcessLifecycle for ScriptedLifecycle {
        fn current_name(&self) -> String {
            "respawn-measure".to_string()
        }

        fn terminate_siblings(&self, name: &str) -> usize {
            self.terminated_names.borrow_mut().push(name.to_string());
            0
        }

        fn spawn_replacement(&self, program: &Path, args: &[OsString], done: UnboundedSender<SpawnOutcome>) -> f64 {
            self.spawned.borrow_mut().push((program.to_path_buf(), args.to_vec()));
            let outcome = if self.fail {
                SpawnOutcome::Failed {
                    program: program.display().to_string(),
                    error: "permission denied".to_string(),
                }
            } else {
                SpawnOutcome::Started { pid: Some(42) }
            };
            done.send(outcome).unwrap();
            self.clock.set(self.clock.get() + 0.5);
            self.clock.get()
        }
    }

    fn controller(lifecycle: ScriptedLifecycle) -> LifecycleController<ScriptedLifecycle> {
        LifecycleController::new(
            lifecycle,
            PathBuf::from("/usr/local/bin/respawn-measure"),
            vec![OsString::from("3")],
            0.0,
        )
    }

    #[test]
    fn test_run_cycle_terminates_then_spawns() {
        let mut ctl = controller(ScriptedLifecycle::default());

        assert_eq!(ctl.run_cycle(), 0.5);
        assert_eq!(ctl.run_cycle(), 1.0);

        assert_eq!(ctl.lifecycle().terminated_names.borrow().as_slice(), ["respawn-measure", "respawn-measure"]);
        let spawned = ctl.lifecycle().spawned.borrow();
        assert_eq!(spawned.len(), 2);
        assert_eq!(spawned[0].0, PathBuf::from("/usr/local/bin/respawn-measure"));
    }

    #[test]
    fn test_arguments_are_forwarded_unchanged_every_cycle() {
        let mut ctl = controller(ScriptedLifecycle::default());
        ctl.run_cycle();
        ctl.run_cycle();
        ctl.run_cycle();

        for (_, args) in ctl.lifecycle().spawned.borrow().iter() {
            assert_eq!(args, &vec![OsString::from("3")]);
        }
    }

    #[test]
    fn test_sibling_termination_can_be_disabled() {
        let mut ctl = controller(ScriptedLifecycle::default()).with_sibling_termination(false);
        ctl.run_cycle();
        assert!(ctl.lifecycle().terminated_names.borrow().is_empty());
        assert_eq!(ctl.lifecycle().spawned.borrow().len(), 1);
    }

    #[test]
    fn test_spawn_failure_still_yields_timestamp() {
        let mut ctl = controller(ScriptedLifecycle {
            fail: true,
            ..Default::default()
        });

        assert_eq!(ctl.run_cycle(), 0.5);
        let outcomes = ctl.drain_outcomes();
        assert_eq!(outcomes.len(), 1);
        assert!(!outcomes[0].is_started());
    }

    #[test]
    fn test_drain_outcomes_is_non_blocking_when_empty() {
        let mut ctl = controller(ScriptedLifecycle::default());
        assert!(ctl.drain_outcomes().is_empty());
        ctl.run_cycle();
        assert_eq!(ctl.drain_outcomes(), vec![SpawnOutcome::Started { pid: Some(42) }]);
        assert!(ctl.drain_outcomes().is_empty());
    }
}
