//! Termination Logger
//!
//! Emits the wall-clock time when the process exits normally (guard drop) or
//! receives one of a configured set of signals. Signal-triggered firing then
//! exits with the signal number as status.
//!
//! Signal actions run inside the handler, so they only format into a stack
//! buffer and write to the raw stdout descriptor.

use std::fmt;
use std::fs::File;
use std::io::{Cursor, Write};
use std::mem::ManuallyDrop;
use std::os::fd::FromRawFd;

use serde::{Deserialize, Serialize};
use signal_hook::consts::{SIGABRT, SIGINT, SIGSEGV, SIGTERM};
use signal_hook::low_level;
use signal_hook_registry::SigId;

use crate::clock::epoch_seconds;
use crate::error::{RespawnError, Result};

/// Signals the logger can intercept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShutdownSignal {
    #[serde(rename = "SIGINT")]
    Interrupt,
    #[serde(rename = "SIGTERM")]
    Terminate,
    #[serde(rename = "SIGABRT")]
    Abort,
    #[serde(rename = "SIGSEGV")]
    SegmentationViolation,
}

impl ShutdownSignal {
    pub const DEFAULT_SET: [ShutdownSignal; 4] = [
        ShutdownSignal::Interrupt,
        ShutdownSignal::Terminate,
        ShutdownSignal::Abort,
        ShutdownSignal::SegmentationViolation,
    ];

    pub fn number(self) -> i32 {
        match self {
            ShutdownSignal::Interrupt => SIGINT,
            ShutdownSignal::Terminate => SIGTERM,
            ShutdownSignal::Abort => SIGABRT,
            ShutdownSignal::SegmentationViolation => SIGSEGV,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShutdownSignal::Interrupt => "SIGINT",
            ShutdownSignal::Terminate => "SIGTERM",
            ShutdownSignal::Abort => "SIGABRT",
            ShutdownSignal::SegmentationViolation => "SIGSEGV",
        }
    }
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why the handler fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownEvent {
    Exit,
    Signal(ShutdownSignal),
}

/// Callback invoked with the event and the epoch time it fired at.
///
/// Runs inside a signal handler for [`ShutdownEvent::Signal`]: it must not
/// allocate or take locks.
pub type ShutdownHandler = fn(ShutdownEvent, f64);

/// Format the termination line into `buf`, returning the used prefix.
pub fn format_termination_line(buf: &mut [u8], event: ShutdownEvent, timestamp: f64) -> &[u8] {
    let mut cursor = Cursor::new(&mut buf[..]);
    let written = match event {
        ShutdownEvent::Exit => writeln!(cursor, "Exit: {:.3}", timestamp),
        ShutdownEvent::Signal(_) => writeln!(cursor, "Signal Exit Time: {:.3}", timestamp),
    };
    let len = if written.is_ok() { cursor.position() as usize } else { 0 };
    &buf[..len]
}

/// Default handler: write the termination line straight to fd 1.
pub fn emit_termination_line(event: ShutdownEvent, timestamp: f64) {
    let mut buf = [0u8; 64];
    let line = format_termination_line(&mut buf, event, timestamp);

    // SAFETY: fd 1 stays open for the process lifetime and ManuallyDrop keeps
    // this File from closing it.
    let mut stdout = ManuallyDrop::new(unsafe { File::from_raw_fd(1) });
    let _ = stdout.write_all(line);
}

/// Keeps the handler registered; dropping it fires [`ShutdownEvent::Exit`].
pub struct ShutdownGuard {
    handler: ShutdownHandler,
    log_exit: bool,
    ids: Vec<SigId>,
}

impl ShutdownGuard {
    /// Number of signal actions installed
    pub fn signal_count(&self) -> usize {
        self.ids.len()
    }
}

impl Drop for ShutdownGuard {
    fn drop(&mut self) {
        if self.log_exit {
            (self.handler)(ShutdownEvent::Exit, epoch_seconds());
        }
    }
}

/// Register `handler` for `signals` and for normal exit.
///
/// Call once during process initialization. Each signal's action reports the
/// event then exits with the signal number; the previous disposition is not
/// restored.
pub fn register_shutdown_handler(
    signals: &[ShutdownSignal],
    handler: ShutdownHandler,
    log_exit: bool,
) -> Result<ShutdownGuard> {
    let mut ids = Vec::with_capacity(signals.len());

    for &signal in signals {
        // SAFETY: the action only formats on the stack, issues write(2) and
        // _exit(2). register_unchecked is required because SIGSEGV is in
        // signal-hook's forbidden set.
        let id = unsafe {
            signal_hook_registry::register_unchecked(signal.number(), move |_| {
                handler(ShutdownEvent::Signal(signal), epoch_seconds());
                low_level::exit(signal.number());
            })
        }
        .map_err(|e| RespawnError::Signal(format!("{}: {}", signal, e)))?;
        ids.push(id);
    }

    log::debug!("Registered termination logger for {} signal(s)", ids.len());

    Ok(ShutdownGuard {
        handler,
        log_exit,
        ids,
    })
}
