//! respawn - a process restart latency harness
//!
//! Each cycle terminates every other instance of this program, asks the OS to
//! relaunch it, and records when the request was issued. After the loop the
//! recorded timestamps are reduced into latency statistics.

pub mod app;
pub mod cli;
pub mod clock;
pub mod config;
pub mod domain;
pub mod error;
pub mod lifecycle;
pub mod report;
pub mod runner;
pub mod shutdown;
pub mod stats;

pub use error::{RespawnError, Result};
