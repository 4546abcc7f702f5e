//! Statistics Reducer - latency reduction and per-mode derived metrics

pub mod reducer;
pub mod tables;

pub use reducer::{
    DirectionalStats, LIGHT_SPEED, NetDirection, Stats, mean, reduce, reduce_directional, safe_div,
    successive_differences,
};
pub use tables::{Calculations, ModeNote, Specification, mode_notes, specifications};
