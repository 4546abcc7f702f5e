//! Domain types - tool modes, directions, and run sessions

pub mod direction;
pub mod mode;
pub mod session;

pub use direction::{Direction, DirectionBucket};
pub use mode::{ACCEPTED_MODES, ToolMode};
pub use session::{CycleRecord, RunSession};
