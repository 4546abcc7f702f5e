//! Cycle directions and their bucketing.

use std::fmt;

/// Direction a simulated tool moves during one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Extend,
    Retract,
    Left,
    Right,
    Forward,
    Back,
    Strike,
    Tighten,
    Loosen,
}

/// Tally bucket for a direction.
///
/// The left/right report columns count `Negative` and `Positive` respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectionBucket {
    Negative,
    Positive,
}

impl Direction {
    pub const ALL: [Direction; 9] = [
        Direction::Extend,
        Direction::Retract,
        Direction::Left,
        Direction::Right,
        Direction::Forward,
        Direction::Back,
        Direction::Strike,
        Direction::Tighten,
        Direction::Loosen,
    ];

    /// Classify into exactly one bucket.
    pub fn bucket(self) -> DirectionBucket {
        match self {
            Direction::Left | Direction::Back | Direction::Loosen | Direction::Retract => DirectionBucket::Negative,
            Direction::Extend | Direction::Right | Direction::Forward | Direction::Strike | Direction::Tighten => {
                DirectionBucket::Positive
            }
        }
    }

    pub fn is_negative(self) -> bool {
        self.bucket() == DirectionBucket::Negative
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Extend => "EXTEND",
            Direction::Retract => "RETRACT",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
            Direction::Forward => "FORWARD",
            Direction::Back => "BACK",
            Direction::Strike => "STRIKE",
            Direction::Tighten => "TIGHTEN",
            Direction::Loosen => "LOOSEN",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
