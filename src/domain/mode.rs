//! Workshop tool modes.

use std::fmt;
use std::str::FromStr;

use crate::domain::Direction;
use crate::error::RespawnError;

/// Mode names accepted on the command line, aliases included.
pub const ACCEPTED_MODES: [&str; 7] = ["tape measure", "tape", "screwdriver", "welder", "hammer", "saw", "wrench"];

/// A simulated workshop tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolMode {
    TapeMeasure,
    Screwdriver,
    Welder,
    Hammer,
    Saw,
    Wrench,
}

impl ToolMode {
    pub const ALL: [ToolMode; 6] = [
        ToolMode::TapeMeasure,
        ToolMode::Screwdriver,
        ToolMode::Welder,
        ToolMode::Hammer,
        ToolMode::Saw,
        ToolMode::Wrench,
    ];

    /// Canonical lower-case name
    pub fn name(self) -> &'static str {
        match self {
            ToolMode::TapeMeasure => "tape measure",
            ToolMode::Screwdriver => "screwdriver",
            ToolMode::Welder => "welder",
            ToolMode::Hammer => "hammer",
            ToolMode::Saw => "saw",
            ToolMode::Wrench => "wrench",
        }
    }

    /// Capitalised name, e.g. "Tape Measure"
    pub fn title(self) -> String {
        self.name()
            .split(' ')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// What one cycle is called in progress output
    pub fn cycle_label(self) -> &'static str {
        match self {
            ToolMode::TapeMeasure => "Measurement",
            ToolMode::Screwdriver => "Turn",
            ToolMode::Welder => "Arc",
            ToolMode::Hammer => "Blow",
            ToolMode::Saw => "Stroke",
            ToolMode::Wrench => "Turn",
        }
    }

    /// Direction of the cycle at `index`; reversible tools alternate starting
    /// with their first direction on even indices.
    pub fn direction_for(self, index: usize) -> Direction {
        let even = index % 2 == 0;
        match self {
            ToolMode::TapeMeasure if even => Direction::Extend,
            ToolMode::TapeMeasure => Direction::Retract,
            ToolMode::Screwdriver if even => Direction::Left,
            ToolMode::Screwdriver => Direction::Right,
            ToolMode::Welder => Direction::Forward,
            ToolMode::Hammer => Direction::Strike,
            ToolMode::Saw if even => Direction::Forward,
            ToolMode::Saw => Direction::Back,
            ToolMode::Wrench if even => Direction::Tighten,
            ToolMode::Wrench => Direction::Loosen,
        }
    }
}

impl fmt::Display for ToolMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolMode {
    type Err = RespawnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tape measure" | "tape" => Ok(ToolMode::TapeMeasure),
            "screwdriver" => Ok(ToolMode::Screwdriver),
            "welder" => Ok(ToolMode::Welder),
            "hammer" => Ok(ToolMode::Hammer),
            "saw" => Ok(ToolMode::Saw),
            "wrench" => Ok(ToolMode::Wrench),
            _ => Err(RespawnError::Usage(format!(
                "Invalid mode. Available modes: {}",
                ACCEPTED_MODES.join(", ")
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("WELDER".parse::<ToolMode>().unwrap(), ToolMode::Welder);
        assert_eq!("Tape Measure".parse::<ToolMode>().unwrap(), ToolMode::TapeMeasure);
    }

    #[test]
    fn test_tape_alias() {
        assert_eq!("tape".parse::<ToolMode>().unwrap(), ToolMode::TapeMeasure);
        assert_eq!("TAPE".parse::<ToolMode>().unwrap(), ToolMode::TapeMeasure);
    }

    #[test]
    fn test_unknown_mode_is_usage_error() {
        let err = "hacksaw".parse::<ToolMode>().unwrap_err();
        assert!(err.is_usage());
        assert!(err.to_string().contains("tape measure, tape, screwdriver"));
    }

    #[test]
    fn test_every_mode_round_trips_through_name() {
        for mode in ToolMode::ALL {
            assert_eq!(mode.name().parse::<ToolMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_title() {
        assert_eq!(ToolMode::TapeMeasure.title(), "Tape Measure");
        assert_eq!(ToolMode::Saw.title(), "Saw");
    }

    #[test]
    fn test_alternating_directions() {
        assert_eq!(ToolMode::TapeMeasure.direction_for(0), Direction::Extend);
        assert_eq!(ToolMode::TapeMeasure.direction_for(1), Direction::Retract);
        assert_eq!(ToolMode::Screwdriver.direction_for(2), Direction::Left);
        assert_eq!(ToolMode::Saw.direction_for(3), Direction::Back);
        assert_eq!(ToolMode::Wrench.direction_for(0), Direction::Tighten);
        assert_eq!(ToolMode::Wrench.direction_for(1), Direction::Loosen);
    }

    #[test]
    fn test_constant_directions() {
        for i in 0..4 {
            assert_eq!(ToolMode::Welder.direction_for(i), Direction::Forward);
            assert_eq!(ToolMode::Hammer.direction_for(i), Direction::Strike);
        }
    }

    #[test]
    fn test_cycle_labels() {
        assert_eq!(ToolMode::Hammer.cycle_label(), "Blow");
        assert_eq!(ToolMode::Welder.cycle_label(), "Arc");
        assert_eq!(ToolMode::Wrench.cycle_label(), "Turn");
    }
}
