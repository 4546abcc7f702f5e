//! Per-mode specification tables and derived calculations.

use crate::domain::ToolMode;
use crate::stats::reducer::{LIGHT_SPEED, safe_div};

/// Tape blade length per extension: 25 ft in mm
const TAPE_MM_PER_CYCLE: f64 = 25.0 * 12.0 * 25.4;
const SCREW_PITCH_MM: f64 = 1.25;
/// Wire feed in m/s
const WELD_WIRE_SPEED: f64 = 4.5 / 60.0;
const WELD_POWER_W: f64 = 24.0 * 150.0;
const HAMMER_FORCE_N: f64 = 50.0;
const HAMMER_TRAVEL_M: f64 = 0.025;
const HAMMER_FACE_RADIUS_M: f64 = 0.0125;
const SAW_STROKE_MM: f64 = 150.0;
const SAW_KERF_MM: f64 = 2.5;
const WRENCH_MAX_TORQUE: f64 = 25.0;
const WRENCH_HANDLE_MM: f64 = 200.0;
const WRENCH_SIZE_MM: f64 = 10.0;

/// One row of a tool's static specification sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Specification {
    pub label: &'static str,
    pub value: &'static str,
}

const fn spec(label: &'static str, value: &'static str) -> Specification {
    Specification { label, value }
}

const TAPE_MEASURE_SPECS: &[Specification] = &[
    spec("Length", "25 feet (7.62m)"),
    spec("Width", "1 inch (25.4mm)"),
    spec("Graduations", "1/16 inch"),
    spec("Material", "Steel"),
];

const SCREWDRIVER_SPECS: &[Specification] = &[
    spec("Diameter", "8.0 mm"),
    spec("Thread Pitch", "1.25 mm/turn"),
    spec("Length", "20.0 mm"),
];

const WELDER_SPECS: &[Specification] = &[
    spec("Voltage", "24.0 volts"),
    spec("Amperage", "150.0 amps"),
    spec("Wire Speed", "4.5 m/min"),
    spec("Electrode Diameter", "0.8 mm"),
];

const HAMMER_SPECS: &[Specification] = &[
    spec("Weight", "500g"),
    spec("Head Diameter", "25mm"),
    spec("Handle Length", "350mm"),
    spec("Strike Force", "50N"),
];

const SAW_SPECS: &[Specification] = &[
    spec("Blade Length", "500mm"),
    spec("Teeth Per Inch", "8 TPI"),
    spec("Kerf Width", "2.5mm"),
    spec("Stroke Length", "150mm"),
];

const WRENCH_SPECS: &[Specification] = &[
    spec("Size", "10mm"),
    spec("Handle Length", "200mm"),
    spec("Max Torque", "25 N⋅m"),
    spec("Ratchet Teeth", "72 teeth"),
];

/// Static specification sheet for a mode
pub fn specifications(mode: ToolMode) -> &'static [Specification] {
    match mode {
        ToolMode::TapeMeasure => TAPE_MEASURE_SPECS,
        ToolMode::Screwdriver => SCREWDRIVER_SPECS,
        ToolMode::Welder => WELDER_SPECS,
        ToolMode::Hammer => HAMMER_SPECS,
        ToolMode::Saw => SAW_SPECS,
        ToolMode::Wrench => WRENCH_SPECS,
    }
}

/// Derived metrics, one variant per mode.
#[derive(Debug, Clone, PartialEq)]
pub enum Calculations {
    TapeMeasure {
        measurements_per_second: f64,
        extension_speed: f64,
        total_distance_measured: f64,
        precision: f64,
    },
    Screwdriver {
        rotations_per_second: f64,
        linear_advance_per_second: f64,
        total_linear_advance: f64,
        torque: f64,
    },
    Welder {
        arc_cycles_per_second: f64,
        wire_consumption_per_cycle: f64,
        total_wire_consumed: f64,
        heat_input_per_cycle: f64,
        total_heat_input: f64,
    },
    Hammer {
        strikes_per_second: f64,
        energy_per_strike: f64,
        total_energy: f64,
        impact_pressure: f64,
    },
    Saw {
        strokes_per_second: f64,
        cutting_speed: f64,
        total_distance_cut: f64,
        material_removed: f64,
    },
    Wrench {
        turns_per_second: f64,
        applied_torque: f64,
        total_work: f64,
        leverage_ratio: f64,
    },
}

fn hammer_impact_pressure() -> f64 {
    HAMMER_FORCE_N / (3.14159 * HAMMER_FACE_RADIUS_M * HAMMER_FACE_RADIUS_M)
}

impl Calculations {
    /// Compute a mode's metrics from the cycle count and mean cycle delta.
    pub fn compute(mode: ToolMode, cycle_count: usize, avg_delta: f64) -> Self {
        let n = cycle_count as f64;
        let per_second = safe_div(1.0, avg_delta);

        match mode {
            ToolMode::TapeMeasure => Calculations::TapeMeasure {
                measurements_per_second: per_second,
                extension_speed: safe_div(TAPE_MM_PER_CYCLE, avg_delta),
                total_distance_measured: n * TAPE_MM_PER_CYCLE,
                precision: 1.0 / 16.0,
            },
            ToolMode::Screwdriver => Calculations::Screwdriver {
                rotations_per_second: per_second,
                linear_advance_per_second: per_second * SCREW_PITCH_MM,
                total_linear_advance: n * SCREW_PITCH_MM,
                torque: 10.0 + avg_delta * 5.0,
            },
            ToolMode::Welder => Calculations::Welder {
                arc_cycles_per_second: per_second,
                wire_consumption_per_cycle: WELD_WIRE_SPEED * avg_delta,
                total_wire_consumed: n * WELD_WIRE_SPEED * avg_delta,
                heat_input_per_cycle: WELD_POWER_W * avg_delta / 1000.0,
                total_heat_input: n * WELD_POWER_W * avg_delta / 1000.0,
            },
            ToolMode::Hammer => Calculations::Hammer {
                strikes_per_second: per_second,
                energy_per_strike: HAMMER_FORCE_N * HAMMER_TRAVEL_M,
                total_energy: n * HAMMER_FORCE_N * HAMMER_TRAVEL_M,
                impact_pressure: hammer_impact_pressure(),
            },
            ToolMode::Saw => Calculations::Saw {
                strokes_per_second: per_second,
                cutting_speed: safe_div(SAW_STROKE_MM / 1000.0, avg_delta),
                total_distance_cut: n * SAW_STROKE_MM,
                material_removed: n * SAW_STROKE_MM * SAW_KERF_MM * 10.0,
            },
            ToolMode::Wrench => Calculations::Wrench {
                turns_per_second: per_second,
                applied_torque: WRENCH_MAX_TORQUE * (avg_delta / 2.0),
                total_work: n * WRENCH_MAX_TORQUE * 6.28,
                leverage_ratio: WRENCH_HANDLE_MM / WRENCH_SIZE_MM,
            },
        }
    }

    /// Labelled metrics in display order
    pub fn metrics(&self) -> Vec<(&'static str, f64)> {
        match *self {
            Calculations::TapeMeasure {
                measurements_per_second,
                extension_speed,
                total_distance_measured,
                precision,
            } => vec![
                ("Measurements/Second", measurements_per_second),
                ("Extension Speed", extension_speed),
                ("Total Distance Measured", total_distance_measured),
                ("Precision", precision),
            ],
            Calculations::Screwdriver {
                rotations_per_second,
                linear_advance_per_second,
                total_linear_advance,
                torque,
            } => vec![
                ("Rotations/Second", rotations_per_second),
                ("Linear Advance/Second", linear_advance_per_second),
                ("Total Linear Advance", total_linear_advance),
                ("Torque", torque),
            ],
            Calculations::Welder {
                arc_cycles_per_second,
                wire_consumption_per_cycle,
                total_wire_consumed,
                heat_input_per_cycle,
                total_heat_input,
            } => vec![
                ("Arc Cycles/Second", arc_cycles_per_second),
                ("Wire Consumption/Cycle", wire_consumption_per_cycle),
                ("Total Wire Consumed", total_wire_consumed),
                ("Heat Input/Cycle", heat_input_per_cycle),
                ("Total Heat Input", total_heat_input),
            ],
            Calculations::Hammer {
                strikes_per_second,
                energy_per_strike,
                total_energy,
                impact_pressure,
            } => vec![
                ("Strikes/Second", strikes_per_second),
                ("Energy/Strike", energy_per_strike),
                ("Total Energy", total_energy),
                ("Impact Pressure", impact_pressure),
            ],
            Calculations::Saw {
                strokes_per_second,
                cutting_speed,
                total_distance_cut,
                material_removed,
            } => vec![
                ("Strokes/Second", strokes_per_second),
                ("Cutting Speed", cutting_speed),
                ("Total Distance Cut", total_distance_cut),
                ("Material Removed", material_removed),
            ],
            Calculations::Wrench {
                turns_per_second,
                applied_torque,
                total_work,
                leverage_ratio,
            } => vec![
                ("Turns/Second", turns_per_second),
                ("Applied Torque", applied_torque),
                ("Total Work", total_work),
                ("Leverage Ratio", leverage_ratio),
            ],
        }
    }
}

/// A mode-specific extra report line. `value` is `None` when the line's
/// inputs are insufficient.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeNote {
    pub label: &'static str,
    pub value: Option<f64>,
    pub unit: &'static str,
}

impl ModeNote {
    fn known(label: &'static str, value: f64, unit: &'static str) -> Self {
        Self {
            label,
            value: Some(value),
            unit,
        }
    }

    fn when(ok: bool, label: &'static str, value: f64, unit: &'static str) -> Self {
        Self {
            label,
            value: ok.then_some(value),
            unit,
        }
    }
}

/// Extra lines appended after the calculated metrics
pub fn mode_notes(mode: ToolMode, cycle_count: usize, avg_delta: f64) -> Vec<ModeNote> {
    let n = cycle_count as f64;
    let has_delta = avg_delta > 0.0;

    match mode {
        ToolMode::TapeMeasure => vec![
            ModeNote::known("Net Extension", n * TAPE_MM_PER_CYCLE, "mm"),
            ModeNote::when(has_delta, "Average Speed", avg_delta * LIGHT_SPEED, "m/s"),
            ModeNote::when(
                has_delta,
                "Calculated Length",
                avg_delta * LIGHT_SPEED * avg_delta / 2.0,
                "meters",
            ),
        ],
        ToolMode::Screwdriver => vec![ModeNote::known("Net Linear Advance", n * SCREW_PITCH_MM, "mm")],
        ToolMode::Welder => vec![ModeNote::known(
            "Deposition Rate",
            WELD_WIRE_SPEED * avg_delta * 0.785 * 0.8 * 0.8,
            "cm³/cycle",
        )],
        ToolMode::Hammer => vec![ModeNote::known("Impact Pressure", hammer_impact_pressure(), "Pa")],
        ToolMode::Saw => {
            let ok = has_delta && cycle_count > 0;
            let efficiency = if ok { (n * SAW_STROKE_MM) / (avg_delta * n) } else { 0.0 };
            vec![ModeNote::when(ok, "Cutting Efficiency", efficiency, "mm/s")]
        }
        ToolMode::Wrench => vec![ModeNote::known(
            "Mechanical Advantage",
            WRENCH_HANDLE_MM / WRENCH_SIZE_MM,
            ":1",
        )],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(calcs: &Calculations, label: &str) -> f64 {
        calcs
            .metrics()
            .into_iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| v)
            .unwrap()
    }

    #[test]
    fn test_hammer_total_energy() {
        let calcs = Calculations::compute(ToolMode::Hammer, 5, 0.2);
        assert!((metric(&calcs, "Total Energy") - 6.25).abs() < 1e-12);
        assert!((metric(&calcs, "Energy/Strike") - 1.25).abs() < 1e-12);
        assert!((metric(&calcs, "Strikes/Second") - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_delta_throughput_is_zero_for_every_mode() {
        for mode in ToolMode::ALL {
            let calcs = Calculations::compute(mode, 1, 0.0);
            for (label, value) in calcs.metrics() {
                assert!(value.is_finite(), "{mode} {label} = {value}");
            }
            assert_eq!(calcs.metrics()[0].1, 0.0, "{mode}");
        }
    }

    #[test]
    fn test_negative_delta_does_not_divide() {
        let calcs = Calculations::compute(ToolMode::Saw, 3, -0.5);
        assert_eq!(metric(&calcs, "Strokes/Second"), 0.0);
        assert_eq!(metric(&calcs, "Cutting Speed"), 0.0);
    }

    #[test]
    fn test_tape_measure_totals() {
        let calcs = Calculations::compute(ToolMode::TapeMeasure, 2, 0.5);
        assert!((metric(&calcs, "Total Distance Measured") - 15_240.0).abs() < 1e-9);
        assert!((metric(&calcs, "Extension Speed") - 15_240.0).abs() < 1e-9);
        assert_eq!(metric(&calcs, "Precision"), 0.0625);
    }

    #[test]
    fn test_wrench_constants() {
        let calcs = Calculations::compute(ToolMode::Wrench, 4, 0.2);
        assert!((metric(&calcs, "Total Work") - 628.0).abs() < 1e-9);
        assert_eq!(metric(&calcs, "Leverage Ratio"), 20.0);
        assert!((metric(&calcs, "Applied Torque") - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_screwdriver_torque_and_advance() {
        let calcs = Calculations::compute(ToolMode::Screwdriver, 4, 0.5);
        assert!((metric(&calcs, "Linear Advance/Second") - 2.5).abs() < 1e-12);
        assert_eq!(metric(&calcs, "Total Linear Advance"), 5.0);
        assert_eq!(metric(&calcs, "Torque"), 12.5);
    }

    #[test]
    fn test_welder_heat_input() {
        let calcs = Calculations::compute(ToolMode::Welder, 2, 1.0);
        assert!((metric(&calcs, "Heat Input/Cycle") - 3.6).abs() < 1e-12);
        assert!((metric(&calcs, "Total Heat Input") - 7.2).abs() < 1e-12);
    }

    #[test]
    fn test_saw_material_removed() {
        let calcs = Calculations::compute(ToolMode::Saw, 2, 0.5);
        assert_eq!(metric(&calcs, "Material Removed"), 7_500.0);
        assert!((metric(&calcs, "Cutting Speed") - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_every_mode_has_specifications() {
        for mode in ToolMode::ALL {
            assert!(!specifications(mode).is_empty());
        }
        assert_eq!(specifications(ToolMode::Screwdriver)[1].value, "1.25 mm/turn");
    }

    #[test]
    fn test_tape_notes_unavailable_without_delta() {
        let notes = mode_notes(ToolMode::TapeMeasure, 1, 0.0);
        assert_eq!(notes[0].value, Some(TAPE_MM_PER_CYCLE));
        assert_eq!(notes[1].value, None);
        assert_eq!(notes[2].value, None);
    }

    #[test]
    fn test_saw_efficiency_note() {
        let notes = mode_notes(ToolMode::Saw, 4, 0.5);
        assert_eq!(notes[0].value, Some(300.0));
        assert_eq!(mode_notes(ToolMode::Saw, 4, 0.0)[0].value, None);
    }

    #[test]
    fn test_wrench_mechanical_advantage_note() {
        let notes = mode_notes(ToolMode::Wrench, 0, 0.0);
        assert_eq!(notes[0].value, Some(20.0));
        assert_eq!(notes[0].unit, ":1");
    }
}
