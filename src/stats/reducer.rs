//! Reduction of recorded cycles into latency statistics.
//!
//! Every division by a value that may be zero short-circuits to `0.0`.

use crate::domain::CycleRecord;

/// Speed of light in m/s, used as an illustrative multiplier
pub const LIGHT_SPEED: f64 = 299_792_458.0;

/// Latency statistics over successive cycles.
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub deltas: Vec<f64>,
    pub avg_delta: f64,
    pub avg_speed: f64,
    pub avg_length: f64,
}

/// Net tally direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetDirection {
    Right,
    Left,
    Neutral,
}

impl NetDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            NetDirection::Right => "right",
            NetDirection::Left => "left",
            NetDirection::Neutral => "neutral",
        }
    }
}

/// Left/right tallies and per-bucket average elapsed times.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalStats {
    pub left_cycles: usize,
    pub right_cycles: usize,
    pub avg_left_elapsed: f64,
    pub avg_right_elapsed: f64,
}

impl DirectionalStats {
    pub fn net_cycles(&self) -> i64 {
        self.right_cycles as i64 - self.left_cycles as i64
    }

    pub fn net_direction(&self) -> NetDirection {
        match self.net_cycles() {
            n if n > 0 => NetDirection::Right,
            n if n < 0 => NetDirection::Left,
            _ => NetDirection::Neutral,
        }
    }
}

/// `numerator / denominator`, or `0.0` unless the denominator is positive.
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 { numerator / denominator } else { 0.0 }
}

/// Arithmetic mean; `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Differences between chronologically adjacent records.
pub fn successive_differences(records: &[CycleRecord]) -> Vec<f64> {
    records
        .windows(2)
        .map(|pair| pair[1].elapsed_seconds - pair[0].elapsed_seconds)
        .collect()
}

/// Reduce records into latency statistics.
pub fn reduce(records: &[CycleRecord]) -> Stats {
    let deltas = successive_differences(records);
    let avg_delta = mean(&deltas);
    let avg_speed = avg_delta * LIGHT_SPEED;
    let avg_length = avg_speed * avg_delta / 2.0;

    Stats {
        deltas,
        avg_delta,
        avg_speed,
        avg_length,
    }
}

/// Partition records by direction bucket and average each side.
///
/// Records without a direction count as positive.
pub fn reduce_directional(records: &[CycleRecord]) -> DirectionalStats {
    let (left, right): (Vec<&CycleRecord>, Vec<&CycleRecord>) = records
        .iter()
        .partition(|r| r.direction.is_some_and(|d| d.is_negative()));

    let left_times: Vec<f64> = left.iter().map(|r| r.elapsed_seconds).collect();
    let right_times: Vec<f64> = right.iter().map(|r| r.elapsed_seconds).collect();

    DirectionalStats {
        left_cycles: left.len(),
        right_cycles: right.len(),
        avg_left_elapsed: mean(&left_times),
        avg_right_elapsed: mean(&right_times),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Direction, ToolMode};

    fn records(times: &[f64]) -> Vec<CycleRecord> {
        times
            .iter()
            .enumerate()
            .map(|(index, &elapsed_seconds)| CycleRecord {
                index,
                elapsed_seconds,
                direction: None,
            })
            .collect()
    }

    fn mode_records(mode: ToolMode, times: &[f64]) -> Vec<CycleRecord> {
        times
            .iter()
            .enumerate()
            .map(|(index, &elapsed_seconds)| CycleRecord {
                index,
                elapsed_seconds,
                direction: Some(mode.direction_for(index)),
            })
            .collect()
    }

    fn approx(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() <= tolerance
    }

    #[test]
    fn test_three_cycle_scenario() {
        let stats = reduce(&records(&[0.10, 0.25, 0.42]));
        assert_eq!(stats.deltas.len(), 2);
        assert!(approx(stats.deltas[0], 0.15, 1e-12));
        assert!(approx(stats.deltas[1], 0.17, 1e-12));
        assert!(approx(stats.avg_delta, 0.16, 1e-12));
        assert!(approx(stats.avg_speed, 47_966_793.28, 1e-3));
        assert!(approx(stats.avg_length, 3_837_343.46, 1e-2));
    }

    #[test]
    fn test_single_record_has_no_deltas() {
        let stats = reduce(&records(&[0.5]));
        assert!(stats.deltas.is_empty());
        assert_eq!(stats.avg_delta, 0.0);
        assert_eq!(stats.avg_speed, 0.0);
        assert_eq!(stats.avg_length, 0.0);
    }

    #[test]
    fn test_empty_records() {
        let stats = reduce(&[]);
        assert_eq!(stats.avg_delta, 0.0);
        assert!(stats.avg_speed.is_finite());
    }

    #[test]
    fn test_clock_regression_is_averaged() {
        let stats = reduce(&records(&[1.0, 0.5, 0.75]));
        assert!(approx(stats.avg_delta, -0.125, 1e-12));
    }

    #[test]
    fn test_reduce_is_idempotent() {
        let recs = records(&[0.0, 0.2, 0.9, 1.1]);
        assert_eq!(reduce(&recs), reduce(&recs));
        assert_eq!(reduce_directional(&recs), reduce_directional(&recs));
    }

    #[test]
    fn test_safe_div_guards() {
        assert_eq!(safe_div(1.0, 0.0), 0.0);
        assert_eq!(safe_div(1.0, -2.0), 0.0);
        assert_eq!(safe_div(1.0, 4.0), 0.25);
    }

    #[test]
    fn test_mean_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[2.0, 4.0]), 3.0);
    }

    #[test]
    fn test_wrench_directional_tally() {
        let stats = reduce_directional(&mode_records(ToolMode::Wrench, &[0.1, 0.2, 0.3, 0.4]));
        assert_eq!(stats.left_cycles, 2);
        assert_eq!(stats.right_cycles, 2);
        assert_eq!(stats.net_cycles(), 0);
        assert_eq!(stats.net_direction(), NetDirection::Neutral);
        assert!(approx(stats.avg_left_elapsed, 0.3, 1e-12));
        assert!(approx(stats.avg_right_elapsed, 0.2, 1e-12));
    }

    #[test]
    fn test_hammer_is_all_positive() {
        let stats = reduce_directional(&mode_records(ToolMode::Hammer, &[0.1, 0.2, 0.3, 0.4, 0.5]));
        assert_eq!(stats.left_cycles, 0);
        assert_eq!(stats.right_cycles, 5);
        assert_eq!(stats.avg_left_elapsed, 0.0);
        assert_eq!(stats.net_direction(), NetDirection::Right);
    }

    #[test]
    fn test_odd_screwdriver_run_leans_left() {
        let stats = reduce_directional(&mode_records(ToolMode::Screwdriver, &[0.1, 0.2, 0.3]));
        assert_eq!(stats.left_cycles, 2);
        assert_eq!(stats.right_cycles, 1);
        assert_eq!(stats.net_direction(), NetDirection::Left);
    }

    #[test]
    fn test_records_without_direction_are_positive() {
        let mut recs = records(&[0.1, 0.2]);
        recs[1].direction = Some(Direction::Back);
        let stats = reduce_directional(&recs);
        assert_eq!(stats.left_cycles, 1);
        assert_eq!(stats.right_cycles, 1);
    }
}
