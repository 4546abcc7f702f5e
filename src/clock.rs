//! Wall-clock helpers

use chrono::Utc;

/// Current wall-clock time as fractional seconds since the Unix epoch.
///
/// Not monotonic: callers must tolerate the value moving backwards.
pub fn epoch_seconds() -> f64 {
    let now = Utc::now();
    now.timestamp() as f64 + f64::from(now.timestamp_subsec_nanos()) / 1_000_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_seconds_is_recent() {
        // 2020-01-01T00:00:00Z
        assert!(epoch_seconds() > 1_577_836_800.0);
    }

    #[test]
    fn test_epoch_seconds_has_subsecond_part() {
        let a = epoch_seconds();
        let b = epoch_seconds();
        assert!(b - a < 1.0);
        assert!(a.fract() >= 0.0);
    }
}
