//! Duration formatting for display

use std::time::Duration;

/// Render a duration as `"{h}h {m}m {s}s"`, truncating partial seconds
pub fn format_hms(duration: Duration) -> String {
    let total = duration.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{}h {}m {}s", hours, minutes, seconds)
}

/// Compact uptime string that omits leading zero units
pub fn format_uptime(duration: Duration) -> String {
    let hours = duration.as_secs() / 3600;
    let minutes = (duration.as_secs() % 3600) / 60;
    let seconds = duration.as_secs() % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hms_always_shows_all_units() {
        assert_eq!(format_hms(Duration::ZERO), "0h 0m 0s");
        assert_eq!(format_hms(Duration::from_secs(3725)), "1h 2m 5s");
        assert_eq!(format_hms(Duration::from_secs(26 * 3600)), "26h 0m 0s");
    }

    #[test]
    fn hms_truncates_fractional_seconds() {
        assert_eq!(format_hms(Duration::from_secs_f64(59.999)), "0h 0m 59s");
    }

    #[test]
    fn uptime_drops_empty_leading_units() {
        assert_eq!(format_uptime(Duration::from_secs(42)), "42s");
        assert_eq!(format_uptime(Duration::from_secs(125)), "2m 5s");
        assert_eq!(format_uptime(Duration::from_secs(3661)), "1h 1m 1s");
    }
}
