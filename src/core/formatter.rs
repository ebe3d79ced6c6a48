use crate::core::classify::Check;

const SECONDS_PER_DAY: u64 = 86_400;

/// Zero-padded `HH:MM:SS`, prefixed with `N day(s), ` past the first day.
pub fn format_clock(seconds: u64) -> String {
    let (days, rem) = split_days(seconds);
    let clock = format!("{:02}:{:02}:{:02}", rem / 3600, (rem % 3600) / 60, rem % 60);
    with_day_prefix(days, clock)
}

/// Same layout as [`format_clock`] but the hour field is not padded
/// (`0:01:00`, `1 day, 0:00:01`).
pub fn format_timedelta(seconds: u64) -> String {
    let (days, rem) = split_days(seconds);
    let clock = format!("{}:{:02}:{:02}", rem / 3600, (rem % 3600) / 60, rem % 60);
    with_day_prefix(days, clock)
}

pub fn format_report_line(check: &Check) -> String {
    format!("{} - {}", check.severity, check.message)
}

fn split_days(seconds: u64) -> (u64, u64) {
    (seconds / SECONDS_PER_DAY, seconds % SECONDS_PER_DAY)
}

fn with_day_prefix(days: u64, clock: String) -> String {
    match days {
        0 => clock,
        1 => format!("1 day, {clock}"),
        n => format!("{n} days, {clock}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classify::Severity;

    #[test]
    fn clock_matches_known_values() {
        let cases = [
            (60, "00:01:00"),
            (300, "00:05:00"),
            (3601, "01:00:01"),
            (86401, "1 day, 00:00:01"),
            (604800, "7 days, 00:00:00"),
        ];
        for (seconds, expected) in cases {
            assert_eq!(format_clock(seconds), expected);
        }
    }

    #[test]
    fn clock_day_prefix_boundaries() {
        assert_eq!(format_clock(0), "00:00:00");
        assert_eq!(format_clock(86_399), "23:59:59");
        assert_eq!(format_clock(86_400), "1 day, 00:00:00");
        assert_eq!(format_clock(172_799), "1 day, 23:59:59");
        assert_eq!(format_clock(172_800), "2 days, 00:00:00");
    }

    #[test]
    fn day_prefix_only_from_one_day_on() {
        for seconds in (0..400_000).step_by(997) {
            let text = format_clock(seconds);
            assert_eq!(text.contains("day"), seconds >= 86_400, "{seconds}");
            assert_eq!(
                text.contains("1 day,"),
                (86_400..172_800).contains(&seconds),
                "{seconds}"
            );
        }
    }

    #[test]
    fn timedelta_leaves_hours_unpadded() {
        assert_eq!(format_timedelta(1), "0:00:01");
        assert_eq!(format_timedelta(60), "0:01:00");
        assert_eq!(format_timedelta(3601), "1:00:01");
        assert_eq!(format_timedelta(86_401), "1 day, 0:00:01");
        assert_eq!(format_timedelta(29 * 86_400 + 1), "29 days, 0:00:01");
        assert_eq!(format_timedelta(36_000), "10:00:00");
    }

    #[test]
    fn report_line_prefixes_severity() {
        let check = Check {
            severity: Severity::Warning,
            message: "test is marked as unstable".to_string(),
        };
        assert_eq!(format_report_line(&check), "WARNING - test is marked as unstable");
    }
}
