//! Duration parsing and formatting.

/// Format seconds as a clock: `MM:SS`, or `H:MM:SS` from one hour up.
#[must_use]
pub fn format_clock(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}

/// Format seconds as a human-readable string.
#[must_use]
pub fn format_duration(seconds: u64) -> String {
    let total_minutes = seconds / 60;

    if total_minutes < 1 {
        return format!("{} second{}", seconds, plural(seconds));
    }

    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    match (hours, minutes) {
        (0, m) => format!("{m} minute{}", plural(m)),
        (h, 0) => format!("{h} hour{}", plural(h)),
        (h, m) => format!("{h} hour{}, {m} minute{}", plural(h), plural(m)),
    }
}

const fn plural(n: u64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Parse a duration string like "25m", "1h30m", "90s" into seconds.
///
/// A bare number is taken as minutes. Values that overflow are rejected.
#[must_use]
pub fn parse_duration(s: &str) -> Option<u64> {
    let s = s.trim().to_lowercase();

    if let Ok(minutes) = s.parse::<u64>() {
        return minutes.checked_mul(60).filter(|&secs| secs > 0);
    }

    let mut total_seconds: u64 = 0;
    let mut current_num = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            current_num.push(c);
        } else if !current_num.is_empty() {
            let num: u64 = current_num.parse().ok()?;
            current_num.clear();

            let unit = match c {
                'h' => 3600,
                'm' => 60,
                's' => 1,
                _ => return None,
            };
            total_seconds = total_seconds.checked_add(num.checked_mul(unit)?)?;
        } else {
            return None;
        }
    }

    // Trailing number without unit counts as minutes
    if !current_num.is_empty() {
        let num: u64 = current_num.parse().ok()?;
        total_seconds = total_seconds.checked_add(num.checked_mul(60)?)?;
    }

    (total_seconds > 0).then_some(total_seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(90), "01:30");
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(3725), "1:02:05");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(45), "45 seconds");
        assert_eq!(format_duration(1), "1 second");
        assert_eq!(format_duration(25 * 60), "25 minutes");
        assert_eq!(format_duration(60), "1 minute");
        assert_eq!(format_duration(2 * 3600), "2 hours");
        assert_eq!(format_duration(90 * 60), "1 hour, 30 minutes");
    }

    #[test]
    fn test_parse_duration_minutes() {
        assert_eq!(parse_duration("25"), Some(1500));
        assert_eq!(parse_duration("25m"), Some(1500));
    }

    #[test]
    fn test_parse_duration_hours() {
        assert_eq!(parse_duration("1h"), Some(3600));
        assert_eq!(parse_duration("2h30m"), Some(9000));
    }

    #[test]
    fn test_parse_duration_seconds() {
        assert_eq!(parse_duration("90s"), Some(90));
        assert_eq!(parse_duration("1m30s"), Some(90));
    }

    #[test]
    fn test_parse_duration_invalid() {
        assert!(parse_duration("").is_none());
        assert!(parse_duration("abc").is_none());
        assert!(parse_duration("0").is_none());
        assert!(parse_duration("5x").is_none());
    }

    #[test]
    fn test_parse_duration_overflow() {
        assert!(parse_duration("999999999999999999").is_none());
        assert!(parse_duration("999999999999999999h").is_none());
        assert!(parse_duration("5124095576030431h1h").is_none());
        assert!(parse_duration("99999999999999999999m").is_none());
    }
}
