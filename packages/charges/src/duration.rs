//! Time expression parsing and formatting.

use std::sync::LazyLock;

use regex::Regex;

use crate::money::U64_LIMIT;

static DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*([0-9]+(?:\.[0-9]+)?)\s*([smh])\s*$").unwrap_or_else(|_| unreachable!())
});

/// Parses `"<number><unit>"` (unit `s`, `m` or `h`, any case) into whole
/// seconds, rounding to the nearest second.
///
/// Returns `None` for anything else: extra words, a missing unit, or more
/// than one number.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn parse_duration(text: &str) -> Option<u64> {
    let Some(caps) = DURATION.captures(text) else {
        log::debug!("Unrecognized time expression {text:?}");
        return None;
    };

    let value = caps[1].parse::<f64>().ok()?;
    let multiplier = match caps[2].to_ascii_lowercase().as_str() {
        "s" => 1.0,
        "m" => 60.0,
        "h" => 3600.0,
        _ => return None,
    };

    let seconds = (value * multiplier).round();
    if !seconds.is_finite() || seconds >= U64_LIMIT {
        log::warn!("Time expression {text:?} is out of range; ignoring it");
        return None;
    }

    Some(seconds as u64)
}

/// Renders a second count as `"45s"`, `"2m"` or `"3m 30s"`.
#[must_use]
pub fn format_seconds(total: u64) -> String {
    let minutes = total / 60;
    let seconds = total % 60;

    if minutes == 0 {
        format!("{seconds}s")
    } else if seconds == 0 {
        format!("{minutes}m")
    } else {
        format!("{minutes}m {seconds}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_each_unit() {
        assert_eq!(parse_duration("120s"), Some(120));
        assert_eq!(parse_duration("15m"), Some(900));
        assert_eq!(parse_duration("2h"), Some(7200));
    }

    #[test]
    fn accepts_case_whitespace_and_decimals() {
        assert_eq!(parse_duration(" 30 S "), Some(30));
        assert_eq!(parse_duration("1.5m"), Some(90));
        assert_eq!(parse_duration("0.5h"), Some(1800));
        assert_eq!(parse_duration("2.6s"), Some(3));
        assert_eq!(parse_duration("0s"), Some(0));
    }

    #[test]
    fn rejects_other_shapes() {
        assert_eq!(parse_duration("soon"), None);
        assert_eq!(parse_duration("120"), None);
        assert_eq!(parse_duration("2 hours"), None);
        assert_eq!(parse_duration("1m 30s"), None);
        assert_eq!(parse_duration(".5m"), None);
        assert_eq!(parse_duration(""), None);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert_eq!(parse_duration("99999999999999999999h"), None);
        assert_eq!(parse_duration("99999999999999999999s"), None);
        assert_eq!(parse_duration("1000000h"), Some(3_600_000_000));
    }

    #[test]
    fn formats_seconds() {
        assert_eq!(format_seconds(0), "0s");
        assert_eq!(format_seconds(45), "45s");
        assert_eq!(format_seconds(90), "1m 30s");
        assert_eq!(format_seconds(120), "2m");
        assert_eq!(format_seconds(210), "3m 30s");
        assert_eq!(format_seconds(7200), "120m");
    }
}
