//! Fine expression parsing.
//!
//! Handles the three shapes found in the statute catalogs: a single amount
//! (`"$5,000"`), a range (`"$3,000 - $10,000"`), and a per-unit rate whose
//! multiplier is unknown (`"$100 per bud over"`).

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static PER_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\$\s*([0-9,]+)\s*per\s+(.+)").unwrap_or_else(|_| unreachable!())
});

/// Structured result of parsing a fine expression.
///
/// All fields unset means the text held no usable number.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedMoney {
    /// Lower bound, the sole amount, or the per-unit rate when `note` is set.
    pub min: Option<f64>,
    /// Upper bound. Only set when the text was written as a range.
    pub max: Option<f64>,
    /// Per-unit qualifier such as `"per bud over"`. When set, `min` is a rate
    /// and cannot be read as a total.
    pub note: Option<String>,
}

impl ParsedMoney {
    /// Whether nothing could be extracted from the source text.
    #[must_use]
    pub const fn is_unparseable(&self) -> bool {
        self.min.is_none() && self.max.is_none() && self.note.is_none()
    }

    /// Whether this is a genuine range with distinct bounds.
    #[must_use]
    pub fn is_range(&self) -> bool {
        match (self.min, self.max) {
            (Some(min), Some(max)) => max > min,
            _ => false,
        }
    }
}

/// Parses a free-text fine expression.
///
/// Rules, first match wins:
///
/// 1. `$<amount> per <unit>` yields the amount as `min` and `"per <unit>"`
///    as the note, even if the unit text contains a hyphen.
/// 2. Text containing a hyphen yields the smallest and largest numbers found
///    as `min` and `max`.
/// 3. Otherwise the first number found becomes `min`.
///
/// Text without any number returns [`ParsedMoney::default()`].
#[must_use]
pub fn parse_money(text: &str) -> ParsedMoney {
    let raw = text.trim();

    if let Some(caps) = PER_UNIT.captures(raw) {
        let amount = caps[1].replace(',', "").parse::<f64>().ok();
        return ParsedMoney {
            min: amount.filter(|n| n.is_finite()),
            max: None,
            note: Some(format!("per {}", caps[2].trim())),
        };
    }

    let numbers = extract_numbers(raw);
    let Some(&first) = numbers.first() else {
        log::debug!("No amount found in fine expression {raw:?}");
        return ParsedMoney::default();
    };

    if raw.contains('-') {
        let min = numbers.iter().copied().fold(f64::INFINITY, f64::min);
        let max = numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        return ParsedMoney {
            min: Some(min),
            max: Some(max),
            note: None,
        };
    }

    ParsedMoney {
        min: Some(first),
        max: None,
        note: None,
    }
}

/// Pulls every decimal number out of `text`.
///
/// Thousands separators are dropped, anything other than digits, dots,
/// hyphens and whitespace becomes a space, and the remainder is split on
/// whitespace and hyphens. Hyphens only ever separate range bounds, so no
/// extracted number is negative.
fn extract_numbers(text: &str) -> Vec<f64> {
    let cleaned: String = text
        .chars()
        .filter(|&ch| ch != ',')
        .map(|ch| {
            if ch.is_ascii_digit() || ch == '-' || ch == '.' || ch.is_whitespace() {
                ch
            } else {
                ' '
            }
        })
        .collect();

    cleaned
        .split(|ch: char| ch.is_whitespace() || ch == '-')
        .filter(|token| !token.is_empty())
        .filter_map(|token| token.parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .collect()
}

/// 2^64, the first value that no longer fits in a `u64`.
pub(crate) const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;

/// Formats a dollar amount with thousands separators, e.g. `"$19,000"`.
///
/// At most three fractional digits are shown and trailing zeros are
/// dropped, so `100_000.0` renders as `"$100,000"` and `12.5` as `"$12.5"`.
/// Amounts too large to group exactly are shown unformatted.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_money(amount: f64) -> String {
    let scaled = (amount.abs() * 1000.0).round();
    if !scaled.is_finite() || scaled >= U64_LIMIT {
        log::warn!("Amount {amount} is too large to group; showing it unformatted");
        let sign = if amount < 0.0 { "-" } else { "" };
        return format!("{sign}${}", amount.abs());
    }

    let millis = scaled as u64;
    let whole = millis / 1000;
    let frac = millis % 1000;

    let mut out = String::new();
    if amount < 0.0 && millis > 0 {
        out.push('-');
    }
    out.push('$');
    out.push_str(&group_thousands(whole));
    if frac > 0 {
        let digits = format!("{frac:03}");
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
    out
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_amount() {
        assert_eq!(
            parse_money("$5,000"),
            ParsedMoney {
                min: Some(5000.0),
                ..ParsedMoney::default()
            }
        );
    }

    #[test]
    fn parses_range() {
        let parsed = parse_money("$3,000 - $10,000");
        assert_eq!(parsed.min, Some(3000.0));
        assert_eq!(parsed.max, Some(10_000.0));
        assert_eq!(parsed.note, None);
        assert!(parsed.is_range());
    }

    #[test]
    fn parses_unspaced_range() {
        let parsed = parse_money("$1,500-$3,500");
        assert_eq!(parsed.min, Some(1500.0));
        assert_eq!(parsed.max, Some(3500.0));
    }

    #[test]
    fn range_with_repeated_number_is_not_a_genuine_range() {
        let parsed = parse_money("$500 - $500");
        assert_eq!(parsed.min, Some(500.0));
        assert_eq!(parsed.max, Some(500.0));
        assert!(!parsed.is_range());
    }

    #[test]
    fn parses_per_unit_rate() {
        assert_eq!(
            parse_money("$100 per bud over"),
            ParsedMoney {
                min: Some(100.0),
                max: None,
                note: Some("per bud over".to_string()),
            }
        );
    }

    #[test]
    fn per_unit_takes_priority_over_hyphen() {
        let parsed = parse_money("$1,000 PER chem - lab grade");
        assert_eq!(parsed.min, Some(1000.0));
        assert_eq!(parsed.max, None);
        assert_eq!(parsed.note.as_deref(), Some("per chem - lab grade"));
    }

    #[test]
    fn parses_decimal_amount() {
        assert_eq!(parse_money("$100,000.00").min, Some(100_000.0));
    }

    #[test]
    fn unparseable_text_is_empty() {
        let parsed = parse_money("free");
        assert_eq!(parsed, ParsedMoney::default());
        assert!(parsed.is_unparseable());
        assert!(parse_money("   ").is_unparseable());
    }

    #[test]
    fn formats_money_with_separators() {
        assert_eq!(format_money(0.0), "$0");
        assert_eq!(format_money(950.0), "$950");
        assert_eq!(format_money(19_000.0), "$19,000");
        assert_eq!(format_money(1_234_567.0), "$1,234,567");
        assert_eq!(format_money(12.5), "$12.5");
        assert_eq!(format_money(0.125), "$0.125");
    }

    #[test]
    fn huge_amounts_are_shown_unformatted() {
        let parsed = parse_money("$99,999,999,999,999,999,999");
        assert_eq!(parsed.min, Some(1e20));
        assert_eq!(format_money(1e20), "$100000000000000000000");
        assert_eq!(format_money(-1e20), "-$100000000000000000000");
        assert_eq!(format_money(18_446_744_073_709.5), "$18,446,744,073,709.5");
    }
}
