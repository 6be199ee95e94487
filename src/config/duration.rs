//! Duration literals in configuration documents.
//!
//! Durations are written as a sequence of decimal numbers, each with an
//! optional fraction and a unit suffix, e.g. `"300ms"`, `"1.5h"` or
//! `"2h45m"`. Valid units are `ns`, `us` (or `µs`), `ms`, `s`, `m`, `h`.
//! A bare `"0"` is accepted, and so are plain integers, which count
//! nanoseconds.

use serde::de::{self, Deserializer, Visitor};
use serde::Serializer;
use std::fmt;
use std::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Invalid duration literal.
#[derive(Debug, Fail, PartialEq)]
#[fail(display = "invalid duration '{}': {}", input, reason)]
pub(crate) struct ParseDurationError {
    input: String,
    reason: &'static str,
}

impl ParseDurationError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

/// Parse a duration literal.
pub(crate) fn parse(input: &str) -> Result<Duration, ParseDurationError> {
    if input.is_empty() {
        return Err(ParseDurationError::new(input, "empty literal"));
    }
    if input.starts_with('-') {
        return Err(ParseDurationError::new(input, "negative durations are not supported"));
    }
    let mut rest = if input.starts_with('+') {
        &input[1..]
    } else {
        input
    };
    if rest == "0" {
        return Ok(Duration::from_secs(0));
    }
    if rest.is_empty() {
        return Err(ParseDurationError::new(input, "missing number"));
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let int_len = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        let (int_part, tail) = rest.split_at(int_len);

        let (frac_part, tail) = if tail.starts_with('.') {
            let tail = &tail[1..];
            let frac_len = tail.find(|c: char| !c.is_ascii_digit()).unwrap_or(tail.len());
            tail.split_at(frac_len)
        } else {
            ("", tail)
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(ParseDurationError::new(input, "missing number"));
        }

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);
        let scale = match unit {
            "ns" => 1,
            "us" | "µs" | "μs" => 1_000,
            "ms" => 1_000_000,
            "s" => NANOS_PER_SEC,
            "m" => 60 * NANOS_PER_SEC,
            "h" => 60 * 60 * NANOS_PER_SEC,
            "" => return Err(ParseDurationError::new(input, "missing unit")),
            _ => return Err(ParseDurationError::new(input, "unknown unit")),
        };

        let whole: u128 = if int_part.is_empty() {
            0
        } else {
            int_part
                .parse()
                .map_err(|_| ParseDurationError::new(input, "number out of range"))?
        };
        let mut nanos = whole
            .checked_mul(scale)
            .ok_or_else(|| ParseDurationError::new(input, "number out of range"))?;

        // Fractional digits beyond nanosecond precision are dropped.
        let mut divisor: u128 = 1;
        let mut fraction: u128 = 0;
        for digit in frac_part.bytes().take(18) {
            fraction = fraction * 10 + u128::from(digit - b'0');
            divisor *= 10;
        }
        nanos = nanos
            .checked_add(fraction * scale / divisor)
            .ok_or_else(|| ParseDurationError::new(input, "number out of range"))?;

        total = total
            .checked_add(nanos)
            .ok_or_else(|| ParseDurationError::new(input, "number out of range"))?;
        rest = tail;
    }

    let secs = total / NANOS_PER_SEC;
    if secs > u128::from(u64::max_value()) {
        return Err(ParseDurationError::new(input, "number out of range"));
    }
    Ok(Duration::new(secs as u64, (total % NANOS_PER_SEC) as u32))
}

/// Format a duration as a literal accepted by `parse`.
pub(crate) fn format(value: &Duration) -> String {
    let secs = value.as_secs();
    let nanos = value.subsec_nanos();

    if secs == 0 {
        return match nanos {
            0 => String::from("0s"),
            n if n % 1_000_000 == 0 => format!("{}ms", n / 1_000_000),
            n if n % 1_000 == 0 => format!("{}us", n / 1_000),
            n => format!("{}ns", n),
        };
    }

    let mut seconds = (secs % 60).to_string();
    if nanos > 0 {
        let frac = format!("{:09}", nanos);
        seconds.push('.');
        seconds.push_str(frac.trim_end_matches('0'));
    }

    let (hours, minutes) = (secs / 3600, (secs % 3600) / 60);
    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

pub(crate) fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(value))
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(DurationVisitor)
}

struct DurationVisitor;

impl<'de> Visitor<'de> for DurationVisitor {
    type Value = Duration;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a duration literal (e.g. \"30s\") or an integer of nanoseconds")
    }

    fn visit_str<E>(self, value: &str) -> Result<Duration, E>
    where
        E: de::Error,
    {
        parse(value).map_err(E::custom)
    }

    fn visit_u64<E>(self, value: u64) -> Result<Duration, E>
    where
        E: de::Error,
    {
        Ok(Duration::from_nanos(value))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Duration, E>
    where
        E: de::Error,
    {
        if value < 0 {
            return Err(E::invalid_value(de::Unexpected::Signed(value), &self));
        }
        Ok(Duration::from_nanos(value as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_units() {
        let cases = vec![
            ("0", Duration::from_secs(0)),
            ("30s", Duration::from_secs(30)),
            ("500ms", Duration::from_millis(500)),
            ("250us", Duration::from_micros(250)),
            ("250µs", Duration::from_micros(250)),
            ("42ns", Duration::from_nanos(42)),
            ("2m", Duration::from_secs(120)),
            ("1h", Duration::from_secs(3600)),
            ("+5s", Duration::from_secs(5)),
        ];
        for (input, expected) in cases {
            assert_eq!(parse(input), Ok(expected), "input: {}", input);
        }
    }

    #[test]
    fn parse_compound_and_fractions() {
        assert_eq!(parse("1m30s"), Ok(Duration::from_secs(90)));
        assert_eq!(parse("2h45m"), Ok(Duration::from_secs(2 * 3600 + 45 * 60)));
        assert_eq!(parse("1.5h"), Ok(Duration::from_secs(5400)));
        assert_eq!(parse(".5s"), Ok(Duration::from_millis(500)));
        assert_eq!(parse("1.s"), Ok(Duration::from_secs(1)));
    }

    #[test]
    fn parse_rejects_garbage() {
        let garbage = vec![
            "", "  ", "+", "-1s", "10", "s", "10x", "1.5", ".s", "1h-3m", " 30s", "30s ", "++5s",
        ];
        for input in garbage {
            assert!(parse(input).is_err(), "input: {:?}", input);
        }
    }

    #[test]
    fn parse_rejects_overflow() {
        let max_hours = u128::max_value() / (3600 * NANOS_PER_SEC);
        let cases = vec![
            format!("{}.999999999h", max_hours),
            format!("{}h", max_hours + 1),
            format!("{}s", u128::from(u64::max_value()) + 1),
            "1".repeat(50) + "ns",
        ];
        for input in cases {
            assert_eq!(
                parse(&input),
                Err(ParseDurationError::new(&input, "number out of range")),
                "input: {}",
                input
            );
        }
    }

    #[test]
    fn format_is_parseable() {
        let cases = vec![
            (Duration::from_secs(0), "0s"),
            (Duration::from_millis(1500), "1.5s"),
            (Duration::from_millis(300), "300ms"),
            (Duration::from_micros(7), "7us"),
            (Duration::from_nanos(9), "9ns"),
            (Duration::from_secs(90), "1m30s"),
            (Duration::from_secs(3600), "1h0m0s"),
        ];
        for (value, literal) in cases {
            assert_eq!(format(&value), literal);
            assert_eq!(parse(literal), Ok(value));
        }
    }

    #[derive(Debug, Deserialize)]
    struct Holder {
        #[serde(deserialize_with = "deserialize")]
        delay: Duration,
    }

    #[test]
    fn deserialize_from_toml() {
        let h: Holder = toml::from_str(r#"delay = "45s""#).unwrap();
        assert_eq!(h.delay, Duration::from_secs(45));

        let h: Holder = toml::from_str("delay = 1000000000").unwrap();
        assert_eq!(h.delay, Duration::from_secs(1));

        assert!(toml::from_str::<Holder>("delay = -1").is_err());
        assert!(toml::from_str::<Holder>(r#"delay = "soon""#).is_err());
        assert!(toml::from_str::<Holder>("delay = true").is_err());
    }
}
