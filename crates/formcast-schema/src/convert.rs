//! # Type Conversion
//!
//! Best-effort coercion of a loosely-typed [`Value`] to a primitive
//! [`Kind`]. Each rule is a total match over the value variants; anything
//! not explicitly accepted is a type mismatch.
//!
//! `Null` and `Missing` pass through unchanged. The resolver never sends
//! them here, and the option layer owns their semantics.
//!
//! Datetime conversion always yields [`Value::OffsetDateTime`]; whether the
//! offset survives is decided by the `with_offset` option afterwards.

use formcast_core::{parse_date, parse_datetime, temporal, Value};

use crate::message;
use crate::node::Kind;

/// Convert `value` to `kind`.
///
/// # Errors
///
/// Returns the user-facing mismatch message, e.g. `expected number` or
/// `expected datetime (invalid_format)`.
pub fn convert(value: &Value, kind: Kind) -> Result<Value, String> {
    if value.is_absent() {
        return Ok(value.clone());
    }
    match kind {
        Kind::String => to_string(value),
        Kind::Number => to_number(value),
        Kind::Boolean => to_boolean(value),
        Kind::DateTime => to_datetime(value),
        Kind::Date => to_date(value),
    }
}

fn to_string(value: &Value) -> Result<Value, String> {
    let text = match value {
        Value::Text(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::DateTime(dt) => temporal::format_datetime(dt),
        Value::OffsetDateTime(dt, offset) => temporal::format_datetime_at_offset(dt, *offset),
        Value::Date(date) => temporal::format_date(date),
        Value::Seq(_) | Value::Map(_) | Value::Null | Value::Missing => {
            return Err(message::expected_kind(Kind::String))
        }
    };
    Ok(Value::Text(text))
}

fn to_number(value: &Value) -> Result<Value, String> {
    match value {
        Value::Number(_) => Ok(value.clone()),
        Value::Text(s) => parse_number(s).ok_or_else(|| message::expected_kind(Kind::Number)),
        _ => Err(message::expected_kind(Kind::Number)),
    }
}

/// Text with a decimal point parses as a float, anything else as an
/// integer. The whole text must be consumed.
fn parse_number(s: &str) -> Option<Value> {
    if s.contains('.') {
        if !is_decimal_literal(s) {
            return None;
        }
        return s.parse::<f64>().ok().and_then(Value::float);
    }
    if let Ok(n) = s.parse::<i64>() {
        return Some(Value::int(n));
    }
    if let Ok(n) = s.parse::<u64>() {
        return Some(Value::Number(n.into()));
    }
    parse_wide_integer(s)
}

/// Integers outside the 64-bit range keep their exact digits
/// (`serde_json` is built with `arbitrary_precision`).
fn parse_wide_integer(s: &str) -> Option<Value> {
    let (negative, digits) = match s.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    if digits.is_empty() || !digits.bytes().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let digits = match digits.trim_start_matches('0') {
        "" => "0",
        trimmed => trimmed,
    };
    let text = if negative {
        format!("-{digits}")
    } else {
        digits.to_string()
    };
    text.parse::<serde_json::Number>().ok().map(Value::Number)
}

/// `[+-]digits.digits[(e|E)[+-]digits]`
///
/// Stricter than `f64::from_str`, which also takes `.5`, `5.`, `inf`
/// and `NaN`.
fn is_decimal_literal(s: &str) -> bool {
    fn digits(s: &str) -> Option<&str> {
        let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
        (end > 0).then(|| &s[end..])
    }
    fn sign(s: &str) -> &str {
        s.strip_prefix(['+', '-']).unwrap_or(s)
    }

    let Some(rest) = digits(sign(s)) else {
        return false;
    };
    let Some(rest) = rest.strip_prefix('.').and_then(digits) else {
        return false;
    };
    match rest.strip_prefix(['e', 'E']) {
        None => rest.is_empty(),
        Some(exp) => digits(sign(exp)).is_some_and(str::is_empty),
    }
}

fn to_boolean(value: &Value) -> Result<Value, String> {
    let b = match value {
        Value::Bool(b) => *b,
        Value::Text(s) => match s.as_str() {
            "1" | "true" => true,
            "0" | "false" => false,
            _ => return Err(message::expected_kind(Kind::Boolean)),
        },
        _ => return Err(message::expected_kind(Kind::Boolean)),
    };
    Ok(Value::Bool(b))
}

fn to_datetime(value: &Value) -> Result<Value, String> {
    match value {
        Value::OffsetDateTime(..) => Ok(value.clone()),
        Value::DateTime(dt) => Ok(Value::OffsetDateTime(*dt, 0)),
        Value::Text(s) => parse_datetime(s)
            .map(|(dt, offset)| Value::OffsetDateTime(dt, offset))
            .map_err(|e| message::expected_with_reason(Kind::DateTime, e)),
        _ => Err(message::expected_kind(Kind::DateTime)),
    }
}

fn to_date(value: &Value) -> Result<Value, String> {
    match value {
        Value::Date(_) => Ok(value.clone()),
        Value::Text(s) => parse_date(s)
            .map(Value::Date)
            .map_err(|e| message::expected_with_reason(Kind::Date, e)),
        _ => Err(message::expected_kind(Kind::Date)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate, Utc};
    use formcast_core::Map;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    // ---- string ----

    #[test]
    fn test_string_passthrough() {
        assert_eq!(convert(&"pt".into(), Kind::String), Ok("pt".into()));
    }

    #[test]
    fn test_string_stringifies_scalars() {
        assert_eq!(convert(&Value::int(42), Kind::String), Ok("42".into()));
        assert_eq!(
            convert(&Value::float(4.5).unwrap(), Kind::String),
            Ok("4.5".into())
        );
        assert_eq!(convert(&Value::Bool(true), Kind::String), Ok("true".into()));
        assert_eq!(
            convert(&Value::DateTime(utc("2020-12-30T11:00:00Z")), Kind::String),
            Ok("2020-12-30T11:00:00Z".into())
        );
    }

    #[test]
    fn test_string_rejects_collections() {
        let err = Err("expected string".to_string());
        assert_eq!(convert(&Value::Seq(vec![]), Kind::String), err);
        assert_eq!(convert(&Value::Map(Map::new()), Kind::String), err);
    }

    // ---- number ----

    #[test]
    fn test_number_passthrough() {
        assert_eq!(convert(&Value::int(7), Kind::Number), Ok(Value::int(7)));
    }

    #[test]
    fn test_number_integer_text() {
        assert_eq!(convert(&"42".into(), Kind::Number), Ok(Value::int(42)));
        assert_eq!(convert(&"-42".into(), Kind::Number), Ok(Value::int(-42)));
        assert_eq!(
            convert(&"18446744073709551615".into(), Kind::Number),
            Ok(Value::Number(u64::MAX.into()))
        );
    }

    #[test]
    fn test_number_wide_integer_text() {
        let cases = [
            ("123456789012345678901234567890", "123456789012345678901234567890"),
            ("-123456789012345678901234567890", "-123456789012345678901234567890"),
            ("+000123456789012345678901234567890", "123456789012345678901234567890"),
            ("18446744073709551616", "18446744073709551616"),
        ];
        for (input, digits) in cases {
            match convert(&input.into(), Kind::Number) {
                Ok(Value::Number(n)) => assert_eq!(n.to_string(), digits, "input {input:?}"),
                other => panic!("input {input:?} gave {other:?}"),
            }
        }
        assert_eq!(
            convert(&"123456789012345678901234567890x".into(), Kind::Number),
            Err("expected number".to_string())
        );
        assert_eq!(
            convert(&"--123456789012345678901234567890".into(), Kind::Number),
            Err("expected number".to_string())
        );
    }

    #[test]
    fn test_number_float_text() {
        assert_eq!(
            convert(&"42.0".into(), Kind::Number),
            Ok(Value::float(42.0).unwrap())
        );
        assert_eq!(
            convert(&"-1.5e3".into(), Kind::Number),
            Ok(Value::float(-1500.0).unwrap())
        );
    }

    #[test]
    fn test_number_rejects_partial_text() {
        for input in ["42.0.0", "", "42abc", "1e5", ".5", "5.", "inf", "NaN", " 4", "1.5e", "1.0e999"] {
            assert_eq!(
                convert(&input.into(), Kind::Number),
                Err("expected number".to_string()),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn test_number_rejects_other_shapes() {
        assert!(convert(&Value::Bool(true), Kind::Number).is_err());
        assert!(convert(&Value::Seq(vec![]), Kind::Number).is_err());
    }

    // ---- boolean ----

    #[test]
    fn test_boolean_text() {
        assert_eq!(convert(&"1".into(), Kind::Boolean), Ok(Value::Bool(true)));
        assert_eq!(convert(&"true".into(), Kind::Boolean), Ok(Value::Bool(true)));
        assert_eq!(convert(&"0".into(), Kind::Boolean), Ok(Value::Bool(false)));
        assert_eq!(convert(&"false".into(), Kind::Boolean), Ok(Value::Bool(false)));
    }

    #[test]
    fn test_boolean_is_case_sensitive() {
        for input in ["TRUE", "False", "yes", "on", ""] {
            assert_eq!(
                convert(&input.into(), Kind::Boolean),
                Err("expected boolean".to_string())
            );
        }
    }

    #[test]
    fn test_boolean_rejects_numbers() {
        for value in [
            Value::int(1),
            Value::int(0),
            Value::int(2),
            Value::float(1.0).unwrap(),
        ] {
            assert_eq!(
                convert(&value, Kind::Boolean),
                Err("expected boolean".to_string())
            );
        }
    }

    // ---- datetime ----

    #[test]
    fn test_datetime_text_keeps_offset_pair() {
        assert_eq!(
            convert(&"2020-12-30T12:00:00+0100".into(), Kind::DateTime),
            Ok(Value::OffsetDateTime(utc("2020-12-30T11:00:00Z"), 3600))
        );
    }

    #[test]
    fn test_datetime_reason_in_message() {
        assert_eq!(
            convert(&"2020-12-30T12:00:00".into(), Kind::DateTime),
            Err("expected datetime (missing_offset)".to_string())
        );
        assert_eq!(
            convert(&"yesterday".into(), Kind::DateTime),
            Err("expected datetime (invalid_format)".to_string())
        );
    }

    #[test]
    fn test_datetime_non_text() {
        assert_eq!(
            convert(&Value::int(0), Kind::DateTime),
            Err("expected datetime".to_string())
        );
    }

    #[test]
    fn test_datetime_already_normalized() {
        let dt = utc("2020-12-30T11:00:00Z");
        assert_eq!(
            convert(&Value::DateTime(dt), Kind::DateTime),
            Ok(Value::OffsetDateTime(dt, 0))
        );
    }

    // ---- date ----

    #[test]
    fn test_date_text() {
        assert_eq!(
            convert(&"2020-12-30".into(), Kind::Date),
            Ok(Value::Date(NaiveDate::from_ymd_opt(2020, 12, 30).unwrap()))
        );
    }

    #[test]
    fn test_date_errors() {
        assert_eq!(
            convert(&"2020-02-30".into(), Kind::Date),
            Err("expected date (invalid_date)".to_string())
        );
        assert_eq!(
            convert(&"30/12/2020".into(), Kind::Date),
            Err("expected date (invalid_format)".to_string())
        );
        assert_eq!(
            convert(&Value::Bool(false), Kind::Date),
            Err("expected date".to_string())
        );
    }

    // ---- absent ----

    #[test]
    fn test_absent_passthrough() {
        for kind in Kind::ALL {
            assert_eq!(convert(&Value::Null, kind), Ok(Value::Null));
            assert_eq!(convert(&Value::Missing, kind), Ok(Value::Missing));
        }
    }
}
