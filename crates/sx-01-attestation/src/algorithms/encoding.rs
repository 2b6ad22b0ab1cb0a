//! # Canonical JSON Encoding
//!
//! Byte-exact serializer for canonical payloads. The output matches what a
//! sorted-key, compact-separator, ASCII-only JSON writer produces, so hashes
//! of existing attestations can be recomputed.
//!
//! ## Rules
//!
//! - Object keys sorted by code point; separators `,` and `:`, no whitespace
//! - Strings: `\"` `\\` `\b` `\f` `\n` `\r` `\t`; every other character
//!   outside printable ASCII as lowercase `\uXXXX` (surrogate pairs above
//!   the BMP)
//! - Floats: shortest round-trip digits, always with a fraction (`85.0`),
//!   scientific form `1e-05` / `1e+16` when the exponent is < -4 or >= 16.
//!   When two 17-digit renderings are equally close, the even one wins.

use serde_json::{Number, Value};
use std::fmt::Write;

/// Encode a canonical value to bytes.
pub fn encode_canonical(value: &Value) -> Vec<u8> {
    let mut out = String::new();
    write_value(&mut out, value);
    out.into_bytes()
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => write_number(out, n),
        Value::String(s) => write_string(out, s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(out, key);
                out.push(':');
                write_value(out, item);
            }
            out.push('}');
        }
    }
}

fn write_number(out: &mut String, n: &Number) {
    if let Some(i) = n.as_i64() {
        let _ = write!(out, "{}", i);
    } else if let Some(u) = n.as_u64() {
        let _ = write!(out, "{}", u);
    } else if let Some(f) = n.as_f64() {
        out.push_str(&format_float(f));
    } else {
        out.push_str("null");
    }
}

fn write_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            ' '..='~' => out.push(c),
            _ => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    let _ = write!(out, "\\u{:04x}", unit);
                }
            }
        }
    }
    out.push('"');
}

/// Shortest round-trip float rendering with the fixed/scientific switch at
/// decimal exponents -4 and 16.
pub fn format_float(value: f64) -> String {
    if !value.is_finite() {
        return "null".to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    // `{:e}` yields the shortest digits, e.g. "-1.25e-7"
    let scientific = format!("{:e}", value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return scientific;
    };
    let negative = mantissa.starts_with('-');
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let digits = break_tie_to_even(value.abs(), digits, exponent);

    let mut out = String::with_capacity(digits.len() + 8);
    if negative {
        out.push('-');
    }

    if !(-4..16).contains(&exponent) {
        out.push_str(&digits[..1]);
        if digits.len() > 1 {
            out.push('.');
            out.push_str(&digits[1..]);
        }
        let sign = if exponent < 0 { '-' } else { '+' };
        let _ = write!(out, "e{}{:02}", sign, exponent.abs());
    } else if exponent < 0 {
        out.push_str("0.");
        for _ in 0..(-exponent - 1) {
            out.push('0');
        }
        out.push_str(&digits);
    } else {
        let point = exponent as usize + 1;
        if digits.len() <= point {
            out.push_str(&digits);
            for _ in digits.len()..point {
                out.push('0');
            }
            out.push_str(".0");
        } else {
            out.push_str(&digits[..point]);
            out.push('.');
            out.push_str(&digits[point..]);
        }
    }
    out
}

/// If `magnitude` lies exactly halfway between two 17-digit decimals,
/// return the one whose last digit is even.
fn break_tie_to_even(magnitude: f64, digits: String, exponent: i32) -> String {
    if digits.len() != 17 {
        return digits;
    }

    // Exact expansion; no double needs more than 767 significant digits.
    let exact = format!("{:.800e}", magnitude);
    let Some((mantissa, exact_exponent)) = exact.split_once('e') else {
        return digits;
    };
    if exact_exponent.parse::<i32>().ok() != Some(exponent) {
        return digits;
    }
    let exact_digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let exact_digits = exact_digits.trim_end_matches('0');
    if exact_digits.len() != 18 || !exact_digits.ends_with('5') {
        return digits;
    }

    let (Ok(shown), Ok(below)) = (digits.parse::<u64>(), exact_digits[..17].parse::<u64>())
    else {
        return digits;
    };
    let even = if below % 2 == 0 { below } else { below + 1 };
    let candidate = even.to_string();
    if even == shown || candidate.len() != 17 {
        return digits;
    }

    let rendered = format!("{}.{}e{}", &candidate[..1], &candidate[1..], exponent);
    match rendered.parse::<f64>() {
        Ok(parsed) if parsed == magnitude => candidate,
        _ => digits,
    }
}
