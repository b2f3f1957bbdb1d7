//! Canonical payload encoding
//!
//! Hash input for block data. The output is byte-for-byte what Python's
//! `json.dumps(data, sort_keys=True)` produces, so ledgers written by older
//! tooling still verify: sorted keys, `", "` / `": "` separators, ASCII-only
//! string escapes and `repr`-style floats.

use std::fmt::Write;

use crate::payload::{Payload, Value};

/// Encode a payload in canonical form
pub fn canonical_json(payload: &Payload) -> String {
    let mut out = String::new();
    write_map(&mut out, payload);
    out
}

/// Encode a single value in canonical form
pub fn canonical_value(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => write_number(out, n),
        Value::String(s) => write_string(out, s),
        Value::List(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_value(out, item);
            }
            out.push(']');
        }
        Value::Map(map) => write_map(out, map),
    }
}

fn write_map(out: &mut String, map: &Payload) {
    // BTreeMap<String, _> iterates in byte order, which for UTF-8 is code point order
    out.push('{');
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_string(out, key);
        out.push_str(": ");
        write_value(out, value);
    }
    out.push('}');
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

fn write_number(out: &mut String, n: &serde_json::Number) {
    if let Some(i) = n.as_i64() {
        let _ = write!(out, "{}", i);
    } else if let Some(u) = n.as_u64() {
        let _ = write!(out, "{}", u);
    } else {
        // Numbers keep their source text, so integers wider than 64 bits survive
        let text = n.to_string();
        if is_integer_literal(&text) {
            out.push_str(&text);
        } else if let Some(f) = n.as_f64() {
            out.push_str(&float_repr(f));
        } else if text.starts_with('-') {
            out.push_str("-Infinity");
        } else {
            out.push_str("Infinity");
        }
    }
}

fn is_integer_literal(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Shortest round-trip float text in Python `repr` layout.
///
/// Fixed notation when the decimal exponent lies in `-4..=15`, otherwise
/// scientific with a signed, at least two digit exponent.
pub fn float_repr(value: f64) -> String {
    // `{:e}` yields the shortest digits that round-trip, e.g. "-1.25e-7"
    let sci = format!("{:e}", value);
    let (mantissa, exponent) = match sci.split_once('e') {
        Some(parts) => parts,
        None => return sci,
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    let body = if (-4..16).contains(&exponent) {
        if exponent >= 0 {
            let int_len = exponent as usize + 1;
            if digits.len() > int_len {
                format!("{}.{}", &digits[..int_len], &digits[int_len..])
            } else {
                format!("{}{}.0", digits, "0".repeat(int_len - digits.len()))
            }
        } else {
            format!("0.{}{}", "0".repeat((-exponent - 1) as usize), digits)
        }
    } else {
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        let lead = if digits.len() > 1 {
            format!("{}.{}", &digits[..1], &digits[1..])
        } else {
            digits
        };
        format!("{}e{}{:02}", lead, exp_sign, exponent.abs())
    };
    format!("{}{}", sign, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::payload_of;

    #[test]
    fn test_sorted_keys_and_separators() {
        let payload = payload_of([("subject", "Math"), ("grade", "A"), ("student", "Ana")]);
        assert_eq!(
            canonical_json(&payload),
            r#"{"grade": "A", "student": "Ana", "subject": "Math"}"#
        );
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(canonical_json(&Payload::new()), "{}");
        assert_eq!(canonical_value(&Value::List(vec![])), "[]");
    }

    #[test]
    fn test_nested_values() {
        let json = serde_json::json!({
            "b": [1, true, null],
            "a": {"z": "x", "y": -3}
        });
        let payload: Payload = serde_json::from_value(json).unwrap();
        assert_eq!(
            canonical_json(&payload),
            r#"{"a": {"y": -3, "z": "x"}, "b": [1, true, null]}"#
        );
    }

    #[test]
    fn test_string_escapes_are_ascii_only() {
        let value = Value::from("Jos\u{e9} \"Q\"\\\n\t\u{01}\u{7f}");
        assert_eq!(
            canonical_value(&value),
            r#""Jos\u00e9 \"Q\"\\\n\t\u0001\u007f""#
        );
    }

    #[test]
    fn test_astral_characters_use_surrogate_pairs() {
        assert_eq!(canonical_value(&Value::from("\u{1f3eb}")), r#""\ud83c\udfeb""#);
    }

    #[test]
    fn test_float_repr_matches_python() {
        assert_eq!(float_repr(1.0), "1.0");
        assert_eq!(float_repr(0.0), "0.0");
        assert_eq!(float_repr(-0.0), "-0.0");
        assert_eq!(float_repr(3.5), "3.5");
        assert_eq!(float_repr(0.1), "0.1");
        assert_eq!(float_repr(0.0001), "0.0001");
        assert_eq!(float_repr(0.00001), "1e-05");
        assert_eq!(float_repr(1.5e-7), "1.5e-07");
        assert_eq!(float_repr(123456.789), "123456.789");
        assert_eq!(float_repr(1e15), "1000000000000000.0");
        assert_eq!(float_repr(1e16), "1e+16");
        assert_eq!(float_repr(-2.5e100), "-2.5e+100");
    }

    #[test]
    fn test_wide_integers_keep_their_digits() {
        let payload: Payload =
            serde_json::from_str(r#"{"big": 100000000000000000000, "neg": -100000000000000000000}"#)
                .unwrap();
        assert_eq!(
            canonical_json(&payload),
            r#"{"big": 100000000000000000000, "neg": -100000000000000000000}"#
        );
    }

    #[test]
    fn test_loaded_floats_use_repr_form() {
        let payload: Payload = serde_json::from_str(r#"{"a": 1e-05, "b": 2.50, "c": 1E2}"#).unwrap();
        assert_eq!(canonical_json(&payload), r#"{"a": 1e-05, "b": 2.5, "c": 100.0}"#);
    }

    #[test]
    fn test_integers_keep_decimal_form() {
        let payload = payload_of([("big", Value::from(u64::MAX)), ("neg", Value::from(-7i64))]);
        assert_eq!(
            canonical_json(&payload),
            format!(r#"{{"big": {}, "neg": -7}}"#, u64::MAX)
        );
    }
}
