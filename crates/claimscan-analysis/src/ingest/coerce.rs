//! Lenient coercion of raw billing text.

use std::sync::LazyLock;

use regex::Regex;

use claimscan_core::types::value::parse_number;
use claimscan_core::Value;

/// Tokens that mean "no value" in raw extracts.
const NULL_TOKENS: &[&str] = &["", "nan", "none", "null", "*"];

static ACCOUNTING_NEGATIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\((.*)\)$").expect("Invalid regex pattern"));

/// Parse a money or count string: `$1,234.50` → 1234.5, `(12)` → -12.
/// Null tokens and anything unparsable are `None`.
pub fn coerce_money(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if NULL_TOKENS.contains(&s) {
        return None;
    }
    let stripped: String = s.chars().filter(|c| *c != '$' && *c != ',').collect();
    let signed = ACCOUNTING_NEGATIVE.replace(&stripped, "-$1");
    parse_number(&signed)
}

/// Cell-level money coercion. Numbers pass through untouched.
pub fn coerce_money_value(value: &Value) -> Value {
    match value {
        Value::Number(n) => Value::Number(*n),
        Value::Text(s) => coerce_money(s).into(),
        Value::Missing => Value::Missing,
    }
}

/// Trim categorical text; `nan`, `None`, and blank become missing.
pub fn clean_text(value: &Value) -> Value {
    match value {
        Value::Text(s) => {
            let t = s.trim();
            if t.is_empty() || t == "nan" || t == "None" {
                Value::Missing
            } else {
                Value::Text(t.to_string())
            }
        }
        Value::Number(n) => Value::Text(claimscan_core::types::value::format_number(*n)),
        Value::Missing => Value::Missing,
    }
}

/// Upper-case a code column; `NAN`/`NONE` become missing.
pub fn clean_code(value: &Value) -> Value {
    match clean_text(value) {
        Value::Text(s) => {
            let upper = s.to_uppercase();
            if upper == "NAN" || upper == "NONE" {
                Value::Missing
            } else {
                Value::Text(upper)
            }
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_strings() {
        assert_eq!(coerce_money("$1,234.50"), Some(1234.5));
        assert_eq!(coerce_money(" (12.00) "), Some(-12.0));
        assert_eq!(coerce_money("*"), None);
        assert_eq!(coerce_money("null"), None);
        assert_eq!(coerce_money("N/A"), None);
        assert_eq!(coerce_money(""), None);
    }

    #[test]
    fn codes_are_upper_cased() {
        assert_eq!(clean_code(&Value::from(" j1234 ")), Value::from("J1234"));
        assert_eq!(clean_code(&Value::from("none")), Value::Missing);
        assert_eq!(clean_code(&Value::from("nan")), Value::Missing);
    }

    #[test]
    fn text_null_tokens() {
        assert_eq!(clean_text(&Value::from("  ")), Value::Missing);
        assert_eq!(clean_text(&Value::from("None")), Value::Missing);
        assert_eq!(clean_text(&Value::from(" Office visit ")), Value::from("Office visit"));
    }
}
