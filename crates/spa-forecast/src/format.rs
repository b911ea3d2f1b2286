//! Brazilian Portuguese number formatting for reports.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

const GROUP_SEPARATOR: char = '.';
const DECIMAL_SEPARATOR: char = ',';
const CURRENCY_PREFIX: &str = "R$\u{a0}";

/// Below this magnitude every supported precision rounds to zero.
const NEGLIGIBLE: f64 = 1e-12;

/// `R$ 1.234,56`, always two fraction digits.
pub fn format_currency(value: f64) -> String {
    let (sign, body) = localize(value, 1, 2, false);
    format!("{sign}{CURRENCY_PREFIX}{body}")
}

/// `1.234,5`, at most two fraction digits.
pub fn format_number(value: f64) -> String {
    let (sign, body) = localize(value, 1, 2, true);
    format!("{sign}{body}")
}

/// Formats a fraction as a percent with one fraction digit: `0.104` becomes `10,4%`.
pub fn format_percent(value: f64) -> String {
    let (sign, body) = localize(value, 100, 1, false);
    format!("{sign}{body}%")
}

/// Scales by `scale`, rounds half away from zero to `digits` places and applies pt-BR
/// separators. Rounding starts from the shortest decimal that reads back as `value`,
/// so `1.005` rounds up to `1.01`. Negative input keeps its sign even when the
/// rounded magnitude is zero.
fn localize(value: f64, scale: i64, digits: u32, trim_zeros: bool) -> (&'static str, String) {
    let sign = if value.is_sign_negative() && !value.is_nan() {
        "-"
    } else {
        ""
    };

    if value.is_nan() {
        return (sign, "NaN".to_string());
    }
    if value.is_infinite() {
        return (sign, "∞".to_string());
    }

    let rendered = match shortest_decimal(value.abs())
        .and_then(|magnitude| magnitude.checked_mul(Decimal::from(scale)))
    {
        Some(scaled) => {
            let rounded =
                scaled.round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero);
            format!("{:.*}", digits as usize, rounded)
        }
        // Beyond the decimal range every f64 is a whole number; print its shortest digits.
        None => format!("{}", value.abs() * scale as f64),
    };

    let (integer, fraction) = rendered
        .split_once('.')
        .unwrap_or((rendered.as_str(), ""));
    let fraction = if trim_zeros {
        fraction.trim_end_matches('0').to_string()
    } else {
        format!("{:0<width$}", fraction, width = digits as usize)
    };

    let mut body = group_thousands(integer);
    if !fraction.is_empty() {
        body.push(DECIMAL_SEPARATOR);
        body.push_str(&fraction);
    }
    (sign, body)
}

fn shortest_decimal(magnitude: f64) -> Option<Decimal> {
    if magnitude < NEGLIGIBLE {
        return Some(Decimal::ZERO);
    }
    Decimal::from_str(&magnitude.to_string()).ok()
}

fn group_thousands(integer: &str) -> String {
    let len = integer.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(digit);
    }
    grouped
}
