//! FILENAME: core/chart-format/src/number_format.rs
//! PURPOSE: Number formatting utilities for chart labels and tooltips.
//! CONTEXT: This module handles the conversion of raw numeric values to
//! display strings for the numeric, currency, percentage and scientific
//! notation field formats. Callers are responsible for NaN / non-numeric
//! passthrough; every function here receives a real number.

use crate::format_spec::{
    CurrencyFormat, NumericFormat, PercentageFormat, ScientificFormat, UnitKey, MAX_DECIMAL_PLACES,
};

/// Resolve a requested decimal place count to a usable precision.
/// Unset or out-of-range requests render with zero decimals.
pub fn decimal_precision(decimal_places: Option<i64>) -> usize {
    match decimal_places {
        Some(places) if (0..=MAX_DECIMAL_PLACES).contains(&places) => places as usize,
        Some(places) => {
            log::debug!("decimal places {} out of range, rendering without decimals", places);
            0
        }
        None => 0,
    }
}

/// Largest precision rounded explicitly; beyond this `10^places` loses the
/// integer precision the rounding relies on.
const MAX_EXPLICIT_ROUNDING: usize = 15;

/// Round to `places` decimals with ties going away from zero, so 2.5 becomes
/// 3 and -0.125 becomes -0.13 at two places. Values too large to scale
/// exactly come back unchanged.
pub fn round_half_away(value: f64, places: usize) -> f64 {
    if !value.is_finite() || places > MAX_EXPLICIT_ROUNDING {
        return value;
    }
    let factor = 10f64.powi(places as i32);
    let scaled = value * factor;
    if !scaled.is_finite() || scaled.abs() >= 9_007_199_254_740_992.0 {
        return value;
    }
    scaled.round() / factor
}

/// Format a number with prefix, unit scaling, separators and suffix.
pub fn format_numeric(value: f64, format: &NumericFormat) -> String {
    let scaled = format_scaled(
        value,
        format.unit_key,
        decimal_precision(format.decimal_places),
        format.use_thousand_separator,
    );

    format!(
        "{}{}{}{}",
        format.prefix.as_deref().unwrap_or(""),
        scaled,
        format.unit_key.suffix(),
        format.suffix.as_deref().unwrap_or("")
    )
}

/// Format a number as currency: symbol, scaled magnitude, then the unit.
pub fn format_currency(value: f64, format: &CurrencyFormat) -> String {
    let magnitude = format_scaled(
        value.abs(),
        format.unit_key,
        decimal_precision(format.decimal_places),
        format.use_thousand_separator,
    );
    let symbol = currency_symbol(format.currency.as_deref().unwrap_or(""));
    let sign = if value < 0.0 { "-" } else { "" };

    match format.unit_key {
        UnitKey::None => format!("{}{}{}", sign, symbol, magnitude),
        unit => format!("{}{}{} {}", sign, symbol, magnitude, unit.suffix()),
    }
}

/// Format a number as percentage.
pub fn format_percentage(value: f64, format: &PercentageFormat) -> String {
    let precision = decimal_precision(format.decimal_places);
    let percentage = round_half_away(value * 100.0, precision);
    format!("{:.prec$}%", percentage, prec = precision)
}

/// Format a number in scientific notation with an always-signed exponent,
/// e.g. `5.00e+1`.
pub fn format_scientific(value: f64, format: &ScientificFormat) -> String {
    let precision = decimal_precision(format.decimal_places);

    // Shortest round-trip form gives an exact exponent and decimal mantissa.
    let shortest = format!("{:e}", value);
    let Some((mantissa, exponent)) = shortest.split_once('e') else {
        return value.to_string();
    };
    let mut exponent: i32 = exponent.parse().unwrap_or(0);
    let mut mantissa = round_half_away(mantissa.parse().unwrap_or(value), precision);
    if mantissa.abs() >= 10.0 {
        mantissa /= 10.0;
        exponent += 1;
    }

    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{:.prec$}e{}{}", mantissa, sign, exponent.abs(), prec = precision)
}

/// Divide by the unit, round, and optionally group the integer digits.
fn format_scaled(value: f64, unit: UnitKey, precision: usize, use_thousands_separator: bool) -> String {
    let rounded = format!(
        "{:.prec$}",
        round_half_away(value / unit.multiplier(), precision),
        prec = precision
    );

    if use_thousands_separator {
        add_thousands_separator(&rounded)
    } else {
        rounded
    }
}

/// Add thousands separators to a numeric string.
pub fn add_thousands_separator(s: &str) -> String {
    let (integer_part, decimal_part) = match s.split_once('.') {
        Some((integer, decimal)) => (integer, Some(decimal)),
        None => (s, None),
    };

    let negative = integer_part.starts_with('-');
    let digits: String = integer_part.chars().filter(|c| c.is_ascii_digit()).collect();

    let mut result = String::new();
    let len = digits.len();

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    if negative {
        result.insert(0, '-');
    }

    if let Some(decimal) = decimal_part {
        result.push('.');
        result.push_str(decimal);
    }

    result
}

/// Currency symbol for an ISO 4217 code. Unknown codes render as the code
/// followed by a space.
pub fn currency_symbol(code: &str) -> String {
    let symbol = match code.to_ascii_uppercase().as_str() {
        "" => "",
        "CNY" | "JPY" => "¥",
        "USD" | "AUD" | "CAD" | "HKD" | "SGD" | "NZD" | "MXN" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "KRW" => "₩",
        "INR" => "₹",
        "RUB" => "₽",
        "TWD" => "NT$",
        "CHF" => "CHF ",
        "BRL" => "R$",
        "SEK" | "NOK" | "DKK" => "kr ",
        "VND" => "₫",
        "THB" => "฿",
        "TRY" => "₺",
        "ILS" => "₪",
        other => return format!("{} ", other),
    };
    symbol.to_string()
}
