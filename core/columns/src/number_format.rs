//! FILENAME: core/columns/src/number_format.rs
//! PURPOSE: Number rounding and separator formatting used by number columns.
//! CONTEXT: Rounding breaks ties away from zero after pre-rounding the scaled
//! value to 15 significant digits, so decimal literals such as 1.005 round the
//! way they read (1.01) instead of the way their binary approximation does.

/// Significant digits kept when pre-rounding a scaled value.
const PRE_ROUND_DIGITS: usize = 15;

/// Most fractional digits `format_with_separators` prints. Past this no f64
/// has any digit left to show.
pub const MAX_DECIMALS: u32 = 340;

/// Integral values below this print in full; larger ones use scientific form.
const PLAIN_INTEGER_LIMIT: f64 = 1e21;

/// Round to `precision` decimal digits, ties away from zero.
/// Negative precision rounds to tens, hundreds, and so on.
/// Non-finite input is returned unchanged.
pub fn round_half_away_from_zero(value: f64, precision: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let factor = 10f64.powi(precision.abs());
    let scaled = if precision >= 0 {
        value * factor
    } else {
        value / factor
    };

    if !scaled.is_finite() {
        return value;
    }

    // f64::round already breaks ties away from zero
    let rounded = pre_round(scaled).round();

    let result = if precision >= 0 {
        rounded / factor
    } else {
        rounded * factor
    };

    if result.is_finite() {
        result
    } else {
        value
    }
}

fn pre_round(value: f64) -> f64 {
    format!("{:.prec$e}", value, prec = PRE_ROUND_DIGITS - 1)
        .parse::<f64>()
        .unwrap_or(value)
}

/// Format a number with a fixed count of decimals and the given separators.
///
/// The thousands separator is inserted every three integer digits; both
/// separators may be any string, including an empty one.
pub fn format_with_separators(
    value: f64,
    decimals: u32,
    decimal_separator: &str,
    thousands_separator: &str,
) -> String {
    let decimals = decimals.min(MAX_DECIMALS);
    let rounded = round_half_away_from_zero(value, decimals as i32);
    let fixed = format!("{:.prec$}", rounded.abs(), prec = decimals as usize);

    let (integer_part, fraction_part) = match fixed.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (fixed.as_str(), None),
    };

    let mut result = String::new();
    // -0.0 compares equal to 0.0, so zero never gets a sign
    if rounded < 0.0 {
        result.push('-');
    }
    result.push_str(&add_thousands_separator(integer_part, thousands_separator));

    if let Some(fraction) = fraction_part {
        result.push_str(decimal_separator);
        result.push_str(fraction);
    }

    result
}

/// Integer counterpart of `format_with_separators`. Every digit of the
/// integer is kept; the fraction is all zeros.
pub fn format_integer_with_separators(
    value: i64,
    decimals: u32,
    decimal_separator: &str,
    thousands_separator: &str,
) -> String {
    let digits = value.unsigned_abs().to_string();

    let mut result = String::new();
    if value < 0 {
        result.push('-');
    }
    result.push_str(&add_thousands_separator(&digits, thousands_separator));

    let decimals = decimals.min(MAX_DECIMALS) as usize;
    if decimals > 0 {
        result.push_str(decimal_separator);
        result.push_str(&"0".repeat(decimals));
    }

    result
}

/// Add thousands separators to a run of ASCII digits.
fn add_thousands_separator(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut result = String::with_capacity(len + (len / 3) * separator.len());

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push_str(separator);
        }
        result.push(c);
    }

    result
}

/// Format a number in general format (shortest natural representation).
pub fn format_general(value: f64) -> String {
    if value.is_nan() {
        return "NAN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "INF" } else { "-INF" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let abs_value = value.abs();

    // Integral values print every digit up to the limit
    if value.fract() == 0.0 && abs_value < PLAIN_INTEGER_LIMIT {
        return format!("{:.0}", value);
    }

    // Use scientific notation for very large or very small numbers
    if abs_value >= PLAIN_INTEGER_LIMIT || abs_value < 1e-4 {
        let formatted = format!("{:.5e}", value);
        if let Some((mantissa, exponent)) = formatted.split_once('e') {
            let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
            return format!("{}E{}", mantissa, exponent);
        }
        return formatted;
    }

    // For decimals, show up to 10 decimal places but trim trailing zeros
    let formatted = format!("{:.10}", value);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
