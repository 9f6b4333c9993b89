//! Display formatting for conversion results
//!
//! Only the display string is shaped here. The numeric value handed in
//! is never rounded or otherwise modified.

/// Magnitude at and above which scientific notation is used
pub const SCIENTIFIC_ABOVE: f64 = 1e15;

/// Magnitude at and above which digits are grouped in thousands
pub const GROUPED_ABOVE: f64 = 1e6;

/// Magnitude below which scientific notation is used
pub const SCIENTIFIC_BELOW: f64 = 0.001;

/// Render a number for display.
///
/// Bands are chosen by magnitude after rounding to the band's precision.
/// First match wins:
/// - zero: `"0"`
/// - `|v| >= 1e15`: scientific with 6 fractional digits (`1.234560e+16`)
/// - `1e6 <= |v| < 1e15`: thousands-grouped, at most 2 fractional digits
/// - `1 <= |v| < 1e6`: at most 6 fractional digits
/// - `0.001 <= |v| < 1`: 6 fractional digits, trailing zeros stripped
/// - `0 < |v| < 0.001`: scientific with 6 fractional digits
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() { "∞".to_string() } else { "-∞".to_string() };
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude >= SCIENTIFIC_ABOVE {
        scientific(value)
    } else if magnitude >= GROUPED_ABOVE {
        grouped(&trim_fraction(format!("{:.2}", value)))
    } else if magnitude >= SCIENTIFIC_BELOW {
        let fixed = format!("{:.6}", value);
        // Rounding can carry into the grouped band, e.g. 999999.9999999
        let carried = fixed.parse::<f64>().map_or(false, |r| r.abs() >= GROUPED_ABOVE);
        if carried {
            grouped(&trim_fraction(format!("{:.2}", value)))
        } else {
            trim_fraction(fixed)
        }
    } else {
        scientific(value)
    }
}

/// Scientific notation with an explicit exponent sign, e.g. `5.000000e-4`
fn scientific(value: f64) -> String {
    let raw = format!("{:.6e}", value);
    match raw.split_once('e') {
        Some((mantissa, exponent)) => match exponent.strip_prefix('-') {
            Some(digits) => format!("{}e-{}", mantissa, digits),
            None => format!("{}e+{}", mantissa, exponent),
        },
        None => raw,
    }
}

/// Strip trailing zeros after the decimal point, and the point itself if bare
fn trim_fraction(fixed: String) -> String {
    if !fixed.contains('.') {
        return fixed;
    }
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Insert thousands separators into the integer part
fn grouped(plain: &str) -> String {
    let (sign, body) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain),
    };
    let (integer, fraction) = match body.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (body, None),
    };

    let digits: Vec<char> = integer.chars().collect();
    let mut out = String::with_capacity(plain.len() + digits.len() / 3);
    out.push_str(sign);
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*ch);
    }
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_large_uses_scientific() {
        assert_eq!(format_number(1.23456e16), "1.234560e+16");
        assert_eq!(format_number(1e15), "1.000000e+15");
        assert_eq!(format_number(-2.5e20), "-2.500000e+20");
    }

    #[test]
    fn test_millions_are_grouped() {
        assert_eq!(format_number(1_500_000.0), "1,500,000");
        assert_eq!(format_number(1_234_567.891), "1,234,567.89");
        assert_eq!(format_number(-12_345_678.5), "-12,345,678.5");
        assert_eq!(format_number(999_999_999_999_999.0), "999,999,999,999,999");
    }

    #[test]
    fn test_rounding_into_millions_is_grouped() {
        assert_eq!(format_number(999_999.9999999), "1,000,000");
        assert_eq!(format_number(-999_999.9999999), "-1,000,000");
        assert_eq!(format_number(999_999.999999), "999999.999999");
    }

    #[test]
    fn test_ordinary_range_keeps_six_digits() {
        assert_eq!(format_number(3.280839895013123), "3.28084");
        assert_eq!(format_number(273.15), "273.15");
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(-40.0), "-40");
        assert_eq!(format_number(123456.789), "123456.789");
    }

    #[test]
    fn test_fractions_strip_trailing_zeros() {
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(0.001), "0.001");
        assert_eq!(format_number(0.3048), "0.3048");
        assert_eq!(format_number(-0.25), "-0.25");
    }

    #[test]
    fn test_tiny_uses_scientific() {
        assert_eq!(format_number(0.0005), "5.000000e-4");
        assert_eq!(format_number(1e-9), "1.000000e-9");
        assert_eq!(format_number(-0.000123), "-1.230000e-4");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "∞");
        assert_eq!(format_number(f64::NEG_INFINITY), "-∞");
    }
}
