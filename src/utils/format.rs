//! Форматирование чисел для консольного вывода

/// Enough fractional digits to print any finite `f64` exactly in `{:e}` form.
const EXACT_DIGITS: usize = 800;

/// Format `value` with `digits` significant digits.
///
/// Same rules as JavaScript's `Number.prototype.toPrecision`: fixed notation
/// while the decimal exponent is in `-6..digits`, scientific (`1.23e+7`)
/// outside of it, exact ties rounded away from zero (`0.125` -> `0.13`).
pub fn to_precision(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let digits = digits.clamp(1, 100);
    let (significant, exponent) = round_significant(value.abs(), digits);
    let sign = if value < 0.0 { "-" } else { "" };

    if exponent < -6 || exponent >= digits as i32 {
        let mut mantissa = significant[..1].to_string();
        if digits > 1 {
            mantissa.push('.');
            mantissa.push_str(&significant[1..]);
        }
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        return format!("{}{}e{}{}", sign, mantissa, exp_sign, exponent.abs());
    }

    if exponent >= 0 {
        let (int_part, frac_part) = significant.split_at(exponent as usize + 1);
        if frac_part.is_empty() {
            format!("{}{}", sign, int_part)
        } else {
            format!("{}{}.{}", sign, int_part, frac_part)
        }
    } else {
        let zeros = "0".repeat((-exponent - 1) as usize);
        format!("{}0.{}{}", sign, zeros, significant)
    }
}

/// First `digits` significant decimal digits of a non-negative finite value,
/// rounded half up, with the decimal exponent of the first digit.
fn round_significant(value: f64, digits: usize) -> (String, i32) {
    // The exact expansion, so a trailing 5 really is a tie
    let exact = format!("{:.*e}", EXACT_DIGITS, value);
    let (mantissa, exponent) = exact.split_once('e').unwrap_or((exact.as_str(), "0"));
    let mut exponent = exponent.parse::<i32>().unwrap_or(0);

    let all: Vec<u8> = mantissa.bytes().filter(u8::is_ascii_digit).collect();
    let mut kept: Vec<u8> = all[..digits].to_vec();

    if value != 0.0 && all[digits] >= b'5' {
        let mut i = digits;
        loop {
            if i == 0 {
                // 9.99 -> 10.0: shift one decade up
                kept.insert(0, b'1');
                kept.truncate(digits);
                exponent += 1;
                break;
            }
            i -= 1;
            if kept[i] == b'9' {
                kept[i] = b'0';
            } else {
                kept[i] += 1;
                break;
            }
        }
    }

    (String::from_utf8_lossy(&kept).into_owned(), exponent)
}

/// Fixed number of decimals, e.g. percentages.
pub fn to_fixed(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_range() {
        assert_eq!(to_precision(0.05, 3), "0.0500");
        assert_eq!(to_precision(1.5, 3), "1.50");
        assert_eq!(to_precision(90.0, 6), "90.0000");
        assert_eq!(to_precision(0.09, 6), "0.0900000");
        assert_eq!(to_precision(123.456, 4), "123.5");
    }

    #[test]
    fn test_rounding_carry() {
        assert_eq!(to_precision(99.99999, 4), "100.0");
        assert_eq!(to_precision(0.99996, 4), "1.000");
    }

    #[test]
    fn test_exact_ties_round_up() {
        assert_eq!(to_precision(0.125, 2), "0.13");
        assert_eq!(to_precision(2.5, 1), "3");
        assert_eq!(to_precision(-2.5, 1), "-3");
        assert_eq!(to_precision(0.375, 2), "0.38");
    }

    #[test]
    fn test_near_tie_is_not_a_tie() {
        // 0.15 is stored slightly below 0.15
        assert_eq!(to_precision(0.15, 1), "0.1");
    }

    #[test]
    fn test_scientific_range() {
        assert_eq!(to_precision(123456.0, 3), "1.23e+5");
        assert_eq!(to_precision(0.00000012345, 3), "1.23e-7");
    }

    #[test]
    fn test_zero_and_negative() {
        assert_eq!(to_precision(0.0, 3), "0.00");
        assert_eq!(to_precision(-2.5, 2), "-2.5");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(to_precision(f64::NAN, 3), "NaN");
        assert_eq!(to_precision(f64::INFINITY, 3), "Infinity");
    }

    #[test]
    fn test_to_fixed() {
        assert_eq!(to_fixed(90.00000000000001, 3), "90.000");
    }
}
