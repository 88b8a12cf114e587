//! The locale-aware text parser: a single left-to-right scan driven by style
//! flags, accumulating into a `NumberBuffer`, followed by per-target
//! reconstruction with overflow checking. A parse either consumes the whole
//! input or fails; no partial buffer is ever used.

use crate::constants::{
    DECIMAL_DIGITS, DOUBLE_DIGITS, HALF_DIGITS, INT64_DIGITS, OVERFLOW_U96, SINGLE_DIGITS,
};
use crate::error::Error;
use crate::fltdec::{digits_to_bits, Half, RawFloat};
use crate::number::locale::NumberFormatInfo;
use crate::number::{NumberBuffer, NumberKind};
use crate::Decimal;

use bitflags::bitflags;

bitflags! {
    /// Style flags controlling which tokens the parser accepts.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct NumberStyles: u32 {
        const NONE = 0;
        const ALLOW_LEADING_WHITE = 0x0001;
        const ALLOW_TRAILING_WHITE = 0x0002;
        const ALLOW_LEADING_SIGN = 0x0004;
        const ALLOW_TRAILING_SIGN = 0x0008;
        const ALLOW_PARENTHESES = 0x0010;
        const ALLOW_DECIMAL_POINT = 0x0020;
        const ALLOW_THOUSANDS = 0x0040;
        const ALLOW_EXPONENT = 0x0080;
        const ALLOW_CURRENCY_SYMBOL = 0x0100;
        const ALLOW_HEX_SPECIFIER = 0x0200;

        const INTEGER = 0x0001 | 0x0002 | 0x0004;
        const NUMBER = 0x0001 | 0x0002 | 0x0004 | 0x0008 | 0x0020 | 0x0040;
        const FLOAT = 0x0001 | 0x0002 | 0x0004 | 0x0020 | 0x0080;
        const CURRENCY = 0x0001 | 0x0002 | 0x0004 | 0x0008 | 0x0010 | 0x0020 | 0x0040 | 0x0100;
        const ANY = 0x0001 | 0x0002 | 0x0004 | 0x0008 | 0x0010 | 0x0020 | 0x0040 | 0x0080 | 0x0100;
        const HEX_NUMBER = 0x0001 | 0x0002 | 0x0200;
    }
}

const INVALID: &str = "Input string was not in a correct format";

/// Parses a decimal value.
pub fn parse_decimal(input: &str, styles: NumberStyles, info: &NumberFormatInfo) -> Result<Decimal, Error> {
    let number = scan(input, styles, info, NumberKind::Decimal, DECIMAL_DIGITS)?;
    number_to_decimal(&number)
}

/// Parses a double, including the culture's NaN and infinity spellings.
pub fn parse_f64(input: &str, styles: NumberStyles, info: &NumberFormatInfo) -> Result<f64, Error> {
    if let Some(special) = parse_float_special(input, styles, info) {
        return Ok(match special {
            FloatSpecial::Nan => f64::NAN,
            FloatSpecial::Infinity => f64::INFINITY,
            FloatSpecial::NegativeInfinity => f64::NEG_INFINITY,
        });
    }
    let number = scan(input, styles, info, NumberKind::FloatingPoint, DOUBLE_DIGITS)?;
    Ok(f64::from_bits64(number_to_float_bits::<f64>(&number)))
}

/// Parses a single precision float.
pub fn parse_f32(input: &str, styles: NumberStyles, info: &NumberFormatInfo) -> Result<f32, Error> {
    if let Some(special) = parse_float_special(input, styles, info) {
        return Ok(match special {
            FloatSpecial::Nan => f32::NAN,
            FloatSpecial::Infinity => f32::INFINITY,
            FloatSpecial::NegativeInfinity => f32::NEG_INFINITY,
        });
    }
    let number = scan(input, styles, info, NumberKind::FloatingPoint, SINGLE_DIGITS)?;
    Ok(f32::from_bits64(number_to_float_bits::<f32>(&number)))
}

/// Parses a half precision bit pattern.
pub fn parse_half(input: &str, styles: NumberStyles, info: &NumberFormatInfo) -> Result<Half, Error> {
    if let Some(special) = parse_float_special(input, styles, info) {
        return Ok(Half::from_bits(match special {
            FloatSpecial::Nan => 0x7E00,
            FloatSpecial::Infinity => 0x7C00,
            FloatSpecial::NegativeInfinity => 0xFC00,
        }));
    }
    let number = scan(input, styles, info, NumberKind::FloatingPoint, HALF_DIGITS)?;
    Ok(Half::from_bits64(number_to_float_bits::<Half>(&number)))
}

/// Parses a signed 64 bit integer.
pub fn parse_i64(input: &str, styles: NumberStyles, info: &NumberFormatInfo) -> Result<i64, Error> {
    if styles.contains(NumberStyles::ALLOW_HEX_SPECIFIER) {
        let bits = scan_hex(input, styles)?;
        return Ok(bits as i64);
    }
    let number = scan(input, styles, info, NumberKind::Integer, INT64_DIGITS)?;
    let magnitude = number_to_magnitude(&number)?;
    if number.negative {
        if magnitude > i64::MAX as u64 + 1 {
            return Err(Error::LessThanMinimumPossibleValue);
        }
        Ok((magnitude as i64).wrapping_neg())
    } else if magnitude > i64::MAX as u64 {
        Err(Error::ExceedsMaximumPossibleValue)
    } else {
        Ok(magnitude as i64)
    }
}

/// Parses a signed 32 bit integer.
pub fn parse_i32(input: &str, styles: NumberStyles, info: &NumberFormatInfo) -> Result<i32, Error> {
    if styles.contains(NumberStyles::ALLOW_HEX_SPECIFIER) {
        let bits = scan_hex(input, styles)?;
        if bits > u32::MAX as u64 {
            return Err(Error::ExceedsMaximumPossibleValue);
        }
        return Ok(bits as u32 as i32);
    }
    let number = scan(input, styles, info, NumberKind::Integer, INT64_DIGITS)?;
    let magnitude = number_to_magnitude(&number)?;
    if number.negative {
        if magnitude > i32::MAX as u64 + 1 {
            return Err(Error::LessThanMinimumPossibleValue);
        }
        Ok((magnitude as i32).wrapping_neg())
    } else if magnitude > i32::MAX as u64 {
        Err(Error::ExceedsMaximumPossibleValue)
    } else {
        Ok(magnitude as i32)
    }
}

/// Parses an unsigned 64 bit integer.
pub fn parse_u64(input: &str, styles: NumberStyles, info: &NumberFormatInfo) -> Result<u64, Error> {
    if styles.contains(NumberStyles::ALLOW_HEX_SPECIFIER) {
        return scan_hex(input, styles);
    }
    let number = scan(input, styles, info, NumberKind::Integer, INT64_DIGITS)?;
    if number.negative && !number.is_zero() {
        return Err(Error::LessThanMinimumPossibleValue);
    }
    number_to_magnitude(&number)
}

/// Parses an unsigned 32 bit integer.
pub fn parse_u32(input: &str, styles: NumberStyles, info: &NumberFormatInfo) -> Result<u32, Error> {
    let value = parse_u64(input, styles, info)?;
    if value > u32::MAX as u64 {
        return Err(Error::ExceedsMaximumPossibleValue);
    }
    Ok(value as u32)
}

enum FloatSpecial {
    Nan,
    Infinity,
    NegativeInfinity,
}

fn parse_float_special(
    input: &str,
    styles: NumberStyles,
    info: &NumberFormatInfo,
) -> Option<FloatSpecial> {
    let mut trimmed = input;
    if styles.contains(NumberStyles::ALLOW_LEADING_WHITE) {
        trimmed = trimmed.trim_start();
    }
    if styles.contains(NumberStyles::ALLOW_TRAILING_WHITE) {
        trimmed = trimmed.trim_end();
    }
    if trimmed == info.nan_symbol {
        Some(FloatSpecial::Nan)
    } else if trimmed == info.positive_infinity_symbol {
        Some(FloatSpecial::Infinity)
    } else if trimmed == info.negative_infinity_symbol {
        Some(FloatSpecial::NegativeInfinity)
    } else {
        None
    }
}

fn scan_hex(input: &str, styles: NumberStyles) -> Result<u64, Error> {
    let mut rest = input;
    if styles.contains(NumberStyles::ALLOW_LEADING_WHITE) {
        rest = rest.trim_start();
    }
    if styles.contains(NumberStyles::ALLOW_TRAILING_WHITE) {
        rest = rest.trim_end();
    }
    if rest.is_empty() {
        return Err(Error::from(INVALID));
    }
    let mut value: u64 = 0;
    for c in rest.chars() {
        let digit = c.to_digit(16).ok_or_else(|| Error::from(INVALID))?;
        value = value
            .checked_mul(16)
            .and_then(|v| v.checked_add(digit as u64))
            .ok_or(Error::ExceedsMaximumPossibleValue)?;
    }
    Ok(value)
}

// The single pass scanner. `max_digits` bounds the stored significant
// digits; anything beyond only sets `has_nonzero_tail` (and still moves the
// scale when it sits before the decimal point).
fn scan(
    input: &str,
    styles: NumberStyles,
    info: &NumberFormatInfo,
    kind: NumberKind,
    max_digits: usize,
) -> Result<NumberBuffer, Error> {
    let mut number = NumberBuffer::new(kind);
    let currency = styles.contains(NumberStyles::ALLOW_CURRENCY_SYMBOL);
    let decimal_separator = if currency {
        info.currency_decimal_separator.as_str()
    } else {
        info.decimal_separator.as_str()
    };
    let group_separator = if currency {
        info.currency_group_separator.as_str()
    } else {
        info.group_separator.as_str()
    };

    let mut rest = input;
    let mut seen_sign = false;
    let mut seen_currency = false;
    let mut open_paren = false;

    if styles.contains(NumberStyles::ALLOW_LEADING_WHITE) {
        rest = rest.trim_start();
    }

    // Leading sign, parenthesis and currency symbol in any order.
    loop {
        if !seen_sign && styles.contains(NumberStyles::ALLOW_LEADING_SIGN) {
            if let Some(after) = rest.strip_prefix(info.negative_sign.as_str()) {
                number.negative = true;
                seen_sign = true;
                rest = after;
                continue;
            }
            if let Some(after) = rest.strip_prefix(info.positive_sign.as_str()) {
                seen_sign = true;
                rest = after;
                continue;
            }
        }
        if !seen_sign && !open_paren && styles.contains(NumberStyles::ALLOW_PARENTHESES) {
            if let Some(after) = rest.strip_prefix('(') {
                number.negative = true;
                open_paren = true;
                seen_sign = true;
                rest = after;
                continue;
            }
        }
        if !seen_currency && currency {
            if let Some(after) = rest.strip_prefix(info.currency_symbol.as_str()) {
                seen_currency = true;
                rest = after.trim_start();
                continue;
            }
        }
        break;
    }

    // Digits, group separators and the decimal point.
    let mut any_digits = false;
    let mut seen_point = false;
    loop {
        let byte = rest.as_bytes().first().copied();
        match byte {
            Some(digit @ b'0'..=b'9') => {
                any_digits = true;
                if number.digits.is_empty() && digit == b'0' {
                    // Leading zeros carry no digits, only (negative) scale.
                    if seen_point {
                        number.scale -= 1;
                    }
                } else {
                    if number.digits.len() < max_digits {
                        number.digits.push(digit);
                    } else if digit != b'0' {
                        number.has_nonzero_tail = true;
                    }
                    if !seen_point {
                        number.scale += 1;
                    }
                }
                rest = &rest[1..];
            }
            _ => {
                if !seen_point && styles.contains(NumberStyles::ALLOW_DECIMAL_POINT) {
                    if let Some(after) = rest.strip_prefix(decimal_separator) {
                        seen_point = true;
                        rest = after;
                        continue;
                    }
                }
                if any_digits && !seen_point && styles.contains(NumberStyles::ALLOW_THOUSANDS) {
                    if let Some(after) = rest.strip_prefix(group_separator) {
                        rest = after;
                        continue;
                    }
                }
                break;
            }
        }
    }
    if !any_digits {
        return Err(Error::from(INVALID));
    }

    // Exponent marker with an optional sign.
    if styles.contains(NumberStyles::ALLOW_EXPONENT) {
        if let Some(after) = rest.strip_prefix('e').or_else(|| rest.strip_prefix('E')) {
            let (mut exp_rest, exp_negative) = if let Some(signed) = after.strip_prefix('-') {
                (signed, true)
            } else if let Some(signed) = after.strip_prefix('+') {
                (signed, false)
            } else {
                (after, false)
            };
            let mut exponent: i32 = 0;
            let mut exp_digits = false;
            while let Some(digit @ b'0'..=b'9') = exp_rest.as_bytes().first().copied() {
                exp_digits = true;
                exponent = exponent.saturating_mul(10).saturating_add((digit - b'0') as i32);
                exp_rest = &exp_rest[1..];
            }
            if !exp_digits {
                return Err(Error::from(INVALID));
            }
            number.scale = number
                .scale
                .saturating_add(if exp_negative { -exponent } else { exponent });
            rest = exp_rest;
        }
    }

    // Trailing currency, sign, closing parenthesis and whitespace.
    loop {
        let trimmed = if styles.contains(NumberStyles::ALLOW_TRAILING_WHITE) || open_paren || seen_currency {
            rest.trim_start()
        } else {
            rest
        };
        if trimmed.len() != rest.len() {
            rest = trimmed;
            continue;
        }
        if !seen_sign && styles.contains(NumberStyles::ALLOW_TRAILING_SIGN) {
            if let Some(after) = rest.strip_prefix(info.negative_sign.as_str()) {
                number.negative = true;
                seen_sign = true;
                rest = after;
                continue;
            }
            if let Some(after) = rest.strip_prefix(info.positive_sign.as_str()) {
                seen_sign = true;
                rest = after;
                continue;
            }
        }
        if open_paren {
            if let Some(after) = rest.strip_prefix(')') {
                open_paren = false;
                rest = after;
                continue;
            }
        }
        if !seen_currency && currency {
            if let Some(after) = rest.strip_prefix(info.currency_symbol.as_str()) {
                seen_currency = true;
                rest = after;
                continue;
            }
        }
        break;
    }

    if open_paren || !rest.is_empty() {
        return Err(Error::from(INVALID));
    }

    // Drop fractional trailing zeros for non-decimal targets; the decimal
    // reconstruction keeps them to preserve the scale.
    if kind != NumberKind::Decimal {
        while number.digits.last() == Some(&b'0') && number.digits.len() as i32 > number.scale {
            number.digits.pop();
        }
    }

    Ok(number)
}

// Accumulates the integral digits with per-digit overflow checks; the caller
// applies its own target range on top.
fn number_to_magnitude(number: &NumberBuffer) -> Result<u64, Error> {
    if number.is_zero() {
        return Ok(0);
    }
    // Any fractional digit must be zero for an integral target.
    let len = number.digits.len() as i32;
    if number.scale < len {
        let fraction = &number.digits[number.scale.max(0) as usize..];
        if number.scale < 0 || fraction.iter().any(|&d| d != b'0') || number.has_nonzero_tail {
            return Err(Error::from(INVALID));
        }
    }
    if number.scale > 20 {
        return Err(Error::ExceedsMaximumPossibleValue);
    }
    let mut value: u64 = 0;
    for position in 0..number.scale {
        let digit = if position < len {
            number.digits[position as usize] - b'0'
        } else {
            0
        };
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(digit as u64))
            .ok_or(Error::ExceedsMaximumPossibleValue)?;
    }
    Ok(value)
}

// Reconstruction into the 96 bit decimal form: digits accumulate into a wide
// register, the twenty-ninth and later significant digits rounding half to
// even against the remainder.
fn number_to_decimal(number: &NumberBuffer) -> Result<Decimal, Error> {
    let digits = &number.digits;
    let len = digits.len() as i32;

    let mut value: u128 = 0;
    let mut scale_out: i32 = (-number.scale).max(0);
    let mut idx: i32 = 0;

    if scale_out > 28 {
        // The first significant digit already sits below the representable
        // range; only a rounded-up minimum can survive.
        if number.is_zero() {
            return Ok(Decimal::from_parts(0, 0, 0, number.negative, 0));
        }
        if scale_out == 29 {
            let first = digits[0];
            let sticky = digits[1..].iter().any(|&d| d != b'0') || number.has_nonzero_tail;
            if first > b'5' || (first == b'5' && sticky) {
                return Ok(Decimal::from_parts(1, 0, 0, number.negative, 28));
            }
        }
        return Ok(Decimal::from_parts(0, 0, 0, number.negative, 28));
    }

    // Integral digits must all fit.
    while idx < number.scale {
        let digit = if idx < len { (digits[idx as usize] - b'0') as u128 } else { 0 };
        let next = value * 10 + digit;
        if next >= OVERFLOW_U96 {
            return Err(if number.negative {
                Error::LessThanMinimumPossibleValue
            } else {
                Error::ExceedsMaximumPossibleValue
            });
        }
        value = next;
        idx += 1;
    }

    // Fractional digits accumulate while both the scale and the significand
    // have room.
    while idx < len && scale_out < 28 {
        let digit = (digits[idx as usize] - b'0') as u128;
        let next = value * 10 + digit;
        if next >= OVERFLOW_U96 {
            break;
        }
        value = next;
        scale_out += 1;
        idx += 1;
    }

    // Round the first dropped digit half to even.
    if idx < len || number.has_nonzero_tail {
        let dropped = if idx < len { digits[idx as usize] } else { b'0' };
        let sticky = number.has_nonzero_tail
            || (idx + 1 < len && digits[idx as usize + 1..].iter().any(|&d| d != b'0'));
        if dropped > b'5' || (dropped == b'5' && (sticky || value & 1 == 1)) {
            value += 1;
            if value >= OVERFLOW_U96 {
                if scale_out == 0 {
                    return Err(if number.negative {
                        Error::LessThanMinimumPossibleValue
                    } else {
                        Error::ExceedsMaximumPossibleValue
                    });
                }
                // 2^96 drops a digit: dividing by ten rounds up on the six.
                value = 7_922_816_251_426_433_759_354_395_034;
                scale_out -= 1;
            }
        }
    }

    Ok(Decimal::from_parts(
        value as u32,
        (value >> 32) as u32,
        (value >> 64) as u32,
        number.negative,
        scale_out as u32,
    ))
}

fn number_to_float_bits<F: RawFloat>(number: &NumberBuffer) -> u64 {
    let sign = (number.negative as u64) << (F::SIG_BITS + F::EXP_BITS);
    if number.digits.is_empty() {
        return sign;
    }
    let exponent10 = number.scale - number.digits.len() as i32;

    // Small digit counts convert exactly in native arithmetic.
    if number.digits.len() <= 19 && !number.has_nonzero_tail {
        let mut mantissa: u64 = 0;
        let mut exact = true;
        for &digit in &number.digits {
            match mantissa.checked_mul(10).and_then(|m| m.checked_add((digit - b'0') as u64)) {
                Some(next) => mantissa = next,
                None => {
                    exact = false;
                    break;
                }
            }
        }
        if exact {
            if let Some(value) = F::fast_path(mantissa, exponent10, number.negative) {
                return value.to_bits64();
            }
        }
    }

    sign | digits_to_bits::<F>(&number.digits, exponent10, number.has_nonzero_tail)
}

#[cfg(test)]
mod test {
    use super::*;

    fn info() -> NumberFormatInfo {
        NumberFormatInfo::default()
    }

    #[test]
    fn integer_styles() {
        let info = info();
        assert_eq!(parse_i64(" 123 ", NumberStyles::INTEGER, &info).unwrap(), 123);
        assert_eq!(parse_i64("-123", NumberStyles::INTEGER, &info).unwrap(), -123);
        assert_eq!(
            parse_i64("1,234,567", NumberStyles::NUMBER, &info).unwrap(),
            1_234_567
        );
        assert_eq!(
            parse_i64("(42)", NumberStyles::NUMBER | NumberStyles::ALLOW_PARENTHESES, &info).unwrap(),
            -42
        );
        assert!(parse_i64("12.5", NumberStyles::NUMBER, &info).is_err());
        assert_eq!(parse_i64("12.00", NumberStyles::NUMBER, &info).unwrap(), 12);
        assert!(parse_i64("123x", NumberStyles::INTEGER, &info).is_err());
        assert!(parse_i64(" 123", NumberStyles::NONE, &info).is_err());
    }

    #[test]
    fn integer_bounds() {
        let info = info();
        assert_eq!(
            parse_i64("9223372036854775807", NumberStyles::INTEGER, &info).unwrap(),
            i64::MAX
        );
        assert_eq!(
            parse_i64("-9223372036854775808", NumberStyles::INTEGER, &info).unwrap(),
            i64::MIN
        );
        assert!(parse_i64("9223372036854775808", NumberStyles::INTEGER, &info).is_err());
        assert_eq!(
            parse_u64("18446744073709551615", NumberStyles::INTEGER, &info).unwrap(),
            u64::MAX
        );
        assert!(parse_u64("18446744073709551616", NumberStyles::INTEGER, &info).is_err());
        assert!(parse_u64("-1", NumberStyles::INTEGER, &info).is_err());
        assert_eq!(parse_i32("-2147483648", NumberStyles::INTEGER, &info).unwrap(), i32::MIN);
        assert!(parse_i32("2147483648", NumberStyles::INTEGER, &info).is_err());
    }

    #[test]
    fn hex_parsing() {
        let info = info();
        assert_eq!(parse_i32("FF", NumberStyles::HEX_NUMBER, &info).unwrap(), 255);
        assert_eq!(parse_i32("ffffffff", NumberStyles::HEX_NUMBER, &info).unwrap(), -1);
        assert_eq!(
            parse_u64("DEADBEEF", NumberStyles::HEX_NUMBER, &info).unwrap(),
            0xDEAD_BEEF
        );
        assert!(parse_i32("G1", NumberStyles::HEX_NUMBER, &info).is_err());
    }

    #[test]
    fn decimal_parsing() {
        let info = info();
        let value = parse_decimal("1,234.5600", NumberStyles::NUMBER, &info).unwrap();
        assert_eq!(value.to_string(), "1234.5600");
        assert_eq!(value.scale(), 4);
        let value = parse_decimal("(1.5)", NumberStyles::CURRENCY, &info).unwrap();
        assert_eq!(value.to_string(), "-1.5");
        let value = parse_decimal("\u{00A4}12.34", NumberStyles::CURRENCY, &info).unwrap();
        assert_eq!(value.to_string(), "12.34");
    }

    #[test]
    fn decimal_rounds_excess_precision() {
        let info = info();
        // 30 significant digits: the final one rounds half to even.
        let value = parse_decimal(
            "7.92281625142643375935439503355",
            NumberStyles::FLOAT,
            &info,
        )
        .unwrap();
        // The half-even carry pushes past 96 bits, costing one more digit.
        assert_eq!(value.to_string(), "7.922816251426433759354395034");
    }

    #[test]
    fn decimal_overflow() {
        let info = info();
        assert!(matches!(
            parse_decimal("79228162514264337593543950336", NumberStyles::INTEGER, &info),
            Err(Error::ExceedsMaximumPossibleValue)
        ));
    }

    #[test]
    fn float_parsing() {
        let info = info();
        assert_eq!(parse_f64("0.1", NumberStyles::FLOAT, &info).unwrap(), 0.1);
        assert_eq!(parse_f64("1e300", NumberStyles::FLOAT, &info).unwrap(), 1e300);
        assert_eq!(parse_f64("1E-300", NumberStyles::FLOAT, &info).unwrap(), 1e-300);
        assert_eq!(
            parse_f64("2.2250738585072011e-308", NumberStyles::FLOAT, &info).unwrap(),
            2.2250738585072011e-308
        );
        assert_eq!(parse_f64("1e400", NumberStyles::FLOAT, &info).unwrap(), f64::INFINITY);
        assert_eq!(parse_f64("1e-400", NumberStyles::FLOAT, &info).unwrap(), 0.0);
        assert!(parse_f64("1e", NumberStyles::FLOAT, &info).is_err());
        assert!(parse_f64("1.5", NumberStyles::INTEGER, &info).is_err());
    }

    #[test]
    fn float_specials_and_signed_zero() {
        let info = info();
        assert!(parse_f64("NaN", NumberStyles::FLOAT, &info).unwrap().is_nan());
        assert_eq!(parse_f64("Infinity", NumberStyles::FLOAT, &info).unwrap(), f64::INFINITY);
        assert_eq!(
            parse_f64("-Infinity", NumberStyles::FLOAT, &info).unwrap(),
            f64::NEG_INFINITY
        );
        let zero = parse_f64("-0.0", NumberStyles::FLOAT, &info).unwrap();
        assert_eq!(zero, 0.0);
        assert!(zero.is_sign_negative());
    }

    #[test]
    fn half_parsing() {
        let info = info();
        assert_eq!(parse_half("1", NumberStyles::FLOAT, &info).unwrap(), Half::from_bits(0x3C00));
        assert_eq!(
            parse_half("65504", NumberStyles::FLOAT, &info).unwrap(),
            Half::from_bits(0x7BFF)
        );
        assert_eq!(
            parse_half("100000", NumberStyles::FLOAT, &info).unwrap(),
            Half::from_bits(0x7C00)
        );
    }
}
