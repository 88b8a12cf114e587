use dec96::{Decimal, RoundingStrategy};
use num_traits::ToPrimitive;
use std::str::FromStr;

// Parsing

#[test]
fn it_parses_positive_int_string() {
    let a = Decimal::from_str("233").unwrap();
    assert!(a.is_sign_positive());
    assert_eq!(a.scale(), 0);
    assert_eq!("233", a.to_string());
}

#[test]
fn it_parses_negative_int_string() {
    let a = Decimal::from_str("-233").unwrap();
    assert!(a.is_sign_negative());
    assert_eq!(a.scale(), 0);
    assert_eq!("-233", a.to_string());
}

#[test]
fn it_parses_positive_float_string() {
    let a = Decimal::from_str("233.323223").unwrap();
    assert!(a.is_sign_positive());
    assert_eq!(a.scale(), 6);
    assert_eq!("233.323223", a.to_string());
}

#[test]
fn it_parses_negative_tiny_float_string() {
    let a = Decimal::from_str("-0.000001").unwrap();
    assert!(a.is_sign_negative());
    assert_eq!(a.scale(), 6);
    assert_eq!("-0.000001", a.to_string());
}

#[test]
fn it_parses_big_integer_string() {
    let a = Decimal::from_str("79228162514264337593543950330").unwrap();
    assert_eq!("79228162514264337593543950330", a.to_string());
}

#[test]
fn it_parses_big_float_string() {
    let a = Decimal::from_str("79.228162514264337593543950330").unwrap();
    assert_eq!("79.228162514264337593543950330", a.to_string());
}

#[test]
fn it_errors_on_garbage() {
    assert!(Decimal::from_str("").is_err());
    assert!(Decimal::from_str("1.2.3").is_err());
    assert!(Decimal::from_str("five").is_err());
}

#[test]
fn it_can_serialize_deserialize() {
    let a = Decimal::from_str("12.3456789").unwrap();
    let bytes = a.serialize();
    let b = Decimal::deserialize(bytes);
    assert_eq!("12.3456789", b.to_string());
}

#[test]
fn binary_layout_is_lo_mid_hi_flags() {
    let a = Decimal::new(-1, 5);
    let bytes = a.serialize();
    assert_eq!(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]), 1);
    assert_eq!(u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]), 0);
    assert_eq!(u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]), 0);
    let flags = u32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]);
    assert_eq!(flags, 0x8000_0000 | (5 << 16));
}

// Addition

#[test]
fn it_adds_decimals() {
    let cases = [
        ("2", "3", "5"),
        ("2454495034", "3451204593", "5905699627"),
        ("24544.95034", ".3451204593", "24545.2954604593"),
        (".1", ".1", "0.2"),
        (".10", ".1", "0.20"),
        ("0", "1.001", "1.001"),
        ("2", "-3", "-1"),
        ("-2", "3", "1"),
        ("-2", "-3", "-5"),
        ("3", "-2", "1"),
    ];
    for (a, b, expected) in cases {
        let a = Decimal::from_str(a).unwrap();
        let b = Decimal::from_str(b).unwrap();
        assert_eq!(expected, (a + b).to_string(), "{a} + {b}");
    }
}

#[test]
fn one_tenth_plus_two_tenths_is_exactly_three_tenths() {
    let a = Decimal::from_str("0.1").unwrap();
    let b = Decimal::from_str("0.2").unwrap();
    let c = Decimal::from_str("0.3").unwrap();
    assert_eq!(a + b, c);
    assert_eq!("0.3", (a + b).to_string());
}

#[test]
fn addition_at_max_overflows() {
    assert!(Decimal::MAX.checked_add(Decimal::ONE).is_none());
}

#[test]
fn addition_retains_exactness_at_equal_scale() {
    let a = Decimal::from_str("1.0001").unwrap();
    let b = Decimal::from_str("2.0009").unwrap();
    assert_eq!("3.0010", (a + b).to_string());
}

// Subtraction

#[test]
fn it_subtracts_decimals() {
    let cases = [
        ("5", "3", "2"),
        ("0.1", "0.1", "0.0"),
        ("1", "0.001", "0.999"),
        ("-2", "-3", "1"),
        ("2", "3", "-1"),
    ];
    for (a, b, expected) in cases {
        let a = Decimal::from_str(a).unwrap();
        let b = Decimal::from_str(b).unwrap();
        assert_eq!(expected, (a - b).to_string(), "{a} - {b}");
    }
}

// Multiplication

#[test]
fn it_multiplies_decimals() {
    let cases = [
        ("2", "3", "6"),
        ("2454495034", "3451204593", "8470964534836491162"),
        ("24544.95034", ".3451204593", "8470.964534836491162"),
        ("0.1", "0.2", "0.02"),
        ("-0.1", "0.2", "-0.02"),
        ("-0.1", "-0.2", "0.02"),
    ];
    for (a, b, expected) in cases {
        let a = Decimal::from_str(a).unwrap();
        let b = Decimal::from_str(b).unwrap();
        assert_eq!(expected, (a * b).to_string(), "{a} * {b}");
    }
}

#[test]
fn multiplication_past_96_bits_rounds_ties_to_even() {
    // The full product has more than 28 fractional digits and is truncated.
    let a = Decimal::from_str("0.5").unwrap();
    let tiny = Decimal::from_str("0.0000000000000000000000000001").unwrap();
    // 5e-29 is an exact midpoint at the final scale: rounds to the even zero.
    assert!((a * tiny).is_zero());
    let three = Decimal::from_str("0.3").unwrap();
    // 3e-29 rounds down to zero.
    assert!((three * tiny).is_zero());
    let seven = Decimal::from_str("0.7").unwrap();
    // 7e-29 rounds up to 1e-28.
    assert_eq!("0.0000000000000000000000000001", (seven * tiny).to_string());
}

#[test]
fn multiplication_overflow_is_detected() {
    assert!(Decimal::MAX.checked_mul(Decimal::TWO).is_none());
}

// Division

#[test]
fn it_divides_decimals() {
    let cases = [
        ("6", "3", "2"),
        ("10", "2", "5"),
        ("2.2", "1.1", "2"),
        ("-2.2", "-1.1", "2"),
        ("12.88", "5.6", "2.3"),
        ("1023427554493", "43432632", "23563.562864276795382789603909"),
        ("10000", "3", "3333.3333333333333333333333333"),
    ];
    for (a, b, expected) in cases {
        let a = Decimal::from_str(a).unwrap();
        let b = Decimal::from_str(b).unwrap();
        assert_eq!(expected, (a / b).to_string(), "{a} / {b}");
    }
}

#[test]
fn one_third_has_twenty_eight_threes() {
    let one = Decimal::ONE;
    let three = Decimal::from_str("3").unwrap();
    assert_eq!("0.3333333333333333333333333333", (one / three).to_string());
}

#[test]
fn division_by_zero_is_an_error_not_infinity() {
    let one = Decimal::from_str("1.0").unwrap();
    let zero = Decimal::ZERO;
    assert!(one.checked_div(zero).is_none());
}

#[test]
#[should_panic(expected = "Division by zero")]
fn division_by_zero_panics_through_the_operator() {
    let one = Decimal::from_str("1.0").unwrap();
    let _ = one / Decimal::ZERO;
}

// Remainder

#[test]
fn it_computes_remainders() {
    let cases = [
        ("10", "3", "1"),
        ("-10", "3", "-1"),
        ("10", "-3", "1"),
        ("5.5", "2", "1.5"),
        ("3", "4", "3"),
    ];
    for (a, b, expected) in cases {
        let a = Decimal::from_str(a).unwrap();
        let b = Decimal::from_str(b).unwrap();
        assert_eq!(expected, (a % b).to_string(), "{a} % {b}");
    }
}

// Rounding

#[test]
fn it_rounds_with_bankers_rounding() {
    let cases = [("6.5", "6"), ("7.5", "8"), ("1.25", "1.2"), ("1.35", "1.4")];
    for (value, expected) in [cases[0], cases[1]] {
        let value = Decimal::from_str(value).unwrap();
        assert_eq!(expected, value.round().to_string());
    }
    for (value, expected) in [cases[2], cases[3]] {
        let value = Decimal::from_str(value).unwrap();
        assert_eq!(expected, value.round_dp(1).to_string());
    }
}

#[test]
fn it_rounds_with_each_strategy() {
    let value = Decimal::from_str("-2.45").unwrap();
    assert_eq!(
        "-2.4",
        value
            .round_dp_with_strategy(1, RoundingStrategy::MidpointNearestEven)
            .to_string()
    );
    assert_eq!(
        "-2.5",
        value
            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
            .to_string()
    );
    assert_eq!(
        "-2.4",
        value.round_dp_with_strategy(1, RoundingStrategy::ToZero).to_string()
    );
    assert_eq!(
        "-2.5",
        value
            .round_dp_with_strategy(1, RoundingStrategy::ToNegativeInfinity)
            .to_string()
    );
    assert_eq!(
        "-2.4",
        value
            .round_dp_with_strategy(1, RoundingStrategy::ToPositiveInfinity)
            .to_string()
    );
}

// Ordering and equality

#[test]
fn values_compare_across_scales() {
    let a = Decimal::from_str("1.2300").unwrap();
    let b = Decimal::from_str("1.23").unwrap();
    assert_eq!(a, b);
    assert!(Decimal::from_str("1.24").unwrap() > a);
    assert!(Decimal::from_str("-1.24").unwrap() < Decimal::from_str("-1.23").unwrap());
}

// Scientific notation

#[test]
fn it_parses_scientific_notation() {
    assert_eq!("12000000000", Decimal::from_scientific("1.2e10").unwrap().to_string());
    assert_eq!("0.0012", Decimal::from_scientific("1.2e-3").unwrap().to_string());
}

#[test]
fn it_formats_scientific_notation() {
    let value = Decimal::from_str("1234.5").unwrap();
    assert_eq!("1.2345e3", format!("{value:e}"));
}

// Float conversions

#[test]
fn from_f64_windows_to_fifteen_digits() {
    assert_eq!("0.1", Decimal::try_from(0.1f64).unwrap().to_string());
    assert_eq!("123.456", Decimal::try_from(123.456f64).unwrap().to_string());
    assert!(Decimal::try_from(f64::NAN).is_err());
    assert!(Decimal::try_from(1e30).is_err());
}

#[test]
fn to_f64_is_an_approximation_within_double_precision() {
    let value = Decimal::from_str("0.1").unwrap();
    assert_eq!(value.to_f64(), Some(0.1));
    let max = Decimal::MAX;
    let expected = 79228162514264337593543950335f64;
    assert_eq!(max.to_f64(), Some(expected));
}

// Boundary behavior

#[test]
fn max_value_round_trips_through_text() {
    assert_eq!("79228162514264337593543950335", Decimal::MAX.to_string());
    assert_eq!(Decimal::from_str("79228162514264337593543950335").unwrap(), Decimal::MAX);
}

#[test]
fn twenty_nine_fractional_digits_round() {
    // Scale 28 is the most that can be kept; one more digit must round.
    let value = Decimal::from_str("0.00000000000000000000000000015").unwrap();
    assert_eq!("0.0000000000000000000000000002", value.to_string());
}

#[test]
fn scale_28_with_extra_precision_errors_when_exact() {
    use dec96::{parse_decimal, NumberFormatInfo, NumberStyles};
    let info = NumberFormatInfo::default();
    // The styled parser rounds; the arithmetic itself refuses to fit 2^96.
    let parsed = parse_decimal("79228162514264337593543950336", NumberStyles::INTEGER, &info);
    assert!(parsed.is_err());
}

#[test]
fn negation_and_abs() {
    let value = Decimal::from_str("1.5").unwrap();
    assert_eq!("-1.5", (-value).to_string());
    assert_eq!("1.5", (-value).abs().to_string());
}

#[test]
fn floor_ceil_trunc_fract() {
    let value = Decimal::from_str("-2.5").unwrap();
    assert_eq!("-3", value.floor().to_string());
    assert_eq!("-2", value.ceil().to_string());
    assert_eq!("-2", value.trunc().to_string());
    assert_eq!("-0.5", value.fract().to_string());
}

#[test]
fn sums_and_products_of_iterators() {
    let values: Vec<Decimal> = ["1.1", "2.2", "3.3"]
        .iter()
        .map(|s| Decimal::from_str(s).unwrap())
        .collect();
    let sum: Decimal = values.iter().sum();
    assert_eq!("6.6", sum.to_string());
}

#[test]
fn display_precision_formatting() {
    let value = Decimal::from_str("1.25").unwrap();
    assert_eq!("1.2500", format!("{value:.4}"));
    assert_eq!("  1.25", format!("{value:>6}"));
}

#[test]
fn zero_is_not_negative_after_cancellation() {
    let a = Decimal::from_str("1.5").unwrap();
    let b = Decimal::from_str("-1.5").unwrap();
    let zero = a + b;
    assert!(zero.is_zero());
    assert!(zero.is_sign_positive());
}
