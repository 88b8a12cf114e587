use dec96::{
    format_decimal, format_f64, format_i64, format_u64, parse_decimal, parse_f64, parse_i64,
    Decimal, NumberFormatInfo, NumberStyles,
};
use std::str::FromStr;

fn invariant() -> NumberFormatInfo {
    NumberFormatInfo::default()
}

// A culture with distinctive separators and symbols, in the shape of many
// European locales.
fn european() -> NumberFormatInfo {
    NumberFormatInfo {
        decimal_separator: ",".into(),
        group_separator: ".".into(),
        currency_symbol: "\u{20AC}".into(),
        currency_decimal_separator: ",".into(),
        currency_group_separator: ".".into(),
        currency_positive_pattern: 3,  // n $
        currency_negative_pattern: 8,  // -n $
        negative_sign: "\u{2212}".into(),
        nan_symbol: "NeN".into(),
        ..NumberFormatInfo::default()
    }
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

#[test]
fn standard_specifiers_for_decimal() {
    let info = invariant();
    let value = dec("1234567.891");
    assert_eq!(format_decimal(&value, "G", &info).unwrap(), "1234567.891");
    assert_eq!(format_decimal(&value, "F1", &info).unwrap(), "1234567.9");
    assert_eq!(format_decimal(&value, "F5", &info).unwrap(), "1234567.89100");
    assert_eq!(format_decimal(&value, "N2", &info).unwrap(), "1,234,567.89");
    assert_eq!(format_decimal(&value, "E3", &info).unwrap(), "1.235E+006");
    assert_eq!(format_decimal(&value, "C0", &info).unwrap(), "\u{00A4}1,234,568");
}

#[test]
fn group_sizes_vary() {
    let mut info = invariant();
    info.group_sizes = vec![3, 2];
    let value = dec("123456789");
    // Indian style grouping: 3 then repeating 2s.
    assert_eq!(format_decimal(&value, "N0", &info).unwrap(), "12,34,56,789");

    info.group_sizes = vec![3, 0];
    // A zero terminates grouping beyond the first group.
    assert_eq!(format_decimal(&value, "N0", &info).unwrap(), "123456,789");
}

#[test]
fn european_culture_formats() {
    let info = european();
    let value = dec("-1234.5");
    assert_eq!(format_decimal(&value, "N2", &info).unwrap(), "\u{2212}1.234,50");
    assert_eq!(
        format_decimal(&value, "C2", &info).unwrap(),
        "\u{2212}1.234,50 \u{20AC}"
    );
    assert_eq!(format_f64(f64::NAN, "G", &info).unwrap(), "NeN");
}

#[test]
fn european_culture_parses_back() {
    let info = european();
    let value = parse_decimal("1.234,50", NumberStyles::NUMBER, &info).unwrap();
    assert_eq!(value, dec("1234.50"));
    let value = parse_decimal("\u{2212}7,5", NumberStyles::NUMBER, &info).unwrap();
    assert_eq!(value, dec("-7.5"));
    let value = parse_decimal("\u{20AC}19,99", NumberStyles::CURRENCY, &info).unwrap();
    assert_eq!(value, dec("19.99"));
}

#[test]
fn percent_formats_scale_by_one_hundred() {
    let info = invariant();
    assert_eq!(format_decimal(&dec("0.125"), "P0", &info).unwrap(), "13 %");
    assert_eq!(format_decimal(&dec("0.125"), "P2", &info).unwrap(), "12.50 %");
    assert_eq!(format_f64(0.125, "P1", &info).unwrap(), "12.5 %");
    assert_eq!(format_decimal(&dec("-0.5"), "P0", &info).unwrap(), "-50 %");
}

#[test]
fn integers_format_like_the_runtime() {
    let info = invariant();
    assert_eq!(format_i64(-1234567, "N0", &info).unwrap(), "(1,234,567)");
    assert_eq!(format_i64(255, "X2", &info).unwrap(), "FF");
    assert_eq!(format_i64(255, "X8", &info).unwrap(), "000000FF");
    assert_eq!(format_u64(u64::MAX, "G", &info).unwrap(), "18446744073709551615");
}

#[test]
fn parse_styles_toggle_tokens_independently() {
    let info = invariant();
    // Thousands only when allowed.
    assert!(parse_i64("1,234", NumberStyles::INTEGER, &info).is_err());
    assert_eq!(parse_i64("1,234", NumberStyles::NUMBER, &info).unwrap(), 1234);
    // Exponent only when allowed.
    assert!(parse_decimal("1e2", NumberStyles::NUMBER, &info).is_err());
    assert_eq!(
        parse_decimal("1e2", NumberStyles::NUMBER | NumberStyles::ALLOW_EXPONENT, &info).unwrap(),
        dec("100")
    );
    // Whitespace only when allowed.
    assert!(parse_i64(" 5", NumberStyles::NONE, &info).is_err());
    assert_eq!(
        parse_i64(" 5", NumberStyles::ALLOW_LEADING_WHITE, &info).unwrap(),
        5
    );
    // Trailing sign.
    assert_eq!(
        parse_i64("5-", NumberStyles::ALLOW_TRAILING_SIGN, &info).unwrap(),
        -5
    );
}

#[test]
fn idempotent_canonical_forms() {
    let info = invariant();
    for text in ["0", "1", "-1", "123.456", "-0.001", "79228162514264337593543950335"] {
        let value = parse_decimal(text, NumberStyles::NUMBER, &info).unwrap();
        assert_eq!(format_decimal(&value, "G", &info).unwrap(), text, "{text}");
    }
    for text in ["0.1", "-1024.5", "1E+300", "5E-324", "0.30000000000000004"] {
        let value = parse_f64(text, NumberStyles::FLOAT, &info).unwrap();
        assert_eq!(format_f64(value, "G", &info).unwrap(), text, "{text}");
    }
}

#[test]
fn custom_pictures_cover_the_token_set() {
    let info = invariant();
    assert_eq!(
        format_decimal(&dec("1234.567"), "#,##0.00", &info).unwrap(),
        "1,234.57"
    );
    assert_eq!(format_decimal(&dec("0.2"), "#.00", &info).unwrap(), ".20");
    assert_eq!(format_decimal(&dec("7"), "000", &info).unwrap(), "007");
    assert_eq!(format_decimal(&dec("0.42"), "0.0%", &info).unwrap(), "42.0%");
    assert_eq!(
        format_decimal(&dec("12345678"), "#,###,,", &info).unwrap(),
        "12"
    );
    assert_eq!(
        format_decimal(&dec("0.00042"), "0.00E+00", &info).unwrap(),
        "4.20E-04"
    );
    assert_eq!(
        format_f64(1234.5678, "0.000e+00", &info).unwrap(),
        "1.235e+03"
    );
    assert_eq!(
        format_decimal(&dec("12.5"), "00.0 'kg'", &info).unwrap(),
        "12.5 kg"
    );
    assert_eq!(
        format_decimal(&dec("-3"), "0.0;neg 0.0;none", &info).unwrap(),
        "neg 3.0"
    );
    assert_eq!(format_decimal(&dec("0"), "0.0;neg;none", &info).unwrap(), "none");
}

#[test]
fn float_and_decimal_agree_on_shared_values() {
    let info = invariant();
    for text in ["1.5", "-12.25", "1000", "0.0625"] {
        let d = parse_decimal(text, NumberStyles::FLOAT, &info).unwrap();
        let f = parse_f64(text, NumberStyles::FLOAT, &info).unwrap();
        assert_eq!(
            format_decimal(&d, "F4", &info).unwrap(),
            format_f64(f, "F4", &info).unwrap(),
            "{text}"
        );
    }
}
