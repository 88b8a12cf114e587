use crate::{
    ops::array::{div_by_u32, is_all_zero},
    Decimal,
};

use core::fmt;

pub(crate) fn fmt_scientific_notation(
    value: &Decimal,
    exponent_symbol: &str,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    // The scale is the e value; trailing zeros in the significand grow it.
    let mut exponent = -(value.scale() as isize);

    // Convert the integral to a string
    let mut chars = Vec::new();
    let mut working = value.mantissa_array3();
    while !is_all_zero(&working) {
        let remainder = div_by_u32(&mut working, 10u32);
        chars.push(char::from(b'0' + remainder as u8));
    }

    // Scientific notation wants exactly one digit before the decimal point;
    // inject it in the right place and adjust the exponent to match.
    let len = chars.len();
    let mut rep;
    if let Some(precision) = f.precision() {
        if len > 1 {
            // Zero precision with only trailing zeros reduces to one digit.
            if precision == 0 && chars.iter().take(len - 1).all(|c| *c == '0') {
                rep = chars.iter().skip(len - 1).collect::<String>();
            } else {
                if precision > 0 {
                    chars.insert(len - 1, '.');
                }
                rep = chars
                    .iter()
                    .rev()
                    // Pad zeros out to the precision. At least one, since a decimal place was added.
                    .chain(core::iter::repeat(&'0'))
                    .take(if precision == 0 { 1 } else { 2 + precision })
                    .collect::<String>();
            }
            exponent += (len - 1) as isize;
        } else if precision > 0 {
            chars.push('.');
            rep = chars
                .iter()
                .chain(core::iter::repeat(&'0'))
                .take(2 + precision)
                .collect::<String>();
        } else {
            rep = chars.iter().collect::<String>();
        }
    } else if len > 1 {
        // A significand that is all trailing zeros is treated like zero precision.
        if chars.iter().take(len - 1).all(|c| *c == '0') {
            rep = chars.iter().skip(len - 1).collect::<String>();
        } else {
            chars.insert(len - 1, '.');
            rep = chars.iter().rev().collect::<String>();
        }
        exponent += (len - 1) as isize;
    } else {
        rep = chars.iter().collect::<String>();
    }

    rep.push_str(exponent_symbol);
    rep.push_str(&exponent.to_string());
    f.pad_integral(value.is_sign_positive(), "", &rep)
}

#[cfg(test)]
mod test {
    use crate::Decimal;
    use core::str::FromStr;

    #[test]
    fn lower_exp_moves_the_point() {
        let num = Decimal::from_str("1234.5").unwrap();
        assert_eq!(format!("{num:e}"), "1.2345e3");
    }

    #[test]
    fn trailing_zero_significand_collapses() {
        let num = Decimal::from_str("1000").unwrap();
        assert_eq!(format!("{num:e}"), "1e3");
    }
}
