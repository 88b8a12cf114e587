use crate::{
    constants::{BIG_POWERS_10, MAX_SCALE},
    error::Error,
    Decimal,
};

use core::str::FromStr;

#[inline]
pub(crate) fn parse_str_scientific(value: &str) -> Result<Decimal, Error> {
    const ERROR_MESSAGE: &str = "Failed to parse";

    let mut split = value.splitn(2, |c| c == 'e' || c == 'E');

    let base = split.next().ok_or_else(|| Error::from(ERROR_MESSAGE))?;
    let exp = split.next().ok_or_else(|| Error::from(ERROR_MESSAGE))?;

    let mut ret = Decimal::from_str(base)?;
    let current_scale = ret.scale();

    if let Some(stripped) = exp.strip_prefix('-') {
        let exp: u32 = stripped.parse().map_err(|_| Error::from(ERROR_MESSAGE))?;
        ret.set_scale(current_scale + exp)?;
    } else {
        let exp: u32 = exp.parse().map_err(|_| Error::from(ERROR_MESSAGE))?;
        if exp <= current_scale {
            ret.set_scale(current_scale - exp)?;
        } else if exp > 0 {
            // The significand itself needs to grow, e.g. 1.2E10 is stored as
            // the integer 12,000,000,000 with a scale of zero.
            if exp > MAX_SCALE {
                return Err(Error::ScaleExceedsMaximumPrecision(exp));
            }
            let mut exp = exp as usize;
            // Max two iterations. If exp is 1 then it needs to index position 0 of the array.
            while exp > 0 {
                let pow;
                if exp >= BIG_POWERS_10.len() {
                    pow = BIG_POWERS_10[BIG_POWERS_10.len() - 1];
                    exp -= BIG_POWERS_10.len();
                } else {
                    pow = BIG_POWERS_10[exp - 1];
                    exp = 0;
                }

                let pow = Decimal::from_parts(pow as u32, (pow >> 32) as u32, 0, false, 0);
                match ret.checked_mul(pow) {
                    Some(r) => ret = r,
                    None => return Err(Error::ExceedsMaximumPossibleValue),
                };
            }
            ret.normalize_assign();
        }
    }
    Ok(ret)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn positive_exponent_grows_significand() {
        assert_eq!(parse_str_scientific("1.2e10").unwrap().to_string(), "12000000000");
        assert_eq!(parse_str_scientific("9.7E5").unwrap().to_string(), "970000");
    }

    #[test]
    fn negative_exponent_grows_scale() {
        assert_eq!(parse_str_scientific("1.2e-3").unwrap().to_string(), "0.0012");
    }

    #[test]
    fn out_of_range_exponent_errors() {
        assert!(parse_str_scientific("1e29").is_err());
        assert!(parse_str_scientific("1e-29").is_err());
    }
}
