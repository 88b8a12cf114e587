use crate::bigint::BigNum;
use crate::decimal::{CalculationResult, Decimal};

use core::cmp::Ordering;

// Remainder takes the sign of the dividend and the larger of the two scales.
// Both magnitudes are brought to that common scale exactly, which can need up
// to 189 bits, and the remainder falls out of one bounded long division.
// Whenever |dividend| >= |divisor| the remainder is below a 96 bit value at
// the common scale, so the result always fits.
pub(crate) fn rem_impl(d1: &Decimal, d2: &Decimal) -> CalculationResult {
    if d2.is_zero() {
        return CalculationResult::DivByZero;
    }
    if d1.is_zero() {
        return CalculationResult::Ok(*d1);
    }

    let scale = d1.scale().max(d2.scale());
    let mut dividend = BigNum::from_u128(d1.magnitude());
    dividend.mul_pow10(scale - d1.scale());
    let mut divisor = BigNum::from_u128(d2.magnitude());
    divisor.mul_pow10(scale - d2.scale());

    match dividend.compare(&divisor) {
        Ordering::Less => CalculationResult::Ok(*d1),
        Ordering::Equal => CalculationResult::Ok(Decimal::from_parts(
            0,
            0,
            0,
            false,
            scale,
        )),
        Ordering::Greater => {
            let _quotient = dividend.div_rem(&divisor);
            let remainder = dividend.to_u128();
            CalculationResult::Ok(Decimal::from_parts(
                remainder as u32,
                (remainder >> 32) as u32,
                (remainder >> 64) as u32,
                d1.is_sign_negative() && remainder != 0,
                scale,
            ))
        }
    }
}
