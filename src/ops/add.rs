use crate::constants::OVERFLOW_U96;
use crate::decimal::{CalculationResult, Decimal};
use crate::ops::common::{Buf24, Dec64, MAX_I32_SCALE};

use core::cmp::Ordering;

pub(crate) fn add_impl(d1: &Decimal, d2: &Decimal) -> CalculationResult {
    add_sub_internal(d1, d2, false)
}

pub(crate) fn sub_impl(d1: &Decimal, d2: &Decimal) -> CalculationResult {
    add_sub_internal(d1, d2, true)
}

fn add_sub_internal(d1: &Decimal, d2: &Decimal, subtract: bool) -> CalculationResult {
    let lhs = Dec64::new(d1);
    let mut rhs = Dec64::new(d2);
    rhs.negative ^= subtract;

    if lhs.scale == rhs.scale {
        aligned_add(&lhs, &rhs)
    } else {
        unaligned_add(&lhs, &rhs)
    }
}

// Both operands already share a scale so this is a pure magnitude operation.
fn aligned_add(lhs: &Dec64, rhs: &Dec64) -> CalculationResult {
    let m1 = lhs.magnitude();
    let m2 = rhs.magnitude();

    if lhs.negative == rhs.negative {
        let sum = m1 + m2;
        if sum < OVERFLOW_U96 {
            return CalculationResult::Ok(from_u128(sum, lhs.negative, lhs.scale));
        }
        // Carried past 96 bits; drop a digit of scale to absorb it.
        let mut wide = Buf24::zero();
        copy_from_u128(&mut wide, sum);
        return finish(wide, lhs.negative, lhs.scale);
    }

    // Differing signs: the larger magnitude determines the sign of the result.
    match m1.cmp(&m2) {
        Ordering::Greater => CalculationResult::Ok(from_u128(m1 - m2, lhs.negative, lhs.scale)),
        Ordering::Less => CalculationResult::Ok(from_u128(m2 - m1, rhs.negative, lhs.scale)),
        Ordering::Equal => CalculationResult::Ok(from_u128(0, false, lhs.scale)),
    }
}

// The lower scale operand is multiplied up by powers of ten until the scales
// match. The scaled magnitude can take up to 189 bits so the arithmetic runs
// in a wide buffer and the result is rescaled back into 96 bits at the end.
fn unaligned_add(lhs: &Dec64, rhs: &Dec64) -> CalculationResult {
    let (high, low) = if lhs.scale > rhs.scale { (lhs, rhs) } else { (rhs, lhs) };
    let mut diff = (high.scale - low.scale) as i32;

    let mut wide = Buf24::zero();
    copy_from_u128(&mut wide, low.magnitude());
    while diff > 0 {
        let step = diff.min(MAX_I32_SCALE);
        wide.mul32(crate::constants::POWERS_10[step as usize]);
        diff -= step;
    }

    let magnitude = high.magnitude();
    let negative;
    if high.negative == low.negative {
        add_u128(&mut wide, magnitude);
        negative = high.negative;
    } else {
        match cmp_u128(&wide, magnitude) {
            Ordering::Greater => {
                sub_u128(&mut wide, magnitude);
                negative = low.negative;
            }
            Ordering::Less => {
                // The wide value is the smaller one here, so it fits in 128
                // bits and the subtraction can run natively.
                let value = magnitude - to_u128(&wide);
                copy_from_u128(&mut wide, value);
                negative = high.negative;
            }
            Ordering::Equal => {
                copy_from_u128(&mut wide, 0);
                negative = false;
            }
        }
    }

    finish(wide, negative, high.scale)
}

fn finish(mut wide: Buf24, negative: bool, scale: u32) -> CalculationResult {
    match wide.rescale(scale as i32) {
        Some(scale) => CalculationResult::Ok(Decimal::from_parts(
            wide.u0,
            wide.u1,
            wide.u2,
            negative,
            scale as u32,
        )),
        None => CalculationResult::Overflow,
    }
}

fn from_u128(value: u128, negative: bool, scale: u32) -> Decimal {
    debug_assert!(value < OVERFLOW_U96);
    Decimal::from_parts(
        value as u32,
        (value >> 32) as u32,
        (value >> 64) as u32,
        negative && value != 0,
        scale,
    )
}

fn copy_from_u128(buf: &mut Buf24, value: u128) {
    buf.set_low64(value as u64);
    buf.set_mid64((value >> 64) as u64);
    buf.u4 = 0;
    buf.u5 = 0;
}

fn to_u128(buf: &Buf24) -> u128 {
    debug_assert!(buf.upper_word() <= 3);
    (buf.low64() as u128) | ((buf.mid64() as u128) << 64)
}

fn cmp_u128(buf: &Buf24, value: u128) -> Ordering {
    if buf.u4 != 0 || buf.u5 != 0 {
        return Ordering::Greater;
    }
    to_u128(buf).cmp(&value)
}

fn add_u128(buf: &mut Buf24, value: u128) {
    let (low, carry) = buf.low64().overflowing_add(value as u64);
    buf.set_low64(low);
    // value < 2^96 so the upper half plus an inbound carry cannot overflow.
    let (mid, carry) = buf.mid64().overflowing_add(((value >> 64) as u64) + carry as u64);
    buf.set_mid64(mid);
    if carry {
        buf.set_high64(buf.high64() + 1);
    }
}

// Caller must ensure buf >= value.
fn sub_u128(buf: &mut Buf24, value: u128) {
    let (low, borrow) = buf.low64().overflowing_sub(value as u64);
    buf.set_low64(low);
    let (mid, borrow) = buf.mid64().overflowing_sub(((value >> 64) as u64) + borrow as u64);
    buf.set_mid64(mid);
    if borrow {
        buf.set_high64(buf.high64() - 1);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::decimal::Decimal;

    fn add(a: Decimal, b: Decimal) -> Decimal {
        match add_impl(&a, &b) {
            CalculationResult::Ok(result) => result,
            _ => panic!("unexpected overflow"),
        }
    }

    #[test]
    fn aligned_exact_sum() {
        let a = Decimal::new(1, 1); // 0.1
        let b = Decimal::new(2, 1); // 0.2
        assert_eq!(add(a, b), Decimal::new(3, 1));
    }

    #[test]
    fn unaligned_keeps_larger_scale() {
        let a = Decimal::new(11, 1); // 1.1
        let b = Decimal::new(1234, 4); // 0.1234
        let result = add(a, b);
        assert_eq!(result.scale(), 4);
        assert_eq!(result, Decimal::new(12_234, 4));
    }

    #[test]
    fn sign_follows_larger_magnitude() {
        let a = Decimal::new(2, 0);
        let b = Decimal::new(-3, 0);
        assert_eq!(add(a, b), Decimal::new(-1, 0));
    }

    #[test]
    fn max_value_plus_one_overflows() {
        let one = Decimal::ONE;
        assert!(matches!(add_impl(&Decimal::MAX, &one), CalculationResult::Overflow));
    }

    #[test]
    fn carry_past_96_bits_reduces_scale() {
        // MAX has scale 0; a small fraction is rounded away once the scale
        // has been exhausted absorbing the wide intermediate.
        let result = add(Decimal::MAX, Decimal::new(4, 1));
        assert_eq!(result, Decimal::MAX);
        // The exact midpoint rounds to even, which no longer fits.
        assert!(matches!(
            add_impl(&Decimal::MAX, &Decimal::new(5, 1)),
            CalculationResult::Overflow
        ));
    }
}
