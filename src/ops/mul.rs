use crate::constants::{MAX_SCALE, OVERFLOW_U96};
use crate::decimal::{CalculationResult, Decimal};
use crate::ops::common::Buf24;

pub(crate) fn mul_impl(d1: &Decimal, d2: &Decimal) -> CalculationResult {
    let d1 = d1.unpack();
    let d2 = d2.unpack();
    let mut scale = d1.scale + d2.scale;
    let negative = d1.negative ^ d2.negative;

    if (d1.lo | d1.mid | d1.hi) == 0 || (d2.lo | d2.mid | d2.hi) == 0 {
        return CalculationResult::Ok(Decimal::from_parts(0, 0, 0, false, scale.min(MAX_SCALE)));
    }

    // When both operands fit into 64 bits the product fits into 128 bits and
    // native arithmetic covers it.
    if d1.hi == 0 && d2.hi == 0 {
        let product = (d1.low64() as u128) * (d2.low64() as u128);
        if scale <= MAX_SCALE && product < OVERFLOW_U96 {
            return CalculationResult::Ok(Decimal::from_parts(
                product as u32,
                (product >> 32) as u32,
                (product >> 64) as u32,
                negative,
                scale,
            ));
        }
        let mut wide = Buf24::zero();
        wide.set_low64(product as u64);
        wide.set_mid64((product >> 64) as u64);
        return finish(wide, negative, scale);
    }

    // Full 96 x 96 product via 32x32->64 partial products with carry
    // propagation. The result occupies at most 192 bits.
    let left = [d1.lo, d1.mid, d1.hi];
    let right = [d2.lo, d2.mid, d2.hi];
    let mut product = [0u32; 6];
    for (i, &l) in left.iter().enumerate() {
        let mut carry = 0u64;
        for (j, &r) in right.iter().enumerate() {
            let temp = (l as u64) * (r as u64) + (product[i + j] as u64) + carry;
            product[i + j] = temp as u32;
            carry = temp >> 32;
        }
        product[i + 3] = carry as u32;
    }

    let wide = Buf24 {
        u0: product[0],
        u1: product[1],
        u2: product[2],
        u3: product[3],
        u4: product[4],
        u5: product[5],
    };
    if scale <= MAX_SCALE && wide.upper_word() <= 2 {
        return CalculationResult::Ok(Decimal::from_parts(wide.u0, wide.u1, wide.u2, negative, scale));
    }
    finish(wide, negative, scale)
}

fn finish(mut wide: Buf24, negative: bool, scale: u32) -> CalculationResult {
    match wide.rescale(scale as i32) {
        Some(scale) => {
            let zero = (wide.u0 | wide.u1 | wide.u2) == 0;
            CalculationResult::Ok(Decimal::from_parts(
                wide.u0,
                wide.u1,
                wide.u2,
                negative && !zero,
                scale as u32,
            ))
        }
        None => CalculationResult::Overflow,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn mul(a: Decimal, b: Decimal) -> Decimal {
        match mul_impl(&a, &b) {
            CalculationResult::Ok(result) => result,
            _ => panic!("unexpected overflow"),
        }
    }

    #[test]
    fn small_product_adds_scales() {
        let result = mul(Decimal::new(125, 2), Decimal::new(4, 1));
        assert_eq!(result, Decimal::new(500, 3));
        assert_eq!(result.scale(), 3);
    }

    #[test]
    fn wide_product_rescales_down() {
        // (2^64) * (2^64) requires truncation into 96 bits via scale.
        let big = Decimal::from_i128_with_scale(1i128 << 64, 14);
        let result = mul(big, big);
        // 2^128 truncated by 10^10, at scale 28 - 10.
        assert_eq!(result.scale(), 18);
        assert_eq!(
            result.mantissa().unsigned_abs(),
            34_028_236_692_093_846_346_337_460_743
        );
    }

    #[test]
    fn scale_overflow_rounds_to_zero_range() {
        // 1e-28 * 1e-28 cannot retain any digits.
        let tiny = Decimal::from_i128_with_scale(1, 28);
        let result = mul(tiny, tiny);
        assert!(result.is_zero());
        assert_eq!(result.scale(), MAX_SCALE);
    }

    #[test]
    fn magnitude_overflow_errors() {
        assert!(matches!(
            mul_impl(&Decimal::MAX, &Decimal::new(2, 0)),
            CalculationResult::Overflow
        ));
    }
}
