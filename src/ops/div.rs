use crate::constants::{MAX_SCALE_I32, POWERS_10};
use crate::decimal::{CalculationResult, Decimal};
use crate::ops::common::{Buf12, Buf16};

use core::ops::BitXor;

// The largest 96 bit values that survive a multiplication by 10^(index + 1)
// without overflowing 96 bits.
static POWER_OVERFLOW_VALUES: [Buf12; 8] = [
    Buf12 {
        u2: 429496729,
        u1: 2576980377,
        u0: 2576980377,
    },
    Buf12 {
        u2: 42949672,
        u1: 4123168604,
        u0: 687194767,
    },
    Buf12 {
        u2: 4294967,
        u1: 1271310319,
        u0: 2645699854,
    },
    Buf12 {
        u2: 429496,
        u1: 3133608139,
        u0: 694066715,
    },
    Buf12 {
        u2: 42949,
        u1: 2890341191,
        u0: 2216890319,
    },
    Buf12 {
        u2: 4294,
        u1: 4154504685,
        u0: 2369172679,
    },
    Buf12 {
        u2: 429,
        u1: 2133437386,
        u0: 4102387834,
    },
    Buf12 {
        u2: 42,
        u1: 4078814305,
        u0: 410238783,
    },
];

enum DivError {
    Overflow,
}

impl Buf12 {
    // Add a 32 bit quotient chunk into the value, erroring when the carry
    // escapes 96 bits.
    fn add32(&mut self, value: u32) -> Result<(), DivError> {
        let value = value as u64;
        let new = self.low64().wrapping_add(value);
        self.set_low64(new);
        if new < value {
            self.u2 = self.u2.wrapping_add(1);
            if self.u2 == 0 {
                return Err(DivError::Overflow);
            }
        }
        Ok(())
    }

    // Divide in place by a 32 bit divisor, returning the 32 bit remainder.
    fn div32(&mut self, divisor: u32) -> u32 {
        let divisor64 = divisor as u64;
        if self.u2 == 0 {
            let low64 = self.low64();
            if low64 == 0 {
                return 0;
            }
            let quotient = low64 / divisor64;
            self.set_low64(quotient);
            (low64 - quotient * divisor64) as u32
        } else {
            let high64 = self.high64();
            let quotient64 = high64 / divisor64;
            self.set_high64(quotient64);
            let temp = ((high64 - quotient64 * divisor64) << 32) | (self.u0 as u64);
            let quotient32 = (temp / divisor64) as u32;
            self.u0 = quotient32;
            (temp as u32).wrapping_sub(quotient32.wrapping_mul(divisor))
        }
    }

    // Divide by a small power of ten, but only when the division is exact.
    // Returns false (leaving the value untouched) otherwise.
    fn div32_exact(&mut self, pow: u32) -> bool {
        let pow64 = pow as u64;
        let high64 = self.high64();
        let lo = self.u0 as u64;
        let div64: u64 = high64 / pow64;
        let div = ((((high64 - div64 * pow64) << 32) + lo) / pow64) as u32;
        if self.u0 == div.wrapping_mul(pow) {
            self.set_high64(div64);
            self.u0 = div;
            true
        } else {
            false
        }
    }
}

impl Buf16 {
    // Partial divide with a 64 bit divisor that genuinely requires 64 bits.
    // The upper 64 bits of self must be less than the divisor. Returns the 32
    // bit quotient and overwrites self with the remainder.
    fn partial_divide_64(&mut self, divisor: u64) -> u32 {
        debug_assert!(divisor > self.mid64());

        // With an empty third word the divisor must exceed the dividend,
        // because the divisor requires all 64 bits.
        if self.u2 == 0 {
            let low64 = self.low64();
            if low64 < divisor {
                return 0;
            }
            let quotient = low64 / divisor;
            self.set_low64(low64 - (quotient * divisor));
            return quotient as u32;
        }

        let divisor_hi32 = (divisor >> 32) as u32;
        if self.u2 >= divisor_hi32 {
            // The quotient is at most u32::MAX. Start from that assumption
            // and add the divisor back while the remainder is negative.
            let mut low64 = self.low64();
            low64 = low64.wrapping_sub(divisor << 32).wrapping_add(divisor);
            let mut quotient = u32::MAX;
            loop {
                if low64 < divisor {
                    break;
                }
                quotient -= 1;
                low64 = low64.wrapping_add(divisor);
            }
            self.set_low64(low64);
            return quotient;
        }

        let mid64 = self.mid64();
        let divisor_hi32_64 = divisor_hi32 as u64;
        if mid64 < divisor_hi32_64 {
            return 0;
        }

        // Estimate the quotient from the high words, then correct downward
        // while the remainder is negative.
        let mut quotient = mid64 / divisor_hi32_64;
        let mut remainder = self.u0 as u64 | ((mid64 - quotient * divisor_hi32_64) << 32);
        let product = quotient.wrapping_mul(divisor & 0xFFFF_FFFF);
        remainder = remainder.wrapping_sub(product);
        if remainder > product.bitxor(u64::MAX) {
            loop {
                quotient = quotient.wrapping_sub(1);
                remainder = remainder.wrapping_add(divisor);
                if remainder < divisor {
                    break;
                }
            }
        }

        self.set_low64(remainder);
        quotient as u32
    }

    // Partial divide with a 96 bit divisor that genuinely requires 96 bits.
    // Returns the 32 bit quotient and overwrites self with the remainder.
    fn partial_divide_96(&mut self, divisor: &Buf12) -> u32 {
        let dividend = self.high64();
        let divisor_hi = divisor.u2;
        if dividend < divisor_hi as u64 {
            return 0;
        }

        let mut quo = (dividend / divisor_hi as u64) as u32;
        let mut remainder = (dividend as u32).wrapping_sub(quo.wrapping_mul(divisor_hi));

        // Compute the full remainder to validate the estimate.
        let mut prod1 = quo as u64 * divisor.u0 as u64;
        let mut prod2 = quo as u64 * divisor.u1 as u64;
        prod2 += prod1 >> 32;
        prod1 = (prod1 & 0xFFFF_FFFF) | (prod2 << 32);
        prod2 >>= 32;

        let mut num = self.low64();
        num = num.wrapping_sub(prod1);
        remainder = remainder.wrapping_sub(prod2 as u32);

        if num > prod1.bitxor(u64::MAX) {
            remainder = remainder.wrapping_sub(1);
            if remainder < (prod2 as u32).bitxor(u32::MAX) {
                self.set_low64(num);
                self.u2 = remainder;
                return quo;
            }
        } else if remainder <= (prod2 as u32).bitxor(u32::MAX) {
            self.set_low64(num);
            self.u2 = remainder;
            return quo;
        }

        // Remainder went negative; add the divisor back until it is not.
        prod1 = divisor.low64();
        loop {
            quo = quo.wrapping_sub(1);
            num = num.wrapping_add(prod1);
            remainder = remainder.wrapping_add(divisor_hi);

            if num < prod1 {
                // Carry into the high word.
                let tmp = remainder;
                remainder = remainder.wrapping_add(1);
                if tmp < divisor_hi {
                    break;
                }
            }
            if remainder < divisor_hi {
                break;
            }
        }

        self.set_low64(num);
        self.u2 = remainder;
        quo
    }
}

pub(crate) fn div_impl(dividend: &Decimal, divisor: &Decimal) -> CalculationResult {
    if divisor.is_zero() {
        return CalculationResult::DivByZero;
    }
    if dividend.is_zero() {
        return CalculationResult::Ok(Decimal::ZERO);
    }

    let mut scale = (dividend.scale() as i32) - (divisor.scale() as i32);
    let sign_negative = dividend.is_sign_negative() ^ divisor.is_sign_negative();
    let mut require_unscale = false;
    let mut quotient = Buf12::from_decimal(dividend);
    let divisor = Buf12::from_decimal(divisor);

    if divisor.u2 | divisor.u1 == 0 {
        // 32 bit divisor.
        let divisor32 = divisor.u0;
        let mut remainder = quotient.div32(divisor32);
        let mut power_scale = 0;

        loop {
            if remainder == 0 {
                // An exact quotient. We may still need to pad the scale back
                // up to zero for dividends like 1e-10 / 1e10.
                if scale >= 0 {
                    break;
                }
                power_scale = 9usize.min((-scale) as usize);
            } else {
                // A remainder survives, so greedily scale the quotient up to
                // retain as many fractional digits as fit into 96 bits.
                require_unscale = true;
                let will_overflow = if scale == MAX_SCALE_I32 {
                    true
                } else {
                    match search_scale(&quotient, scale) {
                        Ok(s) => power_scale = s,
                        Err(_) => return CalculationResult::Overflow,
                    }
                    power_scale == 0
                };
                if will_overflow {
                    // No more room: round the last digit against the true
                    // remainder, ties to even on the low bit.
                    let tmp = remainder << 1;
                    let round = if tmp < remainder {
                        true
                    } else if tmp >= divisor32 {
                        tmp > divisor32 || (quotient.u0 & 0x1) > 0
                    } else {
                        false
                    };
                    if round {
                        match round_up(&mut quotient, scale) {
                            Ok(new_scale) => scale = new_scale,
                            Err(_) => return CalculationResult::Overflow,
                        }
                    }
                    break;
                }
            }

            let power = POWERS_10[power_scale];
            scale += power_scale as i32;
            if scale_up(&mut quotient, power as u64) > 0 {
                return CalculationResult::Overflow;
            }

            let remainder_scaled = (remainder as u64) * (power as u64);
            let remainder_quotient = (remainder_scaled / (divisor32 as u64)) as u32;
            remainder = (remainder_scaled - remainder_quotient as u64 * divisor32 as u64) as u32;
            if quotient.add32(remainder_quotient).is_err() {
                match overflow_unscale(&mut quotient, scale, remainder != 0) {
                    Ok(adjusted) => scale = adjusted,
                    Err(_) => return CalculationResult::Overflow,
                }
                break;
            }
        }
    } else {
        // The divisor needs more than 32 bits. Shift both operands left so
        // the divisor's leading bit is set, which keeps the per-chunk
        // quotient estimates accurate without changing the quotient.
        let mut power_scale = if divisor.u2 == 0 {
            divisor.u1.leading_zeros()
        } else {
            divisor.u2.leading_zeros()
        } as usize;
        let mut remainder = Buf16::zero();
        remainder.set_low64(quotient.low64() << power_scale);
        let tmp_high = ((quotient.u1 as u64) + ((quotient.u2 as u64) << 32)) >> (32 - power_scale);
        remainder.set_high64(tmp_high);

        let divisor64 = divisor.low64() << power_scale;
        if divisor.u2 == 0 {
            // 64 bit divisor.
            quotient.u2 = 0;

            let rem_lo = remainder.u0;
            remainder.u0 = remainder.u1;
            remainder.u1 = remainder.u2;
            remainder.u2 = remainder.u3;
            quotient.u1 = remainder.partial_divide_64(divisor64);

            remainder.u2 = remainder.u1;
            remainder.u1 = remainder.u0;
            remainder.u0 = rem_lo;
            quotient.u0 = remainder.partial_divide_64(divisor64);

            loop {
                let rem_low64 = remainder.low64();
                if rem_low64 == 0 {
                    if scale >= 0 {
                        break;
                    }
                    power_scale = 9usize.min((-scale) as usize);
                } else {
                    require_unscale = true;
                    let will_overflow = if scale == MAX_SCALE_I32 {
                        true
                    } else {
                        match search_scale(&quotient, scale) {
                            Ok(s) => power_scale = s,
                            Err(_) => return CalculationResult::Overflow,
                        }
                        power_scale == 0
                    };
                    if will_overflow {
                        let mut tmp = remainder.low64();
                        let round = if (tmp as i64) < 0 {
                            true
                        } else {
                            tmp <<= 1;
                            if tmp > divisor64 {
                                true
                            } else {
                                tmp == divisor64 && quotient.u0 & 0x1 != 0
                            }
                        };
                        if round {
                            match round_up(&mut quotient, scale) {
                                Ok(new_scale) => scale = new_scale,
                                Err(_) => return CalculationResult::Overflow,
                            }
                        }
                        break;
                    }
                }

                let power = POWERS_10[power_scale];
                scale += power_scale as i32;
                if scale_up(&mut quotient, power as u64) > 0 {
                    return CalculationResult::Overflow;
                }
                scale_up_low64(&mut remainder, power as u64);

                let tmp = remainder.partial_divide_64(divisor64);
                if quotient.add32(tmp).is_err() {
                    match overflow_unscale(&mut quotient, scale, remainder.low64() != 0) {
                        Ok(adjusted) => scale = adjusted,
                        Err(_) => return CalculationResult::Overflow,
                    }
                    break;
                }
            }
        } else {
            // 96 bit divisor. Finish shifting the divisor's high word in.
            let divisor_mid = divisor.u1;
            let divisor_hi = divisor.u2;
            let mut divisor = divisor;
            divisor.set_low64(divisor64);
            divisor.u2 = ((divisor_mid as u64 + ((divisor_hi as u64) << 32)) >> (32 - power_scale)) as u32;

            let quo = remainder.partial_divide_96(&divisor);
            quotient.set_low64(quo as u64);
            quotient.u2 = 0;

            loop {
                let mut rem_low64 = remainder.low64();
                if rem_low64 == 0 && remainder.u2 == 0 {
                    if scale >= 0 {
                        break;
                    }
                    power_scale = 9usize.min((-scale) as usize);
                } else {
                    require_unscale = true;
                    let will_overflow = if scale == MAX_SCALE_I32 {
                        true
                    } else {
                        match search_scale(&quotient, scale) {
                            Ok(s) => power_scale = s,
                            Err(_) => return CalculationResult::Overflow,
                        }
                        power_scale == 0
                    };
                    if will_overflow {
                        let round = if (remainder.u2 as i32) < 0 {
                            true
                        } else {
                            let tmp = remainder.u1 >> 31;
                            rem_low64 <<= 1;
                            remainder.set_low64(rem_low64);
                            remainder.u2 = (remainder.u2 << 1) + tmp;
                            if remainder.u2 > divisor.u2 {
                                true
                            } else if remainder.u2 == divisor.u2 {
                                let divisor_low64 = divisor.low64();
                                if rem_low64 > divisor_low64 {
                                    true
                                } else {
                                    rem_low64 == divisor_low64 && (quotient.u0 & 1) != 0
                                }
                            } else {
                                false
                            }
                        };
                        if round {
                            match round_up(&mut quotient, scale) {
                                Ok(new_scale) => scale = new_scale,
                                Err(_) => return CalculationResult::Overflow,
                            }
                        }
                        break;
                    }
                }

                let power = POWERS_10[power_scale];
                scale += power_scale as i32;
                if scale_up(&mut quotient, power as u64) > 0 {
                    return CalculationResult::Overflow;
                }
                let mut tmp_remainder = remainder.into_buf12();
                let overflow = scale_up(&mut tmp_remainder, power as u64);
                remainder.u0 = tmp_remainder.u0;
                remainder.u1 = tmp_remainder.u1;
                remainder.u2 = tmp_remainder.u2;
                remainder.u3 = overflow;

                let tmp = remainder.partial_divide_96(&divisor);
                if quotient.add32(tmp).is_err() {
                    let sticky = (remainder.low64() | remainder.high64()) != 0;
                    match overflow_unscale(&mut quotient, scale, sticky) {
                        Ok(adjusted) => scale = adjusted,
                        Err(_) => return CalculationResult::Overflow,
                    }
                    break;
                }
            }
        }
    }

    if require_unscale {
        scale = strip_trailing_zeros(&mut quotient, scale);
    }
    CalculationResult::Ok(Decimal::from_parts(
        quotient.u0,
        quotient.u1,
        quotient.u2,
        sign_negative,
        scale as u32,
    ))
}

// Multiply num by a power of ten of at most 10^9, returning the overflow.
pub(in crate::ops) fn scale_up(num: &mut Buf12, power: u64) -> u32 {
    let mut tmp = (num.u0 as u64) * power;
    num.u0 = tmp as u32;
    tmp >>= 32;
    tmp += (num.u1 as u64) * power;
    num.u1 = tmp as u32;
    tmp >>= 32;
    tmp += (num.u2 as u64) * power;
    num.u2 = tmp as u32;
    (tmp >> 32) as u32
}

// Multiply the low 64 bits of the remainder buffer by a power of ten.
fn scale_up_low64(num: &mut Buf16, power: u64) {
    let mut tmp = (num.u0 as u64) * power;
    num.u0 = tmp as u32;
    tmp >>= 32;
    tmp += (num.u1 as u64) * power;
    num.set_mid64(tmp)
}

// Reverse an overflow that occurred when adding a quotient chunk: divide by
// ten, feed the lost high bit back in, and round the shifted out digit.
fn overflow_unscale(num: &mut Buf12, scale: i32, sticky: bool) -> Result<i32, DivError> {
    let scale = scale - 1;
    if scale < 0 {
        return Err(DivError::Overflow);
    }

    // The high word wrapped to zero, so the true value is 2^96 plus whatever
    // the buffer holds. Divide that quantity by ten a word at a time.
    const HIGH_BIT: u64 = 0x1_0000_0000;
    num.u2 = (HIGH_BIT / 10) as u32;

    let mut tmp = ((HIGH_BIT % 10) << 32) + (num.u1 as u64);
    let mut val = (tmp / 10) as u32;
    num.u1 = val;

    tmp = ((tmp - (val as u64) * 10) << 32) + (num.u0 as u64);
    val = (tmp / 10) as u32;
    num.u0 = val;

    let remainder = (tmp - (val as u64) * 10) as u32;
    if remainder > 5 || (remainder == 5 && (sticky || num.u0 & 0x1 > 0)) {
        let _ = num.add32(1);
    }
    Ok(scale)
}

// Determine the largest x in 0..=9 such that the quotient scaled by 10^x
// still fits in 96 bits. The scale is never allowed to end up negative.
fn search_scale(num: &Buf12, scale: i32) -> Result<usize, DivError> {
    const OVERFLOW_MAX_9_HI: u32 = 4;
    const OVERFLOW_MAX_5_HI: u32 = 42949;
    const OVERFLOW_MAX_1_HI: u32 = 429496729;
    const OVERFLOW_MAX_9_LOW64: u64 = 5441186219426131129;

    let hi = num.u2;
    let low64 = num.low64();
    let mut x = 0usize;

    // Quick exit when no scaling at all is possible.
    if hi > OVERFLOW_MAX_1_HI {
        if scale < 0 {
            return Err(DivError::Overflow);
        }
        return Ok(x);
    }

    if scale > MAX_SCALE_I32 - 9 {
        // Can't go the full 10^9 without passing the max scale; try the most
        // that is allowed and check it fits.
        x = (MAX_SCALE_I32 - scale) as usize;
        if hi < POWER_OVERFLOW_VALUES[x - 1].u2 {
            if x as i32 + scale < 0 {
                return Err(DivError::Overflow);
            }
            return Ok(x);
        }
    } else if hi < OVERFLOW_MAX_9_HI || hi == OVERFLOW_MAX_9_HI && low64 <= OVERFLOW_MAX_9_LOW64 {
        return Ok(9);
    }

    // Binary search the overflow table for a power below 9.
    x = if hi > OVERFLOW_MAX_5_HI {
        if hi > POWER_OVERFLOW_VALUES[2].u2 {
            if hi > POWER_OVERFLOW_VALUES[1].u2 {
                1
            } else {
                2
            }
        } else if hi > POWER_OVERFLOW_VALUES[3].u2 {
            3
        } else {
            4
        }
    } else if hi > POWER_OVERFLOW_VALUES[6].u2 {
        if hi > POWER_OVERFLOW_VALUES[5].u2 {
            5
        } else {
            6
        }
    } else if hi > POWER_OVERFLOW_VALUES[7].u2 {
        7
    } else {
        8
    };

    // The table entry is a maximum, so an equal high word needs the low
    // words checked too.
    if hi == POWER_OVERFLOW_VALUES[x - 1].u2 && low64 > POWER_OVERFLOW_VALUES[x - 1].low64() {
        x -= 1;
    }

    if x as i32 + scale < 0 {
        Err(DivError::Overflow)
    } else {
        Ok(x)
    }
}

#[inline]
fn round_up(num: &mut Buf12, scale: i32) -> Result<i32, DivError> {
    let low64 = num.low64().wrapping_add(1);
    num.set_low64(low64);
    if low64 != 0 {
        return Ok(scale);
    }
    let hi = num.u2.wrapping_add(1);
    num.u2 = hi;
    if hi != 0 {
        return Ok(scale);
    }
    overflow_unscale(num, scale, true)
}

// Remove trailing zero digits that the greedy scaling manufactured. Every
// power of ten carries a factor of two, so the low bits gate each attempt.
pub(crate) fn strip_trailing_zeros(num: &mut Buf12, scale: i32) -> i32 {
    let mut scale = scale;
    while num.u0 == 0 && scale >= 8 && num.div32_exact(100000000) {
        scale -= 8;
    }

    if (num.u0 & 0xF) == 0 && scale >= 4 && num.div32_exact(10000) {
        scale -= 4;
    }

    if (num.u0 & 0x3) == 0 && scale >= 2 && num.div32_exact(100) {
        scale -= 2;
    }

    if (num.u0 & 0x1) == 0 && scale >= 1 && num.div32_exact(10) {
        scale -= 1;
    }
    scale
}

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;

    fn div(a: &str, b: &str) -> Decimal {
        let a = Decimal::from_str(a).unwrap();
        let b = Decimal::from_str(b).unwrap();
        match div_impl(&a, &b) {
            CalculationResult::Ok(result) => result,
            CalculationResult::Overflow => panic!("overflow"),
            CalculationResult::DivByZero => panic!("div by zero"),
        }
    }

    #[test]
    fn one_third_fills_the_scale() {
        assert_eq!(div("1", "3").to_string(), "0.3333333333333333333333333333");
    }

    #[test]
    fn two_thirds_rounds_up() {
        assert_eq!(div("2", "3").to_string(), "0.6666666666666666666666666667");
    }

    #[test]
    fn exact_division_strips_nothing_extra() {
        assert_eq!(div("10", "2").to_string(), "5");
        assert_eq!(div("2.5", "5").to_string(), "0.5");
    }

    #[test]
    fn negative_scale_pads_back_to_integer() {
        assert_eq!(div("1000", "0.1").to_string(), "10000");
    }

    #[test]
    fn wide_divisor_paths() {
        // 64 bit divisor
        assert_eq!(div("100000000000", "10000000000").to_string(), "10");
        // 96 bit divisor
        assert_eq!(
            div("79228162514264337593543950335", "79228162514264337593543950335").to_string(),
            "1"
        );
    }

    #[test]
    fn division_by_zero_reported() {
        let one = Decimal::ONE;
        let zero = Decimal::ZERO;
        assert!(matches!(div_impl(&one, &zero), CalculationResult::DivByZero));
    }

    #[test]
    fn overflowing_quotient_reported() {
        let max = Decimal::MAX;
        let tiny = Decimal::from_str("0.1").unwrap();
        assert!(matches!(div_impl(&max, &tiny), CalculationResult::Overflow));
    }
}
