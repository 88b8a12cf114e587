//! Dragon-style exact digit generation. The value and its rounding interval
//! are carried as exact ratios of big integers scaled by powers of two and
//! ten; no floating point approximation appears anywhere. This path is always
//! correct and serves as the fallback whenever the fast generator cannot
//! verify its digits, and as the primary path for full-precision output.

use crate::bigint::BigNum;
use crate::fltdec::{round_up_digits, Decoded};

use core::cmp::Ordering;

// floor(log10(2) * 2^32)
const LOG10_2_FRACT: i64 = 1_292_913_986;

// Estimates k such that 10^(k-1) < mant * 2^exp <= 10^(k+1). The estimate
// never lands below the true decimal exponent, only at most one above it,
// which the callers repair with a single comparison.
fn estimate_scaling_factor(mant: u64, exp: i32) -> i32 {
    // 2^(v-1) <= mant * 2^exp < 2^v
    let v = exp as i64 + (64 - mant.leading_zeros() as i64);
    ((v * LOG10_2_FRACT) >> 32) as i32
}

fn ge(lhs: &BigNum, rhs: &BigNum, inclusive: bool) -> bool {
    match lhs.compare(rhs) {
        Ordering::Greater => true,
        Ordering::Equal => inclusive,
        Ordering::Less => false,
    }
}

fn le(lhs: &BigNum, rhs: &BigNum, inclusive: bool) -> bool {
    match lhs.compare(rhs) {
        Ordering::Less => true,
        Ordering::Equal => inclusive,
        Ordering::Greater => false,
    }
}

/// Produces the shortest digit sequence that uniquely identifies the value
/// within its rounding boundaries. Returns the digit count and the decimal
/// exponent `k` such that the value is `0.digits * 10^k`.
pub(crate) fn format_shortest(d: &Decoded, buf: &mut [u8]) -> (usize, i32) {
    assert!(d.mant > 0);
    assert!(d.minus > 0);
    assert!(d.plus > 0);
    assert!(buf.len() >= 17);

    let mut k = estimate_scaling_factor(d.mant + d.plus, d.exp);

    // v = mant / scale, low = (mant - minus) / scale, high = (mant + plus) / scale
    let mut mant = BigNum::from_u64(d.mant);
    let mut minus = BigNum::from_u64(d.minus);
    let mut plus = BigNum::from_u64(d.plus);
    let mut scale = BigNum::one();
    if d.exp < 0 {
        scale.shl((-d.exp) as u64);
    } else {
        mant.shl(d.exp as u64);
        minus.shl(d.exp as u64);
        plus.shl(d.exp as u64);
    }
    if k >= 0 {
        scale.mul_pow10(k as u32);
    } else {
        mant.mul_pow10((-k) as u32);
        minus.mul_pow10((-k) as u32);
        plus.mul_pow10((-k) as u32);
    }

    // Repair the estimate when it came in one low: high >= 10^k. Otherwise
    // shift one digit up front so the first quotient digit is significant.
    let mut high = mant.clone();
    high.add(&plus);
    if ge(&high, &scale, d.inclusive) {
        k += 1;
    } else {
        mant.mul_small(10);
        minus.mul_small(10);
        plus.mul_small(10);
    }

    let mut i = 0;
    loop {
        let digit = mant.div_rem_digit(&scale);
        debug_assert!(i < buf.len());
        buf[i] = b'0' + digit as u8;
        i += 1;

        // Generation stops as soon as the boundary interval can no longer
        // contain a second decimal value sharing the digits so far: the
        // remainder either dips inside the lower margin or, together with the
        // upper margin, reaches past the scale. The asymmetric margin of a
        // power-of-two significand arrives here as a larger `plus`.
        let down = le(&mant, &minus, d.inclusive);
        let up = {
            let mut sum = mant.clone();
            sum.add(&plus);
            ge(&sum, &scale, d.inclusive)
        };
        if down || up {
            let round_up = if up && !down {
                true
            } else if down && !up {
                false
            } else {
                // Within both margins: pick the nearest output, comparing the
                // remainder doubled against the scale; an exact midpoint goes
                // to the even digit.
                let mut doubled = mant.clone();
                doubled.mul_small(2);
                match doubled.compare(&scale) {
                    Ordering::Greater => true,
                    Ordering::Less => false,
                    Ordering::Equal => (buf[i - 1] - b'0') & 1 == 1,
                }
            };
            if round_up && round_up_digits(&mut buf[..i]).is_some() {
                // All nines carried over; the shortest form is one digit.
                buf[0] = b'1';
                i = 1;
                k += 1;
            }
            return (i, k);
        }

        mant.mul_small(10);
        minus.mul_small(10);
        plus.mul_small(10);
    }
}

/// Produces digits up to `buf.len()` significant digits, or up to the decimal
/// position `limit` (the exponent of the last digit wanted), whichever cuts
/// first. The final digit is rounded against the exact remainder, ties to
/// even. Returns the digit count and the decimal exponent.
pub(crate) fn format_exact(d: &Decoded, buf: &mut [u8], limit: i32) -> (usize, i32) {
    assert!(d.mant > 0);
    assert!(!buf.is_empty());

    let mut k = estimate_scaling_factor(d.mant, d.exp);

    let mut mant = BigNum::from_u64(d.mant);
    let mut scale = BigNum::one();
    if d.exp < 0 {
        scale.shl((-d.exp) as u64);
    } else {
        mant.shl(d.exp as u64);
    }
    if k >= 0 {
        scale.mul_pow10(k as u32);
    } else {
        mant.mul_pow10((-k) as u32);
    }

    if mant.compare(&scale) != Ordering::Less {
        k += 1;
    } else {
        mant.mul_small(10);
    }
    // From here 1 <= mant / scale < 10, i.e. the next quotient digit is the
    // leading digit at position 10^(k-1).

    if k < limit {
        // Every digit lies below the cutoff; the output is zero.
        return (0, k);
    }
    if k == limit {
        // The rounding position sits just above the leading digit, so the
        // output is either zero or a single carried one. The carry needs the
        // value to exceed half of 10^k; an exact half stays at zero, which is
        // the even neighbor.
        let mut doubled = mant.clone();
        doubled.mul_small(2);
        let mut ten_scale = scale.clone();
        ten_scale.mul_small(10);
        return if doubled.compare(&ten_scale) == Ordering::Greater {
            buf[0] = b'1';
            (1, k + 1)
        } else {
            (0, k)
        };
    }
    let len = if ((k as i64 - limit as i64) as usize) < buf.len() {
        (k - limit) as usize
    } else {
        buf.len()
    };

    for digit_slot in buf.iter_mut().take(len) {
        let digit = mant.div_rem_digit(&scale);
        *digit_slot = b'0' + digit as u8;
        mant.mul_small(10);
    }

    // The remaining fraction is mant / (10 * scale) of the final digit
    // position; compare it against the midpoint exactly.
    let mut len = len;
    let mut ten_scale = scale.clone();
    ten_scale.mul_small(5);
    let round_up = match mant.compare(&ten_scale) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => (buf[len - 1] - b'0') & 1 == 1,
    };
    if round_up {
        if let Some(c) = round_up_digits(&mut buf[..len]) {
            k += 1;
            if k > limit && len < buf.len() {
                buf[len] = c;
                len += 1;
            }
        }
    }
    (len, k)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fltdec::{decode, FullDecoded};

    fn decode_finite(value: f64) -> Decoded {
        match decode(value) {
            (false, FullDecoded::Finite(decoded)) => decoded,
            _ => panic!("expected a positive finite value"),
        }
    }

    #[test]
    fn shortest_one_third() {
        let decoded = decode_finite(1.0 / 3.0);
        let mut buf = [0u8; 17];
        let (len, k) = format_shortest(&decoded, &mut buf);
        assert_eq!(&buf[..len], b"3333333333333333");
        assert_eq!(k, 0);
    }

    #[test]
    fn shortest_small_integers() {
        for (value, digits, exp) in [(1.0, "1", 1), (42.0, "42", 2), (0.25, "25", 0)] {
            let decoded = decode_finite(value);
            let mut buf = [0u8; 17];
            let (len, k) = format_shortest(&decoded, &mut buf);
            assert_eq!(core::str::from_utf8(&buf[..len]).unwrap(), digits, "{value}");
            assert_eq!(k, exp, "{value}");
        }
    }

    #[test]
    fn shortest_smallest_subnormal() {
        let decoded = decode_finite(f64::from_bits(1));
        let mut buf = [0u8; 17];
        let (len, k) = format_shortest(&decoded, &mut buf);
        assert_eq!(&buf[..len], b"5");
        assert_eq!(k, -323);
    }

    #[test]
    fn exact_rounds_ties_to_even() {
        // 0.5 exactly, one digit requested before the point.
        let decoded = decode_finite(0.5);
        let mut buf = [0u8; 4];
        let (len, k) = format_exact(&decoded, &mut buf, 0);
        // 0.5 rounds to the even zero.
        assert_eq!(len, 0);
        assert_eq!(k, 0);

        let decoded = decode_finite(1.5);
        let mut buf = [0u8; 4];
        let (len, k) = format_exact(&decoded, &mut buf, 0);
        assert_eq!(&buf[..len], b"2");
        assert_eq!(k, 1);
    }

    #[test]
    fn exact_counted_digits() {
        let decoded = decode_finite(core::f64::consts::PI);
        let mut buf = [0u8; 6];
        let (len, k) = format_exact(&decoded, &mut buf, i32::MIN);
        assert_eq!(&buf[..len], b"314159");
        assert_eq!(k, 1);
    }

    #[test]
    fn exact_carry_extends() {
        let decoded = decode_finite(9.999);
        let mut buf = [0u8; 2];
        let (len, k) = format_exact(&decoded, &mut buf, i32::MIN);
        // 9.999 to two significant digits is 10.
        assert_eq!(&buf[..len], b"10");
        assert_eq!(k, 2);
    }
}
