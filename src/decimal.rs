use crate::constants::{
    FLAGS_MASK, MAX_I128_REPR, MAX_SCALE, POWERS_10, SCALE_MASK, SCALE_SHIFT, SIGN_MASK,
};
use crate::error::Error;
use crate::ops;
use crate::ops::array::{add_by_u32, div_by_u32};
use crate::ops::common::Buf12;
use crate::str::{
    fmt_scientific_notation, parse_str_radix_10, parse_str_radix_10_exact, parse_str_scientific,
    to_str_internal,
};

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::{Product, Sum};
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign};
use core::str::FromStr;
use num_traits::{FromPrimitive, One, ToPrimitive, Zero};

// 2^64 as a double, used when approximating the significand.
const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

// Exact enough powers of ten for the double conversion windows.
pub(crate) const DOUBLE_POWERS_10: [f64; 29] = [
    1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9, 1e10, 1e11, 1e12, 1e13, 1e14, 1e15, 1e16,
    1e17, 1e18, 1e19, 1e20, 1e21, 1e22, 1e23, 1e24, 1e25, 1e26, 1e27, 1e28,
];

/// The result of a computation, together with the error conditions the
/// arithmetic engines can report.
pub(crate) enum CalculationResult {
    Ok(Decimal),
    Overflow,
    DivByZero,
}

/// The rounding strategies available when the scale of a value is reduced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundingStrategy {
    /// Rounds to the nearest value; an exact midpoint goes to the neighbor
    /// with an even final digit. Also known as "Bankers Rounding".
    MidpointNearestEven,
    /// Rounds to the nearest value; an exact midpoint goes away from zero.
    MidpointAwayFromZero,
    /// Always truncates toward zero.
    ToZero,
    /// Always rounds toward negative infinity.
    ToNegativeInfinity,
    /// Always rounds toward positive infinity.
    ToPositiveInfinity,
}

/// `Decimal` represents a 96 bit fixed-precision decimal number. The finite
/// set of values are of the form m / 10^e, where m is an integer with
/// |m| < 2^96 and e is between 0 and 28 inclusive.
#[derive(Clone, Copy)]
pub struct Decimal {
    // Bits 0-15: unused
    // Bits 16-23: the scale, a value between 0 and 28
    // Bits 24-30: unused
    // Bit 31: the sign; 0 meaning positive and 1 meaning negative.
    flags: u32,
    // The lo, mid and hi fields hold the 96 bit significand.
    hi: u32,
    lo: u32,
    mid: u32,
}

pub(crate) struct UnpackedDecimal {
    pub negative: bool,
    pub scale: u32,
    pub hi: u32,
    pub mid: u32,
    pub lo: u32,
}

impl UnpackedDecimal {
    pub(crate) const fn low64(&self) -> u64 {
        ((self.mid as u64) << 32) | (self.lo as u64)
    }
}

#[allow(dead_code)]
impl Decimal {
    /// The smallest value that can be represented.
    pub const MIN: Decimal = Decimal {
        flags: SIGN_MASK,
        lo: u32::MAX,
        mid: u32::MAX,
        hi: u32::MAX,
    };
    /// The largest value that can be represented: 79_228_162_514_264_337_593_543_950_335.
    pub const MAX: Decimal = Decimal {
        flags: 0,
        lo: u32::MAX,
        mid: u32::MAX,
        hi: u32::MAX,
    };
    /// Zero.
    pub const ZERO: Decimal = Decimal {
        flags: 0,
        lo: 0,
        mid: 0,
        hi: 0,
    };
    /// One.
    pub const ONE: Decimal = Decimal {
        flags: 0,
        lo: 1,
        mid: 0,
        hi: 0,
    };
    /// Negative one.
    pub const NEGATIVE_ONE: Decimal = Decimal {
        flags: SIGN_MASK,
        lo: 1,
        mid: 0,
        hi: 0,
    };
    /// Two.
    pub const TWO: Decimal = Decimal {
        flags: 0,
        lo: 2,
        mid: 0,
        hi: 0,
    };
    /// Ten.
    pub const TEN: Decimal = Decimal {
        flags: 0,
        lo: 10,
        mid: 0,
        hi: 0,
    };
    /// One hundred.
    pub const ONE_HUNDRED: Decimal = Decimal {
        flags: 0,
        lo: 100,
        mid: 0,
        hi: 0,
    };
    /// One thousand.
    pub const ONE_THOUSAND: Decimal = Decimal {
        flags: 0,
        lo: 1000,
        mid: 0,
        hi: 0,
    };

    /// Returns a `Decimal` with a 64 bit `m` representation and corresponding
    /// `e` scale.
    ///
    /// # Panics
    ///
    /// Panics if `scale` is greater than 28.
    ///
    /// # Example
    ///
    /// ```
    /// use dec96::Decimal;
    /// let pi = Decimal::new(3141, 3);
    /// assert_eq!(pi.to_string(), "3.141");
    /// ```
    #[must_use]
    pub fn new(num: i64, scale: u32) -> Decimal {
        match Self::try_new(num, scale) {
            Err(e) => panic!("{}", e),
            Ok(d) => d,
        }
    }

    /// Checked version of `Decimal::new`, erroring instead of panicking on an
    /// out of range scale.
    pub const fn try_new(num: i64, scale: u32) -> Result<Decimal, Error> {
        if scale > MAX_SCALE {
            return Err(Error::ScaleExceedsMaximumPrecision(scale));
        }
        let flags = scale << SCALE_SHIFT;
        if num < 0 {
            let pos = num.unsigned_abs();
            return Ok(Decimal {
                flags: flags | SIGN_MASK,
                hi: 0,
                lo: pos as u32,
                mid: (pos >> 32) as u32,
            });
        }
        Ok(Decimal {
            flags,
            hi: 0,
            lo: num as u32,
            mid: (num as u64 >> 32) as u32,
        })
    }

    /// Creates a `Decimal` from a 128 bit significand and scale.
    ///
    /// # Panics
    ///
    /// Panics if `scale` exceeds 28 or the significand exceeds 96 bits.
    #[must_use]
    pub fn from_i128_with_scale(num: i128, scale: u32) -> Decimal {
        match Self::try_from_i128_with_scale(num, scale) {
            Ok(d) => d,
            Err(e) => panic!("{}", e),
        }
    }

    /// Checked version of `from_i128_with_scale`.
    pub const fn try_from_i128_with_scale(num: i128, scale: u32) -> Result<Decimal, Error> {
        if scale > MAX_SCALE {
            return Err(Error::ScaleExceedsMaximumPrecision(scale));
        }
        if num > MAX_I128_REPR {
            return Err(Error::ExceedsMaximumPossibleValue);
        }
        if num < -MAX_I128_REPR {
            return Err(Error::LessThanMinimumPossibleValue);
        }
        let mut flags = scale << SCALE_SHIFT;
        let num = if num < 0 {
            flags |= SIGN_MASK;
            num.unsigned_abs()
        } else {
            num as u128
        };
        Ok(Decimal {
            flags,
            lo: num as u32,
            mid: (num >> 32) as u32,
            hi: (num >> 64) as u32,
        })
    }

    /// Builds a `Decimal` from its constituent parts.
    #[must_use]
    pub const fn from_parts(lo: u32, mid: u32, hi: u32, negative: bool, scale: u32) -> Decimal {
        debug_assert!(scale <= MAX_SCALE);
        Decimal {
            flags: (scale << SCALE_SHIFT) | if negative { SIGN_MASK } else { 0 },
            hi,
            lo,
            mid,
        }
    }

    pub(crate) const fn lo(&self) -> u32 {
        self.lo
    }

    pub(crate) const fn mid(&self) -> u32 {
        self.mid
    }

    pub(crate) const fn hi(&self) -> u32 {
        self.hi
    }

    pub(crate) const fn low64(&self) -> u64 {
        ((self.mid as u64) << 32) | (self.lo as u64)
    }

    pub(crate) const fn magnitude(&self) -> u128 {
        ((self.hi as u128) << 64) | ((self.mid as u128) << 32) | (self.lo as u128)
    }

    pub(crate) const fn mantissa_array3(&self) -> [u32; 3] {
        [self.lo, self.mid, self.hi]
    }

    pub(crate) fn unpack(&self) -> UnpackedDecimal {
        UnpackedDecimal {
            negative: self.is_sign_negative(),
            scale: self.scale(),
            hi: self.hi,
            mid: self.mid,
            lo: self.lo,
        }
    }

    /// Returns the scale of the decimal number, otherwise known as `e`.
    pub const fn scale(&self) -> u32 {
        (self.flags & SCALE_MASK) >> SCALE_SHIFT
    }

    /// Returns the signed 128 bit significand.
    pub const fn mantissa(&self) -> i128 {
        let raw = self.magnitude() as i128;
        if self.is_sign_negative() {
            -raw
        } else {
            raw
        }
    }

    /// Returns `true` if the decimal is zero at any scale.
    pub const fn is_zero(&self) -> bool {
        self.lo == 0 && self.mid == 0 && self.hi == 0
    }

    /// Returns `true` if the sign bit is set.
    pub const fn is_sign_negative(&self) -> bool {
        self.flags & SIGN_MASK > 0
    }

    /// Returns `true` if the sign bit is clear.
    pub const fn is_sign_positive(&self) -> bool {
        self.flags & SIGN_MASK == 0
    }

    /// Sets the sign to positive.
    pub fn set_sign_positive(&mut self, positive: bool) {
        if positive {
            self.flags &= !SIGN_MASK;
        } else {
            self.flags |= SIGN_MASK;
        }
    }

    /// Sets the sign to negative.
    pub fn set_sign_negative(&mut self, negative: bool) {
        self.set_sign_positive(!negative);
    }

    /// Overwrites the scale without adjusting the significand, effectively
    /// dividing or multiplying the value by a power of ten.
    pub fn set_scale(&mut self, scale: u32) -> Result<(), Error> {
        if scale > MAX_SCALE {
            return Err(Error::ScaleExceedsMaximumPrecision(scale));
        }
        self.flags = (scale << SCALE_SHIFT) | (self.flags & SIGN_MASK);
        Ok(())
    }

    /// Returns a serialized version of the decimal number: the canonical
    /// 4 x 32-bit little-endian layout of lo, mid, hi and flags.
    #[must_use]
    pub const fn serialize(&self) -> [u8; 16] {
        let lo = self.lo.to_le_bytes();
        let mid = self.mid.to_le_bytes();
        let hi = self.hi.to_le_bytes();
        let flags = self.flags.to_le_bytes();
        [
            lo[0], lo[1], lo[2], lo[3], mid[0], mid[1], mid[2], mid[3], hi[0], hi[1], hi[2], hi[3],
            flags[0], flags[1], flags[2], flags[3],
        ]
    }

    /// Deserializes the given bytes, the inverse of [`Decimal::serialize`].
    /// Undefined flag bits are masked off.
    #[must_use]
    pub fn deserialize(bytes: [u8; 16]) -> Decimal {
        let mut flags = u32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]) & FLAGS_MASK;
        if (flags & SCALE_MASK) >> SCALE_SHIFT > MAX_SCALE {
            flags &= !SCALE_MASK;
        }
        Decimal {
            lo: u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            mid: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            hi: u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
            flags,
        }
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Decimal {
        let mut me = *self;
        me.set_sign_positive(true);
        me
    }

    /// Returns the integral part, discarding any fractional digits.
    #[must_use]
    pub fn trunc(&self) -> Decimal {
        self.round_dp_with_strategy(0, RoundingStrategy::ToZero)
    }

    /// Returns the fractional part.
    #[must_use]
    pub fn fract(&self) -> Decimal {
        *self - self.trunc()
    }

    /// Returns the largest integer less than or equal to the value.
    #[must_use]
    pub fn floor(&self) -> Decimal {
        self.round_dp_with_strategy(0, RoundingStrategy::ToNegativeInfinity)
    }

    /// Returns the smallest integer greater than or equal to the value.
    #[must_use]
    pub fn ceil(&self) -> Decimal {
        self.round_dp_with_strategy(0, RoundingStrategy::ToPositiveInfinity)
    }

    /// Strips any trailing zero digits, minimizing the scale.
    #[must_use]
    pub fn normalize(&self) -> Decimal {
        let mut result = *self;
        result.normalize_assign();
        result
    }

    /// In place version of [`Decimal::normalize`].
    pub fn normalize_assign(&mut self) {
        if self.is_zero() {
            self.flags &= SIGN_MASK;
            return;
        }
        let mut working = Buf12::from_decimal(self);
        let scale = ops::strip_trailing_zeros(&mut working, self.scale() as i32);
        *self = Decimal::from_parts(
            working.u0,
            working.u1,
            working.u2,
            self.is_sign_negative(),
            scale as u32,
        );
    }

    /// Rounds to an integer, using bankers rounding for midpoints.
    /// e.g. 6.5 -> 6, 7.5 -> 8
    #[must_use]
    pub fn round(&self) -> Decimal {
        self.round_dp(0)
    }

    /// Rounds to the given number of decimal points, using bankers rounding
    /// for midpoints.
    #[must_use]
    pub fn round_dp(&self, dp: u32) -> Decimal {
        self.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven)
    }

    /// Rounds to the given number of decimal points using the supplied
    /// strategy. Values already at or below the requested scale are returned
    /// unchanged.
    #[must_use]
    pub fn round_dp_with_strategy(&self, dp: u32, strategy: RoundingStrategy) -> Decimal {
        let old_scale = self.scale();
        if dp >= old_scale || self.is_zero() {
            return *self;
        }

        // Drop the excess digits nine at a time, remembering whether anything
        // non-zero fell off before the final chunk.
        let negative = self.is_sign_negative();
        let mut working = self.mantissa_array3();
        let mut diff = old_scale - dp;
        let mut sticky = false;
        let mut remainder = 0u32;
        let mut power = 1u32;
        while diff > 0 {
            let step = diff.min(9);
            sticky = sticky || remainder != 0;
            power = POWERS_10[step as usize];
            remainder = div_by_u32(&mut working, power);
            diff -= step;
        }

        let any_dropped = remainder != 0 || sticky;
        let round_up = match strategy {
            RoundingStrategy::MidpointNearestEven => {
                let half = power / 2;
                remainder > half || (remainder == half && (sticky || working[0] & 1 == 1))
            }
            RoundingStrategy::MidpointAwayFromZero => remainder >= power / 2 && remainder != 0,
            RoundingStrategy::ToZero => false,
            RoundingStrategy::ToNegativeInfinity => negative && any_dropped,
            RoundingStrategy::ToPositiveInfinity => !negative && any_dropped,
        };
        if round_up {
            let carry = add_by_u32(&mut working, 1);
            debug_assert_eq!(carry, 0);
        }
        Decimal::from_parts(working[0], working[1], working[2], negative, dp)
    }

    /// Checked addition: `None` on overflow.
    #[must_use]
    pub fn checked_add(self, other: Decimal) -> Option<Decimal> {
        match ops::add_impl(&self, &other) {
            CalculationResult::Ok(result) => Some(result),
            _ => None,
        }
    }

    /// Checked subtraction: `None` on overflow.
    #[must_use]
    pub fn checked_sub(self, other: Decimal) -> Option<Decimal> {
        match ops::sub_impl(&self, &other) {
            CalculationResult::Ok(result) => Some(result),
            _ => None,
        }
    }

    /// Checked multiplication: `None` on overflow.
    #[must_use]
    pub fn checked_mul(self, other: Decimal) -> Option<Decimal> {
        match ops::mul_impl(&self, &other) {
            CalculationResult::Ok(result) => Some(result),
            _ => None,
        }
    }

    /// Checked division: `None` on overflow or a zero divisor.
    #[must_use]
    pub fn checked_div(self, other: Decimal) -> Option<Decimal> {
        match ops::div_impl(&self, &other) {
            CalculationResult::Ok(result) => Some(result),
            _ => None,
        }
    }

    /// Checked remainder: `None` on a zero divisor.
    #[must_use]
    pub fn checked_rem(self, other: Decimal) -> Option<Decimal> {
        match ops::rem_impl(&self, &other) {
            CalculationResult::Ok(result) => Some(result),
            _ => None,
        }
    }

    /// Parses a value from scientific notation, e.g. `1.2e10`.
    pub fn from_scientific(value: &str) -> Result<Decimal, Error> {
        parse_str_scientific(value)
    }

    /// Parses a string, erroring on any precision loss where `from_str`
    /// would round.
    pub fn from_str_exact(value: &str) -> Result<Decimal, Error> {
        parse_str_radix_10_exact(value)
    }

    /// Converts an `f32` by capturing at most seven significant digits,
    /// returning `None` when the value is out of range or not finite.
    #[must_use]
    pub fn from_f32(value: f32) -> Option<Decimal> {
        from_f32_retain_digits(value)
    }

    /// Converts an `f64` by capturing at most fifteen significant digits,
    /// returning `None` when the value is out of range or not finite.
    #[must_use]
    pub fn from_f64(value: f64) -> Option<Decimal> {
        from_f64_retain_digits(value)
    }
}

// Conversion from a double: pick a power of ten from the binary exponent that
// lands the magnitude in a fifteen significant digit window, round that to an
// integer (ties to even), then minimize the scale.
fn from_f64_retain_digits(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    let raw = value.to_bits();
    let negative = raw >> 63 != 0;
    let biased = ((raw >> 52) & 0x7FF) as i32;
    // The exponent such that |value| = fraction * 2^exponent, 0.5 <= fraction < 1.
    let exponent = biased - 1022;
    if exponent > 96 {
        // Even 0.5 * 2^97 cannot fit in 96 bits.
        return None;
    }
    if biased == 0 || exponent < -94 {
        // Subnormals and anything below 0.5 * 2^-94 round to zero at the
        // maximum scale.
        return Some(Decimal::ZERO);
    }

    let mut dbl = value.abs();
    let mut power = 14 - ((exponent * 19728) >> 16);
    if power >= 0 {
        if power > MAX_SCALE as i32 {
            power = MAX_SCALE as i32;
        }
        dbl *= DOUBLE_POWERS_10[power as usize];
    } else if power != -1 || dbl >= 1e15 {
        dbl /= DOUBLE_POWERS_10[(-power) as usize];
    } else {
        power = 0;
    }
    if dbl >= 1e15 && power > 0 {
        dbl /= 10.0;
        power -= 1;
    }

    let mut mantissa = dbl as u64;
    let fraction = dbl - mantissa as f64;
    if fraction > 0.5 || (fraction == 0.5 && mantissa & 1 != 0) {
        mantissa += 1;
    }
    if mantissa == 0 {
        return Some(Decimal::ZERO);
    }
    build_from_rounded_mantissa(mantissa, power, negative, 14)
}

// The f32 analogue works in a seven significant digit window.
fn from_f32_retain_digits(value: f32) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    let raw = value.to_bits();
    let negative = raw >> 31 != 0;
    let biased = ((raw >> 23) & 0xFF) as i32;
    let exponent = biased - 126;
    if exponent > 96 {
        return None;
    }
    if biased == 0 || exponent < -94 {
        return Some(Decimal::ZERO);
    }

    let mut dbl = (value as f64).abs();
    let mut power = 6 - ((exponent * 19728) >> 16);
    if power >= 0 {
        if power > MAX_SCALE as i32 {
            power = MAX_SCALE as i32;
        }
        dbl *= DOUBLE_POWERS_10[power as usize];
    } else if power != -1 || dbl >= 1e7 {
        dbl /= DOUBLE_POWERS_10[(-power) as usize];
    } else {
        power = 0;
    }
    if dbl >= 1e7 && power > 0 {
        dbl /= 10.0;
        power -= 1;
    }

    let mut mantissa = dbl as u64;
    let fraction = dbl - mantissa as f64;
    if fraction > 0.5 || (fraction == 0.5 && mantissa & 1 != 0) {
        mantissa += 1;
    }
    if mantissa == 0 {
        return Some(Decimal::ZERO);
    }
    build_from_rounded_mantissa(mantissa, power, negative, 6)
}

fn build_from_rounded_mantissa(mantissa: u64, power: i32, negative: bool, max_strip: u32) -> Option<Decimal> {
    if power < 0 {
        // The window sat above the integer range; multiply back up.
        let mut magnitude = mantissa as u128;
        magnitude *= crate::constants::POWERS_10_U128[(-power) as usize];
        if magnitude > MAX_I128_REPR as u128 {
            return None;
        }
        return Some(Decimal::from_parts(
            magnitude as u32,
            (magnitude >> 32) as u32,
            (magnitude >> 64) as u32,
            negative,
            0,
        ));
    }

    // Remove trailing zero digits to minimize the scale. Every power of ten
    // carries a factor of two, so the low bits gate each attempt.
    let mut mantissa = mantissa;
    let mut power = power as u32;
    let mut strip_budget = power.min(max_strip);
    if mantissa & 0xFF == 0 && strip_budget >= 8 && mantissa % 100_000_000 == 0 {
        mantissa /= 100_000_000;
        power -= 8;
        strip_budget -= 8;
    }
    if mantissa & 0xF == 0 && strip_budget >= 4 && mantissa % 10_000 == 0 {
        mantissa /= 10_000;
        power -= 4;
        strip_budget -= 4;
    }
    if mantissa & 0x3 == 0 && strip_budget >= 2 && mantissa % 100 == 0 {
        mantissa /= 100;
        power -= 2;
        strip_budget -= 2;
    }
    if mantissa & 0x1 == 0 && strip_budget >= 1 && mantissa % 10 == 0 {
        mantissa /= 10;
        power -= 1;
    }
    Some(Decimal::from_parts(
        mantissa as u32,
        (mantissa >> 32) as u32,
        0,
        negative,
        power,
    ))
}

impl Default for Decimal {
    fn default() -> Self {
        Decimal::ZERO
    }
}

macro_rules! impl_from {
    ($T:ty, $from_ty:path) => {
        impl From<$T> for Decimal {
            #[inline]
            fn from(t: $T) -> Self {
                $from_ty(t).unwrap()
            }
        }
    };
}

impl_from!(isize, FromPrimitive::from_isize);
impl_from!(i8, FromPrimitive::from_i8);
impl_from!(i16, FromPrimitive::from_i16);
impl_from!(i32, FromPrimitive::from_i32);
impl_from!(i64, FromPrimitive::from_i64);
impl_from!(usize, FromPrimitive::from_usize);
impl_from!(u8, FromPrimitive::from_u8);
impl_from!(u16, FromPrimitive::from_u16);
impl_from!(u32, FromPrimitive::from_u32);
impl_from!(u64, FromPrimitive::from_u64);

impl Zero for Decimal {
    fn zero() -> Decimal {
        Decimal::ZERO
    }

    fn is_zero(&self) -> bool {
        Decimal::is_zero(self)
    }
}

impl One for Decimal {
    fn one() -> Decimal {
        Decimal::ONE
    }
}

impl FromPrimitive for Decimal {
    fn from_i32(n: i32) -> Option<Decimal> {
        Some(Decimal::new(n as i64, 0))
    }

    fn from_i64(n: i64) -> Option<Decimal> {
        Some(Decimal::new(n, 0))
    }

    fn from_i128(n: i128) -> Option<Decimal> {
        Decimal::try_from_i128_with_scale(n, 0).ok()
    }

    fn from_u32(n: u32) -> Option<Decimal> {
        Some(Decimal::from_parts(n, 0, 0, false, 0))
    }

    fn from_u64(n: u64) -> Option<Decimal> {
        Some(Decimal::from_parts(n as u32, (n >> 32) as u32, 0, false, 0))
    }

    fn from_u128(n: u128) -> Option<Decimal> {
        if n > MAX_I128_REPR as u128 {
            return None;
        }
        Some(Decimal::from_parts(
            n as u32,
            (n >> 32) as u32,
            (n >> 64) as u32,
            false,
            0,
        ))
    }

    fn from_f32(n: f32) -> Option<Decimal> {
        Decimal::from_f32(n)
    }

    fn from_f64(n: f64) -> Option<Decimal> {
        Decimal::from_f64(n)
    }
}

impl ToPrimitive for Decimal {
    fn to_i64(&self) -> Option<i64> {
        let truncated = self.trunc();
        let magnitude = truncated.magnitude();
        if self.is_sign_negative() {
            if magnitude > i64::MAX as u128 + 1 {
                return None;
            }
            Some((magnitude as i128).wrapping_neg() as i64)
        } else {
            if magnitude > i64::MAX as u128 {
                return None;
            }
            Some(magnitude as i64)
        }
    }

    fn to_i128(&self) -> Option<i128> {
        Some(self.trunc().mantissa())
    }

    fn to_u64(&self) -> Option<u64> {
        if self.is_sign_negative() && !self.is_zero() {
            return None;
        }
        let truncated = self.trunc();
        if truncated.hi != 0 {
            return None;
        }
        Some(truncated.low64())
    }

    fn to_u128(&self) -> Option<u128> {
        if self.is_sign_negative() && !self.is_zero() {
            return None;
        }
        Some(self.trunc().magnitude())
    }

    // An approximation: the evaluation happens entirely in double arithmetic.
    fn to_f64(&self) -> Option<f64> {
        let value = ((self.hi as f64) * TWO_POW_64 + self.low64() as f64)
            / DOUBLE_POWERS_10[self.scale() as usize];
        if self.is_sign_negative() {
            Some(-value)
        } else {
            Some(value)
        }
    }

    fn to_f32(&self) -> Option<f32> {
        self.to_f64().map(|value| value as f32)
    }
}

impl FromStr for Decimal {
    type Err = Error;

    fn from_str(value: &str) -> Result<Decimal, Self::Err> {
        parse_str_radix_10(value)
    }
}

impl TryFrom<f32> for Decimal {
    type Error = Error;

    fn try_from(value: f32) -> Result<Self, Error> {
        Decimal::from_f32(value).ok_or_else(|| Error::from("Failed to convert to Decimal"))
    }
}

impl TryFrom<f64> for Decimal {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self, Error> {
        Decimal::from_f64(value).ok_or_else(|| Error::from("Failed to convert to Decimal"))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rep, additional) = to_str_internal(self, false, f.precision());
        if let Some(additional) = additional {
            let value = [rep.as_str(), "0".repeat(additional).as_str()].concat();
            f.pad_integral(self.is_sign_positive(), "", value.as_str())
        } else {
            f.pad_integral(self.is_sign_positive(), "", rep.as_str())
        }
    }
}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::LowerExp for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_scientific_notation(self, "e", f)
    }
}

impl fmt::UpperExp for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_scientific_notation(self, "E", f)
    }
}

impl Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        let mut copy = self;
        copy.set_sign_negative(self.is_sign_positive());
        copy
    }
}

impl<'a> Neg for &'a Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Neg::neg(*self)
    }
}

macro_rules! forward_all_binop {
    (impl $imp:ident for Decimal, $method:ident) => {
        impl<'a> $imp<Decimal> for &'a Decimal {
            type Output = Decimal;

            #[inline]
            fn $method(self, other: Decimal) -> Decimal {
                $imp::$method(*self, other)
            }
        }

        impl<'a> $imp<&'a Decimal> for Decimal {
            type Output = Decimal;

            #[inline]
            fn $method(self, other: &Decimal) -> Decimal {
                $imp::$method(self, *other)
            }
        }

        impl<'a, 'b> $imp<&'b Decimal> for &'a Decimal {
            type Output = Decimal;

            #[inline]
            fn $method(self, other: &Decimal) -> Decimal {
                $imp::$method(*self, *other)
            }
        }
    };
}

forward_all_binop!(impl Add for Decimal, add);

impl Add for Decimal {
    type Output = Decimal;

    #[inline]
    fn add(self, other: Decimal) -> Decimal {
        match self.checked_add(other) {
            Some(sum) => sum,
            None => panic!("Addition overflowed"),
        }
    }
}

forward_all_binop!(impl Sub for Decimal, sub);

impl Sub for Decimal {
    type Output = Decimal;

    #[inline]
    fn sub(self, other: Decimal) -> Decimal {
        match self.checked_sub(other) {
            Some(diff) => diff,
            None => panic!("Subtraction overflowed"),
        }
    }
}

forward_all_binop!(impl Mul for Decimal, mul);

impl Mul for Decimal {
    type Output = Decimal;

    #[inline]
    fn mul(self, other: Decimal) -> Decimal {
        match self.checked_mul(other) {
            Some(product) => product,
            None => panic!("Multiplication overflowed"),
        }
    }
}

forward_all_binop!(impl Div for Decimal, div);

impl Div for Decimal {
    type Output = Decimal;

    fn div(self, other: Decimal) -> Decimal {
        match ops::div_impl(&self, &other) {
            CalculationResult::Ok(quot) => quot,
            CalculationResult::Overflow => panic!("Division overflowed"),
            CalculationResult::DivByZero => panic!("Division by zero"),
        }
    }
}

forward_all_binop!(impl Rem for Decimal, rem);

impl Rem for Decimal {
    type Output = Decimal;

    #[inline]
    fn rem(self, other: Decimal) -> Decimal {
        match ops::rem_impl(&self, &other) {
            CalculationResult::Ok(rem) => rem,
            CalculationResult::Overflow => panic!("Remainder overflowed"),
            CalculationResult::DivByZero => panic!("Division by zero"),
        }
    }
}

impl AddAssign for Decimal {
    fn add_assign(&mut self, other: Decimal) {
        *self = *self + other;
    }
}

impl SubAssign for Decimal {
    fn sub_assign(&mut self, other: Decimal) {
        *self = *self - other;
    }
}

impl MulAssign for Decimal {
    fn mul_assign(&mut self, other: Decimal) {
        *self = *self * other;
    }
}

impl DivAssign for Decimal {
    fn div_assign(&mut self, other: Decimal) {
        *self = *self / other;
    }
}

impl RemAssign for Decimal {
    fn rem_assign(&mut self, other: Decimal) {
        *self = *self % other;
    }
}

impl PartialEq for Decimal {
    #[inline]
    fn eq(&self, other: &Decimal) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl Hash for Decimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let n = self.normalize();
        n.lo.hash(state);
        n.mid.hash(state);
        n.hi.hash(state);
        n.flags.hash(state);
    }
}

impl PartialOrd for Decimal {
    #[inline]
    fn partial_cmp(&self, other: &Decimal) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Decimal) -> Ordering {
        ops::cmp_impl(self, other)
    }
}

impl Sum for Decimal {
    fn sum<I: Iterator<Item = Decimal>>(iter: I) -> Self {
        iter.fold(Decimal::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Decimal> for Decimal {
    fn sum<I: Iterator<Item = &'a Decimal>>(iter: I) -> Self {
        iter.fold(Decimal::ZERO, Add::add)
    }
}

impl Product for Decimal {
    fn product<I: Iterator<Item = Decimal>>(iter: I) -> Self {
        iter.fold(Decimal::ONE, Mul::mul)
    }
}

#[cfg(test)]
mod test {
    // Tests on private methods; public behavior is exercised under `tests/`.
    use super::*;

    #[test]
    fn round_dp_with_strategy_modes() {
        let value: Decimal = "2.45".parse().unwrap();
        assert_eq!(
            value
                .round_dp_with_strategy(1, RoundingStrategy::MidpointNearestEven)
                .to_string(),
            "2.4"
        );
        assert_eq!(
            value
                .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
                .to_string(),
            "2.5"
        );
        assert_eq!(
            value.round_dp_with_strategy(1, RoundingStrategy::ToZero).to_string(),
            "2.4"
        );
        let negative: Decimal = "-2.41".parse().unwrap();
        assert_eq!(
            negative
                .round_dp_with_strategy(1, RoundingStrategy::ToNegativeInfinity)
                .to_string(),
            "-2.5"
        );
        assert_eq!(
            negative
                .round_dp_with_strategy(1, RoundingStrategy::ToPositiveInfinity)
                .to_string(),
            "-2.4"
        );
    }

    #[test]
    fn round_midpoint_even_considers_sticky_digits() {
        // 2.4500000001 is over the midpoint even though the first dropped
        // digit is a five.
        let value: Decimal = "2.4500000001".parse().unwrap();
        assert_eq!(
            value
                .round_dp_with_strategy(1, RoundingStrategy::MidpointNearestEven)
                .to_string(),
            "2.5"
        );
    }

    #[test]
    fn from_f64_keeps_fifteen_digits() {
        let value = Decimal::from_f64(0.1).unwrap();
        assert_eq!(value.to_string(), "0.1");
        let value = Decimal::from_f64(1.0 / 3.0).unwrap();
        assert_eq!(value.to_string(), "0.333333333333333");
    }

    #[test]
    fn from_f64_edges() {
        assert!(Decimal::from_f64(f64::NAN).is_none());
        assert!(Decimal::from_f64(f64::INFINITY).is_none());
        assert!(Decimal::from_f64(1e30).is_none());
        assert_eq!(Decimal::from_f64(1e-30).unwrap(), Decimal::ZERO);
        assert_eq!(Decimal::from_f64(5e-324).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn from_f32_keeps_seven_digits() {
        let value = Decimal::from_f32(0.1f32).unwrap();
        assert_eq!(value.to_string(), "0.1");
        let value = Decimal::from_f32(3.14159265f32).unwrap();
        assert_eq!(value.to_string(), "3.141593");
    }

    #[test]
    fn serialize_deserialize_round_trip() {
        let value: Decimal = "-12.3456789".parse().unwrap();
        let bytes = value.serialize();
        assert_eq!(Decimal::deserialize(bytes), value);
        // lo word leads in the canonical layout.
        assert_eq!(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]), 123456789);
    }

    #[test]
    fn normalize_strips_trailing_zeros() {
        let value: Decimal = "1.2300000".parse().unwrap();
        assert_eq!(value.scale(), 7);
        let normalized = value.normalize();
        assert_eq!(normalized.scale(), 2);
        assert_eq!(normalized.to_string(), "1.23");
    }

    #[test]
    fn hash_is_scale_invariant() {
        use std::collections::hash_map::DefaultHasher;
        let hash = |d: &Decimal| {
            let mut hasher = DefaultHasher::new();
            d.hash(&mut hasher);
            hasher.finish()
        };
        let a: Decimal = "1.2300".parse().unwrap();
        let b: Decimal = "1.23".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(hash(&a), hash(&b));
    }
}
