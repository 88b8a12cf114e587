//! The shared digit-buffer representation behind the locale-aware formatter
//! and parser, plus digitization from each source type.
//!
//! A `NumberBuffer` holds significant decimal digits most-significant first
//! together with `scale`, the count of digits that sit before the decimal
//! point: `1234.5` is digits `12345` with scale 4, `0.001` is digits `1` with
//! scale -2. Buffers are built fresh for each conversion call and never
//! shared.

pub(crate) mod format;
pub(crate) mod locale;
pub(crate) mod parse;

use crate::constants::DOUBLE_DIGITS;
use crate::fltdec::{self, Decoded, RawFloat};
use crate::ops::array::{div_by_u32, is_all_zero};
use crate::Decimal;

use arrayvec::ArrayVec;

pub use format::{
    format_decimal, format_f32, format_f64, format_half, format_i64, format_u64,
};
pub use locale::NumberFormatInfo;
pub use parse::{
    parse_decimal, parse_f32, parse_f64, parse_half, parse_i32, parse_i64, parse_u32, parse_u64,
    NumberStyles,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NumberKind {
    Integer,
    Decimal,
    FloatingPoint,
}

pub(crate) struct NumberBuffer {
    pub digits: ArrayVec<u8, DOUBLE_DIGITS>,
    /// Count of digits before the decimal point: value = 0.digits * 10^scale.
    pub scale: i32,
    pub negative: bool,
    /// Set when non-zero digits beyond the buffer capacity were dropped.
    pub has_nonzero_tail: bool,
    pub kind: NumberKind,
}

impl NumberBuffer {
    pub fn new(kind: NumberKind) -> NumberBuffer {
        NumberBuffer {
            digits: ArrayVec::new(),
            scale: 0,
            negative: false,
            has_nonzero_tail: false,
            kind,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    /// Rounds the buffer in place so at most `pos` digits remain, rounding
    /// half away from zero against the dropped digits, propagating the carry
    /// through any run of nines and bumping the scale on carry-out past the
    /// most significant digit. Trailing zeros are trimmed afterwards.
    pub fn round(&mut self, pos: i32) {
        if pos >= self.digits.len() as i32 {
            return;
        }
        if pos < 0 {
            self.digits.clear();
            self.scale = 0;
            self.has_nonzero_tail = false;
            return;
        }
        let pos = pos as usize;
        let round_up = self.digits[pos] >= b'5';
        if round_up {
            let mut keep = pos;
            while keep > 0 && self.digits[keep - 1] == b'9' {
                keep -= 1;
            }
            self.digits.truncate(keep);
            if keep == 0 {
                self.digits.push(b'1');
                self.scale += 1;
            } else {
                self.digits[keep - 1] += 1;
            }
        } else {
            self.digits.truncate(pos);
        }
        while self.digits.last() == Some(&b'0') {
            self.digits.pop();
        }
        self.has_nonzero_tail = false;
        if self.digits.is_empty() {
            self.scale = 0;
        }
    }

    /// Digitizes an unsigned 64 bit integer.
    pub fn from_u64(value: u64, negative: bool) -> NumberBuffer {
        let mut number = NumberBuffer::new(NumberKind::Integer);
        number.negative = negative;
        if value == 0 {
            return number;
        }
        let mut reversed = ArrayVec::<u8, 20>::new();
        let mut value = value;
        while value != 0 {
            reversed.push(b'0' + (value % 10) as u8);
            value /= 10;
        }
        number.scale = reversed.len() as i32;
        for &digit in reversed.iter().rev() {
            number.digits.push(digit);
        }
        while number.digits.last() == Some(&b'0') {
            number.digits.pop();
        }
        number
    }

    /// Digitizes a decimal value. Trailing fractional zeros are retained, so
    /// `1.200` renders with its full scale the way it was constructed.
    pub fn from_decimal(value: &Decimal) -> NumberBuffer {
        let mut number = NumberBuffer::new(NumberKind::Decimal);
        number.negative = value.is_sign_negative();

        // Extract digits in 10^9 blocks, least significant block first.
        let mut working = value.mantissa_array3();
        let mut reversed = ArrayVec::<u8, 32>::new();
        while !is_all_zero(&working) {
            let mut block = div_by_u32(&mut working, 1_000_000_000);
            let width = if is_all_zero(&working) { 0 } else { 9 };
            let mut count = 0;
            while block != 0 || count < width {
                reversed.push(b'0' + (block % 10) as u8);
                block /= 10;
                count += 1;
            }
        }
        if reversed.is_empty() {
            // Zero keeps its scale so "0.00" can render from scale 2.
            number.scale = -(value.scale() as i32);
            return number;
        }
        number.scale = reversed.len() as i32 - value.scale() as i32;
        for &digit in reversed.iter().rev() {
            number.digits.push(digit);
        }
        number
    }

    /// Digitizes a finite float with the shortest round-trippable digits.
    pub fn from_float_shortest<F: RawFloat>(negative: bool, decoded: &Decoded) -> NumberBuffer {
        let mut number = NumberBuffer::new(NumberKind::FloatingPoint);
        number.negative = negative;
        let mut buf = [0u8; 17];
        let (len, k) = fltdec::format_shortest(decoded, &mut buf);
        number.digits.extend(buf[..len].iter().copied());
        number.scale = k;
        number
    }

    /// Digitizes a finite float to a bounded precision: at most `digits`
    /// significant digits, not going below the decimal position `limit`.
    pub fn from_float_exact<F: RawFloat>(
        negative: bool,
        decoded: &Decoded,
        digits: usize,
        limit: i32,
    ) -> NumberBuffer {
        let mut number = NumberBuffer::new(NumberKind::FloatingPoint);
        number.negative = negative;
        let mut buf = [0u8; DOUBLE_DIGITS];
        let wanted = digits.min(F::MAX_DIGITS);
        let (len, k) = fltdec::format_exact(decoded, &mut buf[..wanted], limit);
        number.digits.extend(buf[..len].iter().copied());
        number.scale = k;
        while number.digits.last() == Some(&b'0') {
            number.digits.pop();
        }
        number
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn round_carries_through_nines() {
        let mut number = NumberBuffer::new(NumberKind::Decimal);
        number.digits.extend(b"1999".iter().copied());
        number.scale = 1; // 1.999
        number.round(3);
        assert_eq!(&number.digits[..], b"2");
        assert_eq!(number.scale, 1);

        let mut number = NumberBuffer::new(NumberKind::Decimal);
        number.digits.extend(b"999".iter().copied());
        number.scale = 3; // 999
        number.round(2);
        assert_eq!(&number.digits[..], b"1");
        assert_eq!(number.scale, 4); // carried out to 1000
    }

    #[test]
    fn round_half_goes_away_from_zero() {
        let mut number = NumberBuffer::new(NumberKind::Decimal);
        number.digits.extend(b"25".iter().copied());
        number.scale = 1; // 2.5
        number.round(1);
        assert_eq!(&number.digits[..], b"3");
    }

    #[test]
    fn decimal_digitization_keeps_scale_zeros() {
        let value = Decimal::from_str("1.200").unwrap();
        let number = NumberBuffer::from_decimal(&value);
        assert_eq!(&number.digits[..], b"1200");
        assert_eq!(number.scale, 1);
    }

    #[test]
    fn u64_digitization() {
        let number = NumberBuffer::from_u64(1_002_003, false);
        assert_eq!(&number.digits[..], b"1002003");
        assert_eq!(number.scale, 7);
    }
}
