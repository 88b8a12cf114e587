//! A 96 bit fixed-precision decimal number type paired with an exact binary
//! float to decimal text conversion engine.
//!
//! The [`Decimal`] type stores a 96 bit integer significand, a scale between
//! 0 and 28 giving the power of ten to divide by, and a sign. Arithmetic is
//! exact wherever the result fits; when it cannot fit, the scale is reduced
//! with round-half-to-even and overflow is reported rather than silently
//! truncated.
//!
//! The text engine covers both directions for `f64`, `f32` and binary16
//! ([`Half`]) values: formatting produces the shortest decimal string that
//! parses back to the exact same bits (with fixed-precision variants for the
//! standard format specifiers), and parsing reconstructs exact values using
//! bounded big-integer arithmetic whenever the fast paths cannot guarantee
//! correct rounding.
//!
//! ```
//! use dec96::Decimal;
//! use core::str::FromStr;
//!
//! let a = Decimal::from_str("0.1").unwrap();
//! let b = Decimal::from_str("0.2").unwrap();
//! assert_eq!((a + b).to_string(), "0.3");
//! ```
//!
//! Locale-aware formatting and parsing run through a caller supplied
//! [`NumberFormatInfo`] record:
//!
//! ```
//! use dec96::{format_f64, NumberFormatInfo};
//!
//! let info = NumberFormatInfo::default();
//! assert_eq!(format_f64(1234.5, "N2", &info).unwrap(), "1,234.50");
//! assert_eq!(format_f64(0.1f64, "G", &info).unwrap(), "0.1");
//! ```

mod bigint;
mod constants;
mod decimal;
mod error;
mod fltdec;
mod number;
mod ops;
#[cfg(feature = "proptest")]
mod proptest;
#[cfg(feature = "serde")]
mod serde;
mod str;

pub use crate::decimal::{Decimal, RoundingStrategy};
pub use crate::error::Error;
pub use crate::fltdec::Half;
pub use crate::number::{
    format_decimal, format_f32, format_f64, format_half, format_i64, format_u64, parse_decimal,
    parse_f32, parse_f64, parse_half, parse_i32, parse_i64, parse_u32, parse_u64, NumberFormatInfo,
    NumberStyles,
};
