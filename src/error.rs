use crate::constants::{MAX_I128_REPR, MAX_SCALE};
use std::fmt;

/// Error type for the library.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// A generic conversion or parse failure described by a message.
    ErrorString(String),
    /// The result does not fit into 96 bits even at scale zero.
    ExceedsMaximumPossibleValue,
    /// The negative result does not fit into 96 bits even at scale zero.
    LessThanMinimumPossibleValue,
    /// More fractional digits were supplied than the type can retain.
    Underflow,
    /// A scale larger than 28 was requested.
    ScaleExceedsMaximumPrecision(u32),
    /// Division or remainder by a zero divisor.
    DivideByZero,
}

impl<S> From<S> for Error
where
    S: Into<String>,
{
    #[inline]
    fn from(from: S) -> Self {
        Self::ErrorString(from.into())
    }
}

#[cold]
pub(crate) fn tail_error<T>(from: &'static str) -> Result<T, Error> {
    Err(from.into())
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::ErrorString(ref err) => f.pad(err),
            Self::ExceedsMaximumPossibleValue => {
                write!(f, "Number exceeds maximum value that can be represented: {}", MAX_I128_REPR)
            }
            Self::LessThanMinimumPossibleValue => {
                write!(
                    f,
                    "Number less than minimum value that can be represented: {}",
                    -MAX_I128_REPR
                )
            }
            Self::Underflow => {
                write!(f, "Number has a high precision that can not be represented exactly")
            }
            Self::ScaleExceedsMaximumPrecision(ref scale) => {
                write!(f, "Scale exceeds maximum precision: {} > {}", scale, MAX_SCALE)
            }
            Self::DivideByZero => write!(f, "Division by zero"),
        }
    }
}
