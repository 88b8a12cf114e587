// The arithmetic engines. The significand layout and the scaling behavior
// follow the classic 96-bit decimal design: every operation works on the
// three 32 bit words plus a scale, widening into fixed scratch buffers when
// an intermediate no longer fits.

pub(crate) mod array;
mod add;
mod cmp;
pub(crate) mod common;
mod div;
mod mul;
mod rem;

pub(crate) use add::{add_impl, sub_impl};
pub(crate) use cmp::cmp_impl;
pub(crate) use div::{div_impl, strip_trailing_zeros};
pub(crate) use mul::mul_impl;
pub(crate) use rem::rem_impl;
