// Culture-invariant text conversions backing `Display`, `FromStr` and the
// scientific notation helpers. The locale-aware formatting engine lives in
// the `number` module.

mod fmt;
mod fmt_sci;
mod parse;
mod parse_sci;

pub(crate) use fmt::to_str_internal;
pub(crate) use fmt_sci::fmt_scientific_notation;
pub(crate) use parse::{parse_str_radix_10, parse_str_radix_10_exact};
pub(crate) use parse_sci::parse_str_scientific;
