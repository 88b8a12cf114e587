//! The read-only locale configuration record consumed by the formatter and
//! parser. The library never sources this from the operating system; callers
//! provide one, and `Default` yields culture-invariant settings.

/// Separator, symbol and placement configuration for one culture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NumberFormatInfo {
    pub decimal_separator: String,
    pub group_separator: String,
    /// Digit group sizes from the decimal point outward; the last entry
    /// repeats, and a trailing zero means "no further grouping".
    pub group_sizes: Vec<u32>,
    pub number_decimal_digits: u32,
    /// Index into the negative number patterns: `(n)`, `-n`, `- n`, `n-`, `n -`.
    pub number_negative_pattern: u32,

    pub currency_symbol: String,
    pub currency_decimal_separator: String,
    pub currency_group_separator: String,
    pub currency_group_sizes: Vec<u32>,
    pub currency_decimal_digits: u32,
    /// Index into the positive currency patterns: `$n`, `n$`, `$ n`, `n $`.
    pub currency_positive_pattern: u32,
    /// Index into the negative currency patterns, `($n)` through `$- n`.
    pub currency_negative_pattern: u32,

    pub percent_symbol: String,
    pub per_mille_symbol: String,
    pub percent_decimal_separator: String,
    pub percent_group_separator: String,
    pub percent_group_sizes: Vec<u32>,
    pub percent_decimal_digits: u32,
    /// Index into the positive percent patterns: `n %`, `n%`, `%n`, `% n`.
    pub percent_positive_pattern: u32,
    /// Index into the negative percent patterns, `-n %` through `n- %`.
    pub percent_negative_pattern: u32,

    pub positive_sign: String,
    pub negative_sign: String,
    pub nan_symbol: String,
    pub positive_infinity_symbol: String,
    pub negative_infinity_symbol: String,
}

impl Default for NumberFormatInfo {
    fn default() -> Self {
        NumberFormatInfo {
            decimal_separator: ".".into(),
            group_separator: ",".into(),
            group_sizes: vec![3],
            number_decimal_digits: 2,
            number_negative_pattern: 1,

            currency_symbol: "\u{00A4}".into(),
            currency_decimal_separator: ".".into(),
            currency_group_separator: ",".into(),
            currency_group_sizes: vec![3],
            currency_decimal_digits: 2,
            currency_positive_pattern: 0,
            currency_negative_pattern: 0,

            percent_symbol: "%".into(),
            per_mille_symbol: "\u{2030}".into(),
            percent_decimal_separator: ".".into(),
            percent_group_separator: ",".into(),
            percent_group_sizes: vec![3],
            percent_decimal_digits: 2,
            percent_positive_pattern: 0,
            percent_negative_pattern: 0,

            positive_sign: "+".into(),
            negative_sign: "-".into(),
            nan_symbol: "NaN".into(),
            positive_infinity_symbol: "Infinity".into(),
            negative_infinity_symbol: "-Infinity".into(),
        }
    }
}

// Placement patterns: 'n' marks the number, '$' the currency symbol, '%' the
// percent symbol and '-' the negative sign. Rendering substitutes the
// culture's own strings for each marker.
pub(crate) const CURRENCY_POSITIVE_PATTERNS: [&str; 4] = ["$n", "n$", "$ n", "n $"];

pub(crate) const CURRENCY_NEGATIVE_PATTERNS: [&str; 17] = [
    "($n)", "-$n", "$-n", "$n-", "(n$)", "-n$", "n-$", "n$-", "-n $", "-$ n", "n $-", "$ n-",
    "$ -n", "n- $", "($ n)", "(n $)", "$- n",
];

pub(crate) const NUMBER_NEGATIVE_PATTERNS: [&str; 5] = ["(n)", "-n", "- n", "n-", "n -"];

pub(crate) const PERCENT_POSITIVE_PATTERNS: [&str; 4] = ["n %", "n%", "%n", "% n"];

pub(crate) const PERCENT_NEGATIVE_PATTERNS: [&str; 12] = [
    "-n %", "-n%", "-%n", "%-n", "%n-", "n-%", "n%-", "-% n", "n %-", "% n-", "% -n", "n- %",
];
