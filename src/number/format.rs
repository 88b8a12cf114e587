//! The format-specifier and picture-string renderer.
//!
//! A format is either a single letter with an optional precision (`G`, `F2`,
//! `E4`, `N0`, `C`, `P1`, `R`, `X8`) or a custom picture built from the
//! `0 # . , % ‰ E+ ; \ "…" '…'` tokens. All separators, symbols and sign
//! placements come from the caller's `NumberFormatInfo`.

use crate::error::Error;
use crate::fltdec::{decode, FullDecoded, Half, RawFloat};
use crate::number::locale::{
    NumberFormatInfo, CURRENCY_NEGATIVE_PATTERNS, CURRENCY_POSITIVE_PATTERNS,
    NUMBER_NEGATIVE_PATTERNS, PERCENT_NEGATIVE_PATTERNS, PERCENT_POSITIVE_PATTERNS,
};
use crate::number::{NumberBuffer, NumberKind};
use crate::Decimal;

/// Formats a decimal value with the given format specifier.
pub fn format_decimal(value: &Decimal, format: &str, info: &NumberFormatInfo) -> Result<String, Error> {
    render(&DecimalSource(value), format, info)
}

/// Formats a double with the given format specifier.
pub fn format_f64(value: f64, format: &str, info: &NumberFormatInfo) -> Result<String, Error> {
    render(&FloatSource::<f64>::new(value), format, info)
}

/// Formats a single precision float with the given format specifier.
pub fn format_f32(value: f32, format: &str, info: &NumberFormatInfo) -> Result<String, Error> {
    render(&FloatSource::<f32>::new(value), format, info)
}

/// Formats a half precision bit pattern with the given format specifier.
pub fn format_half(value: Half, format: &str, info: &NumberFormatInfo) -> Result<String, Error> {
    render(&FloatSource::<Half>::new(value), format, info)
}

/// Formats a signed integer with the given format specifier.
pub fn format_i64(value: i64, format: &str, info: &NumberFormatInfo) -> Result<String, Error> {
    render(
        &IntSource {
            magnitude: value.unsigned_abs(),
            negative: value < 0,
            // Hex renders the two's complement bit pattern.
            bits: value as u64,
        },
        format,
        info,
    )
}

/// Formats an unsigned integer with the given format specifier.
pub fn format_u64(value: u64, format: &str, info: &NumberFormatInfo) -> Result<String, Error> {
    render(
        &IntSource {
            magnitude: value,
            negative: false,
            bits: value,
        },
        format,
        info,
    )
}

// The seam between the value types and the renderer: every source can
// digitize itself fully, to a significant digit count, or down to a decimal
// position.
trait FormatSource {
    /// Natural digits: shortest round-trippable for floats, the full
    /// significand for decimals and integers.
    fn digits(&self) -> NumberBuffer;
    /// At most `sig` significant digits.
    fn digits_sig(&self, sig: usize) -> NumberBuffer;
    /// Digits down to the decimal position 10^limit.
    fn digits_limit(&self, limit: i32) -> NumberBuffer;
    /// The significant digit count that switches `G` to scientific notation.
    fn general_precision(&self) -> usize;
    /// NaN or infinity spelling, when the value is one.
    fn special(&self, info: &NumberFormatInfo) -> Option<String> {
        let _ = info;
        None
    }
    /// The `X` specifier, supported for integer sources only.
    fn hex(&self, upper: bool, width: usize) -> Option<String> {
        let _ = (upper, width);
        None
    }
}

struct DecimalSource<'a>(&'a Decimal);

impl FormatSource for DecimalSource<'_> {
    fn digits(&self) -> NumberBuffer {
        NumberBuffer::from_decimal(self.0)
    }

    fn digits_sig(&self, sig: usize) -> NumberBuffer {
        let mut number = NumberBuffer::from_decimal(self.0);
        number.round(sig as i32);
        number
    }

    fn digits_limit(&self, limit: i32) -> NumberBuffer {
        let mut number = NumberBuffer::from_decimal(self.0);
        number.round(number.scale - limit);
        number
    }

    fn general_precision(&self) -> usize {
        29
    }
}

struct FloatSource<F: RawFloat> {
    negative: bool,
    decoded: FullDecoded,
    _marker: core::marker::PhantomData<F>,
}

impl<F: RawFloat> FloatSource<F> {
    fn new(value: F) -> FloatSource<F> {
        let (negative, decoded) = decode(value);
        FloatSource {
            negative,
            decoded,
            _marker: core::marker::PhantomData,
        }
    }

    fn zero(&self) -> NumberBuffer {
        let mut number = NumberBuffer::new(NumberKind::FloatingPoint);
        number.negative = self.negative;
        number
    }
}

impl<F: RawFloat> FormatSource for FloatSource<F> {
    fn digits(&self) -> NumberBuffer {
        match self.decoded {
            FullDecoded::Finite(ref decoded) => {
                NumberBuffer::from_float_shortest::<F>(self.negative, decoded)
            }
            _ => self.zero(),
        }
    }

    fn digits_sig(&self, sig: usize) -> NumberBuffer {
        match self.decoded {
            FullDecoded::Finite(ref decoded) => {
                NumberBuffer::from_float_exact::<F>(self.negative, decoded, sig, i32::MIN)
            }
            _ => self.zero(),
        }
    }

    fn digits_limit(&self, limit: i32) -> NumberBuffer {
        match self.decoded {
            FullDecoded::Finite(ref decoded) => {
                NumberBuffer::from_float_exact::<F>(self.negative, decoded, F::MAX_DIGITS, limit)
            }
            _ => self.zero(),
        }
    }

    fn general_precision(&self) -> usize {
        F::GENERAL_DIGITS
    }

    fn special(&self, info: &NumberFormatInfo) -> Option<String> {
        match self.decoded {
            FullDecoded::Nan => Some(info.nan_symbol.clone()),
            FullDecoded::Infinite => Some(if self.negative {
                info.negative_infinity_symbol.clone()
            } else {
                info.positive_infinity_symbol.clone()
            }),
            _ => None,
        }
    }
}

struct IntSource {
    magnitude: u64,
    negative: bool,
    bits: u64,
}

impl FormatSource for IntSource {
    fn digits(&self) -> NumberBuffer {
        NumberBuffer::from_u64(self.magnitude, self.negative)
    }

    fn digits_sig(&self, sig: usize) -> NumberBuffer {
        let mut number = self.digits();
        number.round(sig as i32);
        number
    }

    fn digits_limit(&self, limit: i32) -> NumberBuffer {
        let mut number = self.digits();
        number.round(number.scale - limit);
        number
    }

    fn general_precision(&self) -> usize {
        20
    }

    fn hex(&self, upper: bool, width: usize) -> Option<String> {
        let body = if upper {
            format!("{:X}", self.bits)
        } else {
            format!("{:x}", self.bits)
        };
        if body.len() < width {
            let mut padded = "0".repeat(width - body.len());
            padded.push_str(&body);
            Some(padded)
        } else {
            Some(body)
        }
    }
}

fn render(source: &dyn FormatSource, format: &str, info: &NumberFormatInfo) -> Result<String, Error> {
    if let Some(special) = source.special(info) {
        return Ok(special);
    }

    let bytes = format.as_bytes();
    let standard = match bytes {
        [] => Some((b'G', None)),
        [letter] if letter.is_ascii_alphabetic() => Some((*letter, None)),
        [letter, rest @ ..] if letter.is_ascii_alphabetic() && rest.iter().all(u8::is_ascii_digit) => {
            if rest.len() > 2 {
                return Err(Error::from("Format specifier precision is out of range"));
            }
            let mut precision = 0usize;
            for &b in rest {
                precision = precision * 10 + (b - b'0') as usize;
            }
            Some((*letter, Some(precision)))
        }
        _ => None,
    };

    match standard {
        Some((letter, precision)) => render_standard(source, letter, precision, info),
        None => render_custom(source, format, info),
    }
}

fn render_standard(
    source: &dyn FormatSource,
    letter: u8,
    precision: Option<usize>,
    info: &NumberFormatInfo,
) -> Result<String, Error> {
    match letter {
        b'G' | b'g' => {
            let number = match precision {
                Some(p) if p > 0 => source.digits_sig(p),
                _ => source.digits(),
            };
            let threshold = match precision {
                Some(p) if p > 0 => p,
                _ => source.general_precision(),
            };
            let body = render_general(&number, threshold, letter == b'G', info);
            Ok(sign_prefix(&number, body, info))
        }
        b'R' | b'r' => {
            let number = source.digits();
            let body = render_general(&number, source.general_precision(), true, info);
            Ok(sign_prefix(&number, body, info))
        }
        b'F' | b'f' => {
            let digits = precision.unwrap_or(info.number_decimal_digits as usize);
            let number = source.digits_limit(-(digits as i32));
            let body = render_fixed(&number, digits, &info.decimal_separator, None);
            Ok(sign_prefix(&number, body, info))
        }
        b'N' | b'n' => {
            let digits = precision.unwrap_or(info.number_decimal_digits as usize);
            let number = source.digits_limit(-(digits as i32));
            let body = render_fixed(
                &number,
                digits,
                &info.decimal_separator,
                Some((&info.group_separator, &info.group_sizes)),
            );
            if number.negative && !number.is_zero() {
                let pattern = pattern_at(&NUMBER_NEGATIVE_PATTERNS, info.number_negative_pattern);
                Ok(apply_pattern(pattern, &body, "", &info.negative_sign))
            } else {
                Ok(body)
            }
        }
        b'E' | b'e' => {
            let digits = precision.unwrap_or(6);
            let number = source.digits_sig(digits + 1);
            let body = render_scientific(&number, digits, letter as char, 3, info);
            Ok(sign_prefix(&number, body, info))
        }
        b'C' | b'c' => {
            let digits = precision.unwrap_or(info.currency_decimal_digits as usize);
            let number = source.digits_limit(-(digits as i32));
            let body = render_fixed(
                &number,
                digits,
                &info.currency_decimal_separator,
                Some((&info.currency_group_separator, &info.currency_group_sizes)),
            );
            let pattern = if number.negative && !number.is_zero() {
                pattern_at(&CURRENCY_NEGATIVE_PATTERNS, info.currency_negative_pattern)
            } else {
                pattern_at(&CURRENCY_POSITIVE_PATTERNS, info.currency_positive_pattern)
            };
            Ok(apply_pattern(pattern, &body, &info.currency_symbol, &info.negative_sign))
        }
        b'P' | b'p' => {
            let digits = precision.unwrap_or(info.percent_decimal_digits as usize);
            // Scaling by 100 is a shift of the decimal point, so the digits
            // are generated two positions deeper and shifted back.
            let mut number = source.digits_limit(-(digits as i32) - 2);
            number.scale += 2;
            let body = render_fixed(
                &number,
                digits,
                &info.percent_decimal_separator,
                Some((&info.percent_group_separator, &info.percent_group_sizes)),
            );
            let pattern = if number.negative && !number.is_zero() {
                pattern_at(&PERCENT_NEGATIVE_PATTERNS, info.percent_negative_pattern)
            } else {
                pattern_at(&PERCENT_POSITIVE_PATTERNS, info.percent_positive_pattern)
            };
            Ok(apply_pattern(pattern, &body, &info.percent_symbol, &info.negative_sign))
        }
        b'X' | b'x' => source
            .hex(letter == b'X', precision.unwrap_or(0))
            .ok_or_else(|| Error::from("Format specifier was invalid")),
        _ => Err(Error::from("Format specifier was invalid")),
    }
}

fn pattern_at<'a>(patterns: &'a [&'a str], index: u32) -> &'a str {
    patterns.get(index as usize).copied().unwrap_or(patterns[0])
}

fn digit_at(number: &NumberBuffer, index: i32) -> u8 {
    if index >= 0 && (index as usize) < number.digits.len() {
        number.digits[index as usize]
    } else {
        b'0'
    }
}

fn sign_prefix(number: &NumberBuffer, body: String, info: &NumberFormatInfo) -> String {
    if number.negative && !(number.is_zero() && number.kind != NumberKind::FloatingPoint) {
        let mut out = info.negative_sign.clone();
        out.push_str(&body);
        out
    } else {
        body
    }
}

fn is_group_boundary(from_right: u32, sizes: &[u32]) -> bool {
    let mut acc = 0u32;
    let mut last = 0u32;
    for &size in sizes {
        if size == 0 {
            return false;
        }
        acc += size;
        last = size;
        if from_right == acc {
            return true;
        }
        if from_right < acc {
            return false;
        }
    }
    last != 0 && (from_right - acc) % last == 0
}

fn render_fixed(
    number: &NumberBuffer,
    precision: usize,
    decimal_separator: &str,
    grouping: Option<(&str, &[u32])>,
) -> String {
    let mut out = String::new();
    if number.scale <= 0 || number.is_zero() {
        out.push('0');
    } else {
        for pos in 0..number.scale {
            out.push(digit_at(number, pos) as char);
            if let Some((separator, sizes)) = grouping {
                let from_right = (number.scale - pos - 1) as u32;
                if from_right > 0 && is_group_boundary(from_right, sizes) {
                    out.push_str(separator);
                }
            }
        }
    }
    if precision > 0 {
        out.push_str(decimal_separator);
        for i in 0..precision as i32 {
            out.push(digit_at(number, number.scale + i) as char);
        }
    }
    out
}

fn render_scientific(
    number: &NumberBuffer,
    precision: usize,
    exponent_char: char,
    min_exponent_digits: usize,
    info: &NumberFormatInfo,
) -> String {
    let mut out = String::new();
    out.push(digit_at(number, 0) as char);
    if precision > 0 {
        out.push_str(&info.decimal_separator);
        for i in 1..=precision as i32 {
            out.push(digit_at(number, i) as char);
        }
    }
    let exponent = if number.is_zero() { 0 } else { number.scale - 1 };
    out.push(exponent_char);
    if exponent < 0 {
        out.push_str(&info.negative_sign);
    } else {
        out.push_str(&info.positive_sign);
    }
    let digits = exponent.unsigned_abs().to_string();
    for _ in digits.len()..min_exponent_digits {
        out.push('0');
    }
    out.push_str(&digits);
    out
}

// The `G` shape: fixed point for moderate exponents, scientific with trimmed
// trailing zeros otherwise.
fn render_general(
    number: &NumberBuffer,
    precision: usize,
    upper: bool,
    info: &NumberFormatInfo,
) -> String {
    let exponent = number.scale - 1;
    if !number.is_zero() && (exponent < -4 || exponent >= precision as i32) {
        let mut out = String::new();
        out.push(number.digits[0] as char);
        if number.digits.len() > 1 {
            out.push_str(&info.decimal_separator);
            for &digit in &number.digits[1..] {
                out.push(digit as char);
            }
        }
        out.push(if upper { 'E' } else { 'e' });
        if exponent < 0 {
            out.push_str(&info.negative_sign);
        } else {
            out.push_str(&info.positive_sign);
        }
        let digits = exponent.unsigned_abs().to_string();
        for _ in digits.len()..2 {
            out.push('0');
        }
        out.push_str(&digits);
        out
    } else {
        let fraction = (number.digits.len() as i32 - number.scale).max(0) as usize;
        render_fixed(number, fraction, &info.decimal_separator, None)
    }
}

fn apply_pattern(pattern: &str, body: &str, symbol: &str, negative_sign: &str) -> String {
    let mut out = String::new();
    for ch in pattern.chars() {
        match ch {
            'n' => out.push_str(body),
            '$' | '%' => out.push_str(symbol),
            '-' => out.push_str(negative_sign),
            other => out.push(other),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Custom picture strings
// ---------------------------------------------------------------------------

#[derive(Debug)]
enum Token {
    Zero,
    Hash,
    Point,
    Comma,
    Percent,
    PerMille,
    Exponent { always_sign: bool, zeros: usize, upper: bool },
    Literal(String),
}

fn tokenize_section(section: &str) -> Result<Vec<Token>, Error> {
    let mut tokens = Vec::new();
    let mut chars = section.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '0' => tokens.push(Token::Zero),
            '#' => tokens.push(Token::Hash),
            '.' => tokens.push(Token::Point),
            ',' => tokens.push(Token::Comma),
            '%' => tokens.push(Token::Percent),
            '\u{2030}' => tokens.push(Token::PerMille),
            'E' | 'e' => {
                // Only E followed by an optional sign and at least one zero
                // is an exponent marker; anything else is a literal.
                let mut lookahead = chars.clone();
                let mut always_sign = false;
                match lookahead.peek() {
                    Some('+') => {
                        always_sign = true;
                        lookahead.next();
                    }
                    Some('-') => {
                        lookahead.next();
                    }
                    _ => {}
                }
                let mut zeros = 0;
                while lookahead.peek() == Some(&'0') {
                    lookahead.next();
                    zeros += 1;
                }
                if zeros > 0 {
                    chars = lookahead;
                    tokens.push(Token::Exponent {
                        always_sign,
                        zeros,
                        upper: ch == 'E',
                    });
                } else {
                    tokens.push(Token::Literal(ch.to_string()));
                }
            }
            '\\' => match chars.next() {
                Some(escaped) => tokens.push(Token::Literal(escaped.to_string())),
                None => return Err(Error::from("Format specifier was invalid")),
            },
            quote @ ('"' | '\'') => {
                let mut literal = String::new();
                loop {
                    match chars.next() {
                        Some(c) if c == quote => break,
                        Some(c) => literal.push(c),
                        None => return Err(Error::from("Format specifier was invalid")),
                    }
                }
                tokens.push(Token::Literal(literal));
            }
            other => tokens.push(Token::Literal(other.to_string())),
        }
    }
    Ok(tokens)
}

// Splits a picture into its up to three `;`-separated sections, respecting
// quotes and escapes.
fn split_sections(format: &str) -> Vec<&str> {
    let mut sections = Vec::new();
    let bytes = format.as_bytes();
    let mut start = 0;
    let mut index = 0;
    let mut quote = 0u8;
    while index < bytes.len() {
        let b = bytes[index];
        if quote != 0 {
            if b == quote {
                quote = 0;
            }
        } else {
            match b {
                b'"' | b'\'' => quote = b,
                b'\\' => index += 1,
                b';' => {
                    sections.push(&format[start..index]);
                    start = index + 1;
                }
                _ => {}
            }
        }
        index += 1;
    }
    sections.push(&format[start..]);
    sections
}

struct SectionLayout {
    int_placeholders: usize,
    frac_placeholders: usize,
    /// Count of required (zero) placeholders counting from the rightmost
    /// integer position.
    min_int: usize,
    /// Rightmost required fractional position (1-based).
    min_frac: usize,
    /// Decimal point shift: +2 per `%`, +3 per `‰`, -3 per scaling comma.
    shift: i32,
    grouping: bool,
    exponent: Option<(bool, usize, bool)>, // (always_sign, zeros, upper)
}

fn analyze(tokens: &[Token]) -> SectionLayout {
    let mut layout = SectionLayout {
        int_placeholders: 0,
        frac_placeholders: 0,
        min_int: 0,
        min_frac: 0,
        shift: 0,
        grouping: false,
        exponent: None,
    };
    let mut seen_point = false;
    let mut seen_digit = false;
    let mut first_zero_int: Option<usize> = None;
    let mut pending_commas = 0;
    for token in tokens {
        match token {
            Token::Zero | Token::Hash => {
                if seen_point {
                    layout.frac_placeholders += 1;
                    if matches!(token, Token::Zero) {
                        layout.min_frac = layout.frac_placeholders;
                    }
                } else {
                    if pending_commas > 0 {
                        // A comma between digit placeholders turns grouping on.
                        layout.grouping = true;
                        pending_commas = 0;
                    }
                    layout.int_placeholders += 1;
                    if matches!(token, Token::Zero) && first_zero_int.is_none() {
                        first_zero_int = Some(layout.int_placeholders - 1);
                    }
                }
                seen_digit = true;
            }
            Token::Point => {
                if !seen_point {
                    // Commas piled up directly against the point scale by
                    // a thousand each.
                    layout.shift -= 3 * pending_commas;
                    pending_commas = 0;
                    seen_point = true;
                }
            }
            Token::Comma => {
                if seen_digit && !seen_point {
                    pending_commas += 1;
                }
            }
            Token::Percent => layout.shift += 2,
            Token::PerMille => layout.shift += 3,
            Token::Exponent { always_sign, zeros, upper } => {
                if layout.exponent.is_none() {
                    layout.exponent = Some((*always_sign, *zeros, *upper));
                }
            }
            Token::Literal(_) => {}
        }
    }
    // Commas trailing the integer placeholders with no decimal point also
    // scale down.
    layout.shift -= 3 * pending_commas;
    if let Some(first) = first_zero_int {
        layout.min_int = layout.int_placeholders - first;
    }
    layout
}

fn render_custom(
    source: &dyn FormatSource,
    format: &str,
    info: &NumberFormatInfo,
) -> Result<String, Error> {
    // Pick the section: positive / negative / zero.
    let sections = split_sections(format);
    let probe = source.digits();
    let section_index = if probe.is_zero() && sections.len() >= 3 && !sections[2].is_empty() {
        2
    } else if probe.negative && sections.len() >= 2 && !sections[1].is_empty() {
        1
    } else {
        0
    };
    let tokens = tokenize_section(sections[section_index])?;
    let layout = analyze(&tokens);

    // Generate digits rounded for this layout, applying the scale shift
    // before rounding so the shifted value rounds exactly once.
    let mut number = if layout.exponent.is_some() {
        let sig = (layout.int_placeholders + layout.frac_placeholders).max(1);
        let mut number = source.digits_sig(sig);
        number.scale += layout.shift;
        number
    } else {
        let mut number = source.digits_limit(-(layout.frac_placeholders as i32) - layout.shift);
        number.scale += layout.shift;
        number
    };

    // The negative sign is implicit unless the negative section was chosen.
    let explicit_sign = section_index == 0 && number.negative && !number.is_zero();
    if section_index == 1 {
        number.negative = false;
    }

    let body = emit(&tokens, &layout, &number, info);
    Ok(if explicit_sign {
        let mut out = info.negative_sign.clone();
        out.push_str(&body);
        out
    } else {
        body
    })
}

fn emit(tokens: &[Token], layout: &SectionLayout, number: &NumberBuffer, info: &NumberFormatInfo) -> String {
    let mut out = String::new();

    // In scientific mode the integer placeholders always hold exactly that
    // many digits and the exponent absorbs the rest of the scale.
    let scientific = layout.exponent.is_some();
    let scale = if scientific {
        layout.int_placeholders as i32
    } else {
        number.scale
    };
    let displayed_exponent = if number.is_zero() {
        0
    } else {
        number.scale - layout.int_placeholders as i32
    };

    let value_scale = if number.is_zero() && !scientific { 0 } else { scale };
    let int_len = value_scale.max(layout.min_int as i32).max(0);
    let significant_frac = (number.digits.len() as i32 - scale)
        .clamp(0, layout.frac_placeholders as i32) as usize;
    let frac_len = significant_frac.max(layout.min_frac);

    let mut int_ordinal = 0usize;
    let mut frac_ordinal = 0usize;
    let mut seen_point = false;

    for token in tokens {
        match token {
            Token::Zero | Token::Hash => {
                if !seen_point {
                    let right = (layout.int_placeholders - int_ordinal) as i32;
                    if int_ordinal == 0 {
                        // The leftmost placeholder absorbs every digit above
                        // its own position.
                        let mut position = int_len;
                        while position > right {
                            push_int_digit(&mut out, number, scale, position, layout, info);
                            position -= 1;
                        }
                    }
                    if right <= int_len {
                        push_int_digit(&mut out, number, scale, right, layout, info);
                    }
                    int_ordinal += 1;
                } else {
                    if frac_ordinal < frac_len {
                        out.push(digit_at(number, scale + frac_ordinal as i32) as char);
                    }
                    frac_ordinal += 1;
                }
            }
            Token::Point => {
                if !seen_point {
                    seen_point = true;
                    if frac_len > 0 {
                        out.push_str(&info.decimal_separator);
                    }
                }
            }
            Token::Comma => {}
            Token::Percent => out.push_str(&info.percent_symbol),
            Token::PerMille => out.push_str(&info.per_mille_symbol),
            Token::Exponent { always_sign, zeros, upper } => {
                out.push(if *upper { 'E' } else { 'e' });
                if displayed_exponent < 0 {
                    out.push_str(&info.negative_sign);
                } else if *always_sign {
                    out.push_str(&info.positive_sign);
                }
                let digits = displayed_exponent.unsigned_abs().to_string();
                for _ in digits.len()..*zeros {
                    out.push('0');
                }
                out.push_str(&digits);
            }
            Token::Literal(literal) => out.push_str(literal),
        }
    }
    out
}

fn push_int_digit(
    out: &mut String,
    number: &NumberBuffer,
    scale: i32,
    right_position: i32,
    layout: &SectionLayout,
    info: &NumberFormatInfo,
) {
    out.push(digit_at(number, scale - right_position) as char);
    if layout.grouping && right_position > 1 && is_group_boundary((right_position - 1) as u32, &info.group_sizes) {
        out.push_str(&info.group_separator);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;

    fn info() -> NumberFormatInfo {
        NumberFormatInfo::default()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn fixed_and_number_formats() {
        let info = info();
        assert_eq!(format_decimal(&dec("1234.567"), "F2", &info).unwrap(), "1234.57");
        assert_eq!(format_decimal(&dec("1234.567"), "N2", &info).unwrap(), "1,234.57");
        assert_eq!(format_decimal(&dec("-1234.567"), "N1", &info).unwrap(), "-1,234.6");
        assert_eq!(format_decimal(&dec("0.5"), "F0", &info).unwrap(), "1");
        assert_eq!(format_decimal(&dec("1234567"), "N0", &info).unwrap(), "1,234,567");
    }

    #[test]
    fn exponential_format() {
        let info = info();
        assert_eq!(format_decimal(&dec("1234.567"), "E2", &info).unwrap(), "1.23E+003");
        assert_eq!(format_f64(0.00056, "E1", &info).unwrap(), "5.6E-004");
        assert_eq!(format_f64(0.0, "E2", &info).unwrap(), "0.00E+000");
    }

    #[test]
    fn general_format_switches_notation() {
        let info = info();
        assert_eq!(format_f64(0.0001, "G", &info).unwrap(), "0.0001");
        assert_eq!(format_f64(0.00001, "G", &info).unwrap(), "1E-05");
        assert_eq!(format_f64(1e15, "G", &info).unwrap(), "1E+15");
        assert_eq!(format_f64(123456.0, "G", &info).unwrap(), "123456");
        assert_eq!(format_f64(123456.0, "G4", &info).unwrap(), "1.235E+05");
    }

    #[test]
    fn shortest_round_trip_digits() {
        let info = info();
        assert_eq!(format_f64(0.1, "G", &info).unwrap(), "0.1");
        assert_eq!(format_f64(1.0 / 3.0, "G", &info).unwrap(), "0.3333333333333333");
        assert_eq!(format_f64(0.0, "G", &info).unwrap(), "0");
        assert_eq!(format_f64(-0.0, "G", &info).unwrap(), "-0");
    }

    #[test]
    fn currency_and_percent() {
        let info = info();
        assert_eq!(format_decimal(&dec("12.345"), "C", &info).unwrap(), "\u{00A4}12.35");
        assert_eq!(format_decimal(&dec("-12.345"), "C", &info).unwrap(), "(\u{00A4}12.35)");
        assert_eq!(format_decimal(&dec("0.1234"), "P1", &info).unwrap(), "12.3 %");
    }

    #[test]
    fn hex_for_integers_only() {
        let info = info();
        assert_eq!(format_i64(255, "X", &info).unwrap(), "FF");
        assert_eq!(format_i64(255, "x4", &info).unwrap(), "00ff");
        assert_eq!(format_i64(-1, "X", &info).unwrap(), "FFFFFFFFFFFFFFFF");
        assert!(format_f64(1.0, "X", &info).is_err());
    }

    #[test]
    fn custom_pictures() {
        let info = info();
        assert_eq!(format_decimal(&dec("1234.567"), "#,##0.00", &info).unwrap(), "1,234.57");
        assert_eq!(format_decimal(&dec("0.45"), "0.##", &info).unwrap(), "0.45");
        assert_eq!(format_decimal(&dec("0.45"), "#.##", &info).unwrap(), ".45");
        assert_eq!(format_decimal(&dec("12"), "00000", &info).unwrap(), "00012");
        assert_eq!(format_decimal(&dec("0.3"), "0%", &info).unwrap(), "30%");
        assert_eq!(format_decimal(&dec("0.003"), "0\u{2030}", &info).unwrap(), "3\u{2030}");
        assert_eq!(format_decimal(&dec("1234500"), "0,,", &info).unwrap(), "1");
        assert_eq!(format_decimal(&dec("1.2345"), "0.00E+00", &info).unwrap(), "1.23E+00");
        assert_eq!(format_decimal(&dec("-5"), "0;minus 0", &info).unwrap(), "minus 5");
        assert_eq!(format_decimal(&dec("5"), "0 'units'", &info).unwrap(), "5 units");
    }

    #[test]
    fn custom_sections_pick_by_sign() {
        let info = info();
        let picture = "0.0;(0.0);zero";
        assert_eq!(format_decimal(&dec("1.25"), picture, &info).unwrap(), "1.3");
        assert_eq!(format_decimal(&dec("-1.25"), picture, &info).unwrap(), "(1.3)");
        assert_eq!(format_decimal(&dec("0"), picture, &info).unwrap(), "zero");
    }
}
