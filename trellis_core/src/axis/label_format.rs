// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! printf-style formatting of axis label values.
//!
//! A label format is literal text around at most one conversion directive:
//!
//! ```text
//! %[flags][width][.precision][length]conversion
//! ```
//!
//! - flags: `-` (left align), `+` (always sign), space (sign or space),
//!   `0` (zero padding), `#` (alternate form)
//! - conversions: `d i u` (integers, the value is truncated), `f F` (fixed),
//!   `e E` (exponent), `g G` (shortest of fixed and exponent), `x X o`
//!   (hex and octal of the truncated value)
//! - length modifiers (`h l L q j z t`) are accepted and ignored
//!
//! `%%` produces a literal `%`. Text that does not parse as a directive, and
//! every directive after the first, is copied through unchanged.
//!
//! Width and precision are limited to [`MAX_LABEL_FIELD`]; larger values are
//! clamped when rendering and reported by [`LabelFormat::check_limits`].

use alloc::format;
use alloc::string::{String, ToString};

use crate::error::PropertyError;

/// Largest width or precision a label format may request.
pub const MAX_LABEL_FIELD: usize = 128;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Conversion {
    Signed,
    Unsigned,
    Fixed { upper: bool },
    Exponent { upper: bool },
    General { upper: bool },
    Hex { upper: bool },
    Octal,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Flags {
    left: bool,
    plus: bool,
    space: bool,
    zero: bool,
    alternate: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Directive {
    flags: Flags,
    width: Option<usize>,
    precision: Option<usize>,
    conversion: Conversion,
}

/// A parsed label format, ready to render values.
///
/// Parsing never fails; malformed directives are kept as literal text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelFormat {
    prefix: String,
    directive: Option<Directive>,
    suffix: String,
    /// First width or precision that had to be clamped.
    oversized: Option<(&'static str, usize)>,
}

impl LabelFormat {
    /// Parses a printf-style format string.
    #[must_use]
    pub fn parse(format: &str) -> Self {
        let bytes = format.as_bytes();
        let mut prefix = String::new();
        let mut suffix = String::new();
        let mut directive = None;
        let mut literal_start = 0;
        let mut i = 0;

        while i < bytes.len() {
            if bytes[i] != b'%' {
                i += 1;
                continue;
            }
            let out = if directive.is_none() {
                &mut prefix
            } else {
                &mut suffix
            };
            out.push_str(&format[literal_start..i]);

            if bytes.get(i + 1) == Some(&b'%') {
                out.push('%');
                i += 2;
            } else if let Some((parsed, len)) = directive
                .is_none()
                .then(|| parse_directive(&bytes[i + 1..]))
                .flatten()
            {
                directive = Some(parsed);
                i += 1 + len;
            } else {
                out.push('%');
                i += 1;
            }
            literal_start = i;
        }

        let out = if directive.is_none() {
            &mut prefix
        } else {
            &mut suffix
        };
        out.push_str(&format[literal_start..]);

        let oversized = directive.as_ref().and_then(|(_, oversized)| *oversized);
        Self {
            prefix,
            directive: directive.map(|(directive, _)| directive),
            suffix,
            oversized,
        }
    }

    /// Fails if the directive asks for a width or precision above
    /// [`MAX_LABEL_FIELD`].
    pub fn check_limits(&self) -> Result<(), PropertyError> {
        match self.oversized {
            Some((field, value)) => Err(PropertyError::LabelFieldTooLarge {
                field,
                value,
                max: MAX_LABEL_FIELD,
            }),
            None => Ok(()),
        }
    }

    /// Returns `true` if the format contains a conversion directive.
    #[must_use]
    pub fn has_directive(&self) -> bool {
        self.directive.is_some()
    }

    /// Renders `value` with this format.
    #[must_use]
    pub fn format(&self, value: f32) -> String {
        let mut out = self.prefix.clone();
        if let Some(directive) = &self.directive {
            out.push_str(&directive.render(f64::from(value)));
        }
        out.push_str(&self.suffix);
        out
    }
}

fn parse_number(bytes: &[u8]) -> (Option<usize>, usize) {
    let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return (None, 0);
    }
    let value = bytes[..digits].iter().fold(0_usize, |acc, b| {
        acc.saturating_mul(10).saturating_add(usize::from(b - b'0'))
    });
    (Some(value), digits)
}

/// The directive following a `%`, its byte length, and the first field that
/// exceeded [`MAX_LABEL_FIELD`].
type ParsedDirective = ((Directive, Option<(&'static str, usize)>), usize);

/// Parses the directive following a `%`.
fn parse_directive(rest: &[u8]) -> Option<ParsedDirective> {
    let mut flags = Flags::default();
    let mut n = 0;
    while let Some(&b) = rest.get(n) {
        match b {
            b'-' => flags.left = true,
            b'+' => flags.plus = true,
            b' ' => flags.space = true,
            b'0' => flags.zero = true,
            b'#' => flags.alternate = true,
            _ => break,
        }
        n += 1;
    }

    let (width, used) = parse_number(&rest[n..]);
    n += used;

    let mut precision = None;
    if rest.get(n) == Some(&b'.') {
        n += 1;
        let (p, used) = parse_number(&rest[n..]);
        n += used;
        precision = Some(p.unwrap_or(0));
    }

    while matches!(
        rest.get(n),
        Some(b'h' | b'l' | b'L' | b'q' | b'j' | b'z' | b't')
    ) {
        n += 1;
    }

    let conversion = match rest.get(n)? {
        b'd' | b'i' => Conversion::Signed,
        b'u' => Conversion::Unsigned,
        b'f' => Conversion::Fixed { upper: false },
        b'F' => Conversion::Fixed { upper: true },
        b'e' => Conversion::Exponent { upper: false },
        b'E' => Conversion::Exponent { upper: true },
        b'g' => Conversion::General { upper: false },
        b'G' => Conversion::General { upper: true },
        b'x' => Conversion::Hex { upper: false },
        b'X' => Conversion::Hex { upper: true },
        b'o' => Conversion::Octal,
        _ => return None,
    };

    let oversized = [("width", width), ("precision", precision)]
        .into_iter()
        .find_map(|(field, value)| value.filter(|&v| v > MAX_LABEL_FIELD).map(|v| (field, v)));
    let clamp = |value: Option<usize>| value.map(|v| v.min(MAX_LABEL_FIELD));

    Some((
        (
            Directive {
                flags,
                width: clamp(width),
                precision: clamp(precision),
                conversion,
            },
            oversized,
        ),
        n + 1,
    ))
}

impl Directive {
    fn render(&self, value: f64) -> String {
        match self.conversion {
            Conversion::Signed => {
                let n = value as i64;
                let digits = self.min_digits(n.unsigned_abs().to_string());
                self.pad(self.sign(n < 0), &digits, self.precision.is_none())
            }
            Conversion::Unsigned => {
                // Negative values saturate to zero.
                let digits = self.min_digits((value as u64).to_string());
                self.pad("", &digits, self.precision.is_none())
            }
            Conversion::Hex { upper } => {
                let n = value as i32 as u32;
                let digits = if upper {
                    format!("{n:X}")
                } else {
                    format!("{n:x}")
                };
                let prefix = match (self.flags.alternate && n != 0, upper) {
                    (false, _) => "",
                    (true, false) => "0x",
                    (true, true) => "0X",
                };
                self.pad(prefix, &self.min_digits(digits), self.precision.is_none())
            }
            Conversion::Octal => {
                let n = value as i32 as u32;
                let mut digits = self.min_digits(format!("{n:o}"));
                if self.flags.alternate && !digits.starts_with('0') {
                    digits.insert(0, '0');
                }
                self.pad("", &digits, self.precision.is_none())
            }
            Conversion::Fixed { upper }
            | Conversion::Exponent { upper }
            | Conversion::General { upper } => {
                let negative = value.is_sign_negative() && !value.is_nan();
                if !value.is_finite() {
                    let text = match (value.is_nan(), upper) {
                        (true, false) => "nan",
                        (true, true) => "NAN",
                        (false, false) => "inf",
                        (false, true) => "INF",
                    };
                    return self.pad(self.sign(negative), text, false);
                }
                let body = self.float_body(value.abs(), upper);
                self.pad(self.sign(negative), &body, true)
            }
        }
    }

    fn float_body(&self, abs: f64, upper: bool) -> String {
        match self.conversion {
            Conversion::Exponent { .. } => {
                exponent_form(abs, self.precision.unwrap_or(6), upper, self.flags.alternate)
            }
            Conversion::General { .. } => {
                let p = match self.precision {
                    Some(0) => 1,
                    Some(p) => p,
                    None => 6,
                };
                // Bounded by MAX_LABEL_FIELD.
                let p_exp = i32::try_from(p).unwrap_or(i32::MAX);
                let exponent = if abs == 0.0 {
                    0
                } else {
                    decimal_exponent(&format!("{:.*e}", p - 1, abs))
                };
                let body = if exponent >= -4 && exponent < p_exp {
                    let decimals = usize::try_from(p_exp - 1 - exponent).unwrap_or(0);
                    fixed_form(abs, decimals, self.flags.alternate)
                } else {
                    exponent_form(abs, p - 1, upper, self.flags.alternate)
                };
                if self.flags.alternate {
                    body
                } else {
                    strip_trailing_zeros(&body)
                }
            }
            _ => fixed_form(abs, self.precision.unwrap_or(6), self.flags.alternate),
        }
    }

    fn sign(&self, negative: bool) -> &'static str {
        if negative {
            "-"
        } else if self.flags.plus {
            "+"
        } else if self.flags.space {
            " "
        } else {
            ""
        }
    }

    /// Applies integer precision (minimum digit count).
    fn min_digits(&self, digits: String) -> String {
        match self.precision {
            Some(p) if p > digits.len() => {
                let mut padded = "0".repeat(p - digits.len());
                padded.push_str(&digits);
                padded
            }
            _ => digits,
        }
    }

    fn pad(&self, sign: &str, body: &str, zero_allowed: bool) -> String {
        let len = sign.chars().count() + body.chars().count();
        let fill = match self.width {
            Some(width) if width > len => width - len,
            _ => return format!("{sign}{body}"),
        };
        if self.flags.left {
            format!("{sign}{body}{:fill$}", "")
        } else if self.flags.zero && zero_allowed {
            format!("{sign}{}{body}", "0".repeat(fill))
        } else {
            format!("{:fill$}{sign}{body}", "")
        }
    }
}

fn fixed_form(abs: f64, decimals: usize, alternate: bool) -> String {
    let mut s = format!("{abs:.decimals$}");
    if alternate && decimals == 0 {
        s.push('.');
    }
    s
}

fn decimal_exponent(rust_exp: &str) -> i32 {
    rust_exp
        .split_once('e')
        .and_then(|(_, exp)| exp.parse().ok())
        .unwrap_or(0)
}

/// C-style exponent notation: at least two exponent digits, explicit sign.
fn exponent_form(abs: f64, decimals: usize, upper: bool, alternate: bool) -> String {
    let s = format!("{abs:.decimals$e}");
    let (mantissa, _) = s.split_once('e').unwrap_or((&s, "0"));
    let exponent = decimal_exponent(&s);
    let dot = if alternate && decimals == 0 { "." } else { "" };
    format!(
        "{mantissa}{dot}{}{}{:02}",
        if upper { 'E' } else { 'e' },
        if exponent < 0 { '-' } else { '+' },
        exponent.unsigned_abs()
    )
}

fn strip_trailing_zeros(body: &str) -> String {
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(at) => body.split_at(at),
        None => (body, ""),
    };
    if !mantissa.contains('.') {
        return body.to_string();
    }
    let trimmed = mantissa.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed}{exponent}")
}
