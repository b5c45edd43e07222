//! Exact fixed-point decimals stored as digit strings
//!
//! An [`ExactDecimal`] is a sign, an integer digit string and a fraction digit string. Addition,
//! subtraction and multiplication operate on the digits directly, so results carry no binary
//! floating-point error. Division is not provided.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;
use thiserror::Error;

/// Errors from parsing a decimal literal
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecimalParseError {
    #[error("empty decimal literal")]
    Empty,

    /// `position` counts characters, not bytes, from the start of the literal
    #[error("invalid character {ch:?} at position {position}")]
    InvalidCharacter { ch: char, position: usize },

    /// An integer or fraction part with no digits, as in `"-"`, `".5"` or `"1."`
    #[error("missing digits in decimal literal {0:?}")]
    MissingDigits(String),
}

/// A signed decimal number with an exact digit representation
///
/// Values are kept canonical: the integer digits have no leading zeros (a lone `"0"` for zero),
/// the fraction digits have no trailing zeros (a lone `"0"` when there is no fractional part), and
/// zero is never negative. Equality is therefore value equality: `1.50` equals `1.5`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExactDecimal {
    negative: bool,
    integer: String,
    fraction: String,
}

fn add_digits(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(a.len().max(b.len()) + 1);
    let mut ia = a.iter().rev();
    let mut ib = b.iter().rev();
    let mut carry = 0;
    loop {
        let (x, y) = match (ia.next(), ib.next()) {
            (None, None) => break,
            (x, y) => (x.copied().unwrap_or(0), y.copied().unwrap_or(0)),
        };
        let s = x + y + carry;
        out.push(s % 10);
        carry = s / 10;
    }
    if carry > 0 {
        out.push(carry);
    }
    out.reverse();
    out
}

/// `a - b` for digit strings with `a >= b`
fn sub_digits(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(a.len());
    let mut ib = b.iter().rev();
    let mut borrow = 0;
    for &x in a.iter().rev() {
        let y = ib.next().copied().unwrap_or(0) + borrow;
        if x >= y {
            out.push(x - y);
            borrow = 0;
        } else {
            out.push(x + 10 - y);
            borrow = 1;
        }
    }
    debug_assert_eq!(borrow, 0);
    out.reverse();
    out
}

fn mul_digits(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut acc = vec![0u32; a.len() + b.len()];
    for (i, &x) in a.iter().rev().enumerate() {
        for (j, &y) in b.iter().rev().enumerate() {
            acc[i + j] += u32::from(x) * u32::from(y);
        }
    }
    let mut carry = 0;
    for d in acc.iter_mut() {
        let v = *d + carry;
        *d = v % 10;
        carry = v / 10;
    }
    acc.iter().rev().map(|&d| d as u8).collect()
}

fn digits_to_string(digits: &[u8]) -> String {
    digits.iter().map(|&d| char::from(b'0' + d)).collect()
}

impl ExactDecimal {
    /// Builds a canonical value from raw integer and fraction digit strings
    fn from_digits(negative: bool, integer: &str, fraction: &str) -> Self {
        let integer = match integer.trim_start_matches('0') {
            "" => "0",
            s => s,
        };
        let fraction = match fraction.trim_end_matches('0') {
            "" => "0",
            s => s,
        };
        ExactDecimal {
            negative: negative && !(integer == "0" && fraction == "0"),
            integer: integer.to_string(),
            fraction: fraction.to_string(),
        }
    }

    /// Builds a value from the digits of `|value| * 10^scale`, most significant first
    fn from_scaled(negative: bool, digits: &[u8], scale: usize) -> Self {
        let mut padded = vec![0u8; (scale + 1).saturating_sub(digits.len())];
        padded.extend_from_slice(digits);
        let split = padded.len() - scale;
        Self::from_digits(
            negative,
            &digits_to_string(&padded[..split]),
            &digits_to_string(&padded[split..]),
        )
    }

    pub fn zero() -> Self {
        Self::from_digits(false, "0", "0")
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.integer == "0" && self.fraction == "0"
    }

    #[inline]
    pub fn integer_digits(&self) -> &str {
        &self.integer
    }

    #[inline]
    pub fn fraction_digits(&self) -> &str {
        &self.fraction
    }

    /// Number of significant fraction digits, 0 for a whole number
    pub fn scale(&self) -> usize {
        if self.fraction == "0" {
            0
        } else {
            self.fraction.len()
        }
    }

    pub fn abs(&self) -> Self {
        ExactDecimal {
            negative: false,
            ..self.clone()
        }
    }

    /// Digits of `|self| * 10^scale`, most significant first; `scale` must be at least
    /// `self.scale()`
    fn scaled_digits(&self, scale: usize) -> Vec<u8> {
        let fraction = &self.fraction.as_bytes()[..self.scale()];
        let mut digits: Vec<u8> = self
            .integer
            .bytes()
            .chain(fraction.iter().copied())
            .map(|b| b - b'0')
            .collect();
        digits.resize(self.integer.len() + scale, 0);
        digits
    }

    fn cmp_magnitude(&self, other: &Self) -> Ordering {
        self.integer
            .len()
            .cmp(&other.integer.len())
            .then_with(|| self.integer.cmp(&other.integer))
            .then_with(|| self.fraction.cmp(&other.fraction))
    }

    /// `|a| + |b|`, with the given sign
    fn add_magnitudes(a: &Self, b: &Self, negative: bool) -> Self {
        let scale = a.scale().max(b.scale());
        let digits = add_digits(&a.scaled_digits(scale), &b.scaled_digits(scale));
        Self::from_scaled(negative, &digits, scale)
    }

    /// `|a| - |b|`
    fn sub_magnitudes(a: &Self, b: &Self) -> Self {
        let scale = a.scale().max(b.scale());
        let (x, y) = (a.scaled_digits(scale), b.scaled_digits(scale));
        match a.cmp_magnitude(b) {
            Ordering::Less => Self::from_scaled(true, &sub_digits(&y, &x), scale),
            _ => Self::from_scaled(false, &sub_digits(&x, &y), scale),
        }
    }
}

impl Default for ExactDecimal {
    fn default() -> Self {
        Self::zero()
    }
}

impl FromStr for ExactDecimal {
    type Err = DecimalParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(DecimalParseError::Empty);
        }
        let (negative, body, offset) = match s.strip_prefix('-') {
            Some(rest) => (true, rest, 1),
            None => (false, s, 0),
        };
        let (integer, fraction) = match body.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (body, None),
        };

        for (position, (byte, ch)) in body.char_indices().enumerate() {
            let is_point = ch == '.' && byte == integer.len();
            if !ch.is_ascii_digit() && !is_point {
                return Err(DecimalParseError::InvalidCharacter {
                    ch,
                    position: offset + position,
                });
            }
        }
        if integer.is_empty() || fraction == Some("") {
            return Err(DecimalParseError::MissingDigits(s.to_string()));
        }

        Ok(Self::from_digits(negative, integer, fraction.unwrap_or("")))
    }
}

impl TryFrom<String> for ExactDecimal {
    type Error = DecimalParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ExactDecimal> for String {
    fn from(d: ExactDecimal) -> Self {
        d.to_string()
    }
}

impl fmt::Display for ExactDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        write!(f, "{}.{}", self.integer, self.fraction)
    }
}

impl Ord for ExactDecimal {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => self.cmp_magnitude(other),
            (true, true) => other.cmp_magnitude(self),
        }
    }
}

impl PartialOrd for ExactDecimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Neg for &ExactDecimal {
    type Output = ExactDecimal;

    fn neg(self) -> Self::Output {
        ExactDecimal {
            negative: !self.negative && !self.is_zero(),
            ..self.clone()
        }
    }
}

impl Neg for ExactDecimal {
    type Output = ExactDecimal;

    fn neg(self) -> Self::Output {
        -&self
    }
}

impl Add for &ExactDecimal {
    type Output = ExactDecimal;

    fn add(self, rhs: Self) -> Self::Output {
        match (self.negative, rhs.negative) {
            (true, true) => ExactDecimal::add_magnitudes(self, rhs, true),
            (false, true) => ExactDecimal::sub_magnitudes(self, rhs),
            (true, false) => ExactDecimal::sub_magnitudes(rhs, self),
            (false, false) => ExactDecimal::add_magnitudes(self, rhs, false),
        }
    }
}

impl Sub for &ExactDecimal {
    type Output = ExactDecimal;

    fn sub(self, rhs: Self) -> Self::Output {
        match (self.negative, rhs.negative) {
            (true, true) => ExactDecimal::sub_magnitudes(rhs, self),
            (false, true) => ExactDecimal::add_magnitudes(self, rhs, false),
            (true, false) => ExactDecimal::add_magnitudes(self, rhs, true),
            (false, false) => ExactDecimal::sub_magnitudes(self, rhs),
        }
    }
}

impl Mul for &ExactDecimal {
    type Output = ExactDecimal;

    fn mul(self, rhs: Self) -> Self::Output {
        let digits = mul_digits(
            &self.scaled_digits(self.scale()),
            &rhs.scaled_digits(rhs.scale()),
        );
        ExactDecimal::from_scaled(
            self.negative != rhs.negative,
            &digits,
            self.scale() + rhs.scale(),
        )
    }
}

impl Add for ExactDecimal {
    type Output = ExactDecimal;

    fn add(self, rhs: Self) -> Self::Output {
        &self + &rhs
    }
}

impl Sub for ExactDecimal {
    type Output = ExactDecimal;

    fn sub(self, rhs: Self) -> Self::Output {
        &self - &rhs
    }
}

impl Mul for ExactDecimal {
    type Output = ExactDecimal;

    fn mul(self, rhs: Self) -> Self::Output {
        &self * &rhs
    }
}
