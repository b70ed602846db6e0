//! Simple strings: the atoms of an s-expression.
use std::fmt;
use std::ops::Deref;

use crate::chars::{is_dec_digit, is_token_char};

/// A sequence of raw octets with no implied text encoding.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SimpleString(Vec<u8>);

impl SimpleString {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        SimpleString(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub(crate) fn push(&mut self, c: u8) {
        self.0.push(c);
    }

    /// Whether the string may be written as a bare token.
    ///
    /// Tokens must not be empty, must not start with a decimal digit and
    /// must consist of token characters only.
    pub fn is_token(&self) -> bool {
        match self.0.first() {
            None => false,
            Some(&first) if is_dec_digit(first) => false,
            Some(_) => self.0.iter().all(|&c| is_token_char(c)),
        }
    }

    /// Whether the string may be written between double quotes without
    /// any escape sequence.
    pub fn is_quotable(&self) -> bool {
        self.0.iter().all(|&c| is_token_char(c) || c == b' ')
    }

    pub fn token_len(&self) -> usize {
        self.0.len()
    }

    pub fn quoted_len(&self) -> usize {
        2 + self.0.len()
    }

    pub fn hex_len(&self) -> usize {
        2 + 2 * self.0.len()
    }

    pub fn base64_len(&self) -> usize {
        2 + 4 * ((self.0.len() + 2) / 3)
    }

    pub fn verbatim_len(&self) -> usize {
        decimal_len(self.0.len()) + 1 + self.0.len()
    }
}

/// Number of characters in the decimal rendering of `n`.
pub(crate) fn decimal_len(n: usize) -> usize {
    let mut n = n;
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

impl Deref for SimpleString {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[u8]> for SimpleString {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for SimpleString {
    fn from(bytes: Vec<u8>) -> Self {
        SimpleString(bytes)
    }
}

impl From<&[u8]> for SimpleString {
    fn from(bytes: &[u8]) -> Self {
        SimpleString(bytes.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for SimpleString {
    fn from(bytes: &[u8; N]) -> Self {
        SimpleString(bytes.to_vec())
    }
}

impl From<&str> for SimpleString {
    fn from(s: &str) -> Self {
        SimpleString(s.as_bytes().to_vec())
    }
}

impl fmt::Debug for SimpleString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b\"")?;
        for &b in &self.0 {
            match b {
                b'"' => write!(f, "\\\"")?,
                b'\\' => write!(f, "\\\\")?,
                0x20..=0x7e => write!(f, "{}", b as char)?,
                _ => write!(f, "\\x{:02x}", b)?,
            }
        }
        write!(f, "\"")
    }
}
