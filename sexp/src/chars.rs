//! Character classes of the s-expression grammar.

/// Punctuation allowed in tokens besides letters and digits.
const TOKEN_PUNCTUATION: &[u8] = b"-./_:*+=";

pub(crate) const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

pub(crate) const BASE64_DIGITS: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

#[inline]
pub(crate) fn is_white_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | 0x0b | b'\r' | 0x0c)
}

/// Space or tab: whitespace that does not end a line.
#[inline]
pub(crate) fn is_blank(c: u8) -> bool {
    c == b' ' || c == b'\t'
}

#[inline]
pub(crate) fn is_line_break(c: u8) -> bool {
    c == b'\n' || c == b'\r'
}

#[inline]
pub(crate) fn is_dec_digit(c: u8) -> bool {
    c.is_ascii_digit()
}

#[inline]
pub(crate) fn is_hex_digit(c: u8) -> bool {
    c.is_ascii_hexdigit()
}

#[inline]
pub(crate) fn is_base64_digit(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'+' || c == b'/'
}

#[inline]
pub(crate) fn is_token_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || TOKEN_PUNCTUATION.contains(&c)
}

#[inline]
pub(crate) fn is_alpha(c: u8) -> bool {
    c.is_ascii_alphabetic()
}

/// Characters allowed after the first letter of an extended key field name.
#[inline]
pub(crate) fn is_name_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'-'
}

pub(crate) fn dec_value(c: u8) -> u32 {
    u32::from(c - b'0')
}

pub(crate) fn hex_value(c: u8) -> u32 {
    match c {
        b'0'..=b'9' => u32::from(c - b'0'),
        b'a'..=b'f' => u32::from(c - b'a' + 10),
        b'A'..=b'F' => u32::from(c - b'A' + 10),
        _ => 0,
    }
}

pub(crate) fn base64_value(c: u8) -> u32 {
    match c {
        b'A'..=b'Z' => u32::from(c - b'A'),
        b'a'..=b'z' => u32::from(c - b'a' + 26),
        b'0'..=b'9' => u32::from(c - b'0' + 52),
        b'+' => 62,
        b'/' => 63,
        _ => 0,
    }
}

/// Renders a byte for use in diagnostics.
pub(crate) fn describe(c: u8) -> String {
    if c.is_ascii_graphic() || c == b' ' {
        format!("'{}' (0x{:02x})", c as char, c)
    } else {
        format!("0x{:02x}", c)
    }
}
