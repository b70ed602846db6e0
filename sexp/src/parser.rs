//! Parse s-expressions from a byte stream.
//!
//! The [`InputStream`] reads its source one byte at a time, keeping a
//! single byte of lookahead. Inside hexadecimal (`#...#`) and base64
//! (`|...|`, `{...}`) regions it reassembles 8-bit bytes from 4-bit or
//! 6-bit digits, so the scanner above it always sees plain bytes.
use std::io::{self, Read};

use log::{trace, warn};

use crate::chars::{
    base64_value, dec_value, describe, hex_value, is_base64_digit, is_dec_digit, is_hex_digit,
    is_token_char, is_white_space,
};
use crate::error::{Error, ErrorKind, Result};
use crate::escape::unescape;
use crate::options::Options;
use crate::string::SimpleString;
use crate::value::{Sexp, SexpString};

/// Longest accepted decimal length prefix, in digits.
pub const MAX_DECIMAL_DIGITS: usize = 9;

/// Upper bound on the buffer reserved up front for a declared length.
const PREALLOCATION_LIMIT: usize = 4096;

/// Number of bits carried by each input or output unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ByteSize {
    Eight,
    Six,
    Four,
}

impl ByteSize {
    pub(crate) fn bits(self) -> u32 {
        match self {
            ByteSize::Eight => 8,
            ByteSize::Six => 6,
            ByteSize::Four => 4,
        }
    }
}

/// A stream of bytes that s-expressions are scanned from.
pub struct InputStream<R> {
    input: io::Bytes<R>,
    next_char: Option<u8>,
    position: usize,
    byte_size: ByteSize,
    bits: u32,
    n_bits: u32,
    depth: usize,
    options: Options,
    warnings: Vec<Error>,
}

impl<R: Read> InputStream<R> {
    pub fn new(input: R, options: Options) -> Self {
        InputStream {
            input: input.bytes(),
            // Whitespace stands in for the byte before the first one, so
            // that scanning starts by reading.
            next_char: Some(b' '),
            position: 0,
            byte_size: ByteSize::Eight,
            bits: 0,
            n_bits: 0,
            depth: 0,
            options,
            warnings: Vec::new(),
        }
    }

    /// Number of bytes read from the source so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Warnings raised so far.
    pub fn warnings(&self) -> &[Error] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<Error> {
        self.warnings
    }

    /// The lookahead byte, or `None` at the end of the input.
    #[inline]
    pub fn next_char(&self) -> Option<u8> {
        self.next_char
    }

    pub(crate) fn error(&self, kind: ErrorKind, message: impl std::fmt::Display) -> Error {
        Error::new(kind, message, self.position)
    }

    /// Records a warning, or fails with it when warnings are errors.
    pub(crate) fn warning(&mut self, kind: ErrorKind, message: impl std::fmt::Display) -> Result<()> {
        let warning = Error::warning(kind, message, self.position);
        if self.options.warnings_are_errors {
            return Err(warning.promote());
        }
        warn!("{}", warning);
        self.warnings.push(warning);
        Ok(())
    }

    fn set_byte_size(&mut self, byte_size: ByteSize) {
        if byte_size != self.byte_size {
            trace!("input switches to {}-bit units at position {}", byte_size.bits(), self.position);
        }
        self.byte_size = byte_size;
        self.bits = 0;
        self.n_bits = 0;
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        match self.input.next() {
            None => Ok(None),
            Some(Ok(c)) => {
                self.position += 1;
                Ok(Some(c))
            }
            Some(Err(err)) => Err(Error::io(err, self.position)),
        }
    }

    /// Advances the lookahead by one byte.
    ///
    /// In 4-bit and 6-bit regions this consumes as many digits as needed
    /// to assemble the next byte. Reaching the region's closing delimiter
    /// returns to 8-bit mode with the delimiter as the lookahead.
    pub fn get_char(&mut self) -> Result<()> {
        if self.next_char.is_none() {
            self.set_byte_size(ByteSize::Eight);
            return Ok(());
        }

        loop {
            let Some(c) = self.read_byte()? else {
                self.next_char = None;
                return Ok(());
            };
            self.next_char = Some(c);

            let byte_size = self.byte_size;
            if byte_size == ByteSize::Eight {
                return Ok(());
            }

            let closes = match byte_size {
                ByteSize::Six => c == b'|' || c == b'}',
                _ => c == b'#',
            };
            if closes {
                if self.n_bits > 0 && self.bits & ((1 << self.n_bits) - 1) != 0 {
                    let message = format!(
                        "{}-bit region ended with {} unused bits left-over",
                        byte_size.bits(),
                        self.n_bits
                    );
                    self.warning(ErrorKind::UnusedBits, message)?;
                }
                self.set_byte_size(ByteSize::Eight);
                return Ok(());
            }

            if is_white_space(c) || (byte_size == ByteSize::Six && c == b'=') {
                continue;
            }

            let value = match byte_size {
                ByteSize::Six if is_base64_digit(c) => base64_value(c),
                ByteSize::Four if is_hex_digit(c) => hex_value(c),
                _ => {
                    return Err(self.error(
                        ErrorKind::IllegalCharacter,
                        format!(
                            "character {} found in {}-bit coding region",
                            describe(c),
                            byte_size.bits()
                        ),
                    ))
                }
            };

            self.bits = ((self.bits << byte_size.bits()) | value) & 0xffff;
            self.n_bits += byte_size.bits();
            if self.n_bits >= 8 {
                self.n_bits -= 8;
                self.next_char = Some(((self.bits >> self.n_bits) & 0xff) as u8);
                return Ok(());
            }
        }
    }

    pub fn skip_white_space(&mut self) -> Result<()> {
        while matches!(self.next_char, Some(c) if is_white_space(c)) {
            self.get_char()?;
        }
        Ok(())
    }

    /// Whether only whitespace remains.
    pub fn at_eof(&mut self) -> Result<bool> {
        self.skip_white_space()?;
        Ok(self.next_char.is_none())
    }

    fn skip_char(&mut self, expected: u8) -> Result<()> {
        match self.next_char {
            Some(c) if c == expected => self.get_char(),
            Some(c) => Err(self.error(
                ErrorKind::IllegalCharacter,
                format!(
                    "character {} found where '{}' was expected",
                    describe(c),
                    expected as char
                ),
            )),
            None => Err(self.error(
                ErrorKind::UnexpectedEof,
                format!("unexpected end of file where '{}' was expected", expected as char),
            )),
        }
    }

    fn increase_depth(&mut self) -> Result<()> {
        let max_depth = self.options.max_depth;
        if max_depth != 0 && self.depth >= max_depth {
            return Err(self.error(
                ErrorKind::DepthExceeded,
                format!("maximum allowed list depth ({}) is exceeded", max_depth),
            ));
        }
        self.depth += 1;
        trace!("list opens at depth {} at position {}", self.depth, self.position);
        Ok(())
    }

    fn decrease_depth(&mut self) {
        self.depth -= 1;
    }

    /// Scans one object: a list, a string, or a `{...}` base64 transport
    /// region holding one object.
    ///
    /// Lists are collected on an explicit stack, so the nesting depth
    /// costs heap memory rather than call stack.
    pub fn scan_object(&mut self) -> Result<Sexp> {
        // Lists opened but not yet closed, innermost last.
        let mut open: Vec<Vec<Sexp>> = Vec::new();
        loop {
            self.skip_white_space()?;
            let object = match self.next_char {
                Some(b'(') => {
                    self.increase_depth()?;
                    self.skip_char(b'(')?;
                    open.push(Vec::new());
                    continue;
                }
                Some(b')') => {
                    let Some(items) = open.pop() else {
                        return Err(self.error(
                            ErrorKind::IllegalCharacter,
                            "character ')' found outside of a list",
                        ));
                    };
                    self.skip_char(b')')?;
                    self.decrease_depth();
                    Sexp::List(items)
                }
                Some(b'{') if self.byte_size != ByteSize::Six => self.scan_transport()?,
                _ => Sexp::String(self.scan_string()?),
            };

            match open.last_mut() {
                Some(items) => items.push(object),
                None => return Ok(object),
            }
        }
    }

    /// Scans a `{...}` region. Within it `{` is not a base64 digit, so
    /// regions do not nest.
    fn scan_transport(&mut self) -> Result<Sexp> {
        self.set_byte_size(ByteSize::Six);
        self.skip_char(b'{')?;
        let object = self.scan_object()?;
        self.skip_white_space()?;
        if self.byte_size != ByteSize::Eight && self.next_char.is_some() {
            return Err(self.error(
                ErrorKind::IllegalCharacter,
                "base64 transport region holds more than one object",
            ));
        }
        self.skip_char(b'}')?;
        Ok(object)
    }

    fn scan_string(&mut self) -> Result<SexpString> {
        if self.next_char != Some(b'[') {
            return Ok(SexpString::new(self.scan_simple_string()?));
        }

        self.skip_char(b'[')?;
        let hint = self.scan_simple_string()?;
        self.skip_white_space()?;
        self.skip_char(b']')?;
        let value = self.scan_simple_string()?;
        Ok(SexpString::with_hint(value, hint))
    }

    fn scan_simple_string(&mut self) -> Result<SimpleString> {
        self.skip_white_space()?;

        // Tokens are tried first, so a token may begin with ':'.
        let string = match self.next_char {
            Some(c) if is_token_char(c) && !is_dec_digit(c) => self.scan_token()?,
            _ => {
                let length = match self.next_char {
                    Some(c) if is_dec_digit(c) => Some(self.scan_decimal()?),
                    _ => None,
                };
                match (self.next_char, length) {
                    (Some(b'"'), _) => self.scan_quoted_string(length)?,
                    (Some(b'#'), _) => self.scan_hex_string(length)?,
                    (Some(b'|'), _) => self.scan_base64_string(length)?,
                    (Some(b':'), Some(length)) => self.scan_verbatim_string(length)?,
                    (Some(b':'), None) => {
                        return Err(self.error(
                            ErrorKind::MissingLength,
                            "verbatim string had no declared length",
                        ))
                    }
                    (Some(c), _) => {
                        return Err(self.error(
                            ErrorKind::IllegalCharacter,
                            format!("illegal character {} at the start of a string", describe(c)),
                        ))
                    }
                    (None, _) => {
                        return Err(self.error(ErrorKind::UnexpectedEof, "unexpected end of file"))
                    }
                }
            }
        };

        if string.is_empty() {
            self.warning(ErrorKind::ZeroLength, "simple string has zero length")?;
        }
        Ok(string)
    }

    fn scan_token(&mut self) -> Result<SimpleString> {
        let mut token = SimpleString::default();
        while let Some(c) = self.next_char.filter(|&c| is_token_char(c)) {
            token.push(c);
            self.get_char()?;
        }
        Ok(token)
    }

    fn scan_decimal(&mut self) -> Result<usize> {
        let mut value = 0usize;
        let mut digits = 0;
        while let Some(c) = self.next_char.filter(|&c| is_dec_digit(c)) {
            digits += 1;
            if digits > MAX_DECIMAL_DIGITS {
                return Err(self.error(
                    ErrorKind::DecimalTooLong,
                    format!("decimal number is longer than {} digits", MAX_DECIMAL_DIGITS),
                ));
            }
            value = value * 10 + dec_value(c) as usize;
            self.get_char()?;
        }
        Ok(value)
    }

    fn scan_verbatim_string(&mut self, length: usize) -> Result<SimpleString> {
        self.skip_char(b':')?;
        let mut string = Vec::with_capacity(length.min(PREALLOCATION_LIMIT));
        while string.len() < length {
            let Some(c) = self.next_char else {
                return Err(self.error(
                    ErrorKind::UnexpectedEof,
                    format!(
                        "unexpected end of file after {} of {} verbatim bytes",
                        string.len(),
                        length
                    ),
                ));
            };
            string.push(c);
            self.get_char()?;
        }
        Ok(string.into())
    }

    fn scan_quoted_string(&mut self, length: Option<usize>) -> Result<SimpleString> {
        self.skip_char(b'"')?;

        // Raw contents up to the closing quote, with the positions they were read at.
        let mut raw = Vec::new();
        let mut positions = Vec::new();
        loop {
            let Some(c) = self.next_char else {
                return Err(self.error(ErrorKind::UnexpectedEof, "unterminated quoted string"));
            };
            if c == b'"' {
                break;
            }

            raw.push(c);
            positions.push(self.position);
            self.get_char()?;

            if c == b'\\' {
                let Some(escaped) = self.next_char else {
                    return Err(self.error(ErrorKind::BadEscape, "unterminated escape sequence"));
                };
                raw.push(escaped);
                positions.push(self.position);
                self.get_char()?;
            }
        }

        let string = unescape(&raw).map_err(|err| {
            let position = positions.get(err.offset).copied().unwrap_or(self.position);
            Error::new(ErrorKind::BadEscape, err.message, position)
        })?;

        if let Some(length) = length {
            if string.len() != length {
                return Err(self.error(
                    ErrorKind::LengthMismatch,
                    format!(
                        "declared length was {}, but quoted string holds {} bytes",
                        length,
                        string.len()
                    ),
                ));
            }
        }

        self.skip_char(b'"')?;
        Ok(string.into())
    }

    fn scan_hex_string(&mut self, length: Option<usize>) -> Result<SimpleString> {
        self.scan_region(ByteSize::Four, b'#', "hexadecimal", length)
    }

    fn scan_base64_string(&mut self, length: Option<usize>) -> Result<SimpleString> {
        self.scan_region(ByteSize::Six, b'|', "base64", length)
    }

    /// Scans a string of 4-bit or 6-bit digits between `delimiter`s.
    fn scan_region(
        &mut self,
        byte_size: ByteSize,
        delimiter: u8,
        name: &str,
        length: Option<usize>,
    ) -> Result<SimpleString> {
        if self.byte_size != ByteSize::Eight {
            return Err(self.error(
                ErrorKind::IllegalCharacter,
                format!("{} string inside a base64 region", name),
            ));
        }

        self.set_byte_size(byte_size);
        self.skip_char(delimiter)?;

        let mut string = SimpleString::default();
        while self.byte_size == byte_size {
            let Some(c) = self.next_char else { break };
            string.push(c);
            self.get_char()?;
        }
        self.skip_char(delimiter)?;

        if let Some(length) = length {
            if string.len() != length {
                let message = format!(
                    "{} string has declared length {}, but actual length {}",
                    name,
                    length,
                    string.len()
                );
                self.warning(ErrorKind::LengthMismatch, message)?;
            }
        }
        Ok(string)
    }

    /// Treats everything up to the end of the input as one string.
    pub fn scan_to_eof(&mut self) -> Result<Sexp> {
        self.skip_white_space()?;
        let mut string = SimpleString::default();
        while let Some(c) = self.next_char {
            string.push(c);
            self.get_char()?;
        }
        Ok(Sexp::String(SexpString::new(string)))
    }

    /// Fails unless only whitespace remains.
    pub fn expect_eof(&mut self) -> Result<()> {
        self.skip_white_space()?;
        match self.next_char {
            None => Ok(()),
            Some(c) => Err(self.error(
                ErrorKind::IllegalCharacter,
                format!("unexpected character {} after the object", describe(c)),
            )),
        }
    }
}

/// Parses one object from the head of `input`.
pub fn parse<R: Read>(input: R) -> Result<Sexp> {
    parse_with_options(input, Options::default())
}

pub fn parse_with_options<R: Read>(input: R, options: Options) -> Result<Sexp> {
    InputStream::new(input, options).scan_object()
}

/// Parses `data` as exactly one object, optionally followed by whitespace.
pub fn from_bytes(data: &[u8]) -> Result<Sexp> {
    let mut stream = InputStream::new(data, Options::default());
    let object = stream.scan_object()?;
    stream.expect_eof()?;
    Ok(object)
}

/// Reads all of `input`, less leading whitespace, as one string.
pub fn parse_to_eof<R: Read>(input: R) -> Result<Sexp> {
    InputStream::new(input, Options::default()).scan_to_eof()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::options::DEFAULT_MAX_DEPTH;
    use crate::{to_advanced, to_base64, to_canonical};
    use rstest::rstest;

    fn list(items: Vec<Sexp>) -> Sexp {
        Sexp::List(items)
    }

    fn scan(data: &[u8], options: Options) -> (Result<Sexp>, Vec<ErrorKind>) {
        let mut stream = InputStream::new(data, options);
        let result = stream.scan_object();
        let warnings = stream.warnings().iter().map(Error::kind).collect();
        (result, warnings)
    }

    #[test]
    fn test_canonical() {
        assert_eq!(list(vec!["foo".into(), "bar".into()]), from_bytes(b"(3:foo3:bar)").unwrap());
        assert_eq!(list(vec![]), from_bytes(b"()").unwrap());
        assert_eq!(Sexp::from("hi"), from_bytes(b"2:hi").unwrap());
        assert_eq!(
            Sexp::from(SexpString::with_hint("hi", "fancy")),
            from_bytes(b"[5:fancy]2:hi").unwrap()
        );
        assert_eq!(
            list(vec![
                "sig-val".into(),
                list(vec!["rsa".into(), list(vec!["s".into(), "abc".into()])]),
            ]),
            from_bytes(b"(7:sig-val(3:rsa(1:s3:abc)))").unwrap()
        );
    }

    #[test]
    fn test_verbatim_keeps_raw_bytes() {
        let parsed = from_bytes(b"(4:\x00\")(\n2: \xff)").unwrap();
        assert_eq!(
            list(vec![(&b"\x00\")("[..]).into(), (&b" \xff"[..]).into()]),
            parsed
        );
    }

    #[test]
    fn test_advanced() {
        assert_eq!(
            list(vec!["foo".into(), "bar baz".into()]),
            from_bytes(br#"(foo "bar baz")"#).unwrap()
        );
        assert_eq!(
            list(vec![SexpString::with_hint("hello world", "text/plain").into(), "x".into()]),
            from_bytes(b"( [text/plain] \"hello world\"\n\tx )").unwrap()
        );
        assert_eq!(Sexp::from(":colon"), from_bytes(b":colon").unwrap());
    }

    #[rstest]
    #[case(b"#616263#", b"abc")]
    #[case(b"#61 62\n63#", b"abc")]
    #[case(b"#4a4B#", b"JK")]
    #[case(b"3#616263#", b"abc")]
    #[case(b"|YWJj|", b"abc")]
    #[case(b"|YQ==|", b"a")]
    #[case(b"|YW\n Jj|", b"abc")]
    #[case(b"5|AAECAwQ=|", b"\x00\x01\x02\x03\x04")]
    #[case(br#""a\x41\101\n""#, b"aAA\n")]
    #[case(br#"3"abc""#, b"abc")]
    #[case(b"\"one\\\ntwo\"", b"onetwo")]
    #[case(br#""it\'s \"quoted\"""#, b"it's \"quoted\"")]
    fn test_simple_string_encodings(#[case] input: &[u8], #[case] expected: &[u8]) {
        assert_eq!(Sexp::from(expected), from_bytes(input).unwrap());
    }

    #[test]
    fn test_base64_transport() {
        let expected = list(vec!["foo".into(), "bar".into()]);
        assert_eq!(expected, from_bytes(b"{KDM6Zm9vMzpiYXIp}").unwrap());
        assert_eq!(expected, from_bytes(b" {KDM6Zm9v\n MzpiYXIp} ").unwrap());
        assert_eq!(
            list(vec!["x".into(), list(vec!["foo".into(), "bar".into()])]),
            from_bytes(b"(x {KDM6Zm9vMzpiYXIp})").unwrap()
        );
    }

    #[rstest]
    #[case(b"", ErrorKind::UnexpectedEof)]
    #[case(b"(", ErrorKind::UnexpectedEof)]
    #[case(b"(2:hi", ErrorKind::UnexpectedEof)]
    #[case(b"5:abc", ErrorKind::UnexpectedEof)]
    #[case(b"\"abc", ErrorKind::UnexpectedEof)]
    #[case(b"#6162", ErrorKind::UnexpectedEof)]
    #[case(b")", ErrorKind::IllegalCharacter)]
    #[case(b"(2:hi)(2:hi)", ErrorKind::IllegalCharacter)]
    #[case(b"([2:hi])", ErrorKind::IllegalCharacter)]
    #[case(b"#61x2#", ErrorKind::IllegalCharacter)]
    #[case(b"|YW*j|", ErrorKind::IllegalCharacter)]
    #[case(b"3a", ErrorKind::IllegalCharacter)]
    #[case(b"1234567890:x", ErrorKind::DecimalTooLong)]
    #[case(br#""\q""#, ErrorKind::BadEscape)]
    #[case(br#""\400""#, ErrorKind::BadEscape)]
    #[case(br#"4"abc""#, ErrorKind::LengthMismatch)]
    #[case(br#"2"abc""#, ErrorKind::LengthMismatch)]
    #[case(b"{KDM6YWJjKX0=}", ErrorKind::IllegalCharacter)]
    #[case(b"{#616263#}", ErrorKind::IllegalCharacter)]
    fn test_errors(#[case] input: &[u8], #[case] kind: ErrorKind) {
        assert_eq!(kind, from_bytes(input).unwrap_err().kind());
    }

    #[test]
    fn test_error_position() {
        let err = from_bytes(b"(3:abc ])").unwrap_err();
        assert_eq!(ErrorKind::IllegalCharacter, err.kind());
        assert_eq!(8, err.position());
        assert!(err.to_string().starts_with("SEXP ERROR: illegal character ']'"));

        let err = from_bytes(br#""ab\qc""#).unwrap_err();
        assert_eq!(4, err.position());
    }

    #[test]
    fn test_nine_digit_length() {
        let err = from_bytes(b"999999999:abc").unwrap_err();
        assert_eq!(ErrorKind::UnexpectedEof, err.kind());
    }

    fn nested(depth: usize) -> Vec<u8> {
        let mut input = vec![b'('; depth];
        input.extend(std::iter::repeat(b')').take(depth));
        input
    }

    #[test]
    fn test_depth_guard() {
        let err = from_bytes(&nested(DEFAULT_MAX_DEPTH + 1)).unwrap_err();
        assert_eq!(ErrorKind::DepthExceeded, err.kind());
        assert_eq!(DEFAULT_MAX_DEPTH + 1, err.position());

        let options = Options::default().max_depth(3);
        assert!(scan(b"((()))", options).0.is_ok());
        let (result, _) = scan(b"(((())))", options);
        assert_eq!(ErrorKind::DepthExceeded, result.unwrap_err().kind());
        let (result, _) = scan(b"(a (b) (c (d (e))))", options);
        assert_eq!(ErrorKind::DepthExceeded, result.unwrap_err().kind());
    }

    #[test]
    fn test_deepest_object_round_trips() {
        let deepest = nested(DEFAULT_MAX_DEPTH);
        let value = from_bytes(&deepest).unwrap();
        assert_eq!(deepest, to_canonical(&value).unwrap());

        let advanced = to_advanced(&value, 75).unwrap();
        assert_eq!(deepest, to_canonical(&from_bytes(&advanced).unwrap()).unwrap());

        let base64 = to_base64(&value, 75).unwrap();
        assert_eq!(deepest, to_canonical(&from_bytes(&base64).unwrap()).unwrap());
    }

    #[test]
    fn test_nested_lists() {
        assert_eq!(
            list(vec![
                list(vec!["a".into(), list(vec![])]),
                "b".into(),
                list(vec![list(vec!["c".into()])]),
            ]),
            from_bytes(b"((a ()) b ((c)))").unwrap()
        );
    }

    #[test]
    fn test_declared_length_mismatch_warns() {
        let (result, warnings) = scan(b"2#616263#", Options::default());
        assert_eq!(Sexp::from("abc"), result.unwrap());
        assert_eq!(vec![ErrorKind::LengthMismatch], warnings);

        let (result, warnings) = scan(b"4|YWJj|", Options::default());
        assert_eq!(Sexp::from("abc"), result.unwrap());
        assert_eq!(vec![ErrorKind::LengthMismatch], warnings);

        let (result, _) = scan(b"2#616263#", Options::default().warnings_are_errors(true));
        let err = result.unwrap_err();
        assert_eq!(ErrorKind::LengthMismatch, err.kind());
        assert_eq!(crate::Severity::Error, err.severity());
    }

    #[test]
    fn test_unused_bits_warn() {
        let (result, warnings) = scan(b"|YR==|", Options::default());
        assert_eq!(Sexp::from("a"), result.unwrap());
        assert_eq!(vec![ErrorKind::UnusedBits], warnings);

        let (result, warnings) = scan(b"#616#", Options::default());
        assert_eq!(Sexp::from("a"), result.unwrap());
        assert_eq!(vec![ErrorKind::UnusedBits], warnings);
    }

    #[test]
    fn test_zero_length_warns() {
        let (result, warnings) = scan(b"(0:\"\")", Options::default());
        assert_eq!(list(vec!["".into(), "".into()]), result.unwrap());
        assert_eq!(vec![ErrorKind::ZeroLength, ErrorKind::ZeroLength], warnings);
    }

    #[test]
    fn test_parse_head_only() {
        let mut stream = InputStream::new(&b"(1:a) foo \"bar\"  "[..], Options::default());
        assert_eq!(list(vec!["a".into()]), stream.scan_object().unwrap());
        assert_eq!(Sexp::from("foo"), stream.scan_object().unwrap());
        assert_eq!(Sexp::from("bar"), stream.scan_object().unwrap());
        assert!(stream.at_eof().unwrap());

        assert_eq!(Sexp::from("x"), parse(&b"1:x trailing"[..]).unwrap());
    }

    #[test]
    fn test_parse_to_eof() {
        assert_eq!(
            Sexp::from("(not parsed) \x01\n"),
            parse_to_eof(&b"  \n(not parsed) \x01\n"[..]).unwrap()
        );
        assert_eq!(Sexp::from(""), parse_to_eof(&b""[..]).unwrap());
    }

    #[test]
    fn test_io_error() {
        struct Failing;
        impl Read for Failing {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "broken pipe"))
            }
        }
        assert_eq!(ErrorKind::Io, parse(Failing).unwrap_err().kind());
    }
}
