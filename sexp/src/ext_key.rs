//! The extended private key format.
//!
//! A key file is either a bare s-expression list, or a sequence of
//! `Name: value` lines of which exactly one, `Key`, holds an s-expression
//! list, and the others hold text:
//!
//! ```text
//! Created: 20240301T120000
//! Description: A key with a value that
//!  continues on the next line
//! Key: (private-key (rsa (n #00e0ce9f#)
//!   (e #010001#)))
//! ```
//!
//! A value continues on every following line that starts with a single
//! space. A continuation line holding nothing else stands for a line
//! break within the value, and one starting with `#` is a comment. The
//! key follows the same rules, its lines joined by line breaks.
use std::io::Read;

use delegate::delegate;
use smol_str::SmolStr;

use crate::chars::{describe, is_alpha, is_blank, is_line_break, is_name_char};
use crate::error::{Context, Error, ErrorKind, Result};
use crate::options::Options;
use crate::parser::InputStream;
use crate::value::Sexp;

/// Name of the field holding the key itself, compared case-insensitively.
const KEY_FIELD: &str = "Key";

/// A private key together with its metadata fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedPrivateKey {
    key: Sexp,
    fields: Vec<(SmolStr, String)>,
}

impl ExtendedPrivateKey {
    pub fn parse<R: Read>(input: R, options: Options) -> Result<Self> {
        Self::parse_with_warnings(input, options).map(|(record, _)| record)
    }

    /// Parses a key file, also returning the warnings raised while
    /// scanning the key. Positions count from the start of the file.
    pub fn parse_with_warnings<R: Read>(input: R, options: Options) -> Result<(Self, Vec<Error>)> {
        let mut parser = ExtKeyParser::new(input, options);
        let record = parser.scan_record()?;
        Ok((record, parser.into_warnings()))
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::parse(data, Options::default())
    }

    #[inline]
    pub fn key(&self) -> &Sexp {
        &self.key
    }

    pub fn into_key(self) -> Sexp {
        self.key
    }

    /// The first value of the field `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Every value of the field `name`, in file order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.fields
            .iter()
            .filter(move |(field, _)| field.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// All metadata fields in file order, names as written.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

/// Parses an extended private key file.
pub fn parse_extended_key<R: Read>(input: R) -> Result<ExtendedPrivateKey> {
    ExtendedPrivateKey::parse(input, Options::default())
}

struct ExtKeyParser<R> {
    stream: InputStream<R>,
    /// Warnings from the key's own stream, positioned within the file.
    warnings: Vec<Error>,
}

impl<R: Read> ExtKeyParser<R> {
    fn new(input: R, options: Options) -> Self {
        ExtKeyParser {
            stream: InputStream::new(input, options),
            warnings: Vec::new(),
        }
    }

    fn into_warnings(self) -> Vec<Error> {
        let mut warnings = self.stream.into_warnings();
        warnings.extend(self.warnings);
        warnings
    }

    delegate! {
        to self.stream {
            fn next_char(&self) -> Option<u8>;
            fn get_char(&mut self) -> Result<()>;
            fn position(&self) -> usize;
        }
    }

    fn error(&self, kind: ErrorKind, message: impl std::fmt::Display) -> Error {
        self.stream
            .error(kind, message)
            .in_context(Context::ExtendedKey)
    }

    fn at_line_end(&self) -> bool {
        self.next_char().map_or(true, is_line_break)
    }

    fn skip_blanks(&mut self) -> Result<()> {
        while self.next_char().map_or(false, is_blank) {
            self.get_char()?;
        }
        Ok(())
    }

    /// Consumes one `\n`, `\r\n` or `\r`, if present.
    fn skip_line_break(&mut self) -> Result<()> {
        match self.next_char() {
            Some(b'\r') => {
                self.get_char()?;
                if self.next_char() == Some(b'\n') {
                    self.get_char()?;
                }
            }
            Some(b'\n') => self.get_char()?,
            _ => {}
        }
        Ok(())
    }

    fn skip_to_line_end(&mut self) -> Result<()> {
        while !self.at_line_end() {
            self.get_char()?;
        }
        Ok(())
    }

    fn scan_record(&mut self) -> Result<ExtendedPrivateKey> {
        // Replace the stream's initial lookahead with the first byte.
        self.get_char()?;

        let mut key = None;
        let mut fields = Vec::new();
        loop {
            match self.next_char() {
                None => break,
                Some(c) if is_line_break(c) => self.skip_line_break()?,
                Some(b'#') => {
                    self.skip_to_line_end()?;
                    self.skip_line_break()?;
                }
                Some(b'(') if key.is_none() && fields.is_empty() => {
                    return self.scan_bare_key();
                }
                Some(c) if is_blank(c) => {
                    self.skip_blanks()?;
                    if !self.at_line_end() {
                        return Err(self.error(
                            ErrorKind::MalformedName,
                            "field name is preceded by whitespace",
                        ));
                    }
                }
                Some(_) => {
                    let name = self.scan_name()?;
                    if name.eq_ignore_ascii_case(KEY_FIELD) {
                        if key.is_some() {
                            return Err(
                                self.error(ErrorKind::DuplicateKey, "more than one key field")
                            );
                        }
                        key = Some(self.scan_key()?);
                    } else {
                        let value = self.scan_value()?;
                        fields.push((name, value));
                    }
                }
            }
        }

        match key {
            Some(key) => Ok(ExtendedPrivateKey { key, fields }),
            None => Err(self.error(ErrorKind::MissingKey, "no key field found")),
        }
    }

    /// A file holding nothing but the key list.
    fn scan_bare_key(&mut self) -> Result<ExtendedPrivateKey> {
        let key = self.stream.scan_object()?;
        self.stream.skip_white_space()?;
        if let Some(c) = self.next_char() {
            return Err(self.error(
                ErrorKind::IllegalCharacter,
                format!("unexpected character {} after the key", describe(c)),
            ));
        }
        Ok(ExtendedPrivateKey {
            key,
            fields: Vec::new(),
        })
    }

    /// Scans a field name and the colon that ends it.
    fn scan_name(&mut self) -> Result<SmolStr> {
        match self.next_char() {
            Some(c) if is_alpha(c) => {}
            Some(c) => {
                return Err(self.error(
                    ErrorKind::MalformedName,
                    format!("field name starts with {}", describe(c)),
                ))
            }
            None => {
                return Err(self.error(ErrorKind::UnexpectedEof, "unexpected end of file"));
            }
        }

        let mut name = String::new();
        while let Some(c) = self.next_char().filter(|&c| is_name_char(c)) {
            name.push(char::from(c));
            self.get_char()?;
        }

        match self.next_char() {
            Some(b':') => {
                self.get_char()?;
                Ok(SmolStr::new(name))
            }
            Some(c) if is_line_break(c) => Err(self.error(
                ErrorKind::MalformedName,
                format!("line ended in field name '{}'", name),
            )),
            Some(c) => Err(self.error(
                ErrorKind::MalformedName,
                format!("character {} in field name '{}'", describe(c), name),
            )),
            None => Err(self.error(
                ErrorKind::MalformedName,
                format!("file ended in field name '{}'", name),
            )),
        }
    }

    /// Scans the key list. Continuation lines are joined with line
    /// breaks, and the list must be the only thing in the value.
    fn scan_key(&mut self) -> Result<Sexp> {
        self.skip_blanks()?;
        if self.next_char() != Some(b'(') {
            let message = match self.next_char() {
                Some(c) => format!("key value starts with {} instead of a list", describe(c)),
                None => "key value is empty".to_string(),
            };
            return Err(self.error(ErrorKind::IllegalCharacter, message));
        }

        // The key stream counts from the byte before the opening parenthesis.
        let offset = self.position().saturating_sub(1);
        let text = self.scan_continued(Some(b'\n'))?;
        let mut stream = InputStream::new(text.as_slice(), *self.stream.options());
        let key = stream
            .scan_object()
            .and_then(|key| stream.skip_white_space().map(|()| key))
            .map_err(|err| err.shifted(offset))?;
        if let Some(c) = stream.next_char() {
            return Err(Error::new(
                ErrorKind::IllegalCharacter,
                format!("unexpected character {} after the key", describe(c)),
                offset + stream.position(),
            )
            .in_context(Context::ExtendedKey));
        }

        self.warnings.extend(
            stream
                .into_warnings()
                .into_iter()
                .map(|warning| warning.shifted(offset)),
        );
        Ok(key)
    }

    /// Scans a text value together with its continuation lines.
    fn scan_value(&mut self) -> Result<String> {
        self.skip_blanks()?;
        let start = self.position();
        let value = self.scan_continued(None)?;

        String::from_utf8(value).map_err(|err| {
            let offset = err.utf8_error().valid_up_to();
            Error::new(
                ErrorKind::InvalidUtf8,
                "field value is not valid UTF-8",
                start + offset,
            )
            .in_context(Context::ExtendedKey)
        })
    }

    /// Reads the rest of the line and every continuation line after it.
    /// `separator` goes between the lines that carry content.
    fn scan_continued(&mut self, separator: Option<u8>) -> Result<Vec<u8>> {
        let mut value = Vec::new();

        'lines: loop {
            while let Some(c) = self.next_char().filter(|&c| !is_line_break(c)) {
                value.push(c);
                self.get_char()?;
            }
            self.skip_line_break()?;

            while self.next_char() == Some(b' ') {
                self.get_char()?;
                match self.next_char() {
                    Some(b'#') => {
                        self.skip_to_line_end()?;
                        self.skip_line_break()?;
                    }
                    Some(c) if !is_line_break(c) => {
                        value.extend(separator);
                        continue 'lines;
                    }
                    _ => {
                        value.push(b'\n');
                        self.skip_line_break()?;
                    }
                }
            }
            return Ok(value);
        }
    }
}
