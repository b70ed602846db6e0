//! Print s-expressions into a byte stream.
//!
//! All three print modes go through one [`OutputStream`], which tracks the
//! current column for line wrapping and packs bytes into hexadecimal or
//! base64 digits while a 4-bit or 6-bit region is open.
use std::io::Write;

use log::trace;

use crate::chars::{BASE64_DIGITS, HEX_DIGITS};
use crate::error::{Error, ErrorKind, Result};
use crate::options::Options;
use crate::parser::ByteSize;

mod advanced;
mod canonical;
pub use advanced::to_advanced;
pub use canonical::{to_base64, to_canonical};

/// The rendering an [`OutputStream`] is producing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintMode {
    /// Length-prefixed verbatim strings, no whitespace.
    Canonical,
    /// The canonical form, base64 encoded between braces.
    Base64,
    /// Readable strings, indented lists and wrapped lines.
    Advanced,
}

/// A sink that s-expressions are printed to.
pub struct OutputStream<W> {
    output: W,
    byte_size: ByteSize,
    bits: u32,
    n_bits: u32,
    base64_count: usize,
    mode: PrintMode,
    column: usize,
    indent: usize,
    depth: usize,
    position: usize,
    options: Options,
}

impl<W: Write> OutputStream<W> {
    pub fn new(output: W, options: Options) -> Self {
        OutputStream {
            output,
            byte_size: ByteSize::Eight,
            bits: 0,
            n_bits: 0,
            base64_count: 0,
            mode: PrintMode::Canonical,
            column: 0,
            indent: 0,
            depth: 0,
            position: 0,
            options,
        }
    }

    #[inline]
    pub fn column(&self) -> usize {
        self.column
    }

    #[inline]
    pub fn max_column(&self) -> usize {
        self.options.max_column
    }

    #[inline]
    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn into_inner(self) -> W {
        self.output
    }

    /// Writes one byte as is.
    pub fn put_char(&mut self, c: u8) -> Result<()> {
        self.output
            .write_all(&[c])
            .map_err(|err| Error::io(err, self.position))?;
        self.position += 1;
        self.column += 1;
        Ok(())
    }

    /// Writes one byte through the active byte size, emitting hexadecimal
    /// or base64 digits as soon as enough bits are pending.
    pub fn var_put_char(&mut self, c: u8) -> Result<()> {
        self.bits = ((self.bits << 8) | u32::from(c)) & 0xffff;
        self.n_bits += 8;

        let size = self.byte_size.bits();
        while self.n_bits >= size {
            let wraps = self.byte_size != ByteSize::Eight || matches!(c, b'{' | b'}' | b'#' | b'|');
            if wraps && self.at_max_column() {
                self.new_line(self.mode)?;
            }
            self.n_bits -= size;
            let digit = self.digit((self.bits >> self.n_bits) & ((1 << size) - 1));
            self.put_char(digit)?;
            self.base64_count += 1;
        }
        Ok(())
    }

    fn digit(&self, value: u32) -> u8 {
        match self.byte_size {
            ByteSize::Four => HEX_DIGITS[value as usize],
            ByteSize::Six => BASE64_DIGITS[value as usize],
            ByteSize::Eight => value as u8,
        }
    }

    fn at_max_column(&self) -> bool {
        self.options.max_column > 0 && self.column >= self.options.max_column
    }

    /// Emits the pending bits of a 4-bit or 6-bit region, padding base64
    /// output with `=` to a multiple of four digits.
    pub fn flush(&mut self) -> Result<()> {
        if self.n_bits > 0 {
            let size = self.byte_size.bits();
            let digit = self.digit((self.bits << (size - self.n_bits)) & ((1 << size) - 1));
            self.put_char(digit)?;
            self.n_bits = 0;
            self.base64_count += 1;
        }
        if self.byte_size == ByteSize::Six {
            while self.base64_count % 4 != 0 {
                if self.at_max_column() {
                    self.new_line(self.mode)?;
                }
                self.put_char(b'=')?;
                self.base64_count += 1;
            }
        }
        self.output
            .flush()
            .map_err(|err| Error::io(err, self.position))
    }

    pub(crate) fn change_output_byte_size(&mut self, byte_size: ByteSize, mode: PrintMode) {
        if byte_size != self.byte_size {
            trace!("output switches to {}-bit units at column {}", byte_size.bits(), self.column);
        }
        self.byte_size = byte_size;
        self.bits = 0;
        self.n_bits = 0;
        self.base64_count = 0;
        self.mode = mode;
    }

    /// Starts a new line. In advanced mode the line is indented by one
    /// space per open list, but never by half the line width or more.
    pub fn new_line(&mut self, mode: PrintMode) -> Result<()> {
        if mode == PrintMode::Canonical {
            return Ok(());
        }
        self.put_char(b'\n')?;
        self.column = 0;
        if mode == PrintMode::Advanced {
            let mut i = 0;
            while i < self.indent && 2 * i < self.options.max_column {
                self.put_char(b' ')?;
                i += 1;
            }
        }
        Ok(())
    }

    fn increase_depth(&mut self) -> Result<()> {
        let max_depth = self.options.max_depth;
        if max_depth != 0 && self.depth >= max_depth {
            return Err(Error::new(
                ErrorKind::DepthExceeded,
                format!("maximum allowed list depth ({}) is exceeded", max_depth),
                self.position,
            ));
        }
        self.depth += 1;
        Ok(())
    }

    fn decrease_depth(&mut self) {
        self.depth -= 1;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parser::from_bytes;
    use crate::value::strategy;
    use crate::{Sexp, SexpString};
    use proptest::prelude::*;

    fn stream(max_column: usize) -> OutputStream<Vec<u8>> {
        OutputStream::new(Vec::new(), Options::default().max_column(max_column))
    }

    #[test]
    fn test_hex_packing() {
        let mut os = stream(0);
        os.change_output_byte_size(ByteSize::Four, PrintMode::Advanced);
        for c in b"\x01\xab" {
            os.var_put_char(*c).unwrap();
        }
        os.flush().unwrap();
        assert_eq!(b"01AB", os.into_inner().as_slice());
    }

    #[test]
    fn test_base64_padding() {
        for (input, expected) in [(&b"a"[..], &b"YQ=="[..]), (b"ab", b"YWI="), (b"abc", b"YWJj")] {
            let mut os = stream(0);
            os.change_output_byte_size(ByteSize::Six, PrintMode::Advanced);
            for c in input {
                os.var_put_char(*c).unwrap();
            }
            os.flush().unwrap();
            assert_eq!(expected, os.into_inner().as_slice());
        }
    }

    #[test]
    fn test_new_line_indent_is_capped() {
        let mut os = stream(8);
        os.indent = 10;
        os.new_line(PrintMode::Advanced).unwrap();
        assert_eq!(b"\n    ", os.into_inner().as_slice());

        let mut os = stream(8);
        os.indent = 10;
        os.new_line(PrintMode::Base64).unwrap();
        assert_eq!(0, os.column());
        assert_eq!(b"\n", os.into_inner().as_slice());
    }

    #[test]
    fn test_print_depth_guard() {
        let mut value = Sexp::from("leaf");
        for _ in 0..10 {
            value = Sexp::List(vec![value]);
        }
        let mut os = OutputStream::new(Vec::new(), Options::default().max_depth(5));
        let err = os.print_canonical(&value).unwrap_err();
        assert_eq!(ErrorKind::DepthExceeded, err.kind());
        let mut os = OutputStream::new(Vec::new(), Options::default().max_depth(5));
        assert_eq!(
            ErrorKind::DepthExceeded,
            os.print_advanced(&value).unwrap_err().kind()
        );
    }

    #[test]
    fn test_default_depth_guard() {
        let mut value = Sexp::from("leaf");
        for _ in 0..crate::DEFAULT_MAX_DEPTH {
            value = Sexp::List(vec![value]);
        }
        assert!(to_canonical(&value).is_ok());
        assert!(to_base64(&value, 75).is_ok());
        assert!(to_advanced(&value, 75).is_ok());

        let value = Sexp::List(vec![value]);
        for mode in [PrintMode::Canonical, PrintMode::Base64, PrintMode::Advanced] {
            let mut os = stream(75);
            let result = match mode {
                PrintMode::Canonical => os.print_canonical(&value),
                PrintMode::Base64 => os.print_base64(&value),
                PrintMode::Advanced => os.print_advanced(&value),
            };
            assert_eq!(ErrorKind::DepthExceeded, result.unwrap_err().kind());
        }
    }

    #[test]
    fn test_embedded_nul_round_trips() {
        let value = Sexp::List(vec![
            (&b"\x00"[..]).into(),
            SexpString::with_hint(&b"\x00\xff\n\x7f"[..], &b""[..]).into(),
        ]);
        let canonical = to_canonical(&value).unwrap();
        assert_eq!(b"(1:\x00[0:]4:\x00\xff\n\x7f)", canonical.as_slice());
        assert_eq!(value, from_bytes(&canonical).unwrap());
    }

    proptest! {
        #[test]
        fn canonical_then_parse(value in strategy::sexp()) {
            let printed = to_canonical(&value).unwrap();
            prop_assert_eq!(&value, &from_bytes(&printed).unwrap());
        }

        #[test]
        fn base64_then_parse(value in strategy::sexp(), width in 0..120usize) {
            let printed = to_base64(&value, width).unwrap();
            prop_assert_eq!(&value, &from_bytes(&printed).unwrap());
        }

        #[test]
        fn advanced_then_parse(value in strategy::sexp(), width in 0..120usize) {
            let printed = to_advanced(&value, width).unwrap();
            prop_assert_eq!(&value, &from_bytes(&printed).unwrap());
        }
    }
}
