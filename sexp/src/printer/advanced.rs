use std::io::Write;
use std::slice;

use super::{OutputStream, PrintMode};
use crate::error::Result;
use crate::options::Options;
use crate::parser::ByteSize;
use crate::string::SimpleString;
use crate::value::{Sexp, SexpString};

/// How a simple string is rendered in advanced mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Encoding {
    Token,
    Quoted,
    Hex,
    Base64,
}

/// A list being printed in advanced form.
struct OpenList<'a> {
    items: slice::Iter<'a, Sexp>,
    vertical: bool,
    /// Whether a child has been printed, so the next needs a separator.
    started: bool,
}

/// Strings of at most this many bytes may be printed in hexadecimal.
const MAX_HEX_LEN: usize = 4;

impl<W: Write> OutputStream<W> {
    /// Prints `object` in advanced form, wrapping at the configured column.
    pub fn print_advanced(&mut self, object: &Sexp) -> Result<()> {
        self.change_output_byte_size(ByteSize::Eight, PrintMode::Advanced);
        self.write_advanced(object)
    }

    fn write_advanced(&mut self, object: &Sexp) -> Result<()> {
        let mut open: Vec<OpenList<'_>> = Vec::new();
        let mut object = object;
        loop {
            match object {
                Sexp::String(string) => self.write_advanced_string(string)?,
                Sexp::List(items) => open.push(self.open_advanced_list(object, items)?),
            }

            object = loop {
                let Some(list) = open.last_mut() else {
                    return Ok(());
                };
                let Some(item) = list.items.next() else {
                    open.pop();
                    self.close_advanced_list()?;
                    continue;
                };
                if std::mem::replace(&mut list.started, true) {
                    if list.vertical {
                        self.new_line(PrintMode::Advanced)?;
                    } else {
                        self.put_char(b' ')?;
                    }
                }
                break item;
            };
        }
    }

    /// Lays the children out on one line if they fit, one per line otherwise.
    fn open_advanced_list<'a>(
        &mut self,
        object: &Sexp,
        items: &'a [Sexp],
    ) -> Result<OpenList<'a>> {
        self.increase_depth()?;
        let max_column = self.max_column();
        let vertical = max_column > 0
            && self
                .advanced_len_within(object, max_column.saturating_sub(self.column()))
                .is_none();

        self.put_char(b'(')?;
        self.indent += 1;
        Ok(OpenList {
            items: items.iter(),
            vertical,
            started: false,
        })
    }

    fn close_advanced_list(&mut self) -> Result<()> {
        let max_column = self.max_column();
        if max_column > 0 && self.column() > max_column.saturating_sub(2) {
            self.new_line(PrintMode::Advanced)?;
        }
        self.indent -= 1;
        self.put_char(b')')?;
        self.decrease_depth();
        Ok(())
    }

    fn write_advanced_string(&mut self, string: &SexpString) -> Result<()> {
        if let Some(hint) = string.hint() {
            self.put_char(b'[')?;
            self.write_advanced_simple(hint)?;
            self.put_char(b']')?;
        }
        self.write_advanced_simple(string.value())
    }

    fn write_advanced_simple(&mut self, string: &SimpleString) -> Result<()> {
        match self.encoding(string) {
            Encoding::Token => {
                for &c in string.iter() {
                    self.put_char(c)?;
                }
                Ok(())
            }
            Encoding::Quoted => self.print_quoted(string),
            Encoding::Hex => self.print_region(string, ByteSize::Four, b'#'),
            Encoding::Base64 => self.print_region(string, ByteSize::Six, b'|'),
        }
    }

    /// Picks the first legal of token, quoted, hexadecimal and base64.
    fn encoding(&self, string: &SimpleString) -> Encoding {
        let max_column = self.max_column();
        let fits = max_column == 0 || self.column() + string.len() < max_column;
        if string.is_token() && fits {
            Encoding::Token
        } else if string.is_quotable() {
            Encoding::Quoted
        } else if string.len() <= MAX_HEX_LEN {
            Encoding::Hex
        } else {
            Encoding::Base64
        }
    }

    fn print_quoted(&mut self, string: &SimpleString) -> Result<()> {
        let max_column = self.max_column();
        self.put_char(b'"')?;
        for &c in string.iter() {
            if max_column > 0 && self.column() >= max_column.saturating_sub(2) {
                self.put_char(b'\\')?;
                self.put_char(b'\n')?;
                self.column = 0;
            }
            self.put_char(c)?;
        }
        self.put_char(b'"')
    }

    fn print_region(
        &mut self,
        string: &SimpleString,
        byte_size: ByteSize,
        delimiter: u8,
    ) -> Result<()> {
        self.put_char(delimiter)?;
        self.change_output_byte_size(byte_size, PrintMode::Advanced);
        for &c in string.iter() {
            self.var_put_char(c)?;
        }
        self.flush()?;
        self.change_output_byte_size(ByteSize::Eight, PrintMode::Advanced);
        self.put_char(delimiter)
    }

    fn simple_advanced_len(&self, string: &SimpleString) -> usize {
        match self.encoding(string) {
            Encoding::Token => string.token_len(),
            Encoding::Quoted => string.quoted_len(),
            Encoding::Hex => string.hex_len(),
            Encoding::Base64 => string.base64_len(),
        }
    }

    /// Length of the one-line rendering of `object`, or `None` as soon as
    /// it exceeds `budget`.
    fn advanced_len_within(&self, object: &Sexp, budget: usize) -> Option<usize> {
        let len = match object {
            Sexp::String(string) => {
                string.hint().map_or(0, |hint| 2 + self.simple_advanced_len(hint))
                    + self.simple_advanced_len(string.value())
            }
            Sexp::List(items) if items.is_empty() => 2,
            Sexp::List(items) => {
                let mut len = 1;
                for item in items {
                    len += 1 + self.advanced_len_within(item, budget.checked_sub(len)?)?;
                    if len > budget {
                        return None;
                    }
                }
                len
            }
        };
        (len <= budget).then_some(len)
    }
}

/// Print `object` in advanced form, breaking lines before `max_column`
/// (0 for a single line).
pub fn to_advanced(object: &Sexp, max_column: usize) -> Result<Vec<u8>> {
    let mut os = OutputStream::new(Vec::new(), Options::default().max_column(max_column));
    os.print_advanced(object)?;
    Ok(os.into_inner())
}
