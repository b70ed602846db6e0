use std::io::Write;
use std::slice;

use super::{OutputStream, PrintMode};
use crate::error::Result;
use crate::options::Options;
use crate::parser::ByteSize;
use crate::string::SimpleString;
use crate::value::{Sexp, SexpString};

impl<W: Write> OutputStream<W> {
    /// Prints `object` in canonical form.
    pub fn print_canonical(&mut self, object: &Sexp) -> Result<()> {
        self.change_output_byte_size(ByteSize::Eight, PrintMode::Canonical);
        self.write_canonical(object)
    }

    /// Prints the canonical form of `object` base64 encoded within `{` and `}`.
    pub fn print_base64(&mut self, object: &Sexp) -> Result<()> {
        self.change_output_byte_size(ByteSize::Eight, PrintMode::Base64);
        self.var_put_char(b'{')?;
        self.change_output_byte_size(ByteSize::Six, PrintMode::Base64);
        self.write_canonical(object)?;
        self.flush()?;
        self.change_output_byte_size(ByteSize::Eight, PrintMode::Base64);
        self.var_put_char(b'}')
    }

    fn write_canonical(&mut self, object: &Sexp) -> Result<()> {
        // Remaining children of each open list, innermost last.
        let mut open: Vec<slice::Iter<'_, Sexp>> = Vec::new();
        let mut object = object;
        loop {
            match object {
                Sexp::String(string) => self.write_canonical_string(string)?,
                Sexp::List(items) => {
                    self.increase_depth()?;
                    self.var_put_char(b'(')?;
                    open.push(items.iter());
                }
            }

            object = loop {
                let Some(items) = open.last_mut() else {
                    return Ok(());
                };
                match items.next() {
                    Some(item) => break item,
                    None => {
                        open.pop();
                        self.var_put_char(b')')?;
                        self.decrease_depth();
                    }
                }
            };
        }
    }

    fn write_canonical_string(&mut self, string: &SexpString) -> Result<()> {
        if let Some(hint) = string.hint() {
            self.var_put_char(b'[')?;
            self.print_verbatim(hint)?;
            self.var_put_char(b']')?;
        }
        self.print_verbatim(string.value())
    }

    pub(crate) fn print_verbatim(&mut self, string: &SimpleString) -> Result<()> {
        for c in string.len().to_string().bytes() {
            self.var_put_char(c)?;
        }
        self.var_put_char(b':')?;
        for &c in string.iter() {
            self.var_put_char(c)?;
        }
        Ok(())
    }
}

/// Print `object` in canonical form.
///
/// The canonical form is the unique byte-exact encoding of an
/// s-expression, intended for hashing and for consumption by other
/// programs. Where human readability is a concern, consider using
/// [`to_advanced`] instead.
///
/// [`to_advanced`]: `crate::printer::to_advanced`
pub fn to_canonical(object: &Sexp) -> Result<Vec<u8>> {
    let mut os = OutputStream::new(Vec::new(), Options::default());
    os.print_canonical(object)?;
    Ok(os.into_inner())
}

/// Print `object` in the base64 transport encoding, wrapping lines after
/// `max_column` characters (0 for no wrapping).
pub fn to_base64(object: &Sexp, max_column: usize) -> Result<Vec<u8>> {
    let mut os = OutputStream::new(Vec::new(), Options::default().max_column(max_column));
    os.print_base64(object)?;
    Ok(os.into_inner())
}
