//! Rivest s-expressions as a data format.
//!
//! # Syntax
//!
//! An s-expression is either a string or a list of s-expressions:
//!
//! - **Lists** are sequences of values delimited by `(` and `)`. In the
//!   canonical form there is no whitespace between elements, elsewhere
//!   any amount of whitespace may separate them.
//!
//! - **Simple strings** are raw byte sequences with no implied text
//!   encoding. They are written in one of the following ways:
//!
//!    - verbatim, as a decimal length, `:` and the bytes themselves, as in
//!      `3:abc`. This is the only encoding of the canonical form.
//!    - as a token of letters, digits and `-./_:*+=` that does not start
//!      with a digit, as in `abc`.
//!    - between double quotes, as in `"a b c"`. The escapes `\b`, `\t`,
//!      `\v`, `\n`, `\f`, `\r`, `\"`, `\'` and `\\` stand for the usual
//!      characters, `\xHH` and `\OOO` give a byte in hexadecimal or octal,
//!      and a backslash before a line break joins two lines.
//!    - in hexadecimal between `#`, as in `#616263#`.
//!    - in base64 between `|`, as in `|YWJj|`.
//!
//!   All but the token may be preceded by a decimal length.
//!
//! - **Strings** are simple strings with an optional presentation hint
//!   between square brackets, as in `[text/plain]"hello"`.
//!
//! A whole object may also be sent in the base64 transport encoding: its
//! canonical form, base64 encoded between `{` and `}`.
//!
//! The [`ExtendedPrivateKey`] format wraps one s-expression key in a file
//! of `Name: value` metadata lines.

pub(crate) mod chars;
mod error;
pub(crate) mod escape;
mod ext_key;
mod options;
pub mod parser;
pub mod printer;
mod string;
mod value;

pub use error::{Context, Error, ErrorKind, Result, Severity};
pub use ext_key::{parse_extended_key, ExtendedPrivateKey};
pub use options::{Options, DEFAULT_MAX_COLUMN, DEFAULT_MAX_DEPTH};
pub use parser::{from_bytes, parse, parse_to_eof, parse_with_options, InputStream};
pub use printer::{to_advanced, to_base64, to_canonical, OutputStream, PrintMode};
pub use string::SimpleString;
pub use value::{Sexp, SexpString};
