//! Errors and warnings raised by the codec.
use std::fmt::{self, Display};
use std::io;

/// What went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input ended in the middle of an object or field.
    UnexpectedEof,
    /// A character that is not allowed at this point of the grammar.
    IllegalCharacter,
    /// A verbatim string without a declared length.
    MissingLength,
    /// A declared length that does not match the scanned contents.
    LengthMismatch,
    /// A malformed or unknown escape sequence in a quoted string.
    BadEscape,
    /// Lists nested deeper than the configured maximum.
    DepthExceeded,
    /// A decimal length with too many digits.
    DecimalTooLong,
    /// More than one `Key` field in an extended key record.
    DuplicateKey,
    /// No `Key` field in an extended key record.
    MissingKey,
    /// An extended key field name that is not well-formed.
    MalformedName,
    /// A field value that is not valid UTF-8.
    InvalidUtf8,
    /// A simple string of length zero.
    ZeroLength,
    /// A hex or base64 region that ended with non-zero left-over bits.
    UnusedBits,
    /// The underlying reader or writer failed.
    Io,
}

/// Whether a diagnostic aborts the current operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("ERROR"),
            Severity::Warning => f.write_str("WARNING"),
        }
    }
}

/// The sub-codec that raised a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    Sexp,
    ExtendedKey,
}

impl Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Context::Sexp => f.write_str("SEXP"),
            Context::ExtendedKey => f.write_str("EXTENDED KEY FORMAT"),
        }
    }
}

/// An error or warning, located at a byte position of the stream.
#[derive(Debug, thiserror::Error)]
#[error("{context} {severity}: {message} at position {position}")]
pub struct Error {
    kind: ErrorKind,
    severity: Severity,
    context: Context,
    message: String,
    position: usize,
    #[source]
    source: Option<io::Error>,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Display, position: usize) -> Self {
        Error {
            kind,
            severity: Severity::Error,
            context: Context::Sexp,
            message: message.to_string(),
            position,
            source: None,
        }
    }

    pub(crate) fn warning(kind: ErrorKind, message: impl Display, position: usize) -> Self {
        Error {
            severity: Severity::Warning,
            ..Error::new(kind, message, position)
        }
    }

    pub(crate) fn io(err: io::Error, position: usize) -> Self {
        Error {
            message: err.to_string(),
            source: Some(err),
            ..Error::new(ErrorKind::Io, "", position)
        }
    }

    pub(crate) fn in_context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }

    /// Moves the position by `offset`, for errors raised by a stream
    /// that was started part way into the input.
    pub(crate) fn shifted(mut self, offset: usize) -> Self {
        self.position += offset;
        self
    }

    /// Turns a warning into a hard error.
    pub(crate) fn promote(mut self) -> Self {
        self.severity = Severity::Error;
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn context(&self) -> Context {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Number of bytes of the stream consumed when the problem was detected.
    pub fn position(&self) -> usize {
        self.position
    }
}

/// Shorthand for a result specialised to codec errors.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_display() {
        let err = Error::new(ErrorKind::UnexpectedEof, "unexpected end of file", 12);
        assert_eq!("SEXP ERROR: unexpected end of file at position 12", err.to_string());

        let warning = Error::warning(ErrorKind::ZeroLength, "simple string has zero length", 3)
            .in_context(Context::ExtendedKey);
        assert_eq!(
            "EXTENDED KEY FORMAT WARNING: simple string has zero length at position 3",
            warning.to_string()
        );
        assert_eq!(3, warning.position());
        let warning = warning.shifted(10);
        assert_eq!(13, warning.position());
        assert_eq!(Severity::Error, warning.promote().severity());
    }

    #[test]
    fn test_io_source() {
        use std::error::Error as _;
        let err = Error::io(io::Error::new(io::ErrorKind::Other, "boom"), 0);
        assert_eq!(ErrorKind::Io, err.kind());
        assert!(err.source().is_some());
    }
}
