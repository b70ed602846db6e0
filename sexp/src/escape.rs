use logos::Logos;

/// Lexer token for an escape sequence within a quoted string.
#[derive(Debug, Clone, Copy, PartialEq, Logos)]
#[logos(source = [u8])]
enum EscapedToken {
    #[token(r"\b", |_| 0x08u8)]
    #[token(r"\t", |_| b'\t')]
    #[token(r"\v", |_| 0x0bu8)]
    #[token(r"\n", |_| b'\n')]
    #[token(r"\f", |_| 0x0cu8)]
    #[token(r"\r", |_| b'\r')]
    #[token(r#"\""#, |_| b'"')]
    #[token(r"\'", |_| b'\'')]
    #[token(r"\\", |_| b'\\')]
    Escaped(u8),

    #[regex(r"\\x[0-9a-fA-F][0-9a-fA-F]?", |lex| parse_radix(&lex.slice()[2..], 16))]
    Hex(u16),

    #[regex(r"\\[0-7][0-7]?[0-7]?", |lex| parse_radix(&lex.slice()[1..], 8))]
    Octal(u16),

    /// A backslash followed by a line break splices two lines together.
    #[regex("\\\\\n\r?")]
    #[regex("\\\\\r\n?")]
    LineBreak,
}

fn parse_radix(digits: &[u8], radix: u32) -> Option<u16> {
    let digits = std::str::from_utf8(digits).ok()?;
    u16::from_str_radix(digits, radix).ok()
}

/// A malformed escape sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EscapeError {
    /// Offset of the offending backslash within the raw string.
    pub offset: usize,
    pub message: String,
}

/// Replaces escape sequences in the raw contents of a quoted string with
/// the bytes they stand for.
pub(crate) fn unescape(raw: &[u8]) -> Result<Vec<u8>, EscapeError> {
    let mut output = Vec::with_capacity(raw.len());
    let mut offset = 0;

    while offset < raw.len() {
        let rest = &raw[offset..];
        if rest[0] != b'\\' {
            let literal = rest.iter().position(|&c| c == b'\\').unwrap_or(rest.len());
            output.extend_from_slice(&rest[..literal]);
            offset += literal;
            continue;
        }

        let mut lexer = EscapedToken::lexer(rest);
        let token = lexer.next().and_then(|token| token.ok());
        let size = lexer.span().end;

        match token {
            Some(EscapedToken::Escaped(c)) => output.push(c),
            Some(EscapedToken::Hex(value)) => output.push(value as u8),
            Some(EscapedToken::Octal(value)) if value <= 0xff => output.push(value as u8),
            Some(EscapedToken::Octal(value)) => {
                return Err(EscapeError {
                    offset,
                    message: format!("octal character \\{:o} is greater than \\377", value),
                })
            }
            Some(EscapedToken::LineBreak) => {}
            None => {
                let message = match rest.get(1) {
                    Some(&c) => format!("unknown escape sequence \\{}", crate::chars::describe(c)),
                    None => "unterminated escape sequence".to_string(),
                };
                return Err(EscapeError { offset, message });
            }
        }

        offset += size;
    }

    Ok(output)
}
