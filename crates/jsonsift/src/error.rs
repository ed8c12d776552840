use core::fmt;

use bstr::BString;
use thiserror::Error;

/// A syntax error detected while validating a stream.
///
/// Positions are cumulative across every chunk fed since construction or the
/// last [`reset`](crate::StreamingValidator::reset).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at {line}:{column}")]
pub struct ValidationError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// Byte offset of the offending byte in the whole stream.
    pub offset: usize,
    /// 1-based line of the offending byte.
    pub line: usize,
    /// 1-based column of the offending byte, counted in characters.
    pub column: usize,
    /// Up to 16 bytes of the current chunk, starting at the offending byte.
    /// Empty when the error was not caused by a byte (e.g. from `finish`).
    pub near: BString,
}

/// The error taxonomy of the validator.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A byte appeared where the grammar forbids it.
    #[error("unexpected character {found} {context}")]
    UnexpectedCharacter {
        /// The offending byte.
        found: Found,
        /// Where in the grammar the byte was seen, e.g. `"in number"`.
        context: &'static str,
    },
    /// A token was terminated (or the stream finished) before it was
    /// complete.
    #[error("incomplete {0}")]
    IncompleteToken(TokenKind),
    /// A malformed `\uXXXX` sequence or a surrogate pairing violation.
    #[error("invalid unicode escape: {0}")]
    InvalidUnicodeEscape(EscapeError),
    /// Malformed UTF-8 inside a string.
    #[error("invalid UTF-8 byte {0} in string")]
    InvalidUtf8(Found),
    /// Opening another array or object would exceed the configured depth.
    #[error("nesting depth exceeds the limit of {0}")]
    DepthLimitExceeded(usize),
    /// The validator already failed; it must be reset before reuse.
    #[error("validator is in an error state, call reset")]
    IllegalState,
}

/// Problems specific to `\u` escape sequences.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeError {
    /// A character other than `0-9`, `a-f`, `A-F` inside `\uXXXX`.
    #[error("invalid hex digit {0}")]
    InvalidHexDigit(Found),
    /// A high surrogate that is not immediately followed by a `\u` low
    /// surrogate.
    #[error("unpaired high surrogate \\u{0:04X}")]
    UnpairedHighSurrogate(u16),
    /// A low surrogate without a preceding high surrogate.
    #[error("unpaired low surrogate \\u{0:04X}")]
    UnpairedLowSurrogate(u16),
}

/// The kind of token left unfinished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A number missing required digits.
    Number,
    /// A string (or an escape inside one) missing its closing quote.
    String,
    /// A partially matched `true`, `false`, or `null`.
    Literal,
    /// Unclosed arrays or objects, or no value at all.
    Document,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Literal => "literal",
            TokenKind::Document => "document",
        })
    }
}

/// A single input byte, rendered as `'c'` when printable ASCII and as `0xNN`
/// otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Found(pub u8);

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            b @ 0x20..=0x7E => write!(f, "'{}'", char::from(b)),
            b => write!(f, "0x{b:02X}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn found_renders_printable_and_raw_bytes() {
        assert_eq!(Found(b'a').to_string(), "'a'");
        assert_eq!(Found(b'\n').to_string(), "0x0A");
        assert_eq!(Found(0xFF).to_string(), "0xFF");
    }

    #[test]
    fn error_display_includes_position() {
        let err = ValidationError {
            kind: ErrorKind::UnexpectedCharacter {
                found: Found(b'a'),
                context: "after array element",
            },
            offset: 2,
            line: 1,
            column: 3,
            near: BString::from("a"),
        };
        assert_eq!(
            err.to_string(),
            "unexpected character 'a' after array element at 1:3"
        );
    }

    #[test]
    fn escape_errors_render_code_units() {
        let kind = ErrorKind::InvalidUnicodeEscape(EscapeError::UnpairedLowSurrogate(0xDFB7));
        assert_eq!(kind.to_string(), "invalid unicode escape: unpaired low surrogate \\uDFB7");
    }
}
