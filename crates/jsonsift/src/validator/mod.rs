//! Incremental JSON syntax validator.
//!
//! Overview
//! - [`StreamingValidator`] accepts JSON text in chunks split at arbitrary
//!   byte boundaries and reports, per chunk, whether the input seen so far is
//!   still a valid JSON prefix. It never builds values.
//! - All progress lives in an explicit [`ScanState`]: the nesting stack, the
//!   lexical mode, and the sub-token state of whatever token is open at the
//!   end of a chunk (partial literal, number grammar position, escape digits,
//!   pending high surrogate, partial UTF-8 sequence).
//! - Chunk contents are never retained. A token that spans a boundary is
//!   resumed from its sub-token state on the next `feed`.
//!
//! Streams and root values
//! - Completing a root value moves the automaton to `DoneValue`, from which a
//!   new root value may begin without `reset`. Roots may be separated by
//!   whitespace or be directly adjacent.
//! - Numbers have no closing delimiter, so a number at the end of a chunk
//!   stays open; the next byte either extends it or terminates it. Only
//!   [`StreamingValidator::finish`] can close a number at end of stream.
//!
//! Failure
//! - The first violation returns an error and freezes the automaton in
//!   `Error`. Every later call fails with [`ErrorKind::IllegalState`] until
//!   [`StreamingValidator::reset`].

mod escape;
mod literal;
mod number;
mod state;
mod utf8;


use alloc::vec::Vec;

use bstr::BString;
use literal::{ExpectedLiteral, Step};
use number::{NumberState, NumberStep};
use state::{Frame, Mode, ScanState, StringState};

use crate::{
    error::{ErrorKind, Found, TokenKind, ValidationError},
    options::{SurrogatePolicy, ValidatorOptions},
};

/// How many bytes of the chunk are kept in [`ValidationError::near`].
const NEAR_LEN: usize = 16;

/// Whether the byte that was just examined is done with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Advance {
    Consume,
    /// The byte ended the open token and must be examined again in the new
    /// mode.
    Reconsume,
}

/// A resumable JSON syntax validator.
///
/// ```rust
/// use jsonsift::StreamingValidator;
///
/// let mut validator = StreamingValidator::default();
/// validator.feed(r#"{"name": "ja"#).unwrap();
/// validator.feed(r#"ne", "tags": [1, 2"#).unwrap();
/// validator.feed("3]}").unwrap();
/// validator.finish().unwrap();
///
/// assert!(validator.feed("]").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct StreamingValidator {
    state: ScanState,
    max_depth: usize,
    surrogates: SurrogatePolicy,
}

impl Default for StreamingValidator {
    fn default() -> Self {
        Self::new(ValidatorOptions::default())
    }
}

impl StreamingValidator {
    /// Creates a validator with empty state.
    #[must_use]
    pub fn new(options: ValidatorOptions) -> Self {
        Self {
            state: ScanState::default(),
            max_depth: options.max_depth,
            surrogates: options.surrogates,
        }
    }

    /// Returns the options this validator was created with.
    #[must_use]
    pub fn options(&self) -> ValidatorOptions {
        ValidatorOptions {
            max_depth: self.max_depth,
            surrogates: self.surrogates,
        }
    }

    /// Scans the next chunk of the stream.
    ///
    /// Returns `Ok(())` if the stream is still a valid JSON prefix after the
    /// chunk. Tokens may be left open at the end of the chunk.
    ///
    /// # Errors
    ///
    /// Returns the first syntax error found in the chunk, after which the
    /// validator is unusable until [`reset`](Self::reset). Fails with
    /// [`ErrorKind::IllegalState`] if a previous call already failed.
    pub fn feed(&mut self, chunk: impl AsRef<[u8]>) -> Result<(), ValidationError> {
        let chunk = chunk.as_ref();
        if self.state.mode == Mode::Error {
            return Err(self.illegal_state());
        }

        let mut index = 0;
        while let Some(&byte) = chunk.get(index) {
            if self.state.mode == Mode::InString && self.state.string.is_settled() {
                let run = plain_string_run(&chunk[index..]);
                if run > 0 {
                    self.state.position.advance_columns(run);
                    index += run;
                    continue;
                }
            }

            match self.step(byte) {
                Ok(Advance::Consume) => {
                    self.state.position.advance(byte);
                    index += 1;
                }
                Ok(Advance::Reconsume) => {}
                Err(kind) => return Err(self.fail(kind, &chunk[index..])),
            }
        }
        Ok(())
    }

    /// Marks the end of the stream.
    ///
    /// Succeeds when the scanner sits between root values at top level,
    /// which includes a stream that held only whitespace or nothing at all.
    /// A number still open at top level is completed. The validator stays
    /// usable after success: a further `feed` starts the next root value.
    ///
    /// # Errors
    ///
    /// Fails with [`ErrorKind::IncompleteToken`] if a token or container is
    /// still open. Fails with [`ErrorKind::IllegalState`] if a previous call
    /// already failed.
    pub fn finish(&mut self) -> Result<(), ValidationError> {
        let at_top_level = self.state.stack.is_empty();
        let incomplete = match self.state.mode {
            Mode::Error => return Err(self.illegal_state()),
            Mode::DoneValue => return Ok(()),
            Mode::AwaitingValue { .. } if at_top_level => return Ok(()),
            Mode::InNumber(number) if !number.is_complete() => TokenKind::Number,
            Mode::InNumber(_) if at_top_level => {
                self.complete_value();
                return Ok(());
            }
            Mode::InString | Mode::InEscape | Mode::InUnicodeEscape => TokenKind::String,
            Mode::InLiteral(_) => TokenKind::Literal,
            _ => TokenKind::Document,
        };
        Err(self.fail(ErrorKind::IncompleteToken(incomplete), &[]))
    }

    /// Discards all progress, including a previous failure.
    pub fn reset(&mut self) {
        event!(trace, offset = self.state.position.offset, "validator reset");
        self.state.reset();
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &ScanState {
        &self.state
    }

    fn step(&mut self, byte: u8) -> Result<Advance, ErrorKind> {
        match self.state.mode {
            Mode::AwaitingValue { leading } => match byte {
                b' ' | b'\t' | b'\n' | b'\r' => Ok(Advance::Consume),
                b']' if leading => Ok(self.close(Frame::Array)),
                _ => self.begin_value(byte),
            },
            Mode::DoneValue => match byte {
                b' ' | b'\t' | b'\n' | b'\r' => Ok(Advance::Consume),
                _ => self.begin_value(byte),
            },
            Mode::AwaitingObjectKey { leading } => match byte {
                b' ' | b'\t' | b'\n' | b'\r' => Ok(Advance::Consume),
                b'"' => Ok(self.begin_string(true)),
                b'}' if leading => Ok(self.close(Frame::Object)),
                _ => Err(unexpected(byte, "before object key")),
            },
            Mode::AwaitingColon => match byte {
                b' ' | b'\t' | b'\n' | b'\r' => Ok(Advance::Consume),
                b':' => {
                    self.state.mode = Mode::AwaitingValue { leading: false };
                    Ok(Advance::Consume)
                }
                _ => Err(unexpected(byte, "after object key")),
            },
            Mode::AwaitingCommaOrClose => self.after_value(byte),
            Mode::InString => self.string_byte(byte),
            Mode::InEscape => self.escape_byte(byte),
            Mode::InUnicodeEscape => self.unicode_escape_byte(byte),
            Mode::InNumber(number) => self.number_byte(number, byte),
            Mode::InLiteral(literal) => match literal.step(byte) {
                Step::NeedMore(rest) => {
                    self.state.mode = Mode::InLiteral(rest);
                    Ok(Advance::Consume)
                }
                Step::Done => {
                    self.complete_value();
                    Ok(Advance::Consume)
                }
                Step::Reject => Err(unexpected(byte, "in literal")),
            },
            Mode::Error => Err(ErrorKind::IllegalState),
        }
    }

    fn begin_value(&mut self, byte: u8) -> Result<Advance, ErrorKind> {
        self.state.mode = match byte {
            b'{' => {
                self.push(Frame::Object)?;
                Mode::AwaitingObjectKey { leading: true }
            }
            b'[' => {
                self.push(Frame::Array)?;
                Mode::AwaitingValue { leading: true }
            }
            b'"' => return Ok(self.begin_string(false)),
            _ => {
                if let Some(number) = NumberState::start(byte) {
                    Mode::InNumber(number)
                } else if let Some(literal) = ExpectedLiteral::new(byte) {
                    Mode::InLiteral(literal)
                } else {
                    return Err(unexpected(byte, "at start of value"));
                }
            }
        };
        Ok(Advance::Consume)
    }

    fn begin_string(&mut self, is_key: bool) -> Advance {
        self.state.string = StringState::begin(is_key);
        self.state.mode = Mode::InString;
        Advance::Consume
    }

    fn after_value(&mut self, byte: u8) -> Result<Advance, ErrorKind> {
        match (byte, self.state.stack.last()) {
            (b' ' | b'\t' | b'\n' | b'\r', _) => {}
            (b',', Some(Frame::Object)) => {
                self.state.mode = Mode::AwaitingObjectKey { leading: false };
            }
            (b',', Some(Frame::Array)) => {
                self.state.mode = Mode::AwaitingValue { leading: false };
            }
            (b'}', Some(Frame::Object)) => return Ok(self.close(Frame::Object)),
            (b']', Some(Frame::Array)) => return Ok(self.close(Frame::Array)),
            (_, Some(Frame::Object)) => return Err(unexpected(byte, "after object member")),
            (_, _) => return Err(unexpected(byte, "after array element")),
        }
        Ok(Advance::Consume)
    }

    fn string_byte(&mut self, byte: u8) -> Result<Advance, ErrorKind> {
        let string = &mut self.state.string;
        if string.utf8.is_pending() {
            string
                .utf8
                .step(byte)
                .map_err(|()| ErrorKind::InvalidUtf8(Found(byte)))?;
            return Ok(Advance::Consume);
        }
        if byte != b'\\' {
            string
                .surrogates
                .interrupt(self.surrogates)
                .map_err(ErrorKind::InvalidUnicodeEscape)?;
        }

        match byte {
            b'"' if string.is_key => self.state.mode = Mode::AwaitingColon,
            b'"' => self.complete_value(),
            b'\\' => self.state.mode = Mode::InEscape,
            0x00..=0x1F => return Err(unexpected(byte, "in string")),
            0x20..=0x7F => {}
            _ => string
                .utf8
                .step(byte)
                .map_err(|()| ErrorKind::InvalidUtf8(Found(byte)))?,
        }
        Ok(Advance::Consume)
    }

    fn escape_byte(&mut self, byte: u8) -> Result<Advance, ErrorKind> {
        match byte {
            b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't' => {
                self.state
                    .string
                    .surrogates
                    .interrupt(self.surrogates)
                    .map_err(ErrorKind::InvalidUnicodeEscape)?;
                self.state.mode = Mode::InString;
            }
            b'u' => {
                self.state.string.unicode.reset();
                self.state.mode = Mode::InUnicodeEscape;
            }
            _ => return Err(unexpected(byte, "in escape sequence")),
        }
        Ok(Advance::Consume)
    }

    fn unicode_escape_byte(&mut self, byte: u8) -> Result<Advance, ErrorKind> {
        let string = &mut self.state.string;
        let unit = string
            .unicode
            .feed(byte)
            .map_err(ErrorKind::InvalidUnicodeEscape)?;
        if let Some(unit) = unit {
            string
                .surrogates
                .accept(unit, self.surrogates)
                .map_err(ErrorKind::InvalidUnicodeEscape)?;
            self.state.mode = Mode::InString;
        }
        Ok(Advance::Consume)
    }

    fn number_byte(&mut self, number: NumberState, byte: u8) -> Result<Advance, ErrorKind> {
        match number.step(byte) {
            NumberStep::Continue(next) => {
                self.state.mode = Mode::InNumber(next);
                Ok(Advance::Consume)
            }
            NumberStep::Invalid => Err(unexpected(byte, "in number")),
            NumberStep::End if number.is_complete() => {
                self.complete_value();
                Ok(Advance::Reconsume)
            }
            NumberStep::End => Err(ErrorKind::IncompleteToken(TokenKind::Number)),
        }
    }

    fn push(&mut self, frame: Frame) -> Result<(), ErrorKind> {
        if self.state.stack.len() >= self.max_depth {
            return Err(ErrorKind::DepthLimitExceeded(self.max_depth));
        }
        self.state.stack.push(frame);
        Ok(())
    }

    /// Pops `frame`, which callers have already matched against the top of
    /// the stack.
    fn close(&mut self, frame: Frame) -> Advance {
        let popped = self.state.stack.pop();
        debug_assert_eq!(popped, Some(frame));
        self.complete_value();
        Advance::Consume
    }

    fn complete_value(&mut self) {
        if self.state.stack.is_empty() {
            self.state.mode = Mode::DoneValue;
        } else {
            self.state.mode = Mode::AwaitingCommaOrClose;
        }
    }

    fn fail(&mut self, kind: ErrorKind, rest: &[u8]) -> ValidationError {
        self.state.mode = Mode::Error;
        let position = self.state.position;
        event!(
            debug,
            offset = position.offset,
            line = position.line,
            column = position.column,
            error = %kind,
            "validation failed"
        );
        ValidationError {
            kind,
            offset: position.offset,
            line: position.line,
            column: position.column,
            near: BString::from(&rest[..rest.len().min(NEAR_LEN)]),
        }
    }

    fn illegal_state(&self) -> ValidationError {
        let position = self.state.position;
        ValidationError {
            kind: ErrorKind::IllegalState,
            offset: position.offset,
            line: position.line,
            column: position.column,
            near: BString::new(Vec::new()),
        }
    }
}

/// Validates a complete document (or a whitespace-separated sequence of
/// root values) in one call.
///
/// ```rust
/// assert!(jsonsift::validate(r#"{"a": [1, 2.5e3, null]}"#).is_ok());
/// assert!(jsonsift::validate("[1,]").is_err());
/// assert!(jsonsift::validate("[1").is_err());
/// ```
///
/// # Errors
///
/// Returns the first syntax error, or [`ErrorKind::IncompleteToken`] if the
/// input ends early.
pub fn validate(json: impl AsRef<[u8]>) -> Result<(), ValidationError> {
    let mut validator = StreamingValidator::default();
    validator.feed(json)?;
    validator.finish()
}

fn unexpected(byte: u8, context: &'static str) -> ErrorKind {
    ErrorKind::UnexpectedCharacter {
        found: Found(byte),
        context,
    }
}

/// Length of the leading run of string bytes that need no checks beyond
/// "printable ASCII, not a quote or backslash".
fn plain_string_run(bytes: &[u8]) -> usize {
    bytes
        .iter()
        .take_while(|&&b| matches!(b, 0x20..=0x7F) && b != b'"' && b != b'\\')
        .count()
}
