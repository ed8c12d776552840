use alloc::vec::Vec;

use super::{
    escape::{SurrogatePairs, UnicodeEscapeBuffer},
    literal::ExpectedLiteral,
    number::NumberState,
    utf8::Utf8Decoder,
};

/// An open container on the nesting stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Frame {
    Array,
    Object,
}

/// The lexical mode of the automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    /// A value must start here. `leading` is set right after `[`, where `]`
    /// may close an empty array instead.
    AwaitingValue { leading: bool },
    /// A member name must start here. `leading` is set right after `{`, where
    /// `}` may close an empty object instead.
    AwaitingObjectKey { leading: bool },
    AwaitingColon,
    AwaitingCommaOrClose,
    InString,
    InEscape,
    InUnicodeEscape,
    InNumber(NumberState),
    InLiteral(ExpectedLiteral),
    /// A root value just completed; another may follow.
    DoneValue,
    /// Terminal until `reset`.
    Error,
}

/// Sub-token state of the string currently being scanned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct StringState {
    /// The string is an object member name rather than a value.
    pub(crate) is_key: bool,
    pub(crate) utf8: Utf8Decoder,
    pub(crate) unicode: UnicodeEscapeBuffer,
    pub(crate) surrogates: SurrogatePairs,
}

impl StringState {
    pub(crate) fn begin(is_key: bool) -> Self {
        Self {
            is_key,
            ..Self::default()
        }
    }

    /// No partial UTF-8 sequence or unpaired high surrogate is outstanding,
    /// so plain ASCII content can be skipped in bulk.
    pub(crate) fn is_settled(&self) -> bool {
        !self.utf8.is_pending() && !self.surrogates.is_pending()
    }
}

/// Cumulative position in the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Position {
    pub(crate) offset: usize,
    pub(crate) line: usize,
    pub(crate) column: usize,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl Position {
    pub(crate) fn advance(&mut self, byte: u8) {
        self.offset += 1;
        if byte == b'\n' {
            self.line += 1;
            self.column = 1;
        } else if byte & 0xC0 != 0x80 {
            self.column += 1;
        }
    }

    /// Advances over `count` single-byte, non-newline characters.
    pub(crate) fn advance_columns(&mut self, count: usize) {
        self.offset += count;
        self.column += count;
    }
}

/// The complete resumable state of the validator between `feed` calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ScanState {
    pub(crate) stack: Vec<Frame>,
    pub(crate) mode: Mode,
    pub(crate) string: StringState,
    pub(crate) position: Position,
}

impl Default for ScanState {
    fn default() -> Self {
        Self {
            stack: Vec::new(),
            mode: Mode::AwaitingValue { leading: false },
            string: StringState::default(),
            position: Position::default(),
        }
    }
}

impl ScanState {
    /// Returns to the initial state, keeping the stack's allocation.
    pub(crate) fn reset(&mut self) {
        let mut stack = core::mem::take(&mut self.stack);
        stack.clear();
        *self = Self {
            stack,
            ..Self::default()
        };
    }
}
