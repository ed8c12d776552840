/// What happened after feeding one more byte into the literal matcher?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// Byte matched, but the literal is not finished yet.
    NeedMore(ExpectedLiteral),
    /// Byte matched *and* it was the last byte of the literal.
    Done,
    /// Byte did **not** match the expected byte.
    Reject,
}

/// The bytes of `true`, `false`, or `null` still to be seen.
///
/// Only the remainder is stored, so a literal split across any number of
/// chunks resumes from exactly the matched prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ExpectedLiteral(&'static [u8]);

impl ExpectedLiteral {
    /// Start matching after the *first* byte (`n`, `t`, or `f`).
    pub(crate) fn new(first: u8) -> Option<Self> {
        match first {
            b'n' => Some(Self(b"ull")),
            b't' => Some(Self(b"rue")),
            b'f' => Some(Self(b"alse")),
            _ => None,
        }
    }

    pub(crate) fn step(self, byte: u8) -> Step {
        match self.0.split_first() {
            Some((&expected, rest)) if expected == byte => {
                if rest.is_empty() {
                    Step::Done
                } else {
                    Step::NeedMore(Self(rest))
                }
            }
            _ => Step::Reject,
        }
    }
}
