/// Position inside the number grammar
/// `-? (0 | [1-9][0-9]*) (.[0-9]+)? ([eE][+-]?[0-9]+)?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NumberState {
    /// After a leading `-`.
    Sign,
    /// After a leading `0`; only `.`, `e`, or a terminator may follow.
    Zero,
    /// Inside the integer digits.
    Integer,
    /// After `.`; a digit is required.
    Point,
    /// Inside the fraction digits.
    Fraction,
    /// After `e`/`E`; a sign or digit is required.
    Exponent,
    /// After the exponent sign; a digit is required.
    ExponentSign,
    /// Inside the exponent digits.
    ExponentDigits,
}

/// Outcome of offering one byte to a number in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NumberStep {
    /// The byte extends the number.
    Continue(NumberState),
    /// The byte belongs to the number alphabet but not at this position.
    Invalid,
    /// The byte is not part of any number; it terminates this one.
    End,
}

impl NumberState {
    /// The state after the first byte of a number, or `None` if `byte` cannot
    /// start one.
    pub(crate) fn start(byte: u8) -> Option<Self> {
        match byte {
            b'-' => Some(Self::Sign),
            b'0' => Some(Self::Zero),
            b'1'..=b'9' => Some(Self::Integer),
            _ => None,
        }
    }

    pub(crate) fn step(self, byte: u8) -> NumberStep {
        let next = match (self, byte) {
            (Self::Sign, b'0') => Self::Zero,
            (Self::Sign, b'1'..=b'9') | (Self::Integer, b'0'..=b'9') => Self::Integer,
            (Self::Zero | Self::Integer, b'.') => Self::Point,
            (Self::Point | Self::Fraction, b'0'..=b'9') => Self::Fraction,
            (Self::Zero | Self::Integer | Self::Fraction, b'e' | b'E') => Self::Exponent,
            (Self::Exponent, b'+' | b'-') => Self::ExponentSign,
            (Self::Exponent | Self::ExponentSign | Self::ExponentDigits, b'0'..=b'9') => {
                Self::ExponentDigits
            }
            (_, b'0'..=b'9' | b'.' | b'e' | b'E' | b'+' | b'-') => return NumberStep::Invalid,
            _ => return NumberStep::End,
        };
        NumberStep::Continue(next)
    }

    /// Whether the digits seen so far form a complete number.
    pub(crate) fn is_complete(self) -> bool {
        matches!(
            self,
            Self::Zero | Self::Integer | Self::Fraction | Self::ExponentDigits
        )
    }
}
