//! Accumulation of `\uXXXX` escapes and UTF-16 surrogate pairing.
//!
//! [`UnicodeEscapeBuffer`] collects the four hexadecimal digits of one escape
//! as they arrive, possibly one per chunk, and yields the UTF-16 code unit
//! once the fourth digit is seen. [`SurrogatePairs`] then decides whether the
//! sequence of code units forms valid Unicode scalar values under the
//! configured [`SurrogatePolicy`].

use crate::{
    error::{EscapeError, Found},
    options::SurrogatePolicy,
};

const HIGH_SURROGATES: core::ops::RangeInclusive<u16> = 0xD800..=0xDBFF;
const LOW_SURROGATES: core::ops::RangeInclusive<u16> = 0xDC00..=0xDFFF;

/// Buffer for up to four hexadecimal digits of a `\u` escape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct UnicodeEscapeBuffer {
    value: u16,
    len: u8,
}

impl UnicodeEscapeBuffer {
    /// Clears any accumulated digits.
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    /// Feeds one byte of the escape.
    ///
    /// Returns `Ok(None)` until the fourth digit, then `Ok(Some(unit))` and
    /// clears itself.
    pub(crate) fn feed(&mut self, byte: u8) -> Result<Option<u16>, EscapeError> {
        let digit = match byte {
            b'0'..=b'9' => byte - b'0',
            b'a'..=b'f' => byte - b'a' + 10,
            b'A'..=b'F' => byte - b'A' + 10,
            _ => return Err(EscapeError::InvalidHexDigit(Found(byte))),
        };
        self.value = (self.value << 4) | u16::from(digit);
        self.len += 1;
        if self.len == 4 {
            let unit = self.value;
            self.reset();
            Ok(Some(unit))
        } else {
            Ok(None)
        }
    }
}

/// Tracks a high surrogate waiting for its low half.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct SurrogatePairs {
    pending_high: Option<u16>,
}

impl SurrogatePairs {
    pub(crate) fn is_pending(self) -> bool {
        self.pending_high.is_some()
    }

    /// Accepts one decoded code unit, pairing it with a waiting high
    /// surrogate when there is one.
    pub(crate) fn accept(&mut self, unit: u16, policy: SurrogatePolicy) -> Result<(), EscapeError> {
        match self.pending_high.take() {
            Some(_) if LOW_SURROGATES.contains(&unit) => return Ok(()),
            Some(high) if policy == SurrogatePolicy::Reject => {
                return Err(EscapeError::UnpairedHighSurrogate(high));
            }
            _ => {}
        }

        if HIGH_SURROGATES.contains(&unit) {
            self.pending_high = Some(unit);
        } else if LOW_SURROGATES.contains(&unit) && policy == SurrogatePolicy::Reject {
            return Err(EscapeError::UnpairedLowSurrogate(unit));
        }
        Ok(())
    }

    /// Called when something other than a `\u` escape follows the current
    /// position. A waiting high surrogate is unpaired at that point.
    pub(crate) fn interrupt(&mut self, policy: SurrogatePolicy) -> Result<(), EscapeError> {
        match (self.pending_high.take(), policy) {
            (Some(high), SurrogatePolicy::Reject) => Err(EscapeError::UnpairedHighSurrogate(high)),
            _ => Ok(()),
        }
    }
}
