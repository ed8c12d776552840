/// Incremental UTF-8 validation for string contents.
///
/// Tracks how many continuation bytes the current sequence still needs and
/// the legal range of the next one, which is narrower than `0x80..=0xBF`
/// right after the lead bytes that could otherwise start an overlong form,
/// a surrogate code point, or a value above U+10FFFF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Utf8Decoder {
    remaining: u8,
    lower: u8,
    upper: u8,
}

impl Default for Utf8Decoder {
    fn default() -> Self {
        Self {
            remaining: 0,
            lower: 0x80,
            upper: 0xBF,
        }
    }
}

impl Utf8Decoder {
    /// Returns `true` while a multi-byte sequence is incomplete.
    pub(crate) fn is_pending(self) -> bool {
        self.remaining > 0
    }

    /// Feeds one non-ASCII byte (a lead byte when idle, a continuation byte
    /// otherwise). Returns `Err(())` if the byte cannot appear here.
    pub(crate) fn step(&mut self, byte: u8) -> Result<(), ()> {
        if self.remaining > 0 {
            if !(self.lower..=self.upper).contains(&byte) {
                return Err(());
            }
            self.remaining -= 1;
            self.lower = 0x80;
            self.upper = 0xBF;
            return Ok(());
        }

        let (remaining, lower, upper) = match byte {
            0xC2..=0xDF => (1, 0x80, 0xBF),
            0xE0 => (2, 0xA0, 0xBF),
            0xE1..=0xEC | 0xEE..=0xEF => (2, 0x80, 0xBF),
            0xED => (2, 0x80, 0x9F),
            0xF0 => (3, 0x90, 0xBF),
            0xF1..=0xF3 => (3, 0x80, 0xBF),
            0xF4 => (3, 0x80, 0x8F),
            _ => return Err(()),
        };
        *self = Self {
            remaining,
            lower,
            upper,
        };
        Ok(())
    }
}
