//! Accumulator for the four hex digits of a `\uXXXX` escape.
//!
//! The [`UnicodeEscapeBuffer`] takes ASCII hexadecimal digits (`0-9`, `A-F`,
//! `a-f`) one byte at a time and yields the UTF-16 code unit once the fourth
//! digit arrives, then resets itself for the next escape. Because it keeps its
//! digit count between calls, the string scanner can feed it across a segment
//! boundary without re-reading earlier digits.
//!
//! Surrogates are returned as-is; pairing them is the unescape engine's job.

use crate::{bytes::is_hex_digit, error::SyntaxError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Accumulates up to four hexadecimal digits into one UTF-16 code unit.
pub(crate) struct UnicodeEscapeBuffer {
    acc: u16,
    len: u8,
}

impl UnicodeEscapeBuffer {
    pub(crate) fn new() -> Self {
        Self { acc: 0, len: 0 }
    }

    /// Clears any accumulated digits.
    pub(crate) fn reset(&mut self) {
        self.acc = 0;
        self.len = 0;
    }

    /// Number of digits seen so far for the escape in flight.
    #[cfg(test)]
    pub(crate) fn digits(&self) -> u8 {
        self.len
    }

    #[inline]
    fn hex_val(b: u8) -> Option<u16> {
        match b {
            b'0'..=b'9' => Some(u16::from(b - b'0')),
            b'a'..=b'f' => Some(u16::from(b - b'a' + 10)),
            b'A'..=b'F' => Some(u16::from(b - b'A' + 10)),
            _ => None,
        }
    }

    /// Feeds one byte of the escape.
    ///
    /// - `Ok(None)` while fewer than four digits have been seen.
    /// - `Ok(Some(unit))` on the fourth digit; the buffer is reset.
    /// - `Err(InvalidHexDigit)` if `b` is not a hex digit. The buffer keeps its
    ///   state so the caller can report the position.
    pub(crate) fn feed(&mut self, b: u8) -> Result<Option<u16>, SyntaxError> {
        debug_assert!(self.len < 4, "escape buffer overflow");
        let d = Self::hex_val(b).ok_or(SyntaxError::InvalidHexDigit)?;
        debug_assert!(is_hex_digit(b));

        self.acc = (self.acc << 4) | d;
        self.len += 1;

        if self.len < 4 {
            return Ok(None);
        }

        let unit = self.acc;
        self.reset();
        Ok(Some(unit))
    }
}
