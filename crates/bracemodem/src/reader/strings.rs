//! String grammar for values and quoted property names.

use super::{Progress, Reader, Span};
use crate::{
    SegmentPosition, TokenKind,
    bytes::{BACKSLASH, QUOTE, index_of_quote_backslash_or_control},
    error::{ReaderError, SyntaxError},
    escape_buffer::UnicodeEscapeBuffer,
};

/// Position inside an escaped string's validating loop.
#[derive(Debug, Clone, Copy)]
enum EscapeState {
    Plain,
    /// After a backslash.
    Escape,
    /// Inside the hex digits of `\u`.
    Hex(UnicodeEscapeBuffer),
}

impl Reader<'_> {
    pub(super) fn consume_string(&mut self) -> Result<Progress, ReaderError> {
        self.begin_token();
        self.bump();
        match self.scan_string()? {
            Some((span, escaped)) => {
                self.set_token(TokenKind::String, span, escaped);
                Ok(Progress::Token)
            }
            None => Ok(Progress::RollBack),
        }
    }

    /// Scans from just after the opening quote through the closing quote.
    ///
    /// Returns the span between the quotes and whether it holds escapes, or
    /// `None` when a partial block ends first.
    pub(super) fn scan_string(&mut self) -> Result<Option<(Span, bool)>, ReaderError> {
        let start = self.here();
        loop {
            let Some(b) = self.skip_plain_run() else {
                return self.scan_end_of_data(SyntaxError::UnterminatedString);
            };
            match b {
                QUOTE => {
                    let end = self.here();
                    self.bump();
                    return Ok(Some(((start, end), false)));
                }
                BACKSLASH => break,
                _ => return Err(self.error(SyntaxError::InvalidCharacterInString, Some(b))),
            }
        }
        self.scan_escaped_string(start)
    }

    /// Consumes bytes up to the next quote, backslash, or control byte and
    /// returns that byte without consuming it.
    fn skip_plain_run(&mut self) -> Option<u8> {
        loop {
            self.peek()?;
            let window = self.window();
            match index_of_quote_backslash_or_control(window) {
                Some(index) => {
                    self.advance_in_window(index);
                    return Some(window[index]);
                }
                None => self.advance_in_window(window.len()),
            }
        }
    }

    /// Byte-at-a-time validation once a backslash has been seen. The hex
    /// digit count lives in `state`, so a `\u` escape split across segments
    /// resumes where it left off.
    fn scan_escaped_string(&mut self, start: SegmentPosition) -> Result<Option<(Span, bool)>, ReaderError> {
        let mut state = EscapeState::Plain;
        loop {
            let next = match state {
                EscapeState::Plain => self.skip_plain_run(),
                EscapeState::Escape | EscapeState::Hex(_) => self.peek(),
            };
            let Some(b) = next else {
                return self.scan_end_of_data(SyntaxError::UnterminatedString);
            };

            state = match state {
                EscapeState::Plain => match b {
                    QUOTE => {
                        let end = self.here();
                        self.bump();
                        return Ok(Some(((start, end), true)));
                    }
                    BACKSLASH => EscapeState::Escape,
                    _ => return Err(self.error(SyntaxError::InvalidCharacterInString, Some(b))),
                },
                EscapeState::Escape => match b {
                    b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't' => EscapeState::Plain,
                    b'u' => EscapeState::Hex(UnicodeEscapeBuffer::new()),
                    _ => return Err(self.error(SyntaxError::InvalidEscape, Some(b))),
                },
                EscapeState::Hex(mut digits) => match digits.feed(b) {
                    Ok(Some(_)) => EscapeState::Plain,
                    Ok(None) => EscapeState::Hex(digits),
                    Err(kind) => return Err(self.error(kind, Some(b))),
                },
            };
            self.bump();
        }
    }
}
