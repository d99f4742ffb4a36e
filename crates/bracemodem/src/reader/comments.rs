//! `//` and `/* */` comments.
//!
//! Both forms reject U+2028 and U+2029: they are line breaks to some
//! consumers of this format but not to the line counter here.

use super::{Progress, Reader, Span};
use crate::{
    TokenKind,
    bytes::{
        CARRIAGE_RETURN, LINE_FEED, LINE_SEPARATOR_LEAD, LINE_SEPARATOR_MID, SLASH, STAR,
        is_line_separator_tail,
    },
    error::{ReaderError, SyntaxError},
};

impl Reader<'_> {
    pub(super) fn consume_comment(&mut self) -> Result<Progress, ReaderError> {
        self.begin_token();
        match self.scan_comment()? {
            Some(span) => {
                self.set_token(TokenKind::Comment, span, false);
                Ok(Progress::Token)
            }
            None => Ok(Progress::RollBack),
        }
    }

    /// Scans a comment whose `/` is the next byte. The returned span excludes
    /// the delimiters and the terminating line break.
    pub(super) fn scan_comment(&mut self) -> Result<Option<Span>, ReaderError> {
        if !self.options.comments_allowed() {
            return Err(self.error(SyntaxError::CommentsNotAllowed, Some(SLASH)));
        }
        self.bump();
        match self.peek() {
            Some(SLASH) => {
                self.bump();
                self.scan_single_line_comment()
            }
            Some(STAR) => {
                self.bump();
                self.scan_multi_line_comment()
            }
            Some(other) => Err(self.error(SyntaxError::InvalidCommentStart, Some(other))),
            None => self.scan_end_of_data(SyntaxError::InvalidCommentStart),
        }
    }

    fn scan_single_line_comment(&mut self) -> Result<Option<Span>, ReaderError> {
        let start = self.here();
        loop {
            if self.peek().is_none() {
                // end of the final block also ends the comment
                return if self.is_final_block {
                    Ok(Some((start, self.here())))
                } else {
                    Ok(None)
                };
            }
            let window = self.window();
            let Some(index) = memchr::memchr3(LINE_FEED, CARRIAGE_RETURN, LINE_SEPARATOR_LEAD, window)
            else {
                self.advance_in_window(window.len());
                continue;
            };
            self.advance_in_window(index);
            match window[index] {
                LINE_FEED => {
                    let end = self.here();
                    self.bump_newline();
                    return Ok(Some((start, end)));
                }
                CARRIAGE_RETURN => {
                    let end = self.here();
                    self.bump_newline();
                    match self.peek() {
                        Some(LINE_FEED) => self.absorb_line_feed(),
                        Some(_) => {}
                        None if self.is_final_block => {}
                        // an LF in the next block belongs to this comment
                        None => return Ok(None),
                    }
                    return Ok(Some((start, end)));
                }
                _ => {
                    if self.check_line_separator()? {
                        return Ok(None);
                    }
                    self.bump();
                }
            }
        }
    }

    fn scan_multi_line_comment(&mut self) -> Result<Option<Span>, ReaderError> {
        let start = self.here();
        loop {
            if self.peek().is_none() {
                return self.scan_end_of_data(SyntaxError::UnterminatedComment);
            }
            let window = self.window();
            let Some(index) = window
                .iter()
                .position(|&b| matches!(b, STAR | LINE_FEED | CARRIAGE_RETURN | LINE_SEPARATOR_LEAD))
            else {
                self.advance_in_window(window.len());
                continue;
            };
            self.advance_in_window(index);
            match window[index] {
                STAR => {
                    let end = self.here();
                    self.bump();
                    if self.peek() == Some(SLASH) {
                        self.bump();
                        return Ok(Some((start, end)));
                    }
                }
                LINE_FEED => self.bump_newline(),
                CARRIAGE_RETURN => {
                    self.bump_newline();
                    if self.peek() == Some(LINE_FEED) {
                        self.absorb_line_feed();
                    }
                }
                _ => {
                    if self.check_line_separator()? {
                        return Ok(None);
                    }
                    self.bump();
                }
            }
        }
    }

    /// Called on an `E2` lead byte. Fails on U+2028/U+2029 and returns `true`
    /// when a partial block ends before the sequence can be told apart.
    fn check_line_separator(&self) -> Result<bool, ReaderError> {
        match (self.peek_at(1), self.peek_at(2)) {
            (Some(LINE_SEPARATOR_MID), Some(tail)) if is_line_separator_tail(tail) => {
                Err(self.error(SyntaxError::UnexpectedLineSeparator, Some(tail)))
            }
            (Some(LINE_SEPARATOR_MID), None) | (None, _) => Ok(!self.is_final_block),
            _ => Ok(false),
        }
    }
}
