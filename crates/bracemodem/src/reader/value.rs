//! Views and decoders for the current token's value.

use alloc::{borrow::Cow, string::String, vec::Vec};

use bstr::ByteSlice;
use smallvec::SmallVec;

use super::Reader;
use crate::{
    Token, TokenKind, TokenValue, ValueSequence,
    bytes::BACKSLASH,
    error::ValueError,
    unescape::{unescape, unescaped_len_bounds},
};

/// Decoded values up to this size are compared without allocating.
const INLINE_UNESCAPE: usize = 256;

impl<'a> Reader<'a> {
    fn raw_sequence(&self) -> ValueSequence<'a> {
        ValueSequence::new(self.input, self.value_start, self.value_end)
    }

    /// The raw value bytes when they lie within one segment.
    ///
    /// Strings and property names exclude their quotes, comments their
    /// delimiters. The bytes are still escaped; see
    /// [`value_is_escaped`](Self::value_is_escaped).
    #[must_use]
    pub fn value_span(&self) -> Option<&'a [u8]> {
        self.raw_sequence().as_single()
    }

    /// The raw value bytes when they straddle segments.
    #[must_use]
    pub fn value_sequence(&self) -> Option<ValueSequence<'a>> {
        let sequence = self.raw_sequence();
        sequence.as_single().is_none().then_some(sequence)
    }

    /// Whether the current value is only available as a
    /// [`value_sequence`](Self::value_sequence).
    #[must_use]
    pub fn has_value_sequence(&self) -> bool {
        self.raw_sequence().as_single().is_none()
    }

    /// The raw value bytes, in whichever shape they come.
    #[must_use]
    pub fn value(&self) -> TokenValue<'a> {
        let sequence = self.raw_sequence();
        match sequence.as_single() {
            Some(span) => TokenValue::Span(span),
            None => TokenValue::Sequence(sequence),
        }
    }

    /// The current token, detached from the reader.
    #[must_use]
    pub fn token(&self) -> Token<'a> {
        Token {
            kind: self.token_kind,
            value: self.value(),
            escaped: self.value_is_escaped,
            start: self.token_start,
        }
    }

    /// The raw value bytes gathered into one buffer, escapes untouched.
    #[must_use]
    pub fn copy_value(&self) -> Vec<u8> {
        self.raw_sequence().to_vec()
    }

    /// The raw bytes, borrowed when they lie in one segment.
    fn raw_bytes(&self) -> Cow<'a, [u8]> {
        let sequence = self.raw_sequence();
        match sequence.as_single() {
            Some(span) => Cow::Borrowed(span),
            None => Cow::Owned(sequence.to_vec()),
        }
    }

    fn expect_kind(&self, kinds: &[TokenKind], what: &'static str) -> Result<(), ValueError> {
        if kinds.contains(&self.token_kind) {
            Ok(())
        } else {
            Err(ValueError::WrongTokenKind(self.token_kind, what))
        }
    }

    fn expect_text(&self) -> Result<(), ValueError> {
        self.expect_kind(&[TokenKind::String, TokenKind::PropertyName], "string")
    }

    /// The decoded text of a string or property name.
    ///
    /// Borrows from the input when the value is unescaped and lies within one
    /// segment.
    ///
    /// # Errors
    ///
    /// [`ValueError::WrongTokenKind`] on other tokens, [`ValueError::InvalidUtf8`]
    /// or an escape error when the bytes do not decode.
    pub fn get_string(&self) -> Result<Cow<'a, str>, ValueError> {
        self.expect_text()?;
        if !self.value_is_escaped {
            return match self.raw_bytes() {
                Cow::Borrowed(span) => utf8(span).map(Cow::Borrowed),
                Cow::Owned(bytes) => owned_utf8(bytes).map(Cow::Owned),
            };
        }
        let raw = self.raw_bytes();
        let mut decoded = Vec::with_capacity(raw.len());
        unescape(&raw, &mut decoded)?;
        owned_utf8(decoded).map(Cow::Owned)
    }

    /// The text of a comment, without its delimiters.
    ///
    /// # Errors
    ///
    /// [`ValueError::WrongTokenKind`] on other tokens and
    /// [`ValueError::InvalidUtf8`].
    pub fn get_comment(&self) -> Result<Cow<'a, str>, ValueError> {
        self.expect_kind(&[TokenKind::Comment], "comment")?;
        match self.raw_bytes() {
            Cow::Borrowed(span) => utf8(span).map(Cow::Borrowed),
            Cow::Owned(bytes) => owned_utf8(bytes).map(Cow::Owned),
        }
    }

    /// # Errors
    ///
    /// [`ValueError::WrongTokenKind`] unless the token is `true` or `false`.
    pub fn get_bool(&self) -> Result<bool, ValueError> {
        match self.token_kind {
            TokenKind::True => Ok(true),
            TokenKind::False => Ok(false),
            kind => Err(ValueError::WrongTokenKind(kind, "boolean")),
        }
    }

    /// # Errors
    ///
    /// [`ValueError::WrongTokenKind`] on non-numbers and
    /// [`ValueError::InvalidNumber`] when the number has a fraction or exponent,
    /// or does not fit.
    pub fn get_i64(&self) -> Result<i64, ValueError> {
        self.number_text()?.parse().map_err(|_| ValueError::InvalidNumber)
    }

    /// # Errors
    ///
    /// As [`get_i64`](Self::get_i64); negative numbers do not fit.
    pub fn get_u64(&self) -> Result<u64, ValueError> {
        self.number_text()?.parse().map_err(|_| ValueError::InvalidNumber)
    }

    /// # Errors
    ///
    /// [`ValueError::WrongTokenKind`] on non-numbers and
    /// [`ValueError::InvalidNumber`] when the value overflows to infinity.
    pub fn get_f64(&self) -> Result<f64, ValueError> {
        let value: f64 = self
            .number_text()?
            .parse()
            .map_err(|_| ValueError::InvalidNumber)?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ValueError::InvalidNumber)
        }
    }

    fn number_text(&self) -> Result<Cow<'a, str>, ValueError> {
        self.expect_kind(&[TokenKind::Number], "number")?;
        match self.raw_bytes() {
            Cow::Borrowed(span) => utf8(span).map(Cow::Borrowed),
            Cow::Owned(bytes) => owned_utf8(bytes).map(Cow::Owned),
        }
    }

    /// Whether the decoded string or property name equals `other`.
    ///
    /// Lengths are compared against the bounds an escaped value can decode
    /// to before anything is decoded, and unescaped values are compared chunk
    /// by chunk in place. Escaped values shorter than 256 decoded bytes are
    /// decoded on the stack.
    ///
    /// # Errors
    ///
    /// [`ValueError::WrongTokenKind`] on other tokens, or an escape error.
    pub fn value_equals(&self, other: &[u8]) -> Result<bool, ValueError> {
        self.expect_text()?;
        let sequence = self.raw_sequence();
        let (min, max) = unescaped_len_bounds(sequence.len(), self.value_is_escaped);
        if other.len() < min || other.len() > max {
            return Ok(false);
        }

        if !self.value_is_escaped {
            let mut rest = other;
            for chunk in sequence.chunks() {
                let Some(tail) = rest.strip_prefix(chunk) else {
                    return Ok(false);
                };
                rest = tail;
            }
            return Ok(rest.is_empty());
        }

        let raw = self.raw_bytes();
        let prefix = memchr::memchr(BACKSLASH, &raw).unwrap_or(raw.len());
        if other.len() < prefix || raw[..prefix] != other[..prefix] {
            return Ok(false);
        }
        let mut decoded: SmallVec<[u8; INLINE_UNESCAPE]> = SmallVec::new();
        unescape(&raw[prefix..], &mut decoded)?;
        Ok(decoded[..] == other[prefix..])
    }

    /// [`value_equals`](Self::value_equals) for text.
    ///
    /// # Errors
    ///
    /// As [`value_equals`](Self::value_equals).
    pub fn value_equals_str(&self, other: &str) -> Result<bool, ValueError> {
        self.value_equals(other.as_bytes())
    }
}

fn utf8(bytes: &[u8]) -> Result<&str, ValueError> {
    bytes.to_str().map_err(|e| ValueError::InvalidUtf8 {
        valid_up_to: e.valid_up_to(),
    })
}

fn owned_utf8(bytes: Vec<u8>) -> Result<String, ValueError> {
    String::from_utf8(bytes).map_err(|e| ValueError::InvalidUtf8 {
        valid_up_to: e.utf8_error().valid_up_to(),
    })
}
