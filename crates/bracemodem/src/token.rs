//! Token kinds and borrowed value views.

use alloc::vec::Vec;
use core::fmt;

use bstr::BStr;

use crate::input::Input;

/// The kind of the token the reader is positioned on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    /// No token has been read yet.
    #[default]
    None,
    /// `{`
    ContainerStart,
    /// `}`
    ContainerEnd,
    /// A quoted or bare name; its `:` has already been consumed.
    PropertyName,
    /// A quoted string value.
    String,
    /// A number value.
    Number,
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
    /// A `//` or `/* */` comment, surfaced only with
    /// [`CommentHandling::Allow`](crate::CommentHandling::Allow).
    Comment,
}

impl TokenKind {
    /// Source text of a literal token kind, or `""` for other kinds.
    #[must_use]
    pub fn literal_text(self) -> &'static str {
        match self {
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Null => "null",
            _ => "",
        }
    }

    /// Whether this kind completes a value.
    #[must_use]
    pub fn is_value(self) -> bool {
        matches!(
            self,
            TokenKind::ContainerEnd
                | TokenKind::String
                | TokenKind::Number
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
        )
    }
}

/// A location in the input: segment index plus byte offset in that segment.
///
/// For single-buffer input the segment is always `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SegmentPosition {
    /// Index of the segment.
    pub segment: usize,
    /// Byte offset within the segment.
    pub offset: usize,
}

/// A token value that spans more than one input segment.
///
/// The bytes are never copied; iterate [`chunks`](Self::chunks) to visit them
/// in order, or call [`to_vec`](Self::to_vec) to gather them.
#[derive(Clone, Copy)]
pub struct ValueSequence<'a> {
    input: Input<'a>,
    start: SegmentPosition,
    end: SegmentPosition,
}

impl<'a> ValueSequence<'a> {
    pub(crate) fn new(input: Input<'a>, start: SegmentPosition, end: SegmentPosition) -> Self {
        Self { input, start, end }
    }

    /// The non-empty chunks of the value, in input order.
    pub fn chunks(self) -> impl Iterator<Item = &'a [u8]> {
        let Self { input, start, end } = self;
        (start.segment..=end.segment)
            .filter_map(move |index| {
                let segment = input.segment(index)?;
                let from = if index == start.segment { start.offset } else { 0 };
                let to = if index == end.segment { end.offset } else { segment.len() };
                segment.get(from..to)
            })
            .filter(|chunk| !chunk.is_empty())
    }

    /// Total length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks().map(<[u8]>::len).sum()
    }

    /// Whether the sequence holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks().next().is_none()
    }

    /// Copies the chunks into one buffer.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        for chunk in self.chunks() {
            out.extend_from_slice(chunk);
        }
        out
    }

    /// The only chunk, if the value lies within one segment.
    pub(crate) fn as_single(&self) -> Option<&'a [u8]> {
        let mut chunks = self.chunks();
        match (chunks.next(), chunks.next()) {
            (None, _) => Some(&[][..]),
            (Some(only), None) => Some(only),
            (Some(_), Some(_)) => None,
        }
    }
}

impl fmt::Debug for ValueSequence<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.chunks().map(BStr::new))
            .finish()
    }
}

impl PartialEq for ValueSequence<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.to_vec() == other.to_vec()
    }
}

/// The raw bytes of a token: one borrowed slice, or a sequence of them when
/// the token straddles segments.
#[derive(Clone, Copy, PartialEq)]
pub enum TokenValue<'a> {
    /// The value lies within a single segment.
    Span(&'a [u8]),
    /// The value straddles two or more non-empty segments.
    Sequence(ValueSequence<'a>),
}

impl<'a> TokenValue<'a> {
    /// Total length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            TokenValue::Span(s) => s.len(),
            TokenValue::Sequence(seq) => seq.len(),
        }
    }

    /// Whether the value holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copies the raw (still escaped) bytes.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        match self {
            TokenValue::Span(s) => s.to_vec(),
            TokenValue::Sequence(seq) => seq.to_vec(),
        }
    }
}

impl fmt::Debug for TokenValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Span(s) => fmt::Debug::fmt(BStr::new(s), f),
            TokenValue::Sequence(seq) => seq.fmt(f),
        }
    }
}

/// A snapshot of the current token, detached from the reader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'a> {
    /// Token kind.
    pub kind: TokenKind,
    /// Raw value bytes. Strings exclude their quotes, comments their
    /// delimiters.
    pub value: TokenValue<'a>,
    /// Whether `value` contains escape sequences.
    pub escaped: bool,
    /// Absolute byte offset where the token began.
    pub start: usize,
}
