#![allow(clippy::struct_excessive_bools)]

/// Depth used when [`ReaderOptions::max_depth`] is `0`.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// How the reader treats `//` and `/* */` comments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommentHandling {
    /// A `/` outside of a string is a grammar error.
    #[default]
    Disallow,
    /// Comments are surfaced as [`TokenKind::Comment`](crate::TokenKind::Comment)
    /// tokens.
    Allow,
    /// Comments are consumed and never surfaced.
    Skip,
}

/// Configuration options for the [`Reader`](crate::Reader).
///
/// Options are fixed for the lifetime of a logical document: they travel
/// inside the [`ReaderState`](crate::ReaderState) so a resumed reader keeps
/// the same grammar.
///
/// # Examples
///
/// ```rust
/// use bracemodem::{CommentHandling, Reader, ReaderOptions};
///
/// let options = ReaderOptions {
///     comment_handling: CommentHandling::Skip,
///     allow_trailing_commas: true,
///     ..Default::default()
/// };
/// let mut reader = Reader::with_options(b"{a:1, /* done */}", options);
/// while reader.read().unwrap() {}
/// assert_eq!(reader.bytes_consumed(), 17);
/// ```
///
/// # Default
///
/// Depth 64, comments disallowed, all flags `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReaderOptions {
    /// Maximum nesting depth of containers.
    ///
    /// `0` means [`DEFAULT_MAX_DEPTH`], not "no containers".
    ///
    /// # Default
    ///
    /// `0`
    pub max_depth: usize,

    /// Whether comments are rejected, surfaced, or skipped.
    ///
    /// # Default
    ///
    /// [`CommentHandling::Disallow`]
    pub comment_handling: CommentHandling,

    /// Whether a `,` may directly precede the closing `}`.
    ///
    /// ```text
    /// {a:1,}
    /// ```
    ///
    /// # Default
    ///
    /// `false`
    pub allow_trailing_commas: bool,

    /// Whether more than one top-level value may appear in the input.
    ///
    /// When `true`, the reader does not require end of input after the first
    /// complete value and keeps producing tokens for any further values.
    ///
    /// ```text
    /// {}{}{}
    /// ```
    ///
    /// ```text
    /// 123 45 678 9
    /// ```
    ///
    /// # Default
    ///
    /// `false`
    pub allow_multiple_values: bool,
}

impl ReaderOptions {
    /// The depth limit actually enforced.
    #[must_use]
    pub fn effective_max_depth(&self) -> usize {
        if self.max_depth == 0 {
            DEFAULT_MAX_DEPTH
        } else {
            self.max_depth
        }
    }

    pub(crate) fn comments_allowed(&self) -> bool {
        self.comment_handling != CommentHandling::Disallow
    }
}
