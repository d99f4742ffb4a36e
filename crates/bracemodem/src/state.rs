//! The persistable reader state capsule.

#![allow(clippy::struct_excessive_bools)]

use crate::{TokenKind, depth::DepthStack, options::ReaderOptions};

/// Everything a [`Reader`](crate::Reader) needs to continue a document after
/// its input ran out.
///
/// A capsule holds no borrowed data, so it can outlive the buffers that
/// produced it, cross an `await` point, or (with the `serde` feature) be
/// written to disk. Treat it as opaque: obtain it from
/// [`Reader::current_state`](crate::Reader::current_state) and hand it back to
/// [`Reader::new`](crate::Reader::new) unchanged, together with the bytes
/// after [`Reader::bytes_consumed`](crate::Reader::bytes_consumed).
///
/// # Examples
///
/// ```rust
/// use bracemodem::{Reader, ReaderState, TokenKind};
///
/// let mut reader = Reader::new(b"{\"ke", false, ReaderState::default());
/// assert!(reader.read().unwrap());
/// assert!(!reader.read().unwrap());
/// let consumed = reader.bytes_consumed();
/// let state = reader.current_state();
///
/// let rest = b"{\"key\":true}";
/// let mut reader = Reader::new(&rest[consumed..], true, state);
/// assert!(reader.read().unwrap());
/// assert_eq!(reader.token_kind(), TokenKind::PropertyName);
/// assert_eq!(reader.get_string().unwrap(), "key");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReaderState {
    pub(crate) line: usize,
    pub(crate) byte_position_in_line: usize,
    pub(crate) in_container: bool,
    pub(crate) is_not_primitive: bool,
    pub(crate) value_is_escaped: bool,
    pub(crate) trailing_comma_before_comment: bool,
    pub(crate) token_kind: TokenKind,
    pub(crate) previous_token_kind: TokenKind,
    pub(crate) options: ReaderOptions,
    pub(crate) depth: DepthStack,
}

impl ReaderState {
    /// A fresh capsule for a new document read with `options`.
    #[must_use]
    pub fn new(options: ReaderOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// The options this document is read with.
    #[must_use]
    pub fn options(&self) -> ReaderOptions {
        self.options
    }

    /// Whether the first top-level value is a container rather than a bare
    /// primitive.
    #[must_use]
    pub fn is_not_primitive(&self) -> bool {
        self.is_not_primitive
    }
}
