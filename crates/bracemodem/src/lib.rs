//! A forward-only, pull-based, zero-copy tokenizer for brace-delimited,
//! JSON-like text.
//!
//! [`Reader::read`] yields one token per call. Values are borrowed from the
//! caller's input; a value that straddles two input segments is exposed as a
//! [`ValueSequence`] of chunks rather than copied. When a partial block ends
//! mid-token, `read` returns `Ok(false)` and the reader can be rebuilt later
//! from its [`ReaderState`] and the remaining bytes.
//!
//! ```rust
//! use bracemodem::{Reader, ReaderState, TokenKind};
//!
//! let segments: [&[u8]; 3] = [b"{greet", b"ing:\"hel", b"lo\"}"];
//! let mut reader = Reader::from_segments(&segments, true, ReaderState::default());
//! assert!(reader.read().unwrap());
//! assert!(reader.read().unwrap());
//! assert_eq!(reader.token_kind(), TokenKind::PropertyName);
//! assert!(reader.has_value_sequence());
//! assert!(reader.value_equals_str("greeting").unwrap());
//! assert!(reader.read().unwrap());
//! assert_eq!(reader.get_string().unwrap(), "hello");
//! ```

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(test)]
extern crate std;

#[cfg(feature = "tracing")]
macro_rules! trace_reader {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_reader {
    ($($arg:tt)*) => {};
}

mod bytes;
mod depth;
mod error;
mod escape_buffer;
mod input;
mod literal_buffer;
mod options;
mod reader;
mod state;
mod token;
pub mod unescape;

#[cfg(test)]
mod tests;

pub use error::{ReaderError, SyntaxError, ValueError};
pub use options::{CommentHandling, DEFAULT_MAX_DEPTH, ReaderOptions};
pub use reader::Reader;
pub use state::ReaderState;
pub use token::{SegmentPosition, Token, TokenKind, TokenValue, ValueSequence};
