use thiserror::Error;

use crate::TokenKind;

/// A grammar error raised by [`Reader::read`](crate::Reader::read).
///
/// The position is where reading stopped: it is not rolled back, so it points
/// at the offending byte (or one past the last byte when input ran out).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at {line}:{byte_position_in_line}")]
pub struct ReaderError {
    /// What went wrong.
    pub kind: SyntaxError,
    /// 0-based line number.
    pub line: usize,
    /// 0-based byte offset within `line`.
    pub byte_position_in_line: usize,
    /// The byte that could not be accepted, or `None` at end of data.
    pub byte: Option<u8>,
}

/// Grammar violations. None of these can be fixed by supplying more input.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("input does not contain any tokens")]
    ExpectedTokens,
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("expected the start of a value")]
    ExpectedStartOfValue,
    #[error("expected a property name or '}}'")]
    ExpectedPropertyName,
    #[error("expected ':' after a property name")]
    ExpectedSeparatorAfterPropertyName,
    #[error("expected ',' or '}}' after a value")]
    ExpectedSeparatorAfterValue,
    #[error("expected end of input after the top-level value")]
    ExpectedEndAfterSingleValue,
    #[error("trailing comma not allowed before '}}'")]
    TrailingCommaNotAllowed,
    #[error("'}}' does not close an open container")]
    MismatchedContainer,
    #[error("maximum configured depth of {0} exceeded")]
    DepthExceeded(usize),
    #[error("input ended with an open container")]
    OpenContainerAtEnd,
    #[error("invalid leading zero in number")]
    InvalidLeadingZero,
    #[error("expected a digit after the sign")]
    RequiredDigitAfterSign,
    #[error("expected a digit after the decimal point")]
    RequiredDigitAfterDecimal,
    #[error("expected a digit in the exponent")]
    RequiredDigitInExponent,
    #[error("number ended before its last required digit")]
    RequiredDigitAtEndOfData,
    #[error("expected a delimiter after a number")]
    ExpectedEndOfNumber,
    #[error("expected literal {}", .0.literal_text())]
    ExpectedLiteral(TokenKind),
    #[error("unterminated string")]
    UnterminatedString,
    #[error("control character in string")]
    InvalidCharacterInString,
    #[error("invalid escape sequence")]
    InvalidEscape,
    #[error("invalid hex digit in unicode escape")]
    InvalidHexDigit,
    #[error("comments are not allowed")]
    CommentsNotAllowed,
    #[error("expected '/' or '*' to start a comment")]
    InvalidCommentStart,
    #[error("unterminated comment")]
    UnterminatedComment,
    #[error("U+2028/U+2029 line separator inside a comment")]
    UnexpectedLineSeparator,
    #[error("skipping requires the final block of input")]
    SkipRequiresFinalBlock,
}

/// Failures when decoding the current token's value.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValueError {
    #[error("token {0:?} does not carry a {1} value")]
    WrongTokenKind(TokenKind, &'static str),
    #[error("invalid UTF-8 after {valid_up_to} bytes")]
    InvalidUtf8 { valid_up_to: usize },
    #[error("invalid surrogate escape \\u{0:04X}")]
    InvalidSurrogate(u16),
    #[error("invalid escape sequence")]
    InvalidEscape,
    #[error("number is out of range or not representable")]
    InvalidNumber,
}
