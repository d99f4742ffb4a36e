//! Constant-time byte classes used by every sub-machine.

pub(crate) const QUOTE: u8 = b'"';
pub(crate) const BACKSLASH: u8 = b'\\';
pub(crate) const SLASH: u8 = b'/';
pub(crate) const STAR: u8 = b'*';
pub(crate) const OPEN_BRACE: u8 = b'{';
pub(crate) const CLOSE_BRACE: u8 = b'}';
pub(crate) const COMMA: u8 = b',';
pub(crate) const COLON: u8 = b':';
pub(crate) const LINE_FEED: u8 = b'\n';
pub(crate) const CARRIAGE_RETURN: u8 = b'\r';

/// Lead byte shared by the UTF-8 encodings of U+2028 and U+2029.
pub(crate) const LINE_SEPARATOR_LEAD: u8 = 0xE2;
pub(crate) const LINE_SEPARATOR_MID: u8 = 0x80;

#[inline]
pub(crate) fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

#[inline]
pub(crate) fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

/// Bytes that may legally terminate a number.
#[inline]
pub(crate) fn is_delimiter(b: u8) -> bool {
    matches!(b, b',' | b'}' | b' ' | b'\t' | b'\n' | b'\r' | b'/')
}

#[inline]
pub(crate) fn is_hex_digit(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

#[inline]
pub(crate) fn is_identifier_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

#[inline]
pub(crate) fn is_identifier_part(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

/// Third byte of U+2028 (`A8`) or U+2029 (`A9`).
#[inline]
pub(crate) fn is_line_separator_tail(b: u8) -> bool {
    b == 0xA8 || b == 0xA9
}

/// Index of the first `"`, `\`, or control byte (`< 0x20`) in `window`.
///
/// Quote and backslash are located with `memchr2`; only the prefix before
/// that hit is checked for control bytes.
#[inline]
pub(crate) fn index_of_quote_backslash_or_control(window: &[u8]) -> Option<usize> {
    let hit = memchr::memchr2(QUOTE, BACKSLASH, window);
    let prefix = match hit {
        Some(i) => &window[..i],
        None => window,
    };
    match prefix.iter().position(|&b| b < 0x20) {
        Some(i) => Some(i),
        None => hit,
    }
}
