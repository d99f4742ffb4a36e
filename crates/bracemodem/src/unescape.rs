//! Escape decoding for string and property-name values.
//!
//! The reader never decodes while scanning; it only records that a value
//! contains a backslash. Decoding happens here, on demand, when a consumer
//! asks for the text or compares it.

use crate::{bytes::BACKSLASH, error::ValueError, escape_buffer::UnicodeEscapeBuffer};

/// Longest raw form of a single decoded byte: `\u0041` is six bytes for `A`.
pub const MAX_EXPANSION_FACTOR: usize = 6;

/// Inclusive bounds on the decoded byte length of a raw value of `raw_len`
/// bytes.
///
/// Unescaped values decode to exactly `raw_len` bytes. Every escape decodes
/// to fewer bytes than it occupies, and none to fewer than a sixth.
#[must_use]
pub fn unescaped_len_bounds(raw_len: usize, escaped: bool) -> (usize, usize) {
    if escaped {
        (raw_len.div_ceil(MAX_EXPANSION_FACTOR), raw_len)
    } else {
        (raw_len, raw_len)
    }
}

/// Decodes every escape in `src` and appends the resulting UTF-8 bytes to
/// `dst`.
///
/// `src` is the raw value between the quotes. Non-escaped bytes are copied
/// through untouched; UTF-8 validity is the caller's concern.
///
/// # Errors
///
/// [`ValueError::InvalidEscape`] for a malformed escape and
/// [`ValueError::InvalidSurrogate`] for a lone or mismatched surrogate.
///
/// # Examples
///
/// ```rust
/// let mut out = Vec::new();
/// bracemodem::unescape::unescape(br"A\n\u00e9\uD83D\uDE00", &mut out).unwrap();
/// assert_eq!(out, "A\né😀".as_bytes());
/// ```
pub fn unescape<E: Extend<u8>>(src: &[u8], dst: &mut E) -> Result<(), ValueError> {
    let mut rest = src;
    while let Some(idx) = memchr::memchr(BACKSLASH, rest) {
        dst.extend(rest[..idx].iter().copied());
        rest = decode_escape(&rest[idx + 1..], dst)?;
    }
    dst.extend(rest.iter().copied());
    Ok(())
}

/// Decodes one escape whose backslash has already been stripped. Returns the
/// input following the escape.
fn decode_escape<'s, E: Extend<u8>>(src: &'s [u8], dst: &mut E) -> Result<&'s [u8], ValueError> {
    let (&letter, rest) = src.split_first().ok_or(ValueError::InvalidEscape)?;
    let decoded = match letter {
        b'"' => b'"',
        b'\\' => b'\\',
        b'/' => b'/',
        b'b' => 0x08,
        b'f' => 0x0C,
        b'n' => b'\n',
        b'r' => b'\r',
        b't' => b'\t',
        b'u' => return decode_unicode(rest, dst),
        _ => return Err(ValueError::InvalidEscape),
    };
    dst.extend([decoded]);
    Ok(rest)
}

fn read_code_unit(src: &[u8]) -> Result<(u16, &[u8]), ValueError> {
    if src.len() < 4 {
        return Err(ValueError::InvalidEscape);
    }
    let mut buf = UnicodeEscapeBuffer::new();
    let mut unit = None;
    for &b in &src[..4] {
        unit = buf.feed(b).map_err(|_| ValueError::InvalidEscape)?;
    }
    let unit = unit.ok_or(ValueError::InvalidEscape)?;
    Ok((unit, &src[4..]))
}

fn decode_unicode<'s, E: Extend<u8>>(src: &'s [u8], dst: &mut E) -> Result<&'s [u8], ValueError> {
    let (unit, rest) = read_code_unit(src)?;
    let (scalar, rest) = match unit {
        0xD800..=0xDBFF => {
            let Some(low_src) = rest.strip_prefix(br"\u") else {
                return Err(ValueError::InvalidSurrogate(unit));
            };
            let (low, after) = read_code_unit(low_src)?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(ValueError::InvalidSurrogate(unit));
            }
            let high = u32::from(unit - 0xD800);
            let low = u32::from(low - 0xDC00);
            (0x10000 + (high << 10) + low, after)
        }
        0xDC00..=0xDFFF => return Err(ValueError::InvalidSurrogate(unit)),
        _ => (u32::from(unit), rest),
    };
    let ch = char::from_u32(scalar).ok_or(ValueError::InvalidSurrogate(unit))?;
    let mut tmp = [0u8; 4];
    dst.extend(ch.encode_utf8(&mut tmp).bytes());
    Ok(rest)
}
