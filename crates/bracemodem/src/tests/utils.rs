use alloc::vec::Vec;

use crate::{Reader, ReaderError, ReaderOptions, ReaderState, TokenKind};

/// One token as observed by a consumer: kind, decoded value, and where the
/// reader stood afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Seen {
    pub(crate) kind: TokenKind,
    pub(crate) text: Vec<u8>,
    pub(crate) escaped: bool,
    pub(crate) depth: usize,
    pub(crate) line: usize,
}

pub(crate) fn seen(reader: &Reader<'_>) -> Seen {
    let text = match reader.token_kind() {
        TokenKind::String | TokenKind::PropertyName => {
            reader.get_string().unwrap().as_bytes().to_vec()
        }
        _ => reader.copy_value(),
    };
    Seen {
        kind: reader.token_kind(),
        text,
        escaped: reader.value_is_escaped(),
        depth: reader.current_depth(),
        line: reader.line(),
    }
}

fn drain(reader: &mut Reader<'_>, out: &mut Vec<Seen>) -> Result<(), ReaderError> {
    while reader.read()? {
        out.push(seen(reader));
    }
    Ok(())
}

pub(crate) fn tokens_whole(input: &[u8], options: ReaderOptions) -> Result<Vec<Seen>, ReaderError> {
    let mut out = Vec::new();
    drain(&mut Reader::with_options(input, options), &mut out)?;
    Ok(out)
}

pub(crate) fn tokens_segments(
    segments: &[&[u8]],
    options: ReaderOptions,
) -> Result<Vec<Seen>, ReaderError> {
    let mut out = Vec::new();
    let mut reader = Reader::from_segments(segments, true, ReaderState::new(options));
    drain(&mut reader, &mut out)?;
    Ok(out)
}

/// Feeds `input` `step` bytes at a time, rebuilding the reader from its state
/// capsule after every block.
pub(crate) fn tokens_resumed(
    input: &[u8],
    options: ReaderOptions,
    step: usize,
) -> Result<Vec<Seen>, ReaderError> {
    let mut out = Vec::new();
    let mut state = ReaderState::new(options);
    let mut offset = 0;
    let mut available = 0;
    loop {
        let is_final = available >= input.len();
        let mut reader = Reader::new(&input[offset..available], is_final, state);
        drain(&mut reader, &mut out)?;
        offset += reader.bytes_consumed();
        state = reader.current_state();
        if is_final {
            return Ok(out);
        }
        available = (available + step.max(1)).min(input.len());
    }
}

/// Cuts `input` at the given points (taken modulo its length). Repeated
/// points produce empty segments.
pub(crate) fn split_at<'a>(input: &'a [u8], points: &[usize]) -> Vec<&'a [u8]> {
    let mut cuts: Vec<usize> = points.iter().map(|p| p % (input.len() + 1)).collect();
    cuts.sort_unstable();
    let mut segments = Vec::with_capacity(cuts.len() + 1);
    let mut last = 0;
    for cut in cuts {
        segments.push(&input[last..cut]);
        last = cut;
    }
    segments.push(&input[last..]);
    segments
}

pub(crate) fn kinds(input: &[u8], options: ReaderOptions) -> Result<Vec<TokenKind>, ReaderError> {
    Ok(tokens_whole(input, options)?.into_iter().map(|s| s.kind).collect())
}
