#![no_main]

use arbitrary::Arbitrary;
use bracemodem::{
    CommentHandling, Reader, ReaderError, ReaderOptions, ReaderState, TokenKind,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Case<'a> {
    flags: u8,
    cuts: Vec<u16>,
    stream_step: u8,
    data: &'a [u8],
}

type Seen = (TokenKind, Vec<u8>, bool, usize);

fn options(flags: u8) -> ReaderOptions {
    ReaderOptions {
        comment_handling: match flags & 3 {
            0 => CommentHandling::Disallow,
            1 => CommentHandling::Skip,
            _ => CommentHandling::Allow,
        },
        allow_trailing_commas: flags & 4 != 0,
        allow_multiple_values: flags & 8 != 0,
        max_depth: usize::from(flags >> 4),
    }
}

fn drain(reader: &mut Reader<'_>, out: &mut Vec<Seen>) -> Result<(), ReaderError> {
    while reader.read()? {
        out.push((
            reader.token_kind(),
            reader.copy_value(),
            reader.value_is_escaped(),
            reader.current_depth(),
        ));
        // decoding must never panic, whatever it returns
        let _ = reader.get_string();
        let _ = reader.get_f64();
    }
    Ok(())
}

fn whole(data: &[u8], options: ReaderOptions) -> (Vec<Seen>, Option<ReaderError>) {
    let mut out = Vec::new();
    let mut reader = Reader::with_options(data, options);
    let err = drain(&mut reader, &mut out).err();
    (out, err)
}

fn segmented(
    data: &[u8],
    cuts: &[u16],
    options: ReaderOptions,
) -> (Vec<Seen>, Option<ReaderError>) {
    let mut points: Vec<usize> = cuts
        .iter()
        .map(|&cut| usize::from(cut) % (data.len() + 1))
        .collect();
    points.sort_unstable();
    let mut segments = Vec::with_capacity(points.len() + 1);
    let mut start = 0;
    for point in points {
        segments.push(&data[start..point]);
        start = point;
    }
    segments.push(&data[start..]);

    let mut out = Vec::new();
    let mut reader = Reader::from_segments(&segments, true, ReaderState::new(options));
    let err = drain(&mut reader, &mut out).err();
    (out, err)
}

fn streamed(data: &[u8], step: usize, options: ReaderOptions) -> (Vec<Seen>, Option<ReaderError>) {
    let mut out = Vec::new();
    let mut state = ReaderState::new(options);
    let mut pending = Vec::new();
    let mut chunks = data.chunks(step).peekable();
    if data.is_empty() {
        let mut reader = Reader::new(data, true, state);
        let err = drain(&mut reader, &mut out).err();
        return (out, err);
    }
    while let Some(chunk) = chunks.next() {
        pending.extend_from_slice(chunk);
        let mut reader = Reader::new(&pending, chunks.peek().is_none(), state);
        if let Err(err) = drain(&mut reader, &mut out) {
            return (out, Some(err));
        }
        let consumed = reader.bytes_consumed();
        state = reader.current_state();
        pending.drain(..consumed);
    }
    (out, None)
}

fuzz_target!(|case: Case<'_>| {
    let options = options(case.flags);
    let expected = whole(case.data, options);

    let split = segmented(case.data, &case.cuts, options);
    assert_eq!(split.0, expected.0);
    assert_eq!(split.1.map(|e| e.kind), expected.1.map(|e| e.kind));

    let step = usize::from(case.stream_step.max(1));
    let resumed = streamed(case.data, step, options);
    assert_eq!(resumed.0, expected.0);
    assert_eq!(resumed.1.map(|e| e.kind), expected.1.map(|e| e.kind));
});
