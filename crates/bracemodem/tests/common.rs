#![allow(missing_docs)]
#![allow(dead_code)]

use core::fmt::Write;

use bracemodem::{Reader, ReaderError, ReaderOptions, ReaderState};
use bstr::BStr;

pub const CONFIG: &str = r#"// service configuration
{
    name: "edge-proxy",
    "listen": { host: "0.0.0.0", port: 8443 },
    /* upstreams are tried in order */
    upstreams: {
        primary: { url: "https://a.example", weight: 3 },
        backup: { url: "https://b.example", weight: 1, enabled: false }
    },
    banner: "café \"open\"",
    limits: { rps: 1.5e3, burst: -1, ratio: 0.25 },
    tags: null
}
"#;

/// One line per token: kind, depth after the token, raw value, escape flag.
///
/// With `flat`, values that straddle segments are printed gathered, so the
/// output no longer depends on where the input was cut.
pub fn render(reader: &mut Reader<'_>, flat: bool) -> Result<String, ReaderError> {
    let mut out = String::new();
    while reader.read()? {
        let token = reader.token();
        let escaped = if token.escaped { " escaped" } else { "" };
        let depth = reader.current_depth();
        let written = if flat {
            let value = reader.copy_value();
            writeln!(out, "{:?} depth={depth} {:?}{escaped}", token.kind, BStr::new(&value))
        } else {
            writeln!(out, "{:?} depth={depth} {:?}{escaped}", token.kind, token.value)
        };
        written.unwrap();
    }
    Ok(out)
}

pub fn render_whole(input: &[u8], options: ReaderOptions) -> Result<String, ReaderError> {
    render(&mut Reader::with_options(input, options), false)
}

pub fn render_segments(
    segments: &[&[u8]],
    options: ReaderOptions,
    flat: bool,
) -> Result<String, ReaderError> {
    let mut reader = Reader::from_segments(segments, true, ReaderState::new(options));
    render(&mut reader, flat)
}

/// Feeds `chunks` one at a time, keeping only the unconsumed tail of the
/// previous chunks, the way a network consumer would.
pub fn render_streamed(chunks: &[&[u8]], options: ReaderOptions) -> Result<String, ReaderError> {
    let mut out = String::new();
    let mut pending: Vec<u8> = Vec::new();
    let mut state = ReaderState::new(options);
    for (index, chunk) in chunks.iter().enumerate() {
        pending.extend_from_slice(chunk);
        let is_final = index + 1 == chunks.len();
        let mut reader = Reader::new(&pending, is_final, state);
        out.push_str(&render(&mut reader, true)?);
        let consumed = reader.bytes_consumed();
        state = reader.current_state();
        pending.drain(..consumed);
    }
    Ok(out)
}
