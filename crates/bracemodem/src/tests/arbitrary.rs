use alloc::string::String;
use core::fmt::Write;

use quickcheck::{Arbitrary, Gen};

const NUMBERS: &[&str] = &[
    "0", "-0", "7", "42", "-17", "3.25", "0.5", "1e10", "1E-10", "-1.5e+3", "123456789012",
];
const STRING_PIECES: &[&str] = &[
    "plain", " ", "é", "日本", r"\n", r"\t", r#"\""#, r"\\", r"\/", r"\u00e9", r"\uD83D\uDE00",
];
const NAMES: &[&str] = &["a", "name", "_x", "$id", "k9"];
const COMMENTS: &[&str] = &["// line\n", "/* block */", "/* multi\nline */", "// crlf\r\n", "/**/"];
const SPACE: &[&str] = &["", " ", "\n", "\t", "\r\n", "  "];

/// A well-formed document with comments, rendered as text.
#[derive(Debug, Clone)]
pub(crate) struct Document(pub(crate) String);

impl Arbitrary for Document {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut out = String::new();
        if bool::arbitrary(g) {
            out.push_str(pick(g, COMMENTS));
        }
        push_container(g, &mut out, 2);
        out.push_str(pick(g, SPACE));
        Self(out)
    }
}

fn pick(g: &mut Gen, options: &[&'static str]) -> &'static str {
    g.choose(options).copied().unwrap_or_default()
}

fn push_gap(g: &mut Gen, out: &mut String) {
    out.push_str(pick(g, SPACE));
    if usize::arbitrary(g) % 4 == 0 {
        out.push_str(pick(g, COMMENTS));
        out.push_str(pick(g, SPACE));
    }
}

fn push_string(g: &mut Gen, out: &mut String) {
    out.push('"');
    for _ in 0..usize::arbitrary(g) % 4 {
        if bool::arbitrary(g) {
            out.push_str(pick(g, STRING_PIECES));
        } else {
            for c in String::arbitrary(g).chars().take(8) {
                match c {
                    '"' => out.push_str(r#"\""#),
                    '\\' => out.push_str(r"\\"),
                    c if u32::from(c) < 0x20 => {
                        write!(out, "\\u{:04x}", u32::from(c)).unwrap();
                    }
                    c => out.push(c),
                }
            }
        }
    }
    out.push('"');
}

fn push_value(g: &mut Gen, out: &mut String, depth: usize) {
    match usize::arbitrary(g) % 6 {
        0 => push_string(g, out),
        1 => out.push_str(pick(g, NUMBERS)),
        2 => out.push_str(pick(g, &["true", "false", "null"])),
        3 if depth > 0 => push_container(g, out, depth - 1),
        _ => write!(out, "{}", i32::arbitrary(g)).unwrap(),
    }
}

fn push_container(g: &mut Gen, out: &mut String, depth: usize) {
    out.push('{');
    let entries = usize::arbitrary(g) % 4;
    for index in 0..entries {
        push_gap(g, out);
        if bool::arbitrary(g) {
            out.push_str(pick(g, NAMES));
        } else {
            push_string(g, out);
        }
        out.push_str(pick(g, SPACE));
        out.push(':');
        push_gap(g, out);
        push_value(g, out, depth);
        if index + 1 < entries {
            push_gap(g, out);
            out.push(',');
        }
    }
    push_gap(g, out);
    out.push('}');
}
