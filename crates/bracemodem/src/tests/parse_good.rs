use alloc::vec::Vec;

use rstest::rstest;

use super::utils::{kinds, tokens_whole};
use crate::{
    CommentHandling, Reader, ReaderOptions, TokenKind,
    TokenKind::{
        Comment as C, ContainerEnd as CE, ContainerStart as CS, False as F, Null as Nl,
        Number as N, PropertyName as PN, String as S, True as T,
    },
};

fn with_comments(comment_handling: CommentHandling) -> ReaderOptions {
    ReaderOptions {
        comment_handling,
        ..Default::default()
    }
}

#[rstest]
#[case(b"{}", &[CS, CE])]
#[case(br#"{"a":1}"#, &[CS, PN, N, CE])]
#[case(b"{a:{b:{}}}", &[CS, PN, CS, PN, CS, CE, CE, CE])]
#[case(b"{ a : true , b:false,c:null }", &[CS, PN, T, PN, F, PN, Nl, CE])]
#[case(b"\n\t{\r\n  $k_9 : \"v\"\n}\n", &[CS, PN, S, CE])]
#[case(br#""text""#, &[S])]
#[case(b"-1.5e+3", &[N])]
#[case(b" 42 ", &[N])]
#[case(b"true", &[T])]
#[case(b"null", &[Nl])]
fn token_kinds(#[case] input: &[u8], #[case] expected: &[TokenKind]) {
    assert_eq!(kinds(input, ReaderOptions::default()).unwrap(), expected);
}

#[test]
fn scenario_name_and_age() {
    let input = br#"{name:"A\n",age:1}"#;
    let mut reader = Reader::with_options(input, ReaderOptions::default());

    assert!(reader.read().unwrap());
    assert_eq!(reader.token_kind(), CS);
    assert_eq!(reader.current_depth(), 1);

    assert!(reader.read().unwrap());
    assert_eq!(reader.token_kind(), PN);
    assert_eq!(reader.get_string().unwrap(), "name");
    assert!(reader.value_equals_str("name").unwrap());

    assert!(reader.read().unwrap());
    assert_eq!(reader.token_kind(), S);
    assert!(reader.value_is_escaped());
    assert_eq!(reader.value_span(), Some(&br"A\n"[..]));
    assert_eq!(reader.get_string().unwrap(), "A\n");
    assert_eq!(reader.token_start_index(), 6);

    assert!(reader.read().unwrap());
    assert_eq!(reader.get_string().unwrap(), "age");

    assert!(reader.read().unwrap());
    assert_eq!(reader.token_kind(), N);
    assert_eq!(reader.get_i64().unwrap(), 1);

    assert!(reader.read().unwrap());
    assert_eq!(reader.token_kind(), CE);
    assert_eq!(reader.current_depth(), 0);
    assert_eq!(reader.previous_token_kind(), N);

    assert!(!reader.read().unwrap());
    assert_eq!(reader.bytes_consumed(), input.len());
}

#[rstest]
#[case(b"0")]
#[case(b"-0")]
#[case(b"0.5")]
#[case(b"1e10")]
#[case(b"1E-10")]
#[case(b"-1.5e+3")]
fn accepted_numbers(#[case] input: &[u8]) {
    let mut reader = Reader::with_options(input, ReaderOptions::default());
    assert!(reader.read().unwrap());
    assert_eq!(reader.token_kind(), N);
    assert_eq!(reader.value_span(), Some(input));
    assert!(!reader.read().unwrap());
}

#[test]
fn nesting_to_exactly_max_depth() {
    let options = ReaderOptions {
        max_depth: 2,
        ..Default::default()
    };
    assert_eq!(
        kinds(b"{a:{b:1}}", options).unwrap(),
        [CS, PN, CS, PN, N, CE, CE]
    );
}

#[test]
fn default_depth_allows_sixty_four_levels() {
    let mut input = Vec::new();
    for _ in 0..63 {
        input.extend_from_slice(b"{a:");
    }
    input.extend_from_slice(b"{}");
    input.extend(core::iter::repeat_n(b'}', 63));
    let tokens = tokens_whole(&input, ReaderOptions::default()).unwrap();
    assert_eq!(tokens.iter().map(|t| t.depth).max(), Some(64));
}

#[test]
fn trailing_comma_when_allowed() {
    let options = ReaderOptions {
        allow_trailing_commas: true,
        ..Default::default()
    };
    assert_eq!(kinds(b"{a:1,}", options).unwrap(), [CS, PN, N, CE]);
}

#[test]
fn comment_modes_on_leading_line_comment() {
    let input = b"// comment\n{a:1}";
    let plain = kinds(b"{a:1}", ReaderOptions::default()).unwrap();

    let skipped = tokens_whole(input, with_comments(CommentHandling::Skip)).unwrap();
    assert_eq!(skipped.iter().map(|t| t.kind).collect::<Vec<_>>(), plain);

    let mut reader = Reader::with_options(input, with_comments(CommentHandling::Allow));
    assert!(reader.read().unwrap());
    assert_eq!(reader.token_kind(), C);
    assert_eq!(reader.get_comment().unwrap(), " comment");
    assert_eq!(reader.line(), 1);
    let mut rest = Vec::new();
    while reader.read().unwrap() {
        rest.push(reader.token_kind());
    }
    assert_eq!(rest, plain);
}

#[rstest]
#[case(b"{a: /*c*/ 1}", &[CS, PN, C, N, CE])]
#[case(b"{a:1 /*c*/ }", &[CS, PN, N, C, CE])]
#[case(b"{a:1, /*c*/ b:2}", &[CS, PN, N, C, PN, N, CE])]
#[case(b"{a:1, /*c*/ /*d*/ b:2}", &[CS, PN, N, C, C, PN, N, CE])]
#[case(b"{ /*c*/ }", &[CS, C, CE])]
#[case(b"{} // end", &[CS, CE, C])]
#[case(b"/* a */ 1 // b", &[C, N, C])]
#[case(b"{a:1//c\n}", &[CS, PN, N, C, CE])]
fn allowed_comments(#[case] input: &[u8], #[case] expected: &[TokenKind]) {
    assert_eq!(
        kinds(input, with_comments(CommentHandling::Allow)).unwrap(),
        expected
    );
    let without: Vec<_> = expected.iter().copied().filter(|&k| k != C).collect();
    assert_eq!(kinds(input, with_comments(CommentHandling::Skip)).unwrap(), without);
}

#[test]
fn comment_before_closing_brace_after_trailing_comma() {
    let options = ReaderOptions {
        comment_handling: CommentHandling::Allow,
        allow_trailing_commas: true,
        ..Default::default()
    };
    assert_eq!(kinds(b"{a:1, /*c*/}", options).unwrap(), [CS, PN, N, C, CE]);
}

#[test]
fn comment_text_excludes_delimiters() {
    let options = with_comments(CommentHandling::Allow);
    let tokens = tokens_whole(b"/* multi\nline */ // tail\r\n{}", options).unwrap();
    assert_eq!(tokens[0].text, b" multi\nline ");
    assert_eq!(tokens[1].text, b" tail");
    assert_eq!(tokens[2].line, 2);
}

#[test]
fn carriage_return_ends_line_comment() {
    let tokens = tokens_whole(b"// a\r{}", with_comments(CommentHandling::Allow)).unwrap();
    assert_eq!(tokens[0].text, b" a");
    assert_eq!(tokens[1].kind, CS);
    assert_eq!(tokens[1].line, 1);
}

#[test]
fn multiple_top_level_values() {
    let options = ReaderOptions {
        allow_multiple_values: true,
        ..Default::default()
    };
    assert_eq!(
        kinds(br#"1 2 "x"{}  {a:true}"#, options).unwrap(),
        [N, N, S, CS, CE, CS, PN, T, CE]
    );
}

#[test]
fn escaped_property_names_compare_decoded() {
    let mut reader = Reader::with_options(br#"{"a\nb":1}"#, ReaderOptions::default());
    reader.read().unwrap();
    reader.read().unwrap();
    assert!(reader.value_is_escaped());
    assert!(reader.value_equals(b"a\nb").unwrap());
    assert!(!reader.value_equals(br"a\nb").unwrap());
    assert!(!reader.value_equals(b"a").unwrap());
    assert!(!reader.value_equals_str("a\nc").unwrap());
}

#[test]
fn typed_accessors() {
    let input = br#"{i:-42, u:18446744073709551615, f:0.25, t:true, f2:false}"#;
    let mut reader = Reader::with_options(input, ReaderOptions::default());
    let mut numbers = Vec::new();
    let mut bools = Vec::new();
    while reader.read().unwrap() {
        match reader.token_kind() {
            N => numbers.push(reader.copy_value()),
            T | F => bools.push(reader.get_bool().unwrap()),
            _ => {}
        }
    }
    assert_eq!(numbers, [&b"-42"[..], b"18446744073709551615", b"0.25"]);
    assert_eq!(bools, [true, false]);

    let mut reader = Reader::with_options(b"-42", ReaderOptions::default());
    reader.read().unwrap();
    assert_eq!(reader.get_i64().unwrap(), -42);
    assert_eq!(reader.get_f64().unwrap(), -42.0);

    let mut reader = Reader::with_options(b"18446744073709551615", ReaderOptions::default());
    reader.read().unwrap();
    assert_eq!(reader.get_u64().unwrap(), u64::MAX);
}

#[quickcheck_macros::quickcheck]
fn integers_decode_exactly(n: i64) -> bool {
    let text = alloc::format!("{{n:{n}}}");
    let mut reader = Reader::with_options(text.as_bytes(), ReaderOptions::default());
    for _ in 0..3 {
        if !matches!(reader.read(), Ok(true)) {
            return false;
        }
    }
    reader.get_i64() == Ok(n)
}
