use quickcheck::QuickCheck;
use rstest::rstest;

use super::{
    arbitrary::Document,
    utils::{tokens_resumed, tokens_whole},
};
use crate::{CommentHandling, ReaderOptions};

/// Property: feeding a document a few bytes at a time, rebuilding the reader
/// from its state capsule after each block, yields the same tokens as one
/// contiguous read.
#[test]
fn resume_matches_contiguous_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(document: Document, step: u8, skip_comments: bool) -> bool {
        let input = document.0.as_bytes();
        let options = ReaderOptions {
            comment_handling: if skip_comments {
                CommentHandling::Skip
            } else {
                CommentHandling::Allow
            },
            ..Default::default()
        };
        let whole = tokens_whole(input, options).unwrap();
        let step = usize::from(step % 8) + 1;
        tokens_resumed(input, options, step).unwrap() == whole
    }

    let tests = if is_ci::cached() { 5_000 } else { 500 };

    QuickCheck::new()
        .tests(tests)
        .quickcheck(prop as fn(Document, u8, bool) -> bool);
}

#[rstest]
#[case(br#"{name:"A\n",age:1}"#, ReaderOptions::default())]
#[case(b"-1.5e+3", ReaderOptions::default())]
#[case(b"true", ReaderOptions::default())]
#[case(b"// a\r\n{b : null}", ReaderOptions { comment_handling: CommentHandling::Allow, ..Default::default() })]
#[case(b"/* x\xE2\x80\xA0 */{}", ReaderOptions { comment_handling: CommentHandling::Skip, ..Default::default() })]
#[case(b"{a:1, /*c*/ }", ReaderOptions { comment_handling: CommentHandling::Allow, allow_trailing_commas: true, ..Default::default() })]
#[case(b"1 22 333 {} \"s\"", ReaderOptions { allow_multiple_values: true, ..Default::default() })]
fn byte_by_byte(#[case] input: &[u8], #[case] options: ReaderOptions) {
    let whole = tokens_whole(input, options).unwrap();
    assert_eq!(tokens_resumed(input, options, 1).unwrap(), whole);
}
