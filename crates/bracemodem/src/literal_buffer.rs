//! Byte-at-a-time matcher for the `true`, `false`, and `null` literals.

use crate::TokenKind;

/// What happened after feeding one more byte into the literal matcher?
pub(crate) enum Step {
    /// Byte matched, but the literal is not finished yet.
    NeedMore,
    /// Byte matched *and* it was the last byte of the literal.
    Done(TokenKind),
    /// Byte did **not** match the expected byte.
    Reject,
}

/// `(remaining_bytes, token_kind)` while matching.
///
/// The matcher is `Copy` and holds no borrowed input, so a literal split
/// across segments is matched without re-reading its prefix.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct ExpectedLiteralBuffer {
    remaining: &'static [u8],
    kind: TokenKind,
}

impl ExpectedLiteralBuffer {
    /// Start matching after the *first* byte (`n`, `t`, or `f`).
    pub(crate) fn new(first: u8) -> Option<Self> {
        let (remaining, kind): (&'static [u8], _) = match first {
            b'n' => (b"ull", TokenKind::Null),
            b't' => (b"rue", TokenKind::True),
            b'f' => (b"alse", TokenKind::False),
            _ => return None,
        };
        Some(Self { remaining, kind })
    }

    /// The literal being matched.
    pub(crate) fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Give the matcher the next input byte and learn what to do next.
    pub(crate) fn step(&mut self, b: u8) -> Step {
        match self.remaining.split_first() {
            Some((&expected, rest)) if expected == b => {
                self.remaining = rest;
                if rest.is_empty() {
                    Step::Done(self.kind)
                } else {
                    Step::NeedMore
                }
            }
            _ => Step::Reject,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(first: u8, rest: &[u8]) -> Option<TokenKind> {
        let mut matcher = ExpectedLiteralBuffer::new(first)?;
        for &b in rest {
            match matcher.step(b) {
                Step::NeedMore => {}
                Step::Done(kind) => return Some(kind),
                Step::Reject => return None,
            }
        }
        None
    }

    #[test]
    fn matches_all_literals() {
        assert_eq!(run(b't', b"rue"), Some(TokenKind::True));
        assert_eq!(run(b'f', b"alse"), Some(TokenKind::False));
        assert_eq!(run(b'n', b"ull"), Some(TokenKind::Null));
    }

    #[test]
    fn rejects_mismatch_and_unknown_start() {
        assert_eq!(run(b't', b"rye"), None);
        assert_eq!(run(b'n', b"ul"), None);
        assert!(ExpectedLiteralBuffer::new(b'x').is_none());
        assert_eq!(ExpectedLiteralBuffer::new(b'f').map(|m| m.kind()), Some(TokenKind::False));
    }
}
