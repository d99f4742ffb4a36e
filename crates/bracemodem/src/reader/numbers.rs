//! Number grammar: `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?`

use super::{Progress, Reader};
use crate::{
    TokenKind,
    bytes::{is_delimiter, is_digit},
    error::{ReaderError, SyntaxError},
};

/// Lexical position inside a number, named after what was read last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum NumberState {
    Sign,
    Zero,
    Integer,
    DecimalPoint,
    Fraction,
    Exponent,
    ExponentSign,
    ExponentInteger,
}

impl NumberState {
    pub(super) fn start(first: u8) -> Self {
        match first {
            b'-' => NumberState::Sign,
            b'0' => NumberState::Zero,
            _ => NumberState::Integer,
        }
    }

    /// Whether the bytes so far form a complete number.
    pub(super) fn is_accepting(self) -> bool {
        matches!(
            self,
            NumberState::Zero | NumberState::Integer | NumberState::Fraction | NumberState::ExponentInteger
        )
    }

    /// States that stay put on any further digit.
    fn is_digit_run(self) -> bool {
        matches!(
            self,
            NumberState::Integer | NumberState::Fraction | NumberState::ExponentInteger
        )
    }

    /// Feeds the next byte. `Ok(None)` means `b` delimits a complete number
    /// and is not part of it.
    pub(super) fn step(self, b: u8) -> Result<Option<Self>, SyntaxError> {
        use NumberState::{
            DecimalPoint, Exponent, ExponentInteger, ExponentSign, Fraction, Integer, Sign, Zero,
        };

        let next = match (self, b) {
            (Sign, b'0') => Zero,
            (Sign, b'1'..=b'9') => Integer,
            (Sign, _) => return Err(SyntaxError::RequiredDigitAfterSign),

            (Zero, b'0'..=b'9') => return Err(SyntaxError::InvalidLeadingZero),
            (Zero | Integer, b'.') => DecimalPoint,
            (Integer, b'0'..=b'9') => Integer,

            (DecimalPoint, b'0'..=b'9') => Fraction,
            (DecimalPoint, _) => return Err(SyntaxError::RequiredDigitAfterDecimal),
            (Fraction, b'0'..=b'9') => Fraction,

            (Zero | Integer | Fraction, b'e' | b'E') => Exponent,
            (Exponent, b'+' | b'-') => ExponentSign,
            (Exponent | ExponentSign | ExponentInteger, b'0'..=b'9') => ExponentInteger,
            (Exponent | ExponentSign, _) => return Err(SyntaxError::RequiredDigitInExponent),

            (Zero | Integer | Fraction | ExponentInteger, _) if is_delimiter(b) => return Ok(None),
            (Zero | Integer | Fraction | ExponentInteger, _) => {
                return Err(SyntaxError::ExpectedEndOfNumber);
            }
        };
        Ok(Some(next))
    }
}

impl Reader<'_> {
    pub(super) fn consume_number(&mut self, first: u8) -> Result<Progress, ReaderError> {
        let start = self.begin_token();
        let mut state = NumberState::start(first);
        self.bump();

        loop {
            if state.is_digit_run() {
                let run = self.window().iter().take_while(|&&b| is_digit(b)).count();
                self.advance_in_window(run);
            }
            match self.peek() {
                Some(b) => match state.step(b) {
                    Ok(Some(next)) => {
                        self.bump();
                        state = next;
                    }
                    Ok(None) => break,
                    Err(kind) => return Err(self.error(kind, Some(b))),
                },
                // more digits may follow in the next block
                None if !self.is_final_block => return Ok(Progress::RollBack),
                None if state.is_accepting() => break,
                None => return Err(self.error(SyntaxError::RequiredDigitAtEndOfData, None)),
            }
        }

        let end = self.here();
        self.set_token(TokenKind::Number, (start, end), false);
        Ok(Progress::Token)
    }
}
