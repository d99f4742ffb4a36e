//! The pull tokenizer.
//!
//! [`Reader::read`] advances over exactly one token. Every grammar
//! sub-machine works on the same cursor: a current segment plus an offset
//! into it. [`Reader::peek`] hops to the next non-empty segment when the
//! current one is exhausted, so a number, string, or comment that straddles
//! a segment boundary is handled by the same code as one that does not.
//!
//! Running out of input mid-token never commits anything. Before each token
//! the reader takes a [`PartialState`] snapshot and restores it if a
//! sub-machine reports that more bytes are needed; the next `read` then starts
//! that token again from its first byte.

mod comments;
mod numbers;
mod strings;
mod value;


use crate::{
    CommentHandling, ReaderOptions, ReaderState, SegmentPosition, TokenKind,
    bytes::{
        CLOSE_BRACE, COLON, COMMA, LINE_FEED, OPEN_BRACE, QUOTE, SLASH, is_identifier_part,
        is_identifier_start, is_whitespace,
    },
    depth::DepthStack,
    error::{ReaderError, SyntaxError},
    input::Input,
    literal_buffer::{ExpectedLiteralBuffer, Step},
};

/// Outcome of one attempt to produce a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Progress {
    /// A token was produced and the cursor sits after it.
    Token,
    /// Input ran out part way through the token; the snapshot must be restored.
    RollBack,
}

/// Start and end of a token's value bytes.
type Span = (SegmentPosition, SegmentPosition);

/// Rollback point taken before each token.
///
/// Only plain values: the current segment slice is re-derived from the input
/// on restore. The depth stack is absent because it only changes when a
/// brace is consumed, and that always completes the token.
#[derive(Debug, Clone, Copy)]
struct PartialState {
    segment: usize,
    consumed: usize,
    segment_base: usize,
    line: usize,
    byte_position_in_line: usize,
    token_kind: TokenKind,
    previous_token_kind: TokenKind,
    value_is_escaped: bool,
    trailing_comma_before_comment: bool,
    token_start: usize,
    value_start: SegmentPosition,
    value_end: SegmentPosition,
}

/// A forward-only, zero-copy tokenizer over borrowed input.
///
/// A `Reader` borrows the bytes it reads and cannot outlive them. To continue
/// a document once more bytes arrive, take its [`current_state`] and build a
/// new reader over the unconsumed bytes plus the new ones.
///
/// [`current_state`]: Reader::current_state
///
/// # Examples
///
/// ```rust
/// use bracemodem::{Reader, ReaderOptions, TokenKind};
///
/// let mut reader = Reader::with_options(br#"{name:"A\n",age:1}"#, ReaderOptions::default());
/// let mut kinds = Vec::new();
/// while reader.read().unwrap() {
///     kinds.push(reader.token_kind());
/// }
/// assert_eq!(
///     kinds,
///     [
///         TokenKind::ContainerStart,
///         TokenKind::PropertyName,
///         TokenKind::String,
///         TokenKind::PropertyName,
///         TokenKind::Number,
///         TokenKind::ContainerEnd,
///     ]
/// );
/// assert_eq!(reader.bytes_consumed(), 18);
/// ```
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct Reader<'a> {
    input: Input<'a>,
    buffer: &'a [u8],
    segment: usize,
    consumed: usize,
    segment_base: usize,
    is_final_block: bool,

    line: usize,
    byte_position_in_line: usize,

    token_kind: TokenKind,
    previous_token_kind: TokenKind,
    token_start: usize,
    value_start: SegmentPosition,
    value_end: SegmentPosition,

    in_container: bool,
    is_not_primitive: bool,
    value_is_escaped: bool,
    trailing_comma_before_comment: bool,
    depth: DepthStack,
    options: ReaderOptions,
}

impl<'a> Reader<'a> {
    /// A reader over one contiguous block.
    ///
    /// `is_final_block` promises that no bytes follow `input`; only then are
    /// truncated tokens reported as errors instead of "not enough data".
    #[must_use]
    pub fn new(input: &'a [u8], is_final_block: bool, state: ReaderState) -> Self {
        Self::from_input(Input::Single(input), is_final_block, state)
    }

    /// A reader over an ordered list of segments. Empty segments, leading or
    /// not, are skipped.
    #[must_use]
    pub fn from_segments(segments: &'a [&'a [u8]], is_final_block: bool, state: ReaderState) -> Self {
        Self::from_input(Input::Segments(segments), is_final_block, state)
    }

    /// A reader over a complete document.
    #[must_use]
    pub fn with_options(input: &'a [u8], options: ReaderOptions) -> Self {
        Self::new(input, true, ReaderState::new(options))
    }

    fn from_input(input: Input<'a>, is_final_block: bool, state: ReaderState) -> Self {
        let segment = input.first_non_empty();
        let start = SegmentPosition { segment, offset: 0 };
        Self {
            input,
            buffer: input.segment(segment).unwrap_or_default(),
            segment,
            consumed: 0,
            segment_base: 0,
            is_final_block,
            line: state.line,
            byte_position_in_line: state.byte_position_in_line,
            token_kind: state.token_kind,
            previous_token_kind: state.previous_token_kind,
            token_start: 0,
            value_start: start,
            value_end: start,
            in_container: state.in_container,
            is_not_primitive: state.is_not_primitive,
            value_is_escaped: state.value_is_escaped,
            trailing_comma_before_comment: state.trailing_comma_before_comment,
            depth: state.depth,
            options: state.options,
        }
    }

    /// The capsule to resume from after this reader's input is exhausted.
    #[must_use]
    pub fn current_state(&self) -> ReaderState {
        ReaderState {
            line: self.line,
            byte_position_in_line: self.byte_position_in_line,
            in_container: self.in_container,
            is_not_primitive: self.is_not_primitive,
            value_is_escaped: self.value_is_escaped,
            trailing_comma_before_comment: self.trailing_comma_before_comment,
            token_kind: self.token_kind,
            previous_token_kind: self.previous_token_kind,
            options: self.options,
            depth: self.depth.clone(),
        }
    }

    #[must_use]
    pub fn token_kind(&self) -> TokenKind {
        self.token_kind
    }

    /// Kind of the token before the current one. After a run of comments this
    /// is the last non-comment token.
    #[must_use]
    pub fn previous_token_kind(&self) -> TokenKind {
        self.previous_token_kind
    }

    /// Absolute byte offset where the current token begins.
    #[must_use]
    pub fn token_start_index(&self) -> usize {
        self.token_start
    }

    /// Bytes of this reader's input consumed so far, across all segments.
    #[must_use]
    pub fn bytes_consumed(&self) -> usize {
        self.segment_base + self.consumed
    }

    /// Number of open containers.
    #[must_use]
    pub fn current_depth(&self) -> usize {
        self.depth.depth()
    }

    /// 0-based line of the cursor.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// 0-based byte offset of the cursor within its line.
    #[must_use]
    pub fn byte_position_in_line(&self) -> usize {
        self.byte_position_in_line
    }

    #[must_use]
    pub fn is_final_block(&self) -> bool {
        self.is_final_block
    }

    /// Whether the current token's value contains escape sequences.
    #[must_use]
    pub fn value_is_escaped(&self) -> bool {
        self.value_is_escaped
    }

    /// The cursor as a segment index and offset, for slicing off the
    /// unconsumed input.
    #[must_use]
    pub fn position(&self) -> SegmentPosition {
        SegmentPosition {
            segment: self.segment,
            offset: self.consumed,
        }
    }

    #[must_use]
    pub fn options(&self) -> ReaderOptions {
        self.options
    }

    /// Advances over one token.
    ///
    /// Returns `Ok(true)` when a token was produced and `Ok(false)` when the
    /// available input holds no further complete token. In the latter case
    /// the cursor sits at the start of the incomplete token (after any
    /// whitespace), ready for [`current_state`](Self::current_state).
    ///
    /// # Errors
    ///
    /// A [`ReaderError`] when the bytes read so far cannot belong to a valid
    /// document, whatever follows them.
    pub fn read(&mut self) -> Result<bool, ReaderError> {
        let first = loop {
            self.skip_whitespace();
            let Some(b) = self.peek() else {
                return self.end_of_input();
            };
            if b == SLASH && self.options.comment_handling == CommentHandling::Skip {
                let snapshot = self.snapshot();
                if self.scan_comment()?.is_none() {
                    self.roll_back(&snapshot);
                    return Ok(false);
                }
                continue;
            }
            break b;
        };

        let snapshot = self.snapshot();
        match self.read_token(first)? {
            Progress::Token => Ok(true),
            Progress::RollBack => {
                self.roll_back(&snapshot);
                Ok(false)
            }
        }
    }

    /// Skips the children of the current container, or the value of the
    /// current property name.
    ///
    /// On other tokens this does nothing. Afterwards the reader sits on the
    /// matching [`TokenKind::ContainerEnd`] or on the property's last value
    /// token.
    ///
    /// # Errors
    ///
    /// [`SyntaxError::SkipRequiresFinalBlock`] on a partial block (use
    /// [`try_skip`](Self::try_skip) there), or any grammar error inside the
    /// skipped value.
    pub fn skip(&mut self) -> Result<(), ReaderError> {
        if !self.is_final_block {
            return Err(self.error(SyntaxError::SkipRequiresFinalBlock, None));
        }
        if self.skip_helper()? {
            Ok(())
        } else {
            Err(self.error(SyntaxError::UnexpectedEndOfInput, None))
        }
    }

    /// Like [`skip`](Self::skip), but on a partial block returns `Ok(false)`
    /// and leaves the reader untouched when the value is not complete yet.
    ///
    /// # Errors
    ///
    /// Any grammar error inside the skipped value.
    pub fn try_skip(&mut self) -> Result<bool, ReaderError> {
        if self.is_final_block {
            self.skip()?;
            return Ok(true);
        }
        let checkpoint = self.clone();
        if self.skip_helper()? {
            Ok(true)
        } else {
            trace_reader!("try_skip incomplete at depth {}", self.depth.depth());
            *self = checkpoint;
            Ok(false)
        }
    }

    fn skip_helper(&mut self) -> Result<bool, ReaderError> {
        if self.token_kind == TokenKind::PropertyName {
            loop {
                if !self.read()? {
                    return Ok(false);
                }
                if self.token_kind != TokenKind::Comment {
                    break;
                }
            }
        }
        if self.token_kind == TokenKind::ContainerStart {
            let depth = self.depth.depth();
            loop {
                if !self.read()? {
                    return Ok(false);
                }
                if self.token_kind == TokenKind::ContainerEnd && self.depth.depth() < depth {
                    break;
                }
            }
        }
        Ok(true)
    }

    // ---- cursor ----------------------------------------------------------

    /// The next unconsumed byte, moving to the next non-empty segment when
    /// the current one is exhausted.
    #[inline]
    fn peek(&mut self) -> Option<u8> {
        loop {
            if let Some(&b) = self.buffer.get(self.consumed) {
                return Some(b);
            }
            if !self.next_segment() {
                return None;
            }
        }
    }

    fn next_segment(&mut self) -> bool {
        let Some(next) = self.input.segment(self.segment + 1) else {
            return false;
        };
        self.segment_base += self.buffer.len();
        self.segment += 1;
        self.buffer = next;
        self.consumed = 0;
        trace_reader!("advanced to segment {} at offset {}", self.segment, self.segment_base);
        true
    }

    /// Byte `ahead` positions past the cursor, without moving it.
    fn peek_at(&self, ahead: usize) -> Option<u8> {
        let mut remaining = ahead;
        let mut segment = self.segment;
        let mut offset = self.consumed;
        loop {
            let buffer = self.input.segment(segment)?;
            let available = buffer.len().saturating_sub(offset);
            if remaining < available {
                return buffer.get(offset + remaining).copied();
            }
            remaining -= available;
            segment += 1;
            offset = 0;
        }
    }

    /// Consumes the byte returned by the last [`peek`](Self::peek).
    #[inline]
    fn bump(&mut self) {
        self.consumed += 1;
        self.byte_position_in_line += 1;
    }

    /// Consumes a line terminator.
    #[inline]
    fn bump_newline(&mut self) {
        self.consumed += 1;
        self.line += 1;
        self.byte_position_in_line = 0;
    }

    /// Consumes the LF of a CRLF pair whose CR already ended the line.
    #[inline]
    fn absorb_line_feed(&mut self) {
        self.consumed += 1;
    }

    /// The unconsumed rest of the current segment.
    #[inline]
    fn window(&self) -> &'a [u8] {
        let buffer = self.buffer;
        &buffer[self.consumed..]
    }

    /// Consumes `n` bytes of the window that contain no line terminator.
    #[inline]
    fn advance_in_window(&mut self, n: usize) {
        self.consumed += n;
        self.byte_position_in_line += n;
    }

    #[inline]
    fn here(&self) -> SegmentPosition {
        self.position()
    }

    fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            match b {
                LINE_FEED => self.bump_newline(),
                _ if is_whitespace(b) => self.bump(),
                _ => break,
            }
        }
    }

    fn snapshot(&self) -> PartialState {
        PartialState {
            segment: self.segment,
            consumed: self.consumed,
            segment_base: self.segment_base,
            line: self.line,
            byte_position_in_line: self.byte_position_in_line,
            token_kind: self.token_kind,
            previous_token_kind: self.previous_token_kind,
            value_is_escaped: self.value_is_escaped,
            trailing_comma_before_comment: self.trailing_comma_before_comment,
            token_start: self.token_start,
            value_start: self.value_start,
            value_end: self.value_end,
        }
    }

    fn roll_back(&mut self, snapshot: &PartialState) {
        trace_reader!(
            "rolling back {} bytes to {}:{}",
            self.bytes_consumed() - (snapshot.segment_base + snapshot.consumed),
            snapshot.line,
            snapshot.byte_position_in_line
        );
        self.buffer = self.input.segment(snapshot.segment).unwrap_or_default();
        self.segment = snapshot.segment;
        self.consumed = snapshot.consumed;
        self.segment_base = snapshot.segment_base;
        self.line = snapshot.line;
        self.byte_position_in_line = snapshot.byte_position_in_line;
        self.token_kind = snapshot.token_kind;
        self.previous_token_kind = snapshot.previous_token_kind;
        self.value_is_escaped = snapshot.value_is_escaped;
        self.trailing_comma_before_comment = snapshot.trailing_comma_before_comment;
        self.token_start = snapshot.token_start;
        self.value_start = snapshot.value_start;
        self.value_end = snapshot.value_end;
    }

    fn error(&self, kind: SyntaxError, byte: Option<u8>) -> ReaderError {
        trace_reader!(
            "{} at {}:{} (byte {:?})",
            kind,
            self.line,
            self.byte_position_in_line,
            byte
        );
        ReaderError {
            kind,
            line: self.line,
            byte_position_in_line: self.byte_position_in_line,
            byte,
        }
    }

    /// Input ran out part way through a token.
    fn end_of_data(&self, kind: SyntaxError) -> Result<Progress, ReaderError> {
        if self.is_final_block {
            Err(self.error(kind, None))
        } else {
            Ok(Progress::RollBack)
        }
    }

    /// Input ran out inside a sub-machine; `Ok(None)` asks for more bytes.
    fn scan_end_of_data<T>(&self, kind: SyntaxError) -> Result<Option<T>, ReaderError> {
        if self.is_final_block {
            Err(self.error(kind, None))
        } else {
            Ok(None)
        }
    }

    /// Input ran out between tokens.
    fn end_of_input(&self) -> Result<bool, ReaderError> {
        if !self.is_final_block {
            return Ok(false);
        }
        if self.depth.depth() != 0 {
            return Err(self.error(SyntaxError::OpenContainerAtEnd, None));
        }
        if self.effective_kind() == TokenKind::None {
            return Err(self.error(SyntaxError::ExpectedTokens, None));
        }
        Ok(false)
    }

    // ---- dispatch --------------------------------------------------------

    /// The token kind that decides what may follow. Comments are transparent.
    fn effective_kind(&self) -> TokenKind {
        if self.token_kind == TokenKind::Comment {
            self.previous_token_kind
        } else {
            self.token_kind
        }
    }

    fn begin_token(&mut self) -> SegmentPosition {
        self.token_start = self.bytes_consumed();
        self.here()
    }

    fn set_token(&mut self, kind: TokenKind, (start, end): Span, escaped: bool) {
        if kind == TokenKind::Comment {
            if self.token_kind != TokenKind::Comment {
                self.previous_token_kind = self.token_kind;
            }
        } else {
            self.previous_token_kind = self.effective_kind();
            self.trailing_comma_before_comment = false;
        }
        self.token_kind = kind;
        self.value_start = start;
        self.value_end = end;
        self.value_is_escaped = escaped;
    }

    fn read_token(&mut self, first: u8) -> Result<Progress, ReaderError> {
        match self.effective_kind() {
            TokenKind::None => self.read_first_value(first),
            TokenKind::ContainerStart => match first {
                CLOSE_BRACE => self.end_container(),
                SLASH => self.consume_comment(),
                _ => self.read_property_name(first),
            },
            TokenKind::PropertyName => self.consume_value(first),
            _ if self.depth.depth() == 0 => self.read_after_root_value(first),
            _ if self.trailing_comma_before_comment => self.read_after_comma(first),
            _ => self.consume_next_token(first),
        }
    }

    fn read_first_value(&mut self, first: u8) -> Result<Progress, ReaderError> {
        if first == CLOSE_BRACE {
            return Err(self.error(SyntaxError::MismatchedContainer, Some(first)));
        }
        self.consume_value(first)
    }

    fn read_after_root_value(&mut self, first: u8) -> Result<Progress, ReaderError> {
        if self.options.allow_multiple_values {
            return self.read_first_value(first);
        }
        match first {
            SLASH => self.consume_comment(),
            CLOSE_BRACE => Err(self.error(SyntaxError::MismatchedContainer, Some(first))),
            _ => Err(self.error(SyntaxError::ExpectedEndAfterSingleValue, Some(first))),
        }
    }

    /// After a value inside a container: `,`, `}`, or a comment.
    fn consume_next_token(&mut self, first: u8) -> Result<Progress, ReaderError> {
        match first {
            COMMA => {
                self.bump();
                loop {
                    self.skip_whitespace();
                    match self.peek() {
                        Some(SLASH) if self.options.comment_handling == CommentHandling::Skip => {
                            if self.scan_comment()?.is_none() {
                                return Ok(Progress::RollBack);
                            }
                        }
                        Some(next) => return self.read_after_comma(next),
                        None => return self.end_of_data(SyntaxError::UnexpectedEndOfInput),
                    }
                }
            }
            CLOSE_BRACE => self.end_container(),
            SLASH => self.consume_comment(),
            _ => Err(self.error(SyntaxError::ExpectedSeparatorAfterValue, Some(first))),
        }
    }

    /// After a `,`: a property name, a comment, or (when permitted) `}`.
    fn read_after_comma(&mut self, first: u8) -> Result<Progress, ReaderError> {
        match first {
            SLASH => {
                self.trailing_comma_before_comment = true;
                self.consume_comment()
            }
            CLOSE_BRACE if self.options.allow_trailing_commas => self.end_container(),
            CLOSE_BRACE => Err(self.error(SyntaxError::TrailingCommaNotAllowed, Some(first))),
            _ => self.read_property_name(first),
        }
    }

    fn consume_value(&mut self, first: u8) -> Result<Progress, ReaderError> {
        match first {
            QUOTE => self.consume_string(),
            OPEN_BRACE => self.start_container(),
            b'-' | b'0'..=b'9' => self.consume_number(first),
            SLASH => self.consume_comment(),
            _ => match ExpectedLiteralBuffer::new(first) {
                Some(matcher) => self.consume_literal(matcher),
                None => Err(self.error(SyntaxError::ExpectedStartOfValue, Some(first))),
            },
        }
    }

    // ---- containers ------------------------------------------------------

    fn start_container(&mut self) -> Result<Progress, ReaderError> {
        let max = self.options.effective_max_depth();
        if self.depth.depth() >= max {
            return Err(self.error(SyntaxError::DepthExceeded(max), Some(OPEN_BRACE)));
        }
        let start = self.begin_token();
        self.bump();
        self.depth.push(true);
        self.in_container = true;
        if self.depth.depth() == 1 {
            self.is_not_primitive = true;
        }
        let end = self.here();
        self.set_token(TokenKind::ContainerStart, (start, end), false);
        Ok(Progress::Token)
    }

    fn end_container(&mut self) -> Result<Progress, ReaderError> {
        if !self.in_container || self.depth.pop().is_none() {
            return Err(self.error(SyntaxError::MismatchedContainer, Some(CLOSE_BRACE)));
        }
        self.in_container = self.depth.peek().unwrap_or(false);
        let start = self.begin_token();
        self.bump();
        let end = self.here();
        self.set_token(TokenKind::ContainerEnd, (start, end), false);
        Ok(Progress::Token)
    }

    // ---- property names and literals -------------------------------------

    /// A quoted or bare name, optional whitespace, and the `:` after it.
    fn read_property_name(&mut self, first: u8) -> Result<Progress, ReaderError> {
        let start = self.begin_token();
        let scanned = match first {
            QUOTE => {
                self.bump();
                self.scan_string()?
            }
            _ if is_identifier_start(first) => self
                .scan_identifier(start)?
                .map(|span| (span, false)),
            _ => return Err(self.error(SyntaxError::ExpectedPropertyName, Some(first))),
        };
        let Some((span, escaped)) = scanned else {
            return Ok(Progress::RollBack);
        };

        self.skip_whitespace();
        match self.peek() {
            Some(COLON) => self.bump(),
            Some(other) => {
                return Err(self.error(SyntaxError::ExpectedSeparatorAfterPropertyName, Some(other)));
            }
            None => return self.end_of_data(SyntaxError::ExpectedSeparatorAfterPropertyName),
        }
        self.set_token(TokenKind::PropertyName, span, escaped);
        Ok(Progress::Token)
    }

    fn scan_identifier(&mut self, start: SegmentPosition) -> Result<Option<Span>, ReaderError> {
        self.bump();
        loop {
            let window = self.window();
            let run = window.iter().take_while(|&&b| is_identifier_part(b)).count();
            self.advance_in_window(run);
            if run < window.len() {
                return Ok(Some((start, self.here())));
            }
            if self.peek().is_none() {
                // a final block reports the missing ':' instead
                return if self.is_final_block {
                    Ok(Some((start, self.here())))
                } else {
                    Ok(None)
                };
            }
        }
    }

    fn consume_literal(&mut self, mut matcher: ExpectedLiteralBuffer) -> Result<Progress, ReaderError> {
        let start = self.begin_token();
        self.bump();
        loop {
            let Some(b) = self.peek() else {
                return self.end_of_data(SyntaxError::ExpectedLiteral(matcher.kind()));
            };
            match matcher.step(b) {
                Step::NeedMore => self.bump(),
                Step::Done(kind) => {
                    self.bump();
                    let end = self.here();
                    self.set_token(kind, (start, end), false);
                    return Ok(Progress::Token);
                }
                Step::Reject => {
                    return Err(self.error(SyntaxError::ExpectedLiteral(matcher.kind()), Some(b)));
                }
            }
        }
    }
}
