//! The borrowed input: one contiguous block, or an ordered list of segments.

/// Byte source shared by the reader and the value views it hands out.
///
/// A single block behaves exactly like a one-element segment list, so the
/// grammar sub-machines are written once against segment indices.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Input<'a> {
    Single(&'a [u8]),
    Segments(&'a [&'a [u8]]),
}

impl<'a> Input<'a> {
    /// The segment at `index`, if there is one.
    #[inline]
    pub(crate) fn segment(self, index: usize) -> Option<&'a [u8]> {
        match self {
            Input::Single(block) => (index == 0).then_some(block),
            Input::Segments(segments) => segments.get(index).copied(),
        }
    }

    pub(crate) fn segment_count(self) -> usize {
        match self {
            Input::Single(_) => 1,
            Input::Segments(segments) => segments.len(),
        }
    }

    /// Index of the first non-empty segment, or the last index when every
    /// segment is empty.
    pub(crate) fn first_non_empty(self) -> usize {
        (0..self.segment_count())
            .find(|&index| self.segment(index).is_some_and(|s| !s.is_empty()))
            .unwrap_or_else(|| self.segment_count().saturating_sub(1))
    }
}
