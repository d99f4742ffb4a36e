//! Container depth tracker.
//!
//! One bit per open container records whether that level reads keyed entries
//! (`true`) or positional values (`false`). The first 64 levels live inline;
//! deeper levels spill into a heap vector of 64-bit words, so the common case
//! never allocates and cloning a state capsule stays cheap.

use alloc::vec::Vec;

const WORD_BITS: usize = u64::BITS as usize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub(crate) struct DepthStack {
    inline: u64,
    spill: Vec<u64>,
    depth: usize,
}

impl DepthStack {
    /// Number of open containers.
    #[inline]
    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    /// Opens a container in the given mode.
    pub(crate) fn push(&mut self, keyed: bool) {
        let index = self.depth;
        if index < WORD_BITS {
            set_bit(&mut self.inline, index, keyed);
        } else {
            let spilled = index - WORD_BITS;
            let word = spilled / WORD_BITS;
            if word >= self.spill.len() {
                self.spill.push(0);
            }
            set_bit(&mut self.spill[word], spilled % WORD_BITS, keyed);
        }
        self.depth += 1;
    }

    /// Closes the innermost container and returns its mode, or `None` when no
    /// container is open.
    pub(crate) fn pop(&mut self) -> Option<bool> {
        let mode = self.peek()?;
        self.depth -= 1;
        Some(mode)
    }

    /// Mode of the innermost open container.
    pub(crate) fn peek(&self) -> Option<bool> {
        let index = self.depth.checked_sub(1)?;
        if index < WORD_BITS {
            Some(get_bit(self.inline, index))
        } else {
            let spilled = index - WORD_BITS;
            Some(get_bit(self.spill[spilled / WORD_BITS], spilled % WORD_BITS))
        }
    }
}

#[inline]
fn set_bit(word: &mut u64, index: usize, value: bool) {
    if value {
        *word |= 1u64 << index;
    } else {
        *word &= !(1u64 << index);
    }
}

#[inline]
fn get_bit(word: u64, index: usize) -> bool {
    word & (1u64 << index) != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_pop_inline() {
        let mut stack = DepthStack::default();
        assert_eq!(stack.pop(), None);
        stack.push(true);
        stack.push(false);
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.peek(), Some(false));
        assert_eq!(stack.pop(), Some(false));
        assert_eq!(stack.pop(), Some(true));
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn spills_past_inline_word() {
        let mut stack = DepthStack::default();
        let modes: Vec<bool> = (0..200).map(|i| i % 3 == 0).collect();
        for &m in &modes {
            stack.push(m);
        }
        assert_eq!(stack.depth(), 200);
        for &m in modes.iter().rev() {
            assert_eq!(stack.pop(), Some(m));
        }
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn reuses_spilled_words() {
        let mut stack = DepthStack::default();
        for _ in 0..70 {
            stack.push(true);
        }
        for _ in 0..70 {
            stack.pop();
        }
        for _ in 0..70 {
            stack.push(false);
        }
        assert_eq!(stack.peek(), Some(false));
        assert_eq!(stack.spill.len(), 1);
    }
}
