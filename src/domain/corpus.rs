// ============================================================
// Layer 3 — EncodedCorpus
// ============================================================
// One split's worth of token ids, in file order.
//
// Built once (from cache or from the tokenizer) and never
// mutated afterwards, so the batcher shares it behind an Arc
// and reads it without locking.
//
// vocab_size is 1 + the largest id seen. It is computed here,
// once, so the model can be sized without rescanning.

use std::ops::Range;

/// An immutable, non-empty sequence of token ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedCorpus {
    tokens:     Vec<u32>,
    vocab_size: usize,
}

impl EncodedCorpus {
    /// Wrap a token sequence. Returns `None` for an empty sequence,
    /// which has no defined vocabulary size.
    pub fn from_tokens(tokens: Vec<u32>) -> Option<Self> {
        let max_id = *tokens.iter().max()?;
        Some(Self {
            tokens,
            vocab_size: max_id as usize + 1,
        })
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// `1 + max(token id)`
    pub fn vocab_size(&self) -> usize {
        self.vocab_size
    }

    pub fn tokens(&self) -> &[u32] {
        &self.tokens
    }

    /// Borrow a contiguous window. Panics on an out-of-range window;
    /// callers validate bounds up front.
    pub fn window(&self, range: Range<usize>) -> &[u32] {
        &self.tokens[range]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocab_size_is_max_plus_one() {
        let c = EncodedCorpus::from_tokens(vec![3, 7, 1, 7, 0]).unwrap();
        assert_eq!(c.vocab_size(), 8);
        assert_eq!(c.len(), 5);
    }

    #[test]
    fn test_empty_sequence_has_no_corpus() {
        assert!(EncodedCorpus::from_tokens(Vec::new()).is_none());
    }

    #[test]
    fn test_window_is_contiguous() {
        let c = EncodedCorpus::from_tokens((0..10).collect()).unwrap();
        assert_eq!(c.window(2..5), &[2, 3, 4]);
    }
}
