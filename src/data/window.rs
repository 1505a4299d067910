// ============================================================
// Layer 4 — Batch Shape and Window Cursor
// ============================================================
// A batch is one contiguous window of the token stream,
// reshaped into a (batch_size, block_size) grid:
//
//   step = batch_size * block_size
//   window = corpus[ix .. ix + step + 1]     (step + 1 tokens)
//   inputs  = window[0 .. step]
//   targets = window[1 .. step + 1]
//
// The extra token is what lets targets be inputs shifted by
// one without reading past the window.
//
// Cursor movement, per call:
//   1. hand out ix .. ix + step + 1
//   2. ix += step
//   3. if ix + step + 1 > len → ix = 0
//
// Step 3 means the tail of the corpus that cannot fill a whole
// window is skipped every cycle; the next call starts over
// from token 0.
//
// Example: len = 10, batch_size = 2, block_size = 2 (step = 4)
//   call 1: window [0..5),  ix → 4   (4 + 5 = 9  <= 10, keep)
//   call 2: window [4..9),  ix → 8   (8 + 5 = 13 >  10, reset)
//   call 3: window [0..5)   again

use std::ops::Range;

use crate::error::{Error, Result};

/// Shape of every batch handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchConfig {
    batch_size: usize,
    block_size: usize,
    step:       usize,
}

impl BatchConfig {
    pub fn new(batch_size: usize, block_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(Error::InvalidConfig {
                field:  "batch_size",
                reason: "must be positive".to_string(),
            });
        }
        if block_size == 0 {
            return Err(Error::InvalidConfig {
                field:  "block_size",
                reason: "must be positive".to_string(),
            });
        }
        // step + 1 must also fit, it is the window length
        let step = batch_size
            .checked_mul(block_size)
            .filter(|s| s.checked_add(1).is_some())
            .ok_or_else(|| Error::InvalidConfig {
                field:  "block_size",
                reason: format!("batch_size * block_size overflows ({batch_size} * {block_size})"),
            })?;

        Ok(Self { batch_size, block_size, step })
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Tokens consumed per batch: `batch_size * block_size`
    pub fn step(&self) -> usize {
        self.step
    }

    /// Tokens read per batch, including the trailing target token
    pub fn window_len(&self) -> usize {
        self.step + 1
    }
}

/// Sequential read position over one corpus.
///
/// Invariant: `position + step + 1 <= len` whenever a window is
/// handed out, which holds from construction on because the
/// cursor resets before it could overrun.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowCursor {
    position: usize,
    step:     usize,
    len:      usize,
}

impl WindowCursor {
    /// Returns `None` when not even one window fits in `len` tokens.
    pub fn new(step: usize, len: usize) -> Option<Self> {
        (step > 0 && step < len).then_some(Self { position: 0, step, len })
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Hand out the current window and move past it, wrapping to 0
    /// when the following window would not fit.
    pub fn advance(&mut self) -> Range<usize> {
        let ix = self.position;
        let window = ix..ix + self.step + 1;

        self.position = ix + self.step;
        if self.position + self.step + 1 > self.len {
            self.position = 0;
        }
        window
    }

    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Distinct windows handed out before the cursor returns to 0
    pub fn windows_per_cycle(&self) -> usize {
        1 + (self.len - self.step - 1) / self.step
    }
}
