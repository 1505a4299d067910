// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from text files on disk to batches on a device.
//
// The pipeline flows in this order:
//
//   {dataset}_{split}.txt  (or its .cache)
//       │
//       ▼
//   CorpusLoader       → cache-first encode of one split
//       │
//       ▼
//   SequenceBatcher    → per-split cursor, contiguous windows
//       │
//       ▼
//   TokenBatch         → (inputs, targets) grids on the CPU
//       │
//       ▼
//   DeviceBatch<B>     → Burn Int tensors on the target device
//
// Reads are strictly sequential. There is no shuffling.

/// Batch shape and the wrapping cursor arithmetic
pub mod window;

/// Cache-first corpus loading
pub mod loader;

/// The train/val batcher
pub mod batcher;

/// Moving batches onto Burn devices
pub mod placement;
