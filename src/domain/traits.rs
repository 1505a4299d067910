// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The batcher talks to its two collaborators only through
// these traits:
//
//   TokenEncoder  — turns raw text into token ids
//                   (HuggingFace tokenizer in production,
//                    a stub in tests)
//   CorpusCache   — loads/stores an encoded sequence keyed
//                   by the source file it was built from
//
// Neither trait knows about splits, cursors or batches.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use std::path::{Path, PathBuf};

use crate::error::Result;

// ─── TokenEncoder ─────────────────────────────────────────────────────────────
/// Anything that can encode text into a sequence of token ids.
///
/// Implementations:
///   - tokenizers::Tokenizer → see infra::tokenizer_store
pub trait TokenEncoder {
    /// Encode the full text. Ids must be non-negative, hence `u32`.
    fn encode(&self, text: &str) -> Result<Vec<u32>>;
}

impl<T: TokenEncoder + ?Sized> TokenEncoder for &T {
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        (**self).encode(text)
    }
}

// ─── CorpusCache ──────────────────────────────────────────────────────────────
/// Persistent store for already-encoded corpora.
///
/// Implementations:
///   - FileCorpusCache → `{source}.cache` binary files
pub trait CorpusCache {
    /// Where the cache artifact for `source` lives
    fn cache_path(&self, source: &Path) -> PathBuf;

    /// Load the cached sequence for `source`, or `None` if there is no cache.
    fn load(&self, source: &Path) -> Result<Option<Vec<u32>>>;

    /// Persist the encoded sequence for `source`
    fn store(&self, source: &Path, tokens: &[u32]) -> Result<()>;
}
