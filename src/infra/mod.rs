// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Concrete implementations of the domain traits that touch
// the filesystem:
//
//   tokenizer_store.rs — loads a named HuggingFace tokenizer
//                        JSON and exposes it as a TokenEncoder
//
//   corpus_cache.rs    — `{source}.cache` binary files holding
//                        an already-encoded token sequence;
//                        implements CorpusCache
//
// Reference: Rust Book §9 (Error Handling)

/// Named tokenizer loading
pub mod tokenizer_store;

/// Encoded-corpus cache files
pub mod corpus_cache;
