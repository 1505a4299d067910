// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust types that define what the system works with:
// splits, modes, encoded corpora, and the collaborator traits.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits

// Train/val split and train/eval mode
pub mod split;

// An immutable encoded token stream
pub mod corpus;

// Tokenizer and cache abstractions that other layers implement
pub mod traits;
