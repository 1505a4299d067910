//! Sequential (input, target) batches for language-model training.
//!
//! A [`SequenceBatcher`] owns a train and a val token stream, each encoded
//! once (or loaded from a `.cache` file) and read by its own wrapping
//! cursor. Every batch is one contiguous window of
//! `batch_size * block_size + 1` tokens, reshaped into
//! `(batch_size, block_size)` inputs and the same grid shifted by one
//! token as targets.
//!
//! ```ignore
//! use seqbatch::{BatchConfig, EncodedCorpus, Mode, SequenceBatcher};
//!
//! let corpus = |n| EncodedCorpus::from_tokens((0..n).collect()).unwrap();
//! let batcher = SequenceBatcher::new(BatchConfig::new(2, 2)?, corpus(10), corpus(10))?;
//! let batch = batcher.next_batch(Mode::Train);
//! assert_eq!(batch.inputs.to_vecs(), vec![vec![0, 1], vec![2, 3]]);
//! assert_eq!(batch.targets.to_vecs(), vec![vec![1, 2], vec![3, 4]]);
//! ```

pub mod application;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod infra;

pub use application::data_config::DataConfig;
pub use data::{
    batcher::{SequenceBatcher, TokenBatch, TokenGrid},
    loader::CorpusLoader,
    placement::{DeviceBatch, Target},
    window::{BatchConfig, WindowCursor},
};
pub use domain::{
    corpus::EncodedCorpus,
    split::{Mode, Split},
    traits::{CorpusCache, TokenEncoder},
};
pub use error::{Error, Result};
pub use infra::{corpus_cache::FileCorpusCache, tokenizer_store::TokenizerStore};
