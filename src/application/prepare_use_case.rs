// ============================================================
// Layer 2 — PrepareUseCase
// ============================================================
// Brings a corpus to the point where batches can be drawn:
//
//   Step 1: Validate the config
//   Step 2: Load the named tokenizer        (Layer 6 - infra)
//   Step 3: Encode or load both splits      (Layer 4 - data)
//   Step 4: Build the SequenceBatcher       (Layer 4 - data)
//
// Running it once warms the .cache files, so later runs skip
// tokenization entirely.

use anyhow::{Context, Result};

use crate::application::data_config::DataConfig;
use crate::data::batcher::SequenceBatcher;
use crate::domain::split::Split;
use crate::infra::{corpus_cache::FileCorpusCache, tokenizer_store::TokenizerStore};

/// What a prepared corpus looks like, for the CLI to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrepareReport {
    pub train_tokens:      usize,
    pub val_tokens:        usize,
    pub vocab_size:        usize,
    pub train_batches:     usize,
    pub val_batches:       usize,
    pub tokens_per_batch:  usize,
}

pub struct PrepareUseCase {
    config: DataConfig,
}

impl PrepareUseCase {
    pub fn new(config: DataConfig) -> Self {
        Self { config }
    }

    /// Build a batcher from the config: tokenizer first, then both splits.
    pub fn build_batcher(&self) -> Result<SequenceBatcher> {
        let cfg = &self.config;
        cfg.validate().context("Invalid data config")?;

        let tokenizer = TokenizerStore::new(&cfg.tokenizer_dir)
            .load(&cfg.tokenizer_name)
            .with_context(|| format!("Cannot load tokenizer '{}'", cfg.tokenizer_name))?;

        SequenceBatcher::from_config(cfg, tokenizer, FileCorpusCache::new()).with_context(|| {
            format!(
                "Cannot prepare dataset '{}' in '{}'",
                cfg.dataset,
                cfg.data_dir.display()
            )
        })
    }

    pub fn execute(&self) -> Result<PrepareReport> {
        let batcher = self.build_batcher()?;
        Ok(report(&batcher))
    }
}

pub fn report(batcher: &SequenceBatcher) -> PrepareReport {
    PrepareReport {
        train_tokens:     batcher.corpus(Split::Train).len(),
        val_tokens:       batcher.corpus(Split::Val).len(),
        vocab_size:       batcher.vocab_size(),
        train_batches:    batcher.windows_per_cycle(Split::Train),
        val_batches:      batcher.windows_per_cycle(Split::Val),
        tokens_per_batch: batcher.config().step(),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::split::Mode;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_prepare_reports_and_caches() {
        let dir = tempdir().unwrap();
        let cfg = fixtures::write_corpus(dir.path());

        let report = PrepareUseCase::new(cfg.clone()).execute().unwrap();
        assert_eq!(report.train_tokens, 40);
        assert_eq!(report.val_tokens, 20);
        assert_eq!(report.vocab_size, fixtures::WORDS.len() + 1);
        assert_eq!(report.tokens_per_batch, 8);
        // 40 tokens, step 8 → windows at 0, 8, 16, 24
        assert_eq!(report.train_batches, 4);
        assert_eq!(report.val_batches, 2);

        assert!(cfg.data_dir.join("hamlet_train.txt.cache").exists());
        assert!(cfg.data_dir.join("hamlet_val.txt.cache").exists());
    }

    #[test]
    fn test_second_run_needs_only_caches() {
        let dir = tempdir().unwrap();
        let cfg = fixtures::write_corpus(dir.path());

        let first = PrepareUseCase::new(cfg.clone()).build_batcher().unwrap();
        fs::remove_file(cfg.data_dir.join("hamlet_train.txt")).unwrap();
        fs::remove_file(cfg.data_dir.join("hamlet_val.txt")).unwrap();
        let second = PrepareUseCase::new(cfg).build_batcher().unwrap();

        for mode in [Mode::Train, Mode::Eval, Mode::Train] {
            assert_eq!(first.next_batch(mode), second.next_batch(mode));
        }
    }

    #[test]
    fn test_first_batch_is_encoded_text() {
        let dir = tempdir().unwrap();
        let cfg = fixtures::write_corpus(dir.path());

        let batcher = PrepareUseCase::new(cfg).build_batcher().unwrap();
        let batch = batcher.next_batch(Mode::Train);
        // to be or not | to be that is | the
        assert_eq!(batch.inputs.to_vecs(),  vec![vec![1, 2, 3, 4], vec![1, 2, 5, 6]]);
        assert_eq!(batch.targets.to_vecs(), vec![vec![2, 3, 4, 1], vec![2, 5, 6, 7]]);
    }

    #[test]
    fn test_block_too_large_fails() {
        let dir = tempdir().unwrap();
        let cfg = DataConfig { block_size: 20, ..fixtures::write_corpus(dir.path()) };

        let err = PrepareUseCase::new(cfg).execute().unwrap_err();
        let cause = err.downcast_ref::<crate::error::Error>().unwrap();
        assert!(matches!(cause, crate::error::Error::CorpusTooSmall { split: "train", .. }));
    }

    #[test]
    fn test_missing_dataset_fails() {
        let dir = tempdir().unwrap();
        let cfg = DataConfig { dataset: "othello".to_string(), ..fixtures::write_corpus(dir.path()) };

        let err = PrepareUseCase::new(cfg).execute().unwrap_err();
        let cause = err.downcast_ref::<crate::error::Error>().unwrap();
        assert!(matches!(cause, crate::error::Error::FileNotFound { .. }));
    }
}
