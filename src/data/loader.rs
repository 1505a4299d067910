// ============================================================
// Layer 4 — Corpus Loader
// ============================================================
// Produces the EncodedCorpus for one split, cache first:
//
//   {data_dir}/{dataset}_{split}.txt.cache exists?
//       │
//       ├── yes → decode it, tokenizer is never called
//       │
//       └── no  → read {dataset}_{split}.txt
//                  → encoder.encode(text)
//                  → write the cache
//
// A cache hit is trusted as-is, even if it was produced by a
// different tokenizer than the one loaded now.
//
// Cache write failures:
//   strict_cache = false → warn and carry on uncached
//   strict_cache = true  → fail with Error::Io

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::domain::{
    corpus::EncodedCorpus,
    split::Split,
    traits::{CorpusCache, TokenEncoder},
};
use crate::error::{Error, Result};

pub struct CorpusLoader<E, C> {
    data_dir:     PathBuf,
    dataset:      String,
    encoder:      E,
    cache:        C,
    strict_cache: bool,
}

impl<E: TokenEncoder, C: CorpusCache> CorpusLoader<E, C> {
    pub fn new(
        data_dir: impl Into<PathBuf>,
        dataset:  impl Into<String>,
        encoder:  E,
        cache:    C,
    ) -> Self {
        Self {
            data_dir:     data_dir.into(),
            dataset:      dataset.into(),
            encoder,
            cache,
            strict_cache: false,
        }
    }

    /// Fail instead of warning when the cache cannot be written
    pub fn with_strict_cache(mut self, strict: bool) -> Self {
        self.strict_cache = strict;
        self
    }

    /// `{data_dir}/{dataset}_{split}.txt`
    pub fn source_path(&self, split: Split) -> PathBuf {
        self.data_dir.join(split.file_name(&self.dataset))
    }

    pub fn load(&self, split: Split) -> Result<EncodedCorpus> {
        let source = self.source_path(split);

        let tokens = match self.cache.load(&source)? {
            Some(tokens) => {
                tracing::info!(
                    "Loading cached encoding from '{}'",
                    self.cache.cache_path(&source).display()
                );
                tokens
            }
            None => self.encode_and_cache(&source)?,
        };

        let corpus = EncodedCorpus::from_tokens(tokens)
            .ok_or_else(|| Error::EmptyCorpus { path: source.clone() })?;

        tracing::info!(
            "{}: {} tokens, vocab_size = {}",
            source.display(),
            corpus.len(),
            corpus.vocab_size()
        );
        Ok(corpus)
    }

    fn encode_and_cache(&self, source: &Path) -> Result<Vec<u32>> {
        let text = match fs::read_to_string(source) {
            Ok(t) => t,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::FileNotFound {
                    path:  source.to_path_buf(),
                    cache: self.cache.cache_path(source),
                })
            }
            Err(e) => return Err(Error::io(source, e)),
        };

        let chars = text.chars().count();
        tracing::info!("{}: size = {} chars", source.display(), chars);

        let tokens = self.encoder.encode(&text)?;
        // an empty encoding must never reach the cache
        let Some(max_id) = tokens.iter().max() else {
            return Err(Error::EmptyCorpus { path: source.to_path_buf() });
        };
        tracing::info!(
            "{}: max token id = {}, compression ratio = {:.4}",
            source.display(),
            max_id,
            tokens.len() as f64 / chars.max(1) as f64
        );

        match self.cache.store(source, &tokens) {
            Ok(()) => tracing::info!(
                "Saved cached encoding to '{}'",
                self.cache.cache_path(source).display()
            ),
            Err(e) if !self.strict_cache => {
                tracing::warn!("Continuing without cache for '{}': {}", source.display(), e)
            }
            Err(e) => return Err(e),
        }

        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::corpus_cache::FileCorpusCache;
    use std::cell::Cell;
    use tempfile::tempdir;

    /// One id per byte, counting how often it runs.
    struct ByteEncoder {
        calls: Cell<usize>,
    }

    impl ByteEncoder {
        fn new() -> Self {
            Self { calls: Cell::new(0) }
        }
    }

    impl TokenEncoder for ByteEncoder {
        fn encode(&self, text: &str) -> Result<Vec<u32>> {
            self.calls.set(self.calls.get() + 1);
            Ok(text.bytes().map(u32::from).collect())
        }
    }

    /// A cache whose writes always fail.
    struct ReadOnlyCache;

    impl CorpusCache for ReadOnlyCache {
        fn cache_path(&self, source: &Path) -> PathBuf {
            source.with_extension("txt.cache")
        }

        fn load(&self, _source: &Path) -> Result<Option<Vec<u32>>> {
            Ok(None)
        }

        fn store(&self, source: &Path, _tokens: &[u32]) -> Result<()> {
            Err(Error::io(
                self.cache_path(source),
                std::io::Error::new(ErrorKind::PermissionDenied, "read-only"),
            ))
        }
    }

    #[test]
    fn test_second_load_hits_cache() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("tiny_train.txt"), "hello world").unwrap();

        let encoder = ByteEncoder::new();
        let loader = CorpusLoader::new(dir.path(), "tiny", &encoder, FileCorpusCache::new());

        let first = loader.load(Split::Train).unwrap();
        assert_eq!(encoder.calls.get(), 1);
        assert!(dir.path().join("tiny_train.txt.cache").exists());

        let second = loader.load(Split::Train).unwrap();
        assert_eq!(encoder.calls.get(), 1);
        assert_eq!(first, second);
        assert_eq!(first.tokens(), "hello world".as_bytes().iter().map(|&b| b as u32).collect::<Vec<_>>());
    }

    #[test]
    fn test_cache_is_used_without_source() {
        let dir = tempdir().unwrap();
        let cache = FileCorpusCache::new();
        cache.store(&dir.path().join("tiny_val.txt"), &[5, 6, 7]).unwrap();

        let encoder = ByteEncoder::new();
        let loader = CorpusLoader::new(dir.path(), "tiny", &encoder, cache);

        let corpus = loader.load(Split::Val).unwrap();
        assert_eq!(corpus.tokens(), &[5, 6, 7]);
        assert_eq!(corpus.vocab_size(), 8);
        assert_eq!(encoder.calls.get(), 0);
    }

    #[test]
    fn test_stale_cache_is_trusted() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("tiny_train.txt"), "abc").unwrap();
        FileCorpusCache::new()
            .store(&dir.path().join("tiny_train.txt"), &[9, 9])
            .unwrap();

        let loader = CorpusLoader::new(dir.path(), "tiny", ByteEncoder::new(), FileCorpusCache::new());
        assert_eq!(loader.load(Split::Train).unwrap().tokens(), &[9, 9]);
    }

    #[test]
    fn test_missing_source_and_cache() {
        let dir = tempdir().unwrap();
        let loader = CorpusLoader::new(dir.path(), "tiny", ByteEncoder::new(), FileCorpusCache::new());

        let err = loader.load(Split::Train).unwrap_err();
        match err {
            Error::FileNotFound { path, cache } => {
                assert_eq!(path, dir.path().join("tiny_train.txt"));
                assert_eq!(cache, dir.path().join("tiny_train.txt.cache"));
            }
            other => panic!("expected FileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_text_is_rejected() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("tiny_train.txt"), "").unwrap();
        let loader = CorpusLoader::new(dir.path(), "tiny", ByteEncoder::new(), FileCorpusCache::new());

        assert!(matches!(loader.load(Split::Train), Err(Error::EmptyCorpus { .. })));
    }

    #[test]
    fn test_empty_text_writes_no_cache() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("tiny_train.txt");
        fs::write(&source, "").unwrap();
        let loader = CorpusLoader::new(dir.path(), "tiny", ByteEncoder::new(), FileCorpusCache::new());

        assert!(matches!(loader.load(Split::Train), Err(Error::EmptyCorpus { .. })));
        assert!(!dir.path().join("tiny_train.txt.cache").exists());

        // once the text is fixed the next load encodes it
        fs::write(&source, "hello").unwrap();
        assert_eq!(loader.load(Split::Train).unwrap().tokens(), &[104, 101, 108, 108, 111]);
    }

    #[test]
    fn test_cache_write_failure_is_soft_by_default() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("tiny_train.txt"), "abc").unwrap();
        let loader = CorpusLoader::new(dir.path(), "tiny", ByteEncoder::new(), ReadOnlyCache);

        assert_eq!(loader.load(Split::Train).unwrap().tokens(), &[97, 98, 99]);
    }

    #[test]
    fn test_cache_write_failure_is_fatal_when_strict() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("tiny_train.txt"), "abc").unwrap();
        let loader = CorpusLoader::new(dir.path(), "tiny", ByteEncoder::new(), ReadOnlyCache)
            .with_strict_cache(true);

        assert!(matches!(loader.load(Split::Train), Err(Error::Io { .. })));
    }
}
