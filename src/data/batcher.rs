// ============================================================
// Layer 4 — Sequence Batcher
// ============================================================
// Owns the train and val token streams and hands out
// (inputs, targets) batches cut from them in order.
//
// Each split has:
//   - an Arc<EncodedCorpus>  (read-only, shared freely)
//   - a Mutex<WindowCursor>  (the only mutable state)
//
// The mutex is held across "read position → advance → maybe
// wrap", so two threads calling next_batch on the same split
// always get different, consecutive windows.
//
// Batches are built on the CPU as TokenGrids. Moving them to
// a Burn device is the job of data::placement.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::application::data_config::DataConfig;
use crate::data::{
    loader::CorpusLoader,
    window::{BatchConfig, WindowCursor},
};
use crate::domain::{
    corpus::EncodedCorpus,
    split::{Mode, Split},
    traits::{CorpusCache, TokenEncoder},
};
use crate::error::{Error, Result};

// ─── TokenGrid ────────────────────────────────────────────────────────────────
/// A row-major 2D grid of token ids, shape `[rows, cols]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenGrid {
    data: Vec<u32>,
    rows: usize,
    cols: usize,
}

impl TokenGrid {
    /// Reshape a flat slice. `flat.len()` must equal `rows * cols`.
    fn from_flat(flat: &[u32], rows: usize, cols: usize) -> Self {
        debug_assert_eq!(flat.len(), rows * cols);
        Self { data: flat.to_vec(), rows, cols }
    }

    /// `[rows, cols]`
    pub fn shape(&self) -> [usize; 2] {
        [self.rows, self.cols]
    }

    pub fn row(&self, i: usize) -> &[u32] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.data.chunks_exact(self.cols)
    }

    pub fn get(&self, i: usize, j: usize) -> u32 {
        self.data[i * self.cols + j]
    }

    /// Row-major flat view
    pub fn as_flat(&self) -> &[u32] {
        &self.data
    }

    pub fn to_vecs(&self) -> Vec<Vec<u32>> {
        self.rows().map(<[u32]>::to_vec).collect()
    }
}

// ─── TokenBatch ───────────────────────────────────────────────────────────────
/// One batch on the CPU. `targets` is `inputs` shifted left by one
/// token across the whole window, so row ends continue into the
/// next row's start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenBatch {
    pub inputs:  TokenGrid,
    pub targets: TokenGrid,
}

// ─── SequenceBatcher ──────────────────────────────────────────────────────────
struct SplitStream {
    corpus: Arc<EncodedCorpus>,
    cursor: Mutex<WindowCursor>,
}

impl SplitStream {
    fn new(split: Split, corpus: EncodedCorpus, config: &BatchConfig) -> Result<Self> {
        let cursor = WindowCursor::new(config.step(), corpus.len()).ok_or(Error::CorpusTooSmall {
            split:    split.as_str(),
            length:   corpus.len(),
            required: config.window_len(),
        })?;
        Ok(Self {
            corpus: Arc::new(corpus),
            cursor: Mutex::new(cursor),
        })
    }
}

pub struct SequenceBatcher {
    config: BatchConfig,
    train:  SplitStream,
    val:    SplitStream,
}

impl SequenceBatcher {
    /// Build from already-encoded corpora. Fails with `CorpusTooSmall`
    /// if either split cannot fit one window of `step + 1` tokens.
    pub fn new(config: BatchConfig, train: EncodedCorpus, val: EncodedCorpus) -> Result<Self> {
        let train = SplitStream::new(Split::Train, train, &config)?;
        let val   = SplitStream::new(Split::Val, val, &config)?;

        tracing::info!(
            "SequenceBatcher ready: train = {} tokens, val = {} tokens, batch = {}x{}",
            train.corpus.len(),
            val.corpus.len(),
            config.batch_size(),
            config.block_size()
        );
        Ok(Self { config, train, val })
    }

    /// Load (or encode and cache) both splits through `loader`.
    pub fn load<E, C>(config: BatchConfig, loader: &CorpusLoader<E, C>) -> Result<Self>
    where
        E: TokenEncoder,
        C: CorpusCache,
    {
        let train = loader.load(Split::Train)?;
        let val   = loader.load(Split::Val)?;
        Self::new(config, train, val)
    }

    /// Load both splits as described by a `DataConfig`, encoding with `encoder`
    /// and caching through `cache`.
    pub fn from_config<E, C>(cfg: &DataConfig, encoder: E, cache: C) -> Result<Self>
    where
        E: TokenEncoder,
        C: CorpusCache,
    {
        cfg.validate()?;
        let batch = BatchConfig::new(cfg.batch_size, cfg.block_size)?;
        let loader = CorpusLoader::new(&cfg.data_dir, &cfg.dataset, encoder, cache)
            .with_strict_cache(cfg.strict_cache);
        Self::load(batch, &loader)
    }

    fn stream(&self, split: Split) -> &SplitStream {
        match split {
            Split::Train => &self.train,
            Split::Val   => &self.val,
        }
    }

    /// Next sequential batch for `mode`; wraps to the start of the
    /// split once the following window would overrun it.
    pub fn next_batch(&self, mode: Mode) -> TokenBatch {
        let stream = self.stream(mode.split());
        let range = stream.cursor.lock().advance();
        let window = stream.corpus.window(range);

        let (b, t) = (self.config.batch_size(), self.config.block_size());
        let step = self.config.step();
        TokenBatch {
            inputs:  TokenGrid::from_flat(&window[..step], b, t),
            targets: TokenGrid::from_flat(&window[1..=step], b, t),
        }
    }

    /// `next_batch` with the mode given as `"train"` or `"eval"`
    pub fn next_batch_str(&self, mode: &str) -> Result<TokenBatch> {
        Ok(self.next_batch(mode.parse()?))
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    pub fn corpus(&self, split: Split) -> &Arc<EncodedCorpus> {
        &self.stream(split).corpus
    }

    /// Token offset the next batch of `split` starts at
    pub fn cursor(&self, split: Split) -> usize {
        self.stream(split).cursor.lock().position()
    }

    pub fn reset(&self, split: Split) {
        self.stream(split).cursor.lock().reset();
    }

    pub fn reset_all(&self) {
        Split::ALL.into_iter().for_each(|s| self.reset(s));
    }

    /// Distinct batches `split` yields before starting over
    pub fn windows_per_cycle(&self, split: Split) -> usize {
        self.stream(split).cursor.lock().windows_per_cycle()
    }

    /// Embedding size covering every id in both splits
    pub fn vocab_size(&self) -> usize {
        self.train.corpus.vocab_size().max(self.val.corpus.vocab_size())
    }
}
