//! seqbatch error types

use std::path::PathBuf;

/// seqbatch result type
pub type Result<T> = std::result::Result<T, Error>;

/// seqbatch errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Source text is missing and no cache exists for it
    #[error("source file not found: '{}' (and no cache at '{}')", path.display(), cache.display())]
    FileNotFound {
        /// Source text path
        path: PathBuf,
        /// Cache path that was checked first
        cache: PathBuf,
    },

    /// Filesystem failure while reading text or reading/writing a cache
    #[error("i/o error on '{}': {source}", path.display())]
    Io {
        /// File involved
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Cache file exists but does not hold a valid encoded sequence
    #[error("invalid cache file '{}': {reason}", path.display())]
    CacheFormat {
        /// Cache path
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },

    /// Encoding produced no tokens
    #[error("corpus '{}' encodes to zero tokens", path.display())]
    EmptyCorpus {
        /// Source text path
        path: PathBuf,
    },

    /// A split cannot fit a single window of `batch_size * block_size + 1` tokens
    #[error("{split} corpus too small: {length} tokens, one batch needs {required}")]
    CorpusTooSmall {
        /// Split name
        split: &'static str,
        /// Tokens in the split
        length: usize,
        /// Tokens required for one window
        required: usize,
    },

    /// Batch could not be placed on the requested device
    #[error("placement error: {reason}")]
    Placement {
        /// Description of what went wrong
        reason: String,
    },

    /// Batch mode outside {"train", "eval"}
    #[error("invalid mode '{mode}': expected \"train\" or \"eval\"")]
    InvalidMode {
        /// The rejected mode string
        mode: String,
    },

    /// Tokenizer could not be loaded or failed to encode
    #[error("tokenizer '{name}': {reason}")]
    Tokenizer {
        /// Tokenizer identifier
        name: String,
        /// Description of what went wrong
        reason: String,
    },

    /// Invalid configuration value
    #[error("invalid config '{field}': {reason}")]
    InvalidConfig {
        /// Field name
        field: &'static str,
        /// Why it's invalid
        reason: String,
    },

    /// Configuration file could not be parsed
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn placement(reason: impl Into<String>) -> Self {
        Error::Placement {
            reason: reason.into(),
        }
    }
}
