// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `prepare` and `peek`
// and all their configurable flags.
//
// Data flags can come from a JSON file (--config) and be
// overridden one by one on the command line:
//
//   seqbatch peek --config run.json --block-size 32 --mode eval

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::application::data_config::DataConfig;

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encode (or load cached) train/val splits and report their size
    Prepare(PrepareArgs),

    /// Draw a few batches onto a device and print their first rows
    Peek(PeekArgs),
}

/// Flags shared by every subcommand that touches a corpus.
/// Anything left unset falls back to --config, then to defaults.
#[derive(Args, Debug, Default)]
pub struct DataArgs {
    /// JSON file holding a full data config
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Base name of {dataset}_train.txt / {dataset}_val.txt
    #[arg(long)]
    pub dataset: Option<String>,

    /// Tokenizer file name (without .json) inside --tokenizer-dir
    #[arg(long)]
    pub tokenizer_name: Option<String>,

    /// Rows per batch
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Tokens per row
    #[arg(long)]
    pub block_size: Option<usize>,

    /// Directory holding the split text files and their caches
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Directory holding tokenizer JSON files
    #[arg(long)]
    pub tokenizer_dir: Option<PathBuf>,

    /// Fail instead of warning when a cache file cannot be written
    #[arg(long)]
    pub strict_cache: bool,
}

impl DataArgs {
    /// Merge --config (if any) with the flags given on the command line
    pub fn resolve(self) -> Result<DataConfig> {
        let mut cfg = match &self.config {
            Some(path) => DataConfig::load_json(path)
                .with_context(|| format!("Cannot read config '{}'", path.display()))?,
            None => DataConfig::default(),
        };

        if let Some(v) = self.dataset        { cfg.dataset = v; }
        if let Some(v) = self.tokenizer_name { cfg.tokenizer_name = v; }
        if let Some(v) = self.batch_size     { cfg.batch_size = v; }
        if let Some(v) = self.block_size     { cfg.block_size = v; }
        if let Some(v) = self.data_dir       { cfg.data_dir = v; }
        if let Some(v) = self.tokenizer_dir  { cfg.tokenizer_dir = v; }
        cfg.strict_cache |= self.strict_cache;

        Ok(cfg)
    }
}

/// All arguments for the `prepare` command
#[derive(Args, Debug)]
pub struct PrepareArgs {
    #[command(flatten)]
    pub data: DataArgs,
}

/// All arguments for the `peek` command
#[derive(Args, Debug)]
pub struct PeekArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// "train" or "eval"
    #[arg(long, default_value = "train")]
    pub mode: String,

    /// Number of batches to draw
    #[arg(long, default_value_t = 4)]
    pub count: usize,

    /// Where to place batches: "cpu" or "wgpu"
    #[arg(long, default_value = "cpu")]
    pub device: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_flags_override_defaults() {
        let args = DataArgs {
            dataset: Some("wiki".to_string()),
            block_size: Some(16),
            ..DataArgs::default()
        };
        let cfg = args.resolve().unwrap();
        assert_eq!(cfg.dataset, "wiki");
        assert_eq!(cfg.block_size, 16);
        assert_eq!(cfg.batch_size, DataConfig::default().batch_size);
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.json");
        DataConfig { dataset: "wiki".to_string(), batch_size: 64, ..DataConfig::default() }
            .save_json(&path)
            .unwrap();

        let args = DataArgs {
            config: Some(path),
            batch_size: Some(2),
            strict_cache: true,
            ..DataArgs::default()
        };
        let cfg = args.resolve().unwrap();
        assert_eq!(cfg.dataset, "wiki");
        assert_eq!(cfg.batch_size, 2);
        assert!(cfg.strict_cache);
    }
}
