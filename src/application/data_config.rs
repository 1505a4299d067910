// ============================================================
// Layer 2 — Data Configuration
// ============================================================
// Everything needed to locate a corpus and shape its batches.
// Serialisable so a run can be described by a JSON file:
//
//   {
//     "dataset": "tinyshakespeare",
//     "tokenizer_name": "tinyshakespeare",
//     "batch_size": 16,
//     "block_size": 128
//   }
//
// Fields left out of the file fall back to Default.

use std::{fs, path::{Path, PathBuf}};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Base name of `{dataset}_train.txt` / `{dataset}_val.txt`
    pub dataset:        String,
    /// Tokenizer JSON is `{tokenizer_dir}/{tokenizer_name}.json`
    pub tokenizer_name: String,
    pub batch_size:     usize,
    pub block_size:     usize,
    pub data_dir:       PathBuf,
    pub tokenizer_dir:  PathBuf,
    /// Fail the load when a cache file cannot be written
    pub strict_cache:   bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dataset:        "tinyshakespeare".to_string(),
            tokenizer_name: "tinyshakespeare".to_string(),
            batch_size:     8,
            block_size:     64,
            data_dir:       PathBuf::from("./datasets"),
            tokenizer_dir:  PathBuf::from("./tokenizers"),
            strict_cache:   false,
        }
    }
}

impl DataConfig {
    pub fn validate(&self) -> Result<()> {
        if self.dataset.trim().is_empty() {
            return Err(Error::InvalidConfig {
                field:  "dataset",
                reason: "must not be empty".to_string(),
            });
        }
        if self.tokenizer_name.trim().is_empty() {
            return Err(Error::InvalidConfig {
                field:  "tokenizer_name",
                reason: "must not be empty".to_string(),
            });
        }
        if self.batch_size == 0 {
            return Err(Error::InvalidConfig {
                field:  "batch_size",
                reason: "must be positive".to_string(),
            });
        }
        if self.block_size == 0 {
            return Err(Error::InvalidConfig {
                field:  "block_size",
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }

    pub fn load_json(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| Error::io(path, e))?;
        tracing::debug!("Saved data config to '{}'", path.display());
        Ok(())
    }
}
