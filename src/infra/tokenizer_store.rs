// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Loads the external tokenizer the corpus is encoded with.
//
// Tokenizers are trained elsewhere and persisted as
// HuggingFace tokenizer JSON files, one per name:
//
//   tokenizers/
//     tinyshakespeare.json
//     wiki_bpe_8k.json
//
// The batcher only ever calls encode(); training, vocab
// building and decoding are out of scope here.

use std::path::{Path, PathBuf};

use tokenizers::Tokenizer;

use crate::domain::traits::TokenEncoder;
use crate::error::{Error, Result};

pub struct TokenizerStore {
    dir: PathBuf,
}

impl TokenizerStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `{dir}/{name}.json`
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    /// Load a previously saved tokenizer by name
    pub fn load(&self, name: &str) -> Result<NamedTokenizer> {
        let path = self.path_for(name);
        if !path.exists() {
            return Err(Error::Tokenizer {
                name:   name.to_string(),
                reason: format!("no tokenizer file at '{}'", path.display()),
            });
        }

        let inner = Tokenizer::from_file(&path).map_err(|e| Error::Tokenizer {
            name:   name.to_string(),
            reason: format!("cannot load '{}': {e}", path.display()),
        })?;

        tracing::info!(
            "Loaded tokenizer '{}' from '{}' (vocab {})",
            name,
            path.display(),
            inner.get_vocab_size(true)
        );
        Ok(NamedTokenizer { name: name.to_string(), inner })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// A HuggingFace tokenizer tagged with the name it was loaded under.
pub struct NamedTokenizer {
    name:  String,
    inner: Tokenizer,
}

impl NamedTokenizer {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl TokenEncoder for NamedTokenizer {
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        // no [CLS]/[SEP]: the corpus is one continuous stream
        let enc = self.inner.encode(text, false).map_err(|e| Error::Tokenizer {
            name:   self.name.clone(),
            reason: format!("encode failed: {e}"),
        })?;
        Ok(enc.get_ids().to_vec())
    }
}

/// Write a minimal whitespace word-level tokenizer JSON for tests.
/// Ids are assigned in `words` order starting at 1; 0 is `[UNK]`.
#[cfg(test)]
pub(crate) fn write_word_level(dir: &Path, name: &str, words: &[&str]) -> PathBuf {
    let mut vocab = serde_json::json!({ "[UNK]": 0 });
    for (i, w) in words.iter().enumerate() {
        vocab[*w] = serde_json::json!(i + 1);
    }

    let tokenizer_json = serde_json::json!({
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": [],
        "normalizer": null,
        "pre_tokenizer": { "type": "Whitespace" },
        "post_processor": null,
        "decoder": null,
        "model": {
            "type": "WordLevel",
            "vocab": vocab,
            "unk_token": "[UNK]"
        }
    });

    let path = dir.join(format!("{name}.json"));
    std::fs::write(&path, serde_json::to_string_pretty(&tokenizer_json).unwrap()).unwrap();
    path
}
