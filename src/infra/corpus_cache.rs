// ============================================================
// Layer 6 — File Corpus Cache
// ============================================================
// Stores an encoded corpus next to its source text so the
// tokenizer only ever runs once per file.
//
// File naming convention:
//   datasets/
//     shakespeare_train.txt          ← source text
//     shakespeare_train.txt.cache    ← encoded ids
//
// Binary layout (all little-endian):
//   [0..4)    magic  b"TKC1"
//   [4..12)   u64    number of tokens N
//   [12..)    N × u32 token ids
//
// Writes go to `{cache}.tmp` first and are renamed into place,
// so a crash mid-write never leaves a truncated cache behind
// that a later run would trust.
//
// The cache is NOT keyed by tokenizer: a cache written by a
// different tokenizer is loaded as-is. Delete the .cache file
// after changing tokenizers.

use std::{
    fs,
    io::{self, ErrorKind, Write},
    path::{Path, PathBuf},
};

use crate::domain::traits::CorpusCache;
use crate::error::{Error, Result};

const MAGIC: &[u8; 4] = b"TKC1";
const HEADER_LEN: usize = 12;

/// Suffix appended to the source path to form the cache path
pub const CACHE_SUFFIX: &str = ".cache";

/// `{source}.cache` files on the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileCorpusCache;

impl FileCorpusCache {
    pub fn new() -> Self {
        Self
    }
}

impl CorpusCache for FileCorpusCache {
    fn cache_path(&self, source: &Path) -> PathBuf {
        let mut p = source.as_os_str().to_owned();
        p.push(CACHE_SUFFIX);
        PathBuf::from(p)
    }

    fn load(&self, source: &Path) -> Result<Option<Vec<u32>>> {
        let path = self.cache_path(source);
        let bytes = match fs::read(&path) {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::io(path, e)),
        };
        decode(&bytes)
            .map(Some)
            .map_err(|reason| Error::CacheFormat { path, reason })
    }

    fn store(&self, source: &Path, tokens: &[u32]) -> Result<()> {
        let path = self.cache_path(source);
        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        write_then_rename(&tmp, &path, |f| f.write_all(&encode(tokens)))
            .map_err(|e| Error::io(&path, e))?;

        tracing::debug!("Wrote {} tokens to '{}'", tokens.len(), path.display());
        Ok(())
    }
}

fn write_then_rename<F>(tmp: &Path, path: &Path, write: F) -> io::Result<()>
where
    F: FnOnce(&mut fs::File) -> io::Result<()>,
{
    let result = fs::File::create(tmp)
        .and_then(|mut f| {
            write(&mut f)?;
            f.sync_all()
        })
        .and_then(|()| fs::rename(tmp, path));

    if result.is_err() {
        // best effort; the original error is what gets reported
        let _ = fs::remove_file(tmp);
    }
    result
}

fn encode(tokens: &[u32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + tokens.len() * 4);
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&(tokens.len() as u64).to_le_bytes());
    for t in tokens {
        out.extend_from_slice(&t.to_le_bytes());
    }
    out
}

fn decode(bytes: &[u8]) -> std::result::Result<Vec<u32>, String> {
    if bytes.len() < HEADER_LEN {
        return Err(format!("{} bytes is shorter than the header", bytes.len()));
    }
    if &bytes[..4] != MAGIC {
        return Err("bad magic".to_string());
    }

    let mut count = [0u8; 8];
    count.copy_from_slice(&bytes[4..HEADER_LEN]);
    let count = u64::from_le_bytes(count);

    let body = &bytes[HEADER_LEN..];
    if body.len() % 4 != 0 || (body.len() / 4) as u64 != count {
        return Err(format!(
            "header says {} tokens, body holds {} bytes",
            count,
            body.len()
        ));
    }

    Ok(body
        .chunks_exact(4)
        .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect())
}
