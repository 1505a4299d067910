// ============================================================
// Layer 3 — Split and Mode
// ============================================================
// A corpus comes in two splits, each read by its own cursor.
// Callers ask for batches by *mode* ("train" / "eval");
// the mode decides which split the window is cut from.
//
//   Mode::Train → Split::Train → {dataset}_train.txt
//   Mode::Eval  → Split::Val   → {dataset}_val.txt

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One of the two token streams owned by the batcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Val,
}

impl Split {
    /// Both splits, in load order
    pub const ALL: [Split; 2] = [Split::Train, Split::Val];

    /// Short name used in file names and log lines
    pub fn as_str(self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Val   => "val",
        }
    }

    /// Source text file name for a dataset, e.g. `tinyshakespeare_val.txt`
    pub fn file_name(self, dataset: &str) -> String {
        format!("{}_{}.txt", dataset, self.as_str())
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which loop is asking for a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Train,
    Eval,
}

impl Mode {
    /// The split this mode reads from
    pub fn split(self) -> Split {
        match self {
            Mode::Train => Split::Train,
            Mode::Eval  => Split::Val,
        }
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "train" => Ok(Mode::Train),
            "eval"  => Ok(Mode::Eval),
            other   => Err(Error::InvalidMode { mode: other.to_string() }),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Train => f.write_str("train"),
            Mode::Eval  => f.write_str("eval"),
        }
    }
}
