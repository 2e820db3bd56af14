//! Character vocabulary.
//!
//! A [`Vocabulary`] maps single characters to the integer codes the model
//! was trained with. Codes `0` and `1` are reserved: `0` pads short
//! sequences and `1` stands in for any character the table does not know.
//!
//! The on-disk format is a flat JSON object, `{"a": 2, "b": 3, ...}`.
//! Keys that are not exactly one character (tokenizer artifacts such as an
//! `"UNK"` entry) can never match a single input character, so they are
//! skipped at load time.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

/// Code written into unused trailing positions.
pub const PAD_CODE: u32 = 0;

/// Code substituted for characters absent from the table.
pub const UNKNOWN_CODE: u32 = 1;

/// Errors raised while loading a vocabulary.
#[derive(Error, Debug)]
pub enum VocabError {
    /// The vocabulary file could not be read.
    #[error("failed to read vocabulary {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The contents are not a JSON object of non-negative integers.
    #[error("failed to parse vocabulary: {0}")]
    Parse(#[from] serde_json::Error),

    /// A character was assigned one of the reserved codes.
    #[error("character {ch:?} uses reserved code {code}")]
    ReservedCode { ch: char, code: u32 },
}

/// Immutable `char -> code` table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    codes: HashMap<char, u32>,
}

impl Vocabulary {
    /// Load a vocabulary from a JSON file.
    pub fn load(path: &Path) -> Result<Self, VocabError> {
        let raw = std::fs::read_to_string(path).map_err(|source| VocabError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let vocab = Self::from_json(&raw)?;
        info!(path = %path.display(), entries = vocab.len(), "vocabulary loaded");
        Ok(vocab)
    }

    /// Parse a vocabulary from JSON text.
    pub fn from_json(raw: &str) -> Result<Self, VocabError> {
        let table: HashMap<String, u32> = serde_json::from_str(raw)?;
        let mut codes = HashMap::with_capacity(table.len());
        for (key, code) in table {
            let mut chars = key.chars();
            let (Some(ch), None) = (chars.next(), chars.next()) else {
                debug!(key = %key, code, "skipping multi-character vocabulary key");
                continue;
            };
            codes.insert(ch, code);
        }
        Self::from_codes(codes)
    }

    /// Build a vocabulary from `(char, code)` pairs.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, VocabError>
    where
        I: IntoIterator<Item = (char, u32)>,
    {
        Self::from_codes(pairs.into_iter().collect())
    }

    fn from_codes(codes: HashMap<char, u32>) -> Result<Self, VocabError> {
        if let Some((&ch, &code)) = codes.iter().find(|&(_, &code)| code < 2) {
            return Err(VocabError::ReservedCode { ch, code });
        }
        Ok(Self { codes })
    }

    /// Look up a character, `None` if it is not in the table.
    pub fn get(&self, ch: char) -> Option<u32> {
        self.codes.get(&ch).copied()
    }

    /// Look up a character, falling back to [`UNKNOWN_CODE`].
    #[inline]
    pub fn code_for(&self, ch: char) -> u32 {
        self.get(ch).unwrap_or(UNKNOWN_CODE)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
