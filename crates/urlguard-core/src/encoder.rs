//! Fixed-length character encoding.
//!
//! [`Encoder::encode`] turns an arbitrary string into exactly `max_len`
//! integer codes:
//!
//! 1. Each character is looked up in the [`Vocabulary`]; unknown
//!    characters become [`UNKNOWN_CODE`].
//! 2. Input longer than `max_len` keeps its first `max_len` characters.
//! 3. Shorter input is right-padded with [`PAD_CODE`].
//!
//! Padding and truncation both operate on the tail, so the start of the
//! URL (scheme and host) always survives.

use std::sync::Arc;

use urlguard_types::{Result, UrlguardError};

use crate::vocab::{PAD_CODE, UNKNOWN_CODE, Vocabulary};

/// Sequence length the shipped model was trained with.
pub const DEFAULT_MAX_LEN: usize = 200;

/// Maps strings to fixed-length code sequences.
///
/// Cheap to clone; the vocabulary is shared.
#[derive(Debug, Clone)]
pub struct Encoder {
    vocab: Arc<Vocabulary>,
    max_len: usize,
}

impl Encoder {
    /// Create an encoder producing sequences of `max_len` codes.
    pub fn new(vocab: Arc<Vocabulary>, max_len: usize) -> Result<Self> {
        if max_len == 0 {
            return Err(UrlguardError::config("encoder max_len must be greater than 0"));
        }
        Ok(Self { vocab, max_len })
    }

    /// Encode `input`. Never fails; the result always has `max_len` entries.
    pub fn encode(&self, input: &str) -> Vec<u32> {
        let mut sequence = Vec::with_capacity(self.max_len);
        sequence.extend(
            input
                .chars()
                .take(self.max_len)
                .map(|ch| self.vocab.code_for(ch)),
        );
        sequence.resize(self.max_len, PAD_CODE);
        sequence
    }

    /// Number of characters of `input` that end up in the sequence.
    pub fn used_len(&self, input: &str) -> usize {
        input.chars().take(self.max_len).count()
    }

    /// Whether `input` is longer than the sequence and gets cut.
    pub fn truncates(&self, input: &str) -> bool {
        input.chars().nth(self.max_len).is_some()
    }

    /// Count of characters in the kept prefix that map to [`UNKNOWN_CODE`].
    pub fn unknown_count(&self, input: &str) -> usize {
        input
            .chars()
            .take(self.max_len)
            .filter(|&ch| self.vocab.code_for(ch) == UNKNOWN_CODE)
            .count()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ab_encoder(max_len: usize) -> Encoder {
        let vocab = Vocabulary::from_pairs([('a', 2), ('b', 3)]).unwrap();
        Encoder::new(Arc::new(vocab), max_len).unwrap()
    }

    #[test]
    fn pads_short_input_at_the_end() {
        assert_eq!(ab_encoder(5).encode("ab"), vec![2, 3, 0, 0, 0]);
    }

    #[test]
    fn truncates_long_input_at_the_end() {
        assert_eq!(ab_encoder(5).encode("abcabc"), vec![2, 3, 1, 2, 3]);
    }

    #[test]
    fn empty_input_is_all_padding() {
        let encoded = ab_encoder(DEFAULT_MAX_LEN).encode("");
        assert_eq!(encoded.len(), DEFAULT_MAX_LEN);
        assert!(encoded.iter().all(|&c| c == PAD_CODE));
    }

    #[test]
    fn exact_length_input_is_untouched() {
        assert_eq!(ab_encoder(4).encode("abba"), vec![2, 3, 3, 2]);
    }

    #[test]
    fn unknown_characters_are_interchangeable() {
        let enc = ab_encoder(8);
        assert_eq!(enc.encode("a?b"), enc.encode("a日b"));
        assert_eq!(enc.encode("a?b"), vec![2, 1, 3, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn counts_characters_not_bytes() {
        let enc = ab_encoder(3);
        assert_eq!(enc.encode("ééé"), vec![1, 1, 1]);
        assert_eq!(enc.used_len("éa"), 2);
    }

    #[test]
    fn truncation_flag() {
        let enc = ab_encoder(3);
        assert!(!enc.truncates("abc"));
        assert!(enc.truncates("abca"));
    }

    #[test]
    fn unknown_count_only_covers_kept_prefix() {
        let enc = ab_encoder(3);
        assert_eq!(enc.unknown_count("axyzzz"), 2);
        assert_eq!(enc.unknown_count("ab"), 0);
    }

    #[test]
    fn zero_length_rejected() {
        let vocab = Arc::new(Vocabulary::default());
        let err = Encoder::new(vocab, 0).unwrap_err();
        assert!(err.to_string().contains("max_len"));
    }

    #[test]
    fn repeated_calls_are_identical() {
        let enc = ab_encoder(DEFAULT_MAX_LEN);
        let url = "http://abba.example/?q=ab";
        assert_eq!(enc.encode(url), enc.encode(url));
    }
}
