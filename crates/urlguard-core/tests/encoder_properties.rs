//! Property tests for the fixed-length encoder.

use std::sync::Arc;

use proptest::prelude::*;
use urlguard_core::Encoder;
use urlguard_core::vocab::{PAD_CODE, UNKNOWN_CODE, Vocabulary};

const L: usize = 32;

/// Lowercase letters, digits and URL punctuation, codes starting at 2.
fn url_vocab() -> Vocabulary {
    let alphabet = "abcdefghijklmnopqrstuvwxyz0123456789:/.-_?=&%";
    Vocabulary::from_pairs(alphabet.chars().zip(2u32..)).unwrap()
}

fn encoder() -> Encoder {
    Encoder::new(Arc::new(url_vocab()), L).unwrap()
}

proptest! {
    #[test]
    fn length_is_always_l(s in ".{0,80}") {
        prop_assert_eq!(encoder().encode(&s).len(), L);
    }

    #[test]
    fn short_input_is_codes_then_padding(s in "[a-z0-9:/.?X日]{0,32}") {
        let enc = encoder();
        let vocab = url_vocab();
        let encoded = enc.encode(&s);
        let n = s.chars().count();

        for (i, ch) in s.chars().enumerate() {
            prop_assert_eq!(encoded[i], vocab.code_for(ch));
        }
        prop_assert!(encoded[n..].iter().all(|&c| c == PAD_CODE));
    }

    #[test]
    fn long_input_equals_encoded_prefix(s in "[a-z/.:X]{33,120}") {
        let enc = encoder();
        let prefix: String = s.chars().take(L).collect();
        let encoded = enc.encode(&s);
        prop_assert_eq!(&encoded, &enc.encode(&prefix));
        prop_assert!(encoded.iter().all(|&c| c != PAD_CODE));
    }

    #[test]
    fn out_of_vocabulary_characters_are_interchangeable(
        prefix in "[a-z]{0,10}",
        suffix in "[a-z]{0,10}",
        a in "[A-Z!@#$^*()日本]",
        b in "[A-Z!@#$^*()日本]",
    ) {
        let enc = encoder();
        let left = format!("{prefix}{a}{suffix}");
        let right = format!("{prefix}{b}{suffix}");
        prop_assert_eq!(enc.encode(&left), enc.encode(&right));
        prop_assert_eq!(enc.encode(&left)[prefix.len()], UNKNOWN_CODE);
    }

    #[test]
    fn encoding_is_pure(s in ".{0,64}") {
        let enc = encoder();
        prop_assert_eq!(enc.encode(&s), enc.encode(&s));
    }
}

#[test]
fn empty_string_is_all_zeros() {
    assert_eq!(encoder().encode(""), vec![0; L]);
}

#[test]
fn documented_scenarios() {
    let vocab = Arc::new(Vocabulary::from_pairs([('a', 2), ('b', 3)]).unwrap());
    let enc = Encoder::new(vocab, 5).unwrap();
    assert_eq!(enc.encode("ab"), vec![2, 3, 0, 0, 0]);
    assert_eq!(enc.encode("abcabc"), vec![2, 3, 1, 2, 3]);
}

#[test]
fn default_length_matches_trained_model() {
    let enc = Encoder::new(Arc::new(url_vocab()), urlguard_core::encoder::DEFAULT_MAX_LEN).unwrap();
    let url = "https://example.com/".repeat(20);
    assert_eq!(enc.encode(&url).len(), 200);
    assert_eq!(enc.encode("http://x").len(), 200);
}
