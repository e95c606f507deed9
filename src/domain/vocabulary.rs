// ============================================================
// Layer 3 — Vocabulary Domain Type
// ============================================================
// Maps tokens to dense integer ids and back.
//
// Id assignment order (strict insertion order, starting at 0):
//   0          → pad token
//   1          → out-of-vocabulary token
//   2 .. 2+P   → pre-trained words, in the order supplied
//   2+P ..     → corpus tokens not seen yet, depth-first order
//
// Pre-trained words must be unique among themselves and must
// not collide with the reserved tokens. Corpus tokens that are
// already known are skipped silently.
//
// Serialised as the ordered token list; the id of each token
// is its position in that list. A list that repeats a token is
// rejected on the way back in.
//
// Reference: Rust Book §8 (Hash Maps)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::token_tree::TokenTree;
use crate::error::{EncoderError, EncoderResult};

/// Default padding token
pub const PAD_TOKEN: &str = "~#PaD#~";

/// Default out-of-vocabulary token
pub const OOV_TOKEN: &str = "~#OoV#~";

/// Number of reserved ids placed before any other token
pub const RESERVED_IDS: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Vocabulary {
    ids:    HashMap<String, usize>,
    tokens: Vec<String>,
}

impl Vocabulary {
    /// A vocabulary holding only the reserved pad (id 0) and oov (id 1) entries.
    pub fn with_reserved(pad: &str, oov: &str) -> EncoderResult<Self> {
        if pad == oov {
            return Err(EncoderError::ReservedTokenClash(pad.to_string()));
        }
        let mut vocab = Self::default();
        vocab.insert(pad);
        vocab.insert(oov);
        Ok(vocab)
    }

    /// Build the full vocabulary: reserved tokens, then pre-trained
    /// words, then every new token found in the corpus.
    pub fn build(
        pad:              &str,
        oov:              &str,
        pretrained_words: Option<&[String]>,
        corpus:           &TokenTree,
    ) -> EncoderResult<Self> {
        let mut vocab = Self::with_reserved(pad, oov)?;

        for word in pretrained_words.unwrap_or_default() {
            vocab.insert_unique(word)?;
        }

        vocab.extend_from(corpus);
        Ok(vocab)
    }

    /// Insert a token if missing. Returns its id either way.
    pub fn insert(&mut self, token: &str) -> usize {
        if let Some(&id) = self.ids.get(token) {
            return id;
        }
        let id = self.tokens.len();
        self.ids.insert(token.to_string(), id);
        self.tokens.push(token.to_string());
        id
    }

    /// Insert a token that must not already be present.
    pub fn insert_unique(&mut self, token: &str) -> EncoderResult<usize> {
        if self.contains(token) {
            return Err(EncoderError::DuplicatePretrainedWord(token.to_string()));
        }
        Ok(self.insert(token))
    }

    /// Insert every leaf of the corpus, skipping known tokens.
    pub fn extend_from(&mut self, corpus: &TokenTree) {
        let before = self.len();
        for token in corpus.leaves() {
            self.insert(token);
        }
        tracing::debug!("Corpus added {} new tokens", self.len() - before);
    }

    pub fn id(&self, token: &str) -> Option<usize> {
        self.ids.get(token).copied()
    }

    /// Id of the token, or `fallback` when unknown (normally the oov id).
    pub fn id_or(&self, token: &str, fallback: usize) -> usize {
        self.id(token).unwrap_or(fallback)
    }

    pub fn token(&self, id: usize) -> Option<&str> {
        self.tokens.get(id).map(String::as_str)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.ids.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens in id order
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// (token, id) pairs in id order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.tokens.iter().enumerate().map(|(id, t)| (t.as_str(), id))
    }
}

impl TryFrom<Vec<String>> for Vocabulary {
    type Error = EncoderError;

    fn try_from(tokens: Vec<String>) -> EncoderResult<Self> {
        let mut vocab = Self::default();
        for token in &tokens {
            if vocab.contains(token) {
                return Err(EncoderError::DuplicateToken(token.clone()));
            }
            vocab.insert(token);
        }
        Ok(vocab)
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocab: Vocabulary) -> Self {
        vocab.tokens
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn words(ws: &[&str]) -> Vec<String> {
        ws.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_reserved_ids_come_first() {
        let vocab = Vocabulary::build(PAD_TOKEN, OOV_TOKEN, None, &TokenTree::empty()).unwrap();
        assert_eq!(vocab.id(PAD_TOKEN), Some(0));
        assert_eq!(vocab.id(OOV_TOKEN), Some(1));
        assert_eq!(vocab.len(), RESERVED_IDS);
    }

    #[test]
    fn test_corpus_ids_follow_first_seen_order() {
        let corpus = TokenTree::seq([TokenTree::seq(["a", "b"]), "c".into()]);
        let vocab  = Vocabulary::build(PAD_TOKEN, OOV_TOKEN, None, &corpus).unwrap();

        assert_eq!(vocab.id("a"), Some(2));
        assert_eq!(vocab.id("b"), Some(3));
        assert_eq!(vocab.id("c"), Some(4));
        assert_eq!(vocab.len(), 5);
    }

    #[test]
    fn test_ids_are_dense_and_unique() {
        let corpus = TokenTree::seq(["x", "y", "x", "z", "y"]);
        let pre    = words(&["p", "q"]);
        let vocab  = Vocabulary::build(PAD_TOKEN, OOV_TOKEN, Some(&pre), &corpus).unwrap();

        let ids: Vec<usize> = vocab.iter().map(|(_, id)| id).collect();
        assert_eq!(ids, (0..vocab.len()).collect::<Vec<_>>());
        for (token, id) in vocab.iter() {
            assert_eq!(vocab.id(token), Some(id));
        }
        // every corpus token is present exactly once
        assert_eq!(vocab.len(), 2 + 2 + 3);
    }

    #[test]
    fn test_pretrained_words_precede_corpus() {
        let corpus = TokenTree::seq(["q", "new"]);
        let pre    = words(&["p", "q"]);
        let vocab  = Vocabulary::build(PAD_TOKEN, OOV_TOKEN, Some(&pre), &corpus).unwrap();

        assert_eq!(vocab.id("p"), Some(2));
        assert_eq!(vocab.id("q"), Some(3));
        // "q" from the corpus is already known, so "new" gets the next id
        assert_eq!(vocab.id("new"), Some(4));
    }

    #[test]
    fn test_duplicate_pretrained_word_is_fatal() {
        let pre = words(&["p", "p"]);
        let err = Vocabulary::build(PAD_TOKEN, OOV_TOKEN, Some(&pre), &TokenTree::empty())
            .unwrap_err();
        assert_eq!(err, EncoderError::DuplicatePretrainedWord("p".into()));
    }

    #[test]
    fn test_pretrained_word_clashing_with_reserved_is_fatal() {
        let pre = words(&[PAD_TOKEN]);
        assert!(Vocabulary::build(PAD_TOKEN, OOV_TOKEN, Some(&pre), &TokenTree::empty()).is_err());
    }

    #[test]
    fn test_identical_reserved_tokens_rejected() {
        assert_eq!(
            Vocabulary::with_reserved("<x>", "<x>").unwrap_err(),
            EncoderError::ReservedTokenClash("<x>".into())
        );
    }

    #[test]
    fn test_reinsertion_is_noop() {
        let mut vocab = Vocabulary::with_reserved(PAD_TOKEN, OOV_TOKEN).unwrap();
        let first     = vocab.insert("tok");
        let again     = vocab.insert("tok");
        assert_eq!(first, again);
        assert_eq!(vocab.len(), 3);
    }

    #[test]
    fn test_oov_fallback_and_reverse_lookup() {
        let corpus = TokenTree::seq(["known"]);
        let vocab  = Vocabulary::build(PAD_TOKEN, OOV_TOKEN, None, &corpus).unwrap();
        assert_eq!(vocab.id_or("known", 1), 2);
        assert_eq!(vocab.id_or("unknown", 1), 1);
        assert_eq!(vocab.token(2), Some("known"));
        assert_eq!(vocab.token(99), None);
    }

    #[test]
    fn test_serialises_as_ordered_list() {
        let corpus = TokenTree::seq(["a", "b"]);
        let vocab  = Vocabulary::build(PAD_TOKEN, OOV_TOKEN, None, &corpus).unwrap();

        let json = serde_json::to_string(&vocab).unwrap();
        assert_eq!(json, format!(r#"["{PAD_TOKEN}","{OOV_TOKEN}","a","b"]"#));

        let back: Vocabulary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vocab);
    }

    #[test]
    fn test_list_with_repeated_token_rejected() {
        let err = Vocabulary::try_from(words(&["p", "o", "a", "a", "b"])).unwrap_err();
        assert_eq!(err, EncoderError::DuplicateToken("a".into()));

        let json = r#"["p", "o", "a", "a", "b"]"#;
        let err  = serde_json::from_str::<Vocabulary>(json).unwrap_err();
        assert!(err.to_string().contains("duplicate token 'a'"));
    }

    #[test]
    fn test_list_positions_become_ids() {
        let vocab = Vocabulary::try_from(words(&["p", "o", "a", "b"])).unwrap();
        assert_eq!(vocab.id("b"), Some(3));
        assert_eq!(vocab.token(2), Some("a"));
    }
}
