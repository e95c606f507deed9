// ============================================================
// Layer 2 — VocabUseCase
// ============================================================
// Builds the vocabulary exactly as the embedding layer would
// (reserved tokens, pre-trained words, corpus tokens) without
// allocating any tensors, and optionally writes it out as a
// JSON list whose positions are the token ids.

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::application::encode_use_case::load_optional_vectors;
use crate::data::loader::JsonCorpusLoader;
use crate::domain::traits::CorpusSource;
use crate::domain::vocabulary::Vocabulary;

pub struct VocabUseCase {
    corpus:     PathBuf,
    pretrained: Option<PathBuf>,
    pad_token:  String,
    oov_token:  String,
}

impl VocabUseCase {
    pub fn new(
        corpus:     PathBuf,
        pretrained: Option<PathBuf>,
        pad_token:  impl Into<String>,
        oov_token:  impl Into<String>,
    ) -> Self {
        Self {
            corpus,
            pretrained,
            pad_token: pad_token.into(),
            oov_token: oov_token.into(),
        }
    }

    pub fn execute(&self, output: Option<&PathBuf>) -> Result<Vocabulary> {
        let corpus     = JsonCorpusLoader::new(&self.corpus).load_corpus()?;
        let pretrained = load_optional_vectors(self.pretrained.as_ref())?;

        let vocab = Vocabulary::build(
            &self.pad_token,
            &self.oov_token,
            pretrained.as_ref().map(|p| p.words()),
            &corpus,
        )
        .context("Cannot build vocabulary")?;
        tracing::info!("Vocabulary built with {} tokens", vocab.len());

        if let Some(path) = output {
            let json = serde_json::to_string_pretty(&vocab)?;
            fs::write(path, json)
                .with_context(|| format!("Cannot write vocabulary to '{}'", path.display()))?;
            tracing::info!("Vocabulary written to '{}'", path.display());
        }

        Ok(vocab)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vocabulary::{OOV_TOKEN, PAD_TOKEN};
    use tempfile::tempdir;

    #[test]
    fn test_vocab_from_files() {
        let dir    = tempdir().unwrap();
        let corpus = dir.path().join("corpus.json");
        let vecs   = dir.path().join("vectors.txt");
        let out    = dir.path().join("vocab.json");
        fs::write(&corpus, r#"[["b", "a"], "c"]"#).unwrap();
        fs::write(&vecs, "a 1 2\nz 3 4\n").unwrap();

        let vocab = VocabUseCase::new(corpus, Some(vecs), PAD_TOKEN, OOV_TOKEN)
            .execute(Some(&out))
            .unwrap();

        // pad, oov, pre-trained a z, then corpus b c
        assert_eq!(vocab.tokens()[2..], ["a", "z", "b", "c"]);

        let written: Vec<String> =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(written, vocab.tokens());
    }

    #[test]
    fn test_duplicate_pretrained_words_fail() {
        let dir    = tempdir().unwrap();
        let corpus = dir.path().join("corpus.json");
        let vecs   = dir.path().join("vectors.txt");
        fs::write(&corpus, r#"["a"]"#).unwrap();
        fs::write(&vecs, "a 1\na 2\n").unwrap();

        let err = VocabUseCase::new(corpus, Some(vecs), PAD_TOKEN, OOV_TOKEN)
            .execute(None)
            .unwrap_err();
        assert!(format!("{err:#}").contains("duplicate word 'a'"));
    }
}
