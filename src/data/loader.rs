// ============================================================
// Layer 4 — Corpus and Vector Loaders
// ============================================================
// Reads the two construction-time inputs from disk.
//
// JsonCorpusLoader
//   A JSON document of arbitrarily nested string arrays:
//     [["the", "cat"], ["sat"], "alone"]
//   Parsed straight into a TokenTree by serde.
//
// TextVectorLoader
//   Whitespace-separated text, one word per line:
//     the 0.418 0.24968 -0.41242 ...
//     cat 0.45281 -0.50108 -0.53714 ...
//   This is the GloVe layout. The word2vec text format adds a
//   "<count> <dim>" header line, which is detected and skipped.
//   Blank lines are ignored. Every row must have the same size.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use anyhow::{bail, Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::domain::pretrained::PretrainedEmbeddings;
use crate::domain::token_tree::TokenTree;
use crate::domain::traits::{CorpusSource, EmbeddingSource};

// ─── JsonCorpusLoader ─────────────────────────────────────────────────────────
pub struct JsonCorpusLoader {
    path: PathBuf,
}

impl JsonCorpusLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CorpusSource for JsonCorpusLoader {
    fn load_corpus(&self) -> Result<TokenTree> {
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read corpus '{}'", self.path.display()))?;

        let corpus: TokenTree = serde_json::from_str(&json).with_context(|| {
            format!(
                "Corpus '{}' must be a string or nested arrays of strings",
                self.path.display()
            )
        })?;

        tracing::info!(
            "Loaded corpus '{}' ({} tokens)",
            self.path.display(),
            corpus.leaf_count()
        );
        Ok(corpus)
    }
}

// ─── TextVectorLoader ─────────────────────────────────────────────────────────
pub struct TextVectorLoader {
    path: PathBuf,
}

impl TextVectorLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl EmbeddingSource for TextVectorLoader {
    fn load_embeddings(&self) -> Result<PretrainedEmbeddings> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read vectors '{}'", self.path.display()))?;
        let embeddings = parse_text_vectors(&text, &self.path)?;

        tracing::info!(
            "Loaded {} vectors of size {} from '{}'",
            embeddings.len(),
            embeddings.dim(),
            self.path.display()
        );
        Ok(embeddings)
    }
}

/// Parse GloVe / word2vec text. `origin` is only used in error messages.
fn parse_text_vectors(text: &str, origin: &Path) -> Result<PretrainedEmbeddings> {
    let mut words  = Vec::new();
    let mut values = Vec::new();
    let mut dim: Option<usize> = None;
    let mut first_line = true;

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        let mut fields = line.split_whitespace();
        let Some(word) = fields.next() else { continue };
        let rest: Vec<&str> = fields.collect();

        // word2vec header: "<count> <dim>"
        if std::mem::take(&mut first_line) && is_header(word, &rest) {
            tracing::debug!("Skipping word2vec header in '{}'", origin.display());
            continue;
        }

        let row = rest
            .iter()
            .map(|v| v.parse::<f32>())
            .collect::<Result<Vec<f32>, _>>()
            .with_context(|| format!("{}:{line_no}: invalid number", origin.display()))?;

        match dim {
            None if row.is_empty() => {
                bail!("{}:{line_no}: '{word}' has no vector", origin.display())
            }
            None => dim = Some(row.len()),
            Some(d) if d != row.len() => bail!(
                "{}:{line_no}: '{word}' has {} values, expected {d}",
                origin.display(),
                row.len()
            ),
            Some(_) => {}
        }

        words.push(word.to_string());
        values.extend(row);
    }

    let Some(dim) = dim else {
        bail!("'{}' contains no vectors", origin.display())
    };
    Ok(PretrainedEmbeddings::new(words, values, dim)?)
}

fn is_header(first: &str, rest: &[&str]) -> bool {
    rest.len() == 1 && first.parse::<usize>().is_ok() && rest[0].parse::<usize>().is_ok()
}
