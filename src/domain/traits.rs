// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// Sources of the two construction-time inputs of the
// embedding layer. The application layer only sees these
// traits, so a corpus or a vector file can come from any
// format the data layer knows how to read.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::pretrained::PretrainedEmbeddings;
use crate::domain::token_tree::TokenTree;

// ─── CorpusSource ─────────────────────────────────────────────────────────────
/// Anything that can produce the (possibly nested) corpus of tokens.
///
/// Implementations:
///   - JsonCorpusLoader → nested JSON arrays of strings
pub trait CorpusSource {
    fn load_corpus(&self) -> Result<TokenTree>;
}

// ─── EmbeddingSource ──────────────────────────────────────────────────────────
/// Anything that can produce pre-trained word vectors.
///
/// Implementations:
///   - TextVectorLoader → GloVe / word2vec text files
pub trait EmbeddingSource {
    fn load_embeddings(&self) -> Result<PretrainedEmbeddings>;
}
