// ============================================================
// Layer 5 — Embedding Layer
// ============================================================
// Owns the vocabulary and the (vocab_size × dim) embedding
// table, and looks token ids up in it.
//
// Construction steps:
//   1. Build the vocabulary (pad, oov, pre-trained, corpus)
//   2. If pre-trained vectors have a different size than the
//      requested dim, their size is used instead (warning)
//   3. Fill the whole table with U(-0.25, 0.25)
//   4. Copy pre-trained rows into ids 2 .. 2 + n_pretrained
//   5. If normalize: divide EVERY row by its own L2 norm,
//      including the reserved and corpus-only rows
//   6. If freeze: mark the table as not requiring gradients
//
// Reference: Burn Book §3 (Building Blocks — Embedding)

use burn::{
    module::{Ignored, Param},
    nn::{Embedding, EmbeddingConfig, Initializer},
    prelude::*,
    tensor::ElementConversion,
};

use crate::domain::pretrained::PretrainedEmbeddings;
use crate::domain::token_tree::TokenTree;
use crate::domain::vocabulary::{Vocabulary, OOV_TOKEN, PAD_TOKEN, RESERVED_IDS};
use crate::error::{EncoderError, EncoderResult};

/// Half-width of the uniform initialisation range
const INIT_RANGE: f64 = 0.25;

#[derive(Config, Debug)]
pub struct EmbeddingLayerConfig {
    /// Requested vector size. Overridden by pre-trained vectors.
    pub embedding_dim: usize,
    /// Exclude the table from gradient updates
    #[config(default = true)]
    pub freeze: bool,
    #[config(default = "String::from(OOV_TOKEN)")]
    pub oov_token: String,
    #[config(default = "String::from(PAD_TOKEN)")]
    pub pad_token: String,
    /// L2-normalise every row of the table
    #[config(default = true)]
    pub normalize: bool,
}

impl EmbeddingLayerConfig {
    pub fn init<B: Backend>(
        &self,
        corpus:     &TokenTree,
        pretrained: Option<&PretrainedEmbeddings>,
        device:     &B::Device,
    ) -> EncoderResult<EmbeddingLayer<B>> {
        let vocab = Vocabulary::build(
            &self.pad_token,
            &self.oov_token,
            pretrained.map(PretrainedEmbeddings::words),
            corpus,
        )?;

        let mut dim = self.embedding_dim;
        if let Some(pre) = pretrained {
            tracing::info!("{} pre-trained word embeddings loaded", pre.len());
            if pre.dim() != dim {
                tracing::warn!(
                    "embedding_dim ({}) != word vector size ({}). Using {} for embeddings",
                    dim,
                    pre.dim(),
                    pre.dim()
                );
                dim = pre.dim();
            }
        }

        let n_vocab = vocab.len();
        let mut embedding = EmbeddingConfig::new(n_vocab, dim)
            .with_initializer(Initializer::Uniform { min: -INIT_RANGE, max: INIT_RANGE })
            .init(device);
        let mut weight = embedding.weight.val().detach();

        if let Some(pre) = pretrained {
            let rows = Tensor::<B, 1>::from_floats(pre.values(), device).reshape([pre.len(), dim]);
            weight = weight.slice_assign([RESERVED_IDS..RESERVED_IDS + pre.len(), 0..dim], rows);
            tracing::info!("embedding shape: {:?}", weight.dims());
        }

        if self.normalize {
            weight = normalize_rows(weight);
        }

        embedding.weight = Param::from_tensor(weight);
        let embedding = if self.freeze { embedding.no_grad() } else { embedding };

        let pad_id = vocab.id(&self.pad_token).unwrap_or(0);
        let oov_id = vocab.id(&self.oov_token).unwrap_or(1);

        Ok(EmbeddingLayer {
            embedding,
            vocab: Ignored(vocab),
            dim,
            pad_id,
            oov_id,
            frozen: self.freeze,
        })
    }
}

/// Divide each row by its Euclidean norm.
fn normalize_rows<B: Backend>(weight: Tensor<B, 2>) -> Tensor<B, 2> {
    let dims  = weight.dims();
    let norms = weight.clone().powf_scalar(2.0).sum_dim(1).sqrt();
    weight.div(norms.expand(dims))
}

/// Vocabulary plus embedding table. A Module, so a classifier can
/// hold it as a field and an optimizer can update the table when
/// it was built with `freeze = false`.
#[derive(Module, Debug)]
pub struct EmbeddingLayer<B: Backend> {
    embedding: Embedding<B>,
    vocab:     Ignored<Vocabulary>,
    dim:       usize,
    pad_id:    usize,
    oov_id:    usize,
    frozen:    bool,
}

impl<B: Backend> EmbeddingLayer<B> {
    /// ids: [batch, seq_len] → [batch, seq_len, dim]
    pub fn forward(&self, ids: Tensor<B, 2, Int>) -> EncoderResult<Tensor<B, 3>> {
        if ids.shape().num_elements() > 0 {
            let vocab_size = self.vocab_size();
            let min = ids.clone().min().into_scalar().elem::<i64>();
            let max = ids.clone().max().into_scalar().elem::<i64>();
            if min < 0 {
                return Err(EncoderError::TokenIdOutOfRange { id: min, vocab_size });
            }
            if max >= vocab_size as i64 {
                return Err(EncoderError::TokenIdOutOfRange { id: max, vocab_size });
            }
        }
        Ok(self.embedding.forward(ids))
    }

    /// Token ids for a sequence, unknown tokens mapped to the oov id.
    pub fn token_ids<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<usize> {
        tokens
            .iter()
            .map(|t| self.vocab.0.id_or(t.as_ref(), self.oov_id))
            .collect()
    }

    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab.0
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn vocab_size(&self) -> usize {
        self.vocab.0.len()
    }

    pub fn pad_id(&self) -> usize {
        self.pad_id
    }

    pub fn oov_id(&self) -> usize {
        self.oov_id
    }

    /// True when the table is excluded from gradient updates
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// The current (vocab_size × dim) table
    pub fn weight(&self) -> Tensor<B, 2> {
        self.embedding.weight.val()
    }
}
