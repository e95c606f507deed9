// ============================================================
// Layer 2 — EncodeUseCase
// ============================================================
// Builds a sentence encoder and runs sentences through it:
//
//   Step 1: Load the corpus                 (Layer 4 - data)
//   Step 2: Load pre-trained vectors, if any (Layer 4 - data)
//   Step 3: Build the embedding layer        (Layer 5 - ml)
//   Step 4: Build the chosen encoder         (Layer 5 - ml)
//   Step 5: Encode and copy back to host     (Layer 5 - ml)
//
// Runs on the CPU NdArray backend.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::data::loader::{JsonCorpusLoader, TextVectorLoader};
use crate::domain::pretrained::PretrainedEmbeddings;
use crate::domain::token_tree::TokenTree;
use crate::domain::traits::{CorpusSource, EmbeddingSource};
use crate::domain::vocabulary::{OOV_TOKEN, PAD_TOKEN};
use crate::ml::{
    tensor_rows, CnnConfig, EmbeddingLayerConfig, EncoderConfig, LstmEncoderConfig,
    SentenceEncoder,
};

type CpuBackend = burn::backend::NdArray;

// ─── Encoder Configuration ───────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncoderKind {
    Cnn,
    Lstm,
    Average,
}

/// Everything needed to rebuild the same sentence encoder.
/// Stored as JSON by the ConfigStore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeConfig {
    pub embedding_dim: usize,
    pub freeze:        bool,
    pub normalize:     bool,
    pub oov_token:     String,
    pub pad_token:     String,
    pub encoder:       EncoderKind,
    pub widths:        Vec<usize>,
    pub filters:       usize,
    pub hidden_dim:    usize,
    pub num_layers:    usize,
    pub dropout:       f64,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            embedding_dim: 300,
            freeze:        true,
            normalize:     true,
            oov_token:     OOV_TOKEN.to_string(),
            pad_token:     PAD_TOKEN.to_string(),
            encoder:       EncoderKind::Cnn,
            widths:        vec![3, 4, 5],
            filters:       100,
            hidden_dim:    150,
            num_layers:    1,
            dropout:       0.0,
        }
    }
}

impl EncodeConfig {
    pub fn embedding_config(&self) -> EmbeddingLayerConfig {
        EmbeddingLayerConfig::new(self.embedding_dim)
            .with_freeze(self.freeze)
            .with_normalize(self.normalize)
            .with_oov_token(self.oov_token.clone())
            .with_pad_token(self.pad_token.clone())
    }

    /// `d_input` is the embedding layer's final dim, which may
    /// differ from `embedding_dim` when pre-trained vectors are used.
    pub fn encoder_config(&self, d_input: usize) -> EncoderConfig {
        match self.encoder {
            EncoderKind::Cnn => EncoderConfig::Cnn(
                CnnConfig::new(d_input)
                    .with_widths(self.widths.clone())
                    .with_filters(self.filters),
            ),
            EncoderKind::Lstm => EncoderConfig::Lstm(
                LstmEncoderConfig::new(d_input, self.hidden_dim)
                    .with_num_layers(self.num_layers)
                    .with_dropout(self.dropout),
            ),
            EncoderKind::Average => EncoderConfig::Average,
        }
    }
}

/// One encoded vector per input sentence
#[derive(Debug, Clone, Serialize)]
pub struct EncodeOutput {
    pub encoder: String,
    pub dim:     usize,
    pub vectors: Vec<Vec<f32>>,
}

// ─── EncodeUseCase ────────────────────────────────────────────────────────────
pub struct EncodeUseCase {
    config:     EncodeConfig,
    corpus:     PathBuf,
    pretrained: Option<PathBuf>,
}

impl EncodeUseCase {
    pub fn new(config: EncodeConfig, corpus: PathBuf, pretrained: Option<PathBuf>) -> Self {
        Self { config, corpus, pretrained }
    }

    /// Encode whitespace-tokenised sentences.
    pub fn execute(&self, sentences: &[String]) -> Result<EncodeOutput> {
        let corpus     = JsonCorpusLoader::new(&self.corpus).load_corpus()?;
        let pretrained = load_optional_vectors(self.pretrained.as_ref())?;
        let tokens: Vec<Vec<&str>> = sentences
            .iter()
            .map(|s| s.split_whitespace().collect())
            .collect();

        self.encode(&corpus, pretrained.as_ref(), &tokens)
    }

    /// Build the encoder from in-memory inputs and encode token sequences.
    pub fn encode(
        &self,
        corpus:     &TokenTree,
        pretrained: Option<&PretrainedEmbeddings>,
        tokens:     &[Vec<&str>],
    ) -> Result<EncodeOutput> {
        let device = burn::backend::ndarray::NdArrayDevice::default();

        let embedding = self
            .config
            .embedding_config()
            .init::<CpuBackend>(corpus, pretrained, &device)
            .context("Cannot build embedding layer")?;
        tracing::info!(
            "Embedding layer ready: vocab_size={}, dim={}, frozen={}",
            embedding.vocab_size(),
            embedding.dim(),
            embedding.is_frozen()
        );

        let encoder = self
            .config
            .encoder_config(embedding.dim())
            .init::<CpuBackend>(&device)
            .context("Cannot build encoder")?;
        let model   = SentenceEncoder::new(embedding, encoder, device);
        tracing::info!(
            "{} encoder ready: output_dim={}",
            model.encoder().name(),
            model.output_dim()
        );

        let output  = model.encode(tokens).context("Cannot encode sentences")?;
        let vectors = tensor_rows(output)?;

        Ok(EncodeOutput {
            encoder: model.encoder().name().to_string(),
            dim:     model.output_dim(),
            vectors,
        })
    }
}

pub(crate) fn load_optional_vectors(path: Option<&PathBuf>) -> Result<Option<PretrainedEmbeddings>> {
    path.map(|p| TextVectorLoader::new(p).load_embeddings()).transpose()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> TokenTree {
        TokenTree::seq([TokenTree::seq(["the", "cat", "sat"]), TokenTree::seq(["on", "a", "mat"])])
    }

    fn use_case(config: EncodeConfig) -> EncodeUseCase {
        EncodeUseCase::new(config, PathBuf::from("unused.json"), None)
    }

    #[test]
    fn test_default_config() {
        let cfg = EncodeConfig::default();
        assert_eq!(cfg.widths, vec![3, 4, 5]);
        assert_eq!(cfg.filters, 100);
        assert!(cfg.freeze && cfg.normalize);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg: EncodeConfig =
            serde_json::from_str(r#"{"encoder": "lstm", "hidden_dim": 8}"#).unwrap();
        assert_eq!(cfg.encoder, EncoderKind::Lstm);
        assert_eq!(cfg.hidden_dim, 8);
        assert_eq!(cfg.embedding_dim, 300);
    }

    #[test]
    fn test_encode_with_each_encoder() {
        let cases = [
            (EncoderKind::Cnn, 2 * 3),
            (EncoderKind::Lstm, 5),
            (EncoderKind::Average, 4),
        ];
        for (kind, dim) in cases {
            let cfg = EncodeConfig {
                embedding_dim: 4,
                encoder: kind,
                widths: vec![1, 2],
                filters: 3,
                hidden_dim: 5,
                ..EncodeConfig::default()
            };
            let out = use_case(cfg)
                .encode(&corpus(), None, &[vec!["the", "cat"], vec!["a", "dog", "sat"]])
                .unwrap();
            assert_eq!(out.dim, dim);
            assert_eq!(out.vectors.len(), 2);
            assert!(out.vectors.iter().all(|v| v.len() == dim));
        }
    }

    #[test]
    fn test_pretrained_dim_flows_into_encoder() {
        let pre = PretrainedEmbeddings::from_rows(
            vec!["cat".into()],
            vec![vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6]],
        )
        .unwrap();
        let cfg = EncodeConfig {
            embedding_dim: 4,
            encoder: EncoderKind::Average,
            ..EncodeConfig::default()
        };
        let out = use_case(cfg)
            .encode(&corpus(), Some(&pre), &[vec!["cat"]])
            .unwrap();
        assert_eq!(out.dim, 6);
    }

    #[test]
    fn test_short_sentence_for_cnn_is_an_error() {
        let cfg = EncodeConfig { embedding_dim: 4, ..EncodeConfig::default() };
        let err = use_case(cfg)
            .encode(&corpus(), None, &[vec!["the"]])
            .unwrap_err();
        assert!(format!("{err:#}").contains("kernel width"));
    }

    #[test]
    fn test_bad_hyperparameters_from_json_are_errors() {
        for json in [
            r#"{"embedding_dim": 4, "widths": []}"#,
            r#"{"embedding_dim": 4, "widths": [0]}"#,
            r#"{"embedding_dim": 4, "filters": 0}"#,
            r#"{"embedding_dim": 4, "encoder": "lstm", "dropout": 2.0}"#,
        ] {
            let cfg: EncodeConfig = serde_json::from_str(json).unwrap();
            let err = use_case(cfg)
                .encode(&corpus(), None, &[vec!["the", "cat", "sat", "on", "a"]])
                .unwrap_err();
            assert!(format!("{err:#}").contains("invalid encoder config"), "{json}: {err:#}");
        }
    }
}
