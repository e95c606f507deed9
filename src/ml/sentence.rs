// ============================================================
// Layer 5 — Sentence Encoder
// ============================================================
// Embedding layer + one sequence encoder, end to end:
//
//   tokens   [["the", "cat"], ["a", "dog", "ran"]]
//     → ids  [[5, 9, 0], [7, 1, 12]]      (oov = 1, pad = 0)
//     → embedding layer                   [batch, time, dim]
//     → encoder (cnn / lstm / average)    [batch, out]
//
// Padding positions take part in every encoder like any other
// time step.

use burn::prelude::*;

use crate::data::batcher::TokenBatcher;
use crate::error::{EncoderError, EncoderResult};
use crate::ml::{embedding::EmbeddingLayer, encoder::Encoder};

#[derive(Debug)]
pub struct SentenceEncoder<B: Backend> {
    embedding: EmbeddingLayer<B>,
    encoder:   Encoder<B>,
    batcher:   TokenBatcher<B>,
}

impl<B: Backend> SentenceEncoder<B> {
    pub fn new(embedding: EmbeddingLayer<B>, encoder: Encoder<B>, device: B::Device) -> Self {
        let batcher = TokenBatcher::new(device, embedding.pad_id());
        Self { embedding, encoder, batcher }
    }

    /// Encode already-batched ids: [batch, time] → [batch, out]
    pub fn forward(&self, ids: Tensor<B, 2, Int>) -> EncoderResult<Tensor<B, 2>> {
        let embedded = self.embedding.forward(ids)?;
        self.encoder.forward(embedded)
    }

    /// Encode token sequences, one output row per sequence.
    pub fn encode<S: AsRef<str>>(&self, sentences: &[Vec<S>]) -> EncoderResult<Tensor<B, 2>> {
        if sentences.is_empty() {
            return Err(EncoderError::EmptyBatch);
        }
        let ids: Vec<Vec<usize>> = sentences
            .iter()
            .map(|tokens| self.embedding.token_ids(tokens))
            .collect();

        let batch = self.batcher.batch(&ids)?;
        tracing::debug!(
            "Encoding batch {:?} with {} encoder",
            batch.dims(),
            self.encoder.name()
        );
        self.forward(batch)
    }

    pub fn output_dim(&self) -> usize {
        self.encoder.output_dim(self.embedding.dim())
    }

    pub fn embedding(&self) -> &EmbeddingLayer<B> {
        &self.embedding
    }

    pub fn encoder(&self) -> &Encoder<B> {
        &self.encoder
    }
}

/// Copy a [rows, cols] tensor back to the host as one Vec per row.
pub fn tensor_rows<B: Backend>(tensor: Tensor<B, 2>) -> EncoderResult<Vec<Vec<f32>>> {
    let [_, cols] = tensor.dims();
    let flat = tensor
        .into_data()
        .convert::<f32>()
        .to_vec::<f32>()
        .map_err(|e| EncoderError::TensorData(format!("{e:?}")))?;
    if cols == 0 {
        return Ok(Vec::new());
    }
    Ok(flat.chunks(cols).map(<[f32]>::to_vec).collect())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::token_tree::TokenTree;
    use crate::ml::{
        average::Average,
        cnn::CnnConfig,
        embedding::EmbeddingLayerConfig,
        encoder::EncoderConfig,
    };
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    fn abc_layer(dim: usize) -> EmbeddingLayer<TestBackend> {
        let corpus = TokenTree::seq([TokenTree::seq(["a", "b"]), "c".into()]);
        EmbeddingLayerConfig::new(dim)
            .with_normalize(false)
            .init::<TestBackend>(&corpus, None, &Default::default())
            .unwrap()
    }

    #[test]
    fn test_embedding_then_average_end_to_end() {
        let device = Default::default();
        let layer  = abc_layer(4);
        assert_eq!(layer.weight().dims(), [5, 4]);

        let table = tensor_rows(layer.weight()).unwrap();
        let ids   = Tensor::<TestBackend, 1, Int>::from_ints([2, 3, 4].as_slice(), &device)
            .reshape([1, 3]);
        let out   = Average.forward(layer.forward(ids).unwrap()).unwrap();
        assert_eq!(out.dims(), [1, 4]);

        let mean = tensor_rows(out).unwrap().remove(0);
        for d in 0..4 {
            let expected = (table[2][d] + table[3][d] + table[4][d]) / 3.0;
            assert!((mean[d] - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn test_encode_pads_and_maps_unknown_tokens() {
        let device  = Default::default();
        let encoder = SentenceEncoder::new(abc_layer(4), Encoder::Average(Average), device);

        let out = encoder
            .encode(&[vec!["a", "b", "c"], vec!["zzz"]])
            .unwrap();
        assert_eq!(out.dims(), [2, 4]);
        assert_eq!(encoder.output_dim(), 4);

        // second row averages [oov, pad, pad]
        let table    = tensor_rows(encoder.embedding().weight()).unwrap();
        let rows     = tensor_rows(out).unwrap();
        let expected = (table[1][0] + 2.0 * table[0][0]) / 3.0;
        assert!((rows[1][0] - expected).abs() < 1e-6);
    }

    #[test]
    fn test_cnn_rejects_short_sentences() {
        let device  = Default::default();
        let cnn     = EncoderConfig::Cnn(CnnConfig::new(4).with_filters(2))
            .init::<TestBackend>(&device)
            .unwrap();
        let encoder = SentenceEncoder::new(abc_layer(4), cnn, device);

        assert!(encoder.encode(&[vec!["a", "b"]]).is_err());
        let ok = encoder.encode(&[vec!["a", "b", "c", "a", "b"]]).unwrap();
        assert_eq!(ok.dims(), [1, 6]);
    }

    #[test]
    fn test_empty_batch_rejected() {
        let encoder = SentenceEncoder::new(abc_layer(2), Encoder::Average(Average), Default::default());
        let empty: Vec<Vec<&str>> = Vec::new();
        assert_eq!(encoder.encode(&empty).unwrap_err(), EncoderError::EmptyBatch);
    }
}
