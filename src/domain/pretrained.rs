// ============================================================
// Layer 3 — Pre-trained Embeddings Domain Type
// ============================================================
// An ordered list of words and the matrix of their vectors,
// stored row-major as one flat Vec<f32> of shape (words × dim).
//
// Construction checks the shape once so the embedding layer
// can copy the rows straight into its weight table.

use crate::error::{EncoderError, EncoderResult};

#[derive(Debug, Clone, PartialEq)]
pub struct PretrainedEmbeddings {
    words:  Vec<String>,
    values: Vec<f32>,
    dim:    usize,
}

impl PretrainedEmbeddings {
    /// Build from a flat row-major buffer.
    pub fn new(words: Vec<String>, values: Vec<f32>, dim: usize) -> EncoderResult<Self> {
        if words.is_empty() {
            return Err(EncoderError::EmptyPretrained);
        }
        if dim == 0 {
            return Err(EncoderError::PretrainedShape("vector size is 0".into()));
        }
        if values.len() != words.len() * dim {
            return Err(EncoderError::PretrainedShape(format!(
                "{} values cannot form {} rows of size {}",
                values.len(),
                words.len(),
                dim
            )));
        }
        Ok(Self { words, values, dim })
    }

    /// Build from one vector per word. All rows must share a length.
    pub fn from_rows(words: Vec<String>, rows: Vec<Vec<f32>>) -> EncoderResult<Self> {
        if words.len() != rows.len() {
            return Err(EncoderError::PretrainedShape(format!(
                "{} words but {} vectors",
                words.len(),
                rows.len()
            )));
        }
        let dim = rows.first().map(Vec::len).ok_or(EncoderError::EmptyPretrained)?;

        let mut values = Vec::with_capacity(rows.len() * dim);
        for (word, row) in words.iter().zip(&rows) {
            if row.len() != dim {
                return Err(EncoderError::PretrainedShape(format!(
                    "vector for '{word}' has size {}, expected {dim}",
                    row.len()
                )));
            }
            values.extend_from_slice(row);
        }
        Self::new(words, values, dim)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Flat row-major values
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of words / rows
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&[f32]> {
        let start = index.checked_mul(self.dim)?;
        self.values.get(start..start + self.dim)
    }
}
