// ============================================================
// Layer 4 — Token Batcher
// ============================================================
// Turns a list of token-id sequences into one Int tensor of
// shape [batch_size, seq_len] that the embedding layer reads.
//
// Sequences of different lengths are right-padded with the
// pad id up to the longest sequence in the batch:
//
//   [[2, 3, 4],        [[2, 3, 4],
//    [5],         →     [5, 0, 0],
//    [6, 7]]            [6, 7, 0]]
//
// All ids are flattened into one Vec<i32> (Burn's Int element)
// and reshaped, the same way a batch of fixed-length samples
// would be stacked.
//
// Reference: Burn Book §4 (Batcher)

use burn::prelude::*;

use crate::error::{EncoderError, EncoderResult};

#[derive(Clone, Debug)]
pub struct TokenBatcher<B: Backend> {
    /// The device to create tensors on
    pub device: B::Device,

    /// Id written into every padding position
    pub pad_id: usize,
}

impl<B: Backend> TokenBatcher<B> {
    pub fn new(device: B::Device, pad_id: usize) -> Self {
        Self { device, pad_id }
    }

    /// Length every sequence is padded to
    pub fn padded_len(sequences: &[Vec<usize>]) -> usize {
        sequences.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Stack id sequences into a padded [batch_size, seq_len] tensor.
    pub fn batch(&self, sequences: &[Vec<usize>]) -> EncoderResult<Tensor<B, 2, Int>> {
        if sequences.is_empty() {
            return Err(EncoderError::EmptyBatch);
        }
        let batch_size = sequences.len();
        let seq_len    = Self::padded_len(sequences);
        if seq_len == 0 {
            return Err(EncoderError::EmptySequence);
        }

        let flat: Vec<i32> = sequences
            .iter()
            .flat_map(|seq| {
                seq.iter()
                    .copied()
                    .chain(std::iter::repeat(self.pad_id).take(seq_len - seq.len()))
                    .map(|id| id as i32)
            })
            .collect();

        tracing::debug!("Batched {} sequences padded to {}", batch_size, seq_len);

        Ok(Tensor::<B, 1, Int>::from_ints(flat.as_slice(), &self.device)
            .reshape([batch_size, seq_len]))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    #[test]
    fn test_pads_to_longest_sequence() {
        let batcher = TokenBatcher::<TestBackend>::new(Default::default(), 0);
        let ids     = batcher.batch(&[vec![2, 3, 4], vec![5], vec![6, 7]]).unwrap();

        assert_eq!(ids.dims(), [3, 3]);
        let flat = ids.into_data().convert::<i64>().to_vec::<i64>().unwrap();
        assert_eq!(flat, vec![2, 3, 4, 5, 0, 0, 6, 7, 0]);
    }

    #[test]
    fn test_custom_pad_id() {
        let batcher = TokenBatcher::<TestBackend>::new(Default::default(), 9);
        let ids     = batcher.batch(&[vec![1], vec![1, 2]]).unwrap();
        let flat    = ids.into_data().convert::<i64>().to_vec::<i64>().unwrap();
        assert_eq!(flat, vec![1, 9, 1, 2]);
    }

    #[test]
    fn test_empty_batch_rejected() {
        let batcher = TokenBatcher::<TestBackend>::new(Default::default(), 0);
        assert_eq!(batcher.batch(&[]).unwrap_err(), EncoderError::EmptyBatch);
    }

    #[test]
    fn test_all_empty_sequences_rejected() {
        let batcher = TokenBatcher::<TestBackend>::new(Default::default(), 0);
        assert_eq!(batcher.batch(&[vec![], vec![]]).unwrap_err(), EncoderError::EmptySequence);
    }
}
