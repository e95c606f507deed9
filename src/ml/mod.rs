// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All Burn module code lives here. The domain layer never
// sees a tensor.
//
//   embedding.rs — vocabulary + embedding table lookup
//   cnn.rs       — multi-width convolution, max-over-time
//   lstm.rs      — stacked LSTM, last time step
//   average.rs   — mean over time
//   encoder.rs   — closed choice of cnn / lstm / average
//   sentence.rs  — tokens → ids → embedding → encoder
//
// Every encoder takes batch-first input [batch, time, dim]
// and returns one vector per sequence [batch, out].
//
// Convolution, recurrence and gradients are Burn's kernels;
// these modules only wire them together.
//
// Reference: Burn Book §3 (Building Blocks)

pub mod embedding;

pub mod cnn;

pub mod lstm;

pub mod average;

/// Closed set of sequence encoders
pub mod encoder;

/// End-to-end token → vector encoder
pub mod sentence;

pub use average::Average;
pub use cnn::{Cnn, CnnConfig};
pub use embedding::{EmbeddingLayer, EmbeddingLayerConfig};
pub use encoder::{Encoder, EncoderConfig};
pub use lstm::{LstmEncoder, LstmEncoderConfig};
pub use sentence::{tensor_rows, SentenceEncoder};
