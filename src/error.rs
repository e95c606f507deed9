// ============================================================
// Encoder Error Types
// ============================================================
// Typed errors raised by the vocabulary builder and the
// encoder forward passes. The application and CLI layers
// wrap these in anyhow::Error with extra context.

use thiserror::Error;

/// Result type used across the domain and ml layers.
pub type EncoderResult<T> = Result<T, EncoderError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EncoderError {
    /// The pad and out-of-vocabulary tokens must be distinct.
    #[error("pad token and oov token are both '{0}'")]
    ReservedTokenClash(String),

    /// A pre-trained word was already in the vocabulary when inserted.
    #[error("duplicate word '{0}' in pre-trained embeddings")]
    DuplicatePretrainedWord(String),

    /// Pre-trained vectors did not form a (words x dim) matrix.
    #[error("pre-trained embeddings: {0}")]
    PretrainedShape(String),

    /// Pre-trained embeddings were supplied without any rows.
    #[error("pre-trained embeddings contain no vectors")]
    EmptyPretrained,

    /// A vocabulary list named the same token twice.
    #[error("duplicate token '{0}' in vocabulary list")]
    DuplicateToken(String),

    /// An encoder hyperparameter is outside its valid range.
    #[error("invalid encoder config: {0}")]
    InvalidConfig(String),

    #[error("token id {id} is outside the vocabulary (size {vocab_size})")]
    TokenIdOutOfRange { id: i64, vocab_size: usize },

    /// The time axis is shorter than a convolution kernel.
    #[error("sequence length {len} is shorter than kernel width {width}")]
    SequenceTooShort { len: usize, width: usize },

    #[error("sequence has no time steps")]
    EmptySequence,

    #[error("batch contains no sequences")]
    EmptyBatch,

    /// Reading tensor values back to the host failed.
    #[error("tensor data: {0}")]
    TensorData(String),
}
