//! Text encoders over Burn: an embedding layer with its own
//! vocabulary, and three interchangeable sequence encoders
//! (CNN with max-over-time pooling, stacked LSTM, average) that
//! turn `[batch, time, dim]` embeddings into one vector per sequence.
#![recursion_limit = "256"]

pub mod cli;
pub mod application;
pub mod domain;
pub mod data;
pub mod ml;
pub mod infra;
pub mod error;

pub use domain::{pretrained::PretrainedEmbeddings, token_tree::TokenTree, vocabulary::Vocabulary};
pub use error::{EncoderError, EncoderResult};
pub use ml::{
    Average, Cnn, CnnConfig, EmbeddingLayer, EmbeddingLayerConfig, Encoder, EncoderConfig,
    LstmEncoder, LstmEncoderConfig, SentenceEncoder,
};
