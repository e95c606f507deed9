// ============================================================
// Layer 5 — Encoder Selection
// ============================================================
// A classifier uses exactly one sequence encoder on top of the
// embedding layer. The set is closed: CNN, LSTM or Average.
//
//   EncoderConfig  — which encoder, with its hyperparameters
//   Encoder        — the built encoder, [batch, time, dim] → [batch, out]

use burn::prelude::*;

use crate::error::EncoderResult;
use crate::ml::{
    average::Average,
    cnn::{Cnn, CnnConfig},
    lstm::{LstmEncoder, LstmEncoderConfig},
};

#[derive(Debug, Clone)]
pub enum EncoderConfig {
    Cnn(CnnConfig),
    Lstm(LstmEncoderConfig),
    Average,
}

impl EncoderConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> EncoderResult<Encoder<B>> {
        Ok(match self {
            EncoderConfig::Cnn(cfg)  => Encoder::Cnn(cfg.init(device)?),
            EncoderConfig::Lstm(cfg) => Encoder::Lstm(cfg.init(device)?),
            EncoderConfig::Average   => Encoder::Average(Average::new()),
        })
    }
}

#[derive(Module, Debug)]
pub enum Encoder<B: Backend> {
    Cnn(Cnn<B>),
    Lstm(LstmEncoder<B>),
    Average(Average),
}

impl<B: Backend> Encoder<B> {
    pub fn forward(&self, x: Tensor<B, 3>) -> EncoderResult<Tensor<B, 2>> {
        match self {
            Encoder::Cnn(cnn)     => cnn.forward(x),
            Encoder::Lstm(lstm)   => lstm.forward(x),
            Encoder::Average(avg) => avg.forward(x),
        }
    }

    /// Width of the vector produced for each sequence.
    /// `d_input` is only needed for Average, which keeps the input width.
    pub fn output_dim(&self, d_input: usize) -> usize {
        match self {
            Encoder::Cnn(cnn)   => cnn.output_dim(),
            Encoder::Lstm(lstm) => lstm.output_dim(),
            Encoder::Average(_) => d_input,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Encoder::Cnn(_)     => "cnn",
            Encoder::Lstm(_)    => "lstm",
            Encoder::Average(_) => "average",
        }
    }
}
