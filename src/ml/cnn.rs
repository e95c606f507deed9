// ============================================================
// Layer 5 — CNN Encoder
// ============================================================
// Parallel convolutions of several widths over an embedded
// sequence, each followed by ReLU and max-over-time pooling.
//
//   x: [batch, time, dim]
//     → unsqueeze channel axis          [batch, 1, time, dim]
//     → conv (w × dim kernel), per w    [batch, filters, time-w+1, 1]
//     → relu, max over time             [batch, filters]
//     → concat over widths              [batch, widths.len() * filters]
//
// Each kernel spans the full embedding dim, so it only slides
// along the time axis.
//
// Reference: Kim (2014) Convolutional Neural Networks for
//            Sentence Classification

use burn::{
    nn::conv::{Conv2d, Conv2dConfig},
    prelude::*,
    tensor::activation::relu,
};

use crate::error::{EncoderError, EncoderResult};

#[derive(Config, Debug)]
pub struct CnnConfig {
    /// Embedding dim of the input
    pub d_input: usize,
    /// Kernel widths along time
    #[config(default = "vec![3, 4, 5]")]
    pub widths: Vec<usize>,
    /// Output channels per width
    #[config(default = 100)]
    pub filters: usize,
}

impl CnnConfig {
    /// Widths, filters and input dim must all be non-zero.
    pub fn init<B: Backend>(&self, device: &B::Device) -> EncoderResult<Cnn<B>> {
        if self.widths.is_empty() {
            return Err(EncoderError::InvalidConfig("cnn needs at least one kernel width".into()));
        }
        if self.widths.contains(&0) {
            return Err(EncoderError::InvalidConfig("cnn kernel width must be > 0".into()));
        }
        if self.filters == 0 {
            return Err(EncoderError::InvalidConfig("cnn filters must be > 0".into()));
        }
        if self.d_input == 0 {
            return Err(EncoderError::InvalidConfig("cnn input dim must be > 0".into()));
        }

        let convs = self
            .widths
            .iter()
            .map(|&w| Conv2dConfig::new([1, self.filters], [w, self.d_input]).init(device))
            .collect();

        Ok(Cnn {
            convs,
            max_width: self.widths.iter().copied().max().unwrap_or(0),
            d_output:  self.widths.len() * self.filters,
        })
    }
}

#[derive(Module, Debug)]
pub struct Cnn<B: Backend> {
    pub convs:     Vec<Conv2d<B>>,
    pub max_width: usize,
    pub d_output:  usize,
}

impl<B: Backend> Cnn<B> {
    /// x: [batch, time, dim] → [batch, widths.len() * filters]
    pub fn forward(&self, x: Tensor<B, 3>) -> EncoderResult<Tensor<B, 2>> {
        let [_, time, _] = x.dims();
        if time < self.max_width {
            return Err(EncoderError::SequenceTooShort { len: time, width: self.max_width });
        }

        let x = x.unsqueeze_dim::<4>(1);
        let pooled: Vec<Tensor<B, 2>> = self
            .convs
            .iter()
            .map(|conv| {
                let features = relu(conv.forward(x.clone()));
                let [batch, filters, _, _] = features.dims();
                features.max_dim(2).reshape([batch, filters])
            })
            .collect();

        Ok(Tensor::cat(pooled, 1))
    }

    pub fn output_dim(&self) -> usize {
        self.d_output
    }
}
