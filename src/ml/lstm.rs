// ============================================================
// Layer 5 — LSTM Encoder
// ============================================================
// A stack of batch-first LSTM layers. Layer 0 reads the
// embedding dim, every later layer reads the hidden dim of the
// layer below. Dropout sits between layers; Burn only applies
// it on autodiff backends, so inference is deterministic.
//
// The encoder returns the hidden output at the LAST time step
// of the LAST layer: [batch, time, dim] → [batch, hidden].
// Hidden and cell state live only for one forward call.
//
// Reference: Hochreiter & Schmidhuber (1997) Long Short-Term Memory

use burn::{
    nn::{
        lstm::{Lstm, LstmConfig},
        Dropout, DropoutConfig,
    },
    prelude::*,
};

use crate::error::{EncoderError, EncoderResult};

#[derive(Config, Debug)]
pub struct LstmEncoderConfig {
    pub d_input:  usize,
    pub d_hidden: usize,
    #[config(default = 1)]
    pub num_layers: usize,
    /// Dropout between stacked layers (training only)
    #[config(default = 0.0)]
    pub dropout: f64,
}

impl LstmEncoderConfig {
    /// Needs at least one layer, a non-zero hidden size and dropout in [0, 1].
    pub fn init<B: Backend>(&self, device: &B::Device) -> EncoderResult<LstmEncoder<B>> {
        if self.num_layers == 0 {
            return Err(EncoderError::InvalidConfig("lstm needs at least one layer".into()));
        }
        if self.d_input == 0 || self.d_hidden == 0 {
            return Err(EncoderError::InvalidConfig("lstm input and hidden dims must be > 0".into()));
        }
        if !(0.0..=1.0).contains(&self.dropout) {
            return Err(EncoderError::InvalidConfig(format!(
                "lstm dropout {} is outside [0, 1]",
                self.dropout
            )));
        }

        let layers = (0..self.num_layers)
            .map(|i| {
                let d_in = if i == 0 { self.d_input } else { self.d_hidden };
                LstmConfig::new(d_in, self.d_hidden, true).init(device)
            })
            .collect();

        Ok(LstmEncoder {
            layers,
            dropout:  DropoutConfig::new(self.dropout).init(),
            d_hidden: self.d_hidden,
        })
    }
}

#[derive(Module, Debug)]
pub struct LstmEncoder<B: Backend> {
    pub layers:   Vec<Lstm<B>>,
    pub dropout:  Dropout,
    pub d_hidden: usize,
}

impl<B: Backend> LstmEncoder<B> {
    /// Full per-step output of the last layer: [batch, time, hidden]
    pub fn forward_sequence(&self, x: Tensor<B, 3>) -> Tensor<B, 3> {
        let mut x = x;
        for (i, layer) in self.layers.iter().enumerate() {
            if i > 0 {
                x = self.dropout.forward(x);
            }
            let (output, _state) = layer.forward(x, None);
            x = output;
        }
        x
    }

    /// x: [batch, time, dim] → [batch, hidden] (last time step)
    pub fn forward(&self, x: Tensor<B, 3>) -> EncoderResult<Tensor<B, 2>> {
        let [batch, time, _] = x.dims();
        if time == 0 {
            return Err(EncoderError::EmptySequence);
        }

        let output = self.forward_sequence(x);
        Ok(output
            .slice([0..batch, time - 1..time, 0..self.d_hidden])
            .reshape([batch, self.d_hidden]))
    }

    pub fn output_dim(&self) -> usize {
        self.d_hidden
    }

    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }
}
