// ============================================================
// Layer 5 — Average Encoder
// ============================================================
// Mean over the time axis: [batch, time, dim] → [batch, dim].
// No parameters and no configuration; it is still a Module so
// it can sit inside a larger model next to the other encoders.

use burn::prelude::*;

use crate::error::{EncoderError, EncoderResult};

#[derive(Module, Clone, Debug, Default)]
pub struct Average;

impl Average {
    pub fn new() -> Self {
        Self
    }

    pub fn forward<B: Backend>(&self, x: Tensor<B, 3>) -> EncoderResult<Tensor<B, 2>> {
        let [batch, time, dim] = x.dims();
        if time == 0 {
            return Err(EncoderError::EmptySequence);
        }
        Ok(x.sum_dim(1).div_scalar(time as f32).reshape([batch, dim]))
    }
}
