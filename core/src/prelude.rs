use serde::{Deserialize, Serialize};

/// Uniformly sampled real-valued signal together with its sample rate.
///
/// Every stage of the pipeline consumes and produces these; all buffers
/// participating in one correlation must share the same sample rate, while
/// their lengths may differ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleBuffer {
    pub samples: Vec<f32>,
    pub sample_rate: f32,
}

impl SampleBuffer {
    pub fn new(samples: Vec<f32>, sample_rate: f32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Time between consecutive samples in seconds.
    pub fn sample_period(&self) -> f32 {
        1.0 / self.sample_rate
    }
}

/// Common error type for pipeline operations.
///
/// Every variant is a synchronous input-validation failure; none is
/// recoverable by retry, and all propagate unmodified to the caller.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("invalid spec: {0}")]
    InvalidSpec(String),
    #[error("buffer too short: {0}")]
    BufferTooShort(String),
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),
    #[error("empty input: {0}")]
    EmptyInput(String),
}

pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_period_is_reciprocal_of_rate() {
        let buffer = SampleBuffer::new(vec![0.0; 4], 48_000.0);
        assert!((buffer.sample_period() - 1.0 / 48_000.0).abs() < 1e-12);
        assert_eq!(buffer.len(), 4);
        assert!(!buffer.is_empty());
    }
}
