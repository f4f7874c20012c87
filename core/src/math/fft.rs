use num_complex::Complex32;
use rustfft::{num_traits::Zero, Fft, FftPlanner};
use std::sync::Arc;

/// Helper that wraps the `rustfft` planner for a fixed transform size.
///
/// Plans the forward and inverse transforms once so a correlation can run
/// both directions at the same padded length.
pub struct FftHelper {
    fwd: Arc<dyn Fft<f32>>,
    inv: Arc<dyn Fft<f32>>,
    size: usize,
}

impl FftHelper {
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fwd = planner.plan_fft_forward(size);
        let inv = planner.plan_fft_inverse(size);
        Self { fwd, inv, size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Zero-pads the real input to the transform size and returns its spectrum.
    pub fn forward(&self, input: &[f32]) -> Vec<Complex32> {
        let mut buffer: Vec<Complex32> = input
            .iter()
            .map(|&value| Complex32::new(value, 0.0))
            .collect();
        buffer.resize(self.size, Complex32::zero());
        self.fwd.process(&mut buffer);
        buffer
    }

    /// Inverse transform, normalized by the transform size.
    pub fn inverse(&self, mut spectrum: Vec<Complex32>) -> Vec<Complex32> {
        debug_assert_eq!(spectrum.len(), self.size);
        self.inv.process(&mut spectrum);
        let scale = 1.0 / self.size as f32;
        for value in &mut spectrum {
            *value *= scale;
        }
        spectrum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_pads_to_transform_size() {
        let helper = FftHelper::new(8);
        let output = helper.forward(&[1.0, 0.0, -1.0, 0.0]);
        assert_eq!(output.len(), 8);
    }

    #[test]
    fn inverse_recovers_impulse() {
        let helper = FftHelper::new(16);
        let spectrum = helper.forward(&[1.0]);
        let recovered = helper.inverse(spectrum);

        assert!((recovered[0].re - 1.0).abs() < 1e-5);
        for value in &recovered[1..] {
            assert!(value.norm() < 1e-5);
        }
    }

    #[test]
    fn forward_of_dc_concentrates_in_bin_zero() {
        let helper = FftHelper::new(4);
        let output = helper.forward(&[1.0, 1.0, 1.0, 1.0]);
        assert!((output[0].re - 4.0).abs() < 1e-5);
        assert!(output[1].norm() < 1e-5);
    }
}
