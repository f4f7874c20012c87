use crate::math::fft::FftHelper;
use crate::prelude::{PipelineError, PipelineResult, SampleBuffer};
use crate::telemetry::log::LogManager;

/// Matched-filter output: one non-negative magnitude per candidate lag.
#[derive(Debug, Clone)]
pub struct CorrelationResult {
    pub magnitudes: SampleBuffer,
}

impl CorrelationResult {
    /// Arrival-time offset in seconds for the given lag index.
    pub fn lag_time(&self, lag: usize) -> f32 {
        lag as f32 * self.magnitudes.sample_period()
    }
}

/// FFT-domain cross-correlator (matched filter) for real-valued signals.
///
/// Multiplies the received spectrum by the conjugate of the probe spectrum.
/// An earlier deconvolution formulation (dividing the spectra) blows up
/// wherever the probe spectrum is near zero and is deliberately not offered.
pub struct Correlator {
    logger: LogManager,
}

impl Correlator {
    pub fn new() -> Self {
        Self {
            logger: LogManager::for_stage("correlator"),
        }
    }

    /// Correlates `received` against the known `probe`.
    ///
    /// Both signals are zero-padded to a power of two covering the full
    /// linear correlation, multiplied in the transform domain, and
    /// inverse-transformed. The output is truncated to the region where the
    /// probe lies entirely inside the received signal, so lag index k maps
    /// directly to a delay of k samples.
    pub fn correlate(
        &self,
        received: &SampleBuffer,
        probe: &SampleBuffer,
    ) -> PipelineResult<CorrelationResult> {
        if received.is_empty() || probe.is_empty() {
            return Err(PipelineError::ShapeMismatch(
                "correlation operands must be non-empty".to_string(),
            ));
        }
        if probe.len() > received.len() {
            return Err(PipelineError::ShapeMismatch(format!(
                "probe length {} exceeds received length {}",
                probe.len(),
                received.len()
            )));
        }
        if received.sample_rate != probe.sample_rate {
            return Err(PipelineError::ShapeMismatch(format!(
                "sample rates differ: {} vs {}",
                received.sample_rate, probe.sample_rate
            )));
        }

        let full_len = received.len() + probe.len() - 1;
        let fft = FftHelper::new(full_len.next_power_of_two());

        let received_spectrum = fft.forward(&received.samples);
        let probe_spectrum = fft.forward(&probe.samples);

        let product: Vec<_> = received_spectrum
            .iter()
            .zip(&probe_spectrum)
            .map(|(rx, tx)| rx * tx.conj())
            .collect();
        let correlation = fft.inverse(product);

        // Magnitude collapses the sign ambiguity of inverted echoes.
        let valid_len = received.len() - probe.len() + 1;
        let magnitudes: Vec<f32> = correlation[..valid_len]
            .iter()
            .map(|value| value.re.abs())
            .collect();

        self.logger.record(&format!(
            "FFT size {}, {} candidate lags",
            fft.size(),
            valid_len
        ));

        Ok(CorrelationResult {
            magnitudes: SampleBuffer::new(magnitudes, received.sample_rate),
        })
    }
}

impl Default for Correlator {
    fn default() -> Self {
        Self::new()
    }
}
