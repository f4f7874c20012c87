use crate::math::stats::StatsHelper;
use crate::prelude::{PipelineError, PipelineResult, SampleBuffer};
use crate::telemetry::log::LogManager;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Single simulated reflector: a delayed, scaled copy of the probe.
///
/// A negative amplitude encodes a phase-inverting reflection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reflector {
    pub delay_samples: usize,
    pub amplitude: f32,
}

/// Reflector list plus additive-noise level for building a received signal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EchoModel {
    pub reflectors: Vec<Reflector>,
    pub noise_std: f32,
}

/// Builds a simulated received signal from delayed, attenuated probe copies.
///
/// Each reflector adds `amplitude * probe` at its delay; a copy that would
/// run past the end of the buffer is truncated there, never wrapped back to
/// the front. Zero-mean Gaussian noise of `noise_std` is added sample-wise
/// last, drawn from the injected `rng`. This is a test-fixture generator; a
/// deployment substitutes a live-acquisition source returning an equivalent
/// buffer.
pub fn synthesize<R: Rng>(
    probe: &SampleBuffer,
    total_samples: usize,
    model: &EchoModel,
    rng: &mut R,
) -> PipelineResult<SampleBuffer> {
    if total_samples < probe.len() {
        return Err(PipelineError::BufferTooShort(format!(
            "target length {} is below the probe length {}",
            total_samples,
            probe.len()
        )));
    }
    if !model.noise_std.is_finite() || model.noise_std < 0.0 {
        return Err(PipelineError::InvalidSpec(format!(
            "noise std {} must be finite and non-negative",
            model.noise_std
        )));
    }

    let mut samples = vec![0.0f32; total_samples];
    for reflector in &model.reflectors {
        if reflector.delay_samples >= total_samples {
            continue;
        }
        let span = probe.len().min(total_samples - reflector.delay_samples);
        for offset in 0..span {
            samples[reflector.delay_samples + offset] +=
                reflector.amplitude * probe.samples[offset];
        }
    }

    if model.noise_std > 0.0 {
        let noise = Normal::new(0.0, model.noise_std)
            .map_err(|err| PipelineError::InvalidSpec(format!("noise model: {}", err)))?;
        for sample in &mut samples {
            *sample += noise.sample(rng);
        }
    }

    LogManager::for_stage("synthesize").record(&format!(
        "{} reflectors over {} samples, RMS {:.4}",
        model.reflectors.len(),
        total_samples,
        StatsHelper::rms(&samples)
    ));

    Ok(SampleBuffer::new(samples, probe.sample_rate))
}
