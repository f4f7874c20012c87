use crate::prelude::{PipelineError, PipelineResult, SampleBuffer};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Configuration for the linear-sweep probe waveform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChirpSpec {
    pub start_time: f32,
    pub stop_time: f32,
    pub start_freq: f32,
    pub stop_freq: f32,
    pub sample_rate: f32,
}

impl ChirpSpec {
    pub fn duration(&self) -> f32 {
        self.stop_time - self.start_time
    }

    /// Number of samples the sweep produces, rounded to the nearest integer.
    ///
    /// The duration-times-rate product is rounded explicitly rather than
    /// silently floored, so a fractional count never drops a sample.
    pub fn sample_count(&self) -> PipelineResult<usize> {
        self.validate()?;
        let count = (self.duration() * self.sample_rate).round() as i64;
        if count <= 0 {
            return Err(PipelineError::InvalidSpec(format!(
                "sweep of {} s at {} Hz yields no samples",
                self.duration(),
                self.sample_rate
            )));
        }
        Ok(count as usize)
    }

    fn validate(&self) -> PipelineResult<()> {
        if !(self.stop_time > self.start_time) {
            return Err(PipelineError::InvalidSpec(format!(
                "stop time {} must exceed start time {}",
                self.stop_time, self.start_time
            )));
        }
        if self.start_time < 0.0 {
            return Err(PipelineError::InvalidSpec(format!(
                "start time {} must be non-negative",
                self.start_time
            )));
        }
        if !(self.sample_rate > 0.0) {
            return Err(PipelineError::InvalidSpec(format!(
                "sample rate {} must be positive",
                self.sample_rate
            )));
        }
        Ok(())
    }
}

/// Generates the linear frequency sweep described by `spec`.
///
/// The instantaneous frequency moves linearly from `start_freq` to
/// `stop_freq` across the sweep interval; each sample is the cosine of the
/// integrated phase, with unit amplitude and zero initial phase.
pub fn generate_chirp(spec: &ChirpSpec) -> PipelineResult<SampleBuffer> {
    let count = spec.sample_count()?;
    let sweep_rate = (spec.stop_freq - spec.start_freq) / spec.duration();

    let mut samples = Vec::with_capacity(count);
    for index in 0..count {
        let t = index as f32 / spec.sample_rate;
        let phase = 2.0 * PI * (spec.start_freq * t + 0.5 * sweep_rate * t * t);
        samples.push(phase.cos());
    }

    Ok(SampleBuffer::new(samples, spec.sample_rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wideband_spec() -> ChirpSpec {
        ChirpSpec {
            start_time: 0.0,
            stop_time: 0.2,
            start_freq: 0.0,
            stop_freq: 20_000.0,
            sample_rate: 48_000.0,
        }
    }

    #[test]
    fn sample_count_matches_duration_times_rate() {
        let probe = generate_chirp(&wideband_spec()).unwrap();
        assert_eq!(probe.len(), 9600);
        assert_eq!(probe.sample_rate, 48_000.0);
    }

    #[test]
    fn first_sample_has_zero_initial_phase() {
        let probe = generate_chirp(&wideband_spec()).unwrap();
        assert!((probe.samples[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_inverted_time_bounds() {
        let mut spec = wideband_spec();
        spec.stop_time = -0.1;
        assert!(matches!(
            generate_chirp(&spec),
            Err(PipelineError::InvalidSpec(_))
        ));
    }

    #[test]
    fn rejects_negative_start_time() {
        let mut spec = wideband_spec();
        spec.start_time = -1.0;
        assert!(matches!(
            generate_chirp(&spec),
            Err(PipelineError::InvalidSpec(_))
        ));
    }

    #[test]
    fn rejects_non_positive_sample_rate() {
        let mut spec = wideband_spec();
        spec.sample_rate = 0.0;
        assert!(matches!(
            generate_chirp(&spec),
            Err(PipelineError::InvalidSpec(_))
        ));
    }

    #[test]
    fn rejects_sub_sample_sweep() {
        let spec = ChirpSpec {
            start_time: 0.0,
            stop_time: 1e-6,
            start_freq: 0.0,
            stop_freq: 100.0,
            sample_rate: 1000.0,
        };
        assert!(matches!(
            generate_chirp(&spec),
            Err(PipelineError::InvalidSpec(_))
        ));
    }

    #[test]
    fn midpoint_frequency_is_mean_of_sweep_bounds() {
        let spec = ChirpSpec {
            start_time: 0.0,
            stop_time: 1.0,
            start_freq: 100.0,
            stop_freq: 200.0,
            sample_rate: 8000.0,
        };
        let probe = generate_chirp(&spec).unwrap();

        // Count sign changes in a 0.2 s window centred on the midpoint; the
        // crossing rate is twice the instantaneous frequency.
        let window = &probe.samples[3200..4800];
        let crossings = window
            .windows(2)
            .filter(|pair| pair[0] * pair[1] < 0.0)
            .count();
        let estimated = crossings as f32 / (2.0 * 0.2);

        assert!(
            (estimated - 150.0).abs() < 8.0,
            "estimated {} Hz at the midpoint",
            estimated
        );
    }
}
