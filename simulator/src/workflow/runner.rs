use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use echocore::processing::correlator::Correlator;
use echocore::processing::detector::{PeakDetector, PeakSet};
use echocore::processing::range::{to_distances, EchoDetection};
use echocore::telemetry::metrics::MetricsRecorder;
use echocore::SampleBuffer;
use std::sync::Arc;

/// Result of one end-to-end ranging pass.
pub struct RangingOutcome {
    pub lag_count: usize,
    pub peaks: PeakSet,
    pub distances: Vec<f32>,
    pub records: Vec<EchoDetection>,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
    metrics: Arc<MetricsRecorder>,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self {
            config,
            metrics: Arc::new(MetricsRecorder::new()),
        }
    }

    pub fn metrics(&self) -> &MetricsRecorder {
        &self.metrics
    }

    /// Runs correlate -> detect -> convert over an already-acquired pair of
    /// signals.
    pub fn execute(
        &self,
        probe: &SampleBuffer,
        received: &SampleBuffer,
    ) -> anyhow::Result<RangingOutcome> {
        let correlation = Correlator::new()
            .correlate(received, probe)
            .context("correlating received signal against probe")?;

        let peaks = PeakDetector::new()
            .detect(&correlation, self.config.threshold_k)
            .context("detecting correlation peaks")?;

        let sample_period = correlation.magnitudes.sample_period();
        let distances = to_distances(
            &peaks,
            sample_period,
            self.config.propagation_speed,
            self.config.round_trip,
        );

        let records: Vec<EchoDetection> = peaks
            .iter()
            .zip(&distances)
            .map(|(peak, &distance_m)| {
                EchoDetection::new(
                    peak.lag,
                    peak.magnitude,
                    correlation.lag_time(peak.lag),
                    distance_m,
                )
            })
            .collect();

        self.metrics.record_run(records.len());

        Ok(RangingOutcome {
            lag_count: correlation.magnitudes.len(),
            peaks,
            distances,
            records,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::scenario::{build_signals, ScenarioConfig};
    use echocore::signal::echo::Reflector;

    fn nearest_lag(peaks: &PeakSet, target: i64) -> i64 {
        peaks
            .iter()
            .map(|peak| (peak.lag as i64 - target).abs())
            .min()
            .expect("no peaks detected")
    }

    #[test]
    fn runner_recovers_single_echo_delay() {
        let scenario = ScenarioConfig {
            sample_rate: 8000.0,
            chirp_stop_time: 0.05,
            chirp_stop_freq: 2000.0,
            total_samples: 4096,
            reflectors: vec![Reflector {
                delay_samples: 1000,
                amplitude: 0.5,
            }],
            noise_std: 0.0,
            ..Default::default()
        };
        let config = WorkflowConfig {
            scenario: scenario.clone(),
            threshold_k: 5.0,
            propagation_speed: 330.0,
            round_trip: true,
        };

        let (probe, received) = build_signals(&scenario).unwrap();
        let runner = Runner::new(config);
        let outcome = runner.execute(&probe, &received).unwrap();

        assert_eq!(outcome.lag_count, 4096 - 400 + 1);
        assert!(nearest_lag(&outcome.peaks, 1000) <= 1);
        assert_eq!(outcome.distances.len(), outcome.peaks.len());
        assert_eq!(runner.metrics().snapshot().0, 1);
    }

    #[test]
    fn runner_resolves_reference_scenario_distances() {
        let config = WorkflowConfig::default();
        let (probe, received) = build_signals(&config.scenario).unwrap();
        let outcome = Runner::new(config).execute(&probe, &received).unwrap();

        for (expected_lag, expected_distance) in [(24_000_i64, 82.5_f32), (24_960, 85.8)] {
            assert!(
                nearest_lag(&outcome.peaks, expected_lag) <= 1,
                "no peak near lag {}",
                expected_lag
            );
            assert!(
                outcome
                    .distances
                    .iter()
                    .any(|&d| (d - expected_distance).abs() < 0.2),
                "no distance near {} m",
                expected_distance
            );
        }
    }

    #[test]
    fn metrics_accumulate_across_runs() {
        let scenario = ScenarioConfig {
            sample_rate: 8000.0,
            chirp_stop_time: 0.05,
            chirp_stop_freq: 2000.0,
            total_samples: 2048,
            reflectors: vec![Reflector {
                delay_samples: 500,
                amplitude: 0.5,
            }],
            noise_std: 0.0,
            ..Default::default()
        };
        let config = WorkflowConfig {
            scenario: scenario.clone(),
            threshold_k: 5.0,
            propagation_speed: 330.0,
            round_trip: true,
        };

        let (probe, received) = build_signals(&scenario).unwrap();
        let runner = Runner::new(config);
        runner.execute(&probe, &received).unwrap();
        runner.execute(&probe, &received).unwrap();

        let (runs, detections) = runner.metrics().snapshot();
        assert_eq!(runs, 2);
        assert!(detections >= 2);
    }
}
