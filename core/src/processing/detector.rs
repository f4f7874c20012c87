use crate::math::stats::StatsHelper;
use crate::prelude::{PipelineError, PipelineResult};
use crate::processing::correlator::CorrelationResult;
use crate::telemetry::log::LogManager;
use serde::{Deserialize, Serialize};

/// Candidate echo arrival: correlation lag index and magnitude at that lag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    pub lag: usize,
    pub magnitude: f32,
}

/// Detected peaks in strictly increasing lag order.
pub type PeakSet = Vec<Peak>;

/// Self-calibrating threshold detector over correlation magnitudes.
///
/// The threshold is `mean + k * std_dev` of the magnitude buffer itself, so
/// no manually tuned amplitude level is needed; `k` trades recall against
/// false positives and carries no prescribed default.
pub struct PeakDetector {
    logger: LogManager,
}

impl PeakDetector {
    pub fn new() -> Self {
        Self {
            logger: LogManager::for_stage("detector"),
        }
    }

    /// Reports every lag whose magnitude strictly exceeds the threshold.
    ///
    /// This is a per-sample threshold crossing, not a local-maximum search:
    /// adjacent samples above threshold around one echo are all reported.
    /// Callers wanting one entry per echo must cluster adjacent detections
    /// downstream.
    pub fn detect(&self, corr: &CorrelationResult, k: f32) -> PipelineResult<PeakSet> {
        let magnitudes = &corr.magnitudes.samples;
        if magnitudes.len() < 2 {
            return Err(PipelineError::EmptyInput(format!(
                "{} correlation samples, need at least 2 for a deviation estimate",
                magnitudes.len()
            )));
        }

        let mean = StatsHelper::mean(magnitudes);
        let deviation = StatsHelper::std_dev(magnitudes);
        let threshold = mean + k * deviation;

        let peaks: PeakSet = magnitudes
            .iter()
            .enumerate()
            .filter(|&(_, &magnitude)| magnitude > threshold)
            .map(|(lag, &magnitude)| Peak { lag, magnitude })
            .collect();

        self.logger.record(&format!(
            "threshold {:.4} (mean {:.4}, sigma {:.4}), {} detections",
            threshold,
            mean,
            deviation,
            peaks.len()
        ));

        Ok(peaks)
    }
}

impl Default for PeakDetector {
    fn default() -> Self {
        Self::new()
    }
}
