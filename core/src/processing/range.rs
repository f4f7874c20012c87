use crate::processing::detector::Peak;
use serde::{Deserialize, Serialize};

/// Report record pairing a correlation peak with its derived distance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EchoDetection {
    pub lag: usize,
    pub magnitude: f32,
    pub delay_s: f32,
    pub distance_m: f32,
}

impl EchoDetection {
    pub fn new(lag: usize, magnitude: f32, delay_s: f32, distance_m: f32) -> Self {
        Self {
            lag,
            magnitude,
            delay_s,
            distance_m,
        }
    }
}

/// Maps detected peak lags to physical distances.
///
/// Each lag becomes `propagation_speed * lag * sample_period`, halved when
/// `round_trip` accounts for the out-and-back path. Total and
/// order-preserving; NaN or negative inputs propagate unchanged, and the
/// caller validates `propagation_speed` upstream.
pub fn to_distances(
    peaks: &[Peak],
    sample_period: f32,
    propagation_speed: f32,
    round_trip: bool,
) -> Vec<f32> {
    let scale = if round_trip { 0.5 } else { 1.0 };
    peaks
        .iter()
        .map(|peak| propagation_speed * peak.lag as f32 * sample_period * scale)
        .collect()
}
