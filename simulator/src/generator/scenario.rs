use anyhow::Context;
use echocore::signal::chirp::{generate_chirp, ChirpSpec};
use echocore::signal::echo::{synthesize, EchoModel, Reflector};
use echocore::SampleBuffer;
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Configuration for generating a synthetic ranging scenario.
///
/// Defaults reproduce the reference experiment: a 0-20 kHz sweep over 0.2 s
/// at 48 kHz inside a 3 s capture, with two reflectors half a second out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub sample_rate: f32,
    pub chirp_start_time: f32,
    pub chirp_stop_time: f32,
    pub chirp_start_freq: f32,
    pub chirp_stop_freq: f32,
    pub total_samples: usize,
    pub reflectors: Vec<Reflector>,
    pub noise_std: f32,
    pub seed: u64,
    pub description: Option<String>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
            chirp_start_time: 0.0,
            chirp_stop_time: 0.2,
            chirp_start_freq: 0.0,
            chirp_stop_freq: 20_000.0,
            total_samples: 144_000,
            reflectors: vec![
                Reflector {
                    delay_samples: 24_000,
                    amplitude: 0.1,
                },
                Reflector {
                    delay_samples: 24_960,
                    amplitude: 0.1,
                },
            ],
            noise_std: 0.0,
            seed: 0,
            description: None,
        }
    }
}

impl ScenarioConfig {
    pub fn chirp_spec(&self) -> ChirpSpec {
        ChirpSpec {
            start_time: self.chirp_start_time,
            stop_time: self.chirp_stop_time,
            start_freq: self.chirp_start_freq,
            stop_freq: self.chirp_stop_freq,
            sample_rate: self.sample_rate,
        }
    }

    pub fn echo_model(&self) -> EchoModel {
        EchoModel {
            reflectors: self.reflectors.clone(),
            noise_std: self.noise_std,
        }
    }
}

/// Builds the probe waveform and the simulated received signal.
pub fn build_signals(config: &ScenarioConfig) -> anyhow::Result<(SampleBuffer, SampleBuffer)> {
    let probe = generate_chirp(&config.chirp_spec()).context("generating probe chirp")?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let received = synthesize(&probe, config.total_samples, &config.echo_model(), &mut rng)
        .context("synthesizing received signal")?;
    Ok((probe, received))
}
