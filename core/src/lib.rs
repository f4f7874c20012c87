//! Matched-filter ranging core for the Rust-based echo-ranging platform.
//!
//! The modules cover the probe generation, echo synthesis, FFT correlation,
//! adaptive peak detection, and range conversion stages behind safe
//! abstractions and well-defined error contracts.

pub mod math;
pub mod prelude;
pub mod processing;
pub mod signal;
pub mod telemetry;

pub use prelude::{PipelineError, PipelineResult, SampleBuffer};
