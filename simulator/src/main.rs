use anyhow::Context;
use clap::Parser;
use generator::scenario::build_signals;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Offline echo-ranging workflow driver")]
struct Args {
    /// Run a single offline scenario and emit a ranging summary
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    #[arg(long, default_value_t = 5.0)]
    threshold_k: f32,
    #[arg(long, default_value_t = 330.0)]
    propagation_speed: f32,
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::from_args(args.threshold_k, args.propagation_speed, args.seed)
    };

    let runner = Runner::new(workflow_config.clone());
    let (probe, received) = build_signals(&workflow_config.scenario)?;

    if args.offline {
        let outcome = runner.execute(&probe, &received)?;

        println!(
            "Offline run -> detections {}, candidate lags {}, distances {:?}",
            outcome.records.len(),
            outcome.lag_count,
            outcome.distances
        );

        let report_dir = PathBuf::from("tools/data");
        fs::create_dir_all(&report_dir)?;

        let (runs, detections) = runner.metrics().snapshot();
        let report = format!(
            "runs={} detections={} lags={} distances={:?}\n",
            runs, detections, outcome.lag_count, outcome.distances
        );
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(report_dir.join("offline_ranging.log"))?;
        file.write_all(report.as_bytes())?;

        let json = serde_json::to_string_pretty(&outcome.records)
            .context("serializing detection records")?;
        fs::write(report_dir.join("ranging_detections.json"), json)?;
    }

    Ok(())
}
