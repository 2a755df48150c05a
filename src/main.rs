//! Command-line driver of the PPS proton smearing

use anyhow::Context;
use clap::Parser;
use log::info;

use pps_smearing::{
    config::Configuration, input, output, output::ParticleWriter, random::RandomGenerator,
    scheduling, smearing::ProtonSmearing, Result,
};

use std::{path::PathBuf, time::Instant};

/// Smear forward protons and apply the PPS acceptance
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Configuration file
    #[arg(long, default_value = "pps.cfg")]
    config: PathBuf,

    /// Particle table to read protons from
    #[arg(long)]
    input: PathBuf,

    /// Particle table to write accepted protons to
    #[arg(long, default_value = "pps.out")]
    output: PathBuf,

    /// File receiving the run summary
    #[arg(long, default_value = "pps.summary")]
    summary: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    // ### CONFIGURATION AND INPUT READOUT ###

    let cfg = Configuration::load(&args.config).context("Failed to load the configuration")?;
    let mut events =
        input::read_events(&args.input, &cfg.input_array).context("Failed to load the input")?;

    // Start the clock after I/O, to avoid IO-induced timing fluctuations
    let saved_time = Instant::now();

    // ### SIMULATION ###

    let smearing = ProtonSmearing::new(&cfg);
    let mut rng = RandomGenerator::new(cfg.random_seed);
    let mut writer = ParticleWriter::create(&args.output, &cfg.output_array)?;
    let summary = scheduling::run_simulation(&mut events, &smearing, &mut rng, |index, accepted| {
        writer
            .write_event(index, accepted)
            .with_context(|| format!("Failed to write event {}", index))
    })?;
    writer.finish().context("Failed to flush the output")?;
    info!(
        "Wrote {} accepted particles to {}",
        summary.num_accepted,
        args.output.display()
    );

    // ### RESULTS ###

    let elapsed_time = saved_time.elapsed();
    output::dump_summary(&cfg, &summary, elapsed_time, &args.summary)
        .context("Failed to output the results")?;

    Ok(())
}
