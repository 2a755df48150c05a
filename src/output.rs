//! This module is in charge of outputting the accepted particles and the run
//! summary to the standard output and various files

use crate::{
    config::Configuration,
    event::Particle,
    input::COLUMNS,
    numeric::{reals, Float},
    scheduling::RunSummary,
    Result,
};

use anyhow::Context;
use log::info;
use time::{format_description, OffsetDateTime};

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
    time::Duration,
};

// Number of significant digits in summary output
const SIG_DIGITS: usize = (reals::DIGITS - 1) as usize;

/// Writer of accepted particles
///
/// Uses the same table layout as the input, so that the output of a run can be
/// fed to later processing stages (or back to this one).
///
pub struct ParticleWriter<W: Write> {
    /// Underlying output stream
    writer: W,

    /// Collection tag written on every row
    collection: String,
}
//
impl ParticleWriter<BufWriter<File>> {
    /// Create (or truncate) a particle table on disk
    pub fn create(file_name: impl AsRef<Path>, collection: &str) -> Result<Self> {
        let file_name = file_name.as_ref();
        let file = File::create(file_name)
            .with_context(|| format!("Could not create {}", file_name.display()))?;
        Self::new(BufWriter::new(file), collection).context("Could not write table header")
    }
}
//
impl<W: Write> ParticleWriter<W> {
    /// Start a particle table on an arbitrary output stream
    pub fn new(mut writer: W, collection: &str) -> io::Result<Self> {
        writeln!(writer, "# {}", COLUMNS.join(" "))?;
        Ok(Self {
            writer,
            collection: collection.to_owned(),
        })
    }

    /// Append the accepted particles of one event
    pub fn write_event(&mut self, index: u64, particles: &[&Particle]) -> io::Result<()> {
        for particle in particles {
            let pos = &particle.position;
            let mom = &particle.momentum;
            writeln!(
                self.writer,
                "{} {} {} {} {} {} {} {} {} {}",
                index, self.collection, pos[0], pos[1], pos[2], pos[3], mom[0], mom[1], mom[2], mom[3]
            )?;
        }
        Ok(())
    }

    /// Flush the table and give back the output stream
    pub fn finish(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Output the run summary to the console and to disk
pub fn dump_summary(
    cfg: &Configuration,
    summary: &RunSummary,
    elapsed_time: Duration,
    file_name: impl AsRef<Path>,
) -> Result<()> {
    let file_name = file_name.as_ref();

    // Compute a timestamp of when the run ended
    let format =
        format_description::parse("[day]-[month repr:short]-[year repr:last_two]   [hour]:[minute]:[second]")?;
    let timestamp = OffsetDateTime::now_utc().format(&format)?;

    // Print out the main numbers on stdout
    println!();
    println!("Events    : {}", summary.num_events);
    println!("Particles : {}", summary.num_particles);
    println!("Accepted  : {}", summary.num_accepted);
    println!("Fraction  : {:.6}", summary.acceptance());

    let mut file = File::create(file_name)
        .with_context(|| format!("Could not create {}", file_name.display()))?;
    write_summary(&mut file, cfg, summary, elapsed_time, &timestamp)
        .with_context(|| format!("Could not write {}", file_name.display()))?;
    info!("Run summary written to {}", file_name.display());
    Ok(())
}

/// Write the run summary using fixed-size key/value columns
fn write_summary(
    writer: &mut impl Write,
    cfg: &Configuration,
    summary: &RunSummary,
    elapsed_time: Duration,
    timestamp: &str,
) -> io::Result<()> {
    writeln_kv(writer, timestamp)?;
    writeln_kv(writer, "---------------------------------------------")?;
    writeln_kv(writer, ("Input collection", cfg.input_array.as_str()))?;
    writeln_kv(writer, ("Output collection", cfg.output_array.as_str()))?;
    writeln_kv(writer, ("Relative resolution on xi", cfg.xi_resolution))?;
    writeln_kv(writer, ("Minimum xi", cfg.acceptance.xi_min))?;
    writeln_kv(writer, ("Maximum xi", cfg.acceptance.xi_max))?;
    writeln_kv(writer, ("Time resolution", cfg.time_resolution))?;
    writeln_kv(writer, ("Random seed", cfg.random_seed))?;
    writeln_kv(writer, "---------------------------------------------")?;
    writeln_kv(writer, ("Number of events", summary.num_events))?;
    writeln_kv(writer, ("Number of particles", summary.num_particles))?;
    writeln_kv(writer, ("... after acceptance", summary.num_accepted))?;
    writeln_kv(writer, ("Accepted fraction", summary.acceptance()))?;
    writeln_kv(writer, "---------------------------------------------")?;
    let elapsed_secs = elapsed_time.as_secs_f64() as Float;
    writeln_kv(writer, ("Elapsed time (s)", elapsed_secs))?;
    let secs_per_ev = elapsed_secs / (summary.num_events as Float);
    writeln_kv(writer, ("Elapsed time per event (s)", secs_per_ev))
}

/// Text output facility for the summary file
fn writeln_kv(writer: &mut impl Write, data: impl SummaryItem) -> io::Result<()> {
    write!(writer, " ")?;
    data.write(writer)?;
    writeln!(writer)
}

/// Trait implemented by things which can appear in the summary file
trait SummaryItem: Sized {
    /// Write down `self` to the summary file
    fn write(self, writer: &mut impl Write) -> io::Result<()>;
}

impl SummaryItem for &str {
    fn write(self, writer: &mut impl Write) -> io::Result<()> {
        write!(writer, "{}", self)
    }
}

impl SummaryItem for usize {
    fn write(self, writer: &mut impl Write) -> io::Result<()> {
        write!(writer, "{}", self)
    }
}

impl SummaryItem for u64 {
    fn write(self, writer: &mut impl Write) -> io::Result<()> {
        write!(writer, "{}", self)
    }
}

impl SummaryItem for Float {
    // Close approximation of printf's %g
    fn write(self, writer: &mut impl Write) -> io::Result<()> {
        write_engineering(writer, self, SIG_DIGITS)
    }
}

impl<T: SummaryItem> SummaryItem for (&str, T) {
    // Key-value output that uses fixed-size columns for better readability
    fn write(self, writer: &mut impl Write) -> io::Result<()> {
        write!(writer, "{:<31}: ", self.0)?;
        self.1.write(writer)
    }
}

/// Write a floating-point number using "engineering" notation
///
/// Analogous to the %g format of the C printf function, this method switches
/// between naive and scientific notation for floating-point numbers when the
/// number being printed becomes so small that printing leading zeroes could end
/// up larger than the scientific notation, or so large that we would be forced
/// to print more significant digits than requested.
///
fn write_engineering(writer: &mut impl Write, x: Float, sig_digits: usize) -> io::Result<()> {
    let mut precision = sig_digits - 1;
    if x == 0. {
        // Zero is special because you can't take its log
        write!(writer, "0")
    } else if !x.is_finite() {
        write!(writer, "{}", x)
    } else {
        // Otherwise, use log to evaluate order of magnitude
        let log_x = x.abs().log10();
        if log_x >= -3. && log_x <= (sig_digits as Float) {
            // Rust's precision counts digits after the decimal point, so it
            // must shrink as magnitude grows to keep significant digits fixed
            precision = (precision as isize - log_x.trunc() as isize).max(0) as usize;

            // The leading zero of numbers below 1 is not significant
            if log_x < 0. {
                precision += 1
            }

            // Drop trailing zeros and decimal point, but not integer zeros
            let str_with_zeros = format!("{:.1$}", x, precision);
            if str_with_zeros.contains('.') {
                write!(
                    writer,
                    "{}",
                    str_with_zeros.trim_end_matches('0').trim_end_matches('.')
                )
            } else {
                write!(writer, "{}", str_with_zeros)
            }
        } else {
            write!(writer, "{:.1$e}", x, precision)
        }
    }
}
