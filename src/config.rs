//! Mechanism for loading and sharing the simulation configuration

use crate::{acceptance::AcceptanceCut, numeric::Float, Result};

use anyhow::{bail, ensure, format_err, Context};
use log::warn;

use std::{collections::HashSet, fs, path::Path, str::FromStr};

/// Seed used when the configuration does not provide one
pub const DEFAULT_SEED: u64 = 12345;

/// Simulation configuration
#[derive(Clone, Debug, PartialEq)]
pub struct Configuration {
    /// Relative resolution on xi (sigma_xi / xi)
    pub xi_resolution: Float,

    /// Acceptance window on the smeared xi
    pub acceptance: AcceptanceCut,

    /// Absolute resolution on the time of flight
    pub time_resolution: Float,

    /// Name of the collection protons are read from
    pub input_array: String,

    /// Name of the collection accepted protons are written to
    pub output_array: String,

    /// Seed of the random number generator
    pub random_seed: u64,
}
//
impl Default for Configuration {
    fn default() -> Self {
        Self {
            xi_resolution: 0.05,
            acceptance: AcceptanceCut::new(0.02, 0.20),
            time_resolution: 0.1,
            input_array: "ProtonFilter/protons".to_owned(),
            output_array: "stableParticles".to_owned(),
            random_seed: DEFAULT_SEED,
        }
    }
}
//
impl Configuration {
    /// Load the configuration from a file and print it out
    pub fn load(file_name: impl AsRef<Path>) -> Result<Self> {
        let file_name = file_name.as_ref();
        let config_str = fs::read_to_string(file_name)
            .with_context(|| format!("Could not read {}", file_name.display()))?;
        let config = Self::parse(&config_str)?;
        config.print();
        Ok(config)
    }

    /// Parse a configuration from its textual form
    ///
    /// Each non-blank line holds one `Key value` pair, and `#` starts a
    /// comment. Keys which are not mentioned keep their default value.
    ///
    pub fn parse(config_str: &str) -> Result<Self> {
        let mut config = Self::default();
        let mut seen = HashSet::new();

        for (line_idx, line) in config_str.lines().enumerate() {
            let line_no = line_idx + 1;
            let content = line.split('#').next().unwrap_or_default();
            let mut words = content.split_whitespace();
            let Some(key) = words.next() else {
                continue;
            };
            let data = words
                .next()
                .ok_or_else(|| format_err!("Missing value for {} on line {}", key, line_no))?;
            ensure!(
                words.next().is_none(),
                "Unexpected trailing data after {} on line {}",
                key,
                line_no
            );
            ensure!(
                seen.insert(key),
                "Duplicate configuration of {} on line {}",
                key,
                line_no
            );

            let item = ConfigItem::new(key, data);
            match key {
                "XiResolution" => config.xi_resolution = item.parse()?,
                "XiMin" => config.acceptance.xi_min = item.parse()?,
                "XiMax" => config.acceptance.xi_max = item.parse()?,
                "TimeRes" => config.time_resolution = item.parse()?,
                "InputArray" => config.input_array = data.to_owned(),
                "OutputArray" => config.output_array = data.to_owned(),
                "RandomSeed" => config.random_seed = item.parse()?,
                _ => bail!("Unknown configuration key {} on line {}", key, line_no),
            }
        }

        // Values are not range-checked, an empty window only gets a warning
        if config.acceptance.xi_min > config.acceptance.xi_max {
            warn!(
                "XiMin ({}) is above XiMax ({}), no proton will be accepted",
                config.acceptance.xi_min, config.acceptance.xi_max
            );
        }

        Ok(config)
    }

    /// Display the configuration
    pub fn print(&self) {
        println!("XiResolution   : {}", self.xi_resolution);
        println!("XiMin          : {}", self.acceptance.xi_min);
        println!("XiMax          : {}", self.acceptance.xi_max);
        println!("TimeRes        : {}", self.time_resolution);
        println!("InputArray     : {}", self.input_array);
        println!("OutputArray    : {}", self.output_array);
        println!("RandomSeed     : {}", self.random_seed);
    }
}

/// A value from the configuration file, tagged with the key it was found
/// under for error reporting purposes.
struct ConfigItem<'data> {
    name: &'data str,
    data: &'data str,
}
//
impl<'data> ConfigItem<'data> {
    /// Build a config item from a key and raw value
    fn new(name: &'data str, data: &'data str) -> Self {
        Self { name, data }
    }

    /// Parse this data using Rust's standard parsing logic
    fn parse<T: FromStr>(self) -> Result<T>
    where
        <T as FromStr>::Err: ::std::error::Error + Send + Sync + 'static,
    {
        self.data
            .parse::<T>()
            .with_context(|| format!("Could not parse configuration of {}", self.name))
    }
}
