use std::{env, path::Path};

use aco_tsp_derive::{CliOptions, CliValue, KvDisplay};
use log::LevelFilter;

use crate::{
    Error, Result, ReinforcementPolicy,
    config::{
        DEFAULT_ALPHA, DEFAULT_BETA, DEFAULT_EVAPORATION_RATE, DEFAULT_MAX_ITERATIONS,
        DEFAULT_NUM_ANTS, DEFAULT_SEED,
    },
};

/// Command-line options for a colony run.
#[derive(Clone, Debug, CliOptions, KvDisplay)]
pub struct SolverOptions {
    /// Number of colony iterations to run.
    #[cli(long = "iterations")]
    pub iterations: usize,
    /// Number of ants (tours) built per iteration.
    #[cli(long = "ants")]
    pub ants: usize,
    /// Fraction of pheromone removed each iteration, in [0, 1).
    #[cli(long = "evaporation-rate")]
    pub evaporation_rate: f64,
    /// Pheromone exponent.
    #[cli(long = "alpha")]
    pub alpha: f64,
    /// Distance-bias exponent.
    #[cli(long = "beta")]
    pub beta: f64,
    /// Which tours deposit pheromone each iteration.
    #[cli(long = "reinforcement", value_enum)]
    pub reinforcement: ReinforcementPolicy,
    /// Seed for the search's random streams.
    #[cli(long = "seed")]
    pub seed: u64,
    /// Worker threads for tour construction; 0 uses spare cores.
    #[cli(long = "threads")]
    pub threads: usize,
    /// Instance file. Empty or `-` reads stdin.
    #[cli(long = "input", value = "path")]
    #[kv(fmt = "quoted")]
    pub input: String,
    /// Tour output file. Empty or `-` writes stdout.
    #[cli(long = "output", value = "path")]
    #[kv(fmt = "quoted")]
    pub output: String,
    /// Log verbosity.
    #[cli(long = "log-level", value_enum)]
    pub log_level: LogLevel,
    /// Log line layout.
    #[cli(long = "log-format", value_enum)]
    pub log_format: LogFormat,
    /// Prefix log lines with a millisecond timestamp.
    #[cli(long = "log-timestamp", flag)]
    pub log_timestamp: bool,
    /// Log file. Empty or `-` logs to stderr.
    #[cli(long = "log-output", value = "path")]
    #[kv(fmt = "quoted")]
    pub log_output: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-level")]
pub enum LogLevel {
    Error,
    #[cli(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-format")]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_MAX_ITERATIONS,
            ants: DEFAULT_NUM_ANTS,
            evaporation_rate: DEFAULT_EVAPORATION_RATE,
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
            reinforcement: ReinforcementPolicy::AntSystem,
            seed: DEFAULT_SEED,
            threads: 0,
            input: String::new(),
            output: String::new(),
            log_level: LogLevel::Warn,
            log_format: LogFormat::Compact,
            log_timestamp: true,
            log_output: String::new(),
        }
    }
}

impl SolverOptions {
    pub fn from_args() -> Result<Self> {
        Self::parse_from_iter(env::args().skip(1))
    }

    pub fn parse_from_iter<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        let mut args = args
            .into_iter()
            .map(|arg| arg.as_ref().to_owned())
            .peekable();

        while let Some(arg) = args.next() {
            if arg == "--help" || arg == "-h" {
                return Err(Error::Usage(Self::usage()));
            }

            let Some(raw_name) = arg.strip_prefix("--") else {
                return Err(Error::invalid_configuration(format!(
                    "Unexpected argument: {arg}\n\n{}",
                    Self::usage()
                )));
            };

            if raw_name.is_empty() {
                return Err(Error::invalid_configuration(format!(
                    "Invalid option name: {arg}\n\n{}",
                    Self::usage()
                )));
            }

            let (name, value) = Self::split_arg(raw_name, &mut args);
            if !options.apply_cli_option(&name, value)? {
                return Err(Error::invalid_configuration(format!(
                    "Unknown option: --{name}\n\n{}",
                    Self::usage()
                )));
            }
        }

        Ok(options)
    }

    pub fn usage() -> String {
        let entries = Self::cli_entries();
        let width = entries
            .iter()
            .map(|(signature, _)| signature.len())
            .max()
            .unwrap_or(0);

        let mut usage = String::from(concat!(
            "Usage:\n",
            "  aco-tsp [options] --input cities.tsp\n",
            "  aco-tsp [options] < cities.tsp\n\n",
            "Options:\n",
        ));
        for (signature, summary) in entries {
            usage.push_str(&format!("  {signature:<width$}  {summary}\n"));
        }
        usage.push_str(&format!("  {:<width$}  Print this help\n", "--help"));
        usage.push_str(concat!(
            "\nExamples:\n",
            "  aco-tsp --input oliver30.tsp --iterations 500 --ants 200\n",
            "  aco-tsp --alpha=1 --beta=5 --reinforcement=elitist < oliver30.tsp\n",
            "  aco-tsp --seed 7 --log-level=debug --output best.tour < oliver30.tsp\n",
        ));
        usage
    }

    pub fn log_output_path(&self) -> Option<&Path> {
        non_stdio_path(&self.log_output)
    }

    pub fn output_path(&self) -> Option<&Path> {
        non_stdio_path(&self.output)
    }

    pub fn input_path(&self) -> Option<&Path> {
        non_stdio_path(&self.input)
    }
}

/// Empty and `-` mean the process's standard stream.
fn non_stdio_path(raw: &str) -> Option<&Path> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "-" {
        None
    } else {
        Some(Path::new(raw))
    }
}
