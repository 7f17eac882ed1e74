//! Provides the CLI option parser
//!
//! Used to parse the argv/config file into a struct that
//! the server can consume and use as configuration data.

use clap::{App, Arg};
use sink::monitord;
use sink::MonitordConfig;
use std::error;
use std::fmt;
use std::fs::File;
use std::io;
use std::io::Read;
use std::path::{Path, PathBuf};
use toml;

const VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");

fn default_version() -> String {
    VERSION.unwrap_or("unknown").to_string()
}

/// Errors raised while reading configuration
#[derive(Debug)]
pub enum Error {
    /// The configuration file could not be read.
    Io(io::Error),
    /// The configuration file is not valid TOML.
    Parse(toml::de::Error),
    /// A key holds a value of the wrong type or out of range.
    Invalid(String),
    /// The monitord sink rejected its configuration.
    Monitord(monitord::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Io(ref e) => write!(f, "could not read config file: {}", e),
            Error::Parse(ref e) => write!(f, "could not parse config file: {}", e),
            Error::Invalid(ref msg) => write!(f, "{}", msg),
            Error::Monitord(ref e) => write!(f, "sinks.monitord: {}", e),
        }
    }
}

impl error::Error for Error {}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Error {
        Error::Parse(e)
    }
}

impl From<monitord::Error> for Error {
    fn from(e: monitord::Error) -> Error {
        Error::Monitord(e)
    }
}

/// Configuration for the monitord-sink executable
///
/// This struct is what we construct from parsing the configuration file. It is
/// not intended to be created by external clients. Please see documentation
/// on `parse_config_file` in this module for more details.
#[derive(Debug)]
pub struct Args {
    /// The verbosity setting. The higher the value the more chatty we get.
    pub verbose: u64,
    /// Version string. This is set automatically.
    pub version: String,
    /// See `sink::Monitord` for more.
    pub monitord: MonitordConfig,
}

impl Default for Args {
    fn default() -> Self {
        Args {
            verbose: 0,
            version: default_version(),
            monitord: MonitordConfig::default(),
        }
    }
}

/// What the command line asked for
#[derive(Debug, Clone, PartialEq)]
pub struct Cli {
    /// Location of the configuration file.
    pub config_file: PathBuf,
    /// Number of times `-v` was given.
    pub verbose: u64,
}

/// Parse the command line
///
/// Most configuration lives in an on-disk file, see `parse_config_file`. clap
/// exits the process on malformed arguments or `--help`.
pub fn parse_args() -> Cli {
    let args = App::new("monitord-sink")
        .version(VERSION.unwrap_or("unknown"))
        .author("Brian L. Troutwine <blt@postmates.com>")
        .about("serializes aggregated telemetry windows for monitord")
        .arg(
            Arg::with_name("config-file")
                .long("config")
                .short("C")
                .value_name("config")
                .required(true)
                .help("The config file to feed in.")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Turn on verbose output."),
        )
        .get_matches();

    Cli {
        // `required(true)` guarantees presence
        config_file: PathBuf::from(args.value_of("config-file").unwrap_or_default()),
        verbose: args.occurrences_of("verbose"),
    }
}

/// Read and parse the configuration file at `path`.
pub fn read_config_file(path: &Path, verbosity: u64) -> Result<Args, Error> {
    let mut fp = File::open(path)?;
    let mut buffer = String::new();
    fp.read_to_string(&mut buffer)?;
    parse_config_file(&buffer, verbosity)
}

/// Parse the configuration file.
///
/// An empty file is a valid configuration, every setting has a default. The
/// monitord sink is configured under `[sinks.monitord]`:
///
/// ```toml
/// [sinks.monitord]
/// uri = "http://monitord.example.com:8080/alerts"
/// severity = 3
/// type = "0"
/// ```
pub fn parse_config_file(buffer: &str, verbosity: u64) -> Result<Args, Error> {
    let mut args = Args::default();
    let value: toml::Value = toml::from_str(buffer)?;

    args.verbose = verbosity;

    // sinks
    //
    if let Some(sinks) = value.get("sinks") {
        let sinks = sinks
            .as_table()
            .ok_or_else(|| Error::Invalid("sinks must be in table format".to_string()))?;

        if let Some(snk) = sinks.get("monitord") {
            let uri = match snk.get("uri") {
                Some(uri) => uri
                    .as_str()
                    .ok_or_else(|| {
                        Error::Invalid("could not parse sinks.monitord.uri".to_string())
                    })?
                    .to_string(),
                None => args.monitord.uri.clone(),
            };
            let mut res = MonitordConfig::new("sinks.monitord".to_string(), uri)?;

            if let Some(sev) = snk.get("severity") {
                res.severity = match sev.as_integer() {
                    Some(sev) if sev >= 0 && sev <= i64::from(u8::max_value()) => sev as u8,
                    _ => {
                        return Err(Error::Invalid(
                            "sinks.monitord.severity must be an integer in 0..255"
                                .to_string(),
                        ))
                    }
                };
            }

            if let Some(ty) = snk.get("type") {
                res.monitor_type = match (ty.as_str(), ty.as_integer()) {
                    (Some(s), _) => s.to_string(),
                    (None, Some(i)) => i.to_string(),
                    (None, None) => {
                        return Err(Error::Invalid(
                            "sinks.monitord.type must be a string or integer".to_string(),
                        ))
                    }
                };
            }

            args.monitord = res;
        }
    }

    Ok(args)
}
