//! Monitord sink
//!
//! Monitord wants one monitor per metric stream and period. Each window handed
//! to this sink is partitioned into groups of samples sharing service,
//! cluster, metric and period, and each group is rendered as a single
//! Monitord record. Samples from different hosts land in the same record.
//! Records are handed off to a delivery task over a channel; this sink never
//! touches the network itself.

use crossbeam_channel::Sender;
use metric::SampleBatch;
use sink::Sink;
use std::error;
use std::fmt;
use url::Url;

mod encode;
mod group;

pub use self::encode::{encode, EncodedRecord};
pub use self::group::{group, Group};

/// Errors raised by the Monitord sink
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// An empty group was asked to be encoded.
    EmptyGroup,
    /// A sample value was NaN or infinite.
    NonFiniteValue {
        /// The monitor the sample belongs to.
        monitor: String,
        /// The host that reported the sample.
        host: String,
    },
    /// The named monitor has a period of zero length.
    ZeroPeriod(String),
    /// A host or statistic contains one of the `output` delimiters `:`, `=`
    /// or `;`.
    ReservedCharacter {
        /// The monitor the sample belongs to.
        monitor: String,
        /// The offending host or statistic.
        field: String,
    },
    /// The configured URI could not be parsed.
    InvalidUri(String),
    /// The configured URI is not http or https.
    UnsupportedScheme(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::EmptyGroup => write!(f, "cannot encode an empty group"),
            Error::NonFiniteValue {
                ref monitor,
                ref host,
            } => write!(
                f,
                "monitor {} has a non-finite value from host '{}'",
                monitor, host
            ),
            Error::ZeroPeriod(ref monitor) => {
                write!(f, "monitor {} has a zero-length period", monitor)
            }
            Error::ReservedCharacter {
                ref monitor,
                ref field,
            } => write!(
                f,
                "monitor {} has host or statistic '{}' containing one of ':', '=', ';'",
                monitor, field
            ),
            Error::InvalidUri(ref msg) => write!(f, "invalid uri: {}", msg),
            Error::UnsupportedScheme(ref scheme) => {
                write!(f, "unsupported uri scheme '{}', need http or https", scheme)
            }
        }
    }
}

impl error::Error for Error {}

/// Configuration for the `Monitord` sink
#[derive(Debug, Clone, PartialEq)]
pub struct MonitordConfig {
    /// The sink's unique name in the routing topology.
    pub config_path: String,
    /// Monitord's ingestion endpoint.
    pub uri: String,
    /// The severity attached to every record.
    pub severity: u8,
    /// The monitor type attached to every record.
    pub monitor_type: String,
}

impl Default for MonitordConfig {
    fn default() -> MonitordConfig {
        MonitordConfig {
            config_path: "sinks.monitord".to_string(),
            uri: "http://localhost:8080/alerts".to_string(),
            severity: 3,
            monitor_type: "0".to_string(),
        }
    }
}

impl MonitordConfig {
    /// Create a new `MonitordConfig`
    ///
    /// `uri` must be an absolute http or https URI. Severity and monitor type
    /// take their defaults.
    pub fn new<S>(config_path: S, uri: S) -> Result<MonitordConfig, Error>
    where
        S: Into<String>,
    {
        let uri = uri.into();
        validate_uri(&uri)?;
        Ok(MonitordConfig {
            config_path: config_path.into(),
            uri: uri,
            ..Default::default()
        })
    }
}

fn validate_uri(uri: &str) -> Result<(), Error> {
    let parsed = Url::parse(uri).map_err(|e| Error::InvalidUri(format!("{}: {}", uri, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(Error::UnsupportedScheme(other.to_string())),
    }
}

/// The Monitord sink
///
/// See the module documentation for details.
pub struct Monitord {
    config: MonitordConfig,
    records: Sender<EncodedRecord>,
}

impl Monitord {
    /// Create a new `Monitord` sink. Encoded records are sent down `records`.
    pub fn new(config: MonitordConfig, records: Sender<EncodedRecord>) -> Monitord {
        Monitord {
            config: config,
            records: records,
        }
    }

    /// Serialize a window into Monitord records
    ///
    /// One record is produced for every distinct (service, cluster, metric,
    /// period) in `batch`, ordered by first appearance. Serializing the same
    /// batch twice produces identical bytes. If any group fails to encode no
    /// records are returned at all.
    pub fn serialize(&self, batch: &SampleBatch) -> Result<Vec<EncodedRecord>, Error> {
        group(batch)
            .iter()
            .map(|grp| encode(grp, batch.timestamp, &self.config))
            .collect()
    }
}

impl Sink for Monitord {
    fn deliver(&mut self, batch: SampleBatch) -> () {
        match self.serialize(&batch) {
            Ok(records) => {
                trace!(
                    "[{}] window {} with {} samples became {} records",
                    self.config.config_path,
                    batch.timestamp,
                    batch.len(),
                    records.len()
                );
                for record in records {
                    if self.records.send(record).is_err() {
                        warn!(
                            "[{}] delivery has hung up, dropping rest of window {}",
                            self.config.config_path, batch.timestamp
                        );
                        return;
                    }
                }
            }
            Err(e) => {
                error!(
                    "[{}] dropping window {}: {}",
                    self.config.config_path, batch.timestamp, e
                );
            }
        }
    }

    fn shutdown(self) -> () {
        info!("[{}] shutting down", self.config.config_path);
    }
}
