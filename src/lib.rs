//! monitord-sink turns windows of aggregated telemetry into records for
//! Monitord. Windows arrive as `metric::SampleBatch`es; every sample of a
//! window which shares service, cluster, metric and aggregation period with
//! another is folded into one Monitord monitor. Samples that differ on any of
//! those are kept apart.
//!
//! The crate is split along the path a window takes:
//!
//!  * `source` reads windows and pushes them into channels,
//!  * `sink` groups and serializes windows into records,
//!  * `delivery` writes records out.
//!
//! The executable glues the three together with channels and threads.
#![allow(unknown_lints)]
#![deny(trivial_numeric_casts, missing_docs, unstable_features, unused_import_braces)]
extern crate clap;
extern crate crossbeam_channel;
extern crate seahash;
extern crate serde;
extern crate serde_json;
extern crate toml;
extern crate url;

#[macro_use]
extern crate log;

#[macro_use]
extern crate serde_derive;

#[cfg(test)]
extern crate chrono;
#[cfg(test)]
extern crate quickcheck;

pub mod config;
pub mod delivery;
pub mod metric;
pub mod sink;
pub mod source;
pub mod util;
