//! The data model of aggregated telemetry as it arrives at a sink.
//!
//! Upstream aggregation hands sinks one `SampleBatch` per window. Each
//! `AggregatedSample` in the batch names its metric stream with an `Fqdsn` and
//! the window width with a `Period`.

mod period;
mod sample;

pub use self::period::{Period, PeriodUnit};
pub use self::sample::{AggregatedSample, Fqdsn, SampleBatch};

/// The unit of communication between sources and sinks.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// One window's worth of aggregated samples.
    Window(SampleBatch),
    /// No further events will follow. Receivers finish outstanding work and
    /// stop.
    Shutdown,
}
