//! A 'source' is an origin of aggregated telemetry windows. Sources push
//! `metric::Event`s into the channels of their forwards.

mod json_lines;

pub use self::json_lines::{JsonLines, JsonLinesConfig};

/// Source, the originator of all `metric::Event`.
///
/// A Source creates all `metric::Event`, doing so by reading from files,
/// standard input, etc etc. All sources push into their forwards.
pub trait Source {
    /// Run the Source, the exact mechanism here depends on the Source itself.
    fn run(&mut self) -> ();
}
