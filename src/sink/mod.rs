//! A 'sink' is a final destination for aggregated telemetry. It sits at the
//! end of a `source -> sink` chain and has no obligations with regard to the
//! windows it receives, other than to receive them. Individual sinks make
//! different choices.

use crossbeam_channel::Receiver;
use metric::{Event, SampleBatch};

pub mod monitord;

pub use self::monitord::{Monitord, MonitordConfig};

/// A 'sink' is a sink for aggregated telemetry windows.
pub trait Sink {
    /// Deliver one window of aggregated samples to the sink.
    fn deliver(&mut self, batch: SampleBatch) -> ();

    /// Called once, after the final window has been delivered.
    fn shutdown(self) -> ()
    where
        Self: Sized;

    /// Consume events until a shutdown is received or every sender has gone
    /// away, then shut the sink down.
    fn run(mut self, recv: Receiver<Event>)
    where
        Self: Sized,
    {
        for event in recv.iter() {
            match event {
                Event::Window(batch) => self.deliver(batch),
                Event::Shutdown => break,
            }
        }
        self.shutdown();
    }
}
