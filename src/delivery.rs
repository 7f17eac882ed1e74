//! Delivery of encoded records
//!
//! Sinks encode, delivery transmits. The two are joined by a channel of
//! `EncodedRecord`s so that a slow or broken transmission path never holds up
//! serialization of the next window.

use crossbeam_channel::Receiver;
use sink::monitord::EncodedRecord;
use std::io;
use std::io::Write;

/// Write every record received to an `io::Write`, in order.
pub struct Stream<W> {
    out: W,
    written: u64,
}

impl<W> Stream<W>
where
    W: Write,
{
    /// Create a new `Stream` writing into `out`.
    pub fn new(out: W) -> Stream<W> {
        Stream {
            out: out,
            written: 0,
        }
    }

    /// Drain `recv`, writing and flushing each record as it arrives.
    ///
    /// Returns once every sender has hung up. The first write error stops
    /// delivery; records still in the channel are not written.
    pub fn run(&mut self, recv: Receiver<EncodedRecord>) -> io::Result<u64> {
        for record in recv.iter() {
            self.out.write_all(&record)?;
            self.out.flush()?;
            self.written += 1;
            trace!("delivered record {} ({} bytes)", self.written, record.len());
        }
        Ok(self.written)
    }

    /// Total records written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Unwrap the `Stream`, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}
