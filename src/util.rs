//! Utility module, a grab-bag of functionality

use crossbeam_channel;
use metric;

/// A vector of `crossbeam_channel::Sender`s.
pub type Channel = Vec<crossbeam_channel::Sender<metric::Event>>;

/// Send a `metric::Event` into a `Channel`.
///
/// Every sender but the first receives a clone. Senders whose receiver has
/// hung up are logged and otherwise ignored.
pub fn send(ctx: &str, chans: &mut Channel, event: metric::Event) {
    if chans.is_empty() {
        return;
    }
    for chan in &mut chans[1..] {
        if chan.send(event.clone()).is_err() {
            debug!("[{}] receiver hung up, event dropped", ctx);
        }
    }
    if chans[0].send(event).is_err() {
        debug!("[{}] receiver hung up, event dropped", ctx);
    }
}
