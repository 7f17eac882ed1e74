use metric;
use serde_json;
use source::Source;
use std::io::BufRead;
use util;

/// The JSON lines source
///
/// Reads one JSON encoded `metric::SampleBatch` per line from any buffered
/// reader. Blank lines are skipped. Lines which do not parse are logged and
/// skipped; one bad window does not end the stream. At end of input a
/// `metric::Event::Shutdown` is sent to every forward.
pub struct JsonLines<R> {
    reader: R,
    chans: util::Channel,
    config_path: String,
}

/// Configuration for the `JsonLines` source
#[derive(Debug, Clone, PartialEq)]
pub struct JsonLinesConfig {
    /// The unique name for the source in the routing topology.
    pub config_path: String,
}

impl Default for JsonLinesConfig {
    fn default() -> JsonLinesConfig {
        JsonLinesConfig {
            config_path: "sources.json_lines".to_string(),
        }
    }
}

impl<R> JsonLines<R>
where
    R: BufRead,
{
    /// Create a new `JsonLines` reading from `reader` and sending into
    /// `chans`.
    pub fn new(reader: R, chans: util::Channel, config: JsonLinesConfig) -> JsonLines<R> {
        JsonLines {
            reader: reader,
            chans: chans,
            config_path: config.config_path,
        }
    }
}

impl<R> Source for JsonLines<R>
where
    R: BufRead,
{
    fn run(&mut self) -> () {
        let mut line = String::with_capacity(4_096);
        let mut line_no: u64 = 0;
        loop {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => break,
                Ok(_) => {
                    line_no += 1;
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    match serde_json::from_str::<metric::SampleBatch>(trimmed) {
                        Ok(batch) => util::send(
                            &self.config_path,
                            &mut self.chans,
                            metric::Event::Window(batch),
                        ),
                        Err(e) => warn!(
                            "[{}] skipping line {}, not a window: {}",
                            self.config_path, line_no, e
                        ),
                    }
                }
                Err(e) => {
                    error!("[{}] unable to read input: {}", self.config_path, e);
                    break;
                }
            }
        }
        info!("[{}] input exhausted after {} lines", self.config_path, line_no);
        util::send(&self.config_path, &mut self.chans, metric::Event::Shutdown);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crossbeam_channel::unbounded;
    use metric::{AggregatedSample, Event, Fqdsn, Period, SampleBatch};
    use source::Source;
    use std::io::Cursor;

    #[test]
    fn windows_then_shutdown() {
        let input = r#"{"timestamp": 10, "samples": []}

not json at all
{"timestamp": 20, "samples": [{"fqdsn": {"service": "s", "cluster": "c", "metric": "m"}, "period": {"count": 1, "unit": "hours"}, "host": "h", "value": 0.5}]}
"#;
        let (snd, rcv) = unbounded();
        let mut source = JsonLines::new(
            Cursor::new(input.as_bytes()),
            vec![snd],
            JsonLinesConfig::default(),
        );
        source.run();

        let events: Vec<Event> = rcv.try_iter().collect();
        assert_eq!(
            vec![
                Event::Window(SampleBatch::new(10)),
                Event::Window(SampleBatch::new(20).sample(
                    AggregatedSample::new(Fqdsn::new("s", "c", "m"), Period::hours(1), 0.5)
                        .host("h"),
                )),
                Event::Shutdown,
            ],
            events
        );
    }

    #[test]
    fn empty_input_still_shuts_down() {
        let (snd, rcv) = unbounded();
        let mut source = JsonLines::new(
            Cursor::new(Vec::new()),
            vec![snd],
            JsonLinesConfig::default(),
        );
        source.run();

        assert_eq!(vec![Event::Shutdown], rcv.try_iter().collect::<Vec<Event>>());
    }
}
