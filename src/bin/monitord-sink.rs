#![allow(unknown_lints)]

extern crate chrono;
extern crate crossbeam_channel;
extern crate fern;
extern crate monitord_sink;

#[macro_use]
extern crate log;

use chrono::Utc;
use monitord_sink::config;
use monitord_sink::delivery;
use monitord_sink::sink::{Monitord, Sink};
use monitord_sink::source::{JsonLines, JsonLinesConfig, Source};
use std::io;
use std::process;
use std::thread;

fn main() {
    let cli = config::parse_args();

    let level = match cli.verbose {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        3 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    // stdout carries records, logs go to stderr
    let logging = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}][{}][{}] {}",
                record.module_path().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                Utc::now().to_rfc3339(),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(io::stderr())
        .apply();
    if let Err(e) = logging {
        eprintln!("could not set up logging: {}", e);
        process::exit(1);
    }

    let args = match config::read_config_file(&cli.config_file, cli.verbose) {
        Ok(args) => args,
        Err(e) => {
            error!("{}: {}", cli.config_file.display(), e);
            process::exit(1);
        }
    };

    info!("monitord-sink - {}", args.version);
    info!(
        "[{}] records bound for {}",
        args.monitord.config_path, args.monitord.uri
    );

    let (event_snd, event_rcv) = crossbeam_channel::unbounded();
    let (record_snd, record_rcv) = crossbeam_channel::unbounded();

    let sink = Monitord::new(args.monitord, record_snd);
    let sink_worker = thread::spawn(move || {
        sink.run(event_rcv);
    });

    let delivery_worker = thread::spawn(move || {
        let stdout = io::stdout();
        let mut stream = delivery::Stream::new(stdout.lock());
        match stream.run(record_rcv) {
            Ok(total) => info!("delivery finished, {} records written", total),
            Err(e) => error!(
                "delivery failed after {} records: {}",
                stream.written(),
                e
            ),
        }
    });

    let stdin = io::stdin();
    let mut source = JsonLines::new(stdin.lock(), vec![event_snd], JsonLinesConfig::default());
    source.run();

    if sink_worker.join().is_err() {
        error!("sink worker panicked");
        process::exit(1);
    }
    if delivery_worker.join().is_err() {
        error!("delivery worker panicked");
        process::exit(1);
    }
}
