//! Streams a few sample messages to a viewer.
//!
//! Usage: `femtoviewer_demo [host] [port]` (defaults to `127.0.0.1 50010`).

use std::{env, thread, time::Duration};

use femtoviewer::{FemtoViewerLogger, LogPart, PartKey};

fn main() {
    let mut args = env::args().skip(1);
    let host = args.next().unwrap_or_else(|| "127.0.0.1".to_owned());
    let port = match args.next().map(|raw| raw.parse::<u16>()) {
        Some(Ok(port)) => port,
        Some(Err(err)) => {
            eprintln!("invalid port: {err}");
            std::process::exit(2);
        }
        None => 50010,
    };

    let logger = FemtoViewerLogger::new(host, port);
    logger.log_text("helloworld");

    // Eight big-endian bytes 01..08, taken from an encoded Int64 part.
    match LogPart::int64_hex(PartKey::Message, "0x0102030405060708") {
        Ok(part) => logger.log_binary(&part.as_bytes()[2..]),
        Err(err) => eprintln!("{err}"),
    }

    for count in 0u64.. {
        thread::sleep(Duration::from_secs(2));
        logger.log_text(&format!("helloworld_{count}"));
    }
}
