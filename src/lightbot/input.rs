use std::io::BufRead;
use std::thread;

use log::{debug, error, warn};
use tokio::sync::mpsc;

const LINE_BUFFER: usize = 16;

/// Reads `reader` line by line on its own thread.
///
/// A blocking read never holds up the runtime, so the process can exit on a signal while the
/// user is still typing. Lines that are not valid UTF-8 are passed on lossily.
pub fn spawn_line_reader(reader: impl BufRead + Send + 'static) -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(LINE_BUFFER);
    thread::spawn(move || {
        for line in reader.split(b'\n') {
            let line = match line {
                Ok(line) => decode_line(line),
                Err(e) => {
                    error!("Cannot read input: {e}");
                    break;
                }
            };
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
        debug!("Input closed");
    });
    rx
}

fn decode_line(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(line) => line,
        Err(e) => {
            let line = String::from_utf8_lossy(e.as_bytes()).into_owned();
            warn!("Input line is not valid UTF-8: {line:?}");
            line
        }
    }
}
