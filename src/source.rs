use crate::cancel::CancellationSignal;
use crate::error::{PipelineError, Result};
use crate::handoff;
use crossbeam::channel::{Receiver, Sender};
use std::io::BufRead;
use std::thread;
use tracing::{info, warn};

/// Keyword that ends input, compared case-insensitively
pub const EXIT_COMMAND: &str = "exit";

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Value(i64),
    Exit,
    Blank,
    Invalid(String),
}

/// Classify a single line of text input
pub fn parse_line(line: &str) -> Line {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        Line::Blank
    } else if trimmed.eq_ignore_ascii_case(EXIT_COMMAND) {
        Line::Exit
    } else {
        match trimmed.parse::<i64>() {
            Ok(v) => Line::Value(v),
            Err(_) => Line::Invalid(trimmed.to_string()),
        }
    }
}

/// Reads integers line by line from a text reader on its own thread.
///
/// The source owns the run's [`CancellationSignal`] and raises it when it sees
/// the exit keyword, reaches end of input, fails to read, or finds the
/// pipeline no longer listening.
pub struct LineSource;

impl LineSource {
    /// Start reading and return the value stream and the cancellation signal
    pub fn spawn<R>(reader: R) -> Result<(Receiver<i64>, CancellationSignal)>
    where
        R: BufRead + Send + 'static,
    {
        let cancel = CancellationSignal::new();
        let (tx, rx) = handoff::channel();
        let worker_cancel = cancel.clone();

        thread::Builder::new()
            .name("line-source".into())
            .spawn(move || {
                if let Err(e) = read_lines(reader, &tx) {
                    warn!(error = %e, "input source failed");
                }
                worker_cancel.cancel();
            })
            .map_err(|e| PipelineError::Spawn(e.to_string()))?;

        Ok((rx, cancel))
    }
}

fn read_lines<R: BufRead>(reader: R, tx: &Sender<i64>) -> Result<()> {
    for line in reader.lines() {
        match parse_line(&line?) {
            Line::Value(v) => {
                if tx.send(v).is_err() {
                    info!("pipeline closed its input");
                    return Ok(());
                }
            }
            Line::Exit => {
                info!("exit requested");
                return Ok(());
            }
            Line::Blank => {}
            Line::Invalid(text) => warn!(input = %text, "only integers are accepted"),
        }
    }
    info!("end of input");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line(" 12 "), Line::Value(12));
        assert_eq!(parse_line("-5"), Line::Value(-5));
        assert_eq!(parse_line("EXIT"), Line::Exit);
        assert_eq!(parse_line(""), Line::Blank);
        assert_eq!(parse_line("1.5"), Line::Invalid("1.5".into()));
        assert_eq!(parse_line("abc"), Line::Invalid("abc".into()));
    }

    #[test]
    fn test_source_stops_at_exit() {
        let input = Cursor::new("1\nfoo\n-2\n\nExit\n3\n");
        let (rx, cancel) = LineSource::spawn(input).unwrap();
        let values: Vec<i64> = rx.iter().collect();
        assert_eq!(values, vec![1, -2]);
        assert!(cancel.is_cancelled());
    }

    #[test]
    fn test_source_cancels_at_end_of_input() {
        let (rx, cancel) = LineSource::spawn(Cursor::new("7\n")).unwrap();
        assert_eq!(rx.recv().unwrap(), 7);
        assert!(rx.recv().is_err());
        assert!(cancel.is_cancelled());
    }
}
