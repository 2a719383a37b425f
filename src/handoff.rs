//! Synchronous value hand-off between workers.
//!
//! Stages are connected by zero-capacity channels: a send completes only when
//! the downstream worker takes the value. This rendezvous is the only
//! back-pressure in the pipeline.

use crate::cancel::CancellationSignal;
use crossbeam::channel::{self, Receiver, Sender};
use crossbeam::select;

/// Create a rendezvous channel for one stage-to-stage link
pub fn channel() -> (Sender<i64>, Receiver<i64>) {
    channel::bounded(0)
}

/// Block until `value` is accepted downstream or `cancel` is raised.
///
/// Returns `false` when the caller should stop: the signal was raised, or the
/// receiving side has gone away. Nothing is sent once cancellation has been
/// observed.
pub fn forward(cancel: &CancellationSignal, out: &Sender<i64>, value: i64) -> bool {
    if cancel.is_cancelled() {
        return false;
    }
    select! {
        send(out, value) -> res => res.is_ok(),
        recv(cancel.receiver()) -> _ => false,
    }
}
