use crate::cancel::CancellationSignal;
use crossbeam::channel::Receiver;
use crossbeam::select;
use tracing::{debug, info};

/// Deliver pipeline output to `on_value` on the calling thread.
///
/// Returns once `cancel` is raised or the output closes, with the number of
/// values delivered. Values are never delivered after cancellation has been
/// observed.
pub fn consume<F>(cancel: &CancellationSignal, output: &Receiver<i64>, mut on_value: F) -> u64
where
    F: FnMut(i64),
{
    let mut delivered = 0;
    loop {
        select! {
            recv(output) -> msg => {
                let Ok(value) = msg else { break };
                if cancel.is_cancelled() {
                    break;
                }
                debug!(value, "value processed");
                on_value(value);
                delivered += 1;
            }
            recv(cancel.receiver()) -> _ => break,
        }
    }
    info!(delivered, "sink stopped");
    delivered
}
