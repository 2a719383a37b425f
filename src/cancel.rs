use crossbeam::channel::{self, Receiver, Sender};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// One-shot broadcast cancellation shared by every worker of a pipeline run.
///
/// Raising is idempotent. Every clone observes it, either by polling
/// [`is_cancelled`](Self::is_cancelled) or by waiting on [`receiver`](Self::receiver)
/// inside a `select!`: the receiver never yields a message and disconnects
/// once the signal is raised, which makes it ready for all holders at once.
#[derive(Debug, Clone)]
pub struct CancellationSignal {
    raised: Arc<AtomicBool>,
    trigger: Arc<Mutex<Option<Sender<()>>>>,
    listener: Receiver<()>,
}

impl CancellationSignal {
    pub fn new() -> Self {
        let (tx, rx) = channel::bounded(0);
        Self {
            raised: Arc::new(AtomicBool::new(false)),
            trigger: Arc::new(Mutex::new(Some(tx))),
            listener: rx,
        }
    }

    /// Raise the signal. Returns `true` only for the call that raised it.
    pub fn cancel(&self) -> bool {
        let sender = self.trigger.lock().take();
        match sender {
            Some(tx) => {
                self.raised.store(true, Ordering::SeqCst);
                drop(tx);
                true
            }
            None => false,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
    }

    /// Receiver that becomes ready (disconnected) once the signal is raised
    pub fn receiver(&self) -> &Receiver<()> {
        &self.listener
    }
}

impl Default for CancellationSignal {
    fn default() -> Self {
        Self::new()
    }
}
