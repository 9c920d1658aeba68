use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};

use crossbeam::channel::{self, Receiver, Sender};

/// Shared flag used to abort a blocking poll from another thread.
///
/// Cancelling wakes any thread currently inside [`CancelToken::sleep`]. A
/// single wake message is put on the channel and every woken sleeper puts it
/// back, so all current and future sleepers see it.
#[derive(Debug, Clone)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
    wake_tx: Sender<()>,
    wake_rx: Receiver<()>,
}

impl Default for CancelToken {
    fn default() -> Self {
        let (wake_tx, wake_rx) = channel::unbounded();
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            wake_tx,
            wake_rx,
        }
    }
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            // the token owns a receiver, so the channel is never disconnected
            let _ = self.wake_tx.send(());
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Sleep for `duration` or until cancelled. Returns true if cancelled.
    ///
    /// A duration too large to form a deadline sleeps until cancelled.
    pub fn sleep(&self, duration: Duration) -> bool {
        if self.is_cancelled() {
            return true;
        }

        let woken = match Instant::now().checked_add(duration) {
            Some(deadline) => self.wake_rx.recv_deadline(deadline).is_ok(),
            None => self.wake_rx.recv().is_ok(),
        };
        if woken {
            let _ = self.wake_tx.send(());
        }

        self.is_cancelled()
    }
}
