//! Cooperative cancellation for collection runs.
//!
//! Built on a `tokio::sync::watch` channel carrying a single `bool`. The
//! pipeline checks the flag between search pages, between entities and
//! between review classifications. A request already in flight is allowed
//! to finish.

use tokio::sync::watch;

/// Sending half: call [`CancelHandle::cancel`] to stop a run.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

/// Receiving half handed to the pipeline.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

/// Creates a connected handle/signal pair, initially not cancelled.
#[must_use]
pub fn cancel_pair() -> (CancelHandle, CancelSignal) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelSignal { rx })
}

impl CancelHandle {
    pub fn cancel(&self) {
        // `send_replace` succeeds even when every signal has been dropped.
        self.tx.send_replace(true);
    }
}

impl CancelSignal {
    /// A signal that never fires.
    #[must_use]
    pub fn never() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self { rx }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    pub(crate) fn receiver(&self) -> &watch::Receiver<bool> {
        &self.rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_starts_uncancelled() {
        let (_handle, signal) = cancel_pair();
        assert!(!signal.is_cancelled());
    }

    #[test]
    fn cancel_is_visible_to_every_clone() {
        let (handle, signal) = cancel_pair();
        let other = signal.clone();
        handle.cancel();
        assert!(signal.is_cancelled());
        assert!(other.is_cancelled());
    }

    #[test]
    fn never_signal_stays_uncancelled() {
        assert!(!CancelSignal::never().is_cancelled());
    }
}
