//! Cooperative stop signal for the generation loop.
//!
//! The loop checks the signal between cycles only; a cycle that has started
//! always runs until both paths finish.

use tokio::sync::watch;

/// Create a connected handle/signal pair.
pub fn stop_signal() -> (StopHandle, StopSignal) {
    let (tx, rx) = watch::channel(false);
    (StopHandle(tx), StopSignal(rx))
}

/// Triggers shutdown of every [`StopSignal`] cloned from the same pair.
#[derive(Debug)]
pub struct StopHandle(watch::Sender<bool>);

impl StopHandle {
    /// Request a stop. Idempotent.
    pub fn stop(&self) {
        self.0.send_replace(true);
    }
}

/// Observes a [`StopHandle`].
#[derive(Debug, Clone)]
pub struct StopSignal(watch::Receiver<bool>);

impl StopSignal {
    /// A signal that never fires.
    pub fn never() -> Self {
        let (_, signal) = stop_signal();
        signal
    }

    /// Whether a stop has been requested.
    pub fn is_stopped(&self) -> bool {
        *self.0.borrow()
    }

    /// Resolves once a stop is requested.
    ///
    /// If the handle is dropped without stopping, nobody can stop us any
    /// more and this never resolves.
    pub async fn stopped(&mut self) {
        let closed = self.0.wait_for(|stopped| *stopped).await.is_err();
        if closed {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn stop_wakes_waiter() {
        let (handle, mut signal) = stop_signal();
        assert!(!signal.is_stopped());

        handle.stop();
        signal.stopped().await;
        assert!(signal.is_stopped());
    }

    #[tokio::test]
    async fn clones_observe_same_stop() {
        let (handle, signal) = stop_signal();
        let other = signal.clone();

        handle.stop();
        handle.stop();
        assert!(signal.is_stopped());
        assert!(other.is_stopped());
    }

    #[tokio::test(start_paused = true)]
    async fn never_does_not_fire() {
        let mut signal = StopSignal::never();

        let fired = tokio::time::timeout(Duration::from_secs(60), signal.stopped()).await;
        assert!(fired.is_err());
        assert!(!signal.is_stopped());
    }
}
