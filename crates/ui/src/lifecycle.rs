//! Page lifecycle and cancellation.
//!
//! Each booted page owns a [`PageLifecycle`]. Controller calls run through
//! [`PageLifecycle::run`]; once the page is torn down (navigation, logout)
//! pending calls resolve to [`Cancelled`] instead of reaching the view.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("page torn down")]
pub struct Cancelled;

#[derive(Clone)]
pub struct PageLifecycle {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for PageLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl PageLifecycle {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn token(&self) -> CancelToken {
        CancelToken { rx: self.tx.subscribe() }
    }

    /// Idempotent.
    pub fn teardown(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_torn_down(&self) -> bool {
        *self.tx.borrow()
    }

    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output, Cancelled> {
        if self.is_torn_down() {
            return Err(Cancelled);
        }
        let mut token = self.token();
        tokio::select! {
            biased;
            _ = token.cancelled() => Err(Cancelled),
            out = fut => Ok(out),
        }
    }
}

#[derive(Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves on teardown, or when the lifecycle itself is gone.
    pub async fn cancelled(&mut self) {
        let _ = self.rx.wait_for(|down| *down).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn completes_while_alive() {
        let lc = PageLifecycle::new();
        assert_eq!(lc.run(async { 7 }).await, Ok(7));
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_cancels_in_flight_call() {
        let lc = PageLifecycle::new();
        let remote = lc.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            remote.teardown();
        });
        let slow = lc.run(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            "stale"
        });
        assert_eq!(slow.await, Err(Cancelled));
        assert!(lc.token().is_cancelled());
        assert_eq!(lc.run(async { 1 }).await, Err(Cancelled));
    }
}
