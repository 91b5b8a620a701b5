//! Trailing-edge debounce for input handlers.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;

type Handler<T> = Arc<dyn Fn(T) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

/// One timer per call site. Every [`call`](Debouncer::call) restarts the
/// window; when it elapses the handler runs once with the latest value.
/// A handler that has started is left to finish even if new calls arrive.
pub struct Debouncer<T> {
    wait: Duration,
    handler: Handler<T>,
    timer: Mutex<Option<JoinHandle<()>>>,
    last_run: Arc<Mutex<Option<JoinHandle<()>>>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F, Fut>(wait: Duration, handler: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            wait,
            handler: Arc::new(move |v| -> Pin<Box<dyn Future<Output = ()> + Send>> { Box::pin(handler(v)) }),
            timer: Mutex::new(None),
            last_run: Arc::new(Mutex::new(None)),
        }
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }

    pub fn call(&self, value: T) {
        let mut timer = lock(&self.timer);
        if let Some(prev) = timer.take() {
            prev.abort();
        }
        let handler = Arc::clone(&self.handler);
        let last_run = Arc::clone(&self.last_run);
        let wait = self.wait;
        *timer = Some(tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            // detached so the next call's abort cannot reach it
            let run = tokio::spawn(handler(value));
            *lock(&last_run) = Some(run);
        }));
    }

    /// Drop a pending call without running it.
    pub fn cancel(&self) {
        if let Some(prev) = lock(&self.timer).take() {
            prev.abort();
        }
    }

    /// Wait until the pending call (if any) has fired and its handler
    /// has returned.
    pub async fn flush(&self) {
        let pending = lock(&self.timer).take();
        if let Some(timer) = pending {
            let _ = timer.await;
        }
        let running = lock(&self.last_run).take();
        if let Some(run) = running {
            let _ = run.await;
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(prev) = lock(&self.timer).take() {
            prev.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn channel_debouncer(wait_ms: u64) -> (Debouncer<&'static str>, mpsc::UnboundedReceiver<&'static str>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let d = Debouncer::new(Duration::from_millis(wait_ms), move |v| {
            let tx = tx.clone();
            async move {
                let _ = tx.send(v);
            }
        });
        (d, rx)
    }

    #[tokio::test(start_paused = true)]
    async fn burst_collapses_to_last_value() {
        let (d, mut rx) = channel_debouncer(500);
        for q in ["O", "O+", "O-", "O+"] {
            d.call(q);
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert_eq!(rx.recv().await, Some("O+"));
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn calls_further_apart_than_the_window_each_fire() {
        let (d, mut rx) = channel_debouncer(500);
        d.call("A");
        tokio::time::sleep(Duration::from_millis(600)).await;
        d.call("B");
        assert_eq!(rx.recv().await, Some("A"));
        assert_eq!(rx.recv().await, Some("B"));
    }

    #[tokio::test(start_paused = true)]
    async fn running_handler_is_not_cancelled() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let d = Debouncer::new(Duration::from_millis(100), move |v: u32| {
            let tx = tx.clone();
            async move {
                tokio::time::sleep(Duration::from_millis(1000)).await;
                let _ = tx.send(v);
            }
        });
        d.call(1);
        tokio::time::sleep(Duration::from_millis(200)).await;
        // first handler is mid-flight now
        d.call(2);
        assert_eq!(rx.recv().await, Some(1));
        assert_eq!(rx.recv().await, Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_and_flush() {
        let (d, mut rx) = channel_debouncer(500);
        d.call("dropped");
        d.cancel();
        d.call("kept");
        d.flush().await;
        assert_eq!(rx.try_recv().ok(), Some("kept"));
        assert!(rx.try_recv().is_err());
    }
}
