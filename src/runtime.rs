//! Runtime abstraction layer for async operations
//!
//! Timers and fire-and-forget tasks go through here so the rest of the crate
//! does not depend on a particular executor.

use futures::Future;
use std::time::Duration;

/// Handle to a spawned async task
pub trait AsyncHandle: Send + Sync {
    /// Check if the task is finished
    fn is_finished(&self) -> bool;

    /// Cancel the task
    fn cancel(&self);
}

#[cfg(feature = "tokio-runtime")]
struct TokioHandle(tokio::task::JoinHandle<()>);

#[cfg(feature = "tokio-runtime")]
impl AsyncHandle for TokioHandle {
    fn is_finished(&self) -> bool {
        self.0.is_finished()
    }

    fn cancel(&self) {
        self.0.abort();
    }
}

/// Spawn a future on the current tokio runtime
#[cfg(feature = "tokio-runtime")]
pub fn spawn<F>(future: F) -> Box<dyn AsyncHandle>
where
    F: Future<Output = ()> + Send + 'static,
{
    log::trace!("spawning async task");
    Box::new(TokioHandle(tokio::spawn(future)))
}

/// Wait for `duration` without blocking the executor.
///
/// A zero duration completes immediately.
pub async fn delay(duration: Duration) {
    if duration.is_zero() {
        return;
    }

    #[cfg(feature = "tokio-runtime")]
    {
        tokio::time::sleep(duration).await;
    }

    #[cfg(not(feature = "tokio-runtime"))]
    {
        let (tx, rx) = futures::channel::oneshot::channel::<()>();
        std::thread::spawn(move || {
            std::thread::sleep(duration);
            let _ = tx.send(());
        });
        let _ = rx.await;
    }
}
