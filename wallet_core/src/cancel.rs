//! Cooperative cancellation for in-flight builds.
//!
//! A [`CancelController`] owns a `tokio::sync::watch` channel. Builds hold
//! [`CancelToken`]s and race every backend call against them; once the
//! controller fires, pending and future calls fail with
//! [`BuildError::Cancelled`](crate::BuildError::Cancelled).

use tokio::sync::watch;

/// Triggers cancellation for every token it handed out.
#[derive(Debug)]
pub struct CancelController {
    tx: watch::Sender<bool>,
}

impl CancelController {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    /// Get a token observing this controller.
    pub fn token(&self) -> CancelToken {
        CancelToken {
            rx: self.tx.subscribe(),
        }
    }

    /// Cancel every build holding one of this controller's tokens.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for CancelController {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once cancelled. Never resolves if the controller is dropped
    /// without cancelling.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        if rx.wait_for(|cancelled| *cancelled).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
