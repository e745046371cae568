//! Per-call build options.

use std::future::Future;
use std::time::Duration;

use pchain_transactions::OutputOwners;
use pchain_types::Timestamp;

use crate::cancel::CancelToken;
use crate::error::BuildError;

/// Options for a single build call.
///
/// `Default` captures [`Timestamp::now`] once, so every lock in one build is
/// judged against the same instant.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Earliest time the transaction can be issued; locks are evaluated
    /// against it.
    pub min_issuance_time: Timestamp,
    /// Owner of change outputs. Defaults to a threshold-1 owner over the
    /// smallest controlled address.
    pub change_owner: Option<OutputOwners>,
    pub memo: Vec<u8>,
    pub cancel: Option<CancelToken>,
    /// Upper bound on each backend call.
    pub timeout: Option<Duration>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            min_issuance_time: Timestamp::now(),
            change_owner: None,
            memo: Vec::new(),
            cancel: None,
            timeout: None,
        }
    }
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_issuance_time(mut self, time: Timestamp) -> Self {
        self.min_issuance_time = time;
        self
    }

    pub fn with_change_owner(mut self, owner: OutputOwners) -> Self {
        self.change_owner = Some(owner);
        self
    }

    pub fn with_memo(mut self, memo: impl Into<Vec<u8>>) -> Self {
        self.memo = memo.into();
        self
    }

    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Run `fut` unless cancelled first or it outlives the timeout. The
    /// losing future is dropped, which aborts it.
    pub(crate) async fn guard<F: Future>(&self, fut: F) -> Result<F::Output, BuildError> {
        let cancelled = async {
            match &self.cancel {
                Some(token) => token.cancelled().await,
                None => std::future::pending::<()>().await,
            }
        };
        let bounded = async {
            match self.timeout {
                Some(after) => tokio::time::timeout(after, fut)
                    .await
                    .map_err(|_| BuildError::TimedOut { after }),
                None => Ok(fut.await),
            }
        };

        tokio::select! {
            biased;
            _ = cancelled => {
                tracing::warn!("backend call cancelled");
                Err(BuildError::Cancelled)
            }
            result = bounded => {
                if let Err(BuildError::TimedOut { after }) = &result {
                    tracing::warn!(?after, "backend call timed out");
                }
                result
            }
        }
    }
}
