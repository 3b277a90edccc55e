//! Per-call cancellation and deadlines
//!
//! A [`CallContext`] travels with every provider operation. Bulk operations
//! check it before each record and every HTTP round trip runs under
//! [`CallContext::run`], so a cancelled or expired context stops work both
//! before and during the in-flight request. Records already mutated by an
//! earlier step are not rolled back.
//!
//! ```rust,ignore
//! let (ctx, handle) = CallContext::cancellable();
//! let ctx = ctx.with_timeout(Duration::from_secs(10));
//!
//! tokio::spawn(async move {
//!     tokio::signal::ctrl_c().await.ok();
//!     handle.cancel();
//! });
//!
//! let records = provider.get_records(&ctx, "example.com").await?;
//! ```

use crate::error::{Error, Result};
use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

/// Cancellation signal and optional deadline for one logical operation
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    deadline: Option<Instant>,
    cancel: Option<watch::Receiver<bool>>,
}

/// Cancels every [`CallContext`] cloned from the one it was created with
///
/// Dropping the handle without calling [`CancelHandle::cancel`] leaves the
/// contexts running.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Signal cancellation
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

impl CallContext {
    /// A context that is never cancelled and has no deadline
    pub fn background() -> Self {
        Self::default()
    }

    /// A context that can be cancelled through the returned handle
    pub fn cancellable() -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        let ctx = Self {
            deadline: None,
            cancel: Some(rx),
        };
        (ctx, CancelHandle { tx })
    }

    /// Add a deadline `timeout` from now
    ///
    /// An earlier deadline already on the context is kept.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let deadline = Instant::now() + timeout;
        self.deadline = Some(match self.deadline {
            Some(existing) if existing < deadline => existing,
            _ => deadline,
        });
        self
    }

    /// The deadline, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// True once the handle has signalled cancellation
    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Fail if the context is already done
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(Error::Cancelled);
        }
        if let Some(deadline) = self.deadline
            && Instant::now() >= deadline
        {
            return Err(Error::DeadlineExceeded);
        }
        Ok(())
    }

    /// Run `fut` unless the context is cancelled or expires first
    ///
    /// The future is dropped as soon as the context finishes, which aborts an
    /// in-flight HTTP request.
    pub async fn run<F, T>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        self.check()?;

        let cancelled = async {
            match self.cancel.clone() {
                Some(rx) => wait_for_cancel(rx).await,
                None => std::future::pending::<()>().await,
            }
        };
        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = cancelled => Err(Error::Cancelled),
            _ = expired => Err(Error::DeadlineExceeded),
            out = fut => out,
        }
    }
}

async fn wait_for_cancel(mut rx: watch::Receiver<bool>) {
    loop {
        if *rx.borrow_and_update() {
            return;
        }
        if rx.changed().await.is_err() {
            // handle dropped without cancelling
            std::future::pending::<()>().await;
        }
    }
}
