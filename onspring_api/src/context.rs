//! Cancellation and deadline scope for API calls.
//!
//! Every endpoint method takes an `Option<&Context>`. Passing `None` is
//! rejected with [`Error::Configuration`] before any request is built.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::Error;

/// Cancellation token plus optional deadline observed by a single call.
///
/// Cloning a `Context` shares the same token, so cancelling any clone
/// cancels them all.
#[derive(Clone, Debug, Default)]
pub struct Context {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Context {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    /// A context whose deadline is `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// A context that expires at `deadline`.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: Some(deadline),
        }
    }

    /// A context driven by an existing cancellation token.
    pub fn with_cancellation(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Derives a context that is cancelled with this one but can also be
    /// cancelled on its own. The deadline is inherited.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    /// Cancels this context and every child derived from it.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether this context or one of its ancestors was cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Instant after which calls fail with [`Error::DeadlineExceeded`].
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Token observed by calls made with this context.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.token
    }

    /// Drives `fut` to completion unless the context is cancelled or its
    /// deadline passes first, in which case `fut` is dropped.
    pub(crate) async fn run<F>(&self, fut: F) -> Result<F::Output, Error>
    where
        F: Future,
    {
        if self.token.is_cancelled() {
            return Err(Error::Cancelled);
        }
        if self.deadline.is_some_and(|deadline| deadline <= Instant::now()) {
            return Err(Error::DeadlineExceeded);
        }

        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(Error::Cancelled),
            _ = expired => Err(Error::DeadlineExceeded),
            output = fut => Ok(output),
        }
    }
}
