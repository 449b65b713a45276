//! Outcome delivery channels.
//!
//! Sync events hand back the result directly. Async events hand back a
//! [`Pending`] future that is already complete: no work is scheduled, but
//! callers get a handle they can `.await` or chain with `futures-util`
//! combinators, exactly like the non-blocking collaborator being replaced.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::future::FusedFuture;
use storyline_domain::{DeliveryMode, StoryError, Value};

/// Deferred outcome of an async event.
///
/// The outcome is settled on creation, so the handle can be polled any
/// number of times and still be taken apart with [`Pending::into_result`].
#[derive(Debug, Clone)]
#[must_use = "pending outcomes do nothing unless awaited"]
pub struct Pending(Result<Value, StoryError>);

impl Pending {
    pub fn resolved(value: Value) -> Self {
        Self(Ok(value))
    }

    pub fn rejected(error: StoryError) -> Self {
        Self(Err(error))
    }

    pub(crate) fn settled(result: Result<Value, StoryError>) -> Self {
        Self(result)
    }

    /// Takes the outcome without awaiting.
    pub fn into_result(self) -> Result<Value, StoryError> {
        self.0
    }
}

impl Future for Pending {
    type Output = Result<Value, StoryError>;

    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Self::Output> {
        Poll::Ready(self.0.clone())
    }
}

impl FusedFuture for Pending {
    // Settled outcomes stay available after completion
    fn is_terminated(&self) -> bool {
        false
    }
}

/// Outcome of a replayed call, shaped by the event's [`DeliveryMode`].
#[derive(Debug)]
pub enum Delivery {
    /// Sync event: the value or the error, right now
    Immediate(Result<Value, StoryError>),
    /// Async event: a completed deferred handle
    Deferred(Pending),
}

impl Delivery {
    pub(crate) fn settle(mode: DeliveryMode, result: Result<Value, StoryError>) -> Self {
        match mode {
            DeliveryMode::Sync => Self::Immediate(result),
            DeliveryMode::Async => Self::Deferred(Pending::settled(result)),
        }
    }

    pub fn mode(&self) -> DeliveryMode {
        match self {
            Self::Immediate(_) => DeliveryMode::Sync,
            Self::Deferred(_) => DeliveryMode::Async,
        }
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }

    /// The outcome itself, whichever channel carried it.
    pub fn into_result(self) -> Result<Value, StoryError> {
        match self {
            Self::Immediate(result) => result,
            Self::Deferred(pending) => pending.into_result(),
        }
    }

    /// The outcome as a deferred handle, whichever channel carried it.
    pub fn into_pending(self) -> Pending {
        match self {
            Self::Immediate(result) => Pending::settled(result),
            Self::Deferred(pending) => pending,
        }
    }
}
