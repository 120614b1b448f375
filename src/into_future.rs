//! Bridge from a [`Single`] to a [`Future`].
//!
//! ## Behavior
//!
//! - **Success**: the future resolves with `Ok(Ok(value))`
//! - **Error**: the future resolves with `Ok(Err(error))`
//! - **Abandoned**: if every emitter is dropped without an outcome, the future
//!   resolves with `Err(IntoFutureError::Abandoned)`
//!
//! Dropping an unresolved [`SingleFuture`] cancels its subscription.
//!
//! ```rust
//! use rxsingle::prelude::*;
//!
//! # futures::executor::block_on(async {
//! let value = just::<_, String>(42).into_future().await;
//! assert_eq!(value, Ok(Ok(42)));
//! # });
//! ```

use std::{
  fmt::Debug,
  future::Future,
  pin::Pin,
  task::{Context, Poll},
};

use futures::channel::oneshot;
use pin_project_lite::pin_project;

use crate::{
  disposable::DisposeGuard,
  emitter::SingleEmitter,
  error::IntoFutureError,
  observer::SingleObserver,
  single::{ProducerResult, Single},
  subscription::Subscription,
};

/// The result type of [`SingleFuture`].
///
/// - `Ok(Ok(value))` - the single succeeded
/// - `Ok(Err(error))` - the single failed
/// - `Err(IntoFutureError::Abandoned)` - the single produced nothing
pub type IntoFutureResult<Item, Err> = Result<Result<Item, Err>, IntoFutureError>;

// ============================================================================
// SingleFuture
// ============================================================================

pin_project! {
  /// A future that resolves with the outcome of a single.
  pub struct SingleFuture<Item, Err> {
    #[pin]
    receiver: oneshot::Receiver<Result<Item, Err>>,
    guard: DisposeGuard<Subscription>,
  }
}

impl<Item, Err> Future for SingleFuture<Item, Err> {
  type Output = IntoFutureResult<Item, Err>;

  fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
    self
      .project()
      .receiver
      .poll(cx)
      .map(|outcome| outcome.map_err(|_canceled| IntoFutureError::Abandoned))
  }
}

// ============================================================================
// IntoFutureObserver
// ============================================================================

/// Observer that hands the outcome to a [`SingleFuture`].
pub struct IntoFutureObserver<Item, Err> {
  sender: oneshot::Sender<Result<Item, Err>>,
}

impl<Item, Err> SingleObserver<Item, Err> for IntoFutureObserver<Item, Err> {
  // A dropped receiver means the future is gone and the subscription is being
  // cancelled anyway, so a failed send is ignored.
  fn on_success(self, value: Item) { let _ = self.sender.send(Ok(value)); }

  fn on_error(self, err: Err) { let _ = self.sender.send(Err(err)); }
}

// ============================================================================
// Single adapters
// ============================================================================

impl<F, R, Item, Err> Single<F, Item, Err>
where
  F: Fn(SingleEmitter<Item, Err>) -> R,
  R: ProducerResult<Err>,
  Item: Send + 'static,
  Err: Debug + Send + 'static,
{
  /// Subscribe and return a future of the outcome.
  pub fn into_future(&self) -> SingleFuture<Item, Err> {
    let (sender, receiver) = oneshot::channel();
    let subscription = self.subscribe(IntoFutureObserver { sender });
    SingleFuture { receiver, guard: subscription.unsubscribe_when_dropped() }
  }

  /// Subscribe and block the current thread until the outcome arrives.
  ///
  /// Deadlocks if the outcome can only be produced by the current thread
  /// after this returns.
  pub fn blocking_get(&self) -> IntoFutureResult<Item, Err> {
    futures::executor::block_on(self.into_future())
  }
}
