//! SingleEmitter: the producer-facing facade of a subscription.

use std::{
  fmt::{Debug, Formatter},
  sync::Arc,
};

use crate::{
  disposable::{BoxedDisposable, ClosureDisposable, Disposable},
  emission_gate::Gate,
};

/// Handle a producer uses to deliver one outcome and to register the resource
/// that cancellation must release.
///
/// The emitter carries no state of its own: every call goes straight to the
/// subscription's gate. It is cheap to clone and safe to call from any number
/// of threads; only the first effective `on_success` / `on_error` is
/// observable.
pub struct SingleEmitter<Item, Err> {
  gate: Arc<dyn Gate<Item, Err>>,
}

impl<Item, Err> Clone for SingleEmitter<Item, Err> {
  fn clone(&self) -> Self { Self { gate: self.gate.clone() } }
}

impl<Item, Err> SingleEmitter<Item, Err> {
  pub fn new(gate: Arc<dyn Gate<Item, Err>>) -> Self { Self { gate } }

  /// Deliver the success value. Returns `false` if the subscription already
  /// terminated, in which case `value` is dropped.
  #[inline]
  pub fn on_success(&self, value: Item) -> bool { self.gate.try_succeed(value) }

  /// Deliver the error. Returns `false` if the subscription already
  /// terminated; see [`EmissionGate::try_fail`] for where `err` goes then.
  ///
  /// [`EmissionGate::try_fail`]: crate::emission_gate::EmissionGate::try_fail
  #[inline]
  pub fn on_error(&self, err: Err) -> bool { self.gate.try_fail(err) }

  /// Make `resource` the subscription's current resource, disposing the
  /// previous one. To only dispose the current one, use
  /// [`clear_resource`](Self::clear_resource).
  ///
  /// If the subscription already terminated, `resource` is disposed before
  /// this returns.
  pub fn set_resource<D>(&self, resource: Option<D>)
  where
    D: Disposable + Send + Sync + 'static,
  {
    self
      .gate
      .set_resource(resource.map(|d| -> BoxedDisposable { Box::new(d) }))
  }

  /// Register a closure to run on cancellation (or on termination), replacing
  /// the current resource.
  pub fn set_cancellation<F>(&self, f: F)
  where
    F: FnOnce() + Send + 'static,
  {
    self.set_resource(Some(ClosureDisposable::new(f)))
  }

  /// Dispose and clear the current resource.
  pub fn clear_resource(&self) { self.gate.set_resource(None) }

  /// `true` once the subscription reached any terminal state, including
  /// cancellation. Long-running producers can poll this to stop early.
  #[inline]
  pub fn is_disposed(&self) -> bool { self.gate.is_terminal() }
}

impl<Item, Err> Debug for SingleEmitter<Item, Err> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SingleEmitter")
      .field("state", &self.gate.state())
      .finish()
  }
}
