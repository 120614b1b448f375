//! Subscription: the consumer's handle for cancelling a single.

use std::{
  fmt::{Debug, Formatter},
  sync::Weak,
};

use crate::{
  disposable::{Disposable, DisposeGuard},
  emission_gate::GateControl,
  state::GateState,
};

/// Handle returned from [`Single::subscribe`](crate::single::Single::subscribe)
/// that lets the consumer abandon interest.
///
/// It holds only a weak reference to the subscription's gate: disposing it
/// requests cancellation, it never keeps the gate alive and never touches the
/// gate's state directly. Clones refer to the same subscription.
#[derive(Clone)]
pub struct Subscription {
  gate: Weak<dyn GateControl>,
}

impl Subscription {
  pub(crate) fn new(gate: Weak<dyn GateControl>) -> Self { Self { gate } }

  /// State of the subscription, or `None` once the gate is gone.
  pub fn state(&self) -> Option<GateState> { self.gate.upgrade().map(|gate| gate.state()) }

  /// Activates "RAII" behavior for this subscription: the subscription is
  /// cancelled as soon as the returned guard goes out of scope.
  ///
  /// **Attention:** If you don't assign the return value to a variable, the
  /// subscription is cancelled immediately, which is probably not what you
  /// want!
  pub fn unsubscribe_when_dropped(self) -> DisposeGuard<Self> { DisposeGuard::new(self) }
}

impl Disposable for Subscription {
  /// Cancel the subscription. A no-op once an outcome was delivered.
  fn dispose(&self) {
    if let Some(gate) = self.gate.upgrade() {
      gate.cancel();
    }
  }

  fn is_disposed(&self) -> bool {
    self
      .gate
      .upgrade()
      .is_none_or(|gate| gate.is_terminal())
  }
}

impl Debug for Subscription {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Subscription")
      .field("state", &self.state())
      .finish()
  }
}
