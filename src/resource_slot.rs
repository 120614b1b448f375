//! Holder for the one resource a producer may register per subscription.

use std::fmt::{Debug, Formatter};

use parking_lot::Mutex;

use crate::{
  disposable::{BoxedDisposable, Disposable},
  state::StateCell,
};

/// Holds at most one [`Disposable`] on behalf of an emission gate.
///
/// The slot never stores anything once its gate is terminal. `set` follows a
/// store-then-verify protocol: the resource is stored first and the gate state
/// is checked afterwards. Together with the gate disposing the slot *after*
/// its terminal transition, one of the two sides always sees the other's
/// write, so a resource racing a terminal transition is disposed exactly once
/// and never left behind.
#[derive(Default)]
pub struct ResourceSlot {
  current: Mutex<Option<BoxedDisposable>>,
}

impl ResourceSlot {
  pub fn new() -> Self { Self::default() }

  /// Replace the held resource, disposing the previous one.
  ///
  /// If `state` is terminal, `resource` is disposed before this returns and
  /// is never reachable from the slot afterwards. `None` clears the slot.
  pub fn set(&self, resource: Option<BoxedDisposable>, state: &StateCell) {
    if state.get().is_terminal() {
      if let Some(resource) = resource {
        resource.dispose();
      }
      return;
    }

    let previous = std::mem::replace(&mut *self.current.lock(), resource);
    if let Some(previous) = previous {
      previous.dispose();
    }

    if state.get().is_terminal() {
      self.dispose_current();
    }
  }

  /// Dispose and clear the held resource. Idempotent.
  pub fn dispose_current(&self) {
    let current = self.current.lock().take();
    if let Some(current) = current {
      current.dispose();
    }
  }

  /// Returns `true` if a resource is currently held.
  pub fn is_occupied(&self) -> bool { self.current.lock().is_some() }
}

impl Drop for ResourceSlot {
  fn drop(&mut self) {
    if let Some(current) = self.current.get_mut().take() {
      current.dispose();
    }
  }
}

impl Debug for ResourceSlot {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ResourceSlot")
      .field("occupied", &self.is_occupied())
      .finish()
  }
}
