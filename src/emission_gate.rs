//! EmissionGate: the at-most-once state machine behind every subscription
//!
//! A gate owns the subscription's [`StateCell`], its [`ResourceSlot`] and the
//! downstream observer. `try_succeed`, `try_fail` and `cancel` all race on one
//! compare-and-swap out of `Pending`; the winner disposes the slot and (for
//! success and error) hands the outcome to the observer, inline, on its own
//! thread. Losers see a terminal state and return `false`.
//!
//! The observer is moved out of the gate by the winner, so the gate keeps no
//! reference to it once terminal.

use std::{fmt::Debug, marker::PhantomData, sync::Arc};

use parking_lot::Mutex;

use crate::{
  disposable::BoxedDisposable,
  error::UndeliverableError,
  hooks::{route_undeliverable, ErrorHook},
  observer::SingleObserver,
  resource_slot::ResourceSlot,
  state::{GateState, StateCell},
};

// ============================================================================
// Object-safe gate traits
// ============================================================================

/// The item-agnostic part of a gate: what a consumer handle may do.
pub trait GateControl: Send + Sync {
  /// Try to move `Pending -> Cancelled`. Returns `true` if this call won.
  fn cancel(&self) -> bool;

  fn state(&self) -> GateState;

  #[inline]
  fn is_terminal(&self) -> bool { self.state().is_terminal() }
}

/// Everything a producer may do to a gate.
///
/// This is what [`SingleEmitter`](crate::emitter::SingleEmitter) erases the
/// observer type behind.
pub trait Gate<Item, Err>: GateControl {
  fn try_succeed(&self, value: Item) -> bool;

  fn try_fail(&self, err: Err) -> bool;

  fn set_resource(&self, resource: Option<BoxedDisposable>);
}

// ============================================================================
// EmissionGate
// ============================================================================

pub struct EmissionGate<O, Item, Err> {
  state: StateCell,
  observer: Mutex<Option<O>>,
  slot: ResourceSlot,
  hook: Option<Arc<dyn ErrorHook>>,
  _marker: PhantomData<fn(Item, Err)>,
}

impl<O, Item, Err> EmissionGate<O, Item, Err> {
  /// A pending gate with no observer attached yet.
  ///
  /// `hook` overrides the process-wide undeliverable-error hook for this gate.
  pub fn new(hook: Option<Arc<dyn ErrorHook>>) -> Self {
    Self {
      state: StateCell::new(),
      observer: Mutex::new(None),
      slot: ResourceSlot::new(),
      hook,
      _marker: PhantomData,
    }
  }

  pub fn with_observer(observer: O, hook: Option<Arc<dyn ErrorHook>>) -> Self {
    let gate = Self::new(hook);
    *gate.observer.lock() = Some(observer);
    gate
  }

  /// Attach the downstream observer.
  ///
  /// Must happen before anything can call `try_succeed` / `try_fail`. If the
  /// gate was cancelled in the meantime the observer is dropped instead.
  pub fn attach(&self, observer: O) {
    *self.observer.lock() = Some(observer);
    if self.state.get().is_terminal() {
      let _abandoned = self.observer.lock().take();
    }
  }

  #[inline]
  pub fn state(&self) -> GateState { self.state.get() }

  #[inline]
  pub fn is_terminal(&self) -> bool { self.state.get().is_terminal() }

  /// Try to move `Pending -> Cancelled`.
  ///
  /// On success the held resource is disposed and the observer released
  /// without any notification. A no-op once an outcome was delivered.
  pub fn cancel(&self) -> bool {
    if !self.state.terminate(GateState::Cancelled) {
      return false;
    }
    tracing::trace!(state = ?GateState::Cancelled, "gate terminated");
    self.slot.dispose_current();
    let _released = self.observer.lock().take();
    true
  }

  /// Register the producer's resource; see [`ResourceSlot::set`].
  #[inline]
  pub fn set_resource(&self, resource: Option<BoxedDisposable>) {
    self.slot.set(resource, &self.state)
  }

  /// Winner's side of a terminal transition: release the resource and take
  /// the observer out.
  fn finish(&self, state: GateState) -> Option<O> {
    tracing::trace!(state = ?state, "gate terminated");
    self.slot.dispose_current();
    self.observer.lock().take()
  }
}

impl<O, Item, Err> EmissionGate<O, Item, Err>
where
  O: SingleObserver<Item, Err>,
  Err: Debug + Send + 'static,
{
  /// Try to move `Pending -> Succeeded` and deliver `value`.
  ///
  /// Exactly one racing call across `try_succeed`, `try_fail` and `cancel`
  /// returns `true`.
  pub fn try_succeed(&self, value: Item) -> bool {
    if !self.state.terminate(GateState::Succeeded) {
      return false;
    }
    if let Some(observer) = self.finish(GateState::Succeeded) {
      observer.on_success(value);
    }
    true
  }

  /// Try to move `Pending -> Errored` and deliver `err`.
  ///
  /// If the gate already succeeded or errored, `err` goes to the
  /// undeliverable-error hook. If it was cancelled, `err` is dropped.
  pub fn try_fail(&self, err: Err) -> bool {
    if self.state.terminate(GateState::Errored) {
      if let Some(observer) = self.finish(GateState::Errored) {
        observer.on_error(err);
      }
      return true;
    }

    match self.state.get() {
      GateState::Cancelled => {
        tracing::debug!(error = ?err, "error dropped: the single was cancelled");
      }
      _ => route_undeliverable(self.hook.as_ref(), UndeliverableError::new(err)),
    }
    false
  }
}

impl<O, Item, Err> GateControl for EmissionGate<O, Item, Err>
where
  O: Send,
{
  #[inline]
  fn cancel(&self) -> bool { EmissionGate::cancel(self) }

  #[inline]
  fn state(&self) -> GateState { EmissionGate::state(self) }
}

impl<O, Item, Err> Gate<Item, Err> for EmissionGate<O, Item, Err>
where
  O: SingleObserver<Item, Err> + Send,
  Err: Debug + Send + 'static,
{
  #[inline]
  fn try_succeed(&self, value: Item) -> bool { EmissionGate::try_succeed(self, value) }

  #[inline]
  fn try_fail(&self, err: Err) -> bool { EmissionGate::try_fail(self, err) }

  #[inline]
  fn set_resource(&self, resource: Option<BoxedDisposable>) {
    EmissionGate::set_resource(self, resource)
  }
}

impl<O, Item, Err> Debug for EmissionGate<O, Item, Err> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("EmissionGate")
      .field("state", &self.state.get())
      .field("slot", &self.slot)
      .finish()
  }
}

impl<O, Item, Err> Drop for EmissionGate<O, Item, Err> {
  fn drop(&mut self) {
    if !self.state.get().is_terminal() {
      tracing::debug!("gate dropped while pending: every emitter was released without an outcome");
    }
  }
}
