//! Single: a cold source of exactly one outcome.
//!
//! A `Single` is just a value holding the producer procedure. Nothing runs
//! until [`Single::subscribe`]; every subscription gets its own gate and
//! emitter, so one `Single` can be subscribed any number of times.

use std::{
  fmt::Debug,
  marker::PhantomData,
  sync::{Arc, Weak},
};

use crate::{
  emission_gate::{EmissionGate, GateControl},
  emitter::SingleEmitter,
  hooks::ErrorHook,
  observer::{FnObserver, SingleObserver},
  subscription::Subscription,
};

// ============================================================================
// ProducerResult
// ============================================================================

/// What a producer procedure may return.
///
/// `()` for procedures that can't fail synchronously, `Result<(), Err>` for
/// those that can. A returned `Err` is emitted through the emitter like any
/// other error.
pub trait ProducerResult<Err> {
  fn into_result(self) -> Result<(), Err>;
}

impl<Err> ProducerResult<Err> for () {
  #[inline]
  fn into_result(self) -> Result<(), Err> { Ok(()) }
}

impl<Err> ProducerResult<Err> for Result<(), Err> {
  #[inline]
  fn into_result(self) -> Result<(), Err> { self }
}

// ============================================================================
// Single
// ============================================================================

/// Single created from a producer procedure.
///
/// Build one with the functions of [`factory`](crate::factory).
pub struct Single<F, Item, Err> {
  producer: F,
  hook: Option<Arc<dyn ErrorHook>>,
  _marker: PhantomData<fn() -> (Item, Err)>,
}

impl<F: Clone, Item, Err> Clone for Single<F, Item, Err> {
  fn clone(&self) -> Self {
    Self { producer: self.producer.clone(), hook: self.hook.clone(), _marker: PhantomData }
  }
}

impl<F, Item, Err> Single<F, Item, Err> {
  pub fn new(producer: F) -> Self { Self { producer, hook: None, _marker: PhantomData } }

  /// Route undeliverable errors of this single's subscriptions to `hook`
  /// instead of the process-wide one.
  pub fn with_error_hook<H: ErrorHook + 'static>(mut self, hook: H) -> Self {
    self.hook = Some(Arc::new(hook));
    self
  }
}

impl<F, R, Item, Err> Single<F, Item, Err>
where
  F: Fn(SingleEmitter<Item, Err>) -> R,
  R: ProducerResult<Err>,
  Item: 'static,
  Err: Debug + Send + 'static,
{
  /// Subscribe `observer` and run the producer on the calling thread.
  ///
  /// The observer's `on_subscribe` runs first. If the producer returns an
  /// error it is emitted, never propagated out of `subscribe`.
  pub fn subscribe<O>(&self, mut observer: O) -> Subscription
  where
    O: SingleObserver<Item, Err> + Send + 'static,
  {
    let gate = Arc::new(EmissionGate::<O, Item, Err>::new(self.hook.clone()));
    let weak = Arc::downgrade(&gate);
    let control: Weak<dyn GateControl> = weak;
    let subscription = Subscription::new(control);

    observer.on_subscribe(&subscription);
    gate.attach(observer);

    let emitter = SingleEmitter::new(gate);
    if let Err(err) = (self.producer)(emitter.clone()).into_result() {
      emitter.on_error(err);
    }
    subscription
  }

  /// Subscribe with a pair of closures.
  pub fn subscribe_fn<S, E>(&self, on_success: S, on_error: E) -> Subscription
  where
    S: FnOnce(Item) + Send + 'static,
    E: FnOnce(Err) + Send + 'static,
  {
    self.subscribe(FnObserver::new(on_success, on_error))
  }
}
