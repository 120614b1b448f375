//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for easy access.

#[cfg(feature = "futures-interop")]
pub use crate::into_future::{IntoFutureResult, SingleFuture};
pub use crate::{
  disposable::{
    BooleanDisposable, BoxedDisposable, ClosureDisposable, CompositeDisposable, Disposable,
    DisposeGuard,
  },
  emission_gate::{EmissionGate, Gate, GateControl},
  emitter::SingleEmitter,
  error::{IntoFutureError, UndeliverableError},
  factory::{create, defer, error, from_fn, just},
  hooks::{error_hook, reset_error_hook, set_error_hook, ErrorHook, LogErrorHook},
  observer::{FnObserver, SingleObserver},
  single::{ProducerResult, Single},
  state::GateState,
  subscription::Subscription,
};
