//! # rxsingle: a single-value reactive primitive
//!
//! A producer computes exactly one outcome, a success value or an error, and
//! pushes it to a consumer at most once, at any time, from any thread. The
//! consumer can cancel at any point, and the producer can register the
//! resource (timer, socket, thread, upstream subscription) that cancellation
//! must release.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use rxsingle::prelude::*;
//!
//! let single = create(|emitter: SingleEmitter<u32, String>| {
//!   let cancelled = Arc::new(BooleanDisposable::new());
//!   emitter.set_resource(Some(cancelled.clone()));
//!   std::thread::spawn(move || {
//!     if !cancelled.is_disposed() {
//!       emitter.on_success(6 * 7);
//!     }
//!   });
//! });
//!
//! single.subscribe_fn(|v| println!("value: {v}"), |e| eprintln!("error: {e}"));
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Single`] | Cold, reusable source; runs its producer on every subscribe |
//! | [`SingleEmitter`] | Producer handle: `on_success`, `on_error`, `set_resource` |
//! | [`SingleObserver`] | Consumer: `on_subscribe`, then one of `on_success` / `on_error` |
//! | [`Subscription`] | Consumer handle that cancels the subscription |
//! | [`EmissionGate`] | The at-most-once state machine behind each subscription |
//!
//! ## Undeliverable errors
//!
//! An error emitted after the outcome was already delivered is handed to an
//! [`ErrorHook`](hooks::ErrorHook) instead of being dropped. See [`hooks`].
//!
//! ## Feature Flags
//!
//! - **`futures-interop`** (default): [`Single::into_future`] and
//!   [`Single::blocking_get`]
//!
//! [`Single`]: single::Single
//! [`SingleEmitter`]: emitter::SingleEmitter
//! [`SingleObserver`]: observer::SingleObserver
//! [`Subscription`]: subscription::Subscription
//! [`EmissionGate`]: emission_gate::EmissionGate
//! [`Single::into_future`]: single::Single::into_future
//! [`Single::blocking_get`]: single::Single::blocking_get

pub mod disposable;
pub mod emission_gate;
pub mod emitter;
pub mod error;
pub mod factory;
pub mod hooks;
#[cfg(feature = "futures-interop")]
pub mod into_future;
pub mod observer;
pub mod prelude;
pub mod resource_slot;
pub mod single;
pub mod state;
pub mod subscription;

pub use prelude::*;
