//! Undeliverable-error hook
//!
//! An error emitted after the outcome was already delivered can't reach the
//! consumer, but it must not vanish either. It is handed to an [`ErrorHook`]
//! instead.
//!
//! A process-wide hook is installed by default ([`LogErrorHook`]) and can be
//! replaced at any time with [`set_error_hook`]. The global hook is looked up
//! when an error is routed, so a replacement also covers subscriptions that
//! are already running. A single source can bypass the global hook entirely
//! with [`Single::with_error_hook`](crate::single::Single::with_error_hook).

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::error::UndeliverableError;

/// Sink for errors that arrive after a subscription already terminated.
pub trait ErrorHook: Send + Sync {
  fn on_undeliverable(&self, error: UndeliverableError);
}

impl<F> ErrorHook for F
where
  F: Fn(UndeliverableError) + Send + Sync,
{
  #[inline]
  fn on_undeliverable(&self, error: UndeliverableError) { self(error) }
}

/// Default hook: reports the error through `tracing` at `ERROR` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogErrorHook;

impl ErrorHook for LogErrorHook {
  fn on_undeliverable(&self, error: UndeliverableError) {
    tracing::error!(
      error_type = error.type_name(),
      error = %error.message(),
      "undeliverable error: the single already produced its outcome"
    );
  }
}

static GLOBAL_HOOK: Lazy<RwLock<Arc<dyn ErrorHook>>> =
  Lazy::new(|| RwLock::new(Arc::new(LogErrorHook)));

/// Install `hook` process-wide and return the hook it replaces.
pub fn set_error_hook<H: ErrorHook + 'static>(hook: H) -> Arc<dyn ErrorHook> {
  std::mem::replace(&mut *GLOBAL_HOOK.write(), Arc::new(hook))
}

/// Put the default [`LogErrorHook`] back and return the hook it replaces.
pub fn reset_error_hook() -> Arc<dyn ErrorHook> { set_error_hook(LogErrorHook) }

/// The currently installed process-wide hook.
pub fn error_hook() -> Arc<dyn ErrorHook> { GLOBAL_HOOK.read().clone() }

/// Deliver `error` to `local` if given, otherwise to the global hook.
pub(crate) fn route_undeliverable(local: Option<&Arc<dyn ErrorHook>>, error: UndeliverableError) {
  tracing::debug!(error_type = error.type_name(), "routing undeliverable error");
  match local {
    Some(hook) => hook.on_undeliverable(error),
    // The read lock is released before the hook runs, so a hook may itself
    // install another hook.
    None => error_hook().on_undeliverable(error),
  }
}
