//! SingleObserver trait and implementations
//!
//! The consumer side of a single. An observer is told about its subscription
//! first, then receives at most one of `on_success` / `on_error`.

use crate::subscription::Subscription;

// ============================================================================
// SingleObserver Trait
// ============================================================================

/// The consumer of a single outcome.
///
/// The terminal methods consume the observer, so a second delivery cannot
/// even be expressed.
pub trait SingleObserver<Item, Err> {
  /// Called once, before any outcome, with the handle that cancels this
  /// subscription. Clone the handle to keep it.
  fn on_subscribe(&mut self, subscription: &Subscription) { let _ = subscription; }

  /// Receive the success value.
  fn on_success(self, value: Item);

  /// Receive the error.
  fn on_error(self, err: Err);
}

/// Option observer - None ignores all events, Some delegates to inner
impl<O, Item, Err> SingleObserver<Item, Err> for Option<O>
where
  O: SingleObserver<Item, Err>,
{
  fn on_subscribe(&mut self, subscription: &Subscription) {
    if let Some(inner) = self {
      inner.on_subscribe(subscription);
    }
  }

  fn on_success(self, value: Item) {
    if let Some(inner) = self {
      inner.on_success(value);
    }
  }

  fn on_error(self, err: Err) {
    if let Some(inner) = self {
      inner.on_error(err);
    }
  }
}

// ============================================================================
// FnObserver - Closure adapter
// ============================================================================

/// Observer built from closures.
///
/// `FnObserver::new(on_success, on_error)` ignores `on_subscribe`; add a
/// handler with [`FnObserver::with_on_subscribe`].
///
/// ```rust
/// use rxsingle::prelude::*;
///
/// let observer = FnObserver::new(|v: i32| println!("got {v}"), |e: String| eprintln!("{e}"))
///   .with_on_subscribe(|_: &Subscription| println!("subscribed"));
/// just::<_, String>(1).subscribe(observer);
/// ```
#[derive(Clone)]
pub struct FnObserver<S, E, Sub = fn(&Subscription)> {
  on_success: S,
  on_error: E,
  on_subscribe: Sub,
}

impl<S, E> FnObserver<S, E> {
  pub fn new(on_success: S, on_error: E) -> Self {
    Self { on_success, on_error, on_subscribe: |_| {} }
  }
}

impl<S, E, Sub> FnObserver<S, E, Sub> {
  /// Replace the `on_subscribe` handler.
  pub fn with_on_subscribe<Sub2>(self, on_subscribe: Sub2) -> FnObserver<S, E, Sub2>
  where
    Sub2: FnMut(&Subscription),
  {
    FnObserver { on_success: self.on_success, on_error: self.on_error, on_subscribe }
  }
}

impl<Item, Err, S, E, Sub> SingleObserver<Item, Err> for FnObserver<S, E, Sub>
where
  S: FnOnce(Item),
  E: FnOnce(Err),
  Sub: FnMut(&Subscription),
{
  #[inline]
  fn on_subscribe(&mut self, subscription: &Subscription) { (self.on_subscribe)(subscription) }

  #[inline]
  fn on_success(self, value: Item) { (self.on_success)(value) }

  #[inline]
  fn on_error(self, err: Err) { (self.on_error)(err) }
}

// ============================================================================
// Tests
// ============================================================================
