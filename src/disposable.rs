//! Disposable trait and the stock disposables
//!
//! A `Disposable` is a handle to a resource that can be released exactly
//! once. Every method takes `&self`, so a disposable can be shared between the
//! producer that created the resource and the slot that owns it.

use std::{
  fmt::{Debug, Formatter},
  sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
  },
};

use parking_lot::Mutex;
use smallvec::SmallVec;

// ============================================================================
// Disposable Trait
// ============================================================================

/// A cancellable resource.
///
/// Implementations must make `dispose` idempotent: the underlying resource is
/// released by the first call, every later (or concurrent) call is a no-op.
pub trait Disposable {
  /// Release the resource.
  fn dispose(&self);

  /// Returns `true` once the resource has been released.
  fn is_disposed(&self) -> bool;
}

/// Type-erased disposable that can move between threads.
pub type BoxedDisposable = Box<dyn Disposable + Send + Sync>;

impl Debug for dyn Disposable + Send + Sync {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("dyn Disposable")
      .field("is_disposed", &self.is_disposed())
      .finish()
  }
}

/// The unit disposable owns nothing and is always disposed.
impl Disposable for () {
  #[inline]
  fn dispose(&self) {}

  #[inline]
  fn is_disposed(&self) -> bool { true }
}

impl<D: Disposable + ?Sized> Disposable for Box<D> {
  #[inline]
  fn dispose(&self) { (**self).dispose() }

  #[inline]
  fn is_disposed(&self) -> bool { (**self).is_disposed() }
}

impl<D: Disposable + ?Sized> Disposable for Arc<D> {
  #[inline]
  fn dispose(&self) { (**self).dispose() }

  #[inline]
  fn is_disposed(&self) -> bool { (**self).is_disposed() }
}

// ============================================================================
// ClosureDisposable
// ============================================================================

/// Runs a closure the first time it is disposed.
pub struct ClosureDisposable<F>(Mutex<Option<F>>);

impl<F: FnOnce()> ClosureDisposable<F> {
  pub fn new(f: F) -> Self { Self(Mutex::new(Some(f))) }
}

impl<F: FnOnce()> Disposable for ClosureDisposable<F> {
  fn dispose(&self) {
    // Take under the lock, run outside of it: the closure may dispose other
    // resources that end up back here.
    let f = self.0.lock().take();
    if let Some(f) = f {
      f();
    }
  }

  fn is_disposed(&self) -> bool { self.0.lock().is_none() }
}

impl<F> Debug for ClosureDisposable<F> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ClosureDisposable")
      .field("is_disposed", &self.0.lock().is_none())
      .finish()
  }
}

// ============================================================================
// BooleanDisposable
// ============================================================================

/// A disposable that only records whether it was disposed.
#[derive(Debug, Default)]
pub struct BooleanDisposable(AtomicBool);

impl BooleanDisposable {
  pub fn new() -> Self { Self::default() }
}

impl Disposable for BooleanDisposable {
  #[inline]
  fn dispose(&self) { self.0.store(true, Ordering::Release); }

  #[inline]
  fn is_disposed(&self) -> bool { self.0.load(Ordering::Acquire) }
}

// ============================================================================
// CompositeDisposable
// ============================================================================

/// A group of disposables released together.
///
/// Adding to a composite that is already disposed disposes the new member
/// right away.
#[derive(Default)]
pub struct CompositeDisposable(Mutex<Inner>);

#[derive(Default)]
struct Inner {
  disposed: bool,
  teardown: SmallVec<[BoxedDisposable; 1]>,
}

impl CompositeDisposable {
  pub fn new() -> Self { Self::default() }

  pub fn add<D: Disposable + Send + Sync + 'static>(&self, disposable: D) {
    let rejected = {
      let mut inner = self.0.lock();
      if inner.disposed {
        Some(disposable)
      } else {
        inner.teardown.retain(|d| !d.is_disposed());
        inner.teardown.push(Box::new(disposable));
        None
      }
    };
    if let Some(d) = rejected {
      d.dispose();
    }
  }

  /// Number of members still held.
  pub fn len(&self) -> usize { self.0.lock().teardown.len() }

  pub fn is_empty(&self) -> bool { self.len() == 0 }
}

impl Disposable for CompositeDisposable {
  fn dispose(&self) {
    let teardown = {
      let mut inner = self.0.lock();
      if inner.disposed {
        return;
      }
      inner.disposed = true;
      std::mem::take(&mut inner.teardown)
    };
    for d in teardown {
      d.dispose();
    }
  }

  fn is_disposed(&self) -> bool { self.0.lock().disposed }
}

impl Debug for CompositeDisposable {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let inner = self.0.lock();
    f.debug_struct("CompositeDisposable")
      .field("disposed", &inner.disposed)
      .field("teardown_count", &inner.teardown.len())
      .finish()
  }
}

// ============================================================================
// DisposeGuard
// ============================================================================

/// An RAII implementation of a "scoped" disposable. When this structure is
/// dropped (falls out of scope), the wrapped disposable is disposed.
///
/// If you don't bind the guard to a variable it is dropped, and the resource
/// disposed, immediately.
#[derive(Debug)]
#[must_use]
pub struct DisposeGuard<D: Disposable>(D);

impl<D: Disposable> DisposeGuard<D> {
  /// Wraps an existing disposable with a guard to enable RAII behavior for
  /// it.
  pub fn new(disposable: D) -> Self { Self(disposable) }

  /// Access the guarded disposable without disarming the guard.
  pub fn get(&self) -> &D { &self.0 }
}

impl<D: Disposable> Drop for DisposeGuard<D> {
  #[inline]
  fn drop(&mut self) { self.0.dispose() }
}
