//! Constructors for the common flavors of [`Single`].
//!
//! Every flavor is the same `Single` type holding a different closure.
//!
//! ```rust
//! use rxsingle::prelude::*;
//!
//! let single = create(|emitter: SingleEmitter<u32, String>| {
//!   std::thread::spawn(move || emitter.on_success(42));
//! });
//! let value = single.blocking_get();
//! assert_eq!(value, Ok(Ok(42)));
//! ```

use std::fmt::Debug;

use crate::{
  emitter::SingleEmitter,
  observer::SingleObserver,
  single::{ProducerResult, Single},
  subscription::Subscription,
};

/// Single from a callback-style producer.
///
/// `producer` runs once per subscription, on the subscribing thread, and may
/// hand the emitter to any other thread.
pub fn create<Item, Err, F, R>(producer: F) -> Single<F, Item, Err>
where
  F: Fn(SingleEmitter<Item, Err>) -> R,
  R: ProducerResult<Err>,
{
  Single::new(producer)
}

/// Single that succeeds with a clone of `value` on every subscription.
pub fn just<Item, Err>(value: Item) -> Single<impl Fn(SingleEmitter<Item, Err>) + Clone, Item, Err>
where
  Item: Clone,
{
  Single::new(move |emitter: SingleEmitter<Item, Err>| {
    emitter.on_success(value.clone());
  })
}

/// Single that fails with a clone of `err` on every subscription.
pub fn error<Item, Err>(err: Err) -> Single<impl Fn(SingleEmitter<Item, Err>) + Clone, Item, Err>
where
  Err: Clone,
{
  Single::new(move |emitter: SingleEmitter<Item, Err>| {
    emitter.on_error(err.clone());
  })
}

/// Single that calls `f` at subscribe time and emits what it returns.
pub fn from_fn<Item, Err, F>(f: F) -> Single<impl Fn(SingleEmitter<Item, Err>) + Clone, Item, Err>
where
  F: Fn() -> Result<Item, Err> + Clone,
{
  Single::new(move |emitter: SingleEmitter<Item, Err>| match f() {
    Ok(value) => {
      emitter.on_success(value);
    }
    Err(err) => {
      emitter.on_error(err);
    }
  })
}

/// Single that builds a fresh inner single on every subscription and forwards
/// its outcome. Cancelling the outer subscription cancels the inner one.
pub fn defer<Item, Err, D, G, R>(factory: D) -> Single<impl Fn(SingleEmitter<Item, Err>) + Clone, Item, Err>
where
  D: Fn() -> Single<G, Item, Err> + Clone,
  G: Fn(SingleEmitter<Item, Err>) -> R,
  R: ProducerResult<Err>,
  Item: 'static,
  Err: Debug + Send + 'static,
{
  Single::new(move |emitter: SingleEmitter<Item, Err>| {
    factory().subscribe(ForwardObserver(emitter));
  })
}

/// Forwards an inner single's outcome to an outer emitter. The inner
/// subscription becomes the emitter's resource, so cancelling the outer
/// subscription cancels the inner one.
struct ForwardObserver<Item, Err>(SingleEmitter<Item, Err>);

impl<Item, Err> SingleObserver<Item, Err> for ForwardObserver<Item, Err> {
  fn on_subscribe(&mut self, subscription: &Subscription) {
    self.0.set_resource(Some(subscription.clone()))
  }

  fn on_success(self, value: Item) { self.0.on_success(value); }

  fn on_error(self, err: Err) { self.0.on_error(err); }
}

#[cfg(test)]
mod tests {
  use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
  };

  use bencher::benchmark_group;
  use parking_lot::Mutex;

  use super::*;
  use crate::{disposable::Disposable, state::GateState};

  fn collect<F, R>(single: &Single<F, i32, String>) -> Arc<Mutex<Vec<Result<i32, String>>>>
  where
    F: Fn(SingleEmitter<i32, String>) -> R,
    R: ProducerResult<String>,
  {
    let seen = Arc::new(Mutex::new(vec![]));
    let (ok, err) = (seen.clone(), seen.clone());
    single.subscribe_fn(move |v| ok.lock().push(Ok(v)), move |e| err.lock().push(Err(e)));
    seen
  }

  #[test]
  fn just_and_error_are_reusable() {
    let ok = just::<i32, String>(7);
    assert_eq!(*collect(&ok).lock(), vec![Ok(7)]);
    assert_eq!(*collect(&ok).lock(), vec![Ok(7)]);

    let failed = error::<i32, String>("nope".to_owned());
    assert_eq!(*collect(&failed).lock(), vec![Err("nope".to_owned())]);
  }

  #[test]
  fn from_fn_is_lazy() {
    let calls = Arc::new(AtomicUsize::new(0));
    let c = calls.clone();
    let single = from_fn(move || {
      if c.fetch_add(1, Ordering::SeqCst) == 0 {
        Ok(1)
      } else {
        Err("second call".to_owned())
      }
    });
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(*collect(&single).lock(), vec![Ok(1)]);
    assert_eq!(*collect(&single).lock(), vec![Err("second call".to_owned())]);
  }

  #[test]
  fn defer_forwards_inner_outcome() {
    let built = Arc::new(AtomicUsize::new(0));
    let b = built.clone();
    let single = defer(move || {
      let n = b.fetch_add(1, Ordering::SeqCst) as i32;
      just::<i32, String>(n * 10)
    });
    assert_eq!(*collect(&single).lock(), vec![Ok(0)]);
    assert_eq!(*collect(&single).lock(), vec![Ok(10)]);
  }

  #[test]
  fn defer_forwards_late_inner_outcome() {
    let inner_emitter = Arc::new(Mutex::new(None));
    let ie = inner_emitter.clone();
    let single = defer(move || {
      let ie = ie.clone();
      create(move |emitter: SingleEmitter<i32, String>| {
        *ie.lock() = Some(emitter);
      })
    });

    let seen = collect(&single);
    let inner: SingleEmitter<i32, String> = inner_emitter.lock().take().unwrap();
    assert!(!inner.is_disposed());

    // The outer emitter forwards whatever the inner gate delivers.
    assert!(inner.on_success(3));
    assert_eq!(*seen.lock(), vec![Ok(3)]);
    assert!(inner.is_disposed());
  }

  #[test]
  fn outer_cancel_reaches_inner() {
    let inner_emitter = Arc::new(Mutex::new(None));
    let ie = inner_emitter.clone();
    let single = defer(move || {
      let ie = ie.clone();
      create(move |emitter: SingleEmitter<i32, String>| {
        *ie.lock() = Some(emitter);
      })
    });

    let subscription = single.subscribe_fn(|_| panic!("cancelled"), |_| panic!("cancelled"));
    assert_eq!(subscription.state(), Some(GateState::Pending));
    subscription.dispose();

    let inner: SingleEmitter<i32, String> = inner_emitter.lock().take().unwrap();
    assert!(inner.is_disposed());
    assert!(!inner.on_success(1));
  }

  #[test]
  fn benchmark() { do_bench(); }

  benchmark_group!(do_bench, bench_subscribe);

  fn bench_subscribe(b: &mut bencher::Bencher) {
    let single = just::<i32, String>(1);
    b.iter(|| single.subscribe_fn(|_| {}, |_| {}));
  }
}
