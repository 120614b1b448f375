//! Integration tests for rxsingle
//!
//! Exercises the delivery guarantees end to end, mostly under real thread
//! contention.

use std::{
  sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Barrier,
  },
  thread,
};

use parking_lot::Mutex;
use rxsingle::prelude::*;

type Outcomes<Item> = Arc<Mutex<Vec<Result<Item, String>>>>;

/// Subscribe and park the emitter so the test can drive it.
fn parked<Item>() -> (Subscription, SingleEmitter<Item, String>, Outcomes<Item>)
where
  Item: Send + 'static,
{
  let slot = Arc::new(Mutex::new(None));
  let s = slot.clone();
  let single = create(move |emitter: SingleEmitter<Item, String>| {
    *s.lock() = Some(emitter);
  });

  let outcomes: Outcomes<Item> = Arc::new(Mutex::new(vec![]));
  let (ok, err) = (outcomes.clone(), outcomes.clone());
  let subscription = single.subscribe_fn(move |v| ok.lock().push(Ok(v)), move |e| err.lock().push(Err(e)));
  let emitter = slot.lock().take().expect("producer runs during subscribe");
  (subscription, emitter, outcomes)
}

fn counting_resource() -> (Arc<AtomicUsize>, ClosureDisposable<impl FnOnce() + Send>) {
  let count = Arc::new(AtomicUsize::new(0));
  let c = count.clone();
  (count, ClosureDisposable::new(move || {
    c.fetch_add(1, Ordering::SeqCst);
  }))
}

#[test]
fn success_then_error_goes_to_hook() {
  let undeliverable = Arc::new(Mutex::new(vec![]));
  let u = undeliverable.clone();
  let producer = Arc::new(Mutex::new(None));
  let p = producer.clone();
  let single = create(move |emitter: SingleEmitter<i32, String>| {
    *p.lock() = Some(emitter);
  })
  .with_error_hook(move |e: UndeliverableError| {
    u.lock().push(e.downcast::<String>().expect("payload is the producer error"))
  });

  let outcomes = Arc::new(Mutex::new(vec![]));
  let (ok, err) = (outcomes.clone(), outcomes.clone());
  single.subscribe_fn(move |v| ok.lock().push(Ok(v)), move |e| err.lock().push(Err(e)));

  let emitter = producer.lock().take().unwrap();
  thread::spawn(move || {
    assert!(emitter.on_success(42));
    assert!(!emitter.on_error("E".to_owned()));
  })
  .join()
  .unwrap();

  assert_eq!(*outcomes.lock(), vec![Ok(42)]);
  assert_eq!(*undeliverable.lock(), vec!["E".to_owned()]);
}

#[test]
fn global_hook_receives_undeliverable_errors() {
  #[derive(Debug)]
  struct Marker(u64);

  let seen = Arc::new(AtomicUsize::new(0));
  let s = seen.clone();
  let previous = set_error_hook(move |e: UndeliverableError| {
    if let Some(Marker(n)) = e.downcast_ref::<Marker>() {
      s.fetch_add(*n as usize, Ordering::SeqCst);
    }
  });

  let single = create(|emitter: SingleEmitter<(), Marker>| {
    emitter.on_error(Marker(1));
    emitter.on_error(Marker(2));
  });
  single.subscribe_fn(|_| {}, |_| {});
  assert_eq!(seen.load(Ordering::SeqCst), 2);

  set_error_hook(move |e: UndeliverableError| previous.on_undeliverable(e));
}

#[test]
fn dispose_before_producer_acts() {
  let (subscription, emitter, outcomes) = parked::<i32>();
  subscription.dispose();
  assert!(!emitter.on_success(7));
  assert!(!emitter.on_error("late".to_owned()));
  assert!(outcomes.lock().is_empty());
  assert_eq!(subscription.state(), Some(GateState::Cancelled));
}

#[test]
fn repeated_calls_have_no_extra_effect() {
  let (subscription, emitter, outcomes) = parked::<i32>();
  assert!(emitter.on_success(1));
  assert!(!emitter.on_success(1));
  assert!(!emitter.on_success(2));
  subscription.dispose();
  assert_eq!(*outcomes.lock(), vec![Ok(1)]);
  assert_eq!(subscription.state(), Some(GateState::Succeeded));
}

#[test]
fn cancel_disposes_resource_once() {
  let (subscription, emitter, _) = parked::<i32>();
  let (count, resource) = counting_resource();
  emitter.set_resource(Some(resource));
  subscription.dispose();
  subscription.dispose();
  assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn cancel_after_outcome_keeps_resource_disposed_once() {
  let (subscription, emitter, _) = parked::<i32>();
  let (count, resource) = counting_resource();
  emitter.set_resource(Some(resource));
  emitter.on_error("boom".to_owned());
  subscription.dispose();
  assert_eq!(count.load(Ordering::SeqCst), 1);
  assert_eq!(subscription.state(), Some(GateState::Errored));
}

#[test]
fn resource_swap_retains_only_latest() {
  let (_subscription, emitter, _) = parked::<i32>();
  let (first, r1) = counting_resource();
  let (second, r2) = counting_resource();
  emitter.set_resource(Some(r1));
  emitter.set_resource(Some(r2));
  assert_eq!(first.load(Ordering::SeqCst), 1);
  assert_eq!(second.load(Ordering::SeqCst), 0);
  emitter.on_success(0);
  assert_eq!(first.load(Ordering::SeqCst), 1);
  assert_eq!(second.load(Ordering::SeqCst), 1);
}

#[test]
fn resource_after_terminal_is_disposed_before_return() {
  let (_subscription, emitter, _) = parked::<i32>();
  emitter.on_success(0);
  let (count, resource) = counting_resource();
  emitter.set_resource(Some(resource));
  assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn thousand_threads_deliver_exactly_one_value() {
  const THREADS: usize = 1000;
  let (_subscription, emitter, outcomes) = parked::<usize>();
  let winners = Arc::new(Mutex::new(vec![]));
  let barrier = Arc::new(Barrier::new(THREADS));

  thread::scope(|s| {
    for i in 0..THREADS {
      let (emitter, winners, barrier) = (emitter.clone(), winners.clone(), barrier.clone());
      s.spawn(move || {
        barrier.wait();
        if emitter.on_success(i) {
          winners.lock().push(i);
        }
      });
    }
  });

  let winners = winners.lock();
  assert_eq!(winners.len(), 1);
  assert_eq!(*outcomes.lock(), vec![Ok(winners[0])]);
}

#[test]
fn success_error_and_cancel_race() {
  for round in 0..200 {
    let (subscription, emitter, outcomes) = parked::<usize>();
    let (count, resource) = counting_resource();
    emitter.set_resource(Some(resource));
    let barrier = Barrier::new(3);

    thread::scope(|s| {
      s.spawn(|| {
        barrier.wait();
        emitter.on_success(round);
      });
      s.spawn(|| {
        barrier.wait();
        emitter.on_error(format!("round {round}"));
      });
      s.spawn(|| {
        barrier.wait();
        subscription.dispose();
      });
    });

    let outcomes = outcomes.lock();
    match subscription.state() {
      Some(GateState::Cancelled) => assert!(outcomes.is_empty()),
      Some(GateState::Succeeded) => assert_eq!(*outcomes, vec![Ok(round)]),
      Some(GateState::Errored) => assert_eq!(*outcomes, vec![Err(format!("round {round}"))]),
      other => panic!("unexpected state {other:?}"),
    }
    assert_eq!(count.load(Ordering::SeqCst), 1);
  }
}

#[test]
fn set_resource_racing_terminal_transition_never_leaks() {
  for _ in 0..500 {
    let (subscription, emitter, _) = parked::<()>();
    let (count, resource) = counting_resource();
    let barrier = Barrier::new(2);

    thread::scope(|s| {
      s.spawn(|| {
        barrier.wait();
        emitter.set_resource(Some(resource));
      });
      s.spawn(|| {
        barrier.wait();
        subscription.dispose();
      });
    });

    assert_eq!(count.load(Ordering::SeqCst), 1);
  }
}

#[test]
fn dropped_emitters_release_resource() {
  let (subscription, emitter, outcomes) = parked::<i32>();
  let (count, resource) = counting_resource();
  emitter.set_resource(Some(resource));
  drop(emitter);
  assert_eq!(count.load(Ordering::SeqCst), 1);
  assert_eq!(subscription.state(), None);
  assert!(subscription.is_disposed());
  assert!(outcomes.lock().is_empty());
}

#[test]
fn guard_cancels_on_scope_exit() {
  let (subscription, emitter, outcomes) = parked::<i32>();
  {
    let _guard = subscription.clone().unsubscribe_when_dropped();
  }
  assert!(!emitter.on_success(1));
  assert!(outcomes.lock().is_empty());
  assert_eq!(subscription.state(), Some(GateState::Cancelled));
}

#[test]
fn emitter_results_stay_observable_with_prelude() {
  let (_subscription, emitter, outcomes) = parked::<i32>();
  let other = emitter.clone();
  let first: bool = emitter.on_success(1);
  let second: bool = emitter.on_error("late".to_owned());
  assert!(first);
  assert!(!second);
  assert!(!other.on_success(2));
  assert!(emitter.is_disposed());
  assert_eq!(*outcomes.lock(), vec![Ok(1)]);
}
