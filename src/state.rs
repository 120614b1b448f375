//! Terminal-state bookkeeping for a single subscription.

use std::sync::atomic::{AtomicU8, Ordering};

/// State of an emission gate.
///
/// `Pending` is the only initial state; the other three are terminal and
/// absorbing.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GateState {
  /// No outcome yet.
  Pending,
  /// A value was delivered.
  Succeeded,
  /// An error was delivered.
  Errored,
  /// The consumer lost interest before any outcome.
  Cancelled,
}

impl GateState {
  #[inline]
  pub fn is_terminal(self) -> bool { self != GateState::Pending }

  #[inline]
  fn to_u8(self) -> u8 {
    match self {
      GateState::Pending => 0,
      GateState::Succeeded => 1,
      GateState::Errored => 2,
      GateState::Cancelled => 3,
    }
  }

  #[inline]
  fn from_u8(value: u8) -> Self {
    match value {
      0 => GateState::Pending,
      1 => GateState::Succeeded,
      2 => GateState::Errored,
      _ => GateState::Cancelled,
    }
  }
}

/// Lock-free cell holding a [`GateState`].
///
/// Loads use `Acquire` and successful exchanges use `AcqRel`, so whoever
/// observes a terminal state also observes everything the winning thread did
/// before its transition.
#[derive(Debug)]
pub struct StateCell(AtomicU8);

impl Default for StateCell {
  fn default() -> Self { Self::new() }
}

impl StateCell {
  pub fn new() -> Self { Self(AtomicU8::new(GateState::Pending.to_u8())) }

  #[inline]
  pub fn get(&self) -> GateState { GateState::from_u8(self.0.load(Ordering::Acquire)) }

  /// Swap `current` for `new` if the cell still holds `current`.
  ///
  /// On failure returns the state actually found.
  #[inline]
  pub fn compare_exchange(&self, current: GateState, new: GateState) -> Result<GateState, GateState> {
    self
      .0
      .compare_exchange(current.to_u8(), new.to_u8(), Ordering::AcqRel, Ordering::Acquire)
      .map(GateState::from_u8)
      .map_err(GateState::from_u8)
  }

  /// Move from `Pending` to `terminal`. Exactly one caller ever wins.
  #[inline]
  pub fn terminate(&self, terminal: GateState) -> bool {
    debug_assert!(terminal.is_terminal());
    self.compare_exchange(GateState::Pending, terminal).is_ok()
  }
}
