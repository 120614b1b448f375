//! Error types of the crate.
//!
//! Producer errors themselves are generic and opaque; the types here describe
//! what happens *around* them.

use std::{
  any::Any,
  fmt::{Debug, Formatter},
};

use thiserror::Error;

/// A producer error that arrived after the outcome was already delivered.
///
/// The original error is kept, type-erased, so an error hook can downcast it
/// back when it knows the concrete type.
#[derive(Error)]
#[error("undeliverable error of type `{type_name}`: {message}")]
pub struct UndeliverableError {
  type_name: &'static str,
  message: String,
  payload: Box<dyn Any + Send>,
}

impl UndeliverableError {
  pub fn new<E: Debug + Send + 'static>(err: E) -> Self {
    Self {
      type_name: std::any::type_name::<E>(),
      message: format!("{err:?}"),
      payload: Box::new(err),
    }
  }

  /// Type name of the original error.
  pub fn type_name(&self) -> &'static str { self.type_name }

  /// `Debug` rendering of the original error.
  pub fn message(&self) -> &str { &self.message }

  pub fn downcast_ref<E: 'static>(&self) -> Option<&E> { self.payload.downcast_ref() }

  /// Recover the original error, or get `self` back if `E` is the wrong type.
  pub fn downcast<E: 'static>(self) -> Result<E, Self> {
    let Self { type_name, message, payload } = self;
    payload
      .downcast::<E>()
      .map(|e| *e)
      .map_err(|payload| Self { type_name, message, payload })
  }
}

impl Debug for UndeliverableError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("UndeliverableError")
      .field("type_name", &self.type_name)
      .field("message", &self.message)
      .finish()
  }
}

/// Errors that prevent a single future from resolving with an outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntoFutureError {
  /// Every emitter was dropped before a success or error was emitted.
  #[error("the single was abandoned without an outcome")]
  Abandoned,
}
