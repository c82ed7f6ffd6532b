//! Error types for `kontor-core`.
//!
//! Every failure a caller can observe falls into one of four categories:
//! a document failed validation, a unique index rejected a value, the
//! target of a mutation does not exist, or the underlying storage is
//! unusable. All of them are typed; none are reported as generic faults.

use thiserror::Error;
use uuid::Uuid;

use crate::{entity::FieldViolation, kind::EntityKind};

#[derive(Debug, Error)]
pub enum Error {
  /// One or more field constraints failed. Always raised before any
  /// persistent mutation; a document is never partially applied.
  #[error("{} failed validation: {}", .kind.label(), FieldViolation::join(.violations))]
  SchemaViolation {
    kind:       EntityKind,
    violations: Vec<FieldViolation>,
  },

  /// A unique index already holds this value for a different document.
  /// The rejected write left no trace.
  #[error("{} with {index} {value:?} already exists", .kind.label())]
  UniquenessViolation {
    kind:  EntityKind,
    index: &'static str,
    value: String,
  },

  /// The target of an update or delete does not exist.
  #[error("{} not found: {id}", .kind.label())]
  NotFound { kind: EntityKind, id: Uuid },

  /// The underlying storage is not initialized or is inaccessible.
  #[error("store unavailable: {0}")]
  StoreUnavailable(String),

  /// A document payload could not be (de)serialized.
  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl Error {
  /// Convenience constructor for validation failures.
  pub fn schema(kind: EntityKind, violations: Vec<FieldViolation>) -> Self {
    Self::SchemaViolation { kind, violations }
  }

  pub fn not_found(kind: EntityKind, id: Uuid) -> Self {
    Self::NotFound { kind, id }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
