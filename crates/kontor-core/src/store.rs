//! The `DocumentStore` trait — the generic engine contract.
//!
//! Implemented by storage backends (e.g. `kontor-store-sqlite`). Service
//! and HTTP layers depend on this abstraction, not on any concrete
//! backend, and each service receives its store handle at construction —
//! there is no process-global store.
//!
//! Every operation is atomic with respect to its single collection; the
//! engine offers no primitive spanning two collections. Callers that must
//! touch several collections consistently compensate in their own layer.
//!
//! All methods return `Send` futures so the trait can be used from
//! multi-threaded async runtimes (e.g. tokio with `axum`).

use std::future::Future;

use uuid::Uuid;

use crate::{
  Result,
  entity::{Entity, IndexValue},
  kind::EntityKind,
};

pub trait DocumentStore: Send + Sync {
  /// Validate and insert a new document.
  ///
  /// The identifier must already be set by the caller. Fails with
  /// `SchemaViolation` if validation rejects the document, and with
  /// `UniquenessViolation` if the identifier is taken or a unique index
  /// already holds one of the document's values — in every failure case
  /// nothing is written, neither document nor index entries.
  fn create<E: Entity>(
    &self,
    doc: E,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  /// Replace an existing document with a fully-merged successor.
  ///
  /// The merged document is re-validated in full, not just the touched
  /// fields. Index entries whose values changed are moved atomically with
  /// the document write. Fails with `NotFound` if the identifier is
  /// absent from the collection.
  fn replace<E: Entity>(
    &self,
    doc: E,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  /// Hard-delete a document and all of its index entries.
  fn delete(
    &self,
    kind: EntityKind,
    id: Uuid,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  fn get<E: Entity>(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<E>>> + Send + '_;

  /// All documents of the kind. Order is not guaranteed; callers sort.
  fn get_all<E: Entity>(
    &self,
  ) -> impl Future<Output = Result<Vec<E>>> + Send + '_;

  /// Equality lookup through a declared secondary index.
  fn get_by_index<E: Entity>(
    &self,
    index: &'static str,
    value: IndexValue,
  ) -> impl Future<Output = Result<Vec<E>>> + Send + '_;

  fn count(
    &self,
    kind: EntityKind,
  ) -> impl Future<Output = Result<u64>> + Send + '_;

  /// Remove every document (and index entry) of the kind. Sequence
  /// counters are deliberately untouched — business numbers are never
  /// reissued.
  fn clear(
    &self,
    kind: EntityKind,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  /// Atomically increment and return the kind's business sequence
  /// counter. The first value handed out is 1; values are strictly
  /// increasing and never reused, even after deletions.
  fn next_sequence(
    &self,
    kind: EntityKind,
  ) -> impl Future<Output = Result<u64>> + Send + '_;
}
