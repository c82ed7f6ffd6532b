//! [`SqliteStore`] — the SQLite implementation of [`DocumentStore`].

use std::path::Path;

use rusqlite::{OptionalExtension as _, params};
use uuid::Uuid;

use kontor_core::{
  Error, Result,
  entity::{Entity, IndexValue},
  kind::EntityKind,
  store::DocumentStore,
};

use crate::schema::SCHEMA;

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Kontor record store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All
/// mutations run inside one SQLite transaction so a document row and its
/// index entries always move together.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path)
      .await
      .map_err(storage_err)?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory()
      .await
      .map_err(storage_err)?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await
      .map_err(storage_err)
  }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn storage_err(e: tokio_rusqlite::Error) -> Error {
  Error::StoreUnavailable(e.to_string())
}

fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

/// Validate a document against its kind's schema and serialize the body.
fn validated<E: Entity>(doc: &E) -> Result<String> {
  doc
    .validate()
    .map_err(|violations| Error::schema(E::KIND, violations))?;
  Ok(serde_json::to_string(doc)?)
}

/// (index name, canonical value, unique?) triples, ready to cross the
/// thread boundary into a connection closure.
type KeyedEntries = Vec<(&'static str, String, bool)>;

fn keyed_entries<E: Entity>(doc: &E) -> KeyedEntries {
  let declared = E::KIND.indexes();
  doc
    .index_entries()
    .into_iter()
    .map(|entry| {
      let unique = declared
        .iter()
        .any(|ix| ix.name == entry.index && ix.unique);
      (entry.index, entry.value.storage_key(), unique)
    })
    .collect()
}

/// Outcome of a keyed write, decided inside the database transaction and
/// mapped to a typed error once back on the async side.
enum WriteOutcome {
  Committed,
  DuplicateId,
  Missing,
  UniqueConflict {
    index: &'static str,
    value: String,
  },
}

fn outcome_to_result(
  outcome: WriteOutcome,
  kind: EntityKind,
  id: Uuid,
) -> Result<()> {
  match outcome {
    WriteOutcome::Committed => Ok(()),
    WriteOutcome::DuplicateId => Err(Error::UniquenessViolation {
      kind,
      index: "id",
      value: encode_uuid(id),
    }),
    WriteOutcome::Missing => Err(Error::not_found(kind, id)),
    WriteOutcome::UniqueConflict { index, value } => {
      Err(Error::UniquenessViolation { kind, index, value })
    }
  }
}

/// Find a *different* document already holding `value` in a unique index.
fn unique_holder(
  tx: &rusqlite::Transaction<'_>,
  collection: &str,
  index: &str,
  value: &str,
  self_id: &str,
) -> rusqlite::Result<Option<String>> {
  tx.query_row(
    "SELECT doc_id FROM index_entries
     WHERE collection = ?1 AND idx_name = ?2 AND value = ?3
       AND doc_id <> ?4
     LIMIT 1",
    params![collection, index, value, self_id],
    |row| row.get(0),
  )
  .optional()
}

fn insert_entries(
  tx: &rusqlite::Transaction<'_>,
  collection: &str,
  id_str: &str,
  entries: &KeyedEntries,
) -> rusqlite::Result<()> {
  for &(index, ref value, _) in entries {
    tx.execute(
      "INSERT INTO index_entries (collection, idx_name, value, doc_id)
       VALUES (?1, ?2, ?3, ?4)",
      params![collection, index, value, id_str],
    )?;
  }
  Ok(())
}

// ─── DocumentStore impl ──────────────────────────────────────────────────────

impl DocumentStore for SqliteStore {
  async fn create<E: Entity>(&self, doc: E) -> Result<()> {
    let body = validated(&doc)?;
    let entries = keyed_entries(&doc);
    let collection = E::KIND.as_str();
    let id = doc.id();
    let id_str = encode_uuid(id);

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let taken: bool = tx
          .query_row(
            "SELECT 1 FROM documents WHERE collection = ?1 AND doc_id = ?2",
            params![collection, id_str],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);
        if taken {
          return Ok(WriteOutcome::DuplicateId);
        }

        for &(index, ref value, unique) in &entries {
          if !unique {
            continue;
          }
          if unique_holder(&tx, collection, index, value, &id_str)?.is_some() {
            return Ok(WriteOutcome::UniqueConflict {
              index,
              value: value.clone(),
            });
          }
        }

        tx.execute(
          "INSERT INTO documents (collection, doc_id, body) VALUES (?1, ?2, ?3)",
          params![collection, id_str, body],
        )?;
        insert_entries(&tx, collection, &id_str, &entries)?;

        tx.commit()?;
        Ok(WriteOutcome::Committed)
      })
      .await
      .map_err(storage_err)?;

    outcome_to_result(outcome, E::KIND, id)
  }

  async fn replace<E: Entity>(&self, doc: E) -> Result<()> {
    let body = validated(&doc)?;
    let entries = keyed_entries(&doc);
    let collection = E::KIND.as_str();
    let id = doc.id();
    let id_str = encode_uuid(id);

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let exists: bool = tx
          .query_row(
            "SELECT 1 FROM documents WHERE collection = ?1 AND doc_id = ?2",
            params![collection, id_str],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);
        if !exists {
          return Ok(WriteOutcome::Missing);
        }

        for &(index, ref value, unique) in &entries {
          if !unique {
            continue;
          }
          if unique_holder(&tx, collection, index, value, &id_str)?.is_some() {
            return Ok(WriteOutcome::UniqueConflict {
              index,
              value: value.clone(),
            });
          }
        }

        tx.execute(
          "UPDATE documents SET body = ?3 WHERE collection = ?1 AND doc_id = ?2",
          params![collection, id_str, body],
        )?;
        // Re-derive the document's index entries wholesale; the old and
        // new mappings swap inside this same transaction.
        tx.execute(
          "DELETE FROM index_entries WHERE collection = ?1 AND doc_id = ?2",
          params![collection, id_str],
        )?;
        insert_entries(&tx, collection, &id_str, &entries)?;

        tx.commit()?;
        Ok(WriteOutcome::Committed)
      })
      .await
      .map_err(storage_err)?;

    outcome_to_result(outcome, E::KIND, id)
  }

  async fn delete(&self, kind: EntityKind, id: Uuid) -> Result<()> {
    let collection = kind.as_str();
    let id_str = encode_uuid(id);

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let removed = tx.execute(
          "DELETE FROM documents WHERE collection = ?1 AND doc_id = ?2",
          params![collection, id_str],
        )?;
        if removed == 0 {
          return Ok(WriteOutcome::Missing);
        }
        tx.execute(
          "DELETE FROM index_entries WHERE collection = ?1 AND doc_id = ?2",
          params![collection, id_str],
        )?;

        tx.commit()?;
        Ok(WriteOutcome::Committed)
      })
      .await
      .map_err(storage_err)?;

    outcome_to_result(outcome, kind, id)
  }

  async fn get<E: Entity>(&self, id: Uuid) -> Result<Option<E>> {
    let collection = E::KIND.as_str();
    let id_str = encode_uuid(id);

    let body: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT body FROM documents WHERE collection = ?1 AND doc_id = ?2",
              params![collection, id_str],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await
      .map_err(storage_err)?;

    body
      .as_deref()
      .map(serde_json::from_str)
      .transpose()
      .map_err(Error::from)
  }

  async fn get_all<E: Entity>(&self) -> Result<Vec<E>> {
    let collection = E::KIND.as_str();

    let bodies: Vec<String> = self
      .conn
      .call(move |conn| {
        let mut stmt =
          conn.prepare("SELECT body FROM documents WHERE collection = ?1")?;
        let rows = stmt
          .query_map(params![collection], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(storage_err)?;

    bodies
      .iter()
      .map(|body| serde_json::from_str(body).map_err(Error::from))
      .collect()
  }

  async fn get_by_index<E: Entity>(
    &self,
    index: &'static str,
    value: IndexValue,
  ) -> Result<Vec<E>> {
    let collection = E::KIND.as_str();
    let key = value.storage_key();

    let bodies: Vec<String> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT d.body
           FROM documents d
           JOIN index_entries i
             ON i.collection = d.collection AND i.doc_id = d.doc_id
           WHERE i.collection = ?1 AND i.idx_name = ?2 AND i.value = ?3",
        )?;
        let rows = stmt
          .query_map(params![collection, index, key], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(storage_err)?;

    bodies
      .iter()
      .map(|body| serde_json::from_str(body).map_err(Error::from))
      .collect()
  }

  async fn count(&self, kind: EntityKind) -> Result<u64> {
    let collection = kind.as_str();

    let n: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT COUNT(*) FROM documents WHERE collection = ?1",
          params![collection],
          |row| row.get(0),
        )?)
      })
      .await
      .map_err(storage_err)?;

    Ok(n as u64)
  }

  async fn clear(&self, kind: EntityKind) -> Result<()> {
    let collection = kind.as_str();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "DELETE FROM documents WHERE collection = ?1",
          params![collection],
        )?;
        tx.execute(
          "DELETE FROM index_entries WHERE collection = ?1",
          params![collection],
        )?;
        tx.commit()?;
        Ok(())
      })
      .await
      .map_err(storage_err)
  }

  async fn next_sequence(&self, kind: EntityKind) -> Result<u64> {
    let collection = kind.as_str();

    // A single increment-and-read statement; SQLite executes it
    // atomically, so concurrent callers each observe a distinct value.
    let value: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "INSERT INTO sequences (collection, value) VALUES (?1, 1)
           ON CONFLICT (collection) DO UPDATE SET value = value + 1
           RETURNING value",
          params![collection],
          |row| row.get(0),
        )?)
      })
      .await
      .map_err(storage_err)?;

    Ok(value as u64)
  }
}
