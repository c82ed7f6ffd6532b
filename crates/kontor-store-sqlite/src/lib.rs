//! SQLite backend for the Kontor record store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread without blocking the async runtime. The single connection also
//! gives the engine its concurrency contract for free: read-write
//! transactions execute one at a time.

mod schema;
mod store;

pub use store::SqliteStore;

#[cfg(test)]
mod tests;
