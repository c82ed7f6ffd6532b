//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::Utc;
use kontor_core::{
  Error,
  catalog::{NewProduct, Product},
  entity::IndexValue,
  kind::EntityKind,
  parties::{Client, NewClient},
  store::DocumentStore,
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory().await.expect("in-memory store")
}

fn product(code: &str) -> Product {
  NewProduct {
    code: code.into(),
    name: "Espresso beans".into(),
    description: None,
    category: "coffee".into(),
    unit: "KG".into(),
    cost_price: 38.0,
    sale_price: 59.9,
    stock_quantity: Some(10.0),
    min_stock: None,
    barcode: None,
    active: None,
  }
  .build(Utc::now())
}

fn client(document: &str) -> Client {
  NewClient {
    name: "Mercado Bom Preço".into(),
    document: document.into(),
    email: None,
    phone: None,
    address: None,
    city: None,
    state: None,
    zip_code: None,
    credit_limit: None,
    current_debt: None,
    active: None,
  }
  .build(Utc::now())
}

// ─── Round trip ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_round_trip() {
  let s = store().await;
  let p = product("P-001");

  s.create(p.clone()).await.unwrap();

  let fetched: Product = s.get(p.id).await.unwrap().unwrap();
  assert_eq!(fetched.id, p.id);
  assert_eq!(fetched.code, "P-001");
  assert_eq!(fetched.stock_quantity, 10.0);
  assert_eq!(fetched.created_at, p.created_at);
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  let fetched: Option<Product> = s.get(Uuid::new_v4()).await.unwrap();
  assert!(fetched.is_none());
}

// ─── Create failure modes ────────────────────────────────────────────────────

#[tokio::test]
async fn duplicate_identifier_is_rejected() {
  let s = store().await;
  let p = product("P-001");

  s.create(p.clone()).await.unwrap();

  let mut again = product("P-002");
  again.id = p.id;
  let err = s.create(again).await.unwrap_err();
  assert!(
    matches!(err, Error::UniquenessViolation { index: "id", .. }),
    "unexpected error: {err}"
  );
}

#[tokio::test]
async fn schema_violation_blocks_the_write() {
  let s = store().await;
  let mut p = product("P-001");
  p.sale_price = -5.0;

  let err = s.create(p).await.unwrap_err();
  assert!(matches!(err, Error::SchemaViolation { .. }));
  assert_eq!(s.count(EntityKind::Products).await.unwrap(), 0);
}

#[tokio::test]
async fn unique_index_rejects_second_document() {
  let s = store().await;
  let first = client("123.456.789-00");
  s.create(first.clone()).await.unwrap();

  let second = client("123.456.789-00");
  let err = s.create(second).await.unwrap_err();
  assert!(matches!(
    err,
    Error::UniquenessViolation { index: "document", .. }
  ));

  // The first document is unaffected and still retrievable.
  let fetched: Client = s.get(first.id).await.unwrap().unwrap();
  assert_eq!(fetched.document, "123.456.789-00");
  assert_eq!(s.count(EntityKind::Clients).await.unwrap(), 1);

  // And no stray index entries were left by the rejected write.
  let by_document: Vec<Client> = s
    .get_by_index("document", IndexValue::from("123.456.789-00"))
    .await
    .unwrap();
  assert_eq!(by_document.len(), 1);
  assert_eq!(by_document[0].id, first.id);
}

// ─── Replace ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn replace_moves_index_entries() {
  let s = store().await;
  let mut p = product("P-001");
  s.create(p.clone()).await.unwrap();

  p.category = "tea".into();
  s.replace(p.clone()).await.unwrap();

  let coffee: Vec<Product> =
    s.get_by_index("category", IndexValue::from("coffee")).await.unwrap();
  assert!(coffee.is_empty());

  let tea: Vec<Product> =
    s.get_by_index("category", IndexValue::from("tea")).await.unwrap();
  assert_eq!(tea.len(), 1);
  assert_eq!(tea[0].id, p.id);
}

#[tokio::test]
async fn replace_keeping_own_unique_value_succeeds() {
  let s = store().await;
  let mut p = product("P-001");
  s.create(p.clone()).await.unwrap();

  p.name = "Espresso beans (dark roast)".into();
  s.replace(p.clone()).await.unwrap();

  let fetched: Product = s.get(p.id).await.unwrap().unwrap();
  assert_eq!(fetched.name, "Espresso beans (dark roast)");
  assert_eq!(fetched.code, "P-001");
}

#[tokio::test]
async fn replace_cannot_steal_a_unique_value() {
  let s = store().await;
  let a = product("P-001");
  let mut b = product("P-002");
  s.create(a).await.unwrap();
  s.create(b.clone()).await.unwrap();

  b.code = "P-001".into();
  let err = s.replace(b).await.unwrap_err();
  assert!(matches!(
    err,
    Error::UniquenessViolation { index: "code", .. }
  ));
}

#[tokio::test]
async fn replace_missing_is_not_found() {
  let s = store().await;
  let err = s.replace(product("P-001")).await.unwrap_err();
  assert!(matches!(err, Error::NotFound { .. }));
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_document_and_index_entries() {
  let s = store().await;
  let p = product("P-001");
  s.create(p.clone()).await.unwrap();

  s.delete(EntityKind::Products, p.id).await.unwrap();

  let fetched: Option<Product> = s.get(p.id).await.unwrap();
  assert!(fetched.is_none());

  let by_code: Vec<Product> =
    s.get_by_index("code", IndexValue::from("P-001")).await.unwrap();
  assert!(by_code.is_empty());

  // The freed unique value can be used again.
  s.create(product("P-001")).await.unwrap();
}

#[tokio::test]
async fn delete_missing_is_not_found() {
  let s = store().await;
  let err = s.delete(EntityKind::Products, Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, Error::NotFound { .. }));
}

// ─── Scans, count, clear ─────────────────────────────────────────────────────

#[tokio::test]
async fn get_all_returns_every_document_of_the_kind() {
  let s = store().await;
  s.create(product("P-001")).await.unwrap();
  s.create(product("P-002")).await.unwrap();
  s.create(client("111.111.111-11")).await.unwrap();

  let products: Vec<Product> = s.get_all().await.unwrap();
  assert_eq!(products.len(), 2);
  assert_eq!(s.count(EntityKind::Products).await.unwrap(), 2);
  assert_eq!(s.count(EntityKind::Clients).await.unwrap(), 1);
}

#[tokio::test]
async fn get_by_index_unknown_value_is_empty() {
  let s = store().await;
  s.create(product("P-001")).await.unwrap();

  let none: Vec<Product> =
    s.get_by_index("category", IndexValue::from("hardware")).await.unwrap();
  assert!(none.is_empty());
}

#[tokio::test]
async fn clear_empties_one_collection_only() {
  let s = store().await;
  s.create(product("P-001")).await.unwrap();
  s.create(client("111.111.111-11")).await.unwrap();

  s.clear(EntityKind::Products).await.unwrap();

  assert_eq!(s.count(EntityKind::Products).await.unwrap(), 0);
  assert_eq!(s.count(EntityKind::Clients).await.unwrap(), 1);

  let by_code: Vec<Product> =
    s.get_by_index("code", IndexValue::from("P-001")).await.unwrap();
  assert!(by_code.is_empty());
}

// ─── Sequences ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn sequence_starts_at_one_and_is_monotonic() {
  let s = store().await;
  for expected in 1..=5 {
    let n = s.next_sequence(EntityKind::Sales).await.unwrap();
    assert_eq!(n, expected);
  }
}

#[tokio::test]
async fn sequences_are_scoped_per_kind() {
  let s = store().await;
  assert_eq!(s.next_sequence(EntityKind::Sales).await.unwrap(), 1);
  assert_eq!(s.next_sequence(EntityKind::Sales).await.unwrap(), 2);
  assert_eq!(s.next_sequence(EntityKind::Invoices).await.unwrap(), 1);
}

#[tokio::test]
async fn sequence_numbers_are_never_reused() {
  let s = store().await;

  // Hand out 1..=3, then delete a document that held the maximum.
  let mut last = None;
  for _ in 0..3 {
    let n = s.next_sequence(EntityKind::Products).await.unwrap();
    let p = product(&format!("P-{n:03}"));
    s.create(p.clone()).await.unwrap();
    last = Some(p.id);
  }
  s.delete(EntityKind::Products, last.unwrap()).await.unwrap();

  assert_eq!(s.next_sequence(EntityKind::Products).await.unwrap(), 4);
}

#[tokio::test]
async fn clear_does_not_reset_sequences() {
  let s = store().await;
  s.next_sequence(EntityKind::Budgets).await.unwrap();
  s.next_sequence(EntityKind::Budgets).await.unwrap();

  s.clear(EntityKind::Budgets).await.unwrap();

  assert_eq!(s.next_sequence(EntityKind::Budgets).await.unwrap(), 3);
}
