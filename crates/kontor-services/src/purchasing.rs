//! Purchase service.

use chrono::Utc;
use uuid::Uuid;

use kontor_core::{
  Error, Result,
  entity::IndexValue,
  kind::EntityKind,
  purchasing::{NewPurchase, Purchase, PurchasePatch, PurchaseStatus},
  store::DocumentStore,
};

#[derive(Clone)]
pub struct PurchaseService<S> {
  store: S,
}

impl<S: DocumentStore> PurchaseService<S> {
  pub fn new(store: S) -> Self { Self { store } }

  pub async fn create(&self, input: NewPurchase) -> Result<Purchase> {
    let number = self.store.next_sequence(EntityKind::Purchases).await?;
    let purchase = input.build(number, Utc::now());
    self.store.create(purchase.clone()).await?;
    Ok(purchase)
  }

  pub async fn update(&self, id: Uuid, patch: PurchasePatch) -> Result<Purchase> {
    let mut purchase: Purchase = self
      .store
      .get(id)
      .await?
      .ok_or_else(|| Error::not_found(EntityKind::Purchases, id))?;
    patch.apply(&mut purchase);
    purchase.updated_at = Utc::now();
    self.store.replace(purchase.clone()).await?;
    Ok(purchase)
  }

  pub async fn delete(&self, id: Uuid) -> Result<()> {
    self.store.delete(EntityKind::Purchases, id).await
  }

  pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Purchase>> {
    self.store.get(id).await
  }

  pub async fn get_all(&self) -> Result<Vec<Purchase>> {
    self.store.get_all().await
  }

  pub async fn get_by_supplier(&self, supplier_id: Uuid) -> Result<Vec<Purchase>> {
    self.store.get_by_index("supplier_id", IndexValue::from(supplier_id)).await
  }

  pub async fn get_by_status(
    &self,
    status: PurchaseStatus,
  ) -> Result<Vec<Purchase>> {
    self.store.get_by_index("status", IndexValue::from(status.as_str())).await
  }
}
