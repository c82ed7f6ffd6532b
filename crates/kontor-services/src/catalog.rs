//! Product and stock movement services.

use chrono::Utc;
use uuid::Uuid;

use kontor_core::{
  Error, Result,
  catalog::{
    NewProduct, NewStockMovement, Product, ProductPatch, StockMovement,
    StockMovementType,
  },
  entity::{FieldViolation, IndexValue},
  kind::EntityKind,
  store::DocumentStore,
};

// ─── Products ────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct ProductService<S> {
  store: S,
}

impl<S: DocumentStore> ProductService<S> {
  pub fn new(store: S) -> Self { Self { store } }

  pub async fn create(&self, input: NewProduct) -> Result<Product> {
    let product = input.build(Utc::now());
    self.store.create(product.clone()).await?;
    Ok(product)
  }

  pub async fn update(&self, id: Uuid, patch: ProductPatch) -> Result<Product> {
    let mut product: Product = self
      .store
      .get(id)
      .await?
      .ok_or_else(|| Error::not_found(EntityKind::Products, id))?;
    patch.apply(&mut product);
    product.updated_at = Utc::now();
    self.store.replace(product.clone()).await?;
    Ok(product)
  }

  pub async fn delete(&self, id: Uuid) -> Result<()> {
    self.store.delete(EntityKind::Products, id).await
  }

  pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Product>> {
    self.store.get(id).await
  }

  pub async fn get_all(&self) -> Result<Vec<Product>> {
    self.store.get_all().await
  }

  pub async fn get_by_category(&self, category: &str) -> Result<Vec<Product>> {
    self.store.get_by_index("category", IndexValue::from(category)).await
  }

  /// Look a product up by its unique business code.
  pub async fn get_by_code(&self, code: &str) -> Result<Option<Product>> {
    let mut matches: Vec<Product> =
      self.store.get_by_index("code", IndexValue::from(code)).await?;
    Ok(matches.pop())
  }

  /// Active products at or below their minimum stock level.
  pub async fn low_stock(&self) -> Result<Vec<Product>> {
    let mut products: Vec<Product> = self.store.get_all().await?;
    products.retain(|p| p.active && p.stock_quantity <= p.min_stock);
    Ok(products)
  }

  /// Apply a signed stock delta and journal it as an adjustment.
  ///
  /// The product write and the journal write hit different collections;
  /// if journaling fails the product is restored before the error is
  /// returned.
  pub async fn adjust_stock(
    &self,
    id: Uuid,
    delta: f64,
    reason: String,
    user_id: Uuid,
  ) -> Result<Product> {
    let product: Product = self
      .store
      .get(id)
      .await?
      .ok_or_else(|| Error::not_found(EntityKind::Products, id))?;
    let prior = product.clone();
    let now = Utc::now();

    let mut updated = product;
    updated.stock_quantity += delta;
    if updated.stock_quantity < 0.0 {
      return Err(Error::schema(
        EntityKind::Products,
        vec![FieldViolation::new(
          "stock_quantity",
          format!("adjustment by {delta} would drive stock negative"),
        )],
      ));
    }
    updated.updated_at = now;
    self.store.replace(updated.clone()).await?;

    let movement = NewStockMovement {
      product_id: id,
      movement_type: StockMovementType::Adjustment,
      quantity: delta,
      unit_cost: None,
      reason,
      reference_id: None,
      user_id,
    }
    .build(now);

    if let Err(err) = self.store.create(movement).await {
      if let Err(restore_err) = self.store.replace(prior).await {
        tracing::warn!(%id, error = %restore_err, "stock restore failed");
      }
      return Err(err);
    }

    Ok(updated)
  }
}

// ─── Stock movements ─────────────────────────────────────────────────────────

/// The stock journal. Entries are never edited; a movement is removed
/// only when its originating operation is reversed.
#[derive(Clone)]
pub struct StockMovementService<S> {
  store: S,
}

impl<S: DocumentStore> StockMovementService<S> {
  pub fn new(store: S) -> Self { Self { store } }

  pub async fn create(&self, input: NewStockMovement) -> Result<StockMovement> {
    let movement = input.build(Utc::now());
    self.store.create(movement.clone()).await?;
    Ok(movement)
  }

  pub async fn delete(&self, id: Uuid) -> Result<()> {
    self.store.delete(EntityKind::StockMovements, id).await
  }

  pub async fn get_by_id(&self, id: Uuid) -> Result<Option<StockMovement>> {
    self.store.get(id).await
  }

  pub async fn get_all(&self) -> Result<Vec<StockMovement>> {
    self.store.get_all().await
  }

  pub async fn get_by_product(
    &self,
    product_id: Uuid,
  ) -> Result<Vec<StockMovement>> {
    self.store.get_by_index("product_id", IndexValue::from(product_id)).await
  }

  pub async fn get_by_type(
    &self,
    movement_type: StockMovementType,
  ) -> Result<Vec<StockMovement>> {
    self
      .store
      .get_by_index("type", IndexValue::from(movement_type.as_str()))
      .await
  }
}
