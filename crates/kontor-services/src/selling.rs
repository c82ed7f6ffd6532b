//! Sale, quote (budget), and invoice services.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use kontor_core::{
  Error, Result,
  catalog::{NewStockMovement, Product, StockMovementType},
  common::LineItem,
  entity::{FieldViolation, IndexValue},
  kind::EntityKind,
  selling::{
    Budget, BudgetPatch, BudgetStatus, Invoice, InvoicePatch, InvoiceStatus,
    NewBudget, NewInvoice, NewSale, Sale, SalePatch, SaleStatus,
  },
  store::DocumentStore,
};

// ─── Sales ───────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct SaleService<S> {
  store: S,
}

impl<S: DocumentStore> SaleService<S> {
  pub fn new(store: S) -> Self { Self { store } }

  /// Record a sale, then decrement product stock for each line item and
  /// journal the outflow.
  ///
  /// The sale and the stock writes touch different collections, so no
  /// single transaction covers them. If any stock step fails, the steps
  /// already applied are compensated — stock restored, journal rows
  /// removed, the sale deleted — before the error is returned.
  pub async fn create(&self, input: NewSale) -> Result<Sale> {
    let number = self.store.next_sequence(EntityKind::Sales).await?;
    let now = Utc::now();
    let sale = input.build(number, now);
    self.store.create(sale.clone()).await?;

    let mut applied: Vec<(Product, Uuid)> = Vec::new();
    for (i, item) in sale.items.iter().enumerate() {
      match self.take_stock(&sale, i, item, now).await {
        Ok(step) => applied.push(step),
        Err(err) => {
          self.compensate(&sale, applied).await;
          return Err(err);
        }
      }
    }

    Ok(sale)
  }

  /// Decrement one product's stock and journal the movement. Returns the
  /// product's prior state and the journal row id, for compensation.
  async fn take_stock(
    &self,
    sale: &Sale,
    item_index: usize,
    item: &LineItem,
    now: DateTime<Utc>,
  ) -> Result<(Product, Uuid)> {
    let product: Product = self
      .store
      .get(item.product_id)
      .await?
      .ok_or_else(|| Error::not_found(EntityKind::Products, item.product_id))?;

    if product.stock_quantity < item.quantity {
      return Err(Error::schema(
        EntityKind::Sales,
        vec![FieldViolation::new(
          format!("items[{item_index}].quantity"),
          format!(
            "insufficient stock for product {}: {} requested, {} available",
            product.code, item.quantity, product.stock_quantity
          ),
        )],
      ));
    }

    let prior = product.clone();
    let mut updated = product;
    updated.stock_quantity -= item.quantity;
    updated.updated_at = now;
    self.store.replace(updated).await?;

    let movement = NewStockMovement {
      product_id: item.product_id,
      movement_type: StockMovementType::Out,
      quantity: item.quantity,
      unit_cost: None,
      reason: format!("sale #{}", sale.sale_number),
      reference_id: Some(sale.id),
      user_id: sale.user_id,
    }
    .build(now);
    let movement_id = movement.id;
    self.store.create(movement).await?;

    Ok((prior, movement_id))
  }

  /// Best-effort reversal of a partially-applied sale. Failures here are
  /// logged and swallowed — the caller already has the original error.
  async fn compensate(&self, sale: &Sale, applied: Vec<(Product, Uuid)>) {
    for (prior, movement_id) in applied {
      let product_id = prior.id;
      if let Err(err) = self.store.replace(prior).await {
        tracing::warn!(%product_id, error = %err, "stock restore failed");
      }
      if let Err(err) =
        self.store.delete(EntityKind::StockMovements, movement_id).await
      {
        tracing::warn!(%movement_id, error = %err, "journal cleanup failed");
      }
    }
    if let Err(err) = self.store.delete(EntityKind::Sales, sale.id).await {
      tracing::warn!(sale_id = %sale.id, error = %err, "sale rollback failed");
    }
  }

  pub async fn update(&self, id: Uuid, patch: SalePatch) -> Result<Sale> {
    let mut sale: Sale = self
      .store
      .get(id)
      .await?
      .ok_or_else(|| Error::not_found(EntityKind::Sales, id))?;
    patch.apply(&mut sale);
    self.store.replace(sale.clone()).await?;
    Ok(sale)
  }

  pub async fn delete(&self, id: Uuid) -> Result<()> {
    self.store.delete(EntityKind::Sales, id).await
  }

  pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Sale>> {
    self.store.get(id).await
  }

  pub async fn get_all(&self) -> Result<Vec<Sale>> { self.store.get_all().await }

  pub async fn get_by_client(&self, client_id: Uuid) -> Result<Vec<Sale>> {
    self.store.get_by_index("client_id", IndexValue::from(client_id)).await
  }

  pub async fn get_by_user(&self, user_id: Uuid) -> Result<Vec<Sale>> {
    self.store.get_by_index("user_id", IndexValue::from(user_id)).await
  }

  pub async fn get_by_status(&self, status: SaleStatus) -> Result<Vec<Sale>> {
    let mut sales: Vec<Sale> = self.store.get_all().await?;
    sales.retain(|s| s.status == status);
    Ok(sales)
  }
}

// ─── Budgets (quotes) ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct BudgetService<S> {
  store: S,
}

impl<S: DocumentStore> BudgetService<S> {
  pub fn new(store: S) -> Self { Self { store } }

  pub async fn create(&self, input: NewBudget) -> Result<Budget> {
    let number = self.store.next_sequence(EntityKind::Budgets).await?;
    let budget = input.build(number, Utc::now());
    self.store.create(budget.clone()).await?;
    Ok(budget)
  }

  pub async fn update(&self, id: Uuid, patch: BudgetPatch) -> Result<Budget> {
    let mut budget: Budget = self
      .store
      .get(id)
      .await?
      .ok_or_else(|| Error::not_found(EntityKind::Budgets, id))?;
    patch.apply(&mut budget);
    budget.updated_at = Utc::now();
    self.store.replace(budget.clone()).await?;
    Ok(budget)
  }

  pub async fn delete(&self, id: Uuid) -> Result<()> {
    self.store.delete(EntityKind::Budgets, id).await
  }

  pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Budget>> {
    self.store.get(id).await
  }

  pub async fn get_all(&self) -> Result<Vec<Budget>> {
    self.store.get_all().await
  }

  pub async fn get_by_status(&self, status: BudgetStatus) -> Result<Vec<Budget>> {
    self.store.get_by_index("status", IndexValue::from(status.as_str())).await
  }

  pub async fn get_by_client(&self, client_id: Uuid) -> Result<Vec<Budget>> {
    self.store.get_by_index("client_id", IndexValue::from(client_id)).await
  }
}

// ─── Invoices ────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct InvoiceService<S> {
  store: S,
}

impl<S: DocumentStore> InvoiceService<S> {
  pub fn new(store: S) -> Self { Self { store } }

  pub async fn create(&self, input: NewInvoice) -> Result<Invoice> {
    let number = self.store.next_sequence(EntityKind::Invoices).await?;
    let invoice = input.build(number, Utc::now());
    self.store.create(invoice.clone()).await?;
    Ok(invoice)
  }

  pub async fn update(&self, id: Uuid, patch: InvoicePatch) -> Result<Invoice> {
    let mut invoice: Invoice = self
      .store
      .get(id)
      .await?
      .ok_or_else(|| Error::not_found(EntityKind::Invoices, id))?;
    patch.apply(&mut invoice);
    invoice.updated_at = Utc::now();
    self.store.replace(invoice.clone()).await?;
    Ok(invoice)
  }

  pub async fn delete(&self, id: Uuid) -> Result<()> {
    self.store.delete(EntityKind::Invoices, id).await
  }

  pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Invoice>> {
    self.store.get(id).await
  }

  pub async fn get_all(&self) -> Result<Vec<Invoice>> {
    self.store.get_all().await
  }

  pub async fn get_by_client(&self, client_id: Uuid) -> Result<Vec<Invoice>> {
    self.store.get_by_index("client_id", IndexValue::from(client_id)).await
  }

  pub async fn get_by_status(
    &self,
    status: InvoiceStatus,
  ) -> Result<Vec<Invoice>> {
    self.store.get_by_index("status", IndexValue::from(status.as_str())).await
  }

  /// Pending invoices whose due date has passed as of `now`.
  pub async fn get_overdue(&self, now: DateTime<Utc>) -> Result<Vec<Invoice>> {
    let mut invoices: Vec<Invoice> = self.store.get_all().await?;
    invoices.retain(|i| i.status == InvoiceStatus::Pending && i.due_date < now);
    Ok(invoices)
  }
}
