//! Catalog records: products and the stock movement journal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  entity::{
    Entity, FieldViolation, IndexEntry, check_non_negative, check_opt_str,
    check_str, finish,
  },
  kind::EntityKind,
};

// ─── Product ─────────────────────────────────────────────────────────────────

/// A sellable (or consumable) catalog item. `code` is the business key;
/// the `code` index is unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
  pub id:             Uuid,
  pub code:           String,
  pub name:           String,
  pub description:    Option<String>,
  pub category:       String,
  /// Sale unit, e.g. "UN", "KG", "L".
  pub unit:           String,
  pub cost_price:     f64,
  pub sale_price:     f64,
  pub stock_quantity: f64,
  pub min_stock:      f64,
  pub barcode:        Option<String>,
  pub active:         bool,
  pub created_at:     DateTime<Utc>,
  pub updated_at:     DateTime<Utc>,
}

impl Entity for Product {
  const KIND: EntityKind = EntityKind::Products;

  fn id(&self) -> Uuid { self.id }

  fn index_entries(&self) -> Vec<IndexEntry> {
    let mut entries = vec![
      IndexEntry::new("code", self.code.clone()),
      IndexEntry::new("category", self.category.clone()),
    ];
    if let Some(barcode) = &self.barcode {
      entries.push(IndexEntry::new("barcode", barcode.clone()));
    }
    entries
  }

  fn validate(&self) -> Result<(), Vec<FieldViolation>> {
    let mut v = Vec::new();
    check_str(&mut v, "code", &self.code, 1, 50);
    check_str(&mut v, "name", &self.name, 2, 200);
    check_opt_str(&mut v, "description", self.description.as_ref(), 1000);
    check_str(&mut v, "category", &self.category, 0, 100);
    check_str(&mut v, "unit", &self.unit, 0, 20);
    check_non_negative(&mut v, "cost_price", self.cost_price);
    check_non_negative(&mut v, "sale_price", self.sale_price);
    check_non_negative(&mut v, "stock_quantity", self.stock_quantity);
    check_non_negative(&mut v, "min_stock", self.min_stock);
    check_opt_str(&mut v, "barcode", self.barcode.as_ref(), 50);
    finish(v)
  }
}

/// Constructor input for [`Product`]. Omitted optional fields receive the
/// declared defaults before validation ever runs.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
  pub code:           String,
  pub name:           String,
  pub description:    Option<String>,
  pub category:       String,
  pub unit:           String,
  pub cost_price:     f64,
  pub sale_price:     f64,
  pub stock_quantity: Option<f64>,
  pub min_stock:      Option<f64>,
  pub barcode:        Option<String>,
  pub active:         Option<bool>,
}

impl NewProduct {
  pub fn build(self, now: DateTime<Utc>) -> Product {
    Product {
      id: Uuid::new_v4(),
      code: self.code,
      name: self.name,
      description: self.description,
      category: self.category,
      unit: self.unit,
      cost_price: self.cost_price,
      sale_price: self.sale_price,
      stock_quantity: self.stock_quantity.unwrap_or(0.0),
      min_stock: self.min_stock.unwrap_or(0.0),
      barcode: self.barcode,
      active: self.active.unwrap_or(true),
      created_at: now,
      updated_at: now,
    }
  }
}

/// Partial update for [`Product`]; unset fields retain their prior value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPatch {
  pub code:           Option<String>,
  pub name:           Option<String>,
  pub description:    Option<String>,
  pub category:       Option<String>,
  pub unit:           Option<String>,
  pub cost_price:     Option<f64>,
  pub sale_price:     Option<f64>,
  pub stock_quantity: Option<f64>,
  pub min_stock:      Option<f64>,
  pub barcode:        Option<String>,
  pub active:         Option<bool>,
}

impl ProductPatch {
  pub fn apply(self, product: &mut Product) {
    if let Some(code) = self.code {
      product.code = code;
    }
    if let Some(name) = self.name {
      product.name = name;
    }
    if let Some(description) = self.description {
      product.description = Some(description);
    }
    if let Some(category) = self.category {
      product.category = category;
    }
    if let Some(unit) = self.unit {
      product.unit = unit;
    }
    if let Some(cost_price) = self.cost_price {
      product.cost_price = cost_price;
    }
    if let Some(sale_price) = self.sale_price {
      product.sale_price = sale_price;
    }
    if let Some(stock_quantity) = self.stock_quantity {
      product.stock_quantity = stock_quantity;
    }
    if let Some(min_stock) = self.min_stock {
      product.min_stock = min_stock;
    }
    if let Some(barcode) = self.barcode {
      product.barcode = Some(barcode);
    }
    if let Some(active) = self.active {
      product.active = active;
    }
  }
}

// ─── Stock movement ──────────────────────────────────────────────────────────

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockMovementType {
  In,
  Out,
  Adjustment,
}

impl StockMovementType {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::In => "in",
      Self::Out => "out",
      Self::Adjustment => "adjustment",
    }
  }
}

/// One entry in the stock journal. Quantity is signed for adjustments;
/// the movement that created a document is never edited, only deleted
/// when its originating operation is reversed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockMovement {
  pub id:            Uuid,
  pub product_id:    Uuid,
  #[serde(rename = "type")]
  pub movement_type: StockMovementType,
  pub quantity:      f64,
  pub unit_cost:     Option<f64>,
  pub reason:        String,
  /// Originating document, e.g. a sale or purchase id.
  pub reference_id:  Option<Uuid>,
  pub user_id:       Uuid,
  pub created_at:    DateTime<Utc>,
}

impl Entity for StockMovement {
  const KIND: EntityKind = EntityKind::StockMovements;

  fn id(&self) -> Uuid { self.id }

  fn index_entries(&self) -> Vec<IndexEntry> {
    vec![
      IndexEntry::new("product_id", self.product_id),
      IndexEntry::new("type", self.movement_type.as_str()),
      IndexEntry::new("created_at", self.created_at.to_rfc3339()),
    ]
  }

  fn validate(&self) -> Result<(), Vec<FieldViolation>> {
    let mut v = Vec::new();
    if let Some(cost) = self.unit_cost {
      check_non_negative(&mut v, "unit_cost", cost);
    }
    check_str(&mut v, "reason", &self.reason, 1, 500);
    finish(v)
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewStockMovement {
  pub product_id:    Uuid,
  #[serde(rename = "type")]
  pub movement_type: StockMovementType,
  pub quantity:      f64,
  pub unit_cost:     Option<f64>,
  pub reason:        String,
  pub reference_id:  Option<Uuid>,
  pub user_id:       Uuid,
}

impl NewStockMovement {
  pub fn build(self, now: DateTime<Utc>) -> StockMovement {
    StockMovement {
      id: Uuid::new_v4(),
      product_id: self.product_id,
      movement_type: self.movement_type,
      quantity: self.quantity,
      unit_cost: self.unit_cost,
      reason: self.reason,
      reference_id: self.reference_id,
      user_id: self.user_id,
      created_at: now,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn new_product() -> NewProduct {
    NewProduct {
      code: "P-001".into(),
      name: "Espresso beans".into(),
      description: None,
      category: "coffee".into(),
      unit: "KG".into(),
      cost_price: 38.0,
      sale_price: 59.9,
      stock_quantity: None,
      min_stock: None,
      barcode: None,
      active: None,
    }
  }

  #[test]
  fn constructor_applies_defaults() {
    let product = new_product().build(Utc::now());
    assert_eq!(product.stock_quantity, 0.0);
    assert_eq!(product.min_stock, 0.0);
    assert!(product.active);
    assert!(product.validate().is_ok());
  }

  #[test]
  fn negative_price_is_a_violation() {
    let mut product = new_product().build(Utc::now());
    product.sale_price = -1.0;
    let violations = product.validate().unwrap_err();
    assert_eq!(violations[0].field, "sale_price");
  }

  #[test]
  fn barcode_only_indexed_when_present() {
    let mut product = new_product().build(Utc::now());
    assert!(!product.index_entries().iter().any(|e| e.index == "barcode"));
    product.barcode = Some("789100000000".into());
    assert!(product.index_entries().iter().any(|e| e.index == "barcode"));
  }

  #[test]
  fn patch_merges_only_set_fields() {
    let mut product = new_product().build(Utc::now());
    let patch = ProductPatch {
      sale_price: Some(64.9),
      ..Default::default()
    };
    patch.apply(&mut product);
    assert_eq!(product.sale_price, 64.9);
    assert_eq!(product.code, "P-001");
  }
}
