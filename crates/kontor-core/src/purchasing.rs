//! Procurement records: purchases from suppliers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  common::{LineItem, check_line_items},
  entity::{
    Entity, FieldViolation, IndexEntry, check_non_negative, check_opt_str,
    finish,
  },
  kind::EntityKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseStatus {
  Pending,
  Approved,
  Received,
  Cancelled,
}

impl PurchaseStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Pending => "pending",
      Self::Approved => "approved",
      Self::Received => "received",
      Self::Cancelled => "cancelled",
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Purchase {
  pub id:              Uuid,
  pub purchase_number: u64,
  pub supplier_id:     Uuid,
  pub user_id:         Uuid,
  pub total_amount:    f64,
  pub discount:        f64,
  pub final_amount:    f64,
  pub status:          PurchaseStatus,
  pub items:           Vec<LineItem>,
  pub expected_date:   Option<DateTime<Utc>>,
  pub received_date:   Option<DateTime<Utc>>,
  pub notes:           Option<String>,
  pub created_at:      DateTime<Utc>,
  pub updated_at:      DateTime<Utc>,
}

impl Entity for Purchase {
  const KIND: EntityKind = EntityKind::Purchases;

  fn id(&self) -> Uuid { self.id }

  fn index_entries(&self) -> Vec<IndexEntry> {
    vec![
      IndexEntry::new("purchase_number", self.purchase_number),
      IndexEntry::new("supplier_id", self.supplier_id),
      IndexEntry::new("status", self.status.as_str()),
      IndexEntry::new("created_at", self.created_at.to_rfc3339()),
    ]
  }

  fn validate(&self) -> Result<(), Vec<FieldViolation>> {
    let mut v = Vec::new();
    check_non_negative(&mut v, "total_amount", self.total_amount);
    check_non_negative(&mut v, "discount", self.discount);
    check_non_negative(&mut v, "final_amount", self.final_amount);
    check_line_items(&mut v, "items", &self.items);
    check_opt_str(&mut v, "notes", self.notes.as_ref(), 500);
    finish(v)
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPurchase {
  pub supplier_id:   Uuid,
  pub user_id:       Uuid,
  pub total_amount:  f64,
  pub discount:      Option<f64>,
  pub final_amount:  f64,
  pub status:        PurchaseStatus,
  pub items:         Vec<LineItem>,
  pub expected_date: Option<DateTime<Utc>>,
  pub notes:         Option<String>,
}

impl NewPurchase {
  pub fn build(self, purchase_number: u64, now: DateTime<Utc>) -> Purchase {
    Purchase {
      id: Uuid::new_v4(),
      purchase_number,
      supplier_id: self.supplier_id,
      user_id: self.user_id,
      total_amount: self.total_amount,
      discount: self.discount.unwrap_or(0.0),
      final_amount: self.final_amount,
      status: self.status,
      items: self.items,
      expected_date: self.expected_date,
      received_date: None,
      notes: self.notes,
      created_at: now,
      updated_at: now,
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PurchasePatch {
  pub total_amount:  Option<f64>,
  pub discount:      Option<f64>,
  pub final_amount:  Option<f64>,
  pub status:        Option<PurchaseStatus>,
  pub items:         Option<Vec<LineItem>>,
  pub expected_date: Option<DateTime<Utc>>,
  pub received_date: Option<DateTime<Utc>>,
  pub notes:         Option<String>,
}

impl PurchasePatch {
  pub fn apply(self, purchase: &mut Purchase) {
    if let Some(total_amount) = self.total_amount {
      purchase.total_amount = total_amount;
    }
    if let Some(discount) = self.discount {
      purchase.discount = discount;
    }
    if let Some(final_amount) = self.final_amount {
      purchase.final_amount = final_amount;
    }
    if let Some(status) = self.status {
      purchase.status = status;
    }
    if let Some(items) = self.items {
      purchase.items = items;
    }
    if let Some(expected_date) = self.expected_date {
      purchase.expected_date = Some(expected_date);
    }
    if let Some(received_date) = self.received_date {
      purchase.received_date = Some(received_date);
    }
    if let Some(notes) = self.notes {
      purchase.notes = Some(notes);
    }
  }
}
