//! Revenue-side records: sales, quotes (budgets), and invoices.
//!
//! Sales, budgets, and invoices are numbered kinds — their business
//! numbers come from the store's sequence counters, and the matching
//! `*_number` index is unique.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  common::{LineItem, PaymentMethod, check_line_items},
  entity::{
    Entity, FieldViolation, IndexEntry, check_non_negative, check_opt_str,
    check_positive, finish,
  },
  kind::EntityKind,
};

// ─── Sale ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
  Completed,
  Cancelled,
  Pending,
}

impl SaleStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Completed => "completed",
      Self::Cancelled => "cancelled",
      Self::Pending => "pending",
    }
  }
}

/// A point-of-sale transaction. Line items snapshot the product name and
/// price at the moment of sale; later catalog edits do not rewrite them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
  pub id:             Uuid,
  pub sale_number:    u64,
  pub client_id:      Option<Uuid>,
  pub user_id:        Uuid,
  pub total_amount:   f64,
  pub discount:       f64,
  pub final_amount:   f64,
  pub payment_method: PaymentMethod,
  pub status:         SaleStatus,
  pub items:          Vec<LineItem>,
  pub notes:          Option<String>,
  pub created_at:     DateTime<Utc>,
}

impl Entity for Sale {
  const KIND: EntityKind = EntityKind::Sales;

  fn id(&self) -> Uuid { self.id }

  fn index_entries(&self) -> Vec<IndexEntry> {
    let mut entries = vec![
      IndexEntry::new("sale_number", self.sale_number),
      IndexEntry::new("user_id", self.user_id),
      IndexEntry::new("created_at", self.created_at.to_rfc3339()),
    ];
    if let Some(client_id) = self.client_id {
      entries.push(IndexEntry::new("client_id", client_id));
    }
    entries
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
pub struct NewSale {
  pub client_id:      Option<Uuid>,
  pub user_id:        Uuid,
  pub total_amount:   f64,
  pub discount:       Option<f64>,
  pub final_amount:   f64,
  pub payment_method: PaymentMethod,
  pub status:         SaleStatus,
  pub items:          Vec<LineItem>,
  pub notes:          Option<String>,
}

impl NewSale {
  /// `sale_number` comes from the store's sequence counter.
  pub fn build(self, sale_number: u64, now: DateTime<Utc>) -> Sale {
    Sale {
      id: Uuid::new_v4(),
      sale_number,
      client_id: self.client_id,
      user_id: self.user_id,
      total_amount: self.total_amount,
      discount: self.discount.unwrap_or(0.0),
      final_amount: self.final_amount,
      payment_method: self.payment_method,
      status: self.status,
      items: self.items,
      notes: self.notes,
      created_at: now,
    }
  }
}

/// Partial update for [`Sale`]. The sale number, items, and amounts are
/// frozen at creation; only disposition fields may change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SalePatch {
  pub status:         Option<SaleStatus>,
  pub payment_method: Option<PaymentMethod>,
  pub notes:          Option<String>,
}

impl SalePatch {
  pub fn apply(self, sale: &mut Sale) {
    if let Some(status) = self.status {
      sale.status = status;
    }
    if let Some(payment_method) = self.payment_method {
      sale.payment_method = payment_method;
    }
    if let Some(notes) = self.notes {
      sale.notes = Some(notes);
    }
  }
}

// ─── Budget (quote) ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
  Draft,
  Sent,
  Approved,
  Rejected,
  Expired,
  Converted,
}

impl BudgetStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Draft => "draft",
      Self::Sent => "sent",
      Self::Approved => "approved",
      Self::Rejected => "rejected",
      Self::Expired => "expired",
      Self::Converted => "converted",
    }
  }
}

/// A quote line. Unlike [`LineItem`], the product reference is optional —
/// quotes may price services or goods not yet in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetItem {
  pub product_id:  Option<Uuid>,
  pub description: String,
  pub quantity:    f64,
  pub unit_price:  f64,
  pub subtotal:    f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
  pub id:                Uuid,
  pub budget_number:     u64,
  pub client_id:         Uuid,
  pub user_id:           Uuid,
  pub issue_date:        DateTime<Utc>,
  pub expiry_date:       DateTime<Utc>,
  pub total_amount:      f64,
  pub discount:          f64,
  pub final_amount:      f64,
  pub status:            BudgetStatus,
  pub items:             Vec<BudgetItem>,
  pub notes:             Option<String>,
  pub terms:             Option<String>,
  /// Set when the quote is converted into a sale.
  pub converted_sale_id: Option<Uuid>,
  pub created_at:        DateTime<Utc>,
  pub updated_at:        DateTime<Utc>,
}

impl Entity for Budget {
  const KIND: EntityKind = EntityKind::Budgets;

  fn id(&self) -> Uuid { self.id }

  fn index_entries(&self) -> Vec<IndexEntry> {
    vec![
      IndexEntry::new("budget_number", self.budget_number),
      IndexEntry::new("client_id", self.client_id),
      IndexEntry::new("status", self.status.as_str()),
      IndexEntry::new("created_at", self.created_at.to_rfc3339()),
    ]
  }

  fn validate(&self) -> Result<(), Vec<FieldViolation>> {
    let mut v = Vec::new();
    check_non_negative(&mut v, "total_amount", self.total_amount);
    check_non_negative(&mut v, "discount", self.discount);
    check_non_negative(&mut v, "final_amount", self.final_amount);
    for (i, item) in self.items.iter().enumerate() {
      check_positive(&mut v, &format!("items[{i}].quantity"), item.quantity);
      check_non_negative(
        &mut v,
        &format!("items[{i}].unit_price"),
        item.unit_price,
      );
      check_non_negative(&mut v, &format!("items[{i}].subtotal"), item.subtotal);
    }
    check_opt_str(&mut v, "notes", self.notes.as_ref(), 1000);
    check_opt_str(&mut v, "terms", self.terms.as_ref(), 2000);
    finish(v)
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewBudget {
  pub client_id:    Uuid,
  pub user_id:      Uuid,
  pub issue_date:   DateTime<Utc>,
  pub expiry_date:  DateTime<Utc>,
  pub total_amount: f64,
  pub discount:     Option<f64>,
  pub final_amount: f64,
  pub status:       BudgetStatus,
  pub items:        Vec<BudgetItem>,
  pub notes:        Option<String>,
  pub terms:        Option<String>,
}

impl NewBudget {
  pub fn build(self, budget_number: u64, now: DateTime<Utc>) -> Budget {
    Budget {
      id: Uuid::new_v4(),
      budget_number,
      client_id: self.client_id,
      user_id: self.user_id,
      issue_date: self.issue_date,
      expiry_date: self.expiry_date,
      total_amount: self.total_amount,
      discount: self.discount.unwrap_or(0.0),
      final_amount: self.final_amount,
      status: self.status,
      items: self.items,
      notes: self.notes,
      terms: self.terms,
      converted_sale_id: None,
      created_at: now,
      updated_at: now,
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BudgetPatch {
  pub expiry_date:       Option<DateTime<Utc>>,
  pub total_amount:      Option<f64>,
  pub discount:          Option<f64>,
  pub final_amount:      Option<f64>,
  pub status:            Option<BudgetStatus>,
  pub items:             Option<Vec<BudgetItem>>,
  pub notes:             Option<String>,
  pub terms:             Option<String>,
  pub converted_sale_id: Option<Uuid>,
}

impl BudgetPatch {
  pub fn apply(self, budget: &mut Budget) {
    if let Some(expiry_date) = self.expiry_date {
      budget.expiry_date = expiry_date;
    }
    if let Some(total_amount) = self.total_amount {
      budget.total_amount = total_amount;
    }
    if let Some(discount) = self.discount {
      budget.discount = discount;
    }
    if let Some(final_amount) = self.final_amount {
      budget.final_amount = final_amount;
    }
    if let Some(status) = self.status {
      budget.status = status;
    }
    if let Some(items) = self.items {
      budget.items = items;
    }
    if let Some(notes) = self.notes {
      budget.notes = Some(notes);
    }
    if let Some(terms) = self.terms {
      budget.terms = Some(terms);
    }
    if let Some(converted_sale_id) = self.converted_sale_id {
      budget.converted_sale_id = Some(converted_sale_id);
    }
  }
}

// ─── Invoice ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
  Pending,
  Paid,
  Cancelled,
  Overdue,
}

impl InvoiceStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Pending => "pending",
      Self::Paid => "paid",
      Self::Cancelled => "cancelled",
      Self::Overdue => "overdue",
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
  pub id:             Uuid,
  pub invoice_number: u64,
  pub sale_id:        Option<Uuid>,
  pub client_id:      Uuid,
  pub issue_date:     DateTime<Utc>,
  pub due_date:       DateTime<Utc>,
  pub amount:         f64,
  pub paid_amount:    f64,
  pub status:         InvoiceStatus,
  pub payment_method: Option<PaymentMethod>,
  pub notes:          Option<String>,
  pub created_at:     DateTime<Utc>,
  pub updated_at:     DateTime<Utc>,
}

impl Entity for Invoice {
  const KIND: EntityKind = EntityKind::Invoices;

  fn id(&self) -> Uuid { self.id }

  fn index_entries(&self) -> Vec<IndexEntry> {
    vec![
      IndexEntry::new("invoice_number", self.invoice_number),
      IndexEntry::new("client_id", self.client_id),
      IndexEntry::new("status", self.status.as_str()),
      IndexEntry::new("due_date", self.due_date.to_rfc3339()),
    ]
  }

  fn validate(&self) -> Result<(), Vec<FieldViolation>> {
    let mut v = Vec::new();
    check_non_negative(&mut v, "amount", self.amount);
    check_non_negative(&mut v, "paid_amount", self.paid_amount);
    check_opt_str(&mut v, "notes", self.notes.as_ref(), 500);
    finish(v)
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewInvoice {
  pub sale_id:        Option<Uuid>,
  pub client_id:      Uuid,
  pub issue_date:     DateTime<Utc>,
  pub due_date:       DateTime<Utc>,
  pub amount:         f64,
  pub paid_amount:    Option<f64>,
  pub status:         InvoiceStatus,
  pub payment_method: Option<PaymentMethod>,
  pub notes:          Option<String>,
}

impl NewInvoice {
  pub fn build(self, invoice_number: u64, now: DateTime<Utc>) -> Invoice {
    Invoice {
      id: Uuid::new_v4(),
      invoice_number,
      sale_id: self.sale_id,
      client_id: self.client_id,
      issue_date: self.issue_date,
      due_date: self.due_date,
      amount: self.amount,
      paid_amount: self.paid_amount.unwrap_or(0.0),
      status: self.status,
      payment_method: self.payment_method,
      notes: self.notes,
      created_at: now,
      updated_at: now,
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvoicePatch {
  pub due_date:       Option<DateTime<Utc>>,
  pub amount:         Option<f64>,
  pub paid_amount:    Option<f64>,
  pub status:         Option<InvoiceStatus>,
  pub payment_method: Option<PaymentMethod>,
  pub notes:          Option<String>,
}

impl InvoicePatch {
  pub fn apply(self, invoice: &mut Invoice) {
    if let Some(due_date) = self.due_date {
      invoice.due_date = due_date;
    }
    if let Some(amount) = self.amount {
      invoice.amount = amount;
    }
    if let Some(paid_amount) = self.paid_amount {
      invoice.paid_amount = paid_amount;
    }
    if let Some(status) = self.status {
      invoice.status = status;
    }
    if let Some(payment_method) = self.payment_method {
      invoice.payment_method = Some(payment_method);
    }
    if let Some(notes) = self.notes {
      invoice.notes = Some(notes);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn zero_quantity_line_is_a_violation() {
    let sale = NewSale {
      client_id: None,
      user_id: Uuid::new_v4(),
      total_amount: 10.0,
      discount: None,
      final_amount: 10.0,
      payment_method: PaymentMethod::Pix,
      status: SaleStatus::Completed,
      items: vec![LineItem {
        product_id: Uuid::new_v4(),
        product_name: "Widget".into(),
        quantity: 0.0,
        unit_price: 10.0,
        subtotal: 0.0,
      }],
      notes: None,
    }
    .build(1, Utc::now());

    let violations = sale.validate().unwrap_err();
    assert_eq!(violations[0].field, "items[0].quantity");
  }

  #[test]
  fn budget_items_allow_missing_product_reference() {
    let budget = NewBudget {
      client_id: Uuid::new_v4(),
      user_id: Uuid::new_v4(),
      issue_date: Utc::now(),
      expiry_date: Utc::now(),
      total_amount: 150.0,
      discount: None,
      final_amount: 150.0,
      status: BudgetStatus::Draft,
      items: vec![BudgetItem {
        product_id: None,
        description: "On-site installation".into(),
        quantity: 1.0,
        unit_price: 150.0,
        subtotal: 150.0,
      }],
      notes: None,
      terms: None,
    }
    .build(7, Utc::now());

    assert!(budget.validate().is_ok());
    assert_eq!(budget.discount, 0.0);
    assert!(budget.converted_sale_id.is_none());
  }
}
