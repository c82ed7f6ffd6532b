//! Value types shared across several collection kinds.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::{
  FieldViolation, check_non_negative, check_positive,
};

// ─── Payment ─────────────────────────────────────────────────────────────────

/// Settlement method for sales, invoices, expenses, and cash movements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
  Cash,
  CreditCard,
  DebitCard,
  Pix,
  BankTransfer,
  Check,
}

impl PaymentMethod {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Cash => "cash",
      Self::CreditCard => "credit_card",
      Self::DebitCard => "debit_card",
      Self::Pix => "pix",
      Self::BankTransfer => "bank_transfer",
      Self::Check => "check",
    }
  }
}

// ─── Line items ──────────────────────────────────────────────────────────────

/// One product line on a sale, purchase, or service order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
  pub product_id:   Uuid,
  pub product_name: String,
  pub quantity:     f64,
  pub unit_price:   f64,
  pub subtotal:     f64,
}

/// Validate each line item independently: quantity strictly positive,
/// prices and subtotals non-negative.
pub(crate) fn check_line_items(
  v: &mut Vec<FieldViolation>,
  field: &str,
  items: &[LineItem],
) {
  for (i, item) in items.iter().enumerate() {
    check_positive(v, &format!("{field}[{i}].quantity"), item.quantity);
    check_non_negative(v, &format!("{field}[{i}].unit_price"), item.unit_price);
    check_non_negative(v, &format!("{field}[{i}].subtotal"), item.subtotal);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn item(quantity: f64, unit_price: f64, subtotal: f64) -> LineItem {
    LineItem {
      product_id: Uuid::new_v4(),
      product_name: "Widget".into(),
      quantity,
      unit_price,
      subtotal,
    }
  }

  #[test]
  fn line_items_validated_independently() {
    let mut v = Vec::new();
    let items = [item(1.0, 10.0, 10.0), item(0.0, -1.0, 5.0)];
    check_line_items(&mut v, "items", &items);

    let fields: Vec<_> = v.iter().map(|f| f.field.as_str()).collect();
    assert_eq!(fields, ["items[1].quantity", "items[1].unit_price"]);
  }
}
