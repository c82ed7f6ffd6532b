//! Collection declarations — the fixed schema surface of the store.
//!
//! Every collection's name, index set, and numbering behaviour is declared
//! here, at compile time. Extending these tables (new kinds, new indexes)
//! is the only permitted form of migration; existing declarations are
//! never redefined in a way that invalidates stored documents.

use serde::{Deserialize, Serialize};

// ─── Index declarations ──────────────────────────────────────────────────────

/// One secondary index declared on a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexSpec {
  pub name:   &'static str,
  pub unique: bool,
}

/// Shorthands for the declaration tables below.
macro_rules! unique {
  ($name:literal) => {
    IndexSpec { name: $name, unique: true }
  };
}

macro_rules! index {
  ($name:literal) => {
    IndexSpec { name: $name, unique: false }
  };
}

// ─── EntityKind ──────────────────────────────────────────────────────────────

/// The collection kinds managed by the store.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
  Users,
  Products,
  Clients,
  Sales,
  Invoices,
  CashRegisters,
  CashTransactions,
  Accounts,
  StockMovements,
  Suppliers,
  Purchases,
  Expenses,
  Employees,
  Budgets,
  ServiceOrders,
  Contracts,
  CostCenters,
  ChartOfAccounts,
  FixedAssets,
  TimeClocks,
  ProductionOrders,
}

impl EntityKind {
  pub const ALL: [EntityKind; 21] = [
    Self::Users,
    Self::Products,
    Self::Clients,
    Self::Sales,
    Self::Invoices,
    Self::CashRegisters,
    Self::CashTransactions,
    Self::Accounts,
    Self::StockMovements,
    Self::Suppliers,
    Self::Purchases,
    Self::Expenses,
    Self::Employees,
    Self::Budgets,
    Self::ServiceOrders,
    Self::Contracts,
    Self::CostCenters,
    Self::ChartOfAccounts,
    Self::FixedAssets,
    Self::TimeClocks,
    Self::ProductionOrders,
  ];

  /// The collection name as stored. Must match the
  /// `rename_all = "snake_case"` serde tags above.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Users => "users",
      Self::Products => "products",
      Self::Clients => "clients",
      Self::Sales => "sales",
      Self::Invoices => "invoices",
      Self::CashRegisters => "cash_registers",
      Self::CashTransactions => "cash_transactions",
      Self::Accounts => "accounts",
      Self::StockMovements => "stock_movements",
      Self::Suppliers => "suppliers",
      Self::Purchases => "purchases",
      Self::Expenses => "expenses",
      Self::Employees => "employees",
      Self::Budgets => "budgets",
      Self::ServiceOrders => "service_orders",
      Self::Contracts => "contracts",
      Self::CostCenters => "cost_centers",
      Self::ChartOfAccounts => "chart_of_accounts",
      Self::FixedAssets => "fixed_assets",
      Self::TimeClocks => "time_clocks",
      Self::ProductionOrders => "production_orders",
    }
  }

  /// Human-readable singular label, used in error messages.
  pub fn label(self) -> &'static str {
    match self {
      Self::Users => "user",
      Self::Products => "product",
      Self::Clients => "client",
      Self::Sales => "sale",
      Self::Invoices => "invoice",
      Self::CashRegisters => "cash register",
      Self::CashTransactions => "cash transaction",
      Self::Accounts => "account entry",
      Self::StockMovements => "stock movement",
      Self::Suppliers => "supplier",
      Self::Purchases => "purchase",
      Self::Expenses => "expense",
      Self::Employees => "employee",
      Self::Budgets => "quote",
      Self::ServiceOrders => "service order",
      Self::Contracts => "contract",
      Self::CostCenters => "cost center",
      Self::ChartOfAccounts => "ledger account",
      Self::FixedAssets => "fixed asset",
      Self::TimeClocks => "time clock entry",
      Self::ProductionOrders => "production order",
    }
  }

  /// The secondary indexes declared on this collection.
  pub fn indexes(self) -> &'static [IndexSpec] {
    match self {
      Self::Users => &[unique!("email"), index!("role")],
      Self::Products => {
        &[unique!("code"), index!("barcode"), index!("category")]
      }
      Self::Clients => &[unique!("document"), index!("email")],
      Self::Sales => &[
        unique!("sale_number"),
        index!("client_id"),
        index!("user_id"),
        index!("created_at"),
      ],
      Self::Invoices => &[
        unique!("invoice_number"),
        index!("client_id"),
        index!("status"),
        index!("due_date"),
      ],
      Self::CashRegisters => {
        &[index!("user_id"), index!("status"), index!("opening_date")]
      }
      Self::CashTransactions => &[
        index!("cash_register_id"),
        index!("type"),
        index!("created_at"),
      ],
      Self::Accounts => &[
        index!("type"),
        index!("status"),
        index!("due_date"),
        index!("client_id"),
      ],
      Self::StockMovements => {
        &[index!("product_id"), index!("type"), index!("created_at")]
      }
      Self::Suppliers => &[unique!("document"), index!("email")],
      Self::Purchases => &[
        unique!("purchase_number"),
        index!("supplier_id"),
        index!("status"),
        index!("created_at"),
      ],
      Self::Expenses => {
        &[index!("category"), index!("expense_date"), index!("supplier_id")]
      }
      Self::Employees => {
        &[unique!("document"), index!("department"), index!("active")]
      }
      Self::Budgets => &[
        unique!("budget_number"),
        index!("client_id"),
        index!("status"),
        index!("created_at"),
      ],
      Self::ServiceOrders => &[
        unique!("order_number"),
        index!("client_id"),
        index!("status"),
        index!("assigned_to"),
      ],
      Self::Contracts => {
        &[unique!("contract_number"), index!("status"), index!("end_date")]
      }
      Self::CostCenters => &[unique!("code"), index!("active")],
      Self::ChartOfAccounts => {
        &[unique!("code"), index!("type"), index!("active")]
      }
      Self::FixedAssets => {
        &[unique!("code"), index!("status"), index!("category")]
      }
      Self::TimeClocks => &[index!("employee_id"), index!("date")],
      Self::ProductionOrders => &[
        unique!("order_number"),
        index!("product_id"),
        index!("status"),
      ],
    }
  }

  /// Whether documents of this kind carry a business sequence number.
  pub fn sequenced(self) -> bool {
    matches!(
      self,
      Self::Sales
        | Self::Invoices
        | Self::Purchases
        | Self::Budgets
        | Self::ServiceOrders
        | Self::ProductionOrders
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn every_kind_is_listed_once() {
    for (i, kind) in EntityKind::ALL.iter().enumerate() {
      assert_eq!(
        EntityKind::ALL.iter().position(|k| k == kind),
        Some(i),
        "duplicate entry for {kind:?}"
      );
    }
  }

  #[test]
  fn sequenced_kinds_have_a_unique_number_index() {
    for kind in EntityKind::ALL {
      if kind.sequenced() {
        assert!(
          kind
            .indexes()
            .iter()
            .any(|ix| ix.unique && ix.name.ends_with("_number")),
          "{kind:?} is sequenced but has no unique number index"
        );
      }
    }
  }
}
