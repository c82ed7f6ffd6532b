//! Financial records: receivables/payables, expenses, the cash desk,
//! cost centers, and the chart of accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  common::PaymentMethod,
  entity::{
    Entity, FieldViolation, IndexEntry, check_non_negative, check_opt_str,
    check_str, finish,
  },
  kind::EntityKind,
};

// ─── Account (receivable / payable) ──────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
  Receivable,
  Payable,
}

impl AccountType {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Receivable => "receivable",
      Self::Payable => "payable",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
  Pending,
  Paid,
  Overdue,
  Cancelled,
}

impl AccountStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Pending => "pending",
      Self::Paid => "paid",
      Self::Overdue => "overdue",
      Self::Cancelled => "cancelled",
    }
  }
}

/// A receivable or payable instalment. `amount` is signed — credit notes
/// appear as negative entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
  pub id:             Uuid,
  #[serde(rename = "type")]
  pub account_type:   AccountType,
  pub description:    String,
  pub amount:         f64,
  pub due_date:       DateTime<Utc>,
  pub paid_date:      Option<DateTime<Utc>>,
  pub status:         AccountStatus,
  pub client_id:      Option<Uuid>,
  pub supplier_id:    Option<Uuid>,
  pub invoice_id:     Option<Uuid>,
  pub purchase_id:    Option<Uuid>,
  pub payment_method: Option<PaymentMethod>,
  pub notes:          Option<String>,
  pub created_at:     DateTime<Utc>,
  pub updated_at:     DateTime<Utc>,
}

impl Entity for Account {
  const KIND: EntityKind = EntityKind::Accounts;

  fn id(&self) -> Uuid { self.id }

  fn index_entries(&self) -> Vec<IndexEntry> {
    let mut entries = vec![
      IndexEntry::new("type", self.account_type.as_str()),
      IndexEntry::new("status", self.status.as_str()),
      IndexEntry::new("due_date", self.due_date.to_rfc3339()),
    ];
    if let Some(client_id) = self.client_id {
      entries.push(IndexEntry::new("client_id", client_id));
    }
    entries
  }

  fn validate(&self) -> Result<(), Vec<FieldViolation>> {
    let mut v = Vec::new();
    check_str(&mut v, "description", &self.description, 2, 500);
    check_opt_str(&mut v, "notes", self.notes.as_ref(), 500);
    finish(v)
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAccount {
  #[serde(rename = "type")]
  pub account_type:   AccountType,
  pub description:    String,
  pub amount:         f64,
  pub due_date:       DateTime<Utc>,
  pub status:         AccountStatus,
  pub client_id:      Option<Uuid>,
  pub supplier_id:    Option<Uuid>,
  pub invoice_id:     Option<Uuid>,
  pub purchase_id:    Option<Uuid>,
  pub payment_method: Option<PaymentMethod>,
  pub notes:          Option<String>,
}

impl NewAccount {
  pub fn build(self, now: DateTime<Utc>) -> Account {
    Account {
      id: Uuid::new_v4(),
      account_type: self.account_type,
      description: self.description,
      amount: self.amount,
      due_date: self.due_date,
      paid_date: None,
      status: self.status,
      client_id: self.client_id,
      supplier_id: self.supplier_id,
      invoice_id: self.invoice_id,
      purchase_id: self.purchase_id,
      payment_method: self.payment_method,
      notes: self.notes,
      created_at: now,
      updated_at: now,
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountPatch {
  pub description:    Option<String>,
  pub amount:         Option<f64>,
  pub due_date:       Option<DateTime<Utc>>,
  pub paid_date:      Option<DateTime<Utc>>,
  pub status:         Option<AccountStatus>,
  pub payment_method: Option<PaymentMethod>,
  pub notes:          Option<String>,
}

impl AccountPatch {
  pub fn apply(self, account: &mut Account) {
    if let Some(description) = self.description {
      account.description = description;
    }
    if let Some(amount) = self.amount {
      account.amount = amount;
    }
    if let Some(due_date) = self.due_date {
      account.due_date = due_date;
    }
    if let Some(paid_date) = self.paid_date {
      account.paid_date = Some(paid_date);
    }
    if let Some(status) = self.status {
      account.status = status;
    }
    if let Some(payment_method) = self.payment_method {
      account.payment_method = Some(payment_method);
    }
    if let Some(notes) = self.notes {
      account.notes = Some(notes);
    }
  }
}

// ─── Expense ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
  Rent,
  Utilities,
  Salaries,
  Supplies,
  Maintenance,
  Taxes,
  Insurance,
  Marketing,
  Transport,
  Other,
}

impl ExpenseCategory {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Rent => "rent",
      Self::Utilities => "utilities",
      Self::Salaries => "salaries",
      Self::Supplies => "supplies",
      Self::Maintenance => "maintenance",
      Self::Taxes => "taxes",
      Self::Insurance => "insurance",
      Self::Marketing => "marketing",
      Self::Transport => "transport",
      Self::Other => "other",
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
  pub id:             Uuid,
  pub description:    String,
  pub category:       ExpenseCategory,
  pub amount:         f64,
  pub payment_method: PaymentMethod,
  pub expense_date:   DateTime<Utc>,
  pub supplier_id:    Option<Uuid>,
  pub user_id:        Uuid,
  pub receipt_number: Option<String>,
  pub notes:          Option<String>,
  pub created_at:     DateTime<Utc>,
}

impl Entity for Expense {
  const KIND: EntityKind = EntityKind::Expenses;

  fn id(&self) -> Uuid { self.id }

  fn index_entries(&self) -> Vec<IndexEntry> {
    let mut entries = vec![
      IndexEntry::new("category", self.category.as_str()),
      IndexEntry::new("expense_date", self.expense_date.to_rfc3339()),
    ];
    if let Some(supplier_id) = self.supplier_id {
      entries.push(IndexEntry::new("supplier_id", supplier_id));
    }
    entries
  }

  fn validate(&self) -> Result<(), Vec<FieldViolation>> {
    let mut v = Vec::new();
    check_str(&mut v, "description", &self.description, 2, 500);
    check_non_negative(&mut v, "amount", self.amount);
    check_opt_str(&mut v, "receipt_number", self.receipt_number.as_ref(), 100);
    check_opt_str(&mut v, "notes", self.notes.as_ref(), 500);
    finish(v)
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewExpense {
  pub description:    String,
  pub category:       ExpenseCategory,
  pub amount:         f64,
  pub payment_method: PaymentMethod,
  pub expense_date:   DateTime<Utc>,
  pub supplier_id:    Option<Uuid>,
  pub user_id:        Uuid,
  pub receipt_number: Option<String>,
  pub notes:          Option<String>,
}

impl NewExpense {
  pub fn build(self, now: DateTime<Utc>) -> Expense {
    Expense {
      id: Uuid::new_v4(),
      description: self.description,
      category: self.category,
      amount: self.amount,
      payment_method: self.payment_method,
      expense_date: self.expense_date,
      supplier_id: self.supplier_id,
      user_id: self.user_id,
      receipt_number: self.receipt_number,
      notes: self.notes,
      created_at: now,
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpensePatch {
  pub description:    Option<String>,
  pub category:       Option<ExpenseCategory>,
  pub amount:         Option<f64>,
  pub payment_method: Option<PaymentMethod>,
  pub expense_date:   Option<DateTime<Utc>>,
  pub receipt_number: Option<String>,
  pub notes:          Option<String>,
}

impl ExpensePatch {
  pub fn apply(self, expense: &mut Expense) {
    if let Some(description) = self.description {
      expense.description = description;
    }
    if let Some(category) = self.category {
      expense.category = category;
    }
    if let Some(amount) = self.amount {
      expense.amount = amount;
    }
    if let Some(payment_method) = self.payment_method {
      expense.payment_method = payment_method;
    }
    if let Some(expense_date) = self.expense_date {
      expense.expense_date = expense_date;
    }
    if let Some(receipt_number) = self.receipt_number {
      expense.receipt_number = Some(receipt_number);
    }
    if let Some(notes) = self.notes {
      expense.notes = Some(notes);
    }
  }
}

// ─── Cash register ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CashRegisterStatus {
  Open,
  Closed,
}

impl CashRegisterStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Open => "open",
      Self::Closed => "closed",
    }
  }
}

/// One till session, from opening to closing balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashRegister {
  pub id:              Uuid,
  pub user_id:         Uuid,
  pub opening_date:    DateTime<Utc>,
  pub closing_date:    Option<DateTime<Utc>>,
  pub opening_balance: f64,
  pub closing_balance: Option<f64>,
  pub total_sales:     f64,
  pub total_expenses:  f64,
  pub status:          CashRegisterStatus,
  pub notes:           Option<String>,
}

impl Entity for CashRegister {
  const KIND: EntityKind = EntityKind::CashRegisters;

  fn id(&self) -> Uuid { self.id }

  fn index_entries(&self) -> Vec<IndexEntry> {
    vec![
      IndexEntry::new("user_id", self.user_id),
      IndexEntry::new("status", self.status.as_str()),
      IndexEntry::new("opening_date", self.opening_date.to_rfc3339()),
    ]
  }

  fn validate(&self) -> Result<(), Vec<FieldViolation>> {
    let mut v = Vec::new();
    check_non_negative(&mut v, "opening_balance", self.opening_balance);
    if let Some(balance) = self.closing_balance {
      check_non_negative(&mut v, "closing_balance", balance);
    }
    check_non_negative(&mut v, "total_sales", self.total_sales);
    check_non_negative(&mut v, "total_expenses", self.total_expenses);
    check_opt_str(&mut v, "notes", self.notes.as_ref(), 500);
    finish(v)
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCashRegister {
  pub user_id:         Uuid,
  pub opening_date:    DateTime<Utc>,
  pub opening_balance: f64,
  pub notes:           Option<String>,
}

impl NewCashRegister {
  pub fn build(self) -> CashRegister {
    CashRegister {
      id: Uuid::new_v4(),
      user_id: self.user_id,
      opening_date: self.opening_date,
      closing_date: None,
      opening_balance: self.opening_balance,
      closing_balance: None,
      total_sales: 0.0,
      total_expenses: 0.0,
      status: CashRegisterStatus::Open,
      notes: self.notes,
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CashRegisterPatch {
  pub closing_date:    Option<DateTime<Utc>>,
  pub closing_balance: Option<f64>,
  pub total_sales:     Option<f64>,
  pub total_expenses:  Option<f64>,
  pub status:          Option<CashRegisterStatus>,
  pub notes:           Option<String>,
}

impl CashRegisterPatch {
  pub fn apply(self, register: &mut CashRegister) {
    if let Some(closing_date) = self.closing_date {
      register.closing_date = Some(closing_date);
    }
    if let Some(closing_balance) = self.closing_balance {
      register.closing_balance = Some(closing_balance);
    }
    if let Some(total_sales) = self.total_sales {
      register.total_sales = total_sales;
    }
    if let Some(total_expenses) = self.total_expenses {
      register.total_expenses = total_expenses;
    }
    if let Some(status) = self.status {
      register.status = status;
    }
    if let Some(notes) = self.notes {
      register.notes = Some(notes);
    }
  }
}

// ─── Cash transaction ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CashTransactionType {
  Sale,
  Expense,
  Withdrawal,
  Deposit,
}

impl CashTransactionType {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Sale => "sale",
      Self::Expense => "expense",
      Self::Withdrawal => "withdrawal",
      Self::Deposit => "deposit",
    }
  }
}

/// One movement on an open till. `amount` is signed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashTransaction {
  pub id:               Uuid,
  pub cash_register_id: Uuid,
  #[serde(rename = "type")]
  pub transaction_type: CashTransactionType,
  pub amount:           f64,
  pub payment_method:   PaymentMethod,
  pub description:      String,
  /// Originating document, e.g. a sale or expense id.
  pub reference_id:     Option<Uuid>,
  pub created_at:       DateTime<Utc>,
}

impl Entity for CashTransaction {
  const KIND: EntityKind = EntityKind::CashTransactions;

  fn id(&self) -> Uuid { self.id }

  fn index_entries(&self) -> Vec<IndexEntry> {
    vec![
      IndexEntry::new("cash_register_id", self.cash_register_id),
      IndexEntry::new("type", self.transaction_type.as_str()),
      IndexEntry::new("created_at", self.created_at.to_rfc3339()),
    ]
  }

  fn validate(&self) -> Result<(), Vec<FieldViolation>> {
    let mut v = Vec::new();
    check_str(&mut v, "description", &self.description, 1, 500);
    finish(v)
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCashTransaction {
  pub cash_register_id: Uuid,
  #[serde(rename = "type")]
  pub transaction_type: CashTransactionType,
  pub amount:           f64,
  pub payment_method:   PaymentMethod,
  pub description:      String,
  pub reference_id:     Option<Uuid>,
}

impl NewCashTransaction {
  pub fn build(self, now: DateTime<Utc>) -> CashTransaction {
    CashTransaction {
      id: Uuid::new_v4(),
      cash_register_id: self.cash_register_id,
      transaction_type: self.transaction_type,
      amount: self.amount,
      payment_method: self.payment_method,
      description: self.description,
      reference_id: self.reference_id,
      created_at: now,
    }
  }
}

// ─── Cost center ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostCenter {
  pub id:          Uuid,
  pub code:        String,
  pub name:        String,
  pub description: Option<String>,
  pub parent_id:   Option<Uuid>,
  pub budget:      f64,
  pub active:      bool,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

impl Entity for CostCenter {
  const KIND: EntityKind = EntityKind::CostCenters;

  fn id(&self) -> Uuid { self.id }

  fn index_entries(&self) -> Vec<IndexEntry> {
    vec![
      IndexEntry::new("code", self.code.clone()),
      IndexEntry::new("active", self.active),
    ]
  }

  fn validate(&self) -> Result<(), Vec<FieldViolation>> {
    let mut v = Vec::new();
    check_str(&mut v, "code", &self.code, 1, 20);
    check_str(&mut v, "name", &self.name, 1, 200);
    check_opt_str(&mut v, "description", self.description.as_ref(), 500);
    check_non_negative(&mut v, "budget", self.budget);
    finish(v)
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCostCenter {
  pub code:        String,
  pub name:        String,
  pub description: Option<String>,
  pub parent_id:   Option<Uuid>,
  pub budget:      Option<f64>,
  pub active:      Option<bool>,
}

impl NewCostCenter {
  pub fn build(self, now: DateTime<Utc>) -> CostCenter {
    CostCenter {
      id: Uuid::new_v4(),
      code: self.code,
      name: self.name,
      description: self.description,
      parent_id: self.parent_id,
      budget: self.budget.unwrap_or(0.0),
      active: self.active.unwrap_or(true),
      created_at: now,
      updated_at: now,
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CostCenterPatch {
  pub code:        Option<String>,
  pub name:        Option<String>,
  pub description: Option<String>,
  pub parent_id:   Option<Uuid>,
  pub budget:      Option<f64>,
  pub active:      Option<bool>,
}

impl CostCenterPatch {
  pub fn apply(self, center: &mut CostCenter) {
    if let Some(code) = self.code {
      center.code = code;
    }
    if let Some(name) = self.name {
      center.name = name;
    }
    if let Some(description) = self.description {
      center.description = Some(description);
    }
    if let Some(parent_id) = self.parent_id {
      center.parent_id = Some(parent_id);
    }
    if let Some(budget) = self.budget {
      center.budget = budget;
    }
    if let Some(active) = self.active {
      center.active = active;
    }
  }
}

// ─── Chart of accounts ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountCategory {
  Asset,
  Liability,
  Equity,
  Revenue,
  Expense,
}

impl AccountCategory {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Asset => "asset",
      Self::Liability => "liability",
      Self::Equity => "equity",
      Self::Revenue => "revenue",
      Self::Expense => "expense",
    }
  }
}

/// One node of the accounting plan. Hierarchy depth is limited to five
/// levels; only leaf-ish accounts flagged `accept_entries` take postings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartOfAccount {
  pub id:             Uuid,
  pub code:           String,
  pub name:           String,
  #[serde(rename = "type")]
  pub account_type:   AccountCategory,
  pub parent_id:      Option<Uuid>,
  pub level:          u8,
  pub accept_entries: bool,
  pub description:    Option<String>,
  pub active:         bool,
  pub created_at:     DateTime<Utc>,
  pub updated_at:     DateTime<Utc>,
}

impl Entity for ChartOfAccount {
  const KIND: EntityKind = EntityKind::ChartOfAccounts;

  fn id(&self) -> Uuid { self.id }

  fn index_entries(&self) -> Vec<IndexEntry> {
    vec![
      IndexEntry::new("code", self.code.clone()),
      IndexEntry::new("type", self.account_type.as_str()),
      IndexEntry::new("active", self.active),
    ]
  }

  fn validate(&self) -> Result<(), Vec<FieldViolation>> {
    let mut v = Vec::new();
    check_str(&mut v, "code", &self.code, 1, 20);
    check_str(&mut v, "name", &self.name, 1, 200);
    if !(1..=5).contains(&self.level) {
      v.push(FieldViolation::new("level", "must be between 1 and 5"));
    }
    check_opt_str(&mut v, "description", self.description.as_ref(), 500);
    finish(v)
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewChartOfAccount {
  pub code:           String,
  pub name:           String,
  #[serde(rename = "type")]
  pub account_type:   AccountCategory,
  pub parent_id:      Option<Uuid>,
  pub level:          u8,
  pub accept_entries: Option<bool>,
  pub description:    Option<String>,
  pub active:         Option<bool>,
}

impl NewChartOfAccount {
  pub fn build(self, now: DateTime<Utc>) -> ChartOfAccount {
    ChartOfAccount {
      id: Uuid::new_v4(),
      code: self.code,
      name: self.name,
      account_type: self.account_type,
      parent_id: self.parent_id,
      level: self.level,
      accept_entries: self.accept_entries.unwrap_or(true),
      description: self.description,
      active: self.active.unwrap_or(true),
      created_at: now,
      updated_at: now,
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartOfAccountPatch {
  pub code:           Option<String>,
  pub name:           Option<String>,
  #[serde(rename = "type")]
  pub account_type:   Option<AccountCategory>,
  pub parent_id:      Option<Uuid>,
  pub level:          Option<u8>,
  pub accept_entries: Option<bool>,
  pub description:    Option<String>,
  pub active:         Option<bool>,
}

impl ChartOfAccountPatch {
  pub fn apply(self, account: &mut ChartOfAccount) {
    if let Some(code) = self.code {
      account.code = code;
    }
    if let Some(name) = self.name {
      account.name = name;
    }
    if let Some(account_type) = self.account_type {
      account.account_type = account_type;
    }
    if let Some(parent_id) = self.parent_id {
      account.parent_id = Some(parent_id);
    }
    if let Some(level) = self.level {
      account.level = level;
    }
    if let Some(accept_entries) = self.accept_entries {
      account.accept_entries = accept_entries;
    }
    if let Some(description) = self.description {
      account.description = Some(description);
    }
    if let Some(active) = self.active {
      account.active = active;
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ledger_level_out_of_range() {
    let mut account = NewChartOfAccount {
      code: "1.1.01".into(),
      name: "Caixa".into(),
      account_type: AccountCategory::Asset,
      parent_id: None,
      level: 3,
      accept_entries: None,
      description: None,
      active: None,
    }
    .build(Utc::now());

    assert!(account.validate().is_ok());
    account.level = 6;
    let violations = account.validate().unwrap_err();
    assert_eq!(violations[0].field, "level");
  }

  #[test]
  fn new_register_opens_with_zeroed_totals() {
    let register = NewCashRegister {
      user_id: Uuid::new_v4(),
      opening_date: Utc::now(),
      opening_balance: 200.0,
      notes: None,
    }
    .build();

    assert_eq!(register.status, CashRegisterStatus::Open);
    assert_eq!(register.total_sales, 0.0);
    assert!(register.closing_date.is_none());
  }
}
