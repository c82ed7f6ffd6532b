//! Financial services: receivables/payables, expenses, the cash desk,
//! cost centers, and the chart of accounts.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use kontor_core::{
  Error, Result,
  entity::IndexValue,
  finance::{
    Account, AccountCategory, AccountPatch, AccountStatus, AccountType,
    CashRegister, CashRegisterPatch, CashRegisterStatus, CashTransaction,
    CashTransactionType, ChartOfAccount, ChartOfAccountPatch, CostCenter,
    CostCenterPatch, Expense, ExpenseCategory, ExpensePatch, NewAccount,
    NewCashRegister, NewCashTransaction, NewChartOfAccount, NewCostCenter,
    NewExpense,
  },
  kind::EntityKind,
  store::DocumentStore,
};

// ─── Accounts (receivable / payable) ─────────────────────────────────────────

#[derive(Clone)]
pub struct AccountService<S> {
  store: S,
}

impl<S: DocumentStore> AccountService<S> {
  pub fn new(store: S) -> Self { Self { store } }

  pub async fn create(&self, input: NewAccount) -> Result<Account> {
    let account = input.build(Utc::now());
    self.store.create(account.clone()).await?;
    Ok(account)
  }

  pub async fn update(&self, id: Uuid, patch: AccountPatch) -> Result<Account> {
    let mut account: Account = self
      .store
      .get(id)
      .await?
      .ok_or_else(|| Error::not_found(EntityKind::Accounts, id))?;
    patch.apply(&mut account);
    account.updated_at = Utc::now();
    self.store.replace(account.clone()).await?;
    Ok(account)
  }

  pub async fn delete(&self, id: Uuid) -> Result<()> {
    self.store.delete(EntityKind::Accounts, id).await
  }

  pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Account>> {
    self.store.get(id).await
  }

  pub async fn get_all(&self) -> Result<Vec<Account>> {
    self.store.get_all().await
  }

  pub async fn get_by_type(&self, kind: AccountType) -> Result<Vec<Account>> {
    self.store.get_by_index("type", IndexValue::from(kind.as_str())).await
  }

  pub async fn get_by_status(
    &self,
    status: AccountStatus,
  ) -> Result<Vec<Account>> {
    self.store.get_by_index("status", IndexValue::from(status.as_str())).await
  }

  /// Pending entries falling due within the next `days` days of `now`.
  pub async fn due_within(
    &self,
    days: i64,
    now: DateTime<Utc>,
  ) -> Result<Vec<Account>> {
    let horizon = now + Duration::days(days);
    let mut accounts: Vec<Account> = self.store.get_all().await?;
    accounts.retain(|a| {
      a.status == AccountStatus::Pending
        && a.due_date >= now
        && a.due_date <= horizon
    });
    Ok(accounts)
  }
}

// ─── Expenses ────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct ExpenseService<S> {
  store: S,
}

impl<S: DocumentStore> ExpenseService<S> {
  pub fn new(store: S) -> Self { Self { store } }

  pub async fn create(&self, input: NewExpense) -> Result<Expense> {
    let expense = input.build(Utc::now());
    self.store.create(expense.clone()).await?;
    Ok(expense)
  }

  pub async fn update(&self, id: Uuid, patch: ExpensePatch) -> Result<Expense> {
    let mut expense: Expense = self
      .store
      .get(id)
      .await?
      .ok_or_else(|| Error::not_found(EntityKind::Expenses, id))?;
    patch.apply(&mut expense);
    self.store.replace(expense.clone()).await?;
    Ok(expense)
  }

  pub async fn delete(&self, id: Uuid) -> Result<()> {
    self.store.delete(EntityKind::Expenses, id).await
  }

  pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Expense>> {
    self.store.get(id).await
  }

  pub async fn get_all(&self) -> Result<Vec<Expense>> {
    self.store.get_all().await
  }

  pub async fn get_by_category(
    &self,
    category: ExpenseCategory,
  ) -> Result<Vec<Expense>> {
    self
      .store
      .get_by_index("category", IndexValue::from(category.as_str()))
      .await
  }

  pub async fn get_by_supplier(&self, supplier_id: Uuid) -> Result<Vec<Expense>> {
    self.store.get_by_index("supplier_id", IndexValue::from(supplier_id)).await
  }
}

// ─── Cash registers ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct CashRegisterService<S> {
  store: S,
}

impl<S: DocumentStore> CashRegisterService<S> {
  pub fn new(store: S) -> Self { Self { store } }

  pub async fn create(&self, input: NewCashRegister) -> Result<CashRegister> {
    let register = input.build();
    self.store.create(register.clone()).await?;
    Ok(register)
  }

  pub async fn update(
    &self,
    id: Uuid,
    patch: CashRegisterPatch,
  ) -> Result<CashRegister> {
    let mut register: CashRegister = self
      .store
      .get(id)
      .await?
      .ok_or_else(|| Error::not_found(EntityKind::CashRegisters, id))?;
    patch.apply(&mut register);
    self.store.replace(register.clone()).await?;
    Ok(register)
  }

  pub async fn delete(&self, id: Uuid) -> Result<()> {
    self.store.delete(EntityKind::CashRegisters, id).await
  }

  pub async fn get_by_id(&self, id: Uuid) -> Result<Option<CashRegister>> {
    self.store.get(id).await
  }

  pub async fn get_all(&self) -> Result<Vec<CashRegister>> {
    self.store.get_all().await
  }

  pub async fn get_by_user(&self, user_id: Uuid) -> Result<Vec<CashRegister>> {
    self.store.get_by_index("user_id", IndexValue::from(user_id)).await
  }

  /// Till sessions currently open.
  pub async fn get_open(&self) -> Result<Vec<CashRegister>> {
    self
      .store
      .get_by_index(
        "status",
        IndexValue::from(CashRegisterStatus::Open.as_str()),
      )
      .await
  }
}

// ─── Cash transactions ───────────────────────────────────────────────────────

/// The till journal. Entries are never edited.
#[derive(Clone)]
pub struct CashTransactionService<S> {
  store: S,
}

impl<S: DocumentStore> CashTransactionService<S> {
  pub fn new(store: S) -> Self { Self { store } }

  pub async fn create(
    &self,
    input: NewCashTransaction,
  ) -> Result<CashTransaction> {
    let transaction = input.build(Utc::now());
    self.store.create(transaction.clone()).await?;
    Ok(transaction)
  }

  pub async fn delete(&self, id: Uuid) -> Result<()> {
    self.store.delete(EntityKind::CashTransactions, id).await
  }

  pub async fn get_by_id(&self, id: Uuid) -> Result<Option<CashTransaction>> {
    self.store.get(id).await
  }

  pub async fn get_all(&self) -> Result<Vec<CashTransaction>> {
    self.store.get_all().await
  }

  pub async fn get_by_register(
    &self,
    cash_register_id: Uuid,
  ) -> Result<Vec<CashTransaction>> {
    self
      .store
      .get_by_index("cash_register_id", IndexValue::from(cash_register_id))
      .await
  }

  pub async fn get_by_type(
    &self,
    transaction_type: CashTransactionType,
  ) -> Result<Vec<CashTransaction>> {
    self
      .store
      .get_by_index("type", IndexValue::from(transaction_type.as_str()))
      .await
  }
}

// ─── Cost centers ────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct CostCenterService<S> {
  store: S,
}

impl<S: DocumentStore> CostCenterService<S> {
  pub fn new(store: S) -> Self { Self { store } }

  pub async fn create(&self, input: NewCostCenter) -> Result<CostCenter> {
    let center = input.build(Utc::now());
    self.store.create(center.clone()).await?;
    Ok(center)
  }

  pub async fn update(
    &self,
    id: Uuid,
    patch: CostCenterPatch,
  ) -> Result<CostCenter> {
    let mut center: CostCenter = self
      .store
      .get(id)
      .await?
      .ok_or_else(|| Error::not_found(EntityKind::CostCenters, id))?;
    patch.apply(&mut center);
    center.updated_at = Utc::now();
    self.store.replace(center.clone()).await?;
    Ok(center)
  }

  pub async fn delete(&self, id: Uuid) -> Result<()> {
    self.store.delete(EntityKind::CostCenters, id).await
  }

  pub async fn get_by_id(&self, id: Uuid) -> Result<Option<CostCenter>> {
    self.store.get(id).await
  }

  pub async fn get_all(&self) -> Result<Vec<CostCenter>> {
    self.store.get_all().await
  }

  pub async fn get_active(&self) -> Result<Vec<CostCenter>> {
    self.store.get_by_index("active", IndexValue::from(true)).await
  }
}

// ─── Chart of accounts ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct ChartOfAccountService<S> {
  store: S,
}

impl<S: DocumentStore> ChartOfAccountService<S> {
  pub fn new(store: S) -> Self { Self { store } }

  pub async fn create(&self, input: NewChartOfAccount) -> Result<ChartOfAccount> {
    let account = input.build(Utc::now());
    self.store.create(account.clone()).await?;
    Ok(account)
  }

  pub async fn update(
    &self,
    id: Uuid,
    patch: ChartOfAccountPatch,
  ) -> Result<ChartOfAccount> {
    let mut account: ChartOfAccount = self
      .store
      .get(id)
      .await?
      .ok_or_else(|| Error::not_found(EntityKind::ChartOfAccounts, id))?;
    patch.apply(&mut account);
    account.updated_at = Utc::now();
    self.store.replace(account.clone()).await?;
    Ok(account)
  }

  pub async fn delete(&self, id: Uuid) -> Result<()> {
    self.store.delete(EntityKind::ChartOfAccounts, id).await
  }

  pub async fn get_by_id(&self, id: Uuid) -> Result<Option<ChartOfAccount>> {
    self.store.get(id).await
  }

  pub async fn get_all(&self) -> Result<Vec<ChartOfAccount>> {
    self.store.get_all().await
  }

  pub async fn get_by_type(
    &self,
    category: AccountCategory,
  ) -> Result<Vec<ChartOfAccount>> {
    self.store.get_by_index("type", IndexValue::from(category.as_str())).await
  }

  pub async fn get_active(&self) -> Result<Vec<ChartOfAccount>> {
    self.store.get_by_index("active", IndexValue::from(true)).await
  }
}
