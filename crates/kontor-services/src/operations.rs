//! Operational services: service orders, production orders, contracts,
//! fixed assets, and the time clock — including the pure derived
//! calculations (depreciation accrual, worked hours, expiry windows).

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Timelike as _, Utc};
use uuid::Uuid;

use kontor_core::{
  Error, Result,
  entity::IndexValue,
  kind::EntityKind,
  operations::{
    Contract, ContractPatch, ContractStatus, FixedAsset, FixedAssetPatch,
    AssetStatus, NewContract, NewFixedAsset, NewProductionOrder,
    NewServiceOrder, NewTimeClock, ProductionOrder, ProductionOrderPatch,
    ProductionOrderStatus, ServiceOrder, ServiceOrderPatch,
    ServiceOrderStatus, TimeClock, TimeClockPatch,
  },
  store::DocumentStore,
};

// ─── Pure calculations ───────────────────────────────────────────────────────

/// Days per depreciation month. The accrual clock ticks in fixed 30-day
/// steps from the acquisition date, not calendar months.
const DEPRECIATION_MONTH_DAYS: i64 = 30;

/// Straight-line depreciation accrued on `asset` as of `now`, capped at
/// the depreciable base (acquisition value minus residual value).
pub fn accrued_depreciation(asset: &FixedAsset, now: DateTime<Utc>) -> f64 {
  let elapsed = now.signed_duration_since(asset.acquisition_date);
  let months = (elapsed.num_days() / DEPRECIATION_MONTH_DAYS).max(0) as f64;
  (months * asset.monthly_depreciation)
    .min(asset.acquisition_value - asset.residual_value)
}

fn as_hours(t: NaiveTime) -> f64 {
  f64::from(t.hour()) + f64::from(t.minute()) / 60.0
}

/// Hours worked across a day of punches: the span between clock-in and
/// clock-out, minus the lunch break, clamped at zero. Returns 0.0 when
/// either punch is missing.
pub fn worked_hours(
  clock_in: Option<NaiveTime>,
  clock_out: Option<NaiveTime>,
  lunch_start: Option<NaiveTime>,
  lunch_end: Option<NaiveTime>,
) -> f64 {
  let (Some(clock_in), Some(clock_out)) = (clock_in, clock_out) else {
    return 0.0;
  };

  let work = as_hours(clock_out) - as_hours(clock_in);
  let lunch = match (lunch_start, lunch_end) {
    (Some(start), Some(end)) => as_hours(end) - as_hours(start),
    _ => 0.0,
  };

  (work - lunch).max(0.0)
}

/// Hours beyond the standard eight-hour day.
pub fn overtime_hours(worked: f64) -> f64 { (worked - 8.0).max(0.0) }

// ─── Service orders ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct ServiceOrderService<S> {
  store: S,
}

impl<S: DocumentStore> ServiceOrderService<S> {
  pub fn new(store: S) -> Self { Self { store } }

  pub async fn create(&self, input: NewServiceOrder) -> Result<ServiceOrder> {
    let number = self.store.next_sequence(EntityKind::ServiceOrders).await?;
    let order = input.build(number, Utc::now());
    self.store.create(order.clone()).await?;
    Ok(order)
  }

  pub async fn update(
    &self,
    id: Uuid,
    patch: ServiceOrderPatch,
  ) -> Result<ServiceOrder> {
    let mut order: ServiceOrder = self
      .store
      .get(id)
      .await?
      .ok_or_else(|| Error::not_found(EntityKind::ServiceOrders, id))?;
    patch.apply(&mut order);
    order.updated_at = Utc::now();
    self.store.replace(order.clone()).await?;
    Ok(order)
  }

  pub async fn delete(&self, id: Uuid) -> Result<()> {
    self.store.delete(EntityKind::ServiceOrders, id).await
  }

  pub async fn get_by_id(&self, id: Uuid) -> Result<Option<ServiceOrder>> {
    self.store.get(id).await
  }

  pub async fn get_all(&self) -> Result<Vec<ServiceOrder>> {
    self.store.get_all().await
  }

  pub async fn get_by_status(
    &self,
    status: ServiceOrderStatus,
  ) -> Result<Vec<ServiceOrder>> {
    self.store.get_by_index("status", IndexValue::from(status.as_str())).await
  }

  pub async fn get_by_client(&self, client_id: Uuid) -> Result<Vec<ServiceOrder>> {
    self.store.get_by_index("client_id", IndexValue::from(client_id)).await
  }

  pub async fn get_by_assignee(
    &self,
    employee_id: Uuid,
  ) -> Result<Vec<ServiceOrder>> {
    self.store.get_by_index("assigned_to", IndexValue::from(employee_id)).await
  }
}

// ─── Production orders ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct ProductionOrderService<S> {
  store: S,
}

impl<S: DocumentStore> ProductionOrderService<S> {
  pub fn new(store: S) -> Self { Self { store } }

  pub async fn create(
    &self,
    input: NewProductionOrder,
  ) -> Result<ProductionOrder> {
    let number =
      self.store.next_sequence(EntityKind::ProductionOrders).await?;
    let order = input.build(number, Utc::now());
    self.store.create(order.clone()).await?;
    Ok(order)
  }

  pub async fn update(
    &self,
    id: Uuid,
    patch: ProductionOrderPatch,
  ) -> Result<ProductionOrder> {
    let mut order: ProductionOrder = self
      .store
      .get(id)
      .await?
      .ok_or_else(|| Error::not_found(EntityKind::ProductionOrders, id))?;
    patch.apply(&mut order);
    order.updated_at = Utc::now();
    self.store.replace(order.clone()).await?;
    Ok(order)
  }

  pub async fn delete(&self, id: Uuid) -> Result<()> {
    self.store.delete(EntityKind::ProductionOrders, id).await
  }

  pub async fn get_by_id(&self, id: Uuid) -> Result<Option<ProductionOrder>> {
    self.store.get(id).await
  }

  pub async fn get_all(&self) -> Result<Vec<ProductionOrder>> {
    self.store.get_all().await
  }

  pub async fn get_by_status(
    &self,
    status: ProductionOrderStatus,
  ) -> Result<Vec<ProductionOrder>> {
    self.store.get_by_index("status", IndexValue::from(status.as_str())).await
  }

  pub async fn get_by_product(
    &self,
    product_id: Uuid,
  ) -> Result<Vec<ProductionOrder>> {
    self.store.get_by_index("product_id", IndexValue::from(product_id)).await
  }
}

// ─── Contracts ───────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct ContractService<S> {
  store: S,
}

impl<S: DocumentStore> ContractService<S> {
  pub fn new(store: S) -> Self { Self { store } }

  pub async fn create(&self, input: NewContract) -> Result<Contract> {
    let contract = input.build(Utc::now());
    self.store.create(contract.clone()).await?;
    Ok(contract)
  }

  pub async fn update(&self, id: Uuid, patch: ContractPatch) -> Result<Contract> {
    let mut contract: Contract = self
      .store
      .get(id)
      .await?
      .ok_or_else(|| Error::not_found(EntityKind::Contracts, id))?;
    patch.apply(&mut contract);
    contract.updated_at = Utc::now();
    self.store.replace(contract.clone()).await?;
    Ok(contract)
  }

  pub async fn delete(&self, id: Uuid) -> Result<()> {
    self.store.delete(EntityKind::Contracts, id).await
  }

  pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Contract>> {
    self.store.get(id).await
  }

  pub async fn get_all(&self) -> Result<Vec<Contract>> {
    self.store.get_all().await
  }

  pub async fn get_by_status(
    &self,
    status: ContractStatus,
  ) -> Result<Vec<Contract>> {
    self.store.get_by_index("status", IndexValue::from(status.as_str())).await
  }

  pub async fn get_by_number(&self, number: &str) -> Result<Option<Contract>> {
    let mut matches: Vec<Contract> = self
      .store
      .get_by_index("contract_number", IndexValue::from(number))
      .await?;
    Ok(matches.pop())
  }

  /// Active contracts whose end date falls within `[now, now + days]`.
  pub async fn expiring_within(
    &self,
    days: i64,
    now: DateTime<Utc>,
  ) -> Result<Vec<Contract>> {
    let horizon = now + Duration::days(days);
    let mut contracts: Vec<Contract> = self.store.get_all().await?;
    contracts.retain(|c| {
      c.status == ContractStatus::Active
        && c.end_date >= now
        && c.end_date <= horizon
    });
    Ok(contracts)
  }
}

// ─── Fixed assets ────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct FixedAssetService<S> {
  store: S,
}

impl<S: DocumentStore> FixedAssetService<S> {
  pub fn new(store: S) -> Self { Self { store } }

  pub async fn create(&self, input: NewFixedAsset) -> Result<FixedAsset> {
    let asset = input.build(Utc::now());
    self.store.create(asset.clone()).await?;
    Ok(asset)
  }

  pub async fn update(
    &self,
    id: Uuid,
    patch: FixedAssetPatch,
  ) -> Result<FixedAsset> {
    let mut asset: FixedAsset = self
      .store
      .get(id)
      .await?
      .ok_or_else(|| Error::not_found(EntityKind::FixedAssets, id))?;
    patch.apply(&mut asset);
    asset.updated_at = Utc::now();
    self.store.replace(asset.clone()).await?;
    Ok(asset)
  }

  pub async fn delete(&self, id: Uuid) -> Result<()> {
    self.store.delete(EntityKind::FixedAssets, id).await
  }

  pub async fn get_by_id(&self, id: Uuid) -> Result<Option<FixedAsset>> {
    self.store.get(id).await
  }

  pub async fn get_all(&self) -> Result<Vec<FixedAsset>> {
    self.store.get_all().await
  }

  pub async fn get_by_status(
    &self,
    status: AssetStatus,
  ) -> Result<Vec<FixedAsset>> {
    self.store.get_by_index("status", IndexValue::from(status.as_str())).await
  }

  pub async fn get_by_category(&self, category: &str) -> Result<Vec<FixedAsset>> {
    self.store.get_by_index("category", IndexValue::from(category)).await
  }

  /// Depreciation accrued on a stored asset as of `now`.
  pub async fn depreciation(
    &self,
    id: Uuid,
    now: DateTime<Utc>,
  ) -> Result<f64> {
    let asset: FixedAsset = self
      .store
      .get(id)
      .await?
      .ok_or_else(|| Error::not_found(EntityKind::FixedAssets, id))?;
    Ok(accrued_depreciation(&asset, now))
  }
}

// ─── Time clock ──────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct TimeClockService<S> {
  store: S,
}

impl<S: DocumentStore> TimeClockService<S> {
  pub fn new(store: S) -> Self { Self { store } }

  /// Record a day of punches. Totals are derived from the punches, never
  /// accepted from the caller.
  pub async fn create(&self, input: NewTimeClock) -> Result<TimeClock> {
    let mut entry = input.build(Utc::now());
    Self::recompute(&mut entry);
    self.store.create(entry.clone()).await?;
    Ok(entry)
  }

  pub async fn update(&self, id: Uuid, patch: TimeClockPatch) -> Result<TimeClock> {
    let mut entry: TimeClock = self
      .store
      .get(id)
      .await?
      .ok_or_else(|| Error::not_found(EntityKind::TimeClocks, id))?;
    patch.apply(&mut entry);
    Self::recompute(&mut entry);
    entry.updated_at = Utc::now();
    self.store.replace(entry.clone()).await?;
    Ok(entry)
  }

  fn recompute(entry: &mut TimeClock) {
    entry.total_hours = worked_hours(
      entry.clock_in,
      entry.clock_out,
      entry.lunch_start,
      entry.lunch_end,
    );
    entry.overtime_hours = overtime_hours(entry.total_hours);
  }

  pub async fn delete(&self, id: Uuid) -> Result<()> {
    self.store.delete(EntityKind::TimeClocks, id).await
  }

  pub async fn get_by_id(&self, id: Uuid) -> Result<Option<TimeClock>> {
    self.store.get(id).await
  }

  pub async fn get_all(&self) -> Result<Vec<TimeClock>> {
    self.store.get_all().await
  }

  pub async fn get_by_employee(&self, employee_id: Uuid) -> Result<Vec<TimeClock>> {
    self.store.get_by_index("employee_id", IndexValue::from(employee_id)).await
  }

  pub async fn get_by_date(&self, date: NaiveDate) -> Result<Vec<TimeClock>> {
    self.store.get_by_index("date", IndexValue::from(date.to_string())).await
  }
}
