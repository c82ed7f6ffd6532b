//! Service-layer tests against an in-memory store.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use kontor_core::{
  Error,
  catalog::NewProduct,
  common::{LineItem, PaymentMethod},
  operations::{
    AssetStatus, ContractStatus, ContractType, NewContract, NewFixedAsset,
    NewTimeClock, TimeClockPatch,
  },
  selling::{
    BudgetItem, BudgetStatus, InvoiceStatus, NewBudget, NewInvoice, NewSale,
    SaleStatus,
  },
};
use kontor_store_sqlite::SqliteStore;
use uuid::Uuid;

use crate::{
  catalog::{ProductService, StockMovementService},
  operations::{
    ContractService, FixedAssetService, TimeClockService,
    accrued_depreciation, overtime_hours, worked_hours,
  },
  selling::{BudgetService, InvoiceService, SaleService},
};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory().await.expect("in-memory store")
}

fn time(h: u32, m: u32) -> NaiveTime {
  NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

// ─── Worked hours ────────────────────────────────────────────────────────────

#[test]
fn full_day_with_lunch() {
  let worked = worked_hours(
    Some(time(8, 0)),
    Some(time(18, 0)),
    Some(time(12, 0)),
    Some(time(13, 0)),
  );
  assert_eq!(worked, 9.0);
  assert_eq!(overtime_hours(worked), 1.0);
}

#[test]
fn missing_punch_yields_zero() {
  assert_eq!(worked_hours(Some(time(8, 0)), None, None, None), 0.0);
  assert_eq!(worked_hours(None, Some(time(18, 0)), None, None), 0.0);
}

#[test]
fn no_lunch_recorded() {
  let worked = worked_hours(Some(time(9, 30)), Some(time(17, 0)), None, None);
  assert_eq!(worked, 7.5);
  assert_eq!(overtime_hours(worked), 0.0);
}

#[test]
fn inverted_punches_clamp_to_zero() {
  assert_eq!(
    worked_hours(Some(time(18, 0)), Some(time(8, 0)), None, None),
    0.0
  );
}

// ─── Depreciation ────────────────────────────────────────────────────────────

fn asset_acquired_days_ago(
  now: DateTime<Utc>,
  days: i64,
) -> kontor_core::operations::FixedAsset {
  let mut asset = NewFixedAsset {
    code: "AT-001".into(),
    name: "Delivery van".into(),
    description: None,
    category: "vehicles".into(),
    acquisition_date: Utc::now(),
    acquisition_value: 12000.0,
    useful_life_months: 60,
    monthly_depreciation: 200.0,
    residual_value: None,
    location: None,
    responsible_id: None,
    status: AssetStatus::Active,
    notes: None,
  }
  .build(now);
  asset.acquisition_date = now - Duration::days(days);
  asset
}

#[test]
fn depreciation_accrues_in_thirty_day_months() {
  let now = Utc::now();
  assert_eq!(accrued_depreciation(&asset_acquired_days_ago(now, 0), now), 0.0);
  assert_eq!(accrued_depreciation(&asset_acquired_days_ago(now, 29), now), 0.0);
  assert_eq!(accrued_depreciation(&asset_acquired_days_ago(now, 30), now), 200.0);
  assert_eq!(
    accrued_depreciation(&asset_acquired_days_ago(now, 365), now),
    12.0 * 200.0
  );
}

#[test]
fn depreciation_never_exceeds_the_depreciable_base() {
  // 60 months of useful life; after ten years the cap holds.
  let now = Utc::now();
  let accrued = accrued_depreciation(&asset_acquired_days_ago(now, 3650), now);
  assert_eq!(accrued, 12000.0);
}

// ─── Sequence numbering through services ─────────────────────────────────────

fn quote(client_id: Uuid) -> NewBudget {
  NewBudget {
    client_id,
    user_id: Uuid::new_v4(),
    issue_date: Utc::now(),
    expiry_date: Utc::now() + Duration::days(15),
    total_amount: 100.0,
    discount: None,
    final_amount: 100.0,
    status: BudgetStatus::Draft,
    items: vec![BudgetItem {
      product_id: None,
      description: "Consulting".into(),
      quantity: 1.0,
      unit_price: 100.0,
      subtotal: 100.0,
    }],
    notes: None,
    terms: None,
  }
}

#[tokio::test]
async fn budget_numbers_are_sequential_and_never_reused() {
  let s = store().await;
  let budgets = BudgetService::new(s.clone());
  let client_id = Uuid::new_v4();

  let first = budgets.create(quote(client_id)).await.unwrap();
  let second = budgets.create(quote(client_id)).await.unwrap();
  let third = budgets.create(quote(client_id)).await.unwrap();
  assert_eq!(
    [first.budget_number, second.budget_number, third.budget_number],
    [1, 2, 3]
  );

  budgets.delete(third.id).await.unwrap();
  let fourth = budgets.create(quote(client_id)).await.unwrap();
  assert_eq!(fourth.budget_number, 4);
}

#[tokio::test]
async fn not_found_speaks_business_language() {
  let s = store().await;
  let budgets = BudgetService::new(s.clone());
  let assets = FixedAssetService::new(s.clone());
  let missing = Uuid::new_v4();

  let err = budgets
    .update(missing, Default::default())
    .await
    .unwrap_err();
  assert!(err.to_string().starts_with("quote not found"));

  let err = assets.update(missing, Default::default()).await.unwrap_err();
  assert!(err.to_string().starts_with("fixed asset not found"));
}

// ─── Contract expiry windows ─────────────────────────────────────────────────

fn contract(number: &str, status: ContractStatus, ends_in_days: i64) -> NewContract {
  NewContract {
    contract_number: number.into(),
    title: "Maintenance".into(),
    contract_type: ContractType::Service,
    client_id: Some(Uuid::new_v4()),
    supplier_id: None,
    start_date: Utc::now() - Duration::days(30),
    end_date: Utc::now() + Duration::days(ends_in_days),
    value: 1200.0,
    payment_terms: "net 30".into(),
    status,
    auto_renew: None,
    renewal_notice_days: None,
    description: None,
    terms: None,
    responsible_user_id: Uuid::new_v4(),
  }
}

#[tokio::test]
async fn expiring_window_filters_status_and_date() {
  let s = store().await;
  let contracts = ContractService::new(s.clone());
  let now = Utc::now();

  let soon = contracts
    .create(contract("CT-001", ContractStatus::Active, 10))
    .await
    .unwrap();
  contracts
    .create(contract("CT-002", ContractStatus::Active, 90))
    .await
    .unwrap();
  contracts
    .create(contract("CT-003", ContractStatus::Draft, 5))
    .await
    .unwrap();
  contracts
    .create(contract("CT-004", ContractStatus::Active, -1))
    .await
    .unwrap();

  let expiring = contracts.expiring_within(30, now).await.unwrap();
  assert_eq!(expiring.len(), 1);
  assert_eq!(expiring[0].id, soon.id);
}

// ─── Sales and stock ─────────────────────────────────────────────────────────

fn sale_of(product: &kontor_core::catalog::Product, quantity: f64) -> NewSale {
  let subtotal = quantity * product.sale_price;
  NewSale {
    client_id: None,
    user_id: Uuid::new_v4(),
    total_amount: subtotal,
    discount: None,
    final_amount: subtotal,
    payment_method: PaymentMethod::Pix,
    status: SaleStatus::Completed,
    items: vec![LineItem {
      product_id: product.id,
      product_name: product.name.clone(),
      quantity,
      unit_price: product.sale_price,
      subtotal,
    }],
    notes: None,
  }
}

#[tokio::test]
async fn sale_decrements_stock_and_journals_the_outflow() {
  let s = store().await;
  let products = ProductService::new(s.clone());
  let sales = SaleService::new(s.clone());
  let movements = StockMovementService::new(s.clone());

  let product = products
    .create(NewProduct {
      code: "P-001".into(),
      name: "Espresso beans".into(),
      description: None,
      category: "coffee".into(),
      unit: "KG".into(),
      cost_price: 38.0,
      sale_price: 59.9,
      stock_quantity: Some(10.0),
      min_stock: None,
      barcode: None,
      active: None,
    })
    .await
    .unwrap();

  let sale = sales.create(sale_of(&product, 4.0)).await.unwrap();
  assert_eq!(sale.sale_number, 1);

  let after = products.get_by_id(product.id).await.unwrap().unwrap();
  assert_eq!(after.stock_quantity, 6.0);

  let journal = movements.get_by_product(product.id).await.unwrap();
  assert_eq!(journal.len(), 1);
  assert_eq!(journal[0].quantity, 4.0);
  assert_eq!(journal[0].reference_id, Some(sale.id));
}

#[tokio::test]
async fn failed_sale_is_compensated() {
  let s = store().await;
  let products = ProductService::new(s.clone());
  let sales = SaleService::new(s.clone());
  let movements = StockMovementService::new(s.clone());

  let product = products
    .create(NewProduct {
      code: "P-001".into(),
      name: "Espresso beans".into(),
      description: None,
      category: "coffee".into(),
      unit: "KG".into(),
      cost_price: 38.0,
      sale_price: 59.9,
      stock_quantity: Some(2.0),
      min_stock: None,
      barcode: None,
      active: None,
    })
    .await
    .unwrap();

  let err = sales.create(sale_of(&product, 5.0)).await.unwrap_err();
  assert!(matches!(err, Error::SchemaViolation { .. }));

  // The sale was rolled back, stock is untouched, the journal is empty.
  assert!(sales.get_all().await.unwrap().is_empty());
  let after = products.get_by_id(product.id).await.unwrap().unwrap();
  assert_eq!(after.stock_quantity, 2.0);
  assert!(movements.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn stock_adjustment_cannot_go_negative() {
  let s = store().await;
  let products = ProductService::new(s.clone());

  let product = products
    .create(NewProduct {
      code: "P-001".into(),
      name: "Espresso beans".into(),
      description: None,
      category: "coffee".into(),
      unit: "KG".into(),
      cost_price: 38.0,
      sale_price: 59.9,
      stock_quantity: Some(3.0),
      min_stock: None,
      barcode: None,
      active: None,
    })
    .await
    .unwrap();

  let err = products
    .adjust_stock(product.id, -5.0, "breakage".into(), Uuid::new_v4())
    .await
    .unwrap_err();
  assert!(matches!(err, Error::SchemaViolation { .. }));

  let after = products.get_by_id(product.id).await.unwrap().unwrap();
  assert_eq!(after.stock_quantity, 3.0);
}

// ─── Invoices ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn overdue_scan_checks_status_and_due_date() {
  let s = store().await;
  let invoices = InvoiceService::new(s.clone());
  let now = Utc::now();
  let client_id = Uuid::new_v4();

  let invoice = |due_in_days: i64, status: InvoiceStatus| NewInvoice {
    sale_id: None,
    client_id,
    issue_date: now - Duration::days(30),
    due_date: now + Duration::days(due_in_days),
    amount: 500.0,
    paid_amount: None,
    status,
    payment_method: None,
    notes: None,
  };

  let late = invoices
    .create(invoice(-3, InvoiceStatus::Pending))
    .await
    .unwrap();
  invoices.create(invoice(3, InvoiceStatus::Pending)).await.unwrap();
  invoices.create(invoice(-3, InvoiceStatus::Paid)).await.unwrap();

  let overdue = invoices.get_overdue(now).await.unwrap();
  assert_eq!(overdue.len(), 1);
  assert_eq!(overdue[0].id, late.id);
  assert_eq!(overdue[0].invoice_number, late.invoice_number);
}

// ─── Time clock ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn punches_drive_the_stored_totals() {
  let s = store().await;
  let clock = TimeClockService::new(s.clone());

  let entry = clock
    .create(NewTimeClock {
      employee_id: Uuid::new_v4(),
      date: NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
      clock_in: Some(time(8, 0)),
      clock_out: None,
      lunch_start: None,
      lunch_end: None,
      notes: None,
    })
    .await
    .unwrap();
  assert_eq!(entry.total_hours, 0.0);

  let updated = clock
    .update(entry.id, TimeClockPatch {
      clock_out: Some(time(18, 0)),
      lunch_start: Some(time(12, 0)),
      lunch_end: Some(time(13, 0)),
      ..Default::default()
    })
    .await
    .unwrap();

  assert_eq!(updated.total_hours, 9.0);
  assert_eq!(updated.overtime_hours, 1.0);

  let stored = clock.get_by_id(entry.id).await.unwrap().unwrap();
  assert_eq!(stored.total_hours, 9.0);

  let by_date = clock
    .get_by_date(NaiveDate::from_ymd_opt(2026, 3, 9).unwrap())
    .await
    .unwrap();
  assert_eq!(by_date.len(), 1);
}
