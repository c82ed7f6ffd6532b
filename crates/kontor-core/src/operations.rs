//! Operational records: service orders, production orders, contracts,
//! fixed assets, and the employee time clock.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  common::{LineItem, check_line_items},
  entity::{
    Entity, FieldViolation, IndexEntry, check_non_negative, check_opt_str,
    check_positive, check_str, finish,
  },
  kind::EntityKind,
};

// ─── Service order ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceOrderStatus {
  Open,
  InProgress,
  WaitingParts,
  Completed,
  Cancelled,
}

impl ServiceOrderStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Open => "open",
      Self::InProgress => "in_progress",
      Self::WaitingParts => "waiting_parts",
      Self::Completed => "completed",
      Self::Cancelled => "cancelled",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceOrderPriority {
  Low,
  Normal,
  High,
  Urgent,
}

impl ServiceOrderPriority {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Low => "low",
      Self::Normal => "normal",
      Self::High => "high",
      Self::Urgent => "urgent",
    }
  }
}

/// A repair/service job on a client's equipment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceOrder {
  pub id:                   Uuid,
  pub order_number:         u64,
  pub client_id:            Uuid,
  pub equipment:            String,
  pub serial_number:        Option<String>,
  pub reported_problem:     String,
  pub diagnosis:            Option<String>,
  pub solution:             Option<String>,
  pub status:               ServiceOrderStatus,
  pub priority:             ServiceOrderPriority,
  /// Assigned technician (employee id).
  pub assigned_to:          Option<Uuid>,
  pub start_date:           DateTime<Utc>,
  pub estimated_completion: Option<DateTime<Utc>>,
  pub completion_date:      Option<DateTime<Utc>>,
  pub labor_cost:           f64,
  pub parts_cost:           f64,
  pub total_cost:           f64,
  pub parts_used:           Option<Vec<LineItem>>,
  pub notes:                Option<String>,
  pub created_at:           DateTime<Utc>,
  pub updated_at:           DateTime<Utc>,
}

impl Entity for ServiceOrder {
  const KIND: EntityKind = EntityKind::ServiceOrders;

  fn id(&self) -> Uuid { self.id }

  fn index_entries(&self) -> Vec<IndexEntry> {
    let mut entries = vec![
      IndexEntry::new("order_number", self.order_number),
      IndexEntry::new("client_id", self.client_id),
      IndexEntry::new("status", self.status.as_str()),
    ];
    if let Some(assigned_to) = self.assigned_to {
      entries.push(IndexEntry::new("assigned_to", assigned_to));
    }
    entries
  }

  fn validate(&self) -> Result<(), Vec<FieldViolation>> {
    let mut v = Vec::new();
    check_str(&mut v, "equipment", &self.equipment, 1, 200);
    check_opt_str(&mut v, "serial_number", self.serial_number.as_ref(), 100);
    check_str(&mut v, "reported_problem", &self.reported_problem, 1, 1000);
    check_opt_str(&mut v, "diagnosis", self.diagnosis.as_ref(), 1000);
    check_opt_str(&mut v, "solution", self.solution.as_ref(), 1000);
    check_non_negative(&mut v, "labor_cost", self.labor_cost);
    check_non_negative(&mut v, "parts_cost", self.parts_cost);
    check_non_negative(&mut v, "total_cost", self.total_cost);
    if let Some(parts) = &self.parts_used {
      check_line_items(&mut v, "parts_used", parts);
    }
    check_opt_str(&mut v, "notes", self.notes.as_ref(), 1000);
    finish(v)
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewServiceOrder {
  pub client_id:            Uuid,
  pub equipment:            String,
  pub serial_number:        Option<String>,
  pub reported_problem:     String,
  pub status:               ServiceOrderStatus,
  pub priority:             ServiceOrderPriority,
  pub assigned_to:          Option<Uuid>,
  pub start_date:           DateTime<Utc>,
  pub estimated_completion: Option<DateTime<Utc>>,
  pub labor_cost:           Option<f64>,
  pub parts_cost:           Option<f64>,
  pub total_cost:           Option<f64>,
  pub parts_used:           Option<Vec<LineItem>>,
  pub notes:                Option<String>,
}

impl NewServiceOrder {
  pub fn build(self, order_number: u64, now: DateTime<Utc>) -> ServiceOrder {
    ServiceOrder {
      id: Uuid::new_v4(),
      order_number,
      client_id: self.client_id,
      equipment: self.equipment,
      serial_number: self.serial_number,
      reported_problem: self.reported_problem,
      diagnosis: None,
      solution: None,
      status: self.status,
      priority: self.priority,
      assigned_to: self.assigned_to,
      start_date: self.start_date,
      estimated_completion: self.estimated_completion,
      completion_date: None,
      labor_cost: self.labor_cost.unwrap_or(0.0),
      parts_cost: self.parts_cost.unwrap_or(0.0),
      total_cost: self.total_cost.unwrap_or(0.0),
      parts_used: self.parts_used,
      notes: self.notes,
      created_at: now,
      updated_at: now,
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceOrderPatch {
  pub equipment:            Option<String>,
  pub serial_number:        Option<String>,
  pub reported_problem:     Option<String>,
  pub diagnosis:            Option<String>,
  pub solution:             Option<String>,
  pub status:               Option<ServiceOrderStatus>,
  pub priority:             Option<ServiceOrderPriority>,
  pub assigned_to:          Option<Uuid>,
  pub estimated_completion: Option<DateTime<Utc>>,
  pub completion_date:      Option<DateTime<Utc>>,
  pub labor_cost:           Option<f64>,
  pub parts_cost:           Option<f64>,
  pub total_cost:           Option<f64>,
  pub parts_used:           Option<Vec<LineItem>>,
  pub notes:                Option<String>,
}

impl ServiceOrderPatch {
  pub fn apply(self, order: &mut ServiceOrder) {
    if let Some(equipment) = self.equipment {
      order.equipment = equipment;
    }
    if let Some(serial_number) = self.serial_number {
      order.serial_number = Some(serial_number);
    }
    if let Some(reported_problem) = self.reported_problem {
      order.reported_problem = reported_problem;
    }
    if let Some(diagnosis) = self.diagnosis {
      order.diagnosis = Some(diagnosis);
    }
    if let Some(solution) = self.solution {
      order.solution = Some(solution);
    }
    if let Some(status) = self.status {
      order.status = status;
    }
    if let Some(priority) = self.priority {
      order.priority = priority;
    }
    if let Some(assigned_to) = self.assigned_to {
      order.assigned_to = Some(assigned_to);
    }
    if let Some(estimated_completion) = self.estimated_completion {
      order.estimated_completion = Some(estimated_completion);
    }
    if let Some(completion_date) = self.completion_date {
      order.completion_date = Some(completion_date);
    }
    if let Some(labor_cost) = self.labor_cost {
      order.labor_cost = labor_cost;
    }
    if let Some(parts_cost) = self.parts_cost {
      order.parts_cost = parts_cost;
    }
    if let Some(total_cost) = self.total_cost {
      order.total_cost = total_cost;
    }
    if let Some(parts_used) = self.parts_used {
      order.parts_used = Some(parts_used);
    }
    if let Some(notes) = self.notes {
      order.notes = Some(notes);
    }
  }
}

// ─── Production order ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductionOrderStatus {
  Planned,
  InProgress,
  Completed,
  Cancelled,
}

impl ProductionOrderStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Planned => "planned",
      Self::InProgress => "in_progress",
      Self::Completed => "completed",
      Self::Cancelled => "cancelled",
    }
  }
}

/// A raw-material requirement on a production order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRequirement {
  pub product_id:      Uuid,
  pub product_name:    String,
  pub quantity_needed: f64,
  pub quantity_used:   f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionOrder {
  pub id:                  Uuid,
  pub order_number:        u64,
  pub product_id:          Uuid,
  pub product_name:        String,
  pub quantity:            f64,
  pub start_date:          DateTime<Utc>,
  pub expected_completion: DateTime<Utc>,
  pub completion_date:     Option<DateTime<Utc>>,
  pub status:              ProductionOrderStatus,
  pub materials:           Vec<MaterialRequirement>,
  pub labor_hours:         f64,
  pub production_cost:     f64,
  pub notes:               Option<String>,
  pub responsible_id:      Option<Uuid>,
  pub created_at:          DateTime<Utc>,
  pub updated_at:          DateTime<Utc>,
}

impl Entity for ProductionOrder {
  const KIND: EntityKind = EntityKind::ProductionOrders;

  fn id(&self) -> Uuid { self.id }

  fn index_entries(&self) -> Vec<IndexEntry> {
    vec![
      IndexEntry::new("order_number", self.order_number),
      IndexEntry::new("product_id", self.product_id),
      IndexEntry::new("status", self.status.as_str()),
    ]
  }

  fn validate(&self) -> Result<(), Vec<FieldViolation>> {
    let mut v = Vec::new();
    check_positive(&mut v, "quantity", self.quantity);
    for (i, m) in self.materials.iter().enumerate() {
      check_positive(
        &mut v,
        &format!("materials[{i}].quantity_needed"),
        m.quantity_needed,
      );
      check_non_negative(
        &mut v,
        &format!("materials[{i}].quantity_used"),
        m.quantity_used,
      );
    }
    check_non_negative(&mut v, "labor_hours", self.labor_hours);
    check_non_negative(&mut v, "production_cost", self.production_cost);
    check_opt_str(&mut v, "notes", self.notes.as_ref(), 1000);
    finish(v)
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewProductionOrder {
  pub product_id:          Uuid,
  pub product_name:        String,
  pub quantity:            f64,
  pub start_date:          DateTime<Utc>,
  pub expected_completion: DateTime<Utc>,
  pub status:              ProductionOrderStatus,
  pub materials:           Vec<MaterialRequirement>,
  pub labor_hours:         Option<f64>,
  pub production_cost:     Option<f64>,
  pub notes:               Option<String>,
  pub responsible_id:      Option<Uuid>,
}

impl NewProductionOrder {
  pub fn build(self, order_number: u64, now: DateTime<Utc>) -> ProductionOrder {
    ProductionOrder {
      id: Uuid::new_v4(),
      order_number,
      product_id: self.product_id,
      product_name: self.product_name,
      quantity: self.quantity,
      start_date: self.start_date,
      expected_completion: self.expected_completion,
      completion_date: None,
      status: self.status,
      materials: self.materials,
      labor_hours: self.labor_hours.unwrap_or(0.0),
      production_cost: self.production_cost.unwrap_or(0.0),
      notes: self.notes,
      responsible_id: self.responsible_id,
      created_at: now,
      updated_at: now,
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductionOrderPatch {
  pub quantity:            Option<f64>,
  pub expected_completion: Option<DateTime<Utc>>,
  pub completion_date:     Option<DateTime<Utc>>,
  pub status:              Option<ProductionOrderStatus>,
  pub materials:           Option<Vec<MaterialRequirement>>,
  pub labor_hours:         Option<f64>,
  pub production_cost:     Option<f64>,
  pub notes:               Option<String>,
  pub responsible_id:      Option<Uuid>,
}

impl ProductionOrderPatch {
  pub fn apply(self, order: &mut ProductionOrder) {
    if let Some(quantity) = self.quantity {
      order.quantity = quantity;
    }
    if let Some(expected_completion) = self.expected_completion {
      order.expected_completion = expected_completion;
    }
    if let Some(completion_date) = self.completion_date {
      order.completion_date = Some(completion_date);
    }
    if let Some(status) = self.status {
      order.status = status;
    }
    if let Some(materials) = self.materials {
      order.materials = materials;
    }
    if let Some(labor_hours) = self.labor_hours {
      order.labor_hours = labor_hours;
    }
    if let Some(production_cost) = self.production_cost {
      order.production_cost = production_cost;
    }
    if let Some(notes) = self.notes {
      order.notes = Some(notes);
    }
    if let Some(responsible_id) = self.responsible_id {
      order.responsible_id = Some(responsible_id);
    }
  }
}

// ─── Contract ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
  Draft,
  Active,
  Suspended,
  Expired,
  Cancelled,
}

impl ContractStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Draft => "draft",
      Self::Active => "active",
      Self::Suspended => "suspended",
      Self::Expired => "expired",
      Self::Cancelled => "cancelled",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractType {
  Service,
  Rental,
  Supply,
  Partnership,
  Other,
}

impl ContractType {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Service => "service",
      Self::Rental => "rental",
      Self::Supply => "supply",
      Self::Partnership => "partnership",
      Self::Other => "other",
    }
  }
}

/// A commercial agreement with a client or supplier. Unlike the numbered
/// kinds, the contract number is a free-form caller-supplied code; the
/// unique index still guarantees one contract per number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
  pub id:                   Uuid,
  pub contract_number:      String,
  pub title:                String,
  #[serde(rename = "type")]
  pub contract_type:        ContractType,
  pub client_id:            Option<Uuid>,
  pub supplier_id:          Option<Uuid>,
  pub start_date:           DateTime<Utc>,
  pub end_date:             DateTime<Utc>,
  pub value:                f64,
  pub payment_terms:        String,
  pub status:               ContractStatus,
  pub auto_renew:           bool,
  pub renewal_notice_days:  u32,
  pub description:          Option<String>,
  pub terms:                Option<String>,
  pub responsible_user_id:  Uuid,
  pub created_at:           DateTime<Utc>,
  pub updated_at:           DateTime<Utc>,
}

impl Entity for Contract {
  const KIND: EntityKind = EntityKind::Contracts;

  fn id(&self) -> Uuid { self.id }

  fn index_entries(&self) -> Vec<IndexEntry> {
    vec![
      IndexEntry::new("contract_number", self.contract_number.clone()),
      IndexEntry::new("status", self.status.as_str()),
      IndexEntry::new("end_date", self.end_date.to_rfc3339()),
    ]
  }

  fn validate(&self) -> Result<(), Vec<FieldViolation>> {
    let mut v = Vec::new();
    check_str(&mut v, "contract_number", &self.contract_number, 1, 50);
    check_str(&mut v, "title", &self.title, 1, 200);
    check_non_negative(&mut v, "value", self.value);
    check_str(&mut v, "payment_terms", &self.payment_terms, 0, 500);
    check_opt_str(&mut v, "description", self.description.as_ref(), 2000);
    check_opt_str(&mut v, "terms", self.terms.as_ref(), 5000);
    finish(v)
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewContract {
  pub contract_number:     String,
  pub title:               String,
  #[serde(rename = "type")]
  pub contract_type:       ContractType,
  pub client_id:           Option<Uuid>,
  pub supplier_id:         Option<Uuid>,
  pub start_date:          DateTime<Utc>,
  pub end_date:            DateTime<Utc>,
  pub value:               f64,
  pub payment_terms:       String,
  pub status:              ContractStatus,
  pub auto_renew:          Option<bool>,
  pub renewal_notice_days: Option<u32>,
  pub description:         Option<String>,
  pub terms:               Option<String>,
  pub responsible_user_id: Uuid,
}

impl NewContract {
  pub fn build(self, now: DateTime<Utc>) -> Contract {
    Contract {
      id: Uuid::new_v4(),
      contract_number: self.contract_number,
      title: self.title,
      contract_type: self.contract_type,
      client_id: self.client_id,
      supplier_id: self.supplier_id,
      start_date: self.start_date,
      end_date: self.end_date,
      value: self.value,
      payment_terms: self.payment_terms,
      status: self.status,
      auto_renew: self.auto_renew.unwrap_or(false),
      renewal_notice_days: self.renewal_notice_days.unwrap_or(30),
      description: self.description,
      terms: self.terms,
      responsible_user_id: self.responsible_user_id,
      created_at: now,
      updated_at: now,
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContractPatch {
  pub contract_number:     Option<String>,
  pub title:               Option<String>,
  #[serde(rename = "type")]
  pub contract_type:       Option<ContractType>,
  pub start_date:          Option<DateTime<Utc>>,
  pub end_date:            Option<DateTime<Utc>>,
  pub value:               Option<f64>,
  pub payment_terms:       Option<String>,
  pub status:              Option<ContractStatus>,
  pub auto_renew:          Option<bool>,
  pub renewal_notice_days: Option<u32>,
  pub description:         Option<String>,
  pub terms:               Option<String>,
}

impl ContractPatch {
  pub fn apply(self, contract: &mut Contract) {
    if let Some(contract_number) = self.contract_number {
      contract.contract_number = contract_number;
    }
    if let Some(title) = self.title {
      contract.title = title;
    }
    if let Some(contract_type) = self.contract_type {
      contract.contract_type = contract_type;
    }
    if let Some(start_date) = self.start_date {
      contract.start_date = start_date;
    }
    if let Some(end_date) = self.end_date {
      contract.end_date = end_date;
    }
    if let Some(value) = self.value {
      contract.value = value;
    }
    if let Some(payment_terms) = self.payment_terms {
      contract.payment_terms = payment_terms;
    }
    if let Some(status) = self.status {
      contract.status = status;
    }
    if let Some(auto_renew) = self.auto_renew {
      contract.auto_renew = auto_renew;
    }
    if let Some(renewal_notice_days) = self.renewal_notice_days {
      contract.renewal_notice_days = renewal_notice_days;
    }
    if let Some(description) = self.description {
      contract.description = Some(description);
    }
    if let Some(terms) = self.terms {
      contract.terms = Some(terms);
    }
  }
}

// ─── Fixed asset ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
  Active,
  Inactive,
  Maintenance,
  Disposed,
}

impl AssetStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Active => "active",
      Self::Inactive => "inactive",
      Self::Maintenance => "maintenance",
      Self::Disposed => "disposed",
    }
  }
}

/// A depreciable asset on straight-line depreciation. Accrual is computed
/// on demand (see the fixed-asset service); `accumulated_depreciation`
/// stores the last posted figure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedAsset {
  pub id:                       Uuid,
  pub code:                     String,
  pub name:                     String,
  pub description:              Option<String>,
  pub category:                 String,
  pub acquisition_date:         DateTime<Utc>,
  pub acquisition_value:        f64,
  pub useful_life_months:       u32,
  pub monthly_depreciation:     f64,
  pub accumulated_depreciation: f64,
  pub residual_value:           f64,
  pub location:                 Option<String>,
  /// Custodian (employee id).
  pub responsible_id:           Option<Uuid>,
  pub status:                   AssetStatus,
  pub disposal_date:            Option<DateTime<Utc>>,
  pub disposal_value:           Option<f64>,
  pub notes:                    Option<String>,
  pub created_at:               DateTime<Utc>,
  pub updated_at:               DateTime<Utc>,
}

impl Entity for FixedAsset {
  const KIND: EntityKind = EntityKind::FixedAssets;

  fn id(&self) -> Uuid { self.id }

  fn index_entries(&self) -> Vec<IndexEntry> {
    vec![
      IndexEntry::new("code", self.code.clone()),
      IndexEntry::new("status", self.status.as_str()),
      IndexEntry::new("category", self.category.clone()),
    ]
  }

  fn validate(&self) -> Result<(), Vec<FieldViolation>> {
    let mut v = Vec::new();
    check_str(&mut v, "code", &self.code, 1, 50);
    check_str(&mut v, "name", &self.name, 1, 200);
    check_opt_str(&mut v, "description", self.description.as_ref(), 1000);
    check_str(&mut v, "category", &self.category, 0, 100);
    check_non_negative(&mut v, "acquisition_value", self.acquisition_value);
    if self.useful_life_months < 1 {
      v.push(FieldViolation::new(
        "useful_life_months",
        "must be at least 1",
      ));
    }
    check_non_negative(
      &mut v,
      "monthly_depreciation",
      self.monthly_depreciation,
    );
    check_non_negative(
      &mut v,
      "accumulated_depreciation",
      self.accumulated_depreciation,
    );
    check_non_negative(&mut v, "residual_value", self.residual_value);
    check_opt_str(&mut v, "location", self.location.as_ref(), 200);
    if let Some(value) = self.disposal_value {
      check_non_negative(&mut v, "disposal_value", value);
    }
    check_opt_str(&mut v, "notes", self.notes.as_ref(), 1000);
    finish(v)
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewFixedAsset {
  pub code:                 String,
  pub name:                 String,
  pub description:          Option<String>,
  pub category:             String,
  pub acquisition_date:     DateTime<Utc>,
  pub acquisition_value:    f64,
  pub useful_life_months:   u32,
  pub monthly_depreciation: f64,
  pub residual_value:       Option<f64>,
  pub location:             Option<String>,
  pub responsible_id:       Option<Uuid>,
  pub status:               AssetStatus,
  pub notes:                Option<String>,
}

impl NewFixedAsset {
  pub fn build(self, now: DateTime<Utc>) -> FixedAsset {
    FixedAsset {
      id: Uuid::new_v4(),
      code: self.code,
      name: self.name,
      description: self.description,
      category: self.category,
      acquisition_date: self.acquisition_date,
      acquisition_value: self.acquisition_value,
      useful_life_months: self.useful_life_months,
      monthly_depreciation: self.monthly_depreciation,
      accumulated_depreciation: 0.0,
      residual_value: self.residual_value.unwrap_or(0.0),
      location: self.location,
      responsible_id: self.responsible_id,
      status: self.status,
      disposal_date: None,
      disposal_value: None,
      notes: self.notes,
      created_at: now,
      updated_at: now,
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixedAssetPatch {
  pub code:                     Option<String>,
  pub name:                     Option<String>,
  pub description:              Option<String>,
  pub category:                 Option<String>,
  pub acquisition_value:        Option<f64>,
  pub useful_life_months:       Option<u32>,
  pub monthly_depreciation:     Option<f64>,
  pub accumulated_depreciation: Option<f64>,
  pub residual_value:           Option<f64>,
  pub location:                 Option<String>,
  pub responsible_id:           Option<Uuid>,
  pub status:                   Option<AssetStatus>,
  pub disposal_date:            Option<DateTime<Utc>>,
  pub disposal_value:           Option<f64>,
  pub notes:                    Option<String>,
}

impl FixedAssetPatch {
  pub fn apply(self, asset: &mut FixedAsset) {
    if let Some(code) = self.code {
      asset.code = code;
    }
    if let Some(name) = self.name {
      asset.name = name;
    }
    if let Some(description) = self.description {
      asset.description = Some(description);
    }
    if let Some(category) = self.category {
      asset.category = category;
    }
    if let Some(acquisition_value) = self.acquisition_value {
      asset.acquisition_value = acquisition_value;
    }
    if let Some(useful_life_months) = self.useful_life_months {
      asset.useful_life_months = useful_life_months;
    }
    if let Some(monthly_depreciation) = self.monthly_depreciation {
      asset.monthly_depreciation = monthly_depreciation;
    }
    if let Some(accumulated) = self.accumulated_depreciation {
      asset.accumulated_depreciation = accumulated;
    }
    if let Some(residual_value) = self.residual_value {
      asset.residual_value = residual_value;
    }
    if let Some(location) = self.location {
      asset.location = Some(location);
    }
    if let Some(responsible_id) = self.responsible_id {
      asset.responsible_id = Some(responsible_id);
    }
    if let Some(status) = self.status {
      asset.status = status;
    }
    if let Some(disposal_date) = self.disposal_date {
      asset.disposal_date = Some(disposal_date);
    }
    if let Some(disposal_value) = self.disposal_value {
      asset.disposal_value = Some(disposal_value);
    }
    if let Some(notes) = self.notes {
      asset.notes = Some(notes);
    }
  }
}

// ─── Time clock ──────────────────────────────────────────────────────────────

/// One employee-day of punches. The date is a calendar day; punches are
/// wall-clock times at minute granularity. Totals are recomputed by the
/// time clock service whenever punches change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeClock {
  pub id:             Uuid,
  pub employee_id:    Uuid,
  pub date:           NaiveDate,
  pub clock_in:       Option<NaiveTime>,
  pub clock_out:      Option<NaiveTime>,
  pub lunch_start:    Option<NaiveTime>,
  pub lunch_end:      Option<NaiveTime>,
  pub total_hours:    f64,
  pub overtime_hours: f64,
  pub notes:          Option<String>,
  /// Approving user id.
  pub approved_by:    Option<Uuid>,
  pub created_at:     DateTime<Utc>,
  pub updated_at:     DateTime<Utc>,
}

impl Entity for TimeClock {
  const KIND: EntityKind = EntityKind::TimeClocks;

  fn id(&self) -> Uuid { self.id }

  fn index_entries(&self) -> Vec<IndexEntry> {
    vec![
      IndexEntry::new("employee_id", self.employee_id),
      IndexEntry::new("date", self.date.to_string()),
    ]
  }

  fn validate(&self) -> Result<(), Vec<FieldViolation>> {
    let mut v = Vec::new();
    check_non_negative(&mut v, "total_hours", self.total_hours);
    check_non_negative(&mut v, "overtime_hours", self.overtime_hours);
    check_opt_str(&mut v, "notes", self.notes.as_ref(), 500);
    finish(v)
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTimeClock {
  pub employee_id: Uuid,
  pub date:        NaiveDate,
  pub clock_in:    Option<NaiveTime>,
  pub clock_out:   Option<NaiveTime>,
  pub lunch_start: Option<NaiveTime>,
  pub lunch_end:   Option<NaiveTime>,
  pub notes:       Option<String>,
}

impl NewTimeClock {
  pub fn build(self, now: DateTime<Utc>) -> TimeClock {
    TimeClock {
      id: Uuid::new_v4(),
      employee_id: self.employee_id,
      date: self.date,
      clock_in: self.clock_in,
      clock_out: self.clock_out,
      lunch_start: self.lunch_start,
      lunch_end: self.lunch_end,
      total_hours: 0.0,
      overtime_hours: 0.0,
      notes: self.notes,
      approved_by: None,
      created_at: now,
      updated_at: now,
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeClockPatch {
  pub clock_in:    Option<NaiveTime>,
  pub clock_out:   Option<NaiveTime>,
  pub lunch_start: Option<NaiveTime>,
  pub lunch_end:   Option<NaiveTime>,
  pub notes:       Option<String>,
  pub approved_by: Option<Uuid>,
}

impl TimeClockPatch {
  pub fn apply(self, entry: &mut TimeClock) {
    if let Some(clock_in) = self.clock_in {
      entry.clock_in = Some(clock_in);
    }
    if let Some(clock_out) = self.clock_out {
      entry.clock_out = Some(clock_out);
    }
    if let Some(lunch_start) = self.lunch_start {
      entry.lunch_start = Some(lunch_start);
    }
    if let Some(lunch_end) = self.lunch_end {
      entry.lunch_end = Some(lunch_end);
    }
    if let Some(notes) = self.notes {
      entry.notes = Some(notes);
    }
    if let Some(approved_by) = self.approved_by {
      entry.approved_by = Some(approved_by);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn contract_defaults() {
    let contract = NewContract {
      contract_number: "CT-2026-014".into(),
      title: "Monthly maintenance".into(),
      contract_type: ContractType::Service,
      client_id: Some(Uuid::new_v4()),
      supplier_id: None,
      start_date: Utc::now(),
      end_date: Utc::now(),
      value: 1200.0,
      payment_terms: "net 30".into(),
      status: ContractStatus::Active,
      auto_renew: None,
      renewal_notice_days: None,
      description: None,
      terms: None,
      responsible_user_id: Uuid::new_v4(),
    }
    .build(Utc::now());

    assert!(!contract.auto_renew);
    assert_eq!(contract.renewal_notice_days, 30);
    assert!(contract.validate().is_ok());
  }

  #[test]
  fn asset_needs_a_useful_life() {
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
    .build(Utc::now());

    assert!(asset.validate().is_ok());
    asset.useful_life_months = 0;
    let violations = asset.validate().unwrap_err();
    assert_eq!(violations[0].field, "useful_life_months");
  }

  #[test]
  fn time_clock_date_indexed_at_day_granularity() {
    let entry = NewTimeClock {
      employee_id: Uuid::new_v4(),
      date: NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
      clock_in: None,
      clock_out: None,
      lunch_start: None,
      lunch_end: None,
      notes: None,
    }
    .build(Utc::now());

    let entries = entry.index_entries();
    let date = entries.iter().find(|e| e.index == "date").unwrap();
    assert_eq!(date.value.storage_key(), "2026-03-09");
  }
}
