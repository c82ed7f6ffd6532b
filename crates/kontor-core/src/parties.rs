//! People and organisations: users, clients, suppliers, employees.
//!
//! Clients, suppliers, and employees all carry a `document` field (the
//! tax/identity number) with a unique index — one party per document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  entity::{
    Entity, FieldViolation, IndexEntry, check_email, check_non_negative,
    check_opt_str, check_str, finish,
  },
  kind::EntityKind,
};

// ─── User ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
  Admin,
  Cashier,
}

impl UserRole {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Admin => "admin",
      Self::Cashier => "cashier",
    }
  }
}

/// An operator account. Session handling lives outside this crate; the
/// record only stores what the schema declares.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub id:         Uuid,
  pub name:       String,
  pub email:      String,
  pub password:   String,
  pub role:       UserRole,
  pub active:     bool,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Entity for User {
  const KIND: EntityKind = EntityKind::Users;

  fn id(&self) -> Uuid { self.id }

  fn index_entries(&self) -> Vec<IndexEntry> {
    vec![
      IndexEntry::new("email", self.email.clone()),
      IndexEntry::new("role", self.role.as_str()),
    ]
  }

  fn validate(&self) -> Result<(), Vec<FieldViolation>> {
    let mut v = Vec::new();
    check_str(&mut v, "name", &self.name, 2, 100);
    check_str(&mut v, "email", &self.email, 0, 255);
    check_email(&mut v, "email", &self.email);
    check_str(&mut v, "password", &self.password, 6, usize::MAX);
    finish(v)
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
  pub name:     String,
  pub email:    String,
  pub password: String,
  pub role:     UserRole,
  pub active:   Option<bool>,
}

impl NewUser {
  pub fn build(self, now: DateTime<Utc>) -> User {
    User {
      id: Uuid::new_v4(),
      name: self.name,
      email: self.email,
      password: self.password,
      role: self.role,
      active: self.active.unwrap_or(true),
      created_at: now,
      updated_at: now,
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
  pub name:     Option<String>,
  pub email:    Option<String>,
  pub password: Option<String>,
  pub role:     Option<UserRole>,
  pub active:   Option<bool>,
}

impl UserPatch {
  pub fn apply(self, user: &mut User) {
    if let Some(name) = self.name {
      user.name = name;
    }
    if let Some(email) = self.email {
      user.email = email;
    }
    if let Some(password) = self.password {
      user.password = password;
    }
    if let Some(role) = self.role {
      user.role = role;
    }
    if let Some(active) = self.active {
      user.active = active;
    }
  }
}

// ─── Client ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
  pub id:           Uuid,
  pub name:         String,
  /// Tax document (CPF or CNPJ). Unique per client.
  pub document:     String,
  pub email:        Option<String>,
  pub phone:        Option<String>,
  pub address:      Option<String>,
  pub city:         Option<String>,
  pub state:        Option<String>,
  pub zip_code:     Option<String>,
  pub credit_limit: f64,
  pub current_debt: f64,
  pub active:       bool,
  pub created_at:   DateTime<Utc>,
  pub updated_at:   DateTime<Utc>,
}

impl Entity for Client {
  const KIND: EntityKind = EntityKind::Clients;

  fn id(&self) -> Uuid { self.id }

  fn index_entries(&self) -> Vec<IndexEntry> {
    let mut entries = vec![IndexEntry::new("document", self.document.clone())];
    if let Some(email) = &self.email {
      entries.push(IndexEntry::new("email", email.clone()));
    }
    entries
  }

  fn validate(&self) -> Result<(), Vec<FieldViolation>> {
    let mut v = Vec::new();
    check_str(&mut v, "name", &self.name, 2, 200);
    check_str(&mut v, "document", &self.document, 1, 20);
    if let Some(email) = &self.email {
      check_str(&mut v, "email", email, 0, 255);
      check_email(&mut v, "email", email);
    }
    check_opt_str(&mut v, "phone", self.phone.as_ref(), 20);
    check_opt_str(&mut v, "address", self.address.as_ref(), 500);
    check_opt_str(&mut v, "city", self.city.as_ref(), 100);
    check_opt_str(&mut v, "state", self.state.as_ref(), 2);
    check_opt_str(&mut v, "zip_code", self.zip_code.as_ref(), 10);
    check_non_negative(&mut v, "credit_limit", self.credit_limit);
    check_non_negative(&mut v, "current_debt", self.current_debt);
    finish(v)
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewClient {
  pub name:         String,
  pub document:     String,
  pub email:        Option<String>,
  pub phone:        Option<String>,
  pub address:      Option<String>,
  pub city:         Option<String>,
  pub state:        Option<String>,
  pub zip_code:     Option<String>,
  pub credit_limit: Option<f64>,
  pub current_debt: Option<f64>,
  pub active:       Option<bool>,
}

impl NewClient {
  pub fn build(self, now: DateTime<Utc>) -> Client {
    Client {
      id: Uuid::new_v4(),
      name: self.name,
      document: self.document,
      email: self.email,
      phone: self.phone,
      address: self.address,
      city: self.city,
      state: self.state,
      zip_code: self.zip_code,
      credit_limit: self.credit_limit.unwrap_or(0.0),
      current_debt: self.current_debt.unwrap_or(0.0),
      active: self.active.unwrap_or(true),
      created_at: now,
      updated_at: now,
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientPatch {
  pub name:         Option<String>,
  pub document:     Option<String>,
  pub email:        Option<String>,
  pub phone:        Option<String>,
  pub address:      Option<String>,
  pub city:         Option<String>,
  pub state:        Option<String>,
  pub zip_code:     Option<String>,
  pub credit_limit: Option<f64>,
  pub current_debt: Option<f64>,
  pub active:       Option<bool>,
}

impl ClientPatch {
  pub fn apply(self, client: &mut Client) {
    if let Some(name) = self.name {
      client.name = name;
    }
    if let Some(document) = self.document {
      client.document = document;
    }
    if let Some(email) = self.email {
      client.email = Some(email);
    }
    if let Some(phone) = self.phone {
      client.phone = Some(phone);
    }
    if let Some(address) = self.address {
      client.address = Some(address);
    }
    if let Some(city) = self.city {
      client.city = Some(city);
    }
    if let Some(state) = self.state {
      client.state = Some(state);
    }
    if let Some(zip_code) = self.zip_code {
      client.zip_code = Some(zip_code);
    }
    if let Some(credit_limit) = self.credit_limit {
      client.credit_limit = credit_limit;
    }
    if let Some(current_debt) = self.current_debt {
      client.current_debt = current_debt;
    }
    if let Some(active) = self.active {
      client.active = active;
    }
  }
}

// ─── Supplier ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
  pub id:             Uuid,
  pub name:           String,
  /// Tax document (CNPJ). Unique per supplier.
  pub document:       String,
  pub email:          Option<String>,
  pub phone:          Option<String>,
  pub address:        Option<String>,
  pub city:           Option<String>,
  pub state:          Option<String>,
  pub zip_code:       Option<String>,
  pub contact_person: Option<String>,
  pub active:         bool,
  pub created_at:     DateTime<Utc>,
  pub updated_at:     DateTime<Utc>,
}

impl Entity for Supplier {
  const KIND: EntityKind = EntityKind::Suppliers;

  fn id(&self) -> Uuid { self.id }

  fn index_entries(&self) -> Vec<IndexEntry> {
    let mut entries = vec![IndexEntry::new("document", self.document.clone())];
    if let Some(email) = &self.email {
      entries.push(IndexEntry::new("email", email.clone()));
    }
    entries
  }

  fn validate(&self) -> Result<(), Vec<FieldViolation>> {
    let mut v = Vec::new();
    check_str(&mut v, "name", &self.name, 2, 200);
    check_str(&mut v, "document", &self.document, 1, 20);
    if let Some(email) = &self.email {
      check_str(&mut v, "email", email, 0, 255);
      check_email(&mut v, "email", email);
    }
    check_opt_str(&mut v, "phone", self.phone.as_ref(), 20);
    check_opt_str(&mut v, "address", self.address.as_ref(), 500);
    check_opt_str(&mut v, "city", self.city.as_ref(), 100);
    check_opt_str(&mut v, "state", self.state.as_ref(), 2);
    check_opt_str(&mut v, "zip_code", self.zip_code.as_ref(), 10);
    check_opt_str(&mut v, "contact_person", self.contact_person.as_ref(), 200);
    finish(v)
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSupplier {
  pub name:           String,
  pub document:       String,
  pub email:          Option<String>,
  pub phone:          Option<String>,
  pub address:        Option<String>,
  pub city:           Option<String>,
  pub state:          Option<String>,
  pub zip_code:       Option<String>,
  pub contact_person: Option<String>,
  pub active:         Option<bool>,
}

impl NewSupplier {
  pub fn build(self, now: DateTime<Utc>) -> Supplier {
    Supplier {
      id: Uuid::new_v4(),
      name: self.name,
      document: self.document,
      email: self.email,
      phone: self.phone,
      address: self.address,
      city: self.city,
      state: self.state,
      zip_code: self.zip_code,
      contact_person: self.contact_person,
      active: self.active.unwrap_or(true),
      created_at: now,
      updated_at: now,
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SupplierPatch {
  pub name:           Option<String>,
  pub document:       Option<String>,
  pub email:          Option<String>,
  pub phone:          Option<String>,
  pub address:        Option<String>,
  pub city:           Option<String>,
  pub state:          Option<String>,
  pub zip_code:       Option<String>,
  pub contact_person: Option<String>,
  pub active:         Option<bool>,
}

impl SupplierPatch {
  pub fn apply(self, supplier: &mut Supplier) {
    if let Some(name) = self.name {
      supplier.name = name;
    }
    if let Some(document) = self.document {
      supplier.document = document;
    }
    if let Some(email) = self.email {
      supplier.email = Some(email);
    }
    if let Some(phone) = self.phone {
      supplier.phone = Some(phone);
    }
    if let Some(address) = self.address {
      supplier.address = Some(address);
    }
    if let Some(city) = self.city {
      supplier.city = Some(city);
    }
    if let Some(state) = self.state {
      supplier.state = Some(state);
    }
    if let Some(zip_code) = self.zip_code {
      supplier.zip_code = Some(zip_code);
    }
    if let Some(contact_person) = self.contact_person {
      supplier.contact_person = Some(contact_person);
    }
    if let Some(active) = self.active {
      supplier.active = active;
    }
  }
}

// ─── Employee ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
  pub id:               Uuid,
  pub name:             String,
  /// Tax document (CPF). Unique per employee.
  pub document:         String,
  pub email:            Option<String>,
  pub phone:            Option<String>,
  pub position:         String,
  pub department:       String,
  pub salary:           f64,
  pub hire_date:        DateTime<Utc>,
  pub termination_date: Option<DateTime<Utc>>,
  pub address:          Option<String>,
  pub city:             Option<String>,
  pub state:            Option<String>,
  pub zip_code:         Option<String>,
  pub active:           bool,
  pub created_at:       DateTime<Utc>,
  pub updated_at:       DateTime<Utc>,
}

impl Entity for Employee {
  const KIND: EntityKind = EntityKind::Employees;

  fn id(&self) -> Uuid { self.id }

  fn index_entries(&self) -> Vec<IndexEntry> {
    vec![
      IndexEntry::new("document", self.document.clone()),
      IndexEntry::new("department", self.department.clone()),
      IndexEntry::new("active", self.active),
    ]
  }

  fn validate(&self) -> Result<(), Vec<FieldViolation>> {
    let mut v = Vec::new();
    check_str(&mut v, "name", &self.name, 2, 200);
    check_str(&mut v, "document", &self.document, 1, 20);
    if let Some(email) = &self.email {
      check_str(&mut v, "email", email, 0, 255);
      check_email(&mut v, "email", email);
    }
    check_opt_str(&mut v, "phone", self.phone.as_ref(), 20);
    check_str(&mut v, "position", &self.position, 0, 100);
    check_str(&mut v, "department", &self.department, 0, 100);
    check_non_negative(&mut v, "salary", self.salary);
    check_opt_str(&mut v, "address", self.address.as_ref(), 500);
    check_opt_str(&mut v, "city", self.city.as_ref(), 100);
    check_opt_str(&mut v, "state", self.state.as_ref(), 2);
    check_opt_str(&mut v, "zip_code", self.zip_code.as_ref(), 10);
    finish(v)
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewEmployee {
  pub name:             String,
  pub document:         String,
  pub email:            Option<String>,
  pub phone:            Option<String>,
  pub position:         String,
  pub department:       String,
  pub salary:           f64,
  pub hire_date:        DateTime<Utc>,
  pub termination_date: Option<DateTime<Utc>>,
  pub address:          Option<String>,
  pub city:             Option<String>,
  pub state:            Option<String>,
  pub zip_code:         Option<String>,
  pub active:           Option<bool>,
}

impl NewEmployee {
  pub fn build(self, now: DateTime<Utc>) -> Employee {
    Employee {
      id: Uuid::new_v4(),
      name: self.name,
      document: self.document,
      email: self.email,
      phone: self.phone,
      position: self.position,
      department: self.department,
      salary: self.salary,
      hire_date: self.hire_date,
      termination_date: self.termination_date,
      address: self.address,
      city: self.city,
      state: self.state,
      zip_code: self.zip_code,
      active: self.active.unwrap_or(true),
      created_at: now,
      updated_at: now,
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeePatch {
  pub name:             Option<String>,
  pub document:         Option<String>,
  pub email:            Option<String>,
  pub phone:            Option<String>,
  pub position:         Option<String>,
  pub department:       Option<String>,
  pub salary:           Option<f64>,
  pub hire_date:        Option<DateTime<Utc>>,
  pub termination_date: Option<DateTime<Utc>>,
  pub address:          Option<String>,
  pub city:             Option<String>,
  pub state:            Option<String>,
  pub zip_code:         Option<String>,
  pub active:           Option<bool>,
}

impl EmployeePatch {
  pub fn apply(self, employee: &mut Employee) {
    if let Some(name) = self.name {
      employee.name = name;
    }
    if let Some(document) = self.document {
      employee.document = document;
    }
    if let Some(email) = self.email {
      employee.email = Some(email);
    }
    if let Some(phone) = self.phone {
      employee.phone = Some(phone);
    }
    if let Some(position) = self.position {
      employee.position = position;
    }
    if let Some(department) = self.department {
      employee.department = department;
    }
    if let Some(salary) = self.salary {
      employee.salary = salary;
    }
    if let Some(hire_date) = self.hire_date {
      employee.hire_date = hire_date;
    }
    if let Some(termination_date) = self.termination_date {
      employee.termination_date = Some(termination_date);
    }
    if let Some(address) = self.address {
      employee.address = Some(address);
    }
    if let Some(city) = self.city {
      employee.city = Some(city);
    }
    if let Some(state) = self.state {
      employee.state = Some(state);
    }
    if let Some(zip_code) = self.zip_code {
      employee.zip_code = Some(zip_code);
    }
    if let Some(active) = self.active {
      employee.active = active;
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn short_password_is_rejected() {
    let user = NewUser {
      name: "Ana".into(),
      email: "ana@example.com".into(),
      password: "12345".into(),
      role: UserRole::Cashier,
      active: None,
    }
    .build(Utc::now());

    let violations = user.validate().unwrap_err();
    assert_eq!(violations[0].field, "password");
  }

  #[test]
  fn client_email_index_is_optional() {
    let client = NewClient {
      name: "Mercado Bom Preço".into(),
      document: "12.345.678/0001-90".into(),
      email: None,
      phone: None,
      address: None,
      city: None,
      state: None,
      zip_code: None,
      credit_limit: None,
      current_debt: None,
      active: None,
    }
    .build(Utc::now());

    assert!(client.validate().is_ok());
    assert_eq!(client.credit_limit, 0.0);
    assert!(!client.index_entries().iter().any(|e| e.index == "email"));
  }
}
