//! The `Entity` trait and the validation vocabulary shared by all kinds.
//!
//! Together with the per-kind `validate` implementations in the entity
//! modules, this is the schema registry: given a candidate document it
//! answers valid or invalid-with-reasons, touching nothing else. Default
//! values are *not* applied here — the `New*` constructor inputs supply
//! them before validation ever runs, so `validate` stays a pure predicate
//! over fully-formed records.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::kind::EntityKind;

// ─── Index projection ────────────────────────────────────────────────────────

/// A value projected out of a document for secondary indexing.
///
/// Lookup is equality-only, so values are compared through their canonical
/// text form; there is no ordering requirement.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexValue {
  Text(String),
  Integer(i64),
  Boolean(bool),
}

impl IndexValue {
  /// The canonical key text stored in the index.
  pub fn storage_key(&self) -> String {
    match self {
      Self::Text(s) => s.clone(),
      Self::Integer(n) => n.to_string(),
      Self::Boolean(b) => (if *b { "true" } else { "false" }).to_owned(),
    }
  }
}

impl From<&str> for IndexValue {
  fn from(s: &str) -> Self { Self::Text(s.to_owned()) }
}

impl From<String> for IndexValue {
  fn from(s: String) -> Self { Self::Text(s) }
}

impl From<u64> for IndexValue {
  fn from(n: u64) -> Self { Self::Integer(n as i64) }
}

impl From<i64> for IndexValue {
  fn from(n: i64) -> Self { Self::Integer(n) }
}

impl From<bool> for IndexValue {
  fn from(b: bool) -> Self { Self::Boolean(b) }
}

impl From<Uuid> for IndexValue {
  fn from(id: Uuid) -> Self { Self::Text(id.hyphenated().to_string()) }
}

/// One index entry contributed by a document. `index` must name an index
/// declared on the document's collection.
#[derive(Debug, Clone)]
pub struct IndexEntry {
  pub index: &'static str,
  pub value: IndexValue,
}

impl IndexEntry {
  pub fn new(index: &'static str, value: impl Into<IndexValue>) -> Self {
    Self { index, value: value.into() }
  }
}

// ─── Violations ──────────────────────────────────────────────────────────────

/// A single failed field constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
  pub field:   String,
  pub message: String,
}

impl FieldViolation {
  pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
    Self { field: field.into(), message: message.into() }
  }

  /// Render a violation list for error display.
  pub fn join(violations: &[FieldViolation]) -> String {
    violations
      .iter()
      .map(|v| format!("{}: {}", v.field, v.message))
      .collect::<Vec<_>>()
      .join("; ")
  }
}

// ─── Entity ──────────────────────────────────────────────────────────────────

/// A stored record of one collection kind.
///
/// The identifier is set exactly once, by the writer, at construction;
/// the store never assigns or reassigns it.
pub trait Entity:
  Serialize + DeserializeOwned + Send + Sync + 'static
{
  const KIND: EntityKind;

  fn id(&self) -> Uuid;

  /// Values for every declared index present on this document.
  /// An absent optional field contributes no entry.
  fn index_entries(&self) -> Vec<IndexEntry>;

  /// Check every declared field constraint. Pure; never touches storage.
  fn validate(&self) -> Result<(), Vec<FieldViolation>>;
}

// ─── Validation helpers ──────────────────────────────────────────────────────
//
// Shared by the per-kind `validate` implementations. Each pushes zero or
// more violations into the caller's accumulator.

pub(crate) fn check_str(
  v: &mut Vec<FieldViolation>,
  field: &str,
  value: &str,
  min: usize,
  max: usize,
) {
  let n = value.chars().count();
  if n < min {
    v.push(FieldViolation::new(
      field,
      format!("must be at least {min} characters"),
    ));
  } else if n > max {
    v.push(FieldViolation::new(
      field,
      format!("must be at most {max} characters"),
    ));
  }
}

pub(crate) fn check_opt_str(
  v: &mut Vec<FieldViolation>,
  field: &str,
  value: Option<&String>,
  max: usize,
) {
  if let Some(s) = value {
    check_str(v, field, s, 0, max);
  }
}

pub(crate) fn check_email(
  v: &mut Vec<FieldViolation>,
  field: &str,
  value: &str,
) {
  let well_formed = value
    .split_once('@')
    .is_some_and(|(local, domain)| {
      !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
    });
  if !well_formed {
    v.push(FieldViolation::new(field, "is not a valid email address"));
  }
}

pub(crate) fn check_non_negative(
  v: &mut Vec<FieldViolation>,
  field: &str,
  value: f64,
) {
  if !(value >= 0.0) {
    v.push(FieldViolation::new(field, "must not be negative"));
  }
}

pub(crate) fn check_positive(
  v: &mut Vec<FieldViolation>,
  field: &str,
  value: f64,
) {
  if !(value > 0.0) {
    v.push(FieldViolation::new(field, "must be greater than zero"));
  }
}

pub(crate) fn finish(
  violations: Vec<FieldViolation>,
) -> Result<(), Vec<FieldViolation>> {
  if violations.is_empty() { Ok(()) } else { Err(violations) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn storage_key_is_canonical() {
    assert_eq!(IndexValue::from("pix").storage_key(), "pix");
    assert_eq!(IndexValue::from(42u64).storage_key(), "42");
    assert_eq!(IndexValue::from(true).storage_key(), "true");
  }

  #[test]
  fn string_bounds_count_characters_not_bytes() {
    let mut v = Vec::new();
    check_str(&mut v, "name", "héllo", 2, 5);
    assert!(v.is_empty());
  }

  #[test]
  fn email_shape() {
    let mut v = Vec::new();
    check_email(&mut v, "email", "ana@example.com");
    assert!(v.is_empty());
    check_email(&mut v, "email", "not-an-email");
    assert_eq!(v.len(), 1);
    check_email(&mut v, "email", "@example.com");
    assert_eq!(v.len(), 2);
  }

  #[test]
  fn nan_is_rejected_by_numeric_bounds() {
    let mut v = Vec::new();
    check_non_negative(&mut v, "amount", f64::NAN);
    assert_eq!(v.len(), 1);
  }
}
