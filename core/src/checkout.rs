// talat_core/src/checkout.rs

//! The Checkout Assembler: validates the customer form and snapshots the
//! cart into an immutable payload for the payment step. A payload is
//! never mutated after assembly; going back and forward in the flow
//! assembles a fresh one.

use crate::error::{FieldError, StoreError, StoreResult};
use crate::models::{CartLine, CustomerInfo};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

/// Point-in-time, immutable snapshot of a confirmed checkout: validated
/// customer details plus a deep copy of the cart lines, so later cart
/// mutations cannot retroactively alter an in-flight checkout.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutPayload {
  customer: CustomerInfo,
  lines: Vec<CartLine>,
  total_amount: i64,
  total_items: u32,
  created_at: DateTime<Utc>,
}

impl CheckoutPayload {
  pub fn customer(&self) -> &CustomerInfo {
    &self.customer
  }

  pub fn lines(&self) -> &[CartLine] {
    &self.lines
  }

  pub fn total_amount(&self) -> i64 {
    self.total_amount
  }

  pub fn total_items(&self) -> u32 {
    self.total_items
  }

  pub fn created_at(&self) -> DateTime<Utc> {
    self.created_at
  }
}

/// Validates the customer form against the required-field rules and
/// assembles the immutable payload. All violations are collected and
/// returned together as one `StoreError::Validation` so the form can
/// annotate every offending field at once.
pub fn assemble(customer: CustomerInfo, cart: &[CartLine]) -> StoreResult<CheckoutPayload> {
  let mut errors = validate_customer(&customer);
  if cart.is_empty() {
    errors.push(FieldError {
      field: "cart",
      message: "Cart is empty".to_string(),
    });
  }
  if !errors.is_empty() {
    warn!(error_count = errors.len(), "Checkout rejected by form validation");
    return Err(StoreError::validation(errors));
  }

  let lines = cart.to_vec();
  Ok(CheckoutPayload {
    total_amount: lines.iter().map(CartLine::line_total).sum(),
    total_items: lines.iter().map(|line| line.quantity).sum(),
    customer,
    lines,
    created_at: Utc::now(),
  })
}

fn validate_customer(customer: &CustomerInfo) -> Vec<FieldError> {
  let mut errors = Vec::new();
  let mut push = |field: &'static str, message: &str| {
    errors.push(FieldError {
      field,
      message: message.to_string(),
    })
  };

  if customer.name.trim().chars().count() < 2 {
    push("name", "Name must be at least 2 characters");
  }
  if customer.surname.trim().chars().count() < 2 {
    push("surname", "Surname must be at least 2 characters");
  }
  if !contact_number_is_valid(&customer.contact_number) {
    push("contact_number", "Contact number must contain at least 8 digits");
  }
  if !email_is_valid(&customer.email) {
    push("email", "Email address is not valid");
  }
  if customer.village.trim().is_empty() {
    push("village", "Village is required");
  }
  if customer.district.trim().is_empty() {
    push("district", "District is required");
  }
  if customer.province.trim().is_empty() {
    push("province", "Province is required");
  }
  if customer.carrier.is_none() {
    push("carrier", "A shipping carrier must be selected");
  }

  errors
}

/// At least 8 digits once the usual separators are stripped; nothing but
/// digits and separators allowed.
fn contact_number_is_valid(raw: &str) -> bool {
  let mut digits = 0usize;
  for c in raw.trim().chars() {
    match c {
      '0'..='9' => digits += 1,
      '+' | '-' | ' ' | '(' | ')' => {}
      _ => return false,
    }
  }
  digits >= 8
}

/// Shape check only: one '@' with a dotted, non-edge domain. Deliverability
/// is the mail provider's problem.
fn email_is_valid(raw: &str) -> bool {
  let trimmed = raw.trim();
  let mut parts = trimmed.splitn(2, '@');
  let (Some(local), Some(domain)) = (parts.next(), parts.next()) else {
    return false;
  };
  if local.is_empty() || domain.is_empty() || domain.contains('@') {
    return false;
  }
  let Some((host, tld)) = domain.rsplit_once('.') else {
    return false;
  };
  !host.is_empty() && !tld.is_empty() && !trimmed.contains(char::is_whitespace)
}
