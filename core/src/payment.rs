// talat_core/src/payment.rs

//! Deposit-aware payment arithmetic. Pure functions over the checkout
//! payload; nothing here talks to a store. The storefront only records
//! externally-verified bank transfers, so "payment" is bookkeeping:
//! a declared deposit, a derived remaining amount, a derived status.

use crate::checkout::CheckoutPayload;
use serde::{Deserialize, Serialize};

/// Derived payment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
  /// No deposit recorded.
  Unpaid,
  /// A deposit covering part of the total.
  Deposit,
  /// The deposit covers the full total.
  Success,
}

impl PaymentStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      PaymentStatus::Unpaid => "unpaid",
      PaymentStatus::Deposit => "deposit",
      PaymentStatus::Success => "success",
    }
  }
}

impl std::fmt::Display for PaymentStatus {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// What the customer declared at the payment step.
#[derive(Debug, Clone, Default)]
pub struct PaymentDetails {
  /// Up-front partial payment against the total, in whole kip. A value of
  /// zero or less counts as no deposit.
  pub deposit: Option<i64>,
  /// Free-text note attached to the order.
  pub comment: Option<String>,
}

/// Remaining amount after the deposit, floored at zero. With no (or a
/// non-positive) deposit the total is returned untouched.
pub fn compute_remaining(total: i64, deposit: Option<i64>) -> i64 {
  match deposit {
    Some(d) if d > 0 => (total - d).max(0),
    _ => total,
  }
}

/// `Success` iff the deposit covers the total, `Deposit` for a partial
/// deposit, `Unpaid` otherwise.
pub fn derive_payment_status(total: i64, deposit: Option<i64>) -> PaymentStatus {
  match deposit {
    Some(d) if d > 0 && d >= total => PaymentStatus::Success,
    Some(d) if d > 0 => PaymentStatus::Deposit,
    _ => PaymentStatus::Unpaid,
  }
}

/// Whether a transfer receipt must accompany the order. Always true: the
/// storefront does not process payment, it records proof of one, so an
/// order without a receipt cannot be confirmed.
pub fn requires_receipt(_payload: &CheckoutPayload) -> bool {
  true
}
