// talat_core/src/models/order.rs

use crate::error::{StoreError, StoreResult};
use crate::models::cart_line::CartLine;
use crate::models::customer::CustomerInfo;
use crate::models::OwnerKey;
use crate::payment::PaymentStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Generated order identity: time-based, monotonically unique within a
/// process. See `orders::OrderIdGenerator`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub(crate) String);

impl OrderId {
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl std::fmt::Display for OrderId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

/// Fulfilment lifecycle of an order. Every transition out of `Pending` is
/// driven by the external back-office process; the transition rules live
/// here all the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
  Pending,
  Processing,
  Completed,
  Cancelled,
}

impl OrderStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      OrderStatus::Pending => "pending",
      OrderStatus::Processing => "processing",
      OrderStatus::Completed => "completed",
      OrderStatus::Cancelled => "cancelled",
    }
  }

  pub fn is_terminal(&self) -> bool {
    matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
  }

  /// `Pending -> Processing -> Completed`, with `Cancelled` reachable from
  /// any non-terminal state.
  pub fn can_transition_to(&self, next: OrderStatus) -> bool {
    match (self, next) {
      (OrderStatus::Pending, OrderStatus::Processing) => true,
      (OrderStatus::Processing, OrderStatus::Completed) => true,
      (OrderStatus::Pending | OrderStatus::Processing, OrderStatus::Cancelled) => true,
      _ => false,
    }
  }
}

impl std::fmt::Display for OrderStatus {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A committed order. Items, customer info and totals are copies taken at
/// commit time and never mutated afterwards; only `status` and
/// `updated_at` move, via [`Order::transition`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
  pub id: OrderId,
  pub user_id: OwnerKey,
  pub customer: CustomerInfo,
  pub items: Vec<CartLine>,
  pub total_amount: i64,
  pub total_items: u32,
  pub deposit_amount: Option<i64>,
  pub remaining_amount: i64,
  pub status: OrderStatus,
  pub payment_status: PaymentStatus,
  /// Public URL of the uploaded transfer receipt, when the upload
  /// succeeded.
  pub payment_receipt: Option<String>,
  pub comment: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Order {
  /// Applies a status transition, refusing moves the state machine does
  /// not allow.
  pub fn transition(&mut self, next: OrderStatus) -> StoreResult<()> {
    if !self.status.can_transition_to(next) {
      return Err(StoreError::InvalidTransition {
        from: self.status.as_str().to_string(),
        to: next.as_str().to_string(),
      });
    }
    self.status = next;
    self.updated_at = Utc::now();
    Ok(())
  }
}
