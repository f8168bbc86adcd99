// talat_core/src/orders.rs

//! The Order Materializer: turns a checkout payload plus the declared
//! payment into a persisted order record, uploads the transfer receipt
//! best-effort, and reconciles the stock ledger with independent per-item
//! decrements.

use crate::checkout::CheckoutPayload;
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::ledger::StockLedger;
use crate::models::order::{Order, OrderId, OrderStatus};
use crate::models::OwnerKey;
use crate::payment::{self, PaymentDetails};
use crate::stores::{DocumentStore, ListFilter, ObjectStorage, ReceiptUpload};
use chrono::Utc;
use parking_lot::Mutex;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};

#[derive(Debug, Default)]
struct IdClock {
  last_millis: i64,
  sequence: u32,
}

/// Generates time-based order ids that are monotonically unique within
/// the process: wall-clock milliseconds plus a sequence that bumps when
/// the clock has not moved (or has moved backwards).
#[derive(Debug, Default)]
pub struct OrderIdGenerator {
  state: Mutex<IdClock>,
}

impl OrderIdGenerator {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn next_id(&self) -> OrderId {
    let now = Utc::now().timestamp_millis();
    let mut clock = self.state.lock();
    if now > clock.last_millis {
      clock.last_millis = now;
      clock.sequence = 0;
    } else {
      clock.sequence += 1;
    }
    OrderId(format!("ORD-{}-{:04}", clock.last_millis, clock.sequence))
  }
}

/// Outcome of a single post-commit stock decrement.
#[derive(Debug, Clone)]
pub enum StockAdjustment {
  Applied { product_id: u64, quantity: u32 },
  Failed { product_id: u64, quantity: u32, reason: String },
}

impl StockAdjustment {
  pub fn is_failed(&self) -> bool {
    matches!(self, StockAdjustment::Failed { .. })
  }

  pub fn product_id(&self) -> u64 {
    match self {
      StockAdjustment::Applied { product_id, .. } | StockAdjustment::Failed { product_id, .. } => *product_id,
    }
  }
}

/// Post-commit, non-fatal: the order stands, but part of the stock
/// reconciliation did not. Carries the exact failed subset so an operator
/// (or a retry) can target just those items.
#[derive(Debug, Clone, Error)]
#[error("Order stands but {} of {} stock decrement(s) failed", failed.len(), attempted)]
pub struct StockSyncWarning {
  pub attempted: usize,
  pub failed: Vec<StockAdjustment>,
}

/// What `commit` hands back: the order exists, the rest is bookkeeping.
#[derive(Debug)]
pub struct CommitOutcome {
  pub order_id: OrderId,
  /// Public URL of the stored receipt; `None` when the upload failed or
  /// was skipped.
  pub receipt_url: Option<String>,
  /// One entry per line item, in payload order.
  pub adjustments: Vec<StockAdjustment>,
}

impl CommitOutcome {
  /// The non-fatal warning to surface when any decrement failed.
  pub fn stock_warning(&self) -> Option<StockSyncWarning> {
    let failed: Vec<StockAdjustment> = self.adjustments.iter().filter(|a| a.is_failed()).cloned().collect();
    if failed.is_empty() {
      None
    } else {
      Some(StockSyncWarning {
        attempted: self.adjustments.len(),
        failed,
      })
    }
  }
}

pub struct OrderMaterializer<D: DocumentStore, O: ObjectStorage> {
  documents: Arc<D>,
  objects: Arc<O>,
  ledger: StockLedger<D>,
  config: Arc<StoreConfig>,
  ids: OrderIdGenerator,
}

impl<D: DocumentStore, O: ObjectStorage> OrderMaterializer<D, O> {
  pub fn new(documents: Arc<D>, objects: Arc<O>, config: Arc<StoreConfig>) -> Self {
    OrderMaterializer {
      ledger: StockLedger::new(Arc::clone(&documents), Arc::clone(&config)),
      documents,
      objects,
      config,
      ids: OrderIdGenerator::new(),
    }
  }

  /// Commits the checkout as a persisted order.
  ///
  /// Order of operations: preconditions, receipt upload (best-effort),
  /// payment derivation, order document write (fatal on failure), then
  /// one independent stock decrement per line item. Decrement failures do
  /// not roll anything back; they come back as `Failed` adjustments and a
  /// `StockSyncWarning` from [`CommitOutcome::stock_warning`].
  #[instrument(skip_all, fields(owner = %owner), err(Display))]
  pub async fn commit(
    &self,
    owner: &OwnerKey,
    payload: &CheckoutPayload,
    details: PaymentDetails,
    receipt: Option<ReceiptUpload>,
  ) -> StoreResult<CommitOutcome> {
    // Preconditions: everything here fails before any write.
    if owner.as_str().trim().is_empty() {
      return Err(StoreError::invalid_order("missing owning user"));
    }
    if payload.lines().is_empty() {
      return Err(StoreError::invalid_order("order has no line items"));
    }
    if payload.customer().name.trim().is_empty() {
      return Err(StoreError::invalid_order("customer info is missing"));
    }
    if payment::requires_receipt(payload) && receipt.is_none() {
      return Err(StoreError::invalid_order("a transfer receipt is required"));
    }

    let order_id = self.ids.next_id();
    let receipt_url = match receipt {
      Some(upload) => self.upload_receipt(&order_id, upload).await,
      None => None,
    };

    let total = payload.total_amount();
    let deposit = details.deposit.filter(|d| *d > 0);
    let now = Utc::now();
    let order = Order {
      id: order_id.clone(),
      user_id: owner.clone(),
      customer: payload.customer().clone(),
      items: payload.lines().to_vec(),
      total_amount: total,
      total_items: payload.total_items(),
      deposit_amount: deposit,
      remaining_amount: payment::compute_remaining(total, deposit),
      status: OrderStatus::Pending,
      payment_status: payment::derive_payment_status(total, deposit),
      payment_receipt: receipt_url.clone(),
      comment: details.comment,
      created_at: now,
      updated_at: now,
    };

    let collection = &self.config.orders_collection;
    let doc = serde_json::to_value(&order)
      .map_err(|e| StoreError::Internal(format!("Order {} failed to serialize: {}", order_id, e)))?;
    self
      .documents
      .set_document(collection, order_id.as_str(), doc)
      .await
      .map_err(|source| StoreError::persistence(collection, order_id.as_str(), source))?;
    info!(%order_id, total, payment_status = %order.payment_status, "Order persisted");

    // N independent decrements, one per line; a failure affects neither
    // the order nor the other lines.
    let mut adjustments = Vec::with_capacity(payload.lines().len());
    for line in payload.lines() {
      match self.ledger.decrement(line.product_id, line.quantity).await {
        Ok(()) => adjustments.push(StockAdjustment::Applied {
          product_id: line.product_id,
          quantity: line.quantity,
        }),
        Err(e) => {
          warn!(%order_id, product_id = line.product_id, error = %e, "Stock decrement failed after commit");
          adjustments.push(StockAdjustment::Failed {
            product_id: line.product_id,
            quantity: line.quantity,
            reason: e.to_string(),
          });
        }
      }
    }

    let outcome = CommitOutcome {
      order_id,
      receipt_url,
      adjustments,
    };
    if let Some(warning) = outcome.stock_warning() {
      warn!(order_id = %outcome.order_id, "{}", warning);
    }
    Ok(outcome)
  }

  /// Best-effort receipt upload: any failure (oversize file, missing
  /// credentials, remote error) is logged and the order proceeds without
  /// a stored receipt URL.
  async fn upload_receipt(&self, order_id: &OrderId, upload: ReceiptUpload) -> Option<String> {
    if upload.bytes.len() > self.config.max_receipt_bytes {
      warn!(
        %order_id,
        size = upload.bytes.len(),
        limit = self.config.max_receipt_bytes,
        "Receipt exceeds the size limit; continuing without a stored receipt"
      );
      return None;
    }
    let key = format!("{}/{}", self.config.receipts_prefix, order_id);
    match self.objects.upload(&upload.bytes, &upload.content_type, &key).await {
      Ok(url) => Some(url),
      Err(source) => {
        let e = StoreError::Upload { key, source };
        warn!(%order_id, error = %e, "Receipt upload failed; continuing without a stored receipt");
        None
      }
    }
  }

  /// Single-order read path for the order-history detail view.
  pub async fn order(&self, id: &OrderId) -> StoreResult<Option<Order>> {
    let collection = &self.config.orders_collection;
    let doc = self
      .documents
      .get_document(collection, id.as_str())
      .await
      .map_err(|source| StoreError::persistence(collection, id.as_str(), source))?;
    match doc {
      Some(value) => {
        let order = serde_json::from_value(value)
          .map_err(|e| StoreError::Internal(format!("Order document {} failed to decode: {}", id, e)))?;
        Ok(Some(order))
      }
      None => Ok(None),
    }
  }

  /// All orders owned by `owner`, newest first, for the order-history
  /// list. Malformed documents are skipped with a warning rather than
  /// sinking the whole view.
  pub async fn orders_for(&self, owner: &OwnerKey) -> StoreResult<Vec<Order>> {
    let collection = &self.config.orders_collection;
    let filter = ListFilter::field_equals("user_id", owner.as_str());
    let docs = self
      .documents
      .list_documents(collection, &filter)
      .await
      .map_err(|source| StoreError::persistence(collection, owner.as_str(), source))?;

    let mut orders: Vec<Order> = Vec::with_capacity(docs.len());
    for doc in docs {
      match serde_json::from_value::<Order>(doc) {
        Ok(order) => orders.push(order),
        Err(e) => warn!(owner = %owner, error = %e, "Skipping malformed order document"),
      }
    }
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
    Ok(orders)
  }
}
