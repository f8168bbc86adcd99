// talat_core/src/ledger.rs

//! The Stock Ledger: read-mostly source of truth for per-product
//! availability, backed by the document store. Availability is enforced
//! best-effort at cart-mutation time and reconciled by per-item decrements
//! at order commit; it is never guaranteed transactionally.

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::models::Product;
use crate::stores::DocumentStore;
use serde_json::json;
use std::sync::Arc;
use tracing::{instrument, warn};

/// Result of an availability probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockProbe {
  /// The product tracks a quantity; this is the live value.
  Tracked(u32),
  /// The product does not track quantity; the boolean flag is all there is.
  Untracked { in_stock: bool },
  /// The backing store could not answer. Callers permit the mutation
  /// optimistically rather than blocking the user.
  Unknown,
}

impl StockProbe {
  /// Whether a request to hold `quantity` units in total should be
  /// allowed under the optimistic policy.
  pub fn permits(&self, quantity: u32) -> bool {
    match self {
      StockProbe::Tracked(available) => quantity <= *available,
      StockProbe::Untracked { in_stock } => *in_stock,
      StockProbe::Unknown => true,
    }
  }
}

pub struct StockLedger<D: DocumentStore> {
  documents: Arc<D>,
  config: Arc<StoreConfig>,
}

impl<D: DocumentStore> StockLedger<D> {
  pub fn new(documents: Arc<D>, config: Arc<StoreConfig>) -> Self {
    StockLedger { documents, config }
  }

  /// Fetches and normalizes the live product record. `Ok(None)` means the
  /// catalog has no such product.
  #[instrument(skip(self), err(Display))]
  pub async fn fetch_product(&self, product_id: u64) -> StoreResult<Option<Product>> {
    let collection = &self.config.products_collection;
    let id = product_id.to_string();
    let doc = self
      .documents
      .get_document(collection, &id)
      .await
      .map_err(|source| StoreError::persistence(collection, &id, source))?;
    doc.map(|value| Product::normalize(value, &self.config)).transpose()
  }

  /// Live availability for the product. Store failures and unknown
  /// products both degrade to `Unknown` so the caller can stay optimistic.
  pub async fn probe(&self, product_id: u64) -> StockProbe {
    match self.fetch_product(product_id).await {
      Ok(Some(product)) => match product.quantity {
        Some(available) => StockProbe::Tracked(available),
        None => StockProbe::Untracked {
          in_stock: product.in_stock,
        },
      },
      Ok(None) => {
        warn!(product_id, "Stock probe for unknown product; treating availability as unknown");
        StockProbe::Unknown
      }
      Err(e) => {
        warn!(product_id, error = %e, "Stock probe failed; treating availability as unknown");
        StockProbe::Unknown
      }
    }
  }

  /// Decrements the tracked quantity by `amount`, saturating at zero.
  /// Products that do not track quantity are left untouched. One call per
  /// line item at commit time; failures are collected by the caller, not
  /// rolled back.
  #[instrument(skip(self), err(Display))]
  pub async fn decrement(&self, product_id: u64, amount: u32) -> StoreResult<()> {
    let collection = self.config.products_collection.clone();
    let id = product_id.to_string();
    let product = self.fetch_product(product_id).await?.ok_or_else(|| {
      StoreError::persistence(
        &collection,
        &id,
        anyhow::anyhow!("product document missing at decrement time"),
      )
    })?;

    let Some(current) = product.quantity else {
      return Ok(());
    };
    let next = current.saturating_sub(amount);
    if next == 0 && amount > current {
      warn!(product_id, current, amount, "Stock decrement exceeds tracked quantity; flooring at zero");
    }
    self
      .documents
      .update_document(&collection, &id, json!({ "quantity": next }))
      .await
      .map_err(|source| StoreError::persistence(&collection, &id, source))
  }
}
