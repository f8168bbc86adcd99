// talat_core/src/cart.rs

//! The Cart Aggregator: the browsing session's product -> quantity map,
//! bounded by stock at mutation time and mirrored into a durable local
//! store so it survives a page reload.
//!
//! The aggregator is an explicitly owned value with a defined lifecycle:
//! constructed at session start with [`CartAggregator::restore`], torn
//! down at logout via [`CartAggregator::clear`]. There is no global cart.

use crate::models::{CartLine, OwnerKey, Product};
use crate::stores::CartStore;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of an `add` mutation. These are business signals, shown to the
/// user as toasts; none of them is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartSignal {
  /// The requested quantity was merged into the cart as-is.
  Added,
  /// The product is effectively out of stock; the cart was not touched.
  OutOfStock,
  /// The stored quantity was clamped to the product's tracked
  /// availability instead of the requested total.
  QuantityClamped { available: u32 },
}

pub struct CartAggregator<S: CartStore> {
  owner: OwnerKey,
  lines: RwLock<BTreeMap<u64, CartLine>>,
  store: Arc<S>,
}

impl<S: CartStore> CartAggregator<S> {
  /// Builds the session's cart, restoring whatever the durable store holds
  /// for this owner. A corrupt or unreadable stored cart is dropped with a
  /// warning; the session starts empty rather than failing.
  pub fn restore(owner: OwnerKey, store: Arc<S>) -> Self {
    let lines = match store.load(&owner) {
      Ok(Some(saved)) => saved
        .into_iter()
        .filter(|line| line.quantity > 0)
        .map(|line| (line.product_id, line))
        .collect(),
      Ok(None) => BTreeMap::new(),
      Err(e) => {
        warn!(owner = %owner, error = %e, "Stored cart could not be loaded; starting empty");
        BTreeMap::new()
      }
    };
    CartAggregator {
      owner,
      lines: RwLock::new(lines),
      store,
    }
  }

  pub fn owner(&self) -> &OwnerKey {
    &self.owner
  }

  /// Merges `quantity` units of `product` into the cart.
  ///
  /// An effectively out-of-stock product is rejected with
  /// [`CartSignal::OutOfStock`] and no mutation. When the product tracks a
  /// quantity and the merged total would exceed it, the stored quantity is
  /// clamped to the tracked availability and
  /// [`CartSignal::QuantityClamped`] reports the ceiling. `quantity == 0`
  /// merges nothing and reports `Added`.
  pub fn add(&self, product: &Product, quantity: u32) -> CartSignal {
    if !product.effective_in_stock() {
      debug!(product_id = product.id, "Rejected add of out-of-stock product");
      return CartSignal::OutOfStock;
    }
    if quantity == 0 {
      return CartSignal::Added;
    }

    let mut next = self.lines.read().clone();
    let already_in_cart = next.get(&product.id).map_or(0, |line| line.quantity);
    let requested_total = already_in_cart.saturating_add(quantity);

    let (stored, signal) = match product.quantity {
      Some(available) if requested_total > available => {
        debug!(
          product_id = product.id,
          requested = requested_total,
          available,
          "Clamping cart quantity to tracked availability"
        );
        (available, CartSignal::QuantityClamped { available })
      }
      _ => (requested_total, CartSignal::Added),
    };

    next.insert(product.id, CartLine::snapshot(product, stored));
    self.replace(next);
    signal
  }

  /// Sets the stored quantity for a product directly. `new_quantity == 0`
  /// removes the line, matching `remove`.
  ///
  /// This path does not re-probe the Stock Ledger; the UI's increment
  /// affordance probes before calling it, the free-form quantity field
  /// does not. Commit-time decrements remain the reconciliation point.
  pub fn update_quantity(&self, product_id: u64, new_quantity: u32) {
    let mut next = self.lines.read().clone();
    if new_quantity == 0 {
      if next.remove(&product_id).is_none() {
        return;
      }
    } else {
      match next.get_mut(&product_id) {
        Some(line) => line.quantity = new_quantity,
        None => return,
      }
    }
    self.replace(next);
  }

  /// Deletes the line unconditionally. A second call for the same product
  /// is a no-op.
  pub fn remove(&self, product_id: u64) {
    let mut next = self.lines.read().clone();
    if next.remove(&product_id).is_none() {
      return;
    }
    self.replace(next);
  }

  /// Empties the cart and purges its durable backing entry (logout path).
  pub fn clear(&self) {
    *self.lines.write() = BTreeMap::new();
    if let Err(e) = self.store.purge(&self.owner) {
      warn!(owner = %self.owner, error = %e, "Durable cart entry could not be purged");
    }
  }

  pub fn quantity_of(&self, product_id: u64) -> Option<u32> {
    self.lines.read().get(&product_id).map(|line| line.quantity)
  }

  pub fn is_empty(&self) -> bool {
    self.lines.read().is_empty()
  }

  /// Sum of all line quantities.
  pub fn total_items(&self) -> u32 {
    self.lines.read().values().map(|line| line.quantity).sum()
  }

  /// Sum of `price * quantity` over all lines, in whole kip.
  pub fn total_price(&self) -> i64 {
    self.lines.read().values().map(CartLine::line_total).sum()
  }

  /// Ordered deep copy of the lines, for the checkout assembler.
  pub fn snapshot(&self) -> Vec<CartLine> {
    self.lines.read().values().cloned().collect()
  }

  /// Replace-the-map commit: swap the next map in, then mirror the whole
  /// cart to the durable store. A failed mirror write is logged and
  /// swallowed; the in-memory cart stays authoritative for this session.
  fn replace(&self, next: BTreeMap<u64, CartLine>) {
    let snapshot: Vec<CartLine> = next.values().cloned().collect();
    *self.lines.write() = next;
    if let Err(e) = self.store.save(&self.owner, &snapshot) {
      warn!(owner = %self.owner, error = %e, "Durable cart write failed; cart continues in memory");
    }
  }
}
