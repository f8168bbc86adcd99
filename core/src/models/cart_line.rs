// talat_core/src/models/cart_line.rs

use crate::models::product::Product;
use serde::{Deserialize, Serialize};

/// One line of a cart: a denormalized snapshot of the product taken at
/// add-time, plus the requested quantity. Quantity is always >= 1 for a
/// materialized line; a line that would drop to 0 is removed instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
  pub product_id: u64,
  pub name: String,
  pub price: i64,
  pub image_url: String,
  pub quantity: u32,
}

impl CartLine {
  /// Snapshots the given product into a new line.
  pub fn snapshot(product: &Product, quantity: u32) -> Self {
    CartLine {
      product_id: product.id,
      name: product.name.clone(),
      price: product.price,
      image_url: product.image_url.clone(),
      quantity,
    }
  }

  pub fn line_total(&self) -> i64 {
    self.price * i64::from(self.quantity)
  }
}
