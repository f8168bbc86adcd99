// talat_core/src/models/mod.rs

pub mod cart_line;
pub mod customer;
pub mod order;
pub mod product;

pub use cart_line::CartLine;
pub use customer::{CustomerInfo, ShippingCarrier};
pub use order::{Order, OrderStatus};
pub use product::Product;

use serde::{Deserialize, Serialize};

/// Opaque authenticated-user handle issued by the external identity
/// provider. The core never inspects it; it is only the owner key for
/// carts and orders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerKey(String);

impl OwnerKey {
  pub fn new(raw: impl Into<String>) -> Self {
    OwnerKey(raw.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl std::fmt::Display for OwnerKey {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for OwnerKey {
  fn from(raw: &str) -> Self {
    OwnerKey(raw.to_string())
  }
}

impl From<String> for OwnerKey {
  fn from(raw: String) -> Self {
    OwnerKey(raw)
  }
}
