// talat_core/src/stores/local.rs

use crate::models::{CartLine, OwnerKey};

/// The device-local durable store the cart survives page reloads in.
/// Synchronous on purpose: the backing store is local (browser storage or
/// an on-disk file), read and written only by the owning device's cart
/// aggregator. Last write wins; there is no cross-device merge.
pub trait CartStore: Send + Sync + 'static {
  fn load(&self, owner: &OwnerKey) -> anyhow::Result<Option<Vec<CartLine>>>;

  /// Replaces the stored cart wholesale.
  fn save(&self, owner: &OwnerKey, lines: &[CartLine]) -> anyhow::Result<()>;

  /// Removes the stored cart entry entirely (logout / clear).
  fn purge(&self, owner: &OwnerKey) -> anyhow::Result<()>;
}
