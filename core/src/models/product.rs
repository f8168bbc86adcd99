// talat_core/src/models/product.rs

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A catalog product as the storefront sees it: normalized, every field
/// present. Raw catalog documents are patchy (missing images, missing
/// descriptions, sometimes no quantity field at all); normalization happens
/// once, in [`Product::normalize`], so downstream code never branches on
/// absent fields.
///
/// Prices are whole kip; LAK carries no minor unit in practice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
  pub id: u64,
  pub name: String,
  pub price: i64,
  /// Pre-discount price, shown struck through when present.
  pub original_price: Option<i64>,
  /// Tracked available quantity. `None` means the catalog entry does not
  /// track quantity and `in_stock` is authoritative.
  pub quantity: Option<u32>,
  /// Fallback availability flag, consulted only when `quantity` is absent.
  pub in_stock: bool,
  pub image_url: String,
  pub description: String,
}

/// Wire shape of a catalog document before normalization.
#[derive(Debug, Deserialize)]
struct RawProduct {
  id: u64,
  name: String,
  price: i64,
  #[serde(default)]
  original_price: Option<i64>,
  #[serde(default)]
  quantity: Option<u32>,
  #[serde(default)]
  in_stock: Option<bool>,
  #[serde(default)]
  image_url: Option<String>,
  #[serde(default)]
  description: Option<String>,
}

impl Product {
  /// Normalizes a raw catalog document into a strict `Product`, applying
  /// the image and description fallbacks. This is the only place those
  /// fallbacks exist.
  pub fn normalize(doc: Value, config: &StoreConfig) -> StoreResult<Self> {
    let raw: RawProduct = serde_json::from_value(doc)
      .map_err(|e| StoreError::Internal(format!("Malformed product document: {}", e)))?;

    Ok(Product {
      id: raw.id,
      name: raw.name,
      price: raw.price,
      original_price: raw.original_price.filter(|p| *p > 0),
      quantity: raw.quantity,
      in_stock: raw.in_stock.unwrap_or(false),
      image_url: raw
        .image_url
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| config.placeholder_image_url.clone()),
      description: raw.description.unwrap_or_default(),
    })
  }

  /// Effective availability: the tracked quantity when the catalog tracks
  /// one, the boolean flag otherwise.
  pub fn effective_in_stock(&self) -> bool {
    match self.quantity {
      Some(q) => q > 0,
      None => self.in_stock,
    }
  }
}
