// talat_core/src/config.rs

use crate::error::{StoreError, StoreResult};
use dotenvy::dotenv;
use std::env;

/// Storefront configuration, loaded once at session start and shared as
/// `Arc<StoreConfig>` by every component that touches a store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
  pub products_collection: String,
  pub orders_collection: String,
  /// Object-storage key prefix for uploaded transfer receipts.
  pub receipts_prefix: String,
  pub currency_code: String,
  /// Substituted at the ledger read boundary when a product document has
  /// no image of its own.
  pub placeholder_image_url: String,
  /// Receipts larger than this are not uploaded (treated like any other
  /// upload failure: the order proceeds without a receipt URL).
  pub max_receipt_bytes: usize,
}

impl StoreConfig {
  pub fn from_env() -> StoreResult<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| env::var(var_name);

    let products_collection = get_env("TALAT_PRODUCTS_COLLECTION").unwrap_or_else(|_| "products".to_string());
    let orders_collection = get_env("TALAT_ORDERS_COLLECTION").unwrap_or_else(|_| "orders".to_string());
    let receipts_prefix = get_env("TALAT_RECEIPTS_PREFIX").unwrap_or_else(|_| "receipts".to_string());
    let currency_code = get_env("TALAT_CURRENCY").unwrap_or_else(|_| "LAK".to_string());
    let placeholder_image_url =
      get_env("TALAT_PLACEHOLDER_IMAGE").unwrap_or_else(|_| "/images/placeholder-laptop.png".to_string());
    let max_receipt_bytes = get_env("TALAT_MAX_RECEIPT_BYTES")
      .unwrap_or_else(|_| (10 * 1024 * 1024).to_string())
      .parse::<usize>()
      .map_err(|e| StoreError::Config(format!("Invalid TALAT_MAX_RECEIPT_BYTES: {}", e)))?;

    tracing::info!("Storefront configuration loaded successfully.");

    Ok(Self {
      products_collection,
      orders_collection,
      receipts_prefix,
      currency_code,
      placeholder_image_url,
      max_receipt_bytes,
    })
  }
}

impl Default for StoreConfig {
  fn default() -> Self {
    Self {
      products_collection: "products".to_string(),
      orders_collection: "orders".to_string(),
      receipts_prefix: "receipts".to_string(),
      currency_code: "LAK".to_string(),
      placeholder_image_url: "/images/placeholder-laptop.png".to_string(),
      max_receipt_bytes: 10 * 1024 * 1024,
    }
  }
}
