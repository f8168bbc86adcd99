// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use std::sync::Arc;
use talat::{
  CartAggregator, CartLine, CheckoutPayload, CustomerInfo, MemoryCartStore, MemoryDocumentStore, MemoryObjectStorage,
  OrderMaterializer, OwnerKey, Product, ReceiptUpload, ShippingCarrier, StoreConfig,
};
use tracing::Level;

// --- Tracing Setup (once per test binary) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Fixture Builders ---

pub fn test_config() -> Arc<StoreConfig> {
  Arc::new(StoreConfig::default())
}

/// A catalog laptop with a tracked quantity.
pub fn laptop(id: u64, name: &str, price: i64, quantity: u32) -> Product {
  Product {
    id,
    name: name.to_string(),
    price,
    original_price: None,
    quantity: Some(quantity),
    in_stock: quantity > 0,
    image_url: format!("/images/{}.png", id),
    description: format!("{} — test catalog entry", name),
  }
}

/// A catalog entry that does not track quantity; only the flag counts.
pub fn untracked_laptop(id: u64, name: &str, price: i64, in_stock: bool) -> Product {
  Product {
    quantity: None,
    in_stock,
    ..laptop(id, name, price, 0)
  }
}

pub fn seeded_documents(products: &[Product]) -> Arc<MemoryDocumentStore> {
  let documents = Arc::new(MemoryDocumentStore::new());
  documents.seed_products(&test_config().products_collection, products);
  documents
}

pub fn cart_for(owner: &str) -> (CartAggregator<MemoryCartStore>, Arc<MemoryCartStore>) {
  let store = Arc::new(MemoryCartStore::new());
  let cart = CartAggregator::restore(OwnerKey::from(owner), Arc::clone(&store));
  (cart, store)
}

pub fn valid_customer() -> CustomerInfo {
  CustomerInfo {
    name: "Somphone".to_string(),
    surname: "Vongsa".to_string(),
    contact_number: "+856 20 555 8123".to_string(),
    email: "somphone@example.la".to_string(),
    village: "Ban Sisavath".to_string(),
    district: "Chanthabouly".to_string(),
    province: "Vientiane Capital".to_string(),
    carrier: Some(ShippingCarrier::Anousith),
  }
}

/// Assembles a payload from the given lines with a valid customer form.
pub fn payload_for(lines: &[CartLine]) -> CheckoutPayload {
  talat::assemble(valid_customer(), lines).expect("fixture payload must assemble")
}

pub fn materializer(
  documents: &Arc<MemoryDocumentStore>,
  objects: &Arc<MemoryObjectStorage>,
) -> OrderMaterializer<MemoryDocumentStore, MemoryObjectStorage> {
  OrderMaterializer::new(Arc::clone(documents), Arc::clone(objects), test_config())
}

pub fn receipt() -> ReceiptUpload {
  ReceiptUpload::new(vec![0xFF, 0xD8, 0xFF, 0xE0], "image/jpeg")
}

pub fn product_quantity(documents: &MemoryDocumentStore, product_id: u64) -> Option<u64> {
  documents
    .document(&test_config().products_collection, &product_id.to_string())
    .and_then(|doc| doc.get("quantity").cloned())
    .and_then(|q| q.as_u64())
}
