// talat_core/examples/add_to_cart.rs

//! Browsing-session walkthrough: restore a cart, add products against live
//! stock, and see the clamping and out-of-stock signals the UI turns into
//! toasts.

use std::sync::Arc;
use talat::{CartAggregator, CartSignal, MemoryCartStore, MemoryDocumentStore, OwnerKey, Product, StockLedger, StoreConfig};
use tracing::info;

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Add To Cart Example ---");

  let config = Arc::new(StoreConfig::default());
  let documents = Arc::new(MemoryDocumentStore::new());
  let catalog = [
    Product {
      id: 1,
      name: "ThinkPad T14 Gen 4".to_string(),
      price: 9_500_000,
      original_price: Some(10_900_000),
      quantity: Some(3),
      in_stock: true,
      image_url: "/images/thinkpad-t14.png".to_string(),
      description: "14\" business laptop".to_string(),
    },
    Product {
      id: 2,
      name: "IdeaPad Slim 3".to_string(),
      price: 6_200_000,
      original_price: None,
      quantity: Some(0),
      in_stock: false,
      image_url: "/images/ideapad-3.png".to_string(),
      description: "Everyday 15\" laptop".to_string(),
    },
  ];
  documents.seed_products(&config.products_collection, &catalog);
  let ledger = StockLedger::new(Arc::clone(&documents), Arc::clone(&config));

  // The cart is owned by the session: constructed at sign-in, cleared at
  // logout. Restoring an unknown owner starts empty.
  let owner = OwnerKey::from("demo-user");
  let cart = CartAggregator::restore(owner, Arc::new(MemoryCartStore::new()));

  let thinkpad = ledger.fetch_product(1).await.unwrap().expect("seeded");
  let ideapad = ledger.fetch_product(2).await.unwrap().expect("seeded");

  assert_eq!(cart.add(&thinkpad, 2), CartSignal::Added);
  info!("Added 2x {}", thinkpad.name);

  // Requesting more than the 3 tracked units clamps instead of failing.
  let signal = cart.add(&thinkpad, 5);
  assert_eq!(signal, CartSignal::QuantityClamped { available: 3 });
  info!("Clamp signal: {:?}; cart now holds {:?}", signal, cart.quantity_of(1));

  // Sold-out products are rejected with a toastable signal, no error.
  assert_eq!(cart.add(&ideapad, 1), CartSignal::OutOfStock);

  // The UI's "+" affordance probes the ledger before a direct update; the
  // free-form quantity field calls update_quantity without the probe.
  let current = cart.quantity_of(1).unwrap_or(0);
  let probe = ledger.probe(1).await;
  if probe.permits(current + 1) {
    cart.update_quantity(1, current + 1);
    info!("Increment allowed by probe {:?}", probe);
  } else {
    info!("Increment refused by probe {:?}", probe);
  }

  info!(
    "Cart: {} item(s), {} LAK",
    cart.total_items(),
    cart.total_price()
  );
  assert_eq!(cart.total_items(), 3);
  assert_eq!(cart.total_price(), 3 * 9_500_000);
}
