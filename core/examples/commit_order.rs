// talat_core/examples/commit_order.rs

//! End-to-end order commit: cart -> payload -> materialized order, with
//! the two tolerated failure modes on display (receipt upload failure and
//! a partial stock-decrement failure).

use std::sync::Arc;
use talat::{
  assemble, CartAggregator, CustomerInfo, MemoryCartStore, MemoryDocumentStore, MemoryObjectStorage, OrderMaterializer,
  OwnerKey, PaymentDetails, Product, ReceiptUpload, ShippingCarrier, StoreConfig,
};
use tracing::{info, warn};

fn catalog() -> Vec<Product> {
  vec![
    Product {
      id: 1,
      name: "ThinkPad T14 Gen 4".to_string(),
      price: 9_500_000,
      original_price: None,
      quantity: Some(5),
      in_stock: true,
      image_url: "/images/thinkpad-t14.png".to_string(),
      description: "14\" business laptop".to_string(),
    },
    Product {
      id: 2,
      name: "Legion 5 Pro".to_string(),
      price: 14_000_000,
      original_price: Some(15_500_000),
      quantity: Some(2),
      in_stock: true,
      image_url: "/images/legion-5.png".to_string(),
      description: "16\" gaming laptop".to_string(),
    },
  ]
}

fn customer() -> CustomerInfo {
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

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Commit Order Example ---");

  let config = Arc::new(StoreConfig::default());
  let documents = Arc::new(MemoryDocumentStore::new());
  documents.seed_products(&config.products_collection, &catalog());

  let owner = OwnerKey::from("demo-user");
  let cart = CartAggregator::restore(owner.clone(), Arc::new(MemoryCartStore::new()));
  for product in catalog() {
    cart.add(&product, 1);
  }
  let payload = assemble(customer(), &cart.snapshot()).expect("form is valid");

  // Scenario 1: credentials for the bucket are missing. The upload fails,
  // the order still commits, just without a stored receipt URL.
  let no_credentials = Arc::new(MemoryObjectStorage::without_credentials());
  let materializer = OrderMaterializer::new(Arc::clone(&documents), no_credentials, Arc::clone(&config));
  let receipt = ReceiptUpload::new(vec![0xFF, 0xD8, 0xFF, 0xE0], "image/jpeg");
  let outcome = materializer
    .commit(&owner, &payload, PaymentDetails { deposit: Some(10_000_000), comment: None }, Some(receipt.clone()))
    .await
    .expect("order must commit despite the failed upload");
  info!(
    "Order {} committed, receipt_url = {:?}",
    outcome.order_id, outcome.receipt_url
  );
  assert!(outcome.receipt_url.is_none());

  // Scenario 2: a healthy bucket, but one product's document refuses the
  // decrement. The order stands; the warning names the exact failed item.
  documents.refuse_updates(&config.products_collection, "2");
  let objects = Arc::new(MemoryObjectStorage::new());
  let materializer = OrderMaterializer::new(Arc::clone(&documents), objects, Arc::clone(&config));
  let outcome = materializer
    .commit(&owner, &payload, PaymentDetails::default(), Some(receipt))
    .await
    .expect("order must commit despite the stock sync failure");
  match outcome.stock_warning() {
    Some(warning) => {
      warn!("{}", warning);
      for failed in &warning.failed {
        warn!("retry candidate: product {}", failed.product_id());
      }
    }
    None => panic!("Expected a stock sync warning"),
  }

  // The committed orders are on the owner's history, newest first.
  let history = materializer.orders_for(&owner).await.expect("history read");
  info!("{} order(s) on file for {}", history.len(), owner);
  for order in &history {
    info!(
      "  {} — {} item(s), {} LAK, status '{}', payment '{}'",
      order.id, order.total_items, order.total_amount, order.status, order.payment_status
    );
  }
  assert_eq!(history.len(), 2);
}
