// talat_core/examples/checkout_flow.rs

//! Checkout walkthrough: validate the customer form, snapshot the cart
//! into an immutable payload, and run the deposit arithmetic the payment
//! page shows.

use std::sync::Arc;
use talat::{
  assemble, compute_remaining, derive_payment_status, requires_receipt, CartAggregator, CustomerInfo, MemoryCartStore,
  OwnerKey, PaymentStatus, Product, ShippingCarrier, StoreError,
};
use tracing::{info, warn};

fn catalog_entry() -> Product {
  Product {
    id: 1,
    name: "ThinkPad T14 Gen 4".to_string(),
    price: 250_000,
    original_price: None,
    quantity: Some(5),
    in_stock: true,
    image_url: "/images/thinkpad-t14.png".to_string(),
    description: "14\" business laptop".to_string(),
  }
}

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Checkout Flow Example ---");

  let cart = CartAggregator::restore(OwnerKey::from("demo-user"), Arc::new(MemoryCartStore::new()));
  cart.add(&catalog_entry(), 2);

  // Scenario 1: a half-filled form is bounced with field-level messages.
  let incomplete = CustomerInfo {
    name: "Somphone".to_string(),
    surname: "V".to_string(),
    contact_number: "020 55".to_string(),
    email: "somphone@example".to_string(),
    village: "Ban Sisavath".to_string(),
    district: "".to_string(),
    province: "Vientiane Capital".to_string(),
    carrier: None,
  };
  match assemble(incomplete, &cart.snapshot()) {
    Err(StoreError::Validation { errors }) => {
      for e in &errors {
        warn!("form error — {}", e);
      }
      assert_eq!(errors.len(), 5);
    }
    other => panic!("Expected a validation error, got {:?}", other),
  }

  // Scenario 2: a complete form assembles an immutable payload.
  let complete = CustomerInfo {
    name: "Somphone".to_string(),
    surname: "Vongsa".to_string(),
    contact_number: "+856 20 555 8123".to_string(),
    email: "somphone@example.la".to_string(),
    village: "Ban Sisavath".to_string(),
    district: "Chanthabouly".to_string(),
    province: "Vientiane Capital".to_string(),
    carrier: Some(ShippingCarrier::Mixay),
  };
  let payload = assemble(complete, &cart.snapshot()).expect("complete form must assemble");
  info!(
    "Payload: {} item(s), total {} LAK, assembled at {}",
    payload.total_items(),
    payload.total_amount(),
    payload.created_at()
  );

  // Later cart edits cannot reach into the in-flight payload.
  cart.clear();
  assert_eq!(payload.total_items(), 2);

  // The payment page: deposit bookkeeping is pure arithmetic.
  let total = payload.total_amount();
  for deposit in [None, Some(200_000), Some(total)] {
    let remaining = compute_remaining(total, deposit);
    let status = derive_payment_status(total, deposit);
    info!("deposit {:?} -> remaining {} LAK, status '{}'", deposit, remaining, status);
  }
  assert_eq!(compute_remaining(total, Some(200_000)), 300_000);
  assert_eq!(derive_payment_status(total, Some(200_000)), PaymentStatus::Deposit);
  assert!(requires_receipt(&payload), "confirmation always needs a transfer receipt");
}
