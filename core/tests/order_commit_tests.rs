// tests/order_commit_tests.rs
mod common;

use common::*;
use std::sync::Arc;
use talat::{
  CartLine, MemoryObjectStorage, OrderIdGenerator, OrderStatus, OwnerKey, PaymentDetails, PaymentStatus, StoreError,
};

fn two_line_payload() -> talat::CheckoutPayload {
  payload_for(&[
    CartLine::snapshot(&laptop(1, "ThinkPad T14", 9_500_000, 5), 2),
    CartLine::snapshot(&laptop(2, "IdeaPad Slim", 6_200_000, 4), 1),
  ])
}

#[tokio::test]
async fn commit_persists_a_pending_order_and_decrements_stock() {
  setup_tracing();
  let documents = seeded_documents(&[laptop(1, "ThinkPad T14", 9_500_000, 5), laptop(2, "IdeaPad Slim", 6_200_000, 4)]);
  let objects = Arc::new(MemoryObjectStorage::new());
  let materializer = materializer(&documents, &objects);

  let outcome = materializer
    .commit(
      &OwnerKey::from("user-1"),
      &two_line_payload(),
      PaymentDetails::default(),
      Some(receipt()),
    )
    .await
    .expect("commit must succeed");

  assert!(outcome.stock_warning().is_none());
  assert_eq!(outcome.adjustments.len(), 2);
  assert!(outcome.receipt_url.is_some());
  assert_eq!(objects.object_count(), 1);

  let order = materializer
    .order(&outcome.order_id)
    .await
    .expect("read must succeed")
    .expect("order must exist");
  assert_eq!(order.status, OrderStatus::Pending);
  assert_eq!(order.payment_status, PaymentStatus::Unpaid);
  assert_eq!(order.total_amount, 2 * 9_500_000 + 6_200_000);
  assert_eq!(order.total_items, 3);
  assert_eq!(order.items.len(), 2);
  assert_eq!(order.payment_receipt, outcome.receipt_url);

  assert_eq!(product_quantity(&documents, 1), Some(3));
  assert_eq!(product_quantity(&documents, 2), Some(3));
}

#[tokio::test]
async fn deposit_bookkeeping_lands_on_the_persisted_order() {
  setup_tracing();
  let documents = seeded_documents(&[laptop(1, "ThinkPad T14", 250_000, 5), laptop(2, "IdeaPad Slim", 250_000, 4)]);
  let objects = Arc::new(MemoryObjectStorage::new());
  let materializer = materializer(&documents, &objects);

  // Scenario D: total 500000, deposit 200000.
  let payload = payload_for(&[CartLine::snapshot(&laptop(1, "ThinkPad T14", 250_000, 5), 2)]);
  let details = PaymentDetails {
    deposit: Some(200_000),
    comment: Some("Transfer via BCEL".to_string()),
  };
  let outcome = materializer
    .commit(&OwnerKey::from("user-1"), &payload, details, Some(receipt()))
    .await
    .expect("commit must succeed");

  let order = materializer.order(&outcome.order_id).await.unwrap().unwrap();
  assert_eq!(order.total_amount, 500_000);
  assert_eq!(order.deposit_amount, Some(200_000));
  assert_eq!(order.remaining_amount, 300_000);
  assert_eq!(order.payment_status, PaymentStatus::Deposit);
  assert_eq!(order.comment.as_deref(), Some("Transfer via BCEL"));
}

#[tokio::test]
async fn full_deposit_marks_the_order_paid() {
  setup_tracing();
  let documents = seeded_documents(&[laptop(1, "ThinkPad T14", 250_000, 5)]);
  let objects = Arc::new(MemoryObjectStorage::new());
  let materializer = materializer(&documents, &objects);

  let payload = payload_for(&[CartLine::snapshot(&laptop(1, "ThinkPad T14", 250_000, 5), 2)]);
  let details = PaymentDetails {
    deposit: Some(650_000), // Over the 500000 total.
    comment: None,
  };
  let outcome = materializer
    .commit(&OwnerKey::from("user-1"), &payload, details, Some(receipt()))
    .await
    .expect("commit must succeed");

  let order = materializer.order(&outcome.order_id).await.unwrap().unwrap();
  assert_eq!(order.remaining_amount, 0);
  assert_eq!(order.payment_status, PaymentStatus::Success);
}

#[tokio::test]
async fn failed_receipt_upload_does_not_block_the_order() {
  setup_tracing();
  let documents = seeded_documents(&[laptop(1, "ThinkPad T14", 9_500_000, 5), laptop(2, "IdeaPad Slim", 6_200_000, 4)]);
  let objects = Arc::new(MemoryObjectStorage::without_credentials());
  let materializer = materializer(&documents, &objects);

  // Scenario E: the blob is present but the upload fails.
  let outcome = materializer
    .commit(
      &OwnerKey::from("user-1"),
      &two_line_payload(),
      PaymentDetails::default(),
      Some(receipt()),
    )
    .await
    .expect("commit must still succeed");

  assert_eq!(outcome.receipt_url, None);
  let order = materializer.order(&outcome.order_id).await.unwrap().unwrap();
  assert_eq!(order.payment_receipt, None);
}

#[tokio::test]
async fn partial_stock_decrement_failure_is_a_warning_not_an_error() {
  setup_tracing();
  let documents = seeded_documents(&[laptop(1, "ThinkPad T14", 9_500_000, 5), laptop(2, "IdeaPad Slim", 6_200_000, 4)]);
  let objects = Arc::new(MemoryObjectStorage::new());
  let materializer = materializer(&documents, &objects);
  documents.refuse_updates(&test_config().products_collection, "2");

  // Scenario F: the second of two decrements fails.
  let outcome = materializer
    .commit(
      &OwnerKey::from("user-1"),
      &two_line_payload(),
      PaymentDetails::default(),
      Some(receipt()),
    )
    .await
    .expect("the order itself already succeeded");

  let warning = outcome.stock_warning().expect("a warning must surface");
  assert_eq!(warning.attempted, 2);
  assert_eq!(warning.failed.len(), 1);
  assert_eq!(warning.failed[0].product_id(), 2);

  // First product's stock is unaffected by the second's failure.
  assert_eq!(product_quantity(&documents, 1), Some(3));
  assert_eq!(product_quantity(&documents, 2), Some(4));

  // The order stands.
  assert!(materializer.order(&outcome.order_id).await.unwrap().is_some());
}

#[tokio::test]
async fn order_write_failure_is_fatal_and_leaves_stock_alone() {
  setup_tracing();
  let documents = seeded_documents(&[laptop(1, "ThinkPad T14", 9_500_000, 5), laptop(2, "IdeaPad Slim", 6_200_000, 4)]);
  let objects = Arc::new(MemoryObjectStorage::new());
  let materializer = materializer(&documents, &objects);
  documents.refuse_sets(&test_config().orders_collection);

  let result = materializer
    .commit(
      &OwnerKey::from("user-1"),
      &two_line_payload(),
      PaymentDetails::default(),
      Some(receipt()),
    )
    .await;

  assert!(matches!(result, Err(StoreError::Persistence { .. })));
  assert_eq!(product_quantity(&documents, 1), Some(5));
  assert_eq!(product_quantity(&documents, 2), Some(4));
}

#[tokio::test]
async fn commit_preconditions_fail_before_any_write() {
  setup_tracing();
  let documents = seeded_documents(&[laptop(1, "ThinkPad T14", 9_500_000, 5), laptop(2, "IdeaPad Slim", 6_200_000, 4)]);
  let objects = Arc::new(MemoryObjectStorage::new());
  let materializer = materializer(&documents, &objects);

  let blank_owner = materializer
    .commit(&OwnerKey::from("  "), &two_line_payload(), PaymentDetails::default(), Some(receipt()))
    .await;
  assert!(matches!(blank_owner, Err(StoreError::InvalidOrder { .. })));

  let missing_receipt = materializer
    .commit(&OwnerKey::from("user-1"), &two_line_payload(), PaymentDetails::default(), None)
    .await;
  assert!(matches!(missing_receipt, Err(StoreError::InvalidOrder { .. })));

  assert_eq!(documents.document_count(&test_config().orders_collection), 0);
  assert_eq!(objects.object_count(), 0);
  assert_eq!(product_quantity(&documents, 1), Some(5));
}

#[tokio::test]
async fn oversized_receipt_is_skipped_like_a_failed_upload() {
  setup_tracing();
  let documents = seeded_documents(&[laptop(1, "ThinkPad T14", 9_500_000, 5), laptop(2, "IdeaPad Slim", 6_200_000, 4)]);
  let objects = Arc::new(MemoryObjectStorage::new());
  let materializer = materializer(&documents, &objects);

  let oversized = talat::ReceiptUpload::new(vec![0u8; test_config().max_receipt_bytes + 1], "image/png");
  let outcome = materializer
    .commit(&OwnerKey::from("user-1"), &two_line_payload(), PaymentDetails::default(), Some(oversized))
    .await
    .expect("commit must still succeed");

  assert_eq!(outcome.receipt_url, None);
  assert_eq!(objects.object_count(), 0);
}

#[tokio::test]
async fn order_history_is_owner_scoped_and_newest_first() {
  setup_tracing();
  let documents = seeded_documents(&[laptop(1, "ThinkPad T14", 9_500_000, 50), laptop(2, "IdeaPad Slim", 6_200_000, 50)]);
  let objects = Arc::new(MemoryObjectStorage::new());
  let materializer = materializer(&documents, &objects);
  let payload = payload_for(&[CartLine::snapshot(&laptop(1, "ThinkPad T14", 9_500_000, 50), 1)]);

  let first = materializer
    .commit(&OwnerKey::from("user-1"), &payload, PaymentDetails::default(), Some(receipt()))
    .await
    .unwrap();
  let second = materializer
    .commit(&OwnerKey::from("user-1"), &payload, PaymentDetails::default(), Some(receipt()))
    .await
    .unwrap();
  materializer
    .commit(&OwnerKey::from("user-2"), &payload, PaymentDetails::default(), Some(receipt()))
    .await
    .unwrap();

  let history = materializer.orders_for(&OwnerKey::from("user-1")).await.unwrap();
  assert_eq!(history.len(), 2);
  assert_eq!(history[0].id, second.order_id, "newest order comes first");
  assert_eq!(history[1].id, first.order_id);
  assert!(history.iter().all(|o| o.user_id == OwnerKey::from("user-1")));
}

#[test]
fn order_ids_are_unique_and_monotonic_within_a_process() {
  setup_tracing();
  let ids = OrderIdGenerator::new();
  let mut previous = ids.next_id();
  for _ in 0..1_000 {
    let next = ids.next_id();
    assert!(next > previous, "{} should sort after {}", next, previous);
    previous = next;
  }
}

#[test]
fn order_status_transitions_follow_the_state_machine() {
  setup_tracing();
  use OrderStatus::*;
  let allowed = [(Pending, Processing), (Processing, Completed), (Pending, Cancelled), (Processing, Cancelled)];
  for (from, to) in allowed {
    assert!(from.can_transition_to(to), "{} -> {} must be allowed", from, to);
  }
  let refused = [
    (Pending, Completed),
    (Completed, Cancelled),
    (Cancelled, Pending),
    (Completed, Processing),
    (Processing, Pending),
  ];
  for (from, to) in refused {
    assert!(!from.can_transition_to(to), "{} -> {} must be refused", from, to);
  }
}

#[tokio::test]
async fn order_transition_updates_the_record_or_refuses() {
  setup_tracing();
  let documents = seeded_documents(&[laptop(1, "ThinkPad T14", 9_500_000, 5)]);
  let objects = Arc::new(MemoryObjectStorage::new());
  let materializer = materializer(&documents, &objects);
  let payload = payload_for(&[CartLine::snapshot(&laptop(1, "ThinkPad T14", 9_500_000, 5), 1)]);

  let outcome = materializer
    .commit(&OwnerKey::from("user-1"), &payload, PaymentDetails::default(), Some(receipt()))
    .await
    .unwrap();
  let mut order = materializer.order(&outcome.order_id).await.unwrap().unwrap();

  order.transition(OrderStatus::Processing).expect("pending -> processing");
  order.transition(OrderStatus::Completed).expect("processing -> completed");
  let refused = order.transition(OrderStatus::Cancelled);
  assert!(matches!(refused, Err(StoreError::InvalidTransition { .. })));
}
