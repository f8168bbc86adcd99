// src/lib.rs

//! Talat: the cart-and-order reconciliation core of a Lao-language
//! electronics storefront.
//!
//! The crate carries the rule-bearing middle of the shop, in dependency
//! order:
//!  - A stock ledger over the hosted document store, with normalization
//!    of patchy catalog records at the read boundary.
//!  - A session-owned, durably mirrored cart whose quantities are bounded
//!    by stock at mutation time (clamping, never hard failure).
//!  - A checkout assembler producing immutable, deep-copied payloads.
//!  - Pure deposit/remaining-amount payment arithmetic.
//!  - An order materializer with best-effort receipt upload and
//!    independent per-item stock decrements.
//!
//! Everything around it (pages, forms, auth UI, vendor SDKs) stays
//! outside, behind the trait seams in [`stores`]. Expected business
//! conditions (out-of-stock, clamping) are signal values, not errors.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod orders;
pub mod payment;
pub mod stores;

// --- Re-exports for the Public API ---

pub use crate::cart::{CartAggregator, CartSignal};
pub use crate::checkout::{assemble, CheckoutPayload};
pub use crate::config::StoreConfig;
pub use crate::error::{FieldError, StoreError, StoreResult};
pub use crate::ledger::{StockLedger, StockProbe};
pub use crate::models::order::OrderId;
pub use crate::models::{CartLine, CustomerInfo, Order, OrderStatus, OwnerKey, Product, ShippingCarrier};
pub use crate::orders::{CommitOutcome, OrderIdGenerator, OrderMaterializer, StockAdjustment, StockSyncWarning};
pub use crate::payment::{compute_remaining, derive_payment_status, requires_receipt, PaymentDetails, PaymentStatus};
pub use crate::stores::memory::{MemoryCartStore, MemoryDocumentStore, MemoryObjectStorage};
pub use crate::stores::{CartStore, DocumentStore, ListFilter, ObjectStorage, ReceiptUpload};
