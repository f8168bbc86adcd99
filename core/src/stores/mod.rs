// talat_core/src/stores/mod.rs

//! Seams to the external collaborators: the hosted document database, the
//! object storage bucket, and the device-local durable cart store. Vendor
//! SDKs live behind these traits; the in-memory implementations in
//! [`memory`] are the default backends for tests and examples.

pub mod document;
pub mod local;
pub mod memory;
pub mod object;

pub use document::{DocumentStore, ListFilter};
pub use local::CartStore;
pub use object::{ObjectStorage, ReceiptUpload};
