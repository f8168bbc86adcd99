// talat_core/src/stores/object.rs

use async_trait::async_trait;

/// A receipt file as handed over by the upload form.
#[derive(Debug, Clone)]
pub struct ReceiptUpload {
  pub bytes: Vec<u8>,
  pub content_type: String,
}

impl ReceiptUpload {
  pub fn new(bytes: Vec<u8>, content_type: impl Into<String>) -> Self {
    ReceiptUpload {
      bytes,
      content_type: content_type.into(),
    }
  }
}

/// The object storage bucket receipts are uploaded to. Upload failure
/// (absent credentials, remote error) is recoverable for the caller: the
/// order proceeds without a stored receipt URL.
#[async_trait]
pub trait ObjectStorage: Send + Sync + 'static {
  /// Stores the bytes under `key` and returns the public URL.
  async fn upload(&self, bytes: &[u8], content_type: &str, key: &str) -> anyhow::Result<String>;
}
