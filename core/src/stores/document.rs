// talat_core/src/stores/document.rs

use async_trait::async_trait;
use serde_json::Value;

/// Filter for [`DocumentStore::list_documents`]. The storefront only ever
/// needs whole-collection reads and single-field equality (orders by
/// owner), so that is all the seam carries.
#[derive(Debug, Clone)]
pub enum ListFilter {
  All,
  FieldEquals { field: String, value: Value },
}

impl ListFilter {
  pub fn field_equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
    ListFilter::FieldEquals {
      field: field.into(),
      value: value.into(),
    }
  }

  /// Whether the given document passes this filter.
  pub fn matches(&self, doc: &Value) -> bool {
    match self {
      ListFilter::All => true,
      ListFilter::FieldEquals { field, value } => doc.get(field) == Some(value),
    }
  }
}

/// The hosted document database, reduced to the four operations the core
/// uses. Backends return `anyhow::Result`; the core wraps failures into
/// `StoreError::Persistence` with collection/id context at the call site.
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
  async fn get_document(&self, collection: &str, id: &str) -> anyhow::Result<Option<Value>>;

  async fn list_documents(&self, collection: &str, filter: &ListFilter) -> anyhow::Result<Vec<Value>>;

  /// Creates or fully replaces the document.
  async fn set_document(&self, collection: &str, id: &str, value: Value) -> anyhow::Result<()>;

  /// Shallow-merges `partial`'s top-level fields into an existing
  /// document. Fails if the document does not exist.
  async fn update_document(&self, collection: &str, id: &str, partial: Value) -> anyhow::Result<()>;
}
