// talat_core/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// A single field-level validation message, as shown next to the offending
/// form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
  pub field: &'static str,
  pub message: String,
}

impl std::fmt::Display for FieldError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}: {}", self.field, self.message)
  }
}

#[derive(Debug, Error)]
pub enum StoreError {
  /// Bad input shape. Recoverable: the caller re-prompts the user with the
  /// field-level messages. Business-rule conditions (out-of-stock,
  /// clamping) are NOT errors; they are `CartSignal` values.
  #[error("Validation failed with {} field error(s)", errors.len())]
  Validation { errors: Vec<FieldError> },

  /// Commit precondition violated (missing owner, items, or customer
  /// info). Raised before any write is attempted.
  #[error("Invalid order: {reason}")]
  InvalidOrder { reason: String },

  /// A document store operation failed. Fatal for the triggering
  /// operation; the user retries manually.
  #[error("Document store operation failed for '{collection}/{id}'. Source: {source}")]
  Persistence {
    collection: String,
    id: String,
    #[source]
    source: AnyhowError,
  },

  /// Object storage rejected an upload. Recoverable: the order proceeds
  /// without a stored receipt URL.
  #[error("Object storage upload failed for key '{key}'. Source: {source}")]
  Upload {
    key: String,
    #[source]
    source: AnyhowError,
  },

  /// An order status transition the state machine does not allow.
  #[error("Order status cannot move from '{from}' to '{to}'")]
  InvalidTransition { from: String, to: String },

  #[error("Configuration error: {0}")]
  Config(String),

  #[error("Internal storefront error: {0}")]
  Internal(String),
}

impl StoreError {
  /// Convenience for the validation collectors.
  pub fn validation(errors: Vec<FieldError>) -> Self {
    StoreError::Validation { errors }
  }

  pub fn invalid_order(reason: impl Into<String>) -> Self {
    StoreError::InvalidOrder { reason: reason.into() }
  }

  pub(crate) fn persistence(collection: &str, id: &str, source: AnyhowError) -> Self {
    StoreError::Persistence {
      collection: collection.to_string(),
      id: id.to_string(),
      source,
    }
  }
}

pub type StoreResult<T, E = StoreError> = std::result::Result<T, E>;
