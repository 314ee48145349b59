use std::fmt;

use thiserror::Error;

/// Rejected input shape, raised by the validating constructors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("customer id is required")]
    MissingCustomerId,
    #[error("order id is required")]
    MissingOrderId,
    #[error("catalog item id is required")]
    MissingCatalogItemId,
    #[error("count must be greater than 0, got {0}")]
    NonPositiveCount(i32),
    #[error("order must contain at least one line")]
    NoLines,
    #[error("catalog item name is required")]
    MissingItemName,
    #[error("price must be greater than 0, got {0}")]
    NonPositivePrice(f64),
}

/// Which remote entity a reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Customer,
    CatalogItem,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceKind::Customer => f.write_str("customer"),
            ReferenceKind::CatalogItem => f.write_str("catalog item"),
        }
    }
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Order not found")]
    NotFound,
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),
    /// A create request names a customer or catalog item that does not exist.
    #[error("{kind} {id} does not exist")]
    InvalidReference { kind: ReferenceKind, id: String },
    /// A stored order points at a remote entity the lookup did not return.
    #[error("{kind} {id} could not be resolved")]
    ReferenceMissing { kind: ReferenceKind, id: String },
    #[error("{service} service unavailable: {reason}")]
    RemoteUnavailable {
        service: &'static str,
        reason: String,
    },
    #[error("stored order {order_id} is corrupt: {source}")]
    CorruptRecord {
        order_id: String,
        #[source]
        source: ValidationError,
    },
    /// The caller went away before the store work finished; nothing was
    /// committed.
    #[error("request cancelled")]
    Cancelled,
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// True for errors caused by the caller's input rather than by this
    /// service or its dependencies.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DomainError::Validation(_) | DomainError::InvalidReference { .. }
        )
    }
}
