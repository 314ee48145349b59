use async_trait::async_trait;

use super::errors::DomainError;
use super::order::Order;
use super::references::{CatalogItem, Customer};

/// Persistence for order headers and their lines.
///
/// `create` and `delete` touch both tables as one atomic unit.
#[async_trait]
pub trait OrderRepository: Send + Sync + 'static {
    async fn create(&self, order: Order) -> Result<(), DomainError>;
    /// Fails with [`DomainError::NotFound`] when no header row exists.
    async fn get(&self, id: &str) -> Result<Order, DomainError>;
    async fn list(&self) -> Result<Vec<Order>, DomainError>;
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
}

/// Read access to the customer service. `get` returns `None` for an unknown id.
#[async_trait]
pub trait CustomerLookup: Send + Sync + 'static {
    async fn get(&self, id: &str) -> Result<Option<Customer>, DomainError>;
    async fn list(&self) -> Result<Vec<Customer>, DomainError>;
}

/// Read access to the catalog service.
#[async_trait]
pub trait CatalogLookup: Send + Sync + 'static {
    async fn get(&self, id: &str) -> Result<Option<CatalogItem>, DomainError>;
    async fn list(&self) -> Result<Vec<CatalogItem>, DomainError>;
    /// Resolves a set of ids in one round trip. Unknown ids are simply absent
    /// from the result.
    async fn list_by_ids(&self, ids: &[String]) -> Result<Vec<CatalogItem>, DomainError>;
}
