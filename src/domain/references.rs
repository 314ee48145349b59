//! Entities owned by other services, read-only from the order service.

use super::errors::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub street: String,
    pub city: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    pub price: f64,
}

impl CatalogItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        let name = name.into();
        if id.is_empty() {
            return Err(ValidationError::MissingCatalogItemId);
        }
        if name.is_empty() {
            return Err(ValidationError::MissingItemName);
        }
        if price.is_nan() || price <= 0.0 {
            return Err(ValidationError::NonPositivePrice(price));
        }
        Ok(Self { id, name, price })
    }
}
