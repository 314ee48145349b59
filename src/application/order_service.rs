use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::domain::errors::{DomainError, ReferenceKind, ValidationError};
use crate::domain::order::{
    CreateOrderParams, CreationResources, Order, OrderDetails, OrderLine, OrderLineDetails,
};
use crate::domain::ports::{CatalogLookup, CustomerLookup, OrderRepository};
use crate::domain::references::{CatalogItem, Customer};

/// Order use cases: validates and persists new orders, and assembles stored
/// orders with their customer and catalog data on the way out.
pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    customers: Arc<dyn CustomerLookup>,
    catalog: Arc<dyn CatalogLookup>,
}

impl OrderService {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        customers: Arc<dyn CustomerLookup>,
        catalog: Arc<dyn CatalogLookup>,
    ) -> Self {
        Self {
            orders,
            customers,
            catalog,
        }
    }

    pub async fn get_order_creation_resources(&self) -> Result<CreationResources, DomainError> {
        let (customers, items) = tokio::try_join!(self.customers.list(), self.catalog.list())?;
        Ok(CreationResources { customers, items })
    }

    /// Validates the request, checks that every referenced entity exists and
    /// stores the order. Returns the new order id.
    pub async fn create_order(&self, params: CreateOrderParams) -> Result<String, DomainError> {
        let lines = params
            .lines
            .into_iter()
            .map(|line| OrderLine::new(line.count, line.catalog_item_id))
            .collect::<Result<Vec<_>, _>>()?;
        let order = Order::new(None, params.customer_id, None, lines)?;

        self.ensure_references_exist(&order).await?;

        let id = order.id().to_string();
        let line_count = order.lines().len();
        self.orders.create(order).await?;
        log::info!("created order {id} with {line_count} line(s)");
        Ok(id)
    }

    pub async fn get_order(&self, id: &str) -> Result<OrderDetails, DomainError> {
        if id.is_empty() {
            return Err(ValidationError::MissingOrderId.into());
        }
        let order = self.orders.get(id).await?;
        self.assemble(order).await
    }

    /// Assembles every stored order. Customers are looked up once per order;
    /// catalog items are batched per order.
    pub async fn list_orders(&self) -> Result<Vec<OrderDetails>, DomainError> {
        let orders = self.orders.list().await?;
        let mut details = Vec::with_capacity(orders.len());
        for order in orders {
            details.push(self.assemble(order).await?);
        }
        Ok(details)
    }

    pub async fn delete_order(&self, id: &str) -> Result<(), DomainError> {
        if id.is_empty() {
            return Err(ValidationError::MissingOrderId.into());
        }
        self.orders.delete(id).await?;
        log::info!("deleted order {id}");
        Ok(())
    }

    async fn ensure_references_exist(&self, order: &Order) -> Result<(), DomainError> {
        if self.customers.get(order.customer_id()).await?.is_none() {
            log::warn!("rejecting order for unknown customer {}", order.customer_id());
            return Err(DomainError::InvalidReference {
                kind: ReferenceKind::Customer,
                id: order.customer_id().to_string(),
            });
        }

        let ids = order.catalog_item_ids();
        let items = self.catalog.list_by_ids(&ids).await?;
        let found: HashSet<&str> = items.iter().map(|item| item.id.as_str()).collect();
        if let Some(missing) = ids.into_iter().find(|id| !found.contains(id.as_str())) {
            log::warn!("rejecting order referencing unknown catalog item {missing}");
            return Err(DomainError::InvalidReference {
                kind: ReferenceKind::CatalogItem,
                id: missing,
            });
        }
        Ok(())
    }

    async fn assemble(&self, order: Order) -> Result<OrderDetails, DomainError> {
        let customer = match self.customers.get(order.customer_id()).await? {
            Some(customer) => customer,
            None => {
                log::error!(
                    "order {} references missing customer {}",
                    order.id(),
                    order.customer_id()
                );
                return Err(DomainError::ReferenceMissing {
                    kind: ReferenceKind::Customer,
                    id: order.customer_id().to_string(),
                });
            }
        };
        let items = self.catalog.list_by_ids(&order.catalog_item_ids()).await?;
        join_order(order, customer, items)
    }
}

/// Pairs each line with its catalog item and sums `count * price`.
fn join_order(
    order: Order,
    customer: Customer,
    items: Vec<CatalogItem>,
) -> Result<OrderDetails, DomainError> {
    let by_id: HashMap<&str, &CatalogItem> =
        items.iter().map(|item| (item.id.as_str(), item)).collect();

    let mut total_price = 0.0;
    let mut lines = Vec::with_capacity(order.lines().len());
    for line in order.lines() {
        let Some(item) = by_id.get(line.catalog_item_id()) else {
            log::error!(
                "order {} references catalog item {} missing from batch lookup",
                order.id(),
                line.catalog_item_id()
            );
            return Err(DomainError::ReferenceMissing {
                kind: ReferenceKind::CatalogItem,
                id: line.catalog_item_id().to_string(),
            });
        };
        total_price += item.price * f64::from(line.count());
        lines.push(OrderLineDetails {
            count: line.count(),
            catalog_item: (*item).clone(),
        });
    }

    Ok(OrderDetails {
        order,
        customer,
        lines,
        total_price,
    })
}
