//! In-memory doubles for the ports, shared by the unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::application::order_service::OrderService;
use crate::domain::errors::DomainError;
use crate::domain::order::Order;
use crate::domain::ports::{CatalogLookup, CustomerLookup, OrderRepository};
use crate::domain::references::{CatalogItem, Customer};

#[derive(Default)]
pub struct InMemoryOrderRepository {
    pub orders: Mutex<Vec<Order>>,
    pub fail_writes: bool,
}

impl InMemoryOrderRepository {
    pub fn with_orders(orders: Vec<Order>) -> Self {
        Self {
            orders: Mutex::new(orders),
            fail_writes: false,
        }
    }

    pub fn stored(&self) -> Vec<Order> {
        self.orders.lock().unwrap().clone()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, order: Order) -> Result<(), DomainError> {
        if self.fail_writes {
            return Err(DomainError::Internal("connection reset".to_string()));
        }
        self.orders.lock().unwrap().push(order);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Order, DomainError> {
        self.orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.id() == id)
            .cloned()
            .ok_or(DomainError::NotFound)
    }

    async fn list(&self) -> Result<Vec<Order>, DomainError> {
        Ok(self.stored())
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.orders.lock().unwrap().retain(|o| o.id() != id);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeCustomers {
    pub customers: HashMap<String, Customer>,
    pub unavailable: bool,
    pub get_calls: AtomicUsize,
}

impl FakeCustomers {
    pub fn new(customers: Vec<Customer>) -> Self {
        Self {
            customers: customers.into_iter().map(|c| (c.id.clone(), c)).collect(),
            ..Self::default()
        }
    }
}

#[async_trait]
impl CustomerLookup for FakeCustomers {
    async fn get(&self, id: &str) -> Result<Option<Customer>, DomainError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(unavailable("customer"));
        }
        Ok(self.customers.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Customer>, DomainError> {
        if self.unavailable {
            return Err(unavailable("customer"));
        }
        let mut customers: Vec<Customer> = self.customers.values().cloned().collect();
        customers.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(customers)
    }
}

#[derive(Default)]
pub struct FakeCatalog {
    pub items: Mutex<HashMap<String, CatalogItem>>,
    pub unavailable: bool,
    /// Ids to leave out of `list_by_ids` answers, simulating a partial reply.
    pub drop_from_batch: Vec<String>,
    pub get_calls: AtomicUsize,
    pub batch_calls: Mutex<Vec<Vec<String>>>,
}

impl FakeCatalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self {
            items: Mutex::new(items.into_iter().map(|i| (i.id.clone(), i)).collect()),
            ..Self::default()
        }
    }

    pub fn set_price(&self, id: &str, price: f64) {
        if let Some(item) = self.items.lock().unwrap().get_mut(id) {
            item.price = price;
        }
    }

    pub fn batches(&self) -> Vec<Vec<String>> {
        self.batch_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogLookup for FakeCatalog {
    async fn get(&self, id: &str) -> Result<Option<CatalogItem>, DomainError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(unavailable("catalog"));
        }
        Ok(self.items.lock().unwrap().get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<CatalogItem>, DomainError> {
        if self.unavailable {
            return Err(unavailable("catalog"));
        }
        let mut items: Vec<CatalogItem> = self.items.lock().unwrap().values().cloned().collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(items)
    }

    async fn list_by_ids(&self, ids: &[String]) -> Result<Vec<CatalogItem>, DomainError> {
        self.batch_calls.lock().unwrap().push(ids.to_vec());
        if self.unavailable {
            return Err(unavailable("catalog"));
        }
        let items = self.items.lock().unwrap();
        Ok(ids
            .iter()
            .filter(|id| !self.drop_from_batch.contains(*id))
            .filter_map(|id| items.get(id).cloned())
            .collect())
    }
}

fn unavailable(service: &'static str) -> DomainError {
    DomainError::RemoteUnavailable {
        service,
        reason: "connection refused".to_string(),
    }
}

pub fn customer(id: &str) -> Customer {
    Customer {
        id: id.to_string(),
        name: format!("Customer {id}"),
        email: format!("{id}@example.com"),
        street: "1 Main St".to_string(),
        city: "Springfield".to_string(),
        country: "USA".to_string(),
    }
}

pub fn item(id: &str, price: f64) -> CatalogItem {
    CatalogItem::new(id, format!("Item {id}"), price).expect("valid catalog item")
}

pub struct Fixture {
    pub orders: Arc<InMemoryOrderRepository>,
    pub customers: Arc<FakeCustomers>,
    pub catalog: Arc<FakeCatalog>,
}

impl Fixture {
    pub fn new(
        orders: InMemoryOrderRepository,
        customers: FakeCustomers,
        catalog: FakeCatalog,
    ) -> Self {
        Self {
            orders: Arc::new(orders),
            customers: Arc::new(customers),
            catalog: Arc::new(catalog),
        }
    }

    /// Customer `c1`; items `i1` (100.0) and `i2` (50.0); no orders.
    pub fn standard() -> Self {
        Self::new(
            InMemoryOrderRepository::default(),
            FakeCustomers::new(vec![customer("c1")]),
            FakeCatalog::new(vec![item("i1", 100.0), item("i2", 50.0)]),
        )
    }

    pub fn service(&self) -> OrderService {
        OrderService::new(
            self.orders.clone(),
            self.customers.clone(),
            self.catalog.clone(),
        )
    }
}
