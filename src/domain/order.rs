use std::collections::HashSet;

use chrono::{DateTime, SubsecRound, Utc};
use uuid::Uuid;

use super::errors::ValidationError;
use super::references::{CatalogItem, Customer};

/// One line of an order: a catalog item reference and how many of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    count: i32,
    catalog_item_id: String,
}

impl OrderLine {
    pub fn new(count: i32, catalog_item_id: impl Into<String>) -> Result<Self, ValidationError> {
        let catalog_item_id = catalog_item_id.into();
        if count <= 0 {
            return Err(ValidationError::NonPositiveCount(count));
        }
        if catalog_item_id.is_empty() {
            return Err(ValidationError::MissingCatalogItemId);
        }
        Ok(Self {
            count,
            catalog_item_id,
        })
    }

    pub fn count(&self) -> i32 {
        self.count
    }

    pub fn catalog_item_id(&self) -> &str {
        &self.catalog_item_id
    }
}

/// An order header with its lines.
///
/// Orders are immutable once placed: the only way to obtain one is through
/// [`Order::new`], which enforces that the customer reference is set and that
/// there is at least one line. Total price is not part of the aggregate; it is
/// computed at read time from current catalog prices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: String,
    customer_id: String,
    order_date: DateTime<Utc>,
    lines: Vec<OrderLine>,
}

impl Order {
    /// Builds an order, generating an id when `id` is absent or empty and
    /// stamping the current time when `order_date` is absent.
    pub fn new(
        id: Option<String>,
        customer_id: impl Into<String>,
        order_date: Option<DateTime<Utc>>,
        lines: Vec<OrderLine>,
    ) -> Result<Self, ValidationError> {
        let customer_id = customer_id.into();
        if customer_id.is_empty() {
            return Err(ValidationError::MissingCustomerId);
        }
        if lines.is_empty() {
            return Err(ValidationError::NoLines);
        }
        let id = id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        // Postgres keeps microseconds; match it so a stored order reads back equal.
        let order_date = order_date.unwrap_or_else(|| Utc::now().trunc_subsecs(6));

        Ok(Self {
            id,
            customer_id,
            order_date,
            lines,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn order_date(&self) -> DateTime<Utc> {
        self.order_date
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Distinct catalog item ids referenced by the lines, in first-seen order.
    pub fn catalog_item_ids(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.lines
            .iter()
            .filter(|line| seen.insert(line.catalog_item_id()))
            .map(|line| line.catalog_item_id().to_string())
            .collect()
    }
}

// ── Use-case inputs ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct CreateOrderLineParams {
    pub catalog_item_id: String,
    pub count: i32,
}

#[derive(Debug, Clone)]
pub struct CreateOrderParams {
    pub customer_id: String,
    pub lines: Vec<CreateOrderLineParams>,
}

// ── Read-side views ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct OrderLineDetails {
    pub count: i32,
    pub catalog_item: CatalogItem,
}

/// An order joined with its customer and catalog items.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetails {
    pub order: Order,
    pub customer: Customer,
    pub lines: Vec<OrderLineDetails>,
    pub total_price: f64,
}

/// Everything a client needs to fill in an order form.
#[derive(Debug, Clone, PartialEq)]
pub struct CreationResources {
    pub customers: Vec<Customer>,
    pub items: Vec<CatalogItem>,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn line(count: i32, item: &str) -> OrderLine {
        OrderLine::new(count, item).expect("valid line")
    }

    #[test]
    fn order_line_rejects_non_positive_count() {
        for count in [0, -1, i32::MIN] {
            assert_eq!(
                OrderLine::new(count, "i1"),
                Err(ValidationError::NonPositiveCount(count))
            );
        }
    }

    #[test]
    fn order_line_rejects_empty_item_id() {
        assert_eq!(
            OrderLine::new(3, ""),
            Err(ValidationError::MissingCatalogItemId)
        );
    }

    #[test]
    fn order_line_keeps_fields() {
        let line = line(7, "item-7");
        assert_eq!(line.count(), 7);
        assert_eq!(line.catalog_item_id(), "item-7");
    }

    #[test]
    fn order_rejects_empty_customer_regardless_of_lines() {
        assert_eq!(
            Order::new(None, "", None, vec![line(1, "i1")]),
            Err(ValidationError::MissingCustomerId)
        );
        assert_eq!(
            Order::new(None, "", None, vec![]),
            Err(ValidationError::MissingCustomerId)
        );
    }

    #[test]
    fn order_rejects_empty_lines() {
        assert_eq!(
            Order::new(None, "c1", None, vec![]),
            Err(ValidationError::NoLines)
        );
    }

    #[test]
    fn order_generates_id_when_absent_or_empty() {
        let a = Order::new(None, "c1", None, vec![line(1, "i1")]).expect("order");
        let b = Order::new(Some(String::new()), "c1", None, vec![line(1, "i1")]).expect("order");
        assert!(Uuid::parse_str(a.id()).is_ok());
        assert!(Uuid::parse_str(b.id()).is_ok());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn order_keeps_supplied_id_and_date() {
        let date = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let order = Order::new(Some("o-1".to_string()), "c1", Some(date), vec![line(2, "i1")])
            .expect("order");
        assert_eq!(order.id(), "o-1");
        assert_eq!(order.customer_id(), "c1");
        assert_eq!(order.order_date(), date);
        assert_eq!(order.lines(), &[line(2, "i1")]);
    }

    #[test]
    fn order_defaults_date_to_now() {
        let before = Utc::now().trunc_subsecs(6);
        let order = Order::new(None, "c1", None, vec![line(1, "i1")]).expect("order");
        let after = Utc::now();
        assert!(order.order_date() >= before && order.order_date() <= after);
    }

    #[test]
    fn catalog_item_ids_are_distinct_in_first_seen_order() {
        let order = Order::new(
            None,
            "c1",
            None,
            vec![line(1, "b"), line(2, "a"), line(3, "b"), line(4, "c")],
        )
        .expect("order");
        assert_eq!(order.catalog_item_ids(), vec!["b", "a", "c"]);
    }
}
