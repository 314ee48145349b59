use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::order::Order;
use crate::schema::{order_lines, orders};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: String,
    pub customer_id: String,
    pub order_date: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow<'a> {
    pub id: &'a str,
    pub customer_id: &'a str,
    pub order_date: DateTime<Utc>,
}

impl<'a> From<&'a Order> for NewOrderRow<'a> {
    fn from(order: &'a Order) -> Self {
        Self {
            id: order.id(),
            customer_id: order.customer_id(),
            order_date: order.order_date(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = order_lines)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderLineRow {
    pub id: i64,
    pub order_id: String,
    pub catalog_item_id: String,
    pub count: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = order_lines)]
pub struct NewOrderLineRow<'a> {
    pub order_id: &'a str,
    pub catalog_item_id: &'a str,
    pub count: i32,
}

impl<'a> NewOrderLineRow<'a> {
    pub fn for_order(order: &'a Order) -> Vec<Self> {
        order
            .lines()
            .iter()
            .map(|line| Self {
                order_id: order.id(),
                catalog_item_id: line.catalog_item_id(),
                count: line.count(),
            })
            .collect()
    }
}
