use super::catalog::CatalogItem;
use super::customer::Customer;

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetOrderCreationResourcesRequest {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetOrderCreationResourcesResponse {
    #[prost(message, repeated, tag = "1")]
    pub customers: Vec<Customer>,
    #[prost(message, repeated, tag = "2")]
    pub items: Vec<CatalogItem>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct OrderLine {
    #[prost(string, tag = "1")]
    pub catalog_item_id: String,
    #[prost(int32, tag = "2")]
    pub count: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CreateOrderRequest {
    #[prost(string, tag = "1")]
    pub customer_id: String,
    #[prost(message, repeated, tag = "2")]
    pub order_lines: Vec<OrderLine>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CreateOrderResponse {
    #[prost(string, tag = "1")]
    pub id: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct OrderLineDetails {
    #[prost(int32, tag = "1")]
    pub count: i32,
    #[prost(message, optional, tag = "2")]
    pub item: Option<CatalogItem>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct OrderDetails {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(message, optional, tag = "2")]
    pub customer: Option<Customer>,
    /// RFC 3339 timestamp.
    #[prost(string, tag = "3")]
    pub order_date: String,
    #[prost(message, repeated, tag = "4")]
    pub order_lines: Vec<OrderLineDetails>,
    #[prost(double, tag = "5")]
    pub total_price: f64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetOrderRequest {
    #[prost(string, tag = "1")]
    pub id: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetOrderResponse {
    #[prost(message, optional, tag = "1")]
    pub order: Option<OrderDetails>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ListOrdersRequest {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ListOrdersResponse {
    #[prost(message, repeated, tag = "1")]
    pub orders: Vec<OrderDetails>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DeleteOrderRequest {
    #[prost(string, tag = "1")]
    pub id: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DeleteOrderResponse {}

include!(concat!(env!("OUT_DIR"), "/order.OrderService.rs"));

pub use order_service_client::OrderServiceClient;
pub use order_service_server::{OrderService, OrderServiceServer};
