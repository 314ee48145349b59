use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::application::order_service::OrderService;
use crate::domain::order::{
    CreateOrderLineParams, CreateOrderParams, CreationResources, OrderDetails,
};
use crate::domain::references::{CatalogItem, Customer};
use crate::errors::AppError;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderLineRequest {
    pub catalog_item_id: String,
    pub count: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub customer_id: String,
    pub lines: Vec<CreateOrderLineRequest>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderResponse {
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CustomerResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub street: String,
    pub city: String,
    pub country: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CatalogItemResponse {
    pub id: String,
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderLineResponse {
    pub count: i32,
    pub catalog_item: CatalogItemResponse,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub id: String,
    pub customer: CustomerResponse,
    pub order_date: DateTime<Utc>,
    pub lines: Vec<OrderLineResponse>,
    pub total_price: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreationResourcesResponse {
    pub customers: Vec<CustomerResponse>,
    pub items: Vec<CatalogItemResponse>,
}

impl From<Customer> for CustomerResponse {
    fn from(c: Customer) -> Self {
        Self {
            id: c.id,
            name: c.name,
            email: c.email,
            street: c.street,
            city: c.city,
            country: c.country,
        }
    }
}

impl From<CatalogItem> for CatalogItemResponse {
    fn from(i: CatalogItem) -> Self {
        Self {
            id: i.id,
            name: i.name,
            price: i.price,
        }
    }
}

impl From<OrderDetails> for OrderResponse {
    fn from(d: OrderDetails) -> Self {
        Self {
            id: d.order.id().to_string(),
            order_date: d.order.order_date(),
            customer: d.customer.into(),
            lines: d
                .lines
                .into_iter()
                .map(|l| OrderLineResponse {
                    count: l.count,
                    catalog_item: l.catalog_item.into(),
                })
                .collect(),
            total_price: d.total_price,
        }
    }
}

impl From<CreationResources> for CreationResourcesResponse {
    fn from(r: CreationResources) -> Self {
        Self {
            customers: r.customers.into_iter().map(Into::into).collect(),
            items: r.items.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<CreateOrderRequest> for CreateOrderParams {
    fn from(body: CreateOrderRequest) -> Self {
        Self {
            customer_id: body.customer_id,
            lines: body
                .lines
                .into_iter()
                .map(|l| CreateOrderLineParams {
                    catalog_item_id: l.catalog_item_id,
                    count: l.count,
                })
                .collect(),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up")),
    tag = "health"
)]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// POST /orders
///
/// Resolves the customer and every catalog item, then stores the order with
/// its lines in one transaction.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = CreateOrderResponse),
        (status = 400, description = "Invalid input or unknown customer/catalog item"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    service: web::Data<OrderService>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let id = service.create_order(body.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(CreateOrderResponse { id }))
}

/// GET /orders/{id}
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(("id" = String, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    service: web::Data<OrderService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let details = service.get_order(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(OrderResponse::from(details)))
}

/// GET /orders
///
/// Every stored order, joined with its customer and catalog items.
#[utoipa::path(
    get,
    path = "/orders",
    responses(
        (status = 200, description = "All orders", body = [OrderResponse]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_orders(service: web::Data<OrderService>) -> Result<HttpResponse, AppError> {
    let orders: Vec<OrderResponse> = service
        .list_orders()
        .await?
        .into_iter()
        .map(OrderResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(orders))
}

#[utoipa::path(
    delete,
    path = "/orders/{id}",
    params(("id" = String, Path, description = "Order id")),
    responses(
        (status = 204, description = "Order deleted (or already absent)"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn delete_order(
    service: web::Data<OrderService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service.delete_order(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /orders/creation-resources
///
/// Customers and catalog items to pick from when building an order.
#[utoipa::path(
    get,
    path = "/orders/creation-resources",
    responses(
        (status = 200, description = "Customers and catalog items", body = CreationResourcesResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_creation_resources(
    service: web::Data<OrderService>,
) -> Result<HttpResponse, AppError> {
    let resources = service.get_order_creation_resources().await?;
    Ok(HttpResponse::Ok().json(CreationResourcesResponse::from(resources)))
}

/// Mounts the order routes under `/orders`. The static
/// `creation-resources` segment is registered before `{id}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health)).service(
        web::scope("/orders")
            .route("", web::get().to(list_orders))
            .route("", web::post().to(create_order))
            .route("/creation-resources", web::get().to(get_creation_resources))
            .route("/{id}", web::get().to(get_order))
            .route("/{id}", web::delete().to(delete_order)),
    );
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        create_order,
        get_order,
        list_orders,
        delete_order,
        get_creation_resources,
    ),
    components(schemas(
        CreateOrderLineRequest,
        CreateOrderRequest,
        CreateOrderResponse,
        CustomerResponse,
        CatalogItemResponse,
        OrderLineResponse,
        OrderResponse,
        CreationResourcesResponse,
    )),
    tags(
        (name = "orders", description = "Order creation and lookup"),
        (name = "health", description = "Liveness"),
    )
)]
pub struct ApiDoc;
