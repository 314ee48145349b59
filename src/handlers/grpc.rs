//! gRPC adapter for the order service.

use std::sync::Arc;

use chrono::SecondsFormat;
use tonic::{Request, Response, Status};

use crate::application::order_service::OrderService;
use crate::domain::errors::DomainError;
use crate::domain::order::{
    CreateOrderLineParams, CreateOrderParams, CreationResources, OrderDetails,
};
use crate::domain::references::{CatalogItem, Customer};
use crate::proto::{catalog as catalog_pb, customer as customer_pb, order as pb};

pub struct OrderGrpcHandler {
    service: Arc<OrderService>,
}

impl OrderGrpcHandler {
    pub fn new(service: Arc<OrderService>) -> Self {
        Self { service }
    }
}

/// Wraps the use case in the generated tonic server.
pub fn grpc_server(service: Arc<OrderService>) -> pb::OrderServiceServer<OrderGrpcHandler> {
    pb::OrderServiceServer::new(OrderGrpcHandler::new(service))
}

/// Caller mistakes keep their message; anything else is logged and hidden.
fn to_status(e: DomainError) -> Status {
    match e {
        DomainError::NotFound => Status::not_found(e.to_string()),
        DomainError::Cancelled => Status::cancelled("request cancelled"),
        e if e.is_client_error() => Status::invalid_argument(e.to_string()),
        e => {
            log::error!("order request failed: {e}");
            Status::internal("internal error")
        }
    }
}

fn customer_to_wire(c: Customer) -> customer_pb::Customer {
    customer_pb::Customer {
        id: c.id,
        name: c.name,
        email: c.email,
        street: c.street,
        city: c.city,
        country: c.country,
    }
}

fn item_to_wire(i: CatalogItem) -> catalog_pb::CatalogItem {
    catalog_pb::CatalogItem {
        id: i.id,
        name: i.name,
        price: i.price,
    }
}

fn details_to_wire(d: OrderDetails) -> pb::OrderDetails {
    pb::OrderDetails {
        id: d.order.id().to_string(),
        order_date: d
            .order
            .order_date()
            .to_rfc3339_opts(SecondsFormat::Micros, true),
        customer: Some(customer_to_wire(d.customer)),
        order_lines: d
            .lines
            .into_iter()
            .map(|l| pb::OrderLineDetails {
                count: l.count,
                item: Some(item_to_wire(l.catalog_item)),
            })
            .collect(),
        total_price: d.total_price,
    }
}

fn resources_to_wire(r: CreationResources) -> pb::GetOrderCreationResourcesResponse {
    pb::GetOrderCreationResourcesResponse {
        customers: r.customers.into_iter().map(customer_to_wire).collect(),
        items: r.items.into_iter().map(item_to_wire).collect(),
    }
}

fn create_params(req: pb::CreateOrderRequest) -> CreateOrderParams {
    CreateOrderParams {
        customer_id: req.customer_id,
        lines: req
            .order_lines
            .into_iter()
            .map(|l| CreateOrderLineParams {
                catalog_item_id: l.catalog_item_id,
                count: l.count,
            })
            .collect(),
    }
}

#[tonic::async_trait]
impl pb::OrderService for OrderGrpcHandler {
    async fn get_order_creation_resources(
        &self,
        _request: Request<pb::GetOrderCreationResourcesRequest>,
    ) -> Result<Response<pb::GetOrderCreationResourcesResponse>, Status> {
        let resources = self
            .service
            .get_order_creation_resources()
            .await
            .map_err(to_status)?;
        Ok(Response::new(resources_to_wire(resources)))
    }

    async fn get_order(
        &self,
        request: Request<pb::GetOrderRequest>,
    ) -> Result<Response<pb::GetOrderResponse>, Status> {
        let id = request.into_inner().id;
        let details = self.service.get_order(&id).await.map_err(to_status)?;
        Ok(Response::new(pb::GetOrderResponse {
            order: Some(details_to_wire(details)),
        }))
    }

    async fn list_orders(
        &self,
        _request: Request<pb::ListOrdersRequest>,
    ) -> Result<Response<pb::ListOrdersResponse>, Status> {
        let orders = self.service.list_orders().await.map_err(to_status)?;
        Ok(Response::new(pb::ListOrdersResponse {
            orders: orders.into_iter().map(details_to_wire).collect(),
        }))
    }

    async fn create_order(
        &self,
        request: Request<pb::CreateOrderRequest>,
    ) -> Result<Response<pb::CreateOrderResponse>, Status> {
        let params = create_params(request.into_inner());
        let id = self.service.create_order(params).await.map_err(to_status)?;
        Ok(Response::new(pb::CreateOrderResponse { id }))
    }

    async fn delete_order(
        &self,
        request: Request<pb::DeleteOrderRequest>,
    ) -> Result<Response<pb::DeleteOrderResponse>, Status> {
        let id = request.into_inner().id;
        self.service.delete_order(&id).await.map_err(to_status)?;
        Ok(Response::new(pb::DeleteOrderResponse {}))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{ReferenceKind, ValidationError};
    use crate::proto::order::OrderService as _;
    use crate::testing::{FakeCatalog, FakeCustomers, Fixture, InMemoryOrderRepository};
    use tonic::Code;

    fn handler(fixture: &Fixture) -> OrderGrpcHandler {
        OrderGrpcHandler::new(Arc::new(fixture.service()))
    }

    fn create_request(customer_id: &str, lines: &[(&str, i32)]) -> Request<pb::CreateOrderRequest> {
        Request::new(pb::CreateOrderRequest {
            customer_id: customer_id.to_string(),
            order_lines: lines
                .iter()
                .map(|(id, count)| pb::OrderLine {
                    catalog_item_id: id.to_string(),
                    count: *count,
                })
                .collect(),
        })
    }

    #[test]
    fn validation_errors_become_invalid_argument() {
        let status = to_status(ValidationError::NonPositiveCount(0).into());
        assert_eq!(status.code(), Code::InvalidArgument);
        assert!(status.message().contains("count"));
    }

    #[test]
    fn internal_detail_is_not_leaked() {
        let status = to_status(DomainError::Internal("password=hunter2".to_string()));
        assert_eq!(status.code(), Code::Internal);
        assert_eq!(status.message(), "internal error");

        let status = to_status(DomainError::ReferenceMissing {
            kind: ReferenceKind::CatalogItem,
            id: "i9".to_string(),
        });
        assert_eq!(status.code(), Code::Internal);
        assert!(!status.message().contains("i9"));
    }

    #[test]
    fn cancelled_maps_to_cancelled() {
        assert_eq!(to_status(DomainError::Cancelled).code(), Code::Cancelled);
    }

    #[test]
    fn not_found_maps_to_not_found() {
        assert_eq!(to_status(DomainError::NotFound).code(), Code::NotFound);
    }

    #[tokio::test]
    async fn create_then_get_returns_joined_order() {
        let fixture = Fixture::standard();
        let handler = handler(&fixture);

        let id = handler
            .create_order(create_request("c1", &[("i1", 2), ("i2", 3)]))
            .await
            .expect("created")
            .into_inner()
            .id;
        assert!(!id.is_empty());

        let order = handler
            .get_order(Request::new(pb::GetOrderRequest { id: id.clone() }))
            .await
            .expect("found")
            .into_inner()
            .order
            .expect("order present");

        assert_eq!(order.id, id);
        assert_eq!(order.customer.expect("customer").id, "c1");
        assert_eq!(order.order_lines.len(), 2);
        assert_eq!(order.order_lines[0].item.as_ref().map(|i| i.id.as_str()), Some("i1"));
        assert_eq!(order.total_price, 350.0);
    }

    #[tokio::test]
    async fn create_with_empty_customer_is_invalid_argument() {
        let fixture = Fixture::standard();
        let status = handler(&fixture)
            .create_order(create_request("", &[("i1", 1)]))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
        assert!(fixture.orders.stored().is_empty());
    }

    #[tokio::test]
    async fn create_with_unknown_item_is_invalid_argument() {
        let fixture = Fixture::standard();
        let status = handler(&fixture)
            .create_order(create_request("c1", &[("nope", 1)]))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
    }

    #[tokio::test]
    async fn store_failure_is_internal() {
        let fixture = Fixture::new(
            InMemoryOrderRepository {
                fail_writes: true,
                ..Default::default()
            },
            FakeCustomers::new(vec![crate::testing::customer("c1")]),
            FakeCatalog::new(vec![crate::testing::item("i1", 10.0)]),
        );
        let status = handler(&fixture)
            .create_order(create_request("c1", &[("i1", 1)]))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::Internal);
        assert_eq!(status.message(), "internal error");
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let fixture = Fixture::standard();
        let handler = handler(&fixture);
        let id = handler
            .create_order(create_request("c1", &[("i1", 1)]))
            .await
            .expect("created")
            .into_inner()
            .id;

        handler
            .delete_order(Request::new(pb::DeleteOrderRequest { id: id.clone() }))
            .await
            .expect("deleted");

        let status = handler
            .get_order(Request::new(pb::GetOrderRequest { id }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::NotFound);
    }

    #[tokio::test]
    async fn creation_resources_lists_both_sources() {
        let fixture = Fixture::standard();
        let resources = handler(&fixture)
            .get_order_creation_resources(Request::new(pb::GetOrderCreationResourcesRequest {}))
            .await
            .expect("resources")
            .into_inner();
        assert_eq!(resources.customers.len(), 1);
        assert_eq!(resources.items.len(), 2);
    }

    #[tokio::test]
    async fn list_orders_reports_each_order() {
        let fixture = Fixture::standard();
        let handler = handler(&fixture);
        handler
            .create_order(create_request("c1", &[("i1", 2)]))
            .await
            .expect("created");

        let orders = handler
            .list_orders(Request::new(pb::ListOrdersRequest {}))
            .await
            .expect("listed")
            .into_inner()
            .orders;
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].order_lines[0].count, 2);
        assert_eq!(orders[0].total_price, 200.0);
    }
}
