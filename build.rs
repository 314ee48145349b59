use tonic_build::manual::{Builder, Method, Service};

fn method(name: &str, route: &str, input: &str, output: &str) -> Method {
    Method::builder()
        .name(name)
        .route_name(route)
        .input_type(input)
        .output_type(output)
        .codec_path("tonic::codec::ProstCodec")
        .build()
}

fn main() {
    // Messages are hand-written prost structs in `src/proto`, so only the
    // service stubs are generated here (no .proto files, no protoc).
    let order = Service::builder()
        .name("OrderService")
        .package("order")
        .method(method(
            "get_order_creation_resources",
            "GetOrderCreationResources",
            "crate::proto::order::GetOrderCreationResourcesRequest",
            "crate::proto::order::GetOrderCreationResourcesResponse",
        ))
        .method(method(
            "get_order",
            "GetOrder",
            "crate::proto::order::GetOrderRequest",
            "crate::proto::order::GetOrderResponse",
        ))
        .method(method(
            "list_orders",
            "ListOrders",
            "crate::proto::order::ListOrdersRequest",
            "crate::proto::order::ListOrdersResponse",
        ))
        .method(method(
            "create_order",
            "CreateOrder",
            "crate::proto::order::CreateOrderRequest",
            "crate::proto::order::CreateOrderResponse",
        ))
        .method(method(
            "delete_order",
            "DeleteOrder",
            "crate::proto::order::DeleteOrderRequest",
            "crate::proto::order::DeleteOrderResponse",
        ))
        .build();

    let catalog = Service::builder()
        .name("CatalogService")
        .package("catalog")
        .method(method(
            "get_catalog_item",
            "GetCatalogItem",
            "crate::proto::catalog::GetCatalogItemRequest",
            "crate::proto::catalog::GetCatalogItemResponse",
        ))
        .method(method(
            "list_catalog_items",
            "ListCatalogItems",
            "crate::proto::catalog::ListCatalogItemsRequest",
            "crate::proto::catalog::ListCatalogItemsResponse",
        ))
        .method(method(
            "list_catalog_items_by_ids",
            "ListCatalogItemsByIDs",
            "crate::proto::catalog::ListCatalogItemsByIdsRequest",
            "crate::proto::catalog::ListCatalogItemsByIdsResponse",
        ))
        .build();

    let customer = Service::builder()
        .name("CustomerService")
        .package("customer")
        .method(method(
            "get_customer",
            "GetCustomer",
            "crate::proto::customer::GetCustomerRequest",
            "crate::proto::customer::GetCustomerResponse",
        ))
        .method(method(
            "list_customers",
            "ListCustomers",
            "crate::proto::customer::ListCustomersRequest",
            "crate::proto::customer::ListCustomersResponse",
        ))
        .build();

    Builder::new().compile(&[order, catalog, customer]);
}
