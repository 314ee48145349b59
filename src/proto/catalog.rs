#[derive(Clone, PartialEq, prost::Message)]
pub struct CatalogItem {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(double, tag = "3")]
    pub price: f64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetCatalogItemRequest {
    #[prost(string, tag = "1")]
    pub id: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetCatalogItemResponse {
    #[prost(message, optional, tag = "1")]
    pub item: Option<CatalogItem>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ListCatalogItemsRequest {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ListCatalogItemsResponse {
    #[prost(message, repeated, tag = "1")]
    pub items: Vec<CatalogItem>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ListCatalogItemsByIdsRequest {
    #[prost(string, repeated, tag = "1")]
    pub ids: Vec<String>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ListCatalogItemsByIdsResponse {
    #[prost(message, repeated, tag = "1")]
    pub items: Vec<CatalogItem>,
}

include!(concat!(env!("OUT_DIR"), "/catalog.CatalogService.rs"));

pub use catalog_service_client::CatalogServiceClient;
pub use catalog_service_server::{CatalogService, CatalogServiceServer};
