use std::time::Duration;

use async_trait::async_trait;
use tonic::transport::Channel;
use tonic::Code;

use crate::domain::errors::DomainError;
use crate::domain::ports::CatalogLookup;
use crate::domain::references::CatalogItem;
use crate::proto::catalog::{
    self as pb, CatalogServiceClient, GetCatalogItemRequest, ListCatalogItemsByIdsRequest,
    ListCatalogItemsRequest,
};

use super::remote::{bad_payload, lazy_channel, unavailable};

const SERVICE: &str = "catalog";

/// [`CatalogLookup`] backed by the catalog service's gRPC API.
#[derive(Clone)]
pub struct GrpcCatalogLookup {
    client: CatalogServiceClient<Channel>,
}

impl GrpcCatalogLookup {
    pub fn new(channel: Channel) -> Self {
        Self {
            client: CatalogServiceClient::new(channel),
        }
    }

    pub fn connect_lazy(url: &str, timeout: Duration) -> Result<Self, tonic::transport::Error> {
        Ok(Self::new(lazy_channel(url, timeout)?))
    }
}

fn from_wire(item: pb::CatalogItem) -> Result<CatalogItem, DomainError> {
    CatalogItem::new(item.id, item.name, item.price)
        .map_err(|e| bad_payload(SERVICE, format!("invalid catalog item: {e}")))
}

fn from_wire_all(items: Vec<pb::CatalogItem>) -> Result<Vec<CatalogItem>, DomainError> {
    items.into_iter().map(from_wire).collect()
}

#[async_trait]
impl CatalogLookup for GrpcCatalogLookup {
    async fn get(&self, id: &str) -> Result<Option<CatalogItem>, DomainError> {
        let request = GetCatalogItemRequest { id: id.to_string() };
        match self.client.clone().get_catalog_item(request).await {
            Ok(response) => match response.into_inner().item {
                Some(item) => from_wire(item).map(Some),
                None => Ok(None),
            },
            Err(status) if status.code() == Code::NotFound => Ok(None),
            Err(status) => Err(unavailable(SERVICE, status)),
        }
    }

    async fn list(&self) -> Result<Vec<CatalogItem>, DomainError> {
        let response = self
            .client
            .clone()
            .list_catalog_items(ListCatalogItemsRequest {})
            .await
            .map_err(|status| unavailable(SERVICE, status))?;
        from_wire_all(response.into_inner().items)
    }

    async fn list_by_ids(&self, ids: &[String]) -> Result<Vec<CatalogItem>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        log::debug!("resolving {} catalog item(s) in one call", ids.len());
        let response = self
            .client
            .clone()
            .list_catalog_items_by_ids(ListCatalogItemsByIdsRequest { ids: ids.to_vec() })
            .await
            .map_err(|status| unavailable(SERVICE, status))?;
        from_wire_all(response.into_inner().items)
    }
}
