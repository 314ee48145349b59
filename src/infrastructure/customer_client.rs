use std::time::Duration;

use async_trait::async_trait;
use tonic::transport::Channel;
use tonic::Code;

use crate::domain::errors::DomainError;
use crate::domain::ports::CustomerLookup;
use crate::domain::references::Customer;
use crate::proto::customer::{
    self as pb, CustomerServiceClient, GetCustomerRequest, ListCustomersRequest,
};

use super::remote::{lazy_channel, unavailable};

const SERVICE: &str = "customer";

/// [`CustomerLookup`] backed by the customer service's gRPC API.
#[derive(Clone)]
pub struct GrpcCustomerLookup {
    client: CustomerServiceClient<Channel>,
}

impl GrpcCustomerLookup {
    pub fn new(channel: Channel) -> Self {
        Self {
            client: CustomerServiceClient::new(channel),
        }
    }

    pub fn connect_lazy(url: &str, timeout: Duration) -> Result<Self, tonic::transport::Error> {
        Ok(Self::new(lazy_channel(url, timeout)?))
    }
}

impl From<pb::Customer> for Customer {
    fn from(c: pb::Customer) -> Self {
        Customer {
            id: c.id,
            name: c.name,
            email: c.email,
            street: c.street,
            city: c.city,
            country: c.country,
        }
    }
}

#[async_trait]
impl CustomerLookup for GrpcCustomerLookup {
    async fn get(&self, id: &str) -> Result<Option<Customer>, DomainError> {
        let request = GetCustomerRequest { id: id.to_string() };
        match self.client.clone().get_customer(request).await {
            Ok(response) => Ok(response.into_inner().customer.map(Customer::from)),
            Err(status) if status.code() == Code::NotFound => Ok(None),
            Err(status) => Err(unavailable(SERVICE, status)),
        }
    }

    async fn list(&self) -> Result<Vec<Customer>, DomainError> {
        let response = self
            .client
            .clone()
            .list_customers(ListCustomersRequest {})
            .await
            .map_err(|status| unavailable(SERVICE, status))?;
        Ok(response
            .into_inner()
            .customers
            .into_iter()
            .map(Customer::from)
            .collect())
    }
}
