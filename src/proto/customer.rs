#[derive(Clone, PartialEq, prost::Message)]
pub struct Customer {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub email: String,
    #[prost(string, tag = "4")]
    pub street: String,
    #[prost(string, tag = "5")]
    pub city: String,
    #[prost(string, tag = "6")]
    pub country: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetCustomerRequest {
    #[prost(string, tag = "1")]
    pub id: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetCustomerResponse {
    #[prost(message, optional, tag = "1")]
    pub customer: Option<Customer>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ListCustomersRequest {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ListCustomersResponse {
    #[prost(message, repeated, tag = "1")]
    pub customers: Vec<Customer>,
}

include!(concat!(env!("OUT_DIR"), "/customer.CustomerService.rs"));

pub use customer_service_client::CustomerServiceClient;
pub use customer_service_server::{CustomerService, CustomerServiceServer};
