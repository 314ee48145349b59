pub mod catalog_client;
pub mod customer_client;
pub mod models;
pub mod order_repo;
mod remote;

pub use catalog_client::GrpcCatalogLookup;
pub use customer_client::GrpcCustomerLookup;
pub use order_repo::DieselOrderRepository;
