pub mod grpc;
pub mod orders;
