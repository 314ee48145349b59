//! Wire messages for the order service and the two services it calls.
//!
//! Messages are plain prost structs (standard protobuf wire format); the
//! tonic client and server stubs are generated by `build.rs`.

pub mod catalog;
pub mod customer;
pub mod order;
