//! gRPC clients and servers of the calculator and greet services.
//! Messages are defined by the proto-calculator crate.

pub mod calculator;
pub mod greet;
