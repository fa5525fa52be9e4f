#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct SumRequest {
    #[prost(int64, tag="1")]
    pub first_number: i64,
    #[prost(int64, tag="2")]
    pub second_number: i64,
}
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct SumResponse {
    #[prost(int64, tag="1")]
    pub sum_result: i64,
}
/// PrimeNumberDecompositionRequest asks for the prime factors of `number`,
/// which must be at least one.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct PrimeNumberDecompositionRequest {
    #[prost(int64, tag="1")]
    pub number: i64,
}
/// PrimeNumberDecompositionResponse carries a single prime factor.
/// Factors are streamed in non-decreasing order, once per multiplicity.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct PrimeNumberDecompositionResponse {
    #[prost(int64, tag="1")]
    pub prime_factor: i64,
}
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct ComputeAverageRequest {
    #[prost(int32, tag="1")]
    pub number: i32,
}
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct ComputeAverageResponse {
    #[prost(double, tag="1")]
    pub average: f64,
}
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct FindMaximumRequest {
    #[prost(int32, tag="1")]
    pub number: i32,
}
/// FindMaximumResponse is sent each time a request raises the running maximum.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct FindMaximumResponse {
    #[prost(int32, tag="1")]
    pub maximum: i32,
}
