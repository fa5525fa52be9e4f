#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Greeting {
    #[prost(string, tag="1")]
    pub first_name: ::prost::alloc::string::String,
    #[prost(string, tag="2")]
    pub last_name: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GreetRequest {
    #[prost(message, optional, tag="1")]
    pub greeting: ::core::option::Option<Greeting>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GreetResponse {
    #[prost(string, tag="1")]
    pub result: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GreetManyTimesRequest {
    #[prost(message, optional, tag="1")]
    pub greeting: ::core::option::Option<Greeting>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GreetManyTimesResponse {
    #[prost(string, tag="1")]
    pub result: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LongGreetRequest {
    #[prost(message, optional, tag="1")]
    pub greeting: ::core::option::Option<Greeting>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LongGreetResponse {
    #[prost(string, tag="1")]
    pub result: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GreetEveryoneRequest {
    #[prost(message, optional, tag="1")]
    pub greeting: ::core::option::Option<Greeting>,
}
/// GreetEveryoneResponse holds the greetings of every request received so far.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GreetEveryoneResponse {
    #[prost(string, tag="1")]
    pub result: ::prost::alloc::string::String,
}
