//! duplex carries streaming RPC calls: a request stream and a response stream
//! with independent lifecycles, explicit half-close, and a shared failure
//! signal which unblocks every party of the call.
//!
//! A call may be wholly in-process (see [`channel::call`]) or bridged onto
//! gRPC (see [`grpc`]), and clients drive calls with concurrent sender and
//! receiver tasks via [`orchestrate::drive`].

pub mod channel;
pub mod grpc;
pub mod orchestrate;

pub use channel::{call, Call, Endpoint, Receiver, Sender};
pub use orchestrate::{drive, drive_with, CallStatus, Outcome};

/// CHANNEL_BUFFER is the standard number of messages which may be buffered
/// in each direction of a call before `send` suspends.
pub const CHANNEL_BUFFER: usize = 16;
