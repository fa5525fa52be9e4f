//! The Stream Channel of a call.
//!
//! A call has two ends, each an [`Endpoint`] which splits into a typed
//! [`Sender`] of outbound messages and a typed [`Receiver`] of inbound ones.
//! Messages travel as encoded bytes, so the ends of a call agree on its
//! message types only by convention, as they would over a connection.
//!
//! End-of-stream is signaled by dropping every `Sender` of a direction.
//! A terminal error is signaled by [`Sender::abort`], which delivers a
//! Status after any already-buffered messages. Either end may tear down
//! the whole call through its shared [`Call`], which immediately unblocks
//! every suspended `send` and `receive` on both ends.

use bytes::Bytes;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tonic::Status;

/// Frame is a single item of one direction of a call:
/// an encoded message, or a terminal error Status.
type Frame = tonic::Result<Bytes>;

/// Build both ends of a new call, where each direction buffers up to
/// `buffer` messages before `send` suspends.
pub fn call(buffer: usize) -> (Endpoint, Endpoint) {
    let call = Call::new();
    let (a_tx, b_rx) = mpsc::channel(buffer.max(1));
    let (b_tx, a_rx) = mpsc::channel(buffer.max(1));

    (
        Endpoint {
            tx: a_tx,
            rx: a_rx,
            call: call.clone(),
        },
        Endpoint {
            tx: b_tx,
            rx: b_rx,
            call,
        },
    )
}

/// Call is shared by every party of a call, and tracks whether
/// (and why) the call has failed.
#[derive(Clone, Debug)]
pub struct Call {
    inner: Arc<CallInner>,
}

#[derive(Debug)]
struct CallInner {
    token: CancellationToken,
    failure: Mutex<Option<Status>>,
}

impl Call {
    fn new() -> Self {
        Self {
            inner: Arc::new(CallInner {
                token: CancellationToken::new(),
                failure: Mutex::new(None),
            }),
        }
    }

    /// Fail the call with `status`, aborting both directions.
    /// Only the first failure of a call is retained.
    /// Returns true if this was the first failure.
    pub fn fail(&self, status: Status) -> bool {
        let first = {
            let mut failure = self.inner.failure.lock().unwrap();
            if failure.is_none() {
                *failure = Some(status);
                true
            } else {
                false
            }
        };
        self.inner.token.cancel();
        first
    }

    /// Close the call, tearing down both directions.
    pub fn close(&self) {
        self.fail(Status::cancelled("call was closed"));
    }

    pub fn is_failed(&self) -> bool {
        self.inner.token.is_cancelled()
    }

    /// The Status with which the call failed, if it has.
    pub fn failure(&self) -> Option<Status> {
        self.inner.failure.lock().unwrap().clone()
    }

    /// Err with the call's failure Status, if it has failed.
    pub fn check(&self) -> tonic::Result<()> {
        if self.is_failed() {
            Err(self.terminal())
        } else {
            Ok(())
        }
    }

    /// Wait until the call has failed.
    pub async fn failed(&self) {
        self.inner.token.cancelled().await
    }

    pub(crate) fn terminal(&self) -> Status {
        self.failure()
            .unwrap_or_else(|| Status::cancelled("call was closed"))
    }
}

/// Endpoint is one end of a call.
#[derive(Debug)]
pub struct Endpoint {
    tx: mpsc::Sender<Frame>,
    rx: mpsc::Receiver<Frame>,
    call: Call,
}

impl Endpoint {
    /// Split into a Sender of `Out` messages and a Receiver of `In` messages.
    pub fn split<Out, In>(self) -> (Sender<Out>, Receiver<In>) {
        (
            Sender {
                tx: self.tx,
                call: self.call.clone(),
                _message: PhantomData,
            },
            Receiver {
                rx: self.rx,
                call: self.call,
                done: false,
                _message: PhantomData,
            },
        )
    }

    pub fn call(&self) -> &Call {
        &self.call
    }
}

/// Sender sends messages of type M on one direction of a call.
/// The direction is half-closed once every clone of its Sender is dropped.
pub struct Sender<M> {
    tx: mpsc::Sender<Frame>,
    call: Call,
    _message: PhantomData<fn(M)>,
}

impl<M> Clone for Sender<M> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            call: self.call.clone(),
            _message: PhantomData,
        }
    }
}

impl<M: prost::Message> Sender<M> {
    /// Send a message, suspending while the direction's buffer is full.
    /// Fails if the call has failed, or if the peer is no longer receiving.
    pub async fn send(&self, message: M) -> tonic::Result<()> {
        self.send_frame(Ok(message.encode_to_vec().into())).await
    }
}

impl<M> Sender<M> {
    /// Signal that no further messages will be sent by this Sender.
    pub fn close_send(self) {}

    /// End the direction with a terminal error `status`, which the peer
    /// receives after any messages which were sent before it.
    pub async fn abort(self, status: Status) {
        if let Err(err) = self.send_frame(Err(status)).await {
            tracing::debug!(%err, "could not deliver terminal status to peer");
        }
    }

    /// True if the peer has stopped receiving this direction.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    pub fn call(&self) -> &Call {
        &self.call
    }

    async fn send_frame(&self, frame: Frame) -> tonic::Result<()> {
        tokio::select! {
            biased;
            () = self.call.failed() => Err(self.call.terminal()),
            result = self.tx.send(frame) => {
                result.map_err(|_| Status::cancelled("peer is no longer receiving"))
            }
        }
    }
}

/// Receiver receives messages of type M from one direction of a call.
pub struct Receiver<M> {
    rx: mpsc::Receiver<Frame>,
    call: Call,
    done: bool,
    _message: PhantomData<fn() -> M>,
}

impl<M: prost::Message + Default> Receiver<M> {
    /// Receive the next message, or None at end-of-stream.
    pub async fn receive(&mut self) -> tonic::Result<Option<M>> {
        let Some(bytes) = self.receive_frame().await? else {
            return Ok(None);
        };
        match M::decode(bytes) {
            Ok(message) => Ok(Some(message)),
            Err(err) => Err(Status::internal(format!(
                "failed to decode {}: {err}",
                std::any::type_name::<M>()
            ))),
        }
    }

    /// Receive exactly one message, which must be followed by end-of-stream.
    pub async fn receive_unary(&mut self) -> tonic::Result<M> {
        let Some(message) = self.receive().await? else {
            return Err(Status::invalid_argument(
                "expected a message, but the stream ended",
            ));
        };
        if self.receive().await?.is_some() {
            return Err(Status::invalid_argument(
                "expected end-of-stream, but received another message",
            ));
        }
        Ok(message)
    }

    /// Map into a Stream of received messages.
    pub fn into_stream(self) -> impl futures::Stream<Item = tonic::Result<M>> {
        futures::stream::try_unfold(self, |mut rx| async move {
            Ok(rx.receive().await?.map(|message| (message, rx)))
        })
    }
}

impl<M> Receiver<M> {
    pub fn call(&self) -> &Call {
        &self.call
    }

    async fn receive_frame(&mut self) -> tonic::Result<Option<Bytes>> {
        if self.done {
            return Ok(None);
        }
        let frame = tokio::select! {
            biased;
            () = self.call.failed() => return Err(self.call.terminal()),
            frame = self.rx.recv() => frame,
        };

        match frame {
            Some(Ok(bytes)) => Ok(Some(bytes)),
            Some(Err(status)) => {
                self.rx.close();
                self.done = true;
                Err(status)
            }
            None => {
                self.done = true;
                Ok(None)
            }
        }
    }
}
