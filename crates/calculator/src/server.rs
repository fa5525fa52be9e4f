use crate::{calculator, greet, Method};
use duplex::grpc::ResponseStream;
use duplex::{Endpoint, Receiver, Sender};
use futures::Stream;
use proto_calculator::calculator::{
    ComputeAverageRequest, ComputeAverageResponse, FindMaximumRequest, FindMaximumResponse,
    PrimeNumberDecompositionRequest, PrimeNumberDecompositionResponse, SumRequest, SumResponse,
};
use proto_calculator::greet::{
    GreetEveryoneRequest, GreetEveryoneResponse, GreetManyTimesRequest, GreetManyTimesResponse,
    GreetRequest, GreetResponse, LongGreetRequest, LongGreetResponse,
};
use proto_grpc::calculator::calculator_service_server::{
    CalculatorService, CalculatorServiceServer,
};
use proto_grpc::greet::greet_service_server::{GreetService, GreetServiceServer};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio_util::sync::{CancellationToken, WaitForCancellationFutureOwned};
use tokio_util::task::TaskTracker;
use tonic::transport::server::{Connected, TcpConnectInfo};
use tonic::{Request, Response, Status, Streaming};
use tracing::Instrument;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Delay between the responses of GreetManyTimes.
    pub greet_interval: Duration,
    /// Number of messages buffered in each direction of a call.
    pub buffer: usize,
    /// Time allowed for connections to close after shutdown,
    /// after which they're aborted.
    pub drain_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            greet_interval: Duration::from_secs(1),
            buffer: duplex::CHANNEL_BUFFER,
            drain_timeout: Duration::from_secs(5),
        }
    }
}

/// Server dispatches calls to the handlers of the calculator and greet services.
/// It's cheaply cloned, and clones share a shutdown signal.
#[derive(Clone)]
pub struct Server {
    inner: Arc<Inner>,
}

struct Inner {
    config: ServerConfig,
    shutdown: CancellationToken,
    next_call_id: AtomicU64,
    calls: TaskTracker,
}

/// CallContext describes a single dispatched call.
#[derive(Debug, Clone)]
pub struct CallContext {
    pub id: u64,
    pub method: Method,
    pub greet_interval: Duration,
}

impl Server {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                shutdown: CancellationToken::new(),
                next_call_id: AtomicU64::new(1),
                calls: TaskTracker::new(),
            }),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Shut down the server: stop accepting connections, and fail every
    /// call in progress with Unavailable.
    pub fn shutdown(&self) {
        if !self.inner.shutdown.is_cancelled() {
            tracing::info!("shutting down server");
        }
        self.inner.shutdown.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.inner.shutdown.is_cancelled()
    }

    /// Number of dispatched calls which haven't yet finished.
    pub fn active_calls(&self) -> usize {
        self.inner.calls.len()
    }

    /// Dispatch a call of `method`, serving `endpoint` until its handler finishes.
    /// The handler's error, if any, is the terminal status of its responses
    /// and is also returned.
    pub async fn dispatch(&self, method: Method, endpoint: Endpoint) -> tonic::Result<()> {
        let context = CallContext {
            id: self.inner.next_call_id.fetch_add(1, Ordering::Relaxed),
            method,
            greet_interval: self.inner.config.greet_interval,
        };
        let span = tracing::info_span!("call", id = context.id, %method);
        let call = endpoint.call().clone();

        async move {
            tracing::debug!("dispatching call");

            let result = tokio::select! {
                result = handle(context, endpoint) => result,
                () = self.inner.shutdown.cancelled() => {
                    let status = Status::unavailable("server is shutting down");
                    call.fail(status.clone());
                    Err(status)
                }
            };

            match &result {
                Ok(()) => tracing::debug!("call completed"),
                Err(status) => tracing::warn!(
                    code = ?status.code(),
                    message = status.message(),
                    "call failed"
                ),
            }
            result
        }
        .instrument(span)
        .await
    }

    /// Dispatch `endpoint` on a task which is tracked until the call finishes.
    pub(crate) fn spawn_dispatch(&self, method: Method, endpoint: Endpoint) {
        let server = self.clone();
        self.inner.calls.spawn(async move {
            // Failures are logged by dispatch, and reach the caller through the call.
            _ = server.dispatch(method, endpoint).await;
        });
    }

    /// Serve gRPC calls from connections of `listener` until `signal` resolves
    /// or the server is shut down.
    ///
    /// Upon shutdown, calls in progress are failed and connections are given
    /// the configured drain timeout to close, after which they're aborted.
    /// Returns once every connection has closed and every call has finished.
    pub async fn serve<S>(
        &self,
        listener: tokio::net::TcpListener,
        signal: S,
    ) -> Result<(), tonic::transport::Error>
    where
        S: Future<Output = ()> + Send,
    {
        let abort = CancellationToken::new();

        // Accept errors are logged by tonic, which continues serving.
        let incoming = futures::stream::unfold(listener, |listener| {
            let abort = abort.clone();
            async move {
                let accepted = listener.accept().await.map(|(io, peer)| {
                    if let Err(error) = io.set_nodelay(true) {
                        tracing::debug!(%error, %peer, "failed to set TCP_NODELAY");
                    }
                    tracing::debug!(%peer, "accepted connection");
                    Connection::new(io, abort.clone())
                });
                Some((accepted, listener))
            }
        });

        let shutdown = {
            let server = self.clone();
            async move {
                tokio::select! {
                    () = signal => (),
                    () = server.inner.shutdown.cancelled() => (),
                }
                server.shutdown();
            }
        };

        let serving = tonic::transport::Server::builder()
            .add_service(CalculatorServiceServer::new(self.clone()))
            .add_service(GreetServiceServer::new(self.clone()))
            .serve_with_incoming_shutdown(incoming, shutdown);
        tokio::pin!(serving);

        let drain_timeout = self.inner.config.drain_timeout;
        let drain_expired = async {
            self.inner.shutdown.cancelled().await;
            tokio::time::sleep(drain_timeout).await;
        };

        let result = tokio::select! {
            result = &mut serving => result,
            () = drain_expired => {
                tracing::warn!(?drain_timeout, "aborting connections which didn't close after shutdown");
                abort.cancel();
                serving.await
            }
        };

        self.inner.calls.close();
        self.inner.calls.wait().await;
        tracing::info!("server stopped");

        result
    }

    // Dispatch a served call of `method` having `requests`,
    // returning the stream of its responses.
    fn accept<Req, Resp, S>(&self, method: Method, requests: S) -> ResponseStream<Resp>
    where
        Req: prost::Message + 'static,
        Resp: prost::Message + Default + 'static,
        S: Stream<Item = tonic::Result<Req>> + Send + 'static,
    {
        let (endpoint, responses) = duplex::grpc::accept(requests, self.inner.config.buffer);
        self.spawn_dispatch(method, endpoint);
        responses
    }
}

fn single<M>(request: Request<M>) -> impl Stream<Item = tonic::Result<M>> {
    futures::stream::once(futures::future::ready(Ok(request.into_inner())))
}

#[tonic::async_trait]
impl CalculatorService for Server {
    async fn sum(&self, request: Request<SumRequest>) -> tonic::Result<Response<SumResponse>> {
        let responses = self.accept(Method::Sum, single(request));
        duplex::grpc::unary_response(responses).await.map(Response::new)
    }

    type PrimeNumberDecompositionStream = ResponseStream<PrimeNumberDecompositionResponse>;

    async fn prime_number_decomposition(
        &self,
        request: Request<PrimeNumberDecompositionRequest>,
    ) -> tonic::Result<Response<Self::PrimeNumberDecompositionStream>> {
        Ok(Response::new(self.accept(
            Method::PrimeNumberDecomposition,
            single(request),
        )))
    }

    async fn compute_average(
        &self,
        request: Request<Streaming<ComputeAverageRequest>>,
    ) -> tonic::Result<Response<ComputeAverageResponse>> {
        let responses = self.accept(Method::ComputeAverage, request.into_inner());
        duplex::grpc::unary_response(responses).await.map(Response::new)
    }

    type FindMaximumStream = ResponseStream<FindMaximumResponse>;

    async fn find_maximum(
        &self,
        request: Request<Streaming<FindMaximumRequest>>,
    ) -> tonic::Result<Response<Self::FindMaximumStream>> {
        Ok(Response::new(
            self.accept(Method::FindMaximum, request.into_inner()),
        ))
    }
}

#[tonic::async_trait]
impl GreetService for Server {
    async fn greet(&self, request: Request<GreetRequest>) -> tonic::Result<Response<GreetResponse>> {
        let responses = self.accept(Method::Greet, single(request));
        duplex::grpc::unary_response(responses).await.map(Response::new)
    }

    type GreetManyTimesStream = ResponseStream<GreetManyTimesResponse>;

    async fn greet_many_times(
        &self,
        request: Request<GreetManyTimesRequest>,
    ) -> tonic::Result<Response<Self::GreetManyTimesStream>> {
        Ok(Response::new(
            self.accept(Method::GreetManyTimes, single(request)),
        ))
    }

    async fn long_greet(
        &self,
        request: Request<Streaming<LongGreetRequest>>,
    ) -> tonic::Result<Response<LongGreetResponse>> {
        let responses = self.accept(Method::LongGreet, request.into_inner());
        duplex::grpc::unary_response(responses).await.map(Response::new)
    }

    type GreetEveryoneStream = ResponseStream<GreetEveryoneResponse>;

    async fn greet_everyone(
        &self,
        request: Request<Streaming<GreetEveryoneRequest>>,
    ) -> tonic::Result<Response<Self::GreetEveryoneStream>> {
        Ok(Response::new(
            self.accept(Method::GreetEveryone, request.into_inner()),
        ))
    }
}

async fn handle(context: CallContext, endpoint: Endpoint) -> tonic::Result<()> {
    match context.method {
        Method::Sum => run_handler(endpoint, calculator::sum).await,
        Method::PrimeNumberDecomposition => {
            run_handler(endpoint, calculator::prime_number_decomposition).await
        }
        Method::ComputeAverage => run_handler(endpoint, calculator::compute_average).await,
        Method::FindMaximum => run_handler(endpoint, calculator::find_maximum).await,
        Method::Greet => run_handler(endpoint, greet::greet).await,
        Method::GreetManyTimes => {
            run_handler(endpoint, |requests, responses| {
                greet::greet_many_times(context.greet_interval, requests, responses)
            })
            .await
        }
        Method::LongGreet => run_handler(endpoint, greet::long_greet).await,
        Method::GreetEveryone => run_handler(endpoint, greet::greet_everyone).await,
    }
}

/// Run `handler` over the requests and responses of `endpoint`.
/// The responses end gracefully if the handler succeeds, or with its error.
pub(crate) async fn run_handler<Req, Resp, H, Fut>(
    endpoint: Endpoint,
    handler: H,
) -> tonic::Result<()>
where
    Req: prost::Message + Default,
    Resp: prost::Message,
    H: FnOnce(Receiver<Req>, Sender<Resp>) -> Fut,
    Fut: Future<Output = tonic::Result<()>>,
{
    let (responses, requests) = endpoint.split::<Resp, Req>();

    match handler(requests, responses.clone()).await {
        Ok(()) => {
            responses.close_send();
            Ok(())
        }
        Err(status) => {
            responses.abort(status.clone()).await;
            Err(status)
        }
    }
}

// Connection is an accepted TCP stream which fails further reads and writes
// once `abort` is cancelled. Connections which never start or finish
// their HTTP/2 handshake otherwise hold a graceful shutdown open forever.
struct Connection {
    io: tokio::net::TcpStream,
    abort: Pin<Box<WaitForCancellationFutureOwned>>,
    aborted: bool,
}

impl Connection {
    fn new(io: tokio::net::TcpStream, abort: CancellationToken) -> Self {
        Self {
            io,
            abort: Box::pin(abort.cancelled_owned()),
            aborted: false,
        }
    }

    fn poll_aborted(&mut self, cx: &mut Context<'_>) -> std::io::Result<()> {
        if !self.aborted && self.abort.as_mut().poll(cx).is_ready() {
            self.aborted = true;
        }
        if self.aborted {
            Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionAborted,
                "connection was aborted by server shutdown",
            ))
        } else {
            Ok(())
        }
    }
}

impl AsyncRead for Connection {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<std::io::Result<()>> {
        let this = self.get_mut();
        this.poll_aborted(cx)?;
        Pin::new(&mut this.io).poll_read(cx, buf)
    }
}

impl AsyncWrite for Connection {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<std::io::Result<usize>> {
        let this = self.get_mut();
        this.poll_aborted(cx)?;
        Pin::new(&mut this.io).poll_write(cx, buf)
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
        let this = self.get_mut();
        this.poll_aborted(cx)?;
        Pin::new(&mut this.io).poll_flush(cx)
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
        Pin::new(&mut self.get_mut().io).poll_shutdown(cx)
    }
}

impl Connected for Connection {
    type ConnectInfo = TcpConnectInfo;

    fn connect_info(&self) -> Self::ConnectInfo {
        self.io.connect_info()
    }
}
