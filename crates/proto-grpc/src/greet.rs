/// Generated client implementations.
#[cfg(feature = "greet_client")]
pub mod greet_service_client {
    #![allow(unused_variables, dead_code, missing_docs, clippy::let_unit_value)]
    use tonic::codegen::*;
    use tonic::codegen::http::Uri;
    /// GreetService greets names over unary and streaming RPCs.
    #[derive(Debug, Clone)]
    pub struct GreetServiceClient<T> {
        inner: tonic::client::Grpc<T>,
    }
    impl GreetServiceClient<tonic::transport::Channel> {
        /// Attempt to create a new client by connecting to a given endpoint.
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: std::convert::TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }
    impl<T> GreetServiceClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::Error: Into<StdError>,
        T::ResponseBody: Body<Data = Bytes> + Send + 'static,
        <T::ResponseBody as Body>::Error: Into<StdError> + Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }
        pub fn with_origin(inner: T, origin: Uri) -> Self {
            let inner = tonic::client::Grpc::with_origin(inner, origin);
            Self { inner }
        }
        pub fn with_interceptor<F>(
            inner: T,
            interceptor: F,
        ) -> GreetServiceClient<InterceptedService<T, F>>
        where
            F: tonic::service::Interceptor,
            T::ResponseBody: Default,
            T: tonic::codegen::Service<
                http::Request<tonic::body::BoxBody>,
                Response = http::Response<
                    <T as tonic::client::GrpcService<tonic::body::BoxBody>>::ResponseBody,
                >,
            >,
            <T as tonic::codegen::Service<
                http::Request<tonic::body::BoxBody>,
            >>::Error: Into<StdError> + Send + Sync,
        {
            GreetServiceClient::new(InterceptedService::new(inner, interceptor))
        }
        /// Compress requests with the given encoding.
        ///
        /// This requires the server to support it otherwise it might respond with an
        /// error.
        #[must_use]
        pub fn send_compressed(mut self, encoding: CompressionEncoding) -> Self {
            self.inner = self.inner.send_compressed(encoding);
            self
        }
        /// Enable decompressing responses.
        #[must_use]
        pub fn accept_compressed(mut self, encoding: CompressionEncoding) -> Self {
            self.inner = self.inner.accept_compressed(encoding);
            self
        }
        /// Greet responds with a greeting of the requested name.
        pub async fn greet(
            &mut self,
            request: impl tonic::IntoRequest<::proto_calculator::greet::GreetRequest>,
        ) -> Result<
            tonic::Response<::proto_calculator::greet::GreetResponse>,
            tonic::Status,
        > {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::new(
                        tonic::Code::Unknown,
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static(
                "/greet.GreetService/Greet",
            );
            self.inner.unary(request.into_request(), path, codec).await
        }
        /// GreetManyTimes streams many greetings of the requested name.
        pub async fn greet_many_times(
            &mut self,
            request: impl tonic::IntoRequest<
                ::proto_calculator::greet::GreetManyTimesRequest,
            >,
        ) -> Result<
            tonic::Response<
                tonic::codec::Streaming<
                    ::proto_calculator::greet::GreetManyTimesResponse,
                >,
            >,
            tonic::Status,
        > {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::new(
                        tonic::Code::Unknown,
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static(
                "/greet.GreetService/GreetManyTimes",
            );
            self.inner.server_streaming(request.into_request(), path, codec).await
        }
        /// LongGreet responds with one greeting of a stream of names.
        pub async fn long_greet(
            &mut self,
            request: impl tonic::IntoStreamingRequest<
                Message = ::proto_calculator::greet::LongGreetRequest,
            >,
        ) -> Result<
            tonic::Response<::proto_calculator::greet::LongGreetResponse>,
            tonic::Status,
        > {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::new(
                        tonic::Code::Unknown,
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static(
                "/greet.GreetService/LongGreet",
            );
            self.inner
                .client_streaming(request.into_streaming_request(), path, codec)
                .await
        }
        /// GreetEveryone responds to each name of its request stream with
        /// a greeting of every name so far.
        pub async fn greet_everyone(
            &mut self,
            request: impl tonic::IntoStreamingRequest<
                Message = ::proto_calculator::greet::GreetEveryoneRequest,
            >,
        ) -> Result<
            tonic::Response<
                tonic::codec::Streaming<
                    ::proto_calculator::greet::GreetEveryoneResponse,
                >,
            >,
            tonic::Status,
        > {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::new(
                        tonic::Code::Unknown,
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static(
                "/greet.GreetService/GreetEveryone",
            );
            self.inner.streaming(request.into_streaming_request(), path, codec).await
        }
    }
}
/// Generated server implementations.
#[cfg(feature = "greet_server")]
pub mod greet_service_server {
    #![allow(unused_variables, dead_code, missing_docs, clippy::let_unit_value)]
    use tonic::codegen::*;
    ///Generated trait containing gRPC methods that should be implemented for use with GreetServiceServer.
    #[async_trait]
    pub trait GreetService: Send + Sync + 'static {
        /// Greet responds with a greeting of the requested name.
        async fn greet(
            &self,
            request: tonic::Request<::proto_calculator::greet::GreetRequest>,
        ) -> Result<
            tonic::Response<::proto_calculator::greet::GreetResponse>,
            tonic::Status,
        >;
        ///Server streaming response type for the GreetManyTimes method.
        type GreetManyTimesStream: tokio_stream::Stream<
                Item = Result<
                    ::proto_calculator::greet::GreetManyTimesResponse,
                    tonic::Status,
                >,
            >
            + Send
            + 'static;
        /// GreetManyTimes streams many greetings of the requested name.
        async fn greet_many_times(
            &self,
            request: tonic::Request<
                ::proto_calculator::greet::GreetManyTimesRequest,
            >,
        ) -> Result<
            tonic::Response<Self::GreetManyTimesStream>,
            tonic::Status,
        >;
        /// LongGreet responds with one greeting of a stream of names.
        async fn long_greet(
            &self,
            request: tonic::Request<
                tonic::Streaming<::proto_calculator::greet::LongGreetRequest>,
            >,
        ) -> Result<
            tonic::Response<::proto_calculator::greet::LongGreetResponse>,
            tonic::Status,
        >;
        ///Server streaming response type for the GreetEveryone method.
        type GreetEveryoneStream: tokio_stream::Stream<
                Item = Result<
                    ::proto_calculator::greet::GreetEveryoneResponse,
                    tonic::Status,
                >,
            >
            + Send
            + 'static;
        /// GreetEveryone responds to each name of its request stream with
        /// a greeting of every name so far.
        async fn greet_everyone(
            &self,
            request: tonic::Request<
                tonic::Streaming<::proto_calculator::greet::GreetEveryoneRequest>,
            >,
        ) -> Result<tonic::Response<Self::GreetEveryoneStream>, tonic::Status>;
    }
    /// GreetService greets names over unary and streaming RPCs.
    #[derive(Debug)]
    pub struct GreetServiceServer<T: GreetService> {
        inner: _Inner<T>,
        accept_compression_encodings: EnabledCompressionEncodings,
        send_compression_encodings: EnabledCompressionEncodings,
    }
    struct _Inner<T>(Arc<T>);
    impl<T: GreetService> GreetServiceServer<T> {
        pub fn new(inner: T) -> Self {
            Self::from_arc(Arc::new(inner))
        }
        pub fn from_arc(inner: Arc<T>) -> Self {
            let inner = _Inner(inner);
            Self {
                inner,
                accept_compression_encodings: Default::default(),
                send_compression_encodings: Default::default(),
            }
        }
        pub fn with_interceptor<F>(
            inner: T,
            interceptor: F,
        ) -> InterceptedService<Self, F>
        where
            F: tonic::service::Interceptor,
        {
            InterceptedService::new(Self::new(inner), interceptor)
        }
        /// Enable decompressing requests with the given encoding.
        #[must_use]
        pub fn accept_compressed(mut self, encoding: CompressionEncoding) -> Self {
            self.accept_compression_encodings.enable(encoding);
            self
        }
        /// Compress responses with the given encoding, if the client supports it.
        #[must_use]
        pub fn send_compressed(mut self, encoding: CompressionEncoding) -> Self {
            self.send_compression_encodings.enable(encoding);
            self
        }
    }
    impl<T, B> tonic::codegen::Service<http::Request<B>> for GreetServiceServer<T>
    where
        T: GreetService,
        B: Body + Send + 'static,
        B::Error: Into<StdError> + Send + 'static,
    {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = std::convert::Infallible;
        type Future = BoxFuture<Self::Response, Self::Error>;
        fn poll_ready(
            &mut self,
            _cx: &mut Context<'_>,
        ) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }
        fn call(&mut self, req: http::Request<B>) -> Self::Future {
            let inner = self.inner.clone();
            match req.uri().path() {
                "/greet.GreetService/Greet" => {
                    #[allow(non_camel_case_types)]
                    struct GreetSvc<T: GreetService>(pub Arc<T>);
                    impl<
                        T: GreetService,
                    > tonic::server::UnaryService<
                        ::proto_calculator::greet::GreetRequest,
                    > for GreetSvc<T> {
                        type Response = ::proto_calculator::greet::GreetResponse;
                        type Future = BoxFuture<
                            tonic::Response<Self::Response>,
                            tonic::Status,
                        >;
                        fn call(
                            &mut self,
                            request: tonic::Request<
                                ::proto_calculator::greet::GreetRequest,
                            >,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).greet(request).await };
                            Box::pin(fut)
                        }
                    }
                    let accept_compression_encodings = self.accept_compression_encodings;
                    let send_compression_encodings = self.send_compression_encodings;
                    let inner = self.inner.clone();
                    let fut = async move {
                        let inner = inner.0;
                        let method = GreetSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec)
                            .apply_compression_config(
                                accept_compression_encodings,
                                send_compression_encodings,
                            );
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/greet.GreetService/GreetManyTimes" => {
                    #[allow(non_camel_case_types)]
                    struct GreetManyTimesSvc<T: GreetService>(pub Arc<T>);
                    impl<
                        T: GreetService,
                    > tonic::server::ServerStreamingService<
                        ::proto_calculator::greet::GreetManyTimesRequest,
                    > for GreetManyTimesSvc<T> {
                        type Response = ::proto_calculator::greet::GreetManyTimesResponse;
                        type ResponseStream = T::GreetManyTimesStream;
                        type Future = BoxFuture<
                            tonic::Response<Self::ResponseStream>,
                            tonic::Status,
                        >;
                        fn call(
                            &mut self,
                            request: tonic::Request<
                                ::proto_calculator::greet::GreetManyTimesRequest,
                            >,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move {
                                (*inner).greet_many_times(request).await
                            };
                            Box::pin(fut)
                        }
                    }
                    let accept_compression_encodings = self.accept_compression_encodings;
                    let send_compression_encodings = self.send_compression_encodings;
                    let inner = self.inner.clone();
                    let fut = async move {
                        let inner = inner.0;
                        let method = GreetManyTimesSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec)
                            .apply_compression_config(
                                accept_compression_encodings,
                                send_compression_encodings,
                            );
                        let res = grpc.server_streaming(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/greet.GreetService/LongGreet" => {
                    #[allow(non_camel_case_types)]
                    struct LongGreetSvc<T: GreetService>(pub Arc<T>);
                    impl<
                        T: GreetService,
                    > tonic::server::ClientStreamingService<
                        ::proto_calculator::greet::LongGreetRequest,
                    > for LongGreetSvc<T> {
                        type Response = ::proto_calculator::greet::LongGreetResponse;
                        type Future = BoxFuture<
                            tonic::Response<Self::Response>,
                            tonic::Status,
                        >;
                        fn call(
                            &mut self,
                            request: tonic::Request<
                                tonic::Streaming<
                                    ::proto_calculator::greet::LongGreetRequest,
                                >,
                            >,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move {
                                (*inner).long_greet(request).await
                            };
                            Box::pin(fut)
                        }
                    }
                    let accept_compression_encodings = self.accept_compression_encodings;
                    let send_compression_encodings = self.send_compression_encodings;
                    let inner = self.inner.clone();
                    let fut = async move {
                        let inner = inner.0;
                        let method = LongGreetSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec)
                            .apply_compression_config(
                                accept_compression_encodings,
                                send_compression_encodings,
                            );
                        let res = grpc.client_streaming(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/greet.GreetService/GreetEveryone" => {
                    #[allow(non_camel_case_types)]
                    struct GreetEveryoneSvc<T: GreetService>(pub Arc<T>);
                    impl<
                        T: GreetService,
                    > tonic::server::StreamingService<
                        ::proto_calculator::greet::GreetEveryoneRequest,
                    > for GreetEveryoneSvc<T> {
                        type Response = ::proto_calculator::greet::GreetEveryoneResponse;
                        type ResponseStream = T::GreetEveryoneStream;
                        type Future = BoxFuture<
                            tonic::Response<Self::ResponseStream>,
                            tonic::Status,
                        >;
                        fn call(
                            &mut self,
                            request: tonic::Request<
                                tonic::Streaming<
                                    ::proto_calculator::greet::GreetEveryoneRequest,
                                >,
                            >,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).greet_everyone(request).await };
                            Box::pin(fut)
                        }
                    }
                    let accept_compression_encodings = self.accept_compression_encodings;
                    let send_compression_encodings = self.send_compression_encodings;
                    let inner = self.inner.clone();
                    let fut = async move {
                        let inner = inner.0;
                        let method = GreetEveryoneSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec)
                            .apply_compression_config(
                                accept_compression_encodings,
                                send_compression_encodings,
                            );
                        let res = grpc.streaming(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                _ => {
                    Box::pin(async move {
                        Ok(
                            http::Response::builder()
                                .status(200)
                                .header("grpc-status", "12")
                                .header("content-type", "application/grpc")
                                .body(empty_body())
                                .unwrap(),
                        )
                    })
                }
            }
        }
    }
    impl<T: GreetService> Clone for GreetServiceServer<T> {
        fn clone(&self) -> Self {
            let inner = self.inner.clone();
            Self {
                inner,
                accept_compression_encodings: self.accept_compression_encodings,
                send_compression_encodings: self.send_compression_encodings,
            }
        }
    }
    impl<T: GreetService> Clone for _Inner<T> {
        fn clone(&self) -> Self {
            Self(self.0.clone())
        }
    }
    impl<T: std::fmt::Debug> std::fmt::Debug for _Inner<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self.0)
        }
    }
    impl<T: GreetService> tonic::server::NamedService for GreetServiceServer<T> {
        const NAME: &'static str = "greet.GreetService";
    }
}
