/// Generated client implementations.
#[cfg(feature = "calculator_client")]
pub mod calculator_service_client {
    #![allow(unused_variables, dead_code, missing_docs, clippy::let_unit_value)]
    use tonic::codegen::*;
    use tonic::codegen::http::Uri;
    /// CalculatorService offers arithmetic over unary and streaming RPCs.
    #[derive(Debug, Clone)]
    pub struct CalculatorServiceClient<T> {
        inner: tonic::client::Grpc<T>,
    }
    impl CalculatorServiceClient<tonic::transport::Channel> {
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
    impl<T> CalculatorServiceClient<T>
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
        ) -> CalculatorServiceClient<InterceptedService<T, F>>
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
            CalculatorServiceClient::new(InterceptedService::new(inner, interceptor))
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
        /// Sum returns the sum of two numbers.
        pub async fn sum(
            &mut self,
            request: impl tonic::IntoRequest<::proto_calculator::calculator::SumRequest>,
        ) -> Result<
            tonic::Response<::proto_calculator::calculator::SumResponse>,
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
                "/calculator.CalculatorService/Sum",
            );
            self.inner.unary(request.into_request(), path, codec).await
        }
        /// PrimeNumberDecomposition streams the prime factors of a number.
        pub async fn prime_number_decomposition(
            &mut self,
            request: impl tonic::IntoRequest<
                ::proto_calculator::calculator::PrimeNumberDecompositionRequest,
            >,
        ) -> Result<
            tonic::Response<
                tonic::codec::Streaming<
                    ::proto_calculator::calculator::PrimeNumberDecompositionResponse,
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
                "/calculator.CalculatorService/PrimeNumberDecomposition",
            );
            self.inner.server_streaming(request.into_request(), path, codec).await
        }
        /// ComputeAverage returns the average of a stream of numbers.
        pub async fn compute_average(
            &mut self,
            request: impl tonic::IntoStreamingRequest<
                Message = ::proto_calculator::calculator::ComputeAverageRequest,
            >,
        ) -> Result<
            tonic::Response<::proto_calculator::calculator::ComputeAverageResponse>,
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
                "/calculator.CalculatorService/ComputeAverage",
            );
            self.inner
                .client_streaming(request.into_streaming_request(), path, codec)
                .await
        }
        /// FindMaximum responds with each number of its request stream
        /// which is a new maximum.
        pub async fn find_maximum(
            &mut self,
            request: impl tonic::IntoStreamingRequest<
                Message = ::proto_calculator::calculator::FindMaximumRequest,
            >,
        ) -> Result<
            tonic::Response<
                tonic::codec::Streaming<
                    ::proto_calculator::calculator::FindMaximumResponse,
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
                "/calculator.CalculatorService/FindMaximum",
            );
            self.inner.streaming(request.into_streaming_request(), path, codec).await
        }
    }
}
/// Generated server implementations.
#[cfg(feature = "calculator_server")]
pub mod calculator_service_server {
    #![allow(unused_variables, dead_code, missing_docs, clippy::let_unit_value)]
    use tonic::codegen::*;
    ///Generated trait containing gRPC methods that should be implemented for use with CalculatorServiceServer.
    #[async_trait]
    pub trait CalculatorService: Send + Sync + 'static {
        /// Sum returns the sum of two numbers.
        async fn sum(
            &self,
            request: tonic::Request<::proto_calculator::calculator::SumRequest>,
        ) -> Result<
            tonic::Response<::proto_calculator::calculator::SumResponse>,
            tonic::Status,
        >;
        ///Server streaming response type for the PrimeNumberDecomposition method.
        type PrimeNumberDecompositionStream: tokio_stream::Stream<
                Item = Result<
                    ::proto_calculator::calculator::PrimeNumberDecompositionResponse,
                    tonic::Status,
                >,
            >
            + Send
            + 'static;
        /// PrimeNumberDecomposition streams the prime factors of a number.
        async fn prime_number_decomposition(
            &self,
            request: tonic::Request<
                ::proto_calculator::calculator::PrimeNumberDecompositionRequest,
            >,
        ) -> Result<
            tonic::Response<Self::PrimeNumberDecompositionStream>,
            tonic::Status,
        >;
        /// ComputeAverage returns the average of a stream of numbers.
        async fn compute_average(
            &self,
            request: tonic::Request<
                tonic::Streaming<::proto_calculator::calculator::ComputeAverageRequest>,
            >,
        ) -> Result<
            tonic::Response<::proto_calculator::calculator::ComputeAverageResponse>,
            tonic::Status,
        >;
        ///Server streaming response type for the FindMaximum method.
        type FindMaximumStream: tokio_stream::Stream<
                Item = Result<
                    ::proto_calculator::calculator::FindMaximumResponse,
                    tonic::Status,
                >,
            >
            + Send
            + 'static;
        /// FindMaximum responds with each number of its request stream
        /// which is a new maximum.
        async fn find_maximum(
            &self,
            request: tonic::Request<
                tonic::Streaming<::proto_calculator::calculator::FindMaximumRequest>,
            >,
        ) -> Result<tonic::Response<Self::FindMaximumStream>, tonic::Status>;
    }
    /// CalculatorService offers arithmetic over unary and streaming RPCs.
    #[derive(Debug)]
    pub struct CalculatorServiceServer<T: CalculatorService> {
        inner: _Inner<T>,
        accept_compression_encodings: EnabledCompressionEncodings,
        send_compression_encodings: EnabledCompressionEncodings,
    }
    struct _Inner<T>(Arc<T>);
    impl<T: CalculatorService> CalculatorServiceServer<T> {
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
    impl<T, B> tonic::codegen::Service<http::Request<B>> for CalculatorServiceServer<T>
    where
        T: CalculatorService,
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
                "/calculator.CalculatorService/Sum" => {
                    #[allow(non_camel_case_types)]
                    struct SumSvc<T: CalculatorService>(pub Arc<T>);
                    impl<
                        T: CalculatorService,
                    > tonic::server::UnaryService<
                        ::proto_calculator::calculator::SumRequest,
                    > for SumSvc<T> {
                        type Response = ::proto_calculator::calculator::SumResponse;
                        type Future = BoxFuture<
                            tonic::Response<Self::Response>,
                            tonic::Status,
                        >;
                        fn call(
                            &mut self,
                            request: tonic::Request<
                                ::proto_calculator::calculator::SumRequest,
                            >,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).sum(request).await };
                            Box::pin(fut)
                        }
                    }
                    let accept_compression_encodings = self.accept_compression_encodings;
                    let send_compression_encodings = self.send_compression_encodings;
                    let inner = self.inner.clone();
                    let fut = async move {
                        let inner = inner.0;
                        let method = SumSvc(inner);
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
                "/calculator.CalculatorService/PrimeNumberDecomposition" => {
                    #[allow(non_camel_case_types)]
                    struct PrimeNumberDecompositionSvc<T: CalculatorService>(pub Arc<T>);
                    impl<
                        T: CalculatorService,
                    > tonic::server::ServerStreamingService<
                        ::proto_calculator::calculator::PrimeNumberDecompositionRequest,
                    > for PrimeNumberDecompositionSvc<T> {
                        type Response = ::proto_calculator::calculator::PrimeNumberDecompositionResponse;
                        type ResponseStream = T::PrimeNumberDecompositionStream;
                        type Future = BoxFuture<
                            tonic::Response<Self::ResponseStream>,
                            tonic::Status,
                        >;
                        fn call(
                            &mut self,
                            request: tonic::Request<
                                ::proto_calculator::calculator::PrimeNumberDecompositionRequest,
                            >,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move {
                                (*inner).prime_number_decomposition(request).await
                            };
                            Box::pin(fut)
                        }
                    }
                    let accept_compression_encodings = self.accept_compression_encodings;
                    let send_compression_encodings = self.send_compression_encodings;
                    let inner = self.inner.clone();
                    let fut = async move {
                        let inner = inner.0;
                        let method = PrimeNumberDecompositionSvc(inner);
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
                "/calculator.CalculatorService/ComputeAverage" => {
                    #[allow(non_camel_case_types)]
                    struct ComputeAverageSvc<T: CalculatorService>(pub Arc<T>);
                    impl<
                        T: CalculatorService,
                    > tonic::server::ClientStreamingService<
                        ::proto_calculator::calculator::ComputeAverageRequest,
                    > for ComputeAverageSvc<T> {
                        type Response = ::proto_calculator::calculator::ComputeAverageResponse;
                        type Future = BoxFuture<
                            tonic::Response<Self::Response>,
                            tonic::Status,
                        >;
                        fn call(
                            &mut self,
                            request: tonic::Request<
                                tonic::Streaming<
                                    ::proto_calculator::calculator::ComputeAverageRequest,
                                >,
                            >,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move {
                                (*inner).compute_average(request).await
                            };
                            Box::pin(fut)
                        }
                    }
                    let accept_compression_encodings = self.accept_compression_encodings;
                    let send_compression_encodings = self.send_compression_encodings;
                    let inner = self.inner.clone();
                    let fut = async move {
                        let inner = inner.0;
                        let method = ComputeAverageSvc(inner);
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
                "/calculator.CalculatorService/FindMaximum" => {
                    #[allow(non_camel_case_types)]
                    struct FindMaximumSvc<T: CalculatorService>(pub Arc<T>);
                    impl<
                        T: CalculatorService,
                    > tonic::server::StreamingService<
                        ::proto_calculator::calculator::FindMaximumRequest,
                    > for FindMaximumSvc<T> {
                        type Response = ::proto_calculator::calculator::FindMaximumResponse;
                        type ResponseStream = T::FindMaximumStream;
                        type Future = BoxFuture<
                            tonic::Response<Self::ResponseStream>,
                            tonic::Status,
                        >;
                        fn call(
                            &mut self,
                            request: tonic::Request<
                                tonic::Streaming<
                                    ::proto_calculator::calculator::FindMaximumRequest,
                                >,
                            >,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).find_maximum(request).await };
                            Box::pin(fut)
                        }
                    }
                    let accept_compression_encodings = self.accept_compression_encodings;
                    let send_compression_encodings = self.send_compression_encodings;
                    let inner = self.inner.clone();
                    let fut = async move {
                        let inner = inner.0;
                        let method = FindMaximumSvc(inner);
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
    impl<T: CalculatorService> Clone for CalculatorServiceServer<T> {
        fn clone(&self) -> Self {
            let inner = self.inner.clone();
            Self {
                inner,
                accept_compression_encodings: self.accept_compression_encodings,
                send_compression_encodings: self.send_compression_encodings,
            }
        }
    }
    impl<T: CalculatorService> Clone for _Inner<T> {
        fn clone(&self) -> Self {
            Self(self.0.clone())
        }
    }
    impl<T: std::fmt::Debug> std::fmt::Debug for _Inner<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self.0)
        }
    }
    impl<T: CalculatorService> tonic::server::NamedService for CalculatorServiceServer<T> {
        const NAME: &'static str = "calculator.CalculatorService";
    }
}
