use crate::{Method, Server};
use duplex::grpc::{self, RequestStream};
use duplex::{CallStatus, Endpoint, Outcome};
use proto_calculator::{calculator, greet};
use proto_grpc::calculator::calculator_service_client::CalculatorServiceClient;
use proto_grpc::greet::greet_service_client::GreetServiceClient;
use std::time::Duration;
use tonic::transport::Channel;
use tonic::Status;
use tracing::Instrument;

/// Dial opens calls of a Method.
#[async_trait::async_trait]
pub trait Dial: Send + Sync {
    /// Open a call of `method`, returning the caller's Endpoint.
    async fn dial(&self, method: Method) -> tonic::Result<Endpoint>;
}

/// A Server is dialed in-process: each call is dispatched on a spawned task.
#[async_trait::async_trait]
impl Dial for Server {
    async fn dial(&self, method: Method) -> tonic::Result<Endpoint> {
        if self.is_shut_down() {
            return Err(Status::unavailable("server is shut down"));
        }
        let (client, endpoint) = duplex::call(self.config().buffer);
        self.spawn_dispatch(method, endpoint);
        Ok(client)
    }
}

/// GrpcDialer dials calls of a remote server over a shared gRPC channel.
#[derive(Debug, Clone)]
pub struct GrpcDialer {
    channel: Channel,
    buffer: usize,
}

impl GrpcDialer {
    /// Build a GrpcDialer of `address`, such as "127.0.0.1:50051" or
    /// "http://localhost:50051". The channel connects upon its first call,
    /// and must be built within a Tokio runtime.
    pub fn new(address: &str) -> Result<Self, tonic::transport::Error> {
        let uri = if address.contains("://") {
            address.to_string()
        } else {
            format!("http://{address}")
        };
        let channel = tonic::transport::Endpoint::from_shared(uri)?.connect_lazy();

        Ok(Self {
            channel,
            buffer: duplex::CHANNEL_BUFFER,
        })
    }
}

#[async_trait::async_trait]
impl Dial for GrpcDialer {
    async fn dial(&self, method: Method) -> tonic::Result<Endpoint> {
        let (client, remote) = duplex::call(self.buffer);
        tokio::spawn(
            invoke(self.channel.clone(), method, remote)
                .instrument(tracing::debug_span!("rpc", %method)),
        );
        Ok(client)
    }
}

// Drive the call of `endpoint` through an RPC of `method` over `channel`.
async fn invoke(channel: Channel, method: Method, endpoint: Endpoint) {
    let mut calculator_client = CalculatorServiceClient::new(channel.clone());
    let mut greet_client = GreetServiceClient::new(channel);

    match method {
        Method::Sum => {
            grpc::unary(endpoint, move |request: calculator::SumRequest| async move {
                calculator_client.sum(request).await
            })
            .await
        }
        Method::PrimeNumberDecomposition => {
            grpc::server_streaming(
                endpoint,
                move |request: calculator::PrimeNumberDecompositionRequest| async move {
                    calculator_client.prime_number_decomposition(request).await
                },
            )
            .await
        }
        Method::ComputeAverage => {
            grpc::client_streaming(
                endpoint,
                move |requests: RequestStream<calculator::ComputeAverageRequest>| async move {
                    calculator_client.compute_average(requests).await
                },
            )
            .await
        }
        Method::FindMaximum => {
            grpc::streaming(
                endpoint,
                move |requests: RequestStream<calculator::FindMaximumRequest>| async move {
                    calculator_client.find_maximum(requests).await
                },
            )
            .await
        }
        Method::Greet => {
            grpc::unary(endpoint, move |request: greet::GreetRequest| async move {
                greet_client.greet(request).await
            })
            .await
        }
        Method::GreetManyTimes => {
            grpc::server_streaming(
                endpoint,
                move |request: greet::GreetManyTimesRequest| async move {
                    greet_client.greet_many_times(request).await
                },
            )
            .await
        }
        Method::LongGreet => {
            grpc::client_streaming(
                endpoint,
                move |requests: RequestStream<greet::LongGreetRequest>| async move {
                    greet_client.long_greet(requests).await
                },
            )
            .await
        }
        Method::GreetEveryone => {
            grpc::streaming(
                endpoint,
                move |requests: RequestStream<greet::GreetEveryoneRequest>| async move {
                    greet_client.greet_everyone(requests).await
                },
            )
            .await
        }
    }
}

/// Client invokes the methods of the calculator and greet services.
#[derive(Debug, Clone)]
pub struct Client<D> {
    dialer: D,
    pace: Option<Duration>,
}

impl<D: Dial> Client<D> {
    pub fn new(dialer: D) -> Self {
        Self { dialer, pace: None }
    }

    /// Wait `pace` between each request sent by the client's streaming calls.
    pub fn with_pace(mut self, pace: Duration) -> Self {
        self.pace = (!pace.is_zero()).then_some(pace);
        self
    }

    /// Invoke `method` by concurrently sending `requests` while receiving
    /// responses, each of which is passed to `on_response` as it arrives.
    pub async fn call<Req, Resp, I, F>(
        &self,
        method: Method,
        requests: I,
        on_response: F,
    ) -> Outcome<Resp>
    where
        Req: prost::Message + 'static,
        Resp: prost::Message + Default + 'static,
        I: IntoIterator<Item = Req>,
        I::IntoIter: Send + 'static,
        F: FnMut(&Resp) + Send + 'static,
    {
        let endpoint = match self.dialer.dial(method).await {
            Ok(endpoint) => endpoint,
            Err(status) => {
                return Outcome {
                    status: CallStatus::Failed(status),
                    responses: Vec::new(),
                }
            }
        };
        let (tx, rx) = endpoint.split::<Req, Resp>();

        duplex::drive_with(requests, self.pace, tx, rx, on_response)
            .instrument(tracing::debug_span!("call", %method))
            .await
    }

    pub async fn sum(&self, first_number: i64, second_number: i64) -> tonic::Result<i64> {
        let request = calculator::SumRequest {
            first_number,
            second_number,
        };
        let response: calculator::SumResponse = self.unary(Method::Sum, Some(request)).await?;
        Ok(response.sum_result)
    }

    pub async fn prime_number_decomposition(&self, number: i64) -> tonic::Result<Vec<i64>> {
        let request = calculator::PrimeNumberDecompositionRequest { number };
        let responses: Vec<calculator::PrimeNumberDecompositionResponse> = self
            .call(Method::PrimeNumberDecomposition, Some(request), |_: &_| ())
            .await
            .into_result()?;

        Ok(responses.into_iter().map(|r| r.prime_factor).collect())
    }

    pub async fn compute_average(&self, numbers: Vec<i32>) -> tonic::Result<f64> {
        let requests = numbers
            .into_iter()
            .map(|number| calculator::ComputeAverageRequest { number });
        let response: calculator::ComputeAverageResponse =
            self.unary(Method::ComputeAverage, requests).await?;
        Ok(response.average)
    }

    /// Stream `numbers` to FindMaximum. Maxima received before a failure
    /// are included in the Outcome.
    pub async fn find_maximum(&self, numbers: Vec<i32>) -> Outcome<i32> {
        let requests = numbers
            .into_iter()
            .map(|number| calculator::FindMaximumRequest { number });
        let outcome: Outcome<calculator::FindMaximumResponse> = self
            .call(Method::FindMaximum, requests, |_: &_| ())
            .await;

        Outcome {
            status: outcome.status,
            responses: outcome.responses.into_iter().map(|r| r.maximum).collect(),
        }
    }

    pub async fn greet(&self, first_name: &str) -> tonic::Result<String> {
        let request = greet::GreetRequest {
            greeting: Some(greet::Greeting::new(first_name)),
        };
        let response: greet::GreetResponse = self.unary(Method::Greet, Some(request)).await?;
        Ok(response.result)
    }

    pub async fn greet_many_times(&self, first_name: &str) -> tonic::Result<Vec<String>> {
        let request = greet::GreetManyTimesRequest {
            greeting: Some(greet::Greeting::new(first_name)),
        };
        let responses: Vec<greet::GreetManyTimesResponse> = self
            .call(Method::GreetManyTimes, Some(request), |_: &_| ())
            .await
            .into_result()?;

        Ok(responses.into_iter().map(|r| r.result).collect())
    }

    pub async fn long_greet(&self, first_names: Vec<String>) -> tonic::Result<String> {
        let requests = first_names
            .into_iter()
            .map(|first_name| greet::LongGreetRequest {
                greeting: Some(greet::Greeting::new(first_name)),
            });
        let response: greet::LongGreetResponse = self.unary(Method::LongGreet, requests).await?;
        Ok(response.result)
    }

    pub async fn greet_everyone(&self, first_names: Vec<String>) -> tonic::Result<Vec<String>> {
        let requests = first_names
            .into_iter()
            .map(|first_name| greet::GreetEveryoneRequest {
                greeting: Some(greet::Greeting::new(first_name)),
            });
        let responses: Vec<greet::GreetEveryoneResponse> = self
            .call(Method::GreetEveryone, requests, |_: &_| ())
            .await
            .into_result()?;

        Ok(responses.into_iter().map(|r| r.result).collect())
    }

    // Invoke a method having exactly one response.
    async fn unary<Req, Resp, I>(&self, method: Method, requests: I) -> tonic::Result<Resp>
    where
        Req: prost::Message + 'static,
        Resp: prost::Message + Default + 'static,
        I: IntoIterator<Item = Req>,
        I::IntoIter: Send + 'static,
    {
        let mut responses = self
            .call(method, requests, |_: &Resp| ())
            .await
            .into_result()?;

        match (responses.pop(), responses.is_empty()) {
            (Some(response), true) => Ok(response),
            (Some(_), false) => Err(Status::internal(format!(
                "{method} returned {} responses, but exactly one was expected",
                responses.len() + 1
            ))),
            (None, _) => Err(Status::internal(format!(
                "{method} completed without a response"
            ))),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Client, Dial, GrpcDialer};
    use crate::{Method, Server, ServerConfig};
    use duplex::CallStatus;
    use std::time::Duration;
    use tonic::Code;

    fn in_process() -> Client<Server> {
        Client::new(Server::new(ServerConfig {
            greet_interval: Duration::ZERO,
            ..Default::default()
        }))
    }

    #[tokio::test]
    async fn test_calculator_methods() {
        let client = in_process();

        assert_eq!(client.sum(3, 10).await.unwrap(), 13);
        assert_eq!(
            client.prime_number_decomposition(120).await.unwrap(),
            vec![2, 2, 2, 3, 5]
        );
        assert_eq!(
            client.compute_average(vec![1, 2, 3, 4]).await.unwrap(),
            2.5
        );

        let outcome = client.find_maximum(vec![3, 5, 9, 54, 23]).await;
        assert!(outcome.is_completed());
        assert_eq!(outcome.responses, vec![3, 5, 9, 54]);
    }

    #[tokio::test]
    async fn test_greet_methods() {
        let client = in_process();

        assert_eq!(client.greet("Stephane").await.unwrap(), "Hello Stephane");
        assert_eq!(
            client.greet_many_times("Ada").await.unwrap().len(),
            crate::greet::GREET_MANY_TIMES
        );

        let names = vec!["Stephane".to_string(), "John".to_string()];
        assert_eq!(
            client.long_greet(names.clone()).await.unwrap(),
            "Hello Stephane! Hello John! "
        );
        assert_eq!(
            client.greet_everyone(names).await.unwrap(),
            vec!["Hello Stephane! ", "Hello Stephane! Hello John! "]
        );
    }

    #[tokio::test]
    async fn test_paced_maximum() {
        let client = in_process().with_pace(Duration::from_millis(2));

        let outcome = client.find_maximum(vec![-5, -3, -10, -1]).await;
        assert_eq!(outcome.into_result().unwrap(), vec![-5, -3, -1]);
    }

    #[tokio::test]
    async fn test_failures_are_reported() {
        let client = in_process();

        let err = client.compute_average(Vec::new()).await.unwrap_err();
        assert_eq!(err.code(), Code::InvalidArgument);

        let err = client.prime_number_decomposition(0).await.unwrap_err();
        assert_eq!(err.code(), Code::InvalidArgument);

        let err = client.sum(i64::MAX, i64::MAX).await.unwrap_err();
        assert_eq!(err.code(), Code::InvalidArgument);
    }

    #[tokio::test]
    async fn test_dial_after_shutdown() {
        let server = Server::new(ServerConfig::default());
        server.shutdown();

        let err = server.dial(Method::Sum).await.unwrap_err();
        assert_eq!(err.code(), Code::Unavailable);

        let outcome = Client::new(server).find_maximum(vec![1, 2, 3]).await;
        let CallStatus::Failed(status) = outcome.status else {
            panic!("expected a failure, got {:?}", outcome.status);
        };
        assert_eq!(status.message(), "server is shut down");
    }

    #[tokio::test]
    async fn test_grpc_dialer_addresses() {
        assert!(GrpcDialer::new("127.0.0.1:50051").is_ok());
        assert!(GrpcDialer::new("http://localhost:50051").is_ok());
        assert!(GrpcDialer::new("not an address").is_err());
    }
}
