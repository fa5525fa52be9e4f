use calculator::{Client, GrpcDialer, Method, Server, ServerConfig};
use duplex::CallStatus;
use proto_calculator::calculator::{SumRequest, SumResponse};
use std::time::Duration;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::Code;

struct Fixture {
    server: Server,
    address: String,
    serving: tokio::task::JoinHandle<Result<(), tonic::transport::Error>>,
}

async fn start(greet_interval: Duration) -> Fixture {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap().to_string();

    let server = Server::new(ServerConfig {
        greet_interval,
        ..Default::default()
    });
    let serving = tokio::spawn({
        let server = server.clone();
        async move { server.serve(listener, std::future::pending()).await }
    });

    Fixture {
        server,
        address,
        serving,
    }
}

impl Fixture {
    fn client(&self) -> Client<GrpcDialer> {
        Client::new(GrpcDialer::new(&self.address).unwrap())
    }

    async fn stop(self) {
        self.server.shutdown();
        self.serving.await.unwrap().unwrap();
        // Every dispatched call finished before serve returned.
        assert_eq!(self.server.active_calls(), 0);
    }
}

fn is_prime(n: i64) -> bool {
    n >= 2 && (2i64..).take_while(|&d| d * d <= n).all(|d| n % d != 0)
}

// `factors` must be primes in non-decreasing order, whose product is `number`.
fn assert_decomposition(number: i64, factors: &[i64]) {
    assert!(factors.windows(2).all(|w| w[0] <= w[1]), "{factors:?}");
    assert!(factors.iter().all(|&f| is_prime(f)), "{factors:?}");
    assert_eq!(factors.iter().product::<i64>(), number);
}

#[tokio::test]
async fn test_calculator_over_tcp() {
    let fixture = start(Duration::ZERO).await;
    let client = fixture.client();

    assert_eq!(client.sum(3, 10).await.unwrap(), 13);

    let factors = client
        .prime_number_decomposition(12390392840)
        .await
        .unwrap();
    assert_decomposition(12390392840, &factors);

    assert_eq!(
        client.compute_average(vec![3, 5, 9, 54, 23]).await.unwrap(),
        18.8
    );

    let outcome = client.find_maximum(vec![3, 5, 9, 54, 23]).await;
    assert_eq!(outcome.into_result().unwrap(), vec![3, 5, 9, 54]);

    let outcome = client.find_maximum(vec![-5, -3, -10]).await;
    assert_eq!(outcome.into_result().unwrap(), vec![-5, -3]);

    fixture.stop().await;
}

#[tokio::test]
async fn test_greet_over_tcp() {
    let fixture = start(Duration::from_millis(1)).await;
    let client = fixture.client();

    assert_eq!(client.greet("Stephane").await.unwrap(), "Hello Stephane");

    let results = client.greet_many_times("Stephane").await.unwrap();
    assert_eq!(results.len(), 10);
    assert_eq!(results[0], "Hello Stephane number 0");
    assert_eq!(results[9], "Hello Stephane number 9");

    let names: Vec<String> = ["Stephane", "John", "Lucy", "Mark", "Piper"]
        .into_iter()
        .map(String::from)
        .collect();

    insta::assert_snapshot!(
        client.long_greet(names.clone()).await.unwrap(),
        @"Hello Stephane! Hello John! Hello Lucy! Hello Mark! Hello Piper! "
    );

    let results = client.greet_everyone(names).await.unwrap();
    insta::assert_debug_snapshot!(results, @r###"
    [
        "Hello Stephane! ",
        "Hello Stephane! Hello John! ",
        "Hello Stephane! Hello John! Hello Lucy! ",
        "Hello Stephane! Hello John! Hello Lucy! Hello Mark! ",
        "Hello Stephane! Hello John! Hello Lucy! Hello Mark! Hello Piper! ",
    ]
    "###);

    fixture.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_bidirectional_calls() {
    let fixture = start(Duration::ZERO).await;

    let mut calls = Vec::new();
    for offset in 0..8 {
        let client = fixture.client();
        calls.push(tokio::spawn(async move {
            let numbers: Vec<i32> = (0..500).map(|n| n + offset).collect();
            client.find_maximum(numbers).await
        }));
    }
    for (offset, call) in calls.into_iter().enumerate() {
        let maxima = call.await.unwrap().into_result().unwrap();
        let expect: Vec<i32> = (0..500).map(|n| n + offset as i32).collect();
        assert_eq!(maxima, expect);
    }

    fixture.stop().await;
}

#[tokio::test]
async fn test_paced_calls_over_tcp() {
    let fixture = start(Duration::ZERO).await;
    let client = fixture.client().with_pace(Duration::from_millis(5));

    let outcome = client.find_maximum(vec![1, 5, 3, 6, 2, 20]).await;
    assert_eq!(outcome.into_result().unwrap(), vec![1, 5, 6, 20]);

    assert_eq!(
        client.compute_average(vec![1, 2, 3, 4]).await.unwrap(),
        2.5
    );

    fixture.stop().await;
}

#[tokio::test]
async fn test_errors_over_tcp() {
    let fixture = start(Duration::ZERO).await;
    let client = fixture.client();

    let err = client.compute_average(Vec::new()).await.unwrap_err();
    assert_eq!(err.code(), Code::InvalidArgument);
    assert_eq!(err.message(), "cannot compute the average of zero numbers");

    let err = client.prime_number_decomposition(-4).await.unwrap_err();
    assert_eq!(err.code(), Code::InvalidArgument);

    let err = client.sum(i64::MAX, 1).await.unwrap_err();
    assert_eq!(err.code(), Code::InvalidArgument);

    // The server remains healthy after failed calls.
    assert_eq!(client.sum(-1, 1).await.unwrap(), 0);

    fixture.stop().await;
}

#[tokio::test]
async fn test_unknown_method_over_tcp() {
    let fixture = start(Duration::ZERO).await;

    let channel = tonic::transport::Endpoint::from_shared(format!("http://{}", fixture.address))
        .unwrap()
        .connect()
        .await
        .unwrap();
    let mut grpc = tonic::client::Grpc::new(channel);
    grpc.ready().await.unwrap();

    let err = grpc
        .unary(
            tonic::Request::new(SumRequest::default()),
            PathAndQuery::from_static("/calculator.CalculatorService/SquareRoot"),
            tonic::codec::ProstCodec::<SumRequest, SumResponse>::default(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), Code::Unimplemented);

    // The server remains healthy.
    assert_eq!(fixture.client().sum(1, 1).await.unwrap(), 2);

    fixture.stop().await;
}

#[tokio::test]
async fn test_shutdown_fails_calls_in_progress() {
    let fixture = start(Duration::from_secs(3600)).await;
    let client = fixture.client();

    let (first_tx, first_rx) = tokio::sync::oneshot::channel();
    let mut first_tx = Some(first_tx);

    let request = proto_calculator::greet::GreetManyTimesRequest {
        greeting: Some(proto_calculator::greet::Greeting::new("Ada")),
    };
    let call = tokio::spawn(async move {
        client
            .call(
                Method::GreetManyTimes,
                Some(request),
                move |_: &proto_calculator::greet::GreetManyTimesResponse| {
                    if let Some(first_tx) = first_tx.take() {
                        _ = first_tx.send(());
                    }
                },
            )
            .await
    });

    // Shut down once the first greeting has arrived and the handler is waiting.
    () = first_rx.await.unwrap();
    fixture.stop().await;

    let outcome = call.await.unwrap();
    assert_eq!(outcome.responses.len(), 1);

    let CallStatus::Failed(status) = outcome.status else {
        panic!("expected a failure, got {:?}", outcome.status);
    };
    assert_eq!(status.code(), Code::Unavailable);
    assert_eq!(status.message(), "server is shutting down");
}

#[tokio::test]
async fn test_dial_failure() {
    // Bind and immediately drop a listener, to find a port which refuses connections.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap().to_string();
    std::mem::drop(listener);

    let err = Client::new(GrpcDialer::new(&address).unwrap())
        .sum(1, 2)
        .await
        .unwrap_err();
    assert_eq!(err.code(), Code::Unavailable);
}
