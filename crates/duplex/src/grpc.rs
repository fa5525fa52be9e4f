//! Bridges calls onto gRPC.
//!
//! A served gRPC call becomes an [`Endpoint`] for its handler through [`accept`],
//! which also returns the stream of responses that tonic sends to the client.
//!
//! A dialed call is driven from the caller's remote [`Endpoint`] by one of
//! [`unary`], [`server_streaming`], [`client_streaming`] or [`streaming`],
//! each of which invokes the RPC through a generated tonic client.
//! If the call fails while its RPC is in flight, the RPC is dropped,
//! which cancels it on the server.

use crate::channel::{self, Endpoint, Receiver, Sender};
use futures::stream::BoxStream;
use futures::{Stream, StreamExt};
use std::future::Future;
use tonic::Status;

/// ResponseStream is the stream of responses of a served call.
pub type ResponseStream<M> = BoxStream<'static, tonic::Result<M>>;

/// RequestStream is the stream of requests of a dialed call.
pub type RequestStream<M> = BoxStream<'static, M>;

/// Accept a served call having `requests`. Returns the Endpoint to be served
/// by the call's handler, and the stream of responses which it sends.
///
/// Dropping the response stream before it ends closes the call,
/// as happens when the client goes away.
pub fn accept<Req, Resp, S>(requests: S, buffer: usize) -> (Endpoint, ResponseStream<Resp>)
where
    Req: prost::Message + 'static,
    Resp: prost::Message + Default + 'static,
    S: Stream<Item = tonic::Result<Req>> + Send + 'static,
{
    let (local, remote) = channel::call(buffer);
    let (request_tx, response_rx) = remote.split::<Req, Resp>();

    tokio::spawn(forward_requests(requests, request_tx));

    let responses = futures::stream::unfold(
        CloseOnDrop {
            rx: response_rx,
            finished: false,
        },
        |mut state| async move {
            if state.finished {
                return None;
            }
            match state.rx.receive().await {
                Ok(Some(response)) => Some((Ok(response), state)),
                Ok(None) => {
                    state.finished = true;
                    None
                }
                Err(status) => {
                    state.finished = true;
                    Some((Err(status), state))
                }
            }
        },
    );

    (local, responses.boxed())
}

/// Reduce the responses of a served call to its only response.
pub async fn unary_response<M>(mut responses: ResponseStream<M>) -> tonic::Result<M> {
    let Some(response) = responses.next().await.transpose()? else {
        return Err(Status::internal("call completed without a response"));
    };
    match responses.next().await {
        None => Ok(response),
        Some(Err(status)) => Err(status),
        Some(Ok(_)) => Err(Status::internal("call sent more than one response")),
    }
}

/// Drive a dialed call having one request and one response.
pub async fn unary<Req, Resp, F, Fut>(endpoint: Endpoint, invoke: F)
where
    Req: prost::Message + Default,
    Resp: prost::Message,
    F: FnOnce(Req) -> Fut,
    Fut: Future<Output = tonic::Result<tonic::Response<Resp>>>,
{
    let (responses, mut requests) = endpoint.split::<Resp, Req>();
    let tx = responses.clone();

    complete(responses, async move {
        let request = requests.receive_unary().await?;
        let response = invoke(request).await?;
        tx.send(response.into_inner()).await
    })
    .await
}

/// Drive a dialed call having one request and a stream of responses.
pub async fn server_streaming<Req, Resp, F, Fut>(endpoint: Endpoint, invoke: F)
where
    Req: prost::Message + Default,
    Resp: prost::Message + Default,
    F: FnOnce(Req) -> Fut,
    Fut: Future<Output = tonic::Result<tonic::Response<tonic::Streaming<Resp>>>>,
{
    let (responses, mut requests) = endpoint.split::<Resp, Req>();
    let tx = responses.clone();

    complete(responses, async move {
        let request = requests.receive_unary().await?;
        let response = invoke(request).await?;
        forward_responses(response.into_inner(), tx).await
    })
    .await
}

/// Drive a dialed call having a stream of requests and one response.
pub async fn client_streaming<Req, Resp, F, Fut>(endpoint: Endpoint, invoke: F)
where
    Req: prost::Message + Default + 'static,
    Resp: prost::Message,
    F: FnOnce(RequestStream<Req>) -> Fut,
    Fut: Future<Output = tonic::Result<tonic::Response<Resp>>>,
{
    let (responses, requests) = endpoint.split::<Resp, Req>();
    let tx = responses.clone();

    complete(responses, async move {
        let response = invoke(request_stream(requests)).await?;
        tx.send(response.into_inner()).await
    })
    .await
}

/// Drive a dialed call having streams of both requests and responses.
pub async fn streaming<Req, Resp, F, Fut>(endpoint: Endpoint, invoke: F)
where
    Req: prost::Message + Default + 'static,
    Resp: prost::Message + Default,
    F: FnOnce(RequestStream<Req>) -> Fut,
    Fut: Future<Output = tonic::Result<tonic::Response<tonic::Streaming<Resp>>>>,
{
    let (responses, requests) = endpoint.split::<Resp, Req>();
    let tx = responses.clone();

    complete(responses, async move {
        let response = invoke(request_stream(requests)).await?;
        forward_responses(response.into_inner(), tx).await
    })
    .await
}

// Run `driven` until it finishes or the call fails. An error of `driven`
// ends `responses` with that Status. A failed call drops `driven`, and with
// it the in-flight RPC.
async fn complete<Resp, F>(responses: Sender<Resp>, driven: F)
where
    F: Future<Output = tonic::Result<()>>,
{
    let call = responses.call().clone();

    let result = tokio::select! {
        () = call.failed() => {
            tracing::debug!("call failed while its RPC was in flight");
            return;
        }
        result = driven => result,
    };
    if let Err(status) = result {
        responses.abort(status).await;
    }
}

async fn forward_requests<Req, S>(requests: S, tx: Sender<Req>)
where
    Req: prost::Message,
    S: Stream<Item = tonic::Result<Req>>,
{
    tokio::pin!(requests);

    loop {
        let next = tokio::select! {
            biased;
            () = tx.call().failed() => return,
            next = requests.next() => next,
        };
        match next {
            Some(Ok(request)) => {
                if let Err(status) = tx.send(request).await {
                    tracing::debug!(%status, "handler stopped receiving requests");
                    return;
                }
            }
            Some(Err(status)) => {
                tx.abort(status).await;
                return;
            }
            None => {
                tx.close_send();
                return;
            }
        }
    }
}

async fn forward_responses<Resp>(
    mut stream: tonic::Streaming<Resp>,
    tx: Sender<Resp>,
) -> tonic::Result<()>
where
    Resp: prost::Message,
{
    while let Some(response) = stream.message().await? {
        tx.send(response).await?;
    }
    Ok(())
}

fn request_stream<Req>(requests: Receiver<Req>) -> RequestStream<Req>
where
    Req: prost::Message + Default + 'static,
{
    futures::stream::unfold(requests, |mut requests| async move {
        match requests.receive().await {
            Ok(Some(request)) => Some((request, requests)),
            Ok(None) => None,
            // Ending the stream would half-close the RPC as though every
            // request was sent. Instead the call fails, and its RPC is dropped.
            Err(status) => {
                requests.call().fail(status);
                futures::future::pending().await
            }
        }
    })
    .boxed()
}

// CloseOnDrop closes the call of `rx` if dropped before `rx` has finished.
struct CloseOnDrop<M> {
    rx: Receiver<M>,
    finished: bool,
}

impl<M> Drop for CloseOnDrop<M> {
    fn drop(&mut self) {
        if !self.finished {
            self.rx.call().close();
        }
    }
}

#[cfg(test)]
mod test {
    use super::{accept, client_streaming, unary, unary_response, RequestStream};
    use crate::channel::{call, Endpoint};
    use futures::{StreamExt, TryStreamExt};
    use proto_calculator::calculator::{FindMaximumRequest as Req, FindMaximumResponse as Resp};
    use std::time::Duration;
    use tonic::{Code, Status};

    // Serve `endpoint` by echoing each request as a response.
    async fn echo(endpoint: Endpoint) -> tonic::Result<()> {
        let (tx, mut rx) = endpoint.split::<Resp, Req>();
        while let Some(Req { number }) = rx.receive().await? {
            tx.send(Resp { maximum: number }).await?;
        }
        Ok(())
    }

    fn requests(numbers: &[i32]) -> Vec<tonic::Result<Req>> {
        numbers.iter().map(|&number| Ok(Req { number })).collect()
    }

    #[tokio::test]
    async fn test_accepted_call_is_served() {
        let (endpoint, responses) =
            accept::<Req, Resp, _>(futures::stream::iter(requests(&[3, 5, 9])), 1);
        tokio::spawn(echo(endpoint));

        let maxima: Vec<i32> = responses
            .map_ok(|r| r.maximum)
            .try_collect()
            .await
            .unwrap();
        assert_eq!(maxima, vec![3, 5, 9]);
    }

    #[tokio::test]
    async fn test_request_error_reaches_handler() {
        let mut items = requests(&[1]);
        items.push(Err(Status::cancelled("client went away")));

        let (endpoint, _responses) = accept::<Req, Resp, _>(futures::stream::iter(items), 4);
        let (_tx, mut rx) = endpoint.split::<Resp, Req>();

        assert_eq!(rx.receive().await.unwrap(), Some(Req { number: 1 }));
        let err = rx.receive().await.unwrap_err();
        assert_eq!(err.code(), Code::Cancelled);
        assert_eq!(err.message(), "client went away");
    }

    #[tokio::test]
    async fn test_dropped_responses_close_the_call() {
        let (endpoint, responses) = accept::<Req, Resp, _>(futures::stream::pending(), 4);
        let call = endpoint.call().clone();
        assert!(!call.is_failed());

        std::mem::drop(responses);
        assert!(call.is_failed());
        assert_eq!(call.failure().unwrap().code(), Code::Cancelled);
    }

    #[tokio::test]
    async fn test_finished_responses_leave_the_call_open() {
        let (endpoint, responses) =
            accept::<Req, Resp, _>(futures::stream::iter(requests(&[1, 2])), 4);
        let call = endpoint.call().clone();
        tokio::spawn(echo(endpoint));

        let collected: Vec<Resp> = responses.try_collect().await.unwrap();
        assert_eq!(collected.len(), 2);
        assert!(!call.is_failed());
    }

    #[tokio::test]
    async fn test_unary_response() {
        let respond = |count: i32| {
            let (endpoint, responses) =
                accept::<Req, Resp, _>(futures::stream::iter(requests(&[])), 4);
            tokio::spawn(async move {
                let (tx, _rx) = endpoint.split::<Resp, Req>();
                for maximum in 0..count {
                    tx.send(Resp { maximum }).await.unwrap();
                }
            });
            unary_response(responses)
        };

        assert_eq!(respond(1).await.unwrap(), Resp { maximum: 0 });

        let none = respond(0).await.unwrap_err();
        let two = respond(2).await.unwrap_err();
        insta::assert_debug_snapshot!((none.code(), none.message(), two.code(), two.message()), @r###"
        (
            Internal,
            "call completed without a response",
            Internal,
            "call sent more than one response",
        )
        "###);
    }

    #[tokio::test]
    async fn test_dialed_client_streaming_call() {
        let (client, remote) = call(1);
        tokio::spawn(client_streaming(remote, |requests: RequestStream<Req>| async move {
            let maximum = requests.fold(0, |sum, r| async move { sum + r.number }).await;
            Ok(tonic::Response::new(Resp { maximum }))
        }));

        let (tx, rx) = client.split::<Req, Resp>();
        let numbers = (1..=10).map(|number| Req { number });
        let outcome = crate::drive(numbers, None, tx, rx).await;

        assert_eq!(outcome.into_result().unwrap(), vec![Resp { maximum: 55 }]);
    }

    #[tokio::test]
    async fn test_dialed_call_reports_rpc_status() {
        let (client, remote) = call(4);
        tokio::spawn(unary(remote, |_: Req| async move {
            Err::<tonic::Response<Resp>, _>(Status::unavailable("connection refused"))
        }));

        let (tx, rx) = client.split::<Req, Resp>();
        let outcome = crate::drive(Some(Req { number: 1 }), None, tx, rx).await;

        let err = outcome.into_result().unwrap_err();
        assert_eq!(err.code(), Code::Unavailable);
        assert_eq!(err.message(), "connection refused");
    }

    #[tokio::test]
    async fn test_failed_call_drops_its_rpc() {
        let (client, remote) = call(4);
        let (dropped_tx, dropped_rx) = tokio::sync::oneshot::channel::<()>();

        let driven = tokio::spawn(client_streaming(
            remote,
            |requests: RequestStream<Req>| async move {
                let _dropped_tx = dropped_tx;
                let _ = requests.collect::<Vec<_>>().await;
                // The RPC would otherwise never respond.
                futures::future::pending::<tonic::Result<tonic::Response<Resp>>>().await
            },
        ));

        let (tx, _rx) = client.split::<Req, Resp>();
        tx.send(Req { number: 1 }).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        tx.call().close();

        // The in-flight RPC was dropped, rather than seeing its requests end.
        assert!(dropped_rx.await.is_err());
        () = driven.await.unwrap();
    }
}
