use crate::channel::{Call, Receiver, Sender};
use std::time::Duration;
use tonic::Status;

/// CallStatus is the completion status of a call.
#[derive(Clone, Debug)]
pub enum CallStatus {
    Pending,
    Completed,
    Failed(Status),
}

/// Outcome of a driven call: its status, and every response received
/// (including those received before a failure).
#[derive(Debug)]
pub struct Outcome<M> {
    pub status: CallStatus,
    pub responses: Vec<M>,
}

impl<M> Outcome<M> {
    pub fn is_completed(&self) -> bool {
        matches!(self.status, CallStatus::Completed)
    }

    /// Map into the received responses if the call completed, or its failure otherwise.
    pub fn into_result(self) -> tonic::Result<Vec<M>> {
        match self.status {
            CallStatus::Completed => Ok(self.responses),
            CallStatus::Failed(status) => Err(status),
            CallStatus::Pending => Err(Status::internal("call did not complete")),
        }
    }
}

/// Drive a call by concurrently sending `requests` and receiving all responses.
/// See [`drive_with`].
pub async fn drive<Req, Resp, I>(
    requests: I,
    pace: Option<Duration>,
    sender: Sender<Req>,
    receiver: Receiver<Resp>,
) -> Outcome<Resp>
where
    Req: prost::Message + 'static,
    Resp: prost::Message + Default + 'static,
    I: IntoIterator<Item = Req>,
    I::IntoIter: Send + 'static,
{
    drive_with(requests, pace, sender, receiver, |_: &Resp| ()).await
}

/// Drive a call with two concurrent tasks: a sender which sends each of
/// `requests` (waiting `pace` between them) and then half-closes, and a
/// receiver which receives until end-of-stream, passing each response to
/// `on_response`.
///
/// Both tasks are joined before returning. If either fails, the call is
/// failed with its Status, which unblocks and cancels the other.
/// The first failure of the call becomes the Outcome's status.
pub async fn drive_with<Req, Resp, I, F>(
    requests: I,
    pace: Option<Duration>,
    sender: Sender<Req>,
    receiver: Receiver<Resp>,
    on_response: F,
) -> Outcome<Resp>
where
    Req: prost::Message + 'static,
    Resp: prost::Message + Default + 'static,
    I: IntoIterator<Item = Req>,
    I::IntoIter: Send + 'static,
    F: FnMut(&Resp) + Send + 'static,
{
    let call = sender.call().clone();

    let send_task = AutoAbortHandle(tokio::spawn(send_all(
        requests.into_iter(),
        pace,
        sender,
    )));
    let receive_task = AutoAbortHandle(tokio::spawn(receive_all(receiver, on_response)));

    let sending = async {
        let result = match send_task.await {
            Ok(result) => result,
            Err(err) => Err(join_error_to_status("sender", err)),
        };
        fail_on_error(&call, result)
    };
    let receiving = async {
        let (responses, result) = match receive_task.await {
            Ok(out) => out,
            Err(err) => (Vec::new(), Err(join_error_to_status("receiver", err))),
        };
        (responses, fail_on_error(&call, result))
    };
    let (sent, (responses, received)) = tokio::join!(sending, receiving);

    let status = match (sent, received) {
        (Ok(()), Ok(())) => CallStatus::Completed,
        (Err(status), _) | (_, Err(status)) => {
            CallStatus::Failed(call.failure().unwrap_or(status))
        }
    };
    tracing::debug!(?status, responses = responses.len(), "call finished");

    Outcome { status, responses }
}

async fn send_all<Req: prost::Message>(
    requests: impl Iterator<Item = Req>,
    pace: Option<Duration>,
    sender: Sender<Req>,
) -> tonic::Result<()> {
    for (index, request) in requests.enumerate() {
        if let (Some(pace), true) = (pace, index != 0) {
            tokio::select! {
                () = sender.call().failed() => return Err(sender.call().terminal()),
                () = tokio::time::sleep(pace) => (),
            }
        }

        match sender.send(request).await {
            Ok(()) => (),
            // The peer finished without reading all of our requests.
            // Its response stream carries the outcome of the call.
            Err(_) if sender.is_closed() && !sender.call().is_failed() => {
                tracing::debug!(sent = index, "peer stopped receiving requests");
                return Ok(());
            }
            Err(status) => return Err(status),
        }
    }
    sender.close_send();
    Ok(())
}

async fn receive_all<Resp, F>(
    mut receiver: Receiver<Resp>,
    mut on_response: F,
) -> (Vec<Resp>, tonic::Result<()>)
where
    Resp: prost::Message + Default,
    F: FnMut(&Resp),
{
    let mut responses = Vec::new();
    loop {
        match receiver.receive().await {
            Ok(Some(response)) => {
                on_response(&response);
                responses.push(response);
            }
            Ok(None) => return (responses, Ok(())),
            Err(status) => return (responses, Err(status)),
        }
    }
}

fn fail_on_error(call: &Call, result: tonic::Result<()>) -> tonic::Result<()> {
    if let Err(status) = &result {
        if call.fail(status.clone()) {
            tracing::debug!(%status, "failing call");
        }
    }
    result
}

fn join_error_to_status(task: &str, err: tokio::task::JoinError) -> Status {
    Status::internal(format!("{task} task failed: {err}"))
}

// AutoAbortHandle aborts its task if it's dropped before completing,
// as happens if the future of drive_with() is itself dropped.
struct AutoAbortHandle<T>(tokio::task::JoinHandle<T>);

impl<T> std::future::Future for AutoAbortHandle<T> {
    type Output = Result<T, tokio::task::JoinError>;

    fn poll(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Self::Output> {
        std::pin::Pin::new(&mut self.0).poll(cx)
    }
}

impl<T> Drop for AutoAbortHandle<T> {
    fn drop(&mut self) {
        self.0.abort()
    }
}

#[cfg(test)]
mod test {
    use super::{drive, drive_with, CallStatus};
    use crate::channel::{call, Endpoint};
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

    fn requests(n: i32) -> impl Iterator<Item = Req> + Send + 'static {
        (0..n).map(|number| Req { number })
    }

    #[tokio::test]
    async fn test_completed_call() {
        let (client, server) = call(4);
        tokio::spawn(echo(server));

        let (tx, rx) = client.split::<Req, Resp>();
        let seen = std::sync::Arc::new(std::sync::Mutex::new(0));
        let seen_clone = seen.clone();

        let outcome = drive_with(requests(5), None, tx, rx, move |_: &Resp| {
            *seen_clone.lock().unwrap() += 1;
        })
        .await;

        assert!(outcome.is_completed());
        assert_eq!(*seen.lock().unwrap(), 5);

        let maxima: Vec<i32> = outcome.responses.iter().map(|r| r.maximum).collect();
        insta::assert_debug_snapshot!(maxima, @r###"
        [
            0,
            1,
            2,
            3,
            4,
        ]
        "###);
    }

    #[tokio::test]
    async fn test_no_deadlock_with_minimal_buffers() {
        // With single-message buffers, a sequential send-then-receive client
        // would deadlock against the echo server. Concurrent tasks must not.
        let (client, server) = call(1);
        tokio::spawn(echo(server));

        let (tx, rx) = client.split::<Req, Resp>();
        let outcome = drive(requests(1000), None, tx, rx).await;

        assert!(outcome.is_completed());
        assert_eq!(outcome.responses.len(), 1000);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_no_deadlock_multi_thread() {
        for _ in 0..50 {
            let (client, server) = call(1);
            tokio::spawn(echo(server));

            let (tx, rx) = client.split::<Req, Resp>();
            let outcome = drive(requests(100), None, tx, rx).await;
            assert_eq!(outcome.into_result().unwrap().len(), 100);
        }
    }

    #[tokio::test]
    async fn test_paced_call() {
        let (client, server) = call(4);
        tokio::spawn(echo(server));

        let (tx, rx) = client.split::<Req, Resp>();
        let outcome = drive(requests(3), Some(Duration::from_millis(5)), tx, rx).await;
        assert_eq!(outcome.into_result().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_transport_failure_cancels_sender() {
        let (client, server) = call(2);

        // The peer echoes two requests and then suffers a transport failure.
        tokio::spawn(async move {
            let call = server.call().clone();
            let (tx, mut rx) = server.split::<Resp, Req>();
            for _ in 0..2 {
                let Req { number } = rx.receive().await.unwrap().unwrap();
                tx.send(Resp { maximum: number }).await.unwrap();
            }
            call.fail(Status::unavailable("connection reset by peer"));
        });

        // Requests are unbounded: the sender can only finish by being cancelled.
        let (tx, rx) = client.split::<Req, Resp>();
        let unbounded = (0..).map(|number| Req { number });
        let outcome = drive(unbounded, None, tx, rx).await;

        let CallStatus::Failed(status) = &outcome.status else {
            panic!("expected failure, got {:?}", outcome.status);
        };
        assert_eq!(status.code(), Code::Unavailable);
        assert_eq!(status.message(), "connection reset by peer");
        assert!(outcome.responses.len() <= 2);
    }

    #[tokio::test]
    async fn test_handler_error_is_call_status() {
        let (client, server) = call(4);

        // The peer reads every request, then ends its responses with an error.
        tokio::spawn(async move {
            let (tx, mut rx) = server.split::<Resp, Req>();
            tx.send(Resp { maximum: 1 }).await.unwrap();
            while rx.receive().await.unwrap().is_some() {}
            tx.abort(Status::invalid_argument("that won't do")).await;
        });

        let (tx, rx) = client.split::<Req, Resp>();
        let outcome = drive(requests(10), None, tx, rx).await;

        assert_eq!(outcome.responses, vec![Resp { maximum: 1 }]);
        let err = outcome.into_result().unwrap_err();
        assert_eq!(err.code(), Code::InvalidArgument);
        assert_eq!(err.message(), "that won't do");
    }

    #[tokio::test]
    async fn test_peer_stops_reading_early() {
        let (client, server) = call(1);

        // The peer reads a single request, then fails its response stream
        // without reading the remainder.
        tokio::spawn(async move {
            let (tx, mut rx) = server.split::<Resp, Req>();
            let _ = rx.receive().await.unwrap();
            std::mem::drop(rx);
            tx.abort(Status::invalid_argument("only one, please")).await;
        });

        let (tx, rx) = client.split::<Req, Resp>();
        let outcome = drive(requests(100), None, tx, rx).await;

        // The peer's status is reported, rather than our inability to send.
        let err = outcome.into_result().unwrap_err();
        assert_eq!(err.code(), Code::InvalidArgument);
        assert_eq!(err.message(), "only one, please");
    }

    #[tokio::test]
    async fn test_caller_close_cancels_both_tasks() {
        let (client, server) = call(4);
        let (server_tx, mut server_rx) = server.split::<Resp, Req>();

        // The peer never responds, but holds its ends open.
        let peer = tokio::spawn(async move {
            let _server_tx = server_tx;
            while let Ok(Some(_)) = server_rx.receive().await {}
        });

        let call = client.call().clone();
        let (tx, rx) = client.split::<Req, Resp>();
        let unbounded = (0..).map(|number| Req { number });
        let driven = tokio::spawn(drive(unbounded, Some(Duration::from_millis(1)), tx, rx));

        tokio::time::sleep(Duration::from_millis(10)).await;
        call.close();

        let outcome = driven.await.unwrap();
        let err = outcome.into_result().unwrap_err();
        assert_eq!(err.code(), Code::Cancelled);
        () = peer.await.unwrap();
    }
}
