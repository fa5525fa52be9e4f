//! Handlers of the greet service.

use duplex::{Receiver, Sender};
use proto_calculator::greet::{
    GreetEveryoneRequest, GreetEveryoneResponse, GreetManyTimesRequest, GreetManyTimesResponse,
    GreetRequest, GreetResponse, Greeting, LongGreetRequest, LongGreetResponse,
};
use std::time::Duration;
use tonic::Status;

/// Number of responses sent by GreetManyTimes.
pub const GREET_MANY_TIMES: usize = 10;

pub async fn greet(
    mut requests: Receiver<GreetRequest>,
    responses: Sender<GreetResponse>,
) -> tonic::Result<()> {
    let GreetRequest { greeting } = requests.receive_unary().await?;
    let first_name = first_name(greeting)?;

    responses
        .send(GreetResponse {
            result: format!("Hello {first_name}"),
        })
        .await
}

/// Greet the requested name GREET_MANY_TIMES times, waiting `interval` between responses.
pub async fn greet_many_times(
    interval: Duration,
    mut requests: Receiver<GreetManyTimesRequest>,
    responses: Sender<GreetManyTimesResponse>,
) -> tonic::Result<()> {
    let GreetManyTimesRequest { greeting } = requests.receive_unary().await?;
    let first_name = first_name(greeting)?;

    for index in 0..GREET_MANY_TIMES {
        if index != 0 && !interval.is_zero() {
            // A failed call is reported by the following send.
            tokio::select! {
                () = responses.call().failed() => (),
                () = tokio::time::sleep(interval) => (),
            }
        }
        responses
            .send(GreetManyTimesResponse {
                result: format!("Hello {first_name} number {index}"),
            })
            .await?;
    }
    Ok(())
}

/// Greet every requested name with a single response.
pub async fn long_greet(
    mut requests: Receiver<LongGreetRequest>,
    responses: Sender<LongGreetResponse>,
) -> tonic::Result<()> {
    let mut result = String::new();

    while let Some(LongGreetRequest { greeting }) = requests.receive().await? {
        let first_name = first_name(greeting)?;
        tracing::debug!(%first_name, "long greet received a name");
        result.push_str(&format!("Hello {first_name}! "));
    }
    responses.send(LongGreetResponse { result }).await
}

/// Respond to each requested name with the greeting of every name so far.
pub async fn greet_everyone(
    mut requests: Receiver<GreetEveryoneRequest>,
    responses: Sender<GreetEveryoneResponse>,
) -> tonic::Result<()> {
    let mut result = String::new();

    while let Some(GreetEveryoneRequest { greeting }) = requests.receive().await? {
        let first_name = first_name(greeting)?;
        result.push_str(&format!("Hello {first_name}! "));

        responses
            .send(GreetEveryoneResponse {
                result: result.clone(),
            })
            .await?;
    }
    Ok(())
}

fn first_name(greeting: Option<Greeting>) -> tonic::Result<String> {
    match greeting {
        Some(Greeting { first_name, .. }) => Ok(first_name),
        None => Err(Status::invalid_argument("request is missing its greeting")),
    }
}
