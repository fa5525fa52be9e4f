use anyhow::Context;
use std::time::Duration;
use tokio::signal::unix;

pub mod calculator;
pub mod greet;

mod client;
mod method;
mod server;

pub use client::{Client, Dial, GrpcDialer};
pub use method::Method;
pub use server::{CallContext, Server, ServerConfig};

#[derive(clap::Parser, Debug)]
#[clap(about = "Calculator and greet services over streaming RPC.")]
pub struct Args {
    /// Filter of logged events, such as "info" or "calculator=debug,duplex=debug".
    #[clap(long, global = true, default_value = "info", env = "LOG_LEVEL")]
    pub log_level: String,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Serve the calculator and greet services.
    Serve(ServeArgs),
    /// Call a method of a running server.
    Call(CallArgs),
}

#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    /// Port on which to listen for calls.
    #[clap(short, long, default_value = "50051", env = "CALCULATOR_PORT")]
    pub port: u16,

    /// Delay between the responses of GreetManyTimes.
    #[clap(
        long,
        default_value = "1s",
        env = "GREET_INTERVAL",
        value_parser = humantime::parse_duration
    )]
    pub greet_interval: Duration,

    /// Time allowed for connections to close after a signal to exit.
    #[clap(
        long,
        default_value = "5s",
        env = "DRAIN_TIMEOUT",
        value_parser = humantime::parse_duration
    )]
    pub drain_timeout: Duration,
}

#[derive(clap::Args, Debug)]
pub struct CallArgs {
    /// Address of the server.
    #[clap(short, long, default_value = "127.0.0.1:50051", env = "CALCULATOR_ADDRESS")]
    pub address: String,

    /// Delay between the requests of streaming calls, such as "1s".
    #[clap(long, default_value = "0s", value_parser = humantime::parse_duration)]
    pub pace: Duration,

    #[clap(subcommand)]
    pub method: CallMethod,
}

#[derive(clap::Subcommand, Debug)]
pub enum CallMethod {
    /// Sum two numbers.
    Sum {
        #[clap(allow_negative_numbers = true)]
        first_number: i64,
        #[clap(allow_negative_numbers = true)]
        second_number: i64,
    },
    /// Decompose a number into its prime factors.
    Decompose { number: i64 },
    /// Average a stream of numbers.
    Average {
        #[clap(allow_negative_numbers = true)]
        numbers: Vec<i32>,
    },
    /// Find each new maximum of a stream of numbers.
    Maximum {
        #[clap(allow_negative_numbers = true)]
        numbers: Vec<i32>,
    },
    /// Greet a name.
    Greet { first_name: String },
    /// Greet a name many times.
    GreetManyTimes { first_name: String },
    /// Greet a stream of names with one greeting.
    LongGreet { first_names: Vec<String> },
    /// Greet each of a stream of names, along with everyone before them.
    GreetEveryone { first_names: Vec<String> },
}

pub async fn run(args: Args) -> anyhow::Result<()> {
    match args.command {
        Command::Serve(args) => serve(args).await,
        Command::Call(args) => call(args).await,
    }
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    // Gracefully exit on either SIGINT (ctrl-c) or SIGTERM.
    let mut sigint = unix::signal(unix::SignalKind::interrupt())?;
    let mut sigterm = unix::signal(unix::SignalKind::terminate())?;

    let signal = async move {
        tokio::select! {
            _ = sigint.recv() => (),
            _ = sigterm.recv() => (),
        }
        tracing::info!("caught signal to exit");
    };

    let server = Server::new(ServerConfig {
        greet_interval: args.greet_interval,
        drain_timeout: args.drain_timeout,
        ..Default::default()
    });
    tracing::info!(%addr, greet_interval = ?args.greet_interval, "serving calls");

    server
        .serve(listener, signal)
        .await
        .context("serving gRPC")?;
    Ok(())
}

async fn call(args: CallArgs) -> anyhow::Result<()> {
    let CallArgs {
        address,
        pace,
        method,
    } = args;
    let dialer = GrpcDialer::new(&address).with_context(|| format!("invalid address {address}"))?;
    let client = Client::new(dialer).with_pace(pace);

    match method {
        CallMethod::Sum {
            first_number,
            second_number,
        } => {
            let sum = client
                .sum(first_number, second_number)
                .await
                .with_context(|| format!("calling Sum of {address}"))?;
            println!("{sum}");
        }
        CallMethod::Decompose { number } => {
            // Print each factor as it arrives.
            let request = proto_calculator::calculator::PrimeNumberDecompositionRequest { number };
            let outcome = client
                .call(
                    Method::PrimeNumberDecomposition,
                    Some(request),
                    |r: &proto_calculator::calculator::PrimeNumberDecompositionResponse| {
                        println!("{}", r.prime_factor)
                    },
                )
                .await;
            outcome
                .into_result()
                .with_context(|| format!("calling PrimeNumberDecomposition of {address}"))?;
        }
        CallMethod::Average { numbers } => {
            let average = client
                .compute_average(numbers)
                .await
                .with_context(|| format!("calling ComputeAverage of {address}"))?;
            println!("{average}");
        }
        CallMethod::Maximum { numbers } => {
            let requests = numbers
                .into_iter()
                .map(|number| proto_calculator::calculator::FindMaximumRequest { number });
            let outcome = client
                .call(
                    Method::FindMaximum,
                    requests,
                    |r: &proto_calculator::calculator::FindMaximumResponse| {
                        println!("{}", r.maximum)
                    },
                )
                .await;
            outcome
                .into_result()
                .with_context(|| format!("calling FindMaximum of {address}"))?;
        }
        CallMethod::Greet { first_name } => {
            let result = client
                .greet(&first_name)
                .await
                .with_context(|| format!("calling Greet of {address}"))?;
            println!("{result}");
        }
        CallMethod::GreetManyTimes { first_name } => {
            let request = proto_calculator::greet::GreetManyTimesRequest {
                greeting: Some(proto_calculator::greet::Greeting::new(first_name)),
            };
            let outcome = client
                .call(
                    Method::GreetManyTimes,
                    Some(request),
                    |r: &proto_calculator::greet::GreetManyTimesResponse| println!("{}", r.result),
                )
                .await;
            outcome
                .into_result()
                .with_context(|| format!("calling GreetManyTimes of {address}"))?;
        }
        CallMethod::LongGreet { first_names } => {
            let result = client
                .long_greet(first_names)
                .await
                .with_context(|| format!("calling LongGreet of {address}"))?;
            println!("{result}");
        }
        CallMethod::GreetEveryone { first_names } => {
            let requests = first_names
                .into_iter()
                .map(|first_name| proto_calculator::greet::GreetEveryoneRequest {
                    greeting: Some(proto_calculator::greet::Greeting::new(first_name)),
                });
            let outcome = client
                .call(
                    Method::GreetEveryone,
                    requests,
                    |r: &proto_calculator::greet::GreetEveryoneResponse| println!("{}", r.result),
                )
                .await;
            outcome
                .into_result()
                .with_context(|| format!("calling GreetEveryone of {address}"))?;
        }
    }
    Ok(())
}
