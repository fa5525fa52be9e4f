use clap::Parser;

fn main() {
    let args = calculator::Args::parse();

    // Map --log-level (or LOG_LEVEL) to a tracing EnvFilter.
    let env_filter = match tracing_subscriber::EnvFilter::try_new(&args.log_level) {
        Ok(env_filter) => env_filter,
        Err(error) => {
            eprintln!("invalid log level {:?}: {error}", args.log_level);
            std::process::exit(1);
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build();

    let runtime = match runtime {
        Ok(runtime) => runtime,
        Err(error) => {
            tracing::error!(%error, "couldn't build Tokio runtime");
            std::process::exit(1);
        }
    };

    let result = runtime.block_on(calculator::run(args));
    runtime.shutdown_background();

    if let Err(error) = result {
        tracing::error!(error = format!("{error:#}"), "calculator failed");
        std::process::exit(1);
    }
}
