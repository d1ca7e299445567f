use clap::Parser;
use jadwal::app::App;
use jadwal::cli::Args;
use jadwal::config::Config;
use jadwal::logging::setup_logging;
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e:#}");
            return ExitCode::FAILURE;
        }
    };
    setup_logging(&config, args.tracing);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        input = args.input.as_str(),
        "starting jadwal"
    );

    match App::new(config).run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = ?e, "extraction failed");
            // The portal surfaced these as blocking alerts; the CLI prints
            // the same notices to stderr.
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
