use clap::Parser;
use claim_validator::cli::{args::Args, commands};
use std::process;

/// Exit code for runtime failures (I/O, configuration, interruption)
const EXIT_RUNTIME_ERROR: i32 = 2;

fn main() {
    // Usage errors exit with code 2 from clap itself
    let args = Args::parse();

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(EXIT_RUNTIME_ERROR);
    });

    let result = runtime.block_on(async {
        let shutdown_signal = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("Failed to install CTRL+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            result = commands::run(args) => result,
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, stopping validation");
                Err(claim_validator::Error::processing_interrupted(
                    "Validation interrupted by user",
                )
                .into())
            }
        }
    });

    match result {
        Ok(outcome) => process::exit(outcome.exit_code()),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(EXIT_RUNTIME_ERROR);
        }
    }
}
