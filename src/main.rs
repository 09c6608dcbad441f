//! load-creds - resumable, parallel credential loader
//!
//! Reads JSON-lines credential files and submits them to an issuing agent,
//! or splits them into smaller files with `--split`.

use clap::Parser;
use cred_loadgen::cli::LoadCredsArgs;
use cred_loadgen::utils::logging::init_logging;
use cred_loadgen::{AgentClient, LoadRunner, split_all};
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // A missing .env file is the normal case
    let _ = dotenvy::dotenv();

    let args = LoadCredsArgs::parse();

    let config = match args.resolve().await {
        Ok(config) => config,
        Err(e) => {
            init_logging(args.log_format.unwrap_or_default(), "info");
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logging(config.run.log_format, "info");

    if args.split {
        return match split_all(&args.paths, config.run.parallel).await {
            Ok(written) => {
                for path in &written {
                    println!("{}", path.display());
                }
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("Split failed: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    let client = match AgentClient::new(config.agent.clone()) {
        Ok(client) => client,
        Err(e) => {
            error!("Cannot build HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!(url = %config.agent.url, "Submitting credentials");
    match LoadRunner::new(&client, &config.run).run(&args.paths).await {
        Ok(summary) if summary.is_complete() => ExitCode::SUCCESS,
        Ok(summary) => {
            for failure in &summary.failures {
                error!(
                    file = %failure.file.display(),
                    range = ?failure.range,
                    "{}",
                    failure.error
                );
            }
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("Run failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
