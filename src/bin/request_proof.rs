//! request-proof - ask the agent for proofs over issued credentials

use clap::Parser;
use cred_loadgen::AgentClient;
use cred_loadgen::cli::RequestProofArgs;
use cred_loadgen::config::{AgentConfig, Validate};
use cred_loadgen::utils::logging::init_logging;
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let args = RequestProofArgs::parse();
    init_logging(args.log_format, "info");

    let mut agent = AgentConfig::default();
    if let Some(url) = &args.url {
        agent.url = url.clone();
    }
    if let Err(e) = agent.validate() {
        error!("Invalid agent configuration: {}", e);
        return ExitCode::FAILURE;
    }

    let client = match AgentClient::new(agent) {
        Ok(client) => client,
        Err(e) => {
            error!("Cannot build HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    for ids in args.requests() {
        info!(proof = %args.name, ids = ?ids, "Requesting proof");
        match client.request_proof(&args.name, &ids).await {
            Ok(result) => println!("{}", result),
            Err(e) => {
                error!("Could not complete proof request: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
