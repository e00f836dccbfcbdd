//! examiner-gateway server binary

use clap::Parser;
use examiner_gateway::config::LogFormat;
use examiner_gateway::server::{load_config, run_with_config};
use examiner_gateway::utils::logging::init_logging;
use std::path::PathBuf;
use std::process::ExitCode;

/// Essay evaluation and speech translation gateway
#[derive(Debug, Parser)]
#[command(name = "gateway", version, about)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, env = "GATEWAY_CONFIG", default_value = "config/gateway.yaml")]
    config: PathBuf,

    /// Override the listen host
    #[arg(long)]
    host: Option<String>,

    /// Override the listen port
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log output format
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // .env is optional
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let (mut config, source) = match load_config(&cli.config).await {
        Ok(loaded) => loaded,
        Err(e) => {
            // Print error using Display (not Debug) to preserve newlines
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(config.logging(), cli.log_format);
    source.log(&cli.config);

    if let Some(host) = cli.host {
        config.gateway.server.host = host;
    }
    if let Some(port) = cli.port {
        config.gateway.server.port = port;
    }
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match run_with_config(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Gateway exited with an error");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
