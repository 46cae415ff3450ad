mod config;
mod config_cmd;
mod parse_cmd;
mod status_cmd;
mod terminal_output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};

use nutrilens_config::NutrilensConfig;
use nutrilens_gateway::{start_server, GatewayState};

use parse_cmd::OutputFormat;

#[derive(Parser)]
#[command(name = "nutrilens")]
#[command(about = "NutriLens: nutrition facts from label photos")]
#[command(version)]
struct Cli {
    /// Path to a YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP gateway
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Extract nutrition facts from OCR text in a file (or stdin)
    Parse {
        /// Text file to read; stdin when omitted
        file: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Print the normalized text before the result
        #[arg(long)]
        show_cleaned: bool,
    },
    /// Query a running gateway's health endpoint
    Status {
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print the effective configuration with secrets masked
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    let env = config::process_env();
    let loaded = nutrilens_config::load_effective(cli.config.as_deref(), &env).await;
    // `parse` needs no configuration, so a broken config file must not block it.
    let lenient = matches!(cli.command, Commands::Parse { .. });
    let (config, config_error) = config::config_or_default(loaded, lenient)?;
    nutrilens_logging::init_logger(&config::log_options(&config.logging));

    if let Some(e) = config_error {
        warn!(error = %e, "Ignoring unreadable configuration; using defaults");
    }

    match dotenv {
        Ok(path) => info!(path = %path.display(), "Loaded .env"),
        Err(e) if e.not_found() => debug!("No .env file found"),
        Err(e) => warn!(error = %e, "Failed to load .env"),
    }

    match cli.command {
        Commands::Serve { port } => {
            let mut config = config;
            if let Some(port) = port {
                config.server.port = port;
            }
            nutrilens_config::ensure_valid(&config)?;
            run_server(config).await?;
        }
        Commands::Parse {
            file,
            format,
            show_cleaned,
        } => {
            parse_cmd::run(file.as_deref(), format, show_cleaned).await?;
        }
        Commands::Status { port } => {
            status_cmd::run(port.unwrap_or(config.server.port)).await?;
        }
        Commands::Config => {
            config_cmd::run(&config)?;
        }
    }

    Ok(())
}

async fn run_server(config: NutrilensConfig) -> Result<()> {
    info!(
        port = config.server.port,
        bind = %config.server.bind_address,
        max_upload_bytes = config.server.max_upload_bytes,
        "Starting NutriLens gateway"
    );

    let ocr = config::build_ocr(&config.ocr)?;
    info!(provider = ocr.name(), "OCR provider ready");

    let state = GatewayState::new(ocr);
    start_server(&config, state).await
}
