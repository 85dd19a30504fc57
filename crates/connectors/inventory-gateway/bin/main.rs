use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::{info_span, Instrument};

use inventory_gateway::{routes, state};
use inventory_gateway_configuration as configuration;
use inventory_gateway_configuration::environment::ProcessEnvironment;

/// Serve the inventory tables over HTTP.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
    #[command(flatten)]
    serve: ServeOptions,
}

#[derive(Subcommand)]
enum Command {
    /// Write an initial configuration file and its JSON schema.
    Initialize {
        #[arg(long, env = "INVENTORY_CONFIGURATION_DIR", default_value = ".")]
        out_dir: PathBuf,
    },
}

#[derive(Args)]
struct ServeOptions {
    /// Directory holding `configuration.json`.
    #[arg(long, env = "INVENTORY_CONFIGURATION_DIR", default_value = ".")]
    configuration: PathBuf,
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: IpAddr,
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,
}

#[tokio::main]
pub async fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Some(Command::Initialize { out_dir }) => initialize(out_dir).await,
        None => serve(cli.serve).await,
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error:#}");
            ExitCode::FAILURE
        }
    }
}

async fn initialize(out_dir: PathBuf) -> anyhow::Result<()> {
    configuration::write_parsed_configuration(configuration::ParsedConfiguration::initial(), &out_dir)
        .await?;
    tracing::info!(path = %out_dir.display(), "wrote initial configuration");
    Ok(())
}

async fn serve(options: ServeOptions) -> anyhow::Result<()> {
    let parsed_configuration = configuration::parse_configuration(&options.configuration)
        .instrument(info_span!("parse configuration"))
        .await?;
    let runtime_configuration =
        configuration::make_runtime_configuration(parsed_configuration, ProcessEnvironment)?;

    let state = state::create_state(&runtime_configuration)
        .instrument(info_span!("Initialise state"))
        .await?;
    let router = routes::create_router(state);

    let address = SocketAddr::new(options.host, options.port);
    tracing::info!(%address, "starting server");

    axum::Server::bind(&address)
        .serve(router.into_make_service())
        .with_graceful_shutdown(async {
            // an error here means no signal handler could be installed; keep serving
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
        })
        .await?;

    Ok(())
}
