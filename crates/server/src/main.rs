use anyhow::Result;
use clap::Parser;
use server::ServeArgs;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "HTTP server for the study helper")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    serve: ServeArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .init();

    let cli = Cli::parse();
    info!("starting study helper server v{}", env!("CARGO_PKG_VERSION"));
    server::run(cli.serve).await
}
