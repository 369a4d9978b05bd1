use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use server::ServeArgs;
use services::{
    AnalysisService, AppServices, Clock, CredentialCheck, HttpGateway, LocalGateway,
    SpeechCapability, StudyGateway, TabService,
};
use tracing::info;
use ui::{App, UiApp, WebSpeech, build_app_context};

const DEFAULT_DB_URL: &str = "study.sqlite3";

#[derive(Parser, Debug)]
#[command(name = "app")]
#[command(about = "Study helper: desktop practice app and HTTP server")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    ui: UiArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Launch the desktop app (default)
    Ui(UiArgs),
    /// Serve `/auth` and `/analyze` over HTTP
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone)]
struct UiArgs {
    /// SQLite URL or file path for tab state
    #[arg(long, env = "STUDY_DB_URL", default_value = DEFAULT_DB_URL)]
    db: String,

    /// Base URL of a running server; without it everything runs in-process
    #[arg(long, env = "STUDY_SERVER_URL")]
    server: Option<String>,

    /// Shared login password for in-process use
    #[arg(long, env = "STUDY_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn gateway(&self) -> Arc<dyn StudyGateway> {
        self.services.gateway()
    }

    fn tab_service(&self) -> Arc<TabService> {
        self.services.tabs()
    }

    fn speech(&self) -> Arc<dyn SpeechCapability + Send + Sync> {
        Arc::new(WebSpeech)
    }
}

fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with("sqlite:") {
        return trimmed.to_string();
    }

    let path = Path::new(trimmed);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}?mode=rwc", absolute.display())
}

fn build_gateway(args: &UiArgs) -> Result<Arc<dyn StudyGateway>> {
    if let Some(base_url) = args.server.as_deref() {
        info!(server = base_url, "using remote server");
        let gateway = HttpGateway::new(base_url)
            .with_context(|| format!("invalid --server value: {base_url}"))?;
        return Ok(Arc::new(gateway));
    }
    Ok(Arc::new(LocalGateway::new(
        CredentialCheck::new(args.password.clone()),
        Arc::new(AnalysisService::from_env()),
    )))
}

fn run_ui(runtime: &tokio::runtime::Runtime, args: &UiArgs) -> Result<()> {
    let db_url = normalize_sqlite_url(&args.db);
    info!(db = %db_url, "opening tab storage");

    let gateway = build_gateway(args)?;
    let services = runtime
        .block_on(AppServices::new_sqlite(&db_url, Clock::default(), gateway))
        .context("failed to open tab storage")?;

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Study Helper")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    // The desktop shell drives its own event loop, so setup runs on a
    // separate runtime that stays alive for the storage pool.
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;

    match cli.command.unwrap_or(Command::Ui(cli.ui)) {
        Command::Ui(args) => run_ui(&runtime, &args),
        Command::Serve(args) => runtime.block_on(server::run(args)),
    }
}
