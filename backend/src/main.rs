use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use output_language::config::LoggingConfig;
use output_language::handlers::language::instruction_response;
use output_language::models::InstructionResp;
use output_language::{
    AppState, Config, LanguagePreference, OutputLanguage, build_router, resolve_output_language,
};

#[derive(Debug, Parser)]
#[command(name = "output-language", version, about = "Output language selection service")]
struct Args {
    /// Path to config.toml (defaults to conf/config.toml or ./config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the HTTP server (default)
    Serve,
    /// Resolve a language once and print the instruction as JSON
    Instruction(InstructionArgs),
}

#[derive(Debug, Default, clap::Args)]
struct InstructionArgs {
    /// Raw Accept-Language header value
    #[arg(long)]
    accept_language: Option<String>,
    /// Stored language cookie value
    #[arg(long)]
    cookie: Option<String>,
    /// Explicit language tag ("en" or "zh-CN")
    #[arg(long)]
    language: Option<String>,
    /// Prompt to append the instruction to
    #[arg(long)]
    prompt: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(args.config.as_deref()).await,
        Command::Instruction(instruction) => {
            let resp = run_instruction(&instruction)?;
            println!("{}", serde_json::to_string_pretty(&resp)?);
            Ok(())
        },
    }
}

/// Resolve the language for the `instruction` command.
/// An invalid `--language` is an error rather than a fallback.
fn run_instruction(args: &InstructionArgs) -> anyhow::Result<InstructionResp> {
    let explicit = args
        .language
        .as_deref()
        .map(str::parse::<OutputLanguage>)
        .transpose()
        .context("Invalid --language")?;

    let language = resolve_output_language(LanguagePreference {
        explicit,
        cookie: args.cookie.as_deref(),
        accept_language: args.accept_language.as_deref(),
    });

    Ok(instruction_response(language, args.prompt.as_deref()))
}

/// Load configuration with a console-only subscriber in place, so the
/// loader's messages are visible before the configured logging exists.
fn load_config(config_path: Option<&Path>) -> anyhow::Result<Config> {
    let bootstrap = tracing_subscriber::fmt().with_env_filter(EnvFilter::new("info")).finish();
    tracing::subscriber::with_default(bootstrap, || Config::load(config_path))
        .context("Failed to load configuration")
}

async fn serve(config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let _guard = init_logging(&config.logging)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = build_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Output language service listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Console logging always; file logging with daily rotation when configured.
/// The returned guard must live as long as the process.
fn init_logging(logging: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(&logging.level)
        .with_context(|| format!("Invalid log level '{}'", logging.level))?;

    let (file_layer, guard) = match logging.file.as_deref() {
        Some(file) => {
            let path = Path::new(file);
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
            let name = path.file_name().context("logging.file has no file name")?;
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

            let appender = tracing_appender::rolling::daily(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().with_writer(writer).with_ansi(false)), Some(guard))
        },
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    Ok(guard)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
