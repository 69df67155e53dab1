mod commands;
mod gateway;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use relay_channels::telegram::TelegramChannel;
use relay_core::{
    config::{self, Config},
    traits::Provider,
};
use relay_providers::gemini_cli::GeminiCliProvider;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "relay",
    version,
    about = "Telegram bot bridge to a local AI assistant CLI"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the env file. Defaults to `.env` next to the executable.
    #[arg(short, long, global = true)]
    env_file: Option<PathBuf>,

    /// Also write logs to a daily rolling file in this directory.
    #[arg(long, global = true, env = "RELAY_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start polling and relaying messages.
    Start,
    /// Show the resolved configuration and assistant availability.
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.log_dir.as_deref())?;

    let env_path = cli.env_file.unwrap_or_else(config::default_env_path);

    match cli.command {
        Commands::Start => {
            let vars = config::load_env(&env_path);
            let cfg = Config::resolve(&vars)
                .with_context(|| format!("invalid configuration (env file: {})", env_path.display()))?;

            let provider = GeminiCliProvider::from_config(&cfg.assistant);
            if !provider.is_available().await {
                warn!(
                    "assistant '{}' did not answer --version; replies will report the failure",
                    provider.binary()
                );
            }

            let channel = TelegramChannel::new(&cfg.telegram);
            info!("relay starting (env file: {})", env_path.display());

            let gw = gateway::Gateway::new(Arc::new(channel), Arc::new(provider), &cfg.telegram);
            gw.run().await?;
        }
        Commands::Status => {
            println!("relay status\n");
            println!(
                "Env file: {} ({})",
                env_path.display(),
                if env_path.exists() { "found" } else { "missing" }
            );

            let vars = config::load_env(&env_path);
            match Config::resolve(&vars) {
                Ok(cfg) => {
                    println!("API URL: {}", cfg.telegram.api_url);
                    println!("Bot token: {}", redact_token(&cfg.telegram.bot_token));
                    println!("Allowed chats: {}", cfg.telegram.allowed_chats.join(", "));
                    println!(
                        "Assistant timeout: {}",
                        cfg.assistant
                            .timeout_secs
                            .map_or("none".to_string(), |s| format!("{s}s"))
                    );
                    println!();

                    let provider = GeminiCliProvider::from_config(&cfg.assistant);
                    let available = provider.check_cli().await;
                    println!(
                        "  {}: {}",
                        provider.binary(),
                        if available { "available" } else { "not found" }
                    );
                }
                Err(e) => println!("Config: {e}"),
            }
        }
    }

    Ok(())
}

/// Stdout logging, plus a non-blocking daily file when `log_dir` is set.
///
/// The returned guard must live until exit so buffered lines get flushed.
fn init_tracing(log_dir: Option<&Path>) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_layer = fmt::layer().with_target(false);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log dir {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, "relay.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Keep the bot id prefix, hide the secret part.
fn redact_token(token: &str) -> String {
    match token.split_once(':') {
        Some((id, secret)) if !secret.is_empty() => format!("{id}:***"),
        _ if token.is_empty() => "(empty)".to_string(),
        _ => "***".to_string(),
    }
}
