use anyhow::Result;
use dotenvy::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use teloxide::prelude::*;

use vidgrab::cli::{Cli, Commands};
use vidgrab::core::{config, init_logger, install_panic_hook, log_extractor_availability, BotConfig};
use vidgrab::download::{extract_url, DownloadJob, Platform, SourceRegistry};
use vidgrab::storage::CountersStore;
use vidgrab::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps, TelegramTransport};

/// Main entry point for the Telegram bot
///
/// Parses CLI arguments and dispatches to appropriate subcommand.
///
/// # Errors
/// Returns an error if initialization fails (logging, bot creation, missing token).
#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env before any config static is read
    let _ = dotenv();

    let cli = Cli::parse_args();

    install_panic_hook();

    // Initialize logger (console + file)
    init_logger(&config::LOG_FILE_PATH)?;

    match cli.command {
        Some(Commands::Run) => run_bot().await,
        Some(Commands::Download { url, output }) => run_cli_download(url, output).await,
        Some(Commands::Stats { data_file }) => run_cli_stats(data_file).await,
        None => {
            log::info!("No command specified, running bot in default mode");
            run_bot().await
        }
    }
}

/// Run the bot in long polling mode until Ctrl-C
async fn run_bot() -> Result<()> {
    let bot_init_start = std::time::Instant::now();
    log::info!("Starting bot...");

    let token = config::BOT_TOKEN.as_str();
    if token.is_empty() {
        return Err(anyhow::anyhow!("BOT_TOKEN environment variable not set"));
    }

    let bot_config = Arc::new(BotConfig::from_env());
    fs_err::tokio::create_dir_all(&bot_config.download_dir).await?;
    log::info!("Download folder: {}", bot_config.download_dir.display());
    log::info!("Counters file: {}", bot_config.data_file.display());

    log_extractor_availability(&bot_config.ytdl_bin).await;

    let bot = create_bot(token)?;

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to register bot commands: {}", e);
    }

    let counters = Arc::new(CountersStore::new(bot_config.data_file.clone()));
    let sources = Arc::new(SourceRegistry::from_config(&bot_config)?);
    let transport = Arc::new(TelegramTransport::new(bot.clone()));
    let handler_deps = HandlerDeps::new(Arc::clone(&bot_config), counters, sources, transport);
    let deletions = handler_deps.deletions.clone();

    let handler = schema(handler_deps);

    log::info!("================================================");
    log::info!("🎉 Bot initialization complete in {:.2}s", bot_init_start.elapsed().as_secs_f64());
    log::info!("📡 Ready to receive updates!");
    log::info!("================================================");

    Dispatcher::builder(bot, handler)
        .enable_ctrlc_handler()
        .default_handler(|upd| async move {
            log::debug!("Unhandled update: {:?}", upd.kind);
        })
        .error_handler(LoggingErrorHandler::with_custom_text("An error has occurred in the dispatcher"))
        .build()
        .dispatch()
        .await;

    log::info!("Dispatcher shutdown gracefully");
    deletions.abort_all();
    Ok(())
}

/// Run CLI download command
async fn run_cli_download(url: String, output: Option<PathBuf>) -> Result<()> {
    println!("🎬 vidgrab CLI Download");
    println!("=======================");

    let url = extract_url(&url).ok_or_else(|| anyhow::anyhow!("Not a link: {}", url))?;
    let platform = Platform::classify(url).ok_or_else(|| anyhow::anyhow!("Unsupported link: {}", url))?;
    println!("URL: {}", url);
    println!("Platform: {}", platform);

    let mut bot_config = BotConfig::from_env();
    if let Some(output) = output {
        bot_config.download_dir = output;
    }
    fs_err::tokio::create_dir_all(&bot_config.download_dir).await?;

    let sources = SourceRegistry::from_config(&bot_config)?;
    let mut job = DownloadJob::new(url, platform, &bot_config.download_dir);

    match sources.fetch(&mut job).await {
        Some(path) => {
            let size = fs_err::tokio::metadata(&path).await?.len();
            println!("✅ Saved {} ({:.2} MB)", path.display(), size as f64 / (1024.0 * 1024.0));
            Ok(())
        }
        None => Err(anyhow::anyhow!("Download failed for {}", url)),
    }
}

/// Print the counters file
async fn run_cli_stats(data_file: Option<PathBuf>) -> Result<()> {
    let path = data_file.unwrap_or_else(|| PathBuf::from(config::DATA_FILE.as_str()));
    let record = CountersStore::new(path.clone()).load().await;

    println!("📊 {}", path.display());
    println!("Total users: {}", record.total_users);
    println!("Blocked users: {}", record.blocked_users);
    Ok(())
}
