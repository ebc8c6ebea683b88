mod command;
mod config;
mod format;
mod providers;
mod relay;

use std::sync::Arc;

use teloxide::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::prelude::*;

use config::Config;
use relay::Relay;

#[tokio::main]
async fn main() {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "infotick.json".to_string());
    let config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    // Setup logging: stdout always, plus a file layer when log_dir is set
    let registry = tracing_subscriber::registry().with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stdout)
            .with_filter(
                tracing_subscriber::EnvFilter::from_default_env()
                    .add_directive(tracing::Level::INFO.into()),
            ),
    );

    let _guard = if let Some(ref log_dir) = config.log_dir {
        std::fs::create_dir_all(log_dir).ok();
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_dir.join("infotick.log"))
            .expect("Failed to open log file");
        let (non_blocking, guard) = tracing_appender::non_blocking(log_file);
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(false)
                    .with_filter(
                        tracing_subscriber::EnvFilter::from_default_env()
                            .add_directive(tracing::Level::INFO.into()),
                    ),
            )
            .init();
        Some(guard)
    } else {
        registry.init();
        None
    };

    info!("🚀 Starting infotick...");
    info!("Loaded config from {config_path}");

    let bot = Bot::new(&config.telegram_bot_token);
    let relay = Arc::new(Relay::new(&config));

    let handler = dptree::entry().branch(Update::filter_message().endpoint(handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![relay])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

async fn handle_message(bot: Bot, msg: Message, relay: Arc<Relay>) -> ResponseResult<()> {
    // Photos, stickers, joins and other non-text updates get no reply
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let text_preview: String = text.chars().take(100).collect();
    info!("📨 Message in chat {}: \"{text_preview}\"", msg.chat.id);

    let reply = relay.reply(text).await;

    if let Err(e) = bot.send_message(msg.chat.id, reply).await {
        warn!("Failed to send reply: {e}");
    }

    Ok(())
}
