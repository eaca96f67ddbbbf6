mod common;
mod config;
mod demo;
mod store;
mod ui;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use store::{ReplyPolicy, StoreHandle};
use ui::ChatApp;

use config::AppConfig;

#[derive(Parser)]
#[command(
    name = "mock_chat",
    version,
    about = "Desktop chat client backed by an in-memory mock conversation engine"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    /// What happens to a pending reply when the user switches chats
    #[arg(long, value_enum)]
    reply_policy: Option<ReplyPolicy>,
    /// Seed for mock unread counts and reply picks
    #[arg(long)]
    seed: Option<u64>,
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Run headless: script a short session and log every snapshot (no UI)
    Demo {
        /// Messages to send in each scripted chat
        #[arg(long, default_value_t = 3)]
        messages: usize,
    },
}

fn apply_overrides(mut config: AppConfig, cli: &Cli) -> AppConfig {
    if let Some(policy) = cli.reply_policy {
        config.reply_policy = policy;
    }
    if let Some(seed) = cli.seed {
        config.rng_seed = Some(seed);
    }
    config
}

#[tokio::main]
async fn main() -> Result<(), eframe::Error> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let app_config = apply_overrides(config::load_config(&cli.config), &cli);
    let engine_config = app_config.engine_config();
    let reply_delay = engine_config.reply_delay;
    let store = store::spawn(engine_config);

    if let Some(Mode::Demo { messages }) = cli.mode {
        if let Err(err) = demo::run(store, messages, reply_delay).await {
            log::error!("Demo run failed: {err}");
        }
        return Ok(());
    }

    run_desktop(store).await
}

async fn run_desktop(store: StoreHandle) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions::default();
    let ui_store = store.clone();

    let result = eframe::run_native(
        "Mock Chat",
        options,
        Box::new(move |cc| {
            log::info!("Chat window opened");
            Ok(Box::new(ChatApp::new(cc, ui_store)))
        }),
    );

    if let Err(err) = store.shutdown().await {
        log::warn!("Store engine was already stopped: {err}");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flags_override_file_config() {
        let cli = Cli::parse_from(["mock_chat", "--reply-policy", "legacy", "--seed", "17"]);
        let config = apply_overrides(AppConfig::default(), &cli);
        assert_eq!(config.reply_policy, ReplyPolicy::Legacy);
        assert_eq!(config.rng_seed, Some(17));
        assert_eq!(config.reply_delay_ms, 1000);
        assert_eq!(cli.config, config::DEFAULT_CONFIG_PATH);
    }

    #[test]
    fn no_flags_keep_file_config() {
        let cli = Cli::parse_from(["mock_chat"]);
        let file = AppConfig {
            reply_policy: ReplyPolicy::Legacy,
            rng_seed: Some(3),
            ..AppConfig::default()
        };
        assert_eq!(apply_overrides(file.clone(), &cli), file);
        assert!(cli.mode.is_none());
    }

    #[test]
    fn demo_subcommand_parses() {
        let cli = Cli::parse_from(["mock_chat", "demo", "--messages", "5"]);
        assert!(matches!(cli.mode, Some(Mode::Demo { messages: 5 })));
    }
}
