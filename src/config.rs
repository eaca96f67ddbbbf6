use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::store::{EngineConfig, ReplyPolicy};

pub const DEFAULT_CONFIG_PATH: &str = "config/mock_chat.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Delay before the mock peer answers, in milliseconds.
    pub reply_delay_ms: u64,
    pub reply_policy: ReplyPolicy,
    /// Fixed seed for unread counts and reply picks; random when absent.
    pub rng_seed: Option<u64>,
    pub select_first_chat: bool,
    pub command_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: 1000,
            reply_policy: ReplyPolicy::default(),
            rng_seed: None,
            select_first_chat: true,
            command_capacity: 100,
        }
    }
}

impl AppConfig {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            reply_delay: Duration::from_millis(self.reply_delay_ms),
            reply_policy: self.reply_policy,
            rng_seed: self.rng_seed,
            select_first_chat: self.select_first_chat,
            command_capacity: self.command_capacity,
            ..EngineConfig::default()
        }
    }
}

pub fn load_config(path: &str) -> AppConfig {
    let path = Path::new(path);
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Failed to parse config file {}: {err}", path.display());
                AppConfig::default()
            }
        },
        Err(err) => {
            log::info!(
                "Config file {} not found ({err}); using defaults",
                path.display()
            );
            AppConfig::default()
        }
    }
}
