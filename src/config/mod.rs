//! Configuration system
//!
//! Handles TOML config file parsing and CLI argument merging.

pub mod builder;
pub mod file;

pub use builder::ConfigBuilder;
pub use file::ConfigFile;

use crate::domain::{Color, ColorTable, NotificationConfig, NotificationKind};
use crate::error::ConfigError;
use crate::services::DEFAULT_API_URL;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Chat API settings
    pub hipchat: HipchatConfig,
    /// Template settings
    pub templates: TemplateConfig,
    /// Keyword to color overrides, merged over the built-in table
    pub colors: BTreeMap<String, Color>,
}

/// Chat API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HipchatConfig {
    /// Message endpoint
    pub api_url: String,
    /// API auth token
    pub auth_token: Option<String>,
    /// Name shown as the message sender
    pub sender: String,
    /// Room id or name
    pub room_id: Option<String>,
    /// Trigger a notification in the chat client
    pub notify: bool,
    /// Users paged after a successful delivery
    pub mention: Vec<String>,
    /// Per-request timeout in seconds (none by default)
    pub timeout_secs: Option<u64>,
}

impl Default for HipchatConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            auth_token: None,
            sender: "Nagios".to_string(),
            room_id: None,
            notify: false,
            mention: Vec::new(),
            timeout_secs: None,
        }
    }
}

/// Template configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory holding `<kind>.html` templates
    pub dir: Option<PathBuf>,
}

impl Config {
    /// Validate and convert to per-delivery settings
    pub fn notification_config(
        &self,
        kind: NotificationKind,
    ) -> Result<NotificationConfig, ConfigError> {
        let token = self.hipchat.auth_token.clone().unwrap_or_default();
        let room = self.hipchat.room_id.clone().unwrap_or_default();

        Ok(NotificationConfig::new(
            kind,
            token,
            self.hipchat.sender.clone(),
            room,
            self.hipchat.notify,
        )?
        .with_mention(&self.hipchat.mention))
    }

    /// Built-in colors with the configured overrides applied
    pub fn color_table(&self) -> ColorTable {
        ColorTable::default().with_overrides(&self.colors)
    }

    /// Effective template directory
    pub fn template_dir(&self) -> PathBuf {
        self.templates
            .dir
            .clone()
            .unwrap_or_else(default_template_dir)
    }

    /// Effective request timeout
    pub fn timeout(&self) -> Option<Duration> {
        self.hipchat.timeout_secs.map(Duration::from_secs)
    }
}

/// `templates/` next to the running executable
pub fn default_template_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("templates")))
        .unwrap_or_else(|| PathBuf::from("templates"))
}
