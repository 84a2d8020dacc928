//! Configuration builder
//!
//! Merges configuration from files and CLI arguments.

use crate::config::{Config, ConfigFile};
use crate::error::ConfigError;
use std::path::PathBuf;

/// Builder for merging configuration sources
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Load configuration from a file
    ///
    /// An explicit path must exist and parse; without one the default
    /// locations are searched and a missing file is not an error.
    pub fn with_file(mut self, path: Option<&str>) -> Result<Self, ConfigError> {
        let file_config = match path {
            Some(path) => Some(ConfigFile::load(path)?),
            None => ConfigFile::load_default(),
        };

        if let Some(cfg) = file_config {
            self.config = cfg;
        }

        Ok(self)
    }

    /// Override with CLI auth token
    pub fn with_token(mut self, token: Option<String>) -> Self {
        if let Some(t) = token {
            self.config.hipchat.auth_token = Some(t);
        }
        self
    }

    /// Override with CLI sender name
    pub fn with_sender(mut self, sender: Option<String>) -> Self {
        if let Some(s) = sender {
            self.config.hipchat.sender = s;
        }
        self
    }

    /// Override with CLI room
    pub fn with_room(mut self, room: Option<String>) -> Self {
        if let Some(r) = room {
            self.config.hipchat.room_id = Some(r);
        }
        self
    }

    /// Override with CLI notify flag
    pub fn with_notify(mut self, notify: Option<bool>) -> Self {
        if let Some(n) = notify {
            self.config.hipchat.notify = n;
        }
        self
    }

    /// Override with CLI mention list
    pub fn with_mention(mut self, mention: Option<Vec<String>>) -> Self {
        if let Some(m) = mention {
            self.config.hipchat.mention = m;
        }
        self
    }

    /// Override with CLI API endpoint
    pub fn with_api_url(mut self, url: Option<String>) -> Self {
        if let Some(u) = url {
            self.config.hipchat.api_url = u;
        }
        self
    }

    /// Override with CLI request timeout
    pub fn with_timeout(mut self, timeout_secs: Option<u64>) -> Self {
        if let Some(t) = timeout_secs {
            self.config.hipchat.timeout_secs = Some(t);
        }
        self
    }

    /// Override with CLI template directory
    pub fn with_template_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(d) = dir {
            self.config.templates.dir = Some(d);
        }
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
