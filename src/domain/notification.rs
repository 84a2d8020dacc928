//! Notification settings and message parameters
//!
//! [`NotificationConfig`] is validated on construction (fail-fast) so that
//! no delivery is ever attempted with an incomplete configuration.

use crate::domain::{Color, NotificationKind};
use crate::error::ConfigError;
use serde::Serialize;
use std::collections::BTreeMap;

/// Validated per-delivery settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationConfig {
    kind: NotificationKind,
    auth_token: String,
    sender: String,
    room_id: String,
    notify: bool,
    mention: Vec<String>,
}

impl NotificationConfig {
    /// Create a new notification config
    ///
    /// # Errors
    /// Returns `ConfigError::MissingField` if the token, sender or room is empty.
    pub fn new(
        kind: NotificationKind,
        auth_token: impl Into<String>,
        sender: impl Into<String>,
        room_id: impl Into<String>,
        notify: bool,
    ) -> Result<Self, ConfigError> {
        let auth_token = required("auth_token", auth_token.into())?;
        let sender = required("sender", sender.into())?;
        let room_id = required("room_id", room_id.into())?;

        Ok(Self {
            kind,
            auth_token,
            sender,
            room_id,
            notify,
            mention: Vec::new(),
        })
    }

    /// Set the users paged after a successful delivery
    pub fn with_mention<I, S>(mut self, users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.mention = users.into_iter().map(|u| u.as_ref().to_string()).collect();
        self
    }

    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    pub fn auth_token(&self) -> &str {
        &self.auth_token
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    pub fn notify(&self) -> bool {
        self.notify
    }

    pub fn mention(&self) -> &[String] {
        &self.mention
    }

    /// Text of the mention footer, e.g. `@alice @bob`
    pub fn mention_text(&self) -> Option<String> {
        if self.mention.is_empty() {
            return None;
        }
        Some(
            self.mention
                .iter()
                .map(|m| format!("@{}", m))
                .collect::<Vec<_>>()
                .join(" "),
        )
    }
}

fn required(key: &str, value: String) -> Result<String, ConfigError> {
    if value.trim().is_empty() {
        Err(ConfigError::MissingField(key.to_string()))
    } else {
        Ok(value)
    }
}

/// Query parameters of one message send
///
/// Keys are unique; inserting an existing key replaces its value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MessageParams(BTreeMap<String, String>);

impl MessageParams {
    pub const ROOM_ID: &'static str = "room_id";
    pub const FROM: &'static str = "from";
    pub const MESSAGE: &'static str = "message";
    pub const COLOR: &'static str = "color";
    pub const NOTIFY: &'static str = "notify";
    pub const AUTH_TOKEN: &'static str = "auth_token";
    pub const MESSAGE_FORMAT: &'static str = "message_format";

    /// Parameters shared by the primary and the mention message
    pub fn for_message(config: &NotificationConfig, message: &str, color: Color) -> Self {
        let mut params = Self::default();
        params.insert(Self::ROOM_ID, config.room_id());
        params.insert(Self::FROM, config.sender());
        params.insert(Self::MESSAGE, message);
        params.insert(Self::COLOR, color.as_str());
        params.insert(Self::NOTIFY, if config.notify() { "1" } else { "0" });
        params.insert(Self::AUTH_TOKEN, config.auth_token());
        params
    }

    /// Insert or replace a parameter
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Merge caller-supplied parameters; they win on key collision
    pub fn merge(&mut self, extra: &[(String, String)]) {
        for (key, value) in extra {
            self.0.insert(key.clone(), value.clone());
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Iterate over key/value pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copy with the auth token masked, for printing
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.contains(Self::AUTH_TOKEN) {
            copy.insert(Self::AUTH_TOKEN, "********");
        }
        copy
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
