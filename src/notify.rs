//! Library entry point
//!
//! Wires configuration, renderer and HTTP transport into a [`Deliverer`]
//! and runs one delivery.

use crate::config::{Config, HipchatConfig, TemplateConfig};
use crate::domain::NotificationKind;
use crate::error::{AppError, Result};
use crate::services::{
    local_short_hostname, DeliveryResult, Deliverer, Renderer, DEFAULT_API_URL,
};
use crate::transport::HttpTransport;
use std::path::PathBuf;

/// Everything needed for one notification
#[derive(Debug, Clone, Default)]
pub struct NotifyRequest {
    /// Notification kind label (host, short-host, service, short-service)
    pub kind: String,
    /// Pipe-delimited payload
    pub raw_input: String,
    pub auth_token: String,
    pub sender: String,
    pub room_id: String,
    pub notify: bool,
    /// Users paged after a successful delivery
    pub mention: Vec<String>,
    /// Extra query parameters for the primary message
    pub extra_params: Vec<(String, String)>,
    /// Template directory; defaults to `templates/` next to the executable
    pub template_dir: Option<PathBuf>,
    /// Message endpoint; defaults to [`DEFAULT_API_URL`]
    pub api_url: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
}

impl NotifyRequest {
    fn to_config(&self) -> Config {
        Config {
            hipchat: HipchatConfig {
                api_url: self
                    .api_url
                    .clone()
                    .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
                auth_token: Some(self.auth_token.clone()),
                sender: self.sender.clone(),
                room_id: Some(self.room_id.clone()),
                notify: self.notify,
                mention: self.mention.clone(),
                timeout_secs: self.timeout_secs,
            },
            templates: TemplateConfig {
                dir: self.template_dir.clone(),
            },
            colors: Default::default(),
        }
    }
}

/// Render and deliver one notification over HTTP
///
/// # Errors
/// Unknown kinds, missing settings, malformed payloads and template problems
/// are returned before any request is made. Send failures are reported in
/// the returned [`DeliveryResult`].
pub fn notify(request: &NotifyRequest) -> Result<DeliveryResult> {
    let kind: NotificationKind = request.kind.parse()?;
    let deliverer = http_deliverer(&request.to_config(), kind)?;
    deliverer.deliver_payload(&request.raw_input, &request.extra_params)
}

/// Build an HTTP-backed deliverer from a merged configuration
pub fn http_deliverer(
    config: &Config,
    kind: NotificationKind,
) -> Result<Deliverer<HttpTransport>> {
    let notification = config.notification_config(kind)?;
    let renderer = Renderer::new(
        config.template_dir(),
        config.color_table(),
        &local_short_hostname()?,
    );
    let transport = HttpTransport::new(config.timeout())
        .map_err(|e| AppError::DeliveryFailed(format!("cannot create HTTP client: {}", e)))?;

    Ok(Deliverer::new(transport, renderer, notification).with_api_url(&config.hipchat.api_url))
}
