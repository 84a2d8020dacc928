//! Message delivery service
//!
//! Renders an alert, sends it as the primary message and, when the primary
//! send succeeded and users are configured, pages them with a plain-text
//! mention message. Each send happens exactly once; nothing is retried.

use crate::domain::{AlertEvent, MessageParams, NotificationConfig};
use crate::error::{Result, TransportError};
use crate::services::renderer::{RenderedMessage, Renderer};
use crate::transport::{RawResponse, Transport};

use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Default message endpoint of the chat API
pub const DEFAULT_API_URL: &str = "https://api.hipchat.com/v1/rooms/message";

/// How a single send ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SendOutcome {
    /// The API acknowledged the message
    Sent,
    /// The API answered with an `error` object
    ApiError {
        code: Option<String>,
        #[serde(rename = "type")]
        kind: Option<String>,
        message: Option<String>,
    },
    /// The API answered with neither `status` nor `error`
    UnexpectedResponse,
    /// No usable response (connection, timeout, non-JSON body)
    TransportFailure {
        #[serde(serialize_with = "serialize_display")]
        error: TransportError,
    },
}

impl SendOutcome {
    /// Whether the message was delivered
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Sent)
    }

    /// Classify a parsed response body
    ///
    /// An `error` object wins over `status`; a body with neither is unexpected.
    pub fn from_body(body: &Value) -> Self {
        if let Some(error) = body.get("error") {
            Self::ApiError {
                code: text_field(error, "code"),
                kind: text_field(error, "type"),
                message: text_field(error, "message"),
            }
        } else if body.get("status").is_none() {
            Self::UnexpectedResponse
        } else {
            Self::Sent
        }
    }

    /// Text logged for this outcome
    pub fn log_line(&self) -> String {
        match self {
            Self::Sent => "Message sent".to_string(),
            Self::ApiError {
                code,
                kind,
                message,
            } => format!(
                "{} - {}: {}",
                or_none(code),
                or_none(kind),
                or_none(message)
            ),
            Self::UnexpectedResponse => "Unexpected response".to_string(),
            Self::TransportFailure { error } => format!("Transport failure: {}", error),
        }
    }

    fn log(&self) {
        if self.is_success() {
            log::debug!("{}", self.log_line());
        } else {
            log::error!("{}", self.log_line());
        }
    }
}

impl fmt::Display for SendOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sent => write!(f, "sent"),
            Self::ApiError {
                code,
                kind,
                message,
            } => write!(
                f,
                "API error {} - {}: {}",
                or_none(code),
                or_none(kind),
                or_none(message)
            ),
            Self::UnexpectedResponse => write!(f, "unexpected response"),
            Self::TransportFailure { error } => write!(f, "transport failure: {}", error),
        }
    }
}

fn text_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn or_none(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("None")
}

fn serialize_display<S: serde::Serializer>(
    value: &TransportError,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Result of a delivery, describing the primary message only
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryResult {
    pub success: bool,
    pub outcome: SendOutcome,
    /// Absent when the request never produced an HTTP response
    pub raw_response: Option<RawResponse>,
}

/// A rendered message and the parameters it would be sent with
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreparedMessage {
    pub rendered: RenderedMessage,
    pub params: MessageParams,
}

/// Service delivering alerts to one chat room
pub struct Deliverer<T: Transport> {
    transport: T,
    renderer: Renderer,
    config: NotificationConfig,
    api_url: String,
}

impl<T: Transport> Deliverer<T> {
    /// Create a new deliverer targeting [`DEFAULT_API_URL`]
    pub fn new(transport: T, renderer: Renderer, config: NotificationConfig) -> Self {
        Self {
            transport,
            renderer,
            config,
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    /// Builder: set the message endpoint
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Parse and render an alert and build the primary message parameters
    ///
    /// Fails on malformed payloads and template problems; performs no I/O
    /// besides reading the template.
    pub fn prepare(
        &self,
        raw_input: &str,
        extra_params: &[(String, String)],
    ) -> Result<PreparedMessage> {
        let event = AlertEvent::parse(self.config.kind(), raw_input)?;
        let rendered = self.renderer.render(&event)?;

        let mut params = MessageParams::for_message(&self.config, &rendered.text, rendered.color);
        params.merge(extra_params);

        Ok(PreparedMessage { rendered, params })
    }

    /// Render and deliver an alert
    ///
    /// Errors are returned only for problems found before the network is
    /// touched. Send failures are reported in the [`DeliveryResult`].
    pub fn deliver_payload(
        &self,
        raw_input: &str,
        extra_params: &[(String, String)],
    ) -> Result<DeliveryResult> {
        let prepared = self.prepare(raw_input, extra_params)?;

        let (outcome, raw_response) = self.send_message(&prepared.params);
        let success = outcome.is_success();

        if success {
            self.send_mention(&prepared.rendered);
        }

        Ok(DeliveryResult {
            success,
            outcome,
            raw_response,
        })
    }

    /// Send one message and interpret the response
    pub fn send_message(&self, params: &MessageParams) -> (SendOutcome, Option<RawResponse>) {
        let (outcome, raw_response) = match self.transport.get(&self.api_url, params) {
            Ok(raw) => {
                let outcome = match raw.json() {
                    Ok(body) => SendOutcome::from_body(&body),
                    Err(error) => SendOutcome::TransportFailure { error },
                };
                (outcome, Some(raw))
            }
            Err(error) => (SendOutcome::TransportFailure { error }, None),
        };

        outcome.log();
        (outcome, raw_response)
    }

    fn send_mention(&self, rendered: &RenderedMessage) {
        let Some(text) = self.config.mention_text() else {
            return;
        };

        let mut params = MessageParams::for_message(&self.config, &text, rendered.color);
        params.insert(MessageParams::MESSAGE_FORMAT, "text");

        let (outcome, _) = self.send_message(&params);
        if !outcome.is_success() {
            log::warn!("Mention message was not delivered: {}", outcome);
        }
    }

    /// Endpoint messages are sent to
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Notification settings
    pub fn config(&self) -> &NotificationConfig {
        &self.config
    }

    /// Underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ColorTable, NotificationKind};
    use crate::error::{AppError, PayloadError, TemplateError};
    use crate::mock::MockTransport;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    const HOST_INPUT: &str = "myhost|2024-01-01T00:00:00|PROBLEM|10.0.0.1|DOWN|no ping reply";

    fn templates() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("host.html"),
            "{{ hostname }} {{ state }} {{ color }}",
        )
        .unwrap();
        dir
    }

    fn deliverer(
        dir: &TempDir,
        transport: MockTransport,
        notify: bool,
        mention: &[&str],
    ) -> Deliverer<MockTransport> {
        let config =
            NotificationConfig::new(NotificationKind::Host, "secret", "Nagios", "ops", notify)
                .unwrap()
                .with_mention(mention);
        let renderer = Renderer::new(dir.path(), ColorTable::default(), "nagios.example.com");
        Deliverer::new(transport, renderer, config)
    }

    #[test]
    fn test_outcome_from_body() {
        assert_eq!(
            SendOutcome::from_body(&json!({"status": "sent"})),
            SendOutcome::Sent
        );
        assert_eq!(
            SendOutcome::from_body(&json!({
                "error": {"message": "Invalid room", "type": "Not Found", "code": 404}
            })),
            SendOutcome::ApiError {
                code: Some("404".to_string()),
                kind: Some("Not Found".to_string()),
                message: Some("Invalid room".to_string()),
            }
        );
        assert_eq!(
            SendOutcome::from_body(&json!({"error": {}})),
            SendOutcome::ApiError {
                code: None,
                kind: None,
                message: None,
            }
        );
        assert_eq!(
            SendOutcome::from_body(&json!({})),
            SendOutcome::UnexpectedResponse
        );
        assert_eq!(
            SendOutcome::from_body(&json!([1, 2])),
            SendOutcome::UnexpectedResponse
        );
    }

    #[test]
    fn test_outcome_log_lines() {
        let api_error = SendOutcome::from_body(&json!({
            "error": {"message": "Invalid room", "type": "Not Found", "code": 404}
        }));
        assert_eq!(api_error.log_line(), "404 - Not Found: Invalid room");

        let partial = SendOutcome::from_body(&json!({"error": {"message": "Bad token"}}));
        assert_eq!(partial.log_line(), "None - None: Bad token");

        let unexpected = SendOutcome::from_body(&json!({"foo": 1}));
        assert_eq!(unexpected.log_line(), "Unexpected response");

        let failure = SendOutcome::TransportFailure {
            error: TransportError::Timeout,
        };
        assert_eq!(failure.log_line(), "Transport failure: request timed out");

        let refused = SendOutcome::TransportFailure {
            error: TransportError::Connection("refused".to_string()),
        };
        assert!(refused.log_line().starts_with("Transport failure: "));
        assert_ne!(refused.log_line(), unexpected.log_line());
        assert_eq!(SendOutcome::Sent.log_line(), "Message sent");
    }

    #[test]
    fn test_error_wins_over_status() {
        let body = json!({"status": "sent", "error": {"message": "nope"}});
        assert!(!SendOutcome::from_body(&body).is_success());
    }

    #[test]
    fn test_primary_message_parameters() {
        let dir = templates();
        let d = deliverer(&dir, MockTransport::new(), false, &[]);

        let result = d.deliver_payload(HOST_INPUT, &[]).unwrap();
        assert!(result.success);
        assert_eq!(result.outcome, SendOutcome::Sent);

        let requests = d.transport().requests();
        assert_eq!(requests.len(), 1);
        let (url, params) = &requests[0];
        assert_eq!(url, DEFAULT_API_URL);
        assert_eq!(params.get("room_id"), Some("ops"));
        assert_eq!(params.get("from"), Some("Nagios"));
        assert_eq!(params.get("message"), Some("myhost DOWN red"));
        assert_eq!(params.get("color"), Some("red"));
        assert_eq!(params.get("notify"), Some("0"));
        assert_eq!(params.get("auth_token"), Some("secret"));
        assert!(!params.contains("message_format"));
    }

    #[test]
    fn test_notify_flag_is_one() {
        let dir = templates();
        let d = deliverer(&dir, MockTransport::new(), true, &[]);
        d.deliver_payload(HOST_INPUT, &[]).unwrap();
        assert_eq!(d.transport().requests()[0].1.get("notify"), Some("1"));
    }

    #[test]
    fn test_extra_params_override() {
        let dir = templates();
        let d = deliverer(&dir, MockTransport::new(), false, &[])
            .with_api_url("http://localhost/msg");
        let extra = vec![
            ("from".to_string(), "Icinga".to_string()),
            ("message_format".to_string(), "html".to_string()),
        ];

        d.deliver_payload(HOST_INPUT, &extra).unwrap();
        let (url, params) = &d.transport().requests()[0];
        assert_eq!(url, "http://localhost/msg");
        assert_eq!(params.get("from"), Some("Icinga"));
        assert_eq!(params.get("message_format"), Some("html"));
    }

    #[test]
    fn test_mention_after_successful_send() {
        let dir = templates();
        let transport = MockTransport::new().with_json(200, r#"{"status": "sent"}"#);
        let d = deliverer(&dir, transport, true, &["alice", "bob"]);

        let result = d.deliver_payload(HOST_INPUT, &[]).unwrap();
        assert!(result.success);

        let requests = d.transport().requests();
        assert_eq!(requests.len(), 2);

        let (_, primary) = &requests[0];
        assert_eq!(primary.get("message"), Some("myhost DOWN red"));
        assert!(!primary.contains("message_format"));

        let (_, mention) = &requests[1];
        assert_eq!(mention.get("message"), Some("@alice @bob"));
        assert_eq!(mention.get("message_format"), Some("text"));
        assert_eq!(mention.get("color"), Some("red"));
        assert_eq!(mention.get("notify"), Some("1"));
        assert_eq!(mention.get("room_id"), Some("ops"));
        assert_eq!(mention.get("from"), Some("Nagios"));
        assert_eq!(mention.get("auth_token"), Some("secret"));
    }

    #[test]
    fn test_mention_does_not_carry_extra_params() {
        let dir = templates();
        let d = deliverer(&dir, MockTransport::new(), false, &["alice"]);
        let extra = vec![("color".to_string(), "purple".to_string())];

        d.deliver_payload(HOST_INPUT, &extra).unwrap();
        let requests = d.transport().requests();
        assert_eq!(requests[0].1.get("color"), Some("purple"));
        assert_eq!(requests[1].1.get("color"), Some("red"));
    }

    #[test]
    fn test_api_error_skips_mention() {
        let dir = templates();
        let transport = MockTransport::new().with_json(
            404,
            r#"{"error": {"message": "Invalid room", "type": "Not Found", "code": 404}}"#,
        );
        let d = deliverer(&dir, transport, false, &["alice", "bob"]);

        let result = d.deliver_payload(HOST_INPUT, &[]).unwrap();
        assert!(!result.success);
        assert!(matches!(
            result.outcome,
            SendOutcome::ApiError { ref message, .. } if message.as_deref() == Some("Invalid room")
        ));
        assert_eq!(result.raw_response.as_ref().map(|r| r.status), Some(404));
        assert_eq!(d.transport().request_count(), 1);
    }

    #[test]
    fn test_unexpected_response() {
        let dir = templates();
        let transport = MockTransport::new().with_json(200, r#"{"ok": true}"#);
        let d = deliverer(&dir, transport, false, &["alice"]);

        let result = d.deliver_payload(HOST_INPUT, &[]).unwrap();
        assert!(!result.success);
        assert_eq!(result.outcome, SendOutcome::UnexpectedResponse);
        assert_eq!(d.transport().request_count(), 1);
    }

    #[test]
    fn test_transport_failure_is_soft() {
        let dir = templates();
        let transport =
            MockTransport::new().with_error(TransportError::Connection("refused".to_string()));
        let d = deliverer(&dir, transport, false, &["alice"]);

        let result = d.deliver_payload(HOST_INPUT, &[]).unwrap();
        assert!(!result.success);
        assert!(result.raw_response.is_none());
        assert!(matches!(
            result.outcome,
            SendOutcome::TransportFailure {
                error: TransportError::Connection(_)
            }
        ));
        assert_eq!(d.transport().request_count(), 1);
    }

    #[test]
    fn test_non_json_body_is_transport_failure() {
        let dir = templates();
        let transport = MockTransport::new().with_json(502, "<html>Bad Gateway</html>");
        let d = deliverer(&dir, transport, false, &[]);

        let result = d.deliver_payload(HOST_INPUT, &[]).unwrap();
        assert!(!result.success);
        assert!(matches!(
            result.outcome,
            SendOutcome::TransportFailure {
                error: TransportError::InvalidJson(_)
            }
        ));
        assert_eq!(result.raw_response.map(|r| r.status), Some(502));
    }

    #[test]
    fn test_failed_mention_does_not_change_result() {
        let dir = templates();
        let transport = MockTransport::new()
            .with_json(200, r#"{"status": "sent"}"#)
            .with_json(400, r#"{"error": {"message": "Bad mention"}}"#);
        let d = deliverer(&dir, transport, false, &["alice"]);

        let result = d.deliver_payload(HOST_INPUT, &[]).unwrap();
        assert!(result.success);
        assert_eq!(result.outcome, SendOutcome::Sent);
        assert_eq!(result.raw_response.map(|r| r.status), Some(200));
        assert_eq!(d.transport().request_count(), 2);
    }

    #[test]
    fn test_malformed_payload_sends_nothing() {
        let dir = templates();
        let d = deliverer(&dir, MockTransport::new(), false, &["alice"]);

        let err = d.deliver_payload("a|b|c", &[]).unwrap_err();
        assert!(matches!(
            err,
            AppError::Payload(PayloadError::MalformedPayload { .. })
        ));
        assert_eq!(d.transport().request_count(), 0);
    }

    #[test]
    fn test_missing_template_sends_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let d = deliverer(&dir, MockTransport::new(), false, &[]);

        let err = d.deliver_payload(HOST_INPUT, &[]).unwrap_err();
        assert!(matches!(
            err,
            AppError::Template(TemplateError::TemplateNotFound(_))
        ));
        assert_eq!(d.transport().request_count(), 0);
    }

    #[test]
    fn test_recovery_colored_by_type() {
        let dir = templates();
        let d = deliverer(&dir, MockTransport::new(), false, &[]);

        let prepared = d
            .prepare("myhost|now|RECOVERY|10.0.0.1|DOWN|back", &[])
            .unwrap();
        assert_eq!(prepared.params.get("color"), Some("green"));
        assert_eq!(d.transport().request_count(), 0);
    }
}
