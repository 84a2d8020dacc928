//! Message rendering service
//!
//! Picks the severity color for an alert and renders the kind's template
//! against an explicit variable set.

use crate::domain::{AlertEvent, Color, ColorTable};
use crate::error::TemplateError;

use minijinja::{AutoEscape, Environment, ErrorKind, UndefinedBehavior};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Rendered message text plus its color
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedMessage {
    pub text: String,
    pub color: Color,
}

/// Variables handed to a template
pub type TemplateContext = BTreeMap<&'static str, String>;

/// Legacy template names bound alongside the field names
const LEGACY_NAMES: &[(&str, &str)] = &[
    ("ntype", "notification_type"),
    ("hostaddress", "host_address"),
    ("hostoutput", "host_output"),
    ("servicedesc", "service_description"),
    ("hostalias", "host_alias"),
    ("serviceoutput", "service_output"),
    ("nagios_host", "reporting_host"),
    ("template_type", "kind"),
];

/// Service rendering alerts into message text
pub struct Renderer {
    env: Environment<'static>,
    template_dir: PathBuf,
    colors: ColorTable,
    reporting_host: String,
}

impl Renderer {
    /// Create a renderer loading `<kind>.html` files from `template_dir`
    pub fn new(
        template_dir: impl Into<PathBuf>,
        colors: ColorTable,
        reporting_host: &str,
    ) -> Self {
        let template_dir = template_dir.into();

        let mut env = Environment::new();
        env.set_loader(minijinja::path_loader(&template_dir));
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);

        Self {
            env,
            template_dir,
            colors,
            reporting_host: short_hostname(reporting_host).to_string(),
        }
    }

    /// Select the color and render the template for an alert
    pub fn render(&self, event: &AlertEvent) -> Result<RenderedMessage, TemplateError> {
        let color = self.select_color(event);
        let context = self.context(event, color);
        let name = event.kind().template_name();

        let template = self.env.get_template(&name).map_err(|e| match e.kind() {
            ErrorKind::TemplateNotFound => TemplateError::TemplateNotFound(
                self.template_dir.join(&name).display().to_string(),
            ),
            _ => TemplateError::Render(e.to_string()),
        })?;

        let text = template
            .render(&context)
            .map_err(|e| TemplateError::Render(e.to_string()))?;

        log::debug!("Rendered {} with color {}", name, color);
        Ok(RenderedMessage { text, color })
    }

    /// Color for an alert
    pub fn select_color(&self, event: &AlertEvent) -> Color {
        self.colors.select(event.notification_type(), event.state())
    }

    /// The exact variable set a template receives
    pub fn context(&self, event: &AlertEvent, color: Color) -> TemplateContext {
        let mut context: TemplateContext = event
            .named_fields()
            .into_iter()
            .map(|(k, v)| (k, v.to_string()))
            .collect();

        context.insert("kind", event.kind().to_string());
        context.insert("color", color.to_string());
        context.insert("reporting_host", self.reporting_host.clone());

        for &(legacy, name) in LEGACY_NAMES {
            if let Some(value) = context.get(name).cloned() {
                context.insert(legacy, value);
            }
        }
        context
    }
}

/// Hostname up to the first domain separator
pub fn short_hostname(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}

/// Short hostname of the local machine
pub fn local_short_hostname() -> std::io::Result<String> {
    let name = hostname::get()?;
    Ok(short_hostname(&name.to_string_lossy()).to_string())
}
