//! Output formatting utilities
//!
//! Provides table and JSON output formatting for CLI commands.

use crate::cli::args::OutputFormat;
use crate::domain::ColorTable;
use crate::services::{DeliveryResult, PreparedMessage};
use serde::Serialize;
use std::io::{self, Write};

/// Format and print output based on the selected format
pub fn print_output<T: Serialize + TableDisplay>(data: &T, format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Table => {
            writeln!(handle, "{}", data.to_table())?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string());
            writeln!(handle, "{}", json)?;
        }
        OutputFormat::Compact => {
            writeln!(handle, "{}", data.to_compact())?;
        }
    }

    Ok(())
}

/// Trait for types that can be displayed as a table
pub trait TableDisplay {
    /// Format as a table string
    fn to_table(&self) -> String;

    /// Format as a compact single line
    fn to_compact(&self) -> String {
        self.to_table().replace('\n', " | ")
    }
}

/// Delivery report for display
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryReport {
    pub kind: String,
    pub room_id: String,
    #[serde(flatten)]
    pub result: DeliveryResult,
}

impl TableDisplay for DeliveryReport {
    fn to_table(&self) -> String {
        let mark = if self.result.success { '✓' } else { '✗' };
        let mut output = format!(
            "{} {} notification to room {}: {}",
            mark, self.kind, self.room_id, self.result.outcome
        );

        if let Some(raw) = &self.result.raw_response {
            output.push_str(&format!("\n  HTTP {}: {}", raw.status, raw.body.trim()));
        }

        output
    }

    fn to_compact(&self) -> String {
        format!("{}:{}:{}", self.kind, self.room_id, self.result.outcome)
    }
}

/// Dry-run preview for display
#[derive(Debug, Clone, Serialize)]
pub struct DryRunReport {
    pub url: String,
    #[serde(flatten)]
    pub prepared: PreparedMessage,
    pub mention: Option<String>,
}

impl DryRunReport {
    /// Build a preview with the auth token masked
    pub fn new(url: &str, prepared: PreparedMessage, mention: Option<String>) -> Self {
        let mut prepared = prepared;
        prepared.params = prepared.params.redacted();
        Self {
            url: url.to_string(),
            prepared,
            mention,
        }
    }
}

impl TableDisplay for DryRunReport {
    fn to_table(&self) -> String {
        let mut output = format!("DRY RUN: GET {}\n", self.url);
        for (key, value) in self.prepared.params.iter() {
            output.push_str(&format!("  {}: {}\n", key, value));
        }
        if let Some(mention) = &self.mention {
            output.push_str(&format!("  then mention: {}\n", mention));
        }
        output
    }

    fn to_compact(&self) -> String {
        format!("{}:{}", self.prepared.rendered.color, self.prepared.rendered.text)
    }
}

/// Color table entry for display
#[derive(Debug, Clone, Serialize)]
pub struct ColorEntry {
    pub keyword: String,
    pub color: String,
}

/// Color table for display
#[derive(Debug, Clone, Serialize)]
pub struct ColorList {
    pub colors: Vec<ColorEntry>,
    pub default: String,
}

impl From<&ColorTable> for ColorList {
    fn from(table: &ColorTable) -> Self {
        Self {
            colors: table
                .entries()
                .map(|(keyword, color)| ColorEntry {
                    keyword: keyword.to_string(),
                    color: color.to_string(),
                })
                .collect(),
            default: crate::domain::Color::DEFAULT.to_string(),
        }
    }
}

impl TableDisplay for ColorList {
    fn to_table(&self) -> String {
        let mut output = String::new();
        for entry in &self.colors {
            output.push_str(&format!("{:<20} {}\n", entry.keyword, entry.color));
        }
        output.push_str(&format!("{:<20} {}", "(default)", self.default));
        output
    }

    fn to_compact(&self) -> String {
        self.colors
            .iter()
            .map(|e| format!("{}={}", e.keyword, e.color))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
