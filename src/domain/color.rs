//! Severity colors
//!
//! Maps notification types and states to the chat room's message colors.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Message background color understood by the chat API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Color {
    Yellow,
    Red,
    Green,
    Purple,
    Gray,
    Random,
}

impl Color {
    /// Color used when a keyword has no mapping
    pub const DEFAULT: Color = Color::Red;

    /// API name of the color
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Yellow => "yellow",
            Self::Red => "red",
            Self::Green => "green",
            Self::Purple => "purple",
            Self::Gray => "gray",
            Self::Random => "random",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Color {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yellow" => Ok(Self::Yellow),
            "red" => Ok(Self::Red),
            "green" => Ok(Self::Green),
            "purple" => Ok(Self::Purple),
            "gray" | "grey" => Ok(Self::Gray),
            "random" => Ok(Self::Random),
            _ => Err(ConfigError::InvalidValue {
                key: "color".to_string(),
                message: format!("Unknown color: {}", s),
            }),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The notification type that defers coloring to the state
pub const PROBLEM: &str = "PROBLEM";

/// Keyword to color lookup table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorTable {
    entries: BTreeMap<String, Color>,
}

impl ColorTable {
    /// Create an empty table (every lookup falls back to the default)
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Add or replace an entry
    pub fn with_entry(mut self, keyword: impl Into<String>, color: Color) -> Self {
        self.entries.insert(keyword.into(), color);
        self
    }

    /// Merge overrides on top of this table
    pub fn with_overrides<'a, I>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a Color)>,
    {
        for (keyword, color) in overrides {
            self.entries.insert(keyword.clone(), *color);
        }
        self
    }

    /// Look up a keyword, falling back to [`Color::DEFAULT`]
    pub fn lookup(&self, keyword: &str) -> Color {
        self.entries.get(keyword).copied().unwrap_or(Color::DEFAULT)
    }

    /// Pick the message color for a notification
    ///
    /// Anything but a PROBLEM is colored by its notification type; a PROBLEM
    /// is colored by the current state.
    pub fn select(&self, notification_type: &str, state: &str) -> Color {
        if notification_type != PROBLEM {
            self.lookup(notification_type)
        } else {
            self.lookup(state)
        }
    }

    /// Iterate over all entries in keyword order
    pub fn entries(&self) -> impl Iterator<Item = (&str, Color)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl Default for ColorTable {
    fn default() -> Self {
        use Color::*;

        [
            // Notification types
            ("PROBLEM", Red),
            ("RECOVERY", Green),
            ("ACKNOWLEDGEMENT", Green),
            ("FLAPPINGSTART", Purple),
            ("FLAPPINGSTOP", Green),
            ("FLAPPINGDISABLED", Purple),
            ("DOWNTIMESTART", Gray),
            ("DOWNTIMEEND", Green),
            ("DOWNTIMECANCELLED", Gray),
            ("CUSTOM", Purple),
            // Service states
            ("OK", Green),
            ("WARNING", Yellow),
            ("CRITICAL", Red),
            ("UNKNOWN", Gray),
            // Host states
            ("UP", Green),
            ("DOWN", Red),
            ("UNREACHABLE", Red),
        ]
        .into_iter()
        .fold(Self::empty(), |table, (k, c)| table.with_entry(k, c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_uses_state() {
        let table = ColorTable::default();
        assert_eq!(table.select("PROBLEM", "CRITICAL"), table.lookup("CRITICAL"));
        assert_eq!(table.select("PROBLEM", "WARNING"), Color::Yellow);
    }

    #[test]
    fn test_non_problem_uses_type_regardless_of_state() {
        let table = ColorTable::default();
        assert_eq!(table.select("RECOVERY", "CRITICAL"), Color::Green);
        assert_eq!(table.select("RECOVERY", "WARNING"), Color::Green);
        assert_eq!(table.select("FLAPPINGSTART", "OK"), Color::Purple);
        assert_eq!(table.select("DOWNTIMESTART", "DOWN"), Color::Gray);
    }

    #[test]
    fn test_unknown_keyword_falls_back_to_red() {
        let table = ColorTable::default();
        assert_eq!(table.lookup("SOMETHING"), Color::Red);
        assert_eq!(table.select("PROBLEM", "weird"), Color::Red);
        assert_eq!(table.select("BOGUSTYPE", "OK"), Color::Red);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let table = ColorTable::default();
        assert_eq!(table.lookup("ok"), Color::Red);
    }

    #[test]
    fn test_overrides() {
        let overrides: BTreeMap<String, Color> = [
            ("WARNING".to_string(), Color::Purple),
            ("CUSTOMSTATE".to_string(), Color::Green),
        ]
        .into_iter()
        .collect();

        let table = ColorTable::default().with_overrides(&overrides);
        assert_eq!(table.lookup("WARNING"), Color::Purple);
        assert_eq!(table.lookup("CUSTOMSTATE"), Color::Green);
        assert_eq!(table.lookup("CRITICAL"), Color::Red);
    }

    #[test]
    fn test_color_parse_and_display() {
        assert_eq!("Green".parse::<Color>().unwrap(), Color::Green);
        assert_eq!("grey".parse::<Color>().unwrap(), Color::Gray);
        assert!("magenta".parse::<Color>().is_err());
        assert_eq!(Color::Purple.to_string(), "purple");
    }
}
