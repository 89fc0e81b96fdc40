//! Binder settings.
//!
//! [`Settings`] holds everything a binder can be configured with: discovery
//! defaults, the duplicate-binding policy, the conversion culture, and
//! logging. Every field has a default, so a partial configuration file only
//! needs to name what it changes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BindError;

/// What discovery does when a widget is claimed by a second property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateBindingPolicy {
    /// Fail the discovery call without committing any of its bindings.
    #[default]
    Reject,
    /// Keep the earlier binding and log a warning.
    KeepFirst,
    /// Overwrite the earlier binding and log a warning.
    Replace,
}

impl fmt::Display for DuplicateBindingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Reject => "reject",
            Self::KeepFirst => "keep_first",
            Self::Replace => "replace",
        };
        write!(f, "{name}")
    }
}

impl FromStr for DuplicateBindingPolicy {
    type Err = BindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "keep_first" | "keep-first" => Ok(Self::KeepFirst),
            "replace" => Ok(Self::Replace),
            other => Err(BindError::ConfigurationError(format!(
                "Unknown duplicate binding policy '{other}'"
            ))),
        }
    }
}

/// The complete set of binder settings.
///
/// # Examples
///
/// ```
/// use formbind_core::settings::{DuplicateBindingPolicy, Settings};
///
/// let settings = Settings::default();
/// assert!(settings.include_hidden_widgets);
/// assert_eq!(settings.duplicate_bindings, DuplicateBindingPolicy::Reject);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    // ── Core ─────────────────────────────────────────────────────────

    /// Whether debug mode is enabled (pretty logs instead of JSON).
    pub debug: bool,

    // ── Discovery ────────────────────────────────────────────────────

    /// Whether discovery descends into container widgets.
    pub recursive_discovery: bool,
    /// Widget category names never matched by naming convention.
    pub excluded_categories: Vec<String>,
    /// How conflicting widget claims are resolved.
    pub duplicate_bindings: DuplicateBindingPolicy,
    /// Prefixes stripped from data-source property names.
    pub strip_prefixes: Vec<String>,

    // ── Synchronization ──────────────────────────────────────────────

    /// Whether `view_to_model` reads hidden widgets by default.
    pub include_hidden_widgets: bool,

    // ── Culture ──────────────────────────────────────────────────────

    /// Decimal separator used when parsing and formatting numbers.
    pub decimal_separator: char,
    /// `chrono` formats tried, in order, when parsing dates.
    pub date_formats: Vec<String>,
    /// `chrono` formats tried, in order, when parsing date-times.
    pub datetime_formats: Vec<String>,
    /// `chrono` formats tried, in order, when parsing times.
    pub time_formats: Vec<String>,

    // ── Logging ──────────────────────────────────────────────────────

    /// The log level (e.g. "info", "debug", "warn").
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,

            recursive_discovery: false,
            excluded_categories: ["Label", "Button", "PictureBox", "Panel", "GroupBox"]
                .into_iter()
                .map(String::from)
                .collect(),
            duplicate_bindings: DuplicateBindingPolicy::Reject,
            strip_prefixes: Vec::new(),

            include_hidden_widgets: true,

            decimal_separator: '.',
            date_formats: vec!["%Y-%m-%d".to_string()],
            datetime_formats: vec![
                "%Y-%m-%dT%H:%M:%S%.f".to_string(),
                "%Y-%m-%d %H:%M:%S%.f".to_string(),
                "%Y-%m-%dT%H:%M".to_string(),
                "%Y-%m-%d %H:%M".to_string(),
            ],
            time_formats: vec!["%H:%M:%S%.f".to_string(), "%H:%M".to_string()],

            log_level: "info".to_string(),
        }
    }
}
