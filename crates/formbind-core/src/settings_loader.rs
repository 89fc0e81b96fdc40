//! Settings loading from configuration files.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (deep-merged over the defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `FORMBIND_DEBUG` | `debug` |
//! | `FORMBIND_LOG_LEVEL` | `log_level` |
//! | `FORMBIND_RECURSIVE` | `recursive_discovery` |
//! | `FORMBIND_INCLUDE_HIDDEN` | `include_hidden_widgets` |
//! | `FORMBIND_DUPLICATE_BINDINGS` | `duplicate_bindings` |
//! | `FORMBIND_STRIP_PREFIXES` | `strip_prefixes` (comma-separated) |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use formbind_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file_with_env("config/formbind.toml").unwrap();
//! ```

use std::path::Path;

use crate::error::BindError;
use crate::settings::Settings;

/// Loads settings from a TOML string.
///
/// Any fields not present in the TOML keep their default values.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or cannot be deserialized.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, BindError> {
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| BindError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;
    merge_over_defaults(toml_to_json(toml_value), "TOML")
}

/// Loads settings from a TOML file.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, BindError> {
    from_toml_str(&read_config(path.as_ref(), "TOML")?)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<Settings, BindError> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string.
pub fn from_json_str(json_str: &str) -> Result<Settings, BindError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| BindError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;
    merge_over_defaults(json_value, "JSON")
}

/// Loads settings from a JSON file.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, BindError> {
    from_json_str(&read_config(path.as_ref(), "JSON")?)
}

/// Loads settings from a JSON file and then applies environment variable overrides.
pub fn from_json_file_with_env(path: impl AsRef<Path>) -> Result<Settings, BindError> {
    let mut settings = from_json_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies `FORMBIND_*` environment variable overrides to a settings struct.
///
/// Boolean variables accept "true"/"1"/"yes"; anything else is `false`.
/// An unparseable `FORMBIND_DUPLICATE_BINDINGS` is ignored with a warning.
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(val) = std::env::var("FORMBIND_DEBUG") {
        settings.debug = parse_flag(&val);
    }

    if let Ok(val) = std::env::var("FORMBIND_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Ok(val) = std::env::var("FORMBIND_RECURSIVE") {
        settings.recursive_discovery = parse_flag(&val);
    }

    if let Ok(val) = std::env::var("FORMBIND_INCLUDE_HIDDEN") {
        settings.include_hidden_widgets = parse_flag(&val);
    }

    if let Ok(val) = std::env::var("FORMBIND_DUPLICATE_BINDINGS") {
        match val.parse() {
            Ok(policy) => settings.duplicate_bindings = policy,
            Err(e) => tracing::warn!(error = %e, "ignoring FORMBIND_DUPLICATE_BINDINGS"),
        }
    }

    if let Ok(val) = std::env::var("FORMBIND_STRIP_PREFIXES") {
        settings.strip_prefixes = val
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }
}

// ============================================================
// Helpers
// ============================================================

fn parse_flag(val: &str) -> bool {
    matches!(val.to_lowercase().as_str(), "true" | "1" | "yes")
}

fn read_config(path: &Path, format: &str) -> Result<String, BindError> {
    tracing::debug!("Reading {format} settings from '{}'", path.display());
    Ok(std::fs::read_to_string(path)?)
}

fn merge_over_defaults(value: serde_json::Value, format: &str) -> Result<Settings, BindError> {
    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        BindError::ConfigurationError(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, value);
    serde_json::from_value(merged).map_err(|e| {
        BindError::ConfigurationError(format!("Failed to deserialize settings from {format}: {e}"))
    })
}

/// Converts a TOML value to a `serde_json::Value`.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => {
            let map: serde_json::Map<String, serde_json::Value> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            serde_json::Value::Object(map)
        }
    }
}

/// Deep-merges two JSON values. The `override_val` takes precedence.
fn merge_json(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    match (base, override_val) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(override_map)) => {
            for (key, override_v) in override_map {
                let merged = if let Some(base_v) = base_map.remove(&key) {
                    merge_json(base_v, override_v)
                } else {
                    override_v
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, override_val) => override_val,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::DuplicateBindingPolicy;

    // ── TOML loading ────────────────────────────────────────────────

    #[test]
    fn test_from_toml_str_basic() {
        let toml = r#"
            debug = false
            recursive_discovery = true
            duplicate_bindings = "keep_first"
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert!(!settings.debug);
        assert!(settings.recursive_discovery);
        assert_eq!(settings.duplicate_bindings, DuplicateBindingPolicy::KeepFirst);
        // Defaults preserved
        assert!(settings.include_hidden_widgets);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_from_toml_str_culture() {
        let toml = r#"
            decimal_separator = ","
            date_formats = ["%d.%m.%Y"]
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert_eq!(settings.decimal_separator, ',');
        assert_eq!(settings.date_formats, vec!["%d.%m.%Y".to_string()]);
        assert!(!settings.time_formats.is_empty());
    }

    #[test]
    fn test_from_toml_str_empty() {
        let settings = from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_from_toml_str_invalid() {
        let err = from_toml_str("debug = [").unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML"));
    }

    #[test]
    fn test_from_toml_str_wrong_type() {
        let err = from_toml_str("recursive_discovery = \"sometimes\"").unwrap_err();
        assert!(matches!(err, BindError::ConfigurationError(_)));
    }

    // ── JSON loading ────────────────────────────────────────────────

    #[test]
    fn test_from_json_str_basic() {
        let json = r#"{"strip_prefixes": ["all", "list"], "log_level": "debug"}"#;
        let settings = from_json_str(json).unwrap();
        assert_eq!(settings.strip_prefixes, vec!["all", "list"]);
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.excluded_categories.len(), 5);
    }

    #[test]
    fn test_from_json_str_invalid() {
        assert!(from_json_str("{not json").is_err());
    }

    #[test]
    fn test_from_file_missing() {
        let err = from_toml_file("/nonexistent/formbind.toml").unwrap_err();
        assert!(matches!(err, BindError::IoError(ref e) if e.kind() == std::io::ErrorKind::NotFound));
        assert!(err.to_string().starts_with("IO error"));
        assert!(matches!(
            from_json_file("/nonexistent/formbind.json").unwrap_err(),
            BindError::IoError(_)
        ));
    }

    #[test]
    fn test_from_toml_file_roundtrip() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("formbind_settings_{}.toml", std::process::id()));
        std::fs::write(&path, "include_hidden_widgets = false\n").unwrap();
        let settings = from_toml_file(&path).unwrap();
        assert!(!settings.include_hidden_widgets);
        std::fs::remove_file(&path).ok();
    }

    // ── Helpers ─────────────────────────────────────────────────────

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("TRUE"));
        assert!(parse_flag("1"));
        assert!(parse_flag("yes"));
        assert!(!parse_flag("off"));
    }

    #[test]
    fn test_merge_json_nested() {
        let base = serde_json::json!({"a": {"b": 1, "c": 2}, "d": 3});
        let over = serde_json::json!({"a": {"b": 10}});
        let merged = merge_json(base, over);
        assert_eq!(merged, serde_json::json!({"a": {"b": 10, "c": 2}, "d": 3}));
    }

    // ── Environment overrides ───────────────────────────────────────

    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    const ENV_VARS: [&str; 6] = [
        "FORMBIND_DEBUG",
        "FORMBIND_LOG_LEVEL",
        "FORMBIND_RECURSIVE",
        "FORMBIND_INCLUDE_HIDDEN",
        "FORMBIND_DUPLICATE_BINDINGS",
        "FORMBIND_STRIP_PREFIXES",
    ];

    /// Runs `f` with exactly `vars` set among the `FORMBIND_*` variables,
    /// restoring the previous environment afterwards.
    fn with_env<T>(vars: &[(&str, &str)], f: impl FnOnce() -> T) -> T {
        let _guard = ENV_LOCK
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let saved: Vec<(&str, Option<String>)> = ENV_VARS
            .iter()
            .map(|name| (*name, std::env::var(name).ok()))
            .collect();
        for name in ENV_VARS {
            std::env::remove_var(name);
        }
        for (name, value) in vars {
            std::env::set_var(name, value);
        }
        let result = f();
        for (name, value) in saved {
            match value {
                Some(v) => std::env::set_var(name, v),
                None => std::env::remove_var(name),
            }
        }
        result
    }

    #[test]
    fn test_env_overrides_every_mapping() {
        let settings = with_env(
            &[
                ("FORMBIND_DEBUG", "yes"),
                ("FORMBIND_LOG_LEVEL", "formbind=trace"),
                ("FORMBIND_RECURSIVE", "1"),
                ("FORMBIND_INCLUDE_HIDDEN", "false"),
                ("FORMBIND_DUPLICATE_BINDINGS", "keep-first"),
                ("FORMBIND_STRIP_PREFIXES", "all_, ,lookup_ "),
            ],
            from_env,
        );
        assert!(settings.debug);
        assert_eq!(settings.log_level, "formbind=trace");
        assert!(settings.recursive_discovery);
        assert!(!settings.include_hidden_widgets);
        assert_eq!(settings.duplicate_bindings, DuplicateBindingPolicy::KeepFirst);
        assert_eq!(settings.strip_prefixes, vec!["all_".to_string(), "lookup_".to_string()]);
    }

    #[test]
    fn test_env_invalid_policy_is_ignored() {
        let mut settings = Settings {
            duplicate_bindings: DuplicateBindingPolicy::Replace,
            ..Settings::default()
        };
        with_env(&[("FORMBIND_DUPLICATE_BINDINGS", "whatever")], || {
            apply_env_overrides(&mut settings);
        });
        assert_eq!(settings.duplicate_bindings, DuplicateBindingPolicy::Replace);
    }

    #[test]
    fn test_env_unset_keeps_file_values() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("formbind_env_{}.toml", std::process::id()));
        std::fs::write(&path, "recursive_discovery = true\nstrip_prefixes = [\"all_\"]\n").unwrap();
        let settings = with_env(&[("FORMBIND_RECURSIVE", "off")], || {
            from_toml_file_with_env(&path).unwrap()
        });
        std::fs::remove_file(&path).ok();
        assert!(!settings.recursive_discovery);
        assert_eq!(settings.strip_prefixes, vec!["all_".to_string()]);
        assert!(!settings.debug);
    }
}
