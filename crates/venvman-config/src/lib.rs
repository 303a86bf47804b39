//! Persisted user settings for venvman
//!
//! Decoration prefix/suffix/separator, the ordered list of enabled
//! decoration fields, and the dismissed-warning flag. Stored as TOML in
//! the user config dir, loaded at startup, written only on explicit set.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use venvman_core::decoration::{self, DecorationField};
use venvman_core::pyvenv_cfg::VenvInfo;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings: {0}")]
    Read(#[source] std::io::Error),

    #[error("Failed to write settings: {0}")]
    Write(#[source] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Could not determine config directory")]
    NoConfigDir,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Settings {
    /// Text before the decoration, e.g. " ["
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Text after the decoration, e.g. "]"
    #[serde(default = "default_suffix")]
    pub suffix: String,

    /// Text between fields, e.g. " - "
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Enabled decoration fields by symbolic name, in display order.
    /// Unknown names are ignored when materialized.
    #[serde(default = "default_fields")]
    pub fields: Vec<String>,

    /// Set once the user dismisses the missing-Python startup warning
    #[serde(default)]
    pub dismissed_python_warning: bool,
}

fn default_prefix() -> String {
    " [".to_string()
}

fn default_suffix() -> String {
    "]".to_string()
}

fn default_separator() -> String {
    " - ".to_string()
}

fn default_fields() -> Vec<String> {
    DecorationField::ALL
        .iter()
        .map(|field| field.name().to_string())
        .collect()
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            prefix: default_prefix(),
            suffix: default_suffix(),
            separator: default_separator(),
            fields: default_fields(),
            dismissed_python_warning: false,
        }
    }
}

impl Settings {
    /// Resolve the settings file location.
    ///
    /// Honors an explicit override via VENVMAN_CONFIG for tests and
    /// isolated runs, then a pointer file next to the default location,
    /// then the platform default.
    pub fn path() -> Result<PathBuf, SettingsError> {
        if let Ok(env_path) = std::env::var("VENVMAN_CONFIG") {
            let trimmed = env_path.trim();
            if !trimmed.is_empty() {
                return Ok(PathBuf::from(trimmed));
            }
        }

        #[cfg(not(target_os = "windows"))]
        let default = dirs::home_dir()
            .ok_or(SettingsError::NoConfigDir)?
            .join(".config")
            .join("venvman")
            .join("venvman.toml");

        #[cfg(target_os = "windows")]
        let default = dirs::config_dir()
            .ok_or(SettingsError::NoConfigDir)?
            .join("venvman")
            .join("venvman.toml");

        if let Some(parent) = default.parent() {
            let pointer = parent.join(".venvman_config_path");
            if pointer.exists() {
                if let Ok(contents) = fs::read_to_string(&pointer) {
                    let trimmed = contents.trim();
                    if !trimmed.is_empty() {
                        return Ok(PathBuf::from(trimmed));
                    }
                }
            }
        }

        Ok(default)
    }

    pub fn load() -> Result<Self, SettingsError> {
        let path = Self::path()?;
        if path.exists() {
            let content = fs::read_to_string(&path).map_err(SettingsError::Read)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Settings::default())
        }
    }

    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(SettingsError::Write)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content).map_err(SettingsError::Write)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "prefix" => Some(self.prefix.clone()),
            "suffix" => Some(self.suffix.clone()),
            "separator" => Some(self.separator.clone()),
            "fields" => Some(self.fields.join(",")),
            "dismissed-python-warning" => Some(self.dismissed_python_warning.to_string()),
            _ => None,
        }
    }

    /// Set a value by key. Returns false for unknown keys.
    pub fn set(&mut self, key: &str, value: String) -> bool {
        match key {
            "prefix" => self.prefix = value,
            "suffix" => self.suffix = value,
            "separator" => self.separator = value,
            "fields" => {
                self.fields = value
                    .split(',')
                    .map(|field| field.trim().to_string())
                    .filter(|field| !field.is_empty())
                    .collect();
            }
            "dismissed-python-warning" => {
                self.dismissed_python_warning = value.trim().eq_ignore_ascii_case("true");
            }
            _ => return false,
        }
        true
    }

    pub fn values_iter(&self) -> Vec<(&str, String)> {
        vec![
            ("prefix", self.prefix.clone()),
            ("suffix", self.suffix.clone()),
            ("separator", self.separator.clone()),
            ("fields", self.fields.join(",")),
            (
                "dismissed-python-warning",
                self.dismissed_python_warning.to_string(),
            ),
        ]
    }

    /// Enabled decoration fields in display order, unknown names ignored.
    pub fn decoration_fields(&self) -> Vec<DecorationField> {
        self.fields
            .iter()
            .filter_map(|name| name.parse().ok())
            .collect()
    }

    /// Render the decoration string for a venv under these settings.
    pub fn format_decoration(&self, info: &VenvInfo) -> String {
        decoration::format_decoration(
            info,
            &self.decoration_fields(),
            &self.prefix,
            &self.suffix,
            &self.separator,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_info() -> VenvInfo {
        VenvInfo {
            version: "3.11.0".to_string(),
            implementation: Some("CPython".to_string()),
            include_system_site_packages: false,
            creator: Some("uv@0.9.18".to_string()),
        }
    }

    #[test]
    fn test_default_prefix_suffix_separator() {
        let settings = Settings::default();
        assert_eq!(settings.prefix, " [");
        assert_eq!(settings.suffix, "]");
        assert_eq!(settings.separator, " - ");
    }

    #[test]
    fn test_default_fields_are_all_in_order() {
        let settings = Settings::default();
        assert_eq!(
            settings.decoration_fields(),
            DecorationField::ALL.to_vec()
        );
        assert!(!settings.dismissed_python_warning);
    }

    #[test]
    fn test_format_decoration_with_all_fields() {
        let settings = Settings::default();
        assert_eq!(
            settings.format_decoration(&sample_info()),
            " [3.11.0 - CPython - uv@0.9.18]"
        );
    }

    #[test]
    fn test_format_decoration_with_version_only() {
        let mut settings = Settings::default();
        settings.set("fields", "VERSION".to_string());
        assert_eq!(settings.format_decoration(&sample_info()), " [3.11.0]");
    }

    #[test]
    fn test_format_decoration_with_custom_wrapping() {
        let mut settings = Settings::default();
        settings.set("prefix", "(".to_string());
        settings.set("suffix", ")".to_string());
        settings.set("separator", " | ".to_string());
        settings.set("fields", "VERSION,IMPLEMENTATION".to_string());
        assert_eq!(
            settings.format_decoration(&sample_info()),
            "(3.11.0 | CPython)"
        );
    }

    #[test]
    fn test_format_decoration_with_empty_fields() {
        let mut settings = Settings::default();
        settings.set("fields", String::new());
        assert_eq!(settings.format_decoration(&sample_info()), "");
    }

    #[test]
    fn test_unknown_field_names_are_ignored() {
        let mut settings = Settings::default();
        settings.set("fields", "VERSION,BOGUS,IMPLEMENTATION".to_string());
        assert_eq!(
            settings.decoration_fields(),
            vec![DecorationField::Version, DecorationField::Implementation]
        );
    }

    #[test]
    fn test_set_get_round_trip() {
        let mut settings = Settings::default();
        assert!(settings.set("separator", " | ".to_string()));
        assert_eq!(settings.get("separator").as_deref(), Some(" | "));

        assert!(settings.set("dismissed-python-warning", "true".to_string()));
        assert!(settings.dismissed_python_warning);
    }

    #[test]
    fn test_set_unknown_key() {
        let mut settings = Settings::default();
        assert!(!settings.set("unknown-key", "value".to_string()));
        assert_eq!(settings.get("unknown-key"), None);
    }

    #[test]
    fn test_values_iter_lists_every_key() {
        let settings = Settings::default();
        let keys: Vec<&str> = settings.values_iter().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "prefix",
                "suffix",
                "separator",
                "fields",
                "dismissed-python-warning"
            ]
        );
    }

    #[test]
    fn test_toml_round_trip_preserves_field_order() {
        let mut settings = Settings::default();
        settings.set("fields", "IMPLEMENTATION,VERSION".to_string());

        let serialized = toml::to_string_pretty(&settings).unwrap();
        let restored: Settings = toml::from_str(&serialized).unwrap();
        assert_eq!(
            restored.decoration_fields(),
            vec![DecorationField::Implementation, DecorationField::Version]
        );
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("venvman.toml");
        // Only this test touches VENVMAN_CONFIG; the rest never call
        // load/save, so the process-global override is safe.
        std::env::set_var("VENVMAN_CONFIG", &path);

        let mut settings = Settings::default();
        settings.set("prefix", " <".to_string());
        settings.save().unwrap();
        let restored = Settings::load().unwrap();

        std::env::remove_var("VENVMAN_CONFIG");
        assert_eq!(restored.prefix, " <");
        assert_eq!(restored.suffix, "]");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let restored: Settings = toml::from_str("prefix = \" <\"").unwrap();
        assert_eq!(restored.prefix, " <");
        assert_eq!(restored.suffix, "]");
        assert_eq!(restored.fields.len(), 4);
    }
}
