//! Configuration management for the CLI

use anyhow::{Context, Result};
use restpods_lib::{TimeNormalizer, DEFAULT_TIME_ZONE};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Report settings, layered from defaults, config file and environment
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// IANA time zone used for report timestamps
    pub time_zone: String,
    /// Default look-back period in days
    pub period_days: u32,
    /// Default namespace, all namespaces when unset
    #[serde(default)]
    pub namespace: Option<String>,
    /// Suppress pod warnings by default
    pub ignore_warnings: bool,
}

impl Settings {
    /// Load settings from an explicit file, or the default location when `None`
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("time_zone", DEFAULT_TIME_ZONE)?
            .set_default("period_days", 2)?
            .set_default("ignore_warnings", false)?;

        match path {
            Some(path) => {
                builder = builder.add_source(config::File::from(path).required(true));
            }
            None => {
                if let Some(default_path) = Self::config_path() {
                    builder = builder.add_source(
                        config::File::with_name(&default_path.to_string_lossy()).required(false),
                    );
                }
            }
        }

        let settings: Settings = builder
            .add_source(config::Environment::with_prefix("RESTPODS").try_parsing(true))
            .build()
            .context("Failed to load configuration")?
            .try_deserialize()
            .context("Failed to parse configuration")?;

        settings.normalizer()?;
        Ok(settings)
    }

    /// Time normalizer for the configured zone
    pub fn normalizer(&self) -> Result<TimeNormalizer> {
        TimeNormalizer::from_name(&self.time_zone).context("Invalid time_zone setting")
    }

    /// Configuration file stem; `.toml`, `.json` and `.yaml` are accepted
    fn config_path() -> Option<PathBuf> {
        let home = dirs_next::home_dir()?;
        Some(home.join(".config").join("restpods").join("config"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("restpods.toml");
        std::fs::write(
            &path,
            "time_zone = \"Europe/Berlin\"\nperiod_days = 7\nnamespace = \"payments\"\n",
        )
        .unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.time_zone, "Europe/Berlin");
        assert_eq!(settings.period_days, 7);
        assert_eq!(settings.namespace.as_deref(), Some("payments"));
        assert!(!settings.ignore_warnings);
    }

    #[test]
    fn test_file_values_fall_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("restpods.json");
        std::fs::write(&path, r#"{"ignore_warnings": true}"#).unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.time_zone, DEFAULT_TIME_ZONE);
        assert_eq!(settings.period_days, 2);
        assert!(settings.namespace.is_none());
        assert!(settings.ignore_warnings);
    }

    #[test]
    fn test_invalid_time_zone_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("restpods.toml");
        std::fs::write(&path, "time_zone = \"Nowhere/Special\"\n").unwrap();

        assert!(Settings::load(Some(&path)).is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.toml");

        assert!(Settings::load(Some(&path)).is_err());
    }
}
