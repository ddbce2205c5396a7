//! Configuration management for ecs-trace.
//!
//! This module handles loading configuration from a TOML file located at
//! `~/.ecs-trace/config.toml`. Configuration covers AWS settings and
//! terminal styling; command-line flags override the AWS settings.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::theme::{ThemeColors, ThemePreset};

/// Main configuration structure for ecs-trace.
///
/// All options are optional and fall back to sensible defaults if not
/// specified in the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// AWS-specific configuration options
    #[serde(default)]
    pub aws: AwsConfig,

    /// UI and display configuration
    #[serde(default)]
    pub ui: UiConfig,
}

/// AWS SDK configuration options.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AwsConfig {
    /// Default AWS region (e.g., "us-east-1")
    /// If not specified, will use AWS SDK's default resolution (env vars, profile, etc.)
    pub region: Option<String>,

    /// AWS profile name to use from ~/.aws/credentials
    /// If not specified, will use the default profile
    pub profile: Option<String>,
}

/// UI configuration options.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Color theme preset ("dark" or "light")
    #[serde(default)]
    pub theme: ThemePreset,

    /// Per-role color overrides on top of the preset
    #[serde(default)]
    pub colors: ThemeColors,
}

impl Config {
    /// Returns the path to the configuration directory (~/.ecs-trace/)
    pub fn config_dir() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Failed to determine home directory")?;
        Ok(home_dir.join(".ecs-trace"))
    }

    /// Returns the path to the configuration file (~/.ecs-trace/config.toml)
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file, creating a default if it doesn't exist.
    ///
    /// # Behavior
    /// 1. If the config file exists, parse and return it
    /// 2. If the config file doesn't exist, create default config file and return defaults
    /// 3. If parsing fails, return error with context
    ///
    /// # Errors
    /// This function will return an error if:
    /// - Home directory cannot be determined
    /// - File I/O operations fail
    /// - TOML parsing fails
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config file: {config_path:?}"))?;

            let config: Config = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {config_path:?}"))?;

            Ok(config)
        } else {
            // Create default config file
            let default_config = Config::default();
            default_config.create_default_config()?;
            Ok(default_config)
        }
    }

    /// Creates a default configuration file at ~/.ecs-trace/config.toml
    ///
    /// Creates the config directory if it doesn't exist, then writes a
    /// default configuration file with helpful comments.
    ///
    /// # Errors
    /// This function will return an error if:
    /// - Directory creation fails
    /// - File write operations fail
    pub fn create_default_config(&self) -> Result<()> {
        let config_dir = Self::config_dir()?;
        let config_path = Self::config_file_path()?;

        // Create directory if it doesn't exist
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {config_dir:?}"))?;
        }

        // Generate default config with comments
        let default_toml = r#"# ecs-trace Configuration File
# This file is automatically generated with default values.
# You can edit this file to customize ecs-trace's behavior.

[aws]
# Default AWS region to use (optional)
# If not specified, uses AWS SDK's default resolution (env vars, ~/.aws/config, etc.)
# region = "us-east-1"

# AWS profile to use from ~/.aws/credentials (optional)
# If not specified, uses the default profile
# profile = "default"

[ui]
# Color theme preset
# Options: "dark", "light"
theme = "dark"

# Per-role color overrides, applied on top of the preset.
# Roles: header, timestamp, source, accent, muted, notice, error
# [ui.colors]
# source = "magenta"
"#;

        fs::write(&config_path, default_toml)
            .with_context(|| format!("Failed to write config file: {config_path:?}"))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert!(config.aws.region.is_none());
        assert!(config.aws.profile.is_none());
        assert_eq!(config.ui.theme, ThemePreset::Dark);
        assert!(config.ui.colors.source.is_none());
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
[aws]
region = "us-west-2"
profile = "production"

[ui]
theme = "light"

[ui.colors]
source = "magenta"
"#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.aws.region, Some("us-west-2".to_string()));
        assert_eq!(config.aws.profile, Some("production".to_string()));
        assert_eq!(config.ui.theme, ThemePreset::Light);
        assert_eq!(config.ui.colors.source, Some("magenta".to_string()));
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[aws]
region = "eu-west-1"
"#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.aws.region, Some("eu-west-1".to_string()));
        assert_eq!(config.aws.profile, None);
        // Should use defaults for other fields
        assert_eq!(config.ui.theme, ThemePreset::Dark);
    }

    #[test]
    fn test_empty_config_parses() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.ui.theme, ThemePreset::Dark);
        assert!(config.aws.profile.is_none());
    }
}
