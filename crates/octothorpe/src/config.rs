// File: src/config.rs
// Purpose: Configuration parsing from octothorpe.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub demo: DemoConfig,
}

/// Application branding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_logo_url")]
    pub logo_url: String,
}

/// Persistence keys
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Key the signed-in session is persisted under
    #[serde(default = "default_session_key")]
    pub session_key: String,
}

/// Demo data seeded at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    #[serde(default = "default_true")]
    pub seed: bool,

    #[serde(default = "default_admin_email")]
    pub admin_email: String,

    #[serde(default = "default_admin_password")]
    pub admin_password: String,

    #[serde(default = "default_event_count")]
    pub event_count: usize,
}

// Default values
fn default_title() -> String {
    "Event Management System".to_string()
}

fn default_logo_url() -> String {
    "assets/logo.svg".to_string()
}

fn default_session_key() -> String {
    "ems_session".to_string()
}

fn default_admin_email() -> String {
    "admin@example.com".to_string()
}

fn default_admin_password() -> String {
    "changeme123".to_string()
}

fn default_event_count() -> usize {
    3
}

fn default_true() -> bool {
    true
}

// Default implementations
impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            logo_url: default_logo_url(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            session_key: default_session_key(),
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            seed: true,
            admin_email: default_admin_email(),
            admin_password: default_admin_password(),
            event_count: default_event_count(),
        }
    }
}

impl Config {
    /// Load configuration from octothorpe.toml
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        // If file is empty, return default config
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        // Parse TOML
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./octothorpe.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("octothorpe.toml")
    }
}
